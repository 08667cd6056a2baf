//! Case-insensitive name search.

use crate::model::contact::Contact;

/// Returns whether `contact.name` contains `query`, ignoring case.
pub fn name_matches(contact: &Contact, query: &str) -> bool {
    contains_lowered(contact, &query.to_lowercase())
}

/// Projects `contacts` through an optional name query.
///
/// `None` means no filter and yields every contact. `Some("")` also matches
/// everything. Relative order is preserved.
pub fn filter_by_name<'a>(contacts: &'a [Contact], query: Option<&str>) -> Vec<&'a Contact> {
    filter_indexed_by_name(contacts, query)
        .into_iter()
        .map(|(_, contact)| contact)
        .collect()
}

/// Same projection as [`filter_by_name`], pairing each match with its index
/// in `contacts`.
pub fn filter_indexed_by_name<'a>(
    contacts: &'a [Contact],
    query: Option<&str>,
) -> Vec<(usize, &'a Contact)> {
    let needle = query.map(str::to_lowercase);
    contacts
        .iter()
        .enumerate()
        .filter(|(_, contact)| {
            needle
                .as_deref()
                .map_or(true, |needle| contains_lowered(contact, needle))
        })
        .collect()
}

fn contains_lowered(contact: &Contact, needle: &str) -> bool {
    contact.name.to_lowercase().contains(needle)
}
