//! Contact list snapshot codec.
//!
//! The snapshot is a JSON array of `{ "name", "number", "email" }` objects
//! stored as text under [`CONTACTS_KEY`].

use crate::model::contact::Contact;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key of the persisted contact snapshot.
pub const CONTACTS_KEY: &str = "contacts";

/// Snapshot codec error.
///
/// `Decode` keeps only the failure category and position; the parser's own
/// message quotes stored values and must not reach logs.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
    Decode {
        category: Category,
        line: usize,
        column: usize,
    },
}

impl SnapshotError {
    fn decode(err: &serde_json::Error) -> Self {
        Self::Decode {
            category: err.classify(),
            line: err.line(),
            column: err.column(),
        }
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode contact snapshot: {err}"),
            Self::Decode {
                category,
                line,
                column,
            } => write!(
                f,
                "malformed contact snapshot: {} error at line {line} column {column}",
                category_label(*category)
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Decode { .. } => None,
        }
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    }
}

/// Serializes the full contact list.
pub fn encode_snapshot(contacts: &[Contact]) -> Result<String, SnapshotError> {
    serde_json::to_string(contacts).map_err(SnapshotError::Encode)
}

/// Parses a stored snapshot back into an ordered contact list.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Contact>, SnapshotError> {
    serde_json::from_str(raw).map_err(|err| SnapshotError::decode(&err))
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, encode_snapshot, SnapshotError};
    use crate::model::contact::Contact;
    use serde_json::error::Category;

    #[test]
    fn encode_uses_plain_field_names() {
        let contacts = vec![Contact::new("Ann", "123", "a@x.com").unwrap()];
        let raw = encode_snapshot(&contacts).unwrap();
        assert_eq!(raw, r#"[{"name":"Ann","number":"123","email":"a@x.com"}]"#);
    }

    #[test]
    fn decode_keeps_order_and_skips_validation() {
        let raw = r#"[{"name":"Bo","number":"456","email":""},{"name":"Ann","number":"123","email":"a@x.com"}]"#;
        let contacts = decode_snapshot(raw).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Bo");
        assert_eq!(contacts[0].email, "");
        assert_eq!(contacts[1].name, "Ann");
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        let err = decode_snapshot("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Decode { .. }));
        assert!(err.to_string().starts_with("malformed contact snapshot"));
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let err = decode_snapshot(r#"{"name":"Ann"}"#).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Decode {
                category: Category::Data,
                ..
            }
        ));
    }

    #[test]
    fn decode_error_text_never_echoes_stored_values() {
        let wrong_type =
            r#"[{"name":"Ann Secret","number":5551234,"email":"ann@secret.example"}]"#;
        let err = decode_snapshot(wrong_type).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("malformed contact snapshot: data error at line 1 column"));
        assert!(!text.contains("5551234"));
        assert!(!text.contains("Ann Secret"));

        let wrong_shape = r#""Ann Secret 555-1234""#;
        let text = decode_snapshot(wrong_shape).unwrap_err().to_string();
        assert!(!text.contains("Ann Secret"));
        assert!(!text.contains("555-1234"));
        assert!(text.starts_with("malformed contact snapshot: data error"));
    }
}
