//! # Persistence Codec
//!
//! The address book is persisted as a named document ("label"). The [`Codec`]
//! trait moves raw documents in and out of storage; [`encode`] and [`decode`]
//! own the document format so every backend shares it.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileCodec`]: one `<label>.json` file per label in the data
//!   directory, written atomically.
//! - [`memory::MemoryCodec`]: documents kept in memory, for tests.
//!
//! ## Document Format
//!
//! A pretty-printed JSON array with one object per contact, in book order:
//!
//! ```text
//! [
//!   {
//!     "name": "Alice",
//!     "phone": "123",
//!     "email": "a@x.com",
//!     "birthday": "05.03.1990",
//!     "notes": null
//!   }
//! ]
//! ```
//!
//! Decoding is two-level. A document that is not a JSON array fails as a
//! whole; inside a valid array each record decodes (and validates) on its
//! own, so one bad record never hides the rest.

use crate::error::{Result, RolodexError};
use crate::model::{Contact, FieldRules};
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Raw document storage keyed by label.
pub trait Codec {
    /// Read the document stored under `label`.
    /// Returns Ok(None) if nothing is stored there yet.
    fn read(&self, label: &str) -> Result<Option<String>>;

    /// Replace the document stored under `label`.
    fn write(&self, label: &str, document: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredContact {
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<&Contact> for StoredContact {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name().to_string(),
            phone: contact.phone().to_string(),
            email: contact.email().to_string(),
            birthday: contact.birthday().map(|_| contact.birthday_text()),
            notes: contact.notes().map(str::to_string),
        }
    }
}

impl StoredContact {
    fn into_contact(self, rules: &FieldRules) -> Result<Contact> {
        let contact = Contact::new(&self.name, &self.phone, &self.email, rules)?
            .with_birthday(self.birthday.as_deref().unwrap_or(""))?
            .with_notes(self.notes.as_deref().unwrap_or(""));
        Ok(contact)
    }
}

/// Labels double as file stems, so they stay within a safe alphabet.
pub fn check_label(label: &str) -> Result<()> {
    let valid = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RolodexError::codec(
            label,
            "labels may only contain letters, digits, '_' and '-'",
        ))
    }
}

pub fn encode(contacts: &[Contact]) -> Result<String> {
    let stored: Vec<StoredContact> = contacts.iter().map(StoredContact::from).collect();
    Ok(serde_json::to_string_pretty(&stored)?)
}

/// Decode a document into per-record results, in document order.
pub fn decode(label: &str, document: &str, rules: &FieldRules) -> Result<Vec<Result<Contact>>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(document)
        .map_err(|e| RolodexError::codec(label, format!("not a contact list ({})", e)))?;

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(position, value)| {
            serde_json::from_value::<StoredContact>(value)
                .map_err(|e| RolodexError::codec(label, format!("record {}: {}", position + 1, e)))
                .and_then(|stored| stored.into_contact(rules))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_every_field_with_fixed_keys() {
        let contact = Contact::new("Alice", "123", "a@x.com", &FieldRules::default())
            .unwrap()
            .with_birthday("05.03.1990")
            .unwrap();
        let document = encode(&[contact]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();

        assert_eq!(value[0]["name"], "Alice");
        assert_eq!(value[0]["phone"], "123");
        assert_eq!(value[0]["email"], "a@x.com");
        assert_eq!(value[0]["birthday"], "05.03.1990");
        assert!(value[0]["notes"].is_null());
    }

    #[test]
    fn decode_keeps_good_records_next_to_bad_ones() {
        let document = r#"[
            {"name": "Alice", "phone": "123", "email": "a@x.com"},
            {"phone": "456"},
            {"name": "Bob", "phone": "not a phone"},
            {"name": "Carol", "birthday": "31.12.1980", "notes": "neighbour"}
        ]"#;
        let records = decode("auto_save", document, &FieldRules::default()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].as_ref().unwrap().name(), "Alice");
        assert!(matches!(records[1], Err(RolodexError::Codec { .. })));
        assert!(matches!(records[2], Err(RolodexError::Validation { .. })));
        let carol = records[3].as_ref().unwrap();
        assert_eq!(carol.notes(), Some("neighbour"));
        assert_eq!(carol.birthday_text(), "31.12.1980");
    }

    #[test]
    fn decode_rejects_a_document_that_is_not_a_list() {
        let err = decode("backup", "{\"name\": \"Alice\"}", &FieldRules::default()).unwrap_err();
        assert!(matches!(err, RolodexError::Codec { ref label, .. } if label == "backup"));

        let err = decode("backup", "garbage", &FieldRules::default()).unwrap_err();
        assert!(matches!(err, RolodexError::Codec { .. }));
    }

    #[test]
    fn labels_are_restricted() {
        assert!(check_label("auto_save").is_ok());
        assert!(check_label("backup-2").is_ok());
        assert!(check_label("").is_err());
        assert!(check_label("../etc/passwd").is_err());
        assert!(check_label("with space").is_err());
    }
}
