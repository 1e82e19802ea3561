//! # Address Book
//!
//! The in-memory collection of contacts, kept in insertion order and keyed by
//! name. The book owns its contacts; a [`Codec`] only sees a borrowed slice
//! on save and hands back freshly decoded contacts on load.
//!
//! Invariants:
//! - no two contacts share a name (exact comparison)
//! - every contact has a non-empty name (enforced by [`Contact::new`])

use crate::codec::{self, Codec};
use crate::error::{Result, RolodexError};
use crate::model::{Contact, ContactField, FieldRules};
use chrono::NaiveDate;
use log::{debug, warn};

/// How strictly a whole document is treated on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Explicit loads: an unreadable document is an error.
    Strict,
    /// The auto-save label: an unreadable document is logged and ignored.
    Lenient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub label: String,
    /// False when nothing was stored under the label; the book is unchanged.
    pub found: bool,
    /// True when a lenient load could not read the document at all.
    pub unreadable: bool,
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.contacts.iter().position(|c| c.name() == name)
    }

    pub fn add(&mut self, contact: Contact) -> Result<()> {
        if self.contains(contact.name()) {
            return Err(RolodexError::DuplicateName(contact.name().to_string()));
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Contact> {
        self.position(name)
            .map(|i| &self.contacts[i])
            .ok_or_else(|| RolodexError::NotFound(name.trim().to_string()))
    }

    /// Contacts with any field containing `query`, case-insensitively.
    ///
    /// The iterator is lazy; calling `search` again starts over.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Contact> + 'a {
        self.contacts.iter().filter(move |c| c.matches(query))
    }

    /// Replace one field of the named contact and return the updated contact.
    pub fn edit(
        &mut self,
        name: &str,
        field: ContactField,
        value: &str,
        rules: &FieldRules,
    ) -> Result<&Contact> {
        let index = self
            .position(name)
            .ok_or_else(|| RolodexError::NotFound(name.trim().to_string()))?;
        self.contacts[index].set_field(field, value, rules)?;
        Ok(&self.contacts[index])
    }

    pub fn remove(&mut self, name: &str) -> Result<Contact> {
        let index = self
            .position(name)
            .ok_or_else(|| RolodexError::NotFound(name.trim().to_string()))?;
        Ok(self.contacts.remove(index))
    }

    /// Contacts whose next birthday is at most `within_days` away, soonest first.
    pub fn upcoming_birthdays(&self, today: NaiveDate, within_days: i64) -> Vec<(&Contact, i64)> {
        let mut upcoming: Vec<(&Contact, i64)> = self
            .contacts
            .iter()
            .filter_map(|c| c.days_to_birthday(today).map(|days| (c, days)))
            .filter(|(_, days)| *days <= within_days)
            .collect();
        upcoming.sort_by(|(a, days_a), (b, days_b)| {
            days_a.cmp(days_b).then_with(|| a.name().cmp(b.name()))
        });
        upcoming
    }

    /// Write the whole book under `label`, replacing what was there.
    pub fn save<C: Codec>(&self, codec: &C, label: &str) -> Result<()> {
        let document = codec::encode(&self.contacts)?;
        codec.write(label, &document)?;
        debug!("saved {} contacts to '{}'", self.contacts.len(), label);
        Ok(())
    }

    /// Replace the book with the contents stored under `label`.
    ///
    /// A missing label leaves the book as it is. Records that fail to decode
    /// or validate, and repeated names, are dropped with a warning.
    pub fn load<C: Codec>(
        &mut self,
        codec: &C,
        label: &str,
        rules: &FieldRules,
        mode: LoadMode,
    ) -> Result<LoadReport> {
        let mut report = LoadReport {
            label: label.to_string(),
            ..LoadReport::default()
        };

        let records = match read_records(codec, label, rules) {
            Ok(Some(records)) => records,
            Ok(None) => {
                debug!("nothing stored under '{}'", label);
                return Ok(report);
            }
            Err(e) if mode == LoadMode::Lenient => {
                warn!("ignoring unreadable '{}': {}", label, e);
                report.found = true;
                report.unreadable = true;
                return Ok(report);
            }
            Err(e) => return Err(e),
        };

        report.found = true;
        let mut loaded = AddressBook::new();
        for record in records {
            match record.and_then(|contact| loaded.add(contact)) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    warn!("dropping stored record from '{}': {}", label, e);
                    report.skipped += 1;
                }
            }
        }

        *self = loaded;
        debug!(
            "loaded {} contacts from '{}' ({} skipped)",
            report.loaded, label, report.skipped
        );
        Ok(report)
    }
}

fn read_records<C: Codec>(
    codec: &C,
    label: &str,
    rules: &FieldRules,
) -> Result<Option<Vec<Result<Contact>>>> {
    match codec.read(label)? {
        Some(document) => Ok(Some(codec::decode(label, &document, rules)?)),
        None => Ok(None),
    }
}
