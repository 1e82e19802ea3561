use crate::error::{Result, RolodexError};
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{3,15}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Which optional format checks run on phone and email values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub check_phone: bool,
    pub check_email: bool,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            check_phone: true,
            check_email: true,
        }
    }
}

/// The fields of a contact that can be replaced after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Phone,
    Email,
    Birthday,
    Notes,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Phone,
        ContactField::Email,
        ContactField::Birthday,
        ContactField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Birthday => "birthday",
            ContactField::Notes => "notes",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "phone" => Ok(ContactField::Phone),
            "email" => Ok(ContactField::Email),
            "birthday" => Ok(ContactField::Birthday),
            "notes" => Ok(ContactField::Notes),
            "name" => Err(RolodexError::validation("field", "name cannot be changed")),
            other => Err(RolodexError::validation(
                "field",
                format!("unknown field '{}' (phone, email, birthday, notes)", other),
            )),
        }
    }
}

/// A single entry in the address book.
///
/// The name is fixed at construction; it is the key the book indexes by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    phone: String,
    email: String,
    birthday: Option<NaiveDate>,
    notes: Option<String>,
}

impl Contact {
    pub fn new(name: &str, phone: &str, email: &str, rules: &FieldRules) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RolodexError::validation("name", "cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            phone: validate_phone(phone, rules)?,
            email: validate_email(email, rules)?,
            birthday: None,
            notes: None,
        })
    }

    /// Sets the birthday from `DD.MM.YYYY` text; blank text clears it.
    pub fn with_birthday(mut self, birthday: &str) -> Result<Self> {
        self.birthday = parse_birthday(birthday)?;
        Ok(self)
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = normalize_notes(notes);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Birthday rendered the way it is typed in, or an empty string.
    pub fn birthday_text(&self) -> String {
        self.birthday
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Replaces one field, validating only the new value.
    /// On error the contact is left untouched.
    pub fn set_field(&mut self, field: ContactField, value: &str, rules: &FieldRules) -> Result<()> {
        match field {
            ContactField::Phone => self.phone = validate_phone(value, rules)?,
            ContactField::Email => self.email = validate_email(value, rules)?,
            ContactField::Birthday => self.birthday = parse_birthday(value)?,
            ContactField::Notes => self.notes = normalize_notes(value),
        }
        Ok(())
    }

    /// Case-insensitive substring match over every field.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let birthday = self.birthday_text();
        [
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            birthday.as_str(),
            self.notes.as_deref().unwrap_or(""),
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
    }

    /// Days until the next birthday, counting `today` as 0.
    ///
    /// A 29 February birthday falls on 28 February in non-leap years.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        let birthday = self.birthday?;
        let mut next = anniversary(birthday, today.year())?;
        if next < today {
            next = anniversary(birthday, today.year() + 1)?;
        }
        Some((next - today).num_days())
    }
}

fn anniversary(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

fn validate_phone(value: &str, rules: &FieldRules) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || !rules.check_phone {
        return Ok(value.to_string());
    }
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    if PHONE_RE.is_match(&digits) {
        Ok(value.to_string())
    } else {
        Err(RolodexError::validation(
            "phone",
            format!("'{}' should be 3 to 15 digits, optionally starting with +", value),
        ))
    }
}

fn validate_email(value: &str, rules: &FieldRules) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || !rules.check_email || EMAIL_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(RolodexError::validation(
            "email",
            format!("'{}' is not an email address", value),
        ))
    }
}

fn parse_birthday(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        RolodexError::validation("birthday", format!("'{}' is not a DD.MM.YYYY date", value))
    })?;
    if date > Local::now().date_naive() {
        return Err(RolodexError::validation(
            "birthday",
            format!("'{}' is in the future", value),
        ));
    }
    Ok(Some(date))
}

fn normalize_notes(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_empty_name() {
        let err = Contact::new("   ", "123", "a@x.com", &FieldRules::default()).unwrap_err();
        assert!(matches!(err, RolodexError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn trims_name_and_accepts_blank_optional_fields() {
        let contact = Contact::new("  Alice ", "", "", &FieldRules::default()).unwrap();
        assert_eq!(contact.name(), "Alice");
        assert_eq!(contact.phone(), "");
        assert_eq!(contact.email(), "");
        assert_eq!(contact.birthday(), None);
        assert_eq!(contact.notes(), None);
    }

    #[test]
    fn phone_check_allows_separators() {
        let rules = FieldRules::default();
        let contact = Contact::new("Bob", "+38 (050) 123-45-67", "", &rules).unwrap();
        assert_eq!(contact.phone(), "+38 (050) 123-45-67");
        assert!(Contact::new("Bob", "12ab", "", &rules).is_err());
        assert!(Contact::new("Bob", "12", "", &rules).is_err());
    }

    #[test]
    fn lenient_rules_skip_format_checks() {
        let rules = FieldRules {
            check_phone: false,
            check_email: false,
        };
        let contact = Contact::new("Bob", "call me", "nope", &rules).unwrap();
        assert_eq!(contact.phone(), "call me");
        assert_eq!(contact.email(), "nope");
    }

    #[test]
    fn email_check() {
        let rules = FieldRules::default();
        assert!(Contact::new("A", "", "a@x.com", &rules).is_ok());
        assert!(Contact::new("A", "", "a@x", &rules).is_err());
        assert!(Contact::new("A", "", "a b@x.com", &rules).is_err());
    }

    #[test]
    fn birthday_parsing() {
        let contact = Contact::new("A", "", "", &FieldRules::default())
            .unwrap()
            .with_birthday("05.03.1990")
            .unwrap();
        assert_eq!(contact.birthday(), Some(date(5, 3, 1990)));
        assert_eq!(contact.birthday_text(), "05.03.1990");

        let base = Contact::new("A", "", "", &FieldRules::default()).unwrap();
        assert!(base.clone().with_birthday("1990-03-05").is_err());
        assert!(base.with_birthday("01.01.9999").is_err());
    }

    #[test]
    fn set_field_revalidates_only_that_field() {
        let rules = FieldRules::default();
        let mut contact = Contact::new("A", "123", "a@x.com", &rules).unwrap();

        contact.set_field(ContactField::Phone, "4567", &rules).unwrap();
        assert_eq!(contact.phone(), "4567");
        assert_eq!(contact.email(), "a@x.com");

        let before = contact.clone();
        assert!(contact.set_field(ContactField::Email, "broken", &rules).is_err());
        assert_eq!(contact, before);

        contact.set_field(ContactField::Notes, "  met at work ", &rules).unwrap();
        assert_eq!(contact.notes(), Some("met at work"));
        contact.set_field(ContactField::Notes, "", &rules).unwrap();
        assert_eq!(contact.notes(), None);
    }

    #[test]
    fn field_parsing() {
        assert_eq!("Phone".parse::<ContactField>().unwrap(), ContactField::Phone);
        assert_eq!(" notes ".parse::<ContactField>().unwrap(), ContactField::Notes);
        assert!("name".parse::<ContactField>().is_err());
        assert!("age".parse::<ContactField>().is_err());
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let contact = Contact::new("Alice", "123", "alice@x.com", &FieldRules::default())
            .unwrap()
            .with_notes("Plays Chess");
        assert!(contact.matches("ali"));
        assert!(contact.matches("ALI"));
        assert!(contact.matches("23"));
        assert!(contact.matches("chess"));
        assert!(contact.matches(""));
        assert!(!contact.matches("bob"));
    }

    #[test]
    fn days_to_birthday_wraps_the_year() {
        let contact = Contact::new("A", "", "", &FieldRules::default())
            .unwrap()
            .with_birthday("10.01.1990")
            .unwrap();
        assert_eq!(contact.days_to_birthday(date(10, 1, 2024)), Some(0));
        assert_eq!(contact.days_to_birthday(date(5, 1, 2024)), Some(5));
        assert_eq!(contact.days_to_birthday(date(31, 12, 2023)), Some(10));
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        let contact = Contact::new("A", "", "", &FieldRules::default())
            .unwrap()
            .with_birthday("29.02.2000")
            .unwrap();
        assert_eq!(contact.days_to_birthday(date(27, 2, 2023)), Some(1));
        assert_eq!(contact.days_to_birthday(date(27, 2, 2024)), Some(2));
    }

    #[test]
    fn no_birthday_means_no_countdown() {
        let contact = Contact::new("A", "", "", &FieldRules::default()).unwrap();
        assert_eq!(contact.days_to_birthday(date(1, 1, 2024)), None);
    }
}
