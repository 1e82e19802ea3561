use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::RolodexConfig;
use crate::error::{Result, RolodexError};
use chrono::NaiveDate;

/// Greet every contact whose birthday is at most `within_days` away.
pub fn run(
    book: &AddressBook,
    today: NaiveDate,
    within_days: i64,
    config: &RolodexConfig,
) -> Result<CmdResult> {
    if !(0..=366).contains(&within_days) {
        return Err(RolodexError::validation(
            "days",
            format!("{} is not between 0 and 366", within_days),
        ));
    }

    let upcoming = book.upcoming_birthdays(today, within_days);
    let mut result = CmdResult::default();
    if upcoming.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No birthdays in the next {} day(s)",
            within_days
        )));
    }
    for (contact, days) in &upcoming {
        result.add_message(CmdMessage::success(
            config.greeting_for(contact.name(), *days),
        ));
    }

    let listed = upcoming.into_iter().map(|(c, _)| c.clone()).collect();
    Ok(result.with_listed_contacts(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, NewContact};
    use crate::model::FieldRules;

    fn book_with_birthdays() -> AddressBook {
        let mut book = AddressBook::new();
        for (name, birthday) in [("Ann", "12.06.1991"), ("Ben", "02.06.1980"), ("Cy", "")] {
            let input = NewContact {
                birthday: birthday.into(),
                ..NewContact::new(name, "", "")
            };
            add::run(&mut book, input, &FieldRules::default()).unwrap();
        }
        book
    }

    #[test]
    fn greets_contacts_in_window_soonest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let config = RolodexConfig {
            greeting: "{name} in {days}".into(),
            ..RolodexConfig::default()
        };

        let result = run(&book_with_birthdays(), today, 14, &config).unwrap();
        let greetings: Vec<_> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(greetings, vec!["Ben in 1", "Ann in 11"]);
        assert_eq!(result.listed_contacts.len(), 2);
    }

    #[test]
    fn nobody_in_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = run(&book_with_birthdays(), today, 0, &RolodexConfig::default()).unwrap();
        assert!(result.listed_contacts.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn rejects_negative_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(run(&AddressBook::new(), today, -1, &RolodexConfig::default()).is_err());
    }
}
