use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ContactField, FieldRules};

pub fn run(
    book: &mut AddressBook,
    name: &str,
    field: ContactField,
    value: &str,
    rules: &FieldRules,
) -> Result<CmdResult> {
    let updated = book.edit(name, field, value, rules)?.clone();
    let message = CmdMessage::success(format!("Contact updated ({}): {}", field, updated.name()));
    Ok(CmdResult::default()
        .with_listed_contacts(vec![updated])
        .with_message(message))
}
