use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult, NewContact};
use crate::error::Result;
use crate::model::{Contact, FieldRules};

pub fn run(book: &mut AddressBook, input: NewContact, rules: &FieldRules) -> Result<CmdResult> {
    let contact = Contact::new(&input.name, &input.phone, &input.email, rules)?
        .with_birthday(&input.birthday)?
        .with_notes(&input.notes);
    let name = contact.name().to_string();
    book.add(contact.clone())?;

    Ok(CmdResult::default()
        .with_listed_contacts(vec![contact])
        .with_message(CmdMessage::success(format!("Contact added: {}", name))))
}
