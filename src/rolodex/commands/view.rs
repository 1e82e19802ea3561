use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(book: &AddressBook) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if book.is_empty() {
        result.add_message(CmdMessage::info("The address book is empty"));
    }
    Ok(result.with_listed_contacts(book.iter().cloned().collect()))
}
