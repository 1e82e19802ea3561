use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(book: &AddressBook, query: &str) -> Result<CmdResult> {
    let found: Vec<_> = book.search(query).cloned().collect();
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No contacts match '{}'", query.trim())));
    }
    Ok(result.with_listed_contacts(found))
}
