use crate::book::{AddressBook, LoadMode};
use crate::codec::Codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::FieldRules;

pub fn run<C: Codec>(
    book: &mut AddressBook,
    codec: &C,
    label: &str,
    rules: &FieldRules,
    mode: LoadMode,
) -> Result<CmdResult> {
    let report = book.load(codec, label, rules, mode)?;
    let mut result = CmdResult::default();

    if !report.found {
        result.add_message(CmdMessage::info(format!(
            "Nothing saved under '{}' yet",
            report.label
        )));
    } else if report.unreadable {
        result.add_message(CmdMessage::warning(format!(
            "Could not read '{}'; starting with the current book",
            report.label
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Loaded {} contact(s) from '{}'",
            report.loaded, report.label
        )));
        if report.skipped > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Skipped {} malformed record(s)",
                report.skipped
            )));
        }
    }

    Ok(result)
}
