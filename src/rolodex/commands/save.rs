use crate::book::AddressBook;
use crate::codec::Codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run<C: Codec>(book: &AddressBook, codec: &C, label: &str) -> Result<CmdResult> {
    book.save(codec, label)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Saved {} contact(s) to '{}'",
        book.len(),
        label
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::memory::MemoryCodec;
    use crate::error::RolodexError;

    #[test]
    fn writes_the_label() {
        let codec = MemoryCodec::new();
        run(&AddressBook::new(), &codec, "backup").unwrap();
        assert_eq!(codec.document("backup").as_deref(), Some("[]"));
    }

    #[test]
    fn rejects_bad_labels() {
        let codec = MemoryCodec::new();
        let err = run(&AddressBook::new(), &codec, "../x").unwrap_err();
        assert!(matches!(err, RolodexError::Codec { .. }));
    }
}
