use super::{check_label, Codec};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

/// In-memory codec for testing.
///
/// Uses `RefCell` so the `Codec` trait can stay `&self`; rolodex is
/// single-threaded.
#[derive(Default)]
pub struct MemoryCodec {
    documents: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a label, bypassing the write counter.
    pub fn with_document(self, label: &str, document: &str) -> Self {
        self.documents
            .borrow_mut()
            .insert(label.to_string(), document.to_string());
        self
    }

    pub fn document(&self, label: &str) -> Option<String> {
        self.documents.borrow().get(label).cloned()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }

    /// Make every following write fail, as a full disk would.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl Codec for MemoryCodec {
    fn read(&self, label: &str) -> Result<Option<String>> {
        check_label(label)?;
        Ok(self.documents.borrow().get(label).cloned())
    }

    fn write(&self, label: &str, document: &str) -> Result<()> {
        check_label(label)?;
        if *self.simulate_write_error.borrow() {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated write failure").into());
        }
        self.documents
            .borrow_mut()
            .insert(label.to_string(), document.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
