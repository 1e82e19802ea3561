use super::{check_label, Codec};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FILE_EXT: &str = ".json";

/// Stores each label as `<root>/<label>.json`.
pub struct JsonFileCodec {
    root: PathBuf,
}

impl JsonFileCodec {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn label_path(&self, label: &str) -> Result<PathBuf> {
        check_label(label)?;
        Ok(self.root.join(format!("{}{}", label, FILE_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl Codec for JsonFileCodec {
    fn read(&self, label: &str) -> Result<Option<String>> {
        let path = self.label_path(label)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, label: &str, document: &str) -> Result<()> {
        let path = self.label_path(label)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", label, Uuid::new_v4()));
        fs::write(&tmp_path, document)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }
}
