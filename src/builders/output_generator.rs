use log::info;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::BuilderResult;
use crate::classes::{CardexIndex, JsonObject};

/// Writes the finished index artifact. The payload goes to a temporary
/// sibling first and is renamed into place, so a failed run never leaves a
/// partial artifact behind.
#[derive(Debug, Clone)]
pub struct OutputGenerator {
    pub output_path: PathBuf,
    pub pretty_print: bool,
}

impl OutputGenerator {
    pub fn new(output_path: PathBuf, pretty_print: bool) -> Self {
        Self {
            output_path,
            pretty_print,
        }
    }

    /// Serialize the index and move it into place atomically.
    pub fn write_index(&self, index: &CardexIndex) -> BuilderResult<PathBuf> {
        let payload = if self.pretty_print {
            index.to_json_string_pretty()?
        } else {
            index.to_json_string()?
        };

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.output_path.with_extension("json.tmp");
        {
            let file = fs::File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(payload.as_bytes())?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.output_path)?;

        info!(
            "Wrote {} distinct cards from {} sets to {}",
            index.cards.len(),
            index.sets.len(),
            self.output_path.display()
        );
        Ok(self.output_path.clone())
    }
}
