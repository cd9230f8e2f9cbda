//! DOCX package writer
//!
//! Rebuilds a ZIP archive entry by entry: untouched entries are copied raw
//! (compressed bytes and metadata unchanged), rewritten parts are deflated
//! with a fixed timestamp so identical input yields identical output.

use crate::error::DocxResult;
use std::collections::BTreeMap;
use std::io::{Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Writer for the output package
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> PackageWriter<W> {
    /// Create a new package writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write an XML part to the archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Copy every entry of `source` in archive order, substituting the
    /// parts present in `rewritten` and raw-copying all others
    pub fn write_entries<R: Read + Seek>(
        &mut self,
        source: &mut ZipArchive<R>,
        rewritten: &BTreeMap<String, String>,
    ) -> DocxResult<()> {
        for index in 0..source.len() {
            let entry = source.by_index_raw(index)?;
            match rewritten.get(entry.name()) {
                Some(content) => {
                    let name = entry.name().to_string();
                    drop(entry);
                    self.write_file(&name, content)?;
                }
                None => self.zip.raw_copy_file(entry)?,
            }
        }
        Ok(())
    }

    /// Finish the archive and hand back the underlying writer
    pub fn finish(self) -> DocxResult<W> {
        Ok(self.zip.finish()?)
    }
}
