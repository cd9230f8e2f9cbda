//! ZIP archive reading and XML parsing utilities

use crate::error::{DocxError, DocxResult};
use quick_xml::events::BytesStart;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Package entry that every DOCX must contain
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
/// Package-level relationships
pub const ROOT_RELS_PART: &str = "_rels/.rels";

/// A wrapper around a ZIP archive for reading DOCX files
pub struct DocxReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> DocxReader<R> {
    /// Create a new DOCX reader from a source that implements Read + Seek
    pub fn new(reader: R) -> DocxResult<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read a file from the archive as a string
    pub fn read_file_as_string(&mut self, path: &str) -> DocxResult<String> {
        let mut file = self.archive.by_name(path).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                DocxError::MissingPart(path.to_string())
            } else {
                DocxError::from(e)
            }
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(String::from_utf8(contents)?)
    }

    /// Check if a file exists in the archive
    pub fn file_exists(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if this has the minimum structure of an OOXML package
    pub fn is_valid_docx(&self) -> bool {
        self.file_exists(CONTENT_TYPES_PART) && self.file_exists(ROOT_RELS_PART)
    }

    /// Direct access to the underlying archive (used for raw entry copies)
    pub fn archive_mut(&mut self) -> &mut ZipArchive<R> {
        &mut self.archive
    }
}

/// XML reader utilities for parsing DOCX XML content
pub struct XmlParser;

impl XmlParser {
    /// Create an XML reader that drops insignificant whitespace.
    ///
    /// Only suitable for structural parts such as `.rels` files.
    pub fn from_string(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);
        reader
    }

    /// Create an XML reader that reports every byte of the input,
    /// so event positions can be used to splice the original text
    pub fn preserving(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        reader
    }

    /// Get an attribute value from an event
    pub fn get_attribute(event: &BytesStart, name: &[u8]) -> Option<String> {
        event.attributes()
            .filter_map(|a| a.ok())
            .find(|a| a.key.as_ref() == name)
            .map(|a| String::from_utf8_lossy(&a.value).to_string())
    }

    /// Local part of a possibly prefixed element name (`w:p` -> `p`)
    pub fn local_name(name: &[u8]) -> &[u8] {
        match name.iter().rposition(|&b| b == b':') {
            Some(idx) => &name[idx + 1..],
            None => name,
        }
    }

    /// Prefix of a qualified element name (`w:p` -> `Some("w")`)
    pub fn prefix(name: &[u8]) -> Option<&[u8]> {
        name.iter().rposition(|&b| b == b':').map(|idx| &name[..idx])
    }

    /// Check if an element name matches with optional namespace prefix
    pub fn matches_element(name: &[u8], expected: &str) -> bool {
        Self::local_name(name) == expected.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_matches_element() {
        assert!(XmlParser::matches_element(b"p", "p"));
        assert!(XmlParser::matches_element(b"w:p", "p"));
        assert!(!XmlParser::matches_element(b"w:r", "p"));
        assert!(!XmlParser::matches_element(b"w:pPr", "p"));
    }

    #[test]
    fn test_prefix() {
        assert_eq!(XmlParser::prefix(b"w:p"), Some(&b"w"[..]));
        assert_eq!(XmlParser::prefix(b"p"), None);
    }

    #[test]
    fn test_reader_validity() {
        let bytes = archive_with(&[(CONTENT_TYPES_PART, "<Types/>"), (ROOT_RELS_PART, "<Relationships/>")]);
        let reader = DocxReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.is_valid_docx());
        assert_eq!(reader.len(), 2);

        let bytes = archive_with(&[("mimetype", "application/vnd.oasis.opendocument.text")]);
        let reader = DocxReader::new(Cursor::new(bytes)).unwrap();
        assert!(!reader.is_valid_docx());
    }

    #[test]
    fn test_missing_part() {
        let bytes = archive_with(&[(CONTENT_TYPES_PART, "<Types/>")]);
        let mut reader = DocxReader::new(Cursor::new(bytes)).unwrap();
        let result = reader.read_file_as_string("word/document.xml");
        assert!(matches!(result, Err(DocxError::MissingPart(_))));
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxReader::new(Cursor::new(b"plain text, not a package".to_vec()));
        assert!(matches!(result, Err(DocxError::Zip(_))));
    }
}
