//! DOCX package loading
//!
//! Opens the ZIP container, follows the root relationship to the main
//! document part, and collects the header and footer parts that part
//! references. Everything else in the package is carried through to the
//! output untouched.

use crate::error::{DocxError, DocxResult};
use crate::reader::{DocxReader, ROOT_RELS_PART};
use crate::relationships::{rels_path_for, resolve_part_name, Relationships};
use crate::writer::PackageWriter;
use crate::relationship_kinds;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Cursor;

/// Kind of text-bearing region a part belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKind {
    Body,
    Header,
    Footer,
}

impl RegionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Body => "body",
            RegionKind::Header => "header",
            RegionKind::Footer => "footer",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A part of the package that is scanned for placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPart {
    /// Part name inside the archive (e.g. `word/header1.xml`)
    pub name: String,
    pub kind: RegionKind,
}

/// An opened template package
pub struct DocumentPackage<'a> {
    reader: DocxReader<Cursor<&'a [u8]>>,
    regions: Vec<RegionPart>,
}

impl<'a> DocumentPackage<'a> {
    /// Open a package from bytes and discover its text regions
    pub fn open(bytes: &'a [u8]) -> DocxResult<Self> {
        let mut reader = DocxReader::new(Cursor::new(bytes))?;

        if !reader.is_valid_docx() {
            return Err(DocxError::InvalidStructure(
                "Missing [Content_Types].xml or _rels/.rels".to_string(),
            ));
        }

        let root_rels = Relationships::parse(&reader.read_file_as_string(ROOT_RELS_PART)?)?;
        let doc_rel = root_rels
            .get_by_kind(relationship_kinds::OFFICE_DOCUMENT)
            .ok_or_else(|| DocxError::MissingPart("Main document relationship".into()))?;
        let main_part = resolve_part_name("", &doc_rel.target).ok_or_else(|| {
            DocxError::RelationshipError(format!("Invalid main document target: {}", doc_rel.target))
        })?;

        if !reader.file_exists(&main_part) {
            return Err(DocxError::MissingPart(main_part));
        }

        let mut regions = vec![RegionPart {
            name: main_part.clone(),
            kind: RegionKind::Body,
        }];

        let rels_path = rels_path_for(&main_part);
        if reader.file_exists(&rels_path) {
            let doc_rels = Relationships::parse(&reader.read_file_as_string(&rels_path)?)?;
            tracing::trace!(part = %rels_path, relationships = doc_rels.len(), "Parsed document relationships");

            for (rel_kind, kind) in [
                (relationship_kinds::HEADER, RegionKind::Header),
                (relationship_kinds::FOOTER, RegionKind::Footer),
            ] {
                for rel in doc_rels.get_all_by_kind(rel_kind) {
                    let name = resolve_part_name(&main_part, &rel.target).ok_or_else(|| {
                        DocxError::RelationshipError(format!("Invalid {} target in {}: {}", rel_kind, rel.id, rel.target))
                    })?;
                    if !reader.file_exists(&name) {
                        return Err(DocxError::MissingPart(name));
                    }
                    if regions.iter().all(|r| r.name != name) {
                        regions.push(RegionPart { name, kind });
                    }
                }
            }
        }

        tracing::debug!(
            main_part = %main_part,
            regions = regions.len(),
            entries = reader.len(),
            "Opened DOCX package"
        );

        Ok(Self { reader, regions })
    }

    /// Text regions in scan order: body first, then headers, then footers
    pub fn regions(&self) -> &[RegionPart] {
        &self.regions
    }

    /// Read a part's XML
    pub fn read_part(&mut self, name: &str) -> DocxResult<String> {
        self.reader.read_file_as_string(name)
    }

    /// Serialize the package with the given parts replaced
    pub fn save(mut self, rewritten: &BTreeMap<String, String>) -> DocxResult<Vec<u8>> {
        let mut writer = PackageWriter::new(Cursor::new(Vec::new()));
        writer.write_entries(self.reader.archive_mut(), rewritten)?;
        Ok(writer.finish()?.into_inner())
    }
}
