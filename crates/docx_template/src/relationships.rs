//! Relationships (.rels) file parsing and part name resolution
//!
//! DOCX uses relationships to connect parts of the document together.
//! The engine only follows them to find the main document part and the
//! header/footer parts it references.

use crate::error::{DocxError, DocxResult};
use crate::reader::XmlParser;
use quick_xml::events::Event;

/// A single relationship in a .rels file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative to the source part)
    pub target: String,
    /// Target mode (Internal or External)
    pub target_mode: TargetMode,
}

impl Relationship {
    /// Whether the type URI ends with the given relationship name.
    ///
    /// Transitional and Strict OOXML use different URI roots but the same
    /// final segment (`officeDocument`, `header`, `footer`, ...).
    pub fn is_kind(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }
}

/// Target mode for relationships
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetMode {
    /// Internal target within the package
    #[default]
    Internal,
    /// External target (URL)
    External,
}

/// Collection of relationships from a .rels file, in document order
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    relationships: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a .rels file from its XML content
    pub fn parse(content: &str) -> DocxResult<Self> {
        let mut result = Self::new();
        let mut reader = XmlParser::from_string(content);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    if XmlParser::matches_element(name.as_ref(), "Relationship") {
                        let id = XmlParser::get_attribute(e, b"Id")
                            .ok_or_else(|| DocxError::RelationshipError("Relationship missing Id".into()))?;
                        let rel_type = XmlParser::get_attribute(e, b"Type")
                            .ok_or_else(|| DocxError::RelationshipError("Relationship missing Type".into()))?;
                        let target = XmlParser::get_attribute(e, b"Target")
                            .ok_or_else(|| DocxError::RelationshipError("Relationship missing Target".into()))?;
                        let target_mode = XmlParser::get_attribute(e, b"TargetMode")
                            .map(|m| if m == "External" { TargetMode::External } else { TargetMode::Internal })
                            .unwrap_or(TargetMode::Internal);

                        result.relationships.push(Relationship {
                            id,
                            rel_type,
                            target,
                            target_mode,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::from(e)),
                _ => {}
            }
        }

        Ok(result)
    }

    /// First internal relationship of a given kind
    pub fn get_by_kind(&self, kind: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.target_mode == TargetMode::Internal && r.is_kind(kind))
    }

    /// All internal relationships of a given kind, in document order
    pub fn get_all_by_kind(&self, kind: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.target_mode == TargetMode::Internal && r.is_kind(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }
}

/// Path of the .rels part describing `part` (`word/document.xml` ->
/// `word/_rels/document.xml.rels`)
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns the .rels file.
///
/// Absolute targets (`/word/header1.xml`) are taken from the package root;
/// relative ones are joined to the source part's directory with `.` and
/// `..` segments collapsed. Returns `None` if the target escapes the root.
pub fn resolve_part_name(source_part: &str, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    if !target.starts_with('/') {
        if let Some((dir, _)) = source_part.rsplit_once('/') {
            segments.extend(dir.split('/').filter(|s| !s.is_empty()));
        }
    }

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
    <Relationship Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
    <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header2.xml"/>
    <Relationship Id="rId10" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_relationships_parsing() {
        let rels = Relationships::parse(DOCUMENT_RELS).unwrap();
        assert_eq!(rels.len(), 5);

        let find = |id: &str| rels.relationships.iter().find(|r| r.id == id).unwrap();

        let r7 = find("rId7");
        assert_eq!(r7.target, "header1.xml");
        assert_eq!(r7.target_mode, TargetMode::Internal);

        let r10 = find("rId10");
        assert_eq!(r10.target_mode, TargetMode::External);
    }

    #[test]
    fn test_get_all_by_kind_keeps_order() {
        let rels = Relationships::parse(DOCUMENT_RELS).unwrap();
        let headers: Vec<_> = rels.get_all_by_kind("header").iter().map(|r| r.target.as_str()).collect();
        assert_eq!(headers, vec!["header1.xml", "header2.xml"]);
        assert_eq!(rels.get_all_by_kind("footer").len(), 1);
        assert!(rels.get_by_kind("hyperlink").is_none());
    }

    #[test]
    fn test_strict_relationship_kind() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument" Target="word/document.xml"/>
        </Relationships>"#;
        let rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.get_by_kind("officeDocument").unwrap().target, "word/document.xml");
    }

    #[test]
    fn test_missing_target_is_error() {
        let xml = r#"<Relationships><Relationship Id="rId1" Type="x/header"/></Relationships>"#;
        assert!(matches!(Relationships::parse(xml), Err(DocxError::RelationshipError(_))));
    }

    #[test]
    fn test_rels_path_for() {
        assert_eq!(rels_path_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_path_for("document.xml"), "_rels/document.xml.rels");
    }

    #[test]
    fn test_resolve_part_name() {
        assert_eq!(resolve_part_name("word/document.xml", "header1.xml").as_deref(), Some("word/header1.xml"));
        assert_eq!(resolve_part_name("word/document.xml", "/word/footer1.xml").as_deref(), Some("word/footer1.xml"));
        assert_eq!(resolve_part_name("word/document.xml", "../customXml/item1.xml").as_deref(), Some("customXml/item1.xml"));
        assert_eq!(resolve_part_name("", "word/document.xml").as_deref(), Some("word/document.xml"));
        assert_eq!(resolve_part_name("word/document.xml", "../../x.xml"), None);
    }
}
