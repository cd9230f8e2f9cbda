//! Region paragraph scanning
//!
//! Walks a WordprocessingML part (document, header or footer) as an XML
//! event stream and records every paragraph that sits directly in a block
//! container: the body, a header, a footer, or a table cell. For each one
//! the scanner keeps its concatenated run text and the byte ranges needed
//! to rewrite it without touching the rest of the part.

use crate::error::{DocxError, DocxResult};
use crate::reader::XmlParser;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;

const UTF8_BOM: char = '\u{feff}';

/// A paragraph found directly inside a block container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedParagraph {
    /// Byte range of the whole paragraph element in the part
    pub span: Range<usize>,
    /// Byte range of the `<w:p ...>` start tag
    pub start_tag: Range<usize>,
    /// Byte range of the paragraph's own `w:pPr`, if any
    pub properties: Option<Range<usize>>,
    /// Qualified element name, usually `w:p`
    pub qname: String,
    /// Concatenated run text
    pub text: String,
    /// Number of enclosing tables (0 for body/header/footer paragraphs)
    pub table_depth: usize,
}

impl ScannedParagraph {
    /// Namespace prefix to use for elements written inside this paragraph
    /// (`"w:"`, or empty for a default namespace)
    pub fn element_prefix(&self) -> String {
        match XmlParser::prefix(self.qname.as_bytes()) {
            Some(prefix) => format!("{}:", String::from_utf8_lossy(prefix)),
            None => String::new(),
        }
    }

    pub fn in_table(&self) -> bool {
        self.table_depth > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Container,
    Table,
    Paragraph,
    Properties,
    Hyperlink,
    Run,
    Text,
    Other,
}

impl Frame {
    fn classify(name: &[u8]) -> Frame {
        match XmlParser::local_name(name) {
            b"body" | b"hdr" | b"ftr" | b"tc" => Frame::Container,
            b"tbl" => Frame::Table,
            b"p" => Frame::Paragraph,
            b"pPr" => Frame::Properties,
            b"hyperlink" => Frame::Hyperlink,
            b"r" => Frame::Run,
            b"t" => Frame::Text,
            _ => Frame::Other,
        }
    }
}

/// A paragraph whose end tag has not been seen yet
struct OpenParagraph {
    /// Index of the paragraph frame on the element stack
    depth: usize,
    start: usize,
    start_tag: Range<usize>,
    qname: String,
    properties_start: Option<usize>,
    properties: Option<Range<usize>>,
    text: String,
    table_depth: usize,
}

impl OpenParagraph {
    fn finish(self, end: usize) -> ScannedParagraph {
        ScannedParagraph {
            span: self.start..end,
            start_tag: self.start_tag,
            properties: self.properties,
            qname: self.qname,
            text: self.text,
            table_depth: self.table_depth,
        }
    }
}

/// Run content directly owned by the paragraph: `w:r` children and runs
/// inside `w:hyperlink` children
fn is_run(path: &[Frame]) -> bool {
    matches!(path, [Frame::Run] | [Frame::Hyperlink, Frame::Run])
}

fn is_run_text(path: &[Frame]) -> bool {
    matches!(path, [Frame::Run, Frame::Text] | [Frame::Hyperlink, Frame::Run, Frame::Text])
}

/// Text contributed by an empty run child such as `<w:tab/>`
fn empty_run_child_text(e: &BytesStart) -> Option<&'static str> {
    match XmlParser::local_name(e.name().as_ref()) {
        b"tab" | b"ptab" => Some("\t"),
        b"cr" => Some("\n"),
        b"noBreakHyphen" => Some("-"),
        b"br" => {
            let kind = XmlParser::get_attribute(e, b"w:type").or_else(|| XmlParser::get_attribute(e, b"type"));
            match kind.as_deref() {
                None | Some("textWrapping") => Some("\n"),
                Some(_) => None,
            }
        }
        _ => None,
    }
}

/// Scan a part and return its region paragraphs in document order.
///
/// Byte ranges index into `xml` as given (including a leading BOM).
pub fn scan_paragraphs(xml: &str) -> DocxResult<Vec<ScannedParagraph>> {
    let (offset, body) = match xml.strip_prefix(UTF8_BOM) {
        Some(rest) => (UTF8_BOM.len_utf8(), rest),
        None => (0, xml),
    };

    let mut reader = XmlParser::preserving(body);
    let mut stack: Vec<Frame> = Vec::new();
    let mut current: Option<OpenParagraph> = None;
    let mut paragraphs = Vec::new();

    // Markup cannot contain a raw '<' inside attribute values, so the last
    // '<' before the end of a tag is where that tag starts.
    let tag_start = |end: usize| body[..end].rfind('<').unwrap_or(0);

    loop {
        let event = reader.read_event().map_err(DocxError::from)?;
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(ref e) => {
                let frame = Frame::classify(e.name().as_ref());
                let start = tag_start(end);

                match current.as_mut() {
                    None => {
                        if frame == Frame::Paragraph && stack.last() == Some(&Frame::Container) {
                            current = Some(OpenParagraph {
                                depth: stack.len(),
                                start: start + offset,
                                start_tag: start + offset..end + offset,
                                qname: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                                properties_start: None,
                                properties: None,
                                text: String::new(),
                                table_depth: stack.iter().filter(|f| **f == Frame::Table).count(),
                            });
                        }
                    }
                    Some(para) => {
                        if frame == Frame::Properties && stack.len() == para.depth + 1 {
                            para.properties_start = Some(start + offset);
                        }
                    }
                }

                stack.push(frame);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    DocxError::XmlParse("Unbalanced end tag".to_string())
                })?;

                let closes_paragraph = current.as_ref().is_some_and(|p| stack.len() == p.depth);
                if closes_paragraph {
                    if let Some(para) = current.take() {
                        paragraphs.push(para.finish(end + offset));
                    }
                } else if let Some(para) = current.as_mut() {
                    if frame == Frame::Properties && stack.len() == para.depth + 1 {
                        if let Some(start) = para.properties_start.take() {
                            para.properties = Some(start..end + offset);
                        }
                    }
                }
            }
            Event::Empty(ref e) => {
                let frame = Frame::classify(e.name().as_ref());

                match current.as_mut() {
                    None => {
                        if frame == Frame::Paragraph && stack.last() == Some(&Frame::Container) {
                            let start = tag_start(end) + offset;
                            paragraphs.push(ScannedParagraph {
                                span: start..end + offset,
                                start_tag: start..end + offset,
                                properties: None,
                                qname: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                                text: String::new(),
                                table_depth: stack.iter().filter(|f| **f == Frame::Table).count(),
                            });
                        }
                    }
                    Some(para) => {
                        let path = &stack[para.depth + 1..];
                        if path.is_empty() && frame == Frame::Properties {
                            let start = tag_start(end) + offset;
                            para.properties = Some(start..end + offset);
                        } else if is_run(path) {
                            if let Some(text) = empty_run_child_text(e) {
                                para.text.push_str(text);
                            }
                        }
                    }
                }
            }
            Event::Text(ref e) => {
                if let Some(para) = current.as_mut() {
                    if is_run_text(&stack[para.depth + 1..]) {
                        let text = e.unescape().map_err(|e| DocxError::XmlParse(e.to_string()))?;
                        para.text.push_str(&text);
                    }
                }
            }
            Event::CData(ref e) => {
                if let Some(para) = current.as_mut() {
                    if is_run_text(&stack[para.depth + 1..]) {
                        let text = std::str::from_utf8(e)
                            .map_err(|e| DocxError::XmlParse(e.to_string()))?;
                        para.text.push_str(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() || !stack.is_empty() {
        return Err(DocxError::XmlParse("Unexpected end of part".to_string()));
    }

    Ok(paragraphs)
}
