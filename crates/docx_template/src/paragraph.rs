//! Paragraph-level placeholder substitution
//!
//! Matching works on a paragraph's full concatenated text, so a token that
//! Word split across several runs is still found. A paragraph whose text
//! changes is rewritten as its original start tag and `w:pPr` followed by
//! a single plain run; the former runs and their formatting are dropped.

use crate::error::{DocxError, DocxResult};
use crate::scanner::ScannedParagraph;
use quick_xml::escape::partial_escape;
use report_model::PlaceholderContext;

/// Opening sequence shared by every placeholder token
const TOKEN_OPEN: &str = "{{";

/// Apply every placeholder of `context` to `text`, in key order.
///
/// Replacement is sequential: a value that itself contains a later key's
/// token is substituted again when that key is processed. Returns `None`
/// when the text is empty or does not change.
pub fn substitute(text: &str, context: &PlaceholderContext) -> Option<String> {
    if text.is_empty() || !text.contains(TOKEN_OPEN) {
        return None;
    }

    let mut new_text = text.to_string();
    for (key, value) in context.iter() {
        if new_text.contains(key.token()) {
            new_text = new_text.replace(key.token(), value);
        }
    }

    (new_text != text).then_some(new_text)
}

/// Build the replacement XML for a scanned paragraph carrying `text`.
///
/// Fails when `text` holds a character XML 1.0 cannot represent.
pub fn render_paragraph(part_xml: &str, paragraph: &ScannedParagraph, text: &str) -> DocxResult<String> {
    let prefix = paragraph.element_prefix();
    let mut xml = String::with_capacity(paragraph.span.len().min(256) + text.len() * 2);

    xml.push_str(&part_xml[paragraph.start_tag.clone()]);
    if let Some(props) = &paragraph.properties {
        xml.push_str(&part_xml[props.clone()]);
    }
    xml.push_str(&render_run(&prefix, text)?);
    xml.push_str("</");
    xml.push_str(&paragraph.qname);
    xml.push('>');
    Ok(xml)
}

/// Characters outside the XML 1.0 `Char` production
fn is_xml_illegal(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// A single run holding `text`: tabs become `w:tab`; line, vertical tab
/// and form feed breaks become `w:br`
fn render_run(prefix: &str, text: &str) -> DocxResult<String> {
    if text.is_empty() {
        return Ok(format!("<{}r/>", prefix));
    }

    let mut xml = format!("<{}r>", prefix);
    let mut segment = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\t' => {
                push_text(&mut xml, prefix, &mut segment);
                xml.push_str(&format!("<{}tab/>", prefix));
            }
            '\r' | '\n' | '\u{b}' | '\u{c}' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                push_text(&mut xml, prefix, &mut segment);
                xml.push_str(&format!("<{}br/>", prefix));
            }
            c if is_xml_illegal(c) => {
                return Err(DocxError::InvalidStructure(format!(
                    "Character U+{:04X} cannot be written to a document",
                    c as u32
                )));
            }
            _ => segment.push(c),
        }
    }
    push_text(&mut xml, prefix, &mut segment);

    xml.push_str(&format!("</{}r>", prefix));
    Ok(xml)
}

fn push_text(xml: &mut String, prefix: &str, segment: &mut String) {
    if segment.is_empty() {
        return;
    }

    let preserve = segment.starts_with(char::is_whitespace) || segment.ends_with(char::is_whitespace);
    if preserve {
        xml.push_str(&format!("<{}t xml:space=\"preserve\">", prefix));
    } else {
        xml.push_str(&format!("<{}t>", prefix));
    }
    xml.push_str(&partial_escape(segment.as_str()));
    xml.push_str(&format!("</{}t>", prefix));
    segment.clear();
}
