//! Shared fixtures for building template packages in tests

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A PNG signature followed by filler, stored to check binary entries survive
pub const MEDIA_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR-fixture";

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// A paragraph with a single run
pub fn para(text: &str) -> String {
    runs(&[text])
}

/// A paragraph whose text is split across several runs
pub fn runs(parts: &[&str]) -> String {
    let mut xml = String::from("<w:p>");
    for part in parts {
        xml.push_str(&format!(
            "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
            escape(part)
        ));
    }
    xml.push_str("</w:p>");
    xml
}

/// A paragraph with centered alignment and a bold run
pub fn formatted_para(text: &str) -> String {
    format!(
        "<w:p w:rsidR=\"00A1B2C3\"><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>{}</w:t></w:r></w:p>",
        escape(text)
    )
}

/// A table given as rows of cells, each cell holding raw block XML
pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            xml.push_str("<w:tc><w:tcPr><w:tcW w:w=\"2000\" w:type=\"dxa\"/></w:tcPr>");
            xml.push_str(cell);
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Builder for a minimal but well-formed DOCX package
#[derive(Default)]
pub struct TemplateBuilder {
    body: Vec<String>,
    headers: Vec<Vec<String>>,
    footers: Vec<Vec<String>>,
    with_media: bool,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, xml: impl Into<String>) -> Self {
        self.body.push(xml.into());
        self
    }

    pub fn paragraph(self, text: &str) -> Self {
        self.block(para(text))
    }

    pub fn header(mut self, blocks: &[String]) -> Self {
        self.headers.push(blocks.to_vec());
        self
    }

    pub fn footer(mut self, blocks: &[String]) -> Self {
        self.footers.push(blocks.to_vec());
        self
    }

    pub fn with_media(mut self) -> Self {
        self.with_media = true;
        self
    }

    pub fn document_xml(&self) -> String {
        let mut refs = String::new();
        for i in 0..self.headers.len() {
            refs.push_str(&format!("<w:headerReference w:type=\"default\" r:id=\"rIdH{}\"/>", i + 1));
        }
        for i in 0..self.footers.len() {
            refs.push_str(&format!("<w:footerReference w:type=\"default\" r:id=\"rIdF{}\"/>", i + 1));
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"{}\" xmlns:r=\"{}\"><w:body>{}<w:sectPr>{}<w:pgSz w:w=\"11906\" w:h=\"16838\"/></w:sectPr></w:body></w:document>",
            W_NS,
            R_NS,
            self.body.concat(),
            refs
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut entries: Vec<(String, Vec<u8>)> = Vec::new();

        let mut overrides = String::from(
            "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
        );
        let mut doc_rels = format!(
            "<Relationship Id=\"rIdS\" Type=\"{}/styles\" Target=\"styles.xml\"/>",
            REL_BASE
        );

        for (i, blocks) in self.headers.iter().enumerate() {
            let name = format!("header{}.xml", i + 1);
            overrides.push_str(&format!(
                "<Override PartName=\"/word/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml\"/>",
                name
            ));
            doc_rels.push_str(&format!(
                "<Relationship Id=\"rIdH{}\" Type=\"{}/header\" Target=\"{}\"/>",
                i + 1,
                REL_BASE,
                name
            ));
            entries.push((
                format!("word/{}", name),
                format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:hdr xmlns:w=\"{}\">{}</w:hdr>", W_NS, blocks.concat())
                    .into_bytes(),
            ));
        }

        for (i, blocks) in self.footers.iter().enumerate() {
            let name = format!("footer{}.xml", i + 1);
            overrides.push_str(&format!(
                "<Override PartName=\"/word/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml\"/>",
                name
            ));
            doc_rels.push_str(&format!(
                "<Relationship Id=\"rIdF{}\" Type=\"{}/footer\" Target=\"{}\"/>",
                i + 1,
                REL_BASE,
                name
            ));
            entries.push((
                format!("word/{}", name),
                format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:ftr xmlns:w=\"{}\">{}</w:ftr>", W_NS, blocks.concat())
                    .into_bytes(),
            ));
        }

        if self.with_media {
            doc_rels.push_str(&format!(
                "<Relationship Id=\"rIdM\" Type=\"{}/image\" Target=\"media/image1.png\"/>",
                REL_BASE
            ));
            entries.push(("word/media/image1.png".to_string(), MEDIA_BYTES.to_vec()));
        }

        let mut package = vec![
            (
                "[Content_Types].xml".to_string(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"><Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/><Default Extension=\"xml\" ContentType=\"application/xml\"/><Default Extension=\"png\" ContentType=\"image/png\"/>{}</Types>",
                    overrides
                )
                .into_bytes(),
            ),
            (
                "_rels/.rels".to_string(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\"><Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"word/document.xml\"/></Relationships>",
                    REL_BASE
                )
                .into_bytes(),
            ),
            ("word/document.xml".to_string(), self.document_xml().into_bytes()),
            (
                "word/_rels/document.xml.rels".to_string(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
                    doc_rels
                )
                .into_bytes(),
            ),
            (
                "word/styles.xml".to_string(),
                format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:styles xmlns:w=\"{}\"/>", W_NS).into_bytes(),
            ),
        ];
        package.extend(entries);

        zip_entries(&package)
    }
}

/// Zip the given entries in order
pub fn zip_entries(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

pub fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    file.read_to_end(&mut content).unwrap();
    content
}

pub fn read_part(bytes: &[u8], name: &str) -> String {
    String::from_utf8(read_entry(bytes, name)).unwrap()
}
