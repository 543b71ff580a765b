//! Minimal WordprocessingML package writer for [`OutputDocument`]s.
//!
//! The package holds `document.xml`, a style sheet with the Title, Heading 1-3,
//! List Bullet and Intense Quote paragraph styles, and one bullet numbering
//! definition referenced by the List Bullet style.
use std::io::{self, Cursor, Write};

use quick_xml::escape::escape;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::document::{Block, HeadingLevel, OutputDocument};

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub trait DocumentEncoder: Send + Sync {
    fn encode(&self, doc: &OutputDocument) -> Result<Vec<u8>, EncodeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxEncoder;

impl DocumentEncoder for DocxEncoder {
    fn encode(&self, doc: &OutputDocument) -> Result<Vec<u8>, EncodeError> {
        let document_xml = build_document_xml(doc.blocks());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        // Fixed timestamps keep repeated runs byte-identical.
        let opt = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let parts: [(&str, &str); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", RELS_XML),
            ("word/document.xml", document_xml.as_str()),
            ("word/_rels/document.xml.rels", WORD_RELS_XML),
            ("word/styles.xml", STYLES_XML),
            ("word/numbering.xml", NUMBERING_XML),
        ];
        for (name, content) in parts {
            zip.start_file(name, opt)?;
            zip.write_all(content.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn style_id(block: &Block) -> Option<&'static str> {
    match block {
        Block::Heading { level, .. } => Some(match level {
            HeadingLevel::Title => "Title",
            HeadingLevel::H1 => "Heading1",
            HeadingLevel::H2 => "Heading2",
            HeadingLevel::H3 => "Heading3",
        }),
        Block::ListItem(_) => Some("ListBullet"),
        Block::Quote(_) => Some("IntenseQuote"),
        Block::Paragraph(_) | Block::PageBreak => None,
    }
}

/// Drop characters XML 1.0 does not allow in text.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
        })
        .collect()
}

pub(crate) fn build_document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        if let Block::PageBreak = block {
            body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
            continue;
        }

        body.push_str("<w:p>");
        if let Some(style) = style_id(block) {
            body.push_str(r#"<w:pPr><w:pStyle w:val=""#);
            body.push_str(style);
            body.push_str(r#""/></w:pPr>"#);
        }
        let text = block.text().map(xml_safe).unwrap_or_default();
        if !text.is_empty() {
            body.push_str(r#"<w:r><w:t xml:space="preserve">"#);
            body.push_str(&escape(text.as_str()));
            body.push_str("</w:t></w:r>");
        }
        body.push_str("</w:p>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="bullet"/>
      <w:lvlText w:val="&#8226;"/>
      <w:lvlJc w:val="left"/>
      <w:pPr>
        <w:ind w:left="720" w:hanging="360"/>
      </w:pPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1">
    <w:abstractNumId w:val="0"/>
  </w:num>
</w:numbering>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:after="160"/>
    </w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="10"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:after="240"/>
    </w:pPr>
    <w:rPr>
      <w:sz w:val="56"/>
    </w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:before="240" w:after="120"/>
      <w:keepNext/>
      <w:keepLines/>
      <w:outlineLvl w:val="0"/>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:sz w:val="32"/>
    </w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:before="200" w:after="100"/>
      <w:keepNext/>
      <w:keepLines/>
      <w:outlineLvl w:val="1"/>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:sz w:val="28"/>
    </w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading3">
    <w:name w:val="heading 3"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:before="160" w:after="80"/>
      <w:keepNext/>
      <w:keepLines/>
      <w:outlineLvl w:val="2"/>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:sz w:val="24"/>
    </w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:uiPriority w:val="99"/>
    <w:pPr>
      <w:numPr>
        <w:numId w:val="1"/>
      </w:numPr>
      <w:contextualSpacing/>
    </w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="IntenseQuote">
    <w:name w:val="Intense Quote"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="30"/>
    <w:qFormat/>
    <w:pPr>
      <w:pBdr>
        <w:top w:val="single" w:sz="4" w:space="10" w:color="4F81BD"/>
        <w:bottom w:val="single" w:sz="4" w:space="10" w:color="4F81BD"/>
      </w:pBdr>
      <w:spacing w:before="360" w:after="360"/>
      <w:ind w:left="864" w:right="864"/>
      <w:jc w:val="center"/>
    </w:pPr>
    <w:rPr>
      <w:i/>
      <w:color w:val="4F81BD"/>
    </w:rPr>
  </w:style>
</w:styles>"#;

#[cfg(test)]
mod tests {
    use super::{build_document_xml, xml_safe};
    use crate::document::{Block, HeadingLevel};

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(xml_safe("a\u{0}b\u{b}c\td\n"), "abc\td\n");
    }

    #[test]
    fn text_is_escaped() {
        let xml = build_document_xml(&[Block::paragraph("Fish & <Chips>")]);
        assert!(xml.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn empty_paragraph_has_no_run() {
        let xml = build_document_xml(&[Block::paragraph("")]);
        assert!(xml.contains("<w:p></w:p>"));
    }

    #[test]
    fn styles_follow_block_kind() {
        let xml = build_document_xml(&[
            Block::heading(HeadingLevel::Title, "T"),
            Block::heading(HeadingLevel::H3, "h"),
            Block::ListItem("li".into()),
            Block::Quote("q".into()),
            Block::PageBreak,
        ]);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading3"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="IntenseQuote"/>"#));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
    }
}
