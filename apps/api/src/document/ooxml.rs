//! WordprocessingML package writer.
//!
//! Produces a minimal, deterministic `.docx`: every zip entry carries the same
//! fixed timestamp and no core-properties part (with its creation time) is
//! emitted, so equal input always yields byte-identical output.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::document::layout::{
    Alignment, Paragraph, BULLET_INDENT_TWIPS, PAGE_HEIGHT_TWIPS, PAGE_MARGIN_TWIPS,
    PAGE_WIDTH_TWIPS,
};
use crate::document::styling::{StyledRun, FONT_FAMILY, TEXT_COLOR};
use crate::document::RenderError;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const BULLET_NUM_ID: &str = "1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

type XmlWriter = Writer<Vec<u8>>;

/// Serialises laid-out paragraphs into `.docx` bytes.
pub fn write_package(paragraphs: &[Paragraph]) -> Result<Vec<u8>, RenderError> {
    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/document.xml", document_xml(paragraphs)?),
        ("word/styles.xml", styles_xml()?),
        ("word/numbering.xml", numbering_xml()?),
    ];

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// word/document.xml
// ────────────────────────────────────────────────────────────────────────────

fn new_writer() -> Result<XmlWriter, RenderError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn document_xml(paragraphs: &[Paragraph]) -> Result<Vec<u8>, RenderError> {
    let mut writer = new_writer()?;
    writer
        .create_element("w:document")
        .with_attribute(("xmlns:w", W_NS))
        .with_attribute(("xmlns:r", R_NS))
        .write_inner_content::<_, RenderError>(|w| {
            w.create_element("w:body")
                .write_inner_content::<_, RenderError>(|w| {
                    for paragraph in paragraphs {
                        write_paragraph(w, paragraph)?;
                    }
                    write_section_properties(w)
                })?;
            Ok(())
        })?;
    Ok(writer.into_inner())
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) -> Result<(), RenderError> {
    w.create_element("w:p")
        .write_inner_content::<_, RenderError>(|w| {
            write_paragraph_properties(w, paragraph)?;
            for run in &paragraph.runs {
                write_run(w, run)?;
            }
            Ok(())
        })?;
    Ok(())
}

/// Child order follows the CT_PPr schema sequence:
/// numPr, pBdr, tabs, spacing, ind, jc.
fn write_paragraph_properties(w: &mut XmlWriter, p: &Paragraph) -> Result<(), RenderError> {
    w.create_element("w:pPr")
        .write_inner_content::<_, RenderError>(|w| {
            if p.bulleted {
                w.create_element("w:numPr")
                    .write_inner_content::<_, RenderError>(|w| {
                        w.create_element("w:ilvl")
                            .with_attribute(("w:val", "0"))
                            .write_empty()?;
                        w.create_element("w:numId")
                            .with_attribute(("w:val", BULLET_NUM_ID))
                            .write_empty()?;
                        Ok(())
                    })?;
            }
            if p.top_rule {
                w.create_element("w:pBdr")
                    .write_inner_content::<_, RenderError>(|w| {
                        w.create_element("w:top")
                            .with_attribute(("w:val", "single"))
                            .with_attribute(("w:sz", "6"))
                            .with_attribute(("w:space", "1"))
                            .with_attribute(("w:color", "auto"))
                            .write_empty()?;
                        Ok(())
                    })?;
            }
            if let Some(position) = p.right_tab {
                let position = position.to_string();
                w.create_element("w:tabs")
                    .write_inner_content::<_, RenderError>(|w| {
                        w.create_element("w:tab")
                            .with_attribute(("w:val", "right"))
                            .with_attribute(("w:pos", position.as_str()))
                            .write_empty()?;
                        Ok(())
                    })?;
            }
            let before = p.spacing.before.to_string();
            let after = p.spacing.after.to_string();
            w.create_element("w:spacing")
                .with_attribute(("w:before", before.as_str()))
                .with_attribute(("w:after", after.as_str()))
                .write_empty()?;
            if p.bulleted {
                let indent = BULLET_INDENT_TWIPS.to_string();
                w.create_element("w:ind")
                    .with_attribute(("w:left", indent.as_str()))
                    .with_attribute(("w:hanging", indent.as_str()))
                    .write_empty()?;
            }
            if p.alignment == Alignment::Center {
                w.create_element("w:jc")
                    .with_attribute(("w:val", "center"))
                    .write_empty()?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_run(w: &mut XmlWriter, run: &StyledRun) -> Result<(), RenderError> {
    let size = run.size_half_points.to_string();
    w.create_element("w:r")
        .write_inner_content::<_, RenderError>(|w| {
            w.create_element("w:rPr")
                .write_inner_content::<_, RenderError>(|w| {
                    w.create_element("w:rFonts")
                        .with_attribute(("w:ascii", FONT_FAMILY))
                        .with_attribute(("w:hAnsi", FONT_FAMILY))
                        .with_attribute(("w:cs", FONT_FAMILY))
                        .write_empty()?;
                    if run.bold {
                        w.create_element("w:b").write_empty()?;
                        w.create_element("w:bCs").write_empty()?;
                    }
                    w.create_element("w:color")
                        .with_attribute(("w:val", TEXT_COLOR))
                        .write_empty()?;
                    w.create_element("w:sz")
                        .with_attribute(("w:val", size.as_str()))
                        .write_empty()?;
                    w.create_element("w:szCs")
                        .with_attribute(("w:val", size.as_str()))
                        .write_empty()?;
                    Ok(())
                })?;
            if run.leading_tab {
                w.create_element("w:tab").write_empty()?;
            }
            w.create_element("w:t")
                .with_attribute(("xml:space", "preserve"))
                .write_text_content(BytesText::new(&xml_safe_text(&run.text)))?;
            Ok(())
        })?;
    Ok(())
}

/// Drops characters XML 1.0 cannot carry; Word refuses documents containing them.
fn xml_safe_text(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
        })
        .collect()
}

fn write_section_properties(w: &mut XmlWriter) -> Result<(), RenderError> {
    let width = PAGE_WIDTH_TWIPS.to_string();
    let height = PAGE_HEIGHT_TWIPS.to_string();
    let margin = PAGE_MARGIN_TWIPS.to_string();
    w.create_element("w:sectPr")
        .write_inner_content::<_, RenderError>(|w| {
            w.create_element("w:pgSz")
                .with_attribute(("w:w", width.as_str()))
                .with_attribute(("w:h", height.as_str()))
                .write_empty()?;
            w.create_element("w:pgMar")
                .with_attribute(("w:top", margin.as_str()))
                .with_attribute(("w:right", margin.as_str()))
                .with_attribute(("w:bottom", margin.as_str()))
                .with_attribute(("w:left", margin.as_str()))
                .with_attribute(("w:header", "720"))
                .with_attribute(("w:footer", "720"))
                .with_attribute(("w:gutter", "0"))
                .write_empty()?;
            Ok(())
        })?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// word/styles.xml and word/numbering.xml
// ────────────────────────────────────────────────────────────────────────────

fn styles_xml() -> Result<Vec<u8>, RenderError> {
    let mut writer = new_writer()?;
    writer
        .create_element("w:styles")
        .with_attribute(("xmlns:w", W_NS))
        .write_inner_content::<_, RenderError>(|w| {
            w.create_element("w:docDefaults")
                .write_inner_content::<_, RenderError>(|w| {
                    w.create_element("w:rPrDefault")
                        .write_inner_content::<_, RenderError>(|w| {
                            w.create_element("w:rPr")
                                .write_inner_content::<_, RenderError>(|w| {
                                    w.create_element("w:rFonts")
                                        .with_attribute(("w:ascii", FONT_FAMILY))
                                        .with_attribute(("w:hAnsi", FONT_FAMILY))
                                        .with_attribute(("w:cs", FONT_FAMILY))
                                        .write_empty()?;
                                    Ok(())
                                })?;
                            Ok(())
                        })?;
                    Ok(())
                })?;
            w.create_element("w:style")
                .with_attribute(("w:type", "paragraph"))
                .with_attribute(("w:default", "1"))
                .with_attribute(("w:styleId", "Normal"))
                .write_inner_content::<_, RenderError>(|w| {
                    w.create_element("w:name")
                        .with_attribute(("w:val", "Normal"))
                        .write_empty()?;
                    Ok(())
                })?;
            Ok(())
        })?;
    Ok(writer.into_inner())
}

fn numbering_xml() -> Result<Vec<u8>, RenderError> {
    let indent = BULLET_INDENT_TWIPS.to_string();
    let mut writer = new_writer()?;
    writer
        .create_element("w:numbering")
        .with_attribute(("xmlns:w", W_NS))
        .write_inner_content::<_, RenderError>(|w| {
            w.create_element("w:abstractNum")
                .with_attribute(("w:abstractNumId", "0"))
                .write_inner_content::<_, RenderError>(|w| {
                    w.create_element("w:lvl")
                        .with_attribute(("w:ilvl", "0"))
                        .write_inner_content::<_, RenderError>(|w| {
                            w.create_element("w:start")
                                .with_attribute(("w:val", "1"))
                                .write_empty()?;
                            w.create_element("w:numFmt")
                                .with_attribute(("w:val", "bullet"))
                                .write_empty()?;
                            w.create_element("w:lvlText")
                                .with_attribute(("w:val", "•"))
                                .write_empty()?;
                            w.create_element("w:lvlJc")
                                .with_attribute(("w:val", "left"))
                                .write_empty()?;
                            w.create_element("w:pPr")
                                .write_inner_content::<_, RenderError>(|w| {
                                    w.create_element("w:ind")
                                        .with_attribute(("w:left", indent.as_str()))
                                        .with_attribute(("w:hanging", indent.as_str()))
                                        .write_empty()?;
                                    Ok(())
                                })?;
                            Ok(())
                        })?;
                    Ok(())
                })?;
            w.create_element("w:num")
                .with_attribute(("w:numId", BULLET_NUM_ID))
                .write_inner_content::<_, RenderError>(|w| {
                    w.create_element("w:abstractNumId")
                        .with_attribute(("w:val", "0"))
                        .write_empty()?;
                    Ok(())
                })?;
            Ok(())
        })?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::styling::{themed_text, TextVariant};
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = write_package(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
        ] {
            assert!(names.contains(&part), "missing part {part}");
        }
        assert!(!names.contains(&"docProps/core.xml"));
    }

    #[test]
    fn test_text_is_escaped() {
        let paragraph = Paragraph {
            runs: vec![themed_text("R&D <team>", false, TextVariant::Body, false)],
            ..Paragraph::default()
        };
        let bytes = write_package(&[paragraph]).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("R&amp;D &lt;team&gt;"));
    }

    #[test]
    fn test_bulleted_paragraph_references_numbering() {
        let paragraph = Paragraph {
            runs: vec![themed_text("Shipped it", false, TextVariant::Body, false)],
            bulleted: true,
            ..Paragraph::default()
        };
        let bytes = write_package(&[paragraph]).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"w:hanging="360""#));
    }

    #[test]
    fn test_section_properties_use_letter_with_one_inch_margins() {
        let bytes = write_package(&[]).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#));
    }

    #[test]
    fn test_tab_run_and_stop_are_written() {
        let paragraph = Paragraph {
            runs: vec![
                themed_text("Acme", true, TextVariant::Subheading, false),
                themed_text("Remote", true, TextVariant::Subheading, true),
            ],
            right_tab: Some(9_360),
            ..Paragraph::default()
        };
        let bytes = write_package(&[paragraph]).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:tab w:val="right" w:pos="9360"/>"#));
        assert!(xml.contains(r#"<w:tab/><w:t xml:space="preserve">Remote</w:t>"#));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let paragraph = Paragraph {
            runs: vec![themed_text(
                "Acme\u{0B}Corp\u{0C}\u{0}\ttools",
                false,
                TextVariant::Body,
                false,
            )],
            ..Paragraph::default()
        };
        let bytes = write_package(&[paragraph]).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("AcmeCorp\ttools"));
        assert!(!xml.bytes().any(|b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')));
    }
}
