// Document Assembler
// Turns structured résumé data into a paginated .docx byte buffer.
// Pure and allocation-only: safe to call concurrently, no I/O beyond in-memory zip writing.

pub mod handlers;
pub mod layout;
pub mod model;
pub mod ooxml;
pub mod styling;

use thiserror::Error;

pub use layout::SectionLabels;
pub use model::ResumeDocument;

/// MIME type served with generated documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Filename used when the caller does not choose one.
pub const DEFAULT_FILENAME: &str = "resume.docx";

/// Catastrophic serialisation failure. Incomplete input never produces this.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("XML serialisation failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Package zip failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while packing document: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the résumé with the classic section labels.
pub fn build_document(doc: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    build_document_with(doc, &SectionLabels::classic())
}

/// Builds the résumé with explicit section labels.
pub fn build_document_with(
    doc: &ResumeDocument,
    labels: &SectionLabels,
) -> Result<Vec<u8>, RenderError> {
    let paragraphs = layout::layout_resume(doc, labels);
    ooxml::write_package(&paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{Education, Experience, PersonalInfo, Skills};
    use std::io::{Cursor, Read};

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn make_doc() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                title: "Backend Engineer".to_string(),
                location: "Austin, TX".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
            },
            experience: vec![Experience {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                location: "Remote".to_string(),
                start_date: "Jan 2021".to_string(),
                end_date: "Present".to_string(),
                responsibilities: vec![
                    "Cut build times in half".to_string(),
                    "Owned the billing service".to_string(),
                    "Mentored two new hires".to_string(),
                ],
            }],
            extracurricular: vec![],
            education: Education {
                institution: "State University".to_string(),
                degree: "BS Computer Science".to_string(),
                gpa: "3.6".to_string(),
                dates: "2015 - 2019".to_string(),
            },
            skills: Skills {
                technical_skills: "Rust, SQL".to_string(),
                interests: "Climbing".to_string(),
            },
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let doc = make_doc();
        let first = build_document(&doc).unwrap();
        let second = build_document(&doc).unwrap();
        assert_eq!(first, second, "identical input must give identical bytes");
    }

    #[test]
    fn test_empty_document_builds() {
        let bytes = build_document(&ResumeDocument::default()).unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("PROFESSIONAL EXPERIENCE"));
        assert!(xml.contains("EXTRACURRICULARS"));
        assert!(!xml.contains("<w:numPr>"), "no bullets for an empty document");
    }

    #[test]
    fn test_three_responsibilities_give_three_bullets() {
        let bytes = build_document(&make_doc()).unwrap();
        let xml = document_xml(&bytes);
        assert_eq!(xml.matches("<w:numPr>").count(), 3);

        let first = xml.find("Cut build times in half").unwrap();
        let second = xml.find("Owned the billing service").unwrap();
        let third = xml.find("Mentored two new hires").unwrap();
        assert!(first < second && second < third, "bullet order must be preserved");

        let activities = xml.find("EXTRACURRICULARS").unwrap();
        let education = xml.find("EDUCATION").unwrap();
        assert!(!xml[activities..education].contains("<w:numPr>"));
    }

    #[test]
    fn test_gpa_line_reads_exactly() {
        let bytes = build_document(&make_doc()).unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains(r#"<w:t xml:space="preserve">GPA: 3.6</w:t>"#));
    }

    #[test]
    fn test_projects_variant_changes_headings() {
        let bytes = build_document_with(&make_doc(), &SectionLabels::projects()).unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("PROJECTS"));
        assert!(xml.contains("Program Management: Climbing"));
        assert!(!xml.contains("EXTRACURRICULARS"));
    }

    #[test]
    fn test_control_characters_in_input_do_not_reach_the_package() {
        let mut doc = make_doc();
        doc.experience[0].company = "Acme\u{0B}Corp".to_string();
        doc.experience[0].responsibilities = vec!["Led\u{0C}team".to_string()];

        let xml = document_xml(&build_document(&doc).unwrap());
        assert!(xml.contains("AcmeCorp"));
        assert!(xml.contains("Ledteam"));
        assert!(!xml.contains(['\u{0B}', '\u{0C}']));
    }
}
