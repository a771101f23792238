//! Résumé layout — maps a `ResumeDocument` onto an ordered list of paragraphs.
//!
//! The layout is a single rigid, print-ready template. Sections always appear in
//! the same order and every spacing value is a constant; long content simply
//! flows onto the next page in the word processor.
//!
//! # Units
//! All distances are twentieths of a point (twips). 1440 twips = 1 inch.

use crate::document::model::{Education, Experience, Extracurricular, ResumeDocument};
use crate::document::styling::{themed_text, StyledRun, TextVariant};

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// US Letter, 8.5" × 11".
pub const PAGE_WIDTH_TWIPS: u32 = 12_240;
pub const PAGE_HEIGHT_TWIPS: u32 = 15_840;
/// 1" on every side.
pub const PAGE_MARGIN_TWIPS: u32 = 1_440;
/// Right tab stop sits on the right edge of the printable area.
pub const RIGHT_TAB_TWIPS: u32 = PAGE_WIDTH_TWIPS - 2 * PAGE_MARGIN_TWIPS;
/// Left indent and hanging indent for bulleted paragraphs.
pub const BULLET_INDENT_TWIPS: u32 = 360;

const HEADER_LINE_AFTER: u32 = 72;
const CONTACT_LINE_AFTER: u32 = 216;
const SECTION_TITLE_BEFORE: u32 = 144;
const SECTION_TITLE_AFTER: u32 = 72;
const ENTRY_FIRST_LINE_BEFORE: u32 = 108;
const ENTRY_FIRST_LINE_AFTER: u32 = 36;
const ENTRY_SECOND_LINE_AFTER: u32 = 72;
const BULLET_AFTER: u32 = 72;

const CONTACT_SEPARATOR: &str = " • ";

// ────────────────────────────────────────────────────────────────────────────
// Block model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    const fn after(after: u32) -> Self {
        Self { before: 0, after }
    }
}

/// One paragraph of the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<StyledRun>,
    pub alignment: Alignment,
    pub spacing: Spacing,
    /// Position of a right-aligned tab stop, if the paragraph uses one.
    pub right_tab: Option<u32>,
    /// Rendered as a level-0 bullet with a hanging indent.
    pub bulleted: bool,
    /// Horizontal rule drawn directly above the paragraph.
    pub top_rule: bool,
}

#[cfg(test)]
impl Paragraph {
    /// Concatenated text of all runs, tabs rendered as `\t`.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| {
                if run.leading_tab {
                    format!("\t{}", run.text)
                } else {
                    run.text.clone()
                }
            })
            .collect()
    }
}

/// Headings that differ between the two historical template variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    pub experience: &'static str,
    pub activities: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub interests: &'static str,
}

impl SectionLabels {
    pub const fn classic() -> Self {
        Self {
            experience: "PROFESSIONAL EXPERIENCE",
            activities: "EXTRACURRICULARS",
            education: "EDUCATION",
            skills: "SKILLS",
            interests: "Interests",
        }
    }

    pub const fn projects() -> Self {
        Self {
            activities: "PROJECTS",
            interests: "Program Management",
            ..Self::classic()
        }
    }
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self::classic()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the full résumé. Pure: no I/O, no branching on content beyond
/// the length of each list.
pub fn layout_resume(doc: &ResumeDocument, labels: &SectionLabels) -> Vec<Paragraph> {
    let mut blocks = header_blocks(doc);

    blocks.push(section_title(labels.experience));
    blocks.extend(doc.experience.iter().flat_map(experience_blocks));

    blocks.push(section_title(labels.activities));
    blocks.extend(doc.extracurricular.iter().flat_map(activity_blocks));

    blocks.push(section_title(labels.education));
    blocks.extend(education_blocks(&doc.education));

    blocks.push(section_title(labels.skills));
    blocks.push(plain_line(format!(
        "Technical Skills: {}",
        doc.skills.technical_skills
    )));
    blocks.push(plain_line(format!(
        "{}: {}",
        labels.interests, doc.skills.interests
    )));

    blocks
}

fn header_blocks(doc: &ResumeDocument) -> Vec<Paragraph> {
    let info = &doc.personal_info;
    let contact = [
        info.location.as_str(),
        info.email.as_str(),
        info.phone.as_str(),
    ]
    .join(CONTACT_SEPARATOR);

    vec![
        Paragraph {
            runs: vec![themed_text(&info.name, true, TextVariant::Heading, false)],
            alignment: Alignment::Center,
            spacing: Spacing::after(HEADER_LINE_AFTER),
            ..Paragraph::default()
        },
        Paragraph {
            runs: vec![themed_text(&info.title, true, TextVariant::Heading, false)],
            alignment: Alignment::Center,
            spacing: Spacing::after(HEADER_LINE_AFTER),
            ..Paragraph::default()
        },
        Paragraph {
            runs: vec![themed_text(contact, false, TextVariant::Subheading, false)],
            alignment: Alignment::Center,
            spacing: Spacing::after(CONTACT_LINE_AFTER),
            ..Paragraph::default()
        },
    ]
}

fn section_title(title: &str) -> Paragraph {
    Paragraph {
        runs: vec![themed_text(title, true, TextVariant::Subheading, false)],
        spacing: Spacing {
            before: SECTION_TITLE_BEFORE,
            after: SECTION_TITLE_AFTER,
        },
        top_rule: true,
        ..Paragraph::default()
    }
}

/// Left text and right-aligned text on the same line.
fn split_line(left: StyledRun, right: StyledRun, spacing: Spacing) -> Paragraph {
    Paragraph {
        runs: vec![left, right],
        spacing,
        right_tab: Some(RIGHT_TAB_TWIPS),
        ..Paragraph::default()
    }
}

fn bullet(text: &str) -> Paragraph {
    Paragraph {
        runs: vec![themed_text(text, false, TextVariant::Body, false)],
        spacing: Spacing::after(BULLET_AFTER),
        bulleted: true,
        ..Paragraph::default()
    }
}

fn plain_line(text: String) -> Paragraph {
    Paragraph {
        runs: vec![themed_text(text, false, TextVariant::Subheading, false)],
        ..Paragraph::default()
    }
}

fn experience_blocks(entry: &Experience) -> Vec<Paragraph> {
    let mut blocks = Vec::with_capacity(entry.responsibilities.len() + 2);
    blocks.push(split_line(
        themed_text(&entry.company, true, TextVariant::Subheading, false),
        themed_text(&entry.location, true, TextVariant::Subheading, true),
        Spacing {
            before: ENTRY_FIRST_LINE_BEFORE,
            after: ENTRY_FIRST_LINE_AFTER,
        },
    ));
    blocks.push(split_line(
        themed_text(&entry.title, true, TextVariant::Subheading, false),
        themed_text(
            format!("{} - {}", entry.start_date, entry.end_date),
            true,
            TextVariant::Subheading,
            true,
        ),
        Spacing::after(ENTRY_SECOND_LINE_AFTER),
    ));
    blocks.extend(entry.responsibilities.iter().map(|r| bullet(r)));
    blocks
}

fn activity_blocks(entry: &Extracurricular) -> Vec<Paragraph> {
    let mut blocks = Vec::with_capacity(entry.description.len() + 1);
    blocks.push(Paragraph {
        runs: vec![themed_text(&entry.title, true, TextVariant::Subheading, false)],
        spacing: Spacing::after(ENTRY_FIRST_LINE_AFTER),
        ..Paragraph::default()
    });
    blocks.extend(entry.description.iter().map(|d| bullet(d)));
    blocks
}

fn education_blocks(education: &Education) -> Vec<Paragraph> {
    vec![
        split_line(
            themed_text(&education.institution, true, TextVariant::Subheading, false),
            themed_text(&education.dates, true, TextVariant::Subheading, true),
            Spacing::after(ENTRY_SECOND_LINE_AFTER),
        ),
        split_line(
            themed_text(&education.degree, false, TextVariant::Subheading, false),
            themed_text(
                format!("GPA: {}", education.gpa),
                true,
                TextVariant::Subheading,
                true,
            ),
            Spacing::after(ENTRY_SECOND_LINE_AFTER),
        ),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
