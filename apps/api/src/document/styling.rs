//! Text styling primitive shared by every block of the assembled résumé.
//!
//! Font and colour are fixed for the whole document. Only the weight, the size
//! variant, and an optional leading tab vary between runs.

/// Font used for every run in the document.
pub const FONT_FAMILY: &str = "Times New Roman";
/// Run colour as a WordprocessingML hex value.
pub const TEXT_COLOR: &str = "000000";

/// Size variant of a run. Sizes are in half-points, as WordprocessingML expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    Heading,
    Subheading,
    Body,
}

impl TextVariant {
    pub fn half_points(self) -> u32 {
        match self {
            TextVariant::Heading => 32,
            TextVariant::Subheading => 22,
            TextVariant::Body => 22,
        }
    }
}

/// A single styled span of text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub size_half_points: u32,
    /// Emits a tab before the text so it lands on the paragraph's right tab stop.
    pub leading_tab: bool,
}

/// Maps `(text, bold, variant, tab)` onto a styled run.
pub fn themed_text(text: impl Into<String>, bold: bool, variant: TextVariant, tab: bool) -> StyledRun {
    StyledRun {
        text: text.into(),
        bold,
        size_half_points: variant.half_points(),
        leading_tab: tab,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_sixteen_points() {
        let run = themed_text("Jane Doe", true, TextVariant::Heading, false);
        assert_eq!(run.size_half_points, 32);
        assert!(run.bold);
        assert!(!run.leading_tab);
    }

    #[test]
    fn test_subheading_and_body_share_size() {
        assert_eq!(
            TextVariant::Subheading.half_points(),
            TextVariant::Body.half_points()
        );
    }

    #[test]
    fn test_tab_flag_is_carried() {
        let run = themed_text("Remote", true, TextVariant::Subheading, true);
        assert!(run.leading_tab);
        assert_eq!(run.text, "Remote");
    }
}
