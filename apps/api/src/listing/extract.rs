//! Bullet extraction — pulls requirement-like list items out of a rendered job page.
//!
//! # Heuristic
//! - Every `<ul>` outside a `<nav>` or `<footer>` landmark is considered.
//! - Each direct `<li>` child contributes its trimmed text content.
//! - Items with fewer than [`MIN_BULLET_TOKENS`] whitespace-separated tokens are
//!   dropped (menu entries, social links, "Apply now").
//!
//! The threshold and the landmark exclusion are fixed; downstream summarisation
//! expects exactly this output shape. Extraction never fails: malformed markup
//! yields whatever lists the parser recovers, possibly none.

use scraper::{ElementRef, Html};

/// Minimum number of whitespace-separated tokens for a list item to count.
pub const MIN_BULLET_TOKENS: usize = 6;

const EXCLUDED_LANDMARKS: [&str; 2] = ["nav", "footer"];

/// Extracts candidate requirement bullets from rendered HTML, in document order.
pub fn extract_bullets(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "ul")
        .filter(|ul| !inside_landmark(ul))
        .flat_map(|ul| {
            ul.children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .map(|li| li.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|text| is_substantive(text))
        .collect()
}

fn inside_landmark(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|ancestor| EXCLUDED_LANDMARKS.iter().any(|l| *l == ancestor.name()))
}

fn is_substantive(text: &str) -> bool {
    text.split_whitespace().count() >= MIN_BULLET_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_nav_items_are_excluded_regardless_of_length() {
        let html = r#"
            <html><body>
              <nav><ul><li>Home About Contact Us Today</li></ul></nav>
              <ul><li>Own end to end delivery of customer facing features</li></ul>
            </body></html>
        "#;
        assert_eq!(
            extract_bullets(html),
            vec!["Own end to end delivery of customer facing features"]
        );
    }

    #[test]
    fn test_long_items_under_landmarks_are_excluded() {
        let html = r#"
            <nav><div><ul><li>One two three four five six seven eight</li></ul></div></nav>
            <footer><ul><li>Copyright notice with plenty of words in it here</li></ul></footer>
            <main><ul><li>Design and operate distributed systems at scale</li></ul></main>
        "#;
        assert_eq!(
            extract_bullets(html),
            vec!["Design and operate distributed systems at scale"]
        );
    }

    #[test]
    fn test_short_items_are_dropped() {
        let html = "<ul><li>Apply now</li><li>Write clear documentation for every public API</li></ul>";
        let bullets = extract_bullets(html);
        assert!(!bullets.iter().any(|b| b == "Apply now"));
        assert_eq!(bullets.len(), 1);
    }

    #[rstest]
    #[case("one two three four five", false)]
    #[case("one two three four five six", true)]
    #[case("  one   two\nthree\tfour five six  ", true)]
    #[case("", false)]
    fn test_token_threshold(#[case] item: &str, #[case] kept: bool) {
        let html = format!("<ul><li>{item}</li></ul>");
        assert_eq!(!extract_bullets(&html).is_empty(), kept);
    }

    #[test]
    fn test_text_is_trimmed_and_nested_markup_flattened() {
        let html = "<ul><li>\n   Ship <b>reliable</b> services with <a href='#'>strong</a> observability   \n</li></ul>";
        assert_eq!(
            extract_bullets(html),
            vec!["Ship reliable services with strong observability"]
        );
    }

    #[test]
    fn test_nested_list_items_come_from_their_own_list() {
        let html = "<ul><li>Lead platform work <ul><li>Own the deploy pipeline for every service</li></ul></li></ul>";
        assert_eq!(
            extract_bullets(html),
            vec![
                "Lead platform work Own the deploy pipeline for every service",
                "Own the deploy pipeline for every service",
            ]
        );
    }

    #[test]
    fn test_document_order_and_duplicates_are_preserved() {
        let html = r#"
            <ul><li>Collaborate with product and design on roadmap</li></ul>
            <ol><li>Ordered lists are not part of the heuristic at all</li></ol>
            <ul>
              <li>Collaborate with product and design on roadmap</li>
              <li>Review code and mentor junior engineers on team</li>
            </ul>
        "#;
        assert_eq!(
            extract_bullets(html),
            vec![
                "Collaborate with product and design on roadmap",
                "Collaborate with product and design on roadmap",
                "Review code and mentor junior engineers on team",
            ]
        );
    }

    #[test]
    fn test_every_bullet_meets_threshold() {
        let html = r#"
            <ul><li>a b</li><li>a b c d e f</li><li>x</li></ul>
            <ul><li>one two three four five six seven</li><li></li></ul>
        "#;
        for bullet in extract_bullets(html) {
            assert!(bullet.split_whitespace().count() >= MIN_BULLET_TOKENS);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = "<ul><li>Build data pipelines that feed reporting dashboards</li></ul>";
        assert_eq!(extract_bullets(html), extract_bullets(html));
    }

    #[test]
    fn test_malformed_html_degrades_gracefully() {
        assert!(extract_bullets("<<<ul><li").is_empty());
        assert!(extract_bullets("").is_empty());
        let unclosed = "<ul><li>Partner with stakeholders across the whole company";
        assert_eq!(extract_bullets(unclosed).len(), 1);
    }
}
