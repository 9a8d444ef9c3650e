//! Chat text formatting.
//!
//! Newlines become `<br>`, `**x**` becomes `<strong>x</strong>` and `*x*`
//! becomes `<em>x</em>`. Nothing else is touched: the text is inserted into
//! the page as markup, unescaped.

use once_cell::sync::Lazy;
use regex::Regex;

// Emphasis never spans a line terminator.
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^\r\n\u{2028}\u{2029}]*?)\*\*").expect("static regex"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^\r\n\u{2028}\u{2029}]*?)\*").expect("static regex"));

/// Format one chat message body.
///
/// Bold is applied before italic, so `**a**` never turns into nested `<em>`.
pub fn format_message(text: &str) -> String {
    let with_breaks = text.replace('\n', "<br>");
    let bold = BOLD.replace_all(&with_breaks, "<strong>$1</strong>");
    ITALIC.replace_all(&bold, "<em>$1</em>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_newlines_bold_and_italic() {
        assert_eq!(
            format_message("a\n**b**\n*c*"),
            "a<br><strong>b</strong><br><em>c</em>"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format_message("hola mundo"), "hola mundo");
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            format_message("**a** y **b**"),
            "<strong>a</strong> y <strong>b</strong>"
        );
    }

    #[test]
    fn test_unmatched_asterisk_left_alone() {
        assert_eq!(format_message("5 * 3"), "5 * 3");
    }

    #[test]
    fn test_markup_is_not_escaped() {
        assert_eq!(format_message("<b>x</b>"), "<b>x</b>");
    }

    #[test]
    fn test_empty_emphasis_pairs() {
        assert_eq!(format_message("****"), "<strong></strong>");
        assert_eq!(format_message("**"), "<em></em>");
    }

    #[test]
    fn test_emphasis_stops_at_line_breaks() {
        assert_eq!(format_message("**a\r\nb**"), "**a\r<br>b**");
        assert_eq!(format_message("**a**\r\n*b*"), "<strong>a</strong>\r<br><em>b</em>");
    }

    proptest! {
        #[test]
        fn test_text_without_markers_passes_through(s in "[^*\n]{0,64}") {
            prop_assert_eq!(format_message(&s), s);
        }

        #[test]
        fn test_output_never_contains_raw_newlines(s in "[a-z\n ]{0,64}") {
            prop_assert!(!format_message(&s).contains('\n'));
        }
    }
}
