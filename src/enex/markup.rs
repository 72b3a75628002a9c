//! Note content to plain text
//!
//! Pattern based, not an HTML parser. A tag whose attribute value contains
//! `>` is cut at that `>`, leaving the rest of the tag in the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::StripMode;

static ENML_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?xml.*?<en-note[^>]*>").unwrap());
static ENML_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</en-note\s*>").unwrap());
static DIV_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<div\b[^>]*>").unwrap());
static DIV_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</div\s*>").unwrap());
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Convert raw `<content>` text to plain text.
///
/// Steps run in order: drop the XML declaration through the opening
/// `<en-note>`, drop `</en-note>`, turn `<div>`/`<br>` into line breaks
/// (tag-aware mode only), drop every other tag, decode entities, trim.
pub fn strip_markup(raw: &str, mode: StripMode) -> String {
    let mut text = ENML_HEAD_RE.replace(raw.trim(), "").into_owned();
    text = ENML_TAIL_RE.replace_all(&text, "").into_owned();

    if mode == StripMode::TagAware {
        text = DIV_OPEN_RE.replace_all(&text, "\n").into_owned();
        text = DIV_CLOSE_RE.replace_all(&text, "").into_owned();
        text = BR_RE.replace_all(&text, "\n").into_owned();
    }

    text = TAG_RE.replace_all(&text, "").into_owned();
    text = html_escape::decode_html_entities(&text).into_owned();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">
<en-note><div>Milk</div><div>Eggs<br/>Bread</div></en-note>"#;

    #[test]
    fn test_divs_become_lines() {
        assert_eq!(
            strip_markup("<div>Line1</div><div>Line2</div>", StripMode::TagAware),
            "Line1\nLine2"
        );
    }

    #[test]
    fn test_enml_wrapper_removed() {
        let text = strip_markup(ENML, StripMode::TagAware);
        assert_eq!(text, "Milk\nEggs\nBread");
        assert!(!text.contains("DOCTYPE"));
    }

    #[test]
    fn test_br_variants() {
        let text = strip_markup("a<br>b<br/>c<br />d<BR>e", StripMode::TagAware);
        assert_eq!(text, "a\nb\nc\nd\ne");
    }

    #[test]
    fn test_other_tags_removed_with_attributes() {
        let text = strip_markup(
            r#"<div style="color:red"><span class="x"><b>bold</b></span> <a href="http://e.com">link</a></div>"#,
            StripMode::TagAware,
        );
        assert_eq!(text, "bold link");
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_generic_mode_drops_breaks() {
        let text = strip_markup("<div>Line1</div><div>Line2<br/>x</div>", StripMode::Generic);
        assert_eq!(text, "Line1Line2x");
    }

    #[test]
    fn test_entities_decoded() {
        let text = strip_markup("<div>Tom &amp; Jerry&nbsp;&#39;s</div>", StripMode::TagAware);
        assert_eq!(text, "Tom & Jerry\u{a0}'s");
    }

    #[test]
    fn test_gt_inside_attribute_is_known_limitation() {
        let text = strip_markup(r#"<span title="a>b">x</span>"#, StripMode::TagAware);
        assert_eq!(text, "b\">x");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_markup("  just text \n", StripMode::TagAware), "just text");
        assert_eq!(strip_markup("", StripMode::TagAware), "");
    }
}
