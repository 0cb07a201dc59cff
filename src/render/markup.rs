//! Markup normalisation helpers.
//!
//! Imported records carry rich HTML-ish column values.  Two levels of
//! cleanup exist:
//!
//! * [`remove_font_size`] — display path.  Strips only inline `font-size`
//!   declarations so the overlay's own font size wins, preserving every
//!   other tag and style verbatim.
//! * [`strip_markup`] — speech path.  Removes all tags; spoken output must
//!   never include markup.

use std::sync::OnceLock;

use regex::Regex;

fn style_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\s*style\s*=\s*("[^"]*"|'[^']*')"#).unwrap())
}

fn font_size_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)font-size\s*:\s*[^;]*;?").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>?").unwrap())
}

/// Remove `font-size` declarations from inline `style` attributes.
///
/// A `style` attribute that held nothing but a `font-size` declaration is
/// dropped entirely; one with other declarations keeps them:
///
/// ```
/// use glance_overlay::render::remove_font_size;
///
/// assert_eq!(
///     remove_font_size("<span style='font-size:20px'>猫</span>"),
///     "<span>猫</span>"
/// );
/// assert_eq!(
///     remove_font_size(r#"<b style="color:red; font-size:9px">x</b>"#),
///     r#"<b style="color:red">x</b>"#
/// );
/// ```
pub fn remove_font_size(text: &str) -> String {
    style_attr_re()
        .replace_all(text, |caps: &regex::Captures| {
            let quoted = &caps[1];
            let css = &quoted[1..quoted.len() - 1];
            let cleaned = font_size_decl_re().replace_all(css, "");
            let cleaned = cleaned.trim().trim_matches(';').trim();
            if cleaned.is_empty() {
                String::new()
            } else {
                format!(" style=\"{cleaned}\"")
            }
        })
        .to_string()
}

/// Remove all markup, producing speakable plain text.
///
/// Unterminated trailing tags are removed too, so a record cut off mid-tag
/// never leaks angle brackets into speech.
pub fn strip_markup(text: &str) -> String {
    tag_re().replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- remove_font_size ---

    #[test]
    fn drops_style_attr_holding_only_font_size() {
        assert_eq!(
            remove_font_size("<span style='font-size:20px'>猫</span>"),
            "<span>猫</span>"
        );
    }

    #[test]
    fn keeps_other_declarations() {
        assert_eq!(
            remove_font_size(r#"<b style="font-size: 12px; color: red">x</b>"#),
            r#"<b style="color: red">x</b>"#
        );
    }

    #[test]
    fn handles_double_quoted_attributes() {
        assert_eq!(
            remove_font_size(r#"<span style="font-size:1.5em">犬</span>"#),
            "<span>犬</span>"
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(remove_font_size("cat"), "cat");
    }

    #[test]
    fn leaves_unrelated_styles_untouched() {
        let input = r#"<i style="color:blue">x</i>"#;
        assert_eq!(remove_font_size(input), input);
    }

    #[test]
    fn strips_font_size_from_multiple_elements() {
        let input = "<span style='font-size:20px'>a</span><b style='font-size:8px'>b</b>";
        assert_eq!(remove_font_size(input), "<span>a</span><b>b</b>");
    }

    // ---- strip_markup ---

    #[test]
    fn strips_all_tags() {
        assert_eq!(
            strip_markup("<span style='font-size:20px'>猫</span> and <b>dog</b>"),
            "猫 and dog"
        );
    }

    #[test]
    fn strips_unterminated_trailing_tag() {
        assert_eq!(strip_markup("cat <span class='x"), "cat ");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("ねこ"), "ねこ");
    }
}
