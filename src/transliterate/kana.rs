//! Built-in kana normaliser on top of `wana_kana`.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use wana_kana::{ConvertJapanese, IsJapaneseStr};

use super::{TransliterateError, Transliterator};

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Converts katakana runs to hiragana, leaving markup and non-Japanese text
/// untouched.
///
/// This is a readability aid, not a full furigana engine: kanji pass through
/// unchanged because reading resolution needs a morphological dictionary.
/// Hosts with such a dictionary implement [`Transliterator`] themselves.
pub struct KanaTransliterator;

impl KanaTransliterator {
    fn convert_text(segment: &str) -> String {
        // Split on whitespace so a Japanese word next to Latin text still
        // converts; only fully-Japanese chunks are touched.
        segment
            .split_inclusive(char::is_whitespace)
            .map(|chunk| {
                let word = chunk.trim_end();
                if !word.is_empty() && word.is_japanese() {
                    let tail = &chunk[word.len()..];
                    format!("{}{}", word.to_hiragana(), tail)
                } else {
                    chunk.to_string()
                }
            })
            .collect()
    }
}

#[async_trait]
impl Transliterator for KanaTransliterator {
    async fn transliterate(&self, text: &str) -> Result<String, TransliterateError> {
        // Tags must survive verbatim; convert only the text between them.
        let re = tag_re();
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for tag in re.find_iter(text) {
            out.push_str(&Self::convert_text(&text[last..tag.start()]));
            out.push_str(tag.as_str());
            last = tag.end();
        }
        out.push_str(&Self::convert_text(&text[last..]));

        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
