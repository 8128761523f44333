//! Transcript file names and slugs.
//!
//! A file name is `<YYYY-MM-DD_HH-MM-SS>_<slug>`, generated once when a
//! session is first persisted. The timestamp prefix makes lexical order
//! match creation order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `strftime` pattern of the timestamp prefix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Normalize text into a filesystem-safe slug.
///
/// Diacritics and other non-ASCII characters are transliterated first
/// ("ação" becomes "acao"), then everything outside `[A-Za-z0-9_-]` is
/// dropped. Spaces are dropped too, not replaced.
pub fn slugify(text: &str) -> String {
    deunicode::deunicode(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Stable identifier of a persisted transcript (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Build a fresh file name from the creation time and the chat title.
    pub fn generate(created_at: &NaiveDateTime, chat_title: &str) -> Self {
        Self(format!(
            "{}_{}",
            created_at.format(TIMESTAMP_FORMAT),
            slugify(chat_title)
        ))
    }

    /// Wrap a name read back from storage.
    pub fn from_stored(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_slugify_strips_diacritics_and_punctuation() {
        assert_eq!(slugify("Olá, tudo bem?"), "Olatudobem");
        assert_eq!(slugify("ação_rápida-2"), "acao_rapida-2");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_generate_format() {
        let name = FileName::generate(&at(14, 5, 9), "Oi");
        assert_eq!(name.as_str(), "2025-03-07_14-05-09_Oi");
    }

    #[test]
    fn test_generate_with_empty_slug_keeps_separator() {
        let name = FileName::generate(&at(0, 0, 0), "!!!");
        assert_eq!(name.as_str(), "2025-03-07_00-00-00_");
    }

    #[test]
    fn test_same_slug_different_timestamps_differ() {
        let a = FileName::generate(&at(10, 0, 0), "Olá mundo");
        let b = FileName::generate(&at(10, 0, 1), "Ola mundo!");
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let name = FileName::from_stored("2025-03-07_10-00-00_Oi");
        assert_eq!(
            serde_json::to_string(&name).unwrap(),
            "\"2025-03-07_10-00-00_Oi\""
        );
    }
}
