//! Word judging: is a candidate a real Turkish word for the category?
//!
//! The round engine only sees the `WordJudge` trait. The production
//! implementation calls a hosted generative-language API; tests script
//! their own verdicts.

pub mod gemini;
pub mod runner;

pub use gemini::{GeminiConfig, GeminiJudge};
pub use runner::{JudgeReply, JudgeRunner};

/// A judge's answer for one candidate word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    /// Human-readable explanation, shown to the player on rejection
    pub reason: Option<String>,
}

impl Verdict {
    pub fn valid() -> Self {
        Verdict {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: &str) -> Self {
        Verdict {
            valid: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// External word-judging capability. Calls block, so implementations run
/// on worker threads, never on the event loop.
pub trait WordJudge: Send + Sync {
    /// Judge whether `word` fits `category` and starts with `letter`.
    /// Must not fail: transport errors are converted to [`fallback_verdict`]
    /// inside the implementation.
    fn check_word(&self, word: &str, category: &str, letter: char) -> Verdict;

    /// Suggest an unused word for the category/letter, or an empty string
    /// if nothing comes to mind (including on transport errors).
    fn suggest_word(&self, category: &str, letter: char, excluded: &[String]) -> String;
}

/// Local best-effort verdict for when the judge service is unreachable:
/// accept any word of more than two characters that starts with the
/// required letter, and say so.
pub fn fallback_verdict(word: &str, letter: char) -> Verdict {
    let prefix: String = letter.to_lowercase().collect();
    let valid = word.to_lowercase().starts_with(&prefix) && word.chars().count() > 2;
    Verdict {
        valid,
        reason: Some("Bağlantı hatası nedeniyle temel kontrol yapıldı.".to_string()),
    }
}

/// Clean up a raw model suggestion: keep the first whitespace-separated
/// token, then strip everything outside the Turkish alphabet.
pub fn sanitize_suggestion(raw: &str) -> String {
    const EXTRA: [char; 12] = ['ç', 'Ç', 'ğ', 'Ğ', 'ı', 'İ', 'ö', 'Ö', 'ş', 'Ş', 'ü', 'Ü'];
    raw.trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || EXTRA.contains(c))
        .collect()
}
