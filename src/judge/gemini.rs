//! Word judge backed by the hosted Gemini generateContent API.
//!
//! Transport failures never escape this module: validation falls back to
//! the local best-effort verdict and suggestions fall back to the empty
//! string (the bot skips its move).

use super::{fallback_verdict, sanitize_suggestion, Verdict, WordJudge};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Judge configuration. The API key is injected here; game logic never
/// reads the process environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        GeminiConfig {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Gemini-backed implementation of [`WordJudge`].
pub struct GeminiJudge {
    config: GeminiConfig,
    agent: ureq::Agent,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Shape of the JSON text the model returns for a validation question.
#[derive(Deserialize)]
struct CheckPayload {
    #[serde(rename = "isValid")]
    is_valid: bool,
    reason: Option<String>,
}

impl GeminiJudge {
    pub fn new(config: GeminiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build();
        GeminiJudge { config, agent }
    }

    /// Run one generateContent call and return the first candidate's text.
    fn generate(&self, prompt: &str, json_response: bool) -> Result<String, String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: json_response.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&request)
            .map_err(|e| e.to_string())?;

        let body: GenerateResponse = response.into_json().map_err(|e| e.to_string())?;
        first_text(body).ok_or_else(|| "empty response".to_string())
    }
}

impl WordJudge for GeminiJudge {
    fn check_word(&self, word: &str, category: &str, letter: char) -> Verdict {
        match self.generate(&check_prompt(word, category, letter), true) {
            Ok(text) => parse_check_payload(&text).unwrap_or_else(|| fallback_verdict(word, letter)),
            Err(_) => fallback_verdict(word, letter),
        }
    }

    fn suggest_word(&self, category: &str, letter: char, excluded: &[String]) -> String {
        match self.generate(&suggest_prompt(category, letter, excluded), false) {
            Ok(text) => sanitize_suggestion(&text),
            Err(_) => String::new(),
        }
    }
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .next()
        .map(|p| p.text)
}

fn check_prompt(word: &str, category: &str, letter: char) -> String {
    format!(
        "Soru: \"{}\" kelimesi \"{}\" kategorisine uygun ve \"{}\" harfi ile başlayan geçerli \
         bir Türkçe kelime midir? Sadece {{\"isValid\": bool, \"reason\": string}} \
         biçiminde JSON döndür.",
        word, category, letter
    )
}

fn suggest_prompt(category: &str, letter: char, excluded: &[String]) -> String {
    format!(
        "Bana \"{}\" kategorisinde olan ve \"{}\" harfi ile başlayan, daha önce kullanılmamış \
         bir Türkçe kelime söyle. Sadece kelimeyi döndür. Daha önce kullanılanlar: {}",
        category,
        letter,
        excluded.join(", ")
    )
}

fn parse_check_payload(text: &str) -> Option<Verdict> {
    let payload: CheckPayload = serde_json::from_str(text.trim()).ok()?;
    Some(Verdict {
        valid: payload.is_valid,
        reason: payload.reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_prompt_mentions_word_category_letter() {
        let prompt = check_prompt("kedi", "Hayvanlar", 'K');
        assert!(prompt.contains("\"kedi\""));
        assert!(prompt.contains("\"Hayvanlar\""));
        assert!(prompt.contains("\"K\""));
    }

    #[test]
    fn test_suggest_prompt_lists_used_words() {
        let used = vec!["kedi".to_string(), "kurt".to_string()];
        let prompt = suggest_prompt("Hayvanlar", 'K', &used);
        assert!(prompt.contains("kedi, kurt"));
    }

    #[test]
    fn test_parse_check_payload_valid() {
        let v = parse_check_payload(r#"{"isValid": true}"#).unwrap();
        assert!(v.valid);
        assert_eq!(v.reason, None);
    }

    #[test]
    fn test_parse_check_payload_invalid_with_reason() {
        let v = parse_check_payload(r#" {"isValid": false, "reason": "Uydurma kelime."} "#)
            .unwrap();
        assert!(!v.valid);
        assert_eq!(v.reason.as_deref(), Some("Uydurma kelime."));
    }

    #[test]
    fn test_parse_check_payload_garbage_is_none() {
        assert_eq!(parse_check_payload("not json"), None);
        assert_eq!(parse_check_payload(""), None);
    }

    #[test]
    fn test_first_text_extracts_candidate() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"kedi"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_text(response).as_deref(), Some("kedi"));
    }

    #[test]
    fn test_first_text_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_text(response), None);
    }
}
