use crate::models::{MatchSuggestion, Mentor};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while obtaining a match recommendation
///
/// None of these are surfaced to the user as blocking errors: the
/// consuming layer degrades to "no recommendation" and logs.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("match query is empty")]
    EmptyQuery,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("matching service returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Single-method seam around the external matching model
///
/// Production uses [`GeminiClient`]; tests swap in a deterministic
/// stub.
#[async_trait]
pub trait MentorRecommender: Send + Sync {
    /// Find the single best-fit mentor for a free-text goal
    async fn recommend(
        &self,
        query: &str,
        mentors: &[Mentor],
    ) -> Result<MatchSuggestion, MatchError>;
}

/// The exact reply shape the model is constrained to
///
/// Anything beyond the two required string fields is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuggestionReply {
    id: String,
    reason: String,
}

/// Client for the Google generative language API
///
/// One structured-completion call per query: the full catalog plus the
/// user's free text go into a single prompt, the reply is constrained
/// to a two-field JSON object. No conversation state, no retries.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Serialize the catalog into the prompt context
    fn mentor_context(mentors: &[Mentor]) -> String {
        mentors
            .iter()
            .map(|m| {
                format!(
                    "ID: {}, Имя: {}, Индустрия: {}, Описание: {}, Ценности: {}",
                    m.id,
                    m.name,
                    m.industry,
                    m.description,
                    m.values.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn build_prompt(query: &str, mentors: &[Mentor]) -> String {
        format!(
            "У нас есть список наставников для платформы ШАГ:\n{}\n\n\
             Пользователь говорит: \"{}\"\n\n\
             Найди одного наиболее подходящего наставника и объясни почему \
             одним коротким предложением. Верни только JSON в формате: \
             {{\"id\": \"ID наставника\", \"reason\": \"почему подходит\"}}.",
            Self::mentor_context(mentors),
            query
        )
    }
}

#[async_trait]
impl MentorRecommender for GeminiClient {
    async fn recommend(
        &self,
        query: &str,
        mentors: &[Mentor],
    ) -> Result<MatchSuggestion, MatchError> {
        if query.trim().is_empty() {
            return Err(MatchError::EmptyQuery);
        }

        let body = json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(query, mentors) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["id", "reason"]
                }
            }
        });

        tracing::debug!("Requesting match recommendation for query: {}", query);

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MatchError::ApiError(format!(
                "Match request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        // generateContent wraps the model text several levels deep
        let text = json
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| MatchError::InvalidResponse("Missing candidate text".into()))?;

        let reply: SuggestionReply = serde_json::from_str(text)
            .map_err(|e| MatchError::InvalidResponse(format!("Failed to parse reply: {}", e)))?;

        tracing::debug!("Match recommendation: {} ({})", reply.id, reply.reason);

        Ok(MatchSuggestion {
            mentor_id: reply.id,
            reason: reply.reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentor(id: &str, name: &str) -> Mentor {
        Mentor {
            id: id.to_string(),
            name: name.to_string(),
            industry: "IT".to_string(),
            city: "Москва".to_string(),
            experience: "10 лет".to_string(),
            description: "Наставник".to_string(),
            achievements: vec![],
            request: String::new(),
            values: vec!["честность".to_string(), "труд".to_string()],
            video_url: String::new(),
            avatar_url: String::new(),
            single_price: 3000,
            group_price: 1000,
        }
    }

    #[test]
    fn test_mentor_context_one_line_per_mentor() {
        let mentors = vec![mentor("a", "Анна"), mentor("b", "Борис")];
        let context = GeminiClient::mentor_context(&mentors);

        assert_eq!(context.lines().count(), 2);
        assert!(context.contains("ID: a, Имя: Анна"));
        assert!(context.contains("Ценности: честность, труд"));
    }

    #[test]
    fn test_prompt_includes_query_and_catalog() {
        let mentors = vec![mentor("a", "Анна")];
        let prompt = GeminiClient::build_prompt("хочу в IT", &mentors);

        assert!(prompt.contains("хочу в IT"));
        assert!(prompt.contains("ID: a"));
        assert!(prompt.contains("Верни только JSON"));
    }

    #[test]
    fn test_reply_shape_is_strict() {
        let ok: Result<SuggestionReply, _> =
            serde_json::from_str(r#"{"id": "a", "reason": "подходит"}"#);
        assert!(ok.is_ok());

        let extra: Result<SuggestionReply, _> =
            serde_json::from_str(r#"{"id": "a", "reason": "x", "score": 1}"#);
        assert!(extra.is_err());

        let missing: Result<SuggestionReply, _> = serde_json::from_str(r#"{"id": "a"}"#);
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_any_request() {
        let client = GeminiClient::new(
            "http://127.0.0.1:1".to_string(),
            "test_key".to_string(),
            "gemini-3-flash-preview".to_string(),
        );

        let result = client.recommend("   ", &[mentor("a", "Анна")]).await;
        assert!(matches!(result, Err(MatchError::EmptyQuery)));
    }
}
