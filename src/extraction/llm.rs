//! LLM-based extraction over an OpenAI-compatible chat completion API.

use super::Extractor;
use crate::config::{ExtractionSettings, Prompts};
use crate::error::{OnboardError, Result};
use crate::openai::create_client_with_timeout;
use crate::record::ExtractedRecord;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Chat-completion extractor running in JSON mode.
pub struct LlmExtractor {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl LlmExtractor {
    /// Create an extractor from settings, resolving the API key.
    pub fn from_settings(settings: &ExtractionSettings, prompts: &Prompts) -> Result<Self> {
        let api_key = settings.resolve_api_key()?;
        let client = create_client_with_timeout(
            &settings.api_base,
            &api_key,
            Duration::from_secs(settings.timeout_secs),
        )?;

        Ok(Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
            system_prompt: prompts.extraction_system(),
        })
    }

    /// Parse the model output into a record.
    ///
    /// Takes the outermost `{...}` span so stray prose or code fences are
    /// ignored. An empty object means nothing was extracted.
    pub(crate) fn parse_record(response: &str) -> Result<Option<ExtractedRecord>> {
        let json_str = match (response.find('{'), response.rfind('}')) {
            (Some(start), Some(end)) if end > start => &response[start..=end],
            _ => response,
        };

        let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
            OnboardError::Extraction(format!(
                "Failed to parse extraction response: {}. Response was: {}",
                e,
                response.chars().take(500).collect::<String>()
            ))
        })?;

        match value {
            serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
            serde_json::Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
            other => Err(OnboardError::Extraction(format!(
                "Expected a JSON object, got: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl Extractor for LlmExtractor {
    #[instrument(skip(self, content), fields(model = %self.model, chars = content.len()))]
    async fn extract(&self, content: &str) -> Result<Option<ExtractedRecord>> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| OnboardError::Extraction(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map_err(|e| OnboardError::Extraction(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .max_completion_tokens(self.max_tokens)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| OnboardError::Extraction(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| OnboardError::OpenAI(format!("Extraction request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| OnboardError::Extraction("Empty response from LLM".to_string()))?;

        debug!(
            "LLM extraction response: {}",
            content.chars().take(500).collect::<String>()
        );

        Self::parse_record(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "business_name": "El Nacional",
            "company_info": {"sector": "Restaurants"},
            "locations": [{"kind": "Restaurant", "address": {"street": "Passeig de Gracia 24", "city": "Barcelona"}}]
        }"#;

        let record = LlmExtractor::parse_record(json).unwrap().unwrap();
        assert_eq!(record.entity_name(), "El Nacional");
        assert_eq!(record.company_info.sector, "Restaurants");
        assert_eq!(record.locations[0].address.city, "Barcelona");
    }

    #[test]
    fn test_parse_record_with_markdown() {
        let response = r#"Here is the data:

```json
{"business_name": "Acme", "extra_info": "Family owned"}
```
"#;

        let record = LlmExtractor::parse_record(response).unwrap().unwrap();
        assert_eq!(record.extra_info, "Family owned");
    }

    #[test]
    fn test_empty_object_is_none() {
        assert!(LlmExtractor::parse_record("{}").unwrap().is_none());
        assert!(LlmExtractor::parse_record("  { }  ").unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            LlmExtractor::parse_record("no json here"),
            Err(OnboardError::Extraction(_))
        ));
        assert!(LlmExtractor::parse_record(r#"{"business_name": "Acme""#).is_err());
    }
}
