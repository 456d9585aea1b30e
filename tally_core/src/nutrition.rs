//! Nutrition lookup collaborator.
//!
//! Asks a language model for the calorie density of a free-text food
//! name via an OpenRouter-style chat-completions endpoint, then
//! extracts the first numeric substring from the reply. Any failure,
//! including an unparseable reply, degrades to 0.0, which is a
//! legitimate value downstream and never an error signal.

use crate::config::NutritionConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an expert dietitian. You are given the name of a food \
     product. Return ONLY the number of kilocalories per 100 grams of the product (an integer \
     or a decimal number). No extra text, just the number. If the product does not exist or is \
     not food, return 0.";

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?").expect("numeric pattern is valid"));

/// A collaborator that resolves a food name to kilocalories per 100 g.
///
/// Implementations must be infallible from the caller's point of view:
/// a degraded lookup returns 0.0, never an error.
pub trait NutritionLookup {
    fn calories_per_100g(&self, food: &str) -> f64;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Nutrition lookup backed by a chat-completions language model.
pub struct LlmNutritionClient {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmNutritionClient {
    pub fn new(config: &NutritionConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn ask(&self, food: &str, api_key: &str) -> Result<String, reqwest::Error> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: food,
                },
            ],
            temperature: 0.2,
        };

        let response: ChatResponse = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

impl NutritionLookup for LlmNutritionClient {
    fn calories_per_100g(&self, food: &str) -> f64 {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("No nutrition API key configured; assuming 0 kcal per 100 g");
                return 0.0;
            }
        };

        match self.ask(food, api_key) {
            Ok(answer) => parse_calories(&answer),
            Err(e) => {
                tracing::warn!("Nutrition lookup for {:?} failed: {}. Assuming 0 kcal", food, e);
                0.0
            }
        }
    }
}

/// Extract the first numeric substring from a model reply, or 0.0 when
/// the reply contains no parseable number.
fn parse_calories(answer: &str) -> f64 {
    match NUMBER_RE
        .find(answer)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        Some(value) => value,
        None => {
            tracing::warn!("Nutrition reply contained no number: {:?}. Assuming 0 kcal", answer);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NutritionConfig;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_calories("89"), 89.0);
        assert_eq!(parse_calories("52.5"), 52.5);
    }

    #[test]
    fn test_parse_number_embedded_in_prose() {
        // Models do not always obey "just the number"
        assert_eq!(parse_calories("A banana has about 89 kcal per 100g."), 89.0);
        assert_eq!(parse_calories("~52.5 kcal"), 52.5);
    }

    #[test]
    fn test_parse_takes_first_number() {
        assert_eq!(parse_calories("89 kcal (375 kJ)"), 89.0);
    }

    #[test]
    fn test_unparseable_reply_degrades_to_zero() {
        assert_eq!(parse_calories("that is not a food"), 0.0);
        assert_eq!(parse_calories(""), 0.0);
    }

    #[test]
    fn test_missing_api_key_degrades_to_zero() {
        let config = NutritionConfig {
            api_key: None,
            ..NutritionConfig::default()
        };
        let client = LlmNutritionClient::new(&config);
        assert_eq!(client.calories_per_100g("banana"), 0.0);
    }

    #[test]
    fn test_unreachable_endpoint_degrades_to_zero() {
        let config = NutritionConfig {
            api_url: "http://127.0.0.1:0/v1/chat/completions".into(),
            api_key: Some("key".into()),
            timeout_seconds: 1,
            ..NutritionConfig::default()
        };
        let client = LlmNutritionClient::new(&config);
        assert_eq!(client.calories_per_100g("banana"), 0.0);
    }
}
