use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{parse_dish_list, parse_ingredient_list, IngredientExtractor};
use crate::config::ExtractorConfig;

const INGREDIENTS_PROMPT: &str = "You are a nutrition assistant. Extract a list of likely ingredients \
(comma-separated) from the given dish name.";

const DISHES_PROMPT: &str = "You are a nutrition assistant. List the dishes or food items in the \
given menu text (comma-separated). Leave out section headings, descriptions, prices and contact details.";

/// Ingredient extractor backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsExtractor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsExtractor {
    pub fn new(client: Client, config: &ExtractorConfig, api_key: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        }
    }

    /// Build an extractor from config, reading the API key from the configured
    /// environment variable (a `.env` file in the working directory counts).
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("{} not found in environment variables", config.api_key_env))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::new(client, config, api_key))
    }

    fn request(&self, system: &str, user: String) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
        }
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat completion request rejected");
            bail!("language model API returned {}: {}", status, body);
        }

        let data: ChatResponse = response
            .json()
            .await
            .context("failed to parse language model response")?;

        data.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("language model returned no content"))
    }
}

impl IngredientExtractor for ChatCompletionsExtractor {
    async fn extract(&self, dish: &str) -> Result<Vec<String>> {
        info!(dish, model = %self.model, "extracting ingredients");
        let request = self.request(INGREDIENTS_PROMPT, format!("Dish: {}", dish));

        let reply = self.complete(&request).await?;
        debug!(dish, reply = %reply, "language model reply");
        Ok(parse_ingredient_list(&reply))
    }

    async fn identify_dishes(&self, text: &str) -> Result<Vec<String>> {
        info!(model = %self.model, "identifying dishes in menu text");
        let request = self.request(DISHES_PROMPT, format!("Menu text:\n{}", text));

        let reply = self.complete(&request).await?;
        debug!(reply = %reply, "language model reply");
        Ok(parse_dish_list(&reply))
    }
}
