// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


use async_trait::async_trait;
use llm_contracts::{LLMError, LLMResult, ProviderRequest, ProviderResponse, Usage};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{as_u32, build_http_client, execute_once, ApiClient};

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: Option<String>, timeout_seconds: u64) -> LLMResult<Self> {
        let timeout = Duration::from_secs(timeout_seconds);
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url
                .unwrap_or_else(|| "http://localhost:11434".to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout,
        })
    }

    fn build_ollama_payload(&self, request: &ProviderRequest) -> Value {
        let mut payload = json!({
            "model": request.model,
            "messages": request.messages.iter().map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content
                })
            }).collect::<Vec<_>>(),
            "stream": false
        });

        let mut options = serde_json::Map::new();
        if let Some(max_tokens) = request.max_tokens {
            options.insert("num_predict".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = request.temperature {
            options.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(top_p) = request.top_p {
            options.insert("top_p".to_string(), json!(top_p));
        }
        if let Some(stop) = &request.stop_sequences {
            options.insert("stop".to_string(), json!(stop));
        }
        if !options.is_empty() {
            payload["options"] = Value::Object(options);
        }

        for (key, value) in &request.provider_specific {
            payload[key] = value.clone();
        }

        payload
    }

    fn parse_ollama_response(
        &self,
        response_data: Value,
        model: String,
    ) -> LLMResult<ProviderResponse> {
        let content = response_data["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                LLMError::Provider("Failed to extract content from Ollama response".to_string())
            })?;

        let usage = Usage::new(
            as_u32(&response_data["prompt_eval_count"]),
            as_u32(&response_data["eval_count"]),
        );

        let finish_reason = if response_data["done"].as_bool().unwrap_or(false) {
            Some("stop".to_string())
        } else {
            None
        };

        Ok(ProviderResponse {
            content: content.to_string(),
            model,
            usage,
            finish_reason,
            raw_response: response_data,
        })
    }
}

#[async_trait]
impl ApiClient for OllamaClient {
    async fn send_request(&self, request: ProviderRequest) -> LLMResult<ProviderResponse> {
        let payload = self.build_ollama_payload(&request);
        let url = format!("{}/api/chat", self.base_url);
        let builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&payload);
        let response_data = execute_once(builder, self.timeout, self.provider_name()).await?;
        self.parse_ollama_response(response_data, request.model)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    async fn health_check(&self, model: &str) -> LLMResult<()> {
        let url = format!("{}/api/tags", self.base_url);
        let models_data =
            execute_once(self.client.get(&url), self.timeout, self.provider_name()).await?;

        let Some(models) = models_data["models"].as_array() else {
            return Err(LLMError::Provider(
                "Invalid response format from Ollama /api/tags".to_string(),
            ));
        };

        let model_names: Vec<&str> = models
            .iter()
            .filter_map(|entry| entry["name"].as_str())
            .collect();
        debug!("Ollama models available: {:?}", model_names);

        if model_names
            .iter()
            .any(|name| *name == model || name.split(':').next() == Some(model))
        {
            info!("Ollama connected, model {} available", model);
            Ok(())
        } else {
            warn!("Ollama is running but model {} is not pulled", model);
            Err(LLMError::Provider(format!(
                "Model {model} not available in Ollama"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_contracts::{GenerationConfig, Message};

    #[test]
    fn test_payload_carries_generation_options() {
        let client = OllamaClient::new(None, 5).unwrap();
        let request = ProviderRequest::new(
            "llama3.2",
            vec![Message::user("hello")],
            &GenerationConfig::default(),
        );
        let payload = client.build_ollama_payload(&request);
        assert_eq!(payload["model"], "llama3.2");
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["options"]["num_predict"], 400);
        assert_eq!(payload["messages"][0]["role"], "user");
    }

    #[test]
    fn test_missing_content_is_provider_error() {
        let client = OllamaClient::new(None, 5).unwrap();
        let result = client.parse_ollama_response(json!({"done": true}), "m".to_string());
        assert!(matches!(result, Err(LLMError::Provider(_))));
    }
}
