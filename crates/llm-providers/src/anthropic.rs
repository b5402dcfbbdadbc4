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
use llm_contracts::{LLMError, LLMResult, Message, ProviderRequest, ProviderResponse, Usage};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::{as_u32, build_http_client, execute_once, ApiClient};

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    endpoint: String,
    api_version: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(
        api_key: String,
        endpoint: Option<String>,
        api_version: Option<String>,
        timeout_seconds: u64,
    ) -> LLMResult<Self> {
        let timeout = Duration::from_secs(timeout_seconds);
        Ok(Self {
            client: build_http_client(timeout)?,
            api_key,
            endpoint: endpoint
                .unwrap_or_else(|| "https://api.anthropic.com/v1/messages".to_string()),
            api_version: api_version.unwrap_or_else(|| "2023-06-01".to_string()),
            timeout,
        })
    }

    fn build_anthropic_payload(&self, request: &ProviderRequest) -> Value {
        let mut system_content = Vec::new();
        let mut regular_messages = Vec::new();

        for msg in &request.messages {
            if msg.role == "system" {
                system_content.push(msg.content.clone());
            } else {
                regular_messages.push(json!({
                    "role": msg.role,
                    "content": msg.content
                }));
            }
        }

        let mut payload = json!({
            "model": request.model,
            "messages": regular_messages,
            "max_tokens": request.max_tokens.unwrap_or(1024)
        });

        if !system_content.is_empty() {
            payload["system"] = json!(system_content.join("\n\n"));
        }
        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(top_p) = request.top_p {
            payload["top_p"] = json!(top_p);
        }
        if let Some(stop) = &request.stop_sequences {
            payload["stop_sequences"] = json!(stop);
        }

        for (key, value) in &request.provider_specific {
            payload[key] = value.clone();
        }

        payload
    }

    fn parse_anthropic_response(
        &self,
        response_data: Value,
        model: String,
    ) -> LLMResult<ProviderResponse> {
        let content = response_data["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                LLMError::Provider("Failed to extract content from Anthropic response".to_string())
            })?;

        let usage = match response_data.get("usage") {
            Some(usage_data) => Usage::new(
                as_u32(&usage_data["input_tokens"]),
                as_u32(&usage_data["output_tokens"]),
            ),
            None => Usage::default(),
        };

        let finish_reason = response_data["stop_reason"].as_str().map(|s| s.to_string());

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
impl ApiClient for AnthropicClient {
    async fn send_request(&self, request: ProviderRequest) -> LLMResult<ProviderResponse> {
        let payload = self.build_anthropic_payload(&request);
        let builder = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&payload);
        let response_data = execute_once(builder, self.timeout, self.provider_name()).await?;
        self.parse_anthropic_response(response_data, request.model)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    async fn health_check(&self, model: &str) -> LLMResult<()> {
        let probe = ProviderRequest {
            model: model.to_string(),
            messages: vec![Message::user("Hi")],
            max_tokens: Some(10),
            temperature: Some(0.1),
            top_p: None,
            stop_sequences: None,
            provider_specific: HashMap::new(),
        };

        self.send_request(probe).await?;
        Ok(())
    }
}
