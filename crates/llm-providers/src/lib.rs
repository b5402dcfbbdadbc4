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


pub mod anthropic;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use llm_contracts::{LLMError, LLMResult, Provider, ProviderRequest, ProviderResponse, ProviderSettings};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use anthropic::AnthropicClient;
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;

/// A chat-completion backend. Every call is a single attempt; callers that
/// want another try issue a new request.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send_request(&self, request: ProviderRequest) -> LLMResult<ProviderResponse>;

    fn provider_name(&self) -> &'static str;

    async fn health_check(&self, model: &str) -> LLMResult<()>;
}

/// Builds the client described by `settings`, reading credentials from the
/// environment.
pub fn client_from_settings(settings: &ProviderSettings) -> LLMResult<Arc<dyn ApiClient>> {
    let api_key = match settings.api_key_variable() {
        Some(var) => Some(std::env::var(&var).map_err(|_| {
            LLMError::Authentication(format!("{var} not set, {} client not available", settings.provider))
        })?),
        None => None,
    };

    let client: Arc<dyn ApiClient> = match settings.provider {
        Provider::Anthropic => Arc::new(AnthropicClient::new(
            api_key.unwrap_or_default(),
            settings.base_url.clone(),
            settings.api_version.clone(),
            settings.timeout_seconds,
        )?),
        Provider::OpenAI => Arc::new(OpenAIClient::new(
            api_key.unwrap_or_default(),
            settings.base_url.clone(),
            settings.timeout_seconds,
        )?),
        Provider::Ollama => {
            let base_url = settings
                .base_url
                .clone()
                .or_else(|| std::env::var("OLLAMA_BASE_URL").ok());
            Arc::new(OllamaClient::new(base_url, settings.timeout_seconds)?)
        }
    };

    info!(provider = %settings.provider, model = %settings.model, "Created LLM client");
    Ok(client)
}

pub(crate) fn build_http_client(timeout: Duration) -> LLMResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LLMError::Configuration(format!("Failed to create HTTP client: {e}")))
}

/// Sends one request and decodes the JSON body, mapping transport and status
/// failures onto `LLMError`.
pub(crate) async fn execute_once(
    request: RequestBuilder,
    timeout: Duration,
    provider: &str,
) -> LLMResult<Value> {
    debug!(provider, "Sending request");

    let response = match tokio::time::timeout(timeout, request.send()).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => return Err(LLMError::Network(format!("Request failed: {e}"))),
        Err(_) => {
            warn!(provider, "Request timed out after {:?}", timeout);
            return Err(LLMError::Timeout);
        }
    };

    let status = response.status();
    debug!(provider, %status, "Received response");

    if status.is_success() {
        return response
            .json::<Value>()
            .await
            .map_err(|e| LLMError::Serialisation(format!("Failed to parse JSON response: {e}")));
    }

    let error_body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LLMError::Authentication(format!("{provider} rejected credentials ({status})"))
        }
        StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
        _ => LLMError::Provider(format!("{provider} API error {status}: {error_body}")),
    })
}

pub(crate) fn as_u32(value: &Value) -> u32 {
    value.as_u64().unwrap_or(0) as u32
}
