//! Minimal client for an OpenAI-compatible chat endpoint (OpenAI, Ollama's `/v1`, vLLM, ...).
//!
//! We only call chat.completions for plain text; callers extract JSON themselves,
//! because local models rarely honour `response_format`.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key.

use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::RemoteCfg;

#[derive(Clone)]
pub struct ChatClient {
  client: reqwest::Client,
  api_key: Option<String>,
  pub base_url: String,
  pub model: String,
}

impl ChatClient {
  pub fn new(cfg: &RemoteCfg) -> Result<Self, String> {
    let client = reqwest::Client::builder()
      .timeout(cfg.timeout)
      .build()
      .map_err(|e| e.to_string())?;
    Ok(Self {
      client,
      api_key: cfg.api_key.clone(),
      base_url: cfg.base_url.clone(),
      model: cfg.model.clone(),
    })
  }

  fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let req = req.header(USER_AGENT, "quizforge-backend/0.1");
    match &self.api_key {
      Some(key) => req.header(AUTHORIZATION, format!("Bearer {key}")),
      None => req,
    }
  }

  /// `GET {base}/models`; true when the endpoint answers 2xx.
  #[instrument(level = "info", target = "generation", skip(self), fields(base_url = %self.base_url))]
  pub async fn check_connection(&self) -> bool {
    let url = format!("{}/models", self.base_url);
    match self.authorized(self.client.get(&url)).send().await {
      Ok(res) if res.status().is_success() => {
        info!(target: "generation", model = %self.model, "Remote model endpoint reachable");
        true
      }
      Ok(res) => {
        warn!(target: "generation", status = %res.status(), "Remote model endpoint answered with an error");
        false
      }
      Err(e) => {
        warn!(target: "generation", error = %e, "Remote model endpoint unreachable");
        false
      }
    }
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", target = "generation", skip(self, system, user), fields(model = %self.model, user_len = user.len()))]
  pub async fn chat_plain(&self, system: &str, user: &str, temperature: f32) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      stream: false,
    };

    let started = Instant::now();
    let res = self
      .authorized(self.client.post(&url))
      .header(CONTENT_TYPE, "application/json")
      .json(&req)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Err(format!("HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      debug!(target: "generation", prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Model usage");
    }
    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default()
      .trim()
      .to_string();

    info!(target: "generation", elapsed_ms = started.elapsed().as_millis() as u64, response_len = text.len(), "Chat completion received");
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  stream: bool,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI-style error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_errors_are_unwrapped() {
    assert_eq!(extract_api_error(r#"{"error":{"message":"model not found"}}"#).as_deref(), Some("model not found"));
    assert_eq!(extract_api_error("plain failure"), None);
  }
}
