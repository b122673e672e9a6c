use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::backend::{CompletionBackend, CompletionRequest};
use crate::error::BackendError;
use crate::models::BackendConfig;

/// Ollama API client
pub struct OllamaClient {
    client: Client,
    config: BackendConfig,
    stream_to_stdout: bool,
}

/// Chat message for Ollama chat API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Request body for Ollama chat endpoint
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

/// Generation options for the chat endpoint
#[derive(Debug, Serialize)]
struct ChatOptions {
    num_predict: u32,
}

/// Response from Ollama chat endpoint (streaming)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatMessageResponse>,
    done: bool,
    #[serde(default)]
    total_duration: Option<u64>,
    #[serde(default)]
    eval_count: Option<u64>,
}

/// Message content in chat response
#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

impl OllamaClient {
    /// Create a new Ollama client with the given configuration
    pub fn new(config: BackendConfig, stream_to_stdout: bool) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config, stream_to_stdout })
    }

    fn chat_request(request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(sys) = &request.system_prompt {
            messages.push(ChatMessage::system(sys.as_str()));
        }
        messages.push(ChatMessage::user(request.prompt.as_str()));

        ChatRequest {
            model: request.model.clone(),
            messages,
            stream: true,
            options: ChatOptions { num_predict: request.max_tokens },
        }
    }

    /// Generate a response from Ollama using the chat API
    ///
    /// Returns the complete response text.
    pub async fn generate(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let url = format!("{}/api/chat", self.config.url);
        let body = Self::chat_request(request);

        debug!("Sending chat request to Ollama: {}", url);
        debug!("Using model: {}, max_tokens: {}", request.model, request.max_tokens);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    BackendError::ConnectionRefused(format!(
                        "Could not connect to Ollama at {}. Is Ollama running?",
                        self.config.url
                    ))
                } else if e.is_timeout() {
                    BackendError::Timeout(self.config.timeout_seconds)
                } else {
                    BackendError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::HttpError { status, message });
        }

        let mut full_response = String::new();
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut generation_done = false;
        let mut token_count = 0usize;
        let mut last_progress_log = std::time::Instant::now();
        let progress_interval = Duration::from_secs(10);

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| BackendError::StreamError(e.to_string()))?;

            // Ollama sends newline-delimited JSON; a chunk may end mid-character
            buffer.extend_from_slice(&chunk);

            for line in take_complete_lines(&mut buffer) {
                let parsed = match parse_chunk(&line) {
                    Ok(p) => p,
                    Err(e) if !full_response.is_empty() => {
                        debug!("Ignoring parse error on final chunk: {}", e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let content = parsed.message.as_ref().map(|m| m.content.as_str()).unwrap_or("");
                full_response.push_str(content);
                token_count += 1;

                if !self.stream_to_stdout && last_progress_log.elapsed() > progress_interval {
                    info!("Generation in progress: {} tokens, {} chars so far...",
                        token_count, full_response.len());
                    last_progress_log = std::time::Instant::now();
                }

                if self.stream_to_stdout {
                    print!("{}", content);
                    io::stdout().flush().ok();
                }

                if parsed.done {
                    generation_done = true;
                    if self.stream_to_stdout {
                        println!();
                    }
                    if let Some(duration) = parsed.total_duration {
                        debug!("Generation completed in {}ms", duration / 1_000_000);
                    }
                    if let Some(count) = parsed.eval_count {
                        debug!("Tokens generated: {}", count);
                    }
                    break;
                }
            }

            if generation_done {
                break;
            }
        }

        debug!("Generated {} characters", full_response.len());
        Ok(full_response)
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/tags", self.config.url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    BackendError::ConnectionRefused(format!(
                        "Could not connect to Ollama at {}",
                        self.config.url
                    ))
                } else {
                    BackendError::from(e)
                }
            })?;

        Ok(response.status().is_success())
    }

    /// Check if the configured model is available
    pub async fn check_model(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/tags", self.config.url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))?;

        let model_name = &self.config.model;
        let found = tags.models.iter().any(|m| {
            m.name == *model_name || m.name.starts_with(&format!("{}:", model_name))
        });

        if !found {
            warn!(
                "Model '{}' not found. Available models: {:?}",
                model_name,
                tags.models.iter().map(|m| &m.name).collect::<Vec<_>>()
            );
        }

        Ok(found)
    }
}

impl CompletionBackend for OllamaClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        self.generate(request).await
    }
}

/// Split every complete line off the front of `buffer`, decoding whole lines
/// only. Bytes after the last newline stay buffered.
fn take_complete_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let Some(last_newline) = buffer.iter().rposition(|&b| b == b'\n') else {
        return Vec::new();
    };
    let rest = buffer.split_off(last_newline + 1);
    let complete = std::mem::replace(buffer, rest);

    complete
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}

fn parse_chunk(line: &str) -> Result<ChatResponse, BackendError> {
    serde_json::from_str(line).map_err(|e| {
        let preview: String = line.chars().take(200).collect();
        BackendError::ParseError(format!("Failed to parse: {} - {}", preview, e))
    })
}
