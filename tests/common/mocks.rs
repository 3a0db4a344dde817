use async_trait::async_trait;
use prompt_relay::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient, Usage},
};
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing. Answers every call with a fixed reply and
/// records each request it receives.
#[derive(Debug)]
pub struct MockLlmClient {
    pub reply: String,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    /// Number of upcoming calls that should fail.
    pub failures: Arc<Mutex<usize>>,
    pub error: String,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            reply: "4".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(0)),
            error: "upstream unavailable".to_string(),
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    pub fn with_failures(self, count: usize) -> Self {
        *self.failures.lock().unwrap() = count;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Content of every message sent upstream, in call order.
    pub fn sent_prompts(&self) -> Vec<String> {
        self.get_requests()
            .into_iter()
            .flat_map(|r| r.messages.into_iter().map(|m| m.content))
            .collect()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(Error::llm(self.error.clone()));
            }
        }

        Ok(ChatCompletionResponse {
            id: "chatcmpl-mock".to_string(),
            model: "mock-model".to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::assistant(self.reply.clone()),
                finish_reason: Some("Stop".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 1,
                total_tokens: 11,
            }),
        })
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
