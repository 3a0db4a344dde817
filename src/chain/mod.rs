//! The prompt → model → string pipeline behind the query endpoint.
//!
//! [`Chain::invoke`] runs three steps in order: fill the prompt template,
//! make one call to the hosted model, and pull the generated text out of
//! the completion. Nothing is cached between calls.

mod parser;
mod prompt;

pub use parser::parse_text;
pub use prompt::PromptTemplate;

use crate::{
    Error, Result,
    config::Config,
    llm::{ChatCompletionRequest, LlmClient, OpenAiClient},
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

pub const QUESTION_VARIABLE: &str = "question";

/// Generation settings applied to every upstream call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

pub struct Chain {
    prompt: PromptTemplate,
    llm: Arc<dyn LlmClient>,
    params: DecodingParams,
}

impl Chain {
    pub fn new(
        prompt: PromptTemplate,
        llm: Arc<dyn LlmClient>,
        params: DecodingParams,
    ) -> Result<Self> {
        if prompt.input_variables() != [QUESTION_VARIABLE] {
            return Err(Error::template(format!(
                "Template must use exactly one variable {{{}}}, found {:?}",
                QUESTION_VARIABLE,
                prompt.input_variables()
            )));
        }

        Ok(Self {
            prompt,
            llm,
            params,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let prompt = PromptTemplate::from_template(&config.prompt.template)?;
        let llm = OpenAiClient::new(config.llm.clone())?;
        let params = DecodingParams {
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        };

        Self::new(prompt, Arc::new(llm), params)
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    pub fn params(&self) -> DecodingParams {
        self.params
    }

    pub async fn invoke(&self, question: &str) -> Result<String> {
        let variables = HashMap::from([(QUESTION_VARIABLE, question)]);
        let messages = self.prompt.format_messages(&variables)?;

        let request = ChatCompletionRequest {
            messages,
            max_tokens: Some(self.params.max_tokens),
            temperature: Some(self.params.temperature),
        };

        let response = self.llm.create_chat_completion(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completion {} from {} used {} tokens ({} prompt, {} completion)",
                response.id,
                response.model,
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        parse_text(response)
    }
}
