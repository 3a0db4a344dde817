use crate::{Error, Result, llm::ChatCompletionResponse};

/// Extracts the generated text from a completion, discarding usage and
/// finish reason.
pub fn parse_text(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| Error::llm(format!("Completion {} returned no choices", response.id)))
}
