//! Sequential chunk-by-chunk answering
//!
//! Chunks are tried strictly in document order, one completion request per
//! chunk, and the first non-empty trimmed answer wins; later chunks are
//! never queried. When every chunk comes back empty (or there are no chunks
//! at all) the fixed fallback sentinel is returned instead.

use tracing::{debug, info};

use crate::llm::ChatApi;
use crate::types::{AppResult, ChatMessage};

/// Sentinel answer when no chunk produces a usable response.
pub const FALLBACK_ANSWER: &str =
    "I couldn't find an answer to your question in the document.";

/// Fixed system instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Respond using markdown.";

/// Query `chunks` in order and return the first non-empty answer.
///
/// API failures propagate and abort the whole request; a response without
/// choices only skips to the next chunk.
pub async fn answer_question<'a, I>(
    client: &dyn ChatApi,
    chunks: I,
    question: &str,
) -> AppResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    for (index, chunk) in chunks.into_iter().enumerate() {
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(chunk),
            ChatMessage::assistant(""),
            ChatMessage::user(question),
        ];

        match client.complete(&messages).await? {
            Some(content) => {
                let content = content.trim();
                if content.is_empty() {
                    debug!(chunk = index, "empty completion, trying next chunk");
                    continue;
                }
                info!(chunk = index, answer_len = content.len(), "answer found");
                return Ok(content.to_string());
            }
            None => {
                debug!(chunk = index, "no choices in completion, trying next chunk");
            }
        }
    }

    info!("no chunk yielded an answer, returning fallback");
    Ok(FALLBACK_ANSWER.to_string())
}
