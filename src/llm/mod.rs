pub mod openai;

use async_trait::async_trait;

use crate::types::{AppResult, ChatMessage};

pub use openai::OpenAiClient;

/// Seam between the answer loop and the external completion endpoint.
///
/// `Ok(None)` means the endpoint answered but offered no choices; the
/// caller moves on to the next chunk. Transport and API failures are real
/// errors and propagate.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<Option<String>>;
}
