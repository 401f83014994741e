use anyhow::anyhow;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use tracing::debug;

/// Failure modes of a text-generation request.
///
/// `Upstream` and `EmptyCompletion` both mean the external capability did not
/// produce a usable completion; they are kept separate so logs can tell an
/// unreachable backend from one that answered with nothing.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("missing prompt template `{0}`")]
    MissingTemplate(&'static str),
    #[error("text generation backend unavailable: {0}")]
    Upstream(#[source] anyhow::Error),
    #[error("text generation backend returned an empty completion")]
    EmptyCompletion,
}

/// A generic client for the external text-generation capability.
///
/// The prompt goes in as one string and the completion comes back verbatim.
/// Injected into the question generator and the feedback synthesizer so tests
/// can substitute a double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// An implementation of `TextGenerator` for any OpenAI-compatible API.
///
/// Both supported providers go through this client: OpenAI natively, and
/// Gemini via its OpenAI-compatible endpoint.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions.
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAICompatibleClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| GenerationError::Upstream(anyhow!(e)))?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .build()
            .map_err(|e| GenerationError::Upstream(anyhow!(e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerationError::Upstream(anyhow!(e)))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        debug!(
            model = %self.model,
            completion_chars = content.len(),
            "Text generation succeeded"
        );
        Ok(content)
    }
}
