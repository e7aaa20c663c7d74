/*!
 * Translation backends.
 *
 * The core never talks to a model directly: it calls a [`Translator`]
 * bound to one language pair. Implementations:
 * - `ollama`: Ollama server client, one model per stage
 * - `mock`: deterministic translators for tests
 * - [`FnTranslator`]: wraps a plain closure
 */

use async_trait::async_trait;
use std::fmt::{self, Debug};

use crate::errors::ProviderError;
use crate::language::LanguagePair;

/// Text in, text out translation for a fixed language pair
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Language pair this translator is bound to
    fn pair(&self) -> LanguagePair;

    /// Translate a single piece of plain text
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;

    /// Check that the backend is reachable
    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Translator backed by a synchronous closure
pub struct FnTranslator<F> {
    pair: LanguagePair,
    func: F,
}

impl<F> FnTranslator<F>
where
    F: Fn(&str) -> Result<String, ProviderError> + Send + Sync,
{
    pub fn new(pair: LanguagePair, func: F) -> Self {
        Self { pair, func }
    }
}

impl<F> Debug for FnTranslator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTranslator").field("pair", &self.pair).finish()
    }
}

#[async_trait]
impl<F> Translator for FnTranslator<F>
where
    F: Fn(&str) -> Result<String, ProviderError> + Send + Sync,
{
    fn pair(&self) -> LanguagePair {
        self.pair
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        (self.func)(text)
    }
}

pub mod mock;
pub mod ollama;

pub use mock::MockTranslator;
pub use ollama::OllamaTranslator;
