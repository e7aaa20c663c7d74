/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::echo()` - Returns the input unchanged
 * - `MockTranslator::tagged()` - Returns `[EN] input` style output
 * - `MockTranslator::table(..)` - Looks inputs up in a fixed table
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::empty()` - Always returns an empty string
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::language::LanguagePair;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the input unchanged
    Echo,
    /// Prefixes the input with the target language code
    Tagged,
    /// Looks the input up in a table, echoing unknown inputs
    Table(HashMap<String, String>),
    /// Fails on the Nth request (1-based) and succeeds otherwise, echoing
    FailOn { request: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock translator for tests
#[derive(Debug, Clone)]
pub struct MockTranslator {
    pair: LanguagePair,
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every input received, in order
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(pair: LanguagePair, behavior: MockBehavior) -> Self {
        Self {
            pair,
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo(pair: LanguagePair) -> Self {
        Self::new(pair, MockBehavior::Echo)
    }

    pub fn tagged(pair: LanguagePair) -> Self {
        Self::new(pair, MockBehavior::Tagged)
    }

    pub fn table(pair: LanguagePair, entries: &[(&str, &str)]) -> Self {
        let table = entries
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self::new(pair, MockBehavior::Table(table))
    }

    pub fn fail_on(pair: LanguagePair, request: usize) -> Self {
        Self::new(pair, MockBehavior::FailOn { request })
    }

    pub fn failing(pair: LanguagePair) -> Self {
        Self::new(pair, MockBehavior::Failing)
    }

    pub fn empty(pair: LanguagePair) -> Self {
        Self::new(pair, MockBehavior::Empty)
    }

    /// Number of translate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Inputs received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn pair(&self) -> LanguagePair {
        self.pair
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(text.to_string());
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Tagged => Ok(format!(
                "[{}] {}",
                self.pair.target.iso_639_1().to_uppercase(),
                text
            )),
            MockBehavior::Table(table) => Ok(table.get(text).cloned().unwrap_or_else(|| text.to_string())),
            MockBehavior::FailOn { request } if *request == count => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated failure (request #{})", count),
            }),
            MockBehavior::FailOn { .. } => Ok(text.to_string()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Empty => Ok(String::new()),
        }
    }
}
