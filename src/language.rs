use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages of the translation chain
///
/// The chain is fixed: Turkish source documents are translated to English,
/// and the English result is translated to German. Codes are resolved
/// through ISO 639 so that `tr`, `tur`, `turkish` and `Türkçe` all name
/// the same language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Turkish,
    English,
    German,
}

impl Language {
    /// All supported languages, in chain order
    pub const ALL: [Language; 3] = [Language::Turkish, Language::English, Language::German];

    // @returns: Lowercase identifier used in dictionary keys
    pub fn key(&self) -> &'static str {
        match self {
            Self::Turkish => "turkish",
            Self::English => "english",
            Self::German => "german",
        }
    }

    fn iso(&self) -> isolang::Language {
        match self {
            Self::Turkish => isolang::Language::Tur,
            Self::English => isolang::Language::Eng,
            Self::German => isolang::Language::Deu,
        }
    }

    // @returns: ISO 639-1 code
    pub fn iso_639_1(&self) -> &'static str {
        self.iso().to_639_1().unwrap_or_else(|| self.iso().to_639_3())
    }

    // @returns: English language name
    pub fn display_name(&self) -> &'static str {
        self.iso().to_name()
    }

    /// Resolve an ISO 639-1/639-2 code or a language name
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized = code.trim().to_lowercase();

        let iso = match normalized.len() {
            2 => isolang::Language::from_639_1(&normalized),
            // German is the only member of the chain with a distinct 639-2/B code
            3 if normalized == "ger" => Some(isolang::Language::Deu),
            3 => isolang::Language::from_639_3(&normalized),
            _ => None,
        };

        if let Some(iso) = iso {
            return Self::ALL
                .into_iter()
                .find(|lang| lang.iso() == iso)
                .ok_or_else(|| anyhow!("Language not part of the translation chain: {}", code));
        }

        Self::ALL
            .into_iter()
            .find(|lang| {
                lang.key() == normalized
                    || lang.iso().to_autonym().is_some_and(|n| n.to_lowercase() == normalized)
            })
            .ok_or_else(|| anyhow!("Invalid language code: {}", code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// A directed source → target language pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    /// First stage of the chain
    pub const TURKISH_TO_ENGLISH: LanguagePair = LanguagePair {
        source: Language::Turkish,
        target: Language::English,
    };

    /// Second stage of the chain
    pub const ENGLISH_TO_GERMAN: LanguagePair = LanguagePair {
        source: Language::English,
        target: Language::German,
    };

    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }

    /// Dictionary section for this pair, `None` for unsupported directions
    pub fn dictionary_key(&self) -> Option<&'static str> {
        match (self.source, self.target) {
            (Language::Turkish, Language::English) => Some("turkish_to_english"),
            (Language::English, Language::German) => Some("english_to_german"),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.dictionary_key().is_some()
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.display_name(), self.target.display_name())
    }
}
