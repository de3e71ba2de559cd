//! Canonical gender categories and the per-brand token vocabulary.
//!
//! Each retail catalog carries its own gender wording ("Herr", "Dam",
//! "Women", "Kids", ...). Resolution maps those tokens onto the canonical
//! set once, up front, so the rest of the pipeline never compares raw
//! strings. Built-in defaults cover the Swedish and English vocabulary of
//! the supported catalogs; a YAML file can add brand-specific tokens on top.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_text;
use crate::ConfigError;

/// Canonical gender category used for subcategory selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Children,
    Unisex,
}

impl Gender {
    /// Parses a canonical gender name (`"men"`, `"women"`, `"children"`,
    /// `"unisex"`). Case-insensitive. This is for configuration values;
    /// catalog tokens go through [`GenderVocabulary::resolve_token`].
    #[must_use]
    pub fn from_canonical(s: &str) -> Option<Self> {
        match normalize_text(s).as_str() {
            "men" => Some(Gender::Men),
            "women" => Some(Gender::Women),
            "children" => Some(Gender::Children),
            "unisex" => Some(Gender::Unisex),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "men"),
            Gender::Women => write!(f, "women"),
            Gender::Children => write!(f, "children"),
            Gender::Unisex => write!(f, "unisex"),
        }
    }
}

/// Built-in token vocabulary shared by all brands. Swedish terms come from
/// the kappahl/lindex/nudie catalogs, English ones from ginatricot/eton.
const DEFAULT_TOKENS: &[(&str, Gender)] = &[
    ("herr", Gender::Men),
    ("man", Gender::Men),
    ("men", Gender::Men),
    ("male", Gender::Men),
    ("dam", Gender::Women),
    ("kvinna", Gender::Women),
    ("women", Gender::Women),
    ("woman", Gender::Women),
    ("ladies", Gender::Women),
    ("female", Gender::Women),
    ("barn", Gender::Children),
    ("baby", Gender::Children),
    ("kids", Gender::Children),
    ("children", Gender::Children),
    ("child", Gender::Children),
    ("junior", Gender::Children),
    ("unisex", Gender::Unisex),
];

/// One brand's extra tokens in the vocabulary file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVocab {
    pub brand: String,
    pub tokens: HashMap<String, Gender>,
}

/// Top-level shape of the gender vocabulary YAML file.
#[derive(Debug, Deserialize)]
pub struct GenderVocabFile {
    pub brands: Vec<BrandVocab>,
}

/// Token → canonical-gender lookup, defaults plus per-brand overlays.
#[derive(Debug, Clone)]
pub struct GenderVocabulary {
    defaults: HashMap<String, Gender>,
    per_brand: HashMap<String, HashMap<String, Gender>>,
}

impl GenderVocabulary {
    /// Vocabulary with only the built-in defaults.
    #[must_use]
    pub fn builtin() -> Self {
        let defaults = DEFAULT_TOKENS
            .iter()
            .map(|&(token, gender)| (token.to_string(), gender))
            .collect();
        Self {
            defaults,
            per_brand: HashMap::new(),
        }
    }

    /// Built-in defaults plus the tokens from a loaded vocabulary file.
    #[must_use]
    pub fn with_overlay(file: &GenderVocabFile) -> Self {
        let mut vocab = Self::builtin();
        for entry in &file.brands {
            let brand_key = normalize_text(&entry.brand);
            let tokens = vocab.per_brand.entry(brand_key).or_default();
            for (token, gender) in &entry.tokens {
                tokens.insert(normalize_text(token), *gender);
            }
        }
        vocab
    }

    /// Maps a raw gender token to its canonical gender. Brand-specific
    /// tokens win over the defaults; unknown tokens yield `None`.
    #[must_use]
    pub fn resolve_token(&self, brand: &str, token: &str) -> Option<Gender> {
        let key = normalize_text(token);
        if key.is_empty() {
            return None;
        }
        if let Some(tokens) = self.per_brand.get(&normalize_text(brand)) {
            if let Some(gender) = tokens.get(&key) {
                return Some(*gender);
            }
        }
        self.defaults.get(&key).copied()
    }

    /// Whether a breadcrumb segment is a gender token rather than a
    /// clothing-type term (such segments are skipped during lookup).
    #[must_use]
    pub fn is_gender_segment(&self, brand: &str, segment: &str) -> bool {
        self.resolve_token(brand, segment).is_some()
    }
}

/// Load and validate a gender vocabulary overlay from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_gender_vocab(path: &Path) -> Result<GenderVocabFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: GenderVocabFile =
        serde_yaml::from_str(&content).map_err(ConfigError::VocabFileParse)?;

    validate_vocab(&file)?;

    Ok(file)
}

fn validate_vocab(file: &GenderVocabFile) -> Result<(), ConfigError> {
    let mut seen_brands = HashSet::new();

    for entry in &file.brands {
        let brand_key = normalize_text(&entry.brand);
        if brand_key.is_empty() {
            return Err(ConfigError::Validation(
                "vocabulary brand must be non-empty".to_string(),
            ));
        }

        if !seen_brands.insert(brand_key) {
            return Err(ConfigError::Validation(format!(
                "duplicate vocabulary entry for brand '{}'",
                entry.brand
            )));
        }

        if entry.tokens.is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has no tokens",
                entry.brand
            )));
        }

        for token in entry.tokens.keys() {
            if normalize_text(token).is_empty() {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' has an empty token",
                    entry.brand
                )));
            }
        }
    }

    Ok(())
}
