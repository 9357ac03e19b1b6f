use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::snippet::DEFAULT_CONTEXT_LENGTH;

/// How query and text are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub case_insensitive: bool,
    /// Ignore accents and other combining marks ("é" matches "e").
    pub diacritic_insensitive: bool,
}

impl CompareOptions {
    /// Exact comparison, modulo canonical equivalence.
    pub const LITERAL: Self = Self {
        case_insensitive: false,
        diacritic_insensitive: false,
    };

    pub const CASE_INSENSITIVE: Self = Self {
        case_insensitive: true,
        diacritic_insensitive: false,
    };
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::CASE_INSENSITIVE
    }
}

/// A BCP 47 language tag, e.g. `tr-TR`.
///
/// Only the primary language subtag influences comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Lowercased primary language subtag (`"tr"` for `"tr-TR"` or `"tr_TR"`).
    pub fn language(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Turkish and Azerbaijani map dotted and dotless I differently.
    fn has_turkic_casing(&self) -> bool {
        matches!(self.language().as_str(), "tr" | "az")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Everything that shapes a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub compare: CompareOptions,
    /// Tailors case folding. `None` uses locale-independent folding.
    pub locale: Option<Locale>,
    /// Graphemes of context on each side of a match in snippets.
    pub context_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            compare: CompareOptions::default(),
            locale: None,
            context_length: DEFAULT_CONTEXT_LENGTH,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_compare(mut self, compare: CompareOptions) -> Self {
        self.compare = compare;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_context_length(mut self, context_length: usize) -> Self {
        self.context_length = context_length;
        self
    }
}

/// Folds graphemes into comparison keys according to [`SearchOptions`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Folder {
    case_insensitive: bool,
    diacritic_insensitive: bool,
    turkic: bool,
}

impl Folder {
    pub(crate) fn new(options: &SearchOptions) -> Self {
        Self {
            case_insensitive: options.compare.case_insensitive,
            diacritic_insensitive: options.compare.diacritic_insensitive,
            turkic: options
                .locale
                .as_ref()
                .is_some_and(Locale::has_turkic_casing),
        }
    }

    /// Comparison key for one grapheme cluster.
    pub(crate) fn fold(&self, grapheme: &str) -> String {
        let mut key: String = grapheme.nfc().collect();
        if self.case_insensitive {
            key = case_fold(&key, self.turkic);
        }
        if self.diacritic_insensitive {
            key = key.nfd().filter(|c| !is_combining_mark(*c)).collect();
        }
        key
    }
}

/// Unicode case folding within one cluster. Lowercasing alone leaves the
/// variant forms below distinct from their ordinary lowercase letters.
fn case_fold(text: &str, turkic: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' if turkic => out.push('ı'),
            'İ' if turkic => out.push('i'),
            other => out.extend(other.to_lowercase().map(fold_variant)),
        }
    }
    out
}

fn fold_variant(c: char) -> char {
    match c {
        'ς' => 'σ',
        'ſ' => 's',
        'µ' => 'μ',
        'ϐ' => 'β',
        'ϑ' => 'θ',
        'ϕ' => 'φ',
        'ϖ' => 'π',
        'ϰ' => 'κ',
        'ϱ' => 'ρ',
        'ϵ' => 'ε',
        'ẛ' => 'ṡ',
        '\u{1fbe}' => 'ι',
        other => other,
    }
}
