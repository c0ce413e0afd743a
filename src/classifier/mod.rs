//! Free-Text Item Classifier
//!
//! Parses one unstructured equipment-description string into structured
//! fields: brand, category, part number, specification and a reconstructed
//! canonical name. Layered heuristics, applied in a fixed order on the
//! upper-cased input:
//!
//! 1. Brand: longest word-boundary match from the brand registry
//! 2. Category: first registry entry with any keyword hit, else the
//!    uncategorized fallback
//! 3. Part number: explicit marker pattern, else first-token heuristic
//! 4. Specification: every dimension/unit/rating token in the original
//!    string, deduplicated, longest first
//! 5. Canonical name: original minus brand and part number, punctuation
//!    stripped, reassembled as `<category> <descriptive> <spec> <brand>
//!    (P/N: <part number>)`
//!
//! Classification is a pure function: no shared mutable state, identical
//! output for identical input, and no input ever raises — absent or empty
//! text yields an all-empty uncategorized record.

use crate::config::{Config, RegistryConfig};
use crate::patterns::{PatternError, PatternLibrary};
use crate::types::{ClassifiedItem, UNCATEGORIZED};
use regex::Regex;

/// Classifier over an immutable, injected pattern library.
pub struct Classifier {
    patterns: PatternLibrary,
    punctuation: Regex,
    whitespace: Regex,
}

impl Classifier {
    /// Build a classifier from registry content.
    pub fn new(registry: &RegistryConfig) -> Result<Self, PatternError> {
        Ok(Self {
            patterns: PatternLibrary::new(registry)?,
            punctuation: Regex::new(r"[^\w\s]")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Build from a full [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, PatternError> {
        Self::new(&config.registry)
    }

    /// Classify an optional description. `None` behaves exactly like an
    /// empty string: an all-empty uncategorized record, never an error.
    pub fn classify_opt(&self, description: Option<&str>) -> ClassifiedItem {
        match description {
            Some(text) => self.classify(text),
            None => ClassifiedItem::uncategorized(),
        }
    }

    /// Classify one free-text description.
    pub fn classify(&self, description: &str) -> ClassifiedItem {
        if description.trim().is_empty() {
            return ClassifiedItem::uncategorized();
        }

        let upper = description.to_uppercase();

        let brand = self
            .patterns
            .find_brand(&upper)
            .map(str::to_string)
            .unwrap_or_default();

        let category = self
            .patterns
            .match_category(&upper)
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        let part_number = self
            .patterns
            .extract_part_number(&upper)
            .unwrap_or_default();

        let specification = self.patterns.collect_specs(&upper).join(", ");

        let canonical_name =
            self.build_canonical_name(&upper, &category, &brand, &part_number, &specification);

        ClassifiedItem {
            category,
            brand,
            part_number,
            specification,
            canonical_name,
        }
    }

    /// Assemble the tidy display name from the detected pieces. The brand
    /// is removed word-boundary-safe, the part number by literal substring
    /// (all occurrences); marker words like `P/N` stay and lose their
    /// punctuation with everything else.
    fn build_canonical_name(
        &self,
        upper: &str,
        category: &str,
        brand: &str,
        part_number: &str,
        specification: &str,
    ) -> String {
        let mut remainder = upper.to_string();
        if !brand.is_empty() {
            // Escaped literal — the pattern cannot fail to compile, but a
            // classify call must never panic, so a failure just skips the
            // removal.
            if let Ok(re) = Regex::new(&format!(r"\b{}\b", regex::escape(brand))) {
                remainder = re.replace_all(&remainder, "").into_owned();
            }
        }
        if !part_number.is_empty() {
            remainder = remainder.replace(part_number, "");
        }

        let descriptive = self.punctuation.replace_all(&remainder, " ");
        let descriptive = self.whitespace.replace_all(&descriptive, " ");
        let descriptive = descriptive.trim();

        let mut parts: Vec<String> = vec![category.to_string()];
        if !descriptive.is_empty() {
            parts.push(descriptive.to_string());
        }
        if !specification.is_empty() {
            parts.push(specification.to_string());
        }
        if !brand.is_empty() {
            parts.push(brand.to_string());
        }
        if !part_number.is_empty() {
            parts.push(format!("(P/N: {part_number})"));
        }
        parts.join(" ")
    }
}
