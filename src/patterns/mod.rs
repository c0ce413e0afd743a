//! Pattern Library
//!
//! Compiled knowledge bases consulted by the classifier: the brand
//! alternation, the ordered category registry, and the numeric/specification
//! regexes. Everything is compiled once at construction from a
//! [`RegistryConfig`] and never mutated afterwards, so a single library can
//! be shared across any number of classification calls.
//!
//! Matching rules that matter for correctness:
//! - Brands are sorted by descending length before compilation so a
//!   multi-word brand ("MITSUBISHI ELECTRIC") is preferred over a shorter
//!   brand that is a substring of it ("MITSUBISHI").
//! - Every brand and category keyword match is word-boundary anchored —
//!   "ITT" must not match inside "FITTING".
//! - Category scan order is registry declaration order, first hit wins.

use crate::config::RegistryConfig;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Part-number marker tokens followed by an alphanumeric/hyphen/dot token.
const PART_NUMBER_MARKER: &str = r"(?:P/N|NO\.|REF|CODE|PART NO)[\s:.]*([A-Z0-9.-]+)";

/// Dimension pairs and triples: `10x20`, `10 X 20 X 5`, `1,5*2.5`.
const DIMENSION: &str =
    r"\b\d+(?:[.,]\d+)?\s*[xX*]\s*\d+(?:[.,]\d+)?(?:\s*[xX*]\s*\d+(?:[.,]\d+)?)?\b";

/// Rating and standard codes: fixed literals plus parametrized forms.
const RATING: &str = r"\b(?:10K|5K|16K|20K|30K|SCH\s*\d+|PN\s*\d+|JIS|ANSI|DIN|DN\d+)\b";

/// Errors raised while compiling registry overrides into patterns.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern compiled from registry: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Compiled, immutable pattern registries.
pub struct PatternLibrary {
    /// Single alternation over all brands, longest-first; `None` when the
    /// registry has no brands
    brand_pattern: Option<Regex>,
    /// (label, keyword alternation) in registry declaration order
    categories: Vec<(String, Regex)>,
    part_number_marker: Regex,
    dimension: Regex,
    /// Number immediately followed by a unit from the vocabulary; `None`
    /// when the vocabulary is empty
    unit: Option<Regex>,
    rating: Regex,
    blacklist: HashSet<String>,
}

impl PatternLibrary {
    /// Compile the library from registry content.
    pub fn new(registry: &RegistryConfig) -> Result<Self, PatternError> {
        let brand_pattern = if registry.brands.is_empty() {
            None
        } else {
            // Longest first, then dedup — duplicates in the registry are
            // harmless data-entry noise.
            let mut brands: Vec<&str> = registry.brands.iter().map(String::as_str).collect();
            brands.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            brands.dedup();
            let alternation = brands
                .iter()
                .map(|b| regex::escape(b))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b"))?)
        };

        let mut categories = Vec::with_capacity(registry.categories.len());
        for entry in &registry.categories {
            if entry.keywords.is_empty() {
                continue;
            }
            let alternation = entry
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"\b(?:{alternation})\b"))?;
            categories.push((entry.label.clone(), pattern));
        }

        let unit = if registry.units.is_empty() {
            None
        } else {
            let alternation = registry
                .units
                .iter()
                .map(|u| regex::escape(u))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(
                r#"\b\d+(?:[.,]\d+)?\s*(?:{alternation})"#
            ))?)
        };

        Ok(Self {
            brand_pattern,
            categories,
            part_number_marker: Regex::new(PART_NUMBER_MARKER)?,
            dimension: Regex::new(DIMENSION)?,
            unit,
            rating: Regex::new(RATING)?,
            blacklist: registry
                .part_number_blacklist
                .iter()
                .map(|s| s.to_uppercase())
                .collect(),
        })
    }

    /// Find the best brand match in an upper-cased description: the longest
    /// match anywhere in the string, ties broken by first occurrence.
    pub fn find_brand<'t>(&self, text: &'t str) -> Option<&'t str> {
        let pattern = self.brand_pattern.as_ref()?;
        let mut best: Option<&'t str> = None;
        for m in pattern.find_iter(text) {
            if best.map_or(true, |b| m.as_str().len() > b.len()) {
                best = Some(m.as_str());
            }
        }
        best
    }

    /// First category (in registry order) with any keyword hit.
    pub fn match_category(&self, text: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(label, _)| label.as_str())
    }

    /// Extract a part number: explicit marker pattern first, then the
    /// first-token heuristic (must contain a digit, be longer than 2
    /// characters, and not be a blacklisted rating-like token).
    pub fn extract_part_number(&self, text: &str) -> Option<String> {
        if let Some(caps) = self.part_number_marker.captures(text) {
            if let Some(group) = caps.get(1) {
                return Some(group.as_str().trim_end_matches('.').to_string());
            }
        }

        let cleaned = text.replace(',', " ");
        let first = cleaned.split_whitespace().next()?;
        let looks_like_pn = first.chars().any(|c| c.is_ascii_digit())
            && first.chars().count() > 2
            && !self.blacklist.contains(first);
        looks_like_pn.then(|| first.to_string())
    }

    /// Collect all specification tokens (dimensions, unit quantities,
    /// rating codes) from the full upper-cased string: deduplicated keeping
    /// first occurrence, then stably sorted longest first.
    pub fn collect_specs(&self, text: &str) -> Vec<String> {
        let mut specs: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut push = |token: &str| {
            if seen.insert(token.to_string()) {
                specs.push(token.to_string());
            }
        };

        for m in self.dimension.find_iter(text) {
            push(m.as_str());
        }
        if let Some(unit) = &self.unit {
            for m in unit.find_iter(text) {
                push(m.as_str());
            }
        }
        for m in self.rating.find_iter(text) {
            push(m.as_str());
        }

        specs.sort_by(|a, b| b.len().cmp(&a.len()));
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PatternLibrary {
        PatternLibrary::new(&RegistryConfig::default()).expect("default registry compiles")
    }

    #[test]
    fn test_multiword_brand_beats_substring_brand() {
        let lib = library();
        assert_eq!(
            lib.find_brand("CONTACTOR MITSUBISHI ELECTRIC S-N20"),
            Some("MITSUBISHI ELECTRIC")
        );
    }

    #[test]
    fn test_brand_requires_word_boundary() {
        let lib = library();
        // ITT is a registered brand but must not match inside FITTING
        assert_eq!(lib.find_brand("PIPE FITTING 2 INCH"), None);
    }

    #[test]
    fn test_longest_brand_wins_across_positions() {
        let lib = library();
        // CAT (3) appears before CATERPILLAR would — two distinct brands,
        // longest anywhere in the string wins
        assert_eq!(
            lib.find_brand("FILTER OLI CAT FOR KOMATSU"),
            Some("KOMATSU")
        );
    }

    #[test]
    fn test_category_first_wins_order() {
        let lib = library();
        // BALL hits VALVE, BEARING hits BEARING; BEARING is declared first
        assert_eq!(lib.match_category("BALL BEARING 6204"), Some("BEARING"));
        // keyword inside a longer word must not hit (METAL vs METALIC)
        assert_eq!(lib.match_category("METALIC SPIRAL"), None);
    }

    #[test]
    fn test_part_number_marker_beats_first_token() {
        let lib = library();
        assert_eq!(
            lib.extract_part_number("VALVE GATE P/N: AB-123"),
            Some("AB-123".to_string())
        );
        // trailing dot stripped from the captured group
        assert_eq!(
            lib.extract_part_number("ELEMENT NO. 600-311-8293."),
            Some("600-311-8293".to_string())
        );
    }

    #[test]
    fn test_first_token_heuristic_constraints() {
        let lib = library();
        // first token with a digit, length > 2, not blacklisted
        assert_eq!(
            lib.extract_part_number("C6204 BEARING NTN"),
            Some("C6204".to_string())
        );
        // blacklisted rating token refused
        assert_eq!(lib.extract_part_number("10K FLANGE JIS"), None);
        // no digit → refused
        assert_eq!(lib.extract_part_number("GASKET SPIRAL"), None);
        // too short → refused
        assert_eq!(lib.extract_part_number("V2 BELT"), None);
    }

    #[test]
    fn test_spec_collection_dedup_and_order() {
        let lib = library();
        let specs = lib.collect_specs("HOSE 25MM 10 X 20 X 5 SCH 40 25MM");
        assert_eq!(specs[0], "10 X 20 X 5");
        assert!(specs.contains(&"25MM".to_string()));
        assert!(specs.contains(&"SCH 40".to_string()));
        // the duplicate 25MM collapsed
        assert_eq!(specs.iter().filter(|s| s.as_str() == "25MM").count(), 1);
        // longest first
        assert!(specs.windows(2).all(|w| w[0].len() >= w[1].len()));
    }

    #[test]
    fn test_unit_requires_leading_boundary() {
        let lib = library();
        // A20 must not yield "20" + unit-less match; 2 INCH must be caught
        let specs = lib.collect_specs("VALVE GATE 2 INCH TYPE A20");
        assert!(specs.contains(&"2 INCH".to_string()));
    }

    #[test]
    fn test_dimension_decimal_separators() {
        let lib = library();
        let specs = lib.collect_specs("SEAL 1,5 X 2.5");
        assert_eq!(specs[0], "1,5 X 2.5");
    }
}
