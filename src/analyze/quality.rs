//! # Quality Assessor
//!
//! Six independent estimators over the normalized text and the item's source
//! metadata, each in `[0.0, 1.0]`:
//!
//! - information density: vocabulary variety scaled by sentence length
//! - source credibility: baseline, raised for recognized outlets
//! - cultural accuracy: baseline plus bonus for cultural/identity terms
//! - accessibility: short sentences and few very long words
//! - engagement potential: questions, calls to action, community pronouns
//! - educational value: pedagogical and historical/contextual terms
//!
//! Cultural accuracy only ever adds: there is no penalty path for
//! inappropriate language. The safety assessor covers that ground.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

use super::{clamp01, count_hits, sentences, words};
use crate::content::{ContentItem, NormalizedText};
use crate::lexicon::{Lexicon, QualityTables};

pub const DENSITY_DIVISOR: f64 = 20.0;

pub const DEFAULT_SOURCE_CREDIBILITY: f64 = 0.7;
pub const RECOGNIZED_SOURCE_CREDIBILITY: f64 = 0.9;

pub const CULTURAL_ACCURACY_BASE: f64 = 0.7;
pub const CULTURAL_TERM_BONUS: f64 = 0.05;
pub const CULTURAL_BONUS_CAP: f64 = 0.3;

pub const ACCESSIBILITY_BASE: f64 = 0.7;
pub const SHORT_SENTENCE_BONUS: f64 = 0.2;
pub const SHORT_SENTENCE_MAX_CHARS: f64 = 100.0;
pub const PLAIN_WORDS_BONUS: f64 = 0.1;
pub const LONG_WORD_CHARS: usize = 12;
pub const LONG_WORD_MAX_RATIO: f64 = 0.1;

pub const ENGAGEMENT_BASE: f64 = 0.5;
pub const QUESTION_BONUS: f64 = 0.05;
pub const QUESTION_CAP: f64 = 0.1;
pub const CALL_TO_ACTION_BONUS: f64 = 0.05;
pub const CALL_TO_ACTION_CAP: f64 = 0.2;
pub const PRONOUN_BONUS: f64 = 0.05;
pub const PRONOUN_CAP: f64 = 0.2;

pub const EDUCATIONAL_BASE: f64 = 0.3;
pub const PEDAGOGICAL_BONUS: f64 = 0.1;
pub const PEDAGOGICAL_CAP: f64 = 0.4;
pub const HISTORICAL_BONUS: f64 = 0.1;
pub const HISTORICAL_CAP: f64 = 0.3;

/// Composite weights: density, credibility, cultural accuracy,
/// accessibility, engagement, educational value.
pub const COMPOSITE_WEIGHTS: [f64; 6] = [0.2, 0.2, 0.2, 0.15, 0.15, 0.1];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub information_density: f64,
    pub source_credibility: f64,
    pub cultural_accuracy: f64,
    pub accessibility: f64,
    pub engagement_potential: f64,
    pub educational_value: f64,
}

impl QualityMetrics {
    pub fn scores(&self) -> [f64; 6] {
        [
            self.information_density,
            self.source_credibility,
            self.cultural_accuracy,
            self.accessibility,
            self.engagement_potential,
            self.educational_value,
        ]
    }

    /// Fixed weighted sum of the six sub-scores.
    pub fn composite(&self) -> f64 {
        let raw = self
            .scores()
            .iter()
            .zip(COMPOSITE_WEIGHTS.iter())
            .map(|(s, w)| s * w)
            .sum::<f64>();
        clamp01(raw)
    }
}

fn capped(hits: usize, per_hit: f64, cap: f64) -> f64 {
    (hits as f64 * per_hit).min(cap)
}

pub fn information_density(text: &NormalizedText) -> f64 {
    let ws = words(text.lower());
    if ws.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = ws.iter().copied().collect();
    let sentence_count = sentences(text.as_str()).len().max(1);

    let variety = unique.len() as f64 / ws.len() as f64;
    let words_per_sentence = ws.len() as f64 / sentence_count as f64;
    clamp01(variety * words_per_sentence / DENSITY_DIVISOR)
}

/// Normalize a source name: lowercase, separators → spaces, collapse.
fn normalize_source(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for ch in ['—', '–', '-', '_', '/', '\\', '.', ',', '\'', '’'] {
        out = out.replace(ch, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Allow-list entries with a dot and no spaces are domains; the rest are names.
fn is_domain_entry(entry: &str) -> bool {
    entry.contains('.') && !entry.contains(char::is_whitespace)
}

/// Lowercased host of a URL without `www.`. Scheme-less input is read as https.
fn url_host(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = if raw.contains("://") {
        Url::parse(raw).ok()?
    } else {
        Url::parse(&format!("https://{raw}")).ok()?
    };
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    (!host.is_empty()).then_some(host)
}

/// `host` is `domain` itself or one of its subdomains.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|rest| rest.ends_with('.'))
}

fn is_recognized_host(host: &str, tables: &QualityTables) -> bool {
    tables
        .recognized_sources
        .iter()
        .filter(|e| is_domain_entry(e))
        .any(|domain| host_matches(host, domain))
}

/// Exact name match after normalization, or a domain-shaped source checked
/// like a URL host.
fn is_recognized_source(source: &str, tables: &QualityTables) -> bool {
    let name = normalize_source(source);
    if name.is_empty() {
        return false;
    }
    let by_name = tables
        .recognized_sources
        .iter()
        .filter(|e| !is_domain_entry(e))
        .any(|outlet| normalize_source(outlet) == name);
    by_name
        || (is_domain_entry(source.trim())
            && url_host(source).is_some_and(|h| is_recognized_host(&h, tables)))
}

pub fn source_credibility(item: &ContentItem, tables: &QualityTables) -> f64 {
    let by_source = item
        .source
        .as_deref()
        .is_some_and(|s| is_recognized_source(s, tables));
    let by_url = item
        .url
        .as_deref()
        .and_then(url_host)
        .is_some_and(|h| is_recognized_host(&h, tables));

    if by_source || by_url {
        RECOGNIZED_SOURCE_CREDIBILITY
    } else {
        DEFAULT_SOURCE_CREDIBILITY
    }
}

pub fn cultural_accuracy(lower: &str, tables: &QualityTables) -> f64 {
    let hits = count_hits(lower, &tables.cultural_terms);
    clamp01(CULTURAL_ACCURACY_BASE + capped(hits, CULTURAL_TERM_BONUS, CULTURAL_BONUS_CAP))
}

/// Empty text has no sentences and no long words, so both bonuses apply.
pub fn accessibility(text: &NormalizedText) -> f64 {
    let segs = sentences(text.as_str());
    let avg_sentence_chars = if segs.is_empty() {
        0.0
    } else {
        segs.iter().map(|s| s.chars().count()).sum::<usize>() as f64 / segs.len() as f64
    };

    let ws = words(text.lower());
    let long_ratio = if ws.is_empty() {
        0.0
    } else {
        ws.iter()
            .filter(|w| w.chars().count() > LONG_WORD_CHARS)
            .count() as f64
            / ws.len() as f64
    };

    let mut score = ACCESSIBILITY_BASE;
    if avg_sentence_chars < SHORT_SENTENCE_MAX_CHARS {
        score += SHORT_SENTENCE_BONUS;
    }
    if long_ratio < LONG_WORD_MAX_RATIO {
        score += PLAIN_WORDS_BONUS;
    }
    clamp01(score)
}

pub fn engagement_potential(text: &NormalizedText, tables: &QualityTables) -> f64 {
    let lower = text.lower();
    let questions = text.as_str().matches('?').count();
    let cta = count_hits(lower, &tables.calls_to_action);
    let pronouns = words(lower)
        .into_iter()
        .filter(|w| tables.community_pronouns.contains(*w))
        .count();

    clamp01(
        ENGAGEMENT_BASE
            + capped(questions, QUESTION_BONUS, QUESTION_CAP)
            + capped(cta, CALL_TO_ACTION_BONUS, CALL_TO_ACTION_CAP)
            + capped(pronouns, PRONOUN_BONUS, PRONOUN_CAP),
    )
}

pub fn educational_value(lower: &str, tables: &QualityTables) -> f64 {
    let pedagogical = count_hits(lower, &tables.pedagogical);
    let historical = count_hits(lower, &tables.historical);
    clamp01(
        EDUCATIONAL_BASE
            + capped(pedagogical, PEDAGOGICAL_BONUS, PEDAGOGICAL_CAP)
            + capped(historical, HISTORICAL_BONUS, HISTORICAL_CAP),
    )
}

pub fn assess_quality(text: &NormalizedText, item: &ContentItem, lexicon: &Lexicon) -> QualityMetrics {
    let q = &lexicon.quality;
    QualityMetrics {
        information_density: information_density(text),
        source_credibility: source_credibility(item, q),
        cultural_accuracy: cultural_accuracy(text.lower(), q),
        accessibility: accessibility(text),
        engagement_potential: engagement_potential(text, q),
        educational_value: educational_value(text.lower(), q),
    }
}
