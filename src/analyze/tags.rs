//! Topic and demographic tag generation.
//!
//! Topic tags are derived from the text, in order: the most frequent longer
//! words, capitalized tokens (naive named entities), thematic terms and the
//! liberation-tag dictionary. The submitter's own tags only fill slots left
//! over after that, and are ignored when the item has no text. Duplicates are
//! dropped and the list is cut at [`MAX_TOPIC_TAGS`].
//!
//! Demographic tags are informational only.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::{contains_keyword, words};
use crate::content::{ContentItem, NormalizedText};
use crate::lexicon::Lexicon;

pub const MAX_TOPIC_TAGS: usize = 12;
pub const MAX_FREQUENT_WORDS: usize = 10;
/// Frequent-word candidates must be longer than this.
pub const MIN_FREQUENT_WORD_CHARS: usize = 3;
pub const MAX_NAMED_ENTITIES: usize = 3;
pub const MAX_THEMATIC_TAGS: usize = 4;

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("slug regex"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?]["')\]]*$"#).expect("sentence-end regex"));

/// Lowercase, collapse every run of non-alphanumerics into a single `-`.
pub fn slugify(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    NON_SLUG
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Up to `limit` words longer than three chars, most frequent first;
/// ties keep first-occurrence order.
pub fn frequent_words(lower: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, w) in words(lower).into_iter().enumerate() {
        if w.chars().count() <= MIN_FREQUENT_WORD_CHARS {
            continue;
        }
        counts.entry(w).or_insert((0, pos)).0 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> =
        counts.into_iter().map(|(w, (n, first))| (w, n, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(w, _, _)| slugify(w))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Capitalized tokens that do not open a sentence.
pub fn named_entities(text: &str, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut sentence_start = true;
    for raw in text.split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let capitalized = token.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_start && token.chars().count() > 2 {
            let slug = slugify(token);
            if !slug.is_empty() && !out.contains(&slug) {
                out.push(slug);
                if out.len() >= limit {
                    break;
                }
            }
        }
        sentence_start = SENTENCE_END.is_match(raw);
    }
    out
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}

pub fn generate_tags(text: &NormalizedText, item: &ContentItem, lexicon: &Lexicon) -> Vec<String> {
    let lower = text.lower();
    let t = &lexicon.tags;
    let mut tags: Vec<String> = Vec::new();

    for w in frequent_words(lower, MAX_FREQUENT_WORDS) {
        push_unique(&mut tags, w);
    }
    for e in named_entities(text.as_str(), MAX_NAMED_ENTITIES) {
        push_unique(&mut tags, e);
    }
    for term in t
        .thematic
        .iter()
        .filter(|term| contains_keyword(lower, term))
        .take(MAX_THEMATIC_TAGS)
    {
        push_unique(&mut tags, slugify(term));
    }
    for (tag, triggers) in &t.liberation {
        if triggers.iter().any(|k| contains_keyword(lower, k)) {
            push_unique(&mut tags, tag.clone());
        }
    }
    if !text.is_empty() {
        for existing in &item.tags {
            if tags.len() >= MAX_TOPIC_TAGS {
                break;
            }
            push_unique(&mut tags, slugify(existing));
        }
    }

    tags.truncate(MAX_TOPIC_TAGS);
    tags
}

pub fn demographic_tags(text: &NormalizedText, lexicon: &Lexicon) -> Vec<String> {
    let lower = text.lower();
    lexicon
        .tags
        .demographic
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|k| contains_keyword(lower, k)))
        .map(|(tag, _)| tag.clone())
        .collect()
}
