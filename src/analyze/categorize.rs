//! Categorizer: keyword coverage per category, top score wins.

use serde::{Deserialize, Serialize};

use super::distinct_hits;
use crate::content::NormalizedText;
use crate::lexicon::Lexicon;

/// Primary category when no category keyword matches.
pub const GENERAL_CATEGORY: &str = "General";
/// Secondary categories must score strictly above this.
pub const SECONDARY_MIN_SCORE: f64 = 0.3;
/// Ranks 2..=4 are eligible for secondary.
pub const MAX_SECONDARY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub primary: String,
    pub secondary: Vec<String>,
    /// `(category, matches / keyword_count)` in lexicon order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<(String, f64)>,
}

impl Default for CategoryAssignment {
    fn default() -> Self {
        Self {
            primary: GENERAL_CATEGORY.to_string(),
            secondary: Vec::new(),
            scores: Vec::new(),
        }
    }
}

pub fn categorize(text: &NormalizedText, lexicon: &Lexicon) -> CategoryAssignment {
    let lower = text.lower();
    let scores: Vec<(String, f64)> = lexicon
        .categories
        .iter()
        .map(|c| {
            let matches = distinct_hits(lower, &c.keywords);
            let score = if c.keywords.is_empty() {
                0.0
            } else {
                matches as f64 / c.keywords.len() as f64
            };
            (c.name.clone(), score)
        })
        .collect();

    // Stable sort keeps lexicon order among ties.
    let mut ranked: Vec<&(String, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let Some(top) = ranked.first().filter(|(_, s)| *s > 0.0) else {
        return CategoryAssignment {
            scores,
            ..Default::default()
        };
    };

    let secondary = ranked
        .iter()
        .skip(1)
        .take(MAX_SECONDARY)
        .filter(|(_, s)| *s > SECONDARY_MIN_SCORE)
        .map(|(name, _)| name.clone())
        .collect();

    CategoryAssignment {
        primary: top.0.clone(),
        secondary,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> CategoryAssignment {
        categorize(&NormalizedText::from_text(text), &Lexicon::embedded())
    }

    #[test]
    fn no_matches_falls_back_to_general() {
        let c = run("");
        assert_eq!(c.primary, GENERAL_CATEGORY);
        assert!(c.secondary.is_empty());
        assert_eq!(c.scores.len(), 8);
    }

    #[test]
    fn picks_highest_coverage() {
        let c = run("Climate and water pollution on our land, a green energy garden.");
        assert_eq!(c.primary, "Environment");
    }

    #[test]
    fn secondary_needs_score_above_threshold() {
        // Community Organizing: community, organiz, mutual aid, solidarity, neighbor (0.5)
        // Economic Justice: wage, worker, housing, rent (0.4)
        // Education: school only (0.1)
        let c = run(
            "Community organizing for mutual aid and solidarity with every neighbor: \
             wage theft, worker housing and rent strikes. School is out.",
        );
        assert_eq!(c.primary, "Community Organizing");
        assert_eq!(c.secondary, vec!["Economic Justice".to_string()]);
    }

    #[test]
    fn ties_resolve_to_earlier_category() {
        // one hit in Arts & Culture ("music") and one in Technology ("software")
        let c = run("music software");
        assert_eq!(c.primary, "Arts & Culture");
    }

    #[test]
    fn short_keywords_do_not_match_inside_words() {
        // "app", "rent" and "art" sit inside happy, parents and start
        let c = run("Happy parents start");
        assert_eq!(c.primary, GENERAL_CATEGORY);
        assert!(c.scores.iter().all(|(_, s)| *s == 0.0), "{:?}", c.scores);
    }
}
