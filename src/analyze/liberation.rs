//! Liberation-alignment scorer.
//!
//! Per factor: sum the weights of the keywords present in the text (each
//! keyword counts once), divide by [`LIBERATION_DIVISOR`], clamp to [0,1].
//! A factor with zero hits is multiplied by [`NO_MATCH_PENALTY`], so it
//! scores 0.
//! `overall_score` is the fixed-weight blend of the eight factors.

use serde::{Deserialize, Serialize};

use super::{clamp01, occurrences};
use crate::content::NormalizedText;
use crate::lexicon::{FactorWeightTable, Lexicon};

pub const LIBERATION_DIVISOR: f64 = 10.0;
pub const NO_MATCH_PENALTY: f64 = 0.1;

/// Factor weights in canonical order. Sovereignty, empowerment,
/// anti-oppression and authenticity carry 0.15 each; the civic, economic,
/// healing and joy dimensions 0.10 each. Must sum to 1.0.
pub const FACTOR_WEIGHTS: [(&str, f64); 8] = [
    ("creator_sovereignty", 0.15),
    ("community_empowerment", 0.15),
    ("anti_oppression", 0.15),
    ("cultural_authenticity", 0.15),
    ("democratic_participation", 0.10),
    ("economic_justice", 0.10),
    ("healing_centeredness", 0.10),
    ("joy_celebration", 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiberationAlignmentFactors {
    pub creator_sovereignty: f64,
    pub community_empowerment: f64,
    pub anti_oppression: f64,
    pub cultural_authenticity: f64,
    pub democratic_participation: f64,
    pub economic_justice: f64,
    pub healing_centeredness: f64,
    pub joy_celebration: f64,
    pub overall_score: f64,
}

impl LiberationAlignmentFactors {
    /// Factor scores in canonical order (excludes `overall_score`).
    pub fn factors(&self) -> [f64; 8] {
        [
            self.creator_sovereignty,
            self.community_empowerment,
            self.anti_oppression,
            self.cultural_authenticity,
            self.democratic_participation,
            self.economic_justice,
            self.healing_centeredness,
            self.joy_celebration,
        ]
    }

    fn from_factors(f: [f64; 8]) -> Self {
        let overall = f
            .iter()
            .zip(FACTOR_WEIGHTS.iter())
            .map(|(score, (_, w))| score * w)
            .sum::<f64>();
        Self {
            creator_sovereignty: f[0],
            community_empowerment: f[1],
            anti_oppression: f[2],
            cultural_authenticity: f[3],
            democratic_participation: f[4],
            economic_justice: f[5],
            healing_centeredness: f[6],
            joy_celebration: f[7],
            overall_score: clamp01(overall),
        }
    }
}

/// Score one factor table against lowercased text.
pub fn factor_score(lower: &str, table: &FactorWeightTable) -> f64 {
    let mut total = 0.0;
    let mut hits = 0usize;
    for (keyword, weight) in table {
        if occurrences(lower, keyword) > 0 {
            total += weight;
            hits += 1;
        }
    }
    let penalty = if hits == 0 { NO_MATCH_PENALTY } else { 1.0 };
    clamp01(total / LIBERATION_DIVISOR) * penalty
}

pub fn score_liberation(text: &NormalizedText, lexicon: &Lexicon) -> LiberationAlignmentFactors {
    let lower = text.lower();
    let mut scores = [0.0; 8];
    for (slot, (_, table)) in scores.iter_mut().zip(lexicon.liberation.iter()) {
        *slot = factor_score(lower, table);
    }
    LiberationAlignmentFactors::from_factors(scores)
}
