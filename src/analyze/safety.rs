//! Safety assessor: six positive-vs-negative indicator predicates plus
//! content-warning labels.
//!
//! Predicates come in two shapes. "Affirming" dimensions (trauma-informed,
//! culturally respectful, anti-oppression aligned, healing-centered) need
//! positive hits to strictly outnumber negative ones, which implies at least
//! one positive hit. "Harm-absence" dimensions (community-safe,
//! accessibility-compliant) pass unless negative hits outnumber positive ones.
//!
//! Warnings never feed into `safety_score`.

use serde::{Deserialize, Serialize};

use super::{contains_keyword, count_hits};
use crate::content::NormalizedText;
use crate::lexicon::{IndicatorTable, Lexicon, WarningTables};

pub const SAFETY_CHECK_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentWarning {
    Violence,
    Trauma,
    Death,
    MentalHealth,
    SubstanceUse,
    SexualContent,
}

impl ContentWarning {
    pub const ALL: [ContentWarning; 6] = [
        ContentWarning::Violence,
        ContentWarning::Trauma,
        ContentWarning::Death,
        ContentWarning::MentalHealth,
        ContentWarning::SubstanceUse,
        ContentWarning::SexualContent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentWarning::Violence => "violence",
            ContentWarning::Trauma => "trauma",
            ContentWarning::Death => "death",
            ContentWarning::MentalHealth => "mental_health",
            ContentWarning::SubstanceUse => "substance_use",
            ContentWarning::SexualContent => "sexual_content",
        }
    }

    fn triggers(self, w: &WarningTables) -> &[String] {
        match self {
            ContentWarning::Violence => &w.violence,
            ContentWarning::Trauma => &w.trauma,
            ContentWarning::Death => &w.death,
            ContentWarning::MentalHealth => &w.mental_health,
            ContentWarning::SubstanceUse => &w.substance_use,
            ContentWarning::SexualContent => &w.sexual_content,
        }
    }
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub trauma_informed: bool,
    pub community_safe: bool,
    pub culturally_respectful: bool,
    pub anti_oppression_aligned: bool,
    pub healing_centered: bool,
    pub accessibility_compliant: bool,
    /// Fraction of the six checks that pass.
    pub safety_score: f64,
    /// Set semantics, reported in [`ContentWarning::ALL`] order.
    pub content_warnings: Vec<ContentWarning>,
}

impl SafetyAssessment {
    pub fn checks(&self) -> [bool; SAFETY_CHECK_COUNT] {
        [
            self.trauma_informed,
            self.community_safe,
            self.culturally_respectful,
            self.anti_oppression_aligned,
            self.healing_centered,
            self.accessibility_compliant,
        ]
    }

    pub fn has_warning(&self, w: ContentWarning) -> bool {
        self.content_warnings.contains(&w)
    }
}

fn affirming(lower: &str, table: &IndicatorTable) -> bool {
    count_hits(lower, &table.positive) > count_hits(lower, &table.negative)
}

fn harm_absent(lower: &str, table: &IndicatorTable) -> bool {
    count_hits(lower, &table.negative) <= count_hits(lower, &table.positive)
}

pub fn content_warnings(lower: &str, tables: &WarningTables) -> Vec<ContentWarning> {
    ContentWarning::ALL
        .into_iter()
        .filter(|w| w.triggers(tables).iter().any(|k| contains_keyword(lower, k)))
        .collect()
}

pub fn assess_safety(text: &NormalizedText, lexicon: &Lexicon) -> SafetyAssessment {
    let lower = text.lower();
    let s = &lexicon.safety;

    let trauma_informed = affirming(lower, &s.trauma_informed);
    let community_safe = harm_absent(lower, &s.community_safe);
    let culturally_respectful = affirming(lower, &s.culturally_respectful);
    let anti_oppression_aligned = affirming(lower, &s.anti_oppression_aligned);
    let healing_centered = affirming(lower, &s.healing_centered);
    let accessibility_compliant = harm_absent(lower, &s.accessibility_compliant);

    let passed = [
        trauma_informed,
        community_safe,
        culturally_respectful,
        anti_oppression_aligned,
        healing_centered,
        accessibility_compliant,
    ]
    .iter()
    .filter(|b| **b)
    .count();

    SafetyAssessment {
        trauma_informed,
        community_safe,
        culturally_respectful,
        anti_oppression_aligned,
        healing_centered,
        accessibility_compliant,
        safety_score: passed as f64 / SAFETY_CHECK_COUNT as f64,
        content_warnings: content_warnings(lower, &s.warnings),
    }
}
