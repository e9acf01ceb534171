// tests/properties.rs
//
// Property tests: bounds, determinism and liberation monotonicity hold for
// arbitrary input text.

use community_content_classifier::analyze::liberation::FACTOR_WEIGHTS;
use community_content_classifier::{Classifier, ContentItem};
use proptest::prelude::*;

fn unit(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

fn item_strategy() -> impl Strategy<Value = ContentItem> {
    (
        "[A-Za-z ,.!?'-]{0,60}",
        "[A-Za-z ,.!?'-]{0,200}",
        proptest::option::of("[a-z ]{0,80}"),
        proptest::collection::vec("[A-Za-z ]{0,12}", 0..4),
    )
        .prop_map(|(title, description, body, tags)| {
            let mut item = ContentItem::new(title, description).with_tags(tags);
            item.body = body;
            item
        })
}

/// Words drawn from the lexicon so scorers actually fire.
fn lexicon_text() -> impl Strategy<Value = String> {
    let vocab = prop::sample::select(vec![
        "mutual aid", "community", "healing", "justice", "joy", "suicide", "hopeless",
        "violence", "culture", "we", "our", "learn", "history", "music", "climate",
        "vote", "wage", "school", "app", "health", "Oakland", "Maria", "?", ".",
    ]);
    proptest::collection::vec(vocab, 0..40).prop_map(|ws| ws.join(" "))
}

#[test]
fn liberation_weights_sum_to_one() {
    let sum: f64 = FACTOR_WEIGHTS.iter().map(|(_, w)| w).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_stay_in_bounds(item in item_strategy()) {
        let r = Classifier::default().classify(&item);

        prop_assert!(r.liberation_alignment.factors().iter().all(|f| unit(*f)));
        prop_assert!(unit(r.liberation_alignment_score));
        prop_assert!(unit(r.safety.safety_score));
        prop_assert!(r.quality.scores().iter().all(|q| unit(*q)));
        prop_assert!(unit(r.community_relevance));
        prop_assert!((-1.0..=1.0).contains(&r.sentiment.sentiment_score));
        prop_assert!(unit(r.sentiment.joy) && unit(r.sentiment.empowerment));
        prop_assert!(unit(r.sentiment.healing_potential) && unit(r.sentiment.organizing_energy));
        prop_assert!((0.5..=1.0).contains(&r.classification_confidence));
        prop_assert!(r.topic_tags.len() <= 12);
        prop_assert_eq!(r.requires_human_review, !r.review_reasons.is_empty());
    }

    #[test]
    fn lexicon_heavy_text_stays_in_bounds(text in lexicon_text()) {
        let r = Classifier::default().classify(&ContentItem::new("", text));
        prop_assert!(unit(r.liberation_alignment_score));
        prop_assert!(unit(r.community_relevance));
        prop_assert!((0.5..=1.0).contains(&r.classification_confidence));
        prop_assert!(r.topic_tags.len() <= 12);
        prop_assert!(r.secondary_categories.len() <= 3);
        prop_assert!(!r.secondary_categories.contains(&r.primary_category));
    }

    #[test]
    fn more_evidence_never_lowers_liberation(base in lexicon_text(), extra in lexicon_text()) {
        let c = Classifier::default();
        let before = c.classify(&ContentItem::new("", base.clone()));
        let after = c.classify(&ContentItem::new("", format!("{base} {extra}")));
        for (a, b) in before
            .liberation_alignment
            .factors()
            .iter()
            .zip(after.liberation_alignment.factors().iter())
        {
            prop_assert!(b >= a, "{} -> {}", a, b);
        }
        prop_assert!(after.liberation_alignment_score >= before.liberation_alignment_score);
    }

    #[test]
    fn classify_is_deterministic(item in item_strategy()) {
        let c = Classifier::default();
        prop_assert_eq!(c.classify(&item), c.classify(&item));
    }

    #[test]
    fn tags_are_unique(text in lexicon_text()) {
        let r = Classifier::default().classify(&ContentItem::new("Tags", text));
        let mut seen = std::collections::HashSet::new();
        prop_assert!(r.topic_tags.iter().all(|t| seen.insert(t.clone())));
    }
}
