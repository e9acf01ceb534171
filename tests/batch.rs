// tests/batch.rs
//
// Batch classification: parallel map, input order, per-item isolation.

use community_content_classifier::{summarize, Classifier, ClassifyError, ContentItem};
use serde_json::{json, Value};

fn corpus() -> Vec<ContentItem> {
    (0..200)
        .map(|i| match i % 4 {
            0 => ContentItem::new(format!("Garden day {i}"), "climate, water and land"),
            1 => ContentItem::new(format!("Rent strike {i}"), "workers organize for housing"),
            2 => ContentItem::default(),
            _ => ContentItem::new(format!("Poetry night {i}"), "music, dance and culture")
                .with_url(format!("https://example.org/{i}")),
        })
        .collect()
}

#[test]
fn large_batch_preserves_order() {
    let c = Classifier::default();
    let items = corpus();
    let results = c.batch_classify(&items);

    assert_eq!(results.len(), items.len());
    for (item, r) in items.iter().zip(&results) {
        assert_eq!(r, &c.classify(item));
    }
}

#[test]
fn empty_batch_is_empty() {
    assert!(Classifier::default().batch_classify(&[]).is_empty());
    assert!(Classifier::default().batch_classify_values(&[]).is_empty());
}

#[test]
fn malformed_entries_do_not_abort_the_batch() {
    let c = Classifier::default();
    let values: Vec<Value> = vec![
        json!({ "title": "Rent strike", "description": "workers organize for housing" }),
        Value::Null,
        json!("just a string"),
        json!({ "title": 7, "description": ["not", "text"] }),
    ];
    let out = c.batch_classify_values(&values);

    assert_eq!(out.len(), 4);
    assert!(out[0].is_ok());
    assert!(matches!(out[1], Err(ClassifyError::InvalidContentItem { .. })));
    assert!(matches!(out[2], Err(ClassifyError::InvalidContentItem { .. })));
    // mistyped fields degrade to defaults
    let r = out[3].as_ref().expect("object classifies");
    assert_eq!(r.primary_category, "General");
}

#[test]
fn summary_matches_batch() {
    let c = Classifier::default();
    let results = c.batch_classify(&corpus());
    let s = summarize(&results);

    assert_eq!(s.total, 200);
    assert_eq!(s.requires_review + s.auto_accepted, 200);
    assert_eq!(s.primary_categories.get("General"), Some(&50));
    assert_eq!(
        s.requires_review,
        results.iter().filter(|r| r.requires_human_review).count()
    );
}
