// tests/lexicon_config.rs
//
// Lexicon loading from disk and env, plus swapping tables on a live
// classifier. Env-mutating tests run serially.

use std::fs;
use std::path::PathBuf;

use community_content_classifier::lexicon::{Lexicon, LexiconError, ENV_LEXICON_PATH};
use community_content_classifier::{Classifier, ContentItem};
use serial_test::serial;

const EMBEDDED: &str = include_str!("../config/lexicon.toml");

fn temp_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("community-content-classifier-tests");
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("write temp lexicon");
    path
}

fn with_version(version: &str) -> String {
    EMBEDDED.replacen(
        EMBEDDED
            .lines()
            .find(|l| l.starts_with("version"))
            .expect("version line"),
        &format!("version = \"{version}\""),
        1,
    )
}

#[test]
fn embedded_lexicon_has_eight_categories() {
    let lex = Lexicon::embedded();
    assert_eq!(lex.categories.len(), 8);
    assert_eq!(lex.categories[0].name, "Community Organizing");
    assert!(!lex.version.is_empty());
}

#[test]
fn from_path_reads_custom_version() {
    let path = temp_file("custom.toml", &with_version("test-1"));
    let lex = Lexicon::from_path(&path).expect("load");
    assert_eq!(lex.version, "test-1");
}

#[test]
fn missing_file_is_io_error() {
    let err = Lexicon::from_path(&PathBuf::from("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, LexiconError::Io { .. }), "{err}");
}

#[test]
fn empty_categories_are_rejected() {
    let cut = EMBEDDED
        .split("[[categories]]")
        .next()
        .expect("prefix")
        .to_string()
        + &EMBEDDED[EMBEDDED.find("[tags]").expect("tags section")..];
    let err = Lexicon::from_toml_str(&cut).unwrap_err();
    assert!(matches!(err, LexiconError::Invalid(_) | LexiconError::Parse(_)), "{err}");
}

#[test]
#[serial]
fn load_default_honors_env_path() {
    let path = temp_file("env.toml", &with_version("from-env"));
    std::env::set_var(ENV_LEXICON_PATH, &path);
    let lex = Lexicon::load_default();
    std::env::remove_var(ENV_LEXICON_PATH);
    assert_eq!(lex.expect("load").version, "from-env");
}

#[test]
#[serial]
fn load_default_fails_loudly_on_bad_env_path() {
    std::env::set_var(ENV_LEXICON_PATH, "/definitely/not/here.toml");
    let res = Lexicon::load_default();
    std::env::remove_var(ENV_LEXICON_PATH);
    assert!(res.is_err());
}

#[test]
fn swapped_lexicon_changes_results() {
    let c = Classifier::default();
    let item = ContentItem::new("Zine night", "photocopier and staples");
    assert_eq!(c.classify(&item).primary_category, "General");

    let mut lex = (*Lexicon::embedded()).clone();
    lex.version = "with-zines".into();
    lex.categories[1].keywords.push("zine".into());
    c.swap_lexicon(lex);

    let r = c.classify(&item);
    assert_eq!(r.primary_category, "Arts & Culture");
    assert_eq!(c.lexicon_version(), "with-zines");
}
