// src/lexicon.rs
//! Lexicon tables: the versioned keyword data every factor scorer reads.
//!
//! Tables live in TOML (`config/lexicon.toml`) so tuning is a data swap, not a
//! redeploy. The same file is embedded into the binary as the default table.
//! All keywords are lowercased at load time; scorers match them against the
//! lowercased normalized text.
//!
//! Maps are `BTreeMap`s on purpose: iteration order is fixed, so weighted sums
//! come out bit-identical across runs.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_PATH: &str = "LEXICON_PATH";
pub const ENV_LEXICON_HOT_RELOAD: &str = "LEXICON_HOT_RELOAD";

static EMBEDDED_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../config/lexicon.toml");
    Arc::new(Lexicon::from_toml_str(raw).expect("valid embedded lexicon"))
});

/// Keyword → weight in (0, 1] for one liberation factor.
pub type FactorWeightTable = BTreeMap<String, f64>;

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read lexicon at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid lexicon: {0}")]
    Invalid(String),
}

/* ----------------------------
Schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub version: String,
    pub liberation: LiberationTables,
    pub safety: SafetyTables,
    pub sentiment: SentimentTables,
    pub quality: QualityTables,
    pub categories: Vec<CategoryTable>,
    pub tags: TagTables,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiberationTables {
    pub creator_sovereignty: FactorWeightTable,
    pub community_empowerment: FactorWeightTable,
    pub anti_oppression: FactorWeightTable,
    pub cultural_authenticity: FactorWeightTable,
    pub democratic_participation: FactorWeightTable,
    pub economic_justice: FactorWeightTable,
    pub healing_centeredness: FactorWeightTable,
    pub joy_celebration: FactorWeightTable,
}

/// Positive vs negative indicator keywords for one safety dimension.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicatorTable {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafetyTables {
    pub trauma_informed: IndicatorTable,
    pub community_safe: IndicatorTable,
    pub culturally_respectful: IndicatorTable,
    pub anti_oppression_aligned: IndicatorTable,
    pub healing_centered: IndicatorTable,
    pub accessibility_compliant: IndicatorTable,
    pub warnings: WarningTables,
}

/// Trigger-topic keyword groups; one content warning per group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarningTables {
    #[serde(default)]
    pub violence: Vec<String>,
    #[serde(default)]
    pub trauma: Vec<String>,
    #[serde(default)]
    pub death: Vec<String>,
    #[serde(default)]
    pub mental_health: Vec<String>,
    #[serde(default)]
    pub substance_use: Vec<String>,
    #[serde(default)]
    pub sexual_content: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentTables {
    /// Whole-token matches.
    pub positive: BTreeSet<String>,
    /// Whole-token matches.
    pub negative: BTreeSet<String>,
    pub joy: KeywordList,
    pub empowerment: KeywordList,
    pub healing: KeywordList,
    pub organizing: KeywordList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityTables {
    /// Allow-list of recognized outlets (matched against source and URL host).
    #[serde(default)]
    pub recognized_sources: Vec<String>,
    #[serde(default)]
    pub cultural_terms: Vec<String>,
    #[serde(default)]
    pub calls_to_action: Vec<String>,
    /// Whole-token matches.
    #[serde(default)]
    pub community_pronouns: BTreeSet<String>,
    #[serde(default)]
    pub pedagogical: Vec<String>,
    #[serde(default)]
    pub historical: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryTable {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagTables {
    #[serde(default)]
    pub thematic: Vec<String>,
    /// Canonical tag → trigger keywords.
    #[serde(default)]
    pub liberation: BTreeMap<String, Vec<String>>,
    /// Demographic tag → trigger keywords.
    #[serde(default)]
    pub demographic: BTreeMap<String, Vec<String>>,
}

impl LiberationTables {
    /// Tables in the canonical factor order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FactorWeightTable)> {
        [
            ("creator_sovereignty", &self.creator_sovereignty),
            ("community_empowerment", &self.community_empowerment),
            ("anti_oppression", &self.anti_oppression),
            ("cultural_authenticity", &self.cultural_authenticity),
            ("democratic_participation", &self.democratic_participation),
            ("economic_justice", &self.economic_justice),
            ("healing_centeredness", &self.healing_centeredness),
            ("joy_celebration", &self.joy_celebration),
        ]
        .into_iter()
    }

    fn tables_mut(&mut self) -> [&mut FactorWeightTable; 8] {
        [
            &mut self.creator_sovereignty,
            &mut self.community_empowerment,
            &mut self.anti_oppression,
            &mut self.cultural_authenticity,
            &mut self.democratic_participation,
            &mut self.economic_justice,
            &mut self.healing_centeredness,
            &mut self.joy_celebration,
        ]
    }
}

impl Lexicon {
    /// Shared handle to the table compiled into the binary.
    pub fn embedded() -> Arc<Lexicon> {
        EMBEDDED_LEXICON.clone()
    }

    /// Parse, normalize and validate a TOML lexicon.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LexiconError> {
        let mut lex: Lexicon = toml::from_str(toml_str)?;
        lex.normalize();
        lex.validate()?;
        Ok(lex)
    }

    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the lexicon the way the service does:
    /// 1) `$LEXICON_PATH` (must exist and parse)
    /// 2) `config/lexicon.toml` if present
    /// 3) the embedded table
    pub fn load_default() -> Result<Arc<Self>, LexiconError> {
        if let Ok(p) = std::env::var(ENV_LEXICON_PATH) {
            return Self::from_path(Path::new(&p)).map(Arc::new);
        }
        let default_path = Path::new(DEFAULT_LEXICON_PATH);
        if default_path.exists() {
            return Self::from_path(default_path).map(Arc::new);
        }
        Ok(Self::embedded())
    }

    /// Lowercase and trim every keyword so matching is case-insensitive.
    fn normalize(&mut self) {
        fn clean(v: &mut Vec<String>) {
            for k in v.iter_mut() {
                *k = k.trim().to_lowercase();
            }
            v.retain(|k| !k.is_empty());
        }
        fn clean_set(s: &mut BTreeSet<String>) {
            *s = s
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }

        for table in self.liberation.tables_mut() {
            *table = table
                .iter()
                .map(|(k, w)| (k.trim().to_lowercase(), *w))
                .filter(|(k, _)| !k.is_empty())
                .collect();
        }

        let s = &mut self.safety;
        for ind in [
            &mut s.trauma_informed,
            &mut s.community_safe,
            &mut s.culturally_respectful,
            &mut s.anti_oppression_aligned,
            &mut s.healing_centered,
            &mut s.accessibility_compliant,
        ] {
            clean(&mut ind.positive);
            clean(&mut ind.negative);
        }
        let w = &mut s.warnings;
        for list in [
            &mut w.violence,
            &mut w.trauma,
            &mut w.death,
            &mut w.mental_health,
            &mut w.substance_use,
            &mut w.sexual_content,
        ] {
            clean(list);
        }

        let st = &mut self.sentiment;
        clean_set(&mut st.positive);
        clean_set(&mut st.negative);
        for list in [
            &mut st.joy,
            &mut st.empowerment,
            &mut st.healing,
            &mut st.organizing,
        ] {
            clean(&mut list.keywords);
        }

        let q = &mut self.quality;
        for list in [
            &mut q.recognized_sources,
            &mut q.cultural_terms,
            &mut q.calls_to_action,
            &mut q.pedagogical,
            &mut q.historical,
        ] {
            clean(list);
        }
        clean_set(&mut q.community_pronouns);

        for c in &mut self.categories {
            c.name = c.name.trim().to_string();
            clean(&mut c.keywords);
        }

        let t = &mut self.tags;
        clean(&mut t.thematic);
        for triggers in t.liberation.values_mut() {
            clean(triggers);
        }
        for triggers in t.demographic.values_mut() {
            clean(triggers);
        }
    }

    fn validate(&self) -> Result<(), LexiconError> {
        if self.version.trim().is_empty() {
            return Err(LexiconError::Invalid("empty version".into()));
        }
        for (factor, table) in self.liberation.iter() {
            for (kw, w) in table {
                if !(w.is_finite() && *w > 0.0 && *w <= 1.0) {
                    return Err(LexiconError::Invalid(format!(
                        "liberation `{factor}` keyword `{kw}` has weight {w} outside (0, 1]"
                    )));
                }
            }
        }
        if self.categories.is_empty() {
            return Err(LexiconError::Invalid("no categories configured".into()));
        }
        for c in &self.categories {
            if c.name.is_empty() {
                return Err(LexiconError::Invalid("category with empty name".into()));
            }
            if c.keywords.is_empty() {
                return Err(LexiconError::Invalid(format!(
                    "category `{}` has no keywords",
                    c.name
                )));
            }
        }
        for (label, list) in [
            ("joy", &self.sentiment.joy),
            ("empowerment", &self.sentiment.empowerment),
            ("healing", &self.sentiment.healing),
            ("organizing", &self.sentiment.organizing),
        ] {
            if list.keywords.is_empty() {
                return Err(LexiconError::Invalid(format!(
                    "sentiment `{label}` has no keywords"
                )));
            }
        }
        Ok(())
    }
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// Swappable lexicon reference. Readers clone the inner `Arc`; a swap replaces
/// it wholesale, so in-flight classifications keep the table they started with.
#[derive(Clone)]
pub struct LexiconHandle {
    inner: Arc<RwLock<Arc<Lexicon>>>,
}

impl LexiconHandle {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(lexicon)),
        }
    }

    pub fn current(&self) -> Arc<Lexicon> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn swap(&self, lexicon: Arc<Lexicon>) {
        let version = lexicon.version.clone();
        match self.inner.write() {
            Ok(mut guard) => *guard = lexicon,
            Err(poisoned) => *poisoned.into_inner() = lexicon,
        }
        info!(target: "lexicon", %version, "lexicon swapped");
    }
}

impl Default for LexiconHandle {
    fn default() -> Self {
        Self::new(Lexicon::embedded())
    }
}

/// Returns true if we should enable hot reload (dev/local only).
fn hot_reload_enabled() -> bool {
    let want = std::env::var(ENV_LEXICON_HOT_RELOAD)
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    want && crate::is_dev_env()
}

/// Start a simple polling watcher on `path` that swaps `handle` on change.
/// Polls mtime every 2s; parse failures keep the previous table.
pub fn start_hot_reload_thread(handle: LexiconHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            if let Ok(mtime) = fs::metadata(&path).and_then(|m| m.modified()) {
                let changed = match last_mtime {
                    None => {
                        last_mtime = Some(mtime);
                        false
                    }
                    Some(prev) => mtime > prev,
                };
                if changed {
                    match Lexicon::from_path(&path) {
                        Ok(lex) => handle.swap(Arc::new(lex)),
                        Err(e) => warn!(target: "lexicon", error = %e, "hot reload rejected"),
                    }
                    last_mtime = Some(mtime);
                }
            }
            thread::sleep(poll);
        }
    });
}
