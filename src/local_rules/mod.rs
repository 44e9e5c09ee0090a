//! County-level court rules, served through a TTL cache owned by the caller.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::LocalRulesConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRule {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl LocalRule {
    fn new(id: &str, title: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

/// Where rules come from on a cache miss.
pub trait RuleSource: Send + Sync {
    fn rules_for(&self, county: &str) -> Vec<LocalRule>;
}

/// The rule table shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRules;

impl RuleSource for BuiltinRules {
    fn rules_for(&self, county: &str) -> Vec<LocalRule> {
        let county = county.trim().to_lowercase();
        let county = county.strip_suffix(" county").unwrap_or(&county);
        match county {
            "los angeles" => los_angeles_rules(),
            _ => Vec::new(),
        }
    }
}

fn los_angeles_rules() -> Vec<LocalRule> {
    vec![
        LocalRule::new(
            "LASC 3.10",
            "Mandatory Settlement Conference",
            "A mandatory settlement conference shall be held in every civil action, unless otherwise ordered by the court.",
        ),
        LocalRule::new(
            "LASC 3.26",
            "Case Management Statement",
            "Each party must file a Case Management Statement at least 15 days before the scheduled Case Management Conference.",
        ),
        LocalRule::new(
            "LASC 3.4",
            "Ex Parte Applications",
            "Ex parte applications must be filed by 10:00 a.m. the court day before the hearing, with notice provided by 10:00 a.m.",
        ),
        LocalRule::new(
            "LASC 9.0",
            "Tentative Rulings",
            "Tentative rulings are generally available by 3:00 p.m. on the court day before the scheduled hearing.",
        ),
        LocalRule::new(
            "LASC 3.5",
            "Remote Appearances",
            "Remote appearances are governed by CRC 3.670 and LASC local rules. Use of LACourtConnect is mandatory for most civil departments.",
        ),
    ]
}

struct CachedRules {
    fetched_at: Instant,
    rules: Arc<Vec<LocalRule>>,
}

/// Per-county rule cache. Entries older than the TTL are refetched from the
/// source on the next read and dropped whenever another county is fetched.
pub struct LocalRulesCache<S: RuleSource = BuiltinRules> {
    source: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedRules>>,
}

impl LocalRulesCache<BuiltinRules> {
    pub fn from_config(config: &LocalRulesConfig) -> Self {
        Self::new(BuiltinRules, Duration::from_secs(config.ttl_secs))
    }
}

impl<S: RuleSource> LocalRulesCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, county: &str) -> Arc<Vec<LocalRule>> {
        let key = county.trim().to_lowercase();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entries.get(&key)
            && cached.fetched_at.elapsed() < self.ttl
        {
            return Arc::clone(&cached.rules);
        }

        let rules = Arc::new(self.source.rules_for(county));
        let before = entries.len();
        entries.retain(|_, cached| cached.fetched_at.elapsed() < self.ttl);
        tracing::debug!(
            county = key.as_str(),
            rules = rules.len(),
            evicted = before - entries.len(),
            "Local rules cache refreshed"
        );
        entries.insert(
            key,
            CachedRules {
                fetched_at: Instant::now(),
                rules: Arc::clone(&rules),
            },
        );
        rules
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn invalidate(&self, county: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&county.trim().to_lowercase());
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Rules for `county` rendered for a research context.
    pub fn format_rules(&self, county: &str) -> String {
        render_rules(county, &self.get(county))
    }
}

/// Renders the built-in rules for `county` without caching.
pub fn format_rules(county: &str) -> String {
    render_rules(county, &BuiltinRules.rules_for(county))
}

fn render_rules(county: &str, rules: &[LocalRule]) -> String {
    let county = county.trim();
    if rules.is_empty() {
        return format!("No specific local rules found for {county}.");
    }
    let mut out = format!("LOCAL RULES FOR {}:\n", county.to_uppercase());
    for rule in rules {
        let _ = writeln!(out, "- {}: {}\n  {}", rule.id, rule.title, rule.content);
    }
    out
}
