use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain categories a session can be attributed to.
pub const DEFAULT_DOMAIN_CATEGORIES: [&str; 8] = [
    "email", "shopping", "social", "news", "dev", "finance", "health", "travel",
];

/// Hours of day a user routine can center on.
pub const PREFERRED_HOURS: [u32; 7] = [8, 9, 10, 13, 18, 20, 22];

/// Typical session lengths in seconds (3m..20m).
pub const AVG_SESSION_SECS: [i64; 5] = [180, 300, 600, 900, 1200];

/// Stable behavioral routine for one synthetic user.
///
/// Built once per user and read by every session that user produces; the
/// routine is what makes re-identification possible downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub preferred_hour: u32,
    pub avg_session_secs: i64,
}

/// One fully-populated labeled session, the unit of output.
///
/// Every field is mandatory; records are created in a single synthesis step
/// and never mutated afterwards. Field declaration order is the output
/// column order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub session_duration_sec: i64,
    pub domain_category: String,
    pub domain_risk_score: f64,
    pub redirect_count: i64,
    pub dwell_time_sec: i64,
    pub download_flag: bool,
    pub click_count: i64,
    pub typing_events: i64,
    pub login_failures: i64,
    pub mfa_challenge: bool,
    pub new_device_login: bool,
    pub label_malicious: bool,
}

/// Configuration for one generation run, fixed before generation starts.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub num_users: usize,
    pub sessions_per_user: usize,
    /// Probability that any given session is labeled malicious.
    pub malicious_rate: f64,
    pub seed: u64,
    pub domain_categories: Vec<String>,
    /// Anchor for timestamp synthesis. Sessions land 0-6 days before this.
    /// Pin it (together with the seed) to make two runs byte-identical.
    pub reference_time: DateTime<Utc>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            num_users: 10,
            sessions_per_user: 20,
            malicious_rate: 0.10,
            seed: 67,
            domain_categories: DEFAULT_DOMAIN_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reference_time: Utc::now(),
        }
    }
}

impl GeneratorConfig {
    /// Reject invalid configurations before any generation happens.
    /// Once this passes, the generation pass itself cannot fail.
    pub fn validate(&self) -> Result<()> {
        if !self.malicious_rate.is_finite() || !(0.0..=1.0).contains(&self.malicious_rate) {
            bail!(
                "malicious_rate must be within [0.0, 1.0], got {}",
                self.malicious_rate
            );
        }
        if self.domain_categories.is_empty() {
            bail!("domain_categories must not be empty");
        }
        Ok(())
    }
}
