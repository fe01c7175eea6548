use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use tracing::{debug, info};

use crate::models::{
    GeneratorConfig, SessionRecord, UserProfile, AVG_SESSION_SECS, PREFERRED_HOURS,
};
use crate::rng::SeededRng;

/// Round to 3 decimal places (risk scores).
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Derive the stable routine for the user with the given 1-based ordinal.
pub fn build_profile(rng: &mut SeededRng, ordinal: usize) -> UserProfile {
    let preferred_hour = *rng.pick(&PREFERRED_HOURS);
    let avg_session_secs = *rng.pick(&AVG_SESSION_SECS);
    UserProfile {
        user_id: format!("user_{:03}", ordinal),
        preferred_hour,
        avg_session_secs,
    }
}

/// Build profiles for users `1..=num_users` in ordinal order.
pub fn generate_profiles(rng: &mut SeededRng, num_users: usize) -> Vec<UserProfile> {
    (1..=num_users).map(|u| build_profile(rng, u)).collect()
}

/// The dataset generator: owns the config and the single random stream.
///
/// Generation is strictly sequential; the draw order on the one seeded
/// stream determines the entire output, so there is nothing to parallelize
/// without changing the result.
pub struct TelemetryGenerator {
    config: GeneratorConfig,
    rng: SeededRng,
}

impl TelemetryGenerator {
    /// Validate the configuration and set up the seeded stream.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = SeededRng::new(config.seed);
        Ok(TelemetryGenerator { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the full dataset: users outer, sessions inner, one global
    /// session counter that is never reset per user.
    pub fn generate(&mut self) -> Vec<SessionRecord> {
        let total = self.config.num_users * self.config.sessions_per_user;
        let mut records = Vec::with_capacity(total);
        let mut session_counter: usize = 1;

        for u in 1..=self.config.num_users {
            let profile = build_profile(&mut self.rng, u);
            debug!(
                "routine for {}: hour {}, avg {}s",
                profile.user_id, profile.preferred_hour, profile.avg_session_secs
            );
            for _ in 0..self.config.sessions_per_user {
                records.push(self.synthesize(&profile, session_counter));
                session_counter += 1;
            }
        }

        info!("Generated {} session records", records.len());
        records
    }

    /// Produce one labeled session for the given profile.
    ///
    /// The benign baseline is always computed; when the malicious coin flip
    /// lands, the override block replaces the affected features outright
    /// rather than blending with the baseline, so the two regimes stay
    /// cleanly separable. Every numeric path is clamped, so this is total.
    pub fn synthesize(&mut self, profile: &UserProfile, session_ordinal: usize) -> SessionRecord {
        let rng = &mut self.rng;

        // Ground-truth label, drawn up front.
        let malicious = rng.uniform() < self.config.malicious_rate;

        // Timestamp: 0-6 days before the reference time, snapped to the
        // user's preferred hour, then jittered by -90..+90 minutes.
        let days_back = rng.int_below(7) as i64;
        let jitter_min = rng.int_below(181) as i64 - 90;
        let day = self.config.reference_time - Duration::days(days_back);
        let snapped = day
            .date_naive()
            .and_hms_opt(profile.preferred_hour, 0, 0)
            .unwrap();
        let timestamp = Utc.from_utc_datetime(&snapped) + Duration::minutes(jitter_min);

        // Benign baseline.
        let mut session_duration_sec =
            ((profile.avg_session_secs as f64 + rng.gaussian() * 120.0) as i64).clamp(30, 3600);
        let domain_category = rng.pick(&self.config.domain_categories).clone();
        // Squaring skews the risk distribution toward low values.
        let mut domain_risk_score = round3(rng.uniform().powi(2));
        let mut redirect_count = ((rng.gaussian() * 1.5 + 1.0).round() as i64).clamp(0, 10);
        let mut download_flag = rng.uniform() < 0.03;
        let mut click_count = ((rng.gaussian() * 6.0 + 18.0).round() as i64).clamp(0, 80);
        let mut typing_events = ((rng.gaussian() * 20.0 + 55.0).round() as i64).clamp(0, 300);
        let mut login_failures = 0i64;
        let mut mfa_challenge = false;
        let mut new_device_login = rng.uniform() < 0.05;
        // Dwell time is some portion of the session.
        let mut dwell_time_sec = ((session_duration_sec as f64 * (0.25 + 0.3 * rng.uniform()))
            as i64)
            .clamp(1, session_duration_sec);

        // Malicious regime: short, risky, download-heavy, failure-prone.
        if malicious {
            domain_risk_score = round3(0.7 + 0.3 * rng.uniform()); // 0.7..1.0
            redirect_count = 3 + rng.int_below(8) as i64; // 3..10
            download_flag = true;
            session_duration_sec = 20 + rng.int_below(101) as i64; // 20..120, smash-and-grab
            // Re-clamped against the new, shorter duration.
            dwell_time_sec = (5 + rng.int_below(30) as i64).clamp(1, session_duration_sec);
            click_count = (1 + rng.int_below(10) as i64).clamp(0, 80);
            typing_events = (1 + rng.int_below(20) as i64).clamp(0, 300);
            login_failures = 2 + rng.int_below(7) as i64; // 2..8
            mfa_challenge = rng.uniform() < 0.6;
            new_device_login = rng.uniform() < 0.3;
        }

        SessionRecord {
            user_id: profile.user_id.clone(),
            session_id: format!("sess_{:05}", session_ordinal),
            timestamp,
            session_duration_sec,
            domain_category,
            domain_risk_score,
            redirect_count,
            dwell_time_sec,
            download_flag,
            click_count,
            typing_events,
            login_failures,
            mfa_challenge,
            new_device_login,
            label_malicious: malicious,
        }
    }
}
