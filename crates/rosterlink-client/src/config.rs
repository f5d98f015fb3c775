use tracing::warn;

pub const LOW_MATCH_RATE_ENV: &str = "ROSTERLINK_LOW_MATCH_RATE";
pub const DEFAULT_LOW_MATCH_RATE: f64 = 0.5;

/// Provider A match rate below which a build logs a warning.
pub fn low_match_rate_threshold() -> f64 {
    match std::env::var(LOW_MATCH_RATE_ENV) {
        Ok(raw) => parse_threshold(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "ignoring invalid {LOW_MATCH_RATE_ENV}");
            DEFAULT_LOW_MATCH_RATE
        }),
        Err(_) => DEFAULT_LOW_MATCH_RATE,
    }
}

fn parse_threshold(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| (0.0..=1.0).contains(value))
}
