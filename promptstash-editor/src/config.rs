//! Editor session configuration.

use std::time::Duration;

/// Default quiet period before a debounced flush, in milliseconds.
const DEFAULT_QUIET_PERIOD_MS: u64 = 500;

/// Configuration for an edit session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Quiet period Q: a debounced flush fires only after this much time
    /// elapses with no further edits (default: 500 ms).
    pub quiet_period: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
        }
    }
}

impl EditorConfig {
    /// Create an EditorConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `PROMPTSTASH_QUIET_PERIOD_MS`: debounce window in milliseconds (default: 500)
    pub fn from_env() -> Self {
        let quiet_period = Duration::from_millis(
            std::env::var("PROMPTSTASH_QUIET_PERIOD_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_QUIET_PERIOD_MS),
        );

        Self { quiet_period }
    }

    /// Short quiet period for development and interactive testing.
    pub fn development() -> Self {
        Self {
            quiet_period: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quiet_period_is_half_second() {
        assert_eq!(EditorConfig::default().quiet_period, Duration::from_millis(500));
    }

    #[test]
    fn development_preset_is_shorter() {
        assert!(EditorConfig::development().quiet_period < EditorConfig::default().quiet_period);
    }

    // Single test for all PROMPTSTASH_QUIET_PERIOD_MS cases: tests run in
    // parallel and must not race on the same process-wide variable.
    #[test]
    fn from_env_reads_override_and_falls_back() {
        std::env::remove_var("PROMPTSTASH_QUIET_PERIOD_MS");
        assert_eq!(
            EditorConfig::from_env().quiet_period,
            Duration::from_millis(500)
        );

        std::env::set_var("PROMPTSTASH_QUIET_PERIOD_MS", "250");
        assert_eq!(
            EditorConfig::from_env().quiet_period,
            Duration::from_millis(250)
        );

        std::env::set_var("PROMPTSTASH_QUIET_PERIOD_MS", "not-a-number");
        assert_eq!(
            EditorConfig::from_env().quiet_period,
            Duration::from_millis(500)
        );

        std::env::remove_var("PROMPTSTASH_QUIET_PERIOD_MS");
    }
}
