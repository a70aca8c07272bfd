use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tally_core::TallyError;
use tally_score::{DEFAULT_LIMIT, DEFAULT_MIN_SCORE};

/// How long an advisory suggester may run before it is abandoned.
pub const DEFAULT_SUGGEST_TIMEOUT_MS: u64 = 5_000;

/// What to do with a row whose candidate list comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchPolicy {
    /// Present the empty list; the operator has to skip explicitly.
    #[default]
    Surface,
    /// Skip the row straight away and persist the skip.
    AutoSkip,
}

/// Matching and session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Maximum number of ranked candidates per row.
    pub limit: usize,
    /// Candidates scoring below this are dropped.
    pub min_score: f64,
    pub no_match_policy: NoMatchPolicy,
    /// Make a matching advisory suggestion the default selection.
    pub adopt_suggestion: bool,
    /// Program and arguments of an external advisory suggester.
    pub suggest_command: Option<Vec<String>>,
    /// Deadline for one advisory call, in milliseconds.
    pub suggest_timeout_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            no_match_policy: NoMatchPolicy::default(),
            adopt_suggestion: false,
            suggest_command: None,
            suggest_timeout_ms: DEFAULT_SUGGEST_TIMEOUT_MS,
        }
    }
}

impl MatchConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let text = fs::read_to_string(path)
            .map_err(|e| TallyError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| TallyError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TallyError> {
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(TallyError::Config(format!(
                "min_score must be within 0..=100, got {}",
                self.min_score
            )));
        }
        if self
            .suggest_command
            .as_ref()
            .is_some_and(|argv| argv.is_empty() || argv[0].trim().is_empty())
        {
            return Err(TallyError::Config(
                "suggest_command must name a program".to_string(),
            ));
        }
        if self.suggest_timeout_ms == 0 {
            return Err(TallyError::Config(
                "suggest_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.limit, 10);
        assert_eq!(config.min_score, 0.0);
        assert_eq!(config.no_match_policy, NoMatchPolicy::Surface);
        assert!(!config.adopt_suggestion);
        assert!(config.suggest_command.is_none());
        assert_eq!(config.suggest_timeout_ms, DEFAULT_SUGGEST_TIMEOUT_MS);
    }

    #[test]
    fn load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        fs::write(&path, r#"{"limit": 5, "no_match_policy": "auto_skip"}"#).unwrap();

        let config = MatchConfig::load(&path).unwrap();
        assert_eq!(config.limit, 5);
        assert_eq!(config.no_match_policy, NoMatchPolicy::AutoSkip);
        assert_eq!(config.min_score, 0.0);
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        fs::write(&path, r#"{"limt": 5}"#).unwrap();

        let err = MatchConfig::load(&path).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MatchConfig::load(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }

    #[test]
    fn validate_min_score_range() {
        let config = MatchConfig {
            min_score: 120.0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_suggest_command() {
        let config = MatchConfig {
            suggest_command: Some(vec![]),
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            suggest_command: Some(vec!["suggest".to_string()]),
            ..MatchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn suggest_timeout_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        fs::write(&path, r#"{"suggest_timeout_ms": 250}"#).unwrap();
        assert_eq!(MatchConfig::load(&path).unwrap().suggest_timeout_ms, 250);

        let config = MatchConfig {
            suggest_timeout_ms: 0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
