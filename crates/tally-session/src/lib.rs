//! Reconciliation sessions: the resumable row cursor, price merge
//! persistence, configuration, and advisory suggestions.

mod config;
mod progress;
mod session;
mod suggest;

pub use config::{DEFAULT_SUGGEST_TIMEOUT_MS, MatchConfig, NoMatchPolicy};
pub use progress::ProgressStore;
pub use session::{Decision, Phase, Session, SessionPaths, SessionStatus, Transition};
pub use suggest::{CommandSuggester, Suggester, Suggestion, build_prompt, match_suggestion};
