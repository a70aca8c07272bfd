//! Candidate list rendering: JSONL for tools, plain text for operators.

mod human;
mod jsonl;

pub use human::{NO_MATCH, render_candidates};
pub use jsonl::JsonlWriter;
