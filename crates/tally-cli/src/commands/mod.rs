pub mod candidates;
pub mod confirm;
pub mod run;
pub mod skip;
pub mod status;
