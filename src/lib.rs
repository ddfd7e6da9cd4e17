//! Voice assistant skill for T Cube. Answers questions about logged work ("what did I do this
//! week?") and logs new time entries, relaying everything to the T Cube REST service.
//!

pub mod cli;
pub mod config;
pub mod errors;
pub mod narration;
pub mod skill;
pub mod tcube;
pub mod utils;
