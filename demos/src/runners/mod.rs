//! Runners for experiments that need more than one execution.

pub mod random;
pub mod search;
pub mod unicorn;

pub use random::{DecodeMode, RandomNumberRunner};
pub use search::run_password_search;
pub use unicorn::{Command, GameOutcome, UnicornGame};
