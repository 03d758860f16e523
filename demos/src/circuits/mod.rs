//! Circuit generators for the experiments.

pub mod basics;
pub mod clone;
pub mod deutsch_jozsa;
pub mod eight_ball;
pub mod random;
pub mod search;
pub mod unicorn;

pub use basics::{basic_circuit, hello_circuit, superposition_circuits};
pub use clone::clone_circuit;
pub use deutsch_jozsa::{Oracle, deutsch_jozsa_circuit};
pub use eight_ball::eight_ball_circuit;
pub use random::random_circuit;
pub use search::{Password, password_search_circuit};
pub use unicorn::{Lift, unicorn_circuit};
