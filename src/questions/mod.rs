//! Question selection
//!
//! `sampler` holds the pure sampling logic, operating on question lists
//! already fetched from the store so it can be driven with a seeded rng.
//! `QuestionService` wires it to a `QuestionStore`.

pub mod sampler;
mod service;

pub use service::QuestionService;
