//! Interview practice flow
//!
//! This module provides the client-side practice session:
//! - The linear settings -> questions -> results state machine
//! - Microphone capture behind the `Microphone` seam
//! - The HTTP client for the interview API
//! - The terminal front-end that ties the three together

mod client;
mod flow;
mod mic;
pub mod practice;

pub use client::ApiClient;
pub use flow::{AnswerRecord, InterviewFlow, Phase, RecordState, Step};
pub use mic::{encode_wav, AudioClip, CpalMicrophone, Microphone};
