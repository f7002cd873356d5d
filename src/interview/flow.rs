use super::mic::{AudioClip, Microphone};
use crate::feedback::AnswerFeedback;
use crate::store::Question;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::info;

/// One answered question, held only for the current session
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub question: Question,
    pub clip: AudioClip,
    pub recorded_at: DateTime<Utc>,
}

/// Top-level screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Settings,
    Questions,
    Results,
}

/// Per-question recording sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Idle,
    Recording,
    Recorded,
}

/// Outcome of advancing past an answered question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    NextQuestion,
    Results,
}

/// The linear practice session state machine.
///
/// Phases run settings -> questions -> results; the only backward edge is
/// `restart`, which drops every record. Within the question phase each
/// question cycles idle -> recording -> recorded, and the microphone is
/// held only while the sub-state is `Recording`.
pub struct InterviewFlow<M: Microphone> {
    mic: M,
    phase: Phase,
    questions: Vec<Question>,
    records: Vec<Option<AnswerRecord>>,
    feedbacks: Vec<AnswerFeedback>,
    current: usize,
    record_state: RecordState,
}

impl<M: Microphone> InterviewFlow<M> {
    pub fn new(mic: M) -> Self {
        Self {
            mic,
            phase: Phase::Settings,
            questions: Vec::new(),
            records: Vec::new(),
            feedbacks: Vec::new(),
            current: 0,
            record_state: RecordState::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn record_state(&self) -> RecordState {
        self.record_state
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// All answers recorded so far, in question order
    pub fn records(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.records.iter().flatten()
    }

    /// Leave settings and start the question loop
    pub fn begin(&mut self, questions: Vec<Question>) -> Result<()> {
        if self.phase != Phase::Settings {
            bail!("A session is already running");
        }
        if questions.is_empty() {
            bail!("No questions to practice");
        }

        self.records = vec![None; questions.len()];
        self.questions = questions;
        self.current = 0;
        self.record_state = RecordState::Idle;
        self.phase = Phase::Questions;

        info!("Practice session started: {} questions", self.questions.len());

        Ok(())
    }

    pub fn start_recording(&mut self) -> Result<()> {
        if self.phase != Phase::Questions {
            bail!("Not in the question phase");
        }
        if self.record_state != RecordState::Idle {
            bail!("Recording already started for this question");
        }

        self.mic.start()?;
        self.record_state = RecordState::Recording;

        Ok(())
    }

    pub fn stop_recording(&mut self) -> Result<()> {
        if self.record_state != RecordState::Recording {
            bail!("Not recording");
        }

        let clip = self.mic.stop()?;
        self.records[self.current] = Some(AnswerRecord {
            question: self.questions[self.current].clone(),
            clip,
            recorded_at: Utc::now(),
        });
        self.record_state = RecordState::Recorded;

        Ok(())
    }

    /// Discard the current answer and record it again
    pub fn retake(&mut self) -> Result<()> {
        if self.record_state != RecordState::Recorded {
            bail!("Nothing recorded to retake");
        }

        self.records[self.current] = None;
        self.mic.start()?;
        self.record_state = RecordState::Recording;

        Ok(())
    }

    /// Move past an answered question; legal only once it is recorded
    pub fn advance(&mut self) -> Result<Step> {
        if self.phase != Phase::Questions {
            bail!("Not in the question phase");
        }
        if self.record_state != RecordState::Recorded {
            bail!("Answer the current question before moving on");
        }

        if self.current + 1 >= self.questions.len() {
            self.phase = Phase::Results;
            Ok(Step::Results)
        } else {
            self.current += 1;
            self.record_state = RecordState::Idle;
            Ok(Step::NextQuestion)
        }
    }

    /// Feedback already fetched for a question, if any.
    ///
    /// The lookup is what keeps feedback requests idempotent per record:
    /// callers check here before going back to the service.
    pub fn feedback_for(&self, question_id: &str) -> Option<&AnswerFeedback> {
        self.feedbacks
            .iter()
            .find(|f| f.question_id.as_deref() == Some(question_id))
    }

    pub fn store_feedback(&mut self, feedback: AnswerFeedback) {
        let already_cached = feedback
            .question_id
            .as_deref()
            .is_some_and(|id| self.feedback_for(id).is_some());

        if !already_cached {
            self.feedbacks.push(feedback);
        }
    }

    /// Drop every record and return to settings
    pub fn restart(&mut self) {
        if self.mic.is_live() {
            self.mic.abort();
        }

        self.questions.clear();
        self.records.clear();
        self.feedbacks.clear();
        self.current = 0;
        self.record_state = RecordState::Idle;
        self.phase = Phase::Settings;

        info!("Practice session restarted");
    }
}

impl<M: Microphone> Drop for InterviewFlow<M> {
    fn drop(&mut self) {
        // The microphone must not outlive the session
        if self.mic.is_live() {
            self.mic.abort();
        }
    }
}
