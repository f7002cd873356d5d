// Integration tests for the practice flow state machine
//
// The microphone is a fake that tracks its live flag, which is how the
// release-on-stop/restart/drop discipline is asserted.

use anyhow::Result;
use interview_coach::feedback::{AnswerFeedback, StarFeedback};
use interview_coach::interview::{
    encode_wav, AudioClip, InterviewFlow, Microphone, Phase, RecordState, Step,
};
use interview_coach::store::Question;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
struct FakeMicrophone {
    live: Arc<AtomicBool>,
    starts: Arc<AtomicUsize>,
}

impl Microphone for FakeMicrophone {
    fn start(&mut self) -> Result<()> {
        self.live.store(true, Ordering::SeqCst);
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip> {
        self.live.store(false, Ordering::SeqCst);
        Ok(AudioClip {
            bytes: vec![1, 2, 3],
            mime: "audio/wav".to_string(),
        })
    }

    fn abort(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

fn questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            id: format!("q{}", i),
            category_id: "teamwork".to_string(),
            text: format!("Question {}", i),
        })
        .collect()
}

fn feedback(question_id: Option<&str>) -> AnswerFeedback {
    AnswerFeedback {
        question_id: question_id.map(str::to_string),
        star_feedback: StarFeedback::default(),
    }
}

#[test]
fn test_begin_requires_questions() {
    let mut flow = InterviewFlow::new(FakeMicrophone::default());

    assert!(flow.begin(Vec::new()).is_err());
    assert_eq!(flow.phase(), Phase::Settings);
}

#[test]
fn test_linear_happy_path() -> Result<()> {
    let mic = FakeMicrophone::default();
    let mut flow = InterviewFlow::new(mic.clone());

    flow.begin(questions(2))?;
    assert_eq!(flow.phase(), Phase::Questions);
    assert_eq!(flow.record_state(), RecordState::Idle);

    flow.start_recording()?;
    assert_eq!(flow.record_state(), RecordState::Recording);
    assert!(mic.live.load(Ordering::SeqCst));

    flow.stop_recording()?;
    assert_eq!(flow.record_state(), RecordState::Recorded);
    assert!(!mic.live.load(Ordering::SeqCst), "stop releases the mic");

    assert_eq!(flow.advance()?, Step::NextQuestion);
    assert_eq!(flow.record_state(), RecordState::Idle);

    flow.start_recording()?;
    flow.stop_recording()?;
    assert_eq!(flow.advance()?, Step::Results);
    assert_eq!(flow.phase(), Phase::Results);

    assert_eq!(flow.records().count(), 2);

    Ok(())
}

#[test]
fn test_advance_requires_a_recorded_answer() -> Result<()> {
    let mut flow = InterviewFlow::new(FakeMicrophone::default());
    flow.begin(questions(2))?;

    assert!(flow.advance().is_err(), "idle question cannot be skipped");

    flow.start_recording()?;
    assert!(flow.advance().is_err(), "recording must stop first");

    Ok(())
}

#[test]
fn test_retake_keeps_at_most_one_record_per_question() -> Result<()> {
    let mic = FakeMicrophone::default();
    let mut flow = InterviewFlow::new(mic.clone());
    flow.begin(questions(1))?;

    flow.start_recording()?;
    flow.stop_recording()?;
    assert_eq!(flow.records().count(), 1);

    flow.retake()?;
    assert_eq!(flow.record_state(), RecordState::Recording);
    assert_eq!(flow.records().count(), 0, "retake drops the old record");

    flow.stop_recording()?;
    assert_eq!(flow.records().count(), 1);
    assert_eq!(mic.starts.load(Ordering::SeqCst), 2);

    Ok(())
}

#[test]
fn test_restart_clears_the_session() -> Result<()> {
    let mic = FakeMicrophone::default();
    let mut flow = InterviewFlow::new(mic.clone());

    flow.begin(questions(1))?;
    flow.start_recording()?;
    flow.stop_recording()?;
    flow.advance()?;
    flow.store_feedback(feedback(Some("q0")));

    flow.restart();

    assert_eq!(flow.phase(), Phase::Settings);
    assert_eq!(flow.records().count(), 0);
    assert!(flow.feedback_for("q0").is_none());
    assert!(!mic.live.load(Ordering::SeqCst));

    // The flow is reusable after a restart
    flow.begin(questions(1))?;
    assert_eq!(flow.phase(), Phase::Questions);

    Ok(())
}

#[test]
fn test_restart_while_recording_releases_the_microphone() -> Result<()> {
    let mic = FakeMicrophone::default();
    let mut flow = InterviewFlow::new(mic.clone());

    flow.begin(questions(1))?;
    flow.start_recording()?;
    assert!(mic.live.load(Ordering::SeqCst));

    flow.restart();

    assert!(!mic.live.load(Ordering::SeqCst));

    Ok(())
}

#[test]
fn test_drop_mid_recording_releases_the_microphone() -> Result<()> {
    let mic = FakeMicrophone::default();

    {
        let mut flow = InterviewFlow::new(mic.clone());
        flow.begin(questions(1))?;
        flow.start_recording()?;
        assert!(mic.live.load(Ordering::SeqCst));
    }

    assert!(
        !mic.live.load(Ordering::SeqCst),
        "no live track may survive the flow"
    );

    Ok(())
}

#[test]
fn test_double_start_is_rejected() -> Result<()> {
    let mut flow = InterviewFlow::new(FakeMicrophone::default());
    flow.begin(questions(1))?;

    flow.start_recording()?;
    assert!(flow.start_recording().is_err());

    Ok(())
}

#[test]
fn test_feedback_cache_is_idempotent() -> Result<()> {
    let mut flow = InterviewFlow::new(FakeMicrophone::default());
    flow.begin(questions(1))?;

    flow.store_feedback(feedback(Some("q0")));
    flow.store_feedback(feedback(Some("q0")));

    assert!(flow.feedback_for("q0").is_some());
    assert!(flow.feedback_for("q1").is_none());

    Ok(())
}

#[test]
fn test_encode_wav_produces_a_readable_clip() -> Result<()> {
    let samples: Vec<i16> = (0..1600).map(|i| (i % 128) as i16).collect();
    let bytes = encode_wav(&samples, 16_000)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("clip.wav");
    std::fs::write(&path, &bytes)?;

    let reader = hound::WavReader::open(&path)?;
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 1600);

    Ok(())
}
