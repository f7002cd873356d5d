//! Terminal front-end for a practice session

use super::client::ApiClient;
use super::flow::{InterviewFlow, Step};
use super::mic::CpalMicrophone;
use crate::config::Config;
use crate::feedback::{AnswerFeedback, FeedbackComponent};
use crate::store::QuestionCategory;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};

const MAX_CATEGORIES: usize = 5;

pub async fn run(cfg: &Config) -> Result<()> {
    let api = ApiClient::new(&cfg.interview.server_url);
    let mut flow = InterviewFlow::new(CpalMicrophone::new());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let session_id = format!("practice-{}", uuid::Uuid::new_v4());
    info!("Starting practice session {}", session_id);

    println!("Behavioral Interview");
    println!("Practice behavioral interviews and get feedback on your answers\n");

    loop {
        // Settings: pick categories, fetch the question set
        let categories = api
            .categories()
            .await
            .context("Is the interview-coach server running?")?;
        let selected = pick_categories(&mut input, &categories).await?;

        let questions = api.interview_questions(&selected).await?;
        flow.begin(questions)?;

        // Question loop
        'questions: loop {
            let question = flow
                .current_question()
                .context("Question loop ran past the question set")?;
            println!(
                "\n{}/{} {}",
                flow.current_index() + 1,
                flow.question_count(),
                question.text
            );

            prompt(&mut input, "Press Enter to record your answer").await?;
            flow.start_recording()?;

            loop {
                prompt(&mut input, "Recording... press Enter to stop").await?;
                flow.stop_recording()?;

                let choice =
                    prompt(&mut input, "Press Enter to continue, or r to record again").await?;
                if choice.trim().eq_ignore_ascii_case("r") {
                    flow.retake()?;
                    continue;
                }
                break;
            }

            if let Step::Results = flow.advance()? {
                break 'questions;
            }
        }

        // Results: one feedback request per answer, cached in the flow
        println!("\nYour results\n");

        let records: Vec<_> = flow.records().cloned().collect();
        for (i, record) in records.iter().enumerate() {
            println!("{}/{} {}", i + 1, records.len(), record.question.text);

            if flow.feedback_for(&record.question.id).is_none() {
                match api.request_feedback(&record.question.id, &record.clip).await {
                    Ok(feedback) => flow.store_feedback(feedback),
                    Err(e) => {
                        error!("Feedback request failed: {:#}", e);
                        println!("  Feedback is unavailable for this answer.\n");
                        continue;
                    }
                }
            }

            if let Some(feedback) = flow.feedback_for(&record.question.id) {
                print_feedback(feedback);
            }
        }

        let again = prompt(&mut input, "Start a new interview? [y/N]").await?;
        if !again.trim().eq_ignore_ascii_case("y") {
            break;
        }
        flow.restart();
    }

    Ok(())
}

async fn pick_categories(
    input: &mut Lines<BufReader<Stdin>>,
    categories: &[QuestionCategory],
) -> Result<Vec<String>> {
    println!("Categories:");
    for (i, category) in categories.iter().enumerate() {
        println!("  {:2}. {}", i + 1, category.label);
    }

    loop {
        let line = prompt(
            input,
            "Choose up to five categories by number, comma-separated (Enter for all)",
        )
        .await?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let picks: Option<Vec<usize>> = trimmed
            .split(',')
            .map(|part| part.trim().parse::<usize>().ok())
            .collect();

        match picks {
            Some(numbers)
                if numbers.len() <= MAX_CATEGORIES
                    && numbers.iter().all(|&n| n >= 1 && n <= categories.len()) =>
            {
                return Ok(numbers
                    .into_iter()
                    .map(|n| categories[n - 1].category_id.clone())
                    .collect());
            }
            _ => println!(
                "Enter up to {} numbers between 1 and {}.",
                MAX_CATEGORIES,
                categories.len()
            ),
        }
    }
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, message: &str) -> Result<String> {
    print!("{}: ", message);
    std::io::Write::flush(&mut std::io::stdout()).ok();

    Ok(input.next_line().await?.unwrap_or_default())
}

fn print_feedback(feedback: &AnswerFeedback) {
    let star = &feedback.star_feedback;
    print_component("Situation", &star.situation);
    print_component("Task", &star.task);
    print_component("Action", &star.action);
    print_component("Result", &star.result);
    println!();
}

fn print_component(name: &str, component: &FeedbackComponent) {
    println!("  {}", name);
    if !component.good.is_empty() {
        println!("    What you have done well: {}", component.good);
    }
    if !component.improvement.is_empty() {
        println!("    What you can improve: {}", component.improvement);
    }
}
