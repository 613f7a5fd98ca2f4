use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_progress::clock::{Clock, SystemClock};
use study_progress::config::Config;
use study_progress::db::{self, SqliteStore};
use study_progress::error::EngineError;
use study_progress::services::ProgressService;

#[derive(Parser)]
#[command(name = "study-progress", about = "Spaced repetition and study progress tracker", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Record a flashcard review and print the next schedule
  Review {
    card_id: i64,
    /// Recall quality, 0 (blackout) to 5 (perfect)
    quality: u8,
  },

  /// Print every review of a flashcard, newest first
  History { card_id: i64 },

  /// Record a topic revision with a self-reported confidence
  Revise {
    topic_id: i64,
    /// Confidence level, 0 to 100
    confidence: u8,
  },

  /// Log a study session that just ended
  Session { topic_id: i64, minutes: u32 },

  /// Create a topic
  Topic { name: String },

  /// Add a pending deadline
  Deadline {
    title: String,
    /// Due date as YYYY-MM-DD
    due_date: NaiveDate,
  },

  /// Mark a deadline as completed
  Complete { deadline_id: i64 },

  /// List flashcards due today, most overdue first
  Due,

  /// Show difficulty and predicted mastery of one topic, or all topics
  Snapshot { topic_id: Option<i64> },

  /// Show the current and longest activity streak
  Streak,

  /// Print ranked study recommendations
  Recommend,
}

fn print_json<T: Serialize>(value: &T) {
  match serde_json::to_string_pretty(value) {
    Ok(json) => println!("{}", json),
    Err(e) => tracing::error!("Could not serialize output: {}", e),
  }
}

fn run(command: Command, service: &ProgressService<SqliteStore, SystemClock>) -> Result<(), EngineError> {
  match command {
    Command::Review { card_id, quality } => print_json(&service.record_review(card_id, quality)?),
    Command::History { card_id } => print_json(&service.review_history(card_id)?),
    Command::Revise { topic_id, confidence } => {
      print_json(&service.record_revision(topic_id, confidence)?)
    }
    Command::Session { topic_id, minutes } => {
      let id = service.log_session(topic_id, minutes)?;
      print_json(&serde_json::json!({ "session_id": id, "topic_id": topic_id, "minutes": minutes }))
    }
    Command::Topic { name } => {
      let id = service.store().add_topic(&name, SystemClock.now())?;
      tracing::info!(topic_id = id, "Created topic {}", name);
      print_json(&serde_json::json!({ "topic_id": id, "name": name }))
    }
    Command::Deadline { title, due_date } => {
      let id = service.store().add_deadline(&title, due_date)?;
      tracing::info!(deadline_id = id, %due_date, "Added deadline {}", title);
      print_json(&serde_json::json!({ "deadline_id": id, "title": title, "due_date": due_date }))
    }
    Command::Complete { deadline_id } => {
      let updated = service.store().complete_deadline(deadline_id)?;
      if !updated {
        tracing::warn!("No deadline with id {}", deadline_id);
      }
      print_json(&serde_json::json!({ "deadline_id": deadline_id, "completed": updated }))
    }
    Command::Due => print_json(&service.due_cards()?),
    Command::Snapshot { topic_id: Some(id) } => print_json(&service.topic_progress(id)?),
    Command::Snapshot { topic_id: None } => print_json(&service.all_topic_progress()?),
    Command::Streak => print_json(&service.streak()?),
    Command::Recommend => print_json(&service.recommendations()?),
  }
  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  let config = Config::load();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter.as_str().into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let pool = match db::init_db(&config.database_path) {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!("Failed to open {}: {}", config.database_path.display(), e);
      return ExitCode::FAILURE;
    }
  };
  tracing::debug!("Using database at {}", config.database_path.display());

  let service = ProgressService::new(SqliteStore::new(pool), SystemClock, config.utc_offset());

  match run(cli.command, &service) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{}", e);
      eprintln!("error: {}", e);
      ExitCode::FAILURE
    }
  }
}
