use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Every statement is IF NOT EXISTS, so reopening an existing database is a no-op
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS topics (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL UNIQUE,
      created_at TEXT NOT NULL
    );

    -- Append-only: one row per review event, latest row per card wins
    CREATE TABLE IF NOT EXISTS flashcard_reviews (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      card_id INTEGER NOT NULL,
      quality INTEGER NOT NULL,
      ease_factor REAL NOT NULL,
      interval_days INTEGER NOT NULL,
      repetitions INTEGER NOT NULL,
      next_review_date TEXT NOT NULL,
      reviewed_at TEXT NOT NULL
    );

    -- Append-only: one row per revision event
    CREATE TABLE IF NOT EXISTS topic_revisions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      topic_id INTEGER NOT NULL,
      revision_number INTEGER NOT NULL,
      revision_date TEXT NOT NULL,
      confidence_level INTEGER NOT NULL,
      next_revision_date TEXT NOT NULL,
      recorded_at TEXT NOT NULL,
      FOREIGN KEY (topic_id) REFERENCES topics(id),
      UNIQUE (topic_id, revision_number)
    );

    CREATE TABLE IF NOT EXISTS study_sessions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      topic_id INTEGER NOT NULL,
      started_at TEXT NOT NULL,
      duration_minutes INTEGER NOT NULL,
      FOREIGN KEY (topic_id) REFERENCES topics(id)
    );

    CREATE TABLE IF NOT EXISTS deadlines (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      due_date TEXT NOT NULL,
      status TEXT NOT NULL DEFAULT 'pending'
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_flashcard_reviews_card_id ON flashcard_reviews(card_id);
    CREATE INDEX IF NOT EXISTS idx_topic_revisions_topic_id ON topic_revisions(topic_id);
    CREATE INDEX IF NOT EXISTS idx_study_sessions_topic_id ON study_sessions(topic_id);
    CREATE INDEX IF NOT EXISTS idx_study_sessions_started_at ON study_sessions(started_at);
    CREATE INDEX IF NOT EXISTS idx_deadlines_due_date ON deadlines(due_date);
    "#,
  )?;

  Ok(())
}
