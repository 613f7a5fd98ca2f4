//! Deadlines read by the recommender

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result, Row};

use super::{date_column, format_date};
use crate::domain::{Deadline, DeadlineStatus};

pub fn insert_deadline(
    conn: &Connection,
    title: &str,
    due_date: NaiveDate,
    status: DeadlineStatus,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO deadlines (title, due_date, status) VALUES (?1, ?2, ?3)",
        params![title, format_date(due_date), status.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_deadline_status(conn: &Connection, id: i64, status: DeadlineStatus) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE deadlines SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(updated > 0)
}

/// Deadlines due between `from` and `to`, both inclusive, in due order
pub fn get_deadlines_between(conn: &Connection, from: NaiveDate, to: NaiveDate) -> Result<Vec<Deadline>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, title, due_date, status
    FROM deadlines
    WHERE due_date >= ?1 AND due_date <= ?2
    ORDER BY due_date, id
    "#,
    )?;

    let deadlines = stmt
        .query_map(params![format_date(from), format_date(to)], |row| {
            Ok(Deadline {
                id: row.get(0)?,
                title: row.get(1)?,
                due_date: date_column(row, 2)?,
                status: status_column(row, 3)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(deadlines)
}

fn status_column(row: &Row, idx: usize) -> Result<DeadlineStatus> {
    let raw: String = row.get(idx)?;
    DeadlineStatus::from_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown deadline status '{}'", raw).into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn range_is_inclusive() {
        let env = TestEnv::new().unwrap();
        insert_deadline(&env.conn, "Essay", day(1), DeadlineStatus::Pending).unwrap();
        insert_deadline(&env.conn, "Exam", day(8), DeadlineStatus::Pending).unwrap();
        insert_deadline(&env.conn, "Quiz", day(9), DeadlineStatus::Pending).unwrap();

        let titles: Vec<String> = get_deadlines_between(&env.conn, day(1), day(8))
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["Essay", "Exam"]);
    }

    #[test]
    fn status_update() {
        let env = TestEnv::new().unwrap();
        let id = insert_deadline(&env.conn, "Essay", day(3), DeadlineStatus::Pending).unwrap();
        assert!(set_deadline_status(&env.conn, id, DeadlineStatus::Completed).unwrap());
        assert!(!set_deadline_status(&env.conn, 999, DeadlineStatus::Completed).unwrap());

        let deadlines = get_deadlines_between(&env.conn, day(1), day(31)).unwrap();
        assert_eq!(deadlines[0].status, DeadlineStatus::Completed);
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        let env = TestEnv::new().unwrap();
        env.conn
            .execute(
                "INSERT INTO deadlines (title, due_date, status) VALUES ('Essay', '2025-03-03', 'archived')",
                [],
            )
            .unwrap();

        let err = get_deadlines_between(&env.conn, day(1), day(31)).unwrap_err();
        assert!(matches!(err, rusqlite::Error::FromSqlConversionFailure(3, Type::Text, _)));
    }
}
