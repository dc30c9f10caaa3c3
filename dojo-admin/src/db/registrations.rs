//! Tournament and exam sign-up operations
//!
//! Listings join the parent event so callers get the title/date alongside
//! the registrant.

use dojo_common::db::models::{ExamRegistration, TournamentRegistration};
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

const TOURNAMENT_SELECT: &str = r#"
    SELECT tr.id, tr.tournament_id, tr.name, tr.email, tr.phone, tr.centre,
           tr.batch, tr.created_at,
           t.title AS tournament_title, t.date AS tournament_date
    FROM tournament_registrations tr
    JOIN tournaments t ON tr.tournament_id = t.id
"#;

const EXAM_SELECT: &str = r#"
    SELECT er.id, er.exam_id, er.name, er.email, er.phone, er.centre,
           er.batch, er.created_at,
           e.title AS exam_title, e.date AS exam_date, e.belt AS exam_belt
    FROM exam_registrations er
    JOIN exams e ON er.exam_id = e.id
"#;

pub async fn insert_tournament_registration(
    pool: &SqlitePool,
    tournament_id: i64,
    name: &str,
    email: &str,
    phone: &str,
    centre: &str,
    batch: &str,
) -> Result<TournamentRegistration> {
    let result = sqlx::query(
        r#"
        INSERT INTO tournament_registrations (tournament_id, name, email, phone, centre, batch)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(tournament_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(centre)
    .bind(batch)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let sql = format!("{} WHERE tr.id = ?", TOURNAMENT_SELECT);
    let row = sqlx::query_as::<_, TournamentRegistration>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| Error::Internal(format!("Inserted tournament registration {} not found", id)))
}

pub async fn list_tournament_registrations(
    pool: &SqlitePool,
) -> Result<Vec<TournamentRegistration>> {
    let sql = format!("{} ORDER BY tr.created_at DESC", TOURNAMENT_SELECT);
    let rows = sqlx::query_as::<_, TournamentRegistration>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn delete_tournament_registration(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tournament_registrations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn insert_exam_registration(
    pool: &SqlitePool,
    exam_id: i64,
    name: &str,
    email: &str,
    phone: &str,
    centre: &str,
    batch: &str,
) -> Result<ExamRegistration> {
    let result = sqlx::query(
        r#"
        INSERT INTO exam_registrations (exam_id, name, email, phone, centre, batch)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(exam_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(centre)
    .bind(batch)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let sql = format!("{} WHERE er.id = ?", EXAM_SELECT);
    let row = sqlx::query_as::<_, ExamRegistration>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| Error::Internal(format!("Inserted exam registration {} not found", id)))
}

pub async fn list_exam_registrations(pool: &SqlitePool) -> Result<Vec<ExamRegistration>> {
    let sql = format!("{} ORDER BY er.created_at DESC", EXAM_SELECT);
    let rows = sqlx::query_as::<_, ExamRegistration>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn delete_exam_registration(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM exam_registrations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
