//! Tests for database initialization and schema constraints

use dojo_common::db::init_database;

async fn scratch_pool() -> (sqlx::SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = init_database(&dir.path().join("test.db"))
        .await
        .expect("init_database");
    (pool, dir)
}

#[tokio::test]
async fn database_is_created_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fresh.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "database file was not created");
}

#[tokio::test]
async fn initialization_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("twice.db");

    let pool1 = init_database(&db_path).await.unwrap();
    drop(pool1);
    let pool2 = init_database(&db_path).await.unwrap();

    // Seeding must not duplicate the default batches on reopen
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM batches")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(count, 5, "expected the 5 default batches, got {}", count);
}

#[tokio::test]
async fn default_batches_are_seeded() {
    let (pool, _dir) = scratch_pool().await;

    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM batches ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(
        names,
        vec!["Batch 1", "Batch 2", "Batch 3", "Batch 4", "Batch A1"]
    );
}

#[tokio::test]
async fn admission_email_is_unique() {
    let (pool, _dir) = scratch_pool().await;

    let insert = "INSERT INTO admissions (first_name, last_name, email, phone) VALUES (?, ?, ?, ?)";

    sqlx::query(insert)
        .bind("A")
        .bind("One")
        .bind("a@x.com")
        .bind("9990001111")
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query(insert)
        .bind("B")
        .bind("Two")
        .bind("a@x.com")
        .bind("9990002222")
        .execute(&pool)
        .await;

    match duplicate {
        Err(sqlx::Error::Database(db)) => assert!(db.is_unique_violation()),
        other => panic!("expected unique violation, got {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "the duplicate must not create a row");
}

#[tokio::test]
async fn fees_txn_id_is_nullable_unique() {
    let (pool, _dir) = scratch_pool().await;

    let insert = "INSERT INTO fees_payments (full_name, phone, batch_name, centre, payment_datetime, status, txn_id) \
                  VALUES (?, ?, ?, ?, ?, ?, ?)";

    // Two rows without a txn id are fine
    for name in ["One", "Two"] {
        sqlx::query(insert)
            .bind(name)
            .bind("9990001111")
            .bind("Batch 1")
            .bind("ST.CRUZ")
            .bind("2026-01-01T10:00:00")
            .bind("Pending Verification")
            .bind(Option::<String>::None)
            .execute(&pool)
            .await
            .unwrap();
    }

    sqlx::query(insert)
        .bind("Three")
        .bind("9990001111")
        .bind("Batch 1")
        .bind("ST.CRUZ")
        .bind("2026-01-01T10:00:00")
        .bind("Pending Verification")
        .bind(Some("TXN-1"))
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query(insert)
        .bind("Four")
        .bind("9990001111")
        .bind("Batch 1")
        .bind("ST.CRUZ")
        .bind("2026-01-01T10:00:00")
        .bind("Pending Verification")
        .bind(Some("TXN-1"))
        .execute(&pool)
        .await;

    match duplicate {
        Err(sqlx::Error::Database(db)) => assert!(db.is_unique_violation()),
        other => panic!("expected unique violation, got {:?}", other),
    }
}
