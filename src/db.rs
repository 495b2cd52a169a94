use sqlx::MySqlPool;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Creates the attendance collection if it does not exist yet.
///
/// Only the kiosk's equality pair is indexed. There is deliberately no
/// UNIQUE key on (employee_name, date, kind): the duplicate guard lives in
/// the submission flow, and two devices racing it can still write the same
/// event twice.
pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            id VARCHAR(36) PRIMARY KEY,
            employee_name VARCHAR(255) NOT NULL,
            job_position VARCHAR(255) NULL,
            kind VARCHAR(16) NOT NULL,
            `date` DATE NOT NULL,
            `time` TIME NOT NULL,
            `timestamp` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            formatted_date_time VARCHAR(32) NOT NULL,
            KEY idx_employee_date (employee_name, `date`)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
