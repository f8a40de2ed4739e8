use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use super::{CredentialStore, StoreError};
use crate::models::Identity;

/// PostgreSQL error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code for undefined_table
const UNDEFINED_TABLE: &str = "42P01";

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(50) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// `users` table in PostgreSQL
pub struct PgCredentialStore {
    pool: PgPool,
    schema_ready: OnceCell<()>,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }
}

fn has_code(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        // Only a successful run is memoized; a failure is retried next call
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
                tracing::info!("users table ready");
                Ok::<(), sqlx::Error>(())
            })
            .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let result = sqlx::query_as::<_, Identity>(
            r#"
            SELECT username, password_hash FROM users WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(identity) => Ok(identity),
            // No registration has happened yet, so nobody exists
            Err(e) if has_code(&e, UNDEFINED_TABLE) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, identity: &Identity) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash) VALUES ($1, $2)
            "#,
        )
        .bind(&identity.username)
        .bind(&identity.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if has_code(&e, UNIQUE_VIOLATION) {
                StoreError::Conflict
            } else {
                StoreError::from(e)
            }
        })?;

        Ok(())
    }
}
