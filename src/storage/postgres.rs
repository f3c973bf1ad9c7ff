use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use super::Storage;
use crate::models::{Paste, PasteRef};

const SCHEMA: &str = include_str!("../../assets/schema.sql");

#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect to a database by URL.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the paste schema and table if they are missing.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        self.pool.execute(SCHEMA).await?;
        Ok(())
    }
}

impl Storage for PgStorage {
    async fn insert_paste(
        &mut self,
        user_id: &str,
        paste: &str,
        paste_id: &str,
    ) -> crate::ApiResult<Paste> {
        let paste = sqlx::query_as::<_, Paste>(
            "INSERT INTO text_schema.pastes (user_id, paste, paste_id, time) \
             VALUES ($1, $2, $3, now()) RETURNING user_id, paste, paste_id, time",
        )
        .bind(user_id)
        .bind(paste)
        .bind(paste_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn latest_paste(&mut self, user_id: &str) -> crate::ApiResult<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT user_id, paste, paste_id, time FROM text_schema.pastes \
             WHERE user_id = $1 ORDER BY time DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn list_pastes(&mut self, user_id: &str) -> crate::ApiResult<Vec<PasteRef>> {
        let pastes = sqlx::query_as::<_, PasteRef>(
            "SELECT user_id, paste_id FROM text_schema.pastes \
             WHERE user_id = $1 ORDER BY time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pastes)
    }

    async fn find_paste(
        &mut self,
        paste_id: &str,
        user_id: &str,
    ) -> crate::ApiResult<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT user_id, paste, paste_id, time FROM text_schema.pastes \
             WHERE paste_id = $1 ORDER BY (user_id = $2) DESC, time DESC LIMIT 1",
        )
        .bind(paste_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }

    async fn delete_paste(&mut self, paste_id: &str, user_id: &str) -> crate::ApiResult<u64> {
        let result =
            sqlx::query("DELETE FROM text_schema.pastes WHERE paste_id = $1 AND user_id = $2")
                .bind(paste_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn paste_exists(&mut self, paste_id: &str) -> crate::ApiResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM text_schema.pastes WHERE paste_id = $1)",
        )
        .bind(paste_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
