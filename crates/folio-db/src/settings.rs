//! Settings repository: the flat key-value table behind the scalar
//! profile fields.

use std::collections::HashMap;

use sqlx::{Pool, Postgres, Row, Transaction};

use folio_core::Result;

/// PostgreSQL settings repository.
///
/// The key set is fixed (seeded by migration); writes are update-only.
/// A key missing from the table is not auto-created: the write silently
/// affects zero rows, matching the source system's behavior.
pub struct PgSettingsRepository {
    pool: Pool<Postgres>,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch every settings row in one query.
    ///
    /// Callers resolve individual keys against the returned map; a key
    /// absent from the table reads as an empty string at that layer.
    pub async fn read_all(&self) -> Result<HashMap<String, String>> {
        let rows = sqlx::query("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("key"), row.get("value")))
            .collect())
    }

    /// Update one key inside the enclosing save transaction.
    pub async fn update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        value: &str,
    ) -> Result<()> {
        sqlx::query("UPDATE settings SET value = $2 WHERE key = $1")
            .bind(key)
            .bind(value)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
