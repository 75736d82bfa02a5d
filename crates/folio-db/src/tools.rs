//! Tool repository.

use sqlx::{Pool, Postgres, Row, Transaction};

use folio_core::Result;

/// A tool row as stored.
///
/// `icon` holds either a UTF-8 public path or the raw image payload,
/// depending on the deployment's image mode.
#[derive(Debug, Clone)]
pub struct ToolRow {
    pub id: i64,
    pub name: String,
    pub icon: Vec<u8>,
}

/// PostgreSQL tool repository.
pub struct PgToolRepository {
    pool: Pool<Postgres>,
}

impl PgToolRepository {
    /// Create a new PgToolRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all tools in id (insertion) order.
    pub async fn list(&self) -> Result<Vec<ToolRow>> {
        let rows = sqlx::query("SELECT id, name, icon FROM tool ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(tool_from_row).collect())
    }

    /// List all tools inside the save transaction (the reconciler's view
    /// of the existing rows).
    pub async fn list_tx(&self, tx: &mut Transaction<'_, Postgres>) -> Result<Vec<ToolRow>> {
        let rows = sqlx::query("SELECT id, name, icon FROM tool ORDER BY id")
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(tool_from_row).collect())
    }

    /// Delete the given ids.
    pub async fn delete_tx(&self, tx: &mut Transaction<'_, Postgres>, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query("DELETE FROM tool WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Update an existing row in place.
    pub async fn update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        name: &str,
        icon: &[u8],
    ) -> Result<()> {
        sqlx::query("UPDATE tool SET name = $2, icon = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(icon)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Insert a new row, returning the server-assigned id.
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        icon: &[u8],
    ) -> Result<i64> {
        let row = sqlx::query("INSERT INTO tool (name, icon) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(icon)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("id"))
    }
}

fn tool_from_row(row: sqlx::postgres::PgRow) -> ToolRow {
    ToolRow {
        id: row.get("id"),
        name: row.get("name"),
        icon: row.get("icon"),
    }
}
