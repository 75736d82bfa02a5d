//! Project repository.

use sqlx::{Pool, Postgres, Row, Transaction};

use folio_core::Result;

/// A project row as stored: tech comma-joined, image column holding a
/// UTF-8 public path or the raw payload depending on the image mode.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub tech: String,
    pub img: Vec<u8>,
}

/// PostgreSQL project repository.
pub struct PgProjectRepository {
    pool: Pool<Postgres>,
}

impl PgProjectRepository {
    /// Create a new PgProjectRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all projects in id (insertion) order.
    pub async fn list(&self) -> Result<Vec<ProjectRow>> {
        let rows = sqlx::query("SELECT id, title, tech, img FROM project ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(project_from_row).collect())
    }

    /// List all projects inside the save transaction.
    pub async fn list_tx(&self, tx: &mut Transaction<'_, Postgres>) -> Result<Vec<ProjectRow>> {
        let rows = sqlx::query("SELECT id, title, tech, img FROM project ORDER BY id")
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(project_from_row).collect())
    }

    /// Delete the given ids.
    pub async fn delete_tx(&self, tx: &mut Transaction<'_, Postgres>, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query("DELETE FROM project WHERE id = ANY($1)")
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
        title: &str,
        tech: &str,
        img: &[u8],
    ) -> Result<()> {
        sqlx::query("UPDATE project SET title = $2, tech = $3, img = $4 WHERE id = $1")
            .bind(id)
            .bind(title)
            .bind(tech)
            .bind(img)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Insert a new row, returning the server-assigned id.
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        title: &str,
        tech: &str,
        img: &[u8],
    ) -> Result<i64> {
        let row =
            sqlx::query("INSERT INTO project (title, tech, img) VALUES ($1, $2, $3) RETURNING id")
                .bind(title)
                .bind(tech)
                .bind(img)
                .fetch_one(&mut **tx)
                .await?;
        Ok(row.get("id"))
    }
}

fn project_from_row(row: sqlx::postgres::PgRow) -> ProjectRow {
    ProjectRow {
        id: row.get("id"),
        title: row.get("title"),
        tech: row.get("tech"),
        img: row.get("img"),
    }
}
