//! MySQL-backed image catalog.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::{DataAccessError, ImageId, ImageRecord};
use crate::repository::ImageSource;

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: i32,
    path: String,
    filename: String,
}

impl From<ImageRow> for ImageRecord {
    fn from(row: ImageRow) -> Self {
        ImageRecord {
            id: row.id,
            storage_path: row.path,
            filename: row.filename,
        }
    }
}

/// `IN (?, ?, …)` with one placeholder per id.
fn in_clause(len: usize) -> String {
    vec!["?"; len].join(", ")
}

/// [`ImageSource`] over the `lgtm_images` table.
#[derive(Debug, Clone)]
pub struct MySqlImageSource {
    pool: MySqlPool,
}

impl MySqlImageSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build the shared pool. Connections are opened on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ImageSource for MySqlImageSource {
    async fn list_image_ids(&self) -> Result<Vec<ImageId>, DataAccessError> {
        let ids = sqlx::query_scalar::<_, i32>("SELECT id FROM lgtm_images ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn list_images(&self, ids: &[ImageId]) -> Result<Vec<ImageRecord>, DataAccessError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, path, filename FROM lgtm_images WHERE id IN ({})",
            in_clause(ids.len())
        );
        let mut query = sqlx::query_as::<_, ImageRow>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ImageRecord::from).collect())
    }

    async fn list_recently_created(&self, limit: u32) -> Result<Vec<ImageRecord>, DataAccessError> {
        let rows = sqlx::query_as::<_, ImageRow>(
            "SELECT id, path, filename FROM lgtm_images ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ImageRecord::from).collect())
    }
}
