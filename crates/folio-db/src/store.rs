//! Database-mode portfolio store: the repository aggregate, the read
//! model assembler, and the save-path reconciliation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use folio_core::defaults::{
    PROJECT_IMAGES_SUBDIR, SETTING_ABOUT_ME, SETTING_EDUCATION_MAJOR, SETTING_EDUCATION_PERIOD,
    SETTING_EDUCATION_UNIVERSITY, TOOL_IMAGES_SUBDIR,
};
use folio_core::image::{decode_inline, encode_inline};
use folio_core::{
    join_tech, split_tech, Education, ImageMode, PortfolioDocument, PortfolioStore, Project,
    Result, Tool,
};

use crate::pool::{create_pool, create_pool_with_config, PoolConfig};
use crate::projects::PgProjectRepository;
use crate::reconcile;
use crate::settings::PgSettingsRepository;
use crate::tools::PgToolRepository;
use crate::uploads::{slugify, UploadStore};

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: PgPool,
    /// Settings repository for the scalar profile fields.
    pub settings: PgSettingsRepository,
    /// Tool repository.
    pub tools: PgToolRepository,
    /// Project repository.
    pub projects: PgProjectRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            settings: PgSettingsRepository::new(pool.clone()),
            tools: PgToolRepository::new(pool.clone()),
            projects: PgProjectRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| folio_core::Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

/// Render a stored image column value into the form the presentation
/// layer expects for the active image mode.
fn render_stored_image(stored: &[u8], mode: ImageMode) -> String {
    match mode {
        ImageMode::FilesystemPath => String::from_utf8_lossy(stored).into_owned(),
        ImageMode::InlineBlob => match stored_path(stored) {
            // A picker path that landed in a blob-mode column stays a path.
            Some(path) => path.to_string(),
            None => encode_inline(stored).unwrap_or_default(),
        },
    }
}

/// Interpret a stored column value as a public path, if it is one.
fn stored_path(stored: &[u8]) -> Option<&str> {
    std::str::from_utf8(stored).ok().filter(|s| s.starts_with('/'))
}

/// Database-mode implementation of the portfolio store.
pub struct PgPortfolioStore {
    db: Database,
    uploads: UploadStore,
    image_mode: ImageMode,
}

impl PgPortfolioStore {
    /// Create a store over the given database, upload store, and image mode.
    pub fn new(db: Database, uploads: UploadStore, image_mode: ImageMode) -> Self {
        Self {
            db,
            uploads,
            image_mode,
        }
    }

    /// Resolve a submitted image reference into the stored column value.
    ///
    /// An inline reference is a new upload: in path mode it is persisted
    /// as a file and the path is stored; in blob mode the raw payload is
    /// stored. Anything else (a path, or empty) passes through unchanged.
    async fn resolve_image(&self, reference: &str, subdir: &str, slug: &str) -> Result<Vec<u8>> {
        match decode_inline(reference) {
            Some(bytes) => match self.image_mode {
                ImageMode::FilesystemPath => {
                    let path = self.uploads.store_item_image(subdir, slug, &bytes).await?;
                    Ok(path.into_bytes())
                }
                ImageMode::InlineBlob => Ok(bytes),
            },
            None => Ok(reference.as_bytes().to_vec()),
        }
    }

    /// Best-effort cleanup of a doomed row's stored file. Blob payloads
    /// have no file; deletion failures are logged, never fatal.
    async fn cleanup_stored_image(&self, stored: &[u8]) {
        let Some(path) = stored_path(stored) else {
            return;
        };
        if let Err(e) = self.uploads.remove_public(path).await {
            warn!(path = %path, error = %e, "failed to delete stored image, continuing");
        }
    }

    async fn reconcile_tools(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tools: &[Tool],
    ) -> Result<()> {
        let existing = self.db.tools.list_tx(tx).await?;
        let existing_ids: Vec<i64> = existing.iter().map(|row| row.id).collect();
        let submitted = reconcile::submitted_ids(tools.iter().map(|t| t.id));
        let doomed = reconcile::ids_to_delete(&existing_ids, &submitted);

        for row in existing.iter().filter(|row| doomed.contains(&row.id)) {
            self.cleanup_stored_image(&row.icon).await;
        }
        self.db.tools.delete_tx(tx, &doomed).await?;

        for tool in tools {
            let icon = self
                .resolve_image(&tool.icon, TOOL_IMAGES_SUBDIR, &slugify(&tool.name))
                .await?;
            match tool.id {
                Some(id) => self.db.tools.update_tx(tx, id, &tool.name, &icon).await?,
                None => {
                    let id = self.db.tools.insert_tx(tx, &tool.name, &icon).await?;
                    debug!(tool = %tool.name, id, "inserted tool");
                }
            }
        }
        Ok(())
    }

    async fn reconcile_projects(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        projects: &[Project],
    ) -> Result<()> {
        let existing = self.db.projects.list_tx(tx).await?;
        let existing_ids: Vec<i64> = existing.iter().map(|row| row.id).collect();
        let submitted = reconcile::submitted_ids(projects.iter().map(|p| p.id));
        let doomed = reconcile::ids_to_delete(&existing_ids, &submitted);

        for row in existing.iter().filter(|row| doomed.contains(&row.id)) {
            self.cleanup_stored_image(&row.img).await;
        }
        self.db.projects.delete_tx(tx, &doomed).await?;

        for project in projects {
            let tech = join_tech(&project.tech);
            let img = self
                .resolve_image(
                    &project.img_src,
                    PROJECT_IMAGES_SUBDIR,
                    &slugify(&project.title),
                )
                .await?;
            match project.id {
                Some(id) => {
                    self.db
                        .projects
                        .update_tx(tx, id, &project.title, &tech, &img)
                        .await?
                }
                None => {
                    let id = self
                        .db
                        .projects
                        .insert_tx(tx, &project.title, &tech, &img)
                        .await?;
                    debug!(project = %project.title, id, "inserted project");
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn load(&self) -> Result<PortfolioDocument> {
        let settings = self.db.settings.read_all().await?;
        let setting = |key: &str| settings.get(key).cloned().unwrap_or_default();

        let tools = self
            .db
            .tools
            .list()
            .await?
            .into_iter()
            .map(|row| Tool {
                id: Some(row.id),
                name: row.name,
                icon: render_stored_image(&row.icon, self.image_mode),
            })
            .collect();

        let projects = self
            .db
            .projects
            .list()
            .await?
            .into_iter()
            .map(|row| Project {
                id: Some(row.id),
                title: row.title,
                tech: split_tech(&row.tech),
                img_src: render_stored_image(&row.img, self.image_mode),
            })
            .collect();

        Ok(PortfolioDocument {
            about_me: setting(SETTING_ABOUT_ME),
            education: Education {
                university: setting(SETTING_EDUCATION_UNIVERSITY),
                major: setting(SETTING_EDUCATION_MAJOR),
                period: setting(SETTING_EDUCATION_PERIOD),
            },
            tools,
            projects,
        })
    }

    async fn save(&self, document: PortfolioDocument) -> Result<()> {
        let mut tx = self.db.pool.begin().await?;

        let entries = [
            (SETTING_ABOUT_ME, document.about_me.as_str()),
            (
                SETTING_EDUCATION_UNIVERSITY,
                document.education.university.as_str(),
            ),
            (SETTING_EDUCATION_MAJOR, document.education.major.as_str()),
            (
                SETTING_EDUCATION_PERIOD,
                document.education.period.as_str(),
            ),
        ];
        for (key, value) in entries {
            self.db.settings.update_tx(&mut tx, key, value).await?;
        }

        self.reconcile_tools(&mut tx, &document.tools).await?;
        self.reconcile_projects(&mut tx, &document.projects).await?;

        tx.commit().await?;
        Ok(())
    }
}
