//! Video catalog - create and list operations over a pluggable store
//!
//! `Catalog` is what routes talk to. It validates submissions through
//! [`NewVideo::new`] and leaves uniqueness to the store, which must make
//! "insert if `video_id` is absent" a single atomic step.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::{video_url::ValidationFailure, videos};
use crate::models::{DraftError, FieldError, NewVideo, SearchTerm, VideoRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Why a video was not added to the catalog
#[derive(Debug, Error)]
pub enum CreationFailure {
    #[error("invalid video URL: {0}")]
    InvalidUrl(ValidationFailure),

    #[error("invalid input: {0}")]
    InvalidInput(FieldError),

    #[error("video already in catalog")]
    DuplicateVideo,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DraftError> for CreationFailure {
    fn from(e: DraftError) -> Self {
        match e {
            DraftError::InvalidUrl(v) => CreationFailure::InvalidUrl(v),
            DraftError::InvalidInput(f) => CreationFailure::InvalidInput(f),
        }
    }
}

/// Backing store for cataloged videos
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert unless a record with the same `video_id` exists; `None` on conflict
    async fn insert_if_absent(&self, video: &NewVideo) -> Result<Option<VideoRecord>, StoreError>;

    /// Records matching `search`, ordered by lowercase name then `id`
    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<VideoRecord>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

pub struct PgVideoStore {
    db: PgPool,
}

impl PgVideoStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn insert_if_absent(&self, video: &NewVideo) -> Result<Option<VideoRecord>, StoreError> {
        Ok(videos::insert_video(&self.db, video).await?)
    }

    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<VideoRecord>, StoreError> {
        Ok(videos::list_videos(&self.db, search).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(videos::count_videos(&self.db).await?)
    }
}

/// In-process store used when no `DATABASE_URL` is configured
#[derive(Default)]
pub struct MemoryVideoStore {
    videos: RwLock<Vec<VideoRecord>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn insert_if_absent(&self, video: &NewVideo) -> Result<Option<VideoRecord>, StoreError> {
        // Check and push under one write lock
        let mut videos = self.videos.write().await;

        if videos.iter().any(|v| v.video_id == video.video_id().as_str()) {
            return Ok(None);
        }

        let record = VideoRecord {
            id: videos.last().map_or(1, |v| v.id + 1),
            name: video.name().to_string(),
            source_url: video.source_url().to_string(),
            notes: video.notes().map(str::to_string),
            video_id: video.video_id().to_string(),
            created_at: Utc::now(),
        };
        videos.push(record.clone());

        Ok(Some(record))
    }

    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<VideoRecord>, StoreError> {
        let videos = self.videos.read().await;

        let mut matching: Vec<VideoRecord> = videos
            .iter()
            .filter(|v| search.is_none_or(|term| term.matches(&v.name)))
            .cloned()
            .collect();
        // Byte order of the lowercased name, same as `COLLATE "C"` in Postgres
        matching.sort_by_cached_key(|v| (v.name.to_lowercase(), v.id));

        Ok(matching)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let len = self.videos.read().await.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }
}

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn VideoStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn VideoStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryVideoStore::new()))
    }

    /// Validate and store a new video. Nothing is written on failure.
    pub async fn create_video(
        &self,
        name: &str,
        source_url: &str,
        notes: Option<&str>,
    ) -> Result<VideoRecord, CreationFailure> {
        let video = NewVideo::new(name, source_url, notes)?;

        self.store
            .insert_if_absent(&video)
            .await?
            .ok_or(CreationFailure::DuplicateVideo)
    }

    /// All videos, or those whose name contains `search_term` ignoring case
    pub async fn list_videos(
        &self,
        search_term: Option<&str>,
    ) -> Result<Vec<VideoRecord>, StoreError> {
        let search = SearchTerm::parse(search_term);
        self.store.list(search.as_ref()).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.store.count().await
    }
}
