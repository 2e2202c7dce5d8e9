//! Shared data models used across modules

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::constants::{MAX_NAME_LEN, MAX_URL_LEN, MAX_VIDEO_ID_LEN};
use crate::domain::video_url::{self, ValidationFailure, VideoId};

/// A cataloged video as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VideoRecord {
    pub id: i64,
    pub name: String,
    pub source_url: String,
    pub notes: Option<String>,
    pub video_id: String,
    pub created_at: DateTime<Utc>,
}

/// A submitted field that is out of bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Name must be at most {max} characters.", max = MAX_NAME_LEN)]
    NameTooLong,

    #[error("URL must be at most {max} characters.", max = MAX_URL_LEN)]
    UrlTooLong,

    #[error("Video ID must be at most {max} characters.", max = MAX_VIDEO_ID_LEN)]
    VideoIdTooLong,
}

/// Reasons [`NewVideo::new`] refuses to build a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error(transparent)]
    InvalidUrl(#[from] ValidationFailure),

    #[error(transparent)]
    InvalidInput(#[from] FieldError),
}

/// A validated video ready to be inserted.
///
/// The only way to get one is [`NewVideo::new`], which derives `video_id`
/// from `source_url`, so every write path stores a derived identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    name: String,
    source_url: String,
    notes: Option<String>,
    video_id: VideoId,
}

impl NewVideo {
    pub fn new(name: &str, source_url: &str, notes: Option<&str>) -> Result<Self, DraftError> {
        let video_id = video_url::extract_video_id(source_url)?;

        if name.trim().is_empty() {
            return Err(FieldError::NameRequired.into());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(FieldError::NameTooLong.into());
        }
        if source_url.chars().count() > MAX_URL_LEN {
            return Err(FieldError::UrlTooLong.into());
        }
        if video_id.as_str().chars().count() > MAX_VIDEO_ID_LEN {
            return Err(FieldError::VideoIdTooLong.into());
        }

        Ok(Self {
            name: name.to_string(),
            source_url: source_url.to_string(),
            notes: notes.filter(|n| !n.trim().is_empty()).map(str::to_string),
            video_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }
}

/// A non-blank search term. Blank input means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.filter(|s| !s.trim().is_empty())
            .map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// Listing headline, e.g. "1 video" or "3 videos"
pub fn summarize_count(count: usize) -> String {
    match count {
        0 => crate::constants::MSG_NO_VIDEOS.to_string(),
        1 => "1 video".to_string(),
        n => format!("{} videos", n),
    }
}
