//! Domain logic - URL validation and DB queries

pub mod video_url;
pub mod videos;
