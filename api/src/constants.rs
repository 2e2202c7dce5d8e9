//! Application constants

/// Default display name returned by `GET /`
pub const DEFAULT_APP_NAME: &str = "Time Wasting Dwarf Fortress Videos";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default pool size for the Postgres store
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Only watch pages on this exact host are accepted
pub const VIDEO_HOST: &str = "www.youtube.com";

/// Path of a watch page
pub const WATCH_PATH: &str = "/watch";

/// Query parameter carrying the video identifier
pub const VIDEO_PARAM: &str = "v";

/// Column widths of the `videos` table
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_URL_LEN: usize = 200;
pub const MAX_VIDEO_ID_LEN: usize = 40;

// User-facing messages
pub const MSG_SAVED: &str = "New video saved!";
pub const MSG_INVALID_URL: &str = "Invalid video URL";
pub const MSG_CHECK_INPUT: &str = "Please check the data entered.";
pub const MSG_DUPLICATE: &str = "You already added that video.";
pub const MSG_STORE_FAILURE: &str = "Something went wrong saving the video. Please try again.";
pub const MSG_NO_VIDEOS: &str = "No videos were found";
