//! Videos domain - DB queries for the catalog
//!
//! All functions use the generic Executor pattern, allowing them to work with
//! both `&PgPool` (for standalone queries) and `&mut PgConnection` (for transactions).

use sqlx::{Executor, Postgres};

use crate::models::{NewVideo, SearchTerm, VideoRecord};

/// Insert a video unless its `video_id` is already cataloged.
/// Returns `None` when the unique constraint turned the insert into a no-op.
pub async fn insert_video<'e, E>(
    executor: E,
    video: &NewVideo,
) -> Result<Option<VideoRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        INSERT INTO videos (name, source_url, notes, video_id)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (video_id) DO NOTHING
        RETURNING id, name, source_url, notes, video_id, created_at
        "#,
    )
    .bind(video.name())
    .bind(video.source_url())
    .bind(video.notes())
    .bind(video.video_id().as_str())
    .fetch_optional(executor)
    .await
}

/// List videos ordered by case-insensitive name, then insertion order.
/// `strpos` keeps `%` and `_` in the search term literal. `COLLATE "C"`
/// compares bytes, matching the in-memory store regardless of locale.
pub async fn list_videos<'e, E>(
    executor: E,
    search: Option<&SearchTerm>,
) -> Result<Vec<VideoRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        SELECT id, name, source_url, notes, video_id, created_at
        FROM videos
        WHERE $1::TEXT IS NULL OR strpos(LOWER(name), LOWER($1)) > 0
        ORDER BY LOWER(name) COLLATE "C" ASC, id ASC
        "#,
    )
    .bind(search.map(SearchTerm::as_str))
    .fetch_all(executor)
    .await
}

/// Count all cataloged videos
pub async fn count_videos<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::{MemoryVideoStore, VideoStore};
    use sqlx::Transaction;

    /// A transaction on an emptied `videos` table, rolled back on drop.
    /// Returns `None` (test skipped) when `DATABASE_URL` is not set.
    async fn empty_catalog_tx() -> Option<Transaction<'static, Postgres>> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres query test");
            return None;
        };

        let pool = crate::services::db::connect(&database_url, 1).await.unwrap();
        let mut tx = pool.begin().await.unwrap();
        sqlx::query("DELETE FROM videos").execute(&mut *tx).await.unwrap();
        Some(tx)
    }

    fn new_video(name: &str, id: &str) -> NewVideo {
        NewVideo::new(name, &format!("https://www.youtube.com/watch?v={}", id), None).unwrap()
    }

    fn names(videos: &[VideoRecord]) -> Vec<&str> {
        videos.iter().map(|v| v.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_duplicate_returns_none() {
        let Some(mut tx) = empty_catalog_tx().await else { return };

        let first = insert_video(&mut *tx, &new_video("ZXY", "dup123")).await.unwrap();
        assert_eq!(first.map(|v| v.video_id), Some("dup123".to_string()));

        let second = insert_video(&mut *tx, &new_video("Other", "dup123")).await.unwrap();
        assert_eq!(second, None);
        assert_eq!(count_videos(&mut *tx).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_order_matches_memory_store() {
        let Some(mut tx) = empty_catalog_tx().await else { return };
        let memory = MemoryVideoStore::new();

        let seed = ["ZXY", "abc", "AAA", "lmn", "ABC", "É", "a-c", "100% real"];
        for (i, name) in seed.iter().enumerate() {
            let video = new_video(name, &format!("ord{}", i));
            insert_video(&mut *tx, &video).await.unwrap();
            memory.insert_if_absent(&video).await.unwrap();
        }

        let listed = list_videos(&mut *tx, None).await.unwrap();
        assert_eq!(
            names(&listed),
            vec!["100% real", "a-c", "AAA", "abc", "ABC", "lmn", "ZXY", "É"]
        );

        let from_memory = memory.list(None).await.unwrap();
        assert_eq!(names(&listed), names(&from_memory));
    }

    #[tokio::test]
    async fn test_search_wildcards_are_literal() {
        let Some(mut tx) = empty_catalog_tx().await else { return };

        for (i, name) in ["100% real", "1000 real", "a_b", "axb"].iter().enumerate() {
            insert_video(&mut *tx, &new_video(name, &format!("lit{}", i))).await.unwrap();
        }

        let percent = SearchTerm::parse(Some("%"));
        let listed = list_videos(&mut *tx, percent.as_ref()).await.unwrap();
        assert_eq!(names(&listed), vec!["100% real"]);

        let underscore = SearchTerm::parse(Some("_"));
        let listed = list_videos(&mut *tx, underscore.as_ref()).await.unwrap();
        assert_eq!(names(&listed), vec!["a_b"]);

        let upper = SearchTerm::parse(Some("REAL"));
        let listed = list_videos(&mut *tx, upper.as_ref()).await.unwrap();
        assert_eq!(names(&listed), vec!["100% real", "1000 real"]);
    }
}
