// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Usage counts via aggregation, prefix-boosted search, rename and transactional delete

use futures::TryStreamExt;
use sqlx::error::UnexpectedNullError;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{query::Query, Decode, Row, Sqlite, SqlitePool, Type};
use tracing::debug;
use zen_storage::StorageConfig;

use crate::error::{TagError, TagResult};
use crate::types::Tag;

const LIST_TAGS: &str = r#"
    SELECT
        t.tag_id,
        t.name,
        COUNT(DISTINCT nt.note_id) AS note_count
    FROM
        tags t
    LEFT JOIN
        note_tags nt ON t.tag_id = nt.tag_id
    GROUP BY
        t.tag_id, t.name
    ORDER BY
        note_count DESC,
        t.tag_id ASC
"#;

// Both LIKE patterns are bound to the escaped term.
const SEARCH_TAGS: &str = r#"
    SELECT
        t.tag_id,
        t.name,
        COUNT(DISTINCT nt.note_id) AS note_count
    FROM
        tags t
    LEFT JOIN
        note_tags nt ON t.tag_id = nt.tag_id
    WHERE
        t.name LIKE '%' || ? || '%' ESCAPE '\'
    GROUP BY
        t.tag_id, t.name
    ORDER BY
        CASE
            WHEN t.name LIKE ? || '%' ESCAPE '\' THEN 1
            ELSE 2
        END,
        note_count DESC,
        t.tag_id ASC
"#;

// Counts stay global: note_tags is not narrowed to the focus mode.
const LIST_TAGS_BY_FOCUS_MODE: &str = r#"
    SELECT
        t.tag_id,
        t.name,
        COUNT(DISTINCT nt.note_id) AS note_count
    FROM
        tags t
    LEFT JOIN
        note_tags nt ON t.tag_id = nt.tag_id
    JOIN
        focus_mode_tags f ON t.tag_id = f.tag_id
    WHERE
        f.focus_mode_id = ?
    GROUP BY
        t.tag_id, t.name
    ORDER BY
        t.tag_id ASC
"#;

const GET_TAG: &str = r#"
    SELECT
        t.tag_id,
        t.name,
        COUNT(DISTINCT nt.note_id) AS note_count
    FROM
        tags t
    LEFT JOIN
        note_tags nt ON t.tag_id = nt.tag_id
    WHERE
        t.tag_id = ?
    GROUP BY
        t.tag_id, t.name
"#;

/// Behaviour switches for [`TagStorage`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStorageOptions {
    /// Remove the tag's `focus_mode_tags` rows as part of [`TagStorage::delete_tag`].
    /// Off by default, which leaves those rows in place.
    pub prune_focus_mode_links: bool,
}

impl From<&StorageConfig> for TagStorageOptions {
    fn from(config: &StorageConfig) -> Self {
        Self {
            prune_focus_mode_links: config.prune_focus_mode_links,
        }
    }
}

pub struct TagStorage {
    pool: SqlitePool,
    options: TagStorageOptions,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_options(pool, TagStorageOptions::default())
    }

    pub fn with_options(pool: SqlitePool, options: TagStorageOptions) -> Self {
        Self { pool, options }
    }

    /// List every tag with its note count, most used first.
    ///
    /// On error the tags read so far are available through
    /// [`TagError::partial`].
    pub async fn list_tags(&self) -> TagResult<Vec<Tag>> {
        debug!("Listing all tags");
        self.fetch_tags(sqlx::query(LIST_TAGS)).await
    }

    /// Find tags whose name contains `term`.
    ///
    /// Names starting with `term` come first, then names containing it
    /// elsewhere; each group is ordered by note count descending. `%` and `_`
    /// in `term` match literally. Case folding follows SQLite's `LIKE`, which
    /// ignores ASCII case. An empty term matches every tag.
    pub async fn search_tags(&self, term: &str) -> TagResult<Vec<Tag>> {
        debug!("Searching tags for: {:?}", term);

        let pattern = escape_like(term);
        let query = sqlx::query(SEARCH_TAGS)
            .bind(pattern.clone())
            .bind(pattern);

        self.fetch_tags(query).await
    }

    /// List the tags linked to a focus mode, ordered by tag id.
    ///
    /// Note counts cover all notes, not only those visible in the focus mode.
    pub async fn list_tags_by_focus_mode(&self, focus_mode_id: i64) -> TagResult<Vec<Tag>> {
        debug!("Listing tags for focus mode: {}", focus_mode_id);
        self.fetch_tags(sqlx::query(LIST_TAGS_BY_FOCUS_MODE).bind(focus_mode_id))
            .await
    }

    /// Get a single tag with its note count.
    pub async fn get_tag(&self, tag_id: i64) -> TagResult<Option<Tag>> {
        debug!("Fetching tag: {}", tag_id);

        let row = sqlx::query(GET_TAG)
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| TagError::query("error retrieving tag", e, Vec::new()))?;

        row.map(|row| row_to_tag(&row))
            .transpose()
            .map_err(|e| TagError::scan("error scanning tag", e, Vec::new()))
    }

    /// Store a new name for `tag.tag_id`. `note_count` is ignored.
    ///
    /// Renaming an id that does not exist succeeds without changing anything.
    pub async fn rename_tag(&self, tag: &Tag) -> TagResult<()> {
        debug!("Renaming tag {} to {:?}", tag.tag_id, tag.name);

        sqlx::query(
            r#"
            UPDATE
                tags
            SET
                name = ?
            WHERE
                tag_id = ?
            "#,
        )
        .bind(&tag.name)
        .bind(tag.tag_id)
        .execute(&self.pool)
        .await
        .map_err(|e| TagError::exec("error updating tag", e))?;

        Ok(())
    }

    /// Delete a tag together with its note associations.
    ///
    /// Both deletes run in one transaction. The transaction rolls back when it
    /// is dropped without a commit, so any failed step leaves the store as it
    /// was. Deleting an id that does not exist succeeds.
    pub async fn delete_tag(&self, tag_id: i64) -> TagResult<()> {
        debug!("Deleting tag: {}", tag_id);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TagError::transaction("error starting transaction", e))?;

        let unlinked = sqlx::query("DELETE FROM note_tags WHERE tag_id = ?")
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TagError::exec("error deleting from note_tags", e))?;

        if self.options.prune_focus_mode_links {
            sqlx::query("DELETE FROM focus_mode_tags WHERE tag_id = ?")
                .bind(tag_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| TagError::exec("error deleting from focus_mode_tags", e))?;
        }

        let deleted = sqlx::query("DELETE FROM tags WHERE tag_id = ?")
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TagError::exec("error deleting from tags", e))?;

        tx.commit()
            .await
            .map_err(|e| TagError::transaction("error committing transaction", e))?;

        debug!(
            "Deleted tag {} ({} rows, {} note links)",
            tag_id,
            deleted.rows_affected(),
            unlinked.rows_affected()
        );
        Ok(())
    }

    /// Drain a tag query row by row, keeping what was read if a row fails.
    async fn fetch_tags<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> TagResult<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut rows = query.fetch(&self.pool);

        loop {
            match rows.try_next().await {
                Ok(Some(row)) => match row_to_tag(&row) {
                    Ok(tag) => tags.push(tag),
                    Err(e) => return Err(TagError::scan("error scanning tag", e, tags)),
                },
                Ok(None) => break,
                Err(e) => return Err(TagError::query("error retrieving tags", e, tags)),
            }
        }

        Ok(tags)
    }
}

fn row_to_tag(row: &SqliteRow) -> Result<Tag, sqlx::Error> {
    Ok(Tag {
        tag_id: get_required(row, "tag_id")?,
        name: get_required(row, "name")?,
        note_count: get_required(row, "note_count")?,
    })
}

/// Read a column that must hold a value. SQLite hands NULL back as an empty
/// or zero value for plain `String`/`i64`, so NULL is rejected explicitly.
fn get_required<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(column)?
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(UnexpectedNullError),
        })
}

/// Escape `LIKE` wildcards so the term matches as a literal substring.
/// Pairs with `ESCAPE '\'` in the search query.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("work"), "work");
        assert_eq!(escape_like(""), "");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("to_do"), "to\\_do");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_options_from_config() {
        let config = StorageConfig {
            prune_focus_mode_links: true,
            ..StorageConfig::default()
        };
        assert!(TagStorageOptions::from(&config).prune_focus_mode_links);
        assert!(!TagStorageOptions::default().prune_focus_mode_links);
    }
}
