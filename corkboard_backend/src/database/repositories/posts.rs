use crate::database::models::PostRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(super) struct SqlitePostRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

fn map_post_row(row: &Row<'_>) -> rusqlite::Result<PostRecord> {
    Ok(PostRecord {
        id: row.get(0)?,
        poster_name: row.get(1)?,
        content: row.get(2)?,
        reply_to_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl<'conn> super::PostRepository for SqlitePostRepository<'conn> {
    fn create(&self, record: &PostRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO posts (id, poster_name, content, reply_to_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.id,
                record.poster_name,
                record.content,
                record.reply_to_id,
                record.created_at,
                record.updated_at
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<PostRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, poster_name, content, reply_to_id, created_at, updated_at
                FROM posts
                WHERE id = ?1
                "#,
                params![id],
                map_post_row,
            )
            .optional()?)
    }

    fn update(&self, record: &PostRecord) -> Result<()> {
        self.conn.execute(
            r#"
            UPDATE posts
            SET poster_name = ?2, content = ?3, reply_to_id = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                record.id,
                record.poster_name,
                record.content,
                record.reply_to_id,
                record.updated_at
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn list_top_level(&self) -> Result<Vec<PostRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, poster_name, content, reply_to_id, created_at, updated_at
            FROM posts
            WHERE reply_to_id IS NULL
            ORDER BY datetime(created_at) DESC
            "#,
        )?;
        let rows = stmt.query_map([], map_post_row)?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    fn list_replies_of(&self, parent_id: &str) -> Result<Vec<PostRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, poster_name, content, reply_to_id, created_at, updated_at
            FROM posts
            WHERE reply_to_id = ?1
            ORDER BY datetime(created_at) DESC
            "#,
        )?;
        let rows = stmt.query_map(params![parent_id], map_post_row)?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }
}
