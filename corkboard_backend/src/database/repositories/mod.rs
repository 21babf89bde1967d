mod posts;

use super::models::PostRecord;
use anyhow::Result;
use rusqlite::Connection;

pub trait PostRepository {
    fn create(&self, record: &PostRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<PostRecord>>;
    fn update(&self, record: &PostRecord) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    fn list_top_level(&self) -> Result<Vec<PostRecord>>;
    fn list_replies_of(&self, parent_id: &str) -> Result<Vec<PostRecord>>;
}

/// Borrowed view over the connection handing out repository implementations.
pub struct SqliteRepositories<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRepositories<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn posts(&self) -> impl PostRepository + '_ {
        posts::SqlitePostRepository { conn: self.conn }
    }
}
