//! Article byline access.
//!
//! Only what the bio cascade needs: create, read by author, and set a
//! missing author name.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::domain::{Article, ArticleId, BioId, NewArticle};

use super::{ensure_reference, Store, StoreResult};

const COLUMNS: &str = "id, title, author_id, author_name";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        author_name: row.get(3)?,
    })
}

pub(crate) fn by_author(conn: &Connection, author: BioId) -> rusqlite::Result<Vec<Article>> {
    let sql = format!(
        "SELECT {} FROM articles WHERE author_id = ?1 ORDER BY id",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let articles = stmt
        .query_map([author], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(articles)
}

pub(crate) fn set_author_name(
    conn: &Connection,
    id: ArticleId,
    author_name: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE articles SET author_name = ?1 WHERE id = ?2",
        params![author_name, id],
    )?;
    Ok(())
}

impl Store {
    pub fn create_article(&mut self, new: NewArticle) -> StoreResult<Article> {
        let tx = self.conn.transaction()?;
        ensure_reference(&tx, "bios", "bio", new.author.map(|a| a.get()))?;

        tx.execute(
            "INSERT INTO articles (title, author_id, author_name) VALUES (?1, ?2, ?3)",
            params![new.title, new.author, new.author_name],
        )?;
        let id = ArticleId(tx.last_insert_rowid());
        tx.commit()?;

        info!(%id, "Created article");
        Ok(Article {
            id,
            title: new.title,
            author: new.author,
            author_name: new.author_name,
        })
    }

    pub fn get_article(&self, id: ArticleId) -> StoreResult<Option<Article>> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?1", COLUMNS);
        Ok(self.conn.query_row(&sql, [id], from_row).optional()?)
    }

    /// Articles linked to a staff author
    pub fn articles_by_author(&self, author: BioId) -> StoreResult<Vec<Article>> {
        Ok(by_author(&self.conn, author)?)
    }
}
