//! Bio deletion with article byline backfill.
//!
//! Deleting a bio must not leave its articles without a byline. Before the
//! bio row is removed, every linked article that has no author name gets
//! the bio's name. Articles that already carry a name are left alone.
//!
//! The backfill and the delete share one transaction: if any article
//! update fails, nothing is changed and the bio is still there.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::{ArticleId, BioId};

use super::{articles, bios, Store, StoreError, StoreResult};

/// What a bio deletion did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub bio_id: BioId,

    /// Name written into unauthored articles
    pub bio_name: Option<String>,

    /// Articles whose author name was filled in
    pub reassigned: Vec<ArticleId>,

    /// Articles left untouched
    pub skipped: Vec<ArticleId>,
}

impl Store {
    /// Delete a bio, first filling in the author name of its unauthored
    /// articles.
    ///
    /// A bio without a name (or with a blank one) has nothing to backfill;
    /// its articles are reported as skipped. Linked programs and articles
    /// keep existing with their producer/author reference cleared.
    #[instrument(skip(self), fields(bio_id = %bio_id))]
    pub fn delete_bio_and_reassign_articles(&mut self, bio_id: BioId) -> StoreResult<CascadeReport> {
        let tx = self.conn.transaction()?;

        let bio = bios::fetch(&tx, bio_id)?.ok_or(StoreError::NotFound {
            entity: "bio",
            id: bio_id.get(),
        })?;

        let mut report = CascadeReport {
            bio_id,
            bio_name: bio.name.clone(),
            reassigned: Vec::new(),
            skipped: Vec::new(),
        };

        for article in articles::by_author(&tx, bio_id)? {
            let name = match bio.name.as_deref() {
                Some(name) if !name.trim().is_empty() && article.needs_author_name() => name,
                _ => {
                    debug!(article_id = %article.id, "Article keeps its author name");
                    report.skipped.push(article.id);
                    continue;
                }
            };

            articles::set_author_name(&tx, article.id, name).map_err(|source| {
                StoreError::CascadeWrite {
                    article_id: article.id,
                    source,
                }
            })?;
            report.reassigned.push(article.id);
        }

        tx.execute("DELETE FROM bios WHERE id = ?1", [bio_id])?;
        tx.commit()?;

        info!(
            reassigned = report.reassigned.len(),
            skipped = report.skipped.len(),
            "Deleted bio"
        );
        Ok(report)
    }
}
