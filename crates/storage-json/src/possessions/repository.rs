use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use patrimoine_core::errors::{Error, Result};
use patrimoine_core::possessions::{
    position_by_label, Possession, PossessionPatch, PossessionRepositoryTrait,
};

use super::model::PossessionsDocument;
use crate::db::{JsonStore, WriteHandle};

/// Possession repository backed by the JSON data file.
///
/// Reads go straight to disk; every mutation is queued on the writer task.
pub struct JsonPossessionRepository {
    store: JsonStore,
    writer: WriteHandle,
}

impl JsonPossessionRepository {
    pub fn new(store: JsonStore, writer: WriteHandle) -> Self {
        JsonPossessionRepository { store, writer }
    }
}

fn locate(
    document: &PossessionsDocument,
    owner: &str,
    label: &str,
    started_on: Option<NaiveDate>,
) -> Result<usize> {
    position_by_label(&document.possessions, owner, label, started_on)
        .ok_or_else(|| Error::not_found(owner, label))
}

#[async_trait]
impl PossessionRepositoryTrait for JsonPossessionRepository {
    fn list(&self, owner: Option<&str>) -> Result<Vec<Possession>> {
        Ok(self.store.load()?.filtered(owner))
    }

    async fn append(&self, possession: Possession) -> Result<Possession> {
        self.writer
            .exec(move |document: &mut PossessionsDocument| -> Result<Possession> {
                if document.has_open_label(&possession.owner, &possession.label) {
                    return Err(Error::DuplicateLabel {
                        owner: possession.owner,
                        label: possession.label,
                    });
                }
                document.possessions.push(possession.clone());
                debug!("Appended possession '{}'", possession.label);
                Ok(possession)
            })
            .await
    }

    async fn apply_patch(
        &self,
        owner: &str,
        label: &str,
        started_on: Option<NaiveDate>,
        patch: PossessionPatch,
    ) -> Result<Possession> {
        let owner = owner.to_string();
        let label = label.to_string();
        self.writer
            .exec(move |document: &mut PossessionsDocument| -> Result<Possession> {
                let index = locate(document, &owner, &label, started_on)?;
                let possession = &mut document.possessions[index];
                possession.apply_patch(&patch)?;
                Ok(possession.clone())
            })
            .await
    }

    async fn close(&self, owner: &str, label: &str, as_of: NaiveDate) -> Result<Possession> {
        let owner = owner.to_string();
        let label = label.to_string();
        self.writer
            .exec(move |document: &mut PossessionsDocument| -> Result<Possession> {
                let index = locate(document, &owner, &label, None)?;
                let possession = &mut document.possessions[index];
                possession.close(as_of)?;
                Ok(possession.clone())
            })
            .await
    }

    async fn delete(&self, owner: &str, label: &str) -> Result<()> {
        let owner = owner.to_string();
        let label = label.to_string();
        self.writer
            .exec(move |document: &mut PossessionsDocument| -> Result<()> {
                let index = locate(document, &owner, &label, None)?;
                document.possessions.remove(index);
                Ok(())
            })
            .await
    }
}
