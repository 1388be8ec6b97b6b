use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use super::possessions_model::{
    find_by_label, select_by_label, NewPossession, Possession, PossessionPatch,
};
use super::possessions_traits::{PossessionRepositoryTrait, PossessionServiceTrait};
use crate::errors::{Error, Result};

/// Lifecycle operations over the possession repository.
pub struct PossessionService {
    repository: Arc<dyn PossessionRepositoryTrait>,
}

impl PossessionService {
    pub fn new(repository: Arc<dyn PossessionRepositoryTrait>) -> Self {
        PossessionService { repository }
    }

    fn ensure_label_free(&self, possession: &Possession) -> Result<()> {
        let existing = self.repository.list(Some(&possession.owner))?;
        let taken = existing
            .iter()
            .any(|p| p.is_open() && p.label == possession.label);
        if taken {
            return Err(Error::DuplicateLabel {
                owner: possession.owner.clone(),
                label: possession.label.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PossessionServiceTrait for PossessionService {
    fn list_possessions(&self, owner: Option<&str>) -> Result<Vec<Possession>> {
        self.repository.list(owner)
    }

    fn get_possession(&self, owner: &str, label: &str) -> Result<Possession> {
        let possessions = self.repository.list(Some(owner))?;
        find_by_label(&possessions, owner, label)
            .cloned()
            .ok_or_else(|| Error::not_found(owner, label))
    }

    async fn create_possession(&self, new_possession: NewPossession) -> Result<Possession> {
        let possession = new_possession.into_possession()?;
        self.ensure_label_free(&possession)?;
        let created = self.repository.append(possession).await?;
        info!(
            "Created possession '{}' for '{}' ({})",
            created.label, created.owner, created.asset_type
        );
        Ok(created)
    }

    async fn update_possession(
        &self,
        owner: &str,
        label: &str,
        started_on: Option<NaiveDate>,
        patch: PossessionPatch,
    ) -> Result<Possession> {
        if patch.is_empty() {
            debug!("Empty patch for '{}', returning record unchanged", label);
            let possessions = self.repository.list(Some(owner))?;
            return select_by_label(&possessions, owner, label, started_on)
                .cloned()
                .ok_or_else(|| Error::not_found(owner, label));
        }
        self.repository
            .apply_patch(owner, label, started_on, patch)
            .await
    }

    async fn close_possession(
        &self,
        owner: &str,
        label: &str,
        as_of: NaiveDate,
    ) -> Result<Possession> {
        let closed = self.repository.close(owner, label, as_of).await?;
        info!("Closed possession '{}' for '{}' on {}", label, owner, as_of);
        Ok(closed)
    }

    async fn delete_possession(&self, owner: &str, label: &str) -> Result<()> {
        self.repository.delete(owner, label).await?;
        info!("Deleted possession '{}' for '{}'", label, owner);
        Ok(())
    }
}
