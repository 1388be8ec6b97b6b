use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::possessions::possessions_model::{NewPossession, Possession, PossessionPatch};

/// Trait for possession repository operations.
///
/// Reads return a point-in-time snapshot; mutations are serialized by the
/// implementation. Label lookups follow [`find_by_label`](super::find_by_label).
#[async_trait]
pub trait PossessionRepositoryTrait: Send + Sync {
    fn list(&self, owner: Option<&str>) -> Result<Vec<Possession>>;
    /// Fails with `DuplicateLabel` when the owner already has an open record
    /// with the same label.
    async fn append(&self, possession: Possession) -> Result<Possession>;
    /// `started_on` narrows the label lookup to the record with that start
    /// date.
    async fn apply_patch(
        &self,
        owner: &str,
        label: &str,
        started_on: Option<NaiveDate>,
        patch: PossessionPatch,
    ) -> Result<Possession>;
    /// Runs the Open -> Closed transition and the write as one step.
    async fn close(&self, owner: &str, label: &str, as_of: NaiveDate) -> Result<Possession>;
    async fn delete(&self, owner: &str, label: &str) -> Result<()>;
}

/// Trait for possession lifecycle operations.
#[async_trait]
pub trait PossessionServiceTrait: Send + Sync {
    fn list_possessions(&self, owner: Option<&str>) -> Result<Vec<Possession>>;
    fn get_possession(&self, owner: &str, label: &str) -> Result<Possession>;
    async fn create_possession(&self, new_possession: NewPossession) -> Result<Possession>;
    async fn update_possession(
        &self,
        owner: &str,
        label: &str,
        started_on: Option<NaiveDate>,
        patch: PossessionPatch,
    ) -> Result<Possession>;
    async fn close_possession(
        &self,
        owner: &str,
        label: &str,
        as_of: NaiveDate,
    ) -> Result<Possession>;
    async fn delete_possession(&self, owner: &str, label: &str) -> Result<()>;
}
