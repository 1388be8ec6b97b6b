//! Possessions module - domain models, lifecycle service, and traits.

mod possessions_model;
mod possessions_service;
mod possessions_traits;

pub use possessions_model::{
    find_by_label, position_by_label, select_by_label, AssetType, NewPossession, Possession,
    PossessionPatch, PossessionState,
};
pub use possessions_service::PossessionService;
pub use possessions_traits::{PossessionRepositoryTrait, PossessionServiceTrait};

#[cfg(test)]
mod possessions_model_tests;
