mod model;
mod repository;

pub use model::PossessionsDocument;
pub use repository::JsonPossessionRepository;
