use patrimoine_core::possessions::Possession;
use serde::{Deserialize, Serialize};

/// On-disk shape of the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PossessionsDocument {
    #[serde(default)]
    pub possessions: Vec<Possession>,
}

impl PossessionsDocument {
    pub fn filtered(&self, owner: Option<&str>) -> Vec<Possession> {
        self.possessions
            .iter()
            .filter(|p| owner.map_or(true, |o| p.owner == o))
            .cloned()
            .collect()
    }

    pub fn has_open_label(&self, owner: &str, label: &str) -> bool {
        self.possessions
            .iter()
            .any(|p| p.is_open() && p.owner == owner && p.label == label)
    }
}
