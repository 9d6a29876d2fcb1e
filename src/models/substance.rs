use serde::{Deserialize, Serialize};

/// An active pharmaceutical ingredient. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substance {
    pub id: i64,
    pub name: String,
}

/// A grouping of substances sharing a pharmacological risk category
/// (e.g. "NSAID", "anticoagulant"). Rules may target a family instead of
/// enumerating every substance in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: i64,
    pub name: String,
}
