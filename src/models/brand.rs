use serde::{Deserialize, Serialize};

use super::substance::Substance;

/// A marketed medication, keyed by its regulatory code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Administration route, free text from the regulatory source
    /// (e.g. "orale", "cutanée"). Brand-level only; bare substances
    /// have no route.
    pub route: Option<String>,
    pub is_otc: bool,
    pub composition: Vec<BrandSubstance>,
}

/// One (substance, dosage) entry of a brand's composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSubstance {
    pub substance: Substance,
    pub dosage: Option<String>,
}

impl Brand {
    /// Ids of every substance in the composition.
    pub fn substance_ids(&self) -> Vec<i64> {
        self.composition.iter().map(|bs| bs.substance.id).collect()
    }

    /// Names of every substance in the composition (explanation context).
    pub fn substance_names(&self) -> Vec<String> {
        self.composition
            .iter()
            .map(|bs| bs.substance.name.clone())
            .collect()
    }
}
