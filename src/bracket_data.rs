//! Usage: Static tournament field data, bundled per year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const BUNDLED_YEARS: &[&str] = &[
    include_str!("../data/brackets/2024.json"),
    include_str!("../data/brackets/2025.json"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BracketTeam {
    pub seed: u8,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BracketRegion {
    pub name: String,
    /// Sixteen teams in seed order.
    pub teams: Vec<BracketTeam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BracketYear {
    pub year: u16,
    pub regions: Vec<BracketRegion>,
}

/// All known tournament fields, loaded once at startup and read-only after.
pub(crate) struct BracketCatalog {
    years: BTreeMap<u16, BracketYear>,
}

impl BracketCatalog {
    pub(crate) fn bundled() -> Result<Self, String> {
        let mut years = BTreeMap::new();
        for raw in BUNDLED_YEARS {
            let parsed: BracketYear = serde_json::from_str(raw)
                .map_err(|e| format!("failed to parse bundled bracket data: {e}"))?;
            years.insert(parsed.year, parsed);
        }
        Ok(Self { years })
    }

    pub(crate) fn get(&self, year: u16) -> Option<&BracketYear> {
        self.years.get(&year)
    }

    pub(crate) fn years(&self) -> Vec<u16> {
        self.years.keys().copied().collect()
    }
}
