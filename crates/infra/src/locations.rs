//! Location catalogue adapter.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use fulfilment_warehouses::{Location, LocationResolver};

/// Static, read-only location catalogue.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationCatalogue {
    locations: HashMap<String, Location>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationEntry {
    identification: String,
    max_number_of_warehouses: u32,
    max_capacity: u32,
}

impl StaticLocationCatalogue {
    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|l| (l.identification.clone(), l))
                .collect(),
        }
    }

    /// The sites the fulfilment network operates today.
    pub fn with_default_locations() -> Self {
        Self::from_locations([
            Location::new("ZWOLLE-001", 1, 40),
            Location::new("ZWOLLE-002", 2, 50),
            Location::new("AMSTERDAM-001", 5, 100),
            Location::new("AMSTERDAM-002", 3, 75),
            Location::new("TILBURG-001", 1, 40),
            Location::new("HELMOND-001", 1, 45),
            Location::new("EINDHOVEN-001", 2, 70),
            Location::new("VETSBY-001", 1, 90),
        ])
    }

    /// Parse a JSON array of `{identification, max_number_of_warehouses, max_capacity}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<LocationEntry> = serde_json::from_str(json)?;
        Ok(Self::from_locations(entries.into_iter().map(|e| {
            Location::new(e.identification, e.max_number_of_warehouses, e.max_capacity)
        })))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading location catalogue {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("parsing location catalogue {}", path.display()))
    }

    pub fn site_count(&self) -> usize {
        self.locations.len()
    }
}

impl LocationResolver for StaticLocationCatalogue {
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location> {
        self.locations.get(identifier).cloned()
    }
}
