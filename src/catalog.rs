// Catalog store: the static, read-only collection of property listings.
// Populated once at startup (usually from JSON) and never mutated afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// Identifiers are unique within a catalog and never reused.
pub type PropertyId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Camp,
    Resort,
    Apartment,
    Hotel,
    Villa,
    Cabin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub name: String,
    pub joined_year: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub category: Category,
    pub name: String,
    pub description: String,
    pub distance_text: String,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: BTreeSet<String>,
    // Whole currency units per night, always positive
    pub price_per_night: u32,
    // Guest rating in [0, 10]
    pub rating: f32,
    pub review_count: u32,
    // None means the listing is not scarcity-tracked
    #[serde(default)]
    pub units_left: Option<u32>,
    pub host: HostInfo,
    pub image: String,
    pub gallery: Vec<String>,
}

// Ordered, immutable after construction. Insertion order defines the
// relevance order used by the query engine.
#[derive(Debug, Default)]
pub struct Catalog {
    properties: Vec<PropertyRecord>,
}

// Seed catalog shipped with the crate (the actual file is stored in the samples directory)
pub const SAMPLE_CATALOG_PATH: &str = "samples/properties.json";

impl Catalog {
    // Build a catalog, validating the load-time invariants: unique ids,
    // positive prices, ratings within range.
    pub fn new(properties: Vec<PropertyRecord>) -> Result<Self, AppError> {
        let mut seen = BTreeSet::new();
        for property in &properties {
            if !seen.insert(property.id) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate property id {}",
                    property.id
                )));
            }
            if property.price_per_night == 0 {
                return Err(AppError::InvalidCatalog(format!(
                    "property {} has a zero price",
                    property.id
                )));
            }
            if !(0.0..=10.0).contains(&property.rating) {
                return Err(AppError::InvalidCatalog(format!(
                    "property {} has rating {} outside [0, 10]",
                    property.id, property.rating
                )));
            }
        }
        Ok(Self { properties })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let properties: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Self::new(properties)
    }

    // Load the seed catalog from the samples directory
    pub fn load_sample() -> Result<Self, AppError> {
        let json = std::fs::read_to_string(SAMPLE_CATALOG_PATH)?;
        Self::from_json(&json)
    }

    // Full ordered list of records
    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    // Lookup by identifier. NotFound is recoverable: callers ignore the
    // action or surface a soft message, never crash.
    pub fn lookup(&self, id: PropertyId) -> Result<&PropertyRecord, AppError> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.properties.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
