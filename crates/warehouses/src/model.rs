use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fulfilment_core::error::require_non_blank;
use fulfilment_core::{DomainResult, Entity, ValueObject, WarehouseId};

/// A physical or logical storage unit.
///
/// `id` is assigned by the warehouse store on creation and is `None` before the
/// warehouse has been persisted. The business unit code is the stable business
/// key and never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Option<WarehouseId>,
    pub business_unit_code: String,
    pub location: String,
    pub capacity: u32,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    /// Build a not-yet-persisted, active warehouse.
    pub fn new(
        business_unit_code: impl Into<String>,
        location: impl Into<String>,
        capacity: u32,
        stock: u32,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let business_unit_code = business_unit_code.into();
        let location = location.into();
        require_non_blank("business_unit_code", &business_unit_code)?;
        require_non_blank("location", &location)?;

        Ok(Self {
            id: None,
            business_unit_code,
            location,
            capacity,
            stock,
            created_at,
            archived_at: None,
        })
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Returns a copy carrying the store-assigned identifier.
    pub fn with_id(mut self, id: WarehouseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Full-record replacement of `existing`: the requested location, capacity
    /// and stock, with the persisted identity and lifecycle timestamps kept.
    pub fn replacing(mut self, existing: &Warehouse) -> Self {
        self.id = existing.id;
        self.business_unit_code = existing.business_unit_code.clone();
        self.created_at = existing.created_at;
        self.archived_at = existing.archived_at;
        self
    }

    /// Returns a copy marked archived at `at`.
    pub fn archived(mut self, at: DateTime<Utc>) -> Self {
        self.archived_at = Some(at);
        self
    }
}

impl Entity for Warehouse {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.business_unit_code
    }
}

/// Location policy, owned by a separate bounded context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub identification: String,
    pub max_number_of_warehouses: u32,
    pub max_capacity: u32,
}

impl Location {
    pub fn new(
        identification: impl Into<String>,
        max_number_of_warehouses: u32,
        max_capacity: u32,
    ) -> Self {
        Self {
            identification: identification.into(),
            max_number_of_warehouses,
            max_capacity,
        }
    }

    /// A location without identification is treated as unresolved.
    pub fn is_identified(&self) -> bool {
        !self.identification.trim().is_empty()
    }
}

impl ValueObject for Location {}
