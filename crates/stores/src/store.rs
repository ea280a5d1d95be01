use serde::{Deserialize, Serialize};

use fulfilment_core::error::require_non_blank;
use fulfilment_core::{DomainError, DomainResult, Entity, StoreId};

/// A fulfilment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub quantity_products_in_stock: i32,
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Store fields as submitted by a caller. Every field is optional on the wire;
/// the service decides which ones an operation requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDraft {
    pub id: Option<StoreId>,
    pub name: Option<String>,
    pub quantity_products_in_stock: Option<i32>,
}

impl StoreDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity_products_in_stock = Some(quantity);
        self
    }

    /// The submitted name, required and non-blank.
    pub(crate) fn required_name(&self) -> DomainResult<&str> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| DomainError::validation("store name was not set on request"))?;
        require_non_blank("name", name)?;
        Ok(name)
    }
}
