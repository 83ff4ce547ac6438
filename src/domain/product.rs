use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity};

/// A catalog item with a quantity on hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub sku: String,
    pub name: String,
    pub price: f64,
    /// Stock decreases on SALE items and increases on PURCHASE items,
    /// reversed inversely on edit or delete.
    #[serde(default)]
    pub stock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, stock: f64) -> Self {
        Self {
            id: id.into(),
            sku: String::new(),
            name: name.into(),
            price,
            stock,
            category_id: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }
}

impl Identifiable for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A catalog grouping label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}
