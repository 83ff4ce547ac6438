use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity};

/// A customer who may buy on credit up to their limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub credit_limit: f64,
    /// Running balance owed by the customer. Derived from CREDIT sales and
    /// CREDIT_PAYMENT settlements; never written directly.
    #[serde(default)]
    pub total_credit: f64,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: String::new(),
            credit_limit: 0.0,
            total_credit: 0.0,
        }
    }
}

impl Identifiable for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Customer {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A supplier the shop owes money to for credit purchases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    /// Payable owed to the vendor, derived from CREDIT purchases and
    /// vendor-tagged EXPENSE payments.
    #[serde(default)]
    pub total_balance: f64,
}

impl Vendor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_balance: 0.0,
        }
    }
}

impl Identifiable for Vendor {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Vendor {
    fn name(&self) -> &str {
        &self.name
    }
}
