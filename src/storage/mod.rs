//! Persistence: snapshot (de)serialization, the blob-store seam, startup
//! source reconciliation, import/export, and the coalescing save queue.
//!
//! The ledger is local-first: a failed save only flips a status flag and
//! never blocks or rolls back in-memory state.

pub mod json_backend;
pub mod sync;

pub use json_backend::JsonStorage;
pub use sync::{SyncQueue, SyncStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BankAccount, Category, Customer, DaySession, Product, PurchaseOrder, RecurringExpense,
    Transaction, UserProfile, Vendor,
};
use crate::errors::LedgerError;
use crate::ledger::Shop;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Snapshot format revision written into exports.
pub const EXPORT_VERSION: &str = "5.0";

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    /// Loads the stored snapshot, `None` when nothing was persisted yet.
    fn load(&self) -> Result<Option<Shop>>;
    /// Persists the whole snapshot.
    fn save(&self, shop: &Shop) -> Result<()>;
}

/// Startup reconciliation between the durable local cache and the remote
/// store: the local copy wins while it has products, otherwise the remote
/// snapshot, otherwise a freshly seeded shop.
pub fn choose_source(local: Option<Shop>, remote: Option<Shop>) -> Shop {
    match local {
        Some(shop) if !shop.products.is_empty() => shop,
        _ => remote.unwrap_or_else(Shop::new),
    }
}

/// Export document: the snapshot plus version and export timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'static str,
    export_date: DateTime<Utc>,
    #[serde(flatten)]
    shop: &'a Shop,
}

/// Renders the shop as a pretty-printed backup document. The in-progress
/// register cart is device state and stays out of backups.
pub fn export_json(shop: &Shop, now: DateTime<Utc>) -> Result<String> {
    let document = ExportDocument {
        version: EXPORT_VERSION,
        export_date: now,
        shop,
    };
    let mut value = serde_json::to_value(&document)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("posSession");
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// A backup document being imported. Every collection is optional: only
/// the arrays present in the file overwrite their target.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub accounts: Option<Vec<BankAccount>>,
    #[serde(default)]
    pub purchase_orders: Option<Vec<PurchaseOrder>>,
    #[serde(default)]
    pub vendors: Option<Vec<Vendor>>,
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub recurring_expenses: Option<Vec<RecurringExpense>>,
    #[serde(default)]
    pub day_sessions: Option<Vec<DaySession>>,
}

impl ImportDocument {
    /// Replaces each collection that the document carries.
    pub fn apply_to(self, shop: &mut Shop) {
        if let Some(products) = self.products {
            shop.products = products;
        }
        if let Some(categories) = self.categories {
            shop.categories = categories;
        }
        if let Some(transactions) = self.transactions {
            shop.transactions = transactions;
        }
        if let Some(accounts) = self.accounts {
            shop.accounts = accounts;
        }
        if let Some(purchase_orders) = self.purchase_orders {
            shop.purchase_orders = purchase_orders;
        }
        if let Some(vendors) = self.vendors {
            shop.vendors = vendors;
        }
        if let Some(customers) = self.customers {
            shop.customers = customers;
        }
        if let Some(user_profile) = self.user_profile {
            shop.user_profile = user_profile;
        }
        if let Some(recurring_expenses) = self.recurring_expenses {
            shop.recurring_expenses = recurring_expenses;
        }
        if let Some(day_sessions) = self.day_sessions {
            shop.day_sessions = day_sessions;
        }
    }
}

/// Parses and applies a backup file. A malformed document fails with one
/// parse error and leaves the shop untouched.
pub fn import_json(shop: &mut Shop, raw: &str) -> Result<()> {
    let document: ImportDocument = serde_json::from_str(raw)?;
    document.apply_to(shop);
    tracing::info!("backup import applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn shop_with_products() -> Shop {
        let mut shop = Shop::new();
        shop.upsert_product(Product::new("p1", "Tea 100g", 20.0, 5.0));
        shop
    }

    #[test]
    fn local_with_products_wins_over_remote() {
        let local = shop_with_products();
        let mut remote = Shop::new();
        remote.upsert_product(Product::new("p2", "Sugar 1kg", 9.0, 1.0));
        let chosen = choose_source(Some(local.clone()), Some(remote));
        assert_eq!(chosen, local);
    }

    #[test]
    fn empty_local_falls_back_to_remote_then_seed() {
        let remote = shop_with_products();
        let chosen = choose_source(Some(Shop::new()), Some(remote.clone()));
        assert_eq!(chosen, remote);

        let seeded = choose_source(None, None);
        assert!(seeded.products.is_empty());
        assert!(seeded.account("cash").is_some());
    }

    #[test]
    fn export_round_trips_through_import() {
        let shop = shop_with_products();
        let raw = export_json(&shop, Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], EXPORT_VERSION);
        assert!(value.get("exportDate").is_some());

        let mut restored = Shop::new();
        import_json(&mut restored, &raw).unwrap();
        assert_eq!(restored.products, shop.products);
    }

    #[test]
    fn import_only_overwrites_present_arrays() {
        let mut shop = shop_with_products();
        let before_accounts = shop.accounts.clone();
        import_json(&mut shop, r#"{ "customers": [{ "id": "c1", "name": "Nimal" }] }"#).unwrap();
        assert_eq!(shop.accounts, before_accounts);
        assert_eq!(shop.products.len(), 1);
        assert_eq!(shop.customers.len(), 1);
    }

    #[test]
    fn malformed_import_leaves_state_untouched() {
        let mut shop = shop_with_products();
        let before = shop.clone();
        let err = import_json(&mut shop, "{ not json").expect_err("parse must fail");
        assert!(matches!(err, LedgerError::Serde(_)));
        assert_eq!(shop, before);
    }
}
