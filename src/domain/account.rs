use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity};

/// Reserved id of the physical cash drawer account.
pub const CASH_ACCOUNT_ID: &str = "cash";
/// Reserved id of the fallback bank account.
pub const DEFAULT_BANK_ACCOUNT_ID: &str = "bank_default";

/// A ledger account holding a running cash or bank balance.
///
/// The balance is derived state: only transaction impacts may change it,
/// with two sanctioned exceptions (day-open sets the drawer float, account
/// registration sets the opening balance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub balance: f64,
}

impl BankAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_number: None,
            balance,
        }
    }

    pub fn with_account_number(mut self, number: impl Into<String>) -> Self {
        self.account_number = Some(number.into());
        self
    }

    /// The two accounts every ledger starts with.
    pub fn seed_accounts() -> Vec<BankAccount> {
        vec![
            BankAccount::new(CASH_ACCOUNT_ID, "Main Cash Drawer", 0.0),
            BankAccount::new(DEFAULT_BANK_ACCOUNT_ID, "Default Bank Account", 0.0),
        ]
    }
}

impl Identifiable for BankAccount {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for BankAccount {
    fn name(&self) -> &str {
        &self.name
    }
}
