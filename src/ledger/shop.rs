use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::PosSession;
use crate::domain::common::{find_by_id, find_by_id_mut, upsert};
use crate::domain::{
    BankAccount, Category, Customer, DaySession, LineItem, PaymentMethod, Product, PurchaseOrder,
    PurchaseOrderStatus, RecurringExpense, Transaction, TransactionDraft, TransactionKind,
    UserProfile, Vendor,
};
use crate::errors::LedgerError;
use crate::ledger::impact::{impact_of, reversal_of, ImpactEntry};

/// The whole shop state: the transaction log plus every aggregate derived
/// from it. All financial fields on accounts, customers, vendors, and
/// products are owned by the apply/revert path in this module; the only
/// direct writes are day-open (drawer float) and account registration.
///
/// This struct is also the persisted snapshot shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub accounts: Vec<BankAccount>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub recurring_expenses: Vec<RecurringExpense>,
    #[serde(default)]
    pub day_sessions: Vec<DaySession>,
    /// In-progress register state. Snapshot-only: exports drop it.
    #[serde(default)]
    pub pos_session: PosSession,
}

impl Shop {
    /// A fresh shop with the two reserved accounts in place.
    pub fn new() -> Self {
        Self {
            accounts: BankAccount::seed_accounts(),
            ..Self::default()
        }
    }

    // ----- transaction store -----

    /// Posts a draft: assigns identity and timestamp where missing, applies
    /// its ledger impact, and prepends it to the log (newest first).
    pub fn add_transaction(&mut self, draft: TransactionDraft, now: DateTime<Utc>) -> String {
        let tx = draft.finalize(now);
        let id = tx.id.clone();
        tracing::debug!(id = %id, kind = ?tx.kind, amount = tx.amount, "posting transaction");
        self.apply_entries(impact_of(&tx));
        self.transactions.insert(0, tx);
        id
    }

    /// Replaces a stored transaction: the original's impact is reverted
    /// under its old shape, the new version's applied under the new one.
    /// Returns `false` (and changes nothing) when the id is unknown.
    pub fn update_transaction(&mut self, updated: Transaction) -> bool {
        let Some(original) = self.transaction(&updated.id).cloned() else {
            tracing::debug!(id = %updated.id, "update ignored: transaction not found");
            return false;
        };
        self.apply_entries(reversal_of(&original));
        self.apply_entries(impact_of(&updated));
        if let Some(slot) = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == updated.id)
        {
            *slot = updated;
        }
        true
    }

    /// Reverts and removes a transaction. Returns `false` when the id is
    /// unknown.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let Some(tx) = self.transaction(id).cloned() else {
            tracing::debug!(id = %id, "delete ignored: transaction not found");
            return false;
        };
        self.apply_entries(reversal_of(&tx));
        self.transactions.retain(|t| t.id != id);
        true
    }

    fn apply_entries(&mut self, entries: Vec<ImpactEntry>) {
        for entry in entries {
            match entry {
                ImpactEntry::Account { account_id, delta } => {
                    if let Some(account) = find_by_id_mut(&mut self.accounts, &account_id) {
                        account.balance += delta;
                    }
                }
                ImpactEntry::CustomerCredit { customer_id, delta } => {
                    if let Some(customer) = find_by_id_mut(&mut self.customers, &customer_id) {
                        customer.total_credit += delta;
                    }
                }
                ImpactEntry::VendorPayable { vendor_id, delta } => {
                    if let Some(vendor) = find_by_id_mut(&mut self.vendors, &vendor_id) {
                        vendor.total_balance += delta;
                    }
                }
                ImpactEntry::ProductStock { product_id, delta } => {
                    // A since-deleted product simply loses the adjustment.
                    if let Some(product) = find_by_id_mut(&mut self.products, &product_id) {
                        product.stock += delta;
                    }
                }
            }
        }
    }

    // ----- query surface -----

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn transactions_of_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| tx.kind == kind).collect()
    }

    pub fn transactions_on(&self, day: NaiveDate) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| tx.day() == day).collect()
    }

    pub fn transactions_by_method(&self, method: PaymentMethod) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.payment_method == method)
            .collect()
    }

    /// Display ordering: newest first by recorded date.
    pub fn transactions_by_date_desc(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Cheques not yet matured, soonest maturity first.
    pub fn pending_cheques(&self, today: NaiveDate) -> Vec<&Transaction> {
        let mut cheques: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| {
                tx.payment_method == PaymentMethod::Cheque
                    && tx.cheque_date.map(|d| d >= today).unwrap_or(false)
            })
            .collect();
        cheques.sort_by_key(|tx| tx.cheque_date);
        cheques
    }

    // ----- registration / catalog upserts -----

    /// Registers or replaces an account. Setting the initial balance here is
    /// one of the two sanctioned direct balance writes.
    pub fn upsert_account(&mut self, account: BankAccount) {
        tracing::debug!(id = %account.id, balance = account.balance, "upserting account");
        upsert(&mut self.accounts, account);
    }

    pub fn account(&self, id: &str) -> Option<&BankAccount> {
        find_by_id(&self.accounts, id)
    }

    pub fn upsert_customer(&mut self, customer: Customer) {
        upsert(&mut self.customers, customer);
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        find_by_id(&self.customers, id)
    }

    pub fn upsert_vendor(&mut self, vendor: Vendor) {
        upsert(&mut self.vendors, vendor);
    }

    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        find_by_id(&self.vendors, id)
    }

    pub fn upsert_product(&mut self, product: Product) {
        upsert(&mut self.products, product);
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    pub fn add_category(&mut self, category: Category) {
        upsert(&mut self.categories, category);
    }

    pub fn remove_category(&mut self, id: &str) {
        self.categories.retain(|category| category.id != id);
    }

    pub fn add_recurring_expense(&mut self, schedule: RecurringExpense) {
        upsert(&mut self.recurring_expenses, schedule);
    }

    pub fn remove_recurring_expense(&mut self, id: &str) {
        self.recurring_expenses.retain(|schedule| schedule.id != id);
    }

    pub fn upsert_purchase_order(&mut self, po: PurchaseOrder) {
        self.purchase_orders.retain(|existing| existing.id != po.id);
        self.purchase_orders.insert(0, po);
    }

    pub fn purchase_order(&self, id: &str) -> Option<&PurchaseOrder> {
        find_by_id(&self.purchase_orders, id)
    }

    // ----- purchasing collaborator -----

    /// Receives a purchase order: synthesizes the PURCHASE transaction from
    /// the PO lines (unit cost becomes the line price) and marks the order
    /// RECEIVED with a receipt timestamp.
    pub fn receive_purchase_order(
        &mut self,
        po_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, LedgerError> {
        let po = self
            .purchase_order(po_id)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownPurchaseOrder(po_id.to_string()))?;

        let mut draft = TransactionDraft::new(
            TransactionKind::Purchase,
            po.total_amount,
            po.payment_method,
        )
        .with_vendor(po.vendor_id.clone())
        .with_description(format!("Inward Stock Receipt: {}", po.id))
        .with_items(
            po.items
                .iter()
                .map(|line| LineItem {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    price: line.cost,
                    discount: 0.0,
                })
                .collect(),
        );
        if let Some(account_id) = po.account_id.clone() {
            draft = draft.with_account(account_id);
        }
        if let (Some(number), Some(maturity)) = (po.cheque_number.clone(), po.cheque_date) {
            draft = draft.with_cheque(number, maturity);
        }

        let tx_id = self.add_transaction(draft, now);
        if let Some(stored) = self
            .purchase_orders
            .iter_mut()
            .find(|existing| existing.id == po_id)
        {
            stored.status = PurchaseOrderStatus::Received;
            stored.received_date = Some(now);
        }
        tracing::info!(po = %po_id, tx = %tx_id, "purchase order received");
        Ok(tx_id)
    }
}
