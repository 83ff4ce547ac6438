pub mod account;
pub mod common;
pub mod party;
pub mod product;
pub mod profile;
pub mod purchase_order;
pub mod recurring;
pub mod session;
pub mod transaction;

pub use account::{BankAccount, CASH_ACCOUNT_ID, DEFAULT_BANK_ACCOUNT_ID};
pub use common::{Identifiable, NamedEntity};
pub use party::{Customer, Vendor};
pub use product::{Category, Product};
pub use profile::UserProfile;
pub use purchase_order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
pub use recurring::{Frequency, RecurringExpense};
pub use session::{DaySession, SessionStatus};
pub use transaction::{
    coerce_amount, LineItem, PaymentMethod, Transaction, TransactionDraft, TransactionKind,
};
