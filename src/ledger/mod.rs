pub mod impact;
pub mod recurring;
pub mod session;
pub mod shop;

pub use impact::{impact_of, reversal_of, ImpactEntry};
pub use recurring::{process_due_schedules, recurring_transaction_id};
pub use session::DayCashReport;
pub use shop::Shop;
