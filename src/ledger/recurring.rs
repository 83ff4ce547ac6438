//! Recurring-expense scheduler.
//!
//! Evaluates every schedule against a reference date and materializes at
//! most one EXPENSE per schedule per due period. Ids are deterministic per
//! schedule and day, so running the evaluation twice on the same day can
//! never double-post.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{
    PaymentMethod, TransactionDraft, TransactionKind, CASH_ACCOUNT_ID, DEFAULT_BANK_ACCOUNT_ID,
};
use crate::ledger::Shop;

/// Deterministic id for the materialization of `schedule_id` on `day`.
pub fn recurring_transaction_id(schedule_id: &str, day: NaiveDate) -> String {
    format!("RECUR-{}-{}", schedule_id, day.format("%Y-%m-%d"))
}

struct DueMaterialization {
    schedule_index: usize,
    draft: TransactionDraft,
}

/// Runs the scheduler for `today`. Due schedules post an EXPENSE through
/// the normal add path (full ledger impact) and get their
/// `last_processed_date` stamped. Returns the ids of the posted entries.
pub fn process_due_schedules(shop: &mut Shop, today: NaiveDate) -> Vec<String> {
    // Materializations are dated at the start of the evaluation day.
    let posted_at = today.and_time(NaiveTime::MIN).and_utc();
    let mut due = Vec::new();

    for (index, schedule) in shop.recurring_expenses.iter().enumerate() {
        let last_run = schedule.last_processed_date.unwrap_or(schedule.start_date);
        let days_since_last_run = (today - last_run).num_days();
        if days_since_last_run < schedule.frequency.threshold_days() {
            continue;
        }

        let tx_id = recurring_transaction_id(&schedule.id, today);
        if shop.transaction(&tx_id).is_some() {
            // Already materialized today.
            continue;
        }

        let account_id = schedule.account_id.clone().unwrap_or_else(|| {
            match schedule.payment_method {
                PaymentMethod::Cash => CASH_ACCOUNT_ID,
                _ => DEFAULT_BANK_ACCOUNT_ID,
            }
            .to_string()
        });
        let draft = TransactionDraft::new(
            TransactionKind::Expense,
            schedule.amount,
            schedule.payment_method,
        )
        .with_id(tx_id)
        .with_account(account_id)
        .with_description(format!("[RECURRING] {}", schedule.description))
        .with_date(posted_at);
        due.push(DueMaterialization {
            schedule_index: index,
            draft,
        });
    }

    let mut posted = Vec::with_capacity(due.len());
    for materialization in due {
        let id = shop.add_transaction(materialization.draft, posted_at);
        shop.recurring_expenses[materialization.schedule_index].last_processed_date = Some(today);
        tracing::info!(id = %id, "recurring expense materialized");
        posted.push(id);
    }
    posted
}
