//! Keeps a cash register's `current_amount` in step with its sales.
//!
//! A sale moves the register balance only while it is COMPLETED, so every
//! create, update and delete reduces to "contribution after minus contribution
//! before". Callers compute the delta with [`balance_delta`] and hand it to
//! [`apply_balance_delta`] inside the same transaction that writes the sale.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, sea_query::Expr};
use uuid::Uuid;

use crate::entity::{
    cash_registers::{Column as RegisterCol, Entity as CashRegisters},
    sales::{Model as SaleModel, SaleStatus},
};

/// The two fields of a sale that matter to the register balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleState {
    pub status: SaleStatus,
    pub total: Decimal,
}

impl SaleState {
    pub fn new(status: SaleStatus, total: Decimal) -> Self {
        Self { status, total }
    }

    /// Amount this sale adds to its register.
    pub fn contribution(&self) -> Decimal {
        match self.status {
            SaleStatus::Completed => self.total,
            SaleStatus::Pending | SaleStatus::Cancelled => Decimal::ZERO,
        }
    }
}

impl From<&SaleModel> for SaleState {
    fn from(model: &SaleModel) -> Self {
        Self::new(model.status, model.total)
    }
}

/// Signed adjustment for a sale going from `before` to `after`.
/// `None` on the left is a creation, `None` on the right a deletion.
pub fn balance_delta(before: Option<SaleState>, after: Option<SaleState>) -> Decimal {
    let old = before.map_or(Decimal::ZERO, |s| s.contribution());
    let new = after.map_or(Decimal::ZERO, |s| s.contribution());
    new - old
}

/// Add `delta` to the register's running balance with a single relative
/// UPDATE. Zero deltas are skipped.
pub async fn apply_balance_delta<C>(conn: &C, cash_register_id: Uuid, delta: Decimal) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if delta.is_zero() {
        return Ok(());
    }

    let result = CashRegisters::update_many()
        .col_expr(
            RegisterCol::CurrentAmount,
            Expr::col(RegisterCol::CurrentAmount).add(delta),
        )
        .col_expr(RegisterCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(RegisterCol::Id.eq(cash_register_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!(
            "cash register {cash_register_id}"
        )));
    }

    tracing::debug!(%cash_register_id, %delta, "register balance adjusted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use SaleStatus::*;

    fn state(status: SaleStatus, total: i64) -> Option<SaleState> {
        Some(SaleState::new(status, Decimal::from(total)))
    }

    fn delta(before: Option<SaleState>, after: Option<SaleState>) -> i64 {
        use rust_decimal::prelude::ToPrimitive;
        balance_delta(before, after).to_i64().unwrap()
    }

    #[test]
    fn creation_counts_only_completed_sales() {
        assert_eq!(delta(None, state(Completed, 50)), 50);
        assert_eq!(delta(None, state(Pending, 50)), 0);
        assert_eq!(delta(None, state(Cancelled, 50)), 0);
    }

    #[test]
    fn deletion_reverses_completed_sales() {
        assert_eq!(delta(state(Completed, 30), None), -30);
        assert_eq!(delta(state(Pending, 30), None), 0);
        assert_eq!(delta(state(Cancelled, 30), None), 0);
    }

    #[test]
    fn total_change_on_completed_sale_moves_by_difference() {
        assert_eq!(delta(state(Completed, 50), state(Completed, 80)), 30);
        assert_eq!(delta(state(Completed, 50), state(Completed, 20)), -30);
        assert_eq!(delta(state(Completed, 50), state(Completed, 50)), 0);
    }

    #[test]
    fn leaving_completed_removes_old_total() {
        assert_eq!(delta(state(Completed, 50), state(Cancelled, 50)), -50);
        assert_eq!(delta(state(Completed, 50), state(Pending, 50)), -50);
    }

    #[test]
    fn entering_completed_adds_current_total() {
        assert_eq!(delta(state(Pending, 50), state(Completed, 50)), 50);
        assert_eq!(delta(state(Cancelled, 50), state(Completed, 50)), 50);
    }

    #[test]
    fn status_and_total_changing_together_are_not_double_counted() {
        // Old total leaves, nothing else is applied.
        assert_eq!(delta(state(Completed, 50), state(Cancelled, 70)), -50);
        // The updated total enters, not the old one.
        assert_eq!(delta(state(Pending, 50), state(Completed, 70)), 70);
    }

    #[test]
    fn non_completed_sales_never_move_the_balance() {
        assert_eq!(delta(state(Pending, 50), state(Pending, 90)), 0);
        assert_eq!(delta(state(Pending, 50), state(Cancelled, 10)), 0);
        assert_eq!(delta(state(Cancelled, 50), state(Pending, 50)), 0);
    }

    #[test]
    fn register_scenario_round_trips_to_initial_amount() {
        let mut current = Decimal::from(100);
        current += balance_delta(None, state(Completed, 50));
        assert_eq!(current, Decimal::from(150));
        current += balance_delta(state(Completed, 50), state(Cancelled, 50));
        assert_eq!(current, Decimal::from(100));
    }

    #[test]
    fn cents_are_kept_exact() {
        let before = Some(SaleState::new(Completed, Decimal::new(1999, 2)));
        let after = Some(SaleState::new(Completed, Decimal::new(2001, 2)));
        assert_eq!(balance_delta(before, after), Decimal::new(2, 2));
    }
}
