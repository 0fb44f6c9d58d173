use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{parse_enum, require_non_negative};
use crate::{
    entity::cash_registers::CashRegisterStatus,
    error::AppResult,
    models::{CashRegister, SaleSummary, UserSummary},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenCashRegisterRequest {
    pub user_id: Uuid,
    /// Defaults to 0.
    pub initial_amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCashRegisterRequest {
    /// OPEN or CLOSED.
    pub status: Option<String>,
    pub current_amount: Option<Decimal>,
    /// When closing without it, the current amount at close time is used.
    pub final_amount: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterWithRelations {
    pub cash_register: CashRegister,
    pub user: Option<UserSummary>,
    pub sales: Vec<SaleSummary>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CashRegisterList {
    #[schema(value_type = Vec<CashRegisterWithRelations>)]
    pub items: Vec<CashRegisterWithRelations>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterWithUser {
    pub cash_register: CashRegister,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCashRegister {
    pub user_id: Uuid,
    pub initial_amount: Decimal,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CashRegisterChanges {
    pub status: Option<CashRegisterStatus>,
    pub current_amount: Option<Decimal>,
    pub final_amount: Option<Decimal>,
}

impl OpenCashRegisterRequest {
    pub fn validate(self) -> AppResult<NewCashRegister> {
        let initial_amount = require_non_negative(
            "initialAmount",
            self.initial_amount.unwrap_or(Decimal::ZERO),
        )?;
        Ok(NewCashRegister {
            user_id: self.user_id,
            initial_amount,
        })
    }
}

impl UpdateCashRegisterRequest {
    pub fn validate(self) -> AppResult<CashRegisterChanges> {
        Ok(CashRegisterChanges {
            status: self
                .status
                .as_deref()
                .map(|raw| parse_enum("status", raw))
                .transpose()?,
            current_amount: self
                .current_amount
                .map(|v| require_non_negative("currentAmount", v))
                .transpose()?,
            final_amount: self
                .final_amount
                .map(|v| require_non_negative("finalAmount", v))
                .transpose()?,
        })
    }
}

impl CashRegisterChanges {
    /// Final amount to persist for a register currently in `stored_status`
    /// with balance `stored_current`. `None` leaves the column untouched.
    ///
    /// Closing an OPEN register without an explicit final amount records the
    /// balance at close time, which includes a `currentAmount` sent alongside.
    pub fn final_amount_for(
        &self,
        stored_status: CashRegisterStatus,
        stored_current: Decimal,
    ) -> Option<Decimal> {
        match (self.final_amount, self.status, stored_status) {
            (Some(amount), _, _) => Some(amount),
            (None, Some(CashRegisterStatus::Closed), CashRegisterStatus::Open) => {
                Some(self.current_amount.unwrap_or(stored_current))
            }
            _ => None,
        }
    }

    pub fn reopens(&self, stored_status: CashRegisterStatus) -> bool {
        self.status == Some(CashRegisterStatus::Open) && stored_status == CashRegisterStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_amount_defaults_to_zero() {
        let req = OpenCashRegisterRequest {
            user_id: Uuid::new_v4(),
            initial_amount: None,
        };
        assert_eq!(req.validate().unwrap().initial_amount, Decimal::ZERO);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let req = OpenCashRegisterRequest {
            user_id: Uuid::new_v4(),
            initial_amount: Some(Decimal::new(-1, 0)),
        };
        assert!(req.validate().is_err());

        let req = UpdateCashRegisterRequest {
            final_amount: Some(Decimal::new(-5, 1)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_amounts_must_fit_in_cents() {
        let req = OpenCashRegisterRequest {
            user_id: Uuid::new_v4(),
            initial_amount: Some(Decimal::new(1_001, 3)),
        };
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "initialAmount must have at most 2 decimal places"
        );

        let req = UpdateCashRegisterRequest {
            current_amount: Some(Decimal::new(10_000_000_000, 0)),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateCashRegisterRequest {
            final_amount: Some(Decimal::new(12_345, 2)),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap().final_amount, Some(Decimal::new(12_345, 2)));
    }

    #[test]
    fn closing_defaults_final_amount_to_current() {
        let changes = UpdateCashRegisterRequest {
            status: Some("closed".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(
            changes.final_amount_for(CashRegisterStatus::Open, Decimal::new(150, 0)),
            Some(Decimal::new(150, 0))
        );
    }

    #[test]
    fn closing_prefers_supplied_amounts() {
        let changes = CashRegisterChanges {
            status: Some(CashRegisterStatus::Closed),
            current_amount: Some(Decimal::new(90, 0)),
            final_amount: None,
        };
        assert_eq!(
            changes.final_amount_for(CashRegisterStatus::Open, Decimal::new(150, 0)),
            Some(Decimal::new(90, 0))
        );

        let changes = CashRegisterChanges {
            final_amount: Some(Decimal::new(80, 0)),
            ..changes
        };
        assert_eq!(
            changes.final_amount_for(CashRegisterStatus::Open, Decimal::new(150, 0)),
            Some(Decimal::new(80, 0))
        );
    }

    #[test]
    fn closing_twice_keeps_recorded_final_amount() {
        let changes = CashRegisterChanges {
            status: Some(CashRegisterStatus::Closed),
            ..Default::default()
        };
        assert_eq!(
            changes.final_amount_for(CashRegisterStatus::Closed, Decimal::new(150, 0)),
            None
        );
    }

    #[test]
    fn no_status_change_leaves_final_amount() {
        let changes = CashRegisterChanges {
            current_amount: Some(Decimal::new(10, 0)),
            ..Default::default()
        };
        assert_eq!(changes.final_amount_for(CashRegisterStatus::Open, Decimal::ZERO), None);
        assert!(!changes.reopens(CashRegisterStatus::Closed));
    }

    #[test]
    fn reopening_is_detected() {
        let changes = CashRegisterChanges {
            status: Some(CashRegisterStatus::Open),
            ..Default::default()
        };
        assert!(changes.reopens(CashRegisterStatus::Closed));
        assert!(!changes.reopens(CashRegisterStatus::Open));
    }
}
