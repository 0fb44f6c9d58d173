use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, Iterable};
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

pub mod cash_registers;
pub mod products;
pub mod sales;
pub mod users;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a string-backed enum case-insensitively, naming the field on failure.
pub fn parse_enum<E>(field: &str, raw: &str) -> AppResult<E>
where
    E: ActiveEnum<Value = String> + Iterable,
{
    let normalized = raw.trim().to_uppercase();
    E::try_from_value(&normalized).map_err(|_| {
        let allowed = E::iter()
            .map(|variant| variant.to_value())
            .collect::<Vec<_>>()
            .join(", ");
        AppError::BadRequest(format!("{field} must be one of {allowed}"))
    })
}

pub fn require_text(field: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Money columns are `NUMERIC(12, 2)`.
const AMOUNT_SCALE: u32 = 2;
// 10^10, the first value with 11 integer digits.
const AMOUNT_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

pub fn require_positive(field: &str, value: Decimal) -> AppResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(AppError::BadRequest(format!("{field} must be a positive number")));
    }
    Ok(value)
}

/// A monetary value the store can hold exactly.
pub fn require_amount(field: &str, value: Decimal) -> AppResult<Decimal> {
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(AppError::BadRequest(format!(
            "{field} must have at most {AMOUNT_SCALE} decimal places"
        )));
    }
    if value.abs() >= AMOUNT_LIMIT {
        return Err(AppError::BadRequest(format!(
            "{field} must be less than {AMOUNT_LIMIT}"
        )));
    }
    Ok(value)
}

pub fn require_positive_amount(field: &str, value: Decimal) -> AppResult<Decimal> {
    require_amount(field, require_positive(field, value)?)
}

pub fn require_non_negative(field: &str, value: Decimal) -> AppResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest(format!(
            "{field} must be a non-negative number"
        )));
    }
    require_amount(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sales::{PaymentMethod, SaleStatus};

    #[test]
    fn parse_enum_ignores_case_and_whitespace() {
        let method: PaymentMethod = parse_enum("paymentMethod", " pix ").unwrap();
        assert_eq!(method, PaymentMethod::Pix);
        let status: SaleStatus = parse_enum("status", "Cancelled").unwrap();
        assert_eq!(status, SaleStatus::Cancelled);
    }

    #[test]
    fn parse_enum_lists_allowed_values() {
        let err = parse_enum::<PaymentMethod>("paymentMethod", "cheque").unwrap_err();
        assert_eq!(
            err.to_string(),
            "paymentMethod must be one of CASH, CARD, PIX"
        );
    }

    #[test]
    fn amount_checks() {
        assert!(require_positive("total", Decimal::ZERO).is_err());
        assert!(require_positive("total", Decimal::new(1, 2)).is_ok());
        assert!(require_non_negative("initialAmount", Decimal::ZERO).is_ok());
        assert!(require_non_negative("initialAmount", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn amounts_must_fit_the_money_column() {
        // 0.001 would round to zero in storage
        let err = require_positive_amount("total", Decimal::new(1, 3)).unwrap_err();
        assert_eq!(err.to_string(), "total must have at most 2 decimal places");
        assert!(require_positive_amount("price", Decimal::new(10_005, 3)).is_err());
        assert!(require_non_negative("currentAmount", Decimal::new(10_005, 3)).is_err());

        let err = require_positive_amount("total", Decimal::new(10_000_000_000, 0)).unwrap_err();
        assert_eq!(err.to_string(), "total must be less than 10000000000");
        assert!(require_non_negative("finalAmount", Decimal::new(10_000_000_000, 0)).is_err());

        // trailing zeros are not extra precision
        assert!(require_positive_amount("total", Decimal::new(10_500, 3)).is_ok());
        assert!(require_positive_amount("total", Decimal::new(999_999_999_999, 2)).is_ok());
        assert!(require_positive_amount("total", Decimal::ZERO).is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("name", "   ".into()).is_err());
        assert_eq!(require_text("name", " Coffee ".into()).unwrap(), "Coffee");
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn double_option_separates_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);
        let null: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(null.description, Some(None));
        let set: Patch = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(set.description, Some(Some("x".into())));
    }
}
