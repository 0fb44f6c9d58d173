use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{parse_enum, require_positive, require_positive_amount};
use crate::{
    entity::sales::{PaymentMethod, SaleItem, SaleStatus},
    error::{AppError, AppResult},
    models::{CashRegisterSummary, Sale, UserSummary},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub cash_register_id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<SaleItem>,
    pub total: Decimal,
    /// CASH, CARD or PIX.
    pub payment_method: String,
    /// PENDING, COMPLETED or CANCELLED. Defaults to COMPLETED.
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub items: Option<Vec<SaleItem>>,
    pub total: Option<Decimal>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithRelations {
    pub sale: Sale,
    pub user: Option<UserSummary>,
    pub cash_register: Option<CashRegisterSummary>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<SaleWithRelations>)]
    pub items: Vec<SaleWithRelations>,
}

#[derive(Debug, Clone)]
pub struct NewSale {
    pub cash_register_id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<SaleItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SaleChanges {
    pub items: Option<Vec<SaleItem>>,
    pub total: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<SaleStatus>,
}

pub fn validate_items(items: Vec<SaleItem>) -> AppResult<Vec<SaleItem>> {
    if items.is_empty() {
        return Err(AppError::BadRequest("items must be a non-empty array".into()));
    }
    for (index, item) in items.iter().enumerate() {
        require_positive(&format!("items[{index}].quantity"), item.quantity)?;
        require_positive_amount(&format!("items[{index}].price"), item.price)?;
    }
    Ok(items)
}

impl CreateSaleRequest {
    pub fn validate(self) -> AppResult<NewSale> {
        let items = validate_items(self.items)?;
        let total = require_positive_amount("total", self.total)?;
        let payment_method = parse_enum("paymentMethod", &self.payment_method)?;
        let status = match self.status.as_deref() {
            Some(raw) => parse_enum("status", raw)?,
            None => SaleStatus::Completed,
        };
        Ok(NewSale {
            cash_register_id: self.cash_register_id,
            user_id: self.user_id,
            items,
            total,
            payment_method,
            status,
        })
    }
}

impl UpdateSaleRequest {
    pub fn validate(self) -> AppResult<SaleChanges> {
        Ok(SaleChanges {
            items: self.items.map(validate_items).transpose()?,
            total: self
                .total
                .map(|v| require_positive_amount("total", v))
                .transpose()?,
            payment_method: self
                .payment_method
                .as_deref()
                .map(|raw| parse_enum("paymentMethod", raw))
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(|raw| parse_enum("status", raw))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, price: Decimal) -> SaleItem {
        SaleItem {
            product_id: Uuid::new_v4(),
            quantity: Decimal::from(quantity),
            price,
            extra: serde_json::Map::new(),
        }
    }

    fn request() -> CreateSaleRequest {
        CreateSaleRequest {
            cash_register_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            items: vec![item(2, Decimal::new(2500, 2))],
            total: Decimal::new(5000, 2),
            payment_method: "card".into(),
            status: None,
        }
    }

    #[test]
    fn status_defaults_to_completed() {
        let sale = request().validate().unwrap();
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn empty_items_are_rejected() {
        let err = CreateSaleRequest {
            items: vec![],
            ..request()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn item_errors_name_the_offending_line() {
        let err = validate_items(vec![
            item(1, Decimal::ONE),
            item(0, Decimal::ONE),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "items[1].quantity must be a positive number");

        let err = validate_items(vec![item(1, Decimal::ZERO)]).unwrap_err();
        assert_eq!(err.to_string(), "items[0].price must be a positive number");
    }

    #[test]
    fn weighed_quantities_and_extra_keys_are_kept() {
        let body = serde_json::json!([
            { "productId": Uuid::new_v4(), "quantity": 1.5, "price": "3.20", "name": "Bananas" },
            { "productId": Uuid::new_v4(), "quantity": "2", "price": 1 }
        ]);
        let items: Vec<SaleItem> = serde_json::from_value(body).unwrap();
        let items = validate_items(items).unwrap();
        assert_eq!(items[0].quantity, Decimal::new(15, 1));
        assert_eq!(items[1].quantity, Decimal::from(2));
        assert_eq!(items[0].extra.get("name"), Some(&serde_json::json!("Bananas")));
        assert!(items[1].extra.is_empty());

        let stored = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(stored["name"], "Bananas");
        assert_eq!(stored["productId"], serde_json::json!(items[0].product_id));
    }

    #[test]
    fn amounts_beyond_cents_are_rejected() {
        let err = CreateSaleRequest {
            total: Decimal::new(1, 3),
            ..request()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "total must have at most 2 decimal places");

        assert!(CreateSaleRequest { total: Decimal::new(10_005, 3), ..request() }.validate().is_err());
        assert!(
            CreateSaleRequest { total: Decimal::new(10_000_000_000, 0), ..request() }
                .validate()
                .is_err()
        );

        let err = validate_items(vec![item(1, Decimal::new(10_005, 3))]).unwrap_err();
        assert_eq!(err.to_string(), "items[0].price must have at most 2 decimal places");

        assert!(UpdateSaleRequest {
            total: Some(Decimal::new(1, 3)),
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn total_and_enums_are_checked() {
        assert!(CreateSaleRequest { total: Decimal::ZERO, ..request() }.validate().is_err());
        assert!(CreateSaleRequest { payment_method: "BOLETO".into(), ..request() }.validate().is_err());
        assert!(CreateSaleRequest { status: Some("REFUNDED".into()), ..request() }.validate().is_err());
    }

    #[test]
    fn body_uses_camel_case_fields() {
        let body = serde_json::json!({
            "cashRegisterId": Uuid::new_v4(),
            "userId": Uuid::new_v4(),
            "items": [{ "productId": Uuid::new_v4(), "quantity": 1, "price": 10 }],
            "total": "10.00",
            "paymentMethod": "pix",
            "status": "pending"
        });
        let req: CreateSaleRequest = serde_json::from_value(body).unwrap();
        let sale = req.validate().unwrap();
        assert_eq!(sale.status, SaleStatus::Pending);
        assert_eq!(sale.total, Decimal::new(10, 0));
    }

    #[test]
    fn update_validates_only_present_fields() {
        let changes = UpdateSaleRequest {
            status: Some("cancelled".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.status, Some(SaleStatus::Cancelled));
        assert!(changes.total.is_none());

        assert!(UpdateSaleRequest {
            items: Some(vec![]),
            ..Default::default()
        }
        .validate()
        .is_err());
    }
}
