use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    cash_registers::{self, CashRegisterStatus},
    products,
    sales::{self, PaymentMethod, SaleItem, SaleStatus},
    users::{self, UserRole},
};

/// A user account as exposed over the API. The password hash never leaves the store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_uri: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: CashRegisterStatus,
    pub initial_amount: Decimal,
    pub current_amount: Decimal,
    pub final_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterSummary {
    pub id: Uuid,
    pub status: CashRegisterStatus,
    pub initial_amount: Decimal,
    pub current_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub cash_register_id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<SaleItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub id: Uuid,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub items: Vec<SaleItem>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            active: model.active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_uri: model.image_uri,
            active: model.active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<cash_registers::Model> for CashRegister {
    fn from(model: cash_registers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            initial_amount: model.initial_amount,
            current_amount: model.current_amount,
            final_amount: model.final_amount,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<cash_registers::Model> for CashRegisterSummary {
    fn from(model: cash_registers::Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
            initial_amount: model.initial_amount,
            current_amount: model.current_amount,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<sales::Model> for Sale {
    fn from(model: sales::Model) -> Self {
        Self {
            id: model.id,
            cash_register_id: model.cash_register_id,
            user_id: model.user_id,
            items: model.items.0,
            total: model.total,
            payment_method: model.payment_method,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<sales::Model> for SaleSummary {
    fn from(model: sales::Model) -> Self {
        Self {
            id: model.id,
            total: model.total,
            payment_method: model.payment_method,
            status: model.status,
            items: model.items.0,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
