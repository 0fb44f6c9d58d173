use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{double_option, require_positive_amount, require_text};
use crate::{error::AppResult, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_uri: Option<String>,
}

/// Partial update. `description` and `imageUri` may be sent as `null` to clear them.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_uri: Option<Option<String>>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_uri: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub image_uri: Option<Option<String>>,
    pub active: Option<bool>,
}

impl CreateProductRequest {
    pub fn validate(self) -> AppResult<NewProduct> {
        Ok(NewProduct {
            name: require_text("name", self.name)?,
            description: self.description,
            price: require_positive_amount("price", self.price)?,
            image_uri: self.image_uri,
        })
    }
}

impl UpdateProductRequest {
    pub fn validate(self) -> AppResult<ProductChanges> {
        Ok(ProductChanges {
            name: self.name.map(|v| require_text("name", v)).transpose()?,
            description: self.description,
            price: self
                .price
                .map(|v| require_positive_amount("price", v))
                .transpose()?,
            image_uri: self.image_uri,
            active: self.active,
        })
    }
}
