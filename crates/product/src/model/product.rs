use crate::domain::requests::product::NewProduct;
use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

pub const PRODUCT_COLLECTION: &str = "osumedura";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Product {
    /// A fresh document with a new id, stamped at `now`.
    pub fn new(input: NewProduct, now: DateTime) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            image: input.image,
            rating: input.rating,
            reviews: input.reviews,
            category: input.category,
            in_stock: input.in_stock,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
