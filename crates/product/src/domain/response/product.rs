use crate::model::product::Product as ProductModel;
use bson::DateTime;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e9b1d4a3f8c7e6d5a")]
    pub id: String,
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
    #[schema(example = "2024-06-01T10:00:00.000Z")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn to_rfc3339(dt: DateTime) -> String {
    dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id.to_hex(),
            name: value.name,
            price: value.price,
            image: value.image,
            rating: value.rating,
            reviews: value.reviews,
            category: value.category,
            in_stock: value.in_stock,
            created_at: value.created_at.map(to_rfc3339),
            updated_at: value.updated_at.map(to_rfc3339),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::product::NewProduct;

    #[test]
    fn renders_like_a_stored_document() {
        let now = DateTime::from_millis(1_717_236_000_123);
        let model = ProductModel::new(
            NewProduct {
                name: Some("Aspirin".into()),
                in_stock: Some(true),
                ..Default::default()
            },
            now,
        );
        let id = model.id.to_hex();

        let json = serde_json::to_value(ProductResponse::from(model)).unwrap();

        assert_eq!(json["_id"], id);
        assert_eq!(json["name"], "Aspirin");
        assert_eq!(json["inStock"], true);
        assert_eq!(json["createdAt"], "2024-06-01T10:00:00.123Z");
        assert_eq!(json["createdAt"], json["updatedAt"]);
        assert!(json.get("price").is_none());
    }
}
