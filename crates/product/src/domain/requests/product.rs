use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields accepted when creating a product. Every field is optional and
/// nothing is filled in when absent; unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[schema(example = "Aspirin")]
    pub name: Option<String>,

    #[schema(example = 5.0)]
    pub price: Option<f64>,

    #[schema(example = "https://cdn.example.com/aspirin.png")]
    pub image: Option<String>,

    #[schema(example = 4.5)]
    pub rating: Option<f64>,

    #[schema(example = 120)]
    pub reviews: Option<f64>,

    #[schema(example = "Pain Relief")]
    pub category: Option<String>,

    #[schema(example = true)]
    pub in_stock: Option<bool>,
}

/// A create payload: either one product or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CreateProductRequest {
    Many(Vec<NewProduct>),
    One(NewProduct),
}

impl CreateProductRequest {
    pub fn into_products(self) -> Vec<NewProduct> {
        match self {
            CreateProductRequest::Many(products) => products,
            CreateProductRequest::One(product) => vec![product],
        }
    }
}
