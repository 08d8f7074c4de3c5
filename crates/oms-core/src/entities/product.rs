use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProductStatus;

/// Catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub product_category: String,
    pub product_sub_category: Option<String>,
    pub product_description: Option<String>,
    pub product_brand: Option<String>,
    pub product_color: Option<String>,
    pub product_size: Option<String>,
    pub product_material: Option<String>,
    pub product_country: Option<String>,
    pub product_image: Option<String>,
    pub wash_care: Option<String>,
    pub product_qty: Option<i64>,
    pub manufacturing_cost: Option<f64>,
    pub product_status: ProductStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
