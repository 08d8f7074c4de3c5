//! Product catalog repository.

use serde::{Deserialize, Serialize};

use oms_core::entities::Product;
use oms_core::enums::ProductStatus;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_f64, get_opt_i64, get_opt_string, parse_datetime, parse_optional_datetime,
};
use crate::service::OmsService;

const SELECT_COLS: &str = "id, product_name, product_sku, product_category, \
    product_sub_category, product_description, product_brand, product_color, product_size, \
    product_material, product_country, product_image, wash_care, product_qty, \
    manufacturing_cost, product_status, created_by, created_at, updated_at";

fn row_to_product(row: &libsql::Row) -> Result<Product, DatabaseError> {
    Ok(Product {
        id: row.get(0)?,
        product_name: get_opt_string(row, 1)?.unwrap_or_default(),
        product_sku: get_opt_string(row, 2)?.unwrap_or_default(),
        product_category: get_opt_string(row, 3)?.unwrap_or_default(),
        product_sub_category: get_opt_string(row, 4)?,
        product_description: get_opt_string(row, 5)?,
        product_brand: get_opt_string(row, 6)?,
        product_color: get_opt_string(row, 7)?,
        product_size: get_opt_string(row, 8)?,
        product_material: get_opt_string(row, 9)?,
        product_country: get_opt_string(row, 10)?,
        product_image: get_opt_string(row, 11)?,
        wash_care: get_opt_string(row, 12)?,
        product_qty: get_opt_i64(row, 13)?,
        manufacturing_cost: get_opt_f64(row, 14)?,
        product_status: ProductStatus::from_db(get_opt_string(row, 15)?.as_deref()),
        created_by: get_opt_string(row, 16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 18)?.as_deref())?,
    })
}

/// Create-form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_sku: String,
    #[serde(default)]
    pub product_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wash_care: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_qty: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_status: Option<ProductStatus>,
}

/// One page of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: i64,
}

/// Distinct values offered by the catalog filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductFilterOptions {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub statuses: Vec<String>,
}

impl OmsService {
    async fn query_products(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Product>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut products = Vec::new();
        while let Some(row) = rows.next().await? {
            products.push(row_to_product(&row)?);
        }
        Ok(products)
    }

    /// A page of products, newest first, with the total count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn list_products(&self, limit: u32, offset: u32) -> Result<ProductPage, DatabaseError> {
        let products = self
            .query_products(
                &format!(
                    "SELECT {SELECT_COLS} FROM products ORDER BY created_at DESC, id DESC
                     LIMIT ?1 OFFSET ?2"
                ),
                vec![i64::from(limit).into(), i64::from(offset).into()],
            )
            .await?;
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM products", ())
            .await?;
        let total_count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        Ok(ProductPage {
            products,
            total_count,
        })
    }

    /// Active products by name. Feeds the stitching challan form.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn active_products(&self) -> Result<Vec<Product>, DatabaseError> {
        self.query_products(
            &format!(
                "SELECT {SELECT_COLS} FROM products
                 WHERE coalesce(product_status, 'Active') = 'Active' ORDER BY product_name ASC"
            ),
            Vec::new(),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no product has this id.
    pub async fn get_product(&self, id: i64) -> Result<Product, DatabaseError> {
        self.query_products(
            &format!("SELECT {SELECT_COLS} FROM products WHERE id = ?1"),
            vec![id.into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Like [`Self::get_product`] but a missing row is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_product(&self, id: i64) -> Result<Option<Product>, DatabaseError> {
        match self.get_product(id).await {
            Ok(product) => Ok(Some(product)),
            Err(DatabaseError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when name, SKU, or category is
    /// blank, or a query error.
    pub async fn create_product(
        &self,
        form: &NewProduct,
        created_by: Option<&str>,
    ) -> Result<Product, DatabaseError> {
        let mut fields = new_row_fields(
            form,
            &["product_name", "product_sku", "product_category"],
            created_by,
        )?;
        fields.insert(
            "product_status".into(),
            form.product_status
                .unwrap_or(ProductStatus::Active)
                .as_str()
                .into(),
        );
        let id = self.insert_fields("products", &fields).await?;
        tracing::info!(id, sku = %form.product_sku, "product created");
        self.get_product(id).await
    }

    /// Distinct non-empty categories, colors, and materials, plus the fixed
    /// status list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn product_filter_options(&self) -> Result<ProductFilterOptions, DatabaseError> {
        Ok(ProductFilterOptions {
            categories: self.distinct_values("products", "product_category").await?,
            colors: self.distinct_values("products", "product_color").await?,
            materials: self.distinct_values("products", "product_material").await?,
            statuses: ProductStatus::ALL
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_active_products(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM products WHERE coalesce(product_status, 'Active') = 'Active'",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
