//! Stitching challan repository: finished-goods output, inventory
//! classification, and the per-product and per-ledger lookups.
//!
//! Rows live in the `isteaching_challans` table.

use serde::{Deserialize, Serialize};

use oms_core::change_detail::single_change;
use oms_core::details::{parse_size_details, parse_string_list};
use oms_core::entities::StitchingChallan;
use oms_core::enums::{InventoryClassification, LoggedEntity};

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_i64, get_json_lenient, get_opt_f64, get_opt_i64, get_opt_string, parse_date,
    parse_datetime, parse_optional_datetime, update_fields,
};
use crate::repos::change_logs::LoggedEdit;
use crate::service::OmsService;
use crate::updates::stitching_challan::StitchingChallanUpdate;

const SELECT_COLS: &str = "s.id, s.challan_no, s.date, s.batch_number, s.quality, s.quantity, \
    s.ledger_id, s.selected_product_id, s.product_name, s.product_sku, s.product_description, \
    s.product_color, s.product_image, s.brand, s.category, s.sub_category, s.made_in, \
    s.product_size, s.cloth_type, s.top_qty, s.bottom_qty, s.transport_name, s.lr_number, \
    s.transport_charge, s.status, s.inventory_classification, s.created_by, s.created_at, \
    s.updated_at";

const COL_COUNT: i32 = 29;

fn row_to_stitching_challan(row: &libsql::Row) -> Result<StitchingChallan, DatabaseError> {
    Ok(StitchingChallan {
        id: row.get(0)?,
        challan_no: row.get(1)?,
        date: parse_date(&row.get::<String>(2)?)?,
        batch_number: parse_string_list(get_opt_string(row, 3)?.as_deref()),
        quality: get_opt_string(row, 4)?.unwrap_or_default(),
        quantity: get_i64(row, 5)?,
        ledger_id: get_opt_string(row, 6)?,
        selected_product_id: get_opt_i64(row, 7)?,
        product_name: get_opt_string(row, 8)?,
        product_sku: get_opt_string(row, 9)?,
        product_description: get_opt_string(row, 10)?,
        product_color: get_opt_string(row, 11)?,
        product_image: get_opt_string(row, 12)?,
        brand: get_opt_string(row, 13)?,
        category: get_opt_string(row, 14)?,
        sub_category: get_opt_string(row, 15)?,
        made_in: get_opt_string(row, 16)?,
        product_size: parse_size_details(get_json_lenient(row, 17)?.as_ref()),
        cloth_type: parse_string_list(get_opt_string(row, 18)?.as_deref()),
        top_qty: get_opt_i64(row, 19)?,
        bottom_qty: get_opt_i64(row, 20)?,
        transport_name: get_opt_string(row, 21)?,
        lr_number: get_opt_string(row, 22)?,
        transport_charge: get_opt_f64(row, 23)?,
        status: get_opt_string(row, 24)?,
        // Values outside the four known tags read as unclassified.
        inventory_classification: get_opt_string(row, 25)?.and_then(|s| s.parse().ok()),
        created_by: get_opt_string(row, 26)?,
        created_at: parse_datetime(&row.get::<String>(27)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 28)?.as_deref())?,
    })
}

/// Catalog fields of the product a challan was stitched for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub product_image: Option<String>,
}

/// A classified challan as shown on the inventory pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedChallan {
    #[serde(flatten)]
    pub challan: StitchingChallan,
    pub ledger_name: Option<String>,
    pub product: Option<ProductSummary>,
}

const REQUIRED: &[&str] = &["challan_no", "date", "quality"];

impl OmsService {
    async fn query_stitching_challans(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<StitchingChallan>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut challans = Vec::new();
        while let Some(row) = rows.next().await? {
            challans.push(row_to_stitching_challan(&row)?);
        }
        Ok(challans)
    }

    /// All stitching challans, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_stitching_challans(&self) -> Result<Vec<StitchingChallan>, DatabaseError> {
        self.query_stitching_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM isteaching_challans s ORDER BY s.created_at DESC, s.id DESC"
            ),
            Vec::new(),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no challan has this id.
    pub async fn get_stitching_challan(&self, id: i64) -> Result<StitchingChallan, DatabaseError> {
        self.query_stitching_challans(
            &format!("SELECT {SELECT_COLS} FROM isteaching_challans s WHERE s.id = ?1"),
            vec![id.into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Challans stitched for a catalog product, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn stitching_challans_for_product(
        &self,
        product_id: i64,
    ) -> Result<Vec<StitchingChallan>, DatabaseError> {
        self.query_stitching_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM isteaching_challans s
                 WHERE s.selected_product_id = ?1 ORDER BY s.id ASC"
            ),
            vec![product_id.into()],
        )
        .await
    }

    /// Challans issued to a ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn stitching_challans_for_ledger(
        &self,
        ledger_id: &str,
    ) -> Result<Vec<StitchingChallan>, DatabaseError> {
        self.query_stitching_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM isteaching_challans s
                 WHERE s.ledger_id = ?1 ORDER BY s.date DESC, s.id DESC"
            ),
            vec![ledger_id.to_string().into()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no challan has this number.
    pub async fn get_stitching_challan_by_number(
        &self,
        challan_no: &str,
    ) -> Result<StitchingChallan, DatabaseError> {
        self.query_stitching_challans(
            &format!("SELECT {SELECT_COLS} FROM isteaching_challans s WHERE s.challan_no = ?1"),
            vec![challan_no.to_string().into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Challans carrying one classification, newest `date` first, with their
    /// ledger name and product summary.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn stitching_challans_by_classification(
        &self,
        classification: InventoryClassification,
    ) -> Result<Vec<ClassifiedChallan>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS}, l.business_name, p.id, p.product_name, p.product_sku, p.product_image
             FROM isteaching_challans s
             LEFT JOIN ledgers l ON l.ledger_id = s.ledger_id
             LEFT JOIN products p ON p.id = s.selected_product_id
             WHERE s.inventory_classification = ?1
             ORDER BY s.date DESC, s.id DESC"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [classification.as_str()])
            .await?;
        let mut challans = Vec::new();
        while let Some(row) = rows.next().await? {
            let product = match get_opt_i64(&row, COL_COUNT + 1)? {
                Some(id) => Some(ProductSummary {
                    id,
                    product_name: get_opt_string(&row, COL_COUNT + 2)?.unwrap_or_default(),
                    product_sku: get_opt_string(&row, COL_COUNT + 3)?.unwrap_or_default(),
                    product_image: get_opt_string(&row, COL_COUNT + 4)?,
                }),
                None => None,
            };
            challans.push(ClassifiedChallan {
                challan: row_to_stitching_challan(&row)?,
                ledger_name: get_opt_string(&row, COL_COUNT)?,
                product,
            });
        }
        Ok(challans)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when a required field is missing,
    /// or a query error (including a duplicate `challan_no`).
    pub async fn create_stitching_challan(
        &self,
        form: &StitchingChallanUpdate,
        created_by: Option<&str>,
    ) -> Result<StitchingChallan, DatabaseError> {
        let mut fields = new_row_fields(form, REQUIRED, created_by)?;
        fields
            .entry("batch_number")
            .or_insert_with(|| serde_json::Value::Array(Vec::new()));
        let id = self.insert_fields("isteaching_challans", &fields).await?;
        tracing::info!(id, challan_no = ?form.challan_no, "stitching challan created");
        self.get_stitching_challan(id).await
    }

    /// Edit a stitching challan, logging to `isteaching_challan_logs`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the challan does not exist.
    pub async fn update_stitching_challan(
        &self,
        id: i64,
        update: &StitchingChallanUpdate,
        changed_by: Option<&str>,
    ) -> Result<StitchingChallan, DatabaseError> {
        let current = self.get_stitching_challan(id).await?;
        let record_id = id.to_string();
        let edit = LoggedEdit {
            entity: LoggedEntity::StitchingChallan,
            table: "isteaching_challans",
            key_col: "id",
            record_id: &record_id,
            changed_by,
        };
        self.logged_update(&edit, &current, &update_fields(update)?)
            .await?;
        self.get_stitching_challan(id).await
    }

    /// Tag a challan with an inventory classification.
    ///
    /// Any classification may replace any other, including itself. Every
    /// call is logged, even when the tag does not change. The tag and its log
    /// row are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the challan does not exist.
    pub async fn classify_stitching_challan(
        &self,
        id: i64,
        classification: InventoryClassification,
        changed_by: Option<&str>,
    ) -> Result<StitchingChallan, DatabaseError> {
        let current = self.get_stitching_challan(id).await?;
        let mut fields = serde_json::Map::new();
        fields.insert(
            "inventory_classification".into(),
            classification.as_str().into(),
        );
        let from = current
            .inventory_classification
            .map_or(serde_json::Value::Null, |c| c.as_str().into());
        let changes = single_change(
            "inventory_classification",
            from,
            classification.as_str().into(),
        );
        let record_id = id.to_string();
        let edit = LoggedEdit {
            entity: LoggedEntity::StitchingChallan,
            table: "isteaching_challans",
            key_col: "id",
            record_id: &record_id,
            changed_by,
        };
        self.write_logged(&edit, &fields, &changes).await?;
        tracing::info!(id, %classification, "challan classified");
        self.get_stitching_challan(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_stitching_challans(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM isteaching_challans", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
