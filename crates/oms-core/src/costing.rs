//! Batch cost aggregation, barcode derivation, and expense GST.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Expense, Product, StitchingChallan, WeaverChallan};

/// Barcodes printed per size beyond the stitched quantity.
pub const BARCODE_SPARES: i64 = 3;

/// Most labels one size can produce on a sheet, spares included.
pub const MAX_BARCODES_PER_SIZE: i64 = 10_000;

/// Fallback SKU used in barcode text when neither product nor challan has one.
pub const NO_SKU: &str = "NOSKU";

// ---------------------------------------------------------------------------
// GST
// ---------------------------------------------------------------------------

/// Percentage encoded in a GST column (`"9%"`, `"2.5"`). `None`, blank,
/// `"Not Applicable"`, and unparseable values are 0.
#[must_use]
pub fn gst_percent(value: Option<&str>) -> f64 {
    value
        .map(|v| v.trim().trim_end_matches('%').trim())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(0.0)
}

/// Expense cost: the pre-GST amount plus every applicable GST component.
#[must_use]
pub fn expense_cost(
    amount_before_gst: f64,
    sgst: Option<&str>,
    cgst: Option<&str>,
    igst: Option<&str>,
) -> f64 {
    let percent = gst_percent(sgst) + gst_percent(cgst) + gst_percent(igst);
    amount_before_gst + amount_before_gst * percent / 100.0
}

// ---------------------------------------------------------------------------
// Unit cost
// ---------------------------------------------------------------------------

/// Cost attributed to a stitching challan's labels.
///
/// With related weaver challans, the first one's rate for the challan's
/// quality times the challan quantity (rate 0 when the quality is absent).
/// Without any, the sum of their vendor amounts, which is 0.
#[must_use]
pub fn unit_cost(challan: &StitchingChallan, weaver_challans: &[WeaverChallan]) -> f64 {
    weaver_challans.first().map_or_else(
        || {
            weaver_challans
                .iter()
                .map(|w| w.vendor_amount.unwrap_or(0.0))
                .sum()
        },
        |first| {
            #[allow(clippy::cast_precision_loss)]
            let quantity = challan.quantity as f64;
            quantity * first.rate_for(&challan.quality).unwrap_or(0.0)
        },
    )
}

// ---------------------------------------------------------------------------
// Barcodes
// ---------------------------------------------------------------------------

/// Number of labels printed for a size with `quantity` pieces, clamped to
/// `0..=MAX_BARCODES_PER_SIZE`.
#[must_use]
pub const fn barcode_count(quantity: i64) -> i64 {
    let count = quantity.saturating_add(BARCODE_SPARES);
    if count < 0 {
        0
    } else if count > MAX_BARCODES_PER_SIZE {
        MAX_BARCODES_PER_SIZE
    } else {
        count
    }
}

/// Deployment values that shape barcode text and image URLs.
#[derive(Debug, Clone)]
pub struct BarcodeSettings {
    pub app_url: String,
    pub barcode_service_url: String,
    pub default_brand: String,
}

/// Metadata shared by every label of a challan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BarcodeContent {
    pub product_name: String,
    pub product_description: String,
    pub batch_number: Vec<String>,
    pub cost: f64,
    pub weaver_challan_number: String,
    pub stitching_challan_number: String,
    pub product_sku: String,
    pub product_category: String,
    pub product_sub_category: String,
    pub product_brand: String,
    pub product_color: String,
    pub product_material: String,
    pub quality: String,
    pub ledger_name: String,
}

/// One printable label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BarcodeLabel {
    pub barcode_number: i64,
    pub text: String,
    pub url: String,
}

/// Labels for one size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SizeBarcodes {
    pub size: String,
    pub quantity: i64,
    pub barcodes: Vec<BarcodeLabel>,
}

/// Full label sheet for a stitching challan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BarcodeSheet {
    pub success: bool,
    pub challan: String,
    pub content: BarcodeContent,
    pub barcodes: Vec<SizeBarcodes>,
}

fn first_non_empty(candidates: &[Option<&str>], default: &str) -> String {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Code128 image URL for `text`.
#[must_use]
pub fn barcode_image_url(service_url: &str, text: &str) -> String {
    format!(
        "{}/?bcid=code128&text={}&scale=3&height=10&includetext=true&textxalign=center",
        service_url.trim_end_matches('/'),
        urlencoding::encode(text)
    )
}

/// Text encoded in label `number` of `size`.
///
/// A known product id yields a product page URL, otherwise `{sku}-{size}-{n}`.
#[must_use]
pub fn barcode_text(
    app_url: &str,
    product_id: Option<i64>,
    sku: &str,
    size: &str,
    number: i64,
) -> String {
    match product_id {
        Some(id) => format!(
            "{}/product/{id}?size={size}&barcode={number}",
            app_url.trim_end_matches('/')
        ),
        None => {
            let sku = if sku.is_empty() { NO_SKU } else { sku };
            format!("{sku}-{size}-{number}")
        }
    }
}

/// Derive the label sheet for a stitching challan.
///
/// `product` is the challan's selected product (if it still exists),
/// `ledger_name` its ledger's business name, and `weaver_challans` the weaver
/// challans whose batch number is one of the challan's batches.
#[must_use]
pub fn generate_barcodes(
    challan: &StitchingChallan,
    product: Option<&Product>,
    ledger_name: Option<&str>,
    weaver_challans: &[WeaverChallan],
    settings: &BarcodeSettings,
) -> BarcodeSheet {
    let content = BarcodeContent {
        product_name: first_non_empty(
            &[
                product.map(|p| p.product_name.as_str()),
                challan.product_name.as_deref(),
            ],
            "",
        ),
        product_description: first_non_empty(
            &[
                product.and_then(|p| p.product_description.as_deref()),
                challan.product_description.as_deref(),
            ],
            "",
        ),
        batch_number: challan.batch_number.clone(),
        cost: unit_cost(challan, weaver_challans),
        weaver_challan_number: weaver_challans
            .iter()
            .map(|w| w.challan_no.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        stitching_challan_number: challan.challan_no.clone(),
        product_sku: first_non_empty(
            &[
                product.map(|p| p.product_sku.as_str()),
                challan.product_sku.as_deref(),
            ],
            "",
        ),
        product_category: first_non_empty(
            &[
                product.map(|p| p.product_category.as_str()),
                challan.category.as_deref(),
            ],
            "",
        ),
        product_sub_category: first_non_empty(
            &[
                product.and_then(|p| p.product_sub_category.as_deref()),
                challan.sub_category.as_deref(),
            ],
            "",
        ),
        product_brand: first_non_empty(
            &[
                product.and_then(|p| p.product_brand.as_deref()),
                challan.brand.as_deref(),
            ],
            &settings.default_brand,
        ),
        product_color: first_non_empty(
            &[
                product.and_then(|p| p.product_color.as_deref()),
                challan.product_color.as_deref(),
            ],
            "",
        ),
        product_material: first_non_empty(
            &[product.and_then(|p| p.product_material.as_deref())],
            "",
        ),
        quality: challan.quality.clone(),
        ledger_name: first_non_empty(&[ledger_name], ""),
    };

    let product_id = product.map(|p| p.id).or(challan.selected_product_id);
    let barcodes = challan
        .product_size
        .iter()
        .map(|entry| SizeBarcodes {
            size: entry.size.clone(),
            quantity: entry.quantity,
            barcodes: (1..=barcode_count(entry.quantity))
                .map(|n| {
                    let text = barcode_text(
                        &settings.app_url,
                        product_id,
                        &content.product_sku,
                        &entry.size,
                        n,
                    );
                    BarcodeLabel {
                        barcode_number: n,
                        url: barcode_image_url(&settings.barcode_service_url, &text),
                        text,
                    }
                })
                .collect(),
        })
        .collect();

    BarcodeSheet {
        success: true,
        challan: challan.challan_no.clone(),
        content,
        barcodes,
    }
}

// ---------------------------------------------------------------------------
// Product cost report
// ---------------------------------------------------------------------------

/// Rows related to a product through its stitching challans.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssociatedData {
    pub stitching_challans: Vec<StitchingChallan>,
    pub weaver_challans: Vec<WeaverChallan>,
}

/// Product detail enriched with the batches and costs behind it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProductCostReport {
    #[serde(flatten)]
    pub product: Product,
    pub batch_numbers: Vec<String>,
    pub cost_incurred: f64,
    pub weaver_challan_numbers: Vec<String>,
    pub stitching_challan_numbers: Vec<String>,
    pub associated_data: AssociatedData,
}

/// Batch numbers of the given challans flattened in challan order.
#[must_use]
pub fn flatten_batch_numbers(stitching_challans: &[StitchingChallan]) -> Vec<String> {
    stitching_challans
        .iter()
        .flat_map(|c| c.batch_number.iter().cloned())
        .collect()
}

/// Assemble a product's cost report from already-fetched related rows.
///
/// `expenses` must be the expenses booked against `stitching_challans`.
#[must_use]
pub fn product_cost_report(
    product: Product,
    stitching_challans: Vec<StitchingChallan>,
    weaver_challans: Vec<WeaverChallan>,
    expenses: &[Expense],
) -> ProductCostReport {
    ProductCostReport {
        product,
        batch_numbers: flatten_batch_numbers(&stitching_challans),
        cost_incurred: expenses.iter().map(|e| e.cost).sum(),
        weaver_challan_numbers: weaver_challans.iter().map(|w| w.challan_no.clone()).collect(),
        stitching_challan_numbers: stitching_challans
            .iter()
            .map(|s| s.challan_no.clone())
            .collect(),
        associated_data: AssociatedData {
            stitching_challans,
            weaver_challans,
        },
    }
}
