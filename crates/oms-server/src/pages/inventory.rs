//! Inventory pages, the classification API, and the public product API.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use oms_core::costing::{ProductCostReport, flatten_batch_numbers, product_cost_report};
use oms_core::entities::Product;
use oms_core::enums::InventoryClassification;
use oms_db::repos::products::{NewProduct, ProductFilterOptions};
use oms_db::repos::stitching_challans::ClassifiedChallan;
use oms_db::repos::weaver_challans::WeaverChallanWithVendor;

use super::{degrade, parse_id};
use crate::error::{PageError, StoreResultExt};
use crate::session::{ApiViewer, Viewer};
use crate::state::AppState;

const CHALLAN_NOT_FOUND: &str = "Challan not found";
const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Challan id as posted by the inventory page: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChallanRef {
    Number(i64),
    Text(String),
}

impl ChallanRef {
    fn id(&self) -> Result<i64, PageError> {
        match self {
            Self::Number(id) => Ok(*id),
            Self::Text(raw) => parse_id(raw, CHALLAN_NOT_FOUND),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    #[serde(rename = "challanId")]
    pub challan_id: ChallanRef,
    pub classification: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ClassifiedView {
    pub classification: InventoryClassification,
    pub challans: Vec<ClassifiedChallan>,
}

#[derive(Debug, Serialize)]
pub struct ConvertView {
    pub challans: Vec<WeaverChallanWithVendor>,
}

#[derive(Debug, Serialize)]
pub struct ProductsView {
    pub products: Vec<Product>,
    pub total_count: i64,
    pub page_size: u32,
    pub filter_options: ProductFilterOptions,
}

/// `POST /api/inventory/classify`
pub async fn classify(
    State(state): State<AppState>,
    ApiViewer(viewer): ApiViewer,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, PageError> {
    let classification: InventoryClassification = request.classification.parse()?;
    let id = request.challan_id.id()?;
    state
        .service
        .classify_stitching_challan(id, classification, Some(&viewer.id))
        .await
        .or_not_found(CHALLAN_NOT_FOUND)?;
    Ok(Json(ClassifyResponse { success: true }))
}

/// `GET /dashboard/inventory/{classification}`
pub async fn classified(
    State(state): State<AppState>,
    Viewer(_viewer): Viewer,
    Path(raw): Path<String>,
) -> Result<Json<ClassifiedView>, PageError> {
    let classification: InventoryClassification = raw
        .parse()
        .map_err(|_| PageError::not_found("Not found"))?;
    let challans = state
        .service
        .stitching_challans_by_classification(classification)
        .await?;
    Ok(Json(ClassifiedView {
        classification,
        challans,
    }))
}

/// `GET /dashboard/inventory/convert`
pub async fn convert(
    State(state): State<AppState>,
    Viewer(_viewer): Viewer,
) -> Result<Json<ConvertView>, PageError> {
    let challans = state.service.weaver_challans_with_vendor().await?;
    Ok(Json(ConvertView { challans }))
}

/// `GET /dashboard/inventory/products`
pub async fn products(
    State(state): State<AppState>,
    Viewer(_viewer): Viewer,
) -> Result<Json<ProductsView>, PageError> {
    let svc = &state.service;
    let page_size = state.config.general.product_page_size;
    let (page, filter_options) =
        tokio::join!(svc.list_products(page_size, 0), svc.product_filter_options());
    let page = page?;
    Ok(Json(ProductsView {
        products: page.products,
        total_count: page.total_count,
        page_size,
        filter_options: degrade(filter_options, "product filter options"),
    }))
}

/// `POST /dashboard/inventory/products`
pub async fn create_product(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<NewProduct>,
) -> Result<Json<Product>, PageError> {
    let product = state
        .service
        .create_product(&form, Some(&viewer.id))
        .await?;
    Ok(Json(product))
}

/// `GET /api/products/{id}`
///
/// Public: label QR codes resolve here.
pub async fn product_api(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductCostReport>, PageError> {
    let id = parse_id(&raw_id, PRODUCT_NOT_FOUND)?;
    let svc = &state.service;
    let product = svc.get_product(id).await.or_not_found(PRODUCT_NOT_FOUND)?;

    let stitching = degrade(
        svc.stitching_challans_for_product(id).await,
        "product stitching challans",
    );
    let batches = flatten_batch_numbers(&stitching);
    let challan_nos: Vec<String> = stitching.iter().map(|c| c.challan_no.clone()).collect();
    let (weavers, expenses) = tokio::join!(
        svc.weaver_challans_by_batches(&batches),
        svc.expenses_for_challans(&challan_nos),
    );

    Ok(Json(product_cost_report(
        product,
        stitching,
        degrade(weavers, "product weaver challans"),
        &degrade(expenses, "product expenses"),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use chrono::NaiveDate;
    use oms_core::enums::{LoggedEntity, UserRole};
    use oms_db::updates::expense::ExpenseUpdateBuilder;
    use oms_db::updates::stitching_challan::StitchingChallanUpdateBuilder;
    use oms_db::updates::weaver_challan::WeaverChallanUpdateBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn seed_challan(state: &AppState, no: &str, product_id: Option<i64>) -> i64 {
        let form = StitchingChallanUpdateBuilder::new()
            .challan_no(no)
            .date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .batch_number(vec!["B-1".into()])
            .quality("Rayon")
            .quantity(4)
            .selected_product_id(product_id)
            .build();
        state
            .service
            .create_stitching_challan(&form, None)
            .await
            .unwrap()
            .id
    }

    fn classify_request(value: serde_json::Value) -> ClassifyRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn challan_id_accepts_number_or_text() {
        let numeric = classify_request(json!({"challanId": 7, "classification": "good"}));
        assert_eq!(numeric.challan_id.id().unwrap(), 7);
        let text = classify_request(json!({"challanId": "8", "classification": "bad"}));
        assert_eq!(text.challan_id.id().unwrap(), 8);
        let junk = classify_request(json!({"challanId": "x", "classification": "bad"}));
        assert!(junk.challan_id.id().is_err());
    }

    #[tokio::test]
    async fn classify_then_list_by_class() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let id = seed_challan(&state, "SC-1", None).await;

        let Json(done) = classify(
            State(state.clone()),
            ApiViewer(staff.0.clone()),
            Json(classify_request(json!({"challanId": id, "classification": "wastage"}))),
        )
        .await
        .unwrap();
        assert!(done.success);

        let Json(view) = classified(State(state.clone()), staff.clone(), Path("wastage".into()))
            .await
            .unwrap();
        assert_eq!(view.challans.len(), 1);
        let Json(view) = classified(State(state.clone()), staff, Path("good".into()))
            .await
            .unwrap();
        assert!(view.challans.is_empty());

        let logs = state
            .service
            .list_change_logs(LoggedEntity::StitchingChallan, &id.to_string())
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].changed_by.as_deref(), Some("user_staff"));
    }

    #[tokio::test]
    async fn classify_rejects_unknown_class_and_challan() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let id = seed_challan(&state, "SC-1", None).await;

        let error = classify(
            State(state.clone()),
            ApiViewer(staff.0.clone()),
            Json(classify_request(json!({"challanId": id, "classification": "excellent"}))),
        )
        .await
        .unwrap_err();
        assert!(matches!(error, PageError::BadRequest(msg) if msg == "Invalid classification"));

        let error = classify(
            State(state.clone()),
            ApiViewer(staff.0.clone()),
            Json(classify_request(json!({"challanId": 999, "classification": "good"}))),
        )
        .await
        .unwrap_err();
        assert!(matches!(error, PageError::NotFound(msg) if msg == CHALLAN_NOT_FOUND));
    }

    #[tokio::test]
    async fn unknown_inventory_page_is_404() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let error = classified(State(state.clone()), staff, Path("seconds".into()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::NotFound(_)));
    }

    #[tokio::test]
    async fn product_api_aggregates_costs() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let Json(product) = create_product(
            State(state.clone()),
            staff.clone(),
            Json(NewProduct {
                product_name: "Kurti".into(),
                product_sku: "KR-01".into(),
                product_category: "Women".into(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        seed_challan(&state, "SC-1", Some(product.id)).await;
        let weaver = WeaverChallanUpdateBuilder::new()
            .challan_no("WC-1")
            .batch_number("B-1")
            .challan_date(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
            .ms_party_name("Laxmi Weaves")
            .build();
        state.service.create_weaver_challan(&weaver, None).await.unwrap();
        for amount in [100.0, 50.0] {
            let expense = ExpenseUpdateBuilder::new()
                .expense_date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
                .challan_no(Some("SC-1".into()))
                .amount_before_gst(amount)
                .build();
            state.service.create_expense(&expense, None).await.unwrap();
        }

        let Json(report) = product_api(State(state.clone()), Path(product.id.to_string()))
            .await
            .unwrap();
        assert_eq!(report.batch_numbers, vec!["B-1"]);
        assert_eq!(report.stitching_challan_numbers, vec!["SC-1"]);
        assert_eq!(report.weaver_challan_numbers, vec!["WC-1"]);
        assert!((report.cost_incurred - 150.0).abs() < 1e-9);

        let Json(view) = products(State(state.clone()), staff).await.unwrap();
        assert_eq!(view.total_count, 1);
        assert_eq!(view.filter_options.categories, vec!["Women"]);
    }

    #[tokio::test]
    async fn product_api_missing_is_404() {
        let state = test_state().await;
        let error = product_api(State(state.clone()), Path("404".into()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::NotFound(msg) if msg == PRODUCT_NOT_FOUND));
    }

    #[tokio::test]
    async fn convert_lists_vendor_names() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let Json(view) = convert(State(state.clone()), staff).await.unwrap();
        assert!(view.challans.is_empty());
    }
}
