use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::costing::{BarcodeSheet, generate_barcodes};
use oms_core::entities::{Ledger, Product, StitchingChallan};
use oms_core::inventory::{batch_numbers, distinct_qualities};
use oms_db::repos::shorting_entries::ShortingEntryDetail;
use oms_db::updates::stitching_challan::StitchingChallanUpdate;

use super::{degrade, optional_ledger, parse_id, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const NOT_FOUND: &str = "Challan not found";

/// Everything the list page and its create form need.
#[derive(Debug, Serialize)]
pub struct StitchingListView {
    pub challans: Vec<StitchingChallan>,
    pub ledgers: Vec<Ledger>,
    pub qualities: Vec<String>,
    pub products: Vec<Product>,
    pub batch_numbers: Vec<String>,
    pub shorting_entries: Vec<ShortingEntryDetail>,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct StitchingDetailView {
    pub challan: StitchingChallan,
    pub ledger_name: Option<String>,
    pub product: Option<Product>,
    pub can_edit: bool,
}

async fn selected_product(state: &AppState, challan: &StitchingChallan) -> Option<Product> {
    let id = challan.selected_product_id?;
    degrade(state.service.find_product(id).await, "selected product")
}

/// `GET /dashboard/production/isteaching-challans`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<StitchingListView>, PageError> {
    let svc = &state.service;
    let (challans, ledgers, weaver_challans, products, shorting_entries) = tokio::try_join!(
        svc.list_stitching_challans(),
        svc.all_ledgers(),
        svc.list_weaver_challans(),
        svc.active_products(),
        svc.list_shorting_entries(),
    )?;

    Ok(Json(StitchingListView {
        challans,
        ledgers,
        qualities: distinct_qualities(&weaver_challans),
        products,
        batch_numbers: batch_numbers(&weaver_challans),
        shorting_entries: shorting_entries
            .into_iter()
            .filter(|e| e.batch_number.is_some())
            .collect(),
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/isteaching-challans`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<StitchingChallanUpdate>,
) -> Result<Json<StitchingChallan>, PageError> {
    let challan = state
        .service
        .create_stitching_challan(&form, Some(&viewer.id))
        .await?;
    Ok(Json(challan))
}

/// `GET /dashboard/production/isteaching-challans/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<StitchingDetailView>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let challan = state
        .service
        .get_stitching_challan(id)
        .await
        .or_not_found(NOT_FOUND)?;
    let (ledger, product) = tokio::join!(
        optional_ledger(&state, challan.ledger_id.as_deref()),
        selected_product(&state, &challan),
    );
    Ok(Json(StitchingDetailView {
        ledger_name: ledger.map(|l| l.business_name),
        product,
        challan,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/isteaching-challans/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Json(update): Json<StitchingChallanUpdate>,
) -> Result<Json<StitchingChallan>, PageError> {
    require_editor(&viewer)?;
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let challan = state
        .service
        .update_stitching_challan(id, &update, Some(&viewer.id))
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(challan))
}

/// `GET /api/barcode/isteaching-challan/{id}`
///
/// Public: printed labels link here without a session.
pub async fn barcodes(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<BarcodeSheet>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let challan = state
        .service
        .get_stitching_challan(id)
        .await
        .or_not_found(NOT_FOUND)?;
    let (ledger, product, weavers) = tokio::join!(
        optional_ledger(&state, challan.ledger_id.as_deref()),
        selected_product(&state, &challan),
        state.service.weaver_challans_by_batches(&challan.batch_number),
    );
    let weavers = degrade(weavers, "weaver challans by batch");

    Ok(Json(generate_barcodes(
        &challan,
        product.as_ref(),
        ledger.as_ref().map(|l| l.business_name.as_str()),
        &weavers,
        &state.barcode_settings(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use chrono::NaiveDate;
    use oms_core::details::{QualityDetail, SizeQuantity};
    use oms_core::enums::UserRole;
    use oms_db::repos::products::NewProduct;
    use oms_db::updates::stitching_challan::StitchingChallanUpdateBuilder;
    use oms_db::updates::weaver_challan::WeaverChallanUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn challan_form(product_id: Option<i64>) -> StitchingChallanUpdate {
        StitchingChallanUpdateBuilder::new()
            .challan_no("SC-9")
            .date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .batch_number(vec!["B-1".into()])
            .quality("Rayon")
            .quantity(10)
            .selected_product_id(product_id)
            .product_sku(Some("KR-01".into()))
            .product_size(vec![
                SizeQuantity { size: "M".into(), quantity: 2 },
                SizeQuantity { size: "L".into(), quantity: 0 },
            ])
            .build()
    }

    async fn seed_weaver(state: &AppState) {
        let form = WeaverChallanUpdateBuilder::new()
            .challan_no("WC-1")
            .batch_number("B-1")
            .challan_date(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
            .ms_party_name("Laxmi Weaves")
            .quality_details(vec![QualityDetail {
                quality_name: Some("Rayon".into()),
                rate: Some(42.5),
            }])
            .build();
        state.service.create_weaver_challan(&form, None).await.unwrap();
    }

    #[tokio::test]
    async fn list_gathers_form_options() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        seed_weaver(&state).await;
        create(State(state.clone()), staff.clone(), Json(challan_form(None)))
            .await
            .unwrap();

        let Json(view) = list(State(state.clone()), staff).await.unwrap();
        assert_eq!(view.challans.len(), 1);
        assert_eq!(view.qualities, vec!["Rayon"]);
        assert_eq!(view.batch_numbers, vec!["B-1"]);
        assert!(view.products.is_empty());
        assert!(!view.can_edit);
    }

    #[tokio::test]
    async fn barcodes_without_product_use_sku_text() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        seed_weaver(&state).await;
        let Json(challan) = create(State(state.clone()), staff, Json(challan_form(None)))
            .await
            .unwrap();

        let Json(sheet) = barcodes(State(state.clone()), Path(challan.id.to_string()))
            .await
            .unwrap();
        assert!(sheet.success);
        assert_eq!(sheet.barcodes[0].barcodes.len(), 5);
        assert_eq!(sheet.barcodes[1].barcodes.len(), 3);
        assert_eq!(sheet.barcodes[0].barcodes[0].text, "KR-01-M-1");
        assert!((sheet.content.cost - 425.0).abs() < 1e-9);
        assert_eq!(sheet.content.weaver_challan_number, "WC-1");
        assert_eq!(sheet.content.product_brand, "Bhaktinandan");
    }

    #[tokio::test]
    async fn barcodes_with_product_link_to_product_page() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let product = state
            .service
            .create_product(
                &NewProduct {
                    product_name: "Kurti".into(),
                    product_sku: "KR-01".into(),
                    product_category: "Women".into(),
                    product_brand: Some("Saanvi".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        let Json(challan) = create(State(state.clone()), staff.clone(), Json(challan_form(Some(product.id))))
            .await
            .unwrap();

        let Json(sheet) = barcodes(State(state.clone()), Path(challan.id.to_string()))
            .await
            .unwrap();
        let expected = format!("http://oms-two-mu.vercel.app/product/{}?size=M&barcode=1", product.id);
        assert_eq!(sheet.barcodes[0].barcodes[0].text, expected);
        assert_eq!(sheet.content.product_brand, "Saanvi");
        assert!(sheet.content.cost.abs() < f64::EPSILON);

        let Json(view) = detail(State(state.clone()), staff, Path(challan.id.to_string()))
            .await
            .unwrap();
        assert_eq!(view.product.map(|p| p.product_name).as_deref(), Some("Kurti"));
    }

    #[tokio::test]
    async fn barcodes_for_missing_challan_is_404() {
        let state = test_state().await;
        for raw in ["x1", "77"] {
            let error = barcodes(State(state.clone()), Path(raw.into()))
                .await
                .unwrap_err();
            assert!(matches!(error, PageError::NotFound(msg) if msg == NOT_FOUND));
        }
    }

    #[tokio::test]
    async fn update_needs_editor() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let admin = viewer(&state, "user_admin", UserRole::Admin).await;
        let Json(challan) = create(State(state.clone()), staff.clone(), Json(challan_form(None)))
            .await
            .unwrap();
        let form = StitchingChallanUpdateBuilder::new().quantity(12).build();

        let error = update(State(state.clone()), staff, Path(challan.id.to_string()), Json(form.clone()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::Forbidden));

        let Json(updated) = update(State(state.clone()), admin, Path(challan.id.to_string()), Json(form))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 12);
    }
}
