use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::entities::{Ledger, WeaverChallan};
use oms_db::updates::weaver_challan::WeaverChallanUpdate;

use super::{optional_ledger, parse_id, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const NOT_FOUND: &str = "Weaver challan not found";

#[derive(Debug, Serialize)]
pub struct WeaverListView {
    pub challans: Vec<WeaverChallan>,
    pub ledgers: Vec<Ledger>,
    pub can_edit: bool,
}

/// Detail and print view: the challan with both of its ledgers.
#[derive(Debug, Serialize)]
pub struct WeaverDetailView {
    pub challan: WeaverChallan,
    pub party_ledger: Option<Ledger>,
    pub vendor_ledger: Option<Ledger>,
    pub can_edit: bool,
}

/// `GET /dashboard/production/weaver-challans`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<WeaverListView>, PageError> {
    let svc = &state.service;
    let (challans, ledgers) = tokio::try_join!(svc.list_weaver_challans(), svc.all_ledgers())?;
    Ok(Json(WeaverListView {
        challans,
        ledgers,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/weaver-challans`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<WeaverChallanUpdate>,
) -> Result<Json<WeaverChallan>, PageError> {
    let challan = state
        .service
        .create_weaver_challan(&form, Some(&viewer.id))
        .await?;
    Ok(Json(challan))
}

/// `GET /dashboard/production/weaver-challans/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<WeaverDetailView>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let challan = state
        .service
        .get_weaver_challan(id)
        .await
        .or_not_found(NOT_FOUND)?;
    let (party_ledger, vendor_ledger) = tokio::join!(
        optional_ledger(&state, challan.ledger_id.as_deref()),
        optional_ledger(&state, challan.vendor_ledger_id.as_deref()),
    );
    Ok(Json(WeaverDetailView {
        challan,
        party_ledger,
        vendor_ledger,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/weaver-challans/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Json(update): Json<WeaverChallanUpdate>,
) -> Result<Json<WeaverChallan>, PageError> {
    require_editor(&viewer)?;
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let challan = state
        .service
        .update_weaver_challan(id, &update, Some(&viewer.id))
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(challan))
}
