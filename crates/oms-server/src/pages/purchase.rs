use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::entities::Ledger;
use oms_db::repos::purchase_orders::PurchaseOrderWithLedger;
use oms_db::updates::purchase_order::PurchaseOrderUpdate;

use super::{optional_ledger, parse_id, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const NOT_FOUND: &str = "Purchase order not found";

#[derive(Debug, Serialize)]
pub struct PurchaseListView {
    pub orders: Vec<PurchaseOrderWithLedger>,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct PurchaseDetailView {
    pub order: PurchaseOrderWithLedger,
    /// Contact details of the linked ledger, when it still exists.
    pub ledger: Option<Ledger>,
    pub can_edit: bool,
}

/// `GET /dashboard/purchase`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<PurchaseListView>, PageError> {
    let orders = state.service.list_purchase_orders().await?;
    Ok(Json(PurchaseListView {
        orders,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/purchase`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<PurchaseOrderUpdate>,
) -> Result<Json<PurchaseOrderWithLedger>, PageError> {
    let order = state
        .service
        .create_purchase_order(&form, Some(&viewer.id))
        .await?;
    Ok(Json(order))
}

/// `GET /dashboard/purchase/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<PurchaseDetailView>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let order = state
        .service
        .get_purchase_order(id)
        .await
        .or_not_found(NOT_FOUND)?;
    let ledger = optional_ledger(&state, order.order.ledger_id.as_deref()).await;
    Ok(Json(PurchaseDetailView {
        order,
        ledger,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/purchase/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Json(update): Json<PurchaseOrderUpdate>,
) -> Result<Json<PurchaseOrderWithLedger>, PageError> {
    require_editor(&viewer)?;
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let order = state
        .service
        .update_purchase_order(id, &update)
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use chrono::NaiveDate;
    use oms_core::details::PurchaseOrderItem;
    use oms_core::enums::{PurchaseOrderStatus, UserRole};
    use oms_db::repos::ledgers::NewLedger;
    use oms_db::updates::ledger::LedgerUpdateBuilder;
    use oms_db::updates::purchase_order::PurchaseOrderUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn order_form(ledger_id: Option<&str>) -> PurchaseOrderUpdate {
        PurchaseOrderUpdateBuilder::new()
            .po_number("PO-2025-001")
            .po_date(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap())
            .supplier_name("Shree Threads")
            .ledger_id(ledger_id.map(String::from))
            .items(vec![PurchaseOrderItem {
                item_name: "Cotton yarn".into(),
                quantity: 5.0,
                unit_price: 120.0,
                ..Default::default()
            }])
            .build()
    }

    #[tokio::test]
    async fn staff_creates_but_cannot_edit() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;

        let Json(created) = create(State(state.clone()), staff.clone(), Json(order_form(None)))
            .await
            .unwrap();
        assert!((created.order.total_amount - 600.0).abs() < 1e-9);
        assert_eq!(created.order.status, PurchaseOrderStatus::Draft);
        assert_eq!(created.order.created_by.as_deref(), Some("user_staff"));

        let form = PurchaseOrderUpdateBuilder::new().supplier_name("Other").build();
        let error = update(
            State(state.clone()),
            staff.clone(),
            Path(created.order.id.to_string()),
            Json(form),
        )
        .await
        .unwrap_err();
        assert!(matches!(error, PageError::Forbidden));

        let Json(view) = list(State(state.clone()), staff).await.unwrap();
        assert_eq!(view.orders.len(), 1);
        assert!(!view.can_edit);
    }

    #[tokio::test]
    async fn detail_includes_ledger_contact() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        state
            .service
            .create_ledger(
                &NewLedger {
                    ledger_id: Some("LED-1".into()),
                    fields: LedgerUpdateBuilder::new()
                        .business_name("Shree Threads")
                        .mobile_number(Some("9876500000".into()))
                        .build(),
                },
                None,
            )
            .await
            .unwrap();
        let Json(created) = create(State(state.clone()), manager.clone(), Json(order_form(Some("LED-1"))))
            .await
            .unwrap();

        let Json(view) = detail(State(state.clone()), manager, Path(created.order.id.to_string()))
            .await
            .unwrap();
        assert_eq!(view.order.ledger_name.as_deref(), Some("Shree Threads"));
        assert_eq!(
            view.ledger.and_then(|l| l.mobile_number).as_deref(),
            Some("9876500000")
        );
        assert!(view.can_edit);
    }

    #[tokio::test]
    async fn bad_or_unknown_id_is_404() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        for raw in ["abc", "999"] {
            let error = detail(State(state.clone()), staff.clone(), Path(raw.into()))
                .await
                .unwrap_err();
            assert!(matches!(error, PageError::NotFound(msg) if msg == NOT_FOUND));
        }
    }

    #[tokio::test]
    async fn status_update_keeps_items() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        let Json(created) = create(State(state.clone()), manager.clone(), Json(order_form(None)))
            .await
            .unwrap();

        let form = PurchaseOrderUpdateBuilder::new()
            .status(PurchaseOrderStatus::Sent)
            .build();
        let Json(updated) = update(State(state.clone()), manager, Path(created.order.id.to_string()), Json(form))
            .await
            .unwrap();
        assert_eq!(updated.order.status, PurchaseOrderStatus::Sent);
        assert_eq!(updated.order.items.len(), 1);
    }
}
