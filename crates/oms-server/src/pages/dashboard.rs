use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use oms_core::entities::WeaverChallan;
use oms_core::enums::UserRole;
use oms_core::inventory::{BatchData, FinishedStock, batch_data, finished_stock};
use oms_db::repos::dashboard::DashboardStats;
use oms_db::repos::purchase_orders::PurchaseOrderWithLedger;

use crate::error::PageError;
use crate::session::Viewer;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub display_name: String,
    pub role: UserRole,
    pub stats: DashboardStats,
    pub recent_orders: Vec<PurchaseOrderWithLedger>,
    pub recent_weaver_challans: Vec<WeaverChallan>,
}

#[derive(Debug, Serialize)]
pub struct ProductionView {
    pub finished_stock: Vec<FinishedStock>,
    pub batches: Vec<BatchData>,
}

/// `GET /dashboard`
pub async fn home(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<DashboardView>, PageError> {
    let svc = &state.service;
    let limit = state.config.general.recent_limit;
    let (stats, recent_orders, recent_weaver_challans) = tokio::try_join!(
        svc.dashboard_stats(Utc::now().date_naive()),
        svc.recent_purchase_orders(limit),
        svc.recent_weaver_challans(limit),
    )?;

    Ok(Json(DashboardView {
        display_name: viewer.display_name(),
        role: viewer.user_role,
        stats,
        recent_orders,
        recent_weaver_challans,
    }))
}

/// `GET /dashboard/production`
pub async fn production(
    State(state): State<AppState>,
    Viewer(_viewer): Viewer,
) -> Result<Json<ProductionView>, PageError> {
    let svc = &state.service;
    let (weaver_challans, shorting_entries, stitching_challans, expenses) = tokio::try_join!(
        svc.list_weaver_challans(),
        svc.all_shorting_entries(),
        svc.list_stitching_challans(),
        svc.all_expenses(),
    )?;

    Ok(Json(ProductionView {
        finished_stock: finished_stock(&weaver_challans, &shorting_entries, &stitching_challans),
        batches: batch_data(&weaver_challans, &stitching_challans, &expenses),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use oms_core::details::PurchaseOrderItem;
    use oms_db::updates::purchase_order::PurchaseOrderUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn home_counts_today_and_lists_recent() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        for no in ["PO-1", "PO-2"] {
            let form = PurchaseOrderUpdateBuilder::new()
                .po_number(no)
                .po_date(Utc::now().date_naive())
                .supplier_name("Shree Threads")
                .items(vec![PurchaseOrderItem {
                    item_name: "Thread".into(),
                    quantity: 2.0,
                    unit_price: 10.0,
                    ..Default::default()
                }])
                .build();
            state.service.create_purchase_order(&form, None).await.unwrap();
        }

        let Json(view) = home(State(state.clone()), staff).await.unwrap();
        assert_eq!(view.display_name, "user_staff");
        assert_eq!(view.stats.total_orders, 2);
        assert_eq!(view.stats.today_orders, 2);
        assert_eq!(view.recent_orders.len(), 2);
        assert!(view.recent_weaver_challans.is_empty());
    }

    #[tokio::test]
    async fn production_on_empty_store_is_empty() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let Json(view) = production(State(state.clone()), staff).await.unwrap();
        assert!(view.finished_stock.is_empty());
        assert!(view.batches.is_empty());
    }
}
