use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::entities::{Ledger, PaymentVoucher};
use oms_core::enums::LoggedEntity;
use oms_db::repos::payment_vouchers::PaymentVoucherWithLedger;
use oms_db::updates::payment_voucher::PaymentVoucherUpdate;

use super::{LogsView, degrade, logs_with_names, optional_ledger, parse_id, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const LIST_PATH: &str = "/dashboard/production/payment-vouchers";
const NOT_FOUND: &str = "Payment voucher not found";

#[derive(Debug, Serialize)]
pub struct VoucherListView {
    pub vouchers: Vec<PaymentVoucherWithLedger>,
    pub ledgers: Vec<Ledger>,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct VoucherDetailView {
    pub voucher: PaymentVoucher,
    pub ledger: Option<Ledger>,
    pub can_edit: bool,
    pub can_view_logs: bool,
}

/// `GET /dashboard/production/payment-vouchers`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<VoucherListView>, PageError> {
    let svc = &state.service;
    let (vouchers, ledgers) = tokio::join!(svc.list_payment_vouchers(), svc.all_ledgers());
    Ok(Json(VoucherListView {
        vouchers: vouchers?,
        ledgers: degrade(ledgers, "ledgers"),
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/payment-vouchers`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<PaymentVoucherUpdate>,
) -> Result<Json<PaymentVoucher>, PageError> {
    let voucher = state
        .service
        .create_payment_voucher(&form, Some(&viewer.id))
        .await?;
    Ok(Json(voucher))
}

/// `GET /dashboard/production/payment-vouchers/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<VoucherDetailView>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let voucher = state
        .service
        .get_payment_voucher(id)
        .await
        .or_not_found(NOT_FOUND)?;
    let ledger = optional_ledger(&state, voucher.ledger_id.as_deref()).await;
    Ok(Json(VoucherDetailView {
        voucher,
        ledger,
        can_edit: viewer.user_role.can_edit_records(),
        can_view_logs: viewer.user_role.can_view_logs(),
    }))
}

/// `POST /dashboard/production/payment-vouchers/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Json(update): Json<PaymentVoucherUpdate>,
) -> Result<Json<PaymentVoucher>, PageError> {
    require_editor(&viewer)?;
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let voucher = state
        .service
        .update_payment_voucher(id, &update, Some(&viewer.id))
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(voucher))
}

/// `GET /dashboard/production/payment-vouchers/{id}/logs`
pub async fn logs(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<LogsView>, PageError> {
    if !viewer.user_role.can_view_logs() {
        return Err(PageError::redirect(LIST_PATH));
    }
    let id = parse_id(&raw_id, NOT_FOUND)?;
    state
        .service
        .get_payment_voucher(id)
        .await
        .or_redirect(LIST_PATH)?;
    logs_with_names(&state, LoggedEntity::PaymentVoucher, &id.to_string())
        .await
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use chrono::NaiveDate;
    use oms_core::enums::UserRole;
    use oms_db::updates::payment_voucher::PaymentVoucherUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn voucher_form() -> PaymentVoucherUpdate {
        PaymentVoucherUpdateBuilder::new()
            .date(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap())
            .payment_for("Weaving")
            .payment_type("Bank Transfer")
            .amount(2500.0)
            .build()
    }

    #[tokio::test]
    async fn create_and_read_back() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let Json(voucher) = create(State(state.clone()), staff.clone(), Json(voucher_form()))
            .await
            .unwrap();

        let Json(view) = detail(State(state.clone()), staff.clone(), Path(voucher.id.to_string()))
            .await
            .unwrap();
        assert!((view.voucher.amount - 2500.0).abs() < 1e-9);
        assert!(view.ledger.is_none());
        assert!(!view.can_edit);
        assert!(!view.can_view_logs);

        let Json(listed) = list(State(state.clone()), staff).await.unwrap();
        assert_eq!(listed.vouchers.len(), 1);
        assert_eq!(listed.vouchers[0].ledger_name, None);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let form = PaymentVoucherUpdateBuilder::new().amount(10.0).build();
        let error = create(State(state.clone()), staff, Json(form)).await.unwrap_err();
        assert!(matches!(error, PageError::BadRequest(_)));
    }

    #[tokio::test]
    async fn edits_show_up_in_logs_for_managers_only() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let Json(voucher) = create(State(state.clone()), manager.clone(), Json(voucher_form()))
            .await
            .unwrap();
        let id = voucher.id.to_string();

        let form = PaymentVoucherUpdateBuilder::new().amount(3000.0).build();
        update(State(state.clone()), manager.clone(), Path(id.clone()), Json(form))
            .await
            .unwrap();

        let Json(view) = logs(State(state.clone()), manager, Path(id.clone()))
            .await
            .unwrap();
        assert_eq!(view.logs.len(), 1);
        assert_eq!(view.logs[0].changed_by_name, "user_mgr");
        assert_eq!(view.record_id, id);

        let error = logs(State(state.clone()), staff, Path(id)).await.unwrap_err();
        assert!(matches!(error, PageError::Redirect(path) if path == LIST_PATH));
    }

    #[tokio::test]
    async fn logs_of_missing_voucher_redirect_to_list() {
        let state = test_state().await;
        let admin = viewer(&state, "user_admin", UserRole::Admin).await;
        let error = logs(State(state.clone()), admin, Path("55".into()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::Redirect(path) if path == LIST_PATH));
    }
}
