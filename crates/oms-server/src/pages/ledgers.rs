use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use oms_core::entities::{Expense, Ledger, PaymentVoucher, StitchingChallan, WeaverChallan};
use oms_core::enums::LoggedEntity;
use oms_db::repos::ledgers::{LedgerFilter, LedgerFilterOptions, LedgerListItem, NewLedger};
use oms_db::updates::ledger::LedgerUpdate;

use super::{LogsView, degrade, logs_with_names, or_blank, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::{Session, Viewer};
use crate::state::AppState;

/// Raw list query. Blank or malformed values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    pub search: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page: Option<String>,
}

fn lenient_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

impl LedgerQuery {
    fn to_filter(&self) -> LedgerFilter {
        LedgerFilter {
            search: self.search.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            from_date: lenient_date(self.from_date.as_deref()),
            to_date: lenient_date(self.to_date.as_deref()),
            page: self
                .page
                .as_deref()
                .and_then(|p| p.trim().parse().ok())
                .filter(|p| *p > 0),
        }
    }
}

/// A ledger list row with every nullable column rendered as text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerRow {
    pub ledger_id: String,
    pub business_name: String,
    pub contact_person_name: String,
    pub mobile_number: String,
    pub email: String,
    pub gst_number: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub creator_email: String,
}

impl From<LedgerListItem> for LedgerRow {
    fn from(item: LedgerListItem) -> Self {
        let ledger = item.ledger;
        Self {
            contact_person_name: or_blank(ledger.contact_person_name.as_deref()),
            mobile_number: or_blank(ledger.mobile_number.as_deref()),
            email: or_blank(ledger.email.as_deref()),
            gst_number: or_blank(ledger.gst_number.as_deref()),
            city: or_blank(ledger.city.as_deref()),
            state: or_blank(ledger.state.as_deref()),
            creator_email: or_blank(item.creator_email.as_deref()),
            ledger_id: ledger.ledger_id,
            business_name: ledger.business_name,
            created_at: ledger.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerListView {
    pub ledgers: Vec<LedgerRow>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
    pub filter_options: LedgerFilterOptions,
    pub can_create: bool,
}

/// Business done with a ledger across the production tables.
#[derive(Debug, Default, Serialize)]
pub struct LedgerSummary {
    pub stitching_challans: Vec<StitchingChallan>,
    pub expenses: Vec<Expense>,
    pub payment_vouchers: Vec<PaymentVoucher>,
    pub total_stitched_qty: i64,
    pub total_expense_cost: f64,
    pub total_paid: f64,
    pub balance: f64,
}

impl LedgerSummary {
    fn new(
        stitching_challans: Vec<StitchingChallan>,
        expenses: Vec<Expense>,
        payment_vouchers: Vec<PaymentVoucher>,
    ) -> Self {
        let total_expense_cost: f64 = expenses.iter().map(|e| e.cost).sum();
        let total_paid: f64 = payment_vouchers.iter().map(|v| v.amount).sum();
        Self {
            total_stitched_qty: stitching_challans.iter().map(|c| c.quantity).sum(),
            total_expense_cost,
            total_paid,
            balance: total_expense_cost - total_paid,
            stitching_challans,
            expenses,
            payment_vouchers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerDetailView {
    pub ledger: Ledger,
    pub vendor_challans: Vec<WeaverChallan>,
    pub summary: LedgerSummary,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct LedgerPrintView {
    pub ledger: Ledger,
    pub weaver_challans: Vec<WeaverChallan>,
    pub payment_vouchers: Vec<PaymentVoucher>,
    pub total_vendor_amount: f64,
    pub total_paid: f64,
}

const NOT_FOUND: &str = "Ledger not found";

/// `GET /dashboard/ledgers`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerListView>, PageError> {
    let svc = &state.service;
    let filter = query.to_filter();
    let (page, filter_options) = tokio::join!(
        svc.list_ledgers(&filter, state.config.general.ledger_page_size),
        svc.ledger_filter_options(),
    );
    let page = page?;

    Ok(Json(LedgerListView {
        ledgers: page.ledgers.into_iter().map(LedgerRow::from).collect(),
        total_count: page.total_count,
        page: page.page,
        page_size: page.page_size,
        filter_options: degrade(filter_options, "ledger filter options"),
        can_create: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/ledgers`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<NewLedger>,
) -> Result<Json<Ledger>, PageError> {
    require_editor(&viewer)?;
    let ledger = state.service.create_ledger(&form, Some(&viewer.id)).await?;
    Ok(Json(ledger))
}

/// `GET /dashboard/ledgers/{ledger_id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(ledger_id): Path<String>,
) -> Result<Json<LedgerDetailView>, PageError> {
    let svc = &state.service;
    let ledger = svc.get_ledger(&ledger_id).await.or_not_found(NOT_FOUND)?;

    let (vendor_challans, stitching, expenses, vouchers) = tokio::join!(
        svc.weaver_challans_for_vendor(&ledger_id),
        svc.stitching_challans_for_ledger(&ledger_id),
        svc.expenses_for_ledger(&ledger_id),
        svc.payment_vouchers_for_ledger(&ledger_id),
    );

    Ok(Json(LedgerDetailView {
        ledger,
        vendor_challans: degrade(vendor_challans, "vendor challans"),
        summary: LedgerSummary::new(
            degrade(stitching, "ledger stitching challans"),
            degrade(expenses, "ledger expenses"),
            degrade(vouchers, "ledger payment vouchers"),
        ),
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/ledgers/{ledger_id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(ledger_id): Path<String>,
    Json(update): Json<LedgerUpdate>,
) -> Result<Json<Ledger>, PageError> {
    require_editor(&viewer)?;
    let ledger = state
        .service
        .update_ledger(&ledger_id, &update, Some(&viewer.id))
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(ledger))
}

/// `GET /dashboard/ledgers/{ledger_id}/logs`
pub async fn logs(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(ledger_id): Path<String>,
) -> Result<Json<LogsView>, PageError> {
    if !viewer.user_role.can_view_logs() {
        return Err(PageError::redirect(format!("/dashboard/ledgers/{ledger_id}")));
    }
    state
        .service
        .get_ledger(&ledger_id)
        .await
        .or_not_found(NOT_FOUND)?;
    logs_with_names(&state, LoggedEntity::Ledger, &ledger_id)
        .await
        .map(Json)
}

/// `GET /print/ledgers/{ledger_id}`
pub async fn print(
    State(state): State<AppState>,
    _session: Session,
    Path(ledger_id): Path<String>,
) -> Result<Json<LedgerPrintView>, PageError> {
    let svc = &state.service;
    let ledger = svc.get_ledger(&ledger_id).await.or_not_found(NOT_FOUND)?;
    let (weaver_challans, payment_vouchers) = tokio::join!(
        svc.weaver_challans_for_ledger(&ledger_id),
        svc.payment_vouchers_for_ledger(&ledger_id),
    );
    let weaver_challans = degrade(weaver_challans, "ledger weaver challans");
    let payment_vouchers = degrade(payment_vouchers, "ledger payment vouchers");

    Ok(Json(LedgerPrintView {
        total_vendor_amount: weaver_challans
            .iter()
            .map(|c| c.vendor_amount.unwrap_or(0.0))
            .sum(),
        total_paid: payment_vouchers.iter().map(|v| v.amount).sum(),
        ledger,
        weaver_challans,
        payment_vouchers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use oms_core::enums::UserRole;
    use oms_db::updates::ledger::LedgerUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn new_ledger(id: Option<&str>, name: &str) -> NewLedger {
        NewLedger {
            ledger_id: id.map(String::from),
            fields: LedgerUpdateBuilder::new()
                .business_name(name)
                .city(Some("Surat".into()))
                .build(),
        }
    }

    #[test]
    fn query_ignores_blank_and_bad_values() {
        let query = LedgerQuery {
            search: Some("shree".into()),
            from_date: Some(String::new()),
            to_date: Some("2025-02-30".into()),
            page: Some("0".into()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.search.as_deref(), Some("shree"));
        assert_eq!(filter.from_date, None);
        assert_eq!(filter.to_date, None);
        assert_eq!(filter.page, None);
    }

    #[tokio::test]
    async fn staff_cannot_create_but_can_browse() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;

        let error = create(State(state.clone()), staff.clone(), Json(new_ledger(None, "Shree Textiles")))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::Forbidden));

        let Json(created) = create(State(state.clone()), manager, Json(new_ledger(None, "Shree Textiles")))
            .await
            .unwrap();
        assert!(created.ledger_id.starts_with("LED-"));

        let Json(view) = list(State(state.clone()), staff, Query(LedgerQuery::default()))
            .await
            .unwrap();
        assert_eq!(view.total_count, 1);
        assert!(!view.can_create);
        assert_eq!(view.ledgers[0].contact_person_name, "");
        assert_eq!(view.ledgers[0].creator_email, "user_mgr@oms.test");
        assert_eq!(view.filter_options.cities, vec!["Surat"]);
    }

    #[tokio::test]
    async fn detail_of_unknown_ledger_is_404() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let error = detail(State(state.clone()), staff, Path("LED-missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::NotFound(msg) if msg == NOT_FOUND));
    }

    #[tokio::test]
    async fn edit_is_logged_and_visible_to_managers() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        create(State(state.clone()), manager.clone(), Json(new_ledger(Some("LED-1"), "Old Name")))
            .await
            .unwrap();

        let update_form = LedgerUpdateBuilder::new().business_name("New Name").build();
        let Json(updated) = update(State(state.clone()), manager.clone(), Path("LED-1".into()), Json(update_form))
            .await
            .unwrap();
        assert_eq!(updated.business_name, "New Name");

        let Json(view) = logs(State(state.clone()), manager, Path("LED-1".into()))
            .await
            .unwrap();
        assert_eq!(view.logs.len(), 1);
        assert_eq!(view.logs[0].changed_by_name, "user_mgr");

        let error = logs(State(state.clone()), staff, Path("LED-1".into()))
            .await
            .unwrap_err();
        assert!(matches!(error, PageError::Redirect(path) if path == "/dashboard/ledgers/LED-1"));
    }

    #[tokio::test]
    async fn detail_summarizes_ledger_business() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        create(State(state.clone()), manager.clone(), Json(new_ledger(Some("LED-1"), "Shree Textiles")))
            .await
            .unwrap();
        let voucher = oms_db::updates::payment_voucher::PaymentVoucherUpdateBuilder::new()
            .date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
            .ledger_id(Some("LED-1".into()))
            .payment_for("Stitching")
            .payment_type("Cash")
            .amount(400.0)
            .build();
        state.service.create_payment_voucher(&voucher, None).await.unwrap();
        let expense = oms_db::updates::expense::ExpenseUpdateBuilder::new()
            .expense_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
            .ledger_id(Some("LED-1".into()))
            .amount_before_gst(1000.0)
            .build();
        state.service.create_expense(&expense, None).await.unwrap();

        let Json(view) = detail(State(state.clone()), manager, Path("LED-1".into()))
            .await
            .unwrap();
        assert!(view.can_edit);
        assert!((view.summary.total_expense_cost - 1000.0).abs() < 1e-9);
        assert!((view.summary.total_paid - 400.0).abs() < 1e-9);
        assert!((view.summary.balance - 600.0).abs() < 1e-9);
    }
}
