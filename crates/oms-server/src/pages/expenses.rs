use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::entities::{Expense, Ledger};
use oms_db::error::DatabaseError;
use oms_db::repos::expenses::ExpenseWithLedger;
use oms_db::updates::expense::ExpenseUpdate;

use super::{degrade, optional_ledger, parse_id, require_editor};
use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const NOT_FOUND: &str = "Expense not found";
const OTHER: &str = "Other";

#[derive(Debug, Serialize)]
pub struct ExpenseListView {
    pub expenses: Vec<ExpenseWithLedger>,
    pub ledgers: Vec<Ledger>,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct ExpenseDetailView {
    pub expense: Expense,
    pub ledger_name: Option<String>,
    pub batch_numbers: Vec<String>,
    /// `expense_for` with "Other" spelled out by the description.
    pub expense_for: Vec<String>,
    pub created_by_name: Option<String>,
    pub can_edit: bool,
}

fn expense_for_labels(expense: &Expense) -> Vec<String> {
    let description = expense
        .other_expense_description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    expense
        .expense_for
        .iter()
        .map(|item| match description {
            Some(text) if item == OTHER => text.to_string(),
            _ => item.clone(),
        })
        .collect()
}

async fn challan_batches(state: &AppState, challan_no: Option<&str>) -> Vec<String> {
    let Some(no) = challan_no.filter(|no| !no.is_empty()) else {
        return Vec::new();
    };
    match state.service.get_stitching_challan_by_number(no).await {
        Ok(challan) => challan.batch_number,
        Err(DatabaseError::NoResult) => Vec::new(),
        Err(error) => {
            tracing::warn!(%error, challan_no = no, "challan lookup failed");
            Vec::new()
        }
    }
}

async fn expense_ledger_name(state: &AppState, expense: &Expense) -> Option<String> {
    if let Some(ledger) = optional_ledger(state, expense.manual_ledger_id.as_deref()).await {
        return Some(ledger.business_name);
    }
    optional_ledger(state, expense.ledger_id.as_deref())
        .await
        .map(|l| l.business_name)
}

/// `GET /dashboard/production/expenses`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<ExpenseListView>, PageError> {
    let svc = &state.service;
    let (expenses, ledgers) = tokio::join!(svc.list_expenses(), svc.all_ledgers());
    Ok(Json(ExpenseListView {
        expenses: expenses?,
        ledgers: degrade(ledgers, "ledgers"),
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/expenses`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<ExpenseUpdate>,
) -> Result<Json<Expense>, PageError> {
    let expense = state.service.create_expense(&form, Some(&viewer.id)).await?;
    Ok(Json(expense))
}

/// `GET /dashboard/production/expenses/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
) -> Result<Json<ExpenseDetailView>, PageError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let expense = state
        .service
        .get_expense(id)
        .await
        .or_not_found(NOT_FOUND)?;

    let creator = async {
        match expense.created_by.as_deref() {
            Some(user_id) => degrade(state.service.find_profile(user_id).await, "expense creator"),
            None => None,
        }
    };
    let (ledger_name, batch_numbers, creator) = tokio::join!(
        expense_ledger_name(&state, &expense),
        challan_batches(&state, expense.challan_no.as_deref()),
        creator,
    );

    Ok(Json(ExpenseDetailView {
        ledger_name,
        batch_numbers,
        expense_for: expense_for_labels(&expense),
        created_by_name: creator.map(|p| p.person_name().unwrap_or_else(|| p.display_name())),
        expense,
        can_edit: viewer.user_role.can_edit_records(),
    }))
}

/// `POST /dashboard/production/expenses/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Json(update): Json<ExpenseUpdate>,
) -> Result<Json<Expense>, PageError> {
    require_editor(&viewer)?;
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let expense = state
        .service
        .update_expense(id, &update, Some(&viewer.id))
        .await
        .or_not_found(NOT_FOUND)?;
    Ok(Json(expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, viewer};
    use chrono::NaiveDate;
    use oms_core::enums::{LoggedEntity, UserRole};
    use oms_db::repos::ledgers::NewLedger;
    use oms_db::updates::expense::ExpenseUpdateBuilder;
    use oms_db::updates::ledger::LedgerUpdateBuilder;
    use oms_db::updates::stitching_challan::StitchingChallanUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn expense_form() -> ExpenseUpdate {
        ExpenseUpdateBuilder::new()
            .expense_date(NaiveDate::from_ymd_opt(2025, 7, 3).unwrap())
            .challan_no(Some("SC-4".into()))
            .expense_for(vec!["Stitching".into(), "Other".into()])
            .other_expense_description(Some("Buttons".into()))
            .amount_before_gst(1000.0)
            .sgst(Some("9%".into()))
            .cgst(Some("9%".into()))
            .build()
    }

    async fn seed_ledger(state: &AppState, id: &str, name: &str) {
        state
            .service
            .create_ledger(
                &NewLedger {
                    ledger_id: Some(id.into()),
                    fields: LedgerUpdateBuilder::new().business_name(name).build(),
                },
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn detail_resolves_names_and_batches() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        seed_ledger(&state, "LED-A", "Auto Ledger").await;
        seed_ledger(&state, "LED-M", "Manual Ledger").await;
        let challan = StitchingChallanUpdateBuilder::new()
            .challan_no("SC-4")
            .date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
            .batch_number(vec!["B-1".into(), "B-2".into()])
            .quality("Rayon")
            .build();
        state.service.create_stitching_challan(&challan, None).await.unwrap();

        let form = ExpenseUpdate {
            ledger_id: Some(Some("LED-A".into())),
            manual_ledger_id: Some(Some("LED-M".into())),
            ..expense_form()
        };
        let Json(expense) = create(State(state.clone()), staff.clone(), Json(form))
            .await
            .unwrap();
        assert!((expense.cost - 1180.0).abs() < 1e-9);

        let Json(view) = detail(State(state.clone()), staff, Path(expense.id.to_string()))
            .await
            .unwrap();
        assert_eq!(view.ledger_name.as_deref(), Some("Manual Ledger"));
        assert_eq!(view.batch_numbers, vec!["B-1", "B-2"]);
        assert_eq!(view.expense_for, vec!["Stitching", "Buttons"]);
        assert_eq!(view.created_by_name.as_deref(), Some("user_staff"));
        assert!(!view.can_edit);
    }

    #[tokio::test]
    async fn detail_tolerates_missing_references() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        let form = ExpenseUpdateBuilder::new()
            .expense_date(NaiveDate::from_ymd_opt(2025, 7, 3).unwrap())
            .challan_no(Some("SC-gone".into()))
            .amount_before_gst(10.0)
            .build();
        let expense = state.service.create_expense(&form, None).await.unwrap();

        let Json(view) = detail(State(state.clone()), staff, Path(expense.id.to_string()))
            .await
            .unwrap();
        assert_eq!(view.ledger_name, None);
        assert!(view.batch_numbers.is_empty());
        assert_eq!(view.created_by_name, None);
    }

    #[test]
    fn other_is_replaced_only_with_a_description() {
        let mut expense = Expense {
            id: 1,
            expense_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            challan_no: None,
            ledger_id: None,
            manual_ledger_id: None,
            expense_for: vec!["Other".into(), "Transport".into()],
            other_expense_description: Some("  ".into()),
            amount_before_gst: 0.0,
            sgst: None,
            cgst: None,
            igst: None,
            cost: 0.0,
            created_by: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        assert_eq!(expense_for_labels(&expense), vec!["Other", "Transport"]);
        expense.other_expense_description = Some("Packing".into());
        assert_eq!(expense_for_labels(&expense), vec!["Packing", "Transport"]);
    }

    #[tokio::test]
    async fn update_recomputes_cost_and_logs() {
        let state = test_state().await;
        let manager = viewer(&state, "user_mgr", UserRole::Manager).await;
        let Json(expense) = create(State(state.clone()), manager.clone(), Json(expense_form()))
            .await
            .unwrap();
        let form = ExpenseUpdateBuilder::new().amount_before_gst(2000.0).build();

        let Json(updated) = update(State(state.clone()), manager, Path(expense.id.to_string()), Json(form))
            .await
            .unwrap();
        assert!((updated.cost - 2360.0).abs() < 1e-9);
        let logs = state
            .service
            .list_change_logs(LoggedEntity::Expense, &expense.id.to_string())
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[tokio::test]
    async fn list_includes_ledger_names() {
        let state = test_state().await;
        let staff = viewer(&state, "user_staff", UserRole::Staff).await;
        seed_ledger(&state, "LED-M", "Manual Ledger").await;
        let form = ExpenseUpdate {
            manual_ledger_id: Some(Some("LED-M".into())),
            ..expense_form()
        };
        create(State(state.clone()), staff.clone(), Json(form))
            .await
            .unwrap();
        let Json(view) = list(State(state.clone()), staff).await.unwrap();
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.expenses[0].ledger_name.as_deref(), Some("Manual Ledger"));
        assert_eq!(view.ledgers.len(), 1);
    }
}
