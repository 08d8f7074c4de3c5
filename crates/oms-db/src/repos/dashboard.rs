//! Dashboard headline counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::service::OmsService;

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub today_orders: i64,
    pub total_orders: i64,
    pub active_products: i64,
    /// Ledgers carry no status column, so every ledger counts as active.
    pub active_ledgers: i64,
}

impl OmsService {
    /// Gather the dashboard counts, running the four queries together.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` any count produces.
    pub async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats, DatabaseError> {
        let (today_orders, total_orders, active_products, active_ledgers) = tokio::try_join!(
            self.count_purchase_orders_since(today),
            self.count_purchase_orders(),
            self.count_active_products(),
            self.count_ledgers(),
        )?;
        Ok(DashboardStats {
            today_orders,
            total_orders,
            active_products,
            active_ledgers,
        })
    }
}
