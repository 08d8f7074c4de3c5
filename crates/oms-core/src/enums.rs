//! Roles, classifications, statuses, and logged entity types.
//!
//! Stored values are the exact strings the hosted tables hold (`"Admin"`,
//! `"good"`, `"Active"`, ...). Every enum exposes `as_str()` for SQL binding and
//! a tolerant or strict parser depending on whether legacy rows may carry
//! unexpected values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role stored in `profiles.user_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
        }
    }

    /// Read a nullable role column. Unknown or missing roles get the least
    /// privileged role.
    #[must_use]
    pub fn from_db(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or(Self::Staff)
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Manager" => Ok(Self::Manager),
            "Staff" => Ok(Self::Staff),
            other => Err(CoreError::Validation(format!("Invalid role '{other}'"))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InventoryClassification
// ---------------------------------------------------------------------------

/// Post-hoc quality tag applied to a stitching challan.
///
/// There is no state machine: any classification may replace any other,
/// including itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InventoryClassification {
    Good,
    Bad,
    Wastage,
    Shorting,
}

impl InventoryClassification {
    pub const ALL: [Self; 4] = [Self::Good, Self::Bad, Self::Wastage, Self::Shorting];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Wastage => "wastage",
            Self::Shorting => "shorting",
        }
    }
}

impl FromStr for InventoryClassification {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation("Invalid classification".into()))
    }
}

impl fmt::Display for InventoryClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProductStatus
// ---------------------------------------------------------------------------

/// Catalog status stored in `products.product_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// NULL or unrecognized statuses read as `Active`, matching the column default.
    #[must_use]
    pub fn from_db(value: Option<&str>) -> Self {
        match value {
            Some(s) if s.eq_ignore_ascii_case("inactive") => Self::Inactive,
            _ => Self::Active,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PurchaseOrderStatus
// ---------------------------------------------------------------------------

/// Status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Sent,
    Confirmed,
    Partial,
    Completed,
    Cancelled,
}

impl PurchaseOrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Confirmed => "Confirmed",
            Self::Partial => "Partial",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    #[must_use]
    pub fn from_db(value: Option<&str>) -> Self {
        match value {
            Some("Sent") => Self::Sent,
            Some("Confirmed") => Self::Confirmed,
            Some("Partial") => Self::Partial,
            Some("Completed") => Self::Completed,
            Some("Cancelled") => Self::Cancelled,
            _ => Self::Draft,
        }
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LoggedEntity
// ---------------------------------------------------------------------------

/// Entities whose edits are appended to a `*_logs` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoggedEntity {
    Ledger,
    WeaverChallan,
    StitchingChallan,
    Expense,
    PaymentVoucher,
}

impl LoggedEntity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::WeaverChallan => "weaver_challan",
            Self::StitchingChallan => "stitching_challan",
            Self::Expense => "expense",
            Self::PaymentVoucher => "payment_voucher",
        }
    }

    /// Log table and the column holding the edited record's key.
    #[must_use]
    pub const fn log_table(self) -> (&'static str, &'static str) {
        match self {
            Self::Ledger => ("ledger_logs", "ledger_id"),
            Self::WeaverChallan => ("weaver_challan_logs", "challan_id"),
            Self::StitchingChallan => ("isteaching_challan_logs", "challan_id"),
            Self::Expense => ("expense_logs", "expense_id"),
            Self::PaymentVoucher => ("payment_voucher_logs", "payment_voucher_id"),
        }
    }
}

impl fmt::Display for LoggedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(role_admin, UserRole, UserRole::Admin, "Admin");
    test_serde_roundtrip!(role_manager, UserRole, UserRole::Manager, "Manager");
    test_serde_roundtrip!(
        class_wastage,
        InventoryClassification,
        InventoryClassification::Wastage,
        "wastage"
    );
    test_serde_roundtrip!(
        class_shorting,
        InventoryClassification,
        InventoryClassification::Shorting,
        "shorting"
    );
    test_serde_roundtrip!(product_inactive, ProductStatus, ProductStatus::Inactive, "Inactive");
    test_serde_roundtrip!(
        po_partial,
        PurchaseOrderStatus,
        PurchaseOrderStatus::Partial,
        "Partial"
    );
    test_serde_roundtrip!(
        logged_stitching,
        LoggedEntity,
        LoggedEntity::StitchingChallan,
        "stitching_challan"
    );

    #[test]
    fn as_str_matches_serde() {
        for c in InventoryClassification::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
    }

    #[test]
    fn classification_accepts_exactly_four_values() {
        for s in ["good", "bad", "wastage", "shorting"] {
            assert_eq!(s.parse::<InventoryClassification>().unwrap().as_str(), s);
        }
        for s in ["Good", "", "damaged", "good "] {
            let err = s.parse::<InventoryClassification>().unwrap_err();
            assert_eq!(err.to_string(), "Validation error: Invalid classification");
        }
    }

    #[test]
    fn unknown_role_reads_as_staff() {
        assert_eq!(UserRole::from_db(None), UserRole::Staff);
        assert_eq!(UserRole::from_db(Some("Owner")), UserRole::Staff);
        assert_eq!(UserRole::from_db(Some("Manager")), UserRole::Manager);
    }

    #[test]
    fn product_status_defaults_to_active() {
        assert_eq!(ProductStatus::from_db(None), ProductStatus::Active);
        assert_eq!(ProductStatus::from_db(Some("inactive")), ProductStatus::Inactive);
    }

    #[test]
    fn po_status_defaults_to_draft() {
        assert_eq!(PurchaseOrderStatus::from_db(None), PurchaseOrderStatus::Draft);
        assert_eq!(
            PurchaseOrderStatus::from_db(Some("Completed")),
            PurchaseOrderStatus::Completed
        );
    }

    #[test]
    fn log_tables_are_distinct() {
        let all = [
            LoggedEntity::Ledger,
            LoggedEntity::WeaverChallan,
            LoggedEntity::StitchingChallan,
            LoggedEntity::Expense,
            LoggedEntity::PaymentVoucher,
        ];
        let tables: std::collections::HashSet<_> = all.iter().map(|e| e.log_table().0).collect();
        assert_eq!(tables.len(), all.len());
    }
}
