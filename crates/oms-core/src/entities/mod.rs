//! Entity structs for every OMS table.
//!
//! Each entity maps to one table created by `oms-db`'s migrations. JSON columns
//! are carried in their normalized, typed form (see [`crate::details`]); the
//! repositories do the normalization when reading rows.

mod change_log;
mod expense;
mod ledger;
mod payment_voucher;
mod product;
mod profile;
mod purchase_order;
mod shorting_entry;
mod stitching_challan;
mod weaver_challan;

pub use change_log::ChangeLog;
pub use expense::Expense;
pub use ledger::Ledger;
pub use payment_voucher::PaymentVoucher;
pub use product::Product;
pub use profile::Profile;
pub use purchase_order::PurchaseOrder;
pub use shorting_entry::ShortingEntry;
pub use stitching_challan::StitchingChallan;
pub use weaver_challan::WeaverChallan;
