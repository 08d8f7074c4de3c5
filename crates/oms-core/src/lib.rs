//! # oms-core
//!
//! Core types and business rules for the textile order/inventory management system.
//!
//! This crate provides the foundational types shared across all OMS crates:
//! - Entity structs for every table (profiles, ledgers, challans, expenses, ...)
//! - Role, classification, and status enums
//! - Tolerant parsers for the JSON columns (`product_size`, `quality_details`, PO items)
//! - Inventory classification and finished-stock rules
//! - Batch cost aggregation and barcode derivation
//! - Onboarding validation and role-based permissions
//! - Cross-cutting error types

pub mod change_detail;
pub mod costing;
pub mod details;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod inventory;
pub mod permissions;
pub mod validation;
