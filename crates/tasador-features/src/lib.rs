//! Feature derivation for the Tasador valuation pipeline.
//!
//! This crate turns a stock panel into model inputs:
//! - Returns: period-over-period relative change per base field, per stock
//! - Labels: next-period values shifted onto the current row, per stock
//! - DCF: a fixed-horizon discounted cash flow estimate per record
//! - Registry: metadata describing every input field
//!
//! Every computation that looks at a neighbouring row runs inside one stock
//! group, so no value crosses a stock boundary.
//!
//! # Example
//!
//! ```ignore
//! use tasador_features::{derive_returns, next_period};
//! use tasador_traits::Field;
//!
//! for group in derive_returns(&panel) {
//!     let labels = next_period(&group.rows, |row| row.record.value(Field::Pe));
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod dcf;
pub mod labels;
pub mod registry;
pub mod returns;

// Re-export key types
pub use dcf::{discounted_cash_flow, record_dcf};
pub use labels::next_period;
pub use registry::{FieldCategory, FieldInfo, available_fields, fields_by_category, get_field_info};
pub use returns::{
    EngineeredGroup, EngineeredRow, derive_group, derive_returns, factor_feature_names,
    relative_change,
};
