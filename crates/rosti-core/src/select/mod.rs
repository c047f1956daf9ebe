//! Resolution of catalog entries
//!
//! Turns caller hints (flag values, remembered state, Rostifile names) into
//! concrete identifiers. The `resolve_*` functions are pure over a catalog
//! snapshot; the `select_*` wrappers fetch the snapshot first.

pub mod company;
pub mod plan;
pub mod runtime;

pub use company::{CompanySelection, resolve_company, select_company};
pub use plan::{PLACEHOLDER_PLAN, resolve_plan, select_plan};
pub use runtime::{resolve_runtime, select_runtime};
