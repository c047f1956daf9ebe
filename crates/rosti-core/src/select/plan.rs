//! Plan lookup by name.

use tracing::debug;

use crate::api::CatalogSource;
use crate::error::Result;
use crate::types::Plan;

/// Plan name used for every deployment regardless of the Rostifile.
///
/// Placeholder until the API can tell us the account's default plan.
pub const PLACEHOLDER_PLAN: &str = "start";

/// Id of the plan named `desired`, compared case-insensitively.
///
/// When several plans share the name the last one in catalog order wins.
/// `None` means unresolved: no name given or nothing matched.
pub fn resolve_plan(plans: &[Plan], desired: Option<&str>) -> Option<u32> {
    let desired = desired.filter(|name| !name.is_empty())?.to_lowercase();

    let mut plan_id = None;
    for plan in plans {
        if plan.name.to_lowercase() == desired {
            plan_id = Some(plan.id);
        }
    }
    plan_id
}

/// Fetch the plan catalog and resolve `desired` in it.
pub fn select_plan(catalog: &dyn CatalogSource, desired: Option<&str>) -> Result<Option<u32>> {
    let plans = catalog.plans()?;
    let plan_id = resolve_plan(&plans, desired);
    debug!(?desired, ?plan_id, available = plans.len(), "resolved plan");
    Ok(plan_id)
}
