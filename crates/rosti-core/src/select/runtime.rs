//! Runtime image lookup.

use tracing::{debug, info};

use crate::api::CatalogSource;
use crate::error::{Error, Result};
use crate::types::Runtime;

/// Image of the runtime matching `desired`, compared case-insensitively.
///
/// The last matching entry wins. Without a match the last entry of the
/// catalog is used instead, so this only fails for an empty catalog.
pub fn resolve_runtime(runtimes: &[Runtime], desired: Option<&str>) -> Result<String> {
    let last = runtimes.last().ok_or(Error::NoRuntime)?;
    let desired = desired.map(str::to_lowercase);

    let mut selected = None;
    if let Some(desired) = &desired {
        for runtime in runtimes {
            if runtime.image.to_lowercase() == *desired {
                selected = Some(&runtime.image);
            }
        }
    }

    match selected {
        Some(image) => Ok(image.clone()),
        None => {
            info!(
                requested = desired.as_deref().unwrap_or(""),
                fallback = %last.image,
                "runtime not found in catalog, using the latest one"
            );
            Ok(last.image.clone())
        }
    }
}

/// Fetch the runtime catalog and resolve `desired` in it.
pub fn select_runtime(catalog: &dyn CatalogSource, desired: Option<&str>) -> Result<String> {
    let runtimes = catalog.runtimes()?;
    let image = resolve_runtime(&runtimes, desired)?;
    debug!(?desired, %image, "resolved runtime");
    Ok(image)
}
