//! Company disambiguation.

use tracing::debug;

use crate::api::CatalogSource;
use crate::error::{Error, Result};
use crate::types::Company;

/// Outcome of company resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySelection {
    /// Exactly one company applies
    Selected(u32),
    /// Several companies and no hint; the caller has to ask the user
    NeedsUserChoice,
}

impl CompanySelection {
    /// Resolved id, or 0 when the user still has to choose
    pub fn id(&self) -> u32 {
        match self {
            Self::Selected(id) => *id,
            Self::NeedsUserChoice => 0,
        }
    }

    pub fn needs_user_choice(&self) -> bool {
        matches!(self, Self::NeedsUserChoice)
    }
}

/// Pick the company to work with.
///
/// Precedence: `explicit` (command-line flag), then `remembered` (saved
/// state), then the only company of the account. A hint of `Some(0)` counts
/// as unset. Chosen ids must exist in `companies`.
pub fn resolve_company(
    companies: &[Company],
    explicit: Option<u32>,
    remembered: Option<u32>,
) -> Result<CompanySelection> {
    if companies.is_empty() {
        return Err(Error::NoCompany);
    }

    let explicit = explicit.filter(|id| *id != 0);
    let remembered = remembered.filter(|id| *id != 0);

    let id = match (explicit, remembered) {
        (Some(id), _) => id,
        (None, Some(id)) => id,
        (None, None) if companies.len() == 1 => return Ok(CompanySelection::Selected(companies[0].id)),
        (None, None) => {
            debug!(count = companies.len(), "multiple companies and no selection");
            return Ok(CompanySelection::NeedsUserChoice);
        }
    };

    if companies.iter().any(|c| c.id == id) {
        Ok(CompanySelection::Selected(id))
    } else {
        Err(Error::CompanyNotFound { id })
    }
}

/// Fetch the companies the caller belongs to and resolve one of them.
///
/// The fetched list is returned alongside so an ambiguous result can be
/// presented without a second request.
pub fn select_company(
    catalog: &dyn CatalogSource,
    explicit: Option<u32>,
    remembered: Option<u32>,
) -> Result<(CompanySelection, Vec<Company>)> {
    let companies = catalog.companies()?;
    let selection = resolve_company(&companies, explicit, remembered)?;
    Ok((selection, companies))
}
