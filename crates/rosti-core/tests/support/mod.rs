#![allow(dead_code)]

use std::cell::Cell;

use rosti_core::api::{ApiError, CatalogSource};
use rosti_core::types::{Company, Plan, Runtime};

/// In-memory catalog with an optional failing endpoint
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub companies: Vec<Company>,
    pub plans: Vec<Plan>,
    pub runtimes: Vec<Runtime>,
    pub failing: Option<&'static str>,
    pub requests: Cell<usize>,
}

impl FakeCatalog {
    pub fn new(companies: Vec<Company>, plans: Vec<Plan>, runtimes: Vec<Runtime>) -> Self {
        Self {
            companies,
            plans,
            runtimes,
            failing: None,
            requests: Cell::new(0),
        }
    }

    pub fn failing_on(mut self, endpoint: &'static str) -> Self {
        self.failing = Some(endpoint);
        self
    }

    fn check(&self, endpoint: &str) -> Result<(), ApiError> {
        self.requests.set(self.requests.get() + 1);
        if self.failing == Some(endpoint) {
            return Err(ApiError::Status {
                url: format!("https://api.test/{}/", endpoint),
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogSource for FakeCatalog {
    fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.check("companies")?;
        Ok(self.companies.clone())
    }

    fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.check("plans")?;
        Ok(self.plans.clone())
    }

    fn runtimes(&self) -> Result<Vec<Runtime>, ApiError> {
        self.check("runtimes")?;
        Ok(self.runtimes.clone())
    }
}

pub fn company(id: u32, name: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
    }
}

pub fn plan(id: u32, name: &str) -> Plan {
    Plan {
        id,
        name: name.to_string(),
        ram: 256,
        disk: 5000,
        price: 100,
        cpu_quota: 25,
    }
}

pub fn runtime(id: u32, image: &str) -> Runtime {
    Runtime {
        id,
        image: image.to_string(),
        is_default: false,
        show: true,
    }
}
