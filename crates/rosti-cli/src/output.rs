//! Terminal output for catalog listings and deployment results.

use anyhow::Result;

use rosti_core::commands::DeploymentRequest;
use rosti_core::types::{Company, Plan, Runtime};

use crate::OutputFormat;

pub fn print_companies(companies: &[Company], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(companies)?),
        OutputFormat::Table => print_company_table(companies),
    }
    Ok(())
}

/// Shown when the account has several companies and none was picked
pub fn print_company_choice(companies: &[Company], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&company_choice_json(companies))?
        ),
        OutputFormat::Table => {
            println!(
                "You have access to multiple companies, pick one of the companies below and use -c COMPANY_ID flag to call this command."
            );
            println!();
            print_company_table(companies);
            println!();
        }
    }
    Ok(())
}

fn company_choice_json(companies: &[Company]) -> serde_json::Value {
    serde_json::json!({
        "needs_company_choice": true,
        "companies": companies,
    })
}

fn print_company_table(companies: &[Company]) {
    println!("  {:>6}  Company name", "ID");
    println!("  {:>6}  ------------", "------");
    for company in companies {
        println!("  {:>6}  {}", company.id, company.name);
    }
}

pub fn print_plans(plans: &[Plan], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plans)?),
        OutputFormat::Table => {
            println!(
                "  {:>6}  {:<12} {:>8} {:>8} {:>5} {:>7}",
                "ID", "Name", "RAM", "Disk", "CPU", "Price"
            );
            for plan in plans {
                println!(
                    "  {:>6}  {:<12} {:>8} {:>8} {:>5} {:>7}",
                    plan.id, plan.name, plan.ram, plan.disk, plan.cpu_quota, plan.price
                );
            }
        }
    }
    Ok(())
}

pub fn print_runtimes(runtimes: &[Runtime], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(runtimes)?),
        OutputFormat::Table => {
            for runtime in runtimes {
                let marker = if runtime.is_default { " (default)" } else { "" };
                println!("  {}{}", runtime.image, marker);
            }
        }
    }
    Ok(())
}

pub fn print_deployment(request: &DeploymentRequest, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(request)?),
        OutputFormat::Table => {
            println!("Application: {}", request.app);
            println!("Company:     {}", request.company_id);
            match request.plan_id {
                Some(id) => println!("Plan:        {}", id),
                None => println!("Plan:        (not resolved)"),
            }
            println!("Runtime:     {}", request.runtime);
            if !request.domains.is_empty() {
                println!("Domains:     {}", request.domains.join(", "));
            }
            println!("Archive:     {}", request.archive_path.display());
            println!("SSH key:     {}", key_summary(&request.ssh_public_key));
        }
    }
    Ok(())
}

/// Key type and comment, without the key material
fn key_summary(key: &str) -> String {
    let mut parts = key.split_whitespace();
    let kind = parts.next().unwrap_or_default();
    let comment = parts.nth(1).unwrap_or_default();
    format!("{} {}", kind, comment).trim().to_string()
}
