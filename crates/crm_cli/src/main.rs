//! CLI smoke entry point.
//!
//! # Responsibility
//! - Boot the CRM store from environment configuration.
//! - Print the admin login check and dashboard overview as JSON for quick sanity checks.

use crm_core::{AccountService, CrmConfig, DashboardService};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CrmConfig::from_env();
    if let Err(err) = crm_core::init_logging(&config.logging) {
        eprintln!("crm_cli: logging disabled: {err}");
    }

    let mut store = crm_core::open_store(&config);
    let admin = match AccountService::new(&mut store)
        .login(&config.admin.username, &config.admin.password)
    {
        Ok(admin) => admin,
        Err(err) => {
            error!("event=smoke_login module=cli status=error reason={err}");
            eprintln!("crm_cli: seeded admin cannot log in: {err}");
            return ExitCode::FAILURE;
        }
    };

    let overview = DashboardService::new(&store).overview();
    let role = admin.role.as_str();
    println!("crm_core version={}", crm_core::core_version());
    println!("crm_core admin_id={} role={role}", admin.id);
    match serde_json::to_string_pretty(&overview) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("crm_cli: failed to encode dashboard: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
