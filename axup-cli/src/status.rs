use comfy_table::Table;

use axup_control::resolve_site;
use axup_core::types::DEPLOYMENT_SERVICES;
use axup_host::{ServiceControl, WebControl};

/// Renders the resolved site and every managed service as a table.
pub async fn print_status(
    web: &dyn WebControl,
    services: &dyn ServiceControl,
    explicit_site: Option<&str>,
) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_header(["component", "state"]);

    match resolve_site(web, explicit_site).await {
        Ok(site) => {
            let state = web
                .site_state(&site)
                .await?
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "no state".to_string());
            table.add_row([format!("site {site}"), state]);
        }
        Err(e) => {
            table.add_row(["site".to_string(), e.to_string()]);
        }
    }

    for name in DEPLOYMENT_SERVICES {
        let state = match services.query(name).await? {
            Some(status) => status.as_str().to_string(),
            None => "not installed".to_string(),
        };
        table.add_row([format!("service {name}"), state]);
    }

    println!("{table}");
    Ok(())
}
