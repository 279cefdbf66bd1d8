use anyhow::Context;
use desk_config::DeskConfig;

use crate::context::AppContext;

/// Opening the backend migrates and seeds companies; this adds the bootstrap admin.
pub async fn handle(config: DeskConfig) -> anyhow::Result<()> {
    let ctx = AppContext::init(config)
        .await
        .context("failed to initialize auditdesk application context")?;

    let companies = ctx.service.list_companies().await?;
    for summary in &companies {
        println!(
            "{:<14} {:<14} {} audits",
            summary.company.name, summary.company.display_name, summary.total_audits
        );
    }

    if ctx.ensure_bootstrap_admin().await? {
        println!("bootstrap admin created");
    } else if ctx.config.auth.bootstrap_admin().is_none() {
        println!("no bootstrap admin configured (auth.bootstrap_admin_email / _password)");
    } else {
        println!("bootstrap admin already present");
    }
    Ok(())
}
