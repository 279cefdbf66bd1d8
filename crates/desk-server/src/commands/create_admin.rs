use anyhow::Context;
use desk_config::DeskConfig;

use crate::cli::CreateAdminArgs;
use crate::context::AppContext;

pub async fn handle(args: &CreateAdminArgs, config: DeskConfig) -> anyhow::Result<()> {
    if !config.database.is_durable() {
        tracing::warn!("creating an admin in a non-durable backend; it is lost on exit");
    }
    let ctx = AppContext::init(config)
        .await
        .context("failed to initialize auditdesk application context")?;

    let user = ctx
        .gate
        .create_admin(&args.email, &args.password, &args.password)
        .await
        .context("failed to create admin")?;
    println!("created admin {} (id {})", user.email, user.id);
    Ok(())
}
