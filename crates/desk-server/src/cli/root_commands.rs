use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Create an administrator account.
    CreateAdmin(CreateAdminArgs),
    /// Migrate the database, seed companies, and create the bootstrap admin.
    Seed,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateAdminArgs {
    /// Login email for the new account.
    #[arg(long)]
    pub email: String,
    /// Password (at least 8 characters).
    #[arg(long)]
    pub password: String,
}
