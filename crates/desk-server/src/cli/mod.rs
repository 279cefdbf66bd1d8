use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::{Commands, CreateAdminArgs, ServeArgs};

/// Top-level CLI parser for the `auditdesk` binary.
#[derive(Debug, Parser)]
#[command(name = "auditdesk", version, about = "Compliance-audit dashboard backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./auditdesk.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the in-memory backend (data is lost on exit)
    #[arg(long, global = true)]
    pub memory: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            memory: self.memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "auditdesk",
            "--config",
            "deploy.toml",
            "--memory",
            "--verbose",
            "serve",
        ])
        .expect("cli should parse");

        let flags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some(std::path::Path::new("deploy.toml")));
        assert!(flags.memory);
        assert!(flags.verbose);
        assert!(matches!(cli.command, Commands::Serve(ref args) if args.bind.is_none()));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["auditdesk", "serve", "--bind", "0.0.0.0:8080", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn create_admin_requires_email_and_password() {
        assert!(Cli::try_parse_from(["auditdesk", "create-admin", "--email", "a@b.c"]).is_err());

        let cli = Cli::try_parse_from([
            "auditdesk",
            "create-admin",
            "--email",
            "admin@example.com",
            "--password",
            "audit@2025",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::CreateAdmin(args) => {
                assert_eq!(args.email, "admin@example.com");
                assert_eq!(args.password, "audit@2025");
            }
            other => panic!("expected create-admin, got {other:?}"),
        }
    }

    #[test]
    fn seed_takes_no_arguments() {
        let cli = Cli::try_parse_from(["auditdesk", "seed"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Seed));
        assert!(Cli::try_parse_from(["auditdesk", "seed", "extra"]).is_err());
    }
}
