use std::path::PathBuf;

/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    /// Force the in-memory backend regardless of configuration.
    pub memory: bool,
}
