//! CLI commands

mod add;
mod changelog;
mod completions;
mod init;
mod release;
mod status;
mod version;

pub use add::AddCommand;
pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use status::StatusCommand;
pub use version::VersionCommand;
