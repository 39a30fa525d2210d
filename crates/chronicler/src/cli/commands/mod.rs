//! CLI commands

mod check;
mod init;
mod publish;
mod release;
mod run;
mod show;
mod update;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use publish::PublishArgs;
pub use release::ReleaseCommand;
pub use run::RunCommand;
pub use show::ShowCommand;
pub use update::{ForgeArgs, UpdateCommand};
