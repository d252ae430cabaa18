//! Clap adapter for configstore.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It provides
//! [`ConfigArgs`] and [`ConfigSubcommand`], which you embed in your own clap
//! derive to get `config list|get|set|unset|clear|path` subcommands.
//!
//! The only bridge to the core is [`ConfigArgs::into_action()`]. From there,
//! everything runs through [`Configstore::handle()`](crate::Configstore::handle),
//! which does not depend on clap.

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
///
/// let store = Configstore::new("myapp");
/// store.handle_and_print(&args.into_action())?;
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every stored and default key-value pair.
    List,
    /// Show the effective value of a key.
    Get {
        /// Top-level key.
        key: String,
    },
    /// Persist a value. Valid JSON is stored as such, anything else as a string.
    Set {
        /// Top-level key.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove a stored value.
    Unset {
        /// Top-level key.
        key: String,
    },
    /// Remove every stored value.
    Clear,
    /// Print the location of the backing file.
    Path,
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Set { key, value }) => ConfigAction::Set { key, value },
            Some(ConfigSubcommand::Unset { key }) => ConfigAction::Unset { key },
            Some(ConfigSubcommand::Clear) => ConfigAction::Clear,
            Some(ConfigSubcommand::Path) => ConfigAction::Path,
        }
    }
}
