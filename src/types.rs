/// Which base directory an application name resolves under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    /// Per-user config directory (XDG on Linux, ~/Library/Application Support on macOS).
    #[default]
    Local,
    /// System-wide config directory (`/etc` on Linux, `/Library/Preferences` on macOS).
    Global,
}

impl Namespace {
    pub fn from_global_flag(global: bool) -> Self {
        if global {
            Namespace::Global
        } else {
            Namespace::Local
        }
    }
}

/// A store operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
    Clear,
    Path,
}
