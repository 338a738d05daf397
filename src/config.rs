//! Installer configuration resolution.
//!
//! Resolves the fixed set of values (paths, URLs, the sudo-invoking user)
//! that every later setup step reads. Resolution happens exactly once at
//! startup and the resulting [`InstallerConfig`] is immutable; consumers
//! receive it by parameter passing, never through ambient globals.

use std::collections::HashMap;
use std::env;
use std::path::{Component, Path, PathBuf};

use nix::unistd::{Uid, User};
use serde::Serialize;

use crate::error::{Result, SetupError};

/// Relative path for the run's log output.
pub const LOG_FILE: &str = "fedora_setup.log";

/// Absolute path for persisted installer state. Read and written by the
/// step runner, not by this module.
pub const STATE_FILE: &str = "/var/tmp/fedora_installer.state";

/// Scratch directory for source builds. Created by the build steps.
pub const TEMP_BUILD_DIR: &str = "/tmp/fedora_installer_builds";

/// Directory name the dotfiles are deployed under, relative to the
/// invoking user's home.
pub const DOTFILES_DIR_NAME: &str = ".hyprdots";

/// RPM Fusion free release package URL.
///
/// The `$(rpm -E %fedora)` placeholder is deliberately left unexpanded;
/// the download step passes the string to a shell, which substitutes the
/// running Fedora release number.
pub const RPMFUSION_FREE_URL: &str =
    "https://mirrors.rpmfusion.org/free/fedora/rpmfusion-free-release-$(rpm -E %fedora).noarch.rpm";

/// RPM Fusion nonfree release package URL. Same placeholder rules as
/// [`RPMFUSION_FREE_URL`].
pub const RPMFUSION_NONFREE_URL: &str =
    "https://mirrors.rpmfusion.org/nonfree/fedora/rpmfusion-nonfree-release-$(rpm -E %fedora).noarch.rpm";

/// Resolved installer configuration.
///
/// All fields are computed once by [`InstallerConfig::resolve`] and never
/// mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerConfig {
    /// Relative path for the run's log output.
    pub log_file: PathBuf,
    /// Absolute path for persisted installer state.
    pub state_file: PathBuf,
    /// Username of the original (non-root) invoking user.
    pub sudo_user: String,
    /// Resolved home directory of `sudo_user`.
    pub user_home: PathBuf,
    /// Dotfiles deployment target: `user_home/.hyprdots`.
    pub dotfiles_dir: PathBuf,
    /// Scratch directory for source builds.
    pub temp_build_dir: PathBuf,
    /// RPM Fusion free release URL template.
    pub rpmfusion_free_url: String,
    /// RPM Fusion nonfree release URL template.
    pub rpmfusion_nonfree_url: String,
}

impl InstallerConfig {
    /// Resolve the configuration from the real process environment.
    ///
    /// The invoking user comes from `SUDO_USER` when set and non-empty,
    /// otherwise from the passwd entry of the effective uid. The home
    /// base path is this process's own home directory.
    ///
    /// Performs no filesystem I/O: a `sudo_user` with no matching home
    /// directory still resolves to a syntactically valid path, and the
    /// missing directory only surfaces in whatever step touches it later.
    pub fn resolve() -> Result<Self> {
        let sudo_user_env = sudo_user_from_env(env::var("SUDO_USER").ok());
        let login_name = effective_login_name()?;
        let home_base = dirs::home_dir()
            .ok_or_else(|| SetupError::identity("cannot determine a home directory"))?;
        Ok(Self::from_parts(
            sudo_user_env.as_deref(),
            &login_name,
            &home_base,
        ))
    }

    /// Pure derivation from explicit inputs.
    ///
    /// `resolve()` delegates here; tests inject alternate environments
    /// through this constructor directly.
    ///
    /// The home derivation is intentionally indirect: the invoking user's
    /// home is assumed to be a sibling of `home_base` (`home_base/../user`,
    /// lexically normalized). This holds for the single-admin-user layouts
    /// the installer targets and is preserved as-is; normalization never
    /// checks the disk, so a wrong assumption produces a nonexistent path
    /// rather than an error here.
    pub fn from_parts(sudo_user_env: Option<&str>, login_name: &str, home_base: &Path) -> Self {
        let sudo_user = sudo_user_env.unwrap_or(login_name).to_string();
        let user_home = normalize_path(&home_base.join("..").join(&sudo_user));
        let dotfiles_dir = user_home.join(DOTFILES_DIR_NAME);

        Self {
            log_file: PathBuf::from(LOG_FILE),
            state_file: PathBuf::from(STATE_FILE),
            sudo_user,
            user_home,
            dotfiles_dir,
            temp_build_dir: PathBuf::from(TEMP_BUILD_DIR),
            rpmfusion_free_url: RPMFUSION_FREE_URL.to_string(),
            rpmfusion_nonfree_url: RPMFUSION_NONFREE_URL.to_string(),
        }
    }

    /// Map the resolved values to the environment variables the shell
    /// steps read.
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env_vars = HashMap::new();
        env_vars.insert("LOG_FILE".to_string(), self.log_file.display().to_string());
        env_vars.insert(
            "STATE_FILE".to_string(),
            self.state_file.display().to_string(),
        );
        env_vars.insert("SUDO_USER".to_string(), self.sudo_user.clone());
        env_vars.insert(
            "USER_HOME".to_string(),
            self.user_home.display().to_string(),
        );
        env_vars.insert(
            "DOTFILES_DIR".to_string(),
            self.dotfiles_dir.display().to_string(),
        );
        env_vars.insert(
            "TEMP_BUILD_DIR".to_string(),
            self.temp_build_dir.display().to_string(),
        );
        env_vars.insert(
            "RPMFUSION_FREE_URL".to_string(),
            self.rpmfusion_free_url.clone(),
        );
        env_vars.insert(
            "RPMFUSION_NONFREE_URL".to_string(),
            self.rpmfusion_nonfree_url.clone(),
        );
        env_vars
    }
}

/// Interpret the raw `SUDO_USER` environment value. An empty string
/// counts as unset, so it falls through to the passwd login name just
/// like a missing variable.
fn sudo_user_from_env(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Quote a value as a single shell word. Embedded single quotes become
/// `'\''` so the output stays safe to `eval`.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Login name of the effective uid, from the passwd database.
fn effective_login_name() -> Result<String> {
    let uid = Uid::effective();
    let user = User::from_uid(uid)
        .map_err(|e| SetupError::identity(format!("passwd lookup for uid {} failed: {}", uid, e)))?
        .ok_or_else(|| SetupError::identity(format!("no passwd entry for uid {}", uid)))?;
    Ok(user.name)
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding component. Never touches the filesystem, so the result may
/// name a directory that does not exist.
///
/// `..` at the root stays at the root, matching how the kernel walks
/// `/..`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Only pop real components; keep `..` when nothing sits
                // above it in a relative path.
                match normalized.components().next_back() {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => normalized.push(Component::ParentDir),
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
