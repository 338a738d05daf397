//! Tests for Configuration Resolution
//!
//! These tests verify:
//! - Sudo user precedence (environment over passwd lookup)
//! - Home directory derivation through the sibling-path walk
//! - Environment variable generation for shell consumers
//! - The deferred-failure policy for nonexistent home directories

use std::path::{Path, PathBuf};

use fedora_setup::config::{
    DOTFILES_DIR_NAME, InstallerConfig, LOG_FILE, RPMFUSION_FREE_URL, RPMFUSION_NONFREE_URL,
    STATE_FILE, TEMP_BUILD_DIR,
};

// =============================================================================
// Resolution Scenarios
// =============================================================================

#[test]
fn test_sudo_invocation_scenario() {
    // Root runs the installer via sudo from alice's session: the resolver
    // walks from root's home to the sibling directory named after alice.
    let config = InstallerConfig::from_parts(Some("alice"), "root", Path::new("/home/root"));

    assert_eq!(config.sudo_user, "alice");
    assert_eq!(config.user_home, PathBuf::from("/home/alice"));
    assert_eq!(
        config.dotfiles_dir,
        PathBuf::from("/home/alice/.hyprdots")
    );
}

#[test]
fn test_direct_invocation_scenario() {
    // No SUDO_USER in the environment: the passwd login name is used.
    let config = InstallerConfig::from_parts(None, "bob", Path::new("/home/bob"));

    assert_eq!(config.sudo_user, "bob");
    assert_eq!(config.user_home, PathBuf::from("/home/bob"));
    assert_eq!(config.dotfiles_dir, PathBuf::from("/home/bob/.hyprdots"));
}

#[test]
fn test_static_values_do_not_depend_on_identity() {
    let a = InstallerConfig::from_parts(Some("alice"), "root", Path::new("/home/root"));
    let b = InstallerConfig::from_parts(None, "bob", Path::new("/home/bob"));

    assert_eq!(a.log_file, b.log_file);
    assert_eq!(a.state_file, b.state_file);
    assert_eq!(a.temp_build_dir, b.temp_build_dir);
    assert_eq!(a.rpmfusion_free_url, b.rpmfusion_free_url);
    assert_eq!(a.rpmfusion_nonfree_url, b.rpmfusion_nonfree_url);

    assert_eq!(a.log_file, PathBuf::from(LOG_FILE));
    assert_eq!(a.state_file, PathBuf::from(STATE_FILE));
    assert_eq!(a.temp_build_dir, PathBuf::from(TEMP_BUILD_DIR));
}

// =============================================================================
// Deferred-Failure Policy
// =============================================================================

#[test]
fn test_resolution_succeeds_for_nonexistent_sibling_home() {
    // The sibling-path walk never checks the disk. A sudo user with no
    // home directory under the base still resolves; the missing directory
    // is only discovered by whichever step touches it later.
    let base = tempfile::tempdir().expect("tempdir");
    let home_base = base.path().join("root");

    let config = InstallerConfig::from_parts(Some("nosuchuser"), "root", &home_base);

    assert_eq!(config.user_home, base.path().join("nosuchuser"));
    assert!(!config.user_home.exists());
    assert!(!config.dotfiles_dir.exists());
    assert_eq!(
        config.dotfiles_dir,
        config.user_home.join(DOTFILES_DIR_NAME)
    );
}

// =============================================================================
// Shell Consumer Interface
// =============================================================================

#[test]
fn test_env_vars_cover_every_constant() {
    let config = InstallerConfig::from_parts(Some("alice"), "root", Path::new("/home/root"));
    let env_vars = config.to_env_vars();

    for key in [
        "LOG_FILE",
        "STATE_FILE",
        "SUDO_USER",
        "USER_HOME",
        "DOTFILES_DIR",
        "TEMP_BUILD_DIR",
        "RPMFUSION_FREE_URL",
        "RPMFUSION_NONFREE_URL",
    ] {
        assert!(env_vars.contains_key(key), "missing env var {}", key);
    }
    assert_eq!(env_vars.len(), 8);
}

#[test]
fn test_env_vars_keep_url_placeholder_unexpanded() {
    let config = InstallerConfig::from_parts(None, "bob", Path::new("/home/bob"));
    let env_vars = config.to_env_vars();

    assert_eq!(
        env_vars.get("RPMFUSION_FREE_URL").map(String::as_str),
        Some(RPMFUSION_FREE_URL)
    );
    assert_eq!(
        env_vars.get("RPMFUSION_NONFREE_URL").map(String::as_str),
        Some(RPMFUSION_NONFREE_URL)
    );
    assert!(
        env_vars["RPMFUSION_FREE_URL"].contains("$(rpm -E %fedora)"),
        "placeholder must survive untouched for the downloading shell"
    );
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_config_json_output_is_complete() {
    let config = InstallerConfig::from_parts(Some("alice"), "root", Path::new("/home/root"));
    let json = serde_json::to_value(&config).expect("serialize");

    assert_eq!(json["sudo_user"], "alice");
    assert_eq!(json["user_home"], "/home/alice");
    assert_eq!(json["dotfiles_dir"], "/home/alice/.hyprdots");
    assert_eq!(json["state_file"], STATE_FILE);
    assert_eq!(json["rpmfusion_free_url"], RPMFUSION_FREE_URL);
}

// =============================================================================
// Live Resolution Smoke Test
// =============================================================================

#[test]
fn test_resolve_invariants_hold_in_real_environment() {
    // resolve() reads the real process environment; only the invariants
    // that hold for any environment are asserted here. Environments with
    // no passwd entry (bare containers) legitimately fail resolution.
    if let Ok(config) = InstallerConfig::resolve() {
        assert!(!config.sudo_user.is_empty());
        assert!(config.user_home.is_absolute());
        assert_eq!(
            config.dotfiles_dir,
            config.user_home.join(DOTFILES_DIR_NAME)
        );
        assert_eq!(config.log_file, PathBuf::from(LOG_FILE));
    }
}
