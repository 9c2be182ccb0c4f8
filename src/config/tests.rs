use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_riffle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", "/tmp/riffle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/riffle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("riffle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("riffle")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/xdg-state/riffle/riffle.log")
    );
    drop(_g1);

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/riffle/riffle.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
autoplay = true
auto_advance = false
skip_unplayable = true

[audio]
quit_fade_out_ms = 123

[ui]
header_text = "hello"
message_history = 2

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 3

[logging]
enabled = false
filter = "riffle=debug"
file = "/tmp/riffle.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RIFFLE__PLAYBACK__SHUFFLE");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.autoplay);
    assert!(!s.playback.auto_advance);
    assert!(s.playback.skip_unplayable);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.message_history, 2);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert!(!s.logging.enabled);
    assert_eq!(s.logging.filter, "riffle=debug");
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/riffle.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RIFFLE__PLAYBACK__SHUFFLE", "true");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
}

#[test]
fn partial_toml_keeps_defaults_for_missing_sections() {
    let s: Settings = toml::from_str(
        r#"
[playback]
autoplay = true
"#,
    )
    .unwrap();

    assert!(s.playback.autoplay);
    assert!(s.playback.auto_advance);
    assert!(!s.playback.shuffle);
    assert_eq!(s.audio.quit_fade_out_ms, 500);
    assert_eq!(s.library.extensions.len(), 4);
    assert!(s.logging.enabled);
}

#[test]
fn validate_rejects_zero_history_and_blank_extensions() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.ui.message_history = 0;
    assert!(s.validate().is_err());

    s.ui.message_history = 1;
    s.library.extensions = vec![" ".into(), ".".into()];
    assert!(s.validate().is_err());
}
