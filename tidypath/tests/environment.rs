//! Integration tests for behavior that depends on process-global state.
//!
//! ## Running Tests
//!
//! Every test here changes the environment or the current directory, and
//! both are process-global. All of them are marked `#[serial]` so they never
//! overlap. They live in their own test binary so that tests elsewhere,
//! which read `TMPDIR` through the temp file helpers, never see the changes.

mod common;

use std::env;
use std::path::PathBuf;

use common::scratch;
use serial_test::serial;
use tidypath::config::environment::TMPDIR_VAR;
use tidypath::config::EnvironmentConfig;
use tidypath::{cwd, path, tempdir, tempfile, TempOptions};

/// RAII guard for setting and restoring an environment variable.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}

/// RAII guard for changing and restoring the current directory.
struct CwdGuard {
    old: PathBuf,
}

impl CwdGuard {
    fn new(dir: &std::path::Path) -> Self {
        let old = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self { old }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.old);
    }
}

#[test]
#[serial]
fn test_tmpdir_variable_chooses_temp_root() {
    let (_dir, root) = scratch();
    let _env = EnvGuard::new(TMPDIR_VAR, root.as_str());

    assert_eq!(EnvironmentConfig::temp_root().unwrap(), root);

    let temp = tempfile(&TempOptions::default()).unwrap();
    assert_eq!(temp.parent(1), root);
}

#[test]
#[serial]
fn test_explicit_dir_beats_tmpdir_variable() {
    let (_env_dir, env_root) = scratch();
    let (_dir, explicit) = scratch();
    let _env = EnvGuard::new(TMPDIR_VAR, env_root.as_str());

    let temp = tempdir(&TempOptions::default().with_dir(explicit.clone())).unwrap();
    assert_eq!(temp.parent(1), explicit);
    assert!(env_root.children(None).unwrap().is_empty());
}

#[test]
#[serial]
fn test_without_tmpdir_uses_current_directory() {
    let (_dir, root) = scratch();
    let _cwd = CwdGuard::new(root.as_std_path());

    let temp = tempfile(&TempOptions::default().with_tmpdir(false)).unwrap();
    assert!(temp.is_absolute());
    assert_eq!(temp.parent(1).realpath().unwrap(), root.realpath().unwrap());
}

#[test]
#[serial]
fn test_relative_dir_made_absolute_against_cwd() {
    let (_dir, root) = scratch();
    root.child(["work"]).mkpath(&Default::default()).unwrap();
    let cwd_guard = CwdGuard::new(root.as_std_path());

    let temp = tempfile(&TempOptions::default().with_dir(path(["work"]).unwrap())).unwrap();
    assert!(temp.is_absolute());
    assert_eq!(temp.parent(1), cwd().unwrap().child(["work"]));

    // the path stays valid after the working directory moves on
    let kept = temp.path().clone();
    drop(cwd_guard);
    assert!(kept.is_file());
}

#[test]
#[serial]
fn test_absolute_and_relative_follow_cwd() {
    let (_dir, root) = scratch();
    let _cwd = CwdGuard::new(root.as_std_path());
    let here = cwd().unwrap();

    let relative = path(["a", "b"]).unwrap();
    assert_eq!(relative.absolute(None).unwrap(), here.child(["a", "b"]));
    assert_eq!(here.child(["a", "b"]).relative(&here).unwrap(), relative);
}

#[test]
#[serial]
fn test_empty_tmpdir_variable_falls_back() {
    let _env = EnvGuard::new(TMPDIR_VAR, "");
    let root = EnvironmentConfig::temp_root().unwrap();
    assert!(root.is_absolute());
    assert!(root.is_dir());
}

#[test]
#[serial]
fn test_entry_named_tilde_in_current_directory_stays_literal() {
    let (_dir, root) = scratch();
    root.child(["~"]).touch(None).unwrap();
    let _cwd = CwdGuard::new(root.as_std_path());

    let entries = path(["."]).unwrap().children(None).unwrap();
    assert_eq!(entries, vec![path(["./~"]).unwrap()]);

    let entry = &entries[0];
    let reparsed = path([entry.to_string()]).unwrap();
    assert_eq!(&reparsed, entry);
    assert!(reparsed.is_file());
}
