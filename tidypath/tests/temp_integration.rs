//! Integration tests for scoped temporary resources.
//!
//! Deletion is owned by the [`TempResource`]: it happens once, when the
//! resource is released or dropped, and never because a path value cloned
//! from it went away.

mod common;

use common::scratch;
use tidypath::config::OptionsLoader;
use tidypath::{tempdir, tempfile, PathValue, TempOptions, TempResource, WriteOptions};

fn in_dir(dir: &PathValue) -> TempOptions {
    TempOptions::default().with_dir(dir.clone())
}

#[test]
fn test_cloned_path_does_not_own_the_file() {
    let (_dir, root) = scratch();
    let temp = tempfile(&in_dir(&root)).unwrap();

    let view = temp.path().clone();
    drop(view);
    assert!(temp.exists());

    let again = temp.path().clone();
    drop(temp);
    assert!(!again.exists());
}

#[test]
fn test_deleted_on_early_return() {
    fn fails_midway(dir: &PathValue) -> Result<(), PathValue> {
        let temp = tempfile(&in_dir(dir)).unwrap();
        temp.spew("partial", &WriteOptions::default()).unwrap();
        Err(temp.path().clone())
    }

    let (_dir, root) = scratch();
    let left_behind = fails_midway(&root).unwrap_err();
    assert!(!left_behind.exists());
    assert!(root.children(None).unwrap().is_empty());
}

#[test]
fn test_deleted_during_unwind() {
    let (_dir, root) = scratch();
    let options = in_dir(&root);

    let outcome = std::panic::catch_unwind(|| {
        let _temp = tempdir(&options).unwrap();
        panic!("boom");
    });
    assert!(outcome.is_err());
    assert!(root.children(None).unwrap().is_empty());
}

#[test]
fn test_release_is_idempotent_with_external_removal() {
    let (_dir, root) = scratch();
    let temp = tempdir(&in_dir(&root)).unwrap();
    temp.child(["inner.txt"]).touch(None).unwrap();

    let kept = temp.path().clone();
    std::fs::remove_dir_all(kept.as_std_path()).unwrap();
    temp.release().unwrap();
    assert!(!kept.exists());
}

#[test]
fn test_many_resources_get_distinct_names() {
    let (_dir, root) = scratch();
    let options = in_dir(&root).with_template("same-XXXX");
    let temps: Vec<TempResource> = (0..50).map(|_| tempfile(&options).unwrap()).collect();

    let mut names: Vec<&str> = temps.iter().map(|t| t.basename()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 50);
}

#[test]
fn test_options_from_yaml() {
    let (_dir, root) = scratch();
    let yaml = format!("TEMPLATE: cache-XXXXXX\nSUFFIX: .db\nDIR: {}", root.as_str());
    let options: TempOptions = OptionsLoader::from_yaml(&yaml).unwrap();

    let temp = tempfile(&options).unwrap();
    assert_eq!(temp.parent(1), root);
    assert!(temp.basename().starts_with("cache-"));
    assert!(temp.basename().ends_with(".db"));
}

#[test]
fn test_tempdir_holds_working_files() {
    let (_dir, root) = scratch();
    let work = tempdir(&in_dir(&root).with_template("work-XXXXXX")).unwrap();

    let output = work.child(["out", "result.txt"]);
    output.touchpath(None).unwrap();
    output.spew("done", &WriteOptions::default()).unwrap();
    assert_eq!(output.slurp_utf8().unwrap(), "done");
    assert_eq!(work.to_string(), work.path().to_string());

    drop(work);
    assert!(!output.exists());
    assert!(root.children(None).unwrap().is_empty());
}
