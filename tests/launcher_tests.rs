//! Launcher precondition and dispatch unit tests against `MockSystem`

use rbuild::cli::Args;
use rbuild::error::RbuildError;
use rbuild::launcher::{check_run_directory, require_root};
use rbuild::system::MockSystem;
use rbuild::dispatch;
use std::path::{Path, PathBuf};

fn args() -> Args {
    Args {
        debug: false,
        print_settings: false,
        logfile: "dv_log.log".to_owned(),
        command: None,
    }
}

#[test]
fn test_require_root_missing() {
    let system = MockSystem::new();

    let err = require_root(&system).unwrap_err();
    let rbuild_err = err.downcast_ref::<RbuildError>().unwrap();

    assert!(matches!(rbuild_err, RbuildError::Environment { .. }));
    assert_eq!(rbuild_err.exit_code(), 1);
}

#[test]
fn test_require_root_present() {
    let system = MockSystem::new().with_env("RBUILD_ROOT", "/proj").unwrap();

    assert_eq!(require_root(&system).unwrap(), PathBuf::from("/proj"));
}

#[test]
fn test_run_directory_accepts_descendants() {
    let system = MockSystem::new()
        .with_dir("/proj/run/test")
        .unwrap()
        .with_current_dir("/proj/run/test")
        .unwrap();

    let ctx = check_run_directory(&system, Path::new("/proj")).unwrap();
    assert_eq!(ctx.root, PathBuf::from("/proj"));
    assert_eq!(ctx.cwd, PathBuf::from("/proj/run/test"));
}

#[test]
fn test_run_context_debug_formatting() {
    let system = MockSystem::new()
        .with_dir("/proj/run/test")
        .unwrap()
        .with_current_dir("/proj/run/test")
        .unwrap();

    let ctx = check_run_directory(&system, Path::new("/proj")).unwrap();
    let rendered = format!("{ctx:?}");

    assert!(rendered.contains("root"));
    assert!(rendered.contains("cwd"));
}

#[test]
fn test_run_directory_accepts_run_itself() {
    let system = MockSystem::new()
        .with_dir("/proj/run")
        .unwrap()
        .with_current_dir("/proj/run")
        .unwrap();

    assert!(check_run_directory(&system, Path::new("/proj")).is_ok());
}

#[test]
fn test_run_directory_rejects_outsiders() {
    let system = MockSystem::new()
        .with_dir("/proj/run")
        .unwrap()
        .with_dir("/elsewhere")
        .unwrap()
        .with_current_dir("/elsewhere")
        .unwrap();

    let err = check_run_directory(&system, Path::new("/proj")).unwrap_err();
    let rbuild_err = err.downcast_ref::<RbuildError>().unwrap();

    assert!(matches!(rbuild_err, RbuildError::Directory { .. }));
    assert_eq!(rbuild_err.exit_code(), 1);
}

#[test]
fn test_run_directory_rejects_root_itself() {
    let system = MockSystem::new()
        .with_dir("/proj/run")
        .unwrap()
        .with_current_dir("/proj")
        .unwrap();

    assert!(check_run_directory(&system, Path::new("/proj")).is_err());
}

#[test]
fn test_run_directory_resolves_relative_segments() {
    // A cwd reported with '..' segments still counts as a descendant once
    // canonicalized
    let system = MockSystem::new()
        .with_dir("/proj/run/test")
        .unwrap()
        .with_current_dir("/proj/run/../run/test")
        .unwrap();

    assert!(check_run_directory(&system, Path::new("/proj")).is_ok());
}

#[test]
fn test_dispatch_print_settings_fails_before_subcommand() {
    let system = MockSystem::new()
        .with_dir("/proj/run")
        .unwrap()
        .with_current_dir("/proj/run")
        .unwrap();
    let ctx = check_run_directory(&system, Path::new("/proj")).unwrap();

    let mut print_args = args();
    print_args.print_settings = true;

    let err = dispatch(&print_args, &ctx).unwrap_err();
    let rbuild_err = err.downcast_ref::<RbuildError>().unwrap();

    assert!(matches!(rbuild_err, RbuildError::Unimplemented { .. }));
    assert_eq!(rbuild_err.exit_code(), 2);
}

#[test]
fn test_dispatch_without_subcommand_is_a_noop() {
    let system = MockSystem::new()
        .with_dir("/proj/run")
        .unwrap()
        .with_current_dir("/proj/run")
        .unwrap();
    let ctx = check_run_directory(&system, Path::new("/proj")).unwrap();

    assert!(dispatch(&args(), &ctx).is_ok());
}
