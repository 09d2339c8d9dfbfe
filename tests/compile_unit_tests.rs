//! Compile sub-command unit tests
//!
//! Command-line construction is tested as pure functions; tree-only and
//! force-check behavior run against `MockSystem` without spawning tools.

use rbuild::build::build_tree;
use rbuild::cli::{CompileArgs, Execute as _};
use rbuild::error::RbuildError;
use rbuild::launcher::RunContext;
use rbuild::operations::{CompileOperation, elaborate_command, include_args, parser_command};
use rbuild::system::MockSystem;
use std::path::{Path, PathBuf};

#[test]
fn test_parser_command_systemverilog_under_root() {
    let cmd = parser_command(Path::new("/proj/tb/tb_top.sv"), Path::new("/proj"), "");
    assert_eq!(cmd, "xvlog -sv -L uvm /proj/tb/tb_top.sv");
}

#[test]
fn test_parser_command_verilog_outside_root() {
    let cmd = parser_command(Path::new("/ip/vendor/dut.v"), Path::new("/proj"), "");
    assert_eq!(cmd, "xvlog -sv /ip/vendor/dut.v");
}

#[test]
fn test_parser_command_vhdl() {
    let cmd = parser_command(Path::new("/ip/vendor/dut.vhd"), Path::new("/proj"), "");
    assert_eq!(cmd, "xvhdl /ip/vendor/dut.vhd");
}

#[test]
fn test_parser_command_carries_include_args() {
    let cmd = parser_command(
        Path::new("/ip/dut.sv"),
        Path::new("/proj"),
        "-i /proj/include -i /proj/vip",
    );
    assert_eq!(cmd, "xvlog -sv -i /proj/include -i /proj/vip /ip/dut.sv");
}

#[test]
fn test_include_and_elaborate_commands() {
    let system = MockSystem::new()
        .with_file(
            "/proj/tb/tb_top.bld",
            b"src: [tb_top.sv]\ninclude: [../include]\nneeds: [vip.bld]\n",
        )
        .unwrap()
        .with_file("/proj/tb/vip.bld", b"include: [../vip]\n")
        .unwrap();

    let tree = build_tree(&system, &[Path::new("/proj/tb/tb_top.bld")]).unwrap();

    // Traversal order: vip (dependency) first
    assert_eq!(include_args(&tree), "-i /proj/vip -i /proj/include");

    assert_eq!(
        elaborate_command(&tree, &["WAVES".to_owned(), "DEPTH=4".to_owned()]),
        "xelab tb_top -i /proj/vip -i /proj/include -L uvm --debug all -O0 -d WAVES -d DEPTH=4"
    );
}

#[test]
fn test_elaborate_command_without_includes_or_defines() {
    let system = MockSystem::new()
        .with_file("/proj/tb/tb_top.bld", b"src: [tb_top.sv]\n")
        .unwrap();

    let tree = build_tree(&system, &[Path::new("/proj/tb/tb_top.bld")]).unwrap();

    assert_eq!(
        elaborate_command(&tree, &[]),
        "xelab tb_top -L uvm --debug all -O0"
    );
}

#[test]
fn test_build_tree_only_mode_stops_after_tree() {
    let system = MockSystem::new()
        .with_file("/proj/tb/tb_top.bld", b"src: [tb_top.sv]\n")
        .unwrap()
        .with_dir("/proj/run/test")
        .unwrap()
        .with_current_dir("/proj/run/test")
        .unwrap();

    let ctx = RunContext {
        root: PathBuf::from("/proj"),
        cwd: PathBuf::from("/proj/run/test"),
        system: &system,
    };

    let operation = CompileOperation::new(CompileArgs {
        build_tree: true,
        ..CompileArgs::default()
    });

    assert!(operation.execute(&ctx).is_ok());
}

#[test]
fn test_existing_compile_refused_without_force() {
    let system = MockSystem::new()
        .with_file("/proj/tb/tb_top.bld", b"src: [tb_top.sv]\n")
        .unwrap()
        .with_dir("/proj/run/test/xsim.dir")
        .unwrap()
        .with_current_dir("/proj/run/test")
        .unwrap();

    let ctx = RunContext {
        root: PathBuf::from("/proj"),
        cwd: PathBuf::from("/proj/run/test"),
        system: &system,
    };

    let operation = CompileOperation::new(CompileArgs::default());
    let err = operation.execute(&ctx).unwrap_err();
    let rbuild_err = err.downcast_ref::<RbuildError>().unwrap();

    assert!(matches!(rbuild_err, RbuildError::Command { .. }));
    assert_eq!(rbuild_err.exit_code(), 5);
}

#[test]
fn test_missing_root_bld_fails_compile() {
    let system = MockSystem::new()
        .with_dir("/proj/run/test")
        .unwrap()
        .with_current_dir("/proj/run/test")
        .unwrap();

    let ctx = RunContext {
        root: PathBuf::from("/proj"),
        cwd: PathBuf::from("/proj/run/test"),
        system: &system,
    };

    let operation = CompileOperation::new(CompileArgs::default());
    let err = operation.execute(&ctx).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RbuildError>().unwrap(),
        RbuildError::NodeNotFound { .. }
    ));
}
