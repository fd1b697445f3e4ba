use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn command(bin: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(bin);
    cmd.args(args).env("XDG_CONFIG_HOME", scratch_dir("config"));
    cmd
}

fn run(bin: &str, args: &[&str]) -> Output {
    command(bin, args)
        .output()
        .unwrap_or_else(|err| panic!("failed to run {bin}: {err}"))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("resviz_smoke_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn memviz_reports_system_memory() {
    let output = run(env!("CARGO_BIN_EXE_memviz"), &["-l", "10"]);
    assert!(output.status.success(), "memviz failed: {output:?}");

    let text = stdout(&output);
    let line = text.lines().next().expect("no output");
    assert!(line.starts_with("Memory         ["), "unexpected line {line}");
    assert!(line.contains('%'));
}

#[test]
fn memviz_empty_program_reports_system_memory() {
    let output = run(env!("CARGO_BIN_EXE_memviz"), &[""]);
    assert!(output.status.success(), "memviz failed: {output:?}");

    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1, "unexpected output {text}");
    assert!(text.starts_with("Memory         ["), "unexpected output {text}");
}

#[test]
fn memviz_unknown_program_exits_with_one() {
    let output = run(env!("CARGO_BIN_EXE_memviz"), &["resviz-no-such-program-4f1c"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "resviz-no-such-program-4f1c not found.\n");
}

#[test]
fn duim_reports_children_and_total() {
    let dir = scratch_dir("duim_target");
    fs::create_dir_all(dir.join("alpha")).unwrap();
    fs::write(dir.join("alpha").join("data.bin"), vec![0u8; 64 * 1024]).unwrap();
    fs::create_dir_all(dir.join("beta")).unwrap();

    let target = dir.display().to_string();
    let output = run(env!("CARGO_BIN_EXE_duim"), &["-l", "10", &target]);
    let _ = fs::remove_dir_all(&dir);
    assert!(output.status.success(), "duim failed: {output:?}");

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.iter().any(|l| l.ends_with("/alpha")));
    assert!(lines.iter().any(|l| l.ends_with("/beta")));
    let total = lines.last().expect("no output");
    assert!(total.starts_with("Total: "), "unexpected total {total}");
    assert!(total.ends_with(&format!("   {target}")));
}

#[test]
fn duim_scans_dash_prefixed_target() {
    let dir = scratch_dir("duim_dash");
    fs::create_dir_all(dir.join("-x").join("inner")).unwrap();

    let output = command(env!("CARGO_BIN_EXE_duim"), &["--", "-x"])
        .current_dir(&dir)
        .output();
    let _ = fs::remove_dir_all(&dir);
    let output = output.expect("failed to run duim");
    assert!(output.status.success(), "duim failed: {output:?}");

    let text = stdout(&output);
    assert!(text.lines().any(|l| l.ends_with("\t-x/inner")), "unexpected output {text}");
    assert!(text.ends_with("   -x\n"), "unexpected output {text}");
}

#[test]
fn duim_missing_target_fails() {
    let output = run(env!("CARGO_BIN_EXE_duim"), &["/nonexistent/resviz/target"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "Error: Failed to retrieve disk usage information for /nonexistent/resviz/target."
    ));
}

#[test]
fn duim_rejects_empty_target() {
    let output = run(env!("CARGO_BIN_EXE_duim"), &[""]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Target directory not specified."));
}
