use std::fs;
use std::process::{Command, Output};

fn argsdemo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argsdemo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argsdemo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn report_on_stdout() {
    let output = argsdemo(&["w1", "-n", "alice", "-r", "2", "3", "w2", "-t", "x", "y"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "name: alice\nrange: 2..=3\ntags: x, y\nwords: w1 w2\n"
    );
}

#[test]
fn help_lists_sections_in_order() {
    let output = argsdemo(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    let order = [
        "argsdemo ",
        "Usage: argsdemo",
        "Collect options",
        "Options:",
        "  -h, --help",
        "  -s, --strict",
        "  -o, --out",
        "Short flags may be bundled",
    ];
    let mut last = 0;
    for needle in order {
        let pos = out[last..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing or out of order in:\n{out}"));
        last += pos + needle.len();
    }
}

#[test]
fn bundled_flags_are_expanded() {
    let output = argsdemo(&["-vs", "--name", "bob"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "strict: yes\nname: bob\nrange: \ntags: \nwords: \n"
    );
}

#[test]
fn missing_required_option_exits_2() {
    let output = argsdemo(&["--strict"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("missing required option --name"), "{}", err);
    assert!(err.contains("Try 'argsdemo --help'"), "{}", err);
}

#[test]
fn short_fixed_option_prints_usage() {
    let output = argsdemo(&["--range", "1"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error with --range!"), "{}", err);
    assert!(err.contains("Usage: --range FROM TO"), "{}", err);
}

#[test]
fn unknown_option_is_rejected() {
    let output = argsdemo(&["--bogus"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown option --bogus"));
}

#[test]
fn report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let path_str = path.to_str().unwrap();

    let output = argsdemo(&["-o", path_str, "hello"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "words: hello\n");
}

#[test]
fn unwritable_output_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.txt");

    let output = argsdemo(&["--out", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("I/O error:"));
}

#[test]
fn second_bundle_is_not_expanded() {
    let output = argsdemo(&["-vx", "-sv"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("unknown option -sv"), "{}", err);
    assert!(!err.contains("--name"), "{}", err);
}
