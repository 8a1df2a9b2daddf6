use std::fs;
use std::io::Write as _;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

use test_case::test_case;

use crate::write_input;

fn bin2c() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bin2c"));
    command.env_remove("RUST_LOG");
    command
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    run_with_env(args, &[], stdin)
}

#[test]
fn reads_stdin_and_writes_stdout() {
    let output = run_with_stdin(&["-a", "ab"], &[0x41, 0x42]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "const unsigned char ab[] = {\n\t0x41,0x42\n};\nconst unsigned int ab_len = 2;\n"
    );
}

#[test]
fn all_flags_together() {
    let output = run_with_stdin(
        &["-a", "msg", "-t", "nsstring", "-s", "-p", "extern const", "-l", "2"],
        b"abc",
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "static extern const NSString *msg = \n\t\"\\x61\\x62\"\n\t\"\\x63\";\n"
    );
}

#[test]
fn null_terminated_empty_stdin() {
    let output = run_with_stdin(&["-a", "z", "-0"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("{\n\t0x00\n};"));
    assert!(stdout.ends_with("z_len = 1;\n"));
}

#[test]
fn settings_file_provides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_input(&dir, "bin2c.toml", b"line_width = 1\nstatic_qualifier = true\n");

    let output = run_with_stdin(&["-a", "x", "-c", settings.to_str().unwrap()], &[1, 2]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "static const unsigned char x[] = {\n\t0x01,\n\t0x02\n};\nstatic const unsigned int x_len = 2;\n"
    );
}

#[test]
fn missing_array_name_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.bin", b"data");
    let target = dir.path().join("out.h");

    let output = bin2c()
        .args(["-i", input.to_str().unwrap(), "-o", target.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
    assert!(!target.exists());
}

#[test_case(&["-h"]; "help")]
#[test_case(&["-a", "x", "-q"]; "unknown flag")]
#[test_case(&["-a", "x", "-t", "utf16"]; "unknown format")]
#[test_case(&["-a", "x", "-l", "wide"]; "non numeric width")]
fn usage_goes_to_stderr(args: &[&str]) {
    let output = bin2c().args(args).stdin(Stdio::null()).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test_case(&["-l", "0"]; "zero line width")]
#[test_case(&["-l", "-4"]; "negative line width")]
#[test_case(&["-t", "string", "-0"]; "null terminated string")]
fn invalid_configuration_touches_no_files(extra: &[&str]) {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.bin", b"data");
    let target = dir.path().join("out.h");

    let output = bin2c()
        .args(["-a", "x", "-i", input.to_str().unwrap(), "-o", target.to_str().unwrap()])
        .args(extra)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!target.exists());
}

#[test]
fn unreadable_input_exits_with_io_status() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.h");

    let output = bin2c()
        .args(["-a", "x", "-i", "/no/such/input.bin", "-o", target.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("/no/such/input.bin"));
    assert!(!target.exists());
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.bin", &[0xde, 0xad, 0xbe, 0xef]);
    let target = dir.path().join("out.h");

    let output = bin2c()
        .args(["-a", "dead", "-i", input.to_str().unwrap(), "-o", target.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let source = fs::read_to_string(&target).unwrap();
    assert!(source.starts_with("// Imported from file '"));
    assert!(source.contains("\t0xde,0xad,0xbe,0xef\n};"));
}

fn run_with_env(args: &[&str], env: &[(&str, &str)], stdin: &[u8]) -> Output {
    let mut command = bin2c();
    command.args(args).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
    for (key, value) in env {
        command.env(key, value);
    }

    let mut child = command.spawn().unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn settings_layers_apply_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_input(&dir, "bin2c.toml", b"line_width = 1\nstatic_qualifier = true\n");
    let settings = settings.to_str().unwrap();
    let env = [("BIN2C_LINE_WIDTH", "2"), ("BIN2C_FORMAT", "string")];
    let input = [0x01, 0x02, 0x03];

    // Defaults only.
    let output = run_with_env(&["-a", "v"], &[], &input);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "const unsigned char v[] = {\n\t0x01,0x02,0x03\n};\nconst unsigned int v_len = 3;\n"
    );

    // The settings file overrides the defaults.
    let output = run_with_env(&["-a", "v", "-c", settings], &[], &input);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "static const unsigned char v[] = {\n\t0x01,\n\t0x02,\n\t0x03\n};\n\
         static const unsigned int v_len = 3;\n"
    );

    // The environment overrides the file, which still supplies `static`.
    let output = run_with_env(&["-a", "v", "-c", settings], &env, &input);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "static const char *v = \n\t\"\\x01\\x02\"\n\t\"\\x03\";\n"
    );

    // Flags override the environment.
    let output = run_with_env(
        &["-a", "v", "-c", settings, "-l", "3", "-t", "char", "--no-static"],
        &env,
        &input,
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "const unsigned char v[] = {\n\t0x01,0x02,0x03\n};\nconst unsigned int v_len = 3;\n"
    );
}

#[test]
fn null_terminate_from_settings_can_be_turned_off() {
    let env = [("BIN2C_NULL_TERMINATE", "true")];

    let output = run_with_env(&["-a", "s", "-t", "string"], &env, b"A");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let output = run_with_env(&["-a", "s", "-t", "string", "--no-null-terminate"], &env, b"A");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "const char *s = \n\t\"\\x41\";\n"
    );
}

#[test_case("pretty", "opened input file"; "pretty")]
#[test_case("json", "\"message\":\"opened input file\""; "json")]
fn diagnostics_follow_log_format(format: &str, expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.bin", &[0x2a]);

    let output = bin2c()
        .args(["-a", "x", "-i", input.to_str().unwrap(), "--log-format", format])
        .env("RUST_LOG", "bin2c=debug")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(expected), "{stderr}");
    assert!(!String::from_utf8(output.stdout).unwrap().contains("opened input file"));
}

#[test]
fn pretty_diagnostics_include_source_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.bin", &[0x2a]);

    let output = bin2c()
        .args(["-a", "x", "-i", input.to_str().unwrap(), "--log-format", "pretty"])
        .env("RUST_LOG", "bin2c=debug")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("encoder.rs"), "{stderr}");
    assert!(!stderr.contains("\"message\""), "{stderr}");
}
