mod common;

use common::{run_meetnotes, TestEnv};

#[test]
fn meetnotes_help_shows_usage() {
    let output = run_meetnotes(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("summarize"));
}

#[test]
fn meetnotes_version_shows_version() {
    let output = run_meetnotes(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("meetnotes "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_meetnotes(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("meetnotes"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_meetnotes(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("max_attempts = 5"));
}

#[test]
fn config_show_masks_api_key() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"super-secret\"\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("super-secret"));
    assert!(stdout.contains("********"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_meetnotes(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(!second.status.success());
    assert!(stderr.contains("Use --force to overwrite"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn prompt_renders_transcript_and_template() {
    let env = TestEnv::new();
    let transcript = "Erin: we need two more reviewers.\nFrank: I'll ask the platform team.";

    let output = env.run_with_stdin(&["prompt", "--instructions", "Focus on staffing"], transcript);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains(transcript));
    assert!(stdout.contains("Instructions: Focus on staffing"));
    assert!(stdout.contains("**Key Takeaways**"));
    assert!(stdout.contains("**Action Items**"));
}

#[test]
fn prompt_uses_configured_default_instructions() {
    let env = TestEnv::new();
    env.write_config("[prompt]\ndefault_instructions = \"List decisions only.\"\n");

    let output = env.run_with_stdin(&["prompt"], "Gina: approved.");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Instructions: List decisions only."));
}

#[test]
fn prompt_rejects_blank_transcript() {
    let env = TestEnv::new();

    let output = env.run_with_stdin(&["prompt"], "   \n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("transcript is empty"), "stderr:\n{}", stderr);
}
