//! Drives the demo CLI end to end with in-memory output.

use clap::Parser;
use shareui_core::Error;
use shareui_demo::{Action, Cli, DemoError, OutputFormat, run};

fn run_args(args: &[&str]) -> Result<String, DemoError> {
    let mut argv = vec!["shareui-demo"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("valid arguments");
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn parses_comma_separated_actions() {
    let cli = Cli::try_parse_from([
        "shareui-demo",
        "--actions",
        "login,toggle-theme,logout",
        "--format",
        "json",
    ])
    .expect("parse");
    assert_eq!(
        cli.actions,
        vec![Action::Login, Action::ToggleTheme, Action::Logout]
    );
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.theme, "dark");
}

#[test]
fn rejects_unknown_action_name() {
    assert!(Cli::try_parse_from(["shareui-demo", "--actions", "dance"]).is_err());
}

#[test]
fn text_output_shows_each_state() {
    let text = run_args(&["--actions", "login,logout"]).expect("run");
    assert!(text.contains("== step 0: mount =="));
    assert!(text.contains("Please log in to view your profile."));
    assert!(text.contains("== step 1: login =="));
    assert!(text.contains("Duane's Profile"));
    assert!(text.contains("Words ending in 'ing'"));
    assert!(text.contains("[Logout] #session .btn-dark"));
    assert!(text.contains("== step 2: logout =="));
    assert!(text.contains("status: signed out | theme: dark"));
}

#[test]
fn json_output_is_structured() {
    let json = run_args(&["--actions", "toggle-theme", "--format", "json", "--final-only"])
        .expect("run");
    let steps: serde_json::Value = serde_json::from_str(&json).expect("json");
    let steps = steps.as_array().expect("array");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["action"], "toggle-theme");
    assert_eq!(steps[0]["status"], "signed out | theme: light");
    assert_eq!(steps[0]["view"]["type"], "node");
    assert_eq!(steps[0]["view"]["tag"], "div");
}

#[test]
fn light_initial_theme() {
    let text = run_args(&["--theme", "light"]).expect("run");
    assert!(text.contains("<div class=\"app light\">"));
    assert!(text.contains("[ ] Dark mode #theme"));
}

#[test]
fn invalid_theme_is_a_configuration_error() {
    let err = run_args(&["--theme", "purple"]).expect_err("invalid theme");
    assert!(matches!(err, DemoError::App(Error::InvalidTheme { .. })));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn out_of_order_action_is_rejected() {
    let err = run_args(&["--actions", "login,login"]).expect_err("second login");
    assert_eq!(err.exit_code(), 3);
}
