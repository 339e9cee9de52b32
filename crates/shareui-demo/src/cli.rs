#![forbid(unsafe_code)]

//! Command-line interface. Every flag has a `SHAREUI_DEMO_*` environment
//! override.

use std::io::Write;

use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::logging;
use crate::session::{Script, run_script};

#[derive(Debug, Parser)]
#[command(
    name = "shareui-demo",
    about = "Replay clicks against the profile app and print each rendered view",
    version
)]
pub struct Cli {
    /// Comma-separated controls to activate, in order.
    #[arg(long, env = "SHAREUI_DEMO_ACTIONS", value_enum, value_delimiter = ',')]
    pub actions: Vec<Action>,

    /// Initial theme: dark or light.
    #[arg(long, env = "SHAREUI_DEMO_THEME", default_value = "dark")]
    pub theme: String,

    /// Output format for rendered views.
    #[arg(long, env = "SHAREUI_DEMO_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print only the view after the last action.
    #[arg(long, env = "SHAREUI_DEMO_FINAL_ONLY")]
    pub final_only: bool,

    /// Log filter directive (overridden by RUST_LOG).
    #[arg(long, env = "SHAREUI_DEMO_LOG", default_value = "warn")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Click the session button while it reads "Login".
    Login,
    /// Click the session button while it reads "Logout".
    Logout,
    /// Click the session button whatever it reads.
    Session,
    /// Click the dark-mode checkbox.
    ToggleTheme,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Session => "session",
            Self::ToggleTheme => "toggle-theme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_filter)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let script = Script {
        theme: cli.theme.parse()?,
        actions: cli.actions,
        final_only: cli.final_only,
    };
    let steps = run_script(&script)?;
    match cli.format {
        OutputFormat::Text => {
            for step in &steps {
                writeln!(out, "== {} ==", step.title())?;
                write!(out, "{}", step.view.render_text())?;
                writeln!(out, "status: {}", step.status)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &steps)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
