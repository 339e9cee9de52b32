#![forbid(unsafe_code)]

//! Scripted session: mount the app, replay control activations, and
//! capture the view after each one.

use serde::Serialize;
use shareui_runtime::Element;
use shareui_views::components::{SESSION_CONTROL, THEME_CONTROL};
use shareui_views::{AppProviders, Theme, mount_app};

use crate::cli::Action;
use crate::error::{DemoError, Result};

#[derive(Debug, Clone)]
pub struct Script {
    pub theme: Theme,
    pub actions: Vec<Action>,
    pub final_only: bool,
}

/// The view after one step. Step 0 is the initial mount.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub step: usize,
    pub action: Option<&'static str>,
    pub status: String,
    pub view: Element,
}

impl Step {
    #[must_use]
    pub fn title(&self) -> String {
        match self.action {
            Some(action) => format!("step {}: {action}", self.step),
            None => format!("step {}: mount", self.step),
        }
    }
}

pub fn run_script(script: &Script) -> Result<Vec<Step>> {
    let providers = AppProviders::with_theme(script.theme);
    let status = providers.status()?;
    let mut runtime = mount_app(&providers)?;
    let mut steps = vec![Step {
        step: 0,
        action: None,
        status: status.get()?,
        view: runtime.view(),
    }];

    for (idx, action) in script.actions.iter().enumerate() {
        let step = idx + 1;
        let control = match action {
            Action::Login | Action::Logout => {
                let expected = if *action == Action::Login { "Login" } else { "Logout" };
                let view = runtime.view();
                let shown = view.control_label(SESSION_CONTROL).unwrap_or_default();
                if shown != expected {
                    return Err(DemoError::InvalidAction {
                        action: action.as_str(),
                        step,
                        shown: shown.to_string(),
                    });
                }
                SESSION_CONTROL
            }
            Action::Session => SESSION_CONTROL,
            Action::ToggleTheme => THEME_CONTROL,
        };
        runtime.activate(control)?;
        tracing::debug!(message = "demo.step", step, action = action.as_str());
        steps.push(Step {
            step,
            action: Some(action.as_str()),
            status: status.get()?,
            view: runtime.view(),
        });
    }

    runtime.unmount();
    providers.unmount();

    if script.final_only {
        let last = steps.len() - 1;
        steps.drain(..last);
    }
    Ok(steps)
}
