#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    App(#[from] shareui_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot {action} at step {step}: the session button reads {shown:?}")]
    InvalidAction {
        action: &'static str,
        step: usize,
        shown: String,
    },

    #[error("invalid log filter {filter:?}: {message}")]
    LogFilter { filter: String, message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::App(shareui_core::Error::InvalidTheme { .. }) | Self::LogFilter { .. } => 2,
            Self::InvalidAction { .. } => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let theme = DemoError::from(shareui_core::Error::invalid_theme("x"));
        assert_eq!(theme.exit_code(), 2);
        let action = DemoError::InvalidAction {
            action: "login",
            step: 2,
            shown: "Logout".into(),
        };
        assert_eq!(action.exit_code(), 3);
        assert_eq!(
            action.to_string(),
            "cannot login at step 2: the session button reads \"Logout\""
        );
        let gone = DemoError::from(shareui_core::Error::UnknownControl { id: "x".into() });
        assert_eq!(gone.exit_code(), 1);
    }
}
