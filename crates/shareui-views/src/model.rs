#![forbid(unsafe_code)]

//! Domain values shared through the app's providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shareui_core::Error;

/// A logged-in user. Either fully populated or absent (`Option<User>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub interests: Vec<String>,
}

impl User {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            interests: interests.into_iter().map(Into::into).collect(),
        }
    }
}

/// Value of the user cell: `None` means logged out.
pub type Session = Option<User>;

/// The record written on login.
#[must_use]
pub fn default_user() -> User {
    User::new("Duane", ["Coding", "Biking", "Words ending in 'ing'"])
}

/// Presentational theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Class name for an element family, e.g. `btn-dark`.
    #[must_use]
    pub fn class(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(Error::invalid_theme(other)),
        }
    }
}
