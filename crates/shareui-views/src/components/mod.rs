#![forbid(unsafe_code)]

//! View components.
//!
//! ```text
//! Root
//! ├── Header
//! │   ├── ThemedButton   (#session)
//! │   └── ThemeToggle    (#theme)
//! └── Profile
//!     └── Interests      (only while logged in)
//! ```
//!
//! The user cell is injected as a [`CellHandle`](shareui_core::CellHandle)
//! into the nodes that read it. The theme is read once at the root and
//! passed down as a plain prop.

pub mod header;
pub mod interests;
pub mod profile;
pub mod root;
pub mod themed_button;
pub mod toggle;

pub use header::Header;
pub use interests::Interests;
pub use profile::{PLACEHOLDER, Profile};
pub use root::Root;
pub use themed_button::ThemedButton;
pub use toggle::ThemeToggle;

/// Id of the login/logout button.
pub const SESSION_CONTROL: &str = "session";
/// Id of the dark-mode checkbox.
pub const THEME_CONTROL: &str = "theme";
