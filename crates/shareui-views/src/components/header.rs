#![forbid(unsafe_code)]

use std::rc::Rc;

use shareui_core::{CellHandle, Result};
use shareui_runtime::{Component, Element, Node, RenderCx};

use super::{SESSION_CONTROL, ThemeToggle, ThemedButton};
use crate::app::toggle_session;
use crate::model::{Session, Theme};

/// Login/logout button plus the dark-mode toggle.
pub struct Header {
    user: CellHandle<Session>,
    theme_cell: CellHandle<Theme>,
    theme: Theme,
}

impl Header {
    #[must_use]
    pub const fn new(
        user: CellHandle<Session>,
        theme_cell: CellHandle<Theme>,
        theme: Theme,
    ) -> Self {
        Self {
            user,
            theme_cell,
            theme,
        }
    }
}

impl Component for Header {
    fn name(&self) -> &'static str {
        "Header"
    }

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element> {
        let label = match cx.use_shared(&self.user)? {
            Some(_) => "Logout",
            None => "Login",
        };
        let user = self.user.clone();
        let button = cx.child(
            "session",
            ThemedButton::new(
                SESSION_CONTROL,
                label,
                self.theme,
                Rc::new(move || toggle_session(&user).map(|_| ())),
            ),
        );
        let toggle = cx.child(
            "theme",
            ThemeToggle::new(self.theme, self.theme_cell.clone()),
        );
        Ok(Node::new("header").child(button).child(toggle).into())
    }
}
