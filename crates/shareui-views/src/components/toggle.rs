#![forbid(unsafe_code)]

use shareui_core::{CellHandle, Result};
use shareui_runtime::{Component, Element, RenderCx};

use super::THEME_CONTROL;
use crate::app::toggle_theme;
use crate::model::Theme;

/// Dark-mode checkbox. Shows the theme it was given as a prop and writes
/// the flipped theme through its capability when activated.
pub struct ThemeToggle {
    theme: Theme,
    cell: CellHandle<Theme>,
}

impl ThemeToggle {
    #[must_use]
    pub const fn new(theme: Theme, cell: CellHandle<Theme>) -> Self {
        Self { theme, cell }
    }
}

impl Component for ThemeToggle {
    fn name(&self) -> &'static str {
        "ThemeToggle"
    }

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element> {
        let cell = self.cell.clone();
        cx.on_activate(THEME_CONTROL, move || toggle_theme(&cell).map(|_| ()));
        Ok(Element::checkbox(THEME_CONTROL, "Dark mode", self.theme.is_dark()))
    }
}
