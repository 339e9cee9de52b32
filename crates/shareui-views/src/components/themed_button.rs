#![forbid(unsafe_code)]

use std::rc::Rc;

use shareui_core::Result;
use shareui_runtime::{Callback, Component, Element, RenderCx};

use crate::model::Theme;

/// A button styled for the current theme. Invokes `on_click` on activation.
pub struct ThemedButton {
    id: &'static str,
    label: String,
    theme: Theme,
    on_click: Callback,
}

impl ThemedButton {
    #[must_use]
    pub fn new(
        id: &'static str,
        label: impl Into<String>,
        theme: Theme,
        on_click: Callback,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            theme,
            on_click,
        }
    }
}

impl Component for ThemedButton {
    fn name(&self) -> &'static str {
        "ThemedButton"
    }

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element> {
        let on_click = Rc::clone(&self.on_click);
        cx.on_activate(self.id, move || on_click());
        Ok(Element::button(self.id, self.label.as_str()).with_class(self.theme.class("btn")))
    }
}
