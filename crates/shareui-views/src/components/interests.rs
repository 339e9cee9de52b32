#![forbid(unsafe_code)]

use shareui_core::Result;
use shareui_runtime::{Component, Element, Node, RenderCx};

use crate::model::Theme;

/// Stateless list of interests, styled by the theme prop.
pub struct Interests {
    items: Vec<String>,
    theme: Theme,
}

impl Interests {
    #[must_use]
    pub const fn new(items: Vec<String>, theme: Theme) -> Self {
        Self { items, theme }
    }
}

impl Component for Interests {
    fn name(&self) -> &'static str {
        "Interests"
    }

    fn render(&self, _cx: &mut RenderCx<'_>) -> Result<Element> {
        Ok(Node::new("ul")
            .attr("class", format!("interests {}", self.theme))
            .children(
                self.items
                    .iter()
                    .map(|item| Node::new("li").child(Element::text(item.as_str()))),
            )
            .into())
    }
}
