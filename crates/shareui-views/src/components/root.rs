#![forbid(unsafe_code)]

use shareui_core::{CellHandle, Result, Scope};
use shareui_runtime::{Component, Element, Node, RenderCx};

use super::{Header, Profile};
use crate::model::{Session, Theme};

/// Top of the tree. Applies the theme class and hands the theme to both
/// branches as a prop.
pub struct Root {
    user: CellHandle<Session>,
    theme: CellHandle<Theme>,
}

impl Root {
    #[must_use]
    pub const fn new(user: CellHandle<Session>, theme: CellHandle<Theme>) -> Self {
        Self { user, theme }
    }

    /// Resolve both capabilities from `scope`, failing if either is missing.
    pub fn compose(scope: &Scope) -> Result<Self> {
        Ok(Self::new(scope.consume()?, scope.consume()?))
    }
}

impl Component for Root {
    fn name(&self) -> &'static str {
        "Root"
    }

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element> {
        let theme = cx.use_shared(&self.theme)?;
        let header = cx.child(
            "header",
            Header::new(self.user.clone(), self.theme.clone(), theme),
        );
        let profile = cx.child("profile", Profile::new(self.user.clone(), theme));
        Ok(Node::new("div")
            .attr("class", format!("app {theme}"))
            .child(header)
            .child(profile)
            .into())
    }
}
