#![forbid(unsafe_code)]

use shareui_core::{CellHandle, Result};
use shareui_runtime::{Component, Element, Node, RenderCx};

use super::Interests;
use crate::model::{Session, Theme};

/// Shown while nobody is logged in.
pub const PLACEHOLDER: &str = "Please log in to view your profile.";

/// Placeholder while logged out; name heading and interests while logged in.
pub struct Profile {
    user: CellHandle<Session>,
    theme: Theme,
}

impl Profile {
    #[must_use]
    pub const fn new(user: CellHandle<Session>, theme: Theme) -> Self {
        Self { user, theme }
    }
}

impl Component for Profile {
    fn name(&self) -> &'static str {
        "Profile"
    }

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element> {
        let section = Node::new("section").attr("class", "profile");
        let section = match cx.use_shared(&self.user)? {
            None => section.child(Element::text(PLACEHOLDER)),
            Some(user) => {
                let heading =
                    Node::new("h2").child(Element::text(format!("{}'s Profile", user.name)));
                let interests = cx.child("interests", Interests::new(user.interests, self.theme));
                section.child(heading).child(interests)
            }
        };
        Ok(section.into())
    }
}
