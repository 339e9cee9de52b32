#![forbid(unsafe_code)]

//! Render output tree.
//!
//! Components return an [`Element`]. Child components appear as
//! [`Element::Child`] placeholders until the runtime resolves them in
//! [`Runtime::view`](crate::Runtime::view).

use std::fmt::Write as _;

use serde::Serialize;

/// Kind of interactive control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Button,
    Checkbox { checked: bool },
}

/// A tagged container with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Node {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One node of rendered output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    #[default]
    Empty,
    Text {
        text: String,
    },
    Node(Node),
    Control {
        id: String,
        #[serde(flatten)]
        kind: ControlKind,
        label: String,
        class: Option<String>,
    },
    /// Placeholder for a child component declared with
    /// [`RenderCx::child`](crate::RenderCx::child).
    Child {
        key: String,
    },
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl Element {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Control {
            id: id.into(),
            kind: ControlKind::Button,
            label: label.into(),
            class: None,
        }
    }

    #[must_use]
    pub fn checkbox(id: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        Self::Control {
            id: id.into(),
            kind: ControlKind::Checkbox { checked },
            label: label.into(),
            class: None,
        }
    }

    /// Set the presentational class of a control. No-op on other elements.
    #[must_use]
    pub fn with_class(mut self, value: impl Into<String>) -> Self {
        if let Self::Control { class, .. } = &mut self {
            *class = Some(value.into());
        }
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text leaves in document order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |el| {
            if let Self::Text { text } = el {
                out.push(text.as_str());
            }
        });
        out
    }

    /// First node with the given tag, depth first.
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<&Node> {
        match self {
            Self::Node(node) if node.tag == tag => Some(node),
            Self::Node(node) => node.children.iter().find_map(|c| c.find_tag(tag)),
            _ => None,
        }
    }

    /// Control with the given id.
    #[must_use]
    pub fn find_control(&self, control_id: &str) -> Option<&Self> {
        match self {
            Self::Control { id, .. } if id == control_id => Some(self),
            Self::Node(node) => node
                .children
                .iter()
                .find_map(|c| c.find_control(control_id)),
            _ => None,
        }
    }

    /// Label of the control with the given id.
    #[must_use]
    pub fn control_label(&self, control_id: &str) -> Option<&str> {
        match self.find_control(control_id)? {
            Self::Control { label, .. } => Some(label),
            _ => None,
        }
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        if let Self::Node(node) = self {
            for child in &node.children {
                child.walk(visit);
            }
        }
    }

    /// Indented outline, one element per line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Empty => {}
            Self::Text { text } => {
                let _ = writeln!(out, "{indent}{text}");
            }
            Self::Node(node) => {
                let _ = write!(out, "{indent}<{}", node.tag);
                for (name, value) in &node.attrs {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                let _ = writeln!(out, ">");
                for child in &node.children {
                    child.write_outline(out, depth + 1);
                }
            }
            Self::Control {
                id,
                kind,
                label,
                class,
            } => {
                let _ = match kind {
                    ControlKind::Button => write!(out, "{indent}[{label}]"),
                    ControlKind::Checkbox { checked } => {
                        let mark = if *checked { 'x' } else { ' ' };
                        write!(out, "{indent}[{mark}] {label}")
                    }
                };
                let _ = match class {
                    Some(class) => writeln!(out, " #{id} .{class}"),
                    None => writeln!(out, " #{id}"),
                };
            }
            Self::Child { key } => {
                let _ = writeln!(out, "{indent}<{key} ...>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Node::new("div")
            .attr("class", "app dark")
            .child(Element::text("Hello"))
            .child(
                Node::new("ul")
                    .child(Node::new("li").child(Element::text("a")))
                    .child(Node::new("li").child(Element::text("b"))),
            )
            .child(Element::button("session", "Login").with_class("btn-dark"))
            .child(Element::checkbox("theme", "Dark mode", true))
            .into()
    }

    #[test]
    fn texts_in_document_order() {
        assert_eq!(sample().texts(), vec!["Hello", "a", "b"]);
    }

    #[test]
    fn find_tag_and_attr() {
        let el = sample();
        let root = el.find_tag("div").expect("div");
        assert_eq!(root.get_attr("class"), Some("app dark"));
        assert_eq!(el.find_tag("ul").map(|n| n.children.len()), Some(2));
        assert!(el.find_tag("table").is_none());
    }

    #[test]
    fn find_control_by_id() {
        let el = sample();
        assert_eq!(el.control_label("session"), Some("Login"));
        assert!(matches!(
            el.find_control("theme"),
            Some(Element::Control {
                kind: ControlKind::Checkbox { checked: true },
                ..
            })
        ));
        assert!(el.find_control("missing").is_none());
    }

    #[test]
    fn with_class_only_touches_controls() {
        assert_eq!(Element::text("x").with_class("c"), Element::text("x"));
    }

    #[test]
    fn outline_rendering() {
        let expected = "\
<div class=\"app dark\">
  Hello
  <ul>
    <li>
      a
    <li>
      b
  [Login] #session .btn-dark
  [x] Dark mode #theme
";
        assert_eq!(sample().render_text(), expected);
    }

    #[test]
    fn serializes_with_type_tags() {
        let json = serde_json::to_value(Element::checkbox("theme", "Dark mode", false))
            .expect("serialize");
        assert_eq!(json["type"], "control");
        assert_eq!(json["kind"], "checkbox");
        assert_eq!(json["checked"], false);
        assert_eq!(json["id"], "theme");
    }
}
