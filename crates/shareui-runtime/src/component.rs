#![forbid(unsafe_code)]

//! Component trait and the per-render context handed to it.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use shareui_core::{CellHandle, CellId, CellReader, Result, Subscription};

use crate::element::Element;
use crate::runtime::NodeId;

/// Control activation callback.
pub type Callback = Rc<dyn Fn() -> Result<()>>;

pub(crate) type DirtySet = Rc<RefCell<BTreeSet<NodeId>>>;

/// A view node. Props live in the implementing struct; shared state is
/// reached only through capabilities the struct was constructed with.
pub trait Component {
    /// Stable type name. A child keeps its node identity across parent
    /// re-renders only while key and name both match.
    fn name(&self) -> &'static str;

    fn render(&self, cx: &mut RenderCx<'_>) -> Result<Element>;
}

/// Render-time context for one mounted node.
pub struct RenderCx<'a> {
    pub(crate) node: NodeId,
    pub(crate) dirty: &'a DirtySet,
    pub(crate) subscriptions: &'a mut BTreeMap<CellId, Subscription>,
    pub(crate) used: BTreeSet<CellId>,
    pub(crate) children: Vec<(String, Rc<dyn Component>)>,
    pub(crate) controls: Vec<(String, Callback)>,
}

impl RenderCx<'_> {
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.node
    }

    /// Read a shared value and re-render this node whenever it changes.
    ///
    /// The subscription is registered on first use. It is released when the
    /// node unmounts or renders without reading the cell.
    pub fn use_shared<T: Clone + 'static>(&mut self, handle: &CellHandle<T>) -> Result<T> {
        self.use_reader(&handle.reader())
    }

    /// Read-only flavor of [`use_shared`](Self::use_shared).
    pub fn use_reader<T: Clone + 'static>(&mut self, reader: &CellReader<T>) -> Result<T> {
        let value = reader.read()?;
        self.used.insert(reader.id());
        if !self.subscriptions.contains_key(&reader.id()) {
            let dirty: Weak<RefCell<BTreeSet<NodeId>>> = Rc::downgrade(self.dirty);
            let node = self.node;
            let sub = reader.subscribe(move |_| {
                if let Some(dirty) = dirty.upgrade() {
                    dirty.borrow_mut().insert(node);
                }
            })?;
            tracing::trace!(
                message = "runtime.subscribe",
                node = node.get(),
                cell = reader.id().get()
            );
            self.subscriptions.insert(reader.id(), sub);
        }
        Ok(value)
    }

    /// Declare a child component and return its placeholder.
    ///
    /// Keys must be unique among siblings; a repeated key is ignored.
    pub fn child(
        &mut self,
        key: impl Into<String>,
        component: impl Component + 'static,
    ) -> Element {
        let key = key.into();
        if self.children.iter().any(|(k, _)| *k == key) {
            tracing::warn!(
                message = "runtime.duplicate_child",
                node = self.node.get(),
                key = key.as_str()
            );
        } else {
            self.children.push((key.clone(), Rc::new(component)));
        }
        Element::Child { key }
    }

    /// Bind the callback run when the control `id` is activated.
    pub fn on_activate(
        &mut self,
        id: impl Into<String>,
        callback: impl Fn() -> Result<()> + 'static,
    ) {
        self.controls.push((id.into(), Rc::new(callback)));
    }
}
