#![forbid(unsafe_code)]

//! Mounted node tree and the re-render loop.
//!
//! # Scheduling
//!
//! A node that read a cell through [`RenderCx::use_shared`] is marked dirty
//! when that cell is written. [`Runtime::flush`] re-renders dirty nodes in
//! ascending [`NodeId`] order. Children are always mounted after their
//! parent, so this visits parents first. Re-rendering a node re-renders its
//! whole subtree with fresh props and clears the subtree's dirty marks.
//! A render that no longer reads a cell drops that cell's subscription.
//!
//! # Reconciliation
//!
//! After a node renders, the children it declared are matched against the
//! previous render by key and component name. Matches keep their node (and
//! subscriptions); everything else is unmounted, which drops its
//! subscriptions.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use shareui_core::{CellId, Error, Result, Subscription};

use crate::component::{Callback, Component, DirtySet, RenderCx};
use crate::element::{Element, Node};

/// Identity of a mounted view node. Allocated in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

struct MountedNode {
    parent: Option<NodeId>,
    key: String,
    component: Rc<dyn Component>,
    subscriptions: BTreeMap<CellId, Subscription>,
    children: Vec<(String, NodeId)>,
    controls: Vec<(String, Callback)>,
    output: Element,
    render_count: u64,
}

/// Owner of a mounted component tree.
pub struct Runtime {
    nodes: BTreeMap<NodeId, MountedNode>,
    root: Option<NodeId>,
    next_id: u64,
    renders: u64,
    dirty: DirtySet,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("dirty", &self.dirty.borrow().len())
            .finish()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            root: None,
            next_id: 1,
            renders: 0,
            dirty: Rc::new(RefCell::new(BTreeSet::new())),
        }
    }

    /// Mount `root` and render the whole tree. Replaces any mounted tree.
    pub fn mount(&mut self, root: impl Component + 'static) -> Result<NodeId> {
        self.unmount();
        let component: Rc<dyn Component> = Rc::new(root);
        let name = component.name();
        let id = self.alloc(None, name.to_string(), component);
        self.root = Some(id);
        tracing::debug!(message = "runtime.mount", root = name, node = id.get());
        self.render_node(id)?;
        Ok(id)
    }

    /// Unmount the whole tree, releasing every subscription.
    pub fn unmount(&mut self) {
        if let Some(root) = self.root.take() {
            self.unmount_subtree(root);
            tracing::debug!(message = "runtime.unmount", node = root.get());
        }
    }

    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Run the callback bound to `control_id`, then flush.
    pub fn activate(&mut self, control_id: &str) -> Result<()> {
        let callback = self
            .nodes
            .values()
            .flat_map(|node| node.controls.iter())
            .find(|(id, _)| id == control_id)
            .map(|(_, cb)| Rc::clone(cb))
            .ok_or_else(|| Error::UnknownControl {
                id: control_id.to_string(),
            })?;
        tracing::debug!(message = "runtime.activate", control = control_id);
        callback()?;
        self.flush()?;
        Ok(())
    }

    /// Re-render every dirty node. Returns how many renders ran.
    pub fn flush(&mut self) -> Result<usize> {
        let span = tracing::debug_span!("runtime.flush", renders = tracing::field::Empty);
        let _guard = span.enter();
        let before = self.renders;
        loop {
            let next = self.dirty.borrow_mut().pop_first();
            let Some(id) = next else {
                break;
            };
            if self.nodes.contains_key(&id) {
                self.render_node(id)?;
            }
        }
        let renders = (self.renders - before) as usize;
        span.record("renders", renders);
        Ok(renders)
    }

    /// Fully resolved output of the mounted tree.
    #[must_use]
    pub fn view(&self) -> Element {
        self.root
            .map(|id| self.resolve(id))
            .unwrap_or_default()
    }

    pub fn render_count(&self, id: NodeId) -> Result<u64> {
        self.node(id).map(|n| n.render_count)
    }

    pub fn subscription_count(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(|n| n.subscriptions.len())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.dirty.borrow().contains(&id)
    }

    /// First mounted node whose component has `name`, in mount order.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.component.name() == name)
            .map(|(id, _)| *id)
    }

    /// Parent and sibling key of a mounted node.
    pub fn placement(&self, id: NodeId) -> Result<(Option<NodeId>, &str)> {
        self.node(id).map(|n| (n.parent, n.key.as_str()))
    }

    /// Ids of every bound control, in mount order.
    #[must_use]
    pub fn control_ids(&self) -> Vec<&str> {
        self.nodes
            .values()
            .flat_map(|node| node.controls.iter().map(|(id, _)| id.as_str()))
            .collect()
    }

    fn node(&self, id: NodeId) -> Result<&MountedNode> {
        self.nodes
            .get(&id)
            .ok_or(Error::NodeNotMounted { id: id.get() })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MountedNode> {
        self.nodes
            .get_mut(&id)
            .ok_or(Error::NodeNotMounted { id: id.get() })
    }

    fn alloc(
        &mut self,
        parent: Option<NodeId>,
        key: String,
        component: Rc<dyn Component>,
    ) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            MountedNode {
                parent,
                key,
                component,
                subscriptions: BTreeMap::new(),
                children: Vec::new(),
                controls: Vec::new(),
                output: Element::Empty,
                render_count: 0,
            },
        );
        id
    }

    fn unmount_subtree(&mut self, id: NodeId) {
        self.dirty.borrow_mut().remove(&id);
        if let Some(node) = self.nodes.remove(&id) {
            tracing::trace!(
                message = "runtime.unmount_node",
                node = id.get(),
                component = node.component.name(),
                subscriptions = node.subscriptions.len()
            );
            for (_, child) in node.children {
                self.unmount_subtree(child);
            }
        }
    }

    fn render_node(&mut self, id: NodeId) -> Result<()> {
        let (component, mut subscriptions) = {
            let node = self.node_mut(id)?;
            (
                Rc::clone(&node.component),
                std::mem::take(&mut node.subscriptions),
            )
        };

        let mut cx = RenderCx {
            node: id,
            dirty: &self.dirty,
            subscriptions: &mut subscriptions,
            used: BTreeSet::new(),
            children: Vec::new(),
            controls: Vec::new(),
        };
        let rendered = component.render(&mut cx);
        let RenderCx {
            used,
            children,
            controls,
            ..
        } = cx;

        if rendered.is_ok() {
            subscriptions.retain(|cell, _| used.contains(cell));
        }
        self.node_mut(id)?.subscriptions = subscriptions;
        let output = rendered?;

        if let Some((dup, _)) = controls.iter().find(|(cid, _)| {
            self.nodes.iter().any(|(other, node)| {
                *other != id && node.controls.iter().any(|(existing, _)| existing == cid)
            })
        }) {
            return Err(Error::DuplicateControl { id: dup.clone() });
        }

        {
            let node = self.node_mut(id)?;
            node.output = output;
            node.controls = controls;
            node.render_count += 1;
        }
        self.renders += 1;
        self.dirty.borrow_mut().remove(&id);
        tracing::trace!(
            message = "runtime.render",
            node = id.get(),
            component = component.name()
        );

        self.reconcile(id, children)
    }

    fn reconcile(
        &mut self,
        parent: NodeId,
        declared: Vec<(String, Rc<dyn Component>)>,
    ) -> Result<()> {
        let mut previous = std::mem::take(&mut self.node_mut(parent)?.children);
        let mut next = Vec::with_capacity(declared.len());

        for (key, component) in declared {
            let reuse = previous.iter().position(|(k, cid)| {
                *k == key
                    && self
                        .nodes
                        .get(cid)
                        .is_some_and(|n| n.component.name() == component.name())
            });
            let child = match reuse {
                Some(pos) => {
                    let (_, cid) = previous.remove(pos);
                    self.node_mut(cid)?.component = component;
                    cid
                }
                None => self.alloc(Some(parent), key.clone(), component),
            };
            next.push((key, child));
        }

        for (_, stale) in previous {
            self.unmount_subtree(stale);
        }
        let order: Vec<NodeId> = next.iter().map(|(_, cid)| *cid).collect();
        self.node_mut(parent)?.children = next;

        for child in order {
            self.render_node(child)?;
        }
        Ok(())
    }

    fn resolve(&self, id: NodeId) -> Element {
        match self.nodes.get(&id) {
            Some(node) => self.substitute(&node.output, node),
            None => Element::Empty,
        }
    }

    fn substitute(&self, element: &Element, owner: &MountedNode) -> Element {
        match element {
            Element::Child { key } => owner
                .children
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, cid)| self.resolve(*cid))
                .unwrap_or_default(),
            Element::Node(node) => Element::Node(Node {
                tag: node.tag.clone(),
                attrs: node.attrs.clone(),
                children: node
                    .children
                    .iter()
                    .map(|c| self.substitute(c, owner))
                    .collect(),
            }),
            other => other.clone(),
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.unmount();
    }
}
