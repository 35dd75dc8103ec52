// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core registry: node lifetimes, structure, styles and layout passes.

use core::fmt;
use std::sync::Arc;

use log::Level;
use smallvec::SmallVec;
use taffy::{AvailableSpace, TaffyTree, TraversePartialTree};

use crate::computed::{ComputedLayout, round_to_pixel_grid};
use crate::config::Config;
use crate::cursor::{ChildCursor, Children};
use crate::error::{ConstraintViolation, TreeError};
use crate::node::Node;
use crate::style::{Direction, Edges, NodeStyle, NodeType, PositionType, Value};
use crate::types::{NodeId, RegistryId};

type EngineId = taffy::NodeId;

/// A layout tree: owns every node, its payload and its style, and drives the
/// flexbox engine.
///
/// Nodes are named by [`NodeId`] handles. Handles never own anything; the
/// layout does. Destroying a node (or dropping the layout) invalidates every
/// handle to it, and later queries through a stale handle report
/// [`TreeError::InvalidHandle`] or `None` instead of touching another node.
///
/// Each node may carry one payload of type `C`. Payloads are boxed
/// individually, so a reference obtained from [`Layout::context`] points at
/// the same address for as long as the node lives, however many other nodes
/// come and go.
///
/// Every layout starts with a root node sized 100% × 100% of the available
/// space. The root can be styled but never destroyed or attached elsewhere.
///
/// ## Example
///
/// ```rust
/// use understory_layout::{Direction, FlexDirection, Layout};
///
/// let mut layout: Layout<&str> = Layout::new();
/// let root = layout.root();
/// layout
///     .update_style(root, |s| s.flex_direction = FlexDirection::Row)
///     .unwrap();
///
/// let left = layout.create_child(root, "left").unwrap();
/// let right = layout.create_child(root, "right").unwrap();
/// for node in [left, right] {
///     layout.update_style(node, |s| s.flex_grow = Some(1.0)).unwrap();
/// }
///
/// layout.calculate(500.0, 100.0, Direction::Ltr).unwrap();
/// assert_eq!(layout.node(right).left(), Some(250.0));
/// assert_eq!(layout.node(right).width(), Some(250.0));
/// assert_eq!(layout.context(right), Some(&"right"));
/// ```
pub struct Layout<C = (), G = ()> {
    id: RegistryId,
    /// slots
    slots: Vec<Option<Slot<C>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    live: usize,
    engine: TaffyTree<NodeId>,
    root: NodeId,
    config: Option<Arc<Config<G>>>,
}

#[derive(Debug)]
struct Slot<C> {
    generation: u32,
    engine: EngineId,
    context: Option<Box<C>>,
    style: NodeStyle,
    computed: ComputedLayout,
    has_new_layout: bool,
}

/// Geometry of a parent, as seen by its children during the layout pass.
#[derive(Clone, Copy, Debug)]
struct ParentFrame {
    abs_left: f32,
    abs_top: f32,
    width: f32,
    rounded_width: f32,
    rounded_height: f32,
    inset_left: f32,
    inset_right: f32,
    direction: Direction,
    mirror: bool,
}

impl<C: fmt::Debug, G: fmt::Debug> fmt::Debug for Layout<C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("registry", &self.id)
            .field("root", &self.root)
            .field("nodes_total", &self.slots.len())
            .field("nodes_alive", &self.live)
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: Default, G> Default for Layout<C, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Default, G> Layout<C, G> {
    /// Create a layout with default settings and a root node.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a layout reading its settings from `config`.
    ///
    /// One config may back any number of layouts.
    pub fn with_config(config: Arc<Config<G>>) -> Self {
        Self::build(Some(config))
    }

    fn build(config: Option<Arc<Config<G>>>) -> Self {
        let mut engine = TaffyTree::new();
        // Pixel snapping happens in our own pass so it can honor the scale factor.
        engine.disable_rounding();
        let mut layout = Self {
            id: RegistryId::next(),
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            engine,
            root: NodeId::NULL,
            config,
        };
        let mut style = NodeStyle::for_defaults(layout.use_web_defaults());
        style.width = Value::Percent(100.0);
        style.height = Value::Percent(100.0);
        layout.root = layout.alloc(Some(Box::new(C::default())), style);
        layout
    }

    /// Create a detached node carrying a default payload.
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with(C::default())
    }
}

impl<C, G> Layout<C, G> {
    /// Create a detached node carrying `context`.
    pub fn create_node_with(&mut self, context: C) -> NodeId {
        let style = NodeStyle::for_defaults(self.use_web_defaults());
        self.alloc(Some(Box::new(context)), style)
    }

    /// Create a node carrying `context` and append it to `parent`.
    pub fn create_child(&mut self, parent: NodeId, context: C) -> Result<NodeId, TreeError> {
        if let Err(err) = self.check(parent) {
            return self.reject("create_child", err);
        }
        let id = self.create_node_with(context);
        if let Err(err) = self.append_child(parent, id) {
            let destroyed = self.destroy_node(id);
            debug_assert!(destroyed.is_ok(), "a fresh detached node is always destroyable");
            return Err(err);
        }
        Ok(id)
    }

    fn alloc(&mut self, context: Option<Box<C>>, style: NodeStyle) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            (idx, self.generations[idx] + 1)
        } else {
            self.slots.push(None);
            self.generations.push(0);
            (self.slots.len() - 1, 1_u32)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot indices are stored as u32 in NodeId."
        )]
        let id = NodeId::new(self.id, idx as u32, generation);
        let web = self.use_web_defaults();
        let engine = self
            .engine
            .new_leaf_with_context(style.to_taffy(web), id)
            .expect("creating an engine leaf is infallible");
        self.generations[idx] = generation;
        self.slots[idx] = Some(Slot {
            generation,
            engine,
            context,
            style,
            computed: ComputedLayout::default(),
            has_new_layout: true,
        });
        self.live += 1;
        self.emit(Level::Trace, format_args!("created node {id:?}"));
        id
    }

    fn free(&mut self, idx: usize) {
        self.slots[idx] = None;
        self.live -= 1;
        if self.generations[idx] == u32::MAX {
            self.emit(
                Level::Debug,
                format_args!("retiring slot {idx}: generation space exhausted"),
            );
        } else {
            self.free_list.push(idx);
        }
    }

    /// Destroy `id` and every node below it.
    ///
    /// The node is detached from its parent first. Handles to all destroyed
    /// nodes become invalid and their payloads are dropped.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<(), TreeError> {
        if let Err(err) = self.check(id) {
            return self.reject("destroy_node", err);
        }
        if id == self.root {
            return self.reject("destroy_node", ConstraintViolation::Root.into());
        }
        let top = self.engine_id(id)?;
        if let Some(parent) = self.engine.parent(top) {
            self.engine.remove_child(parent, top)?;
        }
        let mut stack: SmallVec<[EngineId; 16]> = SmallVec::new();
        stack.push(top);
        let mut destroyed = 0_usize;
        while let Some(node) = stack.pop() {
            for i in 0..self.engine.child_count(node) {
                stack.push(self.engine.child_at_index(node, i)?);
            }
            let handle = self.handle_of(node);
            self.engine.remove(node)?;
            if let Some(handle) = handle {
                self.free(handle.idx());
                destroyed += 1;
            }
        }
        self.emit(
            Level::Debug,
            format_args!(
                "destroyed {id:?} and {} descendants",
                destroyed.saturating_sub(1)
            ),
        );
        Ok(())
    }

    /// Destroy every node except the root.
    pub fn clear(&mut self) {
        let root = self.root.idx();
        let doomed: Vec<(usize, EngineId)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != root)
            .filter_map(|(idx, slot)| Some((idx, slot.as_ref()?.engine)))
            .collect();
        for (idx, engine) in doomed {
            if let Err(err) = self.engine.remove(engine) {
                self.emit(Level::Warn, format_args!("clear: {err}"));
            }
            self.free(idx);
        }
        if let Some(root) = self.slots[root].as_mut() {
            root.has_new_layout = true;
        }
        self.emit(Level::Debug, format_args!("cleared layout"));
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if only the root is alive.
    pub fn is_empty(&self) -> bool {
        self.live <= 1
    }

    /// Returns true if `id` names a live node of this layout.
    pub fn is_valid(&self, id: NodeId) -> bool {
        self.check(id).is_ok()
    }

    /// A read-only view of `id`.
    pub fn node(&self, id: NodeId) -> Node<'_, C, G> {
        Node::new(self, id)
    }

    // --- payloads ---

    /// The payload of `id`, or `None` if the handle is invalid or the node
    /// carries none.
    pub fn context(&self, id: NodeId) -> Option<&C> {
        self.slot(id).ok()?.context.as_deref()
    }

    /// The payload of `id`, mutably.
    pub fn context_mut(&mut self, id: NodeId) -> Option<&mut C> {
        self.slot_mut(id).ok()?.context.as_deref_mut()
    }

    /// Replace the payload of `id`.
    pub fn set_context(&mut self, id: NodeId, context: C) -> Result<(), TreeError> {
        match self.slot_mut(id) {
            Ok(slot) => {
                slot.context = Some(Box::new(context));
                Ok(())
            }
            Err(err) => self.reject("set_context", err),
        }
    }

    /// Remove and return the payload of `id`.
    pub fn take_context(&mut self, id: NodeId) -> Result<Option<C>, TreeError> {
        match self.slot_mut(id) {
            Ok(slot) => Ok(slot.context.take().map(|context| *context)),
            Err(err) => self.reject("take_context", err),
        }
    }

    // --- structure ---

    /// The parent of `id`, or `None` for the root, detached nodes and
    /// invalid handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let engine = self.slot(id).ok()?.engine;
        self.handle_of(self.engine.parent(engine)?)
    }

    /// Number of children of `id`.
    pub fn child_count(&self, id: NodeId) -> Result<usize, TreeError> {
        let engine = self.engine_id(id)?;
        Ok(self.engine.child_count(engine))
    }

    /// The child of `id` at `index`, in layout order.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        let engine = self.slot(id).ok()?.engine;
        if index >= self.engine.child_count(engine) {
            return None;
        }
        let child = self.engine.child_at_index(engine, index).ok()?;
        self.handle_of(child)
    }

    /// A restartable cursor over the children of `id`.
    pub fn child_cursor(&self, id: NodeId) -> Result<ChildCursor, TreeError> {
        Ok(ChildCursor::new(id, self.child_count(id)?))
    }

    /// Iterate the children of `id` in layout order; empty for invalid
    /// handles.
    pub fn children(&self, id: NodeId) -> Children<'_, C, G> {
        let len = self.child_count(id).unwrap_or(0);
        Children::new(self, ChildCursor::new(id, len))
    }

    /// Insert `child` under `parent` at `index`.
    ///
    /// A `child` that already has a parent is moved. An `index` at or past
    /// the child count (counted after `child` is detached) appends.
    ///
    /// Fails without touching the tree if either handle is invalid or
    /// foreign, if `child` is the root, or if `child` is `parent` or one of
    /// its ancestors.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), TreeError> {
        let (parent_engine, child_engine) = match self.check_insert(parent, child) {
            Ok(pair) => pair,
            Err(err) => return self.reject("insert_child", err),
        };
        if let Some(old) = self.engine.parent(child_engine) {
            self.engine.remove_child(old, child_engine)?;
        }
        let index = index.min(self.engine.child_count(parent_engine));
        self.engine
            .insert_child_at_index(parent_engine, index, child_engine)?;
        self.emit(
            Level::Trace,
            format_args!("inserted {child:?} under {parent:?} at {index}"),
        );
        Ok(())
    }

    fn check_insert(
        &self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(EngineId, EngineId), TreeError> {
        let (parent_engine, child_engine) = self.check_pair(parent, child)?;
        if child == self.root {
            return Err(ConstraintViolation::Root.into());
        }
        if self.is_ancestor_or_self(child_engine, parent_engine) {
            return Err(ConstraintViolation::Cycle.into());
        }
        Ok((parent_engine, child_engine))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert_child(parent, child, usize::MAX)
    }

    /// Append `child` as the last child of the root.
    pub fn add_to_root(&mut self, child: NodeId) -> Result<(), TreeError> {
        self.append_child(self.root, child)
    }

    /// Detach `child` from `parent`.
    ///
    /// Returns `Ok(false)` and changes nothing if `child` is not a child of
    /// `parent`. The detached subtree stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, TreeError> {
        let (parent_engine, child_engine) = match self.check_pair(parent, child) {
            Ok(pair) => pair,
            Err(err) => return self.reject("remove_child", err),
        };
        if self.engine.parent(child_engine) != Some(parent_engine) {
            return Ok(false);
        }
        self.engine.remove_child(parent_engine, child_engine)?;
        self.emit(
            Level::Trace,
            format_args!("removed {child:?} from {parent:?}"),
        );
        Ok(true)
    }

    fn is_ancestor_or_self(&self, ancestor: EngineId, node: EngineId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.engine.parent(n);
        }
        false
    }

    /// Visit the whole tree in pre-order, starting at the root.
    pub fn walk(&self, visitor: impl FnMut(NodeId)) {
        let walked = self.walk_from(self.root, visitor);
        debug_assert!(walked.is_ok(), "the root is always live");
    }

    /// Visit `id` and its descendants in pre-order.
    pub fn walk_from(&self, id: NodeId, mut visitor: impl FnMut(NodeId)) -> Result<(), TreeError> {
        let mut stack: SmallVec<[EngineId; 32]> = SmallVec::new();
        stack.push(self.engine_id(id)?);
        while let Some(node) = stack.pop() {
            if let Some(handle) = self.handle_of(node) {
                visitor(handle);
            }
            for i in (0..self.engine.child_count(node)).rev() {
                stack.push(self.engine.child_at_index(node, i)?);
            }
        }
        Ok(())
    }

    // --- styles ---

    /// The style of `id`.
    pub fn style(&self, id: NodeId) -> Result<&NodeStyle, TreeError> {
        Ok(&self.slot(id)?.style)
    }

    /// Replace the style of `id` and mark it dirty.
    pub fn set_style(&mut self, id: NodeId, style: NodeStyle) -> Result<(), TreeError> {
        let engine = match self.engine_id(id) {
            Ok(engine) => engine,
            Err(err) => return self.reject("set_style", err),
        };
        let web = self.use_web_defaults();
        self.engine.set_style(engine, style.to_taffy(web))?;
        if let Some(slot) = self.slots[id.idx()].as_mut() {
            slot.style = style;
        }
        Ok(())
    }

    /// Edit the style of `id` in place and mark it dirty.
    pub fn update_style(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut NodeStyle),
    ) -> Result<(), TreeError> {
        let mut style = match self.slot(id) {
            Ok(slot) => slot.style.clone(),
            Err(err) => return self.reject("update_style", err),
        };
        edit(&mut style);
        self.set_style(id, style)
    }

    /// Give `to` the style of `from`.
    pub fn copy_style(&mut self, from: NodeId, to: NodeId) -> Result<(), TreeError> {
        let style = match self.slot(from) {
            Ok(slot) => slot.style.clone(),
            Err(err) => return self.reject("copy_style", err),
        };
        self.set_style(to, style)
    }

    /// Return a detached, childless node to its freshly created state.
    ///
    /// The style reverts to the configured defaults, the payload is dropped
    /// and the computed layout is cleared.
    pub fn reset(&mut self, id: NodeId) -> Result<(), TreeError> {
        let engine = match self.engine_id(id) {
            Ok(engine) => engine,
            Err(err) => return self.reject("reset", err),
        };
        if id == self.root {
            return self.reject("reset", ConstraintViolation::Root.into());
        }
        if self.engine.parent(engine).is_some() || self.engine.child_count(engine) > 0 {
            return self.reject("reset", ConstraintViolation::Attached.into());
        }
        let defaults = NodeStyle::for_defaults(self.use_web_defaults());
        self.set_style(id, defaults)?;
        if let Some(slot) = self.slots[id.idx()].as_mut() {
            slot.context = None;
            slot.computed = ComputedLayout::default();
            slot.has_new_layout = true;
        }
        Ok(())
    }

    // --- layout ---

    /// Lay out the subtree rooted at `root` within the available space.
    ///
    /// Non-finite sizes leave that axis unconstrained. `direction` is the
    /// reading direction `root` inherits; [`Direction::Inherit`] means
    /// left to right.
    ///
    /// Results are read back through [`Layout::computed_layout`] or the
    /// [`Node`] view. Nodes whose results changed have their
    /// [`has_new_layout`](Layout::has_new_layout) flag set.
    pub fn compute(
        &mut self,
        root: NodeId,
        available_width: f32,
        available_height: f32,
        direction: Direction,
    ) -> Result<(), TreeError> {
        let root_engine = match self.engine_id(root) {
            Ok(engine) => engine,
            Err(err) => return self.reject("compute", err),
        };
        let available = taffy::Size {
            width: available_space(available_width),
            height: available_space(available_height),
        };
        self.engine.compute_layout(root_engine, available)?;

        let scale = self.point_scale_factor();
        let own = self.engine.layout(root_engine)?.size;
        let width = if available_width.is_finite() {
            available_width
        } else {
            own.width
        };
        let height = if available_height.is_finite() {
            available_height
        } else {
            own.height
        };
        let frame = ParentFrame {
            abs_left: 0.0,
            abs_top: 0.0,
            width,
            rounded_width: round_to_pixel_grid(width, scale, false),
            rounded_height: round_to_pixel_grid(height, scale, false),
            inset_left: 0.0,
            inset_right: 0.0,
            direction: direction.resolve(Direction::Ltr),
            mirror: false,
        };

        let mut visited = 0_usize;
        let mut stack: SmallVec<[(EngineId, ParentFrame); 32]> = SmallVec::new();
        stack.push((root_engine, frame));
        while let Some((node, parent)) = stack.pop() {
            let Some(handle) = self.handle_of(node) else {
                continue;
            };
            let engine_layout = *self.engine.layout(node)?;
            let Some(slot) = self.slots[handle.idx()].as_mut() else {
                continue;
            };
            let direction = slot.style.direction.resolve(parent.direction);
            let width = engine_layout.size.width;
            let height = engine_layout.size.height;
            let mut left = engine_layout.location.x;
            let top = engine_layout.location.y;
            if parent.mirror && !pinned_horizontally(&slot.style) {
                // Mirror the margin box, then put physical margins and relative
                // insets back on their own sides.
                let content_width = parent.width - parent.inset_left - parent.inset_right;
                let shift = relative_offset(&slot.style, content_width);
                let margin = engine_layout.margin;
                let start = left - shift - margin.left - parent.inset_left;
                left = parent.width - parent.inset_right - start - margin.right - width + shift;
            }

            let abs_left = parent.abs_left + left;
            let abs_top = parent.abs_top + top;
            let text = slot.style.node_type == NodeType::Text;
            let rounded_left = round_to_pixel_grid(left, scale, false);
            let rounded_top = round_to_pixel_grid(top, scale, false);
            let rounded_width = round_to_pixel_grid(abs_left + width, scale, text)
                - round_to_pixel_grid(abs_left, scale, false);
            let rounded_height = round_to_pixel_grid(abs_top + height, scale, text)
                - round_to_pixel_grid(abs_top, scale, false);

            let border = Edges::from_rect(engine_layout.border);
            let padding = Edges::from_rect(engine_layout.padding);
            let computed = ComputedLayout {
                left: rounded_left,
                top: rounded_top,
                right: parent.rounded_width - rounded_left - rounded_width,
                bottom: parent.rounded_height - rounded_top - rounded_height,
                width: rounded_width,
                height: rounded_height,
                direction,
                margin: Edges::from_rect(engine_layout.margin),
                border,
                padding,
            };
            if slot.computed != computed {
                slot.computed = computed;
                slot.has_new_layout = true;
            }
            visited += 1;

            let frame = ParentFrame {
                abs_left,
                abs_top,
                width,
                rounded_width,
                rounded_height,
                inset_left: border.left + padding.left,
                inset_right: border.right + padding.right,
                direction,
                mirror: direction == Direction::Rtl,
            };
            for i in 0..self.engine.child_count(node) {
                stack.push((self.engine.child_at_index(node, i)?, frame));
            }
        }
        self.emit(
            Level::Debug,
            format_args!("computed layout of {visited} nodes under {root:?}"),
        );
        Ok(())
    }

    /// Lay out the whole tree from the root.
    pub fn calculate(
        &mut self,
        available_width: f32,
        available_height: f32,
        direction: Direction,
    ) -> Result<(), TreeError> {
        self.compute(self.root, available_width, available_height, direction)
    }

    /// Results of the last layout pass that reached `id`.
    pub fn computed_layout(&self, id: NodeId) -> Result<&ComputedLayout, TreeError> {
        Ok(&self.slot(id)?.computed)
    }

    /// Whether the results of `id` changed since the flag was last cleared.
    pub fn has_new_layout(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.slot(id)?.has_new_layout)
    }

    /// Set or clear the new-layout flag of `id`.
    pub fn set_has_new_layout(&mut self, id: NodeId, value: bool) -> Result<(), TreeError> {
        match self.slot_mut(id) {
            Ok(slot) => {
                slot.has_new_layout = value;
                Ok(())
            }
            Err(err) => self.reject("set_has_new_layout", err),
        }
    }

    /// Whether `id` needs to be laid out again.
    pub fn is_dirty(&self, id: NodeId) -> Result<bool, TreeError> {
        let engine = self.engine_id(id)?;
        Ok(self.engine.dirty(engine)?)
    }

    /// Force `id` and its ancestors to be laid out again.
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<(), TreeError> {
        let engine = match self.engine_id(id) {
            Ok(engine) => engine,
            Err(err) => return self.reject("mark_dirty", err),
        };
        self.engine.mark_dirty(engine)?;
        Ok(())
    }

    // --- configuration ---

    /// The shared configuration, if the layout was built with one.
    pub fn config(&self) -> Option<&Config<G>> {
        self.config.as_deref()
    }

    /// The configuration, mutably, while this layout is its only owner.
    ///
    /// Changes apply to nodes created and layouts computed afterwards.
    pub fn config_mut(&mut self) -> Option<&mut Config<G>> {
        Arc::get_mut(self.config.as_mut()?)
    }

    /// Pixel density used for rounding; `1.0` without a config.
    pub fn point_scale_factor(&self) -> f32 {
        self.config
            .as_ref()
            .map_or(1.0, |config| config.point_scale_factor())
    }

    /// Whether new nodes start from CSS defaults; `false` without a config.
    pub fn use_web_defaults(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| config.use_web_defaults())
    }

    // --- internals ---

    fn check_registry(&self, id: NodeId) -> Result<(), TreeError> {
        if !id.is_null() && id.registry() != self.id {
            return Err(TreeError::CrossRegistry { node: id });
        }
        Ok(())
    }

    /// Foreign handles are reported before stale ones.
    fn check_pair(&self, a: NodeId, b: NodeId) -> Result<(EngineId, EngineId), TreeError> {
        self.check_registry(a)?;
        self.check_registry(b)?;
        Ok((self.engine_id(a)?, self.engine_id(b)?))
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        self.slot(id).map(|_| ())
    }

    fn slot(&self, id: NodeId) -> Result<&Slot<C>, TreeError> {
        self.check_registry(id)?;
        self.slots
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|slot| !id.is_null() && slot.generation == id.generation())
            .ok_or(TreeError::InvalidHandle(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot<C>, TreeError> {
        self.check_registry(id)?;
        self.slots
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|slot| !id.is_null() && slot.generation == id.generation())
            .ok_or(TreeError::InvalidHandle(id))
    }

    fn engine_id(&self, id: NodeId) -> Result<EngineId, TreeError> {
        Ok(self.slot(id)?.engine)
    }

    fn handle_of(&self, engine: EngineId) -> Option<NodeId> {
        self.engine.get_node_context(engine).copied()
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        match &self.config {
            Some(config) => config.log(level, args),
            None => log::log!(level, "{args}"),
        }
    }

    fn reject<T>(&self, op: &str, err: TreeError) -> Result<T, TreeError> {
        self.emit(Level::Warn, format_args!("{op} rejected: {err}"));
        Err(err)
    }
}

fn available_space(size: f32) -> AvailableSpace {
    if size.is_finite() {
        AvailableSpace::Definite(size)
    } else {
        AvailableSpace::MaxContent
    }
}

/// Absolutely positioned nodes with a horizontal inset keep their side in
/// right-to-left containers.
fn pinned_horizontally(style: &NodeStyle) -> bool {
    let defined = |value: Value| matches!(value, Value::Point(_) | Value::Percent(_));
    style.position_type == PositionType::Absolute
        && (defined(style.position.left) || defined(style.position.right))
}

/// Horizontal displacement of a relatively positioned node.
fn relative_offset(style: &NodeStyle, basis: f32) -> f32 {
    if style.position_type != PositionType::Relative {
        return 0.0;
    }
    style
        .position
        .left
        .resolve(basis)
        .or_else(|| style.position.right.resolve(basis).map(|right| -right))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Align, FlexDirection};
    use std::sync::Mutex;

    fn grow(layout: &mut Layout<u32>, node: NodeId) {
        layout
            .update_style(node, |s| s.flex_grow = Some(1.0))
            .unwrap();
    }

    fn fixed(layout: &mut Layout<u32>, node: NodeId, width: f32, height: f32) {
        layout
            .update_style(node, |s| {
                s.width = Value::Point(width);
                s.height = Value::Point(height);
            })
            .unwrap();
    }

    #[test]
    fn two_growing_children_split_a_row() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| s.flex_direction = FlexDirection::Row)
            .unwrap();
        let a = layout.create_child(root, 1).unwrap();
        let b = layout.create_child(root, 2).unwrap();
        grow(&mut layout, a);
        grow(&mut layout, b);

        layout.calculate(500.0, 100.0, Direction::Ltr).unwrap();

        let a_layout = *layout.computed_layout(a).unwrap();
        let b_layout = *layout.computed_layout(b).unwrap();
        assert_eq!((a_layout.left, a_layout.width), (0.0, 250.0));
        assert_eq!((b_layout.left, b_layout.width), (250.0, 250.0));
        assert_eq!(a_layout.height, 100.0, "classic align-items stretches");
        assert_eq!(a_layout.right, 250.0);
        assert_eq!(b_layout.right, 0.0);
    }

    #[test]
    fn percentage_sizes_resolve_against_parent() {
        let mut layout: Layout<u32> = Layout::new();
        let node = layout.create_node();
        layout
            .update_style(node, |s| {
                s.width = Value::Percent(50.0);
                s.height = Value::Percent(50.0);
            })
            .unwrap();
        layout.add_to_root(node).unwrap();

        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();

        let view = layout.node(node);
        assert_eq!(view.width(), Some(50.0));
        assert_eq!(view.height(), Some(50.0));
        assert_eq!(view.left(), Some(0.0));
        assert_eq!(view.top(), Some(0.0));
        assert_eq!(layout.node(layout.root()).width(), Some(100.0));
    }

    #[test]
    fn appended_children_iterate_in_order() {
        let mut layout: Layout<u32> = Layout::new();
        let parent = layout.create_node();
        let created: Vec<_> = (0..10)
            .map(|i| layout.create_child(parent, i).unwrap())
            .collect();

        let seen: Vec<_> = layout.children(parent).collect();
        assert_eq!(seen, created);
        let payloads: Vec<_> = layout
            .children(parent)
            .map(|c| *layout.context(c).unwrap())
            .collect();
        assert_eq!(payloads, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn destroy_invalidates_exactly_the_subtree() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let doomed = layout.create_child(root, 10).unwrap();
        let kids: Vec<_> = (0..3)
            .map(|i| layout.create_child(doomed, 20 + i).unwrap())
            .collect();
        let sibling = layout.create_child(root, 30).unwrap();
        let sibling_ptr: *const u32 = layout.context(sibling).unwrap();

        layout.destroy_node(doomed).unwrap();

        assert!(!layout.is_valid(doomed));
        for kid in &kids {
            assert!(!layout.is_valid(*kid), "descendant {kid:?} survived");
            assert_eq!(layout.context(*kid), None);
        }
        assert!(layout.is_valid(sibling));
        assert!(core::ptr::eq(layout.context(sibling).unwrap(), sibling_ptr));
        assert_eq!(layout.child_count(root), Ok(1));
        assert_eq!(layout.len(), 2);
        assert_eq!(
            layout.destroy_node(doomed),
            Err(TreeError::InvalidHandle(doomed))
        );
    }

    #[test]
    fn payload_addresses_survive_unrelated_churn() {
        let mut layout: Layout<u32> = Layout::new();
        let keep = layout.create_node_with(7);
        let ptr: *const u32 = layout.context(keep).unwrap();
        let mut others = Vec::new();
        for i in 0..200 {
            others.push(layout.create_node_with(i));
            if i % 3 == 0 {
                let victim = others.swap_remove(0);
                layout.destroy_node(victim).unwrap();
            }
        }
        assert!(core::ptr::eq(layout.context(keep).unwrap(), ptr));
        assert_eq!(layout.context(keep), Some(&7));
    }

    #[test]
    fn reused_slots_do_not_revive_old_handles() {
        let mut layout: Layout<u32> = Layout::new();
        let a = layout.create_node_with(1);
        layout.destroy_node(a).unwrap();
        let b = layout.create_node_with(2);

        assert_eq!(a.idx(), b.idx(), "free slot should be reused");
        assert!(b.generation() > a.generation(), "generation must increase on reuse");
        assert_ne!(a, b);
        assert!(!layout.is_valid(a));
        assert_eq!(layout.context(a), None);
        assert_eq!(layout.context(b), Some(&2));
    }

    #[test]
    fn exhausted_slots_are_retired() {
        let mut layout: Layout<u32> = Layout::new();
        let a = layout.create_node();
        layout.generations[a.idx()] = u32::MAX;
        layout.slots[a.idx()].as_mut().unwrap().generation = u32::MAX;
        let a = NodeId::new(layout.id, a.idx() as u32, u32::MAX);
        layout.destroy_node(a).unwrap();
        let b = layout.create_node();
        assert_ne!(a.idx(), b.idx(), "retired slot must not be reused");
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut first: Layout<u32> = Layout::new();
        let mut second: Layout<u32> = Layout::new();
        let foreign = second.create_node();

        assert_eq!(
            first.add_to_root(foreign),
            Err(TreeError::CrossRegistry { node: foreign })
        );
        assert_eq!(first.child_count(first.root()), Ok(0));
        assert_eq!(
            first.destroy_node(foreign),
            Err(TreeError::CrossRegistry { node: foreign })
        );
        assert!(second.is_valid(foreign), "other layout is untouched");
        assert!(!first.is_valid(foreign));
        assert_eq!(first.context(foreign), None);
    }

    #[test]
    fn null_handle_is_never_valid() {
        let mut layout: Layout<u32> = Layout::new();
        assert!(!layout.is_valid(NodeId::NULL));
        assert_eq!(
            layout.destroy_node(NodeId::NULL),
            Err(TreeError::InvalidHandle(NodeId::NULL))
        );
        assert_eq!(
            layout.child_count(NodeId::NULL),
            Err(TreeError::InvalidHandle(NodeId::NULL))
        );
        assert_eq!(layout.parent(NodeId::NULL), None);
    }

    #[test]
    fn insertion_index_is_clamped() {
        let mut layout: Layout<u32> = Layout::new();
        let parent = layout.create_node();
        let a = layout.create_child(parent, 0).unwrap();
        let b = layout.create_node();
        let c = layout.create_node();

        layout.insert_child(parent, b, 99).unwrap();
        layout.insert_child(parent, c, 0).unwrap();
        assert_eq!(layout.children(parent).collect::<Vec<_>>(), [c, a, b]);

        // Moving within one parent counts positions after detaching.
        layout.insert_child(parent, c, 2).unwrap();
        assert_eq!(layout.children(parent).collect::<Vec<_>>(), [a, b, c]);
    }

    #[test]
    fn reparenting_moves_a_node_once() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let a = layout.create_child(root, 0).unwrap();
        let b = layout.create_child(root, 0).unwrap();
        let c = layout.create_child(a, 0).unwrap();
        let before = layout.len();

        layout.append_child(b, c).unwrap();

        assert_eq!(layout.child_count(a), Ok(0));
        assert_eq!(layout.child_count(b), Ok(1));
        assert_eq!(layout.parent(c), Some(b));
        assert_eq!(layout.len(), before);
    }

    #[test]
    fn cycles_are_rejected_without_changes() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let a = layout.create_child(root, 0).unwrap();
        let b = layout.create_child(a, 0).unwrap();
        let c = layout.create_child(b, 0).unwrap();

        let cycle = Err(TreeError::Constraint(ConstraintViolation::Cycle));
        assert_eq!(layout.append_child(c, a), cycle);
        assert_eq!(layout.append_child(a, a), cycle);
        assert_eq!(layout.parent(a), Some(root));
        assert_eq!(layout.parent(c), Some(b));
        assert_eq!(layout.child_count(c), Ok(0));

        assert_eq!(
            layout.append_child(a, root),
            Err(TreeError::Constraint(ConstraintViolation::Root))
        );
        assert_eq!(
            layout.destroy_node(root),
            Err(TreeError::Constraint(ConstraintViolation::Root))
        );
    }

    #[test]
    fn removing_a_non_child_is_a_no_op() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let a = layout.create_child(root, 0).unwrap();
        let b = layout.create_child(root, 0).unwrap();

        assert_eq!(layout.remove_child(a, b), Ok(false));
        assert_eq!(layout.parent(b), Some(root));

        assert_eq!(layout.remove_child(root, b), Ok(true));
        assert_eq!(layout.parent(b), None);
        assert!(layout.is_valid(b), "detached nodes stay alive");
        assert_eq!(layout.children(root).collect::<Vec<_>>(), [a]);
    }

    #[test]
    fn clear_keeps_only_the_root() {
        let mut layout: Layout<u32> = Layout::new();
        let a = layout.create_child(layout.root(), 0).unwrap();
        let b = layout.create_child(a, 0).unwrap();
        let loose = layout.create_node();

        layout.clear();

        for id in [a, b, loose] {
            assert!(!layout.is_valid(id));
        }
        assert!(layout.is_valid(layout.root()));
        assert!(layout.is_empty());
        assert_eq!(layout.child_count(layout.root()), Ok(0));
        let fresh = layout.create_child(layout.root(), 3).unwrap();
        assert_eq!(layout.context(fresh), Some(&3));
    }

    #[test]
    fn rtl_mirrors_children() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| s.flex_direction = FlexDirection::Row)
            .unwrap();
        let a = layout.create_child(root, 0).unwrap();
        let b = layout.create_child(root, 0).unwrap();
        fixed(&mut layout, a, 100.0, 10.0);
        fixed(&mut layout, b, 50.0, 10.0);

        layout.calculate(300.0, 100.0, Direction::Ltr).unwrap();
        assert_eq!(layout.node(a).left(), Some(0.0));
        assert_eq!(layout.node(b).left(), Some(100.0));
        assert_eq!(layout.node(b).layout_direction(), Some(Direction::Ltr));

        layout.calculate(300.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(a).left(), Some(200.0));
        assert_eq!(layout.node(b).left(), Some(150.0));
        assert_eq!(layout.node(a).right(), Some(0.0));
        assert_eq!(layout.node(b).layout_direction(), Some(Direction::Rtl));
    }

    #[test]
    fn rtl_keeps_physical_margins_and_insets() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| s.flex_direction = FlexDirection::Row)
            .unwrap();
        let margined = layout.create_child(root, 0).unwrap();
        fixed(&mut layout, margined, 100.0, 10.0);
        layout
            .update_style(margined, |s| s.margin.left = Value::Point(10.0))
            .unwrap();

        layout.calculate(300.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(margined).left(), Some(200.0), "left margin faces away from the start");
        assert_eq!(layout.node(margined).right(), Some(0.0));

        layout.remove_child(root, margined).unwrap();
        let shifted = layout.create_child(root, 0).unwrap();
        fixed(&mut layout, shifted, 100.0, 10.0);
        layout
            .update_style(shifted, |s| {
                s.position_type = PositionType::Relative;
                s.position.left = Value::Point(10.0);
            })
            .unwrap();

        layout.calculate(300.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(shifted).left(), Some(210.0), "a left inset pushes rightwards");

        layout
            .update_style(shifted, |s| {
                s.position.left = Value::Undefined;
                s.position.right = Value::Point(10.0);
            })
            .unwrap();
        layout.calculate(300.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(shifted).left(), Some(190.0));
    }

    #[test]
    fn rtl_mirrors_inside_padding() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| {
                s.flex_direction = FlexDirection::Row;
                s.padding.left = Value::Point(5.0);
                s.padding.right = Value::Point(20.0);
            })
            .unwrap();
        let a = layout.create_child(root, 0).unwrap();
        let b = layout.create_child(root, 0).unwrap();
        fixed(&mut layout, a, 100.0, 10.0);
        fixed(&mut layout, b, 50.0, 10.0);
        layout
            .update_style(b, |s| s.margin.right = Value::Point(4.0))
            .unwrap();

        layout.calculate(300.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(a).left(), Some(180.0));
        assert_eq!(layout.node(b).left(), Some(126.0));
    }

    #[test]
    fn structural_edits_dirty_the_parent() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let parent = layout.create_child(root, 0).unwrap();
        let child = layout.create_node();
        let clean = |layout: &mut Layout<u32>| {
            layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();
            assert_eq!(layout.is_dirty(parent), Ok(false));
        };

        clean(&mut layout);
        layout.insert_child(parent, child, 0).unwrap();
        assert_eq!(layout.is_dirty(parent), Ok(true), "insert");
        assert_eq!(layout.is_dirty(root), Ok(true), "insert reaches ancestors");

        clean(&mut layout);
        assert_eq!(layout.remove_child(parent, child), Ok(true));
        assert_eq!(layout.is_dirty(parent), Ok(true), "remove");

        layout.append_child(parent, child).unwrap();
        clean(&mut layout);
        layout.destroy_node(child).unwrap();
        assert_eq!(layout.is_dirty(parent), Ok(true), "destroy");
        assert_eq!(layout.child_count(parent), Ok(0));
    }

    #[test]
    fn explicit_direction_overrides_inherited() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let inner = layout.create_child(root, 0).unwrap();
        layout
            .update_style(inner, |s| s.direction = Direction::Ltr)
            .unwrap();
        let leaf = layout.create_child(inner, 0).unwrap();

        layout.calculate(100.0, 100.0, Direction::Rtl).unwrap();
        assert_eq!(layout.node(root).layout_direction(), Some(Direction::Rtl));
        assert_eq!(layout.node(inner).layout_direction(), Some(Direction::Ltr));
        assert_eq!(layout.node(leaf).layout_direction(), Some(Direction::Ltr));
    }

    #[test]
    fn edges_snap_to_the_pixel_grid() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| s.flex_direction = FlexDirection::Row)
            .unwrap();
        let kids: Vec<_> = (0..3)
            .map(|i| layout.create_child(root, i).unwrap())
            .collect();
        for kid in &kids {
            grow(&mut layout, *kid);
        }

        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();

        let lefts: Vec<_> = kids.iter().map(|k| layout.node(*k).left()).collect();
        let widths: Vec<_> = kids.iter().map(|k| layout.node(*k).width()).collect();
        assert_eq!(lefts, [Some(0.0), Some(33.0), Some(67.0)]);
        assert_eq!(widths, [Some(33.0), Some(34.0), Some(33.0)]);
    }

    #[test]
    fn zero_scale_keeps_fractions() {
        let mut config = Config::<()>::new();
        config.set_point_scale_factor(0.0);
        let mut layout: Layout<u32> = Layout::with_config(Arc::new(config));
        let root = layout.root();
        layout
            .update_style(root, |s| s.flex_direction = FlexDirection::Row)
            .unwrap();
        let kids: Vec<_> = (0..3)
            .map(|i| layout.create_child(root, i).unwrap())
            .collect();
        for kid in &kids {
            grow(&mut layout, *kid);
        }

        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();

        let width = layout.node(kids[1]).width().unwrap();
        assert!((width - 100.0 / 3.0).abs() < 1e-3, "unexpected width {width}");
    }

    #[test]
    fn new_layout_flag_tracks_changes() {
        let mut layout: Layout<u32> = Layout::new();
        let node = layout.create_child(layout.root(), 0).unwrap();
        assert_eq!(layout.has_new_layout(node), Ok(true));

        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();
        layout.set_has_new_layout(node, false).unwrap();
        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();
        assert_eq!(layout.has_new_layout(node), Ok(false), "same inputs, same results");

        fixed(&mut layout, node, 20.0, 20.0);
        assert_eq!(layout.is_dirty(node), Ok(true));
        layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();
        assert_eq!(layout.is_dirty(node), Ok(false));
        assert_eq!(layout.has_new_layout(node), Ok(true));

        layout.mark_dirty(node).unwrap();
        assert_eq!(layout.is_dirty(node), Ok(true));
        assert_eq!(layout.is_dirty(layout.root()), Ok(true), "dirtiness propagates up");
    }

    #[test]
    fn unbounded_axes_use_content_size() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        layout
            .update_style(root, |s| {
                s.width = Value::Auto;
                s.height = Value::Auto;
            })
            .unwrap();
        let child = layout.create_child(root, 0).unwrap();
        fixed(&mut layout, child, 40.0, 30.0);

        layout
            .calculate(f32::INFINITY, f32::NAN, Direction::Inherit)
            .unwrap();
        assert_eq!(layout.node(root).width(), Some(40.0));
        assert_eq!(layout.node(root).height(), Some(30.0));
    }

    #[test]
    fn web_defaults_follow_config() {
        let mut config = Config::<()>::new();
        config.set_use_web_defaults(true);
        let mut layout: Layout<u32> = Layout::with_config(Arc::new(config));
        let node = layout.create_node();
        let style = layout.style(node).unwrap();
        assert_eq!(style.flex_direction, FlexDirection::Row);
        assert_eq!(style.align_content, Align::Stretch);
        assert_eq!(style.resolved_flex_shrink(layout.use_web_defaults()), 1.0);

        let classic: Layout<u32> = Layout::new();
        assert_eq!(
            classic.style(classic.root()).unwrap().flex_direction,
            FlexDirection::Column
        );
    }

    #[test]
    fn rejections_reach_the_configured_logger() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut config = Config::<()>::new();
        config.set_logger(move |level, msg| {
            if level == Level::Warn {
                sink.lock().unwrap().push(msg.to_owned());
            }
        });
        let mut layout: Layout<u32> = Layout::with_config(Arc::new(config));
        let root = layout.root();

        assert!(layout.destroy_node(root).is_err());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("destroy_node"), "unexpected record {:?}", seen[0]);
    }

    #[test]
    fn config_is_mutable_only_while_unshared() {
        let shared = Arc::new(Config::<u8>::with_context(1));
        let mut layout: Layout<u32, u8> = Layout::with_config(Arc::clone(&shared));
        assert!(layout.config_mut().is_none());
        drop(shared);
        *layout.config_mut().unwrap().context_mut() = 9;
        assert_eq!(layout.config().map(|c| *c.context()), Some(9));

        let mut bare: Layout<u32, u8> = Layout::new();
        assert!(bare.config().is_none());
        assert!(bare.config_mut().is_none());
        assert_eq!(bare.point_scale_factor(), 1.0);
    }

    #[test]
    fn reset_requires_a_detached_leaf() {
        let mut layout: Layout<u32> = Layout::new();
        let parent = layout.create_child(layout.root(), 1).unwrap();
        let child = layout.create_child(parent, 2).unwrap();
        let attached = Err(TreeError::Constraint(ConstraintViolation::Attached));

        assert_eq!(layout.reset(parent), attached);
        assert_eq!(layout.reset(child), attached);
        assert_eq!(
            layout.reset(layout.root()),
            Err(TreeError::Constraint(ConstraintViolation::Root))
        );

        layout.remove_child(parent, child).unwrap();
        fixed(&mut layout, child, 5.0, 5.0);
        layout.reset(child).unwrap();
        assert_eq!(layout.context(child), None);
        assert_eq!(layout.style(child).unwrap(), &NodeStyle::classic());
        assert_eq!(layout.computed_layout(child).unwrap(), &ComputedLayout::default());
    }

    #[test]
    fn payloads_can_be_replaced_and_taken() {
        let mut layout: Layout<u32> = Layout::new();
        let node = layout.create_node();
        assert_eq!(layout.context(node), Some(&0));
        *layout.context_mut(node).unwrap() += 4;
        assert_eq!(layout.take_context(node), Ok(Some(4)));
        assert_eq!(layout.context(node), None);
        layout.set_context(node, 11).unwrap();
        assert_eq!(layout.context(node), Some(&11));
    }

    #[test]
    fn styles_copy_between_nodes() {
        let mut layout: Layout<u32> = Layout::new();
        let a = layout.create_node();
        let b = layout.create_node();
        fixed(&mut layout, a, 12.0, 34.0);
        layout.copy_style(a, b).unwrap();
        assert_eq!(layout.style(b).unwrap().width, Value::Point(12.0));
        assert_eq!(layout.style(a), layout.style(b));
    }

    #[test]
    fn walk_is_pre_order() {
        let mut layout: Layout<u32> = Layout::new();
        let root = layout.root();
        let a = layout.create_child(root, 0).unwrap();
        let a1 = layout.create_child(a, 0).unwrap();
        let a2 = layout.create_child(a, 0).unwrap();
        let b = layout.create_child(root, 0).unwrap();

        let mut order = Vec::new();
        layout.walk(|id| order.push(id));
        assert_eq!(order, [root, a, a1, a2, b]);

        order.clear();
        layout.walk_from(a, |id| order.push(id)).unwrap();
        assert_eq!(order, [a, a1, a2]);
        assert!(layout.walk_from(NodeId::NULL, |_| {}).is_err());
    }
}
