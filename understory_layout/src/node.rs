// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed read-only view of one node.

use core::fmt;

use crate::computed::ComputedLayout;
use crate::cursor::Children;
use crate::style::{Direction, Edges, NodeStyle};
use crate::tree::Layout;
use crate::types::NodeId;

/// A handle paired with the layout it belongs to.
///
/// Every accessor tolerates stale handles and answers `None` (or an empty
/// iterator) for them. Obtain one with [`Layout::node`].
pub struct Node<'a, C, G> {
    layout: &'a Layout<C, G>,
    id: NodeId,
}

impl<C, G> Clone for Node<'_, C, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, G> Copy for Node<'_, C, G> {}

impl<C, G> fmt::Debug for Node<'_, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("valid", &self.is_valid())
            .finish_non_exhaustive()
    }
}

impl<'a, C, G> Node<'a, C, G> {
    pub(crate) fn new(layout: &'a Layout<C, G>, id: NodeId) -> Self {
        Self { layout, id }
    }

    /// The handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns true if the node is alive.
    pub fn is_valid(&self) -> bool {
        self.layout.is_valid(self.id)
    }

    /// The payload.
    pub fn context(&self) -> Option<&'a C> {
        self.layout.context(self.id)
    }

    /// The parent, as a view.
    pub fn parent(&self) -> Option<Self> {
        Some(Self::new(self.layout, self.layout.parent(self.id)?))
    }

    /// Number of children; zero for stale handles.
    pub fn child_count(&self) -> usize {
        self.layout.child_count(self.id).unwrap_or(0)
    }

    /// The child at `index`, as a view.
    pub fn child(&self, index: usize) -> Option<Self> {
        Some(Self::new(self.layout, self.layout.child(self.id, index)?))
    }

    /// Iterate the children.
    pub fn children(&self) -> Children<'a, C, G> {
        self.layout.children(self.id)
    }

    /// The style.
    pub fn style(&self) -> Option<&'a NodeStyle> {
        self.layout.style(self.id).ok()
    }

    /// Results of the last layout pass.
    pub fn computed(&self) -> Option<&'a ComputedLayout> {
        self.layout.computed_layout(self.id).ok()
    }

    /// Offset of the left edge from the parent.
    pub fn left(&self) -> Option<f32> {
        self.computed().map(|c| c.left)
    }

    /// Offset of the top edge from the parent.
    pub fn top(&self) -> Option<f32> {
        self.computed().map(|c| c.top)
    }

    /// Distance from the right edge to the parent's right edge.
    pub fn right(&self) -> Option<f32> {
        self.computed().map(|c| c.right)
    }

    /// Distance from the bottom edge to the parent's bottom edge.
    pub fn bottom(&self) -> Option<f32> {
        self.computed().map(|c| c.bottom)
    }

    /// Border-box width.
    pub fn width(&self) -> Option<f32> {
        self.computed().map(|c| c.width)
    }

    /// Border-box height.
    pub fn height(&self) -> Option<f32> {
        self.computed().map(|c| c.height)
    }

    /// Resolved reading direction.
    pub fn layout_direction(&self) -> Option<Direction> {
        self.computed().map(|c| c.direction)
    }

    /// Resolved margins.
    pub fn layout_margin(&self) -> Option<Edges<f32>> {
        self.computed().map(|c| c.margin)
    }

    /// Resolved border widths.
    pub fn layout_border(&self) -> Option<Edges<f32>> {
        self.computed().map(|c| c.border)
    }

    /// Resolved padding.
    pub fn layout_padding(&self) -> Option<Edges<f32>> {
        self.computed().map(|c| c.padding)
    }
}
