// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child enumeration.

use core::fmt;
use core::iter::FusedIterator;

use crate::tree::Layout;
use crate::types::NodeId;

/// A restartable position in the children of one node.
///
/// The cursor does not borrow the layout: it remembers the parent, how many
/// children it had when the cursor was created, and how far enumeration has
/// got. Each step looks the next child up by index.
///
/// Mutating the parent's children while a cursor is held does not invalidate
/// the cursor, but what it yields afterwards is unspecified: it may stop
/// early, skip, or repeat children. Create a new cursor to see the new
/// structure.
///
/// ```rust
/// use understory_layout::Layout;
///
/// let mut layout: Layout = Layout::new();
/// let root = layout.root();
/// let a = layout.create_child(root, ()).unwrap();
/// let b = layout.create_child(root, ()).unwrap();
///
/// let mut cursor = layout.child_cursor(root).unwrap();
/// assert_eq!(cursor.next_child(&layout), Some(a));
/// assert_eq!(cursor.next_child(&layout), Some(b));
/// assert_eq!(cursor.next_child(&layout), None);
///
/// cursor.restart();
/// assert_eq!(cursor.next_child(&layout), Some(a));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildCursor {
    parent: NodeId,
    len: usize,
    pos: usize,
}

impl ChildCursor {
    pub(crate) fn new(parent: NodeId, len: usize) -> Self {
        Self {
            parent,
            len,
            pos: 0,
        }
    }

    /// The node whose children are enumerated.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Yield the next child, or `None` once the snapshot is exhausted or the
    /// parent no longer has a child at the current position.
    pub fn next_child<C, G>(&mut self, layout: &Layout<C, G>) -> Option<NodeId> {
        if self.pos >= self.len {
            return None;
        }
        match layout.child(self.parent, self.pos) {
            Some(child) => {
                self.pos += 1;
                Some(child)
            }
            None => {
                self.pos = self.len;
                None
            }
        }
    }

    /// Go back to the first child.
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    /// Child count captured when the cursor was created.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the parent had no children when the cursor was created.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of children already yielded.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of children left to yield.
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }
}

/// Iterator over the children of a node, in layout order.
///
/// Created by [`Layout::children`] and [`Node::children`](crate::Node::children).
pub struct Children<'a, C, G> {
    layout: &'a Layout<C, G>,
    cursor: ChildCursor,
}

impl<'a, C, G> Children<'a, C, G> {
    pub(crate) fn new(layout: &'a Layout<C, G>, cursor: ChildCursor) -> Self {
        Self { layout, cursor }
    }

    /// The underlying cursor.
    pub fn cursor(&self) -> ChildCursor {
        self.cursor
    }
}

impl<C, G> Clone for Children<'_, C, G> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout,
            cursor: self.cursor,
        }
    }
}

impl<C, G> fmt::Debug for Children<'_, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<C, G> Iterator for Children<'_, C, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.cursor.next_child(self.layout)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The layout is borrowed, so the snapshot cannot go stale.
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl<C, G> ExactSizeIterator for Children<'_, C, G> {}

impl<C, G> FusedIterator for Children<'_, C, G> {}
