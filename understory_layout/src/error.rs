// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by layout tree operations.

use crate::types::NodeId;

/// Errors returned by [`Layout`](crate::Layout) operations.
///
/// Every failing operation leaves the tree exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle is null, or its node has been destroyed.
    #[error("node handle {0:?} is null or no longer live")]
    InvalidHandle(NodeId),
    /// The handle was minted by a different layout.
    #[error("node handle {node:?} belongs to a different layout")]
    CrossRegistry {
        /// The foreign handle.
        node: NodeId,
    },
    /// A structural rule would be broken.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
    /// The layout engine rejected an operation the tree had already validated.
    #[error("layout engine rejected the operation: {0}")]
    Engine(String),
}

/// Structural rules enforced by the tree mutator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    /// The child is the parent itself or one of its ancestors.
    #[error("insertion would make a node its own ancestor")]
    Cycle,
    /// The layout root cannot be destroyed or attached under another node.
    #[error("the layout root cannot be destroyed or re-parented")]
    Root,
    /// The node still has a parent or children.
    #[error("node is still attached to a parent or has children")]
    Attached,
}

impl From<taffy::TaffyError> for TreeError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Engine(err.to_string())
    }
}
