// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layout tree: node handles and registry identity.

use core::sync::atomic::{AtomicU32, Ordering};

/// Process-unique identity of one [`Layout`](crate::Layout).
///
/// Zero is reserved for handles that belong to no layout.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct RegistryId(u32);

impl RegistryId {
    pub(crate) const NONE: Self = Self(0);

    /// Allocate a fresh identity, skipping the reserved zero on wrap-around.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        loop {
            let id = NEXT.fetch_add(1, Ordering::Relaxed);
            if id != 0 {
                return Self(id);
            }
        }
    }
}

/// Generational handle of a node in a [`Layout`](crate::Layout).
///
/// A `NodeId` is a small `Copy` value. It never owns the node it names: the
/// layout that created it does. A handle stays comparable after its node is
/// destroyed, but every query against it reports it as stale, even if the
/// slot it pointed at has since been reused by a newer node.
///
/// Handles also remember which layout minted them, so mixing handles from two
/// layouts is reported as [`TreeError::CrossRegistry`](crate::TreeError::CrossRegistry)
/// instead of silently addressing an unrelated node.
///
/// [`NodeId::default()`] is the null handle ([`NodeId::NULL`]); it is never
/// valid in any layout.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NodeId {
    registry: RegistryId,
    idx: u32,
    generation: u32,
}

impl NodeId {
    /// The null handle.
    pub const NULL: Self = Self {
        registry: RegistryId::NONE,
        idx: 0,
        generation: 0,
    };

    pub(crate) const fn new(registry: RegistryId, idx: u32, generation: u32) -> Self {
        Self {
            registry,
            idx,
            generation,
        }
    }

    /// Returns true for the null handle.
    pub const fn is_null(self) -> bool {
        self.registry.0 == 0
    }

    pub(crate) const fn idx(self) -> usize {
        self.idx as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }

    pub(crate) const fn registry(self) -> RegistryId {
        self.registry
    }
}
