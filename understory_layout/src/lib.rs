// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layout --heading-base-level=0

//! Understory Layout: a handle-based flexbox layout tree.
//!
//! Understory Layout owns a tree of nodes, each with a style and an optional typed payload,
//! and computes their geometry with the [`taffy`] flexbox engine.
//!
//! - Nodes are named by small `Copy` handles ([`NodeId`]) that never own anything and are
//!   reliably detected as stale once their node is gone, even after its slot is reused.
//! - Each node carries at most one payload of a caller-chosen type `C`, stored at an address
//!   that stays put for the node's whole life.
//! - Structural edits are checked up front: foreign handles, stale handles, cycles and misuse
//!   of the root are rejected without touching the tree.
//!
//! ## Where this fits
//!
//! The widget tree decides *what* to show and keeps payloads on layout nodes; this crate turns
//! styles into positions and sizes; a box tree such as `understory_box_tree` can then take the
//! resulting rectangles for hit testing and damage tracking.
//!
//! ## Not a layout algorithm
//!
//! This crate does not implement flexbox. Sizing semantics are the engine's. What it adds on top
//! is the ownership model, a typed style surface, reading-direction resolution (right-to-left
//! containers mirror their children) and snapping of edges to the device pixel grid.
//!
//! ## API overview
//!
//! - [`Layout`]: the registry. Creates, destroys and links nodes, stores payloads and styles,
//!   and runs layout passes.
//! - [`NodeId`]: generational node handle.
//! - [`Node`]: a borrowed view with convenient read accessors.
//! - [`ChildCursor`] / [`Children`]: child enumeration.
//! - [`NodeStyle`]: flexbox properties, with [`Value`], [`Edges`] and friends.
//! - [`ComputedLayout`]: rounded results of the last pass.
//! - [`Config`]: pixel density, default style family, quirk flags, logging and a shared payload.
//! - [`TreeError`]: everything that can go wrong.
//!
//! Key operations:
//! - [`Layout::create_node`] / [`Layout::create_child`] → [`NodeId`]
//! - [`Layout::insert_child`] / [`Layout::append_child`] / [`Layout::remove_child`]
//! - [`Layout::destroy_node`] removes a node together with its subtree.
//! - [`Layout::update_style`] edits a style in place and marks the node dirty.
//! - [`Layout::calculate`] / [`Layout::compute`] run the engine and the rounding pass.
//! - [`Layout::computed_layout`] and [`Layout::node`] read the results back.
//!
//! ## Example
//!
//! ```rust
//! use understory_layout::{Direction, Layout, Value};
//!
//! let mut layout: Layout<String> = Layout::new();
//! let panel = layout.create_child(layout.root(), "panel".into()).unwrap();
//! layout
//!     .update_style(panel, |s| {
//!         s.width = Value::Percent(50.0);
//!         s.height = Value::Percent(50.0);
//!     })
//!     .unwrap();
//!
//! layout.calculate(100.0, 100.0, Direction::Ltr).unwrap();
//!
//! let panel = layout.node(panel);
//! assert_eq!((panel.width(), panel.height()), (Some(50.0), Some(50.0)));
//! assert_eq!(panel.context().map(String::as_str), Some("panel"));
//! ```
//!
//! ## Diagnostics
//!
//! Rejected operations are reported through the [`log`] facade at `warn` level, node lifetimes
//! at `trace` and layout passes at `debug`. Install a callback with [`Config::set_logger`] to
//! receive them directly instead.

mod computed;
mod config;
mod cursor;
mod error;
mod node;
mod style;
mod tree;
mod types;

pub use computed::ComputedLayout;
pub use config::{Config, Errata, Logger};
pub use cursor::{ChildCursor, Children};
pub use error::{ConstraintViolation, TreeError};
pub use node::Node;
pub use style::{
    Align, BoxSizing, Direction, Display, Edge, Edges, FlexDirection, Gutter, Justify, NodeStyle,
    NodeType, Overflow, PositionType, Value, Wrap,
};
pub use tree::Layout;
pub use types::NodeId;
