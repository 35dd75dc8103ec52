// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toolbar laid out left to right and right to left, at two pixel densities.
//!
//! Run:
//! - `cargo run -p understory_layout_demos --example print_dimensions`

use std::sync::Arc;

use kurbo::Rect;
use understory_layout::{Config, Direction, FlexDirection, Layout, NodeId, Value};

fn build(config: Arc<Config>) -> (Layout<&'static str>, Vec<NodeId>) {
    let mut layout = Layout::with_config(config);
    let root = layout.root();
    layout
        .update_style(root, |s| {
            s.flex_direction = FlexDirection::Row;
            s.padding.left = Value::Point(4.0);
        })
        .unwrap();

    let mut items = Vec::new();
    for (name, grow) in [("back", 0.0), ("title", 1.0), ("menu", 0.0)] {
        let item = layout.create_child(root, name).unwrap();
        layout
            .update_style(item, |s| {
                s.flex_grow = Some(grow);
                if grow == 0.0 {
                    s.width = Value::Point(32.5);
                }
            })
            .unwrap();
        items.push(item);
    }
    (layout, items)
}

fn main() {
    for scale in [1.0, 2.0] {
        let mut config = Config::new();
        config.set_point_scale_factor(scale);
        let (mut layout, items) = build(Arc::new(config));

        for direction in [Direction::Ltr, Direction::Rtl] {
            layout.calculate(301.0, 40.0, direction).unwrap();
            println!("scale {scale}, {direction:?}:");
            for item in &items {
                let node = layout.node(*item);
                let rect: Rect = node.computed().map(|c| c.rect()).unwrap_or_default();
                println!("  {:>6}: {rect:?}", node.context().copied().unwrap_or("?"));
            }
        }
    }
}
