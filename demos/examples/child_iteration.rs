// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building, restructuring and enumerating a small tree.
//!
//! Run:
//! - `cargo run -p understory_layout_demos --example child_iteration`

use understory_layout::{Layout, NodeId, TreeError};

fn dump(layout: &Layout<String>, id: NodeId, depth: usize) {
    let name = layout.context(id).map_or("<root>", String::as_str);
    println!("{:indent$}{name}", "", indent = depth * 2);
    for child in layout.children(id) {
        dump(layout, child, depth + 1);
    }
}

fn main() -> Result<(), TreeError> {
    let mut layout: Layout<String> = Layout::new();
    let root = layout.root();
    layout.set_context(root, "<root>".into())?;

    let list = layout.create_child(root, "list".into())?;
    let rows: Vec<_> = (0..5)
        .map(|i| layout.create_child(list, format!("row {i}")))
        .collect::<Result<_, _>>()?;
    let footer = layout.create_child(root, "footer".into())?;
    dump(&layout, root, 0);

    // Move the last row to the front, then into the footer.
    layout.insert_child(list, rows[4], 0)?;
    layout.append_child(footer, rows[4])?;

    // A cursor does not borrow the layout, so it can be held across edits.
    let mut cursor = layout.child_cursor(list)?;
    while let Some(row) = cursor.next_child(&layout) {
        if layout.context(row).is_some_and(|name| name.ends_with('2')) {
            layout.destroy_node(row)?;
        }
    }

    // Cycles are refused and leave the tree alone.
    let refused = layout.append_child(rows[0], list);
    println!("moving the list under its own row: {refused:?}");

    println!("after edits ({} nodes):", layout.len());
    dump(&layout, root, 0);
    Ok(())
}
