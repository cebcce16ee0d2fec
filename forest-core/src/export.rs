use crate::error::ForestResult;
use crate::forest::Forest;
use crate::types::NodeId;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Renders a forest as the flat record artifact.
///
/// Line 1 is the marker (the chosen leaf's ID), line 2 the fixed header,
/// then one record per node, trees in forest order, nodes in depth-first
/// insertion order. The vertical coordinate renders as `-(depth) - 1`, one
/// unit below the node's layer, so a root prints `y = -1`.
///
/// Rendering reads the forest only; repeated calls yield identical output.
pub fn render(forest: &Forest, marker: NodeId) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{marker}");
    let _ = writeln!(out, "ID,x,y,z,parent");
    for node in forest.nodes() {
        let y = -(node.depth as i64) - 1;
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            node.id, node.pos.x, y, node.pos.y, node.parent
        );
    }
    out
}

/// Renders the forest and writes it to `path`, surfacing write failures
/// unmodified.
pub fn write_file(forest: &Forest, marker: NodeId, path: &Path) -> ForestResult<()> {
    fs::write(path, render(forest, marker))?;
    Ok(())
}
