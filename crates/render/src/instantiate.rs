//! Instantiating box configurations into positioned render boxes.

use common::Rect;
use layout::{BlockSize, BoxContainer, BoxNode, Direction, RootBox};

use crate::solver::solve_axis;
use crate::tree::{RenderBoxId, RenderBoxKind, RenderTree};

/// Build the render subtree for a root box configuration and return
/// its root id. The subtree is created alongside whatever the tree
/// already holds; the caller decides when to install it as the tree
/// root and what to do with the previous one.
pub fn instantiate(tree: &mut RenderTree, root: &RootBox) -> RenderBoxId {
    let rect = Rect::new(0.0, 0.0, root.width, root.height);
    let id = build_container(tree, &root.container, rect);
    tracing::trace!(boxes = tree.len(), "box tree instantiated");
    id
}

fn build_container(tree: &mut RenderTree, container: &BoxContainer, rect: Rect) -> RenderBoxId {
    let id = tree.create_box(RenderBoxKind::Container, rect);

    let extent = match container.direction {
        Direction::Row => rect.width,
        Direction::Col => rect.height,
    };
    let sizes: Vec<BlockSize> = container.items.iter().map(|item| item.size).collect();
    let solved = solve_axis(extent, &sizes);

    // Children are stretched on the cross axis; the engine only emits
    // stretch alignment, anything else would need content measurement.
    let mut offset = match container.direction {
        Direction::Row => rect.x,
        Direction::Col => rect.y,
    };
    for (item, child_extent) in container.items.iter().zip(solved) {
        let child_rect = match container.direction {
            Direction::Row => Rect::new(offset, rect.y, child_extent, rect.height),
            Direction::Col => Rect::new(rect.x, offset, rect.width, child_extent),
        };
        let child = match &item.node {
            BoxNode::Container(inner) => build_container(tree, inner, child_rect),
            BoxNode::Item(index) => tree.create_box(RenderBoxKind::Item(*index), child_rect),
            BoxNode::Spacer => tree.create_box(RenderBoxKind::Spacer, child_rect),
        };
        tree.append_child(id, child);
        offset += child_extent;
    }

    id
}
