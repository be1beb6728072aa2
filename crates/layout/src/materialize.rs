//! Converting a partition result into the renderer-ready root box.

use common::Size;

use crate::partition::{BlockContent, BlockSize, BoxContainer, BoxItem, BoxNode, CrossAlign, Direction};
use crate::size::SizeValue;

/// Renderer-ready root of the box tree, carrying the outer container
/// extent.
#[derive(Clone, Debug, PartialEq)]
pub struct RootBox {
    pub width: f32,
    pub height: f32,
    pub container: BoxContainer,
}

/// Wrap the partition result as the root box configuration and apply
/// the root sizing policy: top-level entries with no explicit base,
/// min or max size get an auto base size so they share remaining space
/// proportionally.
pub fn materialize(content: BlockContent, container_size: Size) -> RootBox {
    let mut container = match content {
        BlockContent::Boxed(container) => container,
        BlockContent::Item(item) => single_item_root(BoxNode::Item(item)),
        BlockContent::Empty | BlockContent::Spanned => single_item_root(BoxNode::Spacer),
    };

    for item in &mut container.items {
        if needs_auto_base_size(&item.size) {
            item.size.base_size = SizeValue::Auto;
        }
    }

    RootBox {
        width: container_size.width,
        height: container_size.height,
        container,
    }
}

/// A terminal partition result becomes a one-entry horizontal box.
fn single_item_root(node: BoxNode) -> BoxContainer {
    BoxContainer {
        direction: Direction::Row,
        cross_align: CrossAlign::Stretch,
        items: vec![BoxItem {
            size: BlockSize::with_ratio(1.0),
            node,
        }],
    }
}

fn needs_auto_base_size(size: &BlockSize) -> bool {
    size.base_size == SizeValue::ZERO
        && size.min_size.is_zero_or_auto()
        && size.max_size.is_zero_or_auto()
}
