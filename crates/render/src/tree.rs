//! Render tree structure.

use common::Rect;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Identifier of a box in the render tree.
    pub struct RenderBoxId;
}

/// Content of a rendered box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderBoxKind {
    /// Structural box laying out children.
    Container,
    /// Blank space reserved by an empty grid cell.
    Spacer,
    /// Leaf rendering the item with this index.
    Item(usize),
}

/// A box in the render tree.
#[derive(Clone, Debug)]
pub struct RenderBox {
    pub id: RenderBoxId,
    pub kind: RenderBoxKind,
    /// Final rectangle, relative to the tree origin.
    pub rect: Rect,
    pub parent: Option<RenderBoxId>,
    pub children: SmallVec<[RenderBoxId; 4]>,
}

impl RenderBox {
    fn new(id: RenderBoxId, kind: RenderBoxKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            parent: None,
            children: SmallVec::new(),
        }
    }
}

/// The render tree: an arena of boxes plus root bookkeeping. A
/// replaced root can be detached instead of destroyed; detached roots
/// stay alive until the owner disposes them.
pub struct RenderTree {
    boxes: SlotMap<RenderBoxId, RenderBox>,
    root: Option<RenderBoxId>,
    detached_roots: Vec<RenderBoxId>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self {
            boxes: SlotMap::with_key(),
            root: None,
            detached_roots: Vec::new(),
        }
    }

    /// Get root box.
    pub fn root(&self) -> Option<RenderBoxId> {
        self.root
    }

    /// Set root box.
    pub fn set_root(&mut self, box_id: RenderBoxId) {
        self.root = Some(box_id);
    }

    /// Create a box.
    pub fn create_box(&mut self, kind: RenderBoxKind, rect: Rect) -> RenderBoxId {
        self.boxes.insert_with_key(|id| RenderBox::new(id, kind, rect))
    }

    /// Get a box by ID.
    pub fn get(&self, id: RenderBoxId) -> Option<&RenderBox> {
        self.boxes.get(id)
    }

    /// Get a mutable box by ID.
    pub fn get_mut(&mut self, id: RenderBoxId) -> Option<&mut RenderBox> {
        self.boxes.get_mut(id)
    }

    /// Append child to parent.
    pub fn append_child(&mut self, parent: RenderBoxId, child: RenderBoxId) {
        if let Some(child_box) = self.boxes.get_mut(child) {
            child_box.parent = Some(parent);
        }
        if let Some(parent_box) = self.boxes.get_mut(parent) {
            parent_box.children.push(child);
        }
    }

    /// Get children.
    pub fn children(&self, box_id: RenderBoxId) -> impl Iterator<Item = RenderBoxId> + '_ {
        self.boxes
            .get(box_id)
            .into_iter()
            .flat_map(|b| b.children.iter().copied())
    }

    /// Remove a box and its subtree.
    pub fn remove(&mut self, box_id: RenderBoxId) {
        if let Some(parent_id) = self.boxes.get(box_id).and_then(|b| b.parent) {
            if let Some(parent) = self.boxes.get_mut(parent_id) {
                parent.children.retain(|id| *id != box_id);
            }
        }

        let mut to_remove = vec![box_id];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(b) = self.boxes.get(to_remove[i]) {
                to_remove.extend(b.children.iter().copied());
            }
            i += 1;
        }
        for id in to_remove {
            self.boxes.remove(id);
        }

        if self.root == Some(box_id) {
            self.root = None;
        }
        self.detached_roots.retain(|&id| id != box_id);
    }

    /// Detach the current root without destroying it. The subtree is
    /// retained so it can keep animating until disposal.
    pub fn detach_root(&mut self) -> Option<RenderBoxId> {
        let root = self.root.take()?;
        self.detached_roots.push(root);
        Some(root)
    }

    /// Remove the current root subtree entirely.
    pub fn destroy_root(&mut self) {
        if let Some(root) = self.root {
            self.remove(root);
        }
    }

    /// Roots detached but not yet destroyed.
    pub fn detached_roots(&self) -> &[RenderBoxId] {
        &self.detached_roots
    }

    /// Destroy every retained detached root.
    pub fn clean_detached(&mut self) {
        let detached = std::mem::take(&mut self.detached_roots);
        for id in detached {
            self.remove(id);
        }
    }

    /// Get number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if tree is empty.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get all boxes.
    pub fn iter(&self) -> impl Iterator<Item = (RenderBoxId, &RenderBox)> {
        self.boxes.iter()
    }
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}
