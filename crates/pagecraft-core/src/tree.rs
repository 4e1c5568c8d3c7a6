// crates/pagecraft-core/src/tree.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::{Component, ComponentId, ComponentPatch, IdGenerator, PagecraftError, Result, StaggerGrid};

/// The page document: an ordered list of root components, each owning its
/// subtree. Sibling order is z-order (last paints on top).
///
/// Every operation addresses nodes by id at any depth. Unknown ids and invalid
/// structural requests leave the tree untouched and report `false`/`None`
/// instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTree {
    roots: Vec<Component>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree after checking id uniqueness and that leaf types own no
    /// children.
    pub fn from_roots(roots: Vec<Component>) -> Result<Self> {
        let tree = Self { roots };
        tree.validate()?;
        Ok(tree)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in self.iter() {
            if !seen.insert(node.id.as_str()) {
                return Err(PagecraftError::DuplicateId(node.id.to_string()));
            }
            if !node.is_container() && !node.children().is_empty() {
                return Err(PagecraftError::NotAContainer(format!(
                    "{} ({})",
                    node.component_type, node.id
                )));
            }
        }
        Ok(())
    }

    pub fn roots(&self) -> &[Component] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Component> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn root_len(&self) -> usize {
        self.roots.len()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.roots.iter().map(Component::subtree_len).sum()
    }

    /// Depth-first, pre-order walk over every node.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.roots.iter()],
        }
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        find_in(&self.roots, id)
    }

    pub fn find_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        find_in_mut(&mut self.roots, id)
    }

    /// Index of `id` in the root list, `None` if it is nested or unknown.
    pub fn root_index(&self, id: &ComponentId) -> Option<usize> {
        self.roots.iter().position(|node| &node.id == id)
    }

    /// The container directly holding `id`; `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &ComponentId) -> Option<&Component> {
        parent_in(&self.roots, id)
    }

    /// The sibling list `id` lives in (itself included).
    pub fn siblings_of(&self, id: &ComponentId) -> Option<&[Component]> {
        locate(&self.roots, id).map(|(list, _)| list)
    }

    /// Merges `patch` into the node. Identity, type and children are never
    /// touched.
    pub fn update(&mut self, id: &ComponentId, patch: ComponentPatch) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                node.apply(patch);
                true
            }
            None => {
                debug!("Ignoring update for unknown component {}", id);
                false
            }
        }
    }

    /// Removes the node and its whole subtree.
    pub fn remove(&mut self, id: &ComponentId) -> Option<Component> {
        match locate_mut(&mut self.roots, id) {
            Some((list, index)) => Some(list.remove(index)),
            None => {
                debug!("Ignoring removal of unknown component {}", id);
                None
            }
        }
    }

    pub fn insert_root(&mut self, component: Component) -> bool {
        if !self.accepts(&component) {
            return false;
        }
        self.roots.push(component);
        true
    }

    /// Appends to a container using the default child stagger.
    pub fn insert_child(&mut self, parent_id: &ComponentId, component: Component) -> bool {
        self.insert_child_with(parent_id, component, &StaggerGrid::CHILD)
    }

    /// Appends to the end of `parent_id`'s children, placing the new child on
    /// the next free cell of `grid`.
    pub fn insert_child_with(
        &mut self,
        parent_id: &ComponentId,
        mut component: Component,
        grid: &StaggerGrid,
    ) -> bool {
        if !self.accepts(&component) {
            return false;
        }

        let Some(parent) = self.find_mut(parent_id) else {
            debug!("Ignoring insert into unknown component {}", parent_id);
            return false;
        };
        if !parent.is_container() {
            warn!(
                "Component {} is a {} and cannot hold children",
                parent_id, parent.component_type
            );
            return false;
        }

        let children = parent.children.get_or_insert_with(Vec::new);
        component.position = Some(grid.position_for(children.len()));
        children.push(component);
        true
    }

    /// Inserts `component` right after `anchor` in whichever list holds it.
    pub fn insert_after(&mut self, anchor: &ComponentId, component: Component) -> bool {
        if !self.accepts(&component) {
            return false;
        }
        match locate_mut(&mut self.roots, anchor) {
            Some((list, index)) => {
                list.insert(index + 1, component);
                true
            }
            None => {
                debug!("Ignoring insert after unknown component {}", anchor);
                false
            }
        }
    }

    /// Clones the node (and its subtree) with fresh ids and places the copy
    /// immediately after the source. Returns the copy's id.
    pub fn duplicate(&mut self, id: &ComponentId, ids: &mut IdGenerator) -> Option<ComponentId> {
        let mut copy = self.find(id)?.clone();
        self.assign_fresh_ids(&mut copy, ids);
        let copy_id = copy.id.clone();

        let (list, index) = locate_mut(&mut self.roots, id)?;
        list.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Moves one root-level element to a new index, shifting the others.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.roots.len() || to >= self.roots.len() || from == to {
            return false;
        }
        let item = self.roots.remove(from);
        self.roots.insert(to, item);
        true
    }

    pub fn move_up(&mut self, id: &ComponentId) -> bool {
        match self.root_index(id) {
            Some(index) if index > 0 => {
                self.roots.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    pub fn move_down(&mut self, id: &ComponentId) -> bool {
        match self.root_index(id) {
            Some(index) if index + 1 < self.roots.len() => {
                self.roots.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves a root component to the end of the root order. Nested components
    /// are left where they are.
    pub fn bring_to_front(&mut self, id: &ComponentId) -> bool {
        let Some(index) = self.root_index(id) else {
            debug!("bring_to_front: {} is not a root component", id);
            return false;
        };
        let node = self.roots.remove(index);
        self.roots.push(node);
        true
    }

    /// Moves a root component to the start of the root order. Nested
    /// components are left where they are.
    pub fn send_to_back(&mut self, id: &ComponentId) -> bool {
        let Some(index) = self.root_index(id) else {
            debug!("send_to_back: {} is not a root component", id);
            return false;
        };
        let node = self.roots.remove(index);
        self.roots.insert(0, node);
        true
    }

    fn accepts(&self, component: &Component) -> bool {
        let mut pending = vec![component];
        while let Some(node) = pending.pop() {
            if self.contains(&node.id) {
                warn!("Refusing to insert duplicate component id {}", node.id);
                return false;
            }
            pending.extend(node.children());
        }
        true
    }

    fn assign_fresh_ids(&self, node: &mut Component, ids: &mut IdGenerator) {
        node.id = ids.next_id(self);
        if let Some(children) = node.children.as_mut() {
            for child in children {
                self.assign_fresh_ids(child, ids);
            }
        }
    }
}

pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, Component>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children().iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

fn find_in<'a>(nodes: &'a [Component], id: &ComponentId) -> Option<&'a Component> {
    for node in nodes {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [Component], id: &ComponentId) -> Option<&'a mut Component> {
    for node in nodes.iter_mut() {
        if &node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn parent_in<'a>(nodes: &'a [Component], id: &ComponentId) -> Option<&'a Component> {
    for node in nodes {
        if node.children().iter().any(|child| &child.id == id) {
            return Some(node);
        }
        if let Some(found) = parent_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn locate<'a>(list: &'a [Component], id: &ComponentId) -> Option<(&'a [Component], usize)> {
    if let Some(index) = list.iter().position(|node| &node.id == id) {
        return Some((list, index));
    }
    list.iter().find_map(|node| locate(node.children(), id))
}

fn locate_mut<'a>(
    list: &'a mut Vec<Component>,
    id: &ComponentId,
) -> Option<(&'a mut Vec<Component>, usize)> {
    if let Some(index) = list.iter().position(|node| &node.id == id) {
        return Some((list, index));
    }
    for node in list.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = locate_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentType, Dimension, Position};

    fn id(value: &str) -> ComponentId {
        ComponentId::new(value)
    }

    /// hero (container) > [title, body, card (container) > [caption]], footer
    fn sample_tree() -> ComponentTree {
        let card = Component::new("card", ComponentType::Container)
            .with_child(Component::new("caption", ComponentType::Text));
        let hero = Component::new("hero", ComponentType::Container)
            .with_child(Component::new("title", ComponentType::Heading))
            .with_child(Component::new("body", ComponentType::Text))
            .with_child(card);
        ComponentTree::from_roots(vec![hero, Component::new("footer", ComponentType::Text)]).unwrap()
    }

    fn root_ids(tree: &ComponentTree) -> Vec<&str> {
        tree.roots().iter().map(|node| node.id.as_str()).collect()
    }

    #[test]
    fn test_find_at_any_depth() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.find(&id("caption")).map(|n| n.component_type), Some(ComponentType::Text));
        assert_eq!(tree.parent_of(&id("caption")).map(|n| n.id.as_str()), Some("card"));
        assert!(tree.parent_of(&id("hero")).is_none());
        assert!(tree.find(&id("missing")).is_none());
    }

    #[test]
    fn test_iter_is_pre_order() {
        let tree = sample_tree();
        let order: Vec<&str> = tree.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(order, vec!["hero", "title", "body", "card", "caption", "footer"]);
    }

    #[test]
    fn test_update_nested_keeps_shape() {
        let mut tree = sample_tree();
        let before = tree.clone();

        assert!(tree.update(
            &id("card"),
            ComponentPatch::new().width(Dimension::pixels(320.0)).attribute("content", "x"),
        ));

        let card = tree.find(&id("card")).unwrap();
        assert_eq!(card.width().as_str(), "320px");
        assert_eq!(card.children(), before.find(&id("card")).unwrap().children());
        assert_eq!(tree.find(&id("hero")).unwrap().children().len(), 3);
        assert_eq!(tree.roots()[1], before.roots()[1]);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(!tree.update(&id("nope"), ComponentPatch::new().position(Position::new(1.0, 1.0))));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_remove_takes_subtree() {
        let mut tree = sample_tree();
        let removed = tree.remove(&id("card")).unwrap();
        assert_eq!(removed.subtree_len(), 2);
        assert_eq!(tree.len(), 4);

        assert!(tree.remove(&id("footer")).is_some());
        assert_eq!(tree.len(), 3);
        assert!(tree.remove(&id("footer")).is_none());
    }

    #[test]
    fn test_insert_child_staggers_and_rejects_leaves() {
        let mut tree = sample_tree();

        assert!(tree.insert_child(&id("hero"), Component::new("new", ComponentType::Button)));
        let added = tree.find(&id("new")).unwrap();
        assert_eq!(added.position, Some(Position::new(16.0, 176.0)));

        assert!(!tree.insert_child(&id("footer"), Component::new("leaf", ComponentType::Text)));
        assert!(!tree.insert_child(&id("ghost"), Component::new("orphan", ComponentType::Text)));
        assert!(tree.find(&id("leaf")).is_none());
        assert!(tree.find(&id("orphan")).is_none());
    }

    #[test]
    fn test_insert_refuses_duplicate_ids() {
        let mut tree = sample_tree();
        assert!(!tree.insert_root(Component::new("caption", ComponentType::Text)));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_duplicate_nested_subtree() {
        let mut tree = sample_tree();
        let mut ids = IdGenerator::starting_at(1);

        let copy_id = tree.duplicate(&id("card"), &mut ids).unwrap();

        let hero = tree.find(&id("hero")).unwrap();
        let order: Vec<&str> = hero.children().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["title", "body", "card", copy_id.as_str()]);

        let copy = tree.find(&copy_id).unwrap();
        assert_ne!(copy.children()[0].id.as_str(), "caption");
        assert_eq!(tree.len(), 8);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_reorder_and_moves() {
        let mut tree = ComponentTree::from_roots(vec![
            Component::new("a", ComponentType::Text),
            Component::new("b", ComponentType::Text),
            Component::new("c", ComponentType::Text),
        ])
        .unwrap();

        assert!(tree.reorder(0, 2));
        assert_eq!(root_ids(&tree), vec!["b", "c", "a"]);
        assert!(!tree.reorder(0, 5));

        assert!(tree.move_up(&id("a")));
        assert_eq!(root_ids(&tree), vec!["b", "a", "c"]);
        assert!(!tree.move_up(&id("b")));
        assert!(!tree.move_down(&id("c")));
    }

    #[test]
    fn test_front_and_back_are_root_only() {
        let mut tree = sample_tree();

        assert!(tree.bring_to_front(&id("hero")));
        assert_eq!(root_ids(&tree), vec!["footer", "hero"]);
        assert!(tree.send_to_back(&id("hero")));
        assert_eq!(root_ids(&tree), vec!["hero", "footer"]);

        let before = tree.clone();
        assert!(!tree.bring_to_front(&id("title")));
        assert!(!tree.send_to_back(&id("caption")));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_leaf_children() {
        let duplicate = ComponentTree::from_roots(vec![
            Component::new("a", ComponentType::Text),
            Component::new("b", ComponentType::Container).with_child(Component::new("a", ComponentType::Text)),
        ]);
        assert!(matches!(duplicate, Err(PagecraftError::DuplicateId(_))));

        let mut leaf = Component::new("t", ComponentType::Text);
        leaf.children = Some(vec![Component::new("x", ComponentType::Text)]);
        assert!(matches!(
            ComponentTree::from_roots(vec![leaf]),
            Err(PagecraftError::NotAContainer(_))
        ));
    }
}
