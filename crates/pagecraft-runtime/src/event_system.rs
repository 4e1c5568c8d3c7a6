// crates/pagecraft-runtime/src/event_system.rs
use std::collections::VecDeque;

use pagecraft_core::{ComponentId, ComponentTree};
use pagecraft_layout::{recalc_container, LayoutConfig};
use tracing::debug;

/// Work that runs after the mutation that scheduled it has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    RecalcContainer(ComponentId),
}

#[derive(Debug, Default)]
pub struct EventSystem {
    queue: VecDeque<DeferredTask>,
}

impl EventSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` unless an identical one is already waiting.
    pub fn schedule(&mut self, task: DeferredTask) {
        if !self.queue.contains(&task) {
            self.queue.push_back(task);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Runs everything queued so far against the current tree. Tasks whose
    /// target disappeared in the meantime are dropped.
    pub fn update(&mut self, tree: &mut ComponentTree, config: &LayoutConfig) -> usize {
        let mut processed = 0;
        while let Some(task) = self.queue.pop_front() {
            match task {
                DeferredTask::RecalcContainer(id) => {
                    if recalc_container(tree, &id, config).is_none() {
                        debug!("Deferred auto-size of {} had nothing to do", id);
                    }
                }
            }
            processed += 1;
        }
        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{Component, ComponentType};

    #[test]
    fn test_duplicates_are_coalesced() {
        let mut events = EventSystem::new();
        events.schedule(DeferredTask::RecalcContainer("a".into()));
        events.schedule(DeferredTask::RecalcContainer("a".into()));
        events.schedule(DeferredTask::RecalcContainer("b".into()));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_update_runs_against_current_tree() {
        let container = Component::new("c", ComponentType::Container)
            .with_child(Component::new("x", ComponentType::Image).with_position(10.0, 10.0).with_size("300px", "50px"));
        let mut tree = ComponentTree::from_roots(vec![container]).unwrap();

        let mut events = EventSystem::new();
        events.schedule(DeferredTask::RecalcContainer("c".into()));
        events.schedule(DeferredTask::RecalcContainer("gone".into()));

        assert_eq!(events.update(&mut tree, &LayoutConfig::default()), 2);
        assert!(events.is_empty());
        assert_eq!(tree.find(&"c".into()).unwrap().width().as_str(), "342px");
    }
}
