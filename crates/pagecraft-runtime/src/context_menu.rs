// crates/pagecraft-runtime/src/context_menu.rs
use glam::DVec2;
use pagecraft_core::{ComponentId, ComponentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddChild,
    EditText,
    Duplicate,
    BringToFront,
    SendToBack,
    Delete,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddChild => "Add Child",
            MenuAction::EditText => "Edit Text",
            MenuAction::Duplicate => "Duplicate",
            MenuAction::BringToFront => "Bring to Front",
            MenuAction::SendToBack => "Send to Back",
            MenuAction::Delete => "Delete",
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, MenuAction::Delete)
    }
}

/// Entries offered for a node of `component_type`, in display order.
pub fn menu_actions(component_type: ComponentType) -> Vec<MenuAction> {
    let mut actions = Vec::with_capacity(6);
    if component_type.is_container() {
        actions.push(MenuAction::AddChild);
    }
    if component_type.is_text_editable() {
        actions.push(MenuAction::EditText);
    }
    actions.extend([
        MenuAction::Duplicate,
        MenuAction::BringToFront,
        MenuAction::SendToBack,
        MenuAction::Delete,
    ]);
    actions
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub position: DVec2,
    pub target: ComponentId,
    pub actions: Vec<MenuAction>,
}

impl ContextMenu {
    pub fn new(position: DVec2, target: ComponentId, component_type: ComponentType) -> Self {
        Self {
            position,
            target,
            actions: menu_actions(component_type),
        }
    }

    pub fn offers(&self, action: MenuAction) -> bool {
        self.actions.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_capabilities() {
        assert_eq!(
            menu_actions(ComponentType::Image),
            vec![MenuAction::Duplicate, MenuAction::BringToFront, MenuAction::SendToBack, MenuAction::Delete]
        );
        assert_eq!(menu_actions(ComponentType::Container)[0], MenuAction::AddChild);
        assert_eq!(menu_actions(ComponentType::Button)[0], MenuAction::EditText);

        let menu = ContextMenu::new(DVec2::new(5.0, 5.0), "f".into(), ComponentType::FormContainer);
        assert!(menu.offers(MenuAction::AddChild));
        assert!(!menu.offers(MenuAction::EditText));
    }
}
