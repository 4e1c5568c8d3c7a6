// crates/pagecraft-runtime/src/selection.rs
use pagecraft_core::{ComponentId, ComponentType, FocusTarget, KeyCode};

/// Selection and inline-editing state. At most one node is selected, and the
/// node being edited is always the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(ComponentId),
    EditingText(ComponentId),
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<&ComponentId> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected(id) | SelectionState::EditingText(id) => Some(id),
        }
    }

    pub fn editing_id(&self) -> Option<&ComponentId> {
        match self {
            SelectionState::EditingText(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, SelectionState::EditingText(_))
    }

    pub fn is_selected(&self, id: &ComponentId) -> bool {
        self.selected_id() == Some(id)
    }
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    None,
    BeginEditing,
    EndEditing,
    ConfirmDelete,
    Deselect,
}

/// Maps a key press to a command.
///
/// `selected_type` is the type of the selected node, if any. Keys typed into
/// inputs outside the canvas are never shortcuts.
pub fn key_command(
    state: &SelectionState,
    key: KeyCode,
    focus: &FocusTarget,
    selected_type: Option<ComponentType>,
) -> KeyCommand {
    match (state, focus) {
        (_, FocusTarget::ExternalInput) => KeyCommand::None,

        (SelectionState::EditingText(editing), FocusTarget::EditField(field)) if editing == field => match key {
            KeyCode::Escape => KeyCommand::EndEditing,
            KeyCode::Enter if !selected_type.is_some_and(|kind| kind.is_multiline_text()) => KeyCommand::EndEditing,
            _ => KeyCommand::None,
        },
        (_, FocusTarget::EditField(_)) => KeyCommand::None,

        (SelectionState::EditingText(_), FocusTarget::Canvas) => match key {
            KeyCode::Escape => KeyCommand::EndEditing,
            _ => KeyCommand::None,
        },
        (SelectionState::Selected(_), FocusTarget::Canvas) => match key {
            KeyCode::Enter if selected_type.is_some_and(|kind| kind.is_text_editable()) => KeyCommand::BeginEditing,
            KeyCode::Delete | KeyCode::Backspace => KeyCommand::ConfirmDelete,
            KeyCode::Escape => KeyCommand::Deselect,
            _ => KeyCommand::None,
        },
        (SelectionState::Idle, FocusTarget::Canvas) => KeyCommand::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(id: &str) -> SelectionState {
        SelectionState::Selected(id.into())
    }

    fn editing(id: &str) -> SelectionState {
        SelectionState::EditingText(id.into())
    }

    #[test]
    fn test_canvas_shortcuts() {
        let canvas = FocusTarget::Canvas;
        let heading = Some(ComponentType::Heading);

        assert_eq!(key_command(&selected("a"), KeyCode::Enter, &canvas, heading), KeyCommand::BeginEditing);
        assert_eq!(
            key_command(&selected("a"), KeyCode::Enter, &canvas, Some(ComponentType::Image)),
            KeyCommand::None
        );
        assert_eq!(key_command(&selected("a"), KeyCode::Backspace, &canvas, heading), KeyCommand::ConfirmDelete);
        assert_eq!(key_command(&selected("a"), KeyCode::Escape, &canvas, heading), KeyCommand::Deselect);
        assert_eq!(key_command(&SelectionState::Idle, KeyCode::Delete, &canvas, None), KeyCommand::None);
        assert_eq!(key_command(&editing("a"), KeyCode::Delete, &canvas, heading), KeyCommand::None);
    }

    #[test]
    fn test_edit_field_exits() {
        let field = FocusTarget::EditField("a".into());

        assert_eq!(
            key_command(&editing("a"), KeyCode::Enter, &field, Some(ComponentType::Button)),
            KeyCommand::EndEditing
        );
        assert_eq!(
            key_command(&editing("a"), KeyCode::Enter, &field, Some(ComponentType::Text)),
            KeyCommand::None
        );
        assert_eq!(
            key_command(&editing("a"), KeyCode::Escape, &field, Some(ComponentType::Text)),
            KeyCommand::EndEditing
        );
    }

    #[test]
    fn test_external_inputs_are_ignored() {
        let focus = FocusTarget::ExternalInput;
        for key in [KeyCode::Delete, KeyCode::Backspace, KeyCode::Escape, KeyCode::Enter] {
            assert_eq!(key_command(&selected("a"), key, &focus, Some(ComponentType::Heading)), KeyCommand::None);
        }
    }
}
