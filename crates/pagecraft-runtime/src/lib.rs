// crates/pagecraft-runtime/src/lib.rs

//! Interactive editing session for a page.
//!
//! [`EditorSession`] owns the component tree plus every piece of gesture and
//! selection state. Hosts feed it hit-tested [`InputEvent`]s and call its
//! commands from their toolbars; everything runs synchronously on the caller's
//! thread.

use std::path::Path;

use anyhow::Context;
use glam::DVec2;
use pagecraft_core::{
    Component, ComponentId, ComponentPatch, ComponentTree, ComponentType, FocusTarget, HitRegion, HitTarget,
    IdGenerator, InputEvent, KeyCode, KeyModifiers, MouseButton, PageDocument, PageId, Position,
    ResizeHandle,
};
use pagecraft_layout::ActiveGuides;
use serde_json::Value;
use tracing::{debug, error, info};

pub mod config;
pub mod context_menu;
pub mod drag;
pub mod event_system;
pub mod preferences;
pub mod prompt;
pub mod resize;
pub mod save;
pub mod selection;

pub use config::*;
pub use context_menu::*;
pub use drag::*;
pub use event_system::*;
pub use preferences::*;
pub use prompt::*;
pub use resize::*;
pub use save::*;
pub use selection::*;

pub const DELETE_CONFIRMATION: &str = "Delete this component?";

pub struct EditorSession<P: UserPrompt = ScriptedPrompt> {
    // Document
    tree: ComponentTree,
    page_id: Option<PageId>,
    page_name: String,
    page_slug: String,
    brand_colors: Vec<String>,

    // Systems
    config: EditorConfig,
    ids: IdGenerator,
    event_system: EventSystem,
    preferences: CanvasPreferences,
    prompt: P,

    // Interaction state
    selection: SelectionState,
    drag: Option<DragGesture>,
    resize: Option<ResizeGesture>,
    context_menu: Option<ContextMenu>,
    add_menu_target: Option<ComponentId>,
    guides: ActiveGuides,
    snap_bypass_held: bool,
    saving: bool,
}

impl<P: UserPrompt> EditorSession<P> {
    pub fn new(document: PageDocument, config: EditorConfig, prompt: P) -> Self {
        let preferences = CanvasPreferences::in_memory(&config);
        Self {
            tree: document.components,
            page_id: document.page_id,
            page_name: document.page_name,
            page_slug: document.page_slug,
            brand_colors: Vec::new(),
            config,
            ids: IdGenerator::new(),
            event_system: EventSystem::new(),
            preferences,
            prompt,
            selection: SelectionState::Idle,
            drag: None,
            resize: None,
            context_menu: None,
            add_menu_target: None,
            guides: ActiveGuides::default(),
            snap_bypass_held: false,
            saving: false,
        }
    }

    pub fn open<T: AsRef<Path>>(path: T, config: EditorConfig, prompt: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let document =
            PageDocument::load(path).with_context(|| format!("Failed to open page {}", path.display()))?;
        Ok(Self::new(document, config, prompt))
    }

    pub fn with_preferences(mut self, store: Box<dyn PreferenceStore>) -> Self {
        self.preferences = CanvasPreferences::load(store, &self.config);
        self
    }

    pub fn with_brand_colors(mut self, colors: Vec<String>) -> Self {
        self.brand_colors = colors;
        self
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the document and drops all in-session state.
    pub fn load_document(&mut self, document: PageDocument) {
        info!(
            "Loading page '{}' ({} components)",
            document.page_name,
            document.components.len()
        );
        self.tree = document.components;
        self.page_id = document.page_id;
        self.page_name = document.page_name;
        self.page_slug = document.page_slug;
        self.selection = SelectionState::Idle;
        self.drag = None;
        self.resize = None;
        self.context_menu = None;
        self.add_menu_target = None;
        self.guides = ActiveGuides::default();
        self.event_system.clear();
    }

    // Observers

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        self.tree.find(id)
    }

    /// Immutable copy of the page in its save shape.
    pub fn snapshot(&self) -> PageDocument {
        PageDocument {
            components: self.tree.clone(),
            page_id: self.page_id.clone(),
            page_name: self.page_name.clone(),
            page_slug: self.page_slug.clone(),
        }
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn brand_colors(&self) -> &[String] {
        &self.brand_colors
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selection.selected_id()
    }

    pub fn editing_id(&self) -> Option<&ComponentId> {
        self.selection.editing_id()
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selected_id().and_then(|id| self.tree.find(id))
    }

    pub fn active_guides(&self) -> ActiveGuides {
        self.guides
    }

    pub fn dragging_id(&self) -> Option<&ComponentId> {
        self.drag.as_ref().map(|drag| &drag.id)
    }

    pub fn resizing_id(&self) -> Option<&ComponentId> {
        self.resize.as_ref().map(|resize| &resize.id)
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Container the "add component" menu is currently targeting.
    pub fn add_menu_target(&self) -> Option<&ComponentId> {
        self.add_menu_target.as_ref()
    }

    pub fn preferences(&self) -> &CanvasPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut CanvasPreferences {
        &mut self.preferences
    }

    pub fn canvas_width(&self) -> Option<u32> {
        self.preferences.canvas_width(&self.config)
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    // Input

    /// Applies one input event. Deferred work (container auto-sizing) runs
    /// before this returns, after the event's own mutation.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position, button, target } => self.on_pointer_down(position, button, target),
            InputEvent::PointerMove { position, modifiers } => self.on_pointer_move(position, modifiers),
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::Click { target } => self.on_click(target),
            InputEvent::DoubleClick { target } => self.on_double_click(target),
            InputEvent::ContextMenu { position, target } => self.open_context_menu(position, target),
            InputEvent::KeyDown { key, focus, .. } => self.on_key_down(key, focus),
            InputEvent::KeyUp { key, .. } => {
                if key == self.config.snap_bypass.key() {
                    self.snap_bypass_held = false;
                }
            }
            InputEvent::TextInput { id, text } => self.on_text_input(id, text),
            InputEvent::EditFieldBlur => self.end_editing(),
            InputEvent::AnimationFrame => self.on_animation_frame(),
        }
        self.run_deferred();
    }

    fn on_pointer_down(&mut self, position: DVec2, button: MouseButton, target: HitTarget) {
        if self.context_menu.take().is_some() {
            debug!("Context menu closed by pointer press");
        }
        if button != MouseButton::Left || self.drag.is_some() || self.resize.is_some() {
            return;
        }
        let HitTarget::Component { id, region } = target else {
            return;
        };

        match region {
            HitRegion::Body | HitRegion::TextContent => self.begin_drag(id, position),
            HitRegion::ResizeHandle { handle, measured_size } => {
                self.begin_resize(id, handle, position, measured_size)
            }
            HitRegion::Interactive | HitRegion::NoDrag => {}
        }
    }

    fn begin_drag(&mut self, id: ComponentId, pointer: DVec2) {
        if self.selection.editing_id() == Some(&id) {
            return;
        }
        let Some(component) = self.tree.find(&id) else {
            debug!("Ignoring drag of unknown component {}", id);
            return;
        };
        let origin = component.position().to_vec2();

        if !self.selection.is_selected(&id) {
            self.selection = SelectionState::Selected(id.clone());
        }
        debug!("Drag started on {} at {:?}", id, origin);
        self.drag = Some(DragGesture::new(id, pointer, origin));
        self.guides = ActiveGuides::default();
    }

    fn begin_resize(&mut self, id: ComponentId, handle: ResizeHandle, pointer: DVec2, measured: Option<DVec2>) {
        let Some(component) = self.tree.find(&id) else {
            debug!("Ignoring resize of unknown component {}", id);
            return;
        };
        let gesture = ResizeGesture::begin(component, handle, pointer, measured, &self.config.layout);
        debug!("Resize started on {} with {:?} from {:?}", id, handle, gesture.origin.size);
        self.resize = Some(gesture);
    }

    fn on_pointer_move(&mut self, position: DVec2, modifiers: KeyModifiers) {
        let bypass_snapping = self.snap_bypass_held || self.config.snap_bypass.is_held(&modifiers);

        if let Some(drag) = self.drag.as_mut() {
            drag.queue_move(PointerSample { position, bypass_snapping });
        }
        if let Some(resize) = &self.resize {
            let patch = resize.step(position, &self.config.layout);
            self.tree.update(&resize.id, patch);
        }
    }

    fn on_animation_frame(&mut self) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(sample) = drag.take_pending() else {
            return;
        };

        let outcome = drag.resolve(&self.tree, sample, &self.config.layout);
        self.tree.update(&drag.id, ComponentPatch::new().position(outcome.position));
        self.guides = outcome.guides;
    }

    fn on_pointer_up(&mut self) {
        if let Some(mut drag) = self.drag.take() {
            if drag.take_pending().is_some() {
                debug!("Dropped unapplied move of {}", drag.id);
            }
            self.guides = ActiveGuides::default();
            self.schedule_parent_recalc(&drag.id);
        }
        if let Some(resize) = self.resize.take() {
            self.schedule_parent_recalc(&resize.id);
        }
    }

    fn on_click(&mut self, target: HitTarget) {
        match target {
            HitTarget::Component { region: HitRegion::Interactive, .. } => {}
            HitTarget::Component { id, .. } => {
                self.select(&id);
            }
            HitTarget::Canvas => self.clear_selection(),
            HitTarget::Outside => {}
        }
    }

    fn on_double_click(&mut self, target: HitTarget) {
        if let HitTarget::Component { id, region: HitRegion::Body | HitRegion::TextContent } = target {
            self.begin_editing(&id);
        }
    }

    fn on_key_down(&mut self, key: KeyCode, focus: FocusTarget) {
        if key == self.config.snap_bypass.key() {
            self.snap_bypass_held = true;
        }
        if key == KeyCode::Escape && self.context_menu.take().is_some() {
            debug!("Context menu dismissed");
        }

        let selected_type = self.selected_component().map(|component| component.component_type);
        let selected = self.selected_id().cloned();

        match key_command(&self.selection, key, &focus, selected_type) {
            KeyCommand::None => {}
            KeyCommand::BeginEditing => {
                if let Some(id) = selected {
                    self.begin_editing(&id);
                }
            }
            KeyCommand::EndEditing => self.end_editing(),
            KeyCommand::ConfirmDelete => {
                if let Some(id) = selected {
                    self.request_delete(&id);
                }
            }
            KeyCommand::Deselect => self.clear_selection(),
        }
    }

    fn on_text_input(&mut self, id: ComponentId, text: String) {
        if self.selection.editing_id() != Some(&id) {
            debug!("Ignoring text for {} which is not being edited", id);
            return;
        }
        self.tree.update(&id, ComponentPatch::new().attribute("content", text));
    }

    // Selection

    pub fn select(&mut self, id: &ComponentId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        if self.selection.editing_id() != Some(id) {
            self.selection = SelectionState::Selected(id.clone());
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::Idle;
    }

    /// Starts inline editing of a heading, text or button.
    pub fn begin_editing(&mut self, id: &ComponentId) -> bool {
        match self.tree.find(id) {
            Some(component) if component.component_type.is_text_editable() => {
                debug!("Editing text of {}", id);
                self.selection = SelectionState::EditingText(id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn end_editing(&mut self) {
        if let SelectionState::EditingText(id) = &self.selection {
            debug!("Finished editing {}", id);
            self.selection = SelectionState::Selected(id.clone());
        }
    }

    // Context menu

    fn open_context_menu(&mut self, position: DVec2, target: HitTarget) {
        let HitTarget::Component { id, .. } = target else {
            return;
        };
        let Some(component_type) = self.tree.find(&id).map(|component| component.component_type) else {
            return;
        };
        self.select(&id);
        self.context_menu = Some(ContextMenu::new(position, id, component_type));
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    pub fn close_add_menu(&mut self) {
        self.add_menu_target = None;
    }

    /// Runs `action` on the open menu's target and closes the menu.
    pub fn context_menu_action(&mut self, action: MenuAction) -> bool {
        let Some(menu) = self.context_menu.take() else {
            return false;
        };
        if !menu.offers(action) {
            debug!("{} is not offered for {}", action.label(), menu.target);
            return false;
        }

        let id = menu.target;
        match action {
            MenuAction::AddChild => {
                self.add_menu_target = Some(id);
                true
            }
            MenuAction::EditText => self.begin_editing(&id),
            MenuAction::Duplicate => self.duplicate_component(&id).is_some(),
            MenuAction::BringToFront => self.bring_to_front(&id),
            MenuAction::SendToBack => self.send_to_back(&id),
            MenuAction::Delete => self.request_delete(&id),
        }
    }

    // Tree commands

    /// Creates a node of `component_type` with its defaults, at the root or
    /// inside `parent`, and selects it. Returns `None` when `parent` is
    /// unknown or cannot hold children.
    pub fn add_component(&mut self, component_type: ComponentType, parent: Option<&ComponentId>) -> Option<ComponentId> {
        let id = self.ids.next_id(&self.tree);
        self.add_menu_target = None;

        let inserted = match parent {
            None => {
                let position = self.config.layout.root_stagger.position_for(self.tree.root_len());
                self.tree
                    .insert_root(Component::with_defaults(id.clone(), component_type, position))
            }
            Some(parent_id) => {
                let component = Component::with_defaults(id.clone(), component_type, Position::ORIGIN);
                let inserted = self
                    .tree
                    .insert_child_with(parent_id, component, &self.config.layout.child_stagger);
                if inserted {
                    self.event_system
                        .schedule(DeferredTask::RecalcContainer(parent_id.clone()));
                }
                inserted
            }
        };
        if !inserted {
            return None;
        }

        info!("Added {} {}", component_type, id);
        self.selection = SelectionState::Selected(id.clone());
        self.run_deferred();
        Some(id)
    }

    pub fn update_component(&mut self, id: &ComponentId, patch: ComponentPatch) -> bool {
        self.tree.update(id, patch)
    }

    /// Sets one style key on the selected node.
    pub fn update_style(&mut self, key: &str, value: impl Into<Value>) -> bool {
        let Some(component) = self.selected_component() else {
            return false;
        };
        let id = component.id.clone();
        let mut styles = component.styles().cloned().unwrap_or_default();
        styles.set(key, value);
        self.tree.update(&id, ComponentPatch::new().styles(styles))
    }

    /// Asks for confirmation, then deletes.
    pub fn request_delete(&mut self, id: &ComponentId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            debug!("Delete of {} cancelled", id);
            return false;
        }
        self.delete_component(id)
    }

    /// Removes `id` and its subtree without asking. Selection goes back to idle.
    pub fn delete_component(&mut self, id: &ComponentId) -> bool {
        let parent = self.tree.parent_of(id).map(|parent| parent.id.clone());
        let Some(removed) = self.tree.remove(id) else {
            return false;
        };
        info!("Deleted {} ({} nodes)", id, removed.subtree_len());

        self.selection = SelectionState::Idle;
        if self.drag.as_ref().is_some_and(|drag| !self.tree.contains(&drag.id)) {
            self.drag = None;
            self.guides = ActiveGuides::default();
        }
        if self.resize.as_ref().is_some_and(|resize| !self.tree.contains(&resize.id)) {
            self.resize = None;
        }
        if self.context_menu.as_ref().is_some_and(|menu| !self.tree.contains(&menu.target)) {
            self.context_menu = None;
        }
        if self.add_menu_target.as_ref().is_some_and(|target| !self.tree.contains(target)) {
            self.add_menu_target = None;
        }

        if let Some(parent) = parent {
            self.event_system.schedule(DeferredTask::RecalcContainer(parent));
        }
        self.run_deferred();
        true
    }

    /// Copies `id` with fresh ids right after the original.
    pub fn duplicate_component(&mut self, id: &ComponentId) -> Option<ComponentId> {
        let copy = self.tree.duplicate(id, &mut self.ids)?;
        info!("Duplicated {} as {}", id, copy);
        self.schedule_parent_recalc(&copy);
        self.run_deferred();
        Some(copy)
    }

    pub fn move_up(&mut self, id: &ComponentId) -> bool {
        self.tree.move_up(id)
    }

    pub fn move_down(&mut self, id: &ComponentId) -> bool {
        self.tree.move_down(id)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.tree.reorder(from, to)
    }

    pub fn bring_to_front(&mut self, id: &ComponentId) -> bool {
        self.tree.bring_to_front(id)
    }

    pub fn send_to_back(&mut self, id: &ComponentId) -> bool {
        self.tree.send_to_back(id)
    }

    // Saving

    /// Marks a save as started and returns the snapshot to hand off.
    pub fn begin_save(&mut self) -> Result<PageDocument, SaveError> {
        if self.saving {
            return Err(SaveError::InFlight);
        }
        self.saving = true;
        Ok(self.snapshot())
    }

    /// Completes a save started with [`begin_save`](Self::begin_save). Failures
    /// are shown to the user; the tree is left as it is.
    pub fn finish_save(&mut self, result: anyhow::Result<()>) -> Result<(), SaveError> {
        self.saving = false;
        match result {
            Ok(()) => {
                info!("Page '{}' saved", self.page_name);
                Ok(())
            }
            Err(e) => {
                let failure = SaveError::Failed(e);
                error!("{}", failure);
                self.prompt.notify_error(&failure.to_string());
                Err(failure)
            }
        }
    }

    pub fn save(&mut self, handler: &mut dyn SaveHandler) -> Result<(), SaveError> {
        let payload = self.begin_save()?;
        let result = handler.save(&payload);
        self.finish_save(result)
    }

    // Deferred work

    fn schedule_parent_recalc(&mut self, id: &ComponentId) {
        if let Some(parent) = self.tree.parent_of(id) {
            self.event_system
                .schedule(DeferredTask::RecalcContainer(parent.id.clone()));
        }
    }

    fn run_deferred(&mut self) {
        if !self.event_system.is_empty() {
            self.event_system.update(&mut self.tree, &self.config.layout);
        }
    }
}
