//! Planogram session: the single owner of editing state.
//!
//! The host view layer forwards normalized input events here. Pointer
//! coordinates arrive in screen space and are converted through the
//! [`Viewport`] before they reach the [`ShelfBuilder`] or the
//! [`BindingEngine`].
//!
//! Template names are collected through an explicit prompt state. While a
//! prompt is pending every mutating call fails with
//! [`SessionError::PromptPending`]; answering or cancelling the prompt
//! releases the session.

use planokit_core::{Point, Result, SessionError, Size};
use tracing::{debug, info};

use crate::binding::{BindingEngine, DropEvent, DropOutcome};
use crate::catalog::{Catalog, Product};
use crate::drag::{DragSession, ResizeSession};
use crate::element::ElementKind;
use crate::planogram::Planogram;
use crate::shelf::{InstantiatedShelf, ShelfBuilder};
use crate::templates::{SaveOutcome, TemplateKind, TemplateRepository, TemplateStore};
use crate::viewport::{Viewport, ZoomLimits};

/// Which half of the tool is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Geometry editing: palette, drag, resize.
    #[default]
    ShelfEditor,
    /// Product assignment: gallery, drop, chooser.
    Planogram,
}

/// What a name prompt will do once answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    SaveShelf,
    SavePlanogram,
    LoadShelf,
    LoadPlanogram,
    InstantiateShelf,
}

/// Result of answering a name prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    /// No name given; nothing changed.
    Cancelled,
    Saved(SaveOutcome),
    ShelfLoaded { shelf_id: String, elements: usize },
    PlanogramLoaded { entries: usize },
    Instantiated(InstantiatedShelf),
}

/// Construction parameters for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub canvas: Size,
    pub zoom_limits: ZoomLimits,
    pub min_element_size: f64,
    pub slots_per_shelf: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        let builder = ShelfBuilder::default();
        Self {
            canvas: builder.canvas_size(),
            zoom_limits: ZoomLimits::default(),
            min_element_size: builder.min_size(),
            slots_per_shelf: planokit_core::constants::DEFAULT_SLOTS_PER_SHELF,
        }
    }
}

/// Editing state for one planogram authoring session.
pub struct PlanogramSession<R: TemplateRepository> {
    builder: ShelfBuilder,
    viewport: Viewport,
    binding: BindingEngine,
    catalog: Catalog,
    store: TemplateStore<R>,
    mode: EditorMode,
    prompt: Option<PromptAction>,
}

impl<R: TemplateRepository> PlanogramSession<R> {
    pub fn new(options: SessionOptions, catalog: Catalog, repository: R) -> Self {
        Self {
            builder: ShelfBuilder::new(options.canvas)
                .with_limits(options.min_element_size, options.slots_per_shelf),
            viewport: Viewport::new(options.canvas).with_limits(options.zoom_limits),
            binding: BindingEngine::new(),
            catalog,
            store: TemplateStore::new(repository),
            mode: EditorMode::default(),
            prompt: None,
        }
    }

    pub fn builder(&self) -> &ShelfBuilder {
        &self.builder
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn binding(&self) -> &BindingEngine {
        &self.binding
    }

    pub fn planogram(&self) -> &Planogram {
        self.binding.planogram()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &TemplateStore<R> {
        &self.store
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) -> Result<()> {
        self.ensure_idle()?;
        if mode != self.mode {
            debug!("Switched editor mode to {:?}", mode);
            self.binding.close_chooser();
        }
        self.mode = mode;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.prompt.is_some() {
            return Err(SessionError::PromptPending.into());
        }
        Ok(())
    }

    // Viewport

    /// Mounts the canvas into a container and applies the fit zoom.
    pub fn mount(&mut self, container_width: f64, container_height: f64) -> Result<f64> {
        self.ensure_idle()?;
        Ok(self.viewport.mount(container_width, container_height))
    }

    pub fn zoom_in(&mut self) -> Result<f64> {
        self.ensure_idle()?;
        self.viewport.zoom_in();
        Ok(self.viewport.zoom())
    }

    pub fn zoom_out(&mut self) -> Result<f64> {
        self.ensure_idle()?;
        self.viewport.zoom_out();
        Ok(self.viewport.zoom())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<f64> {
        self.ensure_idle()?;
        self.viewport.set_zoom(zoom);
        Ok(self.viewport.zoom())
    }

    pub fn reset_view(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.viewport.reset_view();
        Ok(())
    }

    pub fn center_on_design(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.viewport.center_on_design();
        Ok(())
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.ensure_idle()?;
        self.viewport.scroll_by(dx, dy);
        Ok(())
    }

    // Geometry

    /// Palette click: appends an element at the default position.
    pub fn add_element(&mut self, kind: ElementKind) -> Result<String> {
        self.ensure_idle()?;
        Ok(self.builder.add_element(kind))
    }

    /// Palette drag released over the canvas at a screen-space point.
    pub fn drop_from_palette(&mut self, kind: ElementKind, screen: Point) -> Result<String> {
        self.ensure_idle()?;
        let at = self.viewport.to_canvas_space(screen);
        Ok(self.builder.add_element_at(kind, at))
    }

    /// Adds a shelf pre-filled with slots on a shelf-line.
    pub fn add_shelf(&mut self) -> Result<String> {
        self.ensure_idle()?;
        Ok(self.builder.add_shelf())
    }

    pub fn set_active_shelf(&mut self, shelf_id: &str) -> Result<()> {
        self.ensure_idle()?;
        self.builder.set_active_shelf(shelf_id)
    }

    /// One-shot move from a screen-space pointer delta.
    pub fn move_element(&mut self, element_id: &str, screen_dx: f64, screen_dy: f64) -> Result<Point> {
        self.ensure_idle()?;
        let (dx, dy) = self.viewport.delta_to_canvas(screen_dx, screen_dy);
        self.builder.move_element(element_id, dx, dy)
    }

    /// Sets an element's size in canvas units.
    pub fn resize_element(&mut self, element_id: &str, width: f64, height: f64) -> Result<Size> {
        self.ensure_idle()?;
        self.builder.resize_element(element_id, width, height)
    }

    pub fn begin_drag(&self, element_id: &str) -> Result<DragSession> {
        self.ensure_idle()?;
        DragSession::begin(&self.builder, element_id)
    }

    /// Feeds a pointer move into a drag and returns the uncommitted preview position.
    pub fn update_drag(&self, drag: &mut DragSession, screen_dx: f64, screen_dy: f64) -> Result<Point> {
        drag.update(screen_dx, screen_dy, &self.viewport);
        drag.preview(&self.builder)
    }

    pub fn end_drag(&mut self, drag: DragSession) -> Result<Point> {
        self.ensure_idle()?;
        drag.end(&mut self.builder)
    }

    pub fn begin_resize(&self, element_id: &str) -> Result<ResizeSession> {
        self.ensure_idle()?;
        ResizeSession::begin(&self.builder, element_id)
    }

    /// Feeds a handle move into a resize and returns the uncommitted preview size.
    pub fn update_resize(
        &self,
        resize: &mut ResizeSession,
        screen_dx: f64,
        screen_dy: f64,
    ) -> Result<Size> {
        resize.update(screen_dx, screen_dy, &self.viewport);
        resize.preview(&self.builder)
    }

    pub fn end_resize(&mut self, resize: ResizeSession) -> Result<Size> {
        self.ensure_idle()?;
        resize.end(&mut self.builder)
    }

    pub fn clear_shelf(&mut self, shelf_id: &str) -> Result<usize> {
        self.ensure_idle()?;
        self.builder.clear_shelf(shelf_id)
    }

    pub fn clear_canvas(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.builder.clear_canvas();
        self.binding.close_chooser();
        Ok(())
    }

    // Binding

    pub fn handle_drop(&mut self, event: &DropEvent) -> Result<DropOutcome> {
        self.ensure_idle()?;
        let outcome = self.binding.handle_drop(event, &self.builder);
        if matches!(outcome, DropOutcome::Assigned { .. }) {
            self.builder.stamp_assignments(self.binding.planogram());
        }
        Ok(outcome)
    }

    pub fn assign(&mut self, slot_id: &str, product_id: &str) -> Result<()> {
        self.ensure_idle()?;
        self.binding.assign(slot_id, product_id);
        self.builder.stamp_assignments(self.binding.planogram());
        Ok(())
    }

    /// Click on a slot: opens the product chooser. Returns false for non-slots.
    pub fn select_slot(&mut self, slot_id: &str) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.binding.open_chooser(slot_id, &self.builder))
    }

    pub fn set_chooser_filter(&mut self, filter: &str) -> Result<()> {
        self.ensure_idle()?;
        self.binding.set_chooser_filter(filter);
        Ok(())
    }

    pub fn chooser_products(&self) -> Vec<&Product> {
        self.binding.chooser_products(&self.catalog)
    }

    /// Picks a product in the open chooser. Returns the slot it was assigned to.
    pub fn choose_product(&mut self, product_id: &str) -> Result<Option<String>> {
        self.ensure_idle()?;
        let slot = self.binding.choose(product_id);
        if slot.is_some() {
            self.builder.stamp_assignments(self.binding.planogram());
        }
        Ok(slot)
    }

    pub fn close_chooser(&mut self) {
        self.binding.close_chooser();
    }

    pub fn set_gallery_filter(&mut self, filter: &str) -> Result<()> {
        self.ensure_idle()?;
        self.binding.set_gallery_filter(filter);
        Ok(())
    }

    pub fn gallery_products(&self) -> Vec<&Product> {
        self.binding.gallery_products(&self.catalog)
    }

    /// Product shown in a slot, or `None` for an empty or orphaned slot.
    pub fn product_for(&self, slot_id: &str) -> Option<&Product> {
        self.binding
            .product_for(slot_id, &self.builder, &self.catalog)
    }

    // Templates

    pub fn save_shelf_template(&mut self, name: &str) -> Result<SaveOutcome> {
        self.ensure_idle()?;
        let elements = self.builder.active_elements();
        self.store.save_shelf_template(name, &elements)
    }

    pub fn save_planogram_template(&mut self, name: &str) -> Result<SaveOutcome> {
        self.ensure_idle()?;
        self.store
            .save_planogram_template(name, self.binding.planogram())
    }

    /// Replaces all shelves with a single shelf holding the template's elements.
    ///
    /// On failure nothing in the session changes.
    pub fn load_shelf_template(&mut self, name: &str) -> Result<String> {
        self.ensure_idle()?;
        self.apply_shelf_template(name)
    }

    /// Replaces the planogram with the stored mapping. On failure nothing changes.
    pub fn load_planogram_template(&mut self, name: &str) -> Result<usize> {
        self.ensure_idle()?;
        self.apply_planogram_template(name)
    }

    /// Adds a new shelf instantiated from a stored shelf template.
    pub fn instantiate_shelf_template(&mut self, name: &str) -> Result<InstantiatedShelf> {
        self.ensure_idle()?;
        self.apply_instantiation(name)
    }

    pub fn list_template_names(&self, kind: TemplateKind) -> Result<Vec<String>> {
        self.store.list_template_names(kind)
    }

    fn apply_shelf_template(&mut self, name: &str) -> Result<String> {
        let elements = self.store.load_shelf_template(name)?;
        let count = elements.len();
        let shelf_id = self.builder.replace_all(elements);
        self.builder.stamp_assignments(self.binding.planogram());
        self.binding.close_chooser();
        info!("Canvas replaced by '{}' ({} elements)", name.trim(), count);
        Ok(shelf_id)
    }

    fn apply_planogram_template(&mut self, name: &str) -> Result<usize> {
        let planogram = self.store.load_planogram_template(name)?;
        let entries = planogram.len();
        self.binding.replace_planogram(planogram);
        self.builder.stamp_assignments(self.binding.planogram());
        Ok(entries)
    }

    fn apply_instantiation(&mut self, name: &str) -> Result<InstantiatedShelf> {
        let elements = self.store.load_shelf_template(name)?;
        self.builder
            .instantiate_shelf_from_template(name.trim(), &elements)
    }

    // Name prompt

    /// Opens a name prompt. Only one prompt may be pending at a time.
    pub fn request_name(&mut self, action: PromptAction) -> Result<()> {
        self.ensure_idle()?;
        debug!("Awaiting template name for {:?}", action);
        self.prompt = Some(action);
        Ok(())
    }

    pub fn pending_prompt(&self) -> Option<PromptAction> {
        self.prompt
    }

    /// Dismisses the prompt with no state change.
    pub fn cancel_prompt(&mut self) {
        if let Some(action) = self.prompt.take() {
            debug!("Name prompt for {:?} cancelled", action);
        }
    }

    /// Answers the pending prompt and runs its action.
    ///
    /// `None` or a blank name cancels. The prompt is closed whether the action
    /// succeeds or fails; a failed load leaves the session untouched.
    pub fn submit_name(&mut self, answer: Option<&str>) -> Result<PromptResult> {
        let action = self.prompt.take().ok_or(SessionError::NoPendingPrompt)?;
        let Some(name) = answer.map(str::trim).filter(|n| !n.is_empty()) else {
            debug!("Name prompt for {:?} answered with no name", action);
            return Ok(PromptResult::Cancelled);
        };

        match action {
            PromptAction::SaveShelf => {
                let elements = self.builder.active_elements();
                let outcome = self.store.save_shelf_template(name, &elements)?;
                Ok(PromptResult::Saved(outcome))
            }
            PromptAction::SavePlanogram => {
                let outcome = self
                    .store
                    .save_planogram_template(name, self.binding.planogram())?;
                Ok(PromptResult::Saved(outcome))
            }
            PromptAction::LoadShelf => {
                let shelf_id = self.apply_shelf_template(name)?;
                let elements = self
                    .builder
                    .shelf(&shelf_id)
                    .map(|s| s.elements.len())
                    .unwrap_or_default();
                Ok(PromptResult::ShelfLoaded { shelf_id, elements })
            }
            PromptAction::LoadPlanogram => {
                let entries = self.apply_planogram_template(name)?;
                Ok(PromptResult::PlanogramLoaded { entries })
            }
            PromptAction::InstantiateShelf => {
                Ok(PromptResult::Instantiated(self.apply_instantiation(name)?))
            }
        }
    }
}
