use crate::db::models::{Camera, Layout};
use crate::db::{keys, RecordStore};
use crate::error::Error;
use anyhow::Result;
use tracing::info;

/// Layouts repository. Layouts reference cameras by id only, so deleting a
/// camera never touches the layouts that show it.
#[derive(Clone)]
pub struct LayoutsRepository {
    records: RecordStore,
}

impl LayoutsRepository {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    pub fn get_all(&self) -> Vec<Layout> {
        self.records.get(keys::LAYOUTS, Vec::new())
    }

    pub fn get_by_id(&self, id: &str) -> Option<Layout> {
        self.get_all().into_iter().find(|l| l.id == id)
    }

    /// Validate and append a new layout
    pub fn create(&self, layout: &Layout) -> Result<Layout> {
        layout.validate()?;
        info!("Creating new layout: {}", layout.name);

        let mut layouts = self.get_all();
        layouts.push(layout.clone());
        self.records.set(keys::LAYOUTS, &layouts);
        Ok(layout.clone())
    }

    /// Validate and replace an existing layout
    pub fn update(&self, layout: &Layout) -> Result<Layout> {
        layout.validate()?;

        let mut layouts = self.get_all();
        let existing = layouts
            .iter_mut()
            .find(|l| l.id == layout.id)
            .ok_or_else(|| Error::NotFound(format!("Layout not found: {}", layout.id)))?;
        *existing = layout.clone();

        self.records.set(keys::LAYOUTS, &layouts);
        Ok(layout.clone())
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut layouts = self.get_all();
        let before = layouts.len();
        layouts.retain(|l| l.id != id);
        if layouts.len() == before {
            return false;
        }
        self.records.set(keys::LAYOUTS, &layouts);
        true
    }

    /// Layout shown on first load: the first saved layout, or a single-cell
    /// view of the first camera when none are saved
    pub fn initial_layout(&self, cameras: &[Camera]) -> Option<Layout> {
        self.get_all()
            .into_iter()
            .next()
            .or_else(|| Layout::default_view(cameras))
    }
}
