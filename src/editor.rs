use crate::error::MangroveError;
use crate::models::Observation;
use crate::store::MeasurementStore;

/// Interactive editing facade over the measurement store.
///
/// Loads the full record set once into a display-local list, then mirrors
/// every store mutation into that list so the view stays consistent without
/// rereading the store after each edit. Each cached row carries its store id,
/// so updates and deletes target the right record regardless of display
/// order.
pub struct RecordEditor {
    store: MeasurementStore,
    rows: Vec<Observation>,
}

impl RecordEditor {
    /// Wrap a store and load its current records.
    pub fn load(store: MeasurementStore) -> Result<Self, MangroveError> {
        let rows = store.list_all()?;
        Ok(Self { store, rows })
    }

    /// The cached display rows.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Insert a new observation and append it to the cache.
    pub fn insert(&mut self, light_intensity: f64, height: f64) -> Result<i64, MangroveError> {
        let id = self.store.insert(light_intensity, height)?;
        self.rows.push(Observation {
            id,
            light_intensity,
            height,
        });
        Ok(id)
    }

    /// Update the observation with the given id in both store and cache.
    /// A `NotFound` from the store leaves the cache untouched.
    pub fn update(
        &mut self,
        id: i64,
        light_intensity: f64,
        height: f64,
    ) -> Result<(), MangroveError> {
        self.store.update_by_id(id, light_intensity, height)?;
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.light_intensity = light_intensity;
            row.height = height;
        }
        Ok(())
    }

    /// Delete the observation with the given id from both store and cache.
    pub fn delete(&mut self, id: i64) -> Result<(), MangroveError> {
        self.store.delete_by_id(id)?;
        self.rows.retain(|r| r.id != id);
        Ok(())
    }

    /// Reload the cache from the store.
    pub fn refresh(&mut self) -> Result<(), MangroveError> {
        self.rows = self.store.list_all()?;
        Ok(())
    }
}
