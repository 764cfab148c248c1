//! Territory & Conflict Engine.
//!
//! Owns the client and event collections and exposes every mutation as a
//! method. Each operation validates first, commits, then recomputes the
//! derived conflict relation; a rejected mutation leaves both collections
//! untouched. Single-threaded and synchronous — persistence and rendering are
//! the caller's concern, performed after an operation returns.

mod conflicts;
mod rights;

pub use conflicts::CONFLICT_RADIUS_MILES;
pub use rights::may_operate;

use log::{debug, info};
use rand::Rng;
use uuid::Uuid;

use crate::csv::{self, ImportReport};
use crate::error::{EngineError, Result};
use crate::geo::geocode;
use crate::models::{Client, ClientForm, EntityKind, Event, EventForm};

/// Result of committing an event.
///
/// `advisories` lists ids of already-committed active events the new event
/// conflicts with. It is populated only on creation (not edits), is never an
/// error, and is surfaced so the caller can ask for confirmation and roll
/// back with [`TerritoryEngine::delete_event`] if the user declines.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub event: Event,
    pub advisories: Vec<String>,
}

pub fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn random_color() -> String {
    let mut rng = rand::thread_rng();
    format!("#{:06x}", rng.gen_range(0..0x100_0000u32))
}

#[derive(Debug, Default, Clone)]
pub struct TerritoryEngine {
    clients: Vec<Client>,
    events: Vec<Event>,
}

impl TerritoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt records loaded from a snapshot.
    ///
    /// Coordinates and conflict lists are derived fields and are recomputed
    /// here rather than trusted from disk, so a hand-edited or stale snapshot
    /// cannot smuggle in an inconsistent relation.
    pub fn from_snapshot(clients: Vec<Client>, events: Vec<Event>) -> Self {
        let mut engine = Self { clients, events };
        for event in &mut engine.events {
            let (lat, lon) = geocode(&event.zip_code);
            event.latitude = lat;
            event.longitude = lon;
        }
        conflicts::recompute(&mut engine.events);
        info!(
            "Engine loaded: {} clients, {} events",
            engine.clients.len(),
            engine.events.len()
        );
        engine
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate and commit an event, inserting or replacing by id.
    ///
    /// Fails with [`EngineError::InvalidZipCode`] or
    /// [`EngineError::TerritoryConflict`] before any state changes. On a new
    /// event the advisory conflict set is gathered against the pre-commit
    /// collection and returned alongside the committed record.
    pub fn create_or_update_event(
        &mut self,
        form: &EventForm,
        existing_id: Option<&str>,
    ) -> Result<EventOutcome> {
        if !is_valid_zip(&form.zip_code) {
            return Err(EngineError::InvalidZipCode(form.zip_code.clone()));
        }
        if !may_operate(&form.client_id, &form.zip_code, &self.clients) {
            return Err(EngineError::TerritoryConflict {
                zip: form.zip_code.clone(),
            });
        }

        let (latitude, longitude) = geocode(&form.zip_code);

        let advisories = if existing_id.is_none() {
            conflicts::would_conflict(form.event_date, latitude, longitude, &self.events)
        } else {
            Vec::new()
        };

        let event = Event {
            id: existing_id.map(str::to_owned).unwrap_or_else(generate_id),
            client_id: form.client_id.clone(),
            event_name: form.event_name.clone(),
            zip_code: form.zip_code.clone(),
            latitude,
            longitude,
            event_date: form.event_date,
            event_time: form.event_time,
            notes: form.notes.clone(),
            is_active: form.is_active,
            conflicts: Vec::new(),
        };

        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event.clone(),
            None => self.events.push(event.clone()),
        }
        conflicts::recompute(&mut self.events);

        if !advisories.is_empty() {
            debug!(
                "Event '{}' committed with {} advisory conflict(s)",
                event.event_name,
                advisories.len()
            );
        }

        // Pick the post-recompute copy so `conflicts` is populated.
        let committed = self
            .events
            .iter()
            .find(|e| e.id == event.id)
            .cloned()
            .unwrap_or(event);

        Ok(EventOutcome {
            event: committed,
            advisories,
        })
    }

    /// Pre-check a candidate event without committing it.
    pub fn would_conflict(&self, form: &EventForm) -> Result<Vec<String>> {
        if !is_valid_zip(&form.zip_code) {
            return Err(EngineError::InvalidZipCode(form.zip_code.clone()));
        }
        let (lat, lon) = geocode(&form.zip_code);
        Ok(conflicts::would_conflict(
            form.event_date,
            lat,
            lon,
            &self.events,
        ))
    }

    /// Commit a client, inserting or replacing by id.
    ///
    /// The raw ZIP text is filtered to well-formed 5-digit tokens; malformed
    /// tokens are silently dropped. `color` is preserved on edit and drawn
    /// fresh on creation. Existing events are not re-validated against the
    /// new assignment: past bookings are grandfathered.
    pub fn create_or_update_client(&mut self, form: &ClientForm, existing_id: Option<&str>) -> Client {
        let assigned_zip_codes: Vec<String> = form
            .assigned_zip_codes
            .split(',')
            .map(str::trim)
            .filter(|z| is_valid_zip(z))
            .map(str::to_owned)
            .collect();

        let existing = existing_id.and_then(|id| self.clients.iter().find(|c| c.id == id));
        let client = Client {
            id: existing
                .map(|c| c.id.clone())
                .or_else(|| existing_id.map(str::to_owned))
                .unwrap_or_else(generate_id),
            name: form.name.clone(),
            contact_email: form.contact_email.clone(),
            contact_phone: form.contact_phone.clone(),
            assigned_zip_codes,
            color: existing.map(|c| c.color.clone()).unwrap_or_else(random_color),
            is_active: form.is_active,
        };

        match self.clients.iter_mut().find(|c| c.id == client.id) {
            Some(slot) => *slot = client.clone(),
            None => self.clients.push(client.clone()),
        }
        client
    }

    /// Remove a client and every event that references it.
    ///
    /// Returns the number of events cascaded away. Unknown id is a no-op.
    pub fn delete_client(&mut self, id: &str) -> usize {
        self.clients.retain(|c| c.id != id);
        let before = self.events.len();
        self.events.retain(|e| e.client_id != id);
        let removed = before - self.events.len();
        conflicts::recompute(&mut self.events);
        if removed > 0 {
            info!("Deleted client {id} and {removed} of its event(s)");
        }
        removed
    }

    /// Remove an event. Returns whether anything was removed.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;
        conflicts::recompute(&mut self.events);
        removed
    }

    /// Flip `is_active` on a client or event. Returns whether the id matched.
    ///
    /// Conflicts are recomputed either way; deactivating an event immediately
    /// clears it from every other event's conflict list.
    pub fn toggle_active(&mut self, kind: EntityKind, id: &str) -> bool {
        let found = match kind {
            EntityKind::Client => match self.clients.iter_mut().find(|c| c.id == id) {
                Some(client) => {
                    client.is_active = !client.is_active;
                    true
                }
                None => false,
            },
            EntityKind::Event => match self.events.iter_mut().find(|e| e.id == id) {
                Some(event) => {
                    event.is_active = !event.is_active;
                    true
                }
                None => false,
            },
        };
        conflicts::recompute(&mut self.events);
        found
    }

    /// Import clients from roster CSV text, appending to the collection.
    ///
    /// Malformed rows are skipped and counted, never fatal for the batch.
    pub fn import_clients(&mut self, text: &str) -> ImportReport {
        let report = csv::import_clients(text);
        self.clients.extend(report.clients.iter().cloned());
        info!(
            "Imported {} client(s), skipped {} row(s)",
            report.clients.len(),
            report.skipped_rows
        );
        report
    }

    /// Serialize the client roster to CSV text.
    pub fn export_clients(&self) -> String {
        csv::export_clients(&self.clients)
    }
}
