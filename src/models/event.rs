use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scheduled event inside a client's territory.
///
/// `latitude`/`longitude` and `conflicts` are derived fields: the engine
/// recomputes them on every write (and on snapshot load) and never trusts
/// values supplied from outside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Weak reference; a dangling id is tolerated and rendered as
    /// "unknown client" by display layers.
    pub client_id: String,
    pub event_name: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub notes: String,
    pub is_active: bool,
    pub conflicts: Vec<String>,
}

/// Form input for creating or editing an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub client_id: String,
    pub event_name: String,
    pub zip_code: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub notes: String,
    pub is_active: bool,
}
