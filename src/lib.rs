pub mod csv;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod store;

pub use engine::{EventOutcome, TerritoryEngine, CONFLICT_RADIUS_MILES};
pub use error::EngineError;
pub use models::{Client, ClientForm, EntityKind, Event, EventForm};
pub use store::SnapshotStore;
