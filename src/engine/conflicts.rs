use chrono::NaiveDate;

use crate::geo::distance_miles;
use crate::models::Event;

/// Two active same-day events within this many miles of each other conflict.
pub const CONFLICT_RADIUS_MILES: f64 = 15.0;

fn within_radius(e1: &Event, e2: &Event) -> bool {
    distance_miles(e1.latitude, e1.longitude, e2.latitude, e2.longitude)
        <= CONFLICT_RADIUS_MILES
}

/// Replace every event's `conflicts` with the ids of all other active events
/// sharing its calendar date within the conflict radius.
///
/// Full pairwise pass over the collection; idempotent. Inactive events get an
/// empty list and never appear in anyone else's. Must run after any mutation
/// that can change an event's activity, date, or location, since one event's
/// change can alter another's conflict list.
pub fn recompute(events: &mut Vec<Event>) {
    let snapshot = events.clone();
    for event in events.iter_mut() {
        event.conflicts.clear();
        if !event.is_active {
            continue;
        }
        for other in &snapshot {
            if other.id != event.id
                && other.is_active
                && other.event_date == event.event_date
                && within_radius(event, other)
            {
                event.conflicts.push(other.id.clone());
            }
        }
    }
}

/// Ids of existing active events a not-yet-committed candidate would conflict
/// with. Same predicate as [`recompute`], evaluated without mutating state.
pub fn would_conflict(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    events: &[Event],
) -> Vec<String> {
    events
        .iter()
        .filter(|e| {
            e.is_active
                && e.event_date == date
                && distance_miles(latitude, longitude, e.latitude, e.longitude)
                    <= CONFLICT_RADIUS_MILES
        })
        .map(|e| e.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn event(id: &str, lat: f64, lon: f64, date: &str, is_active: bool) -> Event {
        Event {
            id: id.into(),
            client_id: "c1".into(),
            event_name: format!("Event {id}"),
            zip_code: "10001".into(),
            latitude: lat,
            longitude: lon,
            event_date: date.parse().unwrap(),
            event_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            notes: String::new(),
            is_active,
            conflicts: Vec::new(),
        }
    }

    #[test]
    fn nearby_same_day_events_conflict_symmetrically() {
        let mut events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 40.7489, -73.9680, "2024-02-15", true),
        ];
        recompute(&mut events);
        assert_eq!(events[0].conflicts, vec!["e2".to_string()]);
        assert_eq!(events[1].conflicts, vec!["e1".to_string()]);
    }

    #[test]
    fn different_dates_never_conflict_regardless_of_distance() {
        let mut events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 40.7128, -74.0060, "2024-02-16", true),
        ];
        recompute(&mut events);
        assert!(events[0].conflicts.is_empty());
        assert!(events[1].conflicts.is_empty());
    }

    #[test]
    fn distant_same_day_events_do_not_conflict() {
        // ~0.5 degrees of latitude is well over 15 miles.
        let mut events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 41.2128, -74.0060, "2024-02-15", true),
        ];
        recompute(&mut events);
        assert!(events[0].conflicts.is_empty());
        assert!(events[1].conflicts.is_empty());
    }

    #[test]
    fn inactive_events_have_no_conflicts_and_block_nobody() {
        let mut events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 40.7489, -73.9680, "2024-02-15", false),
        ];
        recompute(&mut events);
        assert!(events[0].conflicts.is_empty());
        assert!(events[1].conflicts.is_empty());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 40.7489, -73.9680, "2024-02-15", true),
            event("e3", 40.7128, -74.0060, "2024-02-16", false),
        ];
        recompute(&mut events);
        let once = events.clone();
        recompute(&mut events);
        assert_eq!(events, once);
    }

    #[test]
    fn stale_conflict_entries_are_discarded() {
        let mut events = vec![event("e1", 40.7128, -74.0060, "2024-02-15", true)];
        events[0].conflicts = vec!["gone".into()];
        recompute(&mut events);
        assert!(events[0].conflicts.is_empty());
    }

    #[test]
    fn would_conflict_matches_the_committed_relation() {
        let events = vec![
            event("e1", 40.7128, -74.0060, "2024-02-15", true),
            event("e2", 40.7128, -74.0060, "2024-02-16", true),
            event("e3", 40.7489, -73.9680, "2024-02-15", false),
        ];
        let date: NaiveDate = "2024-02-15".parse().unwrap();
        let hits = would_conflict(date, 40.7489, -73.9680, &events);
        assert_eq!(hits, vec!["e1".to_string()]);
    }
}
