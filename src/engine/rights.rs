use crate::models::Client;

/// Decide whether `client_id` may schedule an event in `zip`.
///
/// The ZIP is blocked only when some other *active* client lists it among its
/// assigned territories, and even then an explicit co-assignment on the
/// requesting client overrides exclusivity. Inactive clients never block.
/// An unknown `client_id` is ineligible rather than silently permitted.
pub fn may_operate(client_id: &str, zip: &str, clients: &[Client]) -> bool {
    let Some(client) = clients.iter().find(|c| c.id == client_id) else {
        return false;
    };

    let other_active_has_zip = clients.iter().any(|c| {
        c.id != client_id && c.is_active && c.assigned_zip_codes.iter().any(|z| z.as_str() == zip)
    });

    !other_active_has_zip || client.assigned_zip_codes.iter().any(|z| z.as_str() == zip)
}
