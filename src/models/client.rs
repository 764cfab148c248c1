use serde::{Deserialize, Serialize};

/// A client organization holding exclusive rights to ZIP-code territories.
///
/// `color` is assigned once at creation and preserved across edits; it is an
/// opaque display tag of the form `#rrggbb`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub assigned_zip_codes: Vec<String>,
    pub color: String,
    pub is_active: bool,
}

/// Form input for creating or editing a client.
///
/// `assigned_zip_codes` is the raw comma-separated text the user typed; the
/// engine filters it down to well-formed 5-digit tokens on commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub assigned_zip_codes: String,
    pub is_active: bool,
}
