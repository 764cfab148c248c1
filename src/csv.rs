//! Client roster wire format.
//!
//! The format is a plain delimited text with no quoting: fields split on `,`
//! and the ZIP list on `;`. Import skips the header row and any row with
//! fewer than four fields; malformed rows are counted, never fatal. Export
//! appends a `Status` column the importer ignores, so exported rosters
//! re-import cleanly.

use log::warn;
use rand::Rng;
use uuid::Uuid;

use crate::engine::is_valid_zip;
use crate::models::Client;

pub const FIELD_DELIMITER: char = ',';
pub const ZIP_DELIMITER: char = ';';
pub const EXPORT_HEADER: &str = "Client Name,Email,Phone,Zip Codes,Status";

/// Minimum comma-separated fields a roster row must carry.
const MIN_FIELDS: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub clients: Vec<Client>,
    pub skipped_rows: usize,
}

/// Parse roster CSV text into clients.
///
/// The first line is treated as a header and dropped. Blank lines are ignored
/// without counting; any other row with fewer than four fields increments
/// `skipped_rows`. ZIP tokens that are not exactly five digits are silently
/// dropped. Imported clients receive fresh ids and colors and start active;
/// a trailing `Status` field, if present, is ignored.
pub fn import_clients(text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut rng = rand::thread_rng();

    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() < MIN_FIELDS {
            warn!("Skipping roster row with {} field(s): {line:?}", fields.len());
            report.skipped_rows += 1;
            continue;
        }

        let assigned_zip_codes: Vec<String> = fields[3]
            .split(ZIP_DELIMITER)
            .map(str::trim)
            .filter(|z| is_valid_zip(z))
            .map(str::to_owned)
            .collect();

        report.clients.push(Client {
            id: Uuid::new_v4().to_string(),
            name: fields[0].trim().to_owned(),
            contact_email: fields[1].trim().to_owned(),
            contact_phone: fields[2].trim().to_owned(),
            assigned_zip_codes,
            color: format!("#{:06x}", rng.gen_range(0..0x100_0000u32)),
            is_active: true,
        });
    }

    report
}

/// Serialize clients to roster CSV text, one row per client plus the header.
pub fn export_clients(clients: &[Client]) -> String {
    let mut out = String::from(EXPORT_HEADER);
    for client in clients {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{}",
            client.name,
            client.contact_email,
            client.contact_phone,
            client.assigned_zip_codes.join(&ZIP_DELIMITER.to_string()),
            if client.is_active { "Active" } else { "Inactive" },
        ));
    }
    out
}
