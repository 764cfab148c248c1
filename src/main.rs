use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;

use territory_manager::{
    ClientForm, EntityKind, EventForm, SnapshotStore, TerritoryEngine,
};

#[derive(Parser, Debug)]
#[command(name = "territory", version, about = "Territory rights and event conflict manager")]
struct Cli {
    /// Data directory (default: platform data dir).
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List clients.
    Clients {
        /// Include inactive clients.
        #[arg(long)]
        all: bool,
    },

    /// List events with their conflict state.
    Events {
        /// Include inactive events.
        #[arg(long)]
        all: bool,
    },

    /// Create a client, or replace one by passing --id.
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Comma-separated ZIP codes; malformed tokens are dropped.
        #[arg(long, default_value = "")]
        zips: String,
        #[arg(long)]
        inactive: bool,
        /// Existing client id to edit.
        #[arg(long)]
        id: Option<String>,
    },

    /// Create an event, or replace one by passing --id.
    AddEvent {
        #[arg(long)]
        client: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        zip: String,
        /// Calendar date, e.g. 2024-02-15.
        #[arg(long)]
        date: NaiveDate,
        /// Local time of day, e.g. 18:00:00.
        #[arg(long)]
        time: NaiveTime,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        inactive: bool,
        /// Existing event id to edit.
        #[arg(long)]
        id: Option<String>,
    },

    /// Flip the active flag on a client or event.
    Toggle {
        kind: ToggleKind,
        id: String,
    },

    /// Delete a client and all of its events.
    DeleteClient { id: String },

    /// Delete an event.
    DeleteEvent { id: String },

    /// Import clients from a roster CSV file.
    Import { file: PathBuf },

    /// Export the client roster as CSV (stdout unless --out is given).
    Export {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToggleKind {
    Client,
    Event,
}

impl From<ToggleKind> for EntityKind {
    fn from(kind: ToggleKind) -> Self {
        match kind {
            ToggleKind::Client => EntityKind::Client,
            ToggleKind::Event => EntityKind::Event,
        }
    }
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("territory-manager"))
        .ok_or_else(|| anyhow!("could not determine a platform data directory; pass --data-dir"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let store = SnapshotStore::new(resolve_data_dir(cli.data_dir)?)?;
    let mut engine = TerritoryEngine::from_snapshot(store.load_clients()?, store.load_events()?);

    match cli.command {
        Commands::Clients { all } => {
            for client in engine.clients().iter().filter(|c| all || c.is_active) {
                println!(
                    "{}  {}  [{}]  zips: {}{}",
                    client.id,
                    client.name,
                    client.contact_email,
                    client.assigned_zip_codes.join(", "),
                    if client.is_active { "" } else { "  (inactive)" },
                );
            }
        }

        Commands::Events { all } => {
            for event in engine.events().iter().filter(|e| all || e.is_active) {
                let client_name = engine
                    .client(&event.client_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("unknown client");
                let conflict_note = if event.conflicts.is_empty() {
                    String::from("clear")
                } else {
                    format!("{} conflict(s)", event.conflicts.len())
                };
                println!(
                    "{}  {}  {} {}  zip {}  ({client_name})  {}{}",
                    event.id,
                    event.event_name,
                    event.event_date,
                    event.event_time,
                    event.zip_code,
                    conflict_note,
                    if event.is_active { "" } else { "  (inactive)" },
                );
            }
        }

        Commands::AddClient {
            name,
            email,
            phone,
            zips,
            inactive,
            id,
        } => {
            let form = ClientForm {
                name,
                contact_email: email,
                contact_phone: phone,
                assigned_zip_codes: zips,
                is_active: !inactive,
            };
            let client = engine.create_or_update_client(&form, id.as_deref());
            store.save_clients(engine.clients())?;
            println!("{}  {}", client.id, client.name);
        }

        Commands::AddEvent {
            client,
            name,
            zip,
            date,
            time,
            notes,
            inactive,
            id,
        } => {
            let form = EventForm {
                client_id: client,
                event_name: name,
                zip_code: zip,
                event_date: date,
                event_time: time,
                notes,
                is_active: !inactive,
            };
            let outcome = engine.create_or_update_event(&form, id.as_deref())?;
            store.save_events(engine.events())?;
            for conflict_id in &outcome.advisories {
                let detail = engine
                    .event(conflict_id)
                    .map(|e| format!("{} ({})", e.event_name, e.event_date))
                    .unwrap_or_else(|| conflict_id.clone());
                warn!("Scheduling advisory: conflicts with {detail}");
            }
            println!("{}  {}", outcome.event.id, outcome.event.event_name);
        }

        Commands::Toggle { kind, id } => {
            if engine.toggle_active(kind.into(), &id) {
                store.save_clients(engine.clients())?;
                store.save_events(engine.events())?;
                println!("toggled {id}");
            } else {
                println!("no {} with id {id}", EntityKind::from(kind).as_str());
            }
        }

        Commands::DeleteClient { id } => {
            let removed = engine.delete_client(&id);
            store.save_clients(engine.clients())?;
            store.save_events(engine.events())?;
            println!("deleted client {id} and {removed} event(s)");
        }

        Commands::DeleteEvent { id } => {
            engine.delete_event(&id);
            store.save_events(engine.events())?;
            println!("deleted event {id}");
        }

        Commands::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let report = engine.import_clients(&text);
            store.save_clients(engine.clients())?;
            println!(
                "imported {} client(s), skipped {} row(s)",
                report.clients.len(),
                report.skipped_rows
            );
        }

        Commands::Export { out } => {
            let text = engine.export_clients();
            match out {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("exported {} client(s) to {}", engine.clients().len(), path.display());
                }
                None => println!("{text}"),
            }
        }
    }

    Ok(())
}
