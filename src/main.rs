// LeadTrack - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Lead store selection (file store or in-memory)
// 4. Dispatch to the leads / filter / add / catalog commands

use clap::{Parser, Subcommand};
use leadtrack::app::loader::ViewId;
use leadtrack::app::repository::{KvLeadRepository, LeadRepository};
use leadtrack::app::state::AppState;
use leadtrack::core::export;
use leadtrack::core::filter::{MatchMode, Predicate};
use leadtrack::core::model::{Lead, LeadField};
use leadtrack::platform::config::{self, AppConfig, OutputFormat, PlatformPaths};
use leadtrack::platform::store::{FileStore, MemoryStore};
use leadtrack::ui::table;
use leadtrack::util::constants;
use leadtrack::util::error::{ExportError, FilterError, LeadTrackError, Result};
use leadtrack::util::logging;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// LeadTrack - sales lead tracker.
///
/// Lists, searches, filters, and adds sales leads kept in a local store.
#[derive(Parser, Debug)]
#[command(name = "leadtrack", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the lead store (overrides config and platform default).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory containing config.toml (overrides the platform default).
    #[arg(long = "config-dir", global = true)]
    config_dir: Option<PathBuf>,

    /// Use an in-memory store; nothing is read from or written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List leads, optionally searching by name.
    Leads {
        /// Case-insensitive name search.
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        seed: SeedArgs,

        /// Output format: table, csv, or json.
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Filter leads by field conditions.
    Filter {
        /// Condition FIELD=VALUE, repeatable. Fields: Status, Source,
        /// Qualification, "Interest Field", "Assigned To".
        #[arg(short = 'w', long = "where", value_name = "FIELD=VALUE")]
        conditions: Vec<String>,

        /// Combine conditions with ALL (and) or ANY (or).
        #[arg(short, long, default_value = "all")]
        mode: String,

        #[command(flatten)]
        seed: SeedArgs,

        /// Output format: table, csv, or json.
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Add a lead to the store.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long, default_value = "New")]
        status: String,
        #[arg(long, default_value = "")]
        source: String,
        #[arg(long, default_value = "")]
        qualification: String,
        #[arg(long = "interest-field", default_value = "")]
        interest_field: String,
        #[arg(long = "assigned-to", default_value = "")]
        assigned_to: String,
        /// Display timestamp; defaults to now, e.g. "May 22, 2025 11:02 PM".
        #[arg(long = "updated-at")]
        updated_at: Option<String>,
    },

    /// Show the value catalog of one field, or of all fields.
    Catalog {
        field: Option<String>,
    },
}

/// Per-command override of the sample-lead policy.
#[derive(clap::Args, Debug)]
struct SeedArgs {
    /// Include the built-in sample leads.
    #[arg(long = "with-seed", conflicts_with = "no_seed")]
    with_seed: bool,

    /// Exclude the built-in sample leads.
    #[arg(long = "no-seed")]
    no_seed: bool,
}

impl SeedArgs {
    fn resolve(&self, default: bool) -> bool {
        if self.with_seed {
            true
        } else if self.no_seed {
            false
        } else {
            default
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());
    let (config, config_warnings) = config::load_config(&config_dir);

    logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::debug!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        ephemeral = cli.ephemeral,
        "LeadTrack starting"
    );

    let repository: Arc<dyn LeadRepository> = if cli.ephemeral {
        Arc::new(KvLeadRepository::new(MemoryStore::new()))
    } else {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(|| platform_paths.data_dir.clone());
        let store_dir = PlatformPaths::store_dir(&data_dir);
        tracing::debug!(store = %store_dir.display(), "Using file store");
        Arc::new(KvLeadRepository::new(FileStore::new(store_dir)))
    };

    match run(cli.command, &config, repository) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            match e {
                LeadTrackError::Filter(_)
                | LeadTrackError::Export(ExportError::UnknownFormat { .. }) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(command: Command, config: &AppConfig, repository: Arc<dyn LeadRepository>) -> Result<()> {
    match command {
        Command::Leads {
            search,
            seed,
            format,
        } => {
            let mut policy = config.seed_policy;
            policy.leads_view = seed.resolve(policy.leads_view);
            let mut state = AppState::new(repository, policy);

            if !state.focus_and_wait(ViewId::Leads) {
                eprintln!("Warning: timed out reading stored leads; nothing to show.");
            }
            if state.leads_view.load_recovered {
                eprintln!("Warning: stored leads could not be read; showing none of them.");
            }
            state.leads_view.search = search.unwrap_or_default();

            let visible: Vec<Lead> = state.leads_view.visible().into_iter().cloned().collect();
            tracing::info!(
                shown = visible.len(),
                total = state.leads_view.leads().len(),
                "Leads listed"
            );
            let format = output_format(format.as_deref(), config)?;
            write_leads(&visible, format, "No leads found.")
        }

        Command::Filter {
            conditions,
            mode,
            seed,
            format,
        } => {
            let mode = MatchMode::parse(&mode)?;
            let rows = conditions
                .iter()
                .map(|c| Predicate::parse(c))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            for row in &rows {
                if let Some(field) = row.field {
                    if !row.value.is_empty() && !field.is_catalog_value(&row.value) {
                        tracing::warn!(
                            field = %field,
                            value = %row.value,
                            "Value is not in the field's catalog"
                        );
                    }
                }
            }

            let mut policy = config.seed_policy;
            policy.filter_view = seed.resolve(policy.filter_view);
            let mut state = AppState::new(repository, policy);

            if !state.focus_and_wait(ViewId::Filter) {
                eprintln!("Warning: timed out reading stored leads; filtering an empty list.");
            }
            if state.filter_view.load_recovered {
                eprintln!("Warning: stored leads could not be read; filtering an empty list.");
            }

            let view = &mut state.filter_view;
            // No conditions keeps the view's initial single unset row.
            if !rows.is_empty() {
                view.set_rows(rows);
            }
            view.set_mode(mode);
            let filter = view.filter_set();
            let results = view.apply().to_vec();

            tracing::info!(
                matched = results.len(),
                total = view.leads().len(),
                "Filter applied"
            );
            let format = output_format(format.as_deref(), config)?;
            if format == OutputFormat::Table {
                println!("{}", table::describe_filter(&filter));
                println!();
            }
            write_leads(&results, format, "No leads match your filters.")
        }

        Command::Add {
            name,
            contact,
            status,
            source,
            qualification,
            interest_field,
            assigned_to,
            updated_at,
        } => {
            let lead = Lead {
                name,
                contact,
                status,
                source,
                qualification,
                interest_field,
                assigned_to,
                updated_at: updated_at.unwrap_or_else(|| {
                    chrono::Local::now()
                        .format(constants::UPDATED_AT_FORMAT)
                        .to_string()
                }),
            };
            for field in LeadField::all() {
                let value = field.get(&lead);
                if !value.is_empty() && !field.is_catalog_value(value) {
                    eprintln!(
                        "Note: {} \"{value}\" is not one of the standard values.",
                        field.label()
                    );
                }
            }

            let total = repository.append(lead)?;
            println!("Lead added ({total} stored).");
            Ok(())
        }

        Command::Catalog { field } => {
            let field = match field {
                Some(input) => Some(
                    LeadField::parse(&input).ok_or(FilterError::UnknownField { input })?,
                ),
                None => None,
            };
            print!("{}", table::render_catalog(field));
            Ok(())
        }
    }
}

fn output_format(flag: Option<&str>, config: &AppConfig) -> Result<OutputFormat> {
    match flag {
        None => Ok(config.output_format),
        Some(input) => OutputFormat::parse(input).ok_or_else(|| {
            ExportError::UnknownFormat {
                input: input.to_string(),
            }
            .into()
        }),
    }
}

fn write_leads(leads: &[Lead], format: OutputFormat, empty_message: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            let rendered = table::render_leads(leads, empty_message);
            out.write_all(rendered.as_bytes())
                .map_err(|source| ExportError::Io {
                    target: "stdout".to_string(),
                    source,
                })?;
        }
        OutputFormat::Csv => {
            export::export_csv(leads, &mut out, "stdout")?;
        }
        OutputFormat::Json => {
            export::export_json(leads, &mut out, "stdout")?;
        }
    }
    Ok(())
}
