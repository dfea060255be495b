//! # CLI Module
//!
//! Command implementations for the capsim binary.
//!
//! Commands are plain functions over explicit arguments so integration
//! tests can drive them without spawning the binary. All file I/O lives
//! here; the engine stays pure.
//!
//! The table file is plain JSON. A missing file is not an error for
//! read-style commands: they start from the template table, matching a
//! fresh modeling session.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use capsim_core::formats::{decode_snapshot, encode_snapshot, FormatError};
use capsim_core::{
    simulate_round, CapTable, FundingRound, Reporter, RoundError, Stakeholder, StakeholderKind,
    TableError,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] FormatError),
    #[error("table file {} already exists (run init --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
    #[error("unknown export format: {0} (expected canonical or json)")]
    UnknownFormat(String),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Round(#[from] RoundError),
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

/// Cap-table dilution modeling.
#[derive(Debug, Parser)]
#[command(name = "capsim", version, about = "Cap-table dilution modeling")]
pub struct Cli {
    /// Path to the cap-table JSON file.
    #[arg(short, long, global = true, default_value = "captable.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a fresh template cap table.
    Init {
        /// Overwrite an existing table file.
        #[arg(long)]
        force: bool,
    },
    /// Print the current ownership picture.
    Show {
        /// Emit JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Add a stakeholder to the table.
    Add {
        /// Display name of the new stakeholder.
        name: String,
        /// Stakeholder kind: founder, employee, advisor, or investor.
        #[arg(long)]
        kind: StakeholderKind,
        /// Share count to record.
        #[arg(long)]
        shares: u64,
        /// Also grow the total share count by the new shares instead of
        /// drawing on unallocated stock.
        #[arg(long)]
        issue: bool,
    },
    /// Simulate a funding round against the table.
    Round {
        /// Round name, e.g. "Seed" or "Series A".
        name: String,
        /// Pre-money valuation in dollars.
        #[arg(long)]
        pre_money: f64,
        /// Investment amount in dollars.
        #[arg(long)]
        investment: f64,
        /// Target post-round ESOP pool percentage. Defaults to the
        /// current pool, which keeps the pool from shrinking.
        #[arg(long)]
        esop: Option<f64>,
        /// Emit the full outcome as JSON instead of the text report.
        #[arg(long)]
        json: bool,
        /// Write the post-round table back to the table file.
        #[arg(long)]
        apply: bool,
        /// Write the post-round table to this path instead.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run strict validation on the table.
    Check {
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Snapshot the table to a file.
    Export {
        /// Destination path.
        out: PathBuf,
        /// Snapshot format: canonical or json.
        #[arg(long, default_value = "canonical")]
        format: String,
    },
    /// Replace the table with a canonical snapshot's contents.
    Import {
        /// Snapshot file produced by export.
        snapshot: PathBuf,
    },
    /// Serve the what-if HTTP API.
    Serve {
        /// Listen address.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.file, force),
        Command::Show { json } => cmd_show(&cli.file, json),
        Command::Add {
            name,
            kind,
            shares,
            issue,
        } => cmd_add(&cli.file, &name, kind, shares, issue),
        Command::Round {
            name,
            pre_money,
            investment,
            esop,
            json,
            apply,
            output,
        } => cmd_round(
            &cli.file,
            &name,
            pre_money,
            investment,
            esop,
            json,
            apply,
            output.as_deref(),
        ),
        Command::Check { json } => cmd_check(&cli.file, json),
        Command::Export { out, format } => cmd_export(&cli.file, &out, &format),
        Command::Import { snapshot } => cmd_import(&cli.file, &snapshot),
        Command::Serve { addr } => crate::api::serve(&addr).await,
    }
}

// =============================================================================
// TABLE FILE I/O
// =============================================================================

/// Load the table file, or start from the template when it is missing.
pub fn load_or_create_table(path: &Path) -> Result<CapTable, CliError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no table file, starting from template");
            Ok(CapTable::template())
        }
        Err(err) => Err(err.into()),
    }
}

/// Write the table file as pretty JSON.
pub fn save_table(table: &CapTable, path: &Path) -> Result<(), CliError> {
    let mut contents = serde_json::to_string_pretty(table)?;
    contents.push('\n');
    std::fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), "table saved");
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// `init`: write the template table to the table file.
pub fn cmd_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path.to_path_buf()));
    }
    let table = CapTable::template();
    save_table(&table, path)?;
    println!("Initialized {} with the template table", path.display());
    Ok(())
}

/// `show`: print the current ownership picture.
pub fn cmd_show(path: &Path, json: bool) -> Result<(), CliError> {
    let table = load_or_create_table(path)?;
    let snapshot = table.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", Reporter::table_text(&snapshot));
    }
    Ok(())
}

/// `add`: append a stakeholder, minting a fresh id.
pub fn cmd_add(
    path: &Path,
    name: &str,
    kind: StakeholderKind,
    shares: u64,
    issue: bool,
) -> Result<(), CliError> {
    let mut table = load_or_create_table(path)?;
    let id = Uuid::new_v4().to_string();
    table
        .stakeholders
        .push(Stakeholder::new(id.as_str(), name, kind, shares));
    if issue {
        table.total_shares = table.total_shares.saturating_add(shares);
    }
    // Adding is permissive; `check` is the strict gate. Still worth a
    // heads-up when the table stops adding up.
    if let Err(err) = table.validate() {
        tracing::warn!("table now fails strict checks: {err}");
    }
    save_table(&table, path)?;
    println!("Added {name} ({kind}, {shares} shares) as {id}");
    Ok(())
}

/// `round`: simulate a funding round, optionally applying the result.
pub fn cmd_round(
    path: &Path,
    name: &str,
    pre_money: f64,
    investment: f64,
    esop: Option<f64>,
    json: bool,
    apply: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let table = load_or_create_table(path)?;
    let new_esop_pct = esop.unwrap_or(table.esop_pool_pct);
    let round = FundingRound::new(name, pre_money, investment, new_esop_pct);
    // CLI input gets the strict treatment; the engine itself would accept
    // anything and degrade to zeros.
    round.validate()?;

    let outcome = simulate_round(&table, &round);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", Reporter::round_text(&outcome));
    }

    if apply || output.is_some() {
        let target = output.unwrap_or(path);
        save_table(&outcome.post_table(), target)?;
        println!("Applied {name} to {}", target.display());
    }
    Ok(())
}

/// `check`: strict validation, nonzero exit on failure.
pub fn cmd_check(path: &Path, json: bool) -> Result<(), CliError> {
    let table = load_or_create_table(path)?;
    table.validate()?;
    if json {
        println!("{}", json!({ "ok": true }));
    } else {
        println!(
            "Table ok: {} stakeholders, {} total shares",
            table.stakeholders.len(),
            table.total_shares
        );
    }
    Ok(())
}

/// `export`: snapshot the table to a file.
pub fn cmd_export(path: &Path, out: &Path, format: &str) -> Result<(), CliError> {
    let table = load_or_create_table(path)?;
    match format {
        "canonical" => {
            let bytes = encode_snapshot(&table)?;
            std::fs::write(out, bytes)?;
        }
        "json" => {
            let mut contents = serde_json::to_string_pretty(&table)?;
            contents.push('\n');
            std::fs::write(out, contents)?;
        }
        other => return Err(CliError::UnknownFormat(other.to_string())),
    }
    println!("Exported {} snapshot to {}", format, out.display());
    Ok(())
}

/// `import`: replace the table file with a canonical snapshot's contents.
pub fn cmd_import(path: &Path, snapshot: &Path) -> Result<(), CliError> {
    let bytes = std::fs::read(snapshot)?;
    let table = decode_snapshot(&bytes)?;
    save_table(&table, path)?;
    println!(
        "Imported {} stakeholders from {}",
        table.stakeholders.len(),
        snapshot.display()
    );
    Ok(())
}
