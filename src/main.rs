//! nacfacts: collects switch facts (MAC tables, LLDP neighbors, interfaces,
//! device identity), classifies every port, and exports an Excel workbook
//! recommending which ports to exclude from an 802.1x NAC rollout.

mod classify;
mod collector;
mod facts;
mod inventory;
mod oui;
mod report;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use futures::future::join_all;

use classify::RuleConfig;
use collector::{FactsSource, SnapshotSource};
use inventory::{HostFilter, Inventory};
use oui::{OuiDb, VendorLookup};
use report::{HostFailure, HostReport, LldpRow};

#[derive(Parser)]
#[command(name = "nacfacts")]
#[command(about = "Collect switch facts and recommend 802.1x NAC port exclusions")]
struct Cli {
    /// Path to the TOML host inventory
    #[arg(long, default_value = "inventory.toml")]
    inventory: PathBuf,

    /// Directory of per-host JSON fact snapshots
    #[arg(long, default_value = "snapshots")]
    snapshots: PathBuf,

    /// Optional TOML rule configuration (keywords, capabilities, prefixes)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Only hosts at this site
    #[arg(long)]
    site: Option<String>,

    /// Only hosts with this role
    #[arg(long)]
    role: Option<String>,

    /// Only this one inventory host
    #[arg(long)]
    host: Option<String>,

    /// Grouping label used in the workbook filename
    #[arg(long, default_value = "Grouping1")]
    group: String,

    /// Output workbook path; overrides the generated name
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let inventory = Inventory::load(&cli.inventory)?;
    let filter = HostFilter {
        site: cli.site.clone(),
        role: cli.role.clone(),
        name: cli.host.clone(),
    };
    let hosts = inventory.select(&filter);
    if hosts.is_empty() {
        bail!("no inventory hosts match the given filters");
    }

    let rules = match &cli.rules {
        Some(path) => RuleConfig::load(path)?,
        None => RuleConfig::default(),
    };
    let oui = OuiDb::load()?;

    let names: Vec<&str> = hosts.iter().map(|h| h.name.as_str()).collect();
    println!(
        "{} - collecting from {} inventory hosts: {:?}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        hosts.len(),
        names
    );

    let source = Arc::new(SnapshotSource::new(cli.snapshots.clone()));
    let started = Instant::now();
    let collection = join_all(hosts.into_iter().map(|host| {
        let source = Arc::clone(&source);
        tokio::task::spawn_blocking(move || {
            let result = source.collect(&host);
            (host, result)
        })
    }))
    .await;
    println!("Done collecting, took {:.2?}", started.elapsed());

    let mut reports: Vec<HostReport> = Vec::new();
    let mut failures: Vec<HostFailure> = Vec::new();
    for joined in collection {
        let (host, result) = joined.context("collection task panicked")?;
        match result {
            Ok(collected) => {
                println!("Processing host {}", collected.host);
                let classification = classify::classify_host(
                    &collected.host,
                    &collected.mac_table,
                    &collected.lldp_neighbors,
                    &collected.interfaces,
                    &rules,
                    &oui,
                );
                let lldp_rows = collected
                    .lldp_neighbors
                    .iter()
                    .map(|neighbor| LldpRow {
                        neighbor: neighbor.clone(),
                        remote_vendor: oui.lookup_or_unknown(&neighbor.remote_chassis_id),
                    })
                    .collect();
                reports.push(HostReport {
                    facts: collected,
                    lldp_rows,
                    classification,
                });
            }
            Err(e) => {
                eprintln!("{e}; host removed from the run");
                failures.push(HostFailure {
                    host: host.name,
                    hostname: host.hostname,
                    error: e.to_string(),
                });
            }
        }
    }

    let excluded: usize = reports
        .iter()
        .map(|report| report.classification.exclusions.len())
        .sum();
    println!(
        "{excluded} port exclusion recommendations across {} hosts",
        reports.len()
    );

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("NACFACTS - {}.xlsx", cli.group)));
    report::write_workbook(&output, &reports, &failures).with_context(|| {
        format!(
            "failed to save {}; close it if open and check write access",
            output.display()
        )
    })?;
    println!("Workbook created: {}", output.display());

    if !failures.is_empty() {
        let failed: Vec<&str> = failures.iter().map(|f| f.host.as_str()).collect();
        println!("The following switches failed during collection and carry no rows: {failed:?}");
    }

    Ok(())
}
