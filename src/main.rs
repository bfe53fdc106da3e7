//! Stormlab CLI — headless runner for the drainage network simulation engine

use clap::Parser;
use stormlab_core::network;
use stormlab_core::project::Project;
use stormlab_core::router::{self, NodeResult};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "stormlab-cli")]
#[command(version = "0.1.0")]
#[command(about = "Stormwater drainage network simulation", long_about = None)]
struct Cli {
    /// Path to the project JSON file
    project: PathBuf,

    /// Rainfall event id to simulate (defaults to the first event in the project)
    #[arg(long, value_name = "ID")]
    event: Option<String>,

    /// Emit results as JSON instead of a human-readable summary (omits full hydrographs)
    #[arg(long)]
    json: bool,

    /// Validate the project only; don't run a simulation
    #[arg(long)]
    validate: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(message) = run(cli) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    println!("Loading project from {}...", cli.project.display());
    let json = fs::read_to_string(&cli.project)
        .map_err(|e| format!("failed to read {}: {}", cli.project.display(), e))?;
    let project: Project =
        serde_json::from_str(&json).map_err(|e| format!("failed to parse project JSON: {}", e))?;

    let findings = network::validate(&project);
    if cli.validate {
        if findings.is_empty() {
            println!("Project is valid: {} nodes, {} links, {} events", project.nodes.len(), project.links.len(), project.events.len());
            return Ok(());
        } else {
            for finding in &findings {
                eprintln!("  - {}", finding);
            }
            return Err(format!("{} validation issue(s) found", findings.len()));
        }
    }
    if !findings.is_empty() {
        eprintln!("Warning: project has {} validation issue(s):", findings.len());
        for finding in &findings {
            eprintln!("  - {}", finding);
        }
    }

    let event_id = match &cli.event {
        Some(id) => id.clone(),
        None => project
            .events
            .first()
            .map(|e| e.id.clone())
            .ok_or_else(|| "project has no rainfall events".to_string())?,
    };

    println!("Running simulation for event '{}'...", event_id);
    let result = router::run_simulation(&project, &event_id).map_err(|e| e.to_string())?;

    if cli.json {
        print_json(&result)?;
    } else {
        print_summary(&project, &result.nodes);
    }

    Ok(())
}

fn print_json(result: &router::SimulationResult) -> Result<(), String> {
    // Omit full hydrograph arrays from the JSON payload per the CLI's contract.
    #[derive(serde::Serialize)]
    struct Row<'a> {
        #[serde(rename = "nodeId")]
        node_id: &'a str,
        #[serde(rename = "peakOutflow")]
        peak_outflow: f64,
        #[serde(rename = "peakOutflowTime")]
        peak_outflow_time: f64,
        volume: f64,
        #[serde(rename = "peakInflow", skip_serializing_if = "Option::is_none")]
        peak_inflow: Option<f64>,
        #[serde(rename = "peakStage", skip_serializing_if = "Option::is_none")]
        peak_stage: Option<f64>,
        #[serde(rename = "peakStorage", skip_serializing_if = "Option::is_none")]
        peak_storage: Option<f64>,
    }
    #[derive(serde::Serialize)]
    struct Output<'a> {
        #[serde(rename = "eventId")]
        event_id: &'a str,
        nodes: Vec<Row<'a>>,
    }

    let mut nodes: Vec<Row> = result
        .nodes
        .values()
        .map(|r| Row {
            node_id: &r.node_id,
            peak_outflow: r.peak_outflow,
            peak_outflow_time: r.peak_outflow_time,
            volume: r.volume,
            peak_inflow: r.peak_inflow,
            peak_stage: r.peak_stage,
            peak_storage: r.peak_storage,
        })
        .collect();
    nodes.sort_by(|a, b| a.node_id.cmp(b.node_id));

    let output = Output {
        event_id: &result.event_id,
        nodes,
    };
    let text = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

fn print_summary(project: &Project, results: &std::collections::HashMap<String, NodeResult>) {
    println!(
        "{:<20} {:>12} {:>10} {:>12} {:>12}",
        "Node", "Peak (cfs)", "Tp (hr)", "Vol (ac-ft)", "Stage (ft)"
    );
    for node in &project.nodes {
        if let Some(result) = results.get(&node.id) {
            let stage = result
                .peak_stage
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<20} {:>12.1} {:>10.2} {:>12.2} {:>12}",
                node.name, result.peak_outflow, result.peak_outflow_time, result.volume, stage
            );
        }
    }
}
