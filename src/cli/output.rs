//! Report rendering - inventory, process states, and the final report
//!
//! Text output uses `tabled`; `--format json` produces a single document.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_amount, truncate_str};
use crate::cli::OutputFormat;
use crate::core::inventory::InventoryLine;
use crate::core::report::ProductionReport;
use crate::entities::process::{FailureType, ManufacturingProcess};
use crate::entities::product::Product;

const NAME_WIDTH: usize = 30;

/// Process summary row: product name and state label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessLine {
    pub product: String,
    pub state: String,
}

impl From<&ManufacturingProcess> for ProcessLine {
    fn from(process: &ManufacturingProcess) -> Self {
        Self {
            product: process.product_name().to_string(),
            state: process.state_name(),
        }
    }
}

/// Requested vs. completed units for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub product: String,
    pub requested: u32,
    pub completed: u32,
}

#[derive(Debug, Serialize)]
struct RunDocument<'a> {
    inventory: &'a [InventoryLine],
    processes: Vec<ProcessLine>,
    products: Vec<ProductLine>,
    report: &'a ProductionReport,
}

fn finish(builder: Builder, format: OutputFormat) -> String {
    let mut table = builder.build();
    match format {
        OutputFormat::Md => table.with(Style::markdown()),
        _ => table.with(Style::sharp()),
    };
    table.to_string()
}

pub fn render_inventory(lines: &[InventoryLine], format: OutputFormat) -> String {
    let mut output = String::from("=== INVENTORY DETAILS ===\n");
    if lines.is_empty() {
        output.push_str("(empty)\n");
        return output;
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Type", "Unit Cost", "Unit Weight", "Stock"]);
    for line in lines {
        builder.push_record([
            truncate_str(&line.name, NAME_WIDTH),
            line.category.clone(),
            format_amount(line.unit_cost),
            format_amount(line.unit_weight),
            format_amount(line.stock),
        ]);
    }
    output.push_str(&finish(builder, format));
    output.push('\n');
    output
}

pub fn render_processes(processes: &[ManufacturingProcess], format: OutputFormat) -> String {
    let mut output = String::from("=== PRODUCT MANUFACTURING STATES ===\n");
    if processes.is_empty() {
        output.push_str("(no units attempted)\n");
        return output;
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Product", "State"]);
    for (i, process) in processes.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            truncate_str(process.product_name(), NAME_WIDTH),
            process.state_name(),
        ]);
    }
    output.push_str(&finish(builder, format));
    output.push('\n');
    output
}

pub fn product_lines(products: &[Product], report: &ProductionReport) -> Vec<ProductLine> {
    products
        .iter()
        .map(|p| ProductLine {
            product: p.name().to_string(),
            requested: p.requested(),
            completed: report
                .product(p.name())
                .map_or(0, |s| s.units_completed),
        })
        .collect()
}

pub fn render_report(
    report: &ProductionReport,
    products: &[Product],
    format: OutputFormat,
) -> String {
    let mut output = String::from("=== FINAL REPORT ===\n");
    output.push_str("Manufactured Products:\n");

    let mut builder = Builder::default();
    builder.push_record(["Product", "Requested", "Completed", "Cost", "Weight"]);
    for line in product_lines(products, report) {
        let (cost, weight) = report
            .product(&line.product)
            .map_or((0.0, 0.0), |s| (s.total_cost, s.total_weight));
        builder.push_record([
            truncate_str(&line.product, NAME_WIDTH),
            line.requested.to_string(),
            line.completed.to_string(),
            format_amount(cost),
            format_amount(weight),
        ]);
    }
    output.push_str(&finish(builder, format));
    output.push_str("\n\n");

    for failure in FailureType::ALL {
        output.push_str(&format!(
            "Failures due to {:<18} {}\n",
            format!("{}:", failure.label()),
            report.failures.get(failure)
        ));
    }
    output
}

/// Full `run` output as one JSON document
pub fn render_run_json(
    inventory: &[InventoryLine],
    processes: &[ManufacturingProcess],
    products: &[Product],
    report: &ProductionReport,
) -> Result<String> {
    let document = RunDocument {
        inventory,
        processes: processes.iter().map(ProcessLine::from).collect(),
        products: product_lines(products, report),
        report,
    };
    let mut json = serde_json::to_string_pretty(&document).into_diagnostic()?;
    json.push('\n');
    Ok(json)
}

/// Write to a file when a path is given, otherwise to stdout
pub fn write_output(content: &str, output_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                println!(
                    "{} Report written to: {}",
                    style("✓").green(),
                    path.display()
                );
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
