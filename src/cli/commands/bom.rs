//! `mfgsim bom` command - bill of materials with cost and weight rollup

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::format_amount;
use crate::cli::{DataArgs, GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::entities::component::Component;
use crate::entities::product::{Product, Requirement};

use super::utils::{load_inputs, resolve_format};

#[derive(clap::Args, Debug)]
pub struct BomArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Only show this product
    pub product: Option<String>,
}

#[derive(Debug, Serialize)]
struct BomLine {
    component: String,
    quantity: f64,
    line_cost: f64,
    line_weight: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<BomLine>,
}

#[derive(Debug, Serialize)]
struct BomDocument {
    product: String,
    requested: u32,
    unit_cost: f64,
    unit_weight: f64,
    lines: Vec<BomLine>,
}

fn bom_lines(requirements: &[Requirement]) -> Vec<BomLine> {
    requirements
        .iter()
        .map(|req| BomLine {
            component: req.component.name().to_string(),
            quantity: req.quantity,
            line_cost: req.component.total_cost() * req.quantity,
            line_weight: req.component.total_weight() * req.quantity,
            children: match &req.component {
                Component::Composite(p) => bom_lines(p.requirements()),
                Component::Basic(_) => Vec::new(),
            },
        })
        .collect()
}

/// Indented BOM tree, one line per requirement
pub fn render_tree(product: &Product) -> String {
    fn push_lines(output: &mut String, requirements: &[Requirement], indent: usize) {
        let prefix = "│  ".repeat(indent);
        for (i, req) in requirements.iter().enumerate() {
            let branch = if i == requirements.len() - 1 {
                "└─ "
            } else {
                "├─ "
            };
            output.push_str(&format!(
                "{}{}{} (qty: {}) cost {} weight {}\n",
                prefix,
                branch,
                req.component.name(),
                req.quantity,
                format_amount(req.component.total_cost() * req.quantity),
                format_amount(req.component.total_weight() * req.quantity),
            ));
            if let Component::Composite(sub) = &req.component {
                push_lines(output, sub.requirements(), indent + 1);
            }
        }
    }

    let mut output = format!("{}\n", product);
    push_lines(&mut output, product.requirements(), 0);
    output
}

pub fn run(args: BomArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let (_, products) = load_inputs(&args.data, &config)?;

    let selected: Vec<&Product> = match &args.product {
        Some(name) => {
            let found: Vec<&Product> = products.iter().filter(|p| p.name() == name.as_str()).collect();
            if found.is_empty() {
                return Err(miette::miette!("Product '{}' not found", name));
            }
            found
        }
        None => products.iter().collect(),
    };

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            let docs: Vec<BomDocument> = selected
                .iter()
                .map(|p| BomDocument {
                    product: p.name().to_string(),
                    requested: p.requested(),
                    unit_cost: p.total_cost(),
                    unit_weight: p.total_weight(),
                    lines: bom_lines(p.requirements()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&docs).into_diagnostic()?);
        }
        format => {
            for product in selected {
                if format == OutputFormat::Md {
                    println!("```");
                }
                print!("{}", render_tree(product));
                if format == OutputFormat::Md {
                    println!("```");
                }
                println!();
            }
        }
    }
    Ok(())
}
