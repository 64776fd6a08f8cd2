//! `mfgsim template` command - print CSV templates for the input files

use clap::ValueEnum;
use console::style;
use miette::Result;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// Basic components with cost, weight, type, and stock
    Components,
    /// Products with one column per component and a quantity column
    Products,
}

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Which input file to generate
    #[arg(value_enum)]
    pub kind: TemplateKind,
}

/// Template rows for an input file, header first
pub fn template_rows(kind: TemplateKind) -> Vec<&'static str> {
    match kind {
        TemplateKind::Components => vec![
            "name;unit_cost;unit_weight;type;stock",
            "Steel;5,00;1,20;raw material;120 kg",
            "Oak;3,50;0,80;raw material;200 kg",
            "Red Paint;2,00;0,10;paint;15 l",
        ],
        TemplateKind::Products => vec![
            "product;Steel;Oak;Red Paint;quantity",
            "Chair;2;4;0,5;10",
            "Table;4;8;1;3",
        ],
    }
}

pub fn run(args: TemplateArgs) -> Result<()> {
    // Output to stdout (can be redirected to file)
    for row in template_rows(args.kind) {
        println!("{}", row);
    }

    // Print usage hint to stderr so it doesn't interfere with redirected output
    let name = match args.kind {
        TemplateKind::Components => "components",
        TemplateKind::Products => "products",
    };
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: mfgsim template {} > {}.csv",
        style("→").blue(),
        name,
        name
    );

    Ok(())
}
