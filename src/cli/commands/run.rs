//! `mfgsim run` command - manufacture every requested unit and report

use console::style;
use log::info;
use miette::Result;
use std::path::PathBuf;

use crate::cli::output::{
    render_inventory, render_processes, render_report, render_run_json, write_output,
};
use crate::cli::{DataArgs, GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::coordinator::manufacture;
use crate::core::outcome::RandomOutcomes;

use super::utils::{load_inputs, resolve_format};

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Seed for manufacturing outcomes (reproducible runs)
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = resolve_format(global, &config);
    let (mut inventory, mut products) = load_inputs(&args.data, &config)?;

    if products.is_empty() && !global.quiet {
        eprintln!("{} No products to manufacture", style("!").yellow());
    }

    let mut outcomes = match args.seed.or(config.seed) {
        Some(seed) => {
            info!("Using outcome seed {}", seed);
            RandomOutcomes::seeded(seed)
        }
        None => RandomOutcomes::from_os(),
    };

    let run = manufacture(&mut products, &mut inventory, &mut outcomes);
    let report = run.report();
    let snapshot = inventory.snapshot();

    let content = match format {
        OutputFormat::Json => render_run_json(&snapshot, run.processes(), &products, &report)?,
        _ if global.quiet => render_report(&report, &products, format),
        _ => {
            let mut text = render_inventory(&snapshot, format);
            text.push('\n');
            text.push_str(&render_processes(run.processes(), format));
            text.push('\n');
            text.push_str(&render_report(&report, &products, format));
            text
        }
    };

    write_output(&content, args.output, global.quiet)
}
