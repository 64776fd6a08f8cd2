//! `mfgsim inventory` command - show stock before manufacturing

use miette::{IntoDiagnostic, Result};

use crate::cli::output::render_inventory;
use crate::cli::{DataArgs, GlobalOpts, OutputFormat};
use crate::core::config::Config;

use super::utils::{load_inputs, resolve_format};

#[derive(clap::Args, Debug)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

pub fn run(args: InventoryArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let (inventory, _) = load_inputs(&args.data, &config)?;
    let snapshot = inventory.snapshot();

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot).into_diagnostic()?);
        }
        format => print!("{}", render_inventory(&snapshot, format)),
    }
    Ok(())
}
