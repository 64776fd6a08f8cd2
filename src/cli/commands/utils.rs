//! Shared utilities for CLI commands

use clap::ValueEnum;
use console::style;
use log::{info, warn};
use miette::Result;

use crate::cli::{DataArgs, GlobalOpts, OutputFormat};
use crate::core::config::{parse_delimiter, Config};
use crate::core::inventory::Inventory;
use crate::core::loader::DataLoader;
use crate::entities::product::Product;

/// Build a loader from command-line flags layered over the config
pub fn data_loader(data: &DataArgs, config: &Config) -> Result<DataLoader> {
    let delimiter = match &data.delimiter {
        Some(value) => parse_delimiter(value)?,
        None => config.delimiter_byte()?,
    };
    let components = data
        .components
        .clone()
        .unwrap_or_else(|| config.components_path());
    let products = data
        .products
        .clone()
        .unwrap_or_else(|| config.products_path());

    Ok(DataLoader::new(components, products).with_delimiter(delimiter))
}

/// Load components into a fresh inventory and resolve the products against it
pub fn load_inputs(data: &DataArgs, config: &Config) -> Result<(Inventory, Vec<Product>)> {
    let loader = data_loader(data, config)?;

    let components = loader.load_components()?;
    let inventory = Inventory::from_components(components);
    let products = loader.load_products(&inventory.lookup())?;

    info!(
        "Loaded {} components from {} and {} products from {}",
        inventory.len(),
        loader.components_file().display(),
        products.len(),
        loader.products_file().display()
    );
    if inventory.is_empty() {
        warn!("No components loaded from {}", loader.components_file().display());
    }

    Ok((inventory, products))
}

/// Output format: explicit flag, then config `default_format`, then text
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    match config.default_format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
            eprintln!(
                "{} Unknown default_format '{}' in config, using text",
                style("!").yellow(),
                name
            );
            OutputFormat::Auto
        }),
        None => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: 0,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_yaml_str("components: cfg.csv\ndelimiter: \",\"\n", "test").unwrap();
        let data = DataArgs {
            components: Some(PathBuf::from("flag.csv")),
            products: None,
            delimiter: None,
        };
        let loader = data_loader(&data, &config).unwrap();
        assert_eq!(loader.components_file(), PathBuf::from("flag.csv").as_path());
        assert_eq!(loader.products_file(), PathBuf::from("products.csv").as_path());
    }

    #[test]
    fn test_bad_delimiter_flag() {
        let data = DataArgs {
            delimiter: Some("::".to_string()),
            ..Default::default()
        };
        assert!(data_loader(&data, &Config::default()).is_err());
    }

    #[test]
    fn test_resolve_format() {
        let mut config = Config::default();
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Auto);

        config.default_format = Some("json".to_string());
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Json);
        assert_eq!(resolve_format(&global(OutputFormat::Md), &config), OutputFormat::Md);
    }
}
