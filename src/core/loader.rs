//! CSV data loading
//!
//! Components file (`;`-separated, header row):
//!
//! ```text
//! name;unit_cost;unit_weight;type;stock
//! Steel;5,00;1,2;raw material;120 kg
//! ```
//!
//! Products file: product name first, quantity to manufacture last, one
//! column per component in between:
//!
//! ```text
//! product;Steel;Red Paint;quantity
//! Chair;2;0,5;10
//! ```
//!
//! Decimal commas are accepted. Rows that cannot be used are skipped with a
//! warning rather than aborting the load.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use miette::Diagnostic;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::component::{BasicComponent, Component};
use crate::entities::product::Product;

pub const DEFAULT_DELIMITER: u8 = b';';

/// Errors that stop a load entirely
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Cannot open {path}")]
    #[diagnostic(
        code(mfgsim::loader::io),
        help("check the path or set it in mfgsim.yaml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}")]
    #[diagnostic(code(mfgsim::loader::csv))]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Loads component and product records from a pair of CSV files
#[derive(Debug, Clone)]
pub struct DataLoader {
    components_file: PathBuf,
    products_file: PathBuf,
    delimiter: u8,
}

impl DataLoader {
    pub fn new(components_file: impl Into<PathBuf>, products_file: impl Into<PathBuf>) -> Self {
        Self {
            components_file: components_file.into(),
            products_file: products_file.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn components_file(&self) -> &Path {
        &self.components_file
    }

    pub fn products_file(&self) -> &Path {
        &self.products_file
    }

    pub fn load_components(&self) -> Result<Vec<BasicComponent>, LoadError> {
        let file = open(&self.components_file)?;
        read_components(file, self.delimiter).map_err(|source| LoadError::Csv {
            path: self.components_file.clone(),
            source,
        })
    }

    /// Load products, resolving BOM columns through `lookup`
    pub fn load_products(
        &self,
        lookup: &HashMap<String, Component>,
    ) -> Result<Vec<Product>, LoadError> {
        let file = open(&self.products_file)?;
        read_products(file, self.delimiter, lookup).map_err(|source| LoadError::Csv {
            path: self.products_file.clone(),
            source,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn reader<R: Read>(input: R, delimiter: u8) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Parse a number, accepting a decimal comma. Anything unparseable or
/// non-finite (`NaN`, `inf`) reads as 0.
pub fn parse_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a stock figure, ignoring units and other non-numeric characters
pub fn parse_stock(value: &str) -> f64 {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    parse_number(&digits)
}

/// Read component records from any CSV source
pub fn read_components<R: Read>(input: R, delimiter: u8) -> Result<Vec<BasicComponent>, csv::Error> {
    let mut rdr = reader(input, delimiter);
    let mut components = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        let record = result?;

        if record.len() < 5 {
            warn!(
                "Components row {}: expected 5 columns, found {}; skipped",
                row_num,
                record.len()
            );
            continue;
        }
        let name = field(&record, 0);
        if name.is_empty() {
            warn!("Components row {}: missing name; skipped", row_num);
            continue;
        }

        components.push(BasicComponent::new(
            name,
            parse_number(field(&record, 1)),
            parse_number(field(&record, 2)),
            field(&record, 3),
            parse_stock(field(&record, 4)),
        ));
    }

    debug!("Loaded {} components", components.len());
    Ok(components)
}

/// Read product records from any CSV source
///
/// BOM columns resolve against `lookup` first, then against products on
/// earlier rows, which is how nested products are declared.
pub fn read_products<R: Read>(
    input: R,
    delimiter: u8,
    lookup: &HashMap<String, Component>,
) -> Result<Vec<Product>, csv::Error> {
    let mut rdr = reader(input, delimiter);
    let headers = rdr.headers()?.clone();
    let mut products: Vec<Product> = Vec::new();

    'rows: for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        let record = result?;

        if record.len() < 2 {
            warn!("Products row {}: needs a name and a quantity; skipped", row_num);
            continue;
        }
        let name = field(&record, 0);
        if name.is_empty() {
            warn!("Products row {}: missing product name; skipped", row_num);
            continue;
        }
        if products.iter().any(|p| p.name() == name) {
            warn!("Products row {}: duplicate product {}; skipped", row_num, name);
            continue;
        }

        let requested = parse_number(field(&record, record.len() - 1)).max(0.0) as u32;
        let mut product = Product::new(name, requested);

        for col in 1..record.len() - 1 {
            let amount = parse_number(field(&record, col));
            if !amount.is_finite() || amount <= 0.0 {
                continue;
            }
            let column = headers.get(col).unwrap_or("").trim();
            let component = lookup.get(column).cloned().or_else(|| {
                products
                    .iter()
                    .find(|p| p.name() == column)
                    .cloned()
                    .map(Component::Composite)
            });
            match component {
                Some(component) => product.add_requirement(component, amount),
                None => {
                    warn!(
                        "Products row {}: {} needs unknown component '{}'; skipped",
                        row_num, name, column
                    );
                    continue 'rows;
                }
            }
        }

        products.push(product);
    }

    debug!("Loaded {} products", products.len());
    Ok(products)
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}
