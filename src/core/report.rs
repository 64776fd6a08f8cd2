//! Production report - read-side fold over finished processes

use serde::Serialize;

use crate::entities::process::{FailureType, ManufacturingProcess};

/// Completed units of one product with cumulative cost and weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product: String,
    pub units_completed: u32,
    pub total_cost: f64,
    pub total_weight: f64,
}

/// Failure tallies by cause, serialized under the failure labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FailureCounts {
    #[serde(rename = "System Error")]
    pub system_error: u32,
    #[serde(rename = "Damaged Component")]
    pub damaged_component: u32,
    #[serde(rename = "Stock Shortage")]
    pub stock_shortage: u32,
}

impl FailureCounts {
    pub fn get(&self, failure: FailureType) -> u32 {
        match failure {
            FailureType::SystemError => self.system_error,
            FailureType::DamagedComponent => self.damaged_component,
            FailureType::StockShortage => self.stock_shortage,
        }
    }

    fn record(&mut self, failure: FailureType) {
        match failure {
            FailureType::SystemError => self.system_error += 1,
            FailureType::DamagedComponent => self.damaged_component += 1,
            FailureType::StockShortage => self.stock_shortage += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.system_error + self.damaged_component + self.stock_shortage
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionReport {
    /// Products with at least one completed unit, in order of first completion
    pub products: Vec<ProductSummary>,
    pub failures: FailureCounts,
}

impl ProductionReport {
    pub fn from_processes(processes: &[ManufacturingProcess]) -> Self {
        let mut report = ProductionReport::default();

        for process in processes {
            if let Some(failure) = process.failure_type() {
                report.failures.record(failure);
                continue;
            }
            if !process.is_completed() {
                continue;
            }

            let idx = match report
                .products
                .iter()
                .position(|s| s.product == process.product_name())
            {
                Some(idx) => idx,
                None => {
                    report.products.push(ProductSummary {
                        product: process.product_name().to_string(),
                        units_completed: 0,
                        total_cost: 0.0,
                        total_weight: 0.0,
                    });
                    report.products.len() - 1
                }
            };
            let summary = &mut report.products[idx];
            summary.units_completed += 1;
            summary.total_cost += process.unit_cost();
            summary.total_weight += process.unit_weight();
        }

        report
    }

    pub fn product(&self, name: &str) -> Option<&ProductSummary> {
        self.products.iter().find(|s| s.product == name)
    }

    pub fn units_completed(&self) -> u32 {
        self.products.iter().map(|s| s.units_completed).sum()
    }
}
