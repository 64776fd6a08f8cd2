//! Inventory - name to component registry with stock mutation
//!
//! Entries keep their insertion order so snapshots are deterministic.
//! All stock deductions go through [`Inventory::remove_stock`].

use log::{debug, trace};
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::component::{BasicComponent, Component};
use crate::entities::product::Product;

/// One row of an inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub name: String,
    pub category: String,
    pub unit_cost: f64,
    pub unit_weight: f64,
    pub stock: f64,
}

impl From<&Component> for InventoryLine {
    fn from(component: &Component) -> Self {
        Self {
            name: component.name().to_string(),
            category: component.category().to_string(),
            unit_cost: component.total_cost(),
            unit_weight: component.total_weight(),
            stock: component.stock_quantity(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<Component>,
    index: HashMap<String, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from loaded basic components
    pub fn from_components(components: impl IntoIterator<Item = BasicComponent>) -> Self {
        let mut inventory = Self::new();
        for component in components {
            inventory.add_component(component);
        }
        inventory
    }

    /// Insert or overwrite by name. An overwrite keeps its slot.
    pub fn add_component(&mut self, component: impl Into<Component>) {
        let component = component.into();
        match self.index.get(component.name()) {
            Some(&idx) => self.entries[idx] = component,
            None => {
                self.index
                    .insert(component.name().to_string(), self.entries.len());
                self.entries.push(component);
            }
        }
    }

    pub fn get_component(&self, name: &str) -> Option<&Component> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    fn get_component_mut(&mut self, name: &str) -> Option<&mut Component> {
        match self.index.get(name) {
            Some(&idx) => Some(&mut self.entries[idx]),
            None => None,
        }
    }

    /// Units on hand for `name`; zero when unknown
    pub fn available(&self, name: &str) -> f64 {
        self.get_component(name)
            .map_or(0.0, Component::stock_quantity)
    }

    /// Deduct stock. Unknown names are ignored.
    pub fn remove_stock(&mut self, name: &str, quantity: f64) {
        if let Some(component) = self.get_component_mut(name) {
            component.decrease_quantity(quantity);
            trace!(
                "Removed {} of {} (now {})",
                quantity,
                name,
                component.stock_quantity()
            );
        }
    }

    /// Register one finished unit of `product` as available stock
    pub fn add_finished_unit(&mut self, product: &Product) {
        if let Some(Component::Composite(existing)) = self.get_component_mut(product.name()) {
            existing.increase_quantity();
            debug!(
                "Stocked finished {} (now {})",
                product.name(),
                existing.quantity()
            );
            return;
        }
        debug!("Stocked first finished unit of {}", product.name());
        self.add_component(product.finished_unit());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered view of every entry for reporting
    pub fn snapshot(&self) -> Vec<InventoryLine> {
        self.entries.iter().map(InventoryLine::from).collect()
    }

    /// Name to component lookup for resolving bills of materials
    pub fn lookup(&self) -> HashMap<String, Component> {
        self.entries
            .iter()
            .map(|c| (c.name().to_string(), c.clone()))
            .collect()
    }
}
