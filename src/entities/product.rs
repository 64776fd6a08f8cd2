//! Product entity - a composite manufactured from a bill of materials

use std::fmt;

use crate::entities::component::Component;

/// BOM line item - a component snapshot with the amount needed per product unit
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub component: Component,
    pub quantity: f64,
}

/// A product built from basic components and/or other products
///
/// `requested` is the number of units asked for and is never touched by a
/// production run. `quantity` counts finished units: the coordinator resets it
/// before a run and the completed state bumps it once per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    requirements: Vec<Requirement>,
    requested: u32,
    quantity: u32,
}

impl Product {
    /// Create a product with an empty bill of materials
    pub fn new(name: impl Into<String>, requested: u32) -> Self {
        Self {
            name: name.into(),
            requirements: Vec::new(),
            requested,
            quantity: 0,
        }
    }

    /// Builder form of [`Product::add_requirement`]
    pub fn with_requirement(mut self, component: impl Into<Component>, quantity: f64) -> Self {
        self.add_requirement(component, quantity);
        self
    }

    /// Add a BOM line, replacing any existing line for the same component
    pub fn add_requirement(&mut self, component: impl Into<Component>, quantity: f64) {
        let component = component.into();
        match self
            .requirements
            .iter_mut()
            .find(|r| r.component.name() == component.name())
        {
            Some(existing) => {
                existing.component = component;
                existing.quantity = quantity;
            }
            None => self.requirements.push(Requirement {
                component,
                quantity,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Units asked for when the product was loaded
    pub fn requested(&self) -> u32 {
        self.requested
    }

    /// Finished units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Cost of one unit
    pub fn total_cost(&self) -> f64 {
        self.requirements
            .iter()
            .map(|r| r.component.total_cost() * r.quantity)
            .sum()
    }

    /// Weight of one unit
    pub fn total_weight(&self) -> f64 {
        self.requirements
            .iter()
            .map(|r| r.component.total_weight() * r.quantity)
            .sum()
    }

    pub fn increase_quantity(&mut self) {
        self.quantity += 1;
    }

    pub fn reset_quantity(&mut self) {
        self.quantity = 0;
    }

    /// Consume finished units. A fractional amount uses up a whole unit.
    pub fn decrease_quantity(&mut self, amount: f64) {
        let remaining = (f64::from(self.quantity) - amount).max(0.0);
        self.quantity = remaining.floor() as u32;
    }

    /// Inventory entry for a single finished unit of this product
    pub(crate) fn finished_unit(&self) -> Product {
        Product {
            name: self.name.clone(),
            requirements: self.requirements.clone(),
            requested: 0,
            quantity: 1,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Product: {} | Quantity to Manufacture: {}",
            self.name, self.requested
        )?;
        writeln!(f, "Requirements:")?;
        for req in &self.requirements {
            writeln!(f, "  - {}: {}", req.component.name(), req.quantity)?;
        }
        write!(
            f,
            "Total Cost (per unit): {:.2} | Total Weight (per unit): {:.2}",
            self.total_cost(),
            self.total_weight()
        )
    }
}
