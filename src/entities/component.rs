//! Component entity type - basic components (leaves) and the component sum type

use std::fmt;

use crate::entities::product::Product;

/// Round a stock value to two decimals
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A basic component - raw material, paint, or hardware kept in stock
#[derive(Debug, Clone, PartialEq)]
pub struct BasicComponent {
    name: String,
    unit_cost: f64,
    unit_weight: f64,
    category: String,
    stock_quantity: f64,
}

impl BasicComponent {
    /// Create a new basic component
    pub fn new(
        name: impl Into<String>,
        unit_cost: f64,
        unit_weight: f64,
        category: impl Into<String>,
        stock_quantity: f64,
    ) -> Self {
        Self {
            name: name.into(),
            unit_cost,
            unit_weight,
            category: category.into(),
            stock_quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn unit_weight(&self) -> f64 {
        self.unit_weight
    }

    /// Category label (e.g. "raw material", "paint")
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock_quantity(&self) -> f64 {
        self.stock_quantity
    }

    /// Subtract `amount` from stock, rounding the result to two decimals
    pub fn decrease_quantity(&mut self, amount: f64) {
        self.stock_quantity = round2(self.stock_quantity - amount);
    }
}

impl fmt::Display for BasicComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component: {} | Type: {} | Unit Cost: {:.2} | Unit Weight: {:.2} | Stock: {:.2}",
            self.name, self.category, self.unit_cost, self.unit_weight, self.stock_quantity
        )
    }
}

/// Anything that can appear in an inventory or a bill of materials
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Basic(BasicComponent),
    Composite(Product),
}

impl Component {
    pub fn name(&self) -> &str {
        match self {
            Component::Basic(c) => c.name(),
            Component::Composite(p) => p.name(),
        }
    }

    /// Cost of one unit, recursing through nested bills of materials
    pub fn total_cost(&self) -> f64 {
        match self {
            Component::Basic(c) => c.unit_cost(),
            Component::Composite(p) => p.total_cost(),
        }
    }

    /// Weight of one unit, recursing through nested bills of materials
    pub fn total_weight(&self) -> f64 {
        match self {
            Component::Basic(c) => c.unit_weight(),
            Component::Composite(p) => p.total_weight(),
        }
    }

    /// Units on hand: stock for basic components, finished units for products
    pub fn stock_quantity(&self) -> f64 {
        match self {
            Component::Basic(c) => c.stock_quantity(),
            Component::Composite(p) => f64::from(p.quantity()),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Component::Basic(c) => c.category(),
            Component::Composite(_) => "product",
        }
    }

    pub fn decrease_quantity(&mut self, amount: f64) {
        match self {
            Component::Basic(c) => c.decrease_quantity(amount),
            Component::Composite(p) => p.decrease_quantity(amount),
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Component::Basic(_))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Basic(c) => c.fmt(f),
            Component::Composite(p) => p.fmt(f),
        }
    }
}

impl From<BasicComponent> for Component {
    fn from(component: BasicComponent) -> Self {
        Component::Basic(component)
    }
}

impl From<Product> for Component {
    fn from(product: Product) -> Self {
        Component::Composite(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_component_creation() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 100.0);
        assert_eq!(steel.name(), "Steel");
        assert_eq!(steel.unit_cost(), 5.0);
        assert_eq!(steel.unit_weight(), 1.0);
        assert_eq!(steel.category(), "raw material");
        assert_eq!(steel.stock_quantity(), 100.0);
    }

    #[test]
    fn test_decrease_quantity_rounds_to_two_decimals() {
        let mut paint = BasicComponent::new("Red Paint", 2.0, 0.1, "paint", 1.0);
        paint.decrease_quantity(0.3);
        assert_eq!(paint.stock_quantity(), 0.7);
        paint.decrease_quantity(0.333);
        assert_eq!(paint.stock_quantity(), 0.37);
    }

    #[test]
    fn test_basic_totals_are_unit_values() {
        let component = Component::from(BasicComponent::new("Bolt", 0.25, 0.01, "hardware", 10.0));
        assert_eq!(component.total_cost(), 0.25);
        assert_eq!(component.total_weight(), 0.01);
        assert!(component.is_basic());
    }

    #[test]
    fn test_display_detail() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 12.5);
        assert_eq!(
            steel.to_string(),
            "Component: Steel | Type: raw material | Unit Cost: 5.00 | Unit Weight: 1.00 | Stock: 12.50"
        );
    }
}
