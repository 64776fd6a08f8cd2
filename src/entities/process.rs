//! Manufacturing process - state machine for one product unit
//!
//! ```text
//! WaitingForStock --stock ok--> InManufacturing --success--> Completed
//!        |                            |
//!        +--shortage--> Failed <------+--system error / damaged component
//! ```
//!
//! Reaching `Completed` runs its entry action in the same step: the product's
//! finished counter is bumped and one unit is stocked in the inventory.
//! Terminal states ignore further `proceed` calls.

use log::debug;
use serde::Serialize;
use std::fmt;

use crate::core::inventory::Inventory;
use crate::core::outcome::{Outcome, OutcomeSource};
use crate::entities::product::Product;

/// Why a unit failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    SystemError,
    DamagedComponent,
    StockShortage,
}

impl FailureType {
    pub const ALL: [FailureType; 3] = [
        FailureType::SystemError,
        FailureType::DamagedComponent,
        FailureType::StockShortage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FailureType::SystemError => "System Error",
            FailureType::DamagedComponent => "Damaged Component",
            FailureType::StockShortage => "Stock Shortage",
        }
    }
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManufacturingState {
    WaitingForStock,
    InManufacturing,
    Completed,
    Failed(FailureType),
}

impl ManufacturingState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ManufacturingState::Completed | ManufacturingState::Failed(_)
        )
    }

    pub fn failure_type(&self) -> Option<FailureType> {
        match self {
            ManufacturingState::Failed(failure) => Some(*failure),
            _ => None,
        }
    }
}

impl fmt::Display for ManufacturingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManufacturingState::WaitingForStock => write!(f, "Waiting For Stock"),
            ManufacturingState::InManufacturing => write!(f, "In Manufacturing"),
            ManufacturingState::Completed => write!(f, "Completed"),
            ManufacturingState::Failed(failure) => write!(f, "Failed ({})", failure),
        }
    }
}

/// Production attempt for a single unit of a product
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturingProcess {
    product: String,
    unit_cost: f64,
    unit_weight: f64,
    state: ManufacturingState,
}

impl ManufacturingProcess {
    /// Start a new attempt in `WaitingForStock`
    pub fn new(product: &Product) -> Self {
        Self {
            product: product.name().to_string(),
            unit_cost: product.total_cost(),
            unit_weight: product.total_weight(),
            state: ManufacturingState::WaitingForStock,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product
    }

    /// Per-unit cost of the product, captured when the attempt started
    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn unit_weight(&self) -> f64 {
        self.unit_weight
    }

    pub fn state(&self) -> ManufacturingState {
        self.state
    }

    pub fn failure_type(&self) -> Option<FailureType> {
        self.state.failure_type()
    }

    pub fn is_completed(&self) -> bool {
        self.state == ManufacturingState::Completed
    }

    /// Human-readable state label ("Completed", "Failed (Stock Shortage)", ...)
    pub fn state_name(&self) -> String {
        self.state.to_string()
    }

    /// Advance the state machine by one step
    pub fn proceed(
        &mut self,
        product: &mut Product,
        inventory: &mut Inventory,
        outcomes: &mut dyn OutcomeSource,
    ) {
        debug_assert_eq!(product.name(), self.product);

        let next = match self.state {
            ManufacturingState::WaitingForStock => reserve_stock(product, inventory),
            ManufacturingState::InManufacturing => match outcomes.next_outcome() {
                Outcome::Success => {
                    product.increase_quantity();
                    inventory.add_finished_unit(product);
                    ManufacturingState::Completed
                }
                Outcome::SystemError => ManufacturingState::Failed(FailureType::SystemError),
                Outcome::DamagedComponent => {
                    ManufacturingState::Failed(FailureType::DamagedComponent)
                }
            },
            ManufacturingState::Completed | ManufacturingState::Failed(_) => return,
        };

        debug!("{}: {} -> {}", self.product, self.state, next);
        self.state = next;
    }

    /// Drive the unit to a terminal state and return it
    pub fn process_manufacturing(
        &mut self,
        product: &mut Product,
        inventory: &mut Inventory,
        outcomes: &mut dyn OutcomeSource,
    ) -> ManufacturingState {
        self.proceed(product, inventory, outcomes);
        if self.state == ManufacturingState::InManufacturing {
            self.proceed(product, inventory, outcomes);
        }
        self.state
    }
}

/// Check every BOM line, then deduct all of them or none
fn reserve_stock(product: &Product, inventory: &mut Inventory) -> ManufacturingState {
    let shortage = product
        .requirements()
        .iter()
        .find(|req| inventory.available(req.component.name()) < req.quantity);

    if let Some(req) = shortage {
        debug!(
            "{}: short of {} (need {}, have {})",
            product.name(),
            req.component.name(),
            req.quantity,
            inventory.available(req.component.name())
        );
        return ManufacturingState::Failed(FailureType::StockShortage);
    }

    for req in product.requirements() {
        inventory.remove_stock(req.component.name(), req.quantity);
    }
    ManufacturingState::InManufacturing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::ScriptedOutcomes;
    use crate::entities::component::BasicComponent;

    fn setup(stock: f64, required: f64) -> (Product, Inventory) {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", stock);
        let product = Product::new("Widget", 1).with_requirement(steel.clone(), required);
        (product, Inventory::from_components([steel]))
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(ManufacturingState::Completed.to_string(), "Completed");
        assert_eq!(
            ManufacturingState::Failed(FailureType::StockShortage).to_string(),
            "Failed (Stock Shortage)"
        );
        assert_eq!(
            ManufacturingState::Failed(FailureType::SystemError).to_string(),
            "Failed (System Error)"
        );
        assert_eq!(
            ManufacturingState::Failed(FailureType::DamagedComponent).to_string(),
            "Failed (Damaged Component)"
        );
        assert_eq!(ManufacturingState::WaitingForStock.to_string(), "Waiting For Stock");
        assert_eq!(ManufacturingState::InManufacturing.to_string(), "In Manufacturing");
    }

    #[test]
    fn test_new_process_waits_for_stock() {
        let (product, _) = setup(5.0, 2.0);
        let process = ManufacturingProcess::new(&product);
        assert_eq!(process.state(), ManufacturingState::WaitingForStock);
        assert_eq!(process.product_name(), "Widget");
        assert_eq!(process.unit_cost(), 10.0);
        assert_eq!(process.unit_weight(), 2.0);
        assert!(process.failure_type().is_none());
    }

    #[test]
    fn test_shortage_fails_without_deduction() {
        let (mut product, mut inventory) = setup(1.0, 2.0);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        process.proceed(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(
            process.state(),
            ManufacturingState::Failed(FailureType::StockShortage)
        );
        assert_eq!(inventory.available("Steel"), 1.0);
        assert_eq!(outcomes.remaining(), 0);
    }

    #[test]
    fn test_partial_shortage_deducts_nothing() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 10.0);
        let paint = BasicComponent::new("Paint", 1.0, 0.1, "paint", 0.5);
        let mut product = Product::new("Widget", 1)
            .with_requirement(steel.clone(), 2.0)
            .with_requirement(paint.clone(), 1.0);
        let mut inventory = Inventory::from_components([steel, paint]);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);

        let mut process = ManufacturingProcess::new(&product);
        process.process_manufacturing(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(process.failure_type(), Some(FailureType::StockShortage));
        assert_eq!(inventory.available("Steel"), 10.0);
        assert_eq!(inventory.available("Paint"), 0.5);
    }

    #[test]
    fn test_missing_component_is_shortage() {
        let (mut product, _) = setup(5.0, 2.0);
        let mut inventory = Inventory::new();
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        process.proceed(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(process.failure_type(), Some(FailureType::StockShortage));
    }

    #[test]
    fn test_sufficient_stock_is_deducted() {
        let (mut product, mut inventory) = setup(5.0, 2.0);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        process.proceed(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(process.state(), ManufacturingState::InManufacturing);
        assert_eq!(inventory.available("Steel"), 3.0);
    }

    #[test]
    fn test_exact_stock_is_enough() {
        let (mut product, mut inventory) = setup(2.0, 2.0);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        process.proceed(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(process.state(), ManufacturingState::InManufacturing);
        assert_eq!(inventory.available("Steel"), 0.0);
    }

    #[test]
    fn test_success_auto_advances_into_completed() {
        let (mut product, mut inventory) = setup(5.0, 2.0);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        let state = process.process_manufacturing(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(state, ManufacturingState::Completed);
        assert!(process.is_completed());
        assert_eq!(product.quantity(), 1);
        assert_eq!(inventory.available("Widget"), 1.0);
    }

    #[test]
    fn test_random_failures_keep_stock_consumed() {
        for (outcome, failure) in [
            (Outcome::SystemError, FailureType::SystemError),
            (Outcome::DamagedComponent, FailureType::DamagedComponent),
        ] {
            let (mut product, mut inventory) = setup(5.0, 2.0);
            let mut outcomes = ScriptedOutcomes::always(outcome);
            let mut process = ManufacturingProcess::new(&product);

            process.process_manufacturing(&mut product, &mut inventory, &mut outcomes);

            assert_eq!(process.failure_type(), Some(failure));
            assert_eq!(process.state_name(), format!("Failed ({})", failure.label()));
            assert_eq!(inventory.available("Steel"), 3.0);
            assert_eq!(product.quantity(), 0);
            assert!(inventory.get_component("Widget").is_none());
        }
    }

    #[test]
    fn test_terminal_states_ignore_proceed() {
        let (mut product, mut inventory) = setup(10.0, 2.0);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);
        let mut process = ManufacturingProcess::new(&product);

        process.process_manufacturing(&mut product, &mut inventory, &mut outcomes);
        process.proceed(&mut product, &mut inventory, &mut outcomes);
        process.proceed(&mut product, &mut inventory, &mut outcomes);

        assert_eq!(process.state(), ManufacturingState::Completed);
        assert_eq!(product.quantity(), 1);
        assert_eq!(inventory.available("Steel"), 8.0);
        assert_eq!(inventory.available("Widget"), 1.0);
    }

    #[test]
    fn test_nested_product_consumes_finished_units() {
        let steel = BasicComponent::new("Steel", 4.0, 2.0, "raw material", 10.0);
        let mut frame = Product::new("Frame", 1).with_requirement(steel.clone(), 3.0);
        let mut bike = Product::new("Bike", 1).with_requirement(frame.clone(), 1.0);
        let mut inventory = Inventory::from_components([steel]);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);

        let mut early = ManufacturingProcess::new(&bike);
        early.process_manufacturing(&mut bike, &mut inventory, &mut outcomes);
        assert_eq!(early.failure_type(), Some(FailureType::StockShortage));

        let mut frame_unit = ManufacturingProcess::new(&frame);
        frame_unit.process_manufacturing(&mut frame, &mut inventory, &mut outcomes);
        assert_eq!(inventory.available("Frame"), 1.0);

        let mut bike_unit = ManufacturingProcess::new(&bike);
        bike_unit.process_manufacturing(&mut bike, &mut inventory, &mut outcomes);
        assert!(bike_unit.is_completed());
        assert_eq!(bike_unit.unit_cost(), 12.0);
        assert_eq!(inventory.available("Frame"), 0.0);
        assert_eq!(inventory.available("Steel"), 7.0);
        assert_eq!(frame.quantity(), 1);
    }
}
