//! Round-robin production coordinator
//!
//! Each sweep over the product list attempts one unit of every product that
//! still has units left, so an early shortage on one product never holds up
//! the others.

use log::info;

use crate::core::inventory::Inventory;
use crate::core::outcome::OutcomeSource;
use crate::core::report::ProductionReport;
use crate::entities::process::ManufacturingProcess;
use crate::entities::product::Product;

/// Processes recorded by a production run, in attempt order
#[derive(Debug, Clone, Default)]
pub struct ProductionRun {
    processes: Vec<ManufacturingProcess>,
}

impl ProductionRun {
    pub fn add_process(&mut self, process: ManufacturingProcess) {
        self.processes.push(process);
    }

    pub fn processes(&self) -> &[ManufacturingProcess] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn report(&self) -> ProductionReport {
        ProductionReport::from_processes(&self.processes)
    }
}

/// Manufacture every requested unit of every product
///
/// Each product's finished counter is reset first and then counts completed
/// units; the requested count is left alone.
pub fn manufacture(
    products: &mut [Product],
    inventory: &mut Inventory,
    outcomes: &mut dyn OutcomeSource,
) -> ProductionRun {
    let mut remaining: Vec<u32> = products.iter().map(Product::requested).collect();
    for product in products.iter_mut() {
        product.reset_quantity();
    }

    let mut run = ProductionRun::default();
    let mut work_left = true;
    while work_left {
        work_left = false;
        for (product, left) in products.iter_mut().zip(remaining.iter_mut()) {
            if *left == 0 {
                continue;
            }
            let mut process = ManufacturingProcess::new(product);
            process.process_manufacturing(product, inventory, outcomes);
            run.add_process(process);
            *left -= 1;
            work_left = true;
        }
    }

    let completed = run.processes().iter().filter(|p| p.is_completed()).count();
    info!(
        "Production run finished: {} of {} units completed",
        completed,
        run.len()
    );
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::{Outcome, ScriptedOutcomes};
    use crate::entities::component::BasicComponent;
    use crate::entities::process::{FailureType, ManufacturingState};

    #[test]
    fn test_round_robin_interleaves_products() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 100.0);
        let gold = BasicComponent::new("Gold", 50.0, 0.2, "raw material", 0.0);
        let mut products = vec![
            Product::new("X", 2).with_requirement(steel.clone(), 1.0),
            Product::new("Y", 2).with_requirement(gold.clone(), 1.0),
        ];
        let mut inventory = Inventory::from_components([steel, gold]);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);

        let run = manufacture(&mut products, &mut inventory, &mut outcomes);

        let order: Vec<&str> = run.processes().iter().map(|p| p.product_name()).collect();
        assert_eq!(order, vec!["X", "Y", "X", "Y"]);
        assert_eq!(run.processes()[1].failure_type(), Some(FailureType::StockShortage));
    }

    #[test]
    fn test_uneven_quantities_drain_in_sweeps() {
        let steel = BasicComponent::new("Steel", 1.0, 1.0, "raw material", 100.0);
        let mut products = vec![
            Product::new("A", 3).with_requirement(steel.clone(), 1.0),
            Product::new("B", 1).with_requirement(steel.clone(), 1.0),
            Product::new("C", 0).with_requirement(steel.clone(), 1.0),
        ];
        let mut inventory = Inventory::from_components([steel]);
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);

        let run = manufacture(&mut products, &mut inventory, &mut outcomes);

        let order: Vec<&str> = run.processes().iter().map(|p| p.product_name()).collect();
        assert_eq!(order, vec!["A", "B", "A", "A"]);
        assert_eq!(inventory.available("Steel"), 96.0);
    }

    #[test]
    fn test_every_process_is_terminal() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 7.0);
        let mut products = vec![
            Product::new("X", 5).with_requirement(steel.clone(), 2.0),
            Product::new("Y", 4).with_requirement(steel.clone(), 1.0),
        ];
        let mut inventory = Inventory::from_components([steel]);
        let mut outcomes = crate::core::outcome::RandomOutcomes::seeded(1234);

        let run = manufacture(&mut products, &mut inventory, &mut outcomes);

        assert_eq!(run.len(), 9);
        for process in run.processes() {
            assert!(process.state().is_terminal());
            assert_ne!(process.state(), ManufacturingState::WaitingForStock);
            assert_ne!(process.state(), ManufacturingState::InManufacturing);
        }
        assert!(inventory.available("Steel") >= 0.0);
    }

    #[test]
    fn test_requested_and_completed_are_kept_apart() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 100.0);
        let mut products = vec![Product::new("X", 4).with_requirement(steel.clone(), 1.0)];
        let mut inventory = Inventory::from_components([steel]);
        let mut outcomes = ScriptedOutcomes::new([
            Outcome::Success,
            Outcome::SystemError,
            Outcome::Success,
            Outcome::DamagedComponent,
        ]);

        let run = manufacture(&mut products, &mut inventory, &mut outcomes);

        assert_eq!(run.len(), 4);
        assert_eq!(products[0].requested(), 4);
        assert_eq!(products[0].quantity(), 2);
        assert_eq!(inventory.available("X"), 2.0);
    }

    #[test]
    fn test_quantity_is_reset_before_run() {
        let steel = BasicComponent::new("Steel", 5.0, 1.0, "raw material", 100.0);
        let mut product = Product::new("X", 1).with_requirement(steel.clone(), 1.0);
        product.increase_quantity();
        product.increase_quantity();
        let mut products = vec![product];
        let mut inventory = Inventory::from_components([steel]);
        let mut outcomes = ScriptedOutcomes::always(Outcome::SystemError);

        manufacture(&mut products, &mut inventory, &mut outcomes);

        assert_eq!(products[0].quantity(), 0);
    }

    #[test]
    fn test_nothing_requested_records_nothing() {
        let mut products = vec![Product::new("X", 0)];
        let mut inventory = Inventory::new();
        let mut outcomes = ScriptedOutcomes::always(Outcome::Success);

        let run = manufacture(&mut products, &mut inventory, &mut outcomes);

        assert!(run.is_empty());
    }
}
