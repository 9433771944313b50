use crate::model::{RepairItem, SelectedRepairs};

const fn item(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    min_cost: f64,
    max_cost: f64,
) -> RepairItem {
    RepairItem { id, name, description, min_cost, max_cost }
}

static REPAIR_CATALOG: [RepairItem; 10] = [
    item("roof-repair", "Roof Repair", "Minor roof repairs", 1_000.0, 3_000.0),
    item("roof-replacement", "Roof Replacement", "Full roof replacement", 6_000.0, 10_000.0),
    item("electrical-box", "Electrical Box Replace", "Replace electrical panel", 5_000.0, 8_000.0),
    item("gfci", "GFCI Installation", "Add GFCI outlets where needed", 1_000.0, 3_000.0),
    item("main-drain", "Main Drain Line", "Replace main drain line", 8_000.0, 15_000.0),
    item("exterior-paint", "Exterior Paint", "Paint exterior ($3-4/sqft)", 6_000.0, 8_000.0),
    item("siding-wood", "Siding/Wood Rot", "Replace siding or fix wood rot", 1_000.0, 10_000.0),
    item("foundation", "Foundation Repair", "Foundation structural repairs", 10_000.0, 30_000.0),
    item("windows", "Replace Windows", "Replace all windows", 8_000.0, 20_000.0),
    item("driveway", "Driveway", "Driveway repair or replacement", 1_000.0, 9_000.0),
];

/// Every repair item in display order.
pub fn all() -> &'static [RepairItem] {
    &REPAIR_CATALOG
}

pub fn find(id: &str) -> Option<&'static RepairItem> {
    REPAIR_CATALOG.iter().find(|r| r.id == id)
}

/// Sum of the average cost of each selected item. Unknown ids cost nothing.
pub fn total_repair_costs(selected: &SelectedRepairs) -> f64 {
    selected
        .iter()
        .map(|id| find(id).map_or(0.0, RepairItem::average_cost))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_ten_unique_items() {
        let ids: HashSet<_> = all().iter().map(|r| r.id).collect();
        assert_eq!(all().len(), 10);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn costs_are_ordered_ranges() {
        for r in all() {
            assert!(r.min_cost >= 0.0, "{} has a negative minimum", r.id);
            assert!(r.max_cost >= r.min_cost, "{} has an inverted range", r.id);
        }
    }

    #[test]
    fn display_order_is_stable() {
        assert_eq!(all()[0].id, "roof-repair");
        assert_eq!(all()[9].id, "driveway");
    }

    #[test]
    fn find_by_id() {
        let roof = find("roof-replacement").unwrap();
        assert_eq!(roof.name, "Roof Replacement");
        assert_eq!(roof.average_cost(), 8_000.0);
        assert_eq!(find("foundation").unwrap().average_cost(), 20_000.0);
        assert!(find("pool").is_none());
    }

    #[test]
    fn total_ignores_unknown_ids() {
        let selected: SelectedRepairs = ["roof-replacement", "foundation", "hot-tub"]
            .into_iter()
            .collect();
        assert_eq!(total_repair_costs(&selected), 28_000.0);
        assert_eq!(total_repair_costs(&SelectedRepairs::new()), 0.0);
    }

    #[test]
    fn all_items_total() {
        let selected: SelectedRepairs = all().iter().map(|r| r.id).collect();
        assert_eq!(total_repair_costs(&selected), 81_500.0);
    }
}
