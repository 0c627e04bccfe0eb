//! Material balance and machine totals for a resolved production tree.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::models::{BalanceEntry, MachineTotal, ProductionNode};

/// Computes the net rate of every item across the tree, sorted by rate descending.
///
/// The root item starts with its requested rate as a positive entry. Every
/// raw leaf subtracts its rate and every byproduct adds its rate. A product
/// node's own throughput is not counted: it is consumed by its parent.
/// Depth-limited leaves contribute nothing.
///
/// Entries with equal rates keep the order in which the items were first
/// seen; NaN rates sort last.
///
/// # Example
///
/// ```
/// use autofact::balance::aggregate;
/// use autofact::data::default_recipes;
/// use autofact::models::Preferences;
/// use autofact::resolver::resolve;
///
/// let tree = resolve("齿轮", 60.0, &default_recipes(), &Preferences::new());
/// let balance = aggregate(&tree);
///
/// assert_eq!(balance[0].item, "齿轮");
/// assert_eq!(balance[0].rate, 60.0);
/// assert_eq!(balance[1].item, "铁矿");
/// assert_eq!(balance[1].rate, -120.0);
/// ```
pub fn aggregate(root: &ProductionNode) -> Vec<BalanceEntry> {
    let mut balance: IndexMap<String, f64> = IndexMap::new();
    *balance.entry(root.item().to_string()).or_default() += root.rate();
    collect_balance(root, &mut balance);

    let mut entries: Vec<BalanceEntry> = balance
        .into_iter()
        .map(|(item, rate)| BalanceEntry { item, rate })
        .collect();
    entries.sort_by(|a, b| descending(a.rate, b.rate));
    entries
}

fn collect_balance(node: &ProductionNode, balance: &mut IndexMap<String, f64>) {
    match node {
        ProductionNode::Raw { item, rate } => {
            *balance.entry(item.clone()).or_default() -= rate;
        }
        ProductionNode::Product {
            children,
            byproducts,
            ..
        } => {
            for bp in byproducts {
                *balance.entry(bp.item.clone()).or_default() += bp.rate;
            }
            for child in children {
                collect_balance(child, balance);
            }
        }
        ProductionNode::CycleLimit { .. } => {}
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Sums machine counts per facility across every product node of the tree.
///
/// The result is sorted by machine name.
pub fn machine_summary(root: &ProductionNode) -> Vec<MachineTotal> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    collect_machines(root, &mut totals);
    totals
        .into_iter()
        .map(|(machine, count)| MachineTotal { machine, count })
        .collect()
}

fn collect_machines(node: &ProductionNode, totals: &mut BTreeMap<String, f64>) {
    if let ProductionNode::Product {
        recipe,
        machine_count,
        children,
        ..
    } = node
    {
        *totals.entry(recipe.machine.clone()).or_default() += machine_count;
        for child in children {
            collect_machines(child, totals);
        }
    }
}

/// Sums the magnitude of every negative balance entry: the total raw draw per minute.
pub fn total_raw_draw(balance: &[BalanceEntry]) -> f64 {
    balance
        .iter()
        .filter(|e| e.rate < 0.0)
        .map(|e| -e.rate)
        .sum()
}
