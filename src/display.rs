//! Display and formatting utilities for AutoFact.
//!
//! This module provides functions for formatting resolution results and
//! printing them to the user in a readable format.

use std::io::Write;

use crate::models::{BalanceEntry, MachineTotal, ProductionNode};

/// Formats a rate rounded to two decimals, without trailing zeros.
///
/// Non-finite values are printed as-is.
///
/// # Example
///
/// ```
/// use autofact::display::format_rate;
///
/// assert_eq!(format_rate(60.0), "60");
/// assert_eq!(format_rate(1.5), "1.5");
/// assert_eq!(format_rate(1.0 / 3.0), "0.33");
/// assert_eq!(format_rate(-120.0), "-120");
/// ```
pub fn format_rate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Formats a production tree as indented text, one node per line.
///
/// Product nodes show the machine and count, plus the number of
/// alternative recipes when there is a choice; byproducts follow on their
/// own lines.
pub fn format_tree(node: &ProductionNode) -> String {
    let mut output = String::new();
    write_node(node, 0, &mut output);
    output
}

fn write_node(node: &ProductionNode, indent: usize, output: &mut String) {
    let prefix = "  ".repeat(indent);
    match node {
        ProductionNode::Raw { item, rate } => {
            output.push_str(&format!("{}{} @ {}/min  RAW\n", prefix, item, format_rate(*rate)));
        }
        ProductionNode::CycleLimit { item, rate } => {
            output.push_str(&format!(
                "{}{} @ {}/min  (depth limit reached)\n",
                prefix,
                item,
                format_rate(*rate)
            ));
        }
        ProductionNode::Product {
            item,
            rate,
            recipe,
            available_recipes,
            machine_count,
            children,
            byproducts,
        } => {
            let alternatives = if available_recipes.len() > 1 {
                format!("  ({} recipes, using {})", available_recipes.len(), recipe.id)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{}{} @ {}/min  [{} x{}]{}\n",
                prefix,
                item,
                format_rate(*rate),
                recipe.machine,
                format_rate(*machine_count),
                alternatives
            ));
            for bp in byproducts {
                output.push_str(&format!("{}  + {} {}/min\n", prefix, bp.item, format_rate(bp.rate)));
            }
            for child in children {
                write_node(child, indent + 1, output);
            }
        }
    }
}

/// Formats a material balance as a two-column table.
///
/// Surplus is shown with a leading `+`, raw draw with `-`.
pub fn format_balance(entries: &[BalanceEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let sign = if entry.rate > 0.0 { "+" } else { "" };
        output.push_str(&format!(
            "  {:<20} {:>12}/min\n",
            entry.item,
            format!("{}{}", sign, format_rate(entry.rate))
        ));
    }
    output
}

/// Writes the balance as CSV with an `item,rate` header.
pub fn write_balance_csv<W: Write>(entries: &[BalanceEntry], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Displays the complete resolution results to stdout.
///
/// This function prints:
/// - The production tree (unless `show_tree` is false)
/// - The material balance
/// - The machine totals per facility
pub fn display_results(
    tree: &ProductionNode,
    balance: &[BalanceEntry],
    machines: &[MachineTotal],
    show_tree: bool,
) {
    println!();
    println!("+================================================================+");
    println!("|                 AUTOFACT PRODUCTION CHAIN                      |");
    println!("+================================================================+");

    if show_tree {
        println!();
        println!("[PRODUCTION TREE]");
        println!("----------------------------------------------------------------");
        print!("{}", format_tree(tree));
    }

    println!();
    println!("[MATERIAL BALANCE]");
    println!("----------------------------------------------------------------");
    print!("{}", format_balance(balance));

    println!();
    println!("[MACHINES]");
    println!("----------------------------------------------------------------");
    if machines.is_empty() {
        println!("  (none: target is a raw material)");
    }
    for total in machines {
        println!("  {:<20} x{}", total.machine, format_rate(total.count));
    }
}
