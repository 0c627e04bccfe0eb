//! Tests for display and formatting utilities.

use autofact::balance::aggregate;
use autofact::data::default_recipes;
use autofact::display::{format_balance, format_rate, format_tree, write_balance_csv};
use autofact::models::{BalanceEntry, ItemAmount, Preferences, Recipe};
use autofact::resolver::resolve;

#[test]
fn test_format_rate_whole_numbers() {
    assert_eq!(format_rate(60.0), "60");
    assert_eq!(format_rate(100.0), "100");
    assert_eq!(format_rate(0.0), "0");
}

#[test]
fn test_format_rate_fractional() {
    assert_eq!(format_rate(1.5), "1.5");
    assert_eq!(format_rate(2.0 / 3.0), "0.67");
    assert_eq!(format_rate(0.004), "0");
    assert_eq!(format_rate(-0.001), "0");
    assert_eq!(format_rate(-7.25), "-7.25");
}

#[test]
fn test_format_rate_non_finite() {
    assert_eq!(format_rate(f64::INFINITY), "inf");
    assert_eq!(format_rate(f64::NAN), "NaN");
}

#[test]
fn test_format_tree() {
    let tree = resolve("齿轮", 60.0, &default_recipes(), &Preferences::new());
    let text = format_tree(&tree);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "齿轮 @ 60/min  [制造台 x4]",
            "  铁块 @ 120/min  [熔炉 x4]  (2 recipes, using r_iron_ingot)",
            "    铁矿 @ 120/min  RAW",
        ]
    );
}

#[test]
fn test_format_tree_byproducts_and_cycles() {
    let recipes = vec![Recipe {
        id: "loop".to_string(),
        outputs: vec![ItemAmount::new("A", 1.0), ItemAmount::new("slag", 1.0)],
        inputs: vec![ItemAmount::new("A", 1.0)],
        machine: "m".to_string(),
        time: 60.0,
    }];
    let text = format_tree(&resolve("A", 1.0, &recipes, &Preferences::new()));

    assert!(text.starts_with("A @ 1/min  [m x1]\n  + slag 1/min\n"));
    assert!(text.trim_end().ends_with("A @ 1/min  (depth limit reached)"));
}

#[test]
fn test_format_balance() {
    let entries = vec![
        BalanceEntry {
            item: "齿轮".to_string(),
            rate: 60.0,
        },
        BalanceEntry {
            item: "铁矿".to_string(),
            rate: -120.0,
        },
    ];
    let text = format_balance(&entries);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("齿轮") && lines[0].ends_with("+60/min"));
    assert!(lines[1].contains("铁矿") && lines[1].ends_with("-120/min"));
}

#[test]
fn test_write_balance_csv() {
    let tree = resolve("齿轮", 60.0, &default_recipes(), &Preferences::new());
    let mut buffer = Vec::new();
    write_balance_csv(&aggregate(&tree), &mut buffer).expect("writing to memory should succeed");

    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text, "item,rate\n齿轮,60.0\n铁矿,-120.0\n");
}
