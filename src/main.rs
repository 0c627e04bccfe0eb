//! AutoFact - Command Line Interface
//!
//! This is the main entry point for the production chain calculator.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use autofact::{
    balance::{aggregate, machine_summary, total_raw_draw},
    data::{all_items, default_recipes, load_recipes, validate_recipes},
    display::{display_results, format_rate, write_balance_csv},
    library::RecipeLibrary,
    models::{Preferences, Recipe},
    resolver::resolve,
};

/// Command-line arguments for AutoFact.
#[derive(Parser, Debug)]
#[command(name = "autofact")]
#[command(author, version, about = "Resolve production chains for crafting and factory games", long_about = None)]
struct Args {
    /// Item to produce (defaults to the library's target, if a library is given)
    #[arg(short, long)]
    target: Option<String>,

    /// Desired output rate, per minute
    #[arg(short, long, default_value = "60")]
    rate: f64,

    /// Recipe file: a JSON array of recipes (built-in recipes if omitted)
    #[arg(long, conflicts_with = "library")]
    recipes: Option<PathBuf>,

    /// Saved library JSON; its current group and preferences are used
    #[arg(long)]
    library: Option<PathBuf>,

    /// Preferred recipe for an item, as ITEM=RECIPE_ID (repeatable)
    #[arg(short, long = "prefer", value_parser = parse_preference)]
    prefer: Vec<(String, String)>,

    /// Print the material balance as CSV instead of the report
    #[arg(long, default_value = "false")]
    csv: bool,

    /// Omit the production tree from the report
    #[arg(long, default_value = "false")]
    no_tree: bool,

    /// List every item known to the recipe set and exit
    #[arg(long, default_value = "false")]
    list_items: bool,

    /// Report suspicious recipe data and exit
    #[arg(long, default_value = "false")]
    validate: bool,
}

fn parse_preference(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((item, id)) if !item.is_empty() && !id.is_empty() => {
            Ok((item.to_string(), id.to_string()))
        }
        _ => Err(format!("expected ITEM=RECIPE_ID, got '{}'", s)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Recipes, preferences and default target come from the library, a
    // recipe file, or the built-in set, in that order
    let (recipes, mut preferences, library_target): (Vec<Recipe>, Preferences, Option<String>) =
        if let Some(path) = &args.library {
            let library = RecipeLibrary::from_json(&std::fs::read_to_string(path)?)?;
            let recipes = library.recipes().to_vec();
            (recipes, library.preferred, Some(library.target))
        } else if let Some(path) = &args.recipes {
            (load_recipes(path)?, Preferences::new(), None)
        } else {
            (default_recipes(), Preferences::new(), None)
        };
    preferences.extend(args.prefer.iter().cloned());

    for issue in validate_recipes(&recipes) {
        eprintln!("[WARNING] {}", issue);
    }
    if args.validate {
        return Ok(());
    }

    if args.list_items {
        for item in all_items(&recipes) {
            println!("{}", item);
        }
        return Ok(());
    }

    let target = match args.target.or(library_target).filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => {
            eprintln!("Error: no target item. Pass --target or a library with a target.");
            std::process::exit(1);
        }
    };

    let tree = resolve(&target, args.rate, &recipes, &preferences);
    let balance = aggregate(&tree);

    if args.csv {
        write_balance_csv(&balance, io::stdout().lock())?;
        return Ok(());
    }

    println!("AutoFact - Production Chain Calculator");
    println!("================================================================");
    println!();
    println!("Configuration:");
    println!("  Target:   {} @ {}/min", target, format_rate(args.rate));
    println!("  Recipes:  {}", recipes.len());
    println!("  Preferred recipes: {}", preferences.len());

    let machines = machine_summary(&tree);
    display_results(&tree, &balance, &machines, !args.no_tree);

    println!();
    println!("Total raw draw: {}/min", format_rate(total_raw_draw(&balance)));

    Ok(())
}
