//! Benefit Realization CLI
//!
//! Command-line interface for appraising case-study cash flows

use anyhow::{Context, Result};
use benefit_realization::{
    flows::{build_contributions, load_flows, load_line_items},
    AppraisalReport, CalculationResult, EstimateBasis, ScenarioRunner, SensitivityItem,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "benefit_realization", version, about = "Appraise benefit realization case studies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Per-period discount rate as a decimal (0.035 = 3.5%)
    #[arg(long, env = "DISCOUNT_RATE", default_value_t = 0.035)]
    discount_rate: f64,

    /// Emit the JSON report instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline KPIs for a yearly flow CSV (Year,Benefits,Costs)
    Calculate {
        flows: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Tornado ranking for a line-item CSV
    Sensitivity {
        items: PathBuf,
        /// Flex applied to each line item (0.2 = ±20%)
        #[arg(long, env = "SENSITIVITY_VARIATION", default_value_t = 0.2)]
        variation: f64,
        /// Estimate basis: pessimistic, likely, optimistic or pert
        #[arg(long, default_value = "likely")]
        basis: EstimateBasis,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Pessimistic / likely / optimistic comparison for a line-item CSV
    Scenarios {
        items: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn fmt_opt(value: Option<f64>, scale: f64, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v * scale, suffix),
        None => "—".to_string(),
    }
}

fn print_result(result: &CalculationResult) {
    println!("  PV Benefits:  ${:.2}", result.present_value_benefits);
    println!("  PV Costs:     ${:.2}", result.present_value_costs);
    println!("  NPV:          ${:.2}", result.npv);
    println!("  BCR:          {:.3}", result.bcr);
    println!("  SROI:         {}", fmt_opt(result.sroi, 100.0, "%"));
    println!("  IRR:          {}", fmt_opt(result.irr, 100.0, "%"));
    println!("  Payback:      {}", fmt_opt(result.payback_period, 1.0, " periods"));
    println!();

    println!("{:>5} {:>14} {:>14}", "Year", "Net", "Cumulative");
    println!("{}", "-".repeat(35));
    for ((year, net), cumulative) in result
        .years
        .iter()
        .zip(&result.net_by_period)
        .zip(&result.cumulative_net_by_period)
    {
        println!("{:>5} {:>14.2} {:>14.2}", year, net, cumulative);
    }
}

fn print_tornado(items: &[SensitivityItem]) {
    println!("{:<30} {:>14} {:>14} {:>14} {:>14}", "Line item", "NPV low", "NPV base", "NPV high", "Spread");
    println!("{}", "-".repeat(90));
    for item in items {
        println!(
            "{:<30} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            item.label, item.npv_low, item.npv_base, item.npv_high, item.spread
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Calculate { flows, common } => {
            let flows = load_flows(&flows).with_context(|| format!("Failed to load flows from {}", flows.display()))?;
            let report = AppraisalReport::build(flows, common.discount_rate, &[], None);

            if common.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Appraisal at {:.2}% discount rate:", common.discount_rate * 100.0);
                print_result(&report.result);
            }
        }
        Command::Sensitivity { items, variation, basis, common } => {
            let items =
                load_line_items(&items).with_context(|| format!("Failed to load line items from {}", items.display()))?;
            let runner = ScenarioRunner::new(items, common.discount_rate);
            let contributions = build_contributions(runner.line_items(), basis);
            let report = AppraisalReport::build(runner.flows(basis), common.discount_rate, &contributions, Some(variation));

            if common.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Sensitivity (±{:.0}%, {} basis) at {:.2}% discount rate:\n",
                    variation * 100.0,
                    basis.as_str(),
                    common.discount_rate * 100.0
                );
                print_tornado(&report.sensitivity);
            }
        }
        Command::Scenarios { items, common } => {
            let items =
                load_line_items(&items).with_context(|| format!("Failed to load line items from {}", items.display()))?;
            let comparison = ScenarioRunner::new(items, common.discount_rate).compare();

            if common.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                for (name, result) in [
                    ("Pessimistic", &comparison.pessimistic),
                    ("Likely", &comparison.likely),
                    ("Optimistic", &comparison.optimistic),
                ] {
                    println!("{} case:", name);
                    print_result(result);
                    println!();
                }
            }
        }
    }

    Ok(())
}
