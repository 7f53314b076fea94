//! Hausbau-Kalkulator
//!
//! Rule-based quantity takeoff, material pricing, cost estimation and
//! construction scheduling for house building projects.

mod costs;
mod db;
mod generator;
mod materials;
mod models;
mod orders;
mod quantities;
mod schedule;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::models::HouseConfig;

#[derive(Parser)]
#[command(name = "hausbau-calculator")]
#[command(about = "Quantity, cost and schedule calculator for house construction projects")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, default_value = "hausbau.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample house configuration to a JSON file
    SampleConfig {
        /// Output path
        #[arg(short, long, default_value = "haus.json")]
        output: PathBuf,
    },

    /// Calculate quantities, materials, costs and schedule for a configuration
    Generate {
        /// Path to the configuration JSON
        config: PathBuf,

        /// Print the full quantity, material and schedule tables
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate and persist the project with one work order per trade
    Materialize {
        /// Path to the configuration JSON
        config: PathBuf,

        /// Project start date (YYYY-MM-DD, default today)
        #[arg(long)]
        start: Option<String>,
    },

    /// List all materialized projects
    ListProjects,

    /// Show a materialized project and its work orders
    ShowProject {
        /// Project reference code (e.g. "HK-1A2B3C4D")
        reference: String,
    },

    /// Initialize empty database with schema
    Init,
}

fn load_config(path: &PathBuf) -> Result<HouseConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: HouseConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::SampleConfig { output } => {
            let config = HouseConfig::default();
            fs::write(&output, serde_json::to_string_pretty(&config)?)?;
            println!("Sample configuration written to {}", output.display());
        }

        Commands::Generate { config, verbose } => {
            let config = load_config(&config)?;
            let result = generator::generate(&config);

            if verbose {
                print_quantities(&result);
                print_materials(&result);
                print_ancillary(&result);
                print_schedule(&result);
            }

            println!("{}", generator::summarize(&result));
        }

        Commands::Materialize { config, start } => {
            let config = load_config(&config)?;
            let start_date = match start {
                Some(s) => s
                    .parse::<NaiveDate>()
                    .with_context(|| format!("Invalid start date: {}", s))?,
                None => Local::now().date_naive(),
            };

            let result = generator::generate(&config);
            let batch = orders::materialize(&result, start_date);
            db::save_materialization(&mut conn, &batch)?;

            println!(
                "Materialized {} as {} ({} work orders)",
                batch.project.title,
                batch.project.reference,
                batch.orders.len()
            );
            for order in &batch.orders {
                println!("  {:<10} {}", order.reference, order.trade);
            }
        }

        Commands::ListProjects => {
            let projects = db::list_projects(&conn)?;
            if projects.is_empty() {
                println!("No projects in database. Run 'materialize' first.");
            } else {
                println!(
                    "{:<12} {:<30} {:<12} {:<12} {:>7}",
                    "Reference", "Title", "Start", "End", "Orders"
                );
                println!("{}", "-".repeat(76));
                for p in projects {
                    println!(
                        "{:<12} {:<30} {:<12} {:<12} {:>7}",
                        p.reference, p.title, p.start_date, p.end_date, p.order_count
                    );
                }
            }
        }

        Commands::ShowProject { reference } => {
            match db::load_project(&conn, &reference)? {
                None => println!("Project '{}' not found", reference),
                Some(project) => {
                    println!("{} ({})", project.title, project.reference);
                    println!("{} bis {}", project.start_date, project.end_date);
                    println!("\n{}\n", project.notes);

                    let orders = db::load_orders(&conn, &reference)?;
                    for order in orders {
                        let deadline = order
                            .deadline
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{} [{}] bis {} ({} Positionen, {} Schritte)",
                            order.reference,
                            order.trade,
                            deadline,
                            order.line_items.len(),
                            order.checklist.len()
                        );
                        for item in &order.line_items {
                            println!("  {:<45} {:>8} {}", item.title, item.amount, item.unit);
                        }
                    }
                }
            }
        }

        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }
    }

    Ok(())
}

fn print_quantities(result: &models::GenerationResult) {
    println!("Massenermittlung:");
    println!("{:<45} {:>10} {:<5} {}", "Position", "Menge", "Einh.", "Gewerk");
    println!("{}", "-".repeat(78));
    for m in &result.mass_positions {
        println!(
            "{:<45} {:>10.1} {:<5} {}",
            m.description, m.quantity, m.unit, m.trade
        );
    }
    println!();
}

fn print_materials(result: &models::GenerationResult) {
    println!("Einkaufsliste:");
    println!(
        "{:<45} {:>8} {:<8} {:>14}",
        "Material", "Menge", "Einh.", "Preis"
    );
    println!("{}", "-".repeat(78));
    for item in result.procurement_list() {
        println!(
            "{:<45} {:>8} {:<8} {:>14}",
            item.title,
            item.quantity,
            item.unit,
            generator::format_eur(item.estimated_price)
        );
    }
    println!();
}

fn print_ancillary(result: &models::GenerationResult) {
    println!("Baunebenkosten:");
    for nk in &result.ancillary {
        println!(
            "{:<35} {:>14}   {}",
            nk.description,
            generator::format_eur(nk.amount),
            nk.detail
        );
    }
    println!();
}

fn print_schedule(result: &models::GenerationResult) {
    println!("Bauzeitenplan:");
    println!("{:<35} {:>6} {:>6}  {}", "Phase", "Start", "Ende", "Gewerk");
    println!("{}", "-".repeat(70));
    for phase in &result.phases {
        println!(
            "{:<35} {:>6} {:>6}  {}",
            phase.name,
            phase.start_week,
            phase.end_week(),
            phase.trade
        );
    }
    println!();
}
