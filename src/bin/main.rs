use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use relief::algorithm::big_m::solution::{Report, Status};
use relief::algorithm::big_m::solve_with_rule;
use relief::algorithm::big_m::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
use relief::algorithm::closed_form::{ClosedFormReport, allocate};
use relief::config::SolverConfig;
use relief::io::import;

/// Allocate relief supplies over demand sites with the Big-M simplex method.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Opts {
    /// File containing the problem description, in TOML
    problem_file: PathBuf,

    /// File containing solver settings, in TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule for choosing the entering variable
    #[arg(long, value_enum, default_value = "steepest")]
    rule: Rule,

    /// Print the tableau of every iteration
    #[arg(long)]
    trace: bool,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also compute the closed-form allocation and compare the costs
    #[arg(long)]
    compare: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Rule {
    /// Most negative relative cost
    Steepest,
    /// First negative relative cost
    First,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Opts::parse()) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        },
    }
}

fn run(opts: Opts) -> Result<ExitCode, String> {
    let problem = import(&opts.problem_file)
        .map_err(|error| format!("{}: {}", opts.problem_file.display(), error))?;

    let config = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|error| format!("{}: {}", path.display(), error))?;
            SolverConfig::from_toml_str(&text)
                .map_err(|error| format!("{}: {}", path.display(), error))?
        },
        None => SolverConfig::default(),
    };

    let report = match opts.rule {
        Rule::Steepest => solve_with_rule::<SteepestDescentAlongVariable>(&problem, &config),
        Rule::First => solve_with_rule::<FirstProfitable>(&problem, &config),
    }.map_err(|error| error.to_string())?;
    let closed_form = opts.compare.then(|| allocate(&problem, config.big_m));

    if opts.json {
        let text = match &closed_form {
            Some(closed_form) => serde_json::to_string_pretty(&serde_json::json!({
                "report": report,
                "closed_form": closed_form,
            })),
            None => serde_json::to_string_pretty(&report),
        }.map_err(|error| error.to_string())?;
        println!("{}", text);
    } else {
        if opts.trace {
            for snapshot in &report.snapshots {
                println!("{}", snapshot);
            }
        }
        print!("{}", report);
        if let Some(closed_form) = &closed_form {
            print_comparison(&report, closed_form);
        }
    }

    Ok(match report.status {
        Status::Optimal | Status::Infeasible | Status::NoSites => ExitCode::SUCCESS,
        Status::Unbounded | Status::IterationLimit => ExitCode::from(2),
    })
}

fn print_comparison(report: &Report, closed_form: &ClosedFormReport) {
    println!();
    println!("Closed-form allocation:");
    for allocation in &closed_form.allocations {
        println!("{:<16}{:>12.2}", allocation.site_name, allocation.allocated);
    }
    println!("Total cost: {:.2} (simplex: {:.2})", closed_form.total_cost, report.total_cost);
    if report.is_feasible && closed_form.is_feasible {
        let difference = (report.total_cost - closed_form.total_cost).abs();
        if difference <= 1e-6 * closed_form.total_cost.abs().max(1f64) {
            println!("Costs agree.");
        } else {
            println!("Costs differ by {:.2}.", difference);
        }
    }
}
