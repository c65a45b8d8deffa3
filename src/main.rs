#![allow(non_snake_case)]
use RustedPoly::Utils::config_parser::SessionConfig;
use RustedPoly::Utils::logger::init_logger;
use RustedPoly::calculator::{Calculator, Operation};
use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "RustedPoly")]
#[command(version)]
#[command(about = "Add, subtract, multiply, divide and evaluate polynomials in x")]
struct Cli {
    /// add, subtract, multiply, divide or evaluate
    #[arg(value_parser = parse_operation)]
    operation: Operation,

    /// first polynomial, e.g. "2x^2+3x-5"
    #[arg(allow_hyphen_values = true)]
    first: String,

    /// second polynomial, or the value of x for evaluate
    #[arg(allow_hyphen_values = true)]
    second: Option<String>,

    /// session settings file (logging and results sections)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// append the result line to the results file
    #[arg(short, long)]
    save: bool,

    /// also print the terms of the resulting polynomial as a table
    #[arg(short, long)]
    table: bool,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    Operation::from_str(s).map_err(|_| {
        format!(
            "unknown operation '{}', expected add, subtract, multiply, divide or evaluate",
            s
        )
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(second) = cli.second.as_deref() else {
        eprintln!(
            "{} needs {} after the first polynomial",
            cli.operation,
            cli.operation.second_operand()
        );
        return ExitCode::FAILURE;
    };

    let config = match &cli.config {
        Some(path) => match SessionConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };
    init_logger(&config);

    let mut calculator = Calculator::from_config(&config);
    let outcome = match calculator.calculate(cli.operation, &cli.first, second) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", outcome.message());
    if cli.table {
        if let Some(poly) = outcome.polynomial() {
            println!("{}", poly.terms_table());
        }
    }
    if cli.save {
        match calculator.save_last_result() {
            Ok(true) => println!("Result saved to {}", calculator.results_file().display()),
            Ok(false) => println!("No result to save."),
            Err(e) => {
                eprintln!("Error saving result to file: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
