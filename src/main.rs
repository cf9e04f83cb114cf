use colored::Colorize;
use rebound::cli::Outcome;
use std::process;

fn main() {
    match rebound::cli::run() {
        Ok(Outcome::Completed) | Ok(Outcome::Listed) => {}
        Ok(Outcome::Usage) => process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
