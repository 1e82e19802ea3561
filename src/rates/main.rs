use chrono::Local;
use clap::Parser;
use colored::Colorize;
use rolodex::error::Result;
use rolodex::exchange::privatbank::PrivatBankClient;
use rolodex::exchange::{collect_rates, write_rates};
use rolodex::logging;

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let client = PrivatBankClient::from_env()?;
    let today = Local::now().date_naive();
    let rates = collect_rates(&client, today, cli.days, &cli.currencies)?;
    write_rates(&cli.output, &rates)?;

    println!(
        "{}",
        format!(
            "Wrote {} day(s) of rates to {}",
            rates.len(),
            cli.output.display()
        )
        .green()
    );
    Ok(())
}
