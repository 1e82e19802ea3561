use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rates")]
#[command(about = "Fetch recent National Bank exchange rates into a JSON file", long_about = None)]
pub struct Cli {
    /// How many days back to fetch, today included (1-10)
    pub days: u32,

    /// Currency code to keep (repeatable)
    #[arg(short, long = "currency", default_values_t = [String::from("EUR"), String::from("USD")])]
    pub currencies: Vec<String>,

    /// Where to write the results
    #[arg(short, long, default_value = "rates.json")]
    pub output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
