use directories::ProjectDirs;
use rolodex::codec::fs::JsonFileCodec;
use rolodex::config::RolodexConfig;
use rolodex::dispatch::Dispatcher;
use rolodex::error::Result;
use rolodex::logging;
use rolodex::session::{self, Console};
use std::io;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "ROLODEX_DATA";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let data_dir = data_dir();
    let config = RolodexConfig::load_or_init(&data_dir)?;
    logging::init(&config.log_level)?;
    log::debug!("using data dir {}", data_dir.display());

    let mut dispatcher = Dispatcher::new(JsonFileCodec::new(data_dir), config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    session::run(&mut dispatcher, &mut console)
}

fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("", "", "rolodex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".rolodex"))
}
