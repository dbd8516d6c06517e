use std::io::{self, BufWriter, Write};

use clap::Parser;
use row_reduce::{resolve_config, run, Cli};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut input = io::stdin().lock();
    let mut output = BufWriter::new(io::stdout().lock());

    let result = resolve_config(&cli, &mut input, &mut output)
        .and_then(|config| run(&config, &mut input, &mut output));

    if let Err(e) = result {
        let _ = output.flush();
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
