use std::fs::File;
use std::io::{self, Write};
use std::process;

use bank_ledger_engine::cli;

fn main() {
    let args = cli::parse_args();

    let result = match &args.output {
        Some(path) => match File::create(path) {
            Ok(mut file) => bank_ledger_engine::run(&args.input_file, &mut file),
            Err(err) => Err(err.into()),
        },
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let result = bank_ledger_engine::run(&args.input_file, &mut handle);
            let _ = handle.flush();
            result
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
