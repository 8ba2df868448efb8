mod arguments;
mod error;
mod logging;

use std::fs;

use arguments::Command;
use error::Result;

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmdline = match arguments::parse(args)? {
        Command::Help => return Ok(()),
        Command::Run(cmdline) => cmdline,
    };
    tracing::debug!(?cmdline, "command line accepted");

    let report = arguments::render(&cmdline);
    match cmdline.out {
        Some(ref path) => {
            fs::write(path, &report)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{}", report),
    }
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("{}", e);
        if let error::DemoError::Usage { outcome, .. } = &e {
            tracing::debug!(%outcome, "command line rejected");
            eprintln!("Try 'argsdemo --help' for more information.");
        }
        std::process::exit(e.exit_code());
    }
}
