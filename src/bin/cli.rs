// src/bin/cli.rs
use everytrail_export::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(summary) = cli::run()? {
        if !summary.failed.is_empty() {
            std::process::exit(1);
        }
    }
    Ok(())
}
