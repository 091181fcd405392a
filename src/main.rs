use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use madara_genres::{api::reqwest_client, sync::update_filter_file};

/// Syncs the genre filter of a Madara source with the genres its site currently offers.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// The filters.json to update in place
    filters_json: PathBuf,
    /// Base URL of the site, e.g. https://example.com
    base_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", Opts::command().render_usage());
            std::process::exit(1);
        }
    };

    let client = reqwest_client()?;
    update_filter_file(&client, &opts.filters_json, &opts.base_url).await?;
    println!("Genres updated successfully.");

    Ok(())
}
