use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use cardex_rust::builders::index_builder::{build_card_index, load_supplemental_printings};
use cardex_rust::builders::{BuilderError, OutputGenerator};
use cardex_rust::classes::CardexIndex;
use cardex_rust::providers::ScryfallProvider;

/// Build the card-name browser index from the Scryfall bulk catalog
#[derive(Parser, Debug)]
#[command(name = "cardex", version, about)]
struct Args {
    /// Directory holding the cached bulk download and the supplemental catalog
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Artifact path, defaults to <data-dir>/cards-minimized.json
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let provider = ScryfallProvider::new();
    let raw_cards = provider
        .default_cards(&args.data_dir.join("default-cards.json"))
        .await?;

    let supplemental = load_supplemental_printings(&args.data_dir.join("lorcana-stripped.json"))?;

    let index = build_card_index(raw_cards, supplemental)?;
    info!(
        "Found {} distinct cards from {} sets.",
        index.cards.len(),
        index.sets.len()
    );

    sanity_check(&index)?;

    let output_path = args
        .output
        .unwrap_or_else(|| args.data_dir.join("cards-minimized.json"));
    OutputGenerator::new(output_path, !args.compact).write_index(&index)?;

    info!("Finished writing minimized card list.");
    Ok(())
}

/// Known-good anchors re-checked against every real build. A drifted feed
/// fails the run before any artifact is written.
fn sanity_check(index: &CardexIndex) -> Result<(), BuilderError> {
    let abandon_hope = index
        .cards
        .get("abandon hope")
        .ok_or_else(|| sanity("missing 'abandon hope'"))?;
    if abandon_hope.len() != 1 || abandon_hope[0].s != "tmp|107" {
        return Err(sanity("'abandon hope' printings drifted"));
    }
    if !abandon_hope[0].f.contains("api.scryfall.com") {
        return Err(sanity("'abandon hope' front image is not a Scryfall URL"));
    }

    let dragon = index
        .cards
        .get("lightning dragon")
        .ok_or_else(|| sanity("missing 'lightning dragon'"))?;
    let codes: Vec<&str> = dragon.iter().map(|p| p.s.as_str()).collect();
    if codes != ["pusg|202", "usg|202", "prm|32196", "vma|177"] {
        return Err(sanity(&format!(
            "'lightning dragon' order drifted: {:?}",
            codes
        )));
    }
    let digital: Vec<bool> = dragon.iter().map(|p| p.d.is_some()).collect();
    let promo: Vec<bool> = dragon.iter().map(|p| p.p.is_some()).collect();
    if digital != [false, false, true, true] || promo != [true, false, true, false] {
        return Err(sanity("'lightning dragon' flags drifted"));
    }

    if index.sets.get("tmp").map(String::as_str) != Some("Tempest") {
        return Err(sanity("set 'tmp' is not Tempest"));
    }
    if index.cards.len() <= 20000 {
        return Err(sanity("fewer than 20000 distinct cards"));
    }
    if index.sets.len() <= 500 {
        return Err(sanity("fewer than 500 sets"));
    }

    Ok(())
}

fn sanity(msg: &str) -> BuilderError {
    BuilderError::SanityCheckError(msg.to_string())
}
