use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use blockmeta::prelude::*;

/// Block metadata generator: reads a generated documentation XML tree and
/// writes the canonical block metadata JSON plus an optional localization
/// message table.
#[derive(Parser, Debug)]
#[command(name = "blockmeta", version, about)]
struct Args {
    /// The generated documentation XML file (structure.xml)
    #[arg(long, value_name = "XML_FILE")]
    input: PathBuf,

    /// The output JSON file containing the metadata for blocks
    #[arg(long, value_name = "JSON_FILE")]
    output: PathBuf,

    /// Optional output file for the message-id to display-string table
    #[arg(long, value_name = "JSON_FILE")]
    messages: Option<PathBuf>,

    /// Version stamp embedded in the metadata document
    #[arg(long, value_name = "VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    metadata_version: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let tree = DocumentTree::from_file(&args.input)?;
    let blocks = extract_blocks(&tree)?;
    if blocks.is_empty() {
        log::warn!("No blocks found in '{}'", args.input.display());
    }

    let document = MetadataDocument::new(args.metadata_version, blocks);

    let mut output = args.output;
    if output.extension().is_none_or(|ext| ext != "json") {
        let mut name = output.file_name().unwrap_or_default().to_os_string();
        name.push(".json");
        output.set_file_name(name);
    }
    fs::write(&output, document.to_canonical_json()?)?;
    println!("Created {}", output.display());

    if let Some(messages_path) = args.messages {
        let messages = extract_messages(&document)?;
        let table = blockmeta::metadata::canonical_json(&serde_json::to_value(&messages)?)?;
        fs::write(&messages_path, table)?;
        println!("Created {}", messages_path.display());
    }
    Ok(())
}
