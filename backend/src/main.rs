//! POC Deck CLI - Generate decks from an Excel datasheet and a template
//!
//! ```bash
//! pocdeck serve                                  # Start HTTP server (port 3000)
//! pocdeck generate data.xlsx -t template.pptx    # Generate locally
//! ```
//!
//! Settings not given on the command line come from `POCDECK_*`
//! environment variables (see `pocdeck::config`).

use clap::{Parser, Subcommand};
use pocdeck::{generate_deck, GenerationInputs, GeneratorCommand, ServerConfig, UploadedFile};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pocdeck")]
#[command(about = "Generate a PowerPoint deck from an Excel datasheet and a template", long_about = None)]
struct Cli {
    /// Generator command line (overrides POCDECK_GENERATOR)
    #[arg(long, global = true)]
    generator: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides POCDECK_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one generation locally, without the server
    Generate {
        /// Excel datasheet (.xlsx or .xls)
        excel: PathBuf,

        /// PowerPoint template (default: POCDECK_DEFAULT_TEMPLATE)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Where to write the deck
        #[arg(short, long, default_value = "updated_poc.pptx")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match load_config(cli.generator.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Serve { port } => cmd_serve(config, port).await,
            Commands::Generate { excel, template, output } => {
                cmd_generate(config, &excel, template.as_deref(), &output).await
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(generator: Option<&str>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(command_line) = generator {
        let timeout = config.generation.generator.timeout();
        config.generation.generator = GeneratorCommand::parse(command_line)?.with_timeout(timeout);
    }
    Ok(config)
}

async fn cmd_serve(mut config: ServerConfig, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.port = port;
    }
    pocdeck::server::start_server(config).await?;
    Ok(())
}

async fn cmd_generate(
    config: ServerConfig,
    excel: &Path,
    template: Option<&Path>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Datasheet: {}", excel.display());

    let excel = read_upload(excel)?;
    let template = match template {
        Some(path) => {
            eprintln!("📄 Template:  {}", path.display());
            Some(read_upload(path)?)
        }
        None => None,
    };

    let inputs = GenerationInputs::new(Some(excel), template)?;
    let deck = generate_deck(&inputs, &config.generation).await?;

    fs::write(output, &deck)?;
    eprintln!("💾 Deck written to: {} ({} bytes)", output.display(), deck.len());
    eprintln!("\n✨ Done!");
    Ok(())
}

fn read_upload(path: &Path) -> Result<UploadedFile, Box<dyn std::error::Error>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = fs::read(path)?;
    Ok(UploadedFile::new(file_name, bytes))
}
