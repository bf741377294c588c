use clap::{Parser, Subcommand};
use simple_folio::dom::Document;
use simple_folio::gallery::GalleryLoader;
use simple_folio::github::GitHubClient;
use simple_folio::{config, output, render};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Project gallery for one-page portfolios")]
#[command(long_about = "\
Project gallery for one-page portfolios

Fetches an account's repositories from GitHub, keeps the non-fork,
non-archived ones, picks a featured or most-recent handful, and renders
them as project cards.

Configuration lives in config.toml inside --config-dir:

  [github]
  account = \"Aaron-2005\"
  featured = [\"folio\", \"engine\"]   # empty = most recently updated

  [gallery]
  max_cards = 4

Set RUST_LOG=debug to see the requests being made.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch repositories and render the gallery markup
    Render {
        /// Write the markup here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the loading-state skeleton markup
    Skeleton,
    /// Validate config.toml and summarize it
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { output: target } => {
            let site_config = config::load_config(&cli.config_dir)?;
            let client = GitHubClient::new(&site_config.github.api_base)?;

            let mut doc = Document::new();
            let container = doc.append_new(doc.body(), "div");
            doc.set_id(container, &site_config.gallery.container_id);

            let mut loader = GalleryLoader::new(&site_config, &client);
            let state = loader.load(&mut doc, None).await;

            let markup = doc.inner_html(container);
            match &target {
                Some(path) => std::fs::write(path, &markup)?,
                None => println!("{}", markup),
            }
            // Keep stdout clean for the markup when no file was given.
            if target.is_some() {
                output::print_render_output(state, loader.repos());
            } else {
                output::write_render_output(&mut std::io::stderr(), state, loader.repos())?;
            }
        }
        Command::Skeleton => {
            let site_config = config::load_config(&cli.config_dir)?;
            println!(
                "{}",
                render::skeletons(site_config.gallery.skeleton_count).into_string()
            );
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config_dir)?;
            output::print_check_output(&site_config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
