use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, Parser, Subcommand};
use log::info;
use pss_viz::{BrandAssets, Renderer, health, storage};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "pss-viz",
    version,
    about = "Render football charts (pitch maps, radars, pizzas, rankings) to PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart request (JSON) to a base64 PNG response.
    Render(RenderArgs),
    /// Print the health payload.
    Health,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Request JSON file, or `-` for stdin.
    #[arg(short, long)]
    request: PathBuf,
    /// Replace the request's `data` with rows from this CSV (header line required).
    #[arg(long)]
    data_csv: Option<PathBuf>,
    /// Write the response JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write the decoded PNG to this path.
    #[arg(long)]
    png: Option<PathBuf>,
    /// Brand assets directory (logos/ and fonts/).
    #[arg(long, env = "PSS_VIZ_ASSETS", default_value = pss_viz::assets::DEFAULT_ASSETS_DIR)]
    assets_dir: PathBuf,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Health => {
            println!("{}", serde_json::to_string(&health())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_render(args: RenderArgs) -> Result<ExitCode> {
    let mut req = storage::load_request_json(&args.request)?;
    if let Some(csv) = args.data_csv.as_ref() {
        req.data = storage::load_rows_csv(csv)?;
        info!("loaded {} rows from {}", req.data.len(), csv.display());
    }

    let renderer = Renderer::new(BrandAssets::from_dir(&args.assets_dir));
    let resp = match renderer.render(&req) {
        Ok(resp) => resp,
        Err(e) if e.is_client_error() => {
            println!("{}", serde_json::to_string(&e.to_body())?);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let json = serde_json::to_string(&resp)?;
    match args.out.as_ref() {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote response to {}", path.display());
        }
        None => println!("{json}"),
    }

    if let Some(path) = args.png.as_ref() {
        let png = STANDARD
            .decode(&resp.image_base64)
            .context("decoding rendered image")?;
        storage::save_png(&png, path)?;
        eprintln!("Wrote image to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
