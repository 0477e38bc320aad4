// Image transclusion CLI
//
// `serve` runs the editor-facing HTTP endpoints. `inline` and `deinline`
// convert a single HTML file (or stdin) and write the result to stdout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image_transclusion::utils::{DEFAULT_BIND_ADDR, DEFAULT_UPLOAD_DIR, DEFAULT_URL_PREFIX};
use image_transclusion::{Direction, TransclusionConfig, convert_bytes};
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "image-transclusion", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve image uploads and document conversion over HTTP
    Serve {
        #[arg(long, env = "TRANSCLUSION_BIND", default_value = DEFAULT_BIND_ADDR)]
        bind: SocketAddr,

        #[command(flatten)]
        store: StoreArgs,
    },
    /// Replace disk-backed images with base64 data URIs
    Inline(ConvertArgs),
    /// Move base64 data URIs to disk and reference them by URL
    Deinline(ConvertArgs),
}

#[derive(Args)]
struct StoreArgs {
    /// Directory holding stored images
    #[arg(long, env = "TRANSCLUSION_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    /// URL prefix the upload directory is served under
    #[arg(long, env = "TRANSCLUSION_URL_PREFIX", default_value = DEFAULT_URL_PREFIX)]
    url_prefix: String,

    /// Keep stored images larger than this many bytes disk-backed when inlining
    #[arg(long, env = "TRANSCLUSION_MAX_INLINE_BYTES")]
    max_inline_bytes: Option<usize>,
}

impl StoreArgs {
    fn into_config(self) -> Result<TransclusionConfig> {
        let mut builder = TransclusionConfig::builder()
            .upload_dir(self.upload_dir)
            .url_prefix(self.url_prefix);
        if let Some(bytes) = self.max_inline_bytes {
            builder = builder.max_inline_size_bytes(bytes);
        }
        builder.build()
    }
}

#[derive(Args)]
struct ConvertArgs {
    /// HTML file to convert, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Write the converted HTML here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[command(flatten)]
    store: StoreArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve { bind, store } => {
            image_transclusion::server::serve(bind, store.into_config()?).await
        }
        Command::Inline(args) => convert(args, Direction::Inline),
        Command::Deinline(args) => convert(args, Direction::DeInline),
    }
}

fn convert(args: ConvertArgs, direction: Direction) -> Result<()> {
    let config = args.store.into_config()?;
    let input = read_input(&args.input)?;

    let result = convert_bytes(&input, direction, &config)
        .with_context(|| format!("Failed to {direction} {}", args.input.display()))?;

    for failure in &result.failures {
        log::warn!("Not converted: {} ({})", failure.src, failure.error);
    }
    log::info!(
        "Converted {} of {} candidate images ({:.0}% failed)",
        result.successes,
        result.total(),
        result.failure_rate() * 100.0
    );

    match args.output {
        Some(path) => std::fs::write(&path, result.html)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => std::io::stdout()
            .write_all(result.html.as_bytes())
            .context("Failed to write to stdout"),
    }
}

/// Raw input bytes; UTF-8 is checked when the document is parsed
fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut html = Vec::new();
        std::io::stdin()
            .read_to_end(&mut html)
            .context("Failed to read HTML from stdin")?;
        Ok(html)
    } else {
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
    }
}
