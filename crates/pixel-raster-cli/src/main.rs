//! Pixel Raster Control Tool
//!
//! CLI for inspecting pixel formats and rendering scene files into packed
//! display buffers.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixel_raster::{Buffer, Color, Format, Image};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "pixelctl")]
#[command(about = "Inspect pixel formats and render scenes into packed buffers")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show buffer geometry for a pixel format
    Info {
        /// Format: mhmsb, mvlsb, rgb332, rgb565, rgb888, rgba4444, rgba5551
        #[arg(long, default_value = "mvlsb")]
        format: Format,

        /// Width in pixels
        #[arg(long, default_value = "128")]
        width: u16,

        /// Height in pixels
        #[arg(long, default_value = "64")]
        height: u16,
    },
    /// Show how a color is encoded by every format
    Color {
        /// Color in hex format (e.g., #FF8000)
        color: Color,
    },
    /// Render a scene file into a buffer
    Render {
        /// Scene configuration (TOML)
        config: PathBuf,

        /// PNG preview output path
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Also write the packed buffer bytes to this path
        #[arg(long)]
        raw: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&env, cli.verbose)?)
        .init();

    match cli.command {
        Commands::Info {
            format,
            width,
            height,
        } => handle_info(format, width, height),
        Commands::Color { color } => handle_color(color),
        Commands::Render {
            config,
            output,
            raw,
        } => handle_render(&config, &output, raw.as_deref()),
    }
}

/// Builds the log filter from `RUST_LOG` directives plus the default level.
fn log_filter(env: &str, verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { "warn" };
    Ok(EnvFilter::new(env).add_directive(level.parse()?))
}

fn handle_info(format: Format, width: u16, height: u16) -> Result<()> {
    println!("Format:         {} (code {})", format, format.code());
    println!("Dimensions:     {}x{}", width, height);
    println!("Bits per pixel: {}", format.bits_per_pixel());
    let unit = if format.is_monochrome() { "pixels" } else { "bytes" };
    println!("Stride:         {} {}", format.stride(width), unit);
    println!("Buffer length:  {} bytes", format.buffer_len(width, height));
    Ok(())
}

fn handle_color(color: Color) -> Result<()> {
    println!("Color: {}", color);
    for format in Format::ALL {
        let mut pixel = Buffer::new(1, 1, format);
        pixel.set(0, 0, color);
        let bytes: Vec<String> = pixel.raw().pix.iter().map(|b| format!("{:02X}", b)).collect();
        println!(
            "  {:<9} {:<9} -> {}",
            format.to_string(),
            bytes.join(" "),
            pixel.at(0, 0)
        );
    }
    Ok(())
}

fn handle_render(config_path: &Path, output: &Path, raw: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", config_path.display());

    let buffer = config.render()?;

    let png_data = encode_png(&buffer)?;
    std::fs::write(output, png_data).context("Failed to write PNG preview")?;
    println!("Preview saved to: {}", output.display());

    if let Some(path) = raw {
        std::fs::write(path, buffer.raw().pix).context("Failed to write raw buffer")?;
        println!(
            "Raw {} buffer ({} bytes) saved to: {}",
            buffer.format(),
            buffer.raw().pix.len(),
            path.display()
        );
    }
    Ok(())
}

/// Encodes the buffer as an 8-bit RGBA PNG.
fn encode_png(buffer: &Buffer) -> Result<Vec<u8>> {
    let rgba = buffer.to_rgba8();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().context("Failed to write PNG header")?;
        writer
            .write_image_data(&rgba)
            .context("Failed to encode PNG data")?;
    }

    Ok(png_data)
}
