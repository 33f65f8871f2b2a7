//! Command-line entry point.
//!
//! Renders an image into thermal-printer artifacts, optionally sends them to a
//! printer, and exposes the prompt builder and the effective settings.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pegavox_lib::AppConfig;
use pegavox_lib::collaborators::{AllowAll, FileImageSource, StaticTranscript};
use pegavox_lib::prompt::build_pixel_art_prompt;
use pegavox_lib::services::artifacts::ArtifactPaths;
use pegavox_lib::services::printer;
use pegavox_lib::services::render::{RenderOutput, load_image, render_image};
use pegavox_lib::services::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize an image file into PNG, raw bitmap and ESC/POS artifacts
    Render {
        /// Source image (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run the full flow with a fixed transcript and a local image as the generator
    Session {
        /// Transcribed subject text
        #[arg(short, long)]
        transcript: String,

        /// Image returned in place of the generated one
        #[arg(short, long)]
        image: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the image-generation prompt for a subject
    Prompt {
        /// Subject words
        #[arg(required = true)]
        subject: Vec<String>,
    },
    /// Send a stored .escpos.bin command stream to the configured printer
    Print {
        /// Command file produced by `render`
        file: PathBuf,
    },
    /// Show effective settings as JSON
    Settings,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Prefix for output files (overrides OUT_PREFIX)
    #[arg(long)]
    out_prefix: Option<String>,

    /// Target printer width in pixels (overrides PRINTER_WIDTH)
    #[arg(long)]
    printer_width: Option<u32>,

    /// Pixelation width, 0 disables (overrides PIXELATE_WIDTH)
    #[arg(long)]
    pixelate_width: Option<u32>,

    /// Write debug artifacts (overrides DEBUG_OUTPUT)
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Send the result to the configured printer
    #[arg(long, default_value_t = false)]
    send: bool,

    /// Print the render summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl OutputArgs {
    fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(prefix) = &self.out_prefix {
            config.set("OUT_PREFIX", prefix)?;
        }
        if let Some(width) = self.printer_width {
            config.set("PRINTER_WIDTH", &width.to_string())?;
        }
        if let Some(width) = self.pixelate_width {
            config.set("PIXELATE_WIDTH", &width.to_string())?;
        }
        if self.debug {
            config.debug_output = true;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = pegavox_lib::init_config()?;

    match cli.command {
        Command::Render { input, output } => {
            output.apply(&mut config)?;
            let paths = ArtifactPaths::from_prefix(&config.out_prefix);
            let image = load_image(&input)?;
            if config.debug_output {
                pegavox_lib::services::artifacts::save_png(&paths.generated, &image)?;
            }
            let rendered = render_image(image, &config.render_config(), &paths)?;
            finish(&config, &output, &rendered).await?;
        }
        Command::Session {
            transcript,
            image,
            output,
        } => {
            output.apply(&mut config)?;
            let paths = ArtifactPaths::from_prefix(&config.out_prefix);
            let session = Session::new(
                StaticTranscript(transcript),
                AllowAll,
                FileImageSource::new(image),
                config.render_config(),
                paths,
            )
            .with_debug_output(config.debug_output);
            let outcome = session.run(&[])?;
            finish(&config, &output, &outcome.render).await?;
        }
        Command::Prompt { subject } => {
            println!("{}", build_pixel_art_prompt(&subject.join(" ")));
        }
        Command::Print { file } => {
            printer::print_file(&config, &file)
                .await
                .with_context(|| format!("printing {}", file.display()))?;
            println!("OK");
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&config.settings())?);
        }
    }

    Ok(())
}

/// Report the written artifacts and optionally send the job.
async fn finish(config: &AppConfig, output: &OutputArgs, rendered: &RenderOutput) -> anyhow::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&rendered.report)?);
    } else {
        let report = &rendered.report;
        println!("OK");
        println!("Saved: {}", report.final_png.display());
        println!("Saved: {} (raw packed 1-bit rows)", report.bitmap.display());
        println!("Saved: {} (ESC/POS GS v 0 raster command)", report.escpos.display());
    }

    if output.send {
        printer::print_command(config, &rendered.command).await?;
        tracing::info!("Print job sent");
    }
    Ok(())
}
