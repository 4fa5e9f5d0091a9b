// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand};
use photo_share::app::utils::parse_resolution;
use photo_share::config::Resolution;
use photo_share::{Config, FormField, FormRecord};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photo-share")]
#[command(about = "Send form data and photos to WhatsApp")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// JSON configuration file (defaults apply when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the form text and photos
    Share {
        #[command(flatten)]
        form: FormArgs,

        /// Phone number for a direct conversation
        #[arg(long)]
        phone: Option<String>,

        /// Photo file to attach (repeatable)
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,

        /// Pick photos with the file dialog
        #[arg(long)]
        pick: bool,

        /// Capture one frame from this image as if it were a camera
        #[arg(long)]
        camera: Option<PathBuf>,

        /// The --camera source is a front-facing camera
        #[arg(long, requires = "camera")]
        front: bool,

        /// Resolution hint for the camera request (e.g. 1280x720)
        #[arg(long, value_parser = resolution_arg)]
        resolution: Option<(u32, u32)>,
    },

    /// Compress an image the way picked photos are compressed
    Compress {
        /// Input image
        input: PathBuf,

        /// Output JPEG path
        output: PathBuf,
    },

    /// Print the message that would be shared
    Message {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long, default_value = "")]
    nome: String,
    #[arg(long, default_value = "")]
    mae: String,
    #[arg(long, default_value = "")]
    pai: String,
    /// Date of birth
    #[arg(long, default_value = "")]
    nascimento: String,
    #[arg(long, default_value = "")]
    rg: String,
    #[arg(long, default_value = "")]
    cpf: String,
}

impl From<FormArgs> for FormRecord {
    fn from(args: FormArgs) -> Self {
        let mut form = FormRecord::default();
        form.set(FormField::Nome, args.nome);
        form.set(FormField::Mae, args.mae);
        form.set(FormField::Pai, args.pai);
        form.set(FormField::Nascimento, args.nascimento);
        form.set(FormField::Rg, args.rg);
        form.set(FormField::Cpf, args.cpf);
        form
    }
}

fn resolution_arg(value: &str) -> Result<(u32, u32), String> {
    parse_resolution(value).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photo_share=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Share {
            form,
            phone,
            photos,
            pick,
            camera,
            front,
            resolution,
        } => {
            if let Some((width, height)) = resolution {
                config.ideal_resolution = Resolution::new(width, height);
            }
            cli::share(
                config,
                cli::ShareOptions {
                    form: form.into(),
                    phone,
                    photos,
                    pick,
                    camera,
                    front,
                },
            )
        }
        Commands::Compress { input, output } => cli::compress(&config, &input, &output),
        Commands::Message { form } => {
            cli::print_message(&form.into());
            Ok(())
        }
    }
}
