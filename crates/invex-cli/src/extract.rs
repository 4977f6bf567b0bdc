//! Extract command - send one invoice image to the model and save the result.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use invex_core::{
    ExtractionResult, InferenceClient, InvexConfig, InvexError, OutputWriter, ParsedJson,
    encode_image,
};

const BANNER_WIDTH: usize = 50;

/// Arguments for extraction.
#[derive(Args)]
pub struct ExtractArgs {
    /// Invoice image to extract fields from
    pub image: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generation endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Output directory for result records
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Read the prompt from a file instead of the built-in invoice prompt
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    timeout: Option<u64>,

    /// Request streamed delivery from the endpoint
    #[arg(long)]
    stream: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl ExtractArgs {
    /// Load the config file, if any, and apply command-line overrides.
    fn effective_config(&self) -> anyhow::Result<InvexConfig> {
        let mut config = match &self.config {
            Some(path) => InvexConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => InvexConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.inference.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.inference.model = model.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.output.dir = dir.clone();
        }
        if let Some(file) = &self.prompt_file {
            config.prompt.file = Some(file.clone());
        }
        if let Some(secs) = self.timeout {
            config.inference.timeout_secs = Some(secs);
        }
        if self.stream {
            config.inference.stream = true;
        }

        Ok(config)
    }
}

pub fn print_config(args: &ExtractArgs) -> anyhow::Result<()> {
    let config = args.effective_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let config = args.effective_config()?;

    let image_path = args.image.context("No image path given")?;

    // Check input file exists
    if !image_path.exists() {
        return Err(InvexError::ImageNotFound(image_path).into());
    }

    let prompt = config.prompt_text().context("Failed to read prompt file")?;
    let image = encode_image(&image_path)?;
    let client = InferenceClient::new(config.inference.clone())?;
    let request = client.request(prompt, image);

    println!("Processing image: {}", image_path.display());
    println!("Using model: {}", request.model);
    println!("Please wait...");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(format!("Waiting for {}", config.inference.endpoint));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let start = Instant::now();
    let outcome = client.generate(&request).await;
    let elapsed = start.elapsed();

    spinner.finish_and_clear();

    if let Err(e) = &outcome {
        warn!("Inference call failed: {}", e);
    }
    let result = ExtractionResult::from_outcome(outcome);

    let rule = "=".repeat(BANNER_WIDTH);
    println!();
    println!("{rule}");
    println!("RESULT:");
    println!("{rule}");
    println!("{}", result.raw_text);
    println!("{rule}");
    println!("Processing time: {:.2} seconds", elapsed.as_secs_f64());

    if result.is_transport_failure() {
        eprintln!(
            "{} The inference call failed; the error is recorded in the output.",
            style("✗").red()
        );
    } else if let ParsedJson::Failed(diagnostic) = &result.parsed_json {
        eprintln!(
            "{} Model output is not valid JSON: {}",
            style("⚠").yellow(),
            diagnostic.parse_error
        );
    }

    let writer = OutputWriter::new(config.output.dir.clone());
    let output_path = writer.write(&result, &image_path, &request.model, elapsed)?;
    debug!("Total run time: {:?}", start.elapsed());

    println!("Output saved to: {}", output_path.display());

    Ok(())
}
