//! CLI application for extracting invoice fields with a local vision model.

mod extract;

use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use extract::ExtractArgs;

/// Extract structured invoice data from an image with a local vision model
#[derive(Parser)]
#[command(name = "invex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    args: ExtractArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if cli.args.print_config {
        return extract::print_config(&cli.args);
    }

    if cli.args.image.is_none() {
        println!("{}", Cli::command().render_usage());
        println!("Example: invex invoice.png");
        std::process::exit(1);
    }

    extract::run(cli.args).await
}
