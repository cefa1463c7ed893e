mod cli;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use srcmerge::{get_config_path, load_config, save_repo_config, Exporter, REPO_CONFIG_FILE};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    if args.config_path {
        let path = get_config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref(), &args.root)?;
    let config = args.apply(config)?;

    if args.save_config {
        let repo_config = args.root.join(REPO_CONFIG_FILE);
        save_repo_config(&repo_config, &config)?;
        println!("Configuration saved to {}", repo_config.display());
    }

    let output = config.output_in(&args.root);
    let summary = Exporter::new(&args.root, &output)
        .with_progress(true)
        .export(&config.policy)?;

    println!("Exported {} files to {}", summary.files, output.display());

    Ok(())
}
