//! runbook - Static runbook site generator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use runbook::site::{SiteOptions, build};
use runbook::{RenderConfig, Traversal};

#[derive(Parser)]
#[command(name = "runbook")]
#[command(version, about = "Static runbook site generator", long_about = None)]
#[command(after_help = "EXAMPLES:
    runbook -i index.tpl -t topic.tpl -r public/ toc.yml
    runbook -i index.tpl -t topic.tpl -r public/ --no-typographer toc.yml")]
struct Cli {
    /// Manifest listing the runbooks (YAML)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Template for the index page
    #[arg(short, long, value_name = "FILE")]
    index: PathBuf,

    /// Template for each runbook page
    #[arg(short, long, value_name = "FILE")]
    topic: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    root: PathBuf,

    /// Leave bare URLs as plain text
    #[arg(long)]
    no_linkify: bool,

    /// Leave punctuation as written
    #[arg(long)]
    no_typographer: bool,

    /// Also apply replacements inside nested inline content (image alt text)
    #[arg(long, conflicts_with = "no_typographer")]
    deep_typography: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    fn render_config(&self) -> RenderConfig {
        let traversal = if self.deep_typography {
            Traversal::Deep
        } else {
            Traversal::Shallow
        };
        RenderConfig::new()
            .with_linkify(!self.no_linkify)
            .with_typographer(!self.no_typographer)
            .with_traversal(traversal)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let options = SiteOptions::new(&cli.index, &cli.topic, &cli.manifest)
        .with_render(cli.render_config());

    match build(&options, &cli.root) {
        Ok(written) => {
            log::info!("{} pages written to {}", written.len(), cli.root.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
