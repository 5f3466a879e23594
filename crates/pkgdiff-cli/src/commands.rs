use std::fs;

use anyhow::{bail, Context};
use colored::Colorize;

use pkgdiff_diff::{DiffConfig, RemovedContainerPolicy, Report};
use pkgdiff_sdk::{Package, PackageComparer};

use crate::cli::*;
use crate::render::render_report;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(&args.diff)?;
    let package = Package::load(&args.package)
        .with_context(|| format!("loading {}", args.package.display()))?;
    let other = Package::load(&args.other)
        .with_context(|| format!("loading {}", args.other.display()))?;

    let comparer = PackageComparer::new(config);
    let report = comparer.compare(&package, &other, &args.target)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(message) = report.error() {
                bail!("{message}");
            }
        }
        OutputFormat::Text => {
            let text = text_output(&package, &other, &report);
            if report.is_error() {
                eprint!("{text}");
                bail!("comparison failed");
            }
            print!("{text}");
        }
    }
    Ok(())
}

/// Text-mode output: a header line and the rendered report, or only the
/// rendered error for an error report.
fn text_output(package: &Package, other: &Package, report: &Report) -> String {
    if report.is_error() {
        return render_report(report);
    }
    format!(
        "Comparing {} {} → {}\n{}",
        package.id.bold(),
        other.version.yellow(),
        package.version.yellow(),
        render_report(report)
    )
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.diff)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Build the effective configuration: defaults, then the config file, then flags.
pub fn resolve_config(opts: &DiffOptions) -> anyhow::Result<DiffConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            DiffConfig::from_toml(&source)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DiffConfig::default(),
    };

    if let Some(context) = opts.context {
        config.context_size = context;
    }
    if opts.skip_removed {
        config.removed_containers = RemovedContainerPolicy::Skip;
    }
    if opts.strict_whitespace {
        config.ignore_whitespace = false;
    }
    Ok(config)
}
