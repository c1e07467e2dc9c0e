use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use course_filter::config::Config;
use course_filter::dataset;
use course_filter::filter::{filter_sections, FilterSummary};
use course_filter::logging;

#[derive(Parser)]
#[command(name = "course-filter")]
#[command(about = "Cleans the enriched course catalog for the discovery app")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file holding the dataset locations
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Input dataset, overriding the config file
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output destination, overriding the config file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn print_summary(summary: &FilterSummary, output: &std::path::Path) {
    println!("Input: {} courses", summary.input_total);
    println!(
        "Removed {} courses with schd outside (S, L)",
        summary.removed_by_schd
    );
    println!("Removed {} lab-only courses", summary.lab_only_dropped);
    println!(
        "\nOutput: {} courses → {}",
        summary.output_total,
        output.display()
    );
    println!("\nStats:");
    println!("  Unique course codes: {}", summary.unique_codes);
    println!("  Unique departments: {}", summary.unique_departments);
    println!(
        "  Courses with multiple sections: {}",
        summary.multi_section_courses
    );
    println!(
        "  With enrollment data: {}/{}",
        summary.with_enrollment, summary.output_total
    );
    println!(
        "  With designations: {}/{}",
        summary.with_designations, summary.output_total
    );
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config).context("Failed to load configuration")?;
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    println!("🔄 Filtering course catalog...");
    info!(input = %config.input.display(), output = %config.output.display(), "starting filter run");

    let sections = dataset::load_sections(&config.input)?;
    let (cleaned, summary) = filter_sections(sections);
    dataset::write_sections(&config.output, &cleaned)?;

    info!(
        input_total = summary.input_total,
        output_total = summary.output_total,
        "filter run finished"
    );
    print_summary(&summary, &config.output);
    println!("\n✅ Catalog filtering completed successfully");

    Ok(())
}
