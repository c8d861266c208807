//! pdf-outline CLI - PDF title and heading extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::render::{self, JsonFormat};
use pdf_outline::{
    BatchOptions, BatchSummary, HeadingLevel, LopdfSource, OutlineExtractor, OutlineResult,
    PageTextSource, SourceOptions,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract titles and H1-H4 outlines from PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_INPUT", default_value = "sample_dataset/pdfs")]
        input: PathBuf,

        /// Directory for the per-document JSON files
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
        output: PathBuf,

        /// Directory for the published JSON Schema
        #[arg(long, value_name = "DIR", default_value = "schema")]
        schema_dir: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Also write the run summary to this file
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },

    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the JSON Schema of outline results
    Schema {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document statistics and the inferred outline
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            schema_dir,
            sequential,
            compact,
            summary,
        }) => {
            let options = BatchOptions::new()
                .with_input_dir(input)
                .with_output_dir(output)
                .with_schema_dir(schema_dir)
                .with_parallel(!sequential)
                .with_format(json_format(compact));
            cmd_batch(options, summary.as_deref())
        }
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&input, output.as_deref(), compact),
        Some(Commands::Schema { output }) => cmd_schema(output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: pdf-outline <COMMAND>".yellow());
            println!("       pdf-outline --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_batch(options: BatchOptions, summary_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Processing PDFs in {}...", options.input_dir.display()));

    let summary = pdf_outline::run_batch(options);
    pb.finish_and_clear();
    let summary = summary?;

    print_summary(&summary);

    if let Some(path) = summary_path {
        render::write_json(&summary, path, JsonFormat::Pretty)?;
        println!("{} {}", "Summary saved to".green(), path.display());
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    for report in &summary.results {
        let mark = if report.success {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {} {} ({} headings)",
            mark,
            report.file,
            "─".dimmed(),
            report.headings_count
        );
        println!("      {}", report.title.trim_end().dimmed());
    }

    println!();
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Files".bold(), summary.total_files);
    println!("{}: {}", "Successful".bold(), summary.successful.to_string().green());
    if summary.failed() > 0 {
        println!("{}: {}", "Failed".bold(), summary.failed().to_string().red());
    }
    println!("{}: {}", "Headings".bold(), summary.total_headings);
    match &summary.schema_file {
        Some(file) => println!("{}: {}", "Schema".bold(), file),
        None => println!("{}: {}", "Schema".bold(), "not written".yellow()),
    }
}

fn cmd_extract(input: &Path, output: Option<&Path>, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = pdf_outline::extract_outline(input)?;
    let json = render::to_json(&result, json_format(compact))?;
    write_or_print(&json, output)
}

fn cmd_schema(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = render::value_to_json(&render::outline_schema(), JsonFormat::Pretty)?;
    write_or_print(&json, output)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient: unreadable pages are skipped
    let source = LopdfSource::with_options(SourceOptions::new().lenient());
    let doc = source.load(input)?;
    let version = pdf_outline::sniff_pdf_version(input)?;
    let report = OutlineExtractor::new().analyze(&doc);
    log::debug!("{} pages read, {} lines merged", doc.pages.len(), report.lines.len());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), version);
    println!("{}: {}", "Pages".bold(), report.info.page_count);
    if let Some(ref creator) = report.info.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = report.info.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let analysis = &report.analysis;
    println!("{}: {}", "Lines".bold(), analysis.total_lines);
    println!("{}: {}", "Bold lines".bold(), analysis.bold_lines);
    println!("{}: {}", "Fonts".bold(), analysis.fonts.len());
    println!("{}: {}", "Script".bold(), analysis.dominant_script());
    println!("{}: {}", "Genre".bold(), analysis.genre);
    if let Some(ref stats) = analysis.size_stats {
        println!(
            "{}: mean {:.1}, median {:.1}, mode {:.1}, p90 {:.1} ({} sizes)",
            "Font sizes".bold(),
            stats.mean,
            stats.median,
            stats.mode,
            stats.percentile_90,
            stats.unique_sizes
        );
    }
    let thresholds: Vec<String> = report
        .thresholds
        .iter()
        .map(|(level, size)| format!("{} ≥ {:.1}", level, size))
        .collect();
    if !thresholds.is_empty() {
        println!("{}: {}", "Thresholds".bold(), thresholds.join(", "));
    }

    println!();
    print_outline(&report.result);

    Ok(())
}

fn print_outline(result: &OutlineResult) {
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title".bold(), result.title.trim_end());

    for heading in &result.outline {
        let indent = "  ".repeat(heading.level.depth() as usize - 1);
        let label = match heading.level {
            HeadingLevel::H1 => heading.level.as_str().green().bold(),
            _ => heading.level.as_str().green(),
        };
        println!(
            "{}{} {} {}",
            indent,
            label,
            heading.text.trim_end(),
            format!("p.{}", heading.page).dimmed()
        );
    }
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/pdf-outline".dimmed());
    println!("License: MIT");
}
