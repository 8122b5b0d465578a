//! versebook CLI - DOCX poem collection and book formatting tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use versebook::book::{poems_to_json, JsonFormat};
use versebook::{
    BookOptions, BookOutcome, CollectEvent, CollectOptions, CollectOutcome, Collector, Pipeline,
    Restructurer, DEFAULT_BOOK_FILENAME,
};

#[derive(Parser)]
#[command(name = "versebook")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Collect DOCX poems and typeset them as a poetry book", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge every DOCX in a folder into one consolidated document
    Collect {
        #[command(flatten)]
        collect: CollectArgs,
    },

    /// Format a consolidated document as a poetry book
    Format {
        /// Consolidated document
        #[arg(
            value_name = "FILE",
            env = "VERSEBOOK_CONSOLIDATED",
            default_value = "output/consolidado.docx"
        )]
        input: PathBuf,

        /// Output book file
        #[arg(short, long, value_name = "FILE", env = "VERSEBOOK_BOOK")]
        output: Option<PathBuf>,

        #[command(flatten)]
        book: BookArgs,
    },

    /// Collect a folder and format the result in one go
    Build {
        #[command(flatten)]
        collect: CollectArgs,

        /// File name of the book inside the output folder
        #[arg(long, value_name = "NAME", default_value = DEFAULT_BOOK_FILENAME)]
        book_name: String,

        #[command(flatten)]
        book: BookArgs,
    },

    /// List the poems detected in a consolidated document
    Poems {
        /// Consolidated document
        #[arg(
            value_name = "FILE",
            env = "VERSEBOOK_CONSOLIDATED",
            default_value = "output/consolidado.docx"
        )]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct CollectArgs {
    /// Folder with the source documents
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "VERSEBOOK_INPUT",
        default_value = "input"
    )]
    input: PathBuf,

    /// Output folder
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "VERSEBOOK_OUTPUT",
        default_value = "output"
    )]
    output: PathBuf,

    /// File name of the consolidated document
    #[arg(long, value_name = "NAME", default_value = "consolidado.docx")]
    name: String,

    /// Do not insert a title block before each file
    #[arg(long)]
    no_titles: bool,
}

impl CollectArgs {
    fn options(&self) -> CollectOptions {
        CollectOptions::new()
            .with_input_dir(&self.input)
            .with_output_dir(&self.output)
            .with_output_filename(&self.name)
            .with_titles(!self.no_titles)
    }
}

#[derive(Args)]
struct BookArgs {
    /// Book title
    #[arg(
        short,
        long,
        env = "VERSEBOOK_TITLE",
        default_value = versebook::book::DEFAULT_BOOK_TITLE
    )]
    title: String,

    /// Author shown on the title page
    #[arg(short, long, env = "VERSEBOOK_AUTHOR", default_value = "")]
    author: String,
}

impl BookArgs {
    fn options(&self) -> BookOptions {
        BookOptions::new()
            .with_title(&self.title)
            .with_author(&self.author)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Collect { collect }) => cmd_collect(&collect),
        Some(Commands::Format {
            input,
            output,
            book,
        }) => cmd_format(&input, output.as_deref(), &book),
        Some(Commands::Build {
            collect,
            book_name,
            book,
        }) => cmd_build(&collect, &book_name, &book),
        Some(Commands::Poems {
            input,
            json,
            compact,
        }) => cmd_poems(&input, json, compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: versebook <COMMAND>".yellow());
            println!("       versebook --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Progress handling shared by `collect` and `build`.
fn report_progress(pb: &ProgressBar, event: CollectEvent<'_>) {
    match event {
        CollectEvent::Started { source, .. } => pb.set_message(source.name.clone()),
        CollectEvent::Consolidated { .. } => pb.inc(1),
        CollectEvent::Skipped { source, error } => {
            pb.println(format!(
                "  {} {}: {}",
                "skipped".yellow(),
                source.name,
                error
            ));
            pb.inc(1);
        }
    }
}

fn print_collect_summary(outcome: &CollectOutcome) {
    let report = &outcome.report;
    println!(
        "{} {} of {} documents",
        "Consolidated".green().bold(),
        report.consolidated.len(),
        report.attempted()
    );
    for failure in &report.failures {
        println!("  {} {}", "✗".red(), failure.source.name);
    }
    println!("{} {}", "Saved to".green(), outcome.path.display());
}

fn print_book_summary(outcome: &BookOutcome) {
    let stats = &outcome.report.stats;
    println!(
        "{} {} poems, {} stanzas, {} lines",
        "Formatted".green().bold(),
        stats.poem_count,
        stats.stanza_count,
        stats.line_count
    );
    if stats.poem_count == 0 {
        println!(
            "  {}",
            "no title markers were found; was the document made by `versebook collect`?".yellow()
        );
    }
    println!("{} {}", "Saved to".green(), outcome.path.display());
}

fn cmd_collect(args: &CollectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let collector = Collector::new(args.options());
    let sources = collector.discover()?;

    println!(
        "{} {} documents in {}",
        "Found".cyan(),
        sources.len(),
        args.input.display()
    );

    let pb = progress_bar(sources.len());
    let report = collector.collect_with(&sources, |event| report_progress(&pb, event));
    pb.finish_and_clear();

    let report = report?;
    let path = collector.write(&report)?;
    print_collect_summary(&CollectOutcome { path, report });

    Ok(())
}

fn cmd_format(
    input: &Path,
    output: Option<&Path>,
    book: &BookArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_BOOK_FILENAME)
    });

    let outcome = Restructurer::new(book.options()).run(input, &output)?;
    print_book_summary(&outcome);

    Ok(())
}

fn cmd_build(
    collect: &CollectArgs,
    book_name: &str,
    book: &BookArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new()
        .with_collect_options(collect.options())
        .with_book_options(book.options())
        .with_book_filename(book_name);

    let pb = progress_bar(0);
    let outcome = pipeline.run_with(|event| {
        if let CollectEvent::Started { total, .. } = event {
            pb.set_length(total as u64);
        }
        report_progress(&pb, event);
    });
    pb.finish_and_clear();

    let outcome = outcome?;
    print_collect_summary(&outcome.collected);
    println!();
    print_book_summary(&outcome.book);

    Ok(())
}

fn cmd_poems(input: &Path, json: bool, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let poems = Restructurer::default().read_poems(input)?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", poems_to_json(&poems, format)?);
        return Ok(());
    }

    println!("{}", "Poems".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (idx, poem) in poems.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            idx + 1,
            poem.title.bold(),
            format!("({} lines)", poem.line_count()).dimmed()
        );
    }
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Total".bold(), poems.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "versebook".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX poem collection and book formatting tool");
    println!();
    println!("License: MIT");
}
