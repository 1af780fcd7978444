//! pdfreflow CLI - PDF to Markdown reflow tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfreflow::{
    write_output, BackendKind, ConvertOptions, ConvertResult, Converter,
    ExtractOptions, Extractor, FormatOptions, HeuristicVariant, JsonFormat, OutputFormat,
};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(about = "Extract text from PDFs and reflow it as Markdown", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (overwritten if present)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Heading heuristics
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Title keyword for the CJK variant (repeatable, replaces the defaults)
    #[arg(long = "title-keyword", value_name = "KEYWORD")]
    title_keywords: Vec<String>,

    /// Normalize text to Unicode NFC before formatting
    #[arg(long)]
    nfc: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: FormatArg,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// JSON file with formatting options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Extraction backend to try (repeatable, sets the order)
    #[arg(long = "backend", value_enum, value_name = "BACKEND")]
    backends: Vec<BackendArg>,

    /// Treat page-level errors as empty pages
    #[arg(long)]
    lenient: bool,

    /// Mark every page boundary, including empty pages
    #[arg(long)]
    keep_empty_pages: bool,

    /// Directory containing the pdfium shared library
    #[arg(long, value_name = "DIR", env = "PDFIUM_LIB_DIR")]
    pdfium_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract raw text without formatting
    Text {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show which extraction backends are available
    Backends {
        /// Directory containing the pdfium shared library
        #[arg(long, value_name = "DIR", env = "PDFIUM_LIB_DIR")]
        pdfium_dir: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Short lines without terminal punctuation become headings
    Generic,
    /// CJK reflow with bracket, marker and keyword headings
    Cjk,
}

impl From<VariantArg> for HeuristicVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Generic => HeuristicVariant::Generic,
            VariantArg::Cjk => HeuristicVariant::CjkAware,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// pdfium shared library
    Pdfium,
    /// pdf-extract crate
    PdfExtract,
    /// lopdf crate
    Lopdf,
}

impl From<BackendArg> for BackendKind {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Pdfium => BackendKind::Pdfium,
            BackendArg::PdfExtract => BackendKind::PdfExtract,
            BackendArg::Lopdf => BackendKind::Lopdf,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Markdown
    Markdown,
    /// JSON structure of the classified lines
    Json,
}

impl ExtractArgs {
    fn to_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if !self.backends.is_empty() {
            options = options.with_backends(self.backends.iter().map(|&b| BackendKind::from(b)));
        }
        if self.lenient {
            options = options.lenient();
        }
        if self.keep_empty_pages {
            options = options.keep_empty_pages();
        }
        if let Some(dir) = &self.pdfium_dir {
            options = options.with_pdfium_dir(dir);
        }
        options
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Text {
            input,
            output,
            extract,
        }) => cmd_text(input, output.as_deref(), extract),
        Some(Commands::Backends { pdfium_dir }) => cmd_backends(pdfium_dir.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (&cli.input, &cli.output) {
            (Some(input), Some(output)) => cmd_convert(input, output, &cli),
            _ => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "both <INPUT> and <OUTPUT> are required",
                )
                .exit(),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn format_options(cli: &Cli) -> Result<FormatOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.config {
        Some(path) => FormatOptions::from_file(path)?,
        None => FormatOptions::default(),
    };

    if let Some(variant) = cli.variant {
        options = options.with_variant(variant.into());
    }
    if !cli.title_keywords.is_empty() {
        options = options.with_title_keywords(cli.title_keywords.iter().cloned());
    }
    if cli.nfc {
        options = options.with_unicode_normalization(true);
    }

    Ok(options)
}

fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn cmd_convert(input: &Path, output: &Path, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output_format = match cli.format {
        FormatArg::Markdown => OutputFormat::Markdown,
        FormatArg::Json if cli.compact => OutputFormat::Json(JsonFormat::Compact),
        FormatArg::Json => OutputFormat::Json(JsonFormat::Pretty),
    };

    let options = ConvertOptions::new()
        .with_extract_options(cli.extract.to_options())
        .with_format_options(format_options(cli)?)
        .with_output_format(output_format);
    log::debug!("{:?}", options);

    let pb = spinner("Extracting text...")?;
    let result = Converter::new(options).convert_file(input, output);
    pb.finish_and_clear();

    let result = result?;
    print_summary(output, &result);
    Ok(())
}

fn print_summary(output: &Path, result: &ConvertResult) {
    let stats = result.stats();

    println!("{} {}", "Saved to".green(), output.display());
    println!("  {} backend: {}", "├─".dimmed(), result.backend);
    println!(
        "  {} pages: {} ({} empty)",
        "├─".dimmed(),
        result.page_count,
        result.empty_pages.len()
    );
    println!(
        "  {} lines: {} ({} headings, {} merged runs)",
        "└─".dimmed(),
        stats.line_count,
        stats.heading_count,
        stats.merged_runs
    );

    for attempt in result.attempts.iter().filter(|a| !a.succeeded()) {
        println!("  {}", attempt.to_string().dimmed());
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = Extractor::new(extract.to_options());

    let pb = spinner("Extracting text...")?;
    let extraction = extractor.extract(input);
    pb.finish_and_clear();

    let extraction = extraction?;
    if extraction.text.is_blank() {
        eprintln!(
            "{} {} extracted no text",
            "Warning:".yellow().bold(),
            extraction.backend
        );
    }

    if let Some(path) = output {
        write_output(path, extraction.text.as_str())?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", extraction.text);
    }

    Ok(())
}

fn cmd_backends(pdfium_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new();
    if let Some(dir) = pdfium_dir {
        options = options.with_pdfium_dir(dir);
    }

    println!("{}", "Extraction Backends".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (kind, availability) in Extractor::new(options).availability() {
        let status = match availability {
            Ok(()) => "available".green().to_string(),
            Err(e) => format!("{} ({})", "unavailable".red(), e.reason()),
        };
        println!("{:<12} {}", kind.name().bold(), status);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfreflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to Markdown reflow tool");
    println!();

    let compiled: Vec<&str> = BackendKind::ALL
        .iter()
        .filter(|kind| kind.is_compiled())
        .map(|kind| kind.name())
        .collect();
    println!("Backends: {}", compiled.join(", "));
    println!("License: MIT");
}
