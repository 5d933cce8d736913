use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use fichascan::export::{CsvExporter, Exporter, JsonExporter};
use fichascan::pipeline::{acquire_plain_text, run_batch};
use fichascan::provider::{EmbeddedTextReader, OcrConfig, TesseractEngine};
use fichascan::{DocumentTemplate, ResolutionTemplate, Session, SocialTemplate};

#[derive(Parser, Debug)]
#[command(name = "fichascan")]
#[command(version, about = "Batch field extraction from student PDF records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract name, DNI and social risk level from ficha social PDFs
    Social {
        /// Input PDF files
        inputs: Vec<PathBuf>,

        /// Report destination (default: datos_estudiantes.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Only print the summary line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Extract name and case number from scanned Trans-Segen resolutions
    Resolution {
        /// Input PDF files
        inputs: Vec<PathBuf>,

        /// Report destination (default: datos_transegen.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Rendering resolution for pages without a text layer
        #[arg(long, default_value_t = 300)]
        dpi: u32,

        /// Tesseract language model
        #[arg(long, default_value = "spa")]
        lang: String,

        /// Skip the OCR latency confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Only print the summary line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Dump the raw page text acquired for the first input document
    Text {
        /// Which template's page window to use
        #[arg(short, long, value_enum)]
        template: TemplateKind,

        /// Input PDF files (only the first is dumped)
        inputs: Vec<PathBuf>,

        /// Also report each field rule's outcome on the dumped text
        #[arg(long)]
        rules: bool,

        /// Rendering resolution for pages without a text layer
        #[arg(long, default_value_t = 300)]
        dpi: u32,

        /// Tesseract language model
        #[arg(long, default_value = "spa")]
        lang: String,
    },

    /// Show basic information about a PDF file
    Info {
        /// Input PDF file path
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum TemplateKind {
    Social,
    Resolution,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Social {
            inputs,
            output,
            format,
            quiet,
        } => {
            let mut session = Session::new(SocialTemplate::new());
            load_inputs(&mut session, inputs)?;
            let out = output.unwrap_or_else(|| default_output("datos_estudiantes", format));
            extract_and_export(&mut session, &out, format, quiet)
        }
        Commands::Resolution {
            inputs,
            output,
            format,
            dpi,
            lang,
            yes,
            quiet,
        } => {
            if !TesseractEngine::is_available() {
                anyhow::bail!(
                    "OCR tools not found: install poppler-utils (pdftoppm) and tesseract-ocr"
                );
            }
            if !yes && !confirm_ocr_run()? {
                println!("Aborted.");
                return Ok(());
            }

            let config = OcrConfig {
                lang,
                dpi,
                ..OcrConfig::default()
            };
            let mut session = Session::new(ResolutionTemplate::new(config));
            load_inputs(&mut session, inputs)?;
            let out = output.unwrap_or_else(|| default_output("datos_transegen", format));
            extract_and_export(&mut session, &out, format, quiet)
        }
        Commands::Text {
            template,
            inputs,
            rules,
            dpi,
            lang,
        } => match template {
            TemplateKind::Social => {
                dump_text(Session::new(SocialTemplate::new()), inputs, rules)
            }
            TemplateKind::Resolution => {
                let config = OcrConfig {
                    lang,
                    dpi,
                    ..OcrConfig::default()
                };
                dump_text(Session::new(ResolutionTemplate::new(config)), inputs, rules)
            }
        },
        Commands::Info { input } => show_info(input),
    }
}

fn load_inputs<T: DocumentTemplate>(session: &mut Session<T>, inputs: Vec<PathBuf>) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }
    for input in &inputs {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
        if !input.is_file() {
            anyhow::bail!("Input is not a file: {}", input.display());
        }
    }

    let total = session.add_files(inputs);
    log::info!("loaded {} file(s): {:?}", total, session.file_names());
    Ok(())
}

fn extract_and_export<T: DocumentTemplate>(
    session: &mut Session<T>,
    out: &PathBuf,
    format: Format,
    quiet: bool,
) -> Result<()> {
    if !session.has_files() {
        anyhow::bail!("No documents loaded");
    }
    if !quiet {
        println!("[*] Processing {} file(s)", session.files().len());
    }

    let records = run_batch(session);
    let failed = records.iter().filter(|r| r.is_failed()).count();
    let success = records.len() - failed;

    if !quiet {
        for record in records {
            match record.fields() {
                Some(_) => println!("  [✓] {}", record.file_name),
                None => eprintln!("  [✗] {}", record.file_name),
            }
        }
    }

    match format {
        Format::Csv => CsvExporter::new(out.clone()).export(session.records())?,
        Format::Json => JsonExporter::new(out.clone()).export(session.records())?,
    }

    println!(
        "[*] Summary: {} succeeded, {} failed; report saved to {}",
        success,
        failed,
        out.display()
    );
    Ok(())
}

fn dump_text<T: DocumentTemplate>(
    mut session: Session<T>,
    inputs: Vec<PathBuf>,
    rules: bool,
) -> Result<()> {
    load_inputs(&mut session, inputs)?;
    let first = session.first_file().expect("inputs validated as non-empty");

    let text = acquire_plain_text(session.template(), first)
        .with_context(|| format!("Failed to acquire text from {}", first.display()))?;
    print!("{text}");

    if rules {
        println!("\n--- field rules ({}) ---", session.template().name());
        for rule in session.template().rules() {
            match rule.apply(&text) {
                Some(value) => println!("{}: {}", rule.name, value),
                None => println!("{}: <no match>", rule.name),
            }
        }
    }

    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let reader = EmbeddedTextReader::open(&input)
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;

    println!("PDF Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Pages: {}", reader.page_count());

    Ok(())
}

fn default_output(stem: &str, format: Format) -> PathBuf {
    match format {
        Format::Csv => PathBuf::from(format!("{stem}.csv")),
        Format::Json => PathBuf::from(format!("{stem}.json")),
    }
}

/// OCR runs for minutes on large batches; ask before committing to one.
fn confirm_ocr_run() -> Result<bool> {
    print!("OCR processing can take several minutes. Continue? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
