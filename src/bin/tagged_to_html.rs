//! Render a tagged document dump to HTML
//!
//! Reads a JSON page dump produced by a document parser, compiles the
//! structure tree of every page in range and writes semantic HTML (or the
//! compiled tree as JSON).
//!
//! Usage:
//!   cargo run --release --bin tagged_to_html -- dump.json
//!   cargo run --release --bin tagged_to_html -- dump.json --output out.html --start 2 --end 5
//!   cargo run --release --bin tagged_to_html -- dump.json --format json --config viewer.json
//!
//! JSON output describes figure images by id and size only; pixels are not
//! serialized. Use HTML output to get the image data.
//!
//! Exit codes: 0 on success, 1 on failure, 2 when the document is untagged.

use pdf_tagview::converters::{self, HtmlRenderer};
use pdf_tagview::{Error, MemorySource, TaggedViewer, ViewerConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Json,
}

struct CliConfig {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    start_page: Option<u32>,
    end_page: Option<u32>,
    format: OutputFormat,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut config = None;
        let mut start_page = None;
        let mut end_page = None;
        let mut format = OutputFormat::Html;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    output = Some(PathBuf::from(value(&args, i, "--output")?));
                },
                "--config" => {
                    i += 1;
                    config = Some(PathBuf::from(value(&args, i, "--config")?));
                },
                "--start" => {
                    i += 1;
                    start_page = Some(page_number(value(&args, i, "--start")?)?);
                },
                "--end" => {
                    i += 1;
                    end_page = Some(page_number(value(&args, i, "--end")?)?);
                },
                "--format" => {
                    i += 1;
                    format = match value(&args, i, "--format")? {
                        "html" => OutputFormat::Html,
                        "json" => OutputFormat::Json,
                        other => return Err(format!("Unknown format: {}", other)),
                    };
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                arg if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
                arg => {
                    if input.is_some() {
                        return Err(format!("Unexpected argument: {}", arg));
                    }
                    input = Some(PathBuf::from(arg));
                },
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or("Missing input dump")?,
            output,
            config,
            start_page,
            end_page,
            format,
            verbose,
        })
    }

    fn viewer_config(&self) -> pdf_tagview::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_json_file(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(start) = self.start_page {
            config = config.with_start_page(start);
        }
        if self.end_page.is_some() {
            config = config.with_end_page(self.end_page);
        }
        Ok(config)
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn page_number(arg: &str) -> Result<u32, String> {
    arg.parse::<u32>()
        .map_err(|_| format!("Invalid page number: {}", arg))
}

fn usage() {
    eprintln!(
        "Usage: tagged_to_html <dump.json> [--output FILE] [--config FILE] \
         [--start N] [--end N] [--format html|json] [--verbose]"
    );
    eprintln!("  --format json lists figure images by id and size, without pixel data");
}

fn run(cli: &CliConfig) -> pdf_tagview::Result<()> {
    let config = cli.viewer_config()?;
    let source = MemorySource::open(&cli.input)?;

    let start = Instant::now();
    let mut viewer = TaggedViewer::new(source, config);
    let document = viewer.render()?;

    let rendered = match cli.format {
        OutputFormat::Html => HtmlRenderer::from_config(viewer.config()).render_document(&document),
        OutputFormat::Json => converters::to_json(&document)?,
    };

    match &cli.output {
        Some(path) => fs::write(path, &rendered)?,
        None => print!("{}", rendered),
    }

    if cli.verbose {
        eprintln!(
            "Rendered {} pages ({} skipped, {} diagnostics) in {:?}",
            document.pages.len(),
            document.skipped_pages.len(),
            document.diagnostic_count(),
            start.elapsed()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            usage();
            return ExitCode::from(1);
        },
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::UntaggedDocument { .. }) => {
            println!("Not a Tagged PDF.");
            ExitCode::from(2)
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        },
    }
}
