//! CLI Application logic
//!
//! Contains the command-line interface implementation. Machine-readable
//! output goes to stdout (or `--output`); progress, diagnostics and logs go
//! to stderr.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use slidefit_ast::ImageHandle;
use slidefit_core::{parse_with_diagnostics, serialize, Diagnostic};
use slidefit_layout::{FitContract, LayoutCatalog, SlideAssembler};
use slidefit_pptx::PptxWriter;

use crate::manifest::{handles, ImageManifest, LoadedImage};

/// Output format for `parse` and `layouts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Output format for `assemble`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AssembleFormat {
    /// Resolved slides as JSON
    #[default]
    Json,
    /// PowerPoint package (requires --output)
    Pptx,
}

#[derive(Parser)]
#[command(name = "slidefit")]
#[command(author, version, about = "Fit generated slide text into layouts", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse slide text and print the records
    Parse {
        /// Input text file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the layout catalog
    Layouts {
        /// Fit contract (TOML) whose canvas to use
        #[arg(short, long)]
        contract: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse, lay out and fit a deck
    Assemble {
        /// Input text file
        input: PathBuf,

        /// Image manifest (TOML) mapping slides to image files
        #[arg(short, long)]
        images: Option<PathBuf>,

        /// Fit contract (TOML)
        #[arg(short, long)]
        contract: Option<PathBuf>,

        /// Output format (json or pptx)
        #[arg(short, long, value_enum, default_value = "json")]
        format: AssembleFormat,

        /// Output file (defaults to stdout for json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// Parses arguments, sets up logging and dispatches to the command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { input, format } => parse_command(&input, format),
        Commands::Layouts { contract, format } => layouts_command(contract.as_deref(), format),
        Commands::Assemble {
            input,
            images,
            contract,
            format,
            output,
        } => assemble_command(
            &input,
            images.as_deref(),
            contract.as_deref(),
            format,
            output.as_deref(),
        ),
    }
}

/// Logs go to stderr so stdout stays clean for JSON
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Ignore a second initialization (tests call run_* more than once)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: &Path) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}

fn load_contract(path: Option<&Path>) -> Result<FitContract> {
    match path {
        Some(path) => FitContract::from_file(path)
            .with_context(|| format!("Failed to load fit contract: {}", path.display())),
        None => Ok(FitContract::default()),
    }
}

fn print_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    for diag in diagnostics {
        eprintln!("{}", diag);
    }
}

/// Execute the parse command
pub fn parse_command(input: &Path, format: OutputFormat) -> Result<()> {
    let content = read_input(input)?;
    let output = parse_with_diagnostics(&content);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .context("Failed to serialize records to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", serialize(&output.records));
            print_diagnostics(output.diagnostics.iter());
            eprintln!(
                "{} slide(s), {} warning(s) in {}",
                output.records.len(),
                output.diagnostics.warning_count(),
                input.display()
            );
        }
    }

    Ok(())
}

/// Execute the layouts command
pub fn layouts_command(contract: Option<&Path>, format: OutputFormat) -> Result<()> {
    let contract = load_contract(contract)?;
    let catalog = LayoutCatalog::new(contract.canvas())
        .context("Canvas cannot hold the built-in layouts")?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&catalog)
                .context("Failed to serialize catalog to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", describe_catalog(&catalog)),
    }

    Ok(())
}

/// Human-readable catalog listing
pub fn describe_catalog(catalog: &LayoutCatalog) -> String {
    let canvas = catalog.canvas();
    let mut out = format!("Canvas {} x {}\n", canvas.width, canvas.height);

    for template in catalog.iter() {
        out.push_str(&format!("\n{}\n", template.name));
        for region in &template.regions {
            let r = region.rect;
            out.push_str(&format!(
                "  {:<14} {:<8} ({:.2}, {:.2}) {:.2} x {:.2}  z={}  {}-{}pt",
                region.name,
                format!("{:?}", region.role),
                r.x,
                r.y,
                r.width,
                r.height,
                region.z_index,
                region.font_range.min_pt,
                region.font_range.max_pt
            ));
            if let Some(budget) = region.text_budget {
                out.push_str(&format!("  budget={}", budget));
            }
            if let Some(points) = region.max_points {
                out.push_str(&format!("  max_points={}", points));
            }
            out.push('\n');
        }
    }

    out
}

/// Execute the assemble command
pub fn assemble_command(
    input: &Path,
    images: Option<&Path>,
    contract: Option<&Path>,
    format: AssembleFormat,
    output: Option<&Path>,
) -> Result<()> {
    let content = read_input(input)?;
    let contract = load_contract(contract)?;
    let assembler = SlideAssembler::from_contract(contract.clone())
        .context("Fit contract cannot be used")?;

    let mut loaded = match images {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            ImageManifest::from_file(path)?.load(base)?
        }
        None => Default::default(),
    };

    match format {
        AssembleFormat::Json => {
            let lookup = handles(&loaded);
            let assembly = assembler.assemble_document(&content, &lookup);
            print_diagnostics(assembly.all_diagnostics());

            let json = serde_json::to_string_pretty(&assembly)
                .context("Failed to serialize slides to JSON")?;
            match output {
                Some(path) => fs::write(path, json)
                    .with_context(|| format!("Failed to write output: {}", path.display()))?,
                None => println!("{}", json),
            }

            info!(
                slides = assembly.slides.len(),
                degraded = assembly.degraded_count(),
                "assembled"
            );
        }
        AssembleFormat::Pptx => {
            let Some(path) = output else {
                anyhow::bail!("--output is required for pptx output");
            };

            let mut writer = PptxWriter::new(assembler.shared_catalog())
                .with_locale(contract.meta.locale.as_str())
                .with_bullet_glyph(contract.text.bullet_glyph.as_str())
                .with_title(deck_title(input, &content));
            register_media(&mut writer, &mut loaded)?;
            let lookup = handles(&loaded);

            let diagnostics = assembler
                .assemble_into(&content, &lookup, &mut writer)
                .context("Failed to place slides")?;
            print_diagnostics(diagnostics.iter());

            let bytes = writer.generate().context("Failed to generate PPTX")?;
            fs::write(path, bytes)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;

            eprintln!(
                "Wrote {} slide(s) to {} ({} warning(s))",
                writer.slide_count(),
                path.display(),
                diagnostics.warning_count()
            );
        }
    }

    Ok(())
}

/// Embed every image that can be shown.
///
/// Images the package cannot carry are given a 0x0 size, so their slide
/// degrades like any other unreadable image.
fn register_media(writer: &mut PptxWriter, images: &mut BTreeMap<u32, LoadedImage>) -> Result<()> {
    for (slide, image) in images.iter_mut() {
        // Zero-sized images never reach a picture region
        if image.handle.size().is_empty() {
            continue;
        }
        let Some(content_type) = image
            .content_type
            .filter(|content_type| PptxWriter::supports_media(content_type))
        else {
            warn!(
                slide = *slide,
                path = %image.path.display(),
                "image format cannot be embedded"
            );
            image.handle = ImageHandle::new(image.handle.id.clone(), 0, 0);
            continue;
        };
        let data = fs::read(&image.path)
            .with_context(|| format!("Failed to read image: {}", image.path.display()))?;
        writer
            .add_media(image.handle.id.as_str(), data, content_type)
            .with_context(|| format!("Cannot embed image: {}", image.path.display()))?;
    }
    Ok(())
}

/// Title of the first slide, or the input file stem
fn deck_title(input: &Path, content: &str) -> String {
    slidefit_core::parse(content)
        .into_iter()
        .map(|r| r.title)
        .find(|t| !t.is_empty())
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Presentation".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_describe_catalog_lists_every_layout() {
        let text = describe_catalog(LayoutCatalog::global());

        assert!(text.starts_with("Canvas 13.33 x 7.5"));
        for name in ["title_slide", "title_content", "two_column", "image_text", "diagram_focus"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("max_points=3"));
    }

    #[test]
    fn test_unembeddable_image_is_zeroed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.bmp");
        fs::write(&path, b"BM not much of a bitmap").unwrap();

        let mut images = BTreeMap::new();
        images.insert(
            3,
            LoadedImage {
                handle: ImageHandle::new("slide3", 640, 480),
                path,
                content_type: Some("image/bmp"),
            },
        );

        let mut writer = PptxWriter::default();
        register_media(&mut writer, &mut images).unwrap();

        assert!(images[&3].handle.size().is_empty());
        assert_eq!(images[&3].handle.id, "slide3");
    }

    #[test]
    fn test_deck_title() {
        let path = Path::new("talks/aurora.txt");

        assert_eq!(deck_title(path, "SLIDE 1 - A:\nTITLE: Hello\n"), "Hello");
        assert_eq!(deck_title(path, "nothing here"), "aurora");
    }
}
