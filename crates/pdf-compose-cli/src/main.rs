use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pdf_compose::{
    NumberPosition, PageComposition, PageNumberConfig, PageRule, RgbColor, SourceSet,
    WatermarkConfig, WatermarkPosition, assemble, load_pdf, save_pdf,
};
use pdf_fonts::{FontCache, FontRegistry};

#[derive(Parser)]
#[command(name = "pdfed", about = "PDF composition tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rearrange, rotate, and merge pages
    ///
    /// Operations apply in flag-group order: rotate, delete, duplicate,
    /// insert-blank, move, merge. Indices are visible page indices at the
    /// time each operation runs.
    Edit {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Rotate a page: INDEX:DEGREES with degrees 90, 180 or 270
        #[arg(long, value_name = "INDEX:DEG")]
        rotate: Vec<String>,

        /// Delete a page by index
        #[arg(long, value_name = "INDEX")]
        delete: Vec<usize>,

        /// Duplicate a page by index
        #[arg(long, value_name = "INDEX")]
        duplicate: Vec<usize>,

        /// Insert a blank page after the given index
        #[arg(long, value_name = "INDEX")]
        insert_blank: Vec<usize>,

        /// Move a page: FROM:TO
        #[arg(long = "move", value_name = "FROM:TO")]
        move_page: Vec<String>,

        /// Append all pages of another PDF
        #[arg(long, value_name = "FILE")]
        merge: Vec<PathBuf>,
    },

    /// Draw a watermark across pages
    Watermark {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Watermark text
        #[arg(long)]
        text: String,

        /// Placement on the page
        #[arg(long, default_value = "diagonal", value_enum)]
        position: WatermarkPositionArg,

        /// Opacity, 0-100
        #[arg(long, default_value = "30")]
        opacity: u8,

        /// Rotation angle for the diagonal position (degrees)
        #[arg(long, default_value = "45.0")]
        angle: f32,

        /// Font size in points
        #[arg(long, default_value = "48.0")]
        font_size: f32,

        /// Text color as RRGGBB hex
        #[arg(long, default_value = "808080")]
        color: String,

        /// Registry font name (default: pick by script analysis)
        #[arg(long)]
        font: Option<String>,

        /// Which pages to watermark
        #[arg(long, default_value = "all", value_enum)]
        pages: PagesArg,
    },

    /// Stamp page numbers
    Number {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Label template; {n} is the page number, {total} the page count
        #[arg(long, default_value = "{n}")]
        format: String,

        /// Placement on the page
        #[arg(long, default_value = "bottom-center", value_enum)]
        position: NumberPositionArg,

        /// Font size in points
        #[arg(long, default_value = "12.0")]
        font_size: f32,

        /// Number assigned to the first page
        #[arg(long, default_value = "1")]
        start: usize,

        /// Which pages to number
        #[arg(long, default_value = "all", value_enum)]
        pages: PagesArg,
    },

    /// Report the script profile of a text run
    Analyze {
        /// Text to analyze
        text: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WatermarkPositionArg {
    Diagonal,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Copy, ValueEnum)]
enum NumberPositionArg {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, ValueEnum)]
enum PagesArg {
    All,
    Odd,
    Even,
}

impl From<WatermarkPositionArg> for WatermarkPosition {
    fn from(arg: WatermarkPositionArg) -> Self {
        match arg {
            WatermarkPositionArg::Diagonal => Self::Diagonal,
            WatermarkPositionArg::Center => Self::Center,
            WatermarkPositionArg::TopLeft => Self::TopLeft,
            WatermarkPositionArg::TopRight => Self::TopRight,
            WatermarkPositionArg::BottomLeft => Self::BottomLeft,
            WatermarkPositionArg::BottomRight => Self::BottomRight,
        }
    }
}

impl From<NumberPositionArg> for NumberPosition {
    fn from(arg: NumberPositionArg) -> Self {
        match arg {
            NumberPositionArg::TopLeft => Self::TopLeft,
            NumberPositionArg::TopCenter => Self::TopCenter,
            NumberPositionArg::TopRight => Self::TopRight,
            NumberPositionArg::BottomLeft => Self::BottomLeft,
            NumberPositionArg::BottomCenter => Self::BottomCenter,
            NumberPositionArg::BottomRight => Self::BottomRight,
        }
    }
}

impl From<PagesArg> for PageRule {
    fn from(arg: PagesArg) -> Self {
        match arg {
            PagesArg::All => Self::All,
            PagesArg::Odd => Self::Odd,
            PagesArg::Even => Self::Even,
        }
    }
}

/// Parse "A:B" pairs used by --rotate and --move.
fn parse_pair(value: &str, what: &str) -> Result<(usize, usize)> {
    let (a, b) = value
        .split_once(':')
        .with_context(|| format!("{what} must look like A:B, got {value:?}"))?;
    Ok((
        a.parse().with_context(|| format!("bad {what} index {a:?}"))?,
        b.parse().with_context(|| format!("bad {what} value {b:?}"))?,
    ))
}

/// Parse an RRGGBB hex color.
fn parse_color(value: &str) -> Result<RgbColor> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("color must be RRGGBB hex, got {value:?}");
    }
    Ok(RgbColor {
        r: u8::from_str_radix(&hex[0..2], 16)?,
        g: u8::from_str_radix(&hex[2..4], 16)?,
        b: u8::from_str_radix(&hex[4..6], 16)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Edit {
            input,
            output,
            rotate,
            delete,
            duplicate,
            insert_blank,
            move_page,
            merge,
        } => {
            let document = load_pdf(&input).await?;
            let page_count = document.get_pages().len();
            let mut sources = SourceSet::new(document);
            let mut model = PageComposition::from_original(page_count);

            for entry in &rotate {
                let (index, degrees) = parse_pair(entry, "--rotate")?;
                model.rotate(index, degrees as u16)?;
            }
            for &index in &delete {
                model.delete(index)?;
            }
            for &index in &duplicate {
                model.duplicate(index)?;
            }
            for &index in &insert_blank {
                model.insert_blank(Some(index));
            }
            for entry in &move_page {
                let (from, to) = parse_pair(entry, "--move")?;
                model.reorder(from, to)?;
            }
            for path in &merge {
                let external = load_pdf(path).await?;
                let external_pages = external.get_pages().len();
                let id = sources.register_external(external);
                model.insert_from_external(id, external_pages, None);
            }

            let pages_out = model.visible_len();
            let assembled = assemble(&model, &sources).await?;
            save_pdf(assembled, &output).await?;
            println!("Assembled {} pages → {}", pages_out, output.display());
        }

        Commands::Watermark {
            input,
            output,
            text,
            position,
            opacity,
            angle,
            font_size,
            color,
            font,
            pages,
        } => {
            let config = WatermarkConfig {
                enabled: true,
                text,
                opacity,
                angle_degrees: angle,
                color: parse_color(&color)?,
                font_size,
                font,
                position: position.into(),
                pages: pages.into(),
            };
            config.validate()?;

            let mut document = load_pdf(&input).await?;
            let registry = FontRegistry::default();
            let cache = FontCache::new();
            pdf_compose::decorate::watermark_document(&mut document, &config, &registry, &cache)
                .await?;
            save_pdf(document, &output).await?;
            println!("Watermarked → {}", output.display());
        }

        Commands::Number {
            input,
            output,
            format,
            position,
            font_size,
            start,
            pages,
        } => {
            let config = PageNumberConfig {
                enabled: true,
                format,
                position: position.into(),
                font_size,
                color: RgbColor::BLACK,
                start_number: start,
                pages: pages.into(),
            };
            config.validate()?;

            let mut document = load_pdf(&input).await?;
            pdf_compose::decorate::apply_page_numbers(&mut document, &config)?;
            save_pdf(document, &output).await?;
            println!("Numbered → {}", output.display());
        }

        Commands::Analyze { text } => {
            let profile = pdf_script::analyze(&text);
            println!("Script Profile:");
            println!("  Dominant script: {:?}", profile.dominant);
            println!("  Confidence: {:.2}", profile.confidence);
            println!("  Decoding profile: {}", profile.decoding_profile);
            println!("  Latin letters: {}", profile.counts.latin_letters);
            println!("  Cyrillic letters: {}", profile.counts.cyrillic_letters);
            println!("  Digits: {}", profile.counts.digits);
            println!("  Punctuation: {}", profile.counts.punctuation);
            println!(
                "  Glyph whitelist: {}",
                match profile.glyph_whitelist {
                    Some(_) => "constrained",
                    None => "unconstrained",
                }
            );
        }
    }

    Ok(())
}
