use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "bookletise",
    about = "Impose an A4 PDF into a duplex booklet at A5..A8",
    version
)]
struct Cli {
    /// Source A4 PDF
    src: PathBuf,

    /// Trim size of the finished booklet
    #[arg(long, default_value = "a5", value_enum)]
    target: TargetArg,

    /// Reading direction of the finished booklet
    #[arg(long, default_value = "ltr", value_enum)]
    binding: BindingArg,

    /// Margin inside each panel in mm
    #[arg(long, default_value = "2.0")]
    margin: f32,

    /// Show the plan and statistics only, don't generate a PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    A5,
    A6,
    A7,
    A8,
}

#[derive(Clone, Copy, ValueEnum)]
enum BindingArg {
    Ltr,
    Rtl,
}

impl From<TargetArg> for booklet_impose::TrimSize {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::A5 => Self::A5,
            TargetArg::A6 => Self::A6,
            TargetArg::A7 => Self::A7,
            TargetArg::A8 => Self::A8,
        }
    }
}

impl From<BindingArg> for booklet_impose::Binding {
    fn from(arg: BindingArg) -> Self {
        match arg {
            BindingArg::Ltr => Self::Ltr,
            BindingArg::Rtl => Self::Rtl,
        }
    }
}

/// Append `(1)`, `(2)`, … before the extension until the path is free.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_owned();
    }
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = path.extension().map(|e| e.to_string_lossy());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    for i in 1.. {
        let name = match &ext {
            Some(ext) => format!("{}({}).{}", stem, i, ext),
            None => format!("{}({})", stem, i),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let target: booklet_impose::TrimSize = cli.target.into();
    let binding: booklet_impose::Binding = cli.binding.into();

    let options = booklet_impose::ImposeOptions {
        page_margin_mm: cli.margin,
        ..Default::default()
    };

    let source = booklet_impose::load_pdf(&cli.src)
        .await
        .with_context(|| format!("Failed to open {}", cli.src.display()))?;
    let page_count = source.get_pages().len() as u32;

    let job = booklet_impose::impose(page_count, target.fold_level(), binding, &options)?;
    debug!(expression = %job.plan.expression, sequence = ?job.plan.sequence, "selected plan");

    let stats = booklet_impose::job_statistics(&job);
    println!("Imposition plan: {}", job.plan.expression);
    println!("  Source pages: {}", stats.source_pages);
    println!("  Signatures: {}", stats.signatures);
    println!("  Sheets: {}", stats.total_sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank panels: {}", stats.blank_panels);

    if cli.stats_only {
        return Ok(());
    }

    let imposed = booklet_impose::impose_booklet(&source, target, binding, &options).await?;

    let base = cli.src.with_extension("");
    let out_path = unique_path(&PathBuf::from(format!(
        "{}{}",
        base.display(),
        target.file_suffix()
    )));
    booklet_impose::save_pdf(imposed, &out_path).await?;
    println!("Saved: {}", out_path.display());

    Ok(())
}
