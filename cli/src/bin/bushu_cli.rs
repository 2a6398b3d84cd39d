use std::path::{Path, PathBuf};
use std::sync::Arc;

use bushu::{
    BatchCollector, Category, CommandOutput, ExtractionConfig, PartCatalog, PartCommand, PartExtractor,
    PartManager, PartsCatalogFile, SplitTopology,
};
use clap::{Parser, Subcommand, ValueEnum};
use cli::ExtractionJob;
use color_eyre::eyre::{Result, eyre};
use strum::IntoEnumIterator;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Extract radical parts from CJK fonts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every catalog entry as a transparent PNG
    Extract {
        /// Job file (.toml or .json) with font, output dir, catalog and config
        #[arg(short, long)]
        job: Option<PathBuf>,
        /// Font file, overrides the job file
        #[arg(short, long)]
        font: Option<PathBuf>,
        /// Output directory, overrides the job file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// JSON catalog replacing the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Worker threads
        #[arg(long, default_value = "1")]
        jobs: usize,
        /// Always cut at the catalog ratio
        #[arg(long)]
        no_dynamic: bool,
        #[arg(long)]
        no_noise_removal: bool,
        #[arg(long)]
        canvas_size: Option<u32>,
    },
    /// Re-extract one saved part with manual overrides
    ReExtract {
        #[arg(short, long)]
        font: PathBuf,
        #[arg(short, long, default_value = "assets/parts")]
        parts_dir: PathBuf,
        category: Category,
        name: String,
        #[arg(long)]
        sample: Option<char>,
        #[arg(long)]
        split: Option<SplitTopology>,
        /// Fixed cut ratio; disables dynamic detection
        #[arg(long)]
        ratio: Option<f32>,
        #[arg(long)]
        canvas_size: Option<u32>,
    },
    /// Delete a saved part and its catalog record
    Delete {
        #[arg(short, long, default_value = "assets/parts")]
        parts_dir: PathBuf,
        category: Category,
        name: String,
    },
    /// Show the best cut candidates for one entry
    Detect {
        #[arg(short, long)]
        font: PathBuf,
        category: Category,
        name: String,
        #[arg(short = 'n', long, default_value = "5")]
        candidates: usize,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List catalog entries
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// List the records of an extracted parts directory instead
        #[arg(long)]
        parts_dir: Option<PathBuf>,
    },
    /// Print the default configuration as TOML
    Config,
    /// Print a JSON schema
    Schema {
        #[arg(value_enum, default_value = "config")]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Config,
    Job,
    Catalog,
    Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            job,
            font,
            output_dir,
            catalog,
            jobs,
            no_dynamic,
            no_noise_removal,
            canvas_size,
        } => {
            let mut job = match job {
                Some(path) => ExtractionJob::from_file(path)?,
                None => ExtractionJob::default(),
            };
            if let Some(font) = font {
                job.font_path = Some(font.to_string_lossy().into_owned());
            }
            if let Some(output_dir) = output_dir {
                job.output_dir = output_dir.to_string_lossy().into_owned();
            }
            if let Some(catalog) = catalog {
                job.catalog = Some(catalog.to_string_lossy().into_owned());
            }
            if no_dynamic {
                job.config = job.config.with_dynamic_detection(false);
            }
            if no_noise_removal {
                job.config = job.config.with_noise_removal(false);
            }
            if let Some(size) = canvas_size {
                job.config = job.config.with_canvas_size(size);
            }
            extract(job, jobs.max(1)).await?;
        }
        Commands::ReExtract {
            font,
            parts_dir,
            category,
            name,
            sample,
            split,
            ratio,
            canvas_size,
        } => {
            let config = config_with_canvas(canvas_size);
            let manager = manager(&font, config, PartCatalog::default(), &parts_dir)?;
            let output = manager.execute(PartCommand::ReExtract {
                category,
                name,
                sample,
                split,
                ratio,
            })?;
            print_output(&output)?;
        }
        Commands::Delete {
            parts_dir,
            category,
            name,
        } => {
            let record = bushu::delete_part(&parts_dir, category, &name)?;
            info!("🗑️  Removed {}", record.file);
        }
        Commands::Detect {
            font,
            category,
            name,
            candidates,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let manager = manager(&font, ExtractionConfig::standalone(), catalog, Path::new("."))?;
            let output = manager.execute(PartCommand::DetectSplit {
                category,
                name,
                num_candidates: candidates,
            })?;
            print_output(&output)?;
        }
        Commands::List {
            category,
            catalog,
            parts_dir,
        } => match parts_dir {
            Some(dir) => list_records(&dir, category)?,
            None => list_catalog(&load_catalog(catalog.as_deref())?, category),
        },
        Commands::Config => {
            let job = ExtractionJob::default();
            println!("{}", job.to_toml()?);
        }
        Commands::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Config => ExtractionConfig::schema(),
                SchemaKind::Job => schemars::schema_for!(ExtractionJob),
                SchemaKind::Catalog => PartCatalog::schema(),
                SchemaKind::Command => PartCommand::schema(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn config_with_canvas(canvas_size: Option<u32>) -> ExtractionConfig {
    let config = ExtractionConfig::standalone();
    match canvas_size {
        Some(size) => config.with_canvas_size(size),
        None => config,
    }
}

fn load_catalog(path: Option<&Path>) -> Result<PartCatalog> {
    Ok(match path {
        Some(path) => PartCatalog::from_json_file(path)?,
        None => PartCatalog::builtin().clone(),
    })
}

fn manager(font: &Path, config: ExtractionConfig, catalog: PartCatalog, parts_dir: &Path) -> Result<PartManager> {
    let extractor = PartExtractor::for_font(font, config)?;
    Ok(PartManager::new(Arc::new(extractor), catalog, parts_dir))
}

fn print_output(output: &CommandOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

async fn extract(job: ExtractionJob, workers: usize) -> Result<()> {
    let font = job.font_path()?.to_string();
    let catalog = Arc::new(job.load_catalog()?);
    let output_dir = PathBuf::from(&job.output_dir);
    std::fs::create_dir_all(&output_dir)?;

    info!("🔤 Font: {font}");
    info!("📁 Output: {}", output_dir.display());
    info!(
        "Dynamic detection: {}, noise removal: {}, canvas: {}px, workers: {workers}",
        job.config.dynamic_boundary_detection_enabled, job.config.noise_removal_enabled, job.config.canvas_size
    );

    let extractor = Arc::new(PartExtractor::for_font(&font, job.config.clone())?);

    let report = if workers == 1 {
        let extractor = extractor.clone();
        let catalog = catalog.clone();
        let output_dir = output_dir.clone();
        tokio::task::spawn_blocking(move || {
            extractor.extract_all_parts(&catalog, &output_dir, |current, total, name| {
                info!("[{current}/{total}] {name}");
            })
        })
        .await??
    } else {
        extract_parallel(extractor, catalog.clone(), &output_dir, workers).await?
    };

    for failure in &report.failures {
        warn!("✗ {} {}: {}", failure.category.label(), failure.name, failure.reason);
    }
    info!(
        "✅ {} succeeded, {} failed; catalog written to {}",
        report.stats.success,
        report.stats.failed,
        report.catalog_path.display()
    );
    Ok(())
}

/// Workers take every `workers`-th entry; results are fed back in catalog order.
async fn extract_parallel(
    extractor: Arc<PartExtractor>,
    catalog: Arc<PartCatalog>,
    output_dir: &Path,
    workers: usize,
) -> Result<bushu::ExtractionReport> {
    let total = catalog.len();
    let mut set = JoinSet::new();

    for worker in 0..workers {
        let extractor = extractor.clone();
        let catalog = catalog.clone();
        let output_dir = output_dir.to_path_buf();
        set.spawn_blocking(move || {
            catalog
                .iter()
                .enumerate()
                .skip(worker)
                .step_by(workers)
                .map(|(index, entry)| {
                    info!("[{}/{total}] {}", index + 1, entry.name);
                    (index, extractor.extract_single_part(entry, output_dir.join(entry.file_name())))
                })
                .collect::<Vec<_>>()
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(batch) = set.join_next().await {
        results.extend(batch?);
    }
    results.sort_by_key(|(index, _)| *index);

    let mut collector = BatchCollector::new(output_dir);
    for (index, result) in &results {
        let entry = catalog
            .entries()
            .get(*index)
            .ok_or_else(|| eyre!("worker returned unknown entry {index}"))?;
        collector.record(entry, result);
    }
    Ok(collector.finish()?)
}

fn list_catalog(catalog: &PartCatalog, category: Option<Category>) {
    for current in Category::iter().filter(|c| category.is_none_or(|wanted| wanted == *c)) {
        let entries: Vec<_> = catalog.by_category(current).collect();
        if entries.is_empty() {
            continue;
        }
        println!("{} ({})", current.label(), entries.len());
        for entry in entries {
            let alternates: String = entry.alternates.iter().collect();
            println!(
                "  {} {}  sample {} [{}]  {} {:.2}",
                entry.character, entry.name, entry.sample, alternates, entry.split, entry.ratio
            );
        }
    }
}

fn list_records(parts_dir: &Path, category: Option<Category>) -> Result<()> {
    let records = PartsCatalogFile::load(parts_dir.join(bushu::PARTS_CATALOG_FILE))?;
    for (name, record) in records
        .iter()
        .filter(|(_, record)| category.is_none_or(|wanted| wanted == record.category))
    {
        println!(
            "{} {} {}  sample {}  {} {:.2}→{:.2}  {}",
            record.category.label(),
            record.character,
            name,
            record.sample,
            record.split,
            record.ratio,
            record.detected_ratio,
            record.file
        );
    }
    Ok(())
}
