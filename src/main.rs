use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use hemolens::cli::{Cli, Commands, DietArg, GenderArg, HistoryArgs, LanguageArg, ScreenArgs};
use hemolens::core_modules::roi::roi::{RegionRect, Roi};
use hemolens::pipeline::{
    DietPreference, EyeRegions, Gender, Language, PatientProfile, ScreeningPipeline,
};
use hemolens::report::ReportDocument;
use hemolens::storage::{RecordStore, ScreeningRecord};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Screen(args) => run_screen(args).await,
        Commands::History(args) => run_history(args).await,
    }
}

async fn run_screen(args: ScreenArgs) -> Result<()> {
    let language = match args.language {
        LanguageArg::English => Language::English,
        LanguageArg::Hindi => Language::Hindi,
    };
    let patient = PatientProfile {
        name: args.name.clone(),
        age: args.age,
        gender: match args.gender {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        },
        diet: match args.diet {
            DietArg::Vegetarian => DietPreference::Vegetarian,
            DietArg::NonVegetarian => DietPreference::NonVegetarian,
        },
    };

    // Decode both photographs concurrently; decoding dominates startup time.
    let left_path = args.left_eye.clone();
    let right_path = args.right_eye.clone();
    let (left_image, right_image) = futures::future::try_join(
        tokio::task::spawn_blocking(move || decode_rgba(&left_path)),
        tokio::task::spawn_blocking(move || decode_rgba(&right_path)),
    )
    .await
    .context("photo decoding task failed")?;
    let (left_image, right_image) = (left_image?, right_image?);

    let left = extract_eye(&left_image, args.left_reference, args.left_measurement)
        .context("left eye region selection")?;
    let right = extract_eye(&right_image, args.right_reference, args.right_measurement)
        .context("right eye region selection")?;

    let pipeline = ScreeningPipeline::new(language);
    let result = pipeline.analyze(&patient, &left, &right)?;

    let document = ReportDocument::assemble(&patient, &result, language);
    let rendered = if args.json {
        document.to_json()?
    } else {
        document.render_text()
    };
    match &args.report {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(report = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }

    let store = RecordStore::spawn(args.db.clone());
    store
        .append(ScreeningRecord::from_screening(&patient, &result))
        .await?;
    store.shutdown().await;
    tracing::info!(hb_value = result.hb_value, db = %args.db.display(), "record persisted");

    Ok(())
}

async fn run_history(args: HistoryArgs) -> Result<()> {
    let normalized = args.name.trim().to_lowercase();
    let store = RecordStore::spawn(args.db.clone());
    let records = store.history(&normalized).await?;
    store.shutdown().await;

    if records.is_empty() {
        println!("No records found for '{normalized}'.");
        return Ok(());
    }

    println!("{:<17} {:>6}  {}", "Timestamp", "Hb", "Status");
    for record in &records {
        println!(
            "{:<17} {:>6.1}  {}",
            record.timestamp, record.hb_level, record.status
        );
    }
    Ok(())
}

fn decode_rgba(path: &Path) -> Result<RgbaImage> {
    let photo = image::open(path)
        .with_context(|| format!("failed to open photograph {}", path.display()))?;
    Ok(photo.to_rgba8())
}

fn extract_eye(
    image: &RgbaImage,
    reference: RegionRect,
    measurement: RegionRect,
) -> Result<EyeRegions> {
    let (width, height) = image.dimensions();
    Ok(EyeRegions {
        reference: Roi::from_rgba_buffer(image.as_raw(), width, height, reference)?,
        measurement: Roi::from_rgba_buffer(image.as_raw(), width, height, measurement)?,
    })
}
