use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core_modules::roi::roi::RegionRect;

#[derive(Debug, Parser)]
#[command(name = "hemolens", version, about = "Anemia screening from eyelid photographs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one screening from two eye photographs.
    Screen(ScreenArgs),
    /// Show a patient's past screenings.
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    #[arg(long, help = "Patient name")]
    pub name: String,

    #[arg(long, default_value_t = 25)]
    pub age: u32,

    #[arg(long, value_enum, default_value_t = GenderArg::Other)]
    pub gender: GenderArg,

    #[arg(long, value_enum, default_value_t = DietArg::Vegetarian)]
    pub diet: DietArg,

    #[arg(long, value_enum, default_value_t = LanguageArg::English)]
    pub language: LanguageArg,

    #[arg(long, help = "Left eye photograph (jpg/png)")]
    pub left_eye: PathBuf,

    #[arg(long, help = "Right eye photograph (jpg/png)")]
    pub right_eye: PathBuf,

    #[arg(long, value_parser = parse_rect, help = "Left white/sclera patch as x,y,w,h")]
    pub left_reference: RegionRect,

    #[arg(long, value_parser = parse_rect, help = "Left inner-eyelid patch as x,y,w,h")]
    pub left_measurement: RegionRect,

    #[arg(long, value_parser = parse_rect, help = "Right white/sclera patch as x,y,w,h")]
    pub right_reference: RegionRect,

    #[arg(long, value_parser = parse_rect, help = "Right inner-eyelid patch as x,y,w,h")]
    pub right_measurement: RegionRect,

    #[arg(long, default_value = "hemolens_records.csv", help = "Record file")]
    pub db: PathBuf,

    #[arg(long, help = "Write the report to this file instead of stdout")]
    pub report: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Emit the report as JSON")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, help = "Patient name to look up")]
    pub name: String,

    #[arg(long, default_value = "hemolens_records.csv", help = "Record file")]
    pub db: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DietArg {
    Vegetarian,
    NonVegetarian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    English,
    Hindi,
}

/// Parses an `x,y,w,h` selection into a `RegionRect`.
pub fn parse_rect(raw: &str) -> Result<RegionRect, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected x,y,w,h, got '{raw}'"));
    }
    let mut values = [0u32; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("bad component '{part}': {e}"))?;
    }
    Ok(RegionRect {
        x: values[0],
        y: values[1],
        width: values[2],
        height: values[3],
    })
}
