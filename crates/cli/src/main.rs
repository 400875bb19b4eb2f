use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polars::prelude::*;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod desc;
mod provenance;
mod raster;

use desc::RegionDesc;

#[derive(Parser)]
#[command(name = "regions-cli")]
#[command(about = "Inspect and rasterize integer lattice regions")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Depth {
    /// Sections at the requested coordinate only
    One,
    /// Cascade down to 1-D runs
    Full,
}

#[derive(Subcommand)]
enum Action {
    /// Print the section of a region at `x[n-1] = at` as JSON
    Section {
        #[arg(long)]
        region: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        at: i64,
        #[arg(long, value_enum, default_value_t = Depth::One)]
        depth: Depth,
    },
    /// Write every axis-0 run of a region to CSV, plus a provenance sidecar
    Rasterize {
        #[arg(long)]
        region: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Section { region, at, depth } => section(&region, at, depth),
        Action::Rasterize { region, out } => rasterize(&region, &out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn section(path: &Path, at: i64, depth: Depth) -> Result<()> {
    let region = RegionDesc::load(path)?.to_region()?;
    tracing::info!(region = %region, at, ?depth, "section");
    if region.n() < 2 {
        bail!("{region} has no sections");
    }
    let sections = region.section_at_last_coordinate(at)?;
    let doc = match depth {
        Depth::One => json!({
            "region": region.to_string(),
            "at": at,
            "sections": sections.iter().map(raster::describe_section).collect::<Vec<_>>(),
        }),
        Depth::Full => {
            let mut rows = Vec::new();
            for s in &sections {
                for run in raster::runs_at(s, &[at])? {
                    rows.push(json!({ "outer": run.outer, "x": [run.x_min, run.x_max] }));
                }
            }
            json!({ "region": region.to_string(), "at": at, "runs": rows })
        }
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn rasterize(path: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    let desc = RegionDesc::load(path)?;
    let region = desc.to_region()?;
    let runs = raster::runs(&region)?;
    tracing::info!(
        region = %region,
        runs = runs.len(),
        out = %out.display(),
        tag = ?tag,
        "rasterize"
    );
    let mut df = raster::runs_frame(region.n(), &runs)?;
    write_csv(&mut df, out)?;
    let sidecar = provenance::write_sidecar(
        out,
        provenance::Payload::new(json!({
            "region": desc,
            "region_path": path.to_string_lossy(),
            "runs": runs.len(),
            "tag": tag,
        })),
    )?;
    tracing::info!(sidecar = %sidecar.display(), "provenance written");
    Ok(())
}

fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": regions::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
