use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use collision_map::phantom::{demo_plan, PhantomCfg};
use collision_map::plan::Plan;
use collision_map::series::CollisionMap;
use collision_map::{build_collision_map, MapCfg};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod export;
mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "collision-map")]
#[command(about = "Couch/gantry collision maps for SRS arc plans")]
#[command(version)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute the collision map of a plan (JSON) and write it as JSON
    Map {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// JSON file with `MapCfg` overrides
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the clearance radius around the isocenter
        #[arg(long)]
        threshold_mm: Option<f64>,
    },
    /// Flatten a map into a CSV or Parquet table
    Export {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a synthetic SRS plan on a head phantom
    Demo {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 2025)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Map {
            plan,
            out,
            config,
            threshold_mm,
        } => map(&plan, &out, config.as_deref(), threshold_mm),
        Action::Export { from, out } => export(&from, &out),
        Action::Demo { out, seed } => demo(&out, seed),
        Action::Report => report(),
    }
}

#[derive(Serialize)]
struct MapParams<'a> {
    config: Option<&'a Path>,
    cfg: &'a MapCfg,
}

fn map(plan_path: &Path, out: &Path, config: Option<&Path>, threshold_mm: Option<f64>) -> Result<()> {
    tracing::info!(plan = %plan_path.display(), out = %out.display(), "map");
    let plan = read_plan(plan_path)?;
    let cfg = load_cfg(config, threshold_mm)?;
    let map = build_collision_map(plan.as_ref(), &cfg)?;

    let summary = map.summary();
    for (name, n) in &summary.counts {
        tracing::info!(series = %name, points = n, "series");
    }
    if let Some(e) = summary.extent {
        tracing::info!(
            couch_min = e.couch_min,
            couch_max = e.couch_max,
            gantry_min = e.gantry_min,
            gantry_max = e.gantry_max,
            "extent"
        );
    }

    write_json(out, &map)?;
    let params = serde_json::to_value(MapParams { config, cfg: &cfg })?;
    let mut payload = Payload::new(params).with_input(plan_path);
    if let Some(c) = config {
        payload = payload.with_input(c);
    }
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn export(from: &Path, out: &Path) -> Result<()> {
    tracing::info!(from = %from.display(), out = %out.display(), "export");
    let bytes = fs::read(from).with_context(|| format!("reading {}", from.display()))?;
    let map: CollisionMap = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing collision map {}", from.display()))?;
    let mut df = export::series_frame(&map)?;
    tracing::info!(rows = df.height(), cols = df.width(), "table");
    ensure_parent(out)?;
    export::write_table(&mut df, out)?;
    provenance::write_sidecar(out, Payload::new(serde_json::json!({})).with_input(from))?;
    Ok(())
}

fn demo(out: &Path, seed: u64) -> Result<()> {
    tracing::info!(out = %out.display(), seed, "demo");
    let cfg = PhantomCfg {
        seed,
        ..PhantomCfg::default()
    };
    let plan = demo_plan(&cfg);
    write_json(out, &plan)?;
    provenance::write_sidecar(out, Payload::new(serde_json::json!({ "seed": seed })))?;
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["cfg"] = serde_json::to_value(MapCfg::default())?;
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// `MapCfg` from an optional JSON file, with the CLI threshold applied last.
/// Validation happens in `build_collision_map`, after the plan checks.
fn load_cfg(config: Option<&Path>, threshold_mm: Option<f64>) -> Result<MapCfg> {
    let mut cfg = match config {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MapCfg::default(),
    };
    if let Some(t) = threshold_mm {
        cfg.clearance_mm = t;
    }
    Ok(cfg)
}

/// A plan file holding `null` reads as "no plan".
fn read_plan(path: &Path) -> Result<Option<Plan>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing plan {}", path.display()))
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collision_map::MapError;
    use tempfile::tempdir;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn threshold_flag_overrides_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "clearance_mm": 250.0, "arc_technique": "VMAT" }"#).unwrap();
        let cfg = load_cfg(Some(&path), None).unwrap();
        assert_eq!(cfg.clearance_mm, 250.0);
        assert_eq!(cfg.arc_technique, "VMAT");
        let cfg = load_cfg(Some(&path), Some(240.0)).unwrap();
        assert_eq!(cfg.clearance_mm, 240.0);
        assert!(load_cfg(None, Some(-5.0)).unwrap().validate().is_err());
    }

    #[test]
    fn demo_then_map_then_export() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("plan.json");
        let out = dir.path().join("maps/map.json");
        let table = dir.path().join("maps/points.csv");
        demo(&plan, 7).unwrap();
        map(&plan, &out, None, None).unwrap();
        assert!(dir.path().join("maps/map.provenance.json").exists());

        let parsed: CollisionMap = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed.legend(), ["BODY", "VRT", "CouchSurface", "Planned Arcs"]);

        export(&out, &table).unwrap();
        assert!(table.exists());
    }

    #[test]
    fn null_plan_is_fatal_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("plan.json");
        let out = dir.path().join("map.json");
        fs::write(&plan, "null").unwrap();
        let err = map(&plan, &out, None, None).unwrap_err();
        assert_eq!(err.downcast_ref::<MapError>(), Some(&MapError::MissingPlan));
        assert_eq!(err.to_string(), "This script requires a plan");
        assert!(!out.exists());

        let err = map(&plan, &out, None, Some(-5.0)).unwrap_err();
        assert_eq!(err.to_string(), "This script requires a plan");
    }

    #[test]
    fn bad_threshold_is_fatal_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("plan.json");
        let out = dir.path().join("map.json");
        demo(&plan, 3).unwrap();
        let err = map(&plan, &out, None, Some(-5.0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MapError>(),
            Some(MapError::InvalidConfig { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn plan_without_structure_set_is_fatal() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("plan.json");
        fs::write(&plan, r#"{ "id": "P1", "beams": [] }"#).unwrap();
        let err = map(&plan, &dir.path().join("map.json"), None, None).unwrap_err();
        assert_eq!(err.to_string(), "This script requires a structure set");
    }
}
