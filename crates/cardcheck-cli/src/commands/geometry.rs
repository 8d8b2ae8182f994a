use std::path::Path;

use anyhow::{bail, Result};
use cardcheck_core::geometry::aspect::solve;
use cardcheck_core::geometry::Geometry;
use clap::Args;

use crate::summary::print_geometry;

#[derive(Args)]
pub struct GeometryArgs {
    /// Native source size, WIDTHxHEIGHT (e.g. 1280x720)
    #[arg(long, value_parser = parse_size)]
    pub source: (u32, u32),

    /// Measured container width in pixels
    #[arg(long)]
    pub container_width: u32,
}

pub fn run(args: &GeometryArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let (w, h) = args.source;
    if w == 0 || h == 0 {
        bail!("Source size must be non-zero, got {w}x{h}");
    }

    let ratio = solve(
        w,
        h,
        config.geometry.target_aspect_ratio,
        config.geometry.aspect_ratio_tolerance,
    );
    let geometry = Geometry::compute(Some(args.source), args.container_width, ratio);

    println!("Source:      {w}x{h} (observed ratio {:.4})", h as f64 / w as f64);
    print_geometry(&geometry);
    match geometry.crop_window() {
        Some(r) => println!("Crop window: {}x{} at ({}, {})", r.width, r.height, r.x, r.y),
        None => println!("Crop window: none (empty container)"),
    }
    Ok(())
}

fn parse_size(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}
