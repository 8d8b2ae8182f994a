use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardcheck_core::frame::{Classification, QualityScore};
use cardcheck_core::io::load_frame;
use cardcheck_core::quality::FrameQualityAnalyzer;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::summary::{print_config_summary, Styles};

#[derive(Args)]
pub struct ScoreArgs {
    /// Image files to score
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

type Scored = (PathBuf, Result<Option<(QualityScore, Classification)>>);

pub fn run(args: &ScoreArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let analyzer = FrameQualityAnalyzer::with_default_backend(&config.quality)?;
    print_config_summary(&config, analyzer.backend_name());

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Scoring frames");

    let results: Vec<Scored> = args
        .files
        .par_iter()
        .map(|path| {
            let scored = load_frame(path)
                .with_context(|| format!("Failed to load {}", path.display()))
                .and_then(|frame| analyzer.analyze(&frame).map_err(Into::into));
            pb.inc(1);
            (path.clone(), scored)
        })
        .collect();
    pb.finish_and_clear();

    let s = Styles::new();
    println!(
        "{:>12}  {:>4}  {:>4}  {:<12}  {}",
        "Variance", "Min", "Max", "Verdict", "File"
    );
    println!("{}", "-".repeat(60));

    let mut usable = 0usize;
    for (path, scored) in &results {
        match scored {
            Ok(Some((score, class))) => {
                if class.can_capture() {
                    usable += 1;
                }
                println!(
                    "{:>12.2}  {:>4}  {:>4}  {:<12}  {}",
                    score.variance,
                    score.min_intensity,
                    score.max_intensity,
                    s.verdict(class),
                    s.path.apply_to(path.display())
                );
            }
            Ok(None) => println!(
                "{:>12}  {:>4}  {:>4}  {:<12}  {}",
                "-",
                "-",
                "-",
                s.bad.apply_to("empty"),
                s.path.apply_to(path.display())
            ),
            Err(e) => println!("{}  {}: {e:#}", s.bad.apply_to("error"), path.display()),
        }
    }

    println!("\nUsable frames: {} of {}", usable, results.len());
    Ok(())
}
