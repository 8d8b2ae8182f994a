use console::Style;

use cardcheck_core::config::CardCheckConfig;
use cardcheck_core::frame::{Classification, QualityReport};
use cardcheck_core::geometry::Geometry;
use cardcheck_core::sampler::SamplerState;

pub struct Styles {
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub good: Style,
    pub bad: Style,
    pub path: Style,
}

impl Styles {
    pub fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().yellow().bold(),
            path: Style::new().underlined(),
        }
    }

    /// "ok", or the reasons capture is disabled.
    pub fn verdict(&self, class: &Classification) -> String {
        if class.can_capture() {
            return self.good.apply_to("ok").to_string();
        }
        let mut reasons = Vec::new();
        if class.is_blurry {
            reasons.push("blurry");
        }
        if class.is_glare {
            reasons.push("glare");
        }
        self.bad.apply_to(reasons.join(", ")).to_string()
    }
}

pub fn print_config_summary(config: &CardCheckConfig, backend_name: &str) {
    let s = Styles::new();
    let q = &config.quality;

    println!();
    println!("  {}", s.title.apply_to("Card Check"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(10)));
    println!(
        "  {:<16}{}",
        s.label.apply_to("Backend"),
        s.value.apply_to(backend_name)
    );
    println!(
        "  {:<16}{}x{} ({})",
        s.label.apply_to("Gaussian kernel"),
        q.kernel_size,
        q.kernel_size,
        q.laplacian_source
    );
    println!(
        "  {:<16}variance < {}",
        s.label.apply_to("Blurry when"),
        s.value.apply_to(q.blur_threshold)
    );
    println!(
        "  {:<16}max >= {} and min >= {}",
        s.label.apply_to("Glare when"),
        s.value.apply_to(q.max_intensity_threshold),
        s.value.apply_to(q.min_intensity_threshold)
    );
    println!();
}

pub fn print_geometry(g: &Geometry) {
    let s = Styles::new();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Aspect ratio"),
        s.value.apply_to(format!("{:.4}", g.aspect_ratio))
    );
    println!(
        "  {:<16}{}x{}",
        s.label.apply_to("Container"),
        g.container_width,
        g.container_height
    );
    println!(
        "  {:<16}x={} y={}",
        s.label.apply_to("Offsets"),
        g.offset_x,
        g.offset_y
    );
}

pub fn print_report(report: &QualityReport) {
    let s = Styles::new();
    println!(
        "  #{:<5} variance {:>10.2}  min {:>3}  max {:>3}  {}",
        report.cycle,
        report.score.variance,
        report.score.min_intensity,
        report.score.max_intensity,
        s.verdict(&report.classification)
    );
}

pub fn print_state(state: SamplerState) {
    let s = Styles::new();
    println!("  {} {}", s.label.apply_to("sampling:"), s.value.apply_to(state));
}
