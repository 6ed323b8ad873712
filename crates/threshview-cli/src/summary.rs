use std::time::Duration;

use console::Style;
use threshview_core::config::EngineConfig;
use threshview_core::params::ThresholdParams;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_export_summary(
    kind: &str,
    params: &ThresholdParams,
    written: usize,
    skipped: usize,
    elapsed: Duration,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("{kind} export")));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(params.threshold)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Selecting"),
        s.method.apply_to(params.direction)
    );
    if kind == "Overlay" {
        let c = params.overlay;
        println!(
            "  {:<14}{}",
            s.label.apply_to("Color"),
            s.value
                .apply_to(format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Written"),
        s.value.apply_to(written)
    );
    if skipped > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.disabled.apply_to(format!("{skipped} (empty buffers)"))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{:.2}s", elapsed.as_secs_f32()))
    );
}

pub fn print_config_summary(config: &EngineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Engine configuration"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Preview max"),
        s.value.apply_to(config.preview_max_side)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Thumb max"),
        s.value.apply_to(config.thumbnail_max_side)
    );
}
