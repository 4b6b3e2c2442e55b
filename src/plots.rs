use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::stats::FrequencyTable;

pub const DEFAULT_LIMIT: usize = 10;
pub const FIGURE_SIZE_INCHES: (f64, f64) = (6.0, 4.0);
pub const PIXELS_PER_INCH: f64 = 100.0;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 90.0;
const BAR_FILL: &str = "#1f77b4";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// Vertical bar chart description, independent of how it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Counter-clockwise rotation of the x tick labels, in degrees.
    pub label_rotation: f64,
    pub size_inches: (f64, f64),
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Chart of the `limit` most frequent words in `table`.
    pub fn word_counts(table: &FrequencyTable, limit: usize) -> Self {
        let bars = table
            .top(limit)
            .into_iter()
            .map(|row| Bar {
                label: row.word.clone(),
                value: row.count,
            })
            .collect();

        Self {
            title: "Word Counts".to_string(),
            x_label: "Word".to_string(),
            y_label: "Counts".to_string(),
            label_rotation: 45.0,
            size_inches: FIGURE_SIZE_INCHES,
            bars,
        }
    }

    pub fn pixel_size(&self) -> (f64, f64) {
        (
            self.size_inches.0 * PIXELS_PER_INCH,
            self.size_inches.1 * PIXELS_PER_INCH,
        )
    }

    pub fn to_svg(&self) -> String {
        let (width, height) = self.pixel_size();
        let plot_left = MARGIN_LEFT;
        let plot_right = width - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = height - MARGIN_BOTTOM;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        let max_value = self.bars.iter().map(|bar| bar.value).max().unwrap_or(0);
        let step = tick_step(max_value);
        let y_max = max_value.div_ceil(step).saturating_mul(step).max(step) as f64;
        let scale = |value: f64| plot_bottom - value / y_max * plot_height;

        // Writing into a String cannot fail.
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text class="title" x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
            width / 2.0,
            MARGIN_TOP / 2.0 + 5.0,
            escape(&self.title)
        );

        let mut next_tick = Some(0u64);
        while let Some(tick) = next_tick.filter(|&tick| tick as f64 <= y_max) {
            let y = scale(tick as f64);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{y:.1}" x2="{plot_left:.1}" y2="{y:.1}" stroke="black"/>"#,
                plot_left - 4.0
            );
            let _ = writeln!(
                svg,
                r#"<text class="ytick" x="{:.1}" y="{:.1}" font-size="10" text-anchor="end">{tick}</text>"#,
                plot_left - 6.0,
                y + 3.0
            );
            next_tick = tick.checked_add(step);
        }

        if !self.bars.is_empty() {
            let slot = plot_width / self.bars.len() as f64;
            let bar_width = slot * 0.8;
            for (i, bar) in self.bars.iter().enumerate() {
                let center = plot_left + slot * (i as f64 + 0.5);
                let top = scale(bar.value as f64);
                let _ = writeln!(
                    svg,
                    r#"<rect class="bar" x="{:.1}" y="{top:.1}" width="{bar_width:.1}" height="{:.1}" fill="{BAR_FILL}"><title>{}: {}</title></rect>"#,
                    center - bar_width / 2.0,
                    plot_bottom - top,
                    escape(&bar.label),
                    bar.value
                );
                let label_y = plot_bottom + 12.0;
                let _ = writeln!(
                    svg,
                    r#"<text class="xtick" x="{center:.1}" y="{label_y:.1}" font-size="10" text-anchor="end" transform="rotate({:.0} {center:.1} {label_y:.1})">{}</text>"#,
                    -self.label_rotation,
                    escape(&bar.label)
                );
            }
        }

        let _ = writeln!(
            svg,
            r#"<line x1="{plot_left:.1}" y1="{plot_bottom:.1}" x2="{plot_right:.1}" y2="{plot_bottom:.1}" stroke="black"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{plot_left:.1}" y1="{plot_top:.1}" x2="{plot_left:.1}" y2="{plot_bottom:.1}" stroke="black"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text class="xlabel" x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
            plot_left + plot_width / 2.0,
            height - 8.0,
            escape(&self.x_label)
        );
        let _ = writeln!(
            svg,
            r#"<text class="ylabel" x="14" y="{y:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 14 {y:.1})">{}</text>"#,
            escape(&self.y_label),
            y = plot_top + plot_height / 2.0
        );
        svg.push_str("</svg>\n");
        svg
    }
}

/// Renders the top `limit` words of `table` as an SVG bar chart at `output`.
pub fn plot_word_counts(table: &FrequencyTable, limit: usize, output: &Path) -> Result<()> {
    let chart = BarChart::word_counts(table, limit);
    fs::write(output, chart.to_svg())
        .with_context(|| format!("Failed to write chart {:?}", output))?;

    info!(
        action = "plot",
        component = "plotter",
        file_path = ?output,
        bar_count = chart.bars.len(),
        limit,
        "Saved word count chart"
    );
    Ok(())
}

/// Tick spacing of 1, 2 or 5 times a power of ten giving at most about five ticks.
fn tick_step(max_value: u64) -> u64 {
    let raw = max_value.div_ceil(5).max(1);
    let mut magnitude = 1u64;
    while magnitude.saturating_mul(10) <= raw {
        magnitude *= 10;
    }
    [1u64, 2, 5, 10]
        .into_iter()
        .map(|m| m.saturating_mul(magnitude))
        .find(|&step| step >= raw)
        .unwrap_or(u64::MAX)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
