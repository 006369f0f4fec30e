//! Terminal rendering
//!
//! Draws the dashboard as plain text: one block-character sparkline per
//! chart, a summary line and the status of the last refresh.

use std::fmt::Write;

use crate::chart::plot::downsample;
use crate::chart::{ChartWidget, DashboardCharts};
use crate::dashboard::ViewStatus;
use crate::model::{DisplayZone, Prediction};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Sparkline of `values`, at most `width` characters wide
///
/// Bars span the series' own min..max; a flat series sits mid-height.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return String::new();
    }
    let span = max - min;
    let top = (BARS.len() - 1) as f64;

    downsample(values, width)
        .into_iter()
        .map(|v| {
            let level = if span > 0.0 && v.is_finite() {
                (((v - min) / span) * top).round() as usize
            } else {
                BARS.len() / 2
            };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

/// Render one chart widget
pub fn render_chart(widget: &ChartWidget, width: usize) -> String {
    let spec = widget.spec();
    let state = widget.state();
    let mut out = String::new();

    let _ = write!(out, "{}", spec.title);
    match (state.latest(), state.min(), state.max(), state.mean()) {
        (Some((label, last)), Some(min), Some(max), Some(mean)) => {
            let _ = writeln!(
                out,
                "  actual {:.1}{} ({})  min {:.1}  max {:.1}  media {:.1}",
                last, spec.unit, label, min, max, mean
            );
        }
        _ => {
            let _ = writeln!(out, "  sin datos");
            return out;
        }
    }

    let _ = writeln!(out, "{}", sparkline(state.values(), width));

    let labels = state.labels();
    if let (Some(first), Some(last)) = (labels.first(), labels.last()) {
        let line = state.len().min(width);
        let gap = line.saturating_sub(first.len() + last.len()).max(1);
        if labels.len() > 1 {
            let _ = writeln!(out, "{}{}{}", first, " ".repeat(gap), last);
        } else {
            let _ = writeln!(out, "{}", first);
        }
    }

    out
}

/// One-line description of the view status
pub fn render_status(status: &ViewStatus, zone: DisplayZone) -> String {
    match status {
        ViewStatus::Loading => "Cargando datos...".to_string(),
        ViewStatus::Ready { updated_at, points } => format!(
            "Actualizado {} ({} lecturas)",
            zone.format_label(updated_at),
            points
        ),
        ViewStatus::Failed { message, at } => {
            format!("ERROR {}: {}", zone.format_label(at), message)
        }
    }
}

/// Render the whole dashboard screen
pub fn render_dashboard(
    charts: Option<&DashboardCharts>,
    status: &ViewStatus,
    prediction: Option<Prediction>,
    zone: DisplayZone,
    width: usize,
) -> String {
    let mut out = String::new();

    match charts {
        Some(charts) => {
            for widget in charts.widgets() {
                out.push_str(&render_chart(widget, width));
                out.push('\n');
            }
        }
        None => out.push_str("(sin gráficos todavía)\n\n"),
    }

    if let Some(prediction) = prediction {
        let _ = writeln!(out, "{}", prediction.display_text());
    }

    let _ = writeln!(out, "{}", render_status(status, zone));
    out
}
