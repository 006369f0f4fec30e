//! Chart Component
//!
//! Line chart on an HTML5 canvas, one per sensor series.

use aiot_dashboard::chart::plot::{label_indices, project, Viewport, YRange};
use aiot_dashboard::chart::{ChartSpec, ChartWidget};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 300;

/// Most x-axis labels drawn before they start to overlap
const MAX_X_LABELS: usize = 8;

/// Time-series chart component
#[component]
pub fn Chart(spec: ChartSpec) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the widget's data changes
    create_effect(move |_| {
        state.charts.with(|charts| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            let widget = charts.as_ref().map(|charts| {
                if spec.surface_id == charts.humidity().spec().surface_id {
                    charts.humidity()
                } else {
                    charts.temperature()
                }
            });
            draw_chart(&canvas, &spec, widget);
        });
    });

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center space-x-2 mb-4">
                <div
                    class="w-3 h-3 rounded-full"
                    style=format!("background-color: {}", spec.color)
                />
                <h2 class="text-lg font-semibold">{spec.title}</h2>
            </div>
            <canvas
                id=spec.surface_id
                node_ref=canvas_ref
                width=CANVAS_WIDTH.to_string()
                height=CANVAS_HEIGHT.to_string()
                class="w-full h-64 rounded-lg"
            />
        </div>
    }
}

/// Draw one widget on its canvas
fn draw_chart(canvas: &HtmlCanvasElement, spec: &ChartSpec, widget: Option<&ChartWidget>) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let viewport = Viewport::new(canvas.width() as f64, canvas.height() as f64);

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    let state = match widget {
        Some(widget) if !widget.state().is_empty() => widget.state(),
        _ => {
            ctx.set_fill_style(&"#6b7280".into());
            ctx.set_font("16px sans-serif");
            let _ = ctx.fill_text(
                "Sin datos",
                viewport.width / 2.0 - 35.0,
                viewport.height / 2.0,
            );
            return;
        }
    };
    let Some(range) = YRange::for_values(state.values()) else {
        return;
    };

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for value in range.ticks() {
        let y = viewport.y_at(value, &range);
        ctx.begin_path();
        ctx.move_to(viewport.margin_left, y);
        ctx.line_to(viewport.width - viewport.margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    // Series line, then point markers
    let points = project(state, &viewport);
    ctx.set_stroke_style(&spec.color.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(*x, *y);
        } else {
            ctx.line_to(*x, *y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&spec.color.into());
    for (x, y) in &points {
        ctx.begin_path();
        let _ = ctx.arc(*x, *y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis labels
    ctx.set_fill_style(&"#9ca3af".into());
    let labels = state.labels();
    for i in label_indices(labels.len(), MAX_X_LABELS) {
        let x = viewport.x_at(i, labels.len());
        let _ = ctx.fill_text(&labels[i], x - 25.0, viewport.height - 10.0);
    }
}
