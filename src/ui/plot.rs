use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points};

use crate::color::ColorMap;
use crate::state::AppState;

fn color_of(map: &Option<ColorMap>, label: &str) -> Color32 {
    map.as_ref()
        .map(|m| m.color_for(label))
        .unwrap_or(Color32::LIGHT_BLUE)
}

// ---------------------------------------------------------------------------
// Top-N ranking (horizontal bars, highest on top)
// ---------------------------------------------------------------------------

/// Top job titles by average score, one bar series per major group.
pub fn top_chart(ui: &mut Ui, state: &AppState) {
    let top = &state.charts.top;
    if top.is_empty() {
        ui.label("No job titles match the current filters.");
        return;
    }

    // Rank 0 sits at the top of the axis.
    let n = top.len();
    let mut per_group: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for (rank, r) in top.iter().enumerate() {
        let position = (n - 1 - rank) as f64;
        per_group.entry(r.major_group.as_str()).or_default().push(
            Bar::new(position, r.average_score)
                .name(format!("{} ({:.2})", r.job_title, r.average_score))
                .width(0.7),
        );
    }

    let titles: Vec<String> = top.iter().rev().map(|r| r.job_title.clone()).collect();

    Plot::new("top_chart")
        .legend(Legend::default())
        .height(400.0)
        .x_axis_label("Average Score")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            titles.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (group, bars) in per_group {
                let chart = BarChart::new(bars)
                    .horizontal()
                    .name(group)
                    .color(color_of(&state.group_colors, group));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Exposure level distribution
// ---------------------------------------------------------------------------

/// Share of each exposure level in the filtered view.
pub fn distribution_chart(ui: &mut Ui, state: &AppState) {
    let distribution = &state.charts.distribution;
    if distribution.is_empty() {
        ui.label("Nothing to count.");
        return;
    }

    Plot::new("distribution_chart")
        .legend(Legend::default())
        .height(300.0)
        .y_axis_label("Count")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, entry) in distribution.iter().enumerate() {
                let bar = Bar::new(i as f64, entry.count as f64)
                    .name(format!("{} ({:.1}%)", entry.level, entry.percent))
                    .width(0.8);
                let chart = BarChart::new(vec![bar])
                    .name(&entry.level)
                    .color(color_of(&state.level_colors, &entry.level));
                plot_ui.bar_chart(chart);
            }
        });

    for entry in distribution {
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(color_of(&state.level_colors, &entry.level), "■");
            ui.label(format!(
                "{}: {} ({:.1}%)",
                entry.level, entry.count, entry.percent
            ));
        });
    }
}

// ---------------------------------------------------------------------------
// Average score vs standard deviation
// ---------------------------------------------------------------------------

/// Scatter of score against spread, coloured by exposure level and sized by
/// score. Hovering a point shows its job title and major group.
pub fn scatter_chart(ui: &mut Ui, state: &AppState) {
    let scatter = &state.charts.scatter;
    if scatter.is_empty() {
        ui.label("No points to plot.");
        return;
    }

    let hover: Vec<(f64, f64, String)> = scatter
        .iter()
        .map(|p| {
            (
                p.average_score,
                p.standard_deviation,
                format!("{}\n{}", p.job_title, p.major_group),
            )
        })
        .collect();

    Plot::new("scatter_chart")
        .legend(Legend::default())
        .height(500.0)
        .x_axis_label("Average Score")
        .y_axis_label("Standard Deviation")
        .label_formatter(move |name, value: &PlotPoint| {
            let nearest = hover.iter().min_by(|a, b| {
                let da = (a.0 - value.x).powi(2) + (a.1 - value.y).powi(2);
                let db = (b.0 - value.x).powi(2) + (b.1 - value.y).powi(2);
                da.total_cmp(&db)
            });
            match nearest {
                Some((x, y, label)) if !name.is_empty() => {
                    format!("{label}\n{name}\nscore {x:.3}, sd {y:.3}")
                }
                _ => format!("score {:.3}, sd {:.3}", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for p in scatter {
                let radius = 2.0 + 6.0 * p.average_score.clamp(0.0, 1.0) as f32;
                let points = Points::new(PlotPoints::from(vec![[
                    p.average_score,
                    p.standard_deviation,
                ]]))
                .name(&p.mean_exposure_level)
                .color(color_of(&state.level_colors, &p.mean_exposure_level))
                .radius(radius);
                plot_ui.points(points);
            }
        });
}
