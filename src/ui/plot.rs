use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::{ColorMap, outcome_color};

const EMPTY_SELECTION: &str = "No launches match the current selection";

/// Largest angle a single filled polygon may span; egui fills convex shapes only.
const MAX_WEDGE: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render an outcome pie. Slices start at 12 o'clock and run clockwise.
pub fn pie_chart(ui: &mut Ui, pie: &PieChart, site_colors: &ColorMap, height: f32) {
    ui.heading(pie.title.as_str());

    Plot::new("outcome_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            if pie.total() == 0 {
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, 0.0), RichText::new(EMPTY_SELECTION).italics())
                        .anchor(Align2::CENTER_CENTER),
                );
                return;
            }

            let mut start = FRAC_PI_2;
            for (i, slice) in pie.slices.iter().enumerate() {
                let Some(fraction) = pie.fraction(i) else {
                    continue;
                };
                if slice.value == 0 {
                    continue;
                }
                let sweep = fraction * TAU;
                let color = outcome_color(&slice.label)
                    .unwrap_or_else(|| site_colors.color_for(&slice.label));

                for points in wedges(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(points))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                if fraction >= 0.03 {
                    let mid = start - sweep / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                        )
                        .color(Color32::WHITE)
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
                start -= sweep;
            }
        });
}

/// Split a clockwise sector starting at angle `start` into convex wedges.
fn wedges(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    (0..pieces)
        .map(|k| {
            let a0 = start - step * k as f64;
            let segments = ((step / TAU) * 96.0).ceil().max(2.0) as usize;
            let mut points = vec![[0.0, 0.0]];
            points.extend((0..=segments).map(|s| {
                let a = a0 - step * s as f64 / segments as f64;
                [a.cos(), a.sin()]
            }));
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter
// ---------------------------------------------------------------------------

/// Render the payload scatter, one series per booster category.
///
/// The x axis is pinned to the chart's requested range every frame.
pub fn scatter_chart(ui: &mut Ui, scatter: &ScatterChart, booster_colors: &ColorMap, height: f32) {
    ui.heading(scatter.title.as_str());

    let (mut x_min, mut x_max) = (scatter.x_range.min(), scatter.x_range.max());
    if x_max - x_min < f64::EPSILON {
        x_min -= 50.0;
        x_max += 50.0;
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\npayload: {:.0} kg\nclass: {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, -0.25], [x_max, 1.25]));

            if scatter.is_empty() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new((x_min + x_max) / 2.0, 0.5),
                        RichText::new(EMPTY_SELECTION).italics(),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
                return;
            }

            for category in scatter.categories() {
                let points: PlotPoints = scatter
                    .points_in(category)
                    .map(|p| [p.x, p.y])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// Height left for each of two stacked charts in the remaining space.
pub fn half_height(ui: &Ui) -> f32 {
    let heading = ui.text_style_height(&egui::TextStyle::Heading) + ui.spacing().item_spacing.y * 2.0;
    ((ui.available_height() - 2.0 * heading) / 2.0).max(120.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_sector_is_split_into_convex_wedges() {
        assert_eq!(wedges(FRAC_PI_2, TAU).len(), 4);
        assert_eq!(wedges(FRAC_PI_2, 0.1).len(), 1);
        assert_eq!(wedges(FRAC_PI_2, MAX_WEDGE + 0.01).len(), 2);
    }
}
