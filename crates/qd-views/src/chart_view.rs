//! Per-year timeline: count columns plus the strongest magnitude per year

use std::cell::Cell;
use std::ops::RangeInclusive;
use std::time::Instant;

use egui::{RichText, Ui};
use egui_plot::{AxisHints, Bar, BarChart, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use qd_core::chart::{count_tooltip, COLUMN_WIDTH};
use qd_core::{DashboardController, MagnitudeAxis};

use crate::colors;
use crate::{SpaceView, SpaceViewId, ViewerContext};

const MAGNITUDE_SERIES: &str = "Strongest magnitude";
const COUNT_SERIES: &str = "Earthquakes";

thread_local! {
    // Axis formatters are plain fns, so the current scale is parked here
    static MAGNITUDE_AXIS: Cell<MagnitudeAxis> = Cell::new(MagnitudeAxis::new(1));
}

fn magnitude_tick(y: f64, _digits: usize, _range: &RangeInclusive<f64>) -> String {
    MAGNITUDE_AXIS.with(|axis| axis.get().tick_label(y))
}

fn count_tick(y: f64, _digits: usize, _range: &RangeInclusive<f64>) -> String {
    if y >= 0.0 && y.fract() == 0.0 {
        format!("{}", y as i64)
    } else {
        String::new()
    }
}

pub struct YearChartView {
    title: String,
}

impl Default for YearChartView {
    fn default() -> Self {
        Self::new()
    }
}

impl YearChartView {
    pub fn new() -> Self {
        Self {
            title: "Timeline".to_string(),
        }
    }

    fn chart_ui(&mut self, dashboard: &mut DashboardController, ui: &mut Ui) {
        let series = dashboard.year_series();
        if series.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No earthquakes to chart").weak());
            });
            return;
        }

        ui.label(RichText::new("Click a year to show its earthquakes on the map").small().weak());

        let axis = MagnitudeAxis::new(series.count_ceiling());
        MAGNITUDE_AXIS.with(|cell| cell.set(axis));
        let tooltip_series = series.clone();
        let bars: Vec<Bar> = series
            .buckets()
            .iter()
            .map(|b| {
                Bar::new(b.year as f64, b.count as f64)
                    .width(COLUMN_WIDTH)
                    .name(b.year.to_string())
                    .fill(colors::COUNT_BARS)
            })
            .collect();
        let magnitudes: Vec<[f64; 2]> = series
            .buckets()
            .iter()
            .map(|b| [b.year as f64, axis.to_plot(b.max_magnitude)])
            .collect();
        let (first_year, last_year) = match (series.buckets().first(), series.buckets().last()) {
            (Some(first), Some(last)) => (first.year as f64, last.year as f64),
            _ => return,
        };

        let plot = Plot::new("year_chart")
            .legend(Legend::default())
            .x_axis_label("Year")
            .custom_y_axes(vec![
                AxisHints::default().label("Earthquakes per year").formatter(count_tick),
                AxisHints::default()
                    .label("Strongest magnitude")
                    .formatter(magnitude_tick)
                    .placement(HPlacement::Right),
            ])
            .include_x(first_year - 0.6)
            .include_x(last_year + 0.6)
            .include_y(0.0)
            .include_y(axis.ceiling() * 1.05)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .label_formatter(move |name, value| {
                if name == MAGNITUDE_SERIES {
                    tooltip_series.magnitude_tooltip_at(value.x).unwrap_or_default()
                } else {
                    String::new()
                }
            });

        let response = plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(COUNT_SERIES)
                    .color(colors::COUNT_BARS)
                    .element_formatter(Box::new(|bar, _chart| count_tooltip(bar.value as usize))),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(magnitudes.clone()))
                    .name(MAGNITUDE_SERIES)
                    .color(colors::MAGNITUDE_LINE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(magnitudes))
                    .name(MAGNITUDE_SERIES)
                    .color(colors::MAGNITUDE_LINE)
                    .radius(3.5),
            );

            plot_ui.pointer_coordinate()
        });

        if response.response.clicked() {
            let year = response
                .inner
                .and_then(|p| dashboard.year_series().column_at(p.x, p.y));
            if let Some(year) = year {
                dashboard.focus_on_year(year, Instant::now());
            }
        }
    }
}

impl SpaceView for YearChartView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::YearChart
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ctx.with_dashboard(ui, |dashboard, ui| self.chart_ui(dashboard, ui));
    }
}
