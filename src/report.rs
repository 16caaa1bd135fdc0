// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart reports for a month or a year.
//!
//! Four charts are drawn per report: spend over time and spend per category,
//! once for everything and once for "my share" of shared expenses. The charts
//! are rendered as SVG into a scratch directory and inlined into a single
//! HTML document, which is the only file left behind.

use crate::aggregate::{Window, by_category, by_day, by_month, windowed};
use crate::db::Store;
use crate::error::SumOverflow;
use crate::models::Expense;
use anyhow::{Context, Result};
use plotters::element::Pie;
use plotters::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BAR_SIZE: (u32, u32) = (960, 540);
const DONUT_SIZE: (u32, u32) = (720, 720);
const BAR_COLOR: RGBColor = RGBColor(0x00, 0x8f, 0xd5);
const SLICE_COLORS: [RGBColor; 6] = [
    RGBColor(0x00, 0x8f, 0xd5),
    RGBColor(0xfc, 0x4f, 0x30),
    RGBColor(0xe5, 0xae, 0x38),
    RGBColor(0x6d, 0x90, 0x4f),
    RGBColor(0x8b, 0x8b, 0x8b),
    RGBColor(0x81, 0x0f, 0x7c),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar {
        title: String,
        x_desc: &'static str,
        data: BTreeMap<u32, Decimal>,
    },
    Donut {
        title: String,
        data: BTreeMap<String, Decimal>,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar { title, .. } | Chart::Donut { title, .. } => title,
        }
    }

    fn render(&self, path: &Path) -> Result<()> {
        let drawn = match self {
            Chart::Bar {
                title,
                x_desc,
                data,
            } => render_bar(path, title, x_desc, data),
            Chart::Donut { title, data } => render_donut(path, title, data),
        };
        drawn.with_context(|| format!("Render chart {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub window: Window,
    /// File stem and chart, in document order.
    pub charts: Vec<(String, Chart)>,
}

impl Report {
    pub fn build(records: &[Expense], window: Window) -> Result<Self, SumOverflow> {
        let split = windowed(records, window);
        let (kind, per, x_desc, full_time, shared_time) = match window {
            Window::Month { .. } => (
                "monthly",
                "day",
                "Day",
                by_day(&split.full)?,
                by_day(&split.shared)?,
            ),
            Window::Year(_) => (
                "yearly",
                "month",
                "Month",
                by_month(&split.full)?,
                by_month(&split.shared)?,
            ),
        };
        let charts = vec![
            (
                format!("{kind}_expenses_bar"),
                Chart::Bar {
                    title: format!("Expenses per {per} for {window}"),
                    x_desc,
                    data: full_time,
                },
            ),
            (
                format!("{kind}_expenses_donut"),
                Chart::Donut {
                    title: format!("Expenses per category for {window}"),
                    data: by_category(&split.full)?,
                },
            ),
            (
                format!("{kind}_shared_expenses_bar"),
                Chart::Bar {
                    title: format!("Shared expenses per {per} for {window}"),
                    x_desc,
                    data: shared_time,
                },
            ),
            (
                format!("{kind}_shared_expenses_donut"),
                Chart::Donut {
                    title: format!("Shared expenses per category for {window}"),
                    data: by_category(&split.shared)?,
                },
            ),
        ];
        Ok(Self { window, charts })
    }

    pub fn file_name(&self) -> String {
        match self.window {
            Window::Month { month, year } => format!("monthly_report_{:02}_{}.html", month, year),
            Window::Year(year) => format!("yearly_report_{}.html", year),
        }
    }

    /// Renders every chart and writes the document into `out_dir`.
    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        self.write_in(out_dir, &std::env::temp_dir())
    }

    /// Like [`Report::write`], with the per-report chart scratch dir created
    /// under `scratch_root`. The scratch dir is gone once this returns.
    pub fn write_in(&self, out_dir: &Path, scratch_root: &Path) -> Result<PathBuf> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Create output dir {}", out_dir.display()))?;
        let scratch = tempfile::Builder::new()
            .prefix("spendbot-charts")
            .tempdir_in(scratch_root)
            .with_context(|| format!("Create chart scratch dir in {}", scratch_root.display()))?;

        let mut images = Vec::with_capacity(self.charts.len());
        for (stem, chart) in &self.charts {
            let path = scratch.path().join(format!("{stem}.svg"));
            chart.render(&path)?;
            debug!(chart = %stem, "rendered chart");
            images.push((chart.title(), path));
        }

        let doc = out_dir.join(self.file_name());
        assemble(&doc, &format!("Expense report {}", self.window), &images)?;
        info!(path = %doc.display(), "report written");
        Ok(doc)
    }
}

pub fn generate(store: &Store, window: Window, out_dir: &Path) -> Result<PathBuf> {
    let (start, end) = window
        .bounds()
        .with_context(|| format!("Window {} is outside the calendar", window))?;
    let records = store.query_by_range(start, end)?;
    let report = Report::build(&records, window)
        .with_context(|| format!("Totals for {} do not fit", window))?;
    report.write(out_dir)
}

fn render_bar(path: &Path, title: &str, x_desc: &str, data: &BTreeMap<u32, Decimal>) -> Result<()> {
    let values: Vec<(u32, f64)> = data
        .iter()
        .map(|(k, v)| (*k, v.to_f64().unwrap_or(0.0)))
        .collect();
    let last = values.last().map_or(1, |(k, _)| *k);
    let max = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5_f64..(f64::from(last) + 0.5), 0.0_f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Amount")
        .x_labels(last as usize)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    chart.draw_series(values.iter().map(|&(k, v)| {
        let x = f64::from(k);
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], BAR_COLOR.filled())
    }))?;

    root.present()?;
    Ok(())
}

fn render_donut(path: &Path, title: &str, data: &BTreeMap<String, Decimal>) -> Result<()> {
    let root = SVGBackend::new(path, DONUT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(title, ("sans-serif", 28).into_font())?;

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;
    let sizes: Vec<f64> = data.values().map(|v| v.to_f64().unwrap_or(0.0)).collect();

    // a pie over nothing has no angles to draw
    if sizes.iter().sum::<f64>() <= 0.0 {
        area.draw(&Text::new(
            "No expenses",
            (center.0 - 60, center.1),
            ("sans-serif", 24).into_font(),
        ))?;
    } else {
        let labels: Vec<String> = data.keys().cloned().collect();
        let colors: Vec<RGBColor> = (0..sizes.len())
            .map(|i| SLICE_COLORS[i % SLICE_COLORS.len()])
            .collect();
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style(("sans-serif", 18).into_font());
        pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
        pie.donut_hole(radius * 0.7);
        area.draw(&pie)?;
    }

    root.present()?;
    Ok(())
}

fn assemble(doc: &Path, title: &str, images: &[(&str, PathBuf)]) -> Result<()> {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html><head><meta charset=\"utf-8\"><title>{title}</title></head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<h1>{title}</h1>")?;
    for (caption, path) in images {
        let svg = fs::read_to_string(path)
            .with_context(|| format!("Read chart {}", path.display()))?;
        writeln!(html, "<figure>")?;
        writeln!(html, "{svg}")?;
        writeln!(html, "<figcaption>{caption}</figcaption>")?;
        writeln!(html, "</figure>")?;
    }
    writeln!(html, "</body></html>")?;
    fs::write(doc, html).with_context(|| format!("Write report {}", doc.display()))?;
    Ok(())
}
