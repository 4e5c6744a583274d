//! A frontend that renders frames to SVG documents.

use crate::client::Frontend;
use crate::math::Point2d;
use crate::metrics::ChartFeed;
use crate::render::Canvas;
use crate::session::ConnectionStatus;
use crate::stats::StatsDisplay;
use crate::viewport::ViewTransform;
use std::fmt::Write;

/// Escapes text for use inside an attribute or element.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Size of the chart inset in pixels.
const CHART_SIZE: (f64, f64) = (160.0, 60.0);

/// Renders the most recent frame, the chart and the statistics as SVG.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    /// The markup of the current frame.
    body: String,
    /// Whether a transformed group is open in `body`.
    group_open: bool,
    /// The chart series, oldest first.
    series: Vec<f64>,
    /// The chart line colour.
    chart_color: String,
    stats: Option<StatsDisplay>,
    status: ConnectionStatus,
    flashes: usize,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            group_open: false,
            series: vec![],
            chart_color: "#ffff00".into(),
            stats: None,
            status: ConnectionStatus::default(),
            flashes: 0,
        }
    }

    /// Sets the chart line colour.
    pub fn with_chart_color(mut self, color: &str) -> Self {
        self.chart_color = color.to_owned();
        self
    }

    /// Gets the number of roadwork acknowledgements shown so far.
    pub fn flashes(&self) -> usize {
        self.flashes
    }

    /// Produces the complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push_str(&self.body);
        if self.group_open {
            out.push_str("</g>\n");
        }
        self.write_chart(&mut out);
        self.write_stats(&mut out);
        out.push_str("</svg>\n");
        out
    }

    fn write_chart(&self, out: &mut String) {
        if self.series.len() < 2 {
            return;
        }
        let (w, h) = CHART_SIZE;
        let left = self.width as f64 - w - 10.0;
        let top = 10.0;
        let lo = self.series.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if hi > lo { hi - lo } else { 1.0 };
        let step = w / (self.series.len() - 1) as f64;

        let points = self
            .series
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = left + i as f64 * step;
                let y = top + h - (v - lo) / range * h;
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            r#"<polyline class="chart" fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            escape(&self.chart_color),
            points
        );
    }

    fn write_stats(&self, out: &mut String) {
        let mut line = format!("status: {}", self.status.label());
        if let Some(stats) = &self.stats {
            let _ = write!(
                line,
                " | trips: {} | congestion: {}{} | cycle: {}",
                stats.trips,
                stats.congestion,
                if stats.congested { " (!)" } else { "" },
                stats.cycle
            );
        }
        let _ = writeln!(
            out,
            r##"<text x="10" y="{}" fill="#aaaaaa" font-family="monospace" font-size="12">{}</text>"##,
            self.height.saturating_sub(10),
            escape(&line)
        );
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self, color: &str) {
        self.body.clear();
        self.group_open = false;
        let _ = writeln!(
            self.body,
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            escape(color)
        );
    }

    fn set_transform(&mut self, transform: ViewTransform) {
        if self.group_open {
            self.body.push_str("</g>\n");
        }
        let _ = writeln!(
            self.body,
            r#"<g transform="translate({} {}) scale({})">"#,
            transform.origin.x, transform.origin.y, transform.scale
        );
        self.group_open = true;
    }

    fn stroke_lines(&mut self, lines: &[[Point2d; 2]], color: &str, width: f64) {
        let mut path = String::new();
        for [a, b] in lines {
            let _ = write!(path, "M{} {}L{} {}", a.x, a.y, b.x, b.y);
        }
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            path,
            escape(color),
            width
        );
    }

    fn fill_square(&mut self, corner: Point2d, size: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{s}" height="{s}" fill="{}"/>"#,
            corner.x,
            corner.y,
            escape(color),
            s = size
        );
    }

    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            centre.x,
            centre.y,
            radius,
            escape(color)
        );
    }
}

impl ChartFeed for SvgCanvas {
    fn replace_series(&mut self, _labels: &[String], values: &[f64]) {
        self.series = values.to_vec();
    }
}

impl Frontend for SvgCanvas {
    fn show_stats(&mut self, stats: &StatsDisplay) {
        self.stats = Some(stats.clone());
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    fn flash_roadwork(&mut self) {
        self.flashes += 1;
    }
}
