//! The per-frame draw pipeline.

use crate::config::ClientConfig;
use crate::math::{Point2d, Vector2d};
use crate::scene::{DynamicSnapshot, RoadSegment};
use crate::viewport::{ViewTransform, Viewport};
use std::time::Duration;

/// A drawing surface.
///
/// Everything after [Canvas::set_transform] is given in canvas space
/// and is expected to be scaled and translated by that transform.
pub trait Canvas {
    /// Fills the whole surface, ignoring any transform.
    fn clear(&mut self, color: &str);

    /// Sets the pan and zoom for the following draw calls.
    fn set_transform(&mut self, transform: ViewTransform);

    /// Strokes all the line segments as a single path.
    fn stroke_lines(&mut self, lines: &[[Point2d; 2]], color: &str, width: f64);

    /// Fills an axis-aligned square given its top-left corner.
    fn fill_square(&mut self, corner: Point2d, size: f64, color: &str);

    /// Fills a circle.
    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: &str);
}

/// Returns true during the "on" half of the blink cycle.
///
/// The phase comes from wall-clock time, so the blink rate does not
/// depend on how often frames are drawn.
pub fn blink_phase(now: Duration, period_ms: u64) -> bool {
    (now.as_millis() / period_ms.max(1) as u128) % 2 == 0
}

/// Redraws the whole scene.
///
/// The static roads are always drawn, even for an empty snapshot.
pub fn draw_scene<C: Canvas + ?Sized>(
    canvas: &mut C,
    view: &Viewport,
    roads: &[RoadSegment],
    snapshot: &DynamicSnapshot,
    config: &ClientConfig,
    now: Duration,
) {
    let palette = &config.palette;
    let transform = view.transform();

    canvas.clear(&palette.background);
    canvas.set_transform(transform);

    let lines = roads
        .iter()
        .map(|road| [view.project(road.start), view.project(road.end)])
        .collect::<Vec<_>>();
    canvas.stroke_lines(&lines, &palette.road, transform.pixels(config.road_width_px));

    let color = if blink_phase(now, config.blink_period_ms) {
        &palette.roadwork_on
    } else {
        &palette.roadwork_off
    };
    let size = transform.pixels(config.roadwork_size_px);
    let half = Vector2d::new(0.5 * size, 0.5 * size);
    for work in &snapshot.roadworks {
        canvas.fill_square(view.project(work.pos) - half, size, color);
    }

    let radius = transform.pixels(config.light_radius_px);
    for light in &snapshot.lights {
        canvas.fill_circle(view.project(light.pos()), radius, &light.color);
    }

    // Cars never shrink below one canvas unit.
    let radius = f64::max(1.0, transform.pixels(config.car_radius_px));
    for car in &snapshot.cars {
        canvas.fill_circle(view.project(car.pos), radius, &palette.car);
    }
}

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: String,
    },
    SetTransform(ViewTransform),
    StrokeLines {
        lines: Vec<[Point2d; 2]>,
        color: String,
        width: f64,
    },
    FillSquare {
        corner: Point2d,
        size: f64,
        color: String,
    },
    FillCircle {
        centre: Point2d,
        radius: f64,
        color: String,
    },
}

/// A [Canvas] that records draw calls instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Default::default()
    }

    /// Gets the recorded draw calls, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Counts the number of full frames, i.e. calls to [Canvas::clear].
    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .count()
    }

    /// Gets the draw calls of the most recent frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Discards everything recorded so far.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: &str) {
        self.commands.push(DrawCommand::Clear {
            color: color.to_owned(),
        });
    }

    fn set_transform(&mut self, transform: ViewTransform) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn stroke_lines(&mut self, lines: &[[Point2d; 2]], color: &str, width: f64) {
        self.commands.push(DrawCommand::StrokeLines {
            lines: lines.to_vec(),
            color: color.to_owned(),
            width,
        });
    }

    fn fill_square(&mut self, corner: Point2d, size: f64, color: &str) {
        self.commands.push(DrawCommand::FillSquare {
            corner,
            size,
            color: color.to_owned(),
        });
    }

    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            centre,
            radius,
            color: color.to_owned(),
        });
    }
}
