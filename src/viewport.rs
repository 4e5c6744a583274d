//! The mapping between world space and screen space.
//!
//! A world point goes through two stages on its way to the screen. It is first
//! normalised into canvas pixels using the [WorldBounds], with the vertical
//! axis flipped so that world "up" points to the top of the canvas. The whole
//! canvas is then scaled and translated by the [ViewTransform], which is what
//! zooming and panning change.

use crate::bounds::WorldBounds;
use crate::error::{Result, ViewError};
use crate::math::{is_positive, Point2d, Vector2d};
use cgmath::EuclideanSpace;

/// The pan and zoom applied uniformly to the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// The zoom factor; always finite and strictly positive.
    pub scale: f64,
    /// The screen position, in pixels, of the canvas origin.
    pub origin: Vector2d,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin: Vector2d::new(0.0, 0.0),
        }
    }
}

impl ViewTransform {
    /// Maps a point in canvas space onto the screen.
    pub fn apply(&self, point: Point2d) -> Point2d {
        point * self.scale + self.origin
    }

    /// Maps a screen point back into canvas space.
    pub fn invert(&self, point: Point2d) -> Point2d {
        Point2d::from_vec((point - Point2d::from_vec(self.origin)) / self.scale)
    }

    /// Converts a length in screen pixels to a length in canvas units,
    /// so that it appears the same size at any zoom level.
    pub fn pixels(&self, len: f64) -> f64 {
        len / self.scale
    }
}

/// Returns the multiplicative zoom factor for one wheel notch.
///
/// Zooming in and out by the same `step` cancel out, whatever the order.
pub fn zoom_factor(step: f64, zoom_in: bool) -> f64 {
    if zoom_in {
        step.exp()
    } else {
        (-step).exp()
    }
}

/// The current view onto the world.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// The extent of the world.
    bounds: WorldBounds,
    /// The pan and zoom.
    transform: ViewTransform,
    /// The canvas width in pixels.
    width: u32,
    /// The canvas height in pixels.
    height: u32,
}

impl Viewport {
    /// Creates a viewport with a unit scale and no pan.
    pub fn new(bounds: WorldBounds, width: u32, height: u32) -> Result<Self> {
        bounds.validate()?;
        check_canvas(width, height)?;
        Ok(Self {
            bounds,
            transform: ViewTransform::default(),
            width,
            height,
        })
    }

    /// Resets the pan and zoom so the whole world is visible,
    /// inset by `margin` (a fraction of the canvas size) on the top-left.
    pub fn fit(&mut self, scale: f64, margin: f64) -> Result<()> {
        if !is_positive(scale) {
            return Err(ViewError::NonPositiveScale(scale));
        }
        self.transform = ViewTransform {
            scale,
            origin: Vector2d::new(self.width as f64 * margin, self.height as f64 * margin),
        };
        Ok(())
    }

    /// Gets the world bounds.
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Gets the current pan and zoom.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Gets the current zoom factor.
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Gets the screen position of the canvas origin.
    pub fn origin(&self) -> Vector2d {
        self.transform.origin
    }

    /// Gets the canvas size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Normalises a world point into canvas space, before pan and zoom.
    pub fn project(&self, world: Point2d) -> Point2d {
        let (w, h) = (self.width as f64, self.height as f64);
        Point2d::new(
            self.bounds.x.inv_lerp(world.x) * w,
            h - self.bounds.y.inv_lerp(world.y) * h,
        )
    }

    /// Maps a world point all the way onto the screen.
    pub fn world_to_screen(&self, world: Point2d) -> Point2d {
        self.transform.apply(self.project(world))
    }

    /// Maps a screen point back into world space.
    pub fn screen_to_world(&self, screen: Point2d) -> Point2d {
        let (w, h) = (self.width as f64, self.height as f64);
        let canvas = self.transform.invert(screen);
        Point2d::new(
            self.bounds.x.lerp(canvas.x / w),
            self.bounds.y.lerp((h - canvas.y) / h),
        )
    }

    /// Zooms by `factor` while keeping the world point under `cursor` in place.
    ///
    /// Rejects factors that are not finite and strictly positive, and any
    /// factor that would push the scale out of that range; the view is left
    /// untouched in either case.
    pub fn apply_zoom(&mut self, cursor: Point2d, factor: f64) -> Result<()> {
        if !is_positive(factor) {
            return Err(ViewError::InvalidZoom(factor));
        }
        let scale = self.transform.scale * factor;
        if !is_positive(scale) {
            return Err(ViewError::NonPositiveScale(scale));
        }
        let anchor = cursor - Point2d::from_vec(self.transform.origin);
        self.transform.origin -= anchor * (factor - 1.0);
        self.transform.scale = scale;
        Ok(())
    }

    /// Translates the view by a delta in screen pixels. There is no clamping.
    pub fn apply_pan(&mut self, delta: Vector2d) {
        self.transform.origin += delta;
    }

    /// Updates the canvas size, keeping the pan and zoom.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_canvas(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

/// Rejects a canvas with no drawable area.
pub(crate) fn check_canvas(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        Err(ViewError::EmptyCanvas { width, height })
    } else {
        Ok(())
    }
}
