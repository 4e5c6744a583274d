pub use cgmath;
pub use bounds::WorldBounds;
pub use client::{wall_clock, Client, Frontend};
pub use config::{ClientConfig, Palette};
pub use error::{Result, ViewError};
pub use feed::{ChannelTransport, FeedEvent, Inbound, InitData, Outbound, Transport, Update};
pub use interaction::{InteractionController, PointerButton, PointerEvent, Reaction};
pub use metrics::{ChartFeed, MetricsWindow};
pub use render::{draw_scene, Canvas, DrawCommand, DrawList};
pub use scene::{Car, DynamicSnapshot, RoadSegment, Roadwork, TrafficLight};
pub use session::{ConnectionStatus, SessionState};
pub use stats::{Stats, StatsDisplay};
pub use svg::SvgCanvas;
pub use util::Interval;
pub use viewport::{zoom_factor, ViewTransform, Viewport};

mod bounds;
mod client;
mod config;
mod error;
pub mod feed;
mod interaction;
pub mod math;
mod metrics;
pub mod render;
mod scene;
mod session;
mod stats;
mod svg;
mod util;
mod viewport;
