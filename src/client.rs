use crate::config::ClientConfig;
use crate::error::Result;
use crate::feed::{decode, FeedEvent, Inbound, InitData, Outbound, Transport, Update};
use crate::interaction::{InteractionController, PointerEvent, Reaction};
use crate::math::Point2d;
use crate::metrics::{ChartFeed, MetricsWindow};
use crate::render::{draw_scene, Canvas};
use crate::scene::{DynamicSnapshot, RoadSegment};
use crate::session::{ConnectionStatus, SessionState};
use crate::stats::StatsDisplay;
use crate::viewport::{check_canvas, Viewport};
use log::{debug, info, warn};
use std::sync::mpsc::Receiver;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The surfaces the client draws on and reports to.
///
/// Only the canvas and the chart are required; the other hooks
/// default to doing nothing.
pub trait Frontend: Canvas + ChartFeed {
    /// Shows the latest statistics.
    fn show_stats(&mut self, _stats: &StatsDisplay) {}

    /// Shows the connection status.
    fn set_status(&mut self, _status: ConnectionStatus) {}

    /// Briefly acknowledges a roadwork request.
    fn flash_roadwork(&mut self) {}
}

/// Gets the time since the Unix epoch.
pub fn wall_clock() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// The visualisation client.
///
/// Owns the view, the latest scene and the session state, consumes events
/// from the server and repaints the frontend.
pub struct Client<T: Transport, F: Frontend> {
    /// Client settings.
    config: ClientConfig,
    /// Where commands are sent.
    transport: T,
    /// Where the scene is drawn.
    frontend: F,
    /// The user-side session flags.
    session: SessionState,
    /// The status indicator.
    status: ConnectionStatus,
    /// Pointer handling.
    controller: InteractionController,
    /// The view, which exists once `init_data` has been received.
    viewport: Option<Viewport>,
    /// The static road network.
    roads: Vec<RoadSegment>,
    /// The most recently accepted snapshot.
    snapshot: DynamicSnapshot,
    /// Recent average cycle times.
    metrics: MetricsWindow,
    /// The canvas size in pixels.
    canvas_size: (u32, u32),
    /// The time source used for blinking and the flash.
    clock: fn() -> Duration,
    /// When the roadwork acknowledgement disappears.
    flash_until: Option<Duration>,
}

impl<T: Transport, F: Frontend> Client<T, F> {
    /// Creates a client for a canvas of the given size.
    pub fn new(
        config: ClientConfig,
        transport: T,
        frontend: F,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            controller: InteractionController::new(config.zoom_step),
            metrics: MetricsWindow::new(config.metrics_capacity),
            config,
            transport,
            frontend,
            session: Default::default(),
            status: Default::default(),
            viewport: None,
            roads: vec![],
            snapshot: Default::default(),
            canvas_size: (width, height),
            clock: wall_clock,
            flash_until: None,
        })
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: fn() -> Duration) -> Self {
        self.clock = clock;
        self
    }

    /// Gets the session flags.
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Gets the status indicator.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Gets the view, if the world has been received.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Gets the static road network.
    pub fn roads(&self) -> &[RoadSegment] {
        &self.roads
    }

    /// Gets the most recently accepted snapshot.
    pub fn snapshot(&self) -> &DynamicSnapshot {
        &self.snapshot
    }

    /// Gets the chart window.
    pub fn metrics(&self) -> &MetricsWindow {
        &self.metrics
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns true while the roadwork acknowledgement should be visible.
    pub fn flash_active(&self) -> bool {
        self.flash_until.map_or(false, |until| (self.clock)() < until)
    }

    /// Handles one event from the server connection.
    ///
    /// Fails only if `init_data` describes a world that cannot be shown,
    /// in which case the client stays uninitialised.
    pub fn handle_event(&mut self, event: FeedEvent) -> Result<()> {
        match event {
            FeedEvent::Connected => {
                info!("Connected to simulation server");
                self.set_status(ConnectionStatus::Connecting);
                Ok(())
            }
            FeedEvent::Disconnected => {
                warn!("Lost connection to simulation server");
                self.set_status(ConnectionStatus::Offline);
                Ok(())
            }
            FeedEvent::Message(Inbound::InitData(init)) => self.init(init),
            FeedEvent::Message(Inbound::Update(update)) => {
                self.apply_update(update);
                Ok(())
            }
        }
    }

    /// Decodes and handles one JSON message.
    pub fn handle_json(&mut self, json: &str) -> Result<()> {
        let msg = decode(json)?;
        self.handle_event(FeedEvent::Message(msg))
    }

    /// Handles every event queued on the channel, in arrival order.
    /// Returns the number of events handled.
    pub fn pump(&mut self, rx: &Receiver<FeedEvent>) -> usize {
        let mut count = 0;
        for event in rx.try_iter() {
            if let Err(err) = self.handle_event(event) {
                warn!("Failed to handle feed event: {}", err);
            }
            count += 1;
        }
        count
    }

    /// Handles one pointer event on the canvas.
    pub fn pointer(&mut self, event: PointerEvent) -> Reaction {
        let Some(view) = self.viewport.as_mut() else {
            return Reaction::Nothing;
        };
        let reaction = self.controller.handle(event, view, &self.session);
        match reaction {
            Reaction::Nothing => {}
            Reaction::Redraw => self.redraw(),
            Reaction::PlaceRoadwork(world) => {
                self.add_roadwork(world);
            }
        }
        reaction
    }

    /// Resizes the canvas, keeping the current pan and zoom.
    /// A zero-sized canvas is rejected and the previous size kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_canvas(width, height)?;
        if let Some(view) = self.viewport.as_mut() {
            view.resize(width, height)?;
        }
        self.canvas_size = (width, height);
        if !self.session.running {
            self.redraw();
        }
        Ok(())
    }

    /// Starts a simulation with `cars` vehicles, or the default count.
    /// Entities from an earlier session are forgotten.
    pub fn start(&mut self, cars: Option<u32>) {
        let nb = cars.unwrap_or(self.config.default_cars);
        self.session.running = true;
        self.snapshot = DynamicSnapshot::default();
        self.emit(Outbound::StartSim { nb });
    }

    /// Stops the simulation. Updates that arrive afterwards are ignored.
    pub fn stop(&mut self) {
        self.session.running = false;
        self.set_status(ConnectionStatus::Stopped);
        self.emit(Outbound::StopSim {});
    }

    /// Flips adaptive signal control and returns the new setting.
    pub fn toggle_ai(&mut self) -> bool {
        self.session.ai_enabled = !self.session.ai_enabled;
        let active = self.session.ai_enabled;
        self.emit(Outbound::ToggleAi { active });
        active
    }

    /// Requests a roadwork at a world position.
    ///
    /// Does nothing unless the simulation is running. The acknowledgement is
    /// shown straight away, without waiting for the server.
    pub fn add_roadwork(&mut self, world: Point2d) -> bool {
        if !self.session.running {
            debug!("Ignoring roadwork request: simulation is not running");
            return false;
        }
        self.emit(Outbound::AddRoadwork {
            x: world.x,
            y: world.y,
        });
        self.flash_until = Some((self.clock)() + Duration::from_millis(self.config.flash_ms));
        self.frontend.flash_roadwork();
        true
    }

    /// Repaints the canvas.
    ///
    /// While the simulation is stopped only the roads are drawn.
    pub fn redraw(&mut self) {
        let Some(view) = self.viewport.as_ref() else {
            return;
        };
        let empty = DynamicSnapshot::default();
        let snapshot = if self.session.running {
            &self.snapshot
        } else {
            &empty
        };
        let now = (self.clock)();
        draw_scene(&mut self.frontend, view, &self.roads, snapshot, &self.config, now);
    }

    fn init(&mut self, init: InitData) -> Result<()> {
        let (width, height) = self.canvas_size;
        let mut view = Viewport::new(init.bounds, width, height)?;
        view.fit(self.config.fit_scale, self.config.fit_margin)?;
        info!(
            "Received world {:?} x {:?} with {} roads",
            init.bounds.x,
            init.bounds.y,
            init.roads.len()
        );
        self.viewport = Some(view);
        self.roads = init.roads;
        self.snapshot = DynamicSnapshot::default();
        self.redraw();
        Ok(())
    }

    fn apply_update(&mut self, update: Update) {
        if !self.session.running {
            debug!("Discarding update: simulation is stopped");
            return;
        }
        self.snapshot = update.snapshot;
        self.set_status(ConnectionStatus::Online);
        self.redraw();

        let stats = StatsDisplay::from_stats(&update.stats, self.config.congestion_warn_pct);
        self.frontend.show_stats(&stats);
        self.metrics.push(update.stats.avg_cycle_sec);
        self.metrics.feed(&mut self.frontend);
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if self.status != status {
            debug!("Status: {}", status.label());
        }
        self.status = status;
        self.frontend.set_status(status);
    }

    fn emit(&mut self, command: Outbound) {
        debug!("Sending {:?}", command);
        self.transport.emit(&command);
    }
}
