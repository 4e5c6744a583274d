//! Tests that drive a client through a live feed.

use assert_approx_eq::assert_approx_eq;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::channel;
use std::time::Duration;
use traffic_view::math::Point2d;
use traffic_view::render::DrawCommand;
use traffic_view::{
    Canvas, ChartFeed, Client, ClientConfig, ConnectionStatus, DrawList, FeedEvent, Frontend,
    Outbound, PointerButton, PointerEvent, Reaction, StatsDisplay, ViewError, ViewTransform,
};

/// Records everything the client shows.
#[derive(Default)]
struct Screen {
    draws: DrawList,
    chart: Vec<f64>,
    chart_updates: usize,
    stats: Option<StatsDisplay>,
    status: Option<ConnectionStatus>,
    flashes: usize,
}

impl Canvas for Screen {
    fn clear(&mut self, color: &str) {
        self.draws.clear(color)
    }

    fn set_transform(&mut self, transform: ViewTransform) {
        self.draws.set_transform(transform)
    }

    fn stroke_lines(&mut self, lines: &[[Point2d; 2]], color: &str, width: f64) {
        self.draws.stroke_lines(lines, color, width)
    }

    fn fill_square(&mut self, corner: Point2d, size: f64, color: &str) {
        self.draws.fill_square(corner, size, color)
    }

    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: &str) {
        self.draws.fill_circle(centre, radius, color)
    }
}

impl ChartFeed for Screen {
    fn replace_series(&mut self, labels: &[String], values: &[f64]) {
        assert_eq!(labels.len(), values.len());
        self.chart = values.to_vec();
        self.chart_updates += 1;
    }
}

impl Frontend for Screen {
    fn show_stats(&mut self, stats: &StatsDisplay) {
        self.stats = Some(stats.clone());
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = Some(status);
    }

    fn flash_roadwork(&mut self) {
        self.flashes += 1;
    }
}

type TestClient = Client<Vec<Outbound>, Screen>;

fn fixed_clock() -> Duration {
    Duration::from_millis(1_000)
}

/// Milliseconds reported by `stepped_clock`. Only one test advances it.
static NOW_MS: AtomicU64 = AtomicU64::new(0);

fn stepped_clock() -> Duration {
    Duration::from_millis(NOW_MS.load(Ordering::SeqCst))
}

fn client() -> TestClient {
    Client::new(ClientConfig::default(), vec![], Screen::default(), 100, 100)
        .unwrap()
        .with_clock(fixed_clock)
}

const INIT: &str = r#"{"event": "init_data", "data": {
    "bounds": [0, 100, 0, 100],
    "roads": [[[0, 0], [100, 100]]]
}}"#;

fn update(cars: &[[f64; 2]], avg_cycle: f64) -> String {
    serde_json::json!({
        "event": "update",
        "data": {
            "cars": cars,
            "lights": [{"x": 50.0, "y": 50.0, "color": "#ff0000"}],
            "roadworks": [],
            "stats": {"trips": 4, "congestion": 30.0, "avg_cycle": avg_cycle}
        }
    })
    .to_string()
}

fn circles(screen: &Screen) -> usize {
    screen
        .draws
        .last_frame()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
        .count()
}

#[test]
fn init_fits_world_and_draws_roads() {
    let mut client = client();
    client.handle_json(INIT).unwrap();

    let view = client.viewport().unwrap();
    assert_eq!(view.scale(), 0.95);
    assert_approx_eq!(view.origin().x, 2.5);
    assert_approx_eq!(view.origin().y, 2.5);

    let frame = client.frontend().draws.last_frame();
    assert_eq!(frame.len(), 3);
    match &frame[2] {
        DrawCommand::StrokeLines { lines, .. } => {
            assert_eq!(lines, &vec![[Point2d::new(0.0, 100.0), Point2d::new(100.0, 0.0)]]);
        }
        other => panic!("expected roads, got {:?}", other),
    }
}

#[test]
fn degenerate_bounds_abort_init() {
    let mut client = client();
    let err = client
        .handle_json(r#"{"event": "init_data", "data": {"bounds": [5, 5, 0, 1], "roads": []}}"#)
        .unwrap_err();
    assert!(matches!(err, ViewError::DegenerateBounds { .. }));
    assert!(client.viewport().is_none());
    assert_eq!(client.frontend().draws.frames(), 0);
}

#[test]
fn accepted_update_redraws_and_feeds_chart() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(Some(250));
    client.handle_json(&update(&[[10.0, 10.0], [20.0, 20.0]], 41.0)).unwrap();

    assert_eq!(client.snapshot().cars.len(), 2);
    assert_eq!(client.status(), ConnectionStatus::Online);
    let screen = client.frontend();
    assert_eq!(circles(screen), 3);
    assert_eq!(screen.chart, vec![41.0]);
    let stats = screen.stats.as_ref().unwrap();
    assert_eq!(stats.trips, "4");
    assert!(stats.congested);
    assert_eq!(client.transport(), &vec![Outbound::StartSim { nb: 250 }]);
}

#[test]
fn updates_after_stop_are_discarded() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(None);
    client.handle_json(&update(&[[10.0, 10.0]], 40.0)).unwrap();
    client.stop();

    let frames = client.frontend().draws.frames();
    client.handle_json(&update(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]], 99.0)).unwrap();

    assert_eq!(client.snapshot().cars.len(), 1);
    assert_eq!(client.frontend().draws.frames(), frames);
    assert_eq!(client.metrics().to_vec(), vec![40.0]);
    assert_eq!(client.status(), ConnectionStatus::Stopped);
    assert_eq!(
        client.transport(),
        &vec![Outbound::StartSim { nb: 600 }, Outbound::StopSim {}]
    );
}

#[test]
fn updates_before_start_are_discarded() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.handle_json(&update(&[[10.0, 10.0]], 40.0)).unwrap();
    assert!(client.snapshot().cars.is_empty());
    assert!(client.metrics().is_empty());
}

#[test]
fn chart_keeps_last_forty_samples() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(None);
    for i in 1..=45 {
        client.handle_json(&update(&[], i as f64)).unwrap();
    }
    let expected = (6..=45).map(|i| i as f64).collect::<Vec<_>>();
    assert_eq!(client.metrics().to_vec(), expected);
    assert_eq!(client.frontend().chart, expected);
    assert_eq!(client.frontend().chart_updates, 45);
}

#[test]
fn secondary_click_sends_roadwork_only_while_running() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    let click = PointerEvent::Press {
        button: PointerButton::Secondary,
        pos: Point2d::new(50.0, 50.0),
    };

    assert_eq!(client.pointer(click), Reaction::Nothing);
    assert!(client.transport().is_empty());
    assert_eq!(client.frontend().flashes, 0);

    client.start(None);
    let Reaction::PlaceRoadwork(world) = client.pointer(click) else {
        panic!("expected a roadwork request");
    };
    // Screen (50, 50) is canvas (50, 50) / 0.95 after the initial fit.
    let canvas = (50.0 - 2.5) / 0.95;
    assert_approx_eq!(world.x, canvas);
    assert_approx_eq!(world.y, 100.0 - canvas);
    assert_eq!(
        client.transport().last(),
        Some(&Outbound::AddRoadwork {
            x: world.x,
            y: world.y
        })
    );
    assert_eq!(client.frontend().flashes, 1);
    assert!(client.flash_active());
}

#[test]
fn panning_while_stopped_redraws_roads_only() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(None);
    client.handle_json(&update(&[[10.0, 10.0]], 40.0)).unwrap();
    client.stop();

    let frames = client.frontend().draws.frames();
    client.pointer(PointerEvent::Press {
        button: PointerButton::Primary,
        pos: Point2d::new(0.0, 0.0),
    });
    let reaction = client.pointer(PointerEvent::Move {
        pos: Point2d::new(10.0, 5.0),
    });
    assert_eq!(reaction, Reaction::Redraw);
    assert_eq!(client.frontend().draws.frames(), frames + 1);
    assert_eq!(circles(client.frontend()), 0);
    assert_eq!(client.snapshot().cars.len(), 1);
}

#[test]
fn panning_while_running_waits_for_feed() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(None);

    let frames = client.frontend().draws.frames();
    client.pointer(PointerEvent::Press {
        button: PointerButton::Primary,
        pos: Point2d::new(0.0, 0.0),
    });
    let reaction = client.pointer(PointerEvent::Move {
        pos: Point2d::new(10.0, 5.0),
    });
    assert_eq!(reaction, Reaction::Nothing);
    assert_eq!(client.frontend().draws.frames(), frames);

    client.handle_json(&update(&[], 40.0)).unwrap();
    let frame = client.frontend().draws.last_frame();
    match &frame[1] {
        DrawCommand::SetTransform(t) => {
            assert_approx_eq!(t.origin.x, 12.5);
            assert_approx_eq!(t.origin.y, 7.5);
        }
        other => panic!("expected a transform, got {:?}", other),
    }
}

#[test]
fn toggle_ai_flips_and_reports() {
    let mut client = client();
    assert!(client.toggle_ai());
    assert!(!client.toggle_ai());
    assert_eq!(
        client.transport(),
        &vec![
            Outbound::ToggleAi { active: true },
            Outbound::ToggleAi { active: false }
        ]
    );
}

#[test]
fn disconnect_shows_offline_and_keeps_session() {
    let (tx, rx) = channel();
    let mut client = client();
    client.start(None);
    tx.send(FeedEvent::Connected).unwrap();
    tx.send(FeedEvent::Message(traffic_view::feed::decode(INIT).unwrap()))
        .unwrap();
    tx.send(FeedEvent::Disconnected).unwrap();

    assert_eq!(client.pump(&rx), 3);
    assert_eq!(client.status(), ConnectionStatus::Offline);
    assert_eq!(client.frontend().status, Some(ConnectionStatus::Offline));
    assert!(client.session().running);
    assert!(client.viewport().is_some());
}

#[test]
fn pump_survives_bad_init() {
    let (tx, rx) = channel();
    let mut client = client();
    let bad = r#"{"event": "init_data", "data": {"bounds": [0, 1, 3, 3], "roads": []}}"#;
    tx.send(FeedEvent::Message(traffic_view::feed::decode(bad).unwrap()))
        .unwrap();
    tx.send(FeedEvent::Message(traffic_view::feed::decode(INIT).unwrap()))
        .unwrap();
    assert_eq!(client.pump(&rx), 2);
    assert!(client.viewport().is_some());
}

#[test]
fn resize_keeps_view_and_redraws_when_idle() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    let frames = client.frontend().draws.frames();
    client.resize(200, 50).unwrap();

    let view = client.viewport().unwrap();
    assert_eq!(view.size(), (200, 50));
    assert_eq!(view.scale(), 0.95);
    assert_eq!(client.frontend().draws.frames(), frames + 1);
    assert!(matches!(
        client.resize(0, 50),
        Err(ViewError::EmptyCanvas { .. })
    ));
}

#[test]
fn pointer_before_init_is_ignored() {
    let mut client = client();
    client.start(None);
    let click = PointerEvent::Press {
        button: PointerButton::Secondary,
        pos: Point2d::new(1.0, 1.0),
    };
    assert_eq!(client.pointer(click), Reaction::Nothing);
    assert_eq!(client.transport(), &vec![Outbound::StartSim { nb: 600 }]);
}

#[test]
fn zero_resize_before_init_keeps_size() {
    let mut client = client();
    assert!(matches!(
        client.resize(0, 100),
        Err(ViewError::EmptyCanvas { width: 0, height: 100 })
    ));
    client.handle_json(INIT).unwrap();
    assert_eq!(client.viewport().unwrap().size(), (100, 100));
}

#[test]
fn restart_forgets_previous_entities() {
    let mut client = client();
    client.handle_json(INIT).unwrap();
    client.start(None);
    client.handle_json(&update(&[[10.0, 10.0]], 40.0)).unwrap();
    client.stop();
    client.start(None);
    assert!(client.snapshot().is_empty());

    client.frontend_mut().draws.clear_commands();
    client.redraw();
    assert_eq!(client.frontend().draws.frames(), 1);
    assert_eq!(circles(client.frontend()), 0);
}

#[test]
fn flash_expires_after_flash_ms() {
    let mut client = client().with_clock(stepped_clock);
    client.handle_json(INIT).unwrap();
    client.start(None);
    assert!(!client.flash_active());

    NOW_MS.store(1_000, Ordering::SeqCst);
    client.pointer(PointerEvent::Press {
        button: PointerButton::Secondary,
        pos: Point2d::new(50.0, 50.0),
    });
    assert!(client.flash_active());

    NOW_MS.store(1_999, Ordering::SeqCst);
    assert!(client.flash_active());
    NOW_MS.store(2_000, Ordering::SeqCst);
    assert!(!client.flash_active());
}

#[test]
fn start_while_running_sends_again() {
    let mut client = client();
    client.start(Some(10));
    client.start(None);
    assert!(client.session().running);
    assert_eq!(
        client.transport(),
        &vec![Outbound::StartSim { nb: 10 }, Outbound::StartSim { nb: 600 }]
    );
}
