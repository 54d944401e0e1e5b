//! town: crowd controller demo on a synthetic street grid.
//!
//! Vehicles drive a 4 × 4 intersection grid while pedestrians walk the
//! sidewalk ring of every block.  An ego vehicle circling inside the
//! central block is published from a separate thread, as an external producer
//! would.  The in-process `KinematicWorld` stands in for the simulator.
//!
//! ```text
//! cargo run -p town --release [-- config.json]
//! RUST_LOG=debug cargo run -p town     # per-spawn / per-removal logging
//! ```
//!
//! Telemetry lands in `output/town/` as three CSV files.

mod network;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use log::info;

use crowd_agent::footprint_corners;
use crowd_core::{Bounds, CrowdConfig, Tick, Vec2};
use crowd_output::{CsvWriter, TelemetryObserver, TelemetryWriter};
use crowd_sim::{CrowdControllerBuilder, CrowdObserver, CrowdTelemetry, EgoInbox, EgoTelemetry, TickStats};
use crowd_world::KinematicWorld;

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_SECS:   f32  = 20.0;
const OUTPUT_DIR: &str = "output/town";

/// Ego loop: radius (m) and speed (m/s) around the grid centre.
const EGO_RADIUS: f32 = 20.0;
const EGO_SPEED:  f32 = 6.0;
const EGO_RATE:   Duration = Duration::from_millis(20);

// ── Config ────────────────────────────────────────────────────────────────────

fn default_config() -> CrowdConfig {
    let edge = network::half_extent() + 10.0;
    CrowdConfig {
        num_network_agents:  24,
        num_sidewalk_agents: 40,
        bounds:              Bounds::new(Vec2::new(-edge, -edge), Vec2::new(edge, edge)),
        seed:                42,
        ..CrowdConfig::default()
    }
}

fn load_config(path: &str) -> Result<CrowdConfig> {
    let file = std::fs::File::open(path).with_context(|| format!("opening config {path}"))?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

// ── Ego producer ──────────────────────────────────────────────────────────────

fn spawn_ego_producer(inbox: EgoInbox, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let t0 = Instant::now();
        let omega = EGO_SPEED / EGO_RADIUS;
        let half  = Vec2::new(2.4, 1.0);
        while !stop.load(Ordering::Relaxed) {
            let angle    = t0.elapsed().as_secs_f32() * omega;
            let position = Vec2::new(angle.cos(), angle.sin()) * EGO_RADIUS;
            let heading  = Vec2::new(-angle.sin(), angle.cos());
            let velocity = heading * EGO_SPEED;
            inbox.publish(EgoTelemetry {
                position,
                velocity,
                yaw_deg: heading.yaw_deg(),
                corners: footprint_corners(position, heading, half),
                pref_velocity: velocity,
            });
            std::thread::sleep(EGO_RATE);
        }
        inbox.clear();
    })
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Writes telemetry, logs progress once per simulated second, and raises
/// `stop` after the last tick.
struct DemoObserver<W: TelemetryWriter> {
    inner:     TelemetryObserver<W>,
    stop:      Arc<AtomicBool>,
    last_tick: u64,
    log_every: u64,
    spawned:   u64,
    removed:   u64,
    ego_ticks: u64,
}

impl<W: TelemetryWriter> CrowdObserver for DemoObserver<W> {
    fn on_telemetry(&mut self, telemetry: &CrowdTelemetry) {
        self.inner.on_telemetry(telemetry);
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        self.inner.on_tick_end(stats);
        self.spawned   += stats.spawned as u64;
        self.removed   += stats.removed() as u64;
        self.ego_ticks += stats.ego_present as u64;

        if stats.tick.0 % self.log_every == 0 {
            info!(
                "{}: {} cars, {} peds, {} spawned, {} removed so far",
                stats.tick, stats.active_vehicles, stats.active_pedestrians, self.spawned, self.removed,
            );
        }
        if stats.tick.0 + 1 >= self.last_tick {
            self.stop.store(true, Ordering::Relaxed);
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None       => default_config(),
    };

    // 1. Town.
    let streets   = network::build_streets()?;
    let sidewalks = network::build_sidewalks()?;
    info!(
        "town: {} intersections, {} lane edges, {} sidewalk rings",
        streets.node_count(),
        streets.edge_count(),
        sidewalks.polygon_count(),
    );

    // 2. Controller.
    let inbox = EgoInbox::new();
    let world = KinematicWorld::new(1.0 / config.tick_rate_hz);
    let mut controller = CrowdControllerBuilder::new(config.clone(), world)
        .lane_map(Arc::new(streets))
        .sidewalk_map(Arc::new(sidewalks))
        .ego_inbox(inbox.clone())
        .build()?;

    // 3. Ego producer and output.
    let stop     = Arc::new(AtomicBool::new(false));
    let producer = spawn_ego_producer(inbox, Arc::clone(&stop));

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let ticks  = controller.clock.ticks_for_secs(SIM_SECS);
    let mut obs = DemoObserver {
        inner:     TelemetryObserver::new(writer, &config),
        stop:      Arc::clone(&stop),
        last_tick: ticks,
        log_every: controller.clock.ticks_for_secs(1.0).max(1),
        spawned:   0,
        removed:   0,
        ego_ticks: 0,
    };

    // 4. Run in real time.
    let t0 = Instant::now();
    let result = controller.run_until(&stop, true, &mut obs);
    stop.store(true, Ordering::Relaxed);
    producer.join().map_err(|_| anyhow!("ego producer panicked"))?;
    result?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!("Ran {} ticks in {:.2} s", controller.clock.current_tick.0, elapsed.as_secs_f64());
    println!("  spawned          : {}", obs.spawned);
    println!("  removed          : {}", obs.removed);
    println!("  ticks with ego   : {}", obs.ego_ticks);
    println!("  active cars/peds : {} / {}",
        controller.telemetry.network.len(),
        controller.telemetry.sidewalk.len(),
    );
    println!("  output           : {OUTPUT_DIR}/");
    Ok(())
}
