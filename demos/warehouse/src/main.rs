//! warehouse: end-to-end demo for the rust_droid grid simulation.
//!
//! A small warehouse floor with two shelving rows.  Three droids are spawned
//! from an embedded layout, one is walked to a loading bay immediately, and
//! the other two are dispatched and stepped tick by tick until they arrive.
//!
//! ```text
//! cargo run -p warehouse                      # default config
//! cargo run -p warehouse -- config.json       # SessionConfig as JSON
//! RUST_LOG=debug cargo run -p warehouse       # per-step events
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use dg_core::{Coordinate, DroidId, DroidKind, SessionConfig};
use dg_droid::MoveError;
use dg_sim::{load_layout_reader, SessionBuilder, SessionObserver};

// ── Layout CSV ────────────────────────────────────────────────────────────────

// Two shelving rows at x=4 and x=10, each with a gap at y=7.
const LAYOUT_CSV: &str = "\
cell,x,y\n\
obstacle,4,2\n\
obstacle,4,3\n\
obstacle,4,4\n\
obstacle,4,5\n\
obstacle,4,6\n\
obstacle,4,8\n\
obstacle,4,9\n\
obstacle,10,2\n\
obstacle,10,3\n\
obstacle,10,4\n\
obstacle,10,5\n\
obstacle,10,6\n\
obstacle,10,8\n\
obstacle,10,9\n\
worker,1,1\n\
scout,1,12\n\
builder,14,14\n\
";

const LOADING_BAY: Coordinate = Coordinate::new(13, 5);
const PICK_FACE:   Coordinate = Coordinate::new(7, 4);
const CHARGER:     Coordinate = Coordinate::new(0, 15);

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    steps:    usize,
    blocked:  usize,
    arrivals: usize,
    faults:   usize,
}

impl SessionObserver for Tally {
    fn on_step(&mut self, tick: u64, droid: &DroidId, to: Coordinate) {
        self.steps += 1;
        tracing::debug!(tick, %droid, %to, "step");
    }

    fn on_blocked(&mut self, tick: u64, droid: &DroidId, at: Coordinate, target: Coordinate) {
        self.blocked += 1;
        tracing::debug!(tick, %droid, %at, %target, "blocked");
    }

    fn on_arrival(&mut self, tick: u64, droid: &DroidId, at: Coordinate) {
        self.arrivals += 1;
        println!("  tick {tick:>3}: {droid} arrived at {at}");
    }

    fn on_fault(&mut self, tick: u64, droid: &DroidId, error: &MoveError) {
        self.faults += 1;
        tracing::warn!(tick, %droid, %error, "fault");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => SessionConfig::default(),
    };
    println!(
        "grid {}x{}, seed {}, {} random obstacles, max {} ticks",
        config.width, config.height, config.seed, config.random_obstacles, config.max_ticks
    );

    let layout = load_layout_reader(Cursor::new(LAYOUT_CSV)).context("embedded layout")?;
    let mut session = SessionBuilder::new(config)
        .layout(layout)
        .build()
        .context("building session")?;

    let ids: Vec<DroidId> = session.droids().iter().map(|d| d.id().clone()).collect();
    let [worker, scout, builder] = ids.as_slice() else {
        anyhow::bail!("expected three droids from the layout, found {}", ids.len());
    };
    let late = session.spawn_named("courier", CHARGER)?;
    println!("spawn \"courier\": {}", late.map_or("unknown kind".to_owned(), |id| id.to_string()));

    // ── Immediate navigation ──────────────────────────────────────────────
    let t0 = Instant::now();
    match session.navigate(worker, LOADING_BAY) {
        Ok(route) => println!("{worker}: walked {} steps to {LOADING_BAY}", route.len()),
        Err(e) => println!("{worker}: could not reach {LOADING_BAY}: {e}"),
    }

    // ── Tick-driven dispatch ──────────────────────────────────────────────
    for (id, goal) in [(scout, PICK_FACE), (builder, CHARGER)] {
        match session.dispatch(id, goal) {
            Ok(route) => println!("{id}: dispatched to {goal} ({} steps)", route.len()),
            Err(e) => println!("{id}: no route to {goal}: {e}"),
        }
    }

    let mut tally = Tally::default();
    let ticks = session.run(&mut tally);
    let elapsed = t0.elapsed();

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    println!(
        "{ticks} ticks, {} steps, {} blocked, {} arrivals, {} faults in {:.2?}",
        tally.steps, tally.blocked, tally.arrivals, tally.faults, elapsed
    );
    for droid in session.droids() {
        println!("  {droid}");
    }

    let samples = [
        (Coordinate::new(0, 0), Coordinate::new(15, 15)),
        (Coordinate::new(5, 5), Coordinate::new(9, 5)),
    ];
    for ((from, to), result) in samples.iter().zip(session.plan_routes(&samples)) {
        match result {
            Ok(route) => println!("route {from} -> {to}: {} steps", route.len()),
            Err(e) => println!("route {from} -> {to}: {e}"),
        }
    }

    for id in [worker, scout, builder] {
        session.despawn(id)?;
    }
    let extra = session.spawn(DroidKind::Worker, LOADING_BAY)?;
    println!("respawned {extra} at {LOADING_BAY}; {} cells occupied", session.grid().occupied_count());

    Ok(())
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
