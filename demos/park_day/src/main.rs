//! park_day: one day at the stock park.
//!
//! Builds the default 100×70 park (pirate ship, ferris wheel, 60 patrons),
//! runs it to the end, writes every periodic snapshot as a JSON line and
//! prints the visitor report.
//!
//! ```text
//! park_day [SEED] [TICKS]
//! RUST_LOG=park_ride=debug park_day 7
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use park_core::{PatronId, RideId, Tick};
use park_patron::PatronState;
use park_ride::RideState;
use park_sim::{ParkBuilder, ParkConfig, ParkObserver, ParkSnapshot, TickCounters};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64  = 42;
const OUTPUT_DIR:      &str = "output/park_day";
const PROGRESS_EVERY:  u64  = 50;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Streams snapshots to a JSON-lines file and counts transitions.
struct DayObserver<W: Write> {
    out:                W,
    snapshot_rows:      usize,
    patron_transitions: usize,
    ride_cycles:        usize,
    error:              Option<anyhow::Error>,
}

impl<W: Write> DayObserver<W> {
    fn new(out: W) -> Self {
        Self { out, snapshot_rows: 0, patron_transitions: 0, ride_cycles: 0, error: None }
    }

    fn write_snapshot(&mut self, snapshot: &ParkSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ParkObserver for DayObserver<W> {
    fn on_patron_transition(&mut self, _: Tick, _: PatronId, _: PatronState, _: PatronState) {
        self.patron_transitions += 1;
    }

    fn on_ride_transition(&mut self, _: Tick, _: RideId, from: RideState, _: RideState) {
        if from == RideState::Unloading {
            self.ride_cycles += 1;
        }
    }

    fn on_tick_end(&mut self, tick: Tick, c: &TickCounters) {
        if tick.0.is_multiple_of(PROGRESS_EVERY) {
            info!(
                tick = tick.0,
                riding = c.riders_now,
                queued = c.queued_now,
                departed = c.departed_total,
                "progress"
            );
        }
    }

    fn on_snapshot(&mut self, _tick: Tick, snapshot: &ParkSnapshot) {
        // Keep the first write error and stop writing after it.
        if self.error.is_some() {
            return;
        }
        match self.write_snapshot(snapshot) {
            Ok(()) => self.snapshot_rows += 1,
            Err(e) => self.error = Some(e),
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Err(e) = self.out.flush()
            && self.error.is_none()
        {
            self.error = Some(e.into());
        }
        info!(tick = final_tick.0, "simulation ended");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("seed {s:?} is not a number"))?,
        None => SEED,
    };
    let mut config = ParkConfig::default_park();
    if let Some(t) = args.next() {
        config.total_ticks = t.parse().with_context(|| format!("ticks {t:?} is not a number"))?;
    }

    // 1. Build.
    let mut park = ParkBuilder::new(config).seed(seed).build()?;

    // 2. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let path = Path::new(OUTPUT_DIR).join("snapshots.jsonl");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut obs = DayObserver::new(BufWriter::new(file));

    // 3. Run.
    let t0 = Instant::now();
    park.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.error.take() {
        warn!(error = %e, "snapshot output incomplete");
    }
    info!(
        secs = elapsed.as_secs_f64(),
        snapshots = obs.snapshot_rows,
        patron_transitions = obs.patron_transitions,
        ride_cycles = obs.ride_cycles,
        path = %path.display(),
        "run complete"
    );

    // 4. Report.
    println!("{}", park.report());
    Ok(())
}
