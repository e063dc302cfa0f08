//! Fluent builder for constructing a [`Park`].

use std::collections::HashSet;

use tracing::info;

use park_core::{ParkRng, RideId, Tick};
use park_patron::PatronStore;
use park_ride::Ride;
use park_terrain::Terrain;

use crate::config::{ParkConfig, TerrainLayout, TerrainSpec};
use crate::{Controls, Park, SimError, SimResult};

/// Builds a ready-to-run [`Park`] from a [`ParkConfig`].
///
/// # Validation
///
/// | Check                                                         | Error                          |
/// |---------------------------------------------------------------|--------------------------------|
/// | behaviour tuning in range                                     | `Patron(InvalidTuning)`        |
/// | grid well formed, at least 3×3                                | `Terrain(..)`                  |
/// | ride names unique                                             | `DuplicateRideName`            |
/// | ride parameters positive                                      | `Ride(InvalidConfig)`          |
/// | footprint inside the walls with a free row below it           | `Config`                       |
/// | footprints disjoint                                           | `Config`                       |
/// | spawn, exit and approach points on free cells                 | `Config`                       |
/// | at least one free interior cell                               | `Config`                       |
/// | explicit patron mix length equals `patron_count`              | `PatronCountMismatch`          |
///
/// # Example
///
/// ```rust,ignore
/// let mut park = ParkBuilder::new(ParkConfig::default_park()).seed(7).build()?;
/// park.run(&mut NoopObserver)?;
/// ```
pub struct ParkBuilder {
    config: ParkConfig,
}

impl ParkBuilder {
    pub fn new(config: ParkConfig) -> Self {
        Self { config }
    }

    /// Override the configured seed.  Kept in the park's configuration, so
    /// [`Park::reset`] replays the same run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate the configuration and construct the park at tick 0.
    pub fn build(self) -> SimResult<Park> {
        let config = self.config;
        config.tuning.validate()?;

        // ── Terrain and rides ─────────────────────────────────────────────
        let mut terrain = build_terrain(&config.terrain)?;
        let rides = place_rides(&config, &mut terrain)?;
        validate_points(&config, &terrain, &rides)?;

        // ── Patrons ───────────────────────────────────────────────────────
        let seed = config.effective_seed();
        if config.seed.is_none() {
            info!(seed, "no seed configured, using the default");
        }
        let mut park_rng = ParkRng::new(seed);
        let kinds = config.patron_mix.resolve(config.patron_count, &mut park_rng)?;
        let (patrons, rngs) = PatronStore::populate(&kinds, seed, &config.tuning);

        info!(
            seed,
            width = terrain.width(),
            height = terrain.height(),
            rides = rides.len(),
            patrons = patrons.len(),
            total_ticks = config.total_ticks,
            "park built"
        );

        Ok(Park {
            clock:    Tick::ZERO,
            controls: Controls::default(),
            history:  Vec::new(),
            config,
            terrain,
            rides,
            patrons,
            rngs,
        })
    }
}

fn build_terrain(spec: &TerrainSpec) -> SimResult<Terrain> {
    let mut terrain = match &spec.layout {
        TerrainLayout::Size { width, height } => Terrain::from_size(*width, *height)?,
        TerrainLayout::Grid(rows) => Terrain::from_grid(rows.clone())?,
    };
    if let Some(spawns) = &spec.spawns {
        terrain = terrain.with_spawns(spawns.clone())?;
    }
    if let Some(exits) = &spec.exits {
        terrain = terrain.with_exits(exits.clone())?;
    }
    Ok(terrain)
}

/// Create every ride and stamp its footprint onto the terrain.
fn place_rides(config: &ParkConfig, terrain: &mut Terrain) -> SimResult<Vec<Ride>> {
    let (width, height) = (terrain.width() as i64, terrain.height() as i64);
    let mut names = HashSet::new();
    let mut rides: Vec<Ride> = Vec::with_capacity(config.rides.len());

    for (i, spec) in config.rides.iter().enumerate() {
        let id = RideId::try_from(i)
            .map_err(|_| SimError::Config(format!("too many rides ({})", config.rides.len())))?;
        let name = spec.name.clone().unwrap_or_else(|| format!("Ride{}", i + 1));
        if !names.insert(name.clone()) {
            return Err(SimError::DuplicateRideName(name));
        }

        let ride = Ride::with_timing(
            id,
            name,
            spec.kind,
            spec.bbox,
            spec.capacity,
            spec.duration,
            spec.timing(),
        )?;

        let b = spec.bbox;
        let (x, y, w, h) = (b.x as i64, b.y as i64, b.w as i64, b.h as i64);
        // One free row below the footprint holds the queue entrance.
        if x < 1 || y < 1 || x + w > width - 1 || y + h > height - 2 {
            return Err(SimError::Config(format!(
                "ride {:?} footprint {b:?} must lie inside the walls of the {width}x{height} park \
                 with a free row below it",
                ride.name()
            )));
        }
        if let Some(other) = rides.iter().find(|r| r.bbox().overlaps(b)) {
            return Err(SimError::Config(format!(
                "ride {:?} overlaps ride {:?}",
                ride.name(),
                other.name()
            )));
        }

        terrain.stamp_barrier(b);
        rides.push(ride);
    }
    Ok(rides)
}

/// Spawn, exit and approach points must all be walkable once the rides are
/// stamped.
fn validate_points(config: &ParkConfig, terrain: &Terrain, rides: &[Ride]) -> SimResult<()> {
    for (what, points) in [("spawn", terrain.spawn_points()), ("exit", terrain.exit_points())] {
        if let Some(p) = points.iter().find(|&&p| !terrain.is_free(p)) {
            return Err(SimError::Config(format!("{what} point {p} is not on a free cell")));
        }
    }
    for ride in rides {
        let approach = ride.bbox().approach_point(config.tuning.approach_offset);
        if !terrain.is_free(approach) {
            return Err(SimError::Config(format!(
                "approach point {approach} of ride {:?} is blocked",
                ride.name()
            )));
        }
    }
    if terrain.free_interior_cells() == 0 {
        return Err(SimError::Config("terrain has no free interior cell".into()));
    }
    Ok(())
}
