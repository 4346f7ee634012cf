//! Fluent builder for constructing a [`Session`].

use dg_core::{Coordinate, SessionConfig, SimRng};
use dg_droid::DroidFactory;
use dg_spatial::{AStarSearch, PathSearch, SpatialGrid};
use rustc_hash::FxHashSet;

use crate::{Layout, Session, SimError, SimResult};

/// Fluent builder for [`Session<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                 |
/// |------------------|-------------------------|
/// | `.layout(l)`     | Empty grid, no droids   |
/// | `.search(s)`     | [`AStarSearch`]         |
///
/// # Build order
///
/// 1. Validate the [`SessionConfig`].
/// 2. Place the layout's obstacles.
/// 3. Scatter `config.random_obstacles` more over the cells left free,
///    skipping the layout's spawn cells.  Cells are drawn by a [`SimRng`]
///    seeded from `config.seed`, so the same seed always gives the same
///    grid.  Sparse requests sample cells; dense ones shuffle a list of
///    the free cells.
/// 4. Spawn the layout's droids in order.
///
/// # Example
///
/// ```rust,ignore
/// let layout = load_layout_csv(Path::new("warehouse.csv"))?;
/// let mut session = SessionBuilder::new(config).layout(layout).build()?;
/// ```
pub struct SessionBuilder<S: PathSearch = AStarSearch> {
    config: SessionConfig,
    layout: Option<Layout>,
    search: S,
}

impl SessionBuilder<AStarSearch> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            layout: None,
            search: AStarSearch,
        }
    }
}

impl<S: PathSearch> SessionBuilder<S> {
    /// Supply static obstacles and initial droids.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Route with `search` instead of the default A*.
    pub fn search<T: PathSearch>(self, search: T) -> SessionBuilder<T> {
        SessionBuilder {
            config: self.config,
            layout: self.layout,
            search,
        }
    }

    /// Validate inputs, populate the grid and return a ready session.
    pub fn build(self) -> SimResult<Session<S>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut grid = SpatialGrid::new(self.config.width, self.config.height)?;
        let layout = self.layout.unwrap_or_default();

        for &c in &layout.obstacles {
            grid.add_obstacle(c)?;
        }

        scatter_obstacles(&mut grid, &layout, &self.config)?;

        let mut session = Session {
            config:  self.config,
            grid,
            droids:  Vec::with_capacity(layout.spawns.len()),
            factory: DroidFactory::new(),
            search:  self.search,
            tick:    0,
        };
        for &(kind, at) in &layout.spawns {
            session.spawn(kind, at)?;
        }
        Ok(session)
    }
}

fn scatter_obstacles(grid: &mut SpatialGrid, layout: &Layout, config: &SessionConfig) -> SimResult<()> {
    let wanted = u64::from(config.random_obstacles);
    if wanted == 0 {
        return Ok(());
    }

    let reserved: FxHashSet<Coordinate> = layout
        .spawns
        .iter()
        .map(|&(_, c)| c)
        .filter(|&c| grid.is_valid_coordinate(c) && !grid.is_obstacle(c))
        .collect();
    let free = grid.cell_count() - grid.obstacle_count() as u64 - reserved.len() as u64;
    if free < wanted {
        return Err(SimError::Config(format!(
            "{wanted} random obstacles requested but only {free} cells are free"
        )));
    }

    let is_candidate = |grid: &SpatialGrid, c: Coordinate| !grid.is_obstacle(c) && !reserved.contains(&c);
    let mut rng = SimRng::new(config.seed);

    let picked: Vec<Coordinate> = if wanted.saturating_mul(2) <= free {
        // At least half of the free cells stay free, so rejection sampling
        // expects fewer than two draws per pick.
        let mut chosen = FxHashSet::default();
        let mut picked = Vec::with_capacity(config.random_obstacles as usize);
        while (picked.len() as u64) < wanted {
            let c = rng.coordinate(grid.width(), grid.height());
            if is_candidate(grid, c) && chosen.insert(c) {
                picked.push(c);
            }
        }
        picked
    } else {
        // More than half the free cells are wanted: the grid is no larger
        // than twice the request plus the layout, so list it row-major.
        let (width, height) = (grid.width(), grid.height());
        let mut free: Vec<Coordinate> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coordinate::new(x, y)))
            .filter(|&c| is_candidate(grid, c))
            .collect();
        rng.shuffle(&mut free);
        free.truncate(config.random_obstacles as usize);
        free
    };

    for c in picked {
        grid.add_obstacle(c)?;
    }
    tracing::debug!(count = wanted, seed = config.seed, "scattered obstacles");
    Ok(())
}
