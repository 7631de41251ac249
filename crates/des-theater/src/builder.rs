//! Fluent builder for a ready-to-run theater simulation.

use des_core::{DesResult, ResourceId};
use des_sim::{Sim, SimObserver};

use crate::{ArrivalSource, Arrivals, RandomArrivals, Theater, TheaterConfig, TheaterReport, TheaterResult};

/// Fluent builder for a [`Sim<Theater>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                  |
/// |-----------------|------------------------------------------|
/// | `.arrivals(s)`  | `RandomArrivals` seeded from `SimConfig` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = TheaterBuilder::new(TheaterConfig::default()).build()?;
/// sim.run(&mut NoopObserver)?;
/// println!("{}", TheaterReport::from_theater(sim.state()).render());
/// ```
pub struct TheaterBuilder {
    config:   TheaterConfig,
    arrivals: Option<Box<dyn ArrivalSource>>,
}

impl TheaterBuilder {
    pub fn new(config: TheaterConfig) -> Self {
        Self { config, arrivals: None }
    }

    /// Replace the random arrival stream.
    pub fn arrivals<A: ArrivalSource + 'static>(mut self, source: A) -> Self {
        self.arrivals = Some(Box::new(source));
        self
    }

    /// Validate the configuration, create the counter and the per-movie
    /// sold-out events, and schedule the arrival process at time zero.
    pub fn build(self) -> TheaterResult<Sim<Theater>> {
        let config = self.config;
        config.validate()?;

        let placeholder = Theater::new(
            ResourceId::INVALID,
            Vec::new(),
            config.tickets_per_movie,
            config.sold_out_below,
        );
        let mut sim = Sim::new(config.sim_config(), placeholder)?;

        let counter = sim.add_resource(config.counter_capacity)?;
        let movies = config
            .movies
            .iter()
            .map(|name| Ok((name.clone(), sim.event()?)))
            .collect::<DesResult<Vec<_>>>()?;
        sim.state = Theater::new(counter, movies, config.tickets_per_movie, config.sold_out_below);

        let source: Box<dyn ArrivalSource> = match self.arrivals {
            Some(source) => source,
            None => Box::new(RandomArrivals::new(
                sim.config.seed,
                config.mean_interarrival,
                config.min_tickets,
                config.max_tickets,
            )),
        };
        sim.spawn(Arrivals::new(source, config.argue_time, config.purchase_time))?;
        Ok(sim)
    }
}

/// Build and run a scenario to its horizon, returning the summary.
pub fn run_scenario<O: SimObserver>(
    builder:  TheaterBuilder,
    observer: &mut O,
) -> TheaterResult<TheaterReport> {
    let mut sim = builder.build()?;
    sim.run(observer)?;
    Ok(TheaterReport::from_theater(sim.state()))
}
