//! Scenario tests for des-theater.

use des_core::{CategoryId, ResourceId, SimTime};
use des_sim::{NoopObserver, Sim};

use crate::{
    OutcomeKind, ScriptedArrivals, Theater, TheaterBuilder, TheaterConfig, TheaterReport,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(movies: &[&str], tickets: u32) -> TheaterConfig {
    TheaterConfig {
        movies:            movies.iter().map(|s| s.to_string()).collect(),
        tickets_per_movie: tickets,
        horizon:           100.0,
        ..TheaterConfig::default()
    }
}

fn run_scripted(config: TheaterConfig, script: &[(f64, u32, u32)]) -> Sim<Theater> {
    let mut sim = TheaterBuilder::new(config)
        .arrivals(ScriptedArrivals::from_triples(script))
        .build()
        .unwrap();
    sim.run(&mut NoopObserver).unwrap();
    sim
}

fn kinds(theater: &Theater) -> Vec<(u32, OutcomeKind)> {
    theater.outcomes.iter().map(|o| (o.customer, o.kind)).collect()
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::TheaterError;

    #[test]
    fn default_is_valid_reference_run() {
        let c = TheaterConfig::default();
        c.validate().unwrap();
        assert_eq!(c.movies.len(), 3);
        assert_eq!(c.tickets_per_movie, 50);
        assert_eq!(c.sim_config().horizon, Some(SimTime(120.0)));
    }

    #[test]
    fn rejects_impossible_values() {
        let bad = [
            TheaterConfig { counter_capacity: 0, ..TheaterConfig::default() },
            TheaterConfig { movies: vec![], ..TheaterConfig::default() },
            TheaterConfig { min_tickets: 4, max_tickets: 2, ..TheaterConfig::default() },
            TheaterConfig { min_tickets: 0, ..TheaterConfig::default() },
            TheaterConfig { purchase_time: -1.0, ..TheaterConfig::default() },
            TheaterConfig { mean_interarrival: f64::NAN, ..TheaterConfig::default() },
            TheaterConfig { mean_interarrival: 0.0, ..TheaterConfig::default() },
            TheaterConfig { mean_interarrival: -0.5, ..TheaterConfig::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(TheaterError::Config(_))), "{c:?}");
            assert!(TheaterBuilder::new(c).build().is_err());
        }
    }
}

// ── Arrival sources ───────────────────────────────────────────────────────────

#[cfg(test)]
mod source_tests {
    use crate::{ArrivalSource, RandomArrivals, ScriptedArrivals};

    #[test]
    fn random_arrivals_are_reproducible_and_in_range() {
        let mut a = RandomArrivals::new(42, 0.5, 1, 6);
        let mut b = RandomArrivals::new(42, 0.5, 1, 6);
        for _ in 0..100 {
            let x = a.next_arrival(3).unwrap();
            assert_eq!(Some(x), b.next_arrival(3));
            assert!(x.delay >= 0.0);
            assert!(x.movie.0 < 3);
            assert!((1..=6).contains(&x.tickets));
        }
        assert!(a.next_arrival(0).is_none());
    }

    #[test]
    fn scripted_arrivals_run_dry() {
        let mut s = ScriptedArrivals::from_triples(&[(0.0, 0, 1), (1.0, 0, 2)]);
        assert_eq!(s.next_arrival(1).unwrap().tickets, 1);
        assert_eq!(s.next_arrival(1).unwrap().tickets, 2);
        assert!(s.next_arrival(1).is_none());
    }
}

// ── Stock bookkeeping ─────────────────────────────────────────────────────────

#[cfg(test)]
mod theater_tests {
    use super::*;
    use crate::Sale;
    use des_core::EventId;

    fn theater(tickets: u32) -> Theater {
        Theater::new(ResourceId(0), vec![("A".into(), EventId(0))], tickets, 2)
    }

    #[test]
    fn insufficient_leaves_stock_alone() {
        let mut t = theater(3);
        assert_eq!(t.sell(CategoryId(0), 4, SimTime(1.0)), Some(Sale::Insufficient));
        assert_eq!(t.movies[0].available, 3);
        assert_eq!(t.movies[0].tickets_sold, 0);
    }

    #[test]
    fn sale_below_mark_clamps_and_discards() {
        let mut t = theater(10);
        assert_eq!(
            t.sell(CategoryId(0), 8, SimTime(3.0)),
            Some(Sale::Sold { sold_out: false, discarded: 0 })
        );
        assert_eq!(
            t.sell(CategoryId(0), 1, SimTime(4.0)),
            Some(Sale::Sold { sold_out: true, discarded: 1 })
        );
        let m = &t.movies[0];
        assert_eq!((m.available, m.tickets_sold, m.discarded), (0, 9, 1));
        assert_eq!(m.sold_out_at, Some(SimTime(4.0)));
        assert_eq!(t.sell(CategoryId(0), 1, SimTime(5.0)), Some(Sale::Insufficient));
    }

    #[test]
    fn unknown_movie() {
        let mut t = theater(3);
        assert_eq!(t.sell(CategoryId(9), 1, SimTime::ZERO), None);
    }
}

// ── Scripted scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn buy_argue_buy_without_selling_out() {
        let sim = run_scripted(config(&["A"], 5), &[(0.0, 0, 2), (0.0, 0, 4), (0.0, 0, 1)]);
        let t = sim.state();
        assert_eq!(
            kinds(t),
            vec![
                (0, OutcomeKind::Fulfilled),
                (1, OutcomeKind::InsufficientStock),
                (2, OutcomeKind::Fulfilled),
            ]
        );
        let at: Vec<f64> = t.outcomes.iter().map(|o| o.at.0).collect();
        assert_eq!(at, vec![0.0, 1.0, 1.5]);

        let m = &t.movies[0];
        assert_eq!(m.available, 2);
        assert_eq!(m.tickets_sold, 3);
        assert!(!m.is_sold_out());
        assert!(!sim.has_triggered(m.sold_out));
        assert_eq!(t.peak_at_counter, 1);
        assert_eq!(t.at_counter, 0);
        assert_eq!(sim.resource(t.counter).unwrap().active(), 0);
    }

    #[test]
    fn single_sale_below_mark_sells_out_immediately() {
        let sim = run_scripted(config(&["A"], 2), &[(0.0, 0, 1)]);
        let t = sim.state();
        let m = &t.movies[0];
        assert_eq!(m.available, 0);
        assert_eq!(m.discarded, 1);
        assert_eq!(m.sold_out_at, Some(SimTime::ZERO));
        assert!(sim.has_triggered(m.sold_out));
        assert_eq!(kinds(t), vec![(0, OutcomeKind::Fulfilled)]);
        assert_eq!(
            TheaterReport::from_theater(t).render(),
            "*** Movie Renege ***\n\
             Movie 'A' sold out 0.0 minutes after ticket counter opening\n\
             \tNumber of people leaving queue when film sold out: 0\n"
        );
    }

    #[test]
    fn queued_customers_renege_when_movie_sells_out() {
        let script = [
            (0.0, 1, 1), // 0: B, buys 1 of 3, counter busy until 1.0
            (0.1, 0, 2), // 1: A, admitted at 1.0, buys 2 → 1 left → sold out
            (0.1, 0, 1), // 2: A, still queued → reneges at 1.0
            (0.1, 1, 1), // 3: B, admitted at 2.0, buys 1 → 1 left → sold out
            (5.0, 0, 1), // A is sold out: never becomes a customer
        ];
        let sim = run_scripted(config(&["A", "B"], 3), &script);
        let t = sim.state();
        assert_eq!(
            kinds(t),
            vec![
                (0, OutcomeKind::Fulfilled),
                (1, OutcomeKind::Fulfilled),
                (2, OutcomeKind::Reneged),
                (3, OutcomeKind::Fulfilled),
            ]
        );
        assert_eq!(t.outcomes[2].at, SimTime(1.0));

        let (a, b) = (&t.movies[0], &t.movies[1]);
        assert_eq!((a.sold_out_at, a.reneged, a.tickets_sold), (Some(SimTime(1.0)), 1, 2));
        assert_eq!((b.sold_out_at, b.reneged, b.tickets_sold), (Some(SimTime(2.0)), 0, 2));

        let counter = sim.resource(t.counter).unwrap();
        assert_eq!((counter.active(), counter.queued()), (0, 0));

        assert_eq!(
            TheaterReport::from_theater(t).render(),
            "*** Movie Renege ***\n\
             Movie 'A' sold out 1.0 minutes after ticket counter opening\n\
             \tNumber of people leaving queue when film sold out: 1\n\
             Movie 'B' sold out 2.0 minutes after ticket counter opening\n\
             \tNumber of people leaving queue when film sold out: 0\n"
        );
    }

    #[test]
    fn wider_counter_serves_in_parallel() {
        let c = TheaterConfig { counter_capacity: 2, ..config(&["A"], 20) };
        let sim = run_scripted(c, &[(0.0, 0, 1), (0.0, 0, 1), (0.0, 0, 1)]);
        let t = sim.state();
        let at: Vec<f64> = t.outcomes.iter().map(|o| o.at.0).collect();
        assert_eq!(at, vec![0.0, 0.0, 1.0]);
        assert_eq!(t.peak_at_counter, 2);
    }
}

// ── Reference run properties ──────────────────────────────────────────────────

#[cfg(test)]
mod reference_run_tests {
    use super::*;
    use crate::run_scenario;

    fn reference() -> Sim<Theater> {
        let mut sim = TheaterBuilder::new(TheaterConfig::default()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        sim
    }

    #[test]
    fn report_is_deterministic() {
        let a = run_scenario(TheaterBuilder::new(TheaterConfig::default()), &mut NoopObserver)
            .unwrap();
        let b = run_scenario(TheaterBuilder::new(TheaterConfig::default()), &mut NoopObserver)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.render(), b.render());
        assert!(a.render().starts_with("*** Movie Renege ***\n"));
    }

    #[test]
    fn seed_drives_the_arrival_stream() {
        let picks = |seed| {
            let config = TheaterConfig { seed, ..TheaterConfig::default() };
            let mut sim = TheaterBuilder::new(config).build().unwrap();
            assert_eq!(sim.config.seed, seed);
            sim.run(&mut NoopObserver).unwrap();
            sim.state().outcomes.iter().map(|o| (o.movie, o.tickets)).collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
        assert_ne!(picks(42), picks(7));
    }

    #[test]
    fn stock_is_conserved() {
        let sim = reference();
        assert_eq!(sim.now(), SimTime(120.0));
        for m in &sim.state().movies {
            assert_eq!(m.tickets_sold + m.discarded + m.available, m.initial, "{}", m.name);
            if m.is_sold_out() {
                assert_eq!(m.available, 0);
                assert!(m.discarded < sim.state().sold_out_below);
                assert!(sim.has_triggered(m.sold_out));
            } else {
                assert_eq!(m.discarded, 0);
                assert!(!sim.has_triggered(m.sold_out));
            }
        }
    }

    #[test]
    fn counter_never_over_capacity_and_admits_in_order() {
        let sim = reference();
        let t = sim.state();
        assert!(t.peak_at_counter <= 1);
        let admitted: Vec<u32> = t
            .outcomes
            .iter()
            .filter(|o| o.kind != OutcomeKind::Reneged)
            .map(|o| o.customer)
            .collect();
        assert!(admitted.windows(2).all(|w| w[0] < w[1]), "{admitted:?}");
    }

    #[test]
    fn reneges_only_after_sell_out_and_never_buy() {
        let sim = reference();
        let t = sim.state();
        for o in t.outcomes.iter().filter(|o| o.kind == OutcomeKind::Reneged) {
            let m = t.movie(o.movie).unwrap();
            assert_eq!(m.sold_out_at, Some(o.at));
        }
        for (i, m) in t.movies.iter().enumerate() {
            let movie = CategoryId(i as u32);
            let of_movie = || t.outcomes.iter().filter(move |o| o.movie == movie);
            let bought: u32 = of_movie()
                .filter(|o| o.kind == OutcomeKind::Fulfilled)
                .map(|o| o.tickets)
                .sum();
            assert_eq!(bought, m.tickets_sold);
            let reneged = of_movie().filter(|o| o.kind == OutcomeKind::Reneged).count();
            assert_eq!(reneged as u32, m.reneged);
        }
    }
}
