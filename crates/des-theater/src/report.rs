//! End-of-run summary.

use std::fmt::Write as _;

use des_core::SimTime;

use crate::Theater;

/// Per-movie figures consumed by the report.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieReport {
    pub name:         String,
    pub sold_out_at:  Option<SimTime>,
    pub reneged:      u32,
    pub fulfilled:    u32,
    pub insufficient: u32,
    pub tickets_sold: u32,
    pub remaining:    u32,
    pub discarded:    u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TheaterReport {
    pub movies: Vec<MovieReport>,
}

impl TheaterReport {
    pub fn from_theater(theater: &Theater) -> Self {
        let movies = theater
            .movies
            .iter()
            .map(|m| MovieReport {
                name:         m.name.clone(),
                sold_out_at:  m.sold_out_at,
                reneged:      m.reneged,
                fulfilled:    m.fulfilled,
                insufficient: m.insufficient,
                tickets_sold: m.tickets_sold,
                remaining:    m.available,
                discarded:    m.discarded,
            })
            .collect();
        Self { movies }
    }

    /// Human-readable summary.  Only sold-out movies are listed.
    pub fn render(&self) -> String {
        let mut out = String::from("*** Movie Renege ***\n");
        for m in &self.movies {
            if let Some(at) = m.sold_out_at {
                let _ = writeln!(
                    out,
                    "Movie '{}' sold out {:.1} minutes after ticket counter opening",
                    m.name,
                    at.since(SimTime::ZERO)
                );
                let _ = writeln!(
                    out,
                    "\tNumber of people leaving queue when film sold out: {}",
                    m.reneged
                );
            }
        }
        out
    }
}
