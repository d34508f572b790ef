pub mod product;
pub mod rollout;
pub mod sampled;
pub mod train;

use crate::cards::card::Card;
use crate::cards::lookup::SCORE_MAX;
use crate::play::hand::showdown;
use crate::Ev;
use crate::Probability;
use crate::Score;
use self::product::Product;
use self::rollout::Rollout;
use self::sampled::Sampled;
use std::borrow::Cow;

/// one of the three lanes of an arrangement
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Lane {
    Front = 0,
    Middle = 1,
    Back = 2,
}

impl Lane {
    pub fn all() -> [Lane; 3] {
        [Lane::Front, Lane::Middle, Lane::Back]
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Lane::Front => write!(f, "front"),
            Lane::Middle => write!(f, "middle"),
            Lane::Back => write!(f, "back"),
        }
    }
}

/// per-lane win probabilities indexed by dense rank: the chance
/// that a lane of that rank beats the sampled opposition. each
/// lane's table is non-decreasing and sized SCORE_MAX + 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Wins([Vec<Probability>; 3]);

impl Wins {
    pub fn of(&self, lane: Lane) -> &[Probability] {
        &self.0[lane as usize]
    }

    pub fn probability(&self, lane: Lane, rank: Score) -> Probability {
        self.0[lane as usize][rank as usize]
    }

    /// empirical cumulative win tables from played-out lane ranks
    pub(crate) fn empirical(played: &[[Score; 3]]) -> Self {
        let n = played.len().max(1) as Probability;
        let mut wins = Self(std::array::from_fn(|_| vec![0.; SCORE_MAX as usize + 1]));
        for lanes in played {
            for (lane, &rank) in lanes.iter().enumerate() {
                wins.0[lane][rank as usize] += 1.;
            }
        }
        for lane in wins.0.iter_mut() {
            let mut seen = 0.;
            for p in lane.iter_mut() {
                seen += *p;
                *p = seen / n;
            }
        }
        wins
    }

    /// pointwise average, to smooth one best response toward another
    pub(crate) fn blend(&mut self, prior: &Wins) {
        for (lane, theirs) in self.0.iter_mut().zip(prior.0.iter()) {
            for (p, q) in lane.iter_mut().zip(theirs.iter()) {
                *p = (*p + *q) / 2.;
            }
        }
    }

    /// expected 2-4 score when the three lanes win independently
    /// with their tabled probabilities
    pub fn expectation(&self, f: Score, m: Score, b: Score) -> Ev {
        let pf = self.0[0][f as usize];
        let pm = self.0[1][m as usize];
        let pb = self.0[2][b as usize];
        let qf = 1. - pf;
        let qm = 1. - pm;
        let qb = 1. - pb;
        let pbon = pf * pm + pf * pb + pm * pb - 2. * pf * pm * pb;
        let qbon = qf * qm + qf * qb + qm * qb - 2. * qf * qm * qb;
        pf + pm + pb - qf - qm - qb + pbon - qbon
    }
}

impl From<[Vec<Probability>; 3]> for Wins {
    fn from(tables: [Vec<Probability>; 3]) -> Self {
        Self(tables)
    }
}

/// errors from scorer persistence and construction
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse(String),
    Unready(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {}", e),
            Error::Parse(e) => write!(f, "parse: {}", e),
            Error::Unready(e) => write!(f, "rollout {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// something that can score arrangements of a deal. handing out a
/// per-deal Scoring up front keeps the hot loop free of dispatch.
#[derive(Debug, Clone)]
pub enum Scorer {
    Product(Product),
    Sampled(Sampled),
    Rollout(Rollout),
}

impl Scorer {
    /// the scoring function for one deal. for most scorers the deal
    /// is irrelevant; a per-deal rollout spends it on fresh samples.
    pub fn scoring(&self, deal: &[Card; 13]) -> Scoring<'_> {
        match self {
            Scorer::Product(_) => Scoring::Product,
            Scorer::Sampled(sampled) => Scoring::Separable(Cow::Borrowed(sampled.wins())),
            Scorer::Rollout(rollout) => rollout.scoring(deal),
        }
    }

    /// win tables, for the scorers that carry them
    pub fn wins(&self) -> Option<&Wins> {
        match self {
            Scorer::Product(_) => None,
            Scorer::Sampled(sampled) => Some(sampled.wins()),
            Scorer::Rollout(rollout) => rollout.wins(),
        }
    }
}

/// a deal's scoring function over (front, middle, back) lane ranks
#[derive(Debug, Clone)]
pub enum Scoring<'a> {
    Product,
    Separable(Cow<'a, Wins>),
    Empirical(Cow<'a, [[Score; 3]]>),
}

impl Scoring<'_> {
    pub fn score(&self, f: Score, m: Score, b: Score) -> Ev {
        match self {
            Scoring::Product => Product::score(f, m, b),
            Scoring::Separable(wins) => wins.expectation(f, m, b),
            Scoring::Empirical(played) => {
                let head_to_head = played
                    .iter()
                    .map(|theirs| showdown([f, m, b], *theirs) as i64)
                    .sum::<i64>();
                head_to_head as Ev + (f + m + b) as Ev / 10000.
            }
        }
    }
}
