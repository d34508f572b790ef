use super::hand::Hand;
use super::splits::Subsets;
use crate::cards::card::Card;
use crate::cards::lookup;
use crate::strategy::Scorer;
use crate::Ev;
use crate::Score;

/// how many Pareto maxima we retain for dominance pruning. beyond
/// this, candidates are still scored, just not remembered.
const MAXIMA: usize = 128;

/// counters from a single play, for observability only
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub scored: usize,
    pub strong_front: usize,
    pub tied_lanes: usize,
}

/// arrange thirteen cards into the lanes that maximize the scorer.
///
/// fronts run over all C(13,3) triples. the ten leftovers split into
/// an unordered pair of five-card lanes, pinned by their lowest card
/// so each split surfaces once; whichever side ranks lower becomes
/// the middle. arrangements where the front is not strictly weakest,
/// or where the five-card lanes tie, are fouls and are skipped.
///
/// candidates dominated in all three lane ranks by an arrangement
/// already seen cannot score better under any lane-monotone scorer,
/// so they are pruned before the scorer runs.
///
/// ties in score keep the first arrangement encountered, which makes
/// the result deterministic for a fixed scorer.
pub fn play(deal: &[Card; 13], scorer: &Scorer) -> (Hand, Stats) {
    let scoring = scorer.scoring(deal);
    let mut stats = Stats::default();
    let mut maxima = Vec::<[Score; 3]>::with_capacity(MAXIMA);
    let mut best = Option::<Hand>::None;
    let mut best_ev = Ev::NEG_INFINITY;
    for front in Subsets::new(3, 13) {
        let (fc, rest) = pick(deal, front);
        let ef = lookup::eval3(&fc);
        for four in Subsets::new(4, 9) {
            let (a, b) = divide(&rest, four);
            let ea = lookup::eval5(&a);
            let eb = lookup::eval5(&b);
            if ef >= ea || ef >= eb {
                stats.strong_front += 1;
                continue;
            }
            if ea == eb {
                stats.tied_lanes += 1;
                continue;
            }
            let (lo, hi) = match ea < eb {
                true => (ea, eb),
                false => (eb, ea),
            };
            let mut dominated = false;
            let mut i = 0;
            while i < maxima.len() {
                let m = maxima[i];
                if m[0] >= ef && m[1] >= lo && m[2] >= hi {
                    dominated = true;
                    break;
                }
                if m[0] <= ef && m[1] <= lo && m[2] <= hi {
                    maxima.swap_remove(i);
                    continue;
                }
                i += 1;
            }
            if dominated {
                continue;
            }
            if maxima.len() < MAXIMA {
                maxima.push([ef, lo, hi]);
            }
            let ev = scoring.score(ef, lo, hi);
            stats.scored += 1;
            if ev > best_ev {
                best_ev = ev;
                best = Some(match ea < eb {
                    true => Hand {
                        front: fc,
                        middle: a,
                        back: b,
                    },
                    false => Hand {
                        front: fc,
                        middle: b,
                        back: a,
                    },
                });
            }
        }
    }
    let best = best.expect("every deal admits a sorted arrangement");
    (best, stats)
}

/// split the deal by a 13-bit mask into front and leftovers
fn pick(deal: &[Card; 13], mask: u16) -> ([Card; 3], [Card; 10]) {
    let mut front = [deal[0]; 3];
    let mut rest = [deal[0]; 10];
    let mut f = 0;
    let mut r = 0;
    for (i, card) in deal.iter().enumerate() {
        match mask >> i & 1 {
            1 => {
                front[f] = *card;
                f += 1;
            }
            _ => {
                rest[r] = *card;
                r += 1;
            }
        }
    }
    (front, rest)
}

/// split ten leftovers into five and five. the lowest leftover is
/// pinned to the first lane and the mask picks 4 of the other 9.
fn divide(rest: &[Card; 10], mask: u16) -> ([Card; 5], [Card; 5]) {
    let mut a = [rest[0]; 5];
    let mut b = [rest[0]; 5];
    let mut na = 1;
    let mut nb = 0;
    for i in 0..9 {
        match mask >> i & 1 {
            1 => {
                a[na] = rest[i + 1];
                na += 1;
            }
            _ => {
                b[nb] = rest[i + 1];
                nb += 1;
            }
        }
    }
    (a, b)
}
