use super::Scorer;
use super::Scoring;
use super::Wins;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::play::engine::play;
use crate::Score;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use std::borrow::Cow;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// deals an opponent random hands, watches what a child scorer
/// plays with them, and scores our candidates against that play.
///
/// pre-rolled, the samples are drawn once from the full deck and
/// reused across deals; otherwise each deal draws fresh from the 39
/// cards the opponent could actually hold. separable collapses the
/// samples into per-lane win tables; otherwise candidates are scored
/// head-to-head against every sample.
#[derive(Debug, Clone)]
pub struct Rollout {
    opponent: Box<Scorer>,
    n: usize,
    separable: bool,
    prerolled: bool,
    seed: u64,
    played: Vec<[Score; 3]>,
    wins: Option<Wins>,
}

impl Rollout {
    pub fn new(opponent: Scorer, n: usize, separable: bool, prerolled: bool) -> Self {
        Self::seeded(opponent, n, separable, prerolled, rand::thread_rng().gen())
    }

    /// as new, with the sampling streams pinned for reproducibility
    pub fn seeded(opponent: Scorer, n: usize, separable: bool, prerolled: bool, seed: u64) -> Self {
        let mut this = Self {
            opponent: Box::new(opponent),
            n,
            separable,
            prerolled,
            seed,
            played: Vec::new(),
            wins: None,
        };
        if prerolled {
            let (played, wins) = rollout(&[], &this.opponent, n, seed);
            this.played = played;
            this.wins = Some(wins);
        }
        this
    }

    pub fn opponent(&self) -> &Scorer {
        &self.opponent
    }
    pub fn separable(&self) -> bool {
        self.separable
    }
    pub fn prerolled(&self) -> bool {
        self.prerolled
    }
    pub fn samples(&self) -> &[[Score; 3]] {
        &self.played
    }

    /// the win tables, when they were pre-rolled separably
    pub fn wins(&self) -> Option<&Wins> {
        match self.prerolled && self.separable {
            true => self.wins.as_ref(),
            false => None,
        }
    }

    pub(crate) fn scoring(&self, deal: &[Card; 13]) -> Scoring<'_> {
        match self.prerolled {
            true => match self.separable {
                true => Scoring::Separable(Cow::Borrowed(
                    self.wins.as_ref().expect("pre-rolled at construction"),
                )),
                false => Scoring::Empirical(Cow::Borrowed(&self.played)),
            },
            false => {
                let (played, wins) = rollout(deal, &self.opponent, self.n, self.reseed(deal));
                match self.separable {
                    true => Scoring::Separable(Cow::Owned(wins)),
                    false => Scoring::Empirical(Cow::Owned(played)),
                }
            }
        }
    }

    /// a per-deal stream so re-rollouts vary by deal but stay
    /// reproducible under a fixed construction seed
    fn reseed(&self, deal: &[Card; 13]) -> u64 {
        let ref mut hasher = DefaultHasher::default();
        self.seed.hash(hasher);
        deal.hash(hasher);
        hasher.finish()
    }
}

/// play out n random opponent deals under the given scorer, skipping
/// any blocked cards, and fold the lane ranks they settled on into
/// cumulative win tables.
///
/// samples are independent, so they fan out across the thread pool;
/// each owns a deck clone and a rank-i stream split off the seed, and
/// writes its own slot of the output. the collect is the barrier.
pub(crate) fn rollout(
    blocked: &[Card],
    opponent: &Scorer,
    n: usize,
    seed: u64,
) -> (Vec<[Score; 3]>, Wins) {
    use rayon::iter::IntoParallelIterator;
    use rayon::iter::ParallelIterator;
    let deck = Deck::without(blocked);
    let progress = crate::progress(n);
    let played = (0..n)
        .into_par_iter()
        .map(|i| {
            let ref mut rng = stream(seed, i);
            let ref mut deck = deck.clone();
            let ref deal = deck.deal(rng);
            let (hand, _) = play(deal, opponent);
            hand.lanes()
        })
        .inspect(|_| progress.inc(1))
        .collect::<Vec<[Score; 3]>>();
    progress.finish_and_clear();
    let wins = Wins::empirical(&played);
    (played, wins)
}

fn stream(seed: u64, i: usize) -> SmallRng {
    let ref mut hasher = DefaultHasher::default();
    (seed, i).hash(hasher);
    SmallRng::seed_from_u64(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::deck::DECK;
    use crate::cards::lookup::SCORE_MAX;
    use crate::strategy::product::Product;
    use crate::strategy::Lane;

    const N: usize = 16;

    fn prerolled() -> Rollout {
        Rollout::seeded(Scorer::Product(Product), N, true, true, 2024)
    }

    #[test]
    fn tables_are_cumulative_probabilities() {
        let rollout = prerolled();
        let wins = rollout.wins().expect("pre-rolled separable");
        for lane in Lane::all() {
            let table = wins.of(lane);
            assert!(table.len() == SCORE_MAX as usize + 1);
            assert!(table.iter().all(|p| (0. ..=1.).contains(p)));
            table.windows(2).for_each(|w| assert!(w[0] <= w[1]));
            assert!(*table.last().unwrap() == 1.);
        }
    }

    #[test]
    fn lanes_never_foul() {
        let rollout = prerolled();
        for [f, m, b] in rollout.samples() {
            assert!(f < m);
            assert!(f < b);
            assert!(m < b);
        }
        assert!(rollout.samples().len() == N);
    }

    #[test]
    fn seeded_rollouts_reproduce() {
        let once = Rollout::seeded(Scorer::Product(Product), N, true, true, 7);
        let again = Rollout::seeded(Scorer::Product(Product), N, true, true, 7);
        assert!(once.samples() == again.samples());
    }

    #[test]
    fn per_deal_rollout_blocks_the_deal() {
        let deal = <[Card; 13]>::try_from(&DECK[..13]).unwrap();
        let fresh = Rollout::seeded(Scorer::Product(Product), N, false, false, 9);
        match fresh.scoring(&deal) {
            Scoring::Empirical(played) => {
                // opponents drawn from the other 39 cards can still
                // make every lane, just never with our cards
                assert!(played.len() == N);
            }
            _ => panic!("per-deal non-separable rollout scores empirically"),
        }
        assert!(fresh.wins().is_none());
    }

    #[test]
    fn unready_rollouts_refuse_collapse() {
        use crate::strategy::sampled::Sampled;
        let unrolled = Rollout::seeded(Scorer::Product(Product), N, true, false, 3);
        assert!(Sampled::try_from(&unrolled).is_err());
        let paired = Rollout::seeded(Scorer::Product(Product), N, false, true, 3);
        assert!(Sampled::try_from(&paired).is_err());
        let ready = prerolled();
        assert!(Sampled::try_from(&ready).is_ok());
    }
}
