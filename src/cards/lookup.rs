use super::card::Card;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;
use crate::Score;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// the largest dense rank. one less than the number of distinct
/// ranks across all 3 and 5 card hands, five-of-a-kind included.
/// verified when the table is built.
pub const SCORE_MAX: Score = 6785;

const SLOTS: usize = 1 << 15;
const MASK: i32 = SLOTS as i32 - 1;
const PROBES: usize = 1 << 10;

/// a vacant slot keeps key 0, which no product of primes can be
#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    key: i32,
    rank: Score,
}

/// the whole evaluation state: an open addressed hash from card
/// product keys to dense ranks, plus reverse maps from dense rank
/// to an example hand. built once, immutable, shared.
struct Tables {
    slots: Vec<Entry>,
    hands3: Vec<Option<[Card; 3]>>,
    hands5: Vec<Option<[Card; 5]>>,
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

/// multiply rank primes into a signed key, negated when all five
/// cards share a suit. distinct multisets get distinct keys, with
/// the sign carrying flushness.
fn key(cards: &[Card]) -> i32 {
    let product = cards.iter().map(|c| c.prime() as i32).product::<i32>();
    let suited = cards.iter().fold(Card::SUITS, |acc, c| acc & u16::from(*c));
    match cards.len() == 5 && suited != 0 {
        true => -product,
        false => product,
    }
}

fn churn(k: i32) -> i32 {
    (k >> 4) ^ k.wrapping_shl(6)
}

/// walk the probe sequence until the key turns up. every legal
/// hand's key was inserted at build, so the walk terminates.
fn seek(key: i32) -> Score {
    let ref slots = TABLES.slots;
    let mut k = key;
    loop {
        let entry = slots[(k & MASK) as usize];
        if entry.key == key {
            return entry.rank;
        }
        k = churn(k);
    }
}

/// rank any legal 3 or 5 card hand
pub fn eval(cards: &[Card]) -> Score {
    seek(key(cards))
}

/// rank a front hand, with the key computed inline
pub fn eval3(cards: &[Card; 3]) -> Score {
    let key = cards[0].prime() as i32 * cards[1].prime() as i32 * cards[2].prime() as i32;
    seek(key)
}

/// rank a middle or back hand, with the key computed inline
pub fn eval5(cards: &[Card; 5]) -> Score {
    let product = cards
        .iter()
        .map(|c| c.prime() as i32)
        .product::<i32>();
    let suited = cards.iter().fold(Card::SUITS, |acc, c| acc & u16::from(*c));
    match suited != 0 {
        true => seek(-product),
        false => seek(product),
    }
}

/// an example 3 card hand of the given rank, if one exists
pub fn example3(rank: Score) -> Option<[Card; 3]> {
    TABLES.hands3.get(rank as usize).copied().flatten()
}

/// an example 5 card hand of the given rank, if one exists
pub fn example5(rank: Score) -> Option<[Card; 5]> {
    TABLES.hands5.get(rank as usize).copied().flatten()
}

/// advance a rank tuple. tuples are non-decreasing when repeats are
/// admitted and strictly increasing when they are not, so each pass
/// visits every rank multiset (or set) exactly once.
fn bump(idx: &mut [usize], k: usize, repeats: bool) -> bool {
    let mut i = 0;
    loop {
        idx[i] += 1;
        if i + 1 == idx.len() || idx[i] != idx[i + 1] + repeats as usize {
            return idx[i] < k;
        }
        idx[i] = match repeats {
            true => 0,
            false => i,
        };
        i += 1;
    }
}

impl Tables {
    /// enumerate every hand shape, rank each the slow way, then pack
    /// the distinct slow keys into dense ranks and the hash table.
    ///
    /// the non-flush pass admits repeated ranks (to cover pairs and
    /// better) with suits rotated so no five cards end up suited; the
    /// flush pass takes distinct ranks, all spades.
    fn build() -> Self {
        let rotation = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];
        let mut scores = BTreeMap::<i32, u32>::new();
        let mut hand3 = BTreeMap::<u32, [Card; 3]>::new();
        let mut hand5 = BTreeMap::<u32, [Card; 5]>::new();
        for size in [3usize, 5] {
            for flush in 0..=(size / 5) {
                let mut idx = match flush {
                    0 => vec![0usize; size],
                    _ => (0..size).collect::<Vec<usize>>(),
                };
                loop {
                    let cards = idx
                        .iter()
                        .enumerate()
                        .map(|(i, &ix)| {
                            let suit = match flush {
                                0 => rotation[i],
                                _ => Suit::Spade,
                            };
                            let rank = Rank::try_from(ix as u8 + 1).expect("rank in range");
                            Card::from((suit, rank))
                        })
                        .collect::<Vec<Card>>();
                    let key = key(&cards);
                    let slow = Ranking::slow(&cards, false)
                        .expect("enumerated hands rank")
                        .key();
                    if let Some(&prior) = scores.get(&key) {
                        assert!(prior == slow, "distinct evals under one key");
                    }
                    scores.insert(key, slow);
                    match size {
                        3 => {
                            let hand = <[Card; 3]>::try_from(&cards[..]).expect("three cards");
                            hand3.insert(slow, hand);
                        }
                        _ => {
                            let hand = <[Card; 5]>::try_from(&cards[..]).expect("five cards");
                            hand5.insert(slow, hand);
                        }
                    }
                    if !bump(&mut idx, 13, flush == 0) {
                        break;
                    }
                }
            }
        }
        let uniq = scores
            .values()
            .copied()
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect::<Vec<u32>>();
        assert!(
            uniq.len() == SCORE_MAX as usize + 1,
            "expected {} distinct ranks, found {}",
            SCORE_MAX as usize + 1,
            uniq.len()
        );
        let mut slots = vec![Entry::default(); SLOTS];
        for (&key, &slow) in scores.iter() {
            let rank = uniq.binary_search(&slow).expect("every slow key packed") as Score;
            let mut k = key;
            let mut walked = 0;
            while slots[(k & MASK) as usize].key != 0 {
                k = churn(k);
                walked += 1;
                assert!(walked < PROBES, "hash table saturated");
            }
            slots[(k & MASK) as usize] = Entry { key, rank };
        }
        let hands3 = uniq
            .iter()
            .map(|slow| hand3.get(slow).copied())
            .collect::<Vec<Option<[Card; 3]>>>();
        let hands5 = uniq
            .iter()
            .map(|slow| hand5.get(slow).copied())
            .collect::<Vec<Option<[Card; 5]>>>();
        Self {
            slots,
            hands3,
            hands5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::deck::DECK;

    fn cards<const N: usize>(names: [&str; N]) -> [Card; N] {
        names.map(|n| Card::try_from(n).unwrap())
    }

    #[test]
    fn trips_beat_pairs_in_front() {
        assert!(eval3(&cards(["HA", "DA", "CA"])) > eval3(&cards(["HA", "DA", "CK"])));
    }

    #[test]
    fn full_house_beats_two_pair() {
        let two_pair = eval5(&cards(["HK", "DK", "CQ", "DQ", "HJ"]));
        let full_house = eval5(&cards(["H2", "D2", "C2", "H3", "D3"]));
        assert!(two_pair < full_house);
    }

    #[test]
    fn royal_flush_tops_the_deck() {
        let royal = eval5(&cards(["SA", "SK", "SQ", "SJ", "ST"]));
        // the thirteen five-of-a-kind ranks sit above it in the
        // table but cannot be dealt from a single deck
        assert!(royal == SCORE_MAX - 13);
        let quint = cards(["CA", "DA", "HA", "SA", "CA"]);
        assert!(eval(&quint) == SCORE_MAX);
    }

    #[test]
    fn wheel_is_lowest_straight() {
        let wheel = eval5(&cards(["HA", "D2", "C3", "S4", "H5"]));
        let six_high = eval5(&cards(["H2", "D3", "C4", "S5", "H6"]));
        let broadway = eval5(&cards(["HT", "DJ", "CQ", "SK", "HA"]));
        let flat = eval5(&cards(["H2", "D3", "C4", "S5", "H7"]));
        assert!(wheel < six_high);
        assert!(six_high < broadway);
        assert!(flat < wheel);
    }

    #[test]
    fn examples_round_trip() {
        for rank in 0..=SCORE_MAX {
            if let Some(hand) = example3(rank) {
                assert!(eval3(&hand) == rank);
            }
            if let Some(hand) = example5(rank) {
                assert!(eval5(&hand) == rank);
            }
        }
    }

    #[test]
    fn every_rank_has_an_example() {
        for rank in 0..=SCORE_MAX {
            assert!(example3(rank).is_some() || example5(rank).is_some());
        }
    }

    #[test]
    fn three_card_totality() {
        let mut max = 0;
        for i in 0..52 {
            for j in (i + 1)..52 {
                for k in (j + 1)..52 {
                    let rank = eval3(&[DECK[i], DECK[j], DECK[k]]);
                    assert!(rank <= SCORE_MAX);
                    max = max.max(rank);
                }
            }
        }
        assert!(max < SCORE_MAX);
    }

    #[test]
    #[ignore]
    fn five_card_totality() {
        let mut max = 0;
        for a in 0..52 {
            for b in (a + 1)..52 {
                for c in (b + 1)..52 {
                    for d in (c + 1)..52 {
                        for e in (d + 1)..52 {
                            let hand = [DECK[a], DECK[b], DECK[c], DECK[d], DECK[e]];
                            let rank = eval5(&hand);
                            assert!(rank <= SCORE_MAX);
                            max = max.max(rank);
                        }
                    }
                }
            }
        }
        // five-of-a-kind is enumerable but not dealable
        assert!(max == SCORE_MAX - 13);
    }

    #[test]
    #[ignore]
    fn dense_ranks_follow_slow_keys() {
        let mut seen = std::collections::BTreeMap::<u32, Score>::new();
        for a in 0..52 {
            for b in (a + 1)..52 {
                for c in (b + 1)..52 {
                    for d in (c + 1)..52 {
                        for e in (d + 1)..52 {
                            let hand = [DECK[a], DECK[b], DECK[c], DECK[d], DECK[e]];
                            let slow = Ranking::slow(&hand, false).unwrap().key();
                            let fast = eval5(&hand);
                            assert!(*seen.entry(slow).or_insert(fast) == fast);
                        }
                    }
                }
            }
        }
        // ascending slow keys map to ascending dense ranks
        seen.values()
            .collect::<Vec<_>>()
            .windows(2)
            .for_each(|w| assert!(w[0] < w[1]));
    }
}
