use super::card::Card;
use super::rank::Rank;

/// hand categories, weakest first
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
    FiveOfAKind = 9,
}

/// the classical evaluation of a 3 or 5 card hand: a category plus
/// up to five kicker values, most significant first. kicker values
/// compare with the Ace high (2..=14), 0 marking an absent kicker.
///
/// packs into a category-major key so that two Rankings compare as
/// poker hands by comparing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    category: Category,
    kicks: [u8; 5],
    collapsed: bool,
}

impl Ranking {
    /// rank an unordered 3 or 5 card hand by counting rank
    /// multiplicities and sliding a 5-wide window over a 13-slot
    /// ring of ranks. windows headed by 2, 3 or 4 would wrap around
    /// the top of the deck and are excluded, which leaves both the
    /// wheel (A2345) and broadway (TJQKA) straights reachable.
    ///
    /// with `replace` the kickers are recorded faithfully, so that
    /// distinct multisets rank distinctly even when built with
    /// duplicated cards. without it, kickers that two deals from one
    /// deck can never use to break a tie (trip kickers in a 5-card
    /// hand, the full house pair, the quad kicker) are dropped.
    pub fn slow(cards: &[Card], replace: bool) -> Result<Self, String> {
        let n = cards.len();
        if n != 3 && n != 5 {
            return Err(format!("cannot rank a hand of {} cards", n));
        }
        let flush = n == 5 && cards.iter().all(|c| c.suit() == cards[0].suit());
        let mut counts = [0u8; 14];
        let mut dupes = [0i8; 6];
        let mut ring = [0u8; 13];
        let mut top = 0usize;
        for card in cards {
            let r = u8::from(card.rank()) as usize;
            counts[r] += 1;
            dupes[counts[r] as usize] += 1;
            dupes[counts[r] as usize - 1] -= 1;
            for i in 0..5 {
                let idx = (r + i) % 13;
                ring[idx] |= 1 << i;
                if ring[idx] == 31 && (idx <= 1 || idx >= 5) {
                    top = (idx + 12) % 13 + 1;
                }
            }
        }
        let find = |k: u8, nth: usize| -> u8 {
            let mut nth = nth;
            for i in 0..13u8 {
                let rank = if i == 0 { 1 } else { 14 - i as usize };
                if counts[rank] == k {
                    if nth == 0 {
                        return 14 - i;
                    }
                    nth -= 1;
                }
            }
            0
        };
        let straight = ((top + 11) % 13 + 2) as u8;
        if !flush && top == 0 && dupes[1] == n as i8 {
            return Ok(Self::of(
                Category::HighCard,
                [find(1, 0), find(1, 1), find(1, 2), find(1, 3), find(1, 4)],
            ));
        }
        if dupes[2] == 1 && dupes[3] == 0 {
            return Ok(Self::of(
                Category::OnePair,
                [find(2, 0), find(1, 0), find(1, 1), find(1, 2), 0],
            ));
        }
        if dupes[2] == 2 {
            return Ok(Self::of(
                Category::TwoPair,
                [find(2, 0), find(2, 1), find(1, 0), 0, 0],
            ));
        }
        if dupes[3] == 1 && dupes[2] == 0 {
            return Ok(match (replace, n) {
                (true, _) => Self::of(Category::Trips, [find(3, 0), find(1, 0), find(1, 1), 0, 0]),
                (false, 5) => Self::dropped(Category::Trips, [find(3, 0), 0, 0, 0, 0]),
                (false, _) => Self::of(Category::Trips, [find(3, 0), 0, 0, 0, 0]),
            });
        }
        if top != 0 && !flush {
            return Ok(Self::of(Category::Straight, [straight, 0, 0, 0, 0]));
        }
        if flush && top == 0 {
            return Ok(Self::of(
                Category::Flush,
                [find(1, 0), find(1, 1), find(1, 2), find(1, 3), find(1, 4)],
            ));
        }
        if dupes[2] == 1 && dupes[3] == 1 {
            return Ok(match replace {
                true => Self::of(Category::FullHouse, [find(3, 0), find(2, 0), 0, 0, 0]),
                false => Self::dropped(Category::FullHouse, [find(3, 0), 0, 0, 0, 0]),
            });
        }
        if dupes[4] == 1 {
            return Ok(match replace {
                true => Self::of(Category::Quads, [find(4, 0), find(1, 0), 0, 0, 0]),
                false => Self::dropped(Category::Quads, [find(4, 0), 0, 0, 0, 0]),
            });
        }
        if top != 0 && flush {
            return Ok(Self::of(Category::StraightFlush, [straight, 0, 0, 0, 0]));
        }
        if dupes[5] == 1 {
            return Ok(Self::of(Category::FiveOfAKind, [find(5, 0), 0, 0, 0, 0]));
        }
        Err(format!(
            "cannot rank hand {}",
            cards.iter().map(|c| c.to_string()).collect::<String>()
        ))
    }

    /// category-major packing, kickers most significant first
    pub fn key(&self) -> u32 {
        self.kicks
            .iter()
            .fold(self.category as u32, |key, &kick| key * 16 + kick as u32)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    fn of(category: Category, kicks: [u8; 5]) -> Self {
        Self {
            category,
            kicks,
            collapsed: false,
        }
    }
    fn dropped(category: Category, kicks: [u8; 5]) -> Self {
        Self {
            category,
            kicks,
            collapsed: true,
        }
    }

    fn kick(&self, i: usize) -> String {
        match self.kicks[i] {
            0 => String::new(),
            v => Rank::try_from((v - 1) % 13 + 1)
                .expect("kicker in rank range")
                .to_string(),
        }
    }
}

/// renders in the shape players write hands, e.g. "AA-K-Q-J",
/// "5 straight", "AAA-x-y" with placeholders for dropped kickers.
/// trailing dashes from the 3-card hands' absent kickers are trimmed.
impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let k = |i: usize| self.kick(i);
        let raw = match (self.category, self.collapsed) {
            (Category::HighCard, _) => {
                format!("{}-{}-{}-{}-{}", k(0), k(1), k(2), k(3), k(4))
            }
            (Category::OnePair, _) => format!("{0}{0}-{1}-{2}-{3}", k(0), k(1), k(2), k(3)),
            (Category::TwoPair, _) => format!("{0}{0}-{1}{1}-{2}", k(0), k(1), k(2)),
            (Category::Trips, false) => format!("{0}{0}{0}-{1}-{2}", k(0), k(1), k(2)),
            (Category::Trips, true) => format!("{0}{0}{0}-x-y", k(0)),
            (Category::Straight, _) => format!("{} straight", k(0)),
            (Category::Flush, _) => {
                format!("{}{}{}{}{} flush", k(0), k(1), k(2), k(3), k(4))
            }
            (Category::FullHouse, false) => format!("{0}{0}{0}-{1}{1}", k(0), k(1)),
            (Category::FullHouse, true) => format!("{0}{0}{0}-xx", k(0)),
            (Category::Quads, false) => format!("{0}{0}{0}{0}-{1}", k(0), k(1)),
            (Category::Quads, true) => format!("{0}{0}{0}{0}-x", k(0)),
            (Category::StraightFlush, _) => format!("{} straight flush", k(0)),
            (Category::FiveOfAKind, _) => format!("{0}{0}{0}{0}{0}", k(0)),
        };
        write!(f, "{}", raw.trim_end_matches('-'))
    }
}

/// fully describe a 3 or 5 card hand, kickers and all
pub fn describe(cards: &[Card]) -> Result<String, String> {
    Ok(Ranking::slow(cards, true)?.to_string())
}

/// describe a hand only as precisely as two deals from the same
/// deck can be told apart
pub fn describe_short(cards: &[Card]) -> Result<String, String> {
    Ok(Ranking::slow(cards, false)?.to_string())
}
