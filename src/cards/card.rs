use super::rank::Rank;
use super::suit::Suit;
use crate::Arbitrary;

/// Card represents a playing card.
/// the top bits are a one-hot suit, and the lowest 6 bits
/// store the rank's prime. this representation makes hand keys cheap:
/// multiply the low bits for the rank multiset, AND the high bits
/// for flush detection.
/// Ts
/// 0b_1000_011111
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u16);

impl Card {
    pub fn suit(&self) -> Suit {
        Suit::from((self.0 >> 6).trailing_zeros() as u8)
    }
    pub fn rank(&self) -> Rank {
        match self.0 & Self::PRIMES {
            2 => Rank::Ace,
            3 => Rank::Two,
            5 => Rank::Three,
            7 => Rank::Four,
            11 => Rank::Five,
            13 => Rank::Six,
            17 => Rank::Seven,
            23 => Rank::Eight,
            29 => Rank::Nine,
            31 => Rank::Ten,
            37 => Rank::Jack,
            41 => Rank::Queen,
            43 => Rank::King,
            n => panic!("invalid card prime: {}", n),
        }
    }
    pub const fn prime(&self) -> u16 {
        self.0 & Self::PRIMES
    }

    pub const PRIMES: u16 = 0x003f;
    pub const SUITS: u16 = 0x03c0;
}

/// (Suit, Rank) isomorphism
impl From<(Suit, Rank)> for Card {
    fn from((s, r): (Suit, Rank)) -> Self {
        Self(1 << (6 + u8::from(s)) | r.prime())
    }
}

/// u16 injection. only the 52 packed values are valid
impl From<Card> for u16 {
    fn from(c: Card) -> u16 {
        c.0
    }
}
impl TryFrom<u16> for Card {
    type Error = String;
    fn try_from(n: u16) -> Result<Self, Self::Error> {
        let suits = n & Self::SUITS;
        let prime = n & Self::PRIMES;
        match suits.count_ones() == 1
            && (suits | prime) == n
            && Rank::all().iter().any(|r| r.prime() == prime)
        {
            true => Ok(Self(n)),
            false => Err(format!("invalid card u16: {:#x}", n)),
        }
    }
}

/// str isomorphism, suit first: "HA" is the ace of hearts
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(suit), Some(rank), None) => Ok(Card::from((
                Suit::try_from(suit.to_string().as_str())?,
                Rank::try_from(rank.to_string().as_str())?,
            ))),
            _ => Err(format!("invalid card str: {}", s)),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.suit(), self.rank())
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        use rand::seq::SliceRandom;
        *super::deck::DECK
            .choose(&mut rand::thread_rng())
            .expect("deck is non-empty")
    }
}
