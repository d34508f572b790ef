use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use std::sync::LazyLock;

/// the full deck in canonical order, by suit and then rank
pub static DECK: LazyLock<[Card; 52]> = LazyLock::new(|| {
    let mut cards = [Card::from((Suit::Club, Rank::Ace)); 52];
    for (i, suit) in Suit::all().into_iter().enumerate() {
        for (j, rank) in Rank::all().into_iter().enumerate() {
            cards[i * 13 + j] = Card::from((suit, rank));
        }
    }
    cards
});

/// Deck supports dealing random cards off the top after a
/// partial shuffle. cloning a Deck is cheap enough that rollout
/// samples each own one as scratch.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn new() -> Self {
        Self(DECK.to_vec())
    }

    /// the deck with the given cards removed, e.g. the 39 cards
    /// an opponent could still hold
    pub fn without(blocked: &[Card]) -> Self {
        Self(DECK.iter().filter(|c| !blocked.contains(c)).copied().collect())
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// deal 13 random cards via partial shuffle
    pub fn deal<R: rand::Rng>(&mut self, rng: &mut R) -> [Card; 13] {
        use rand::seq::SliceRandom;
        let (dealt, _) = self.0.partial_shuffle(rng, 13);
        <[Card; 13]>::try_from(&*dealt).expect("13 cards dealt")
    }

    /// deal two disjoint 13 card hands from the same deck
    pub fn split<R: rand::Rng>(&mut self, rng: &mut R) -> ([Card; 13], [Card; 13]) {
        use rand::seq::SliceRandom;
        let (dealt, _) = self.0.partial_shuffle(rng, 26);
        let ours = <[Card; 13]>::try_from(&dealt[..13]).expect("13 cards dealt");
        let theirs = <[Card; 13]>::try_from(&dealt[13..]).expect("13 cards dealt");
        (ours, theirs)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fifty_two_distinct() {
        assert!(DECK.iter().collect::<HashSet<_>>().len() == 52);
    }

    #[test]
    fn canonical_order() {
        assert!(DECK[0] == Card::try_from("CA").unwrap());
        assert!(DECK[12] == Card::try_from("CK").unwrap());
        assert!(DECK[51] == Card::try_from("SK").unwrap());
    }

    #[test]
    fn without_blocks() {
        let blocked = [DECK[0], DECK[13], DECK[26]];
        let deck = Deck::without(&blocked);
        assert!(deck.size() == 49);
    }

    #[test]
    fn deal_is_distinct() {
        let ref mut rng = rand::thread_rng();
        let mut deck = Deck::new();
        let (ours, theirs) = deck.split(rng);
        let all = ours.iter().chain(theirs.iter()).collect::<HashSet<_>>();
        assert!(all.len() == 26);
    }
}
