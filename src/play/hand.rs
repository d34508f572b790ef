use crate::cards::card::Card;
use crate::cards::lookup;
use crate::cards::ranking;
use crate::Score;

/// a full arrangement of thirteen cards into the three lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    pub front: [Card; 3],
    pub middle: [Card; 5],
    pub back: [Card; 5],
}

impl Hand {
    /// dense ranks of front, middle, back
    pub fn lanes(&self) -> [Score; 3] {
        [
            lookup::eval3(&self.front),
            lookup::eval5(&self.middle),
            lookup::eval5(&self.back),
        ]
    }

    /// our 2-4 score against another arrangement, assuming both are legal
    pub fn showdown(&self, other: &Self) -> i32 {
        showdown(self.lanes(), other.lanes())
    }
}

/// score lane ranks under the 2-4 rule: one point per lane won,
/// one more for winning the majority of them. antisymmetric, and
/// lands on ±4 exactly when one side sweeps all three lanes.
pub fn showdown(ours: [Score; 3], theirs: [Score; 3]) -> i32 {
    let wins = ours.iter().zip(theirs.iter()).filter(|(a, b)| a > b).count() as i32;
    let losses = ours.iter().zip(theirs.iter()).filter(|(a, b)| a < b).count() as i32;
    wins - losses + (wins > losses) as i32 - (losses > wins) as i32
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let lane = |cards: &[Card]| {
            let spread = cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" ");
            match ranking::describe(cards) {
                Ok(described) => format!("[{}] ({})", spread, described),
                Err(_) => format!("[{}]", spread),
            }
        };
        write!(
            f,
            "{}, {}, {}",
            lane(&self.front),
            lane(&self.middle),
            lane(&self.back)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> [Score; 3] {
        use rand::Rng;
        let ref mut rng = rand::thread_rng();
        [0; 3].map(|_| rng.gen_range(0..=lookup::SCORE_MAX))
    }

    #[test]
    fn antisymmetric() {
        for _ in 0..1000 {
            let (a, b) = (triple(), triple());
            assert!(showdown(a, b) == -showdown(b, a));
        }
    }

    #[test]
    fn bounded_by_scoop() {
        for _ in 0..1000 {
            let (a, b) = (triple(), triple());
            let score = showdown(a, b);
            assert!((-4..=4).contains(&score));
            // plus or minus four takes all three lanes
            assert!(score.abs() < 4 || a.iter().zip(b.iter()).all(|(x, y)| x != y));
        }
    }

    #[test]
    fn scoop_takes_all_lanes() {
        let a = [10, 20, 30];
        let b = [1, 2, 3];
        assert!(showdown(a, b) == 4);
        assert!(showdown(b, a) == -4);
        // two wins and a loss is the majority plus a point
        assert!(showdown(a, [1, 2, 31]) == 2);
        // two wins and a tie is short of a scoop
        assert!(showdown(a, [1, 2, 30]) == 3);
    }

    #[test]
    fn ties_score_nothing() {
        let a = [10, 20, 30];
        assert!(showdown(a, a) == 0);
    }
}
