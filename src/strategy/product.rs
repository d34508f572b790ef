use crate::cards::lookup::SCORE_MAX;
use crate::Ev;
use crate::Score;

/// scores an arrangement by the product of its normalized lane
/// ranks. monotone in every lane and trivially cheap, but it
/// overvalues the back; it exists to open the training iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

impl Product {
    pub fn score(f: Score, m: Score, b: Score) -> Ev {
        let max = SCORE_MAX as Ev;
        f as Ev * m as Ev * b as Ev / (max * max * max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotone_in_each_lane() {
        let base = Product::score(100, 200, 300);
        assert!(Product::score(101, 200, 300) > base);
        assert!(Product::score(100, 201, 300) > base);
        assert!(Product::score(100, 200, 301) > base);
    }

    #[test]
    fn normalized() {
        assert!(Product::score(0, 0, 0) == 0.);
        assert!(Product::score(SCORE_MAX, SCORE_MAX, SCORE_MAX) == 1.);
    }
}
