use super::rollout::Rollout;
use super::Error;
use super::Lane;
use super::Wins;
use crate::Probability;
use crate::Score;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// an upper bound on plausible table lengths, so a corrupt header
/// cannot ask us to allocate the moon
const LONGEST: usize = 1 << 20;

/// scores arrangements from per-lane win tables under the
/// independence closed form. this is the shippable artifact of
/// training: three arrays and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampled {
    wins: Wins,
}

impl Sampled {
    pub fn wins(&self) -> &Wins {
        &self.wins
    }

    /// the tabled chance that a lane of this rank wins
    pub fn win_probability(&self, lane: Lane, rank: Score) -> Probability {
        self.wins.probability(lane, rank)
    }

    pub fn probabilities(&self, lane: Lane) -> &[Probability] {
        self.wins.of(lane)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut file = std::fs::File::create(path)?;
        self.write(&mut file)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = std::fs::File::open(path)?;
        Self::read(&mut file)
    }

    /// emit the three lanes as whitespace separated ascii: each
    /// lane's length, then its probabilities
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        let mut w = std::io::BufWriter::new(w);
        for lane in Lane::all() {
            let table = self.wins.of(lane);
            write!(w, "{} ", table.len())?;
            for p in table {
                write!(w, "{:.6} ", p)?;
            }
        }
        w.flush()?;
        Ok(())
    }

    /// parse what write emits, forgiving about whitespace
    pub fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        let ref mut tokens = text.split_whitespace();
        let mut tables = Vec::new();
        for lane in Lane::all() {
            let len = tokens
                .next()
                .ok_or_else(|| Error::Parse(format!("missing {} length", lane)))?
                .parse::<usize>()
                .map_err(|e| Error::Parse(format!("{} length: {}", lane, e)))?;
            if len > LONGEST {
                return Err(Error::Parse(format!("{} length {} implausible", lane, len)));
            }
            let mut table = Vec::with_capacity(len);
            for i in 0..len {
                let p = tokens
                    .next()
                    .ok_or_else(|| Error::Parse(format!("{} truncated at {}", lane, i)))?
                    .parse::<Probability>()
                    .map_err(|e| Error::Parse(format!("{} entry {}: {}", lane, i, e)))?;
                table.push(p);
            }
            tables.push(table);
        }
        let tables = <[Vec<Probability>; 3]>::try_from(tables).expect("three lanes read");
        Ok(Self::from(Wins::from(tables)))
    }
}

impl From<Wins> for Sampled {
    fn from(wins: Wins) -> Self {
        Self { wins }
    }
}

/// collapse a rollout into its bare win tables. only meaningful
/// when the rollout treats lanes independently and has already
/// sampled its opposition.
impl TryFrom<&Rollout> for Sampled {
    type Error = Error;
    fn try_from(rollout: &Rollout) -> Result<Self, Self::Error> {
        if !rollout.separable() {
            return Err(Error::Unready("is not separable"));
        }
        if !rollout.prerolled() {
            return Err(Error::Unready("is not pre-rolled"));
        }
        match rollout.wins() {
            Some(wins) => Ok(Self::from(wins.clone())),
            None => Err(Error::Unready("has no samples")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::lookup::SCORE_MAX;

    fn sampled() -> Sampled {
        let n = SCORE_MAX as usize + 1;
        let ramp = |scale: Probability| {
            (0..n)
                .map(|i| i as Probability / (n - 1) as Probability * scale)
                .collect::<Vec<Probability>>()
        };
        Sampled::from(Wins::from([ramp(1.), ramp(0.9), ramp(0.8)]))
    }

    #[test]
    fn round_trip() {
        let before = sampled();
        let mut buffer = Vec::new();
        before.write(&mut buffer).unwrap();
        let after = Sampled::read(&mut buffer.as_slice()).unwrap();
        for lane in Lane::all() {
            let b = before.probabilities(lane);
            let a = after.probabilities(lane);
            assert!(a.len() == SCORE_MAX as usize + 1);
            b.iter()
                .zip(a.iter())
                .for_each(|(x, y)| assert!((x - y).abs() < 1e-6));
        }
    }

    #[test]
    fn round_trip_through_disk() {
        let path = std::env::temp_dir().join(format!("wins.{}.txt", std::process::id()));
        let before = sampled();
        before.save(&path).unwrap();
        let after = Sampled::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(
            (before.win_probability(Lane::Back, 100) - after.win_probability(Lane::Back, 100))
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn whitespace_agnostic() {
        let text = "2 0.25 0.75\n\t2  0.5\r\n0.5   2 0.125 0.875 ";
        let loaded = Sampled::read(&mut text.as_bytes()).unwrap();
        assert!(loaded.win_probability(Lane::Front, 1) == 0.75);
        assert!(loaded.win_probability(Lane::Middle, 0) == 0.5);
        assert!(loaded.win_probability(Lane::Back, 0) == 0.125);
    }

    #[test]
    fn rejects_junk() {
        assert!(Sampled::read(&mut "2 0.25 banana 2 0 0 2 0 0".as_bytes()).is_err());
        assert!(Sampled::read(&mut "2 0.25".as_bytes()).is_err());
        assert!(Sampled::read(&mut "".as_bytes()).is_err());
        assert!(Sampled::read(&mut "99999999999 0.1".as_bytes()).is_err());
    }
}
