// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Score is the value the search assigns to a position, relative to the player the search is
/// choosing a move for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Score {
    /// The position is a forced win for the searching player.
    Win,

    /// The position is a forced loss for the searching player.
    Loss,

    /// The position is neither a forced win nor a forced loss and the evaluator has assigned it
    /// the given value.
    Evaluated(i32),
}

impl Score {
    pub fn is_decisive(self) -> bool {
        match self {
            Score::Evaluated(_) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Score::Win => write!(f, "win"),
            Score::Loss => write!(f, "loss"),
            Score::Evaluated(score) => write!(f, "{}", score),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Score) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Score) -> Ordering {
        // Win and Loss sit above and below every evaluated score.
        match (self, other) {
            (Score::Win, Score::Win) => Ordering::Equal,
            (Score::Loss, Score::Loss) => Ordering::Equal,
            (Score::Win, _) => Ordering::Greater,
            (_, Score::Win) => Ordering::Less,
            (Score::Loss, _) => Ordering::Less,
            (_, Score::Loss) => Ordering::Greater,
            (Score::Evaluated(self_score), Score::Evaluated(other_score)) => {
                self_score.cmp(other_score)
            }
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Win => Score::Loss,
            Score::Loss => Score::Win,
            Score::Evaluated(score) => Score::Evaluated(-score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn win_cmp() {
        assert!(Score::Win == Score::Win);
        assert!(Score::Win > Score::Evaluated(9999999));
        assert!(Score::Win > Score::Loss);
    }

    #[test]
    fn loss_cmp() {
        assert!(Score::Loss == Score::Loss);
        assert!(Score::Evaluated(-9999999) > Score::Loss);
        assert!(Score::Loss < Score::Win);
    }

    #[test]
    fn eval_cmp() {
        assert!(Score::Evaluated(1) < Score::Evaluated(2));
        assert!(Score::Evaluated(3) > Score::Evaluated(2));
        assert_eq!(Some(Score::Evaluated(5)), vec![Score::Evaluated(5), Score::Loss].into_iter().max());
    }

    #[test]
    fn neg() {
        assert_eq!(-Score::Win, Score::Loss);
        assert_eq!(-Score::Loss, Score::Win);
        assert_eq!(-Score::Evaluated(1), Score::Evaluated(-1));
    }

    #[test]
    fn display() {
        assert_eq!("win", Score::Win.to_string());
        assert_eq!("-35", Score::Evaluated(-35).to_string());
    }
}
