//! Best scores, kept in rank order.
//!
//! The board is plain data; storing it is left to the caller, typically via
//! its serde implementation.

use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// One entry on a [`ScoreBoard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Points scored.
    pub score: u32,
    /// Who scored them, if known.
    pub name: Option<String>,
}

impl HighScore {
    /// An anonymous score.
    pub fn new(score: u32) -> Self {
        Self { score, name: None }
    }

    /// A score with a name attached.
    pub fn named(score: u32, name: impl Into<String>) -> Self {
        Self {
            score,
            name: Some(name.into()),
        }
    }
}

/// A fixed number of ranked scores, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredScoreBoard")]
pub struct ScoreBoard {
    scores: Vec<Option<HighScore>>,
    higher_is_better: bool,
}

impl ScoreBoard {
    /// Creates an empty board with room for `capacity` scores.
    pub fn new(capacity: usize, higher_is_better: bool) -> Result<Self, SimulationError> {
        if capacity == 0 {
            return Err(SimulationError::InvalidScoreBoard);
        }

        Ok(Self {
            scores: vec![None; capacity],
            higher_is_better,
        })
    }

    /// Number of places on the board.
    pub fn capacity(&self) -> usize {
        self.scores.len()
    }

    /// Whether larger scores rank higher.
    pub fn higher_is_better(&self) -> bool {
        self.higher_is_better
    }

    /// Inserts `score` at the first place it beats, or the first empty place,
    /// moving lower scores down and dropping the last. Returns whether it made
    /// the board.
    pub fn add_score(&mut self, score: HighScore) -> bool {
        let insertion = self.scores.iter().position(|slot| match slot {
            None => true,
            Some(existing) => self.beats(score.score, existing.score),
        });

        let Some(index) = insertion else {
            return false;
        };

        self.scores.pop();
        self.scores.insert(index, Some(score));
        true
    }

    /// Adds an anonymous score.
    pub fn add(&mut self, score: u32) -> bool {
        self.add_score(HighScore::new(score))
    }

    /// Adds a named score.
    pub fn add_named(&mut self, score: u32, name: impl Into<String>) -> bool {
        self.add_score(HighScore::named(score, name))
    }

    /// Every place on the board, best first. Empty places are `None`.
    pub fn scores(&self) -> &[Option<HighScore>] {
        &self.scores
    }

    /// Score at place `index`.
    ///
    /// Panics if `index` is not less than the board's capacity.
    pub fn score(&self, index: usize) -> Option<&HighScore> {
        assert!(
            index < self.scores.len(),
            "score index {index} out of range for board of {}",
            self.scores.len()
        );
        self.scores[index].as_ref()
    }

    /// Best score so far.
    pub fn top_score(&self) -> Option<&HighScore> {
        self.scores.first().and_then(Option::as_ref)
    }

    fn beats(&self, score: u32, existing: u32) -> bool {
        if self.higher_is_better {
            score > existing
        } else {
            score < existing
        }
    }
}

/// Board as read from storage, before its capacity is checked.
#[derive(Deserialize)]
struct StoredScoreBoard {
    scores: Vec<Option<HighScore>>,
    higher_is_better: bool,
}

impl TryFrom<StoredScoreBoard> for ScoreBoard {
    type Error = SimulationError;

    fn try_from(stored: StoredScoreBoard) -> Result<Self, Self::Error> {
        if stored.scores.is_empty() {
            return Err(SimulationError::InvalidScoreBoard);
        }

        Ok(Self {
            scores: stored.scores,
            higher_is_better: stored.higher_is_better,
        })
    }
}
