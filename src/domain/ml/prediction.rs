use serde::Serialize;
use std::fmt;

/// Predicted next-period direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Maps a binary label (1 = next close higher) to a direction
    pub fn from_label(label: u32) -> Self {
        if label == 1 { Direction::Up } else { Direction::Down }
    }

    pub fn label(&self) -> u32 {
        match self {
            Direction::Up => 1,
            Direction::Down => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// Classifier output for a single row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub direction: Direction,
    /// Probability of the winning class, in [0, 1]
    pub probability: f64,
}

impl Prediction {
    /// Builds a prediction from per-class probabilities ordered as `classes`.
    ///
    /// The winning class is the one with the highest probability.
    pub fn from_probabilities(classes: &[u32], probabilities: &[f64]) -> Option<Self> {
        let (idx, probability) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;
        let label = *classes.get(idx)?;

        Some(Self {
            direction: Direction::from_label(label),
            probability,
        })
    }

    /// Confidence in percent (`max(probabilities) * 100`)
    pub fn confidence_pct(&self) -> f64 {
        self.probability * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_probabilities_picks_max() {
        let p = Prediction::from_probabilities(&[0, 1], &[0.3, 0.7]).unwrap();
        assert_eq!(p.direction, Direction::Up);
        assert!((p.confidence_pct() - 70.0).abs() < 1e-9);

        let p = Prediction::from_probabilities(&[0, 1], &[0.62, 0.38]).unwrap();
        assert_eq!(p.direction, Direction::Down);
        assert!((p.probability - 0.62).abs() < 1e-9);
    }

    #[test]
    fn test_single_class() {
        let p = Prediction::from_probabilities(&[1], &[1.0]).unwrap();
        assert_eq!(p.direction, Direction::Up);
        assert_eq!(p.confidence_pct(), 100.0);
    }

    #[test]
    fn test_empty_or_mismatched() {
        assert!(Prediction::from_probabilities(&[], &[]).is_none());
        assert!(Prediction::from_probabilities(&[0], &[0.4, 0.6]).is_none());
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::from_label(1), Direction::Up);
        assert_eq!(Direction::from_label(0), Direction::Down);
        assert_eq!(Direction::Up.label(), 1);
        assert_eq!(Direction::Down.to_string(), "DOWN");
    }
}
