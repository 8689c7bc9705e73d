use super::{check_nodes, Interpolant};
use crate::kernel::ExecInvariantViolation;

/// Previous-value hold: the value of the last node at or before the query.
///
/// Queries before the first node clamp to the first node's value.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInterpolant {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl StepInterpolant {
    /// Fit through at least one strictly increasing node.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, ExecInvariantViolation> {
        check_nodes(x, y, 1)?;
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }

    /// Index of the node held at `t`.
    pub fn held_index(&self, t: f64) -> usize {
        // partition_point is 0 when t precedes every node; never step below it.
        self.x.partition_point(|&xi| xi <= t).saturating_sub(1)
    }
}

impl Interpolant for StepInterpolant {
    fn evaluate(&self, t: f64) -> f64 {
        self.y[self.held_index(t)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_most_recent_node() {
        let hold = StepInterpolant::new(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]).expect("fit");
        assert_eq!(hold.evaluate(0.0), 5.0);
        assert_eq!(hold.evaluate(0.99), 5.0);
        assert_eq!(hold.evaluate(1.0), 6.0);
        assert_eq!(hold.evaluate(1.5), 6.0);
        assert_eq!(hold.evaluate(100.0), 7.0);
    }

    #[test]
    fn clamps_before_first_node() {
        let hold = StepInterpolant::new(&[0.5, 1.0], &[-1.0, 1.0]).expect("fit");
        assert_eq!(hold.held_index(-3.0), 0);
        assert_eq!(hold.evaluate(-3.0), -1.0);
    }
}
