use std::cmp::Ordering;

use crate::core::weight::Weight;

/// Strategy defining how path costs combine and compare.
///
/// The same relaxation loop serves shortest-path and longest-path semantics,
/// the only varying parts being how a path cost is extended by an edge weight
/// ([combine](Relaxer::combine)) and which of two costs is preferred
/// ([compare](Relaxer::compare)). The strategy is a plain value with no state.
///
/// For the relaxation to converge, `combine` must be associative and monotone
/// in both arguments under the ordering given by `compare`. The stock variants
/// satisfy this for nonnegative ([Shortest](Relaxer::Shortest)) resp.
/// nonpositive ([Longest](Relaxer::Longest)) edge weights. Algorithms that
/// admit weights violating monotonicity detect the failure to stabilize
/// explicitly instead of relying on convergence.
///
/// Float weights are accepted as-is. A NaN weight is not rejected anywhere, it
/// propagates through `combine` and loses every comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Relaxer<W> {
    /// Costs add up, lower is better. Identity is zero, unreached vertices
    /// are at positive infinity.
    Shortest,
    /// Costs add up, higher is better. Identity is zero, unreached vertices
    /// are at negative infinity (the minimum value for integer weights).
    Longest,
    /// User-supplied combine/compare pair with explicit identity and
    /// unreached values.
    Custom(CustomRelaxer<W>),
}

/// The combine/compare pair of a [`Relaxer::Custom`] strategy.
///
/// The `unreached` value must not be attainable as a real path cost, it plays
/// the role infinity plays for the stock variants.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomRelaxer<W> {
    pub combine: fn(&W, &W) -> W,
    pub compare: fn(&W, &W) -> Option<Ordering>,
    pub identity: W,
    pub unreached: W,
}

impl<W> Default for Relaxer<W> {
    fn default() -> Self {
        Relaxer::Shortest
    }
}

impl<W: Weight> Relaxer<W> {
    /// The cost of the empty path, assigned to the root.
    pub fn identity(&self) -> W {
        match self {
            Relaxer::Shortest | Relaxer::Longest => W::zero(),
            Relaxer::Custom(custom) => custom.identity.clone(),
        }
    }

    /// The cost marking a vertex that no path has reached.
    pub fn unreached(&self) -> W {
        match self {
            Relaxer::Shortest => W::inf(),
            Relaxer::Longest => W::neg_inf(),
            Relaxer::Custom(custom) => custom.unreached.clone(),
        }
    }

    /// Cost of a path of cost `path` extended by an edge of weight `edge`.
    pub fn combine(&self, path: &W, edge: &W) -> W {
        match self {
            Relaxer::Shortest | Relaxer::Longest => path.clone() + edge.clone(),
            Relaxer::Custom(custom) => (custom.combine)(path, edge),
        }
    }

    /// Compares two costs. `Some(Ordering::Less)` means `x` is strictly
    /// better than `y`, `None` that the costs are incomparable (e.g. NaN).
    pub fn compare(&self, x: &W, y: &W) -> Option<Ordering> {
        match self {
            Relaxer::Shortest => x.partial_cmp(y),
            Relaxer::Longest => y.partial_cmp(x),
            Relaxer::Custom(custom) => (custom.compare)(x, y),
        }
    }

    /// Returns `true` if `candidate` is a strict improvement over `current`.
    pub fn improves(&self, candidate: &W, current: &W) -> bool {
        self.compare(candidate, current) == Some(Ordering::Less)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_prefers_lower() {
        let relaxer = Relaxer::<i32>::Shortest;

        assert_eq!(relaxer.identity(), 0);
        assert_eq!(relaxer.unreached(), i32::MAX);
        assert_eq!(relaxer.combine(&3, &4), 7);
        assert!(relaxer.improves(&3, &5));
        assert!(!relaxer.improves(&5, &3));
        assert!(!relaxer.improves(&3, &3));
    }

    #[test]
    fn longest_prefers_higher() {
        let relaxer = Relaxer::<i32>::Longest;

        assert_eq!(relaxer.unreached(), i32::MIN);
        assert!(relaxer.improves(&5, &3));
        assert!(!relaxer.improves(&3, &5));
    }

    #[test]
    fn nan_never_improves() {
        let relaxer = Relaxer::<f64>::Shortest;

        assert!(relaxer.combine(&1.0, &f64::NAN).is_nan());
        assert!(!relaxer.improves(&f64::NAN, &1.0));
        assert!(!relaxer.improves(&1.0, &f64::NAN));
    }

    #[test]
    fn custom_pair_is_used() {
        // Widest-bottleneck semantics: the cost of a path is its narrowest
        // edge and wider bottlenecks win.
        let relaxer = Relaxer::Custom(CustomRelaxer {
            combine: |path: &u32, edge: &u32| (*path).min(*edge),
            compare: |x: &u32, y: &u32| y.partial_cmp(x),
            identity: u32::MAX,
            unreached: 0,
        });

        assert_eq!(relaxer.combine(&10, &4), 4);
        assert!(relaxer.improves(&7, &4));
        assert!(!relaxer.improves(&4, &7));
        assert_eq!(relaxer.identity(), u32::MAX);
        assert_eq!(relaxer.unreached(), 0);
    }
}
