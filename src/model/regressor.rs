//! Regression models over the transformed feature vector

use serde::{Deserialize, Serialize};

use super::error::{ModelError, Result};

/// Marker for a leaf in `RegressionTree::left` / `right`
pub const LEAF: i64 = -1;

/// A single regression tree in flat array form
///
/// Node `i` is a leaf when `left[i] == LEAF`; otherwise a sample goes to
/// `left[i]` when `x[feature[i]] <= threshold[i]` and to `right[i]` after.
/// Children always sit at a higher index than their parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionTree {
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    fn node_count(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::InvalidArtifact("tree has no nodes".to_string()));
        }
        if [
            self.left.len(),
            self.right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err(ModelError::InvalidArtifact(format!(
                "tree arrays disagree on node count (expected {n})"
            )));
        }

        for i in 0..n {
            let (l, r) = (self.left[i], self.right[i]);
            if l == LEAF {
                if r != LEAF {
                    return Err(ModelError::InvalidArtifact(format!(
                        "node {i} has a right child but no left child"
                    )));
                }
                continue;
            }
            for child in [l, r] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(ModelError::InvalidArtifact(format!(
                        "node {i} has out-of-order child {child}"
                    )));
                }
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "node {i} splits on feature {f}, model has {n_features}"
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. A tree that skipped `validate` yields
    /// an error instead of indexing out of bounds.
    fn predict(&self, x: &[f64]) -> Result<f64> {
        let broken = |node: usize| {
            ModelError::InvalidArtifact(format!("tree walk left the node arrays at node {node}"))
        };

        let mut node = 0usize;
        // each step moves forward, so the walk ends within value.len() steps
        for _ in 0..self.value.len() {
            let left = *self.left.get(node).ok_or_else(|| broken(node))?;
            if left == LEAF {
                return self.value.get(node).copied().ok_or_else(|| broken(node));
            }
            let right = *self.right.get(node).ok_or_else(|| broken(node))?;
            let threshold = *self.threshold.get(node).ok_or_else(|| broken(node))?;
            let v = self
                .feature
                .get(node)
                .and_then(|&f| usize::try_from(f).ok())
                .and_then(|f| x.get(f))
                .ok_or_else(|| broken(node))?;

            let next = if *v <= threshold { left } else { right };
            node = usize::try_from(next)
                .ok()
                .filter(|&n| n > node)
                .ok_or_else(|| broken(node))?;
        }
        Err(broken(node))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        n_features: usize,
        trees: Vec<RegressionTree>,
    },
}

impl Regressor {
    pub fn n_features(&self) -> usize {
        match self {
            Regressor::Linear { coefficients, .. } => coefficients.len(),
            Regressor::RandomForest { n_features, .. } => *n_features,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Regressor::Linear { coefficients, .. } => {
                if coefficients.is_empty() {
                    return Err(ModelError::InvalidArtifact(
                        "linear model has no coefficients".to_string(),
                    ));
                }
                Ok(())
            }
            Regressor::RandomForest { n_features, trees } => {
                if trees.is_empty() {
                    return Err(ModelError::InvalidArtifact(
                        "random forest has no trees".to_string(),
                    ));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(*n_features).map_err(|e| {
                        ModelError::InvalidArtifact(format!("tree {i}: {e}"))
                    })?;
                }
                Ok(())
            }
        }
    }

    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        let expected = self.n_features();
        if x.len() != expected {
            return Err(ModelError::FeatureCount {
                expected,
                actual: x.len(),
            });
        }

        let y = match self {
            Regressor::Linear {
                coefficients,
                intercept,
            } => intercept + coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>(),
            Regressor::RandomForest { trees, .. } => {
                trees.iter().map(|t| t.predict(x)).sum::<Result<f64>>()? / trees.len() as f64
            }
        };

        if !y.is_finite() {
            return Err(ModelError::NonFinite(y));
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x[0] <= 0.5 ? 10 : (x[1] <= 0.0 ? 20 : 30)
    fn stump() -> RegressionTree {
        RegressionTree {
            left: vec![1, LEAF, 3, LEAF, LEAF],
            right: vec![2, LEAF, 4, LEAF, LEAF],
            feature: vec![0, -2, 1, -2, -2],
            threshold: vec![0.5, -2.0, 0.0, -2.0, -2.0],
            value: vec![0.0, 10.0, 0.0, 20.0, 30.0],
        }
    }

    fn constant(v: f64) -> RegressionTree {
        RegressionTree {
            left: vec![LEAF],
            right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![v],
        }
    }

    #[test]
    fn test_tree_walk() {
        let tree = stump();
        tree.validate(2).unwrap();
        assert_eq!(tree.predict(&[0.5, 9.0]).unwrap(), 10.0);
        assert_eq!(tree.predict(&[0.6, 0.0]).unwrap(), 20.0);
        assert_eq!(tree.predict(&[0.6, 0.1]).unwrap(), 30.0);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = Regressor::RandomForest {
            n_features: 2,
            trees: vec![stump(), constant(40.0)],
        };
        forest.validate().unwrap();
        assert_eq!(forest.predict(&[1.0, 1.0]).unwrap(), 35.0);
    }

    #[test]
    fn test_linear() {
        let model = Regressor::Linear {
            coefficients: vec![2.0, -1.0, 0.5],
            intercept: 1.0,
        };
        assert_eq!(model.predict(&[1.0, 2.0, 4.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = Regressor::Linear {
            coefficients: vec![1.0, 1.0],
            intercept: 0.0,
        };
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_non_finite_output() {
        let model = Regressor::Linear {
            coefficients: vec![f64::MAX],
            intercept: f64::MAX,
        };
        assert!(matches!(
            model.predict(&[2.0]),
            Err(ModelError::NonFinite(_))
        ));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let mut tree = stump();
        tree.right[2] = 0;
        assert!(tree.validate(2).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        let tree = stump();
        assert!(tree.validate(1).is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_arrays() {
        let mut tree = stump();
        tree.threshold.pop();
        assert!(tree.validate(2).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let forest = Regressor::RandomForest {
            n_features: 3,
            trees: vec![],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_unvalidated_forest_errors_instead_of_panicking() {
        let mut out_of_range = stump();
        out_of_range.right[2] = 99;
        let mut backward = stump();
        backward.right[2] = 0;
        let mut bad_feature = stump();
        bad_feature.feature[0] = 7;
        let mut ragged = stump();
        ragged.value.truncate(3);

        for tree in [out_of_range, backward, bad_feature, ragged] {
            let forest = Regressor::RandomForest {
                n_features: 2,
                trees: vec![tree],
            };
            assert!(matches!(
                forest.predict(&[0.6, 0.1]),
                Err(ModelError::InvalidArtifact(_))
            ));
        }
    }

    #[test]
    fn test_unvalidated_empty_forest_is_non_finite() {
        let forest = Regressor::RandomForest {
            n_features: 1,
            trees: vec![],
        };
        assert!(matches!(
            forest.predict(&[1.0]),
            Err(ModelError::NonFinite(_))
        ));
    }
}
