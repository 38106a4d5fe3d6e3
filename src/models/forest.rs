//! Random forest evaluation.
//!
//! Trees are stored as flat node arrays, the same layout a fitted
//! scikit-learn tree exposes (`children_left`, `children_right`, `feature`,
//! `threshold`, `value`). A node is a leaf when its left child is
//! `TREE_LEAF`; otherwise a sample goes left when
//! `x[feature] <= threshold`.
//!
//! Prediction follows the usual random forest vote: every tree yields the
//! class distribution of the leaf it lands in, the forest averages those
//! distributions, and the most probable class wins.

use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector, Label};

/// Child index marking a leaf node.
pub const TREE_LEAF: i64 = -1;

/// Anything that can turn a feature vector into a label.
///
/// The app holds one of these behind an `Arc` for its whole lifetime, so
/// implementations must be immutable after construction.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Label;

    /// Short human-readable description for status lines.
    fn describe(&self) -> String;
}

/// One decision tree in flat-array form.
///
/// Walking a tree (`leaf_for`, `predict_proba`, `depth`) indexes the arrays
/// directly and is only safe on trees that passed `io::artifact::read_forest`.
/// Outside this crate, get trees through the loader rather than deserializing
/// them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub(crate) children_left: Vec<i64>,
    pub(crate) children_right: Vec<i64>,
    pub(crate) feature: Vec<i64>,
    pub(crate) threshold: Vec<f64>,
    /// Per-node class counts (or fractions), one column per class.
    pub(crate) value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Walk from the root and return the index of the leaf `x` lands in.
    ///
    /// Panics on a tree that skipped `io::artifact` validation. Checked trees
    /// have in-bounds child indices that point strictly forward, so the walk
    /// terminates.
    pub fn leaf_for(&self, x: &[f64; FEATURE_COUNT]) -> usize {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalised class distribution at the leaf `x` lands in.
    ///
    /// A leaf whose counts sum to zero contributes a uniform distribution.
    pub fn predict_proba(&self, x: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let counts = &self.value[self.leaf_for(x)];
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            counts.iter().map(|c| c / total).collect()
        } else {
            vec![1.0 / counts.len() as f64; counts.len()]
        }
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if self.is_leaf(node) {
                max_depth = max_depth.max(depth);
                continue;
            }
            stack.push((self.children_left[node] as usize, depth + 1));
            stack.push((self.children_right[node] as usize, depth + 1));
        }
        max_depth
    }
}

/// A fitted binary random forest.
///
/// Obtain one through `io::artifact::load_forest`/`read_forest`; prediction
/// relies on the structural checks done there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub(crate) n_features: usize,
    /// Class label for each column of `DecisionTree::value`.
    pub(crate) classes: Vec<u8>,
    pub(crate) trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Forest-averaged class probabilities, one entry per `classes` column.
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let x = features.to_array();
        let mut acc = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (slot, p) in acc.iter_mut().zip(tree.predict_proba(&x)) {
                *slot += p;
            }
        }
        let n = self.trees.len().max(1) as f64;
        acc.iter_mut().for_each(|p| *p /= n);
        acc
    }

    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DecisionTree::node_count).sum()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Label {
        let proba = self.predict_proba(features);

        // First maximum wins, so ties resolve to the earlier class.
        let mut best = 0usize;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }

        // `classes` is checked at load time to be a permutation of {0, 1}.
        self.classes
            .get(best)
            .copied()
            .and_then(Label::from_code)
            .unwrap_or(Label::Default)
    }

    fn describe(&self) -> String {
        format!("random forest ({} trees)", self.trees.len())
    }
}
