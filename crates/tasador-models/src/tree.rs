//! Regression tree shared by the forest and the boosting ensemble.
//!
//! Splits maximise the second-order gain of a squared-error objective:
//!
//! ```text
//! gain = ½ · (G_L² / (n_L + λ) + G_R² / (n_R + λ) − G² / (n + λ))
//! ```
//!
//! where `G` is the sum of targets in a node. With `λ = 0` this is plain
//! variance reduction and the leaf value `G / (n + λ)` is the node mean.
//!
//! A NaN feature value is missing. Each split learns a default branch for
//! missing values from the training rows that lacked the feature, or sends
//! them to the larger child when none did.

use ndarray::{ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tree growth configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth (None = grow until another rule stops)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each child
    pub min_samples_leaf: usize,
    /// L2 regularisation on leaf values
    pub lambda: f64,
    /// Minimum gain a split must exceed
    pub min_split_gain: f64,
    /// Features considered per node (None = all candidates)
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            lambda: 0.0,
            min_split_gain: 0.0,
            max_features: None,
        }
    }
}


/// Splits whose gain does not clear this are treated as no improvement.
const GAIN_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        missing_left: bool,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Branch taken by a feature value; NaN follows the default branch.
fn goes_left(value: f64, threshold: f64, missing_left: bool) -> bool {
    if value.is_nan() {
        missing_left
    } else {
        value <= threshold
    }
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    missing_left: bool,
    gain: f64,
}

/// A fitted regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Node,
}

/// Borrowed training inputs for one tree.
struct Grower<'f, 'a> {
    features: ArrayView2<'f, f64>,
    targets: &'a [f64],
    candidates: &'a [usize],
    config: &'a TreeConfig,
}

/// Sample rows of one node.
///
/// `sorted[j]` holds the rows whose value of `candidates[j]` is present, in
/// ascending value order. Partitioning keeps that order, so every feature is
/// sorted once per tree.
struct NodeRows {
    rows: Vec<usize>,
    sorted: Vec<Vec<usize>>,
}

impl RegressionTree {
    /// Grows a tree on the given sample rows.
    ///
    /// `rows` may repeat indices (bootstrap samples). `candidates` lists the
    /// feature columns the tree may split on.
    pub(crate) fn fit(
        features: ArrayView2<'_, f64>,
        targets: &[f64],
        rows: &[usize],
        candidates: &[usize],
        config: &TreeConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let grower = Grower {
            features,
            targets,
            candidates,
            config,
        };
        let node = grower.presort(rows);
        Self {
            root: grower.grow(node, 0, rng),
        }
    }

    /// Predicts one sample.
    pub fn predict_one(&self, features: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    missing_left,
                    left,
                    right,
                } => {
                    node = if goes_left(features[*feature], *threshold, *missing_left) {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Depth of the tree, a lone leaf counting as 1.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }
}

impl Grower<'_, '_> {
    fn leaf_value(&self, sum: f64, count: usize) -> f64 {
        sum / (count as f64 + self.config.lambda)
    }

    fn score(&self, sum: f64, count: usize) -> f64 {
        sum * sum / (count as f64 + self.config.lambda)
    }

    fn presort(&self, rows: &[usize]) -> NodeRows {
        let sorted = self
            .candidates
            .iter()
            .map(|&feature| {
                let column = self.features.column(feature);
                let mut present: Vec<usize> = rows.iter().copied().filter(|&i| !column[i].is_nan()).collect();
                present.sort_by(|&a, &b| column[a].total_cmp(&column[b]));
                present
            })
            .collect();

        NodeRows {
            rows: rows.to_vec(),
            sorted,
        }
    }

    fn grow(&self, node: NodeRows, depth: usize, rng: &mut ChaCha8Rng) -> Node {
        let sum: f64 = node.rows.iter().map(|&i| self.targets[i]).sum();
        let leaf = Node::Leaf {
            value: self.leaf_value(sum, node.rows.len()),
        };

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || node.rows.len() < self.config.min_samples_split.max(2) || self.is_pure(&node.rows) {
            return leaf;
        }

        let Some(split) = self.best_split(&node, sum, rng) else {
            return leaf;
        };

        let (left, right) = self.partition(node, &split);
        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            missing_left: split.missing_left,
            left: Box::new(self.grow(left, depth + 1, rng)),
            right: Box::new(self.grow(right, depth + 1, rng)),
        }
    }

    fn is_pure(&self, rows: &[usize]) -> bool {
        let first = self.targets[rows[0]];
        rows.iter().all(|&i| self.targets[i] == first)
    }

    fn partition(&self, node: NodeRows, split: &Split) -> (NodeRows, NodeRows) {
        let column = self.features.column(split.feature);
        let to_left = |i: &usize| goes_left(column[*i], split.threshold, split.missing_left);

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = node.rows.into_iter().partition(&to_left);
        let mut left = NodeRows {
            rows: left_rows,
            sorted: Vec::with_capacity(node.sorted.len()),
        };
        let mut right = NodeRows {
            rows: right_rows,
            sorted: Vec::with_capacity(node.sorted.len()),
        };

        for present in node.sorted {
            let (l, r): (Vec<usize>, Vec<usize>) = present.into_iter().partition(&to_left);
            left.sorted.push(l);
            right.sorted.push(r);
        }

        (left, right)
    }

    fn best_split(&self, node: &NodeRows, total: f64, rng: &mut ChaCha8Rng) -> Option<Split> {
        let mut slots: Vec<usize> = (0..self.candidates.len()).collect();
        if let Some(max) = self.config.max_features
            && max < slots.len()
        {
            slots.shuffle(rng);
            slots.truncate(max.max(1));
        }

        let n = node.rows.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let parent = self.score(total, n);
        let mut best: Option<Split> = None;

        for slot in slots {
            let feature = self.candidates[slot];
            let column = self.features.column(feature);
            let present = &node.sorted[slot];

            let n_missing = n - present.len();
            let missing_sum = if n_missing == 0 {
                0.0
            } else {
                total - present.iter().map(|&i| self.targets[i]).sum::<f64>()
            };

            let mut left_sum = 0.0;
            for k in 0..present.len().saturating_sub(1) {
                left_sum += self.targets[present[k]];
                let (lo, hi) = (column[present[k]], column[present[k + 1]]);

                // only split between distinct values
                if lo == hi {
                    continue;
                }

                for missing_left in [false, true] {
                    if missing_left && n_missing == 0 {
                        continue;
                    }

                    let (sum_left, n_left) = if missing_left {
                        (left_sum + missing_sum, k + 1 + n_missing)
                    } else {
                        (left_sum, k + 1)
                    };
                    let n_right = n - n_left;
                    if n_left < min_leaf || n_right < min_leaf {
                        continue;
                    }

                    let gain =
                        0.5 * (self.score(sum_left, n_left) + self.score(total - sum_left, n_right) - parent);
                    if gain <= self.config.min_split_gain || gain <= GAIN_EPSILON {
                        continue;
                    }

                    if best.is_none_or(|b| gain > b.gain) {
                        let mid = lo + (hi - lo) / 2.0;
                        let threshold = if mid < hi { mid } else { lo };
                        best = Some(Split {
                            feature,
                            threshold,
                            // without training gaps, missing values join the larger child
                            missing_left: missing_left || (n_missing == 0 && n_left >= n_right),
                            gain,
                        });
                    }
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};
    use rand::SeedableRng;

    fn fit(features: &Array2<f64>, targets: &[f64], config: &TreeConfig) -> RegressionTree {
        let rows: Vec<usize> = (0..targets.len()).collect();
        let candidates: Vec<usize> = (0..features.ncols()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        RegressionTree::fit(features.view(), targets, &rows, &candidates, config, &mut rng)
    }

    #[test]
    fn test_step_function_is_learned_exactly() {
        let features = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let targets = [0.0, 0.0, 0.0, 5.0, 5.0, 5.0];
        let tree = fit(&features, &targets, &TreeConfig::default());

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 2);
        assert_relative_eq!(tree.predict_one(array![2.5].view()), 0.0);
        assert_relative_eq!(tree.predict_one(array![11.5].view()), 5.0);
        // threshold sits halfway between 3 and 10
        assert_relative_eq!(tree.predict_one(array![6.4].view()), 0.0);
        assert_relative_eq!(tree.predict_one(array![6.6].view()), 5.0);
    }

    #[test]
    fn test_unlimited_depth_interpolates_training_data() {
        let features = array![[0.0, 3.0], [1.0, 1.0], [2.0, 4.0], [3.0, 1.0], [4.0, 5.0]];
        let targets = [3.0, 1.0, 4.0, 1.0, 5.0];
        let tree = fit(&features, &targets, &TreeConfig::default());

        for (row, target) in features.outer_iter().zip(targets) {
            assert_relative_eq!(tree.predict_one(row), target);
        }
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let features = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0]];
        let targets = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let config = TreeConfig {
            max_depth: Some(2),
            ..Default::default()
        };
        let tree = fit(&features, &targets, &config);
        assert!(tree.depth() <= 3);
        assert!(tree.n_leaves() <= 4);
    }

    #[test]
    fn test_lambda_shrinks_leaves() {
        let features = array![[0.0], [0.0]];
        let targets = [4.0, 4.0];
        let config = TreeConfig {
            lambda: 1.0,
            ..Default::default()
        };
        let tree = fit(&features, &targets, &config);
        // 8 / (2 + 1)
        assert_relative_eq!(tree.predict_one(array![0.0].view()), 8.0 / 3.0);
    }

    #[test]
    fn test_constant_feature_yields_single_leaf() {
        let features = array![[1.0], [1.0], [1.0]];
        let targets = [1.0, 2.0, 3.0];
        let tree = fit(&features, &targets, &TreeConfig::default());
        assert_eq!(tree.n_leaves(), 1);
        assert_relative_eq!(tree.predict_one(array![1.0].view()), 2.0);
    }

    #[test]
    fn test_min_samples_leaf() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let targets = [10.0, 0.0, 0.0, 0.0];
        let config = TreeConfig {
            min_samples_leaf: 2,
            ..Default::default()
        };
        let tree = fit(&features, &targets, &config);
        // the isolating split at 0.5 is forbidden
        assert!(tree.predict_one(array![0.0].view()) < 10.0);
    }
    #[test]
    fn test_missing_values_follow_learned_branch() {
        let features = array![[1.0], [2.0], [f64::NAN], [f64::NAN], [10.0], [11.0]];
        let targets = [0.0, 0.0, 5.0, 5.0, 5.0, 5.0];
        let tree = fit(&features, &targets, &TreeConfig::default());

        assert_eq!(tree.n_leaves(), 2);
        assert_relative_eq!(tree.predict_one(array![f64::NAN].view()), 5.0);
        assert_relative_eq!(tree.predict_one(array![1.5].view()), 0.0);
        assert_relative_eq!(tree.predict_one(array![10.5].view()), 5.0);
    }

    #[test]
    fn test_unseen_missing_value_joins_larger_child() {
        let features = array![[1.0], [2.0], [3.0], [10.0]];
        let targets = [0.0, 0.0, 0.0, 9.0];
        let tree = fit(&features, &targets, &TreeConfig::default());
        assert_relative_eq!(tree.predict_one(array![f64::NAN].view()), 0.0);

        let features = array![[1.0], [8.0], [9.0], [10.0]];
        let targets = [9.0, 0.0, 0.0, 0.0];
        let tree = fit(&features, &targets, &TreeConfig::default());
        assert_relative_eq!(tree.predict_one(array![f64::NAN].view()), 0.0);
    }

    #[test]
    fn test_repeated_rows_are_weighted() {
        let features = array![[1.0], [2.0], [3.0], [4.0]];
        let targets = [1.0, 2.0, 3.0, 7.0];
        let rows = [0, 0, 0, 3];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tree = RegressionTree::fit(features.view(), &targets, &rows, &[0], &TreeConfig::default(), &mut rng);

        // only rows 0 and 3 are sampled, so the threshold sits at 2.5
        assert_eq!(tree.n_leaves(), 2);
        assert_relative_eq!(tree.predict_one(array![2.0].view()), 1.0);
        assert_relative_eq!(tree.predict_one(array![3.0].view()), 7.0);
    }
}
