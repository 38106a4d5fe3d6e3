//! Load the classifier artifact.
//!
//! The artifact is a JSON-serialized `RandomForest` (see `models::forest` for
//! the node layout). Loading happens once, before any UI is drawn; every
//! failure here is fatal for the app.
//!
//! Only structure is checked: array lengths, child links, feature indices and
//! class columns. Those are the properties tree traversal relies on to never
//! index out of bounds or loop. Whether the model is any good, or was trained
//! on the same encoder table, is not something the artifact can tell us.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::FEATURE_COUNT;
use crate::models::{Classifier, DecisionTree, RandomForest, TREE_LEAF};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model file '{}' is not a valid forest artifact: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model file '{}' is unusable: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Summary of a loaded artifact, for `inspect` and the TUI sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub path: PathBuf,
    pub n_trees: usize,
    pub n_nodes: usize,
    pub max_depth: usize,
    pub n_features: usize,
    pub classes: Vec<u8>,
}

impl ModelSummary {
    pub fn of(path: &Path, forest: &RandomForest) -> Self {
        Self {
            path: path.to_path_buf(),
            n_trees: forest.trees.len(),
            n_nodes: forest.node_count(),
            max_depth: forest.max_depth(),
            n_features: forest.n_features,
            classes: forest.classes.clone(),
        }
    }
}

/// Read, parse and structurally check a forest artifact.
pub fn load_forest(path: &Path) -> Result<RandomForest, ModelError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ModelError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ModelError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    read_forest(path, BufReader::new(file))
}

/// Parse and check a forest from any reader. `path` is used for messages only.
pub fn read_forest<R: Read>(path: &Path, reader: R) -> Result<RandomForest, ModelError> {
    let forest: RandomForest = serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            ModelError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            ModelError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    check_forest(&forest).map_err(|reason| ModelError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(forest)
}

/// Load the artifact as a shared classifier handle, logging the outcome.
pub fn load_classifier(path: &Path) -> Result<(Arc<dyn Classifier>, ModelSummary), ModelError> {
    match load_forest(path) {
        Ok(forest) => {
            let summary = ModelSummary::of(path, &forest);
            tracing::info!(
                path = %path.display(),
                trees = summary.n_trees,
                nodes = summary.n_nodes,
                "model loaded"
            );
            let classifier: Arc<dyn Classifier> = Arc::new(forest);
            Ok((classifier, summary))
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "model load failed: {err}");
            Err(err)
        }
    }
}

fn check_forest(forest: &RandomForest) -> Result<(), String> {
    if forest.n_features != FEATURE_COUNT {
        return Err(format!(
            "expects {} features, the app provides {FEATURE_COUNT}",
            forest.n_features
        ));
    }

    let mut classes = forest.classes.clone();
    classes.sort_unstable();
    if classes != [0, 1] {
        return Err(format!(
            "classes must be 0 and 1, got {:?}",
            forest.classes
        ));
    }

    if forest.trees.is_empty() {
        return Err("forest has no trees".to_string());
    }

    for (idx, tree) in forest.trees.iter().enumerate() {
        check_tree(tree, forest.classes.len()).map_err(|reason| format!("tree {idx}: {reason}"))?;
    }

    Ok(())
}

fn check_tree(tree: &DecisionTree, n_classes: usize) -> Result<(), String> {
    let n = tree.node_count();
    if n == 0 {
        return Err("no nodes".to_string());
    }
    let lengths = [
        tree.children_right.len(),
        tree.feature.len(),
        tree.threshold.len(),
        tree.value.len(),
    ];
    if lengths.iter().any(|&len| len != n) {
        return Err(format!(
            "node arrays differ in length (children_left={n}, children_right={}, feature={}, threshold={}, value={})",
            lengths[0], lengths[1], lengths[2], lengths[3]
        ));
    }

    let mut has_parent = vec![false; n];
    for node in 0..n {
        let left = tree.children_left[node];
        let right = tree.children_right[node];

        let row = &tree.value[node];
        if row.len() != n_classes {
            return Err(format!(
                "node {node} has {} class values, expected {n_classes}",
                row.len()
            ));
        }
        if row.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!("node {node} has a negative or non-finite class value"));
        }

        match (left == TREE_LEAF, right == TREE_LEAF) {
            (true, true) => continue,
            (false, false) => {}
            _ => return Err(format!("node {node} has exactly one child")),
        }

        // Children must point forward so a walk from the root always ends,
        // and each node has one parent so the nodes form a tree.
        for child in [left, right] {
            if child <= node as i64 || child >= n as i64 {
                return Err(format!("node {node} links to invalid child {child}"));
            }
            let slot = &mut has_parent[child as usize];
            if *slot {
                return Err(format!("node {child} is reached from more than one parent"));
            }
            *slot = true;
        }

        let feature = tree.feature[node];
        if feature < 0 || feature >= FEATURE_COUNT as i64 {
            return Err(format!("node {node} splits on unknown feature {feature}"));
        }
        if !tree.threshold[node].is_finite() {
            return Err(format!("node {node} has a non-finite threshold"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forest::tests::sample_forest;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("credit-default-{}-{name}", std::process::id()))
    }

    fn parse(json: &str) -> Result<RandomForest, ModelError> {
        read_forest(Path::new("test.json"), json.as_bytes())
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = temp_path("does-not-exist.json");
        let err = load_forest(&path).unwrap_err();
        assert!(matches!(err, ModelError::NotFound { .. }));
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn load_classifier_fails_loudly_on_missing_file() {
        let path = temp_path("also-missing.json");
        assert!(load_classifier(&path).is_err());
    }

    #[test]
    fn written_forest_loads_back() {
        let path = temp_path("forest.json");
        let forest = sample_forest();
        std::fs::write(&path, serde_json::to_string(&forest).unwrap()).unwrap();

        let loaded = load_forest(&path).unwrap();
        assert_eq!(loaded, forest);

        let (classifier, summary) = load_classifier(&path).unwrap();
        assert_eq!(summary.n_trees, 3);
        assert_eq!(summary.n_nodes, 9);
        assert_eq!(summary.max_depth, 1);
        assert_eq!(classifier.describe(), "random forest (3 trees)");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn bundled_demo_model_loads_and_predicts_at_boundaries() {
        use crate::domain::{FeatureVector, JobCategory};

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("random_forest_model.json");
        let (classifier, summary) = load_classifier(&path).unwrap();
        assert_eq!(summary.n_features, FEATURE_COUNT);
        assert!(summary.n_trees > 0);

        let low = FeatureVector {
            credit_score: 300,
            account_balance: 0,
            transaction_count: 0,
            job: JobCategory::EntryLevel,
            income: 0,
        };
        let high = FeatureVector {
            credit_score: 850,
            account_balance: 100_000,
            transaction_count: 100,
            job: JobCategory::SkilledWorker,
            income: 200_000,
        };
        for features in [low, high] {
            let first = classifier.predict(&features);
            assert!(first.code() <= 1);
            assert_eq!(classifier.predict(&features), first);
        }
    }

    #[test]
    fn documented_example_parses() {
        let json = r#"{
            "n_features": 5,
            "classes": [0, 1],
            "trees": [{
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [0, -2, -2],
                "threshold":      [579.5, -2.0, -2.0],
                "value":          [[50, 50], [40, 5], [10, 45]]
            }]
        }"#;
        let forest = parse(json).unwrap();
        assert_eq!(forest.trees[0].node_count(), 3);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse("not json"), Err(ModelError::Parse { .. })));
        assert!(matches!(parse(r#"{"trees": []}"#), Err(ModelError::Parse { .. })));
    }

    fn invalid_reason(forest: &RandomForest) -> String {
        let json = serde_json::to_string(forest).unwrap();
        match parse(&json) {
            Err(ModelError::Invalid { reason, .. }) => reason,
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_forest_and_wrong_shape() {
        let mut forest = sample_forest();
        forest.trees.clear();
        assert!(invalid_reason(&forest).contains("no trees"));

        let mut forest = sample_forest();
        forest.n_features = 4;
        assert!(invalid_reason(&forest).contains("expects 4 features"));

        let mut forest = sample_forest();
        forest.classes = vec![0, 2];
        assert!(invalid_reason(&forest).contains("classes"));
    }

    #[test]
    fn rejects_broken_trees() {
        let mut forest = sample_forest();
        forest.trees[1].children_left[0] = 7;
        assert!(invalid_reason(&forest).starts_with("tree 1: node 0 links to invalid child 7"));

        let mut forest = sample_forest();
        forest.trees[0].children_left[0] = 0;
        assert!(invalid_reason(&forest).contains("invalid child 0"));

        let mut forest = sample_forest();
        forest.trees[0].feature[0] = 5;
        assert!(invalid_reason(&forest).contains("unknown feature 5"));

        let mut forest = sample_forest();
        forest.trees[0].threshold.pop();
        assert!(invalid_reason(&forest).contains("differ in length"));

        let mut forest = sample_forest();
        forest.trees[2].value[1] = vec![1.0];
        assert!(invalid_reason(&forest).contains("class values"));

        let mut forest = sample_forest();
        forest.trees[0].children_right[0] = TREE_LEAF;
        assert!(invalid_reason(&forest).contains("exactly one child"));
    }

    #[test]
    fn rejects_shared_children() {
        let mut forest = sample_forest();
        forest.trees[0].children_right[0] = 1;
        assert!(invalid_reason(&forest).contains("node 1 is reached from more than one parent"));

        // Every node points both ways at the next one: forward-only, but the
        // number of root-to-leaf paths doubles per node.
        let n = 40;
        let mut links: Vec<i64> = (1..n as i64).collect();
        links.push(TREE_LEAF);
        let mut forest = sample_forest();
        forest.trees.push(DecisionTree {
            children_left: links.clone(),
            children_right: links,
            feature: vec![0; n],
            threshold: vec![500.0; n],
            value: vec![vec![1.0, 1.0]; n],
        });
        assert!(invalid_reason(&forest).starts_with("tree 3: node 1 is reached"));
    }

    #[test]
    fn single_leaf_tree_is_fine() {
        let mut forest = sample_forest();
        forest.trees.push(DecisionTree {
            children_left: vec![TREE_LEAF],
            children_right: vec![TREE_LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![vec![3.0, 1.0]],
        });
        let json = serde_json::to_string(&forest).unwrap();
        assert!(parse(&json).is_ok());
    }
}
