//! Decision forest
//!
//! Trees are stored as flat node arrays with node 0 as the root. A split
//! sends a vector left when `x[feature] <= threshold`. Leaves hold the
//! positive-class probability and the forest averages its trees.

use domain_appeals::{Classifier, ClassifierError, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// A single tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// One tree of the forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn validate(&self, tree: usize, width: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::invalid(format!("tree {} has no nodes", tree)));
        }
        let count = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= width {
                        return Err(ArtifactError::SchemaMismatch(format!(
                            "tree {} node {} splits on feature {}, schema has {} columns",
                            tree, i, feature, width
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::invalid(format!(
                            "tree {} node {} has a non-finite threshold",
                            tree, i
                        )));
                    }
                    // Children strictly after their parent keeps every walk finite.
                    for child in [left, right] {
                        if child <= i || child >= count {
                            return Err(ArtifactError::invalid(format!(
                                "tree {} node {} has invalid child {}",
                                tree, i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ArtifactError::invalid(format!(
                            "tree {} leaf {} has value {} outside [0, 1]",
                            tree, i, value
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or(ClassifierError::WidthMismatch {
                        expected: feature + 1,
                        actual: features.len(),
                    })?;
                    index = if x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ClassifierError::Evaluation(format!(
                        "node {} does not exist",
                        index
                    )))
                }
            }
        }
    }
}

/// An averaging ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
    #[serde(skip)]
    width: Option<usize>,
}

impl ForestModel {
    pub fn new(trees: Vec<DecisionTree>) -> Self {
        Self { trees, width: None }
    }

    /// Pins the feature width the forest was validated against
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn validate(&self, width: usize) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid("forest has no trees"));
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, width))
    }
}

impl Classifier for ForestModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        if let Some(expected) = self.width {
            if features.len() != expected {
                return Err(ClassifierError::WidthMismatch {
                    expected,
                    actual: features.len(),
                });
            }
        }
        if self.trees.is_empty() {
            return Err(ClassifierError::Evaluation("forest has no trees".into()));
        }
        let total = self
            .trees
            .iter()
            .map(|tree| tree.evaluate(features))
            .sum::<Result<f64, _>>()?;
        Ok(total / self.trees.len() as f64)
    }

    fn expected_width(&self) -> Option<usize> {
        self.width
    }

    fn name(&self) -> &str {
        "forest"
    }
}
