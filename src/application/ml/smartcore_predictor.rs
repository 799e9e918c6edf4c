use super::dataset::TrainingSet;
use super::predictor::DirectionClassifier;
use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::{FeatureRow, FeatureSet};
use crate::domain::ml::prediction::Prediction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use tracing::{debug, info};

type Tree = DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Random forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParameters {
    pub n_trees: u16,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParameters {
    fn default() -> Self {
        Self {
            n_trees: 100,
            min_samples_split: 100,
            seed: 1,
        }
    }
}

impl ForestParameters {
    pub const MAX_TREES: u16 = 500;

    pub fn validate(&self) -> Result<(), PredictionError> {
        if self.n_trees == 0 || self.n_trees > Self::MAX_TREES {
            return Err(PredictionError::InvalidParameters {
                reason: format!(
                    "n_trees must be between 1 and {}, got {}",
                    Self::MAX_TREES,
                    self.n_trees
                ),
            });
        }
        if self.min_samples_split < 2 {
            return Err(PredictionError::InvalidParameters {
                reason: format!(
                    "min_samples_split must be at least 2, got {}",
                    self.min_samples_split
                ),
            });
        }
        Ok(())
    }

    /// Features drawn per tree: `floor(sqrt(n))`, at least one
    pub fn features_per_tree(n_features: usize) -> usize {
        ((n_features as f64).sqrt().floor() as usize).clamp(1, n_features.max(1))
    }
}

/// One bagged member of the forest
enum Voter {
    Tree {
        model: Tree,
        /// Column indices this tree was trained on, ascending
        features: Vec<usize>,
        /// Distinct labels of the bootstrap sample, ascending (smartcore's column order)
        classes: Vec<u32>,
    },
    /// Bootstrap sample held one class
    Constant(u32),
}

enum FittedModel {
    Forest { voters: Vec<Voter>, classes: Vec<u32> },
    /// Training data held a single class; it is predicted with certainty.
    Constant(u32),
}

/// Bagged ensemble of smartcore decision trees.
///
/// Each tree sees a bootstrap sample of the rows and a random subset of the
/// feature columns. Class probabilities are the mean of the per-tree
/// probabilities.
pub struct SmartCorePredictor {
    params: ForestParameters,
    feature_set: FeatureSet,
    model: Option<FittedModel>,
}

impl SmartCorePredictor {
    pub fn new(params: ForestParameters) -> Self {
        Self {
            params,
            feature_set: FeatureSet::default(),
            model: None,
        }
    }

    pub fn params(&self) -> &ForestParameters {
        &self.params
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Averaged class probabilities for `row`, ordered as the training classes
    pub fn class_probabilities(
        &self,
        row: &FeatureRow,
    ) -> Result<(Vec<u32>, Vec<f64>), PredictionError> {
        let fitted = self.model.as_ref().ok_or(PredictionError::NotTrained)?;
        let (voters, classes) = match fitted {
            FittedModel::Constant(label) => return Ok((vec![*label], vec![1.0])),
            FittedModel::Forest { voters, classes } => (voters, classes),
        };

        let input = row
            .to_vector(self.feature_set)
            .ok_or(PredictionError::NoScorableRow)?;

        let mut sums = vec![0.0; classes.len()];
        for voter in voters {
            match voter {
                Voter::Constant(label) => {
                    if let Some(idx) = classes.iter().position(|c| c == label) {
                        sums[idx] += 1.0;
                    }
                }
                Voter::Tree {
                    model,
                    features,
                    classes: tree_classes,
                } => {
                    let projected: Vec<f64> = features.iter().map(|&f| input[f]).collect();
                    let x = DenseMatrix::from_2d_vec(&vec![projected]).map_err(|e| {
                        PredictionError::PredictionFailed {
                            reason: format!("Matrix creation failed: {}", e),
                        }
                    })?;
                    let probas =
                        model
                            .predict_proba(&x)
                            .map_err(|e| PredictionError::PredictionFailed {
                                reason: e.to_string(),
                            })?;
                    for (j, label) in tree_classes.iter().enumerate() {
                        if let Some(idx) = classes.iter().position(|c| c == label) {
                            sums[idx] += *probas.get((0, j));
                        }
                    }
                }
            }
        }

        let n = voters.len() as f64;
        let probabilities = sums.into_iter().map(|s| s / n).collect();
        Ok((classes.clone(), probabilities))
    }

    fn fit_voter(
        &self,
        features: &[Vec<f64>],
        labels: &[u32],
        n_columns: usize,
        rng: &mut StdRng,
    ) -> Result<Voter, PredictionError> {
        let n_rows = features.len();
        let bootstrap: Vec<usize> = (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();

        let mut columns = rand::seq::index::sample(
            &mut *rng,
            n_columns,
            ForestParameters::features_per_tree(n_columns),
        )
        .into_vec();
        columns.sort_unstable();

        let y: Vec<u32> = bootstrap.iter().map(|&i| labels[i]).collect();
        let mut classes = y.clone();
        classes.sort_unstable();
        classes.dedup();
        if let [only] = classes.as_slice() {
            return Ok(Voter::Constant(*only));
        }

        let rows: Vec<Vec<f64>> = bootstrap
            .iter()
            .map(|&i| columns.iter().map(|&c| features[i][c]).collect())
            .collect();
        let x = DenseMatrix::from_2d_vec(&rows).map_err(|e| PredictionError::TrainingFailed {
            reason: format!("Matrix creation failed: {}", e),
        })?;

        let parameters = DecisionTreeClassifierParameters {
            min_samples_split: self.params.min_samples_split,
            seed: Some(rng.random()),
            ..Default::default()
        };
        let model =
            Tree::fit(&x, &y, parameters).map_err(|e| PredictionError::TrainingFailed {
                reason: e.to_string(),
            })?;

        Ok(Voter::Tree {
            model,
            features: columns,
            classes,
        })
    }
}

impl DirectionClassifier for SmartCorePredictor {
    fn fit(&mut self, data: &TrainingSet) -> Result<(), PredictionError> {
        self.params.validate()?;
        self.model = None;
        self.feature_set = data.feature_set;

        let classes = data.classes();
        match classes.as_slice() {
            [] => {
                return Err(PredictionError::InsufficientData {
                    rows: 0,
                    required: 1,
                });
            }
            [only] => {
                info!(
                    "SmartCorePredictor: training data has a single class ({}), skipping forest fit",
                    only
                );
                self.model = Some(FittedModel::Constant(*only));
                return Ok(());
            }
            _ => {}
        }

        let features = data.features();
        if features.len() != data.labels.len() {
            return Err(PredictionError::TrainingFailed {
                reason: format!(
                    "{} feature rows for {} labels",
                    features.len(),
                    data.labels.len()
                ),
            });
        }
        let n_columns = self.feature_set.names().len();

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let voters = (0..self.params.n_trees)
            .map(|_| self.fit_voter(&features, &data.labels, n_columns, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "SmartCorePredictor: fitted {} trees on {} rows x {} features (m={}, min_split={}, seed={})",
            self.params.n_trees,
            features.len(),
            n_columns,
            ForestParameters::features_per_tree(n_columns),
            self.params.min_samples_split,
            self.params.seed
        );

        self.model = Some(FittedModel::Forest { voters, classes });
        Ok(())
    }

    fn predict(&self, row: &FeatureRow) -> Result<Prediction, PredictionError> {
        let (classes, probabilities) = self.class_probabilities(row)?;
        debug!(
            "SmartCorePredictor: class probabilities {:?} for classes {:?}",
            probabilities, classes
        );

        Prediction::from_probabilities(&classes, &probabilities).ok_or_else(|| {
            PredictionError::PredictionFailed {
                reason: "No prediction returned".to_string(),
            }
        })
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}
