use crate::FitError;
use std::fmt;
use std::str::FromStr;

/// Optimization method used to fit the model.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Full dataset gradient descent
    Batch,
    /// Stochastic gradient descent
    Sgd,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Batch => "batch",
            Strategy::Sgd => "sgd",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = FitError;

    /// Accepts `batch` and `sgd`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batch" => Ok(Strategy::Batch),
            "sgd" => Ok(Strategy::Sgd),
            _ => Err(FitError::InvalidStrategyName(s.to_string())),
        }
    }
}
