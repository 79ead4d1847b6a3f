//! Runner for reserving methods over one run-off triangle
//!
//! Builds the triangle once, then runs any number of methods against it and
//! collects their figures into serializable summaries.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::{Dataset, LoadError, ParameterTable, DEFAULT_DATA_PATH};
use crate::model::{Sliceable, Triangle, TriangleKind};
use crate::reserving::{
    Additive, BornhuetterFerguson, CapeCod, ChainLadder, DevelopmentMethod, FactorBasedMethod,
    LossDevelopment, ReservingMethod,
};

/// Reserving method selector, without inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKind {
    ChainLadder,
    Additive,
    BornhuetterFerguson,
    CapeCod,
    LossDevelopment,
}

impl MethodKind {
    pub const ALL: [MethodKind; 5] = [
        MethodKind::ChainLadder,
        MethodKind::Additive,
        MethodKind::BornhuetterFerguson,
        MethodKind::CapeCod,
        MethodKind::LossDevelopment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::ChainLadder => "chain-ladder",
            MethodKind::Additive => "additive",
            MethodKind::BornhuetterFerguson => "bornhuetter-ferguson",
            MethodKind::CapeCod => "cape-cod",
            MethodKind::LossDevelopment => "loss-development",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MethodKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// A reserving method together with the inputs it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum MethodSpec {
    ChainLadder,
    Additive {
        premiums: Vec<Decimal>,
    },
    BornhuetterFerguson {
        factors: Vec<Decimal>,
        alpha: Vec<Decimal>,
    },
    CapeCod {
        factors: Vec<Decimal>,
        volume_measures: Vec<Decimal>,
    },
    LossDevelopment {
        factors: Vec<Decimal>,
    },
}

impl MethodSpec {
    pub fn kind(&self) -> MethodKind {
        match self {
            MethodSpec::ChainLadder => MethodKind::ChainLadder,
            MethodSpec::Additive { .. } => MethodKind::Additive,
            MethodSpec::BornhuetterFerguson { .. } => MethodKind::BornhuetterFerguson,
            MethodSpec::CapeCod { .. } => MethodKind::CapeCod,
            MethodSpec::LossDevelopment { .. } => MethodKind::LossDevelopment,
        }
    }

    /// Pick the inputs `kind` needs from a parameter table
    ///
    /// Cape Cod takes the premiums as its volume measures.
    pub fn from_parameters(
        kind: MethodKind,
        parameters: &ParameterTable,
    ) -> std::result::Result<Self, LoadError> {
        let column = |values: &Option<Vec<Decimal>>, name: &'static str| {
            values.clone().ok_or(LoadError::MissingColumn(name))
        };

        Ok(match kind {
            MethodKind::ChainLadder => MethodSpec::ChainLadder,
            MethodKind::Additive => MethodSpec::Additive {
                premiums: column(&parameters.premiums, "premium")?,
            },
            MethodKind::BornhuetterFerguson => MethodSpec::BornhuetterFerguson {
                factors: column(&parameters.development, "development")?,
                alpha: column(&parameters.alpha, "alpha")?,
            },
            MethodKind::CapeCod => MethodSpec::CapeCod {
                factors: column(&parameters.development, "development")?,
                volume_measures: column(&parameters.premiums, "premium")?,
            },
            MethodKind::LossDevelopment => MethodSpec::LossDevelopment {
                factors: column(&parameters.development, "development")?,
            },
        })
    }

    /// Bind the method to `triangle`
    pub fn build(&self, triangle: Triangle) -> Result<Box<dyn ReservingMethod>> {
        Ok(match self {
            MethodSpec::ChainLadder => boxed(triangle, ChainLadder)?,
            MethodSpec::Additive { premiums } => boxed(triangle, Additive::new(premiums.clone()))?,
            MethodSpec::BornhuetterFerguson { factors, alpha } => {
                boxed(triangle, BornhuetterFerguson::new(factors.clone(), alpha.clone()))?
            }
            MethodSpec::CapeCod {
                factors,
                volume_measures,
            } => boxed(triangle, CapeCod::new(factors.clone(), volume_measures.clone()))?,
            MethodSpec::LossDevelopment { factors } => {
                boxed(triangle, LossDevelopment::new(factors.clone()))?
            }
        })
    }
}

fn boxed<M>(triangle: Triangle, method: M) -> Result<Box<dyn ReservingMethod>>
where
    M: DevelopmentMethod + Send + Sync + 'static,
{
    Ok(Box::new(FactorBasedMethod::new(triangle, method)?))
}

/// Where the claims come from and how they are recorded
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory holding claims.csv and parameters.csv
    pub data_path: PathBuf,
    /// How the diagonals in claims.csv are recorded
    pub input_kind: TriangleKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            input_kind: TriangleKind::Incremental,
        }
    }
}

/// Figures produced by one reserving method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservingSummary {
    pub method: MethodKind,
    pub periods: usize,
    pub factors: Vec<Decimal>,
    pub projection: Vec<Vec<Decimal>>,
    pub reserves: Vec<Decimal>,
    pub total_reserve: Decimal,
    pub cashflows: Vec<Decimal>,
    /// Human-readable report of the method
    #[serde(skip)]
    pub report: String,
}

/// Runs reserving methods against one pre-built triangle
///
/// # Example
/// ```ignore
/// let runner = ReservingRunner::from_config(&RunConfig::default())?;
/// let summary = runner.run(&MethodSpec::ChainLadder)?;
/// println!("{}", summary.total_reserve);
/// ```
#[derive(Debug, Clone)]
pub struct ReservingRunner {
    triangle: Triangle,
    parameters: ParameterTable,
}

impl ReservingRunner {
    /// Create runner for a triangle without parameters
    pub fn new(triangle: Triangle) -> Self {
        Self {
            triangle,
            parameters: ParameterTable::default(),
        }
    }

    /// Create runner from a loaded dataset
    pub fn from_dataset(
        dataset: &Dataset,
        input_kind: TriangleKind,
    ) -> std::result::Result<Self, LoadError> {
        Ok(Self {
            triangle: dataset.triangle(input_kind)?,
            parameters: dataset.parameters.clone(),
        })
    }

    /// Create runner by loading the dataset the config points to
    pub fn from_config(config: &RunConfig) -> std::result::Result<Self, LoadError> {
        let dataset = crate::loader::load_dataset(&config.data_path)?;
        Self::from_dataset(&dataset, config.input_kind)
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// Spec for `kind`, with inputs taken from the runner's parameters
    pub fn spec(&self, kind: MethodKind) -> std::result::Result<MethodSpec, LoadError> {
        MethodSpec::from_parameters(kind, &self.parameters)
    }

    /// Run one method and collect its figures
    pub fn run(&self, spec: &MethodSpec) -> Result<ReservingSummary> {
        let method = spec.build(self.triangle.clone())?;
        log::info!("running {} over {} periods", method.name(), self.triangle.periods());

        let summary = ReservingSummary {
            method: spec.kind(),
            periods: self.triangle.periods(),
            factors: method.factors()?.to_vec(),
            projection: method.projection()?.rows(),
            reserves: method.reserves()?.to_vec(),
            total_reserve: method.total_reserve()?,
            cashflows: method.cashflows()?.to_vec(),
            report: method.to_string(),
        };

        log::info!("{}: total reserve {}", method.name(), summary.total_reserve);
        Ok(summary)
    }

    /// Run several methods against the same triangle
    pub fn run_all(&self, specs: &[MethodSpec]) -> Vec<Result<ReservingSummary>> {
        specs.iter().map(|spec| self.run(spec)).collect()
    }
}
