//! Cape Cod method
//!
//! Like Bornhuetter-Ferguson, but the expected ultimates are volume measures
//! rescaled by a single ratio `kappa` estimated from the latest diagonal.

use rust_decimal::Decimal;

use super::bornhuetter_ferguson::project_emergence;
use super::{check_len, DevelopmentMethod, FactorBasedMethod, Memo};
use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, Square, Triangle, TriangleKind};

/// Cape Cod development with a given pattern and one volume measure per accident period
#[derive(Debug)]
pub struct CapeCod {
    factors: Vec<Decimal>,
    volume_measures: Vec<Decimal>,
    kappa: Memo<Decimal>,
}

impl CapeCod {
    pub fn new(factors: Vec<Decimal>, volume_measures: Vec<Decimal>) -> Self {
        Self {
            factors,
            volume_measures,
            kappa: Memo::new(),
        }
    }

    pub fn volume_measures(&self) -> &[Decimal] {
        &self.volume_measures
    }

    /// Observed claims to date over the pattern-weighted volume
    fn kappa(&self, triangle: &Triangle) -> Result<Decimal> {
        self.kappa
            .get_or_compute(|| {
                let quantity = "Cape Cod kappa";
                let periods = triangle.periods();
                let observed = checked::sum(triangle.main_diagonal()?, quantity)?;
                let weighted = self
                    .volume_measures
                    .iter()
                    .enumerate()
                    .map(|(row, &volume)| {
                        checked::mul(volume, self.factors[periods - 1 - row], quantity)
                    })
                    .collect::<Result<Vec<_>>>()?;
                let expected = checked::sum(weighted, quantity)?;

                let kappa = checked::div(observed, expected, quantity)?;
                log::debug!("Cape Cod kappa: {kappa}");
                Ok(kappa)
            })
            .copied()
    }
}

impl DevelopmentMethod for CapeCod {
    const NAME: &'static str = "Cape Cod method";
    const KIND: TriangleKind = TriangleKind::Cumulative;

    fn validate(&self, periods: usize) -> Result<()> {
        check_len(&self.factors, periods)?;
        check_len(&self.volume_measures, periods)
    }

    fn compute_factors(&self, _triangle: &Triangle) -> Result<Vec<Decimal>> {
        Ok(self.factors.clone())
    }

    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square> {
        let kappa = self.kappa(triangle)?;
        let ultimates = self
            .volume_measures
            .iter()
            .map(|&volume| checked::mul(kappa, volume, "Cape Cod ultimate"))
            .collect::<Result<Vec<_>>>()?;
        project_emergence(triangle, factors, &ultimates)
    }

    fn inputs(&self) -> Option<(&'static str, &[Decimal])> {
        Some(("Volume measures", &self.volume_measures))
    }
}

impl FactorBasedMethod<CapeCod> {
    /// Ratio of observed claims to pattern-weighted volume, computed once
    pub fn kappa(&self) -> Result<Decimal> {
        self.method().kappa(&self.triangle)
    }
}
