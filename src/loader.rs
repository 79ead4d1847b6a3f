//! CSV-based claims data loader
//!
//! Loads run-off diagonals and per-accident-period parameters from CSV files in
//! data/sample/:
//! - `claims.csv`: no header, one record per calendar period holding that
//!   period's claims ordered by development lag, incremental by default
//! - `parameters.csv`: header `accident_period,premium,alpha,development`, one
//!   row per accident period listed as 0, 1, 2, ...; other cells may be empty

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ReservingError;
use crate::model::{Triangle, TriangleKind};

/// Default path to the sample data directory
pub const DEFAULT_DATA_PATH: &str = "data/sample";

pub const CLAIMS_FILE: &str = "claims.csv";
pub const PARAMETERS_FILE: &str = "parameters.csv";

/// Failures while reading claims data
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid amount {value:?} on line {line}: {source}")]
    Decimal {
        line: u64,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("parameter column `{0}` is not available for every accident period")]
    MissingColumn(&'static str),

    #[error("expected accident period {expected} on line {line}, found {found:?}")]
    AccidentPeriodOrder {
        line: u64,
        expected: usize,
        found: String,
    },

    #[error(transparent)]
    Reserving(#[from] ReservingError),
}

/// Per-accident-period inputs of the reserving methods
///
/// A column is `Some` only when every accident period provides a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    pub accident_periods: usize,
    pub premiums: Option<Vec<Decimal>>,
    pub alpha: Option<Vec<Decimal>>,
    pub development: Option<Vec<Decimal>>,
}

/// Everything needed to run the reserving methods on one portfolio
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub diagonals: Vec<Vec<Decimal>>,
    pub parameters: ParameterTable,
}

impl Dataset {
    /// Build the run-off triangle from diagonals recorded as `kind`
    ///
    /// Cumulative records are stored as given; diagonal `d` must hold `d + 1` values.
    pub fn triangle(&self, kind: TriangleKind) -> Result<Triangle, ReservingError> {
        Triangle::from_recorded_diagonals(kind, &self.diagonals)
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn parse_amount(record: &StringRecord, value: &str) -> Result<Decimal, LoadError> {
    value.parse().map_err(|source| LoadError::Decimal {
        line: line(record),
        value: value.to_string(),
        source,
    })
}

/// Load run-off diagonals from a header-less CSV file
pub fn load_diagonals(path: &Path) -> Result<Vec<Vec<Decimal>>, LoadError> {
    load_diagonals_from_reader(open(path)?)
}

/// Load run-off diagonals from any reader
///
/// Records may differ in length. Blank lines and empty trailing cells are ignored.
pub fn load_diagonals_from_reader<R: Read>(reader: R) -> Result<Vec<Vec<Decimal>>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut diagonals = Vec::new();
    for result in reader.records() {
        let record = result?;
        let diagonal = record
            .iter()
            .filter(|value| !value.is_empty())
            .map(|value| parse_amount(&record, value))
            .collect::<Result<Vec<_>, _>>()?;

        if !diagonal.is_empty() {
            diagonals.push(diagonal);
        }
    }

    log::info!("loaded {} diagonals", diagonals.len());
    Ok(diagonals)
}

/// Load per-accident-period parameters from a CSV file with header
pub fn load_parameters(path: &Path) -> Result<ParameterTable, LoadError> {
    load_parameters_from_reader(open(path)?)
}

/// Load per-accident-period parameters from any reader
///
/// Row `k` must carry accident period `k`, so the periods run 0, 1, 2, ... in
/// file order. Columns absent from the header, or left empty in any row, are
/// reported as `None`.
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<ParameterTable, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header.eq_ignore_ascii_case(name));
    let period_index =
        column("accident_period").ok_or(LoadError::MissingColumn("accident_period"))?;
    let indices = [column("premium"), column("alpha"), column("development")];

    let mut columns: [Option<Vec<Decimal>>; 3] = indices.map(|index| index.map(|_| Vec::new()));
    let mut accident_periods = 0;

    for result in reader.records() {
        let record = result?;
        let period = record.get(period_index).unwrap_or("");
        if period.parse::<usize>().ok() != Some(accident_periods) {
            return Err(LoadError::AccidentPeriodOrder {
                line: line(&record),
                expected: accident_periods,
                found: period.to_string(),
            });
        }
        accident_periods += 1;

        for (values, index) in columns.iter_mut().zip(indices) {
            let cell = index.and_then(|index| record.get(index)).unwrap_or("");
            if cell.is_empty() {
                *values = None;
            } else if let Some(values) = values {
                values.push(parse_amount(&record, cell)?);
            }
        }
    }

    let [premiums, alpha, development] = columns;
    log::info!("loaded parameters for {accident_periods} accident periods");

    Ok(ParameterTable {
        accident_periods,
        premiums,
        alpha,
        development,
    })
}

/// Load `claims.csv` and, when present, `parameters.csv` from a directory
pub fn load_dataset(dir: &Path) -> Result<Dataset, LoadError> {
    let diagonals = load_diagonals(&dir.join(CLAIMS_FILE))?;

    let parameters_path = dir.join(PARAMETERS_FILE);
    let parameters = if parameters_path.exists() {
        load_parameters(&parameters_path)?
    } else {
        log::info!(
            "no {} in {}, methods needing parameters are unavailable",
            PARAMETERS_FILE,
            dir.display()
        );
        ParameterTable::default()
    };

    Ok(Dataset {
        diagonals,
        parameters,
    })
}

/// Load the sample dataset from the default location
pub fn load_default_dataset() -> Result<Dataset, LoadError> {
    load_dataset(Path::new(DEFAULT_DATA_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::Sliceable;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_diagonals_from_reader() {
        let csv = "1001\n1113,854\n\n1265, 990, 568,\n";
        let diagonals = load_diagonals_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(
            diagonals,
            vec![
                vec![dec!(1001)],
                vec![dec!(1113), dec!(854)],
                vec![dec!(1265), dec!(990), dec!(568)],
            ]
        );
    }

    #[test]
    fn test_invalid_amount_reports_line() {
        let csv = "1001\n1113,abc\n";
        let err = load_diagonals_from_reader(csv.as_bytes()).unwrap_err();

        match err {
            LoadError::Decimal { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_parameters_from_reader() {
        let csv = "accident_period,premium,alpha,development\n\
                   0,4000,3517,0.28\n\
                   1,4500,,0.51\n\
                   2,5300,4598,0.7\n";
        let parameters = load_parameters_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(parameters.accident_periods, 3);
        assert_eq!(parameters.premiums, Some(vec![dec!(4000), dec!(4500), dec!(5300)]));
        assert_eq!(parameters.alpha, None);
        assert_eq!(parameters.development, Some(vec![dec!(0.28), dec!(0.51), dec!(0.7)]));
    }

    #[test]
    fn test_parameters_without_column() {
        let csv = "accident_period,premium\n0,100\n1,200\n";
        let parameters = load_parameters_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(parameters.premiums, Some(vec![dec!(100), dec!(200)]));
        assert_eq!(parameters.alpha, None);
        assert_eq!(parameters.development, None);
    }

    #[test]
    fn test_parameters_out_of_order() {
        let csv = "accident_period,premium\n1,200\n0,100\n";
        let err = load_parameters_from_reader(csv.as_bytes()).unwrap_err();

        match err {
            LoadError::AccidentPeriodOrder {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 0);
                assert_eq!(found, "1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parameters_with_gap_or_bad_period() {
        let gap = "accident_period,premium\n0,100\n2,200\n";
        assert!(matches!(
            load_parameters_from_reader(gap.as_bytes()),
            Err(LoadError::AccidentPeriodOrder { expected: 1, .. })
        ));

        let blank = "accident_period,premium\n0,100\n,200\n";
        assert!(matches!(
            load_parameters_from_reader(blank.as_bytes()),
            Err(LoadError::AccidentPeriodOrder { expected: 1, .. })
        ));
    }

    #[test]
    fn test_parameters_need_accident_period_column() {
        let csv = "premium,alpha\n100,90\n";
        assert!(matches!(
            load_parameters_from_reader(csv.as_bytes()),
            Err(LoadError::MissingColumn("accident_period"))
        ));
    }

    #[test]
    fn test_cumulative_records_are_stored_as_given() {
        let cumulative = fixtures::cumulative_triangle();
        let dataset = Dataset {
            diagonals: (0..6).map(|d| cumulative.diagonal(d).unwrap()).collect(),
            parameters: ParameterTable::default(),
        };

        assert_eq!(dataset.triangle(TriangleKind::Cumulative).unwrap(), cumulative);
    }

    #[test]
    fn test_cumulative_record_of_wrong_length() {
        let dataset = Dataset {
            diagonals: vec![vec![dec!(10)], vec![dec!(12)]],
            parameters: ParameterTable::default(),
        };

        assert_eq!(
            dataset.triangle(TriangleKind::Cumulative),
            Err(ReservingError::DimensionMismatch { expected: 2, given: 1 })
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("data/does-not-exist")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("claims.csv"));
    }

    #[test]
    fn test_load_default_dataset() {
        let dataset = load_default_dataset().unwrap();

        assert_eq!(dataset.diagonals, fixtures::diagonals());
        assert_eq!(dataset.parameters.accident_periods, 6);
        assert_eq!(dataset.parameters.premiums, Some(fixtures::premiums()));
        assert_eq!(dataset.parameters.alpha, Some(fixtures::alpha()));
        assert_eq!(dataset.parameters.development, Some(fixtures::development_pattern()));

        let triangle = dataset.triangle(TriangleKind::Incremental).unwrap();
        assert_eq!(triangle, fixtures::incremental_triangle());
    }
}
