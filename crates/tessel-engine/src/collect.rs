//! Per-step data collection for lattice runs.
//!
//! A [`DataCollector`] holds named [`Reducer`]s. Each recorded state
//! becomes one [`Table`] row with one [`Reduction`] per reducer, in the
//! order the reducers were added.

use indexmap::IndexMap;
use std::fmt;
use tessel_core::Grid;

/// Caller-supplied reduction from a state to a number.
pub type CustomReducer = Box<dyn Fn(&Grid<f64>) -> f64 + Send + Sync>;

/// How a state is summarized into one table cell.
pub enum Reducer {
    /// Arithmetic mean of all cells.
    Mean,
    /// Smallest cell.
    Min,
    /// Largest cell.
    Max,
    /// Sum of all cells.
    Sum,
    /// A full copy of the state.
    Entire,
    /// Any function of the state.
    Custom(CustomReducer),
}

impl Reducer {
    /// Wrap a closure as a [`Reducer::Custom`].
    pub fn custom(f: impl Fn(&Grid<f64>) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(f))
    }

    fn reduce(&self, state: &Grid<f64>) -> Reduction {
        let values = state.as_slice();
        match self {
            Self::Mean => Reduction::Scalar(state.sum() / values.len() as f64),
            Self::Min => Reduction::Scalar(values.iter().copied().fold(f64::INFINITY, f64::min)),
            Self::Max => {
                Reduction::Scalar(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            }
            Self::Sum => Reduction::Scalar(state.sum()),
            Self::Entire => Reduction::Array(state.clone()),
            Self::Custom(f) => Reduction::Scalar(f(state)),
        }
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Min => write!(f, "Min"),
            Self::Max => write!(f, "Max"),
            Self::Sum => write!(f, "Sum"),
            Self::Entire => write!(f, "Entire"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduction {
    /// A single number.
    Scalar(f64),
    /// A snapshot of the whole state.
    Array(Grid<f64>),
}

impl Reduction {
    /// The number, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Array(_) => None,
        }
    }

    /// The snapshot, if this is an array.
    pub fn as_array(&self) -> Option<&Grid<f64>> {
        match self {
            Self::Array(g) => Some(g),
            Self::Scalar(_) => None,
        }
    }
}

/// Column names plus one row per recorded step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Reduction>>,
}

impl Table {
    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows; `rows()[step][column]`.
    pub fn rows(&self) -> &[Vec<Reduction>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every value of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Reduction>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Scalar values of one column; `None` if the column is missing or
    /// holds arrays.
    pub fn scalars(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .map(Reduction::as_scalar)
            .collect()
    }
}

/// Accumulates one row per recorded state.
#[derive(Debug, Default)]
pub struct DataCollector {
    reducers: IndexMap<String, Reducer>,
    rows: Vec<Vec<Reduction>>,
}

impl DataCollector {
    /// A collector with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, name: impl Into<String>, reducer: Reducer) -> Self {
        self.add(name, reducer);
        self
    }

    /// Add (or replace) a named column.
    ///
    /// Replacing a column keeps its position. Rows recorded earlier are
    /// discarded, since they no longer match the column set.
    pub fn add(&mut self, name: impl Into<String>, reducer: Reducer) {
        self.reducers.insert(name.into(), reducer);
        self.rows.clear();
    }

    /// Number of rows recorded so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reduce `state` with every reducer and append the row.
    pub fn record(&mut self, state: &Grid<f64>) {
        let row = self.reducers.values().map(|r| r.reduce(state)).collect();
        self.rows.push(row);
    }

    /// Drop recorded rows, keeping the columns.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Finish collecting.
    pub fn into_table(self) -> Table {
        Table {
            columns: self.reducers.into_keys().collect(),
            rows: self.rows,
        }
    }
}
