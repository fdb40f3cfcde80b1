use std::collections::BTreeMap;

use super::Sparsity;

/// One block of a Jacobian in its sparse form.
#[derive(Debug, Clone, PartialEq)]
pub enum Partial {
    /// Row-major dense block.
    Dense {
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    },
    /// Square block with the given diagonal.
    Diagonal(Vec<f64>),
    /// A block with a single column (output array, scalar input).
    Column(Vec<f64>),
    /// A block with a single row (scalar output, input array).
    Row(Vec<f64>),
    /// Explicit (row, column, value) triplets.
    Sparse {
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<f64>,
    },
}

impl Partial {
    /// A 1x1 block.
    #[must_use]
    pub fn scalar(value: f64) -> Self {
        Self::Dense {
            rows: 1,
            cols: 1,
            values: vec![value],
        }
    }

    /// A block matching `sparsity` with every structural entry set to `value`.
    #[must_use]
    pub fn filled(sparsity: &Sparsity, value: f64, rows: usize, cols: usize) -> Self {
        match sparsity {
            Sparsity::Dense => Self::Dense {
                rows,
                cols,
                values: vec![value; rows * cols],
            },
            Sparsity::Diagonal => Self::Diagonal(vec![value; rows]),
            Sparsity::Column => Self::Column(vec![value; rows]),
            Sparsity::Row => Self::Row(vec![value; cols]),
            Sparsity::Sparse {
                rows: row_idx,
                cols: col_idx,
            } => Self::Sparse {
                rows: row_idx.clone(),
                cols: col_idx.clone(),
                values: vec![value; row_idx.len()],
            },
            Sparsity::Broadcast if cols == 1 => Self::Column(vec![value; rows]),
            Sparsity::Broadcast => Self::Diagonal(vec![value; rows]),
        }
    }

    /// Expands the block into a row-major `rows x cols` matrix.
    ///
    /// Returns `None` if the block does not fit those dimensions.
    #[must_use]
    pub fn to_dense(&self, rows: usize, cols: usize) -> Option<Vec<f64>> {
        let mut dense = vec![0.0; rows * cols];
        match self {
            Self::Dense {
                rows: r,
                cols: c,
                values,
            } => {
                if *r != rows || *c != cols || values.len() != rows * cols {
                    return None;
                }
                dense.copy_from_slice(values);
            }
            Self::Diagonal(diagonal) => {
                if diagonal.len() != rows || rows != cols {
                    return None;
                }
                for (i, value) in diagonal.iter().enumerate() {
                    dense[i * cols + i] = *value;
                }
            }
            Self::Column(column) => {
                if column.len() != rows || cols != 1 {
                    return None;
                }
                dense.copy_from_slice(column);
            }
            Self::Row(row) => {
                if rows != 1 || row.len() != cols {
                    return None;
                }
                dense.copy_from_slice(row);
            }
            Self::Sparse {
                rows: row_idx,
                cols: col_idx,
                values,
            } => {
                if row_idx.len() != values.len() || col_idx.len() != values.len() {
                    return None;
                }
                for ((&r, &c), value) in row_idx.iter().zip(col_idx).zip(values) {
                    if r >= rows || c >= cols {
                        return None;
                    }
                    dense[r * cols + c] += value;
                }
            }
        }
        Some(dense)
    }
}

/// A Jacobian keyed by (of, wrt).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partials {
    blocks: BTreeMap<String, BTreeMap<String, Partial>>,
}

impl Partials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the block of `of` with respect to `wrt`.
    pub fn set(&mut self, of: impl Into<String>, wrt: impl Into<String>, partial: Partial) {
        self.blocks
            .entry(of.into())
            .or_default()
            .insert(wrt.into(), partial);
    }

    #[must_use]
    pub fn get(&self, of: &str, wrt: &str) -> Option<&Partial> {
        self.blocks.get(of).and_then(|row| row.get(wrt))
    }

    /// Iterates over `(of, wrt, block)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Partial)> {
        self.blocks.iter().flat_map(|(of, row)| {
            row.iter()
                .map(move |(wrt, partial)| (of.as_str(), wrt.as_str(), partial))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_forms_expand() {
        assert_eq!(
            Partial::Diagonal(vec![1.0, 2.0]).to_dense(2, 2),
            Some(vec![1.0, 0.0, 0.0, 2.0])
        );
        assert_eq!(
            Partial::Row(vec![0.0, 1.0, 0.0]).to_dense(1, 3),
            Some(vec![0.0, 1.0, 0.0])
        );
        assert_eq!(
            Partial::Sparse {
                rows: vec![1, 2, 2],
                cols: vec![0, 0, 1],
                values: vec![-1.0, -1.0, -1.0],
            }
            .to_dense(3, 3),
            Some(vec![0.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0, -1.0, 0.0])
        );
        assert_eq!(Partial::Column(vec![1.0; 3]).to_dense(3, 2), None);
    }

    #[test]
    fn broadcast_fill_depends_on_source_length() {
        assert_eq!(
            Partial::filled(&Sparsity::Broadcast, 1.0, 3, 1),
            Partial::Column(vec![1.0; 3])
        );
        assert_eq!(
            Partial::filled(&Sparsity::Broadcast, 1.0, 3, 3),
            Partial::Diagonal(vec![1.0; 3])
        );
    }
}
