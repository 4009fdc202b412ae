use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::Mul;

/// Dense row-major matrix. A batch of samples is stored one sample per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples every entry uniformly from `[-bound, bound)`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, bound: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(-bound..bound);
            }
        }

        res
    }

    /// Builds an `n × 1` column from a slice.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Returns column `j` as a flat vector.
    pub fn col(&self, j: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[j]).collect()
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.rows, other.rows, "hadamard: row count differs");
        assert_eq!(self.cols, other.cols, "hadamard: column count differs");
        let data = self.data.iter().zip(other.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix::from_data(data)
    }

    /// Sums over rows, producing a `1 × cols` matrix. Used for bias gradients.
    pub fn sum_rows(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);
        for row in &self.data {
            for (j, x) in row.iter().enumerate() {
                res.data[0][j] += x;
            }
        }
        res
    }

    /// Adds a `1 × cols` row vector to every row.
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert_eq!(row.rows, 1, "add_row expects a single row");
        assert_eq!(self.cols, row.cols, "Matrices are of incorrect sizes");
        let data = self.data.iter()
            .map(|r| r.iter().zip(row.data[0].iter()).map(|(a, b)| a + b).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// In-place `self -= scale * other`.
    pub fn sub_scaled(&mut self, other: &Matrix, scale: f64) {
        assert_eq!(self.rows, other.rows, "Matrices are of incorrect sizes");
        assert_eq!(self.cols, other.cols, "Matrices are of incorrect sizes");
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, g) in row.iter_mut().zip(other_row.iter()) {
                *x -= scale * g;
            }
        }
    }

    /// In-place `self += other`.
    pub fn add_assign(&mut self, other: &Matrix) {
        assert_eq!(self.rows, other.rows, "Matrices are of incorrect sizes");
        assert_eq!(self.cols, other.cols, "Matrices are of incorrect sizes");
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x += y;
            }
        }
    }

    pub fn fill(&mut self, value: f64) {
        for row in self.data.iter_mut() {
            row.iter_mut().for_each(|x| *x = value);
        }
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res =  Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}
