//! Random matrix construction.
//!
//! Used to build randomized test inputs for the backends and drivers.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::linalg::Matrix;

impl Matrix<f64> {
    /// Create a matrix with uniform random values in [0, 1).
    ///
    /// # Example
    ///
    /// ```
    /// use agrad::Matrix;
    ///
    /// let m = Matrix::random(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    /// ```
    pub fn random(rows: usize, cols: usize) -> Self {
        Self::random_with_rng(rows, cols, &mut rand::rng())
    }

    /// Create a matrix with uniform random values using a specific RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use agrad::Matrix;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let m1 = Matrix::random_with_rng(2, 3, &mut rng);
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let m2 = Matrix::random_with_rng(2, 3, &mut rng);
    ///
    /// assert_eq!(m1, m2);
    /// ```
    pub fn random_with_rng<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::from_fn(rows, cols, |_, _| rng.sample(StandardUniform))
    }

    /// Create a matrix with standard normal random values.
    pub fn random_normal(rows: usize, cols: usize) -> Self {
        Self::random_normal_with_rng(rows, cols, &mut rand::rng())
    }

    /// Create a matrix with standard normal random values using a specific RNG.
    pub fn random_normal_with_rng<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::from_fn(rows, cols, |_, _| rng.sample(StandardNormal))
    }
}
