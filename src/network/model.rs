use crate::layers::layer::Parameter;
use crate::math::matrix::Matrix;

/// Anything that maps a batch of feature rows to one probability per row
/// and can back-propagate a loss gradient into its own parameters.
pub trait Model {
    /// Forward pass over an `n × in` batch, returning `n × 1` probabilities.
    /// Caches whatever `backward` needs.
    fn forward(&mut self, input: &Matrix) -> Matrix;

    /// Accumulates parameter gradients given ∂L/∂output for the last batch.
    fn backward(&mut self, grad_output: &Matrix);

    fn parameters(&mut self) -> Vec<Parameter<'_>>;

    fn zero_grad(&mut self) {
        for mut param in self.parameters() {
            param.grad.fill(0.0);
        }
    }

    fn num_parameters(&mut self) -> usize {
        self.parameters().iter().map(|p| p.value.rows * p.value.cols).sum()
    }
}
