use crate::layers::layer::Parameter;

/// L1 weight penalty `strength · Σ|w|`, applied to parameters named `weight`.
/// Biases are left unpenalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L1Penalty {
    pub strength: f64,
}

impl L1Penalty {
    pub fn new(strength: f64) -> L1Penalty {
        L1Penalty { strength }
    }

    pub fn penalty(&self, params: &[Parameter<'_>]) -> f64 {
        let total: f64 = params.iter()
            .filter(|p| p.name == "weight")
            .map(|p| p.value.data.iter().flatten().map(|w| w.abs()).sum::<f64>())
            .sum();
        self.strength * total
    }

    /// Adds `strength · sign(w)` to each weight gradient. The subgradient at
    /// `w = 0` is taken as 0.
    pub fn accumulate_grad(&self, params: &mut [Parameter<'_>]) {
        for param in params.iter_mut().filter(|p| p.name == "weight") {
            for (row, grad_row) in param.value.data.iter().zip(param.grad.data.iter_mut()) {
                for (w, g) in row.iter().zip(grad_row.iter_mut()) {
                    if *w != 0.0 {
                        *g += self.strength * w.signum();
                    }
                }
            }
        }
    }
}
