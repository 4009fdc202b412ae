use crate::network::model::Model;

/// Plain stochastic gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies `value -= lr * grad` to every parameter of `model`.
    pub fn step<M: Model + ?Sized>(&self, model: &mut M) {
        for mut param in model.parameters() {
            param.value.sub_scaled(param.grad, self.learning_rate);
        }
    }

    /// Clears every gradient buffer so the next batch starts from zero.
    pub fn zero_grad<M: Model + ?Sized>(&self, model: &mut M) {
        model.zero_grad();
    }
}
