//! Scalar building blocks for the pointwise layers.

/// Logistic sigmoid.
pub fn sigmoid(z: f32) -> f32 {
    1. / (1. + (-z).exp())
}

/// Derivative of the logistic sigmoid.
pub fn sigmoid_prime(z: f32) -> f32 {
    let s = sigmoid(z);
    s * (1. - s)
}
