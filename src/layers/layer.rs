use ndarray::{Array2, ArrayView2};

use super::function::DiffFn;
use crate::error::Result;

/// Gradient of a layer's output with respect to its parameters, shaped
/// exactly like the parameters themselves.
///
/// The same type doubles as the update handed to `Layer::apply_update`; the
/// rule that turns a gradient into an update (learning rate, momentum, ...)
/// lives in the external optimizer.
#[derive(Debug, Clone)]
pub struct ParamGrad {
    /// Shape `(in_dim, out_dim)`.
    pub weight: Array2<f32>,

    /// Shape `(1, out_dim)`.
    pub bias: Array2<f32>,
}

/// A differentiable function with a parameter lifecycle.
///
/// Stateless layers implement the parameter operations as visible no-ops:
/// `has_params` is `false`, `param_grad` yields `None` and `apply_update`
/// succeeds without touching anything, so a composing network can drive
/// every layer through the same calls.
pub trait Layer: DiffFn {
    /// Whether this layer owns parameters at all.
    fn has_params(&self) -> bool;

    /// Computes the gradient with respect to the parameters at `x`, combined
    /// with the upstream signal.
    ///
    /// # Arguments
    /// * `x` - The input batch the layer was forwarded with.
    /// * `upstream` - The gradient flowing back from the next layer.
    ///
    /// # Returns
    /// The parameter gradient, or `None` for layers without parameters.
    fn param_grad(
        &self,
        x: ArrayView2<f32>,
        upstream: ArrayView2<f32>,
    ) -> Result<Option<ParamGrad>>;

    /// Adds an externally computed update to the parameters in place.
    fn apply_update(&mut self, update: &ParamGrad) -> Result<()>;
}
