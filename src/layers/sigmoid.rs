use ndarray::{Array2, ArrayView2};

use super::function::{DiffFn, LocalGrad};
use super::layer::{Layer, ParamGrad};
use crate::error::Result;
use crate::functional::{sigmoid, sigmoid_prime};

/// The pointwise logistic nonlinearity.
///
/// Stateless: the layer owns no parameters, and its Jacobian is diagonal, so
/// the local gradient is kept as a plain matrix of pointwise derivatives.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sigmoid;

impl Sigmoid {
    /// Returns a new `Sigmoid`.
    pub fn new() -> Self {
        Self
    }
}

impl DiffFn for Sigmoid {
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        Ok(x.mapv(sigmoid))
    }

    fn grad_input(&self, x: ArrayView2<f32>) -> Result<LocalGrad> {
        Ok(LocalGrad::Elementwise(x.mapv(sigmoid_prime)))
    }
}

impl Layer for Sigmoid {
    fn has_params(&self) -> bool {
        false
    }

    fn param_grad(
        &self,
        _x: ArrayView2<f32>,
        _upstream: ArrayView2<f32>,
    ) -> Result<Option<ParamGrad>> {
        Ok(None)
    }

    fn apply_update(&mut self, _update: &ParamGrad) -> Result<()> {
        Ok(())
    }
}
