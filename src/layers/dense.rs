use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;

use super::function::{DiffFn, LocalGrad};
use super::layer::{Layer, ParamGrad};
use crate::error::{LayerErr, Result};
use crate::init;

/// A fully connected affine layer: `y = x · W + b`.
///
/// The weight matrix has shape `(in_dim, out_dim)` and the bias is a
/// `(1, out_dim)` row broadcast over the batch. Both are owned exclusively
/// by the layer and mutated only through `apply_update`.
#[derive(Debug)]
pub struct Dense {
    weight: Array2<f32>,
    bias: Array2<f32>,
}

fn check_dim(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(LayerErr::ShapeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

impl Dense {
    /// Creates a new `Dense` with randomly initialized parameters.
    ///
    /// Every weight and bias entry is drawn independently from a uniform
    /// distribution centered at zero with half-width `1 / (2 * sqrt(in_dim))`.
    /// Initialization happens here and only here.
    ///
    /// # Arguments
    /// * `in_dim` - The number of input features.
    /// * `out_dim` - The number of output features.
    /// * `rng` - The generator the initial parameters are drawn from.
    ///
    /// # Returns
    /// A new `Dense` instance, or an error if a dimension is zero.
    pub fn new<R: Rng>(in_dim: usize, out_dim: usize, rng: &mut R) -> Result<Self> {
        if in_dim == 0 {
            return Err(LayerErr::InvalidDimension {
                what: "in_dim",
                got: in_dim,
            });
        }
        if out_dim == 0 {
            return Err(LayerErr::InvalidDimension {
                what: "out_dim",
                got: out_dim,
            });
        }

        let weight = init::fan_in_uniform((in_dim, out_dim), in_dim, rng)?;
        let bias = init::fan_in_uniform((1, out_dim), in_dim, rng)?;

        Ok(Self { weight, bias })
    }

    /// Builds a `Dense` from existing parameters.
    ///
    /// # Arguments
    /// * `weight` - An `(in_dim, out_dim)` matrix.
    /// * `bias` - A `(1, out_dim)` row.
    ///
    /// # Returns
    /// A new `Dense` instance, or an error if the shapes disagree or a
    /// dimension is zero.
    pub fn from_parts(weight: Array2<f32>, bias: Array2<f32>) -> Result<Self> {
        if weight.nrows() == 0 {
            return Err(LayerErr::InvalidDimension {
                what: "in_dim",
                got: 0,
            });
        }
        if weight.ncols() == 0 {
            return Err(LayerErr::InvalidDimension {
                what: "out_dim",
                got: 0,
            });
        }
        check_dim("bias rows", bias.nrows(), 1)?;
        check_dim("bias columns", bias.ncols(), weight.ncols())?;

        Ok(Self { weight, bias })
    }

    /// The number of input features.
    pub fn in_dim(&self) -> usize {
        self.weight.nrows()
    }

    /// The number of output features.
    pub fn out_dim(&self) -> usize {
        self.weight.ncols()
    }

    /// A read-only view of the weight matrix.
    pub fn weight(&self) -> ArrayView2<'_, f32> {
        self.weight.view()
    }

    /// A read-only view of the bias row.
    pub fn bias(&self) -> ArrayView2<'_, f32> {
        self.bias.view()
    }

    fn check_input(&self, x: &ArrayView2<f32>) -> Result<()> {
        check_dim("input columns", x.ncols(), self.in_dim())
    }
}

impl DiffFn for Dense {
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_input(&x)?;

        Ok(x.dot(&self.weight) + &self.bias)
    }

    fn grad_input(&self, x: ArrayView2<f32>) -> Result<LocalGrad> {
        self.check_input(&x)?;

        // The Jacobian of an affine map is the weight matrix itself, no
        // matter where it is evaluated.
        Ok(LocalGrad::Dense(self.weight.clone()))
    }
}

impl Layer for Dense {
    fn has_params(&self) -> bool {
        true
    }

    fn param_grad(
        &self,
        x: ArrayView2<f32>,
        upstream: ArrayView2<f32>,
    ) -> Result<Option<ParamGrad>> {
        self.check_input(&x)?;
        check_dim("upstream columns", upstream.ncols(), self.out_dim())?;
        check_dim("upstream rows", upstream.nrows(), x.nrows())?;

        let weight = x.t().dot(&upstream);
        let bias = upstream.sum_axis(Axis(0)).insert_axis(Axis(0));

        Ok(Some(ParamGrad { weight, bias }))
    }

    fn apply_update(&mut self, update: &ParamGrad) -> Result<()> {
        check_dim("update weight rows", update.weight.nrows(), self.in_dim())?;
        check_dim("update weight columns", update.weight.ncols(), self.out_dim())?;
        check_dim("update bias rows", update.bias.nrows(), 1)?;
        check_dim("update bias columns", update.bias.ncols(), self.out_dim())?;

        self.weight += &update.weight;
        self.bias += &update.bias;

        Ok(())
    }
}
