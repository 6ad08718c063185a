use ndarray::{Array2, ArrayView2};

use crate::error::{LayerErr, Result};

/// The local derivative of a differentiable function, evaluated at a
/// specific input.
///
/// The variant records the structure of the Jacobian so that `chain` can
/// pick the matching combination rule: a dense Jacobian is combined by
/// matrix product, a diagonal one by elementwise multiply without ever
/// materializing the diagonal.
#[derive(Debug, Clone)]
pub enum LocalGrad {
    /// A full Jacobian of shape `(in_dim, out_dim)`, shared by every row of
    /// the batch.
    Dense(Array2<f32>),

    /// Pointwise derivatives with the shape of the input batch.
    Elementwise(Array2<f32>),
}

impl LocalGrad {
    /// Combines an upstream gradient with this local gradient: one step of
    /// the multivariate chain rule.
    ///
    /// # Arguments
    /// * `upstream` - The gradient flowing back from the next layer, shaped
    ///   like the owning layer's output.
    ///
    /// # Returns
    /// The gradient with respect to the owning layer's input, or a shape
    /// error.
    pub fn chain(&self, upstream: ArrayView2<f32>) -> Result<Array2<f32>> {
        match self {
            LocalGrad::Dense(jacobian) => {
                if upstream.ncols() != jacobian.ncols() {
                    return Err(LayerErr::ShapeMismatch {
                        what: "upstream columns",
                        got: upstream.ncols(),
                        expected: jacobian.ncols(),
                    });
                }

                Ok(upstream.dot(&jacobian.t()))
            }
            LocalGrad::Elementwise(prime) => {
                if upstream.nrows() != prime.nrows() {
                    return Err(LayerErr::ShapeMismatch {
                        what: "upstream rows",
                        got: upstream.nrows(),
                        expected: prime.nrows(),
                    });
                }
                if upstream.ncols() != prime.ncols() {
                    return Err(LayerErr::ShapeMismatch {
                        what: "upstream columns",
                        got: upstream.ncols(),
                        expected: prime.ncols(),
                    });
                }

                let mut downstream = upstream.to_owned();
                downstream.zip_mut_with(prime, |d, &p| *d *= p);
                Ok(downstream)
            }
        }
    }
}

/// The paired result of calling a differentiable function: the forward
/// output together with the local gradient evaluated at the same input.
///
/// `backward` takes the local gradient explicitly, so an upstream signal can
/// never be combined with the leftovers of a different call.
#[derive(Debug, Clone)]
pub struct Activation {
    pub output: Array2<f32>,
    pub local: LocalGrad,
}

/// A differentiable function over batches.
///
/// Implementors compute an output from an input batch of shape
/// `(batch, in_dim)`, compute the local derivative at that input, and
/// propagate an upstream gradient back through themselves.
pub trait DiffFn {
    /// Computes the output for the given input batch.
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Computes the local derivative at `x`.
    ///
    /// Independent of any upstream signal and of any prior `forward` call.
    fn grad_input(&self, x: ArrayView2<f32>) -> Result<LocalGrad>;

    /// Evaluates the function as a unit: the local gradient at `x` first,
    /// then the forward output.
    fn call(&self, x: ArrayView2<f32>) -> Result<Activation> {
        let local = self.grad_input(x)?;
        let output = self.forward(x)?;

        Ok(Activation { output, local })
    }

    /// Propagates an upstream gradient through a local gradient produced by
    /// an earlier `call` on the same input.
    fn backward(&self, local: &LocalGrad, upstream: ArrayView2<f32>) -> Result<Array2<f32>> {
        local.chain(upstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn dense_chain_is_a_matrix_product() {
        let jacobian = array![[1., 0.], [0., 1.], [1., 1.]];
        let local = LocalGrad::Dense(jacobian);

        let downstream = local.chain(array![[1., 1.]].view()).unwrap();
        assert_eq!(downstream, array![[1., 1., 2.]]);
    }

    #[test]
    fn elementwise_chain_multiplies_pointwise() {
        let local = LocalGrad::Elementwise(array![[0.5, 2.], [1., 0.]]);

        let downstream = local.chain(array![[4., 3.], [2., 7.]].view()).unwrap();
        assert_eq!(downstream, array![[2., 6.], [2., 0.]]);
    }

    #[test]
    fn dense_chain_rejects_wrong_upstream_width() {
        let local = LocalGrad::Dense(array![[1., 0.], [0., 1.]]);

        let err = local.chain(array![[1., 1., 1.]].view()).unwrap_err();
        assert!(matches!(err, LayerErr::ShapeMismatch { got: 3, expected: 2, .. }));
    }

    #[test]
    fn elementwise_chain_rejects_wrong_batch_size() {
        let local = LocalGrad::Elementwise(array![[0.5, 2.], [1., 0.]]);

        let err = local.chain(array![[1., 1.]].view()).unwrap_err();
        assert!(matches!(err, LayerErr::ShapeMismatch { got: 1, expected: 2, .. }));
    }
}
