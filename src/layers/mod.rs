mod dense;
mod function;
mod layer;
mod sigmoid;

pub use dense::Dense;
pub use function::{Activation, DiffFn, LocalGrad};
pub use layer::{Layer, ParamGrad};
pub use sigmoid::Sigmoid;
