use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

use crate::error::Result;

/// Samples an array from a uniform distribution centered at zero whose
/// half-width is `1 / (2 * sqrt(fan_in))`.
///
/// Scaling the range by the fan-in keeps the initial activations in the same
/// numeric range regardless of how wide the layer is.
///
/// # Arguments
/// * `shape` - The shape of the array to fill.
/// * `fan_in` - The number of input units feeding the initialized entries.
/// * `rng` - A random number generator.
///
/// # Returns
/// The freshly sampled array, or an error if the range is degenerate.
pub fn fan_in_uniform<R: Rng>(
    shape: (usize, usize),
    fan_in: usize,
    rng: &mut R,
) -> Result<Array2<f32>> {
    let half_width = 1. / (2. * (fan_in as f32).sqrt());
    let distribution = Uniform::new_inclusive(-half_width, half_width)?;

    Ok(Array2::random_using(shape, distribution, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn entries_stay_inside_the_fan_in_range() {
        let mut rng = seeded_rng();

        let w = fan_in_uniform((5, 2), 5, &mut rng).unwrap();
        let bound = 1. / (2. * (5f32).sqrt());

        for &v in w.iter() {
            assert!(
                (-bound..=bound).contains(&v),
                "{v} escapes [-{bound}, {bound}]"
            );
        }
    }

    #[test]
    fn entries_are_not_constant() {
        let mut rng = seeded_rng();

        let w = fan_in_uniform((8, 8), 8, &mut rng).unwrap();
        let first = w[(0, 0)];

        assert!(w.iter().any(|&v| v != first));
    }

    #[test]
    fn same_seed_same_draw() {
        let a = fan_in_uniform((3, 4), 3, &mut seeded_rng()).unwrap();
        let b = fan_in_uniform((3, 4), 3, &mut seeded_rng()).unwrap();

        assert_eq!(a, b);
    }
}
