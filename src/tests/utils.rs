use crate::core::{Tensor, Variable};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

pub(super) fn random_tensor(states: &[usize], rng: &mut impl Rng) -> Tensor {
    let distr = Uniform::new(0.1f64, 1f64);
    let len: usize = states.iter().product();
    let values = (0..len).map(|_| distr.sample(rng)).collect();
    Tensor::new(states.to_vec(), values).unwrap()
}

pub(super) fn assert_close(lhs: &Variable, rhs: &Variable, epsilon: f64) {
    assert_eq!(lhs.size(), rhs.size());
    for (l, r) in lhs.values().iter().zip(rhs.values()) {
        approx::assert_abs_diff_eq!(*l, *r, epsilon = epsilon);
    }
}
