use crate::core::{AlgebraError, Tensor, Variable};
use approx::relative_eq;
use proptest::collection::vec;
use proptest::prelude::*;

fn tensor_strategy() -> impl Strategy<Value = Tensor> {
    vec(1usize..5, 1..5).prop_flat_map(|states| {
        let len: usize = states.iter().product();
        vec(0.1f64..10.0, len).prop_map(move |values| Tensor::new(states.clone(), values).unwrap())
    })
}

fn tensor_and_message() -> impl Strategy<Value = (Tensor, usize, Variable)> {
    tensor_strategy()
        .prop_flat_map(|t| {
            let arity = t.arity();
            (Just(t), 0..arity)
        })
        .prop_flat_map(|(t, pos)| {
            let size = t.states()[pos];
            (Just(t), Just(pos), vec(0.1f64..10.0, size).prop_map(Variable::new))
        })
}

fn message_pair() -> impl Strategy<Value = (Variable, Variable)> {
    (1usize..8).prop_flat_map(|size| {
        (
            vec(-10f64..10.0, size).prop_map(Variable::new),
            vec(0.1f64..10.0, size).prop_map(Variable::new),
        )
    })
}

fn all_close(lhs: &[f64], rhs: &[f64]) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|(l, r)| relative_eq!(*l, *r, epsilon = 1e-12, max_relative = 1e-9))
}

proptest! {
    #[test]
    fn marginalization_preserves_mass((t, pos, _) in tensor_and_message()) {
        let marginal = t.marginalize(pos).unwrap();
        prop_assert_eq!(marginal.size(), t.states()[pos]);
        let total: f64 = t.values().iter().sum();
        prop_assert!(relative_eq!(marginal.sum(), total, max_relative = 1e-9));
    }

    #[test]
    fn fused_marginal_matches_combine_then_marginalize((t, pos, msg) in tensor_and_message()) {
        let fused = t.marginal_of_product(&msg, pos).unwrap();
        let unfused = t.product(&msg, pos).unwrap().marginalize(pos).unwrap();
        prop_assert!(all_close(fused.values(), unfused.values()));
        let fused = t.marginal_of_division(&msg, pos).unwrap();
        let unfused = t.division(&msg, pos).unwrap().marginalize(pos).unwrap();
        prop_assert!(all_close(fused.values(), unfused.values()));
    }

    #[test]
    fn division_undoes_product((t, pos, msg) in tensor_and_message()) {
        let back = t.product(&msg, pos).unwrap().division(&msg, pos).unwrap();
        prop_assert_eq!(back.states(), t.states());
        prop_assert!(all_close(back.values(), t.values()));
    }

    #[test]
    fn message_algebra((a, b) in message_pair()) {
        prop_assert_eq!(a.product(&b).unwrap(), b.product(&a).unwrap());
        let back = a.divide(&b).unwrap().product(&b).unwrap();
        prop_assert!(all_close(back.values(), a.values()));
    }

    #[test]
    fn out_of_range_positions_fail(t in tensor_strategy(), extra in 0usize..10) {
        let pos = t.arity() + extra;
        prop_assert_eq!(t.marginalize(pos), Err(AlgebraError::OutOfRangePosition(pos, t.arity())));
        let msg = Variable::uniform(1);
        prop_assert_eq!(t.product(&msg, pos), Err(AlgebraError::OutOfRangePosition(pos, t.arity())));
    }

    #[test]
    fn flat_offsets_agree_with_values(t in tensor_strategy()) {
        for flat in 0..t.len() {
            let indices = t.multi_index(flat).unwrap();
            prop_assert_eq!(t.flat_index(&indices).unwrap(), flat);
            prop_assert_eq!(t.value_at(&indices).unwrap(), t.values()[flat]);
        }
    }
}
