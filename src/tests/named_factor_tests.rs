use crate::core::{AlgebraError, Tensor, Variable};
use crate::graph::{FactorError, Messages, NamedFactor, NamedVariable};

fn three_way_factor() -> NamedFactor {
    let potential = Tensor::new(vec![2, 3, 2], (1..=12).map(f64::from).collect()).unwrap();
    NamedFactor::new(1, vec![10, 20, 30], potential).unwrap()
}

#[test]
fn position_lookup() {
    let factor = three_way_factor();
    assert_eq!(factor.position_of(10), Some(0));
    assert_eq!(factor.position_of(20), Some(1));
    assert_eq!(factor.position_of(99), None);
    assert_eq!(factor.var_len(20), Some(3));
    assert_eq!(factor.var_len(30), Some(2));
    assert_eq!(factor.var_len(99), None);
}

#[test]
fn marginalize_by_id() {
    let factor = three_way_factor();
    let by_id = factor.marginalize(20).unwrap();
    assert_eq!(by_id, factor.belief().marginalize(1).unwrap());
    assert_eq!(by_id.sum(), 78.);
    assert_eq!(factor.marginalize(99), Err(FactorError::UnknownVariable(99)));
}

#[test]
fn construction_checks() {
    let potential = Tensor::filled(vec![2, 2], 1.).unwrap();
    assert_eq!(
        NamedFactor::new(0, vec![1, 1], potential.clone()),
        Err(FactorError::DuplicateVariable(1))
    );
    assert_eq!(
        NamedFactor::new(0, vec![1], potential.clone()),
        Err(FactorError::ArityMismatch(1, 2))
    );
    assert_eq!(
        NamedFactor::new(0, vec![1, 2, 3], potential),
        Err(FactorError::ArityMismatch(3, 2))
    );
}

#[test]
fn belief_replacement() {
    let factor = three_way_factor();
    assert_eq!(factor.belief(), factor.potential());
    let msg = Variable::new(vec![2., 0.5, 1.]);
    let updated = factor.belief().product(&msg, 1).unwrap();
    let replaced = factor.clone().with_belief(updated.clone()).unwrap();
    assert_eq!(replaced.belief(), &updated);
    assert_eq!(replaced.potential(), factor.potential());
    assert_eq!(replaced.reset_belief(), factor);

    let wrong = Tensor::filled(vec![2, 2], 1.).unwrap();
    let mut target = factor.clone();
    assert_eq!(
        target.set_belief(wrong),
        Err(FactorError::BeliefShape(vec![2, 3, 2], vec![2, 2]))
    );
    assert_eq!(target, factor);
}

#[test]
fn algebra_errors_propagate() {
    let err = FactorError::from(AlgebraError::OutOfRangePosition(3, 2));
    assert_eq!(err, FactorError::Algebra(AlgebraError::OutOfRangePosition(3, 2)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn variable_vertex_and_edge() {
    let var = NamedVariable::new(5, Variable::uniform(2));
    let var = var.with_belief(Variable::new(vec![0.3, 0.7]));
    assert_eq!(var.id(), 5);
    assert_eq!(var.belief().values(), &[0.3, 0.7]);

    let mut ones = || 1f64;
    let messages = Messages::initial(3, &mut ones);
    assert_eq!(messages.to_destination, Variable::new(vec![1.; 3]));
    let messages = Messages::new(Variable::new(vec![1.]), Variable::new(vec![2.])).reversed();
    assert_eq!(messages.to_destination.values(), &[2.]);
    assert_eq!(messages.to_source.values(), &[1.]);
}

#[test]
fn serde_rejects_duplicates() {
    let factor = three_way_factor();
    let yaml = serde_yaml::to_string(&factor).unwrap();
    let back: NamedFactor = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, factor);
    let broken = yaml.replace("- 30", "- 10");
    assert!(serde_yaml::from_str::<NamedFactor>(&broken).is_err());
}
