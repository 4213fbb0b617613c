//! Subtyping/matching rules: identity, `Any`, vector
//! elementwise matching, and function/method alternative matching.

use super::descriptor::TypeDescriptor;
use super::interner::descriptor;
use super::{any, TypeId};

/// True when a value of type `actual` may be used where `expected` is
/// required.
pub fn matches(expected: TypeId, actual: TypeId) -> bool {
    if expected == actual || expected == any() {
        return true;
    }
    match (descriptor(expected), descriptor(actual)) {
        (TypeDescriptor::Vector(e), TypeDescriptor::Vector(a)) => matches(e, a),
        (TypeDescriptor::Function(exp_alts, exp_ret), TypeDescriptor::Function(act_alts, act_ret)) => {
            matches(exp_ret, act_ret) && alternatives_covered(&exp_alts, &act_alts)
        }
        (
            TypeDescriptor::Method(exp_target, exp_alts, exp_ret),
            TypeDescriptor::Method(act_target, act_alts, act_ret),
        ) => {
            matches(exp_target, act_target)
                && matches(exp_ret, act_ret)
                && alternatives_covered(&exp_alts, &act_alts)
        }
        _ => false,
    }
}

/// Every alternative of the supertype must be satisfied by some alternative
/// of the subtype, elementwise
fn alternatives_covered(super_alts: &[Vec<TypeId>], sub_alts: &[Vec<TypeId>]) -> bool {
    super_alts.iter().all(|sup| {
        sub_alts
            .iter()
            .any(|sub| sup.len() == sub.len() && sup.iter().zip(sub).all(|(s, a)| matches(*s, *a)))
    })
}

/// Finds the first argument alternative (in declaration order) whose
/// parameter types are each matched by the corresponding argument type.
pub fn find_alternative(alternatives: &[Vec<TypeId>], args: &[TypeId]) -> Option<usize> {
    alternatives.iter().position(|alt| {
        alt.len() == args.len() && alt.iter().zip(args).all(|(param, arg)| matches(*param, *arg))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{function, simple, vector};

    #[test]
    fn any_matches_everything() {
        assert!(matches(any(), simple("Int")));
        assert!(!matches(simple("Int"), any()));
    }

    #[test]
    fn vectors_match_elementwise() {
        assert!(matches(vector(simple("Any")), vector(simple("Int"))));
        assert!(!matches(vector(simple("Int")), vector(simple("Float"))));
    }

    #[test]
    fn find_alternative_picks_first_match() {
        let alts = vec![vec![simple("Int")], vec![simple("Float")]];
        assert_eq!(find_alternative(&alts, &[simple("Int")]), Some(0));
        assert_eq!(find_alternative(&alts, &[simple("Float")]), Some(1));
        assert_eq!(find_alternative(&alts, &[simple("String")]), None);
    }

    #[test]
    fn function_type_matching_checks_return_and_alternatives() {
        let narrow = function(vec![vec![simple("Int")]], simple("Int"));
        let wide = function(
            vec![vec![simple("Int")], vec![simple("Float")]],
            simple("Int"),
        );
        assert!(matches(narrow, wide));
        assert!(!matches(wide, narrow));
    }
}
