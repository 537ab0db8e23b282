//! Evaluator for the query sub-language.
//!
//! Queries reduce terms just far enough to answer subtype and equality
//! questions. Anything without a dedicated reduction, abstractions and
//! records included, is already a normal form and comes back unchanged.

use crate::ast::Term;
use crate::context::Context;
use crate::error::EvalError;
use crate::subtype::is_subtype;
use crate::typecheck::type_of;

/// Reduces `term` to its normal form under `ctx`.
pub fn evaluate(ctx: &Context, term: &Term) -> Result<Term, EvalError> {
    tracing::trace!(term = %term, ctx = %ctx, "evaluating");
    match term {
        // a variable means an alias here, never a typed declaration
        Term::Var(name) => match ctx.lookup_alias(name) {
            Some(aliased) => Ok(aliased.clone()),
            None => Err(EvalError::UnknownBinding {
                name: name.to_string(),
            }),
        },
        Term::If(guard, then_branch, else_branch) => match evaluate(ctx, guard)? {
            Term::Bool(true) => evaluate(ctx, then_branch),
            Term::Bool(false) => evaluate(ctx, else_branch),
            other => Err(EvalError::GuardNotBoolean { actual: other }),
        },
        Term::SubtypeOf(left, right) => {
            let left = evaluate(ctx, left)?;
            let right = evaluate(ctx, right)?;
            let left_type = type_of(ctx, &left)?;
            let right_type = type_of(ctx, &right)?;
            Ok(Term::Bool(is_subtype(ctx, &left_type, &right_type)))
        }
        Term::Equals(left, right) => Ok(Term::Bool(evaluate(ctx, left)? == evaluate(ctx, right)?)),
        Term::Union(members) => Ok(Term::Union(evaluate_members(ctx, members)?)),
        Term::Inter(members) => Ok(Term::Inter(evaluate_members(ctx, members)?)),
        _ => Ok(term.clone()),
    }
}

fn evaluate_members(ctx: &Context, members: &[Term]) -> Result<Vec<Term>, EvalError> {
    members
        .iter()
        .map(|member| evaluate(ctx, member))
        .collect()
}
