//! The subtyping judgment.
//!
//! `is_subtype` is algorithmic: rules are tried strictly in the order they
//! appear in the match, and the first applicable rule decides. Putting
//! reflexivity first makes `X <: X` hold even for unbound variables, and
//! trying `never` on the right before variable promotion keeps a bounded
//! variable from proving itself below `never` through its bound.

use std::collections::BTreeMap;

use crate::ast::Type;
use crate::context::{Binding, Context};
use crate::subst::fresh_name;

/// Does `left <: right` hold under `ctx`?
pub fn is_subtype(ctx: &Context, left: &Type, right: &Type) -> bool {
    tracing::trace!(left = %left, right = %right, ctx = %ctx, "subtype judgment");
    match (left, right) {
        // ────────── (S-Refl)
        //  S <: S
        _ if left == right => true,

        // ─────────── (S-Top)
        //  S <: any
        (_, Type::Top) => true,

        // nothing sits below `never` except `never` itself,
        // which reflexivity already settled
        (_, Type::Bottom) => false,

        //  X<:T ∈ Γ    Γ ⊢ T <: U
        // ──────────────────────── (S-TVar)
        //  Γ ⊢ X <: U
        (Type::Var(name, _), _) => match ctx.lookup(name) {
            Some(Binding::Subtype(bound)) => is_subtype(ctx, bound, right),
            _ => false,
        },

        //  T₁ <: S₁    S₂ <: T₂
        // ─────────────────────────── (S-Arrow)
        //  S₁ -> S₂ <: T₁ -> T₂
        (Type::Arrow(left_domain, left_result), Type::Arrow(right_domain, right_result)) => {
            is_subtype(ctx, right_domain, left_domain)
                && is_subtype(ctx, left_result, right_result)
        }

        //  Γ ⊢ T₁ <: S₁    Γ, X<:T₁ ⊢ S₂ <: T₂
        // ────────────────────────────────────── (S-All)
        //  Γ ⊢ ∀X<:S₁.S₂ <: ∀X<:T₁.T₂
        (
            Type::Forall(left_generic, left_bound, left_body),
            Type::Forall(right_generic, right_bound, right_body),
        ) => subtype_forall(
            ctx, left_generic, left_bound, left_body, right_generic, right_bound, right_body,
        ),

        //  lᵢ: Tᵢ ∈ T ⟹ lᵢ: Sᵢ ∈ S ∧ Sᵢ <: Tᵢ
        // ───────────────────────────────────── (S-Rcd)
        //  S <: T
        (Type::Record(left_fields), Type::Record(right_fields)) => {
            subtype_record(ctx, left_fields, right_fields)
        }

        //  S <: Tᵢ for some i
        // ───────────────────── (S-UnionR)
        //  S <: T₁ | … | Tₙ
        (_, Type::Union(members)) => members.iter().any(|member| is_subtype(ctx, left, member)),

        //  S <: Tᵢ for every i
        // ───────────────────── (S-InterR)
        //  S <: T₁ & … & Tₙ
        (_, Type::Inter(members)) => members.iter().all(|member| is_subtype(ctx, left, member)),

        _ => false,
    }
}

fn subtype_forall(
    ctx: &Context,
    left_generic: &str,
    left_bound: &Type,
    left_body: &Type,
    right_generic: &str,
    right_bound: &Type,
    right_body: &Type,
) -> bool {
    if !is_subtype(ctx, right_bound, left_bound) {
        return false;
    }
    // rename both bodies to one shared binder before comparing them
    let mut excluded = left_body.free_vars();
    excluded.extend(right_body.free_vars());
    excluded.extend(ctx.iter().filter_map(|(name, binding)| match binding {
        Binding::Subtype(_) => Some(name.to_string()),
        _ => None,
    }));
    let shared = fresh_name(&excluded);
    let shared_var = Type::Var(shared.clone(), true);
    let left_body = left_body.substitute(left_generic, &shared_var);
    let right_body = right_body.substitute(right_generic, &shared_var);
    let inner = ctx.extended(shared, Binding::Subtype(right_bound.clone()));
    is_subtype(&inner, &left_body, &right_body)
}

fn subtype_record(
    ctx: &Context,
    left_fields: &BTreeMap<String, Type>,
    right_fields: &BTreeMap<String, Type>,
) -> bool {
    right_fields.iter().all(|(label, expected)| {
        left_fields
            .get(label)
            .is_some_and(|actual| is_subtype(ctx, actual, expected))
    })
}
