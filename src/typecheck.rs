//! The type-synthesis judgment.

use std::collections::BTreeMap;

use crate::ast::{Term, Type};
use crate::context::{Binding, Context};
use crate::error::{Result, TypeError};
use crate::subtype::is_subtype;

/// Synthesizes the type of `term` under `ctx`.
pub fn type_of(ctx: &Context, term: &Term) -> Result<Type> {
    tracing::trace!(term = %term, ctx = %ctx, "synthesizing");
    match term {
        Term::Var(name) => type_of_var(ctx, name),
        Term::Abs(param, param_type, body) => type_of_abs(ctx, param, param_type, body),
        Term::App(func, arg) => type_of_app(ctx, func, arg),
        Term::Bool(_) => Ok(Type::Bool),
        Term::Nat(_) => Ok(Type::Nat),
        Term::Succ(arg) | Term::Pred(arg) => {
            check_nat(ctx, arg)?;
            Ok(Type::Nat)
        }
        Term::IsZero(arg) => {
            check_nat(ctx, arg)?;
            Ok(Type::Bool)
        }
        Term::If(_, then_branch, else_branch) => type_of_if(ctx, then_branch, else_branch),
        Term::Fix(arg) => type_of_fix(ctx, arg),
        Term::TAbs(generic, bound, body) => type_of_tabs(ctx, generic, bound, body),
        Term::TApp(func, type_arg) => type_of_tapp(ctx, func, type_arg),
        Term::Record(fields) => type_of_record(ctx, fields),
        Term::Any => Ok(Type::Top),
        Term::Never => Ok(Type::Bottom),
        Term::Literal(value) => type_of(ctx, value),
        Term::Union(members) => type_of_union(ctx, members),
        Term::SubtypeOf(..) | Term::Equals(..) | Term::Inter(_) | Term::Seq(_) => {
            Err(TypeError::NoRuleApplies { term: term.clone() })
        }
    }
}

//  x: T ∈ Γ
// ────────── (T-Var)
//  Γ ⊢ x : T
fn type_of_var(ctx: &Context, name: &str) -> Result<Type> {
    match ctx.lookup(name) {
        Some(Binding::Term(ty)) => Ok(ty.clone()),
        _ => Err(TypeError::UnboundVariable {
            name: name.to_string(),
        }),
    }
}

//  Γ, x: T₁ ⊢ t : T₂
// ────────────────────────── (T-Abs)
//  Γ ⊢ λx:T₁. t : T₁ -> T₂
fn type_of_abs(ctx: &Context, param: &str, param_type: &Type, body: &Term) -> Result<Type> {
    let inner = ctx.extended(param, Binding::Term(param_type.clone()));
    let body_type = type_of(&inner, body)?;
    Ok(Type::Arrow(
        Box::new(param_type.clone()),
        Box::new(body_type),
    ))
}

//  Γ ⊢ t₁ : T₁ -> T₂    Γ ⊢ t₂ : S    Γ ⊢ S <: T₁
// ───────────────────────────────────────────────── (T-App)
//  Γ ⊢ t₁ t₂ : T₂
fn type_of_app(ctx: &Context, func: &Term, arg: &Term) -> Result<Type> {
    let func_type = type_of(ctx, func)?;
    let arg_type = type_of(ctx, arg)?;
    match promote(ctx, &func_type) {
        Type::Arrow(domain, result) => {
            if is_subtype(ctx, &arg_type, domain) {
                Ok(result.as_ref().clone())
            } else {
                Err(TypeError::Mismatch {
                    expected: domain.as_ref().clone(),
                    actual: arg_type,
                })
            }
        }
        other => Err(TypeError::NotAFunction {
            actual: other.clone(),
        }),
    }
}

//  Γ ⊢ t₂ : T₂    Γ ⊢ t₃ : T₃
// ──────────────────────────────────── (T-If)
//  Γ ⊢ if t₁ then t₂ else t₃ : T₂ | T₃
fn type_of_if(ctx: &Context, then_branch: &Term, else_branch: &Term) -> Result<Type> {
    // the guard is left to the evaluator, which insists on a boolean
    // only when the conditional is actually reduced
    let then_type = type_of(ctx, then_branch)?;
    let else_type = type_of(ctx, else_branch)?;
    Ok(Type::Union(vec![then_type, else_type]))
}

//  Γ ⊢ t : T -> T
// ──────────────── (T-Fix)
//  Γ ⊢ fix t : T
fn type_of_fix(ctx: &Context, arg: &Term) -> Result<Type> {
    let arg_type = type_of(ctx, arg)?;
    if let Type::Arrow(domain, result) = &arg_type {
        if domain == result {
            return Ok(domain.as_ref().clone());
        }
    }
    Err(TypeError::NotFixable { actual: arg_type })
}

//  Γ, X<:T₁ ⊢ t : T₂
// ────────────────────────────── (T-TAbs)
//  Γ ⊢ ΛX<:T₁. t : ∀X<:T₁.T₂
fn type_of_tabs(ctx: &Context, generic: &str, bound: &Type, body: &Term) -> Result<Type> {
    // TODO: kind-check the bound once a kinding judgment lands
    let inner = ctx.extended(generic, Binding::Subtype(bound.clone()));
    let body_type = type_of(&inner, body)?;
    Ok(Type::Forall(
        generic.to_string(),
        Box::new(bound.clone()),
        Box::new(body_type),
    ))
}

//  Γ ⊢ t : ∀X<:T₁.T₂    Γ ⊢ S <: T₁
// ─────────────────────────────────── (T-TApp)
//  Γ ⊢ t [S] : [X ↦ S]T₂
fn type_of_tapp(ctx: &Context, func: &Term, type_arg: &Type) -> Result<Type> {
    let func_type = type_of(ctx, func)?;
    match promote(ctx, &func_type) {
        Type::Forall(generic, bound, body) => {
            if is_subtype(ctx, type_arg, bound) {
                Ok(body.substitute(generic, type_arg))
            } else {
                Err(TypeError::Mismatch {
                    expected: bound.as_ref().clone(),
                    actual: type_arg.clone(),
                })
            }
        }
        other => Err(TypeError::NotAGeneric {
            actual: other.clone(),
        }),
    }
}

//  Γ ⊢ tᵢ : Tᵢ for every field
// ────────────────────────────── (T-Rcd)
//  Γ ⊢ {lᵢ = tᵢ} : {lᵢ: Tᵢ}
fn type_of_record(ctx: &Context, fields: &BTreeMap<String, Term>) -> Result<Type> {
    let mut field_types = BTreeMap::new();
    for (label, value) in fields {
        field_types.insert(label.clone(), type_of(ctx, value)?);
    }
    Ok(Type::Record(field_types))
}

//  Γ ⊢ tᵢ : Tᵢ for every member
// ────────────────────────────── (T-Union)
//  Γ ⊢ t₁ | … | tₙ : T₁ | … | Tₙ
fn type_of_union(ctx: &Context, members: &[Term]) -> Result<Type> {
    let member_types = members
        .iter()
        .map(|member| type_of(ctx, member))
        .collect::<Result<Vec<_>>>()?;
    Ok(Type::Union(member_types))
}

//  Γ ⊢ t : nat
fn check_nat(ctx: &Context, arg: &Term) -> Result<()> {
    let actual = type_of(ctx, arg)?;
    if actual == Type::Nat {
        Ok(())
    } else {
        Err(TypeError::Mismatch {
            expected: Type::Nat,
            actual,
        })
    }
}

/// Resolves a generic variable through its chain of declared bounds,
/// stopping at the first bound that is not itself a generic variable.
/// Anything else passes through untouched.
fn promote<'a>(ctx: &'a Context, ty: &'a Type) -> &'a Type {
    match ty {
        Type::Var(name, true) => match ctx.lookup_bound(name) {
            Some(bound @ Type::Var(_, true)) => promote(ctx, bound),
            Some(bound) => bound,
            None => ty,
        },
        _ => ty,
    }
}
