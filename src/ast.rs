//! Abstract syntax for System F-sub.
//!
//! Types and terms are plain recursive enums. A type variable carries a
//! `generic` flag: variables introduced by `∀`/`Λ` binders are generic and
//! participate in promotion, plain variables do not.

use std::collections::BTreeMap;

use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// The maximal type, written `any`.
    Top,
    /// The minimal type, written `never`.
    Bottom,
    Bool,
    Nat,
    /// A type variable: name plus whether it was bound by a quantifier.
    Var(String, bool),
    Arrow(Box<Type>, Box<Type>),
    /// Bounded universal quantification `∀X<:T₁.T₂`.
    Forall(String, Box<Type>, Box<Type>),
    Union(Vec<Type>),
    Inter(Vec<Type>),
    /// Structural record type; field order is irrelevant.
    Record(BTreeMap<String, Type>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Var(String),
    Abs(String, Type, Box<Term>),
    App(Box<Term>, Box<Term>),
    Bool(bool),
    Nat(u64),
    Succ(Box<Term>),
    Pred(Box<Term>),
    IsZero(Box<Term>),
    If(Box<Term>, Box<Term>, Box<Term>),
    Fix(Box<Term>),
    /// Type abstraction `ΛX<:T. t`.
    TAbs(String, Type, Box<Term>),
    /// Type application `t [T]`.
    TApp(Box<Term>, Type),
    Record(BTreeMap<String, Term>),
    /// Term-level literal for the maximal type.
    Any,
    /// Term-level literal for the minimal type.
    Never,
    /// Wrapper marking an embedded value; transparent to synthesis.
    Literal(Box<Term>),
    /// Query: does the type of the left operand subsume into the right's?
    SubtypeOf(Box<Term>, Box<Term>),
    /// Query: do both operands reduce to the same normal form?
    Equals(Box<Term>, Box<Term>),
    Union(Vec<Term>),
    Inter(Vec<Term>),
    Seq(Vec<Term>),
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Top => write!(f, "any"),
            Type::Bottom => write!(f, "never"),
            Type::Bool => write!(f, "bool"),
            Type::Nat => write!(f, "nat"),
            Type::Var(name, _) => write!(f, "{}", name),
            Type::Arrow(domain, result) => match domain.as_ref() {
                Type::Arrow(..) | Type::Forall(..) | Type::Union(_) | Type::Inter(_) => {
                    write!(f, "({}) -> {}", domain, result)
                }
                _ => write!(f, "{} -> {}", domain, result),
            },
            Type::Forall(generic, bound, body) => {
                write!(f, "∀{}<:{}.{}", generic, bound, body)
            }
            Type::Union(members) => write!(f, "{}", joined(members, " | ")),
            Type::Inter(members) => write!(f, "{}", joined(members, " & ")),
            Type::Record(fields) => write!(
                f,
                "{{{}}}",
                fields
                    .iter()
                    .format_with(", ", |(label, ty), f| f(&format_args!("{}: {}", label, ty)))
            ),
        }
    }
}

/// Joins type members with `separator`, parenthesizing any member whose own
/// notation would bleed into the surrounding one.
fn joined<'a>(members: &'a [Type], separator: &'a str) -> impl std::fmt::Display + 'a {
    members.iter().format_with(separator, |member, f| match member {
        Type::Arrow(..) | Type::Forall(..) | Type::Union(_) | Type::Inter(_) => {
            f(&format_args!("({})", member))
        }
        _ => f(member),
    })
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => write!(f, "{}", name),
            Term::Abs(param, param_type, body) => {
                write!(f, "λ{}:{}. {}", param, param_type, body)
            }
            Term::App(func, arg) => match (func.as_ref(), arg.as_ref()) {
                (Term::Abs(..) | Term::TAbs(..), _) => write!(f, "({}) {}", func, arg),
                (_, Term::App(..) | Term::Abs(..) | Term::TAbs(..)) => {
                    write!(f, "{} ({})", func, arg)
                }
                _ => write!(f, "{} {}", func, arg),
            },
            Term::Bool(value) => write!(f, "{}", value),
            Term::Nat(value) => write!(f, "{}", value),
            Term::Succ(arg) => fmt_unary(f, "succ", arg),
            Term::Pred(arg) => fmt_unary(f, "pred", arg),
            Term::IsZero(arg) => fmt_unary(f, "iszero", arg),
            Term::If(guard, then_branch, else_branch) => {
                write!(f, "if {} then {} else {}", guard, then_branch, else_branch)
            }
            Term::Fix(arg) => fmt_unary(f, "fix", arg),
            Term::TAbs(generic, bound, body) => {
                write!(f, "Λ{}<:{}. {}", generic, bound, body)
            }
            Term::TApp(func, type_arg) => match func.as_ref() {
                Term::Abs(..) | Term::TAbs(..) => write!(f, "({}) [{}]", func, type_arg),
                _ => write!(f, "{} [{}]", func, type_arg),
            },
            Term::Record(fields) => write!(
                f,
                "{{{}}}",
                fields
                    .iter()
                    .format_with(", ", |(label, value), f| f(&format_args!(
                        "{} = {}",
                        label, value
                    )))
            ),
            Term::Any => write!(f, "any"),
            Term::Never => write!(f, "never"),
            Term::Literal(value) => write!(f, "{}", value),
            Term::SubtypeOf(left, right) => write!(f, "{} <: {}", left, right),
            Term::Equals(left, right) => write!(f, "{} == {}", left, right),
            Term::Union(members) => write!(f, "{}", members.iter().format(" | ")),
            Term::Inter(members) => write!(f, "{}", members.iter().format(" & ")),
            Term::Seq(members) => write!(f, "{}", members.iter().format("; ")),
        }
    }
}

fn fmt_unary(f: &mut std::fmt::Formatter<'_>, operator: &str, arg: &Term) -> std::fmt::Result {
    match arg {
        Term::Var(_) | Term::Bool(_) | Term::Nat(_) | Term::Record(_) => {
            write!(f, "{} {}", operator, arg)
        }
        _ => write!(f, "{} ({})", operator, arg),
    }
}
