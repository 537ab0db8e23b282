//! Errors reported by the synthesis and evaluation judgments.

use thiserror::Error;

use crate::ast::{Term, Type};

pub type Result<T, E = TypeError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("cannot find variable `{name}` in the current context")]
    UnboundVariable { name: String },

    #[error("expected a subtype of `{expected}`, got `{actual}`")]
    Mismatch { expected: Type, actual: Type },

    #[error("expected an arrow type, got `{actual}`")]
    NotAFunction { actual: Type },

    #[error("expected a universally quantified type, got `{actual}`")]
    NotAGeneric { actual: Type },

    #[error("fix requires an operand of some type `T -> T`, got `{actual}`")]
    NotFixable { actual: Type },

    #[error("no typing rule applies to `{term}`")]
    NoRuleApplies { term: Term },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("cannot find binding `{name}` in the current context")]
    UnknownBinding { name: String },

    #[error("conditional guard must reduce to a boolean, got `{actual}`")]
    GuardNotBoolean { actual: Term },

    #[error(transparent)]
    Type(#[from] TypeError),
}
