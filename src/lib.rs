//! A type checker for System F-sub: the polymorphic lambda calculus with
//! bounded quantification, extended with `nat`/`bool` primitives, a
//! fixpoint operator, structural records, and union and intersection
//! types. A small query language on top reduces subtype and equality
//! questions to booleans.
//!
//! The three judgments are [`subtype::is_subtype`], [`typecheck::type_of`]
//! and [`eval::evaluate`]; all of them read a persistent [`Context`] of
//! named bindings.
//!
//! ```
//! use system_fsub::{is_subtype, Context, Type};
//!
//! let ctx = Context::new();
//! let nat_to_bool = Type::Arrow(Box::new(Type::Nat), Box::new(Type::Bool));
//! assert!(is_subtype(&ctx, &nat_to_bool, &Type::Top));
//! assert!(!is_subtype(&ctx, &Type::Top, &nat_to_bool));
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod subst;
pub mod subtype;
pub mod typecheck;

pub use ast::{Term, Type};
pub use context::{Binding, Context};
pub use error::{EvalError, Result, TypeError};
pub use eval::evaluate;
pub use subst::fresh_name;
pub use subtype::is_subtype;
pub use typecheck::type_of;
