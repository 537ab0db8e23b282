//! Typing contexts.
//!
//! A context is a persistent stack of named bindings. Extension shares the
//! tail with the parent context, so handing an extended context to a
//! sub-derivation never disturbs the caller's view. Lookup walks from the
//! innermost frame outward, which makes the innermost binding of a name
//! shadow any outer one.

use std::rc::Rc;

use itertools::Itertools;

use crate::ast::{Term, Type};

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `x: T`, a term variable declared with its type.
    Term(Type),
    /// `X<:T`, a type variable bounded above by `T`.
    Subtype(Type),
    /// `x = t`, an alias visible only to the evaluator.
    Alias(Term),
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    head: Option<Rc<Frame>>,
}

#[derive(Debug)]
struct Frame {
    name: String,
    binding: Binding,
    rest: Option<Rc<Frame>>,
}

impl Context {
    pub fn new() -> Self {
        Context { head: None }
    }

    /// Returns a copy of `self` with one extra binding on top.
    pub fn extended(&self, name: impl Into<String>, binding: Binding) -> Context {
        Context {
            head: Some(Rc::new(Frame {
                name: name.into(),
                binding,
                rest: self.head.clone(),
            })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The innermost binding of any kind for `name`.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.iter()
            .find(|(bound_name, _)| *bound_name == name)
            .map(|(_, binding)| binding)
    }

    /// The innermost `Subtype` bound for `name`. Bindings of another kind
    /// under the same name are skipped, not treated as a miss.
    pub fn lookup_bound(&self, name: &str) -> Option<&Type> {
        self.iter().find_map(|(bound_name, binding)| match binding {
            Binding::Subtype(bound) if bound_name == name => Some(bound),
            _ => None,
        })
    }

    /// The innermost `Alias` binding for `name`, skipping other kinds.
    pub fn lookup_alias(&self, name: &str) -> Option<&Term> {
        self.iter().find_map(|(bound_name, binding)| match binding {
            Binding::Alias(term) if bound_name == name => Some(term),
            _ => None,
        })
    }

    /// Bindings from innermost to outermost.
    pub fn iter(&self) -> Bindings<'_> {
        Bindings {
            next: self.head.as_deref(),
        }
    }
}

pub struct Bindings<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for Bindings<'a> {
    type Item = (&'a str, &'a Binding);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.rest.as_deref();
        Some((frame.name.as_str(), &frame.binding))
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .format_with(", ", |(name, binding), f| match binding {
                    Binding::Term(ty) => f(&format_args!("{}: {}", name, ty)),
                    Binding::Subtype(bound) => f(&format_args!("{}<:{}", name, bound)),
                    Binding::Alias(term) => f(&format_args!("{} = {}", name, term)),
                })
        )
    }
}
