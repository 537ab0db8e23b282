//! Free type variables and capture-avoiding substitution.

use std::collections::HashSet;

use crate::ast::Type;

impl Type {
    /// The set of variable names occurring free in `self`. A quantifier
    /// binds its generic inside the body but not inside its own bound.
    pub fn free_vars(&self) -> HashSet<String> {
        match self {
            Type::Var(name, _) => HashSet::from([name.clone()]),
            Type::Arrow(domain, result) => {
                let mut names = domain.free_vars();
                names.extend(result.free_vars());
                names
            }
            Type::Forall(generic, bound, body) => {
                let mut names = body.free_vars();
                names.remove(generic);
                names.extend(bound.free_vars());
                names
            }
            Type::Union(members) | Type::Inter(members) => {
                let mut names = HashSet::new();
                for member in members {
                    names.extend(member.free_vars());
                }
                names
            }
            Type::Record(fields) => {
                let mut names = HashSet::new();
                for field_type in fields.values() {
                    names.extend(field_type.free_vars());
                }
                names
            }
            Type::Top | Type::Bottom | Type::Bool | Type::Nat => HashSet::new(),
        }
    }

    /// Replaces free occurrences of `name` with `replacement`. A quantifier
    /// whose generic would capture a free variable of `replacement` is
    /// alpha-renamed to a fresh name first.
    pub fn substitute(&self, name: &str, replacement: &Type) -> Type {
        match self {
            Type::Var(own_name, _) => {
                if own_name == name {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Type::Arrow(domain, result) => Type::Arrow(
                Box::new(domain.substitute(name, replacement)),
                Box::new(result.substitute(name, replacement)),
            ),
            Type::Forall(generic, bound, body) => {
                if generic == name {
                    // the binder shadows `name`, nothing below is free
                    return self.clone();
                }
                if replacement.free_vars().contains(generic.as_str()) {
                    let mut excluded = replacement.free_vars();
                    excluded.extend(body.free_vars());
                    let renamed = fresh_name(&excluded);
                    let renamed_body =
                        body.substitute(generic, &Type::Var(renamed.clone(), true));
                    Type::Forall(
                        renamed,
                        Box::new(bound.substitute(name, replacement)),
                        Box::new(renamed_body.substitute(name, replacement)),
                    )
                } else {
                    Type::Forall(
                        generic.clone(),
                        Box::new(bound.substitute(name, replacement)),
                        Box::new(body.substitute(name, replacement)),
                    )
                }
            }
            Type::Union(members) => Type::Union(
                members
                    .iter()
                    .map(|member| member.substitute(name, replacement))
                    .collect(),
            ),
            Type::Inter(members) => Type::Inter(
                members
                    .iter()
                    .map(|member| member.substitute(name, replacement))
                    .collect(),
            ),
            Type::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(label, field_type)| {
                        (label.clone(), field_type.substitute(name, replacement))
                    })
                    .collect(),
            ),
            Type::Top | Type::Bottom | Type::Bool | Type::Nat => self.clone(),
        }
    }
}

/// The first name in the sequence `X0, X1, …` not present in `excluded`.
pub fn fresh_name(excluded: &HashSet<String>) -> String {
    let mut counter: usize = 0;
    loop {
        let candidate = format!("X{}", counter);
        if !excluded.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
