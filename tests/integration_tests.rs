use system_fsub::{
    evaluate, is_subtype, type_of, Binding, Context, EvalError, Term, Type, TypeError,
};

fn var(name: &str) -> Type {
    Type::Var(name.to_string(), true)
}

fn arrow(domain: Type, result: Type) -> Type {
    Type::Arrow(Box::new(domain), Box::new(result))
}

fn forall(generic: &str, bound: Type, body: Type) -> Type {
    Type::Forall(generic.to_string(), Box::new(bound), Box::new(body))
}

fn record_type(fields: &[(&str, Type)]) -> Type {
    Type::Record(
        fields
            .iter()
            .map(|(label, ty)| (label.to_string(), ty.clone()))
            .collect(),
    )
}

fn record_term(fields: &[(&str, Term)]) -> Term {
    Term::Record(
        fields
            .iter()
            .map(|(label, term)| (label.to_string(), term.clone()))
            .collect(),
    )
}

fn term_var(name: &str) -> Term {
    Term::Var(name.to_string())
}

fn abs(param: &str, param_type: Type, body: Term) -> Term {
    Term::Abs(param.to_string(), param_type, Box::new(body))
}

fn tabs(generic: &str, bound: Type, body: Term) -> Term {
    Term::TAbs(generic.to_string(), bound, Box::new(body))
}

fn app(func: Term, arg: Term) -> Term {
    Term::App(Box::new(func), Box::new(arg))
}

fn tapp(func: Term, type_arg: Type) -> Term {
    Term::TApp(Box::new(func), type_arg)
}

fn subtype_of(left: Term, right: Term) -> Term {
    Term::SubtypeOf(Box::new(left), Box::new(right))
}

mod record_queries {
    use super::*;

    #[test]
    fn a_record_query_picks_the_then_branch() {
        let ctx = Context::new().extended("T", Binding::Alias(Term::Bool(false)));
        let shape = record_term(&[("a", Term::Bool(true))]);
        let query = Term::If(
            Box::new(subtype_of(shape, Term::Any)),
            Box::new(Term::Nat(114514)),
            Box::new(Term::Nat(45234523452345)),
        );

        assert_eq!(evaluate(&ctx, &query), Ok(Term::Nat(114514)));
    }

    #[test]
    fn an_aliased_guard_drives_the_conditional() {
        let ctx = Context::new().extended("T", Binding::Alias(Term::Bool(false)));
        let query = Term::If(
            Box::new(term_var("T")),
            Box::new(Term::Nat(1)),
            Box::new(Term::Nat(2)),
        );

        assert_eq!(evaluate(&ctx, &query), Ok(Term::Nat(2)));
    }

    #[test]
    fn record_subsumption_is_visible_to_queries() {
        let ctx = Context::new();
        let wide = record_term(&[("a", Term::Nat(1)), ("b", Term::Bool(true))]);
        let narrow = record_term(&[("a", Term::Nat(0))]);

        assert_eq!(
            evaluate(&ctx, &subtype_of(wide.clone(), narrow.clone())),
            Ok(Term::Bool(true))
        );
        assert_eq!(
            evaluate(&ctx, &subtype_of(narrow, wide)),
            Ok(Term::Bool(false))
        );
    }

    #[test]
    fn unanswerable_operands_surface_as_typed_errors() {
        let query = subtype_of(Term::Seq(vec![Term::Nat(1)]), Term::Any);
        assert!(matches!(
            evaluate(&Context::new(), &query),
            Err(EvalError::Type(TypeError::NoRuleApplies { .. }))
        ));
    }
}

mod polymorphic_programs {
    use super::*;

    fn church_zero() -> Term {
        tabs(
            "X",
            Type::Top,
            tabs(
                "S",
                var("X"),
                tabs(
                    "Z",
                    var("X"),
                    abs(
                        "x",
                        arrow(var("X"), var("S")),
                        abs("z", var("Z"), term_var("z")),
                    ),
                ),
            ),
        )
    }

    #[test]
    fn church_zero_has_the_expected_quantified_type() {
        let expected = forall(
            "X",
            Type::Top,
            forall(
                "S",
                var("X"),
                forall(
                    "Z",
                    var("X"),
                    arrow(arrow(var("X"), var("S")), arrow(var("Z"), var("Z"))),
                ),
            ),
        );
        assert_eq!(type_of(&Context::new(), &church_zero()), Ok(expected));
    }

    #[test]
    fn church_zero_instantiates_one_bound_at_a_time() {
        let fully_applied = tapp(tapp(tapp(church_zero(), Type::Nat), Type::Nat), Type::Nat);
        let nat_to_nat = arrow(Type::Nat, Type::Nat);

        assert_eq!(
            type_of(&Context::new(), &fully_applied),
            Ok(arrow(nat_to_nat.clone(), nat_to_nat))
        );
    }

    #[test]
    fn instantiation_outside_the_bound_is_rejected() {
        // S must stay below X = nat, bool does not
        let partially = tapp(church_zero(), Type::Nat);
        let too_wide = tapp(partially, Type::Bool);

        assert_eq!(
            type_of(&Context::new(), &too_wide),
            Err(TypeError::Mismatch {
                expected: Type::Nat,
                actual: Type::Bool
            })
        );
    }

    #[test]
    fn instantiation_renames_binders_that_would_capture() {
        let inner = forall("Y", Type::Top, arrow(var("X"), var("Y")));
        let term = tapp(
            tabs("X", Type::Top, abs("f", inner.clone(), term_var("f"))),
            var("Y"),
        );

        let renamed = forall("X0", Type::Top, arrow(var("Y"), var("X0")));
        assert_eq!(
            type_of(&Context::new(), &term),
            Ok(arrow(renamed.clone(), renamed))
        );
    }

    #[test]
    fn polymorphic_identity_applies_at_a_record_type() {
        let identity = tabs("X", Type::Top, abs("x", var("X"), term_var("x")));
        let point = record_type(&[("x", Type::Nat), ("y", Type::Nat)]);
        let term = app(
            tapp(identity, point.clone()),
            record_term(&[("x", Term::Nat(3)), ("y", Term::Nat(4))]),
        );

        assert_eq!(type_of(&Context::new(), &term), Ok(point));
    }
}

mod subsumption_chains {
    use super::*;

    #[test]
    fn application_widens_record_arguments() {
        let project = abs(
            "r",
            record_type(&[("a", Type::Nat)]),
            term_var("r"),
        );
        let argument = record_term(&[("a", Term::Nat(1)), ("b", Term::Bool(true))]);

        assert_eq!(
            type_of(&Context::new(), &app(project, argument)),
            Ok(record_type(&[("a", Type::Nat)]))
        );
    }

    #[test]
    fn bounded_variables_promote_through_application() {
        let ctx = Context::new()
            .extended("F", Binding::Subtype(arrow(Type::Top, Type::Bool)))
            .extended("f", Binding::Term(var("F")));

        let term = app(term_var("f"), Term::Nat(0));
        assert_eq!(type_of(&ctx, &term), Ok(Type::Bool));
    }

    #[test]
    fn each_branch_type_flows_into_the_conditional_union() {
        let branchy = Term::If(
            Box::new(Term::Bool(true)),
            Box::new(Term::Nat(1)),
            Box::new(Term::Bool(false)),
        );
        let branchy_type = type_of(&Context::new(), &branchy).unwrap();

        let ctx = Context::new();
        assert!(is_subtype(&ctx, &Type::Nat, &branchy_type));
        assert!(is_subtype(&ctx, &Type::Bool, &branchy_type));
        assert!(!is_subtype(&ctx, &branchy_type, &Type::Nat));
    }

    #[test]
    fn inner_declarations_shadow_outer_ones() {
        let reuse = abs(
            "x",
            Type::Bool,
            abs("x", Type::Nat, Term::IsZero(Box::new(term_var("x")))),
        );
        assert_eq!(
            type_of(&Context::new(), &reuse),
            Ok(arrow(Type::Bool, arrow(Type::Nat, Type::Bool)))
        );

        let shadowed_wrong_way = abs(
            "x",
            Type::Nat,
            abs("x", Type::Bool, Term::IsZero(Box::new(term_var("x")))),
        );
        assert!(matches!(
            type_of(&Context::new(), &shadowed_wrong_way),
            Err(TypeError::Mismatch { .. })
        ));
    }

    #[test]
    fn fixpoints_close_recursive_record_processors() {
        let stepper = abs(
            "r",
            record_type(&[("count", Type::Nat)]),
            term_var("r"),
        );
        assert_eq!(
            type_of(&Context::new(), &Term::Fix(Box::new(stepper))),
            Ok(record_type(&[("count", Type::Nat)]))
        );
    }
}

mod query_evaluation {
    use super::*;

    #[test]
    fn equality_sees_through_aliases() {
        let ctx = Context::new()
            .extended("lhs", Binding::Alias(Term::Nat(10)))
            .extended("rhs", Binding::Alias(Term::Nat(10)));
        let query = Term::Equals(Box::new(term_var("lhs")), Box::new(term_var("rhs")));

        assert_eq!(evaluate(&ctx, &query), Ok(Term::Bool(true)));
    }

    #[test]
    fn nested_queries_reduce_from_the_inside_out() {
        let inner = subtype_of(Term::Never, Term::Nat(0));
        let query = Term::If(
            Box::new(inner),
            Box::new(term_var("missing")),
            Box::new(subtype_of(Term::Nat(1), Term::Any)),
        );

        // never is not below nat, so the guard is false and the unbound
        // variable in the then-branch never runs
        assert_eq!(evaluate(&Context::new(), &query), Ok(Term::Bool(true)));
    }

    #[test]
    fn evaluated_unions_keep_member_order() {
        let ctx = Context::new().extended("n", Binding::Alias(Term::Nat(2)));
        let term = Term::Union(vec![Term::Bool(true), term_var("n")]);

        assert_eq!(
            evaluate(&ctx, &term),
            Ok(Term::Union(vec![Term::Bool(true), Term::Nat(2)]))
        );
    }

    #[test]
    fn alias_lookup_failures_name_the_variable() {
        let error = evaluate(&Context::new(), &term_var("ghost")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "cannot find binding `ghost` in the current context"
        );
    }
}
