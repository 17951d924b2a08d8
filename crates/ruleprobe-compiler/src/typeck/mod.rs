//! Type checking of rule expressions.
//!
//! Type checking is the only pass that restructures a field expression:
//! a path left unbound by the [`crate::bind::Binder`] is matched against the
//! type universe and rebuilt as a static field access, optionally followed by
//! instance fields. Every node then records its resolved field and type.

mod field;
mod path;

use ruleprobe_core::{ResolutionError, Span, Type, TypeDescriptor, TypeUniverse};
use std::fmt::Display;

use crate::bindings::BindingLookup;
use crate::expr::{Expr, ResolvedField, StaticFieldExpr, Variable};

type Result<T> = std::result::Result<T, ResolutionError>;

/// Resolves expression types against a type universe.
pub struct TypeChecker<'a> {
    universe: &'a dyn TypeUniverse,
    bindings: &'a dyn BindingLookup,
}

impl<'a> TypeChecker<'a> {
    pub fn new(universe: &'a dyn TypeUniverse, bindings: &'a dyn BindingLookup) -> Self {
        Self { universe, bindings }
    }

    /// Check `expr` and return its type.
    ///
    /// `expected` is the type the context requires, or [`Type::Undefined`]
    /// when any type will do. A defined expectation the result cannot be
    /// assigned to is an error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn check(&self, expr: &mut Expr, expected: &Type) -> Result<Type> {
        match expr {
            Expr::Variable(variable) => self.check_variable(variable, expected),
            Expr::Field(target) => field::check_field(self, target, expected),
            Expr::StaticField(target) => self.check_static(target, expected),
        }
    }

    fn check_variable(&self, variable: &mut Variable, expected: &Type) -> Result<Type> {
        if variable.slot().is_none() {
            let binding = self.bindings.lookup(variable.name()).ok_or_else(|| {
                ResolutionError::UnknownVariable {
                    name: variable.name().to_string(),
                    span: variable.span(),
                }
            })?;
            variable.bind_to(binding);
        }
        let ty = variable.ty().clone();
        self.expect(&*variable, &ty, expected, variable.span())?;
        Ok(ty)
    }

    fn check_static(&self, target: &mut StaticFieldExpr, expected: &Type) -> Result<Type> {
        if let Some(resolved) = target.resolved() {
            let ty = resolved.ty.dereference().clone();
            self.expect(&*target, &ty, expected, target.span())?;
            return Ok(ty);
        }

        let span = target.span();
        let owner = self
            .universe
            .ensure_type(&TypeDescriptor::Class(target.owner_type().clone()));
        let Some(object) = owner.as_object() else {
            return Err(ResolutionError::UnboundOwner {
                field: target.field_name().to_string(),
                span,
            });
        };

        let field = self
            .universe
            .lookup_field(object, target.field_name())
            .ok_or_else(|| ResolutionError::UnknownField {
                field: target.field_name().to_string(),
                type_name: object.name.to_string(),
                span,
            })?;
        if !field.is_static() {
            return Err(ResolutionError::NotStatic {
                field: field.name,
                type_name: object.name.to_string(),
                span,
            });
        }

        let ty = self.universe.ensure_type(&field.value_class);
        target.set_resolved(ResolvedField {
            field,
            ty: ty.clone(),
        });
        let ty = ty.dereference().clone();
        self.expect(&*target, &ty, expected, span)?;
        Ok(ty)
    }

    /// Fail when a defined `expected` type cannot hold a value of type `found`.
    fn expect(&self, text: &dyn Display, found: &Type, expected: &Type, span: Span) -> Result<()> {
        let expected = expected.dereference();
        if expected.is_defined() && !expected.is_assignable_from(found) {
            return Err(ResolutionError::TypeMismatch {
                text: text.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
                span,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use ruleprobe_core::{FieldFlags, TypeName, Value};
    use ruleprobe_registry::{ClassEntry, TypeRegistry};

    pub(super) fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                ClassEntry::new("com.acme.Config")
                    .static_field("VERSION", TypeDescriptor::INT, Value::Int(3))
                    .flagged(FieldFlags::FINAL)
                    .static_field(
                        "DEFAULT",
                        TypeDescriptor::class("com.acme.Config"),
                        Value::Null,
                    )
                    .field("count", TypeDescriptor::LONG)
                    .field("parent", TypeDescriptor::class("com.acme.Config")),
            )
            .unwrap();
        registry
    }

    fn parse(text: &str) -> Expr {
        Expr::parse_path(text, Span::new(1, 1, text.len() as u32)).unwrap()
    }

    #[test]
    fn static_field_node_resolves() {
        let registry = registry();
        let bindings = Bindings::new();
        let checker = TypeChecker::new(&registry, &bindings);
        let mut expr = Expr::StaticField(StaticFieldExpr::new(
            TypeName::new("com.acme.Config"),
            "VERSION",
            Span::point(1, 1),
        ));
        assert_eq!(checker.check(&mut expr, &Type::Undefined), Ok(Type::INT));
        assert!(expr.is_resolved());
        // A repeat check uses the cached result.
        assert_eq!(checker.check(&mut expr, &Type::LONG), Ok(Type::INT));
    }

    #[test]
    fn instance_field_named_statically_is_rejected() {
        let registry = registry();
        let bindings = Bindings::new();
        let checker = TypeChecker::new(&registry, &bindings);
        let mut expr = parse("com.acme.Config.count");
        let err = checker.check(&mut expr, &Type::Undefined).unwrap_err();
        assert!(matches!(err, ResolutionError::NotStatic { .. }));
    }

    #[test]
    fn variable_is_checked_against_expectation() {
        let registry = registry();
        let mut bindings = Bindings::new();
        bindings.declare("n", Type::LONG);
        let checker = TypeChecker::new(&registry, &bindings);

        let mut expr = parse("n");
        assert_eq!(checker.check(&mut expr, &Type::DOUBLE), Ok(Type::LONG));
        let err = checker.check(&mut expr, &Type::INT).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::TypeMismatch {
                text: "n".into(),
                expected: "int".into(),
                found: "long".into(),
                span: Span::new(1, 1, 1),
            }
        );
    }

    #[test]
    fn unknown_variable_in_checker() {
        let registry = registry();
        let bindings = Bindings::new();
        let checker = TypeChecker::new(&registry, &bindings);
        let mut expr = parse("ghost");
        assert!(matches!(
            checker.check(&mut expr, &Type::Undefined),
            Err(ResolutionError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn alias_expectation_is_dereferenced() {
        let registry = registry();
        let bindings = Bindings::new();
        let checker = TypeChecker::new(&registry, &bindings);
        let mut expr = parse("com.acme.Config.VERSION");
        let expected = Type::alias("version_t", Type::LONG);
        assert_eq!(checker.check(&mut expr, &expected), Ok(Type::INT));
    }
}
