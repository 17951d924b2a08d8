//! First resolution pass: attach bindings to variables and bound paths.

use log::debug;
use ruleprobe_core::ResolutionError;

use crate::bindings::BindingLookup;
use crate::expr::{Expr, FieldExpr, FieldTarget, Variable, prefix_span, wrap_fields};

type Result<T> = std::result::Result<T, ResolutionError>;

/// Resolves names against the rule's bindings.
///
/// A path whose first segment is bound becomes an instance-field chain rooted
/// at that binding, even when a class of the same name exists. Any other
/// path is left for the type checker.
pub struct Binder<'b> {
    bindings: &'b dyn BindingLookup,
}

impl<'b> Binder<'b> {
    pub fn new(bindings: &'b dyn BindingLookup) -> Self {
        Self { bindings }
    }

    /// Bind an expression used as a value.
    ///
    /// Repeating the call within one preparation pass is harmless.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn bind(&self, expr: &mut Expr) -> Result<()> {
        match expr {
            Expr::Variable(variable) => self.bind_variable(variable),
            Expr::Field(field) => self.bind_field(field),
            Expr::StaticField(_) => Ok(()),
        }
    }

    /// Bind an expression used as an assignment target.
    ///
    /// Storing to a field never introduces or updates a binding, so this is
    /// the same as [`Binder::bind`].
    pub fn bind_assign(&self, expr: &mut Expr) -> Result<()> {
        self.bind(expr)
    }

    fn bind_variable(&self, variable: &mut Variable) -> Result<()> {
        let binding = self.bindings.lookup(variable.name()).ok_or_else(|| {
            ResolutionError::UnknownVariable {
                name: variable.name().to_string(),
                span: variable.span(),
            }
        })?;
        variable.bind_to(binding);
        Ok(())
    }

    fn bind_field(&self, field: &mut FieldExpr) -> Result<()> {
        let path = match field.target_mut() {
            FieldTarget::Owner(owner) => return self.bind(owner),
            FieldTarget::Static(_) => return Ok(()),
            FieldTarget::Path(path) => path,
        };

        let bound_root = path.first().is_some_and(|root| self.bindings.is_bound(root));
        if !bound_root {
            return Ok(());
        }

        let path = path.clone();
        let span = field.span();
        let root = Expr::Variable(Variable::new(path[0].clone(), prefix_span(span, &path, 1)));
        let mut owner = wrap_fields(root, &path, 1, span);
        self.bind(&mut owner)?;

        debug!("bound '{}' as instance chain of '{}'", owner, path[0]);
        field.restructure(FieldTarget::Owner(Box::new(owner)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use ruleprobe_core::{ObjectType, Span, Type};

    fn bindings() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.declare("a", Type::Object(ObjectType::root("x.A")));
        bindings.declare("n", Type::INT);
        bindings
    }

    fn parse(text: &str) -> Expr {
        Expr::parse_path(text, Span::new(1, 1, text.len() as u32)).unwrap()
    }

    #[test]
    fn variable_gets_binding_slot() {
        let bindings = bindings();
        let mut expr = parse("n");
        Binder::new(&bindings).bind(&mut expr).unwrap();
        let Expr::Variable(variable) = &expr else {
            panic!("expected variable");
        };
        assert_eq!(variable.slot(), Some(1));
        assert_eq!(variable.ty(), &Type::INT);
    }

    #[test]
    fn unknown_variable_errors() {
        let bindings = bindings();
        let mut expr = parse("missing");
        let err = Binder::new(&bindings).bind(&mut expr).unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownVariable { .. }));
    }

    #[test]
    fn bound_root_becomes_owner_chain() {
        let bindings = bindings();
        let mut expr = parse("a.b.c");
        Binder::new(&bindings).bind(&mut expr).unwrap();

        let Expr::Field(field) = &expr else {
            panic!("expected field");
        };
        assert!(field.path().is_none());
        assert_eq!(field.field_name(), "c");
        let owner = field.owner().unwrap();
        assert_eq!(owner.to_string(), "a.b");
        assert_eq!(owner.span(), Span::new(1, 1, 3));
        assert_eq!(expr.to_string(), "a.b.c");
    }

    #[test]
    fn unbound_root_is_deferred() {
        let bindings = bindings();
        let mut expr = parse("com.acme.Config.VERSION");
        Binder::new(&bindings).bind(&mut expr).unwrap();
        let Expr::Field(field) = &expr else {
            panic!("expected field");
        };
        assert_eq!(field.path().map(<[String]>::len), Some(3));
    }

    #[test]
    fn bind_is_idempotent() {
        let bindings = bindings();
        let binder = Binder::new(&bindings);
        let mut expr = parse("a.b");
        binder.bind(&mut expr).unwrap();
        let once = expr.clone();
        binder.bind_assign(&mut expr).unwrap();
        assert_eq!(expr, once);
    }
}
