use log::debug;
use ruleprobe_core::{ResolutionError, Span, Type};

use super::{Result, TypeChecker, path};
use crate::bind::Binder;
use crate::expr::{Expr, FieldExpr, FieldTarget, ResolvedField, StaticFieldExpr, wrap_fields};

pub(super) fn check_field(
    checker: &TypeChecker<'_>,
    field: &mut FieldExpr,
    expected: &Type,
) -> Result<Type> {
    let span = field.span();

    if let Some(resolved) = field.resolved() {
        let ty = resolved.ty.dereference().clone();
        checker.expect(&*field, &ty, expected, span)?;
        return Ok(ty);
    }

    if let Some(segments) = field.path() {
        let segments = segments.to_vec();
        resolve_path(checker, field, segments)?;
    }

    let name = field.field_name().to_string();
    let resolved = match field.target_mut() {
        FieldTarget::Static(target) => {
            checker.check_static(target, expected)?;
            target.resolved().cloned()
        }
        FieldTarget::Owner(owner) => Some(resolve_instance(checker, owner, name, span)?),
        FieldTarget::Path(_) => None,
    };
    let Some(resolved) = resolved else {
        return Err(ResolutionError::InvalidPath {
            path: field.path_text(usize::MAX),
            field: field.field_name().to_string(),
            span,
        });
    };

    let ty = resolved.ty.dereference().clone();
    field.set_resolved(resolved);
    checker.expect(&*field, &ty, expected, span)?;
    Ok(ty)
}

/// Rebuild an unbound path from the longest type name it starts with.
fn resolve_path(
    checker: &TypeChecker<'_>,
    field: &mut FieldExpr,
    segments: Vec<String>,
) -> Result<()> {
    let span = field.span();
    let matched = checker.universe.match_path(&segments);
    let Some(object) = matched.as_ref().and_then(Type::as_object) else {
        return Err(ResolutionError::InvalidPath {
            path: field.path_text(segments.len()),
            field: field.field_name().to_string(),
            span,
        });
    };

    let type_name = object.name.clone();
    let consumed = path::consumed_segments(&segments, &type_name).ok_or_else(|| {
        ResolutionError::PathMismatch {
            path: field.path_text(segments.len()),
            type_name: type_name.to_string(),
            span,
        }
    })?;

    if consumed < segments.len() {
        // Static field of the matched type, then instance fields for the rest.
        let static_span = field.segments_span(consumed + 1);
        let root = Expr::StaticField(StaticFieldExpr::new(
            type_name,
            segments[consumed].clone(),
            static_span,
        ));
        let mut owner = wrap_fields(root, &segments, consumed + 1, span);
        Binder::new(checker.bindings).bind(&mut owner)?;

        debug!(
            "resolved '{}' as static chain '{}.{}'",
            field,
            owner,
            field.field_name()
        );
        field.restructure(FieldTarget::Owner(Box::new(owner)));
    } else {
        let target = StaticFieldExpr::new(type_name, field.field_name().to_string(), span);
        debug!("resolved '{field}' as static field of {}", target.owner_type());
        field.restructure(FieldTarget::Static(Box::new(target)));
    }
    Ok(())
}

fn resolve_instance(
    checker: &TypeChecker<'_>,
    owner: &mut Expr,
    name: String,
    span: Span,
) -> Result<ResolvedField> {
    let owner_type = checker.check(owner, &Type::Undefined)?;
    let owner_type = owner_type.dereference();
    if owner_type.is_undefined() {
        return Err(ResolutionError::UnboundOwner { field: name, span });
    }
    let Some(object) = owner_type.as_object() else {
        return Err(ResolutionError::NotAnObject {
            field: name,
            type_name: owner_type.to_string(),
            span,
        });
    };

    let Some(field) = checker.universe.lookup_field(object, &name) else {
        return Err(ResolutionError::UnknownField {
            field: name,
            type_name: object.name.to_string(),
            span,
        });
    };
    if field.is_static() {
        return Err(ResolutionError::StaticThroughInstance {
            field: name,
            type_name: object.name.to_string(),
            span,
        });
    }

    let ty = checker.universe.ensure_type(&field.value_class);
    Ok(ResolvedField { field, ty })
}
