//! Type names, record declarations and `new` expressions.

use std::sync::Arc;

use serein_diagnostic::ErrorCode;
use serein_ir::{FieldRange, Name, NodeId, NodeKind, NodeRange, ScriptType, Span};
use serein_runtime::{RecordField, RecordLayout, TypeDescriptor};

use super::{describe_args, Checker};
use crate::TypeError;

impl Checker<'_> {
    /// Resolve a written type name.
    ///
    /// Order: `[]` suffixes, primitive aliases, the enclosing record
    /// (`self_name`), registered types, then `using`-qualified names.
    pub(super) fn resolve_type(
        &self,
        name: &str,
        self_name: Option<&str>,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        if let Some(element) = name.strip_suffix("[]") {
            return Ok(ScriptType::array(self.resolve_type(element, self_name, span)?));
        }
        if let Some(ty) = ScriptType::primitive(name) {
            return Ok(ty);
        }
        if self_name == Some(name) || self.registries.types.contains(name) {
            return Ok(ScriptType::named(name));
        }
        for namespace in self.usings.iter().rev() {
            let qualified = format!("{namespace}.{name}");
            if self.registries.types.contains(&qualified) {
                return Ok(ScriptType::Named(Arc::from(qualified)));
            }
        }
        Err(self.error(ErrorCode::E2007, format!("unknown type `{name}`"), span))
    }

    /// `class Name { ... }`: declare the record; an existing name is kept.
    pub(super) fn infer_class(
        &mut self,
        name: Name,
        fields: FieldRange,
    ) -> Result<ScriptType, TypeError> {
        let program = self.program;
        let class_name = program.name(name);
        let mut layout_fields = Vec::new();
        for field in program.arena().get_fields(fields) {
            let type_name = match program.arena().kind(field.ty) {
                NodeKind::TypeNode { name } => program.name(*name),
                _ => return Err(self.error(ErrorCode::E2007, "expected a type name", field.span)),
            };
            let ty = self.resolve_type(type_name, Some(class_name), field.span)?;
            self.record(field.ty, ty.clone());
            layout_fields.push(RecordField {
                name: Arc::from(program.name(field.name)),
                ty,
            });
        }
        if !self
            .registries
            .types
            .declare_record(RecordLayout::new(class_name, layout_fields))
        {
            tracing::debug!(
                class = class_name,
                "type name already registered, declaration skipped"
            );
        }
        Ok(ScriptType::Void)
    }

    /// `new T(args) { Member = value, ... }`
    pub(super) fn infer_instantiation(
        &mut self,
        ty: NodeId,
        args: NodeRange,
        initializers: NodeRange,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let target = self.infer(ty)?;
        let arg_ids = self.list(args);
        let arg_types = self.infer_all(arg_ids)?;

        let descriptor = match &target {
            ScriptType::Named(name) => self.registries.types.get(name),
            _ => None,
        };
        match descriptor {
            Some(TypeDescriptor::Record(_)) if !arg_types.is_empty() => {
                return Err(self.error(
                    ErrorCode::E2010,
                    format!("record type `{target}` takes no constructor arguments"),
                    span,
                ));
            }
            Some(TypeDescriptor::Record(_)) => {}
            Some(TypeDescriptor::External(external)) => {
                if external.resolve_constructor(&arg_types).is_none() {
                    return Err(self.error(
                        ErrorCode::E2010,
                        format!(
                            "no constructor of `{target}` accepts {}",
                            describe_args(&arg_types)
                        ),
                        span,
                    ));
                }
            }
            None => {
                return Err(self.error(
                    ErrorCode::E2010,
                    format!("type `{target}` cannot be created with `new`"),
                    span,
                ));
            }
        }

        for &init in self.list(initializers) {
            self.infer(init)?;
        }
        Ok(target)
    }
}
