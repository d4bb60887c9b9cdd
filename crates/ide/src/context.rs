//! Cursor context resolution.
//!
//! Resolves what sits under a byte offset in a parsed region: the token
//! (field name, variable or anything else), the field path from the
//! definition root, and what the schema says about that position.

use apollo_compiler::ast::{
    Argument, Definition, Directive, Document, Field, OperationType, Selection, Type, Value,
};
use apollo_compiler::schema::{ExtendedType, FieldDefinition};
use apollo_compiler::{Name, Node, Schema};
use relay_types::OffsetRange;

use crate::helpers::{name_span, node_span};

/// What the cursor is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorToken {
    /// The name or alias of a field
    Field(Name),
    /// A variable used as an argument value
    Variable(Name),
    Other,
}

#[derive(Debug, Clone)]
pub struct CursorContext {
    /// Index of the definition containing the cursor, or of the first
    /// definition when the cursor is outside all of them.
    pub definition: usize,
    pub token: CursorToken,
    /// Field names from the definition root down to the field at the cursor.
    pub path: Vec<Name>,
    /// Type of the innermost selection set containing the cursor.
    pub parent_type: Option<Name>,
    /// The field whose name or alias is under the cursor.
    pub field: Option<Node<Field>>,
    /// Named type of [`Self::field`].
    pub field_type: Option<Name>,
    /// Type expected where the variable under the cursor is used.
    pub input_type: Option<String>,
    /// Declared type of the argument the variable under the cursor sits in.
    pub argument_type: Option<String>,
}

impl CursorContext {
    /// Resolve the context at `offset` in `document`.
    #[must_use]
    pub fn resolve(document: &Document, schema: &Schema, offset: usize) -> Self {
        let mut context = Self {
            definition: 0,
            token: CursorToken::Other,
            path: Vec::new(),
            parent_type: None,
            field: None,
            field_type: None,
            input_type: None,
            argument_type: None,
        };

        let found = document.definitions.iter().enumerate().find(|(_, definition)| {
            definition_span(definition).is_some_and(|span| span.touches(offset))
        });
        let Some((index, definition)) = found else {
            tracing::debug!(offset, "Cursor is outside every definition");
            return context;
        };
        context.definition = index;

        let mut resolver = Resolver {
            schema,
            offset,
            context,
        };
        match definition {
            Definition::OperationDefinition(operation) => {
                let root = root_type(schema, operation.operation_type);
                resolver.directives(&operation.directives.0);
                resolver.selections(&operation.selection_set, root);
            }
            Definition::FragmentDefinition(fragment) => {
                resolver.directives(&fragment.directives.0);
                resolver.selections(&fragment.selection_set, Some(fragment.type_condition.clone()));
            }
            _ => {}
        }

        if resolver.context.token == CursorToken::Other {
            tracing::debug!(offset, "No field or variable under the cursor");
        }
        resolver.context
    }

    /// Whether the cursor is on a field or its alias.
    #[must_use]
    pub const fn is_on_field(&self) -> bool {
        matches!(self.token, CursorToken::Field(_))
    }
}

fn definition_span(definition: &Definition) -> Option<OffsetRange> {
    match definition {
        Definition::OperationDefinition(operation) => node_span(operation),
        Definition::FragmentDefinition(fragment) => node_span(fragment),
        _ => None,
    }
}

fn root_type(schema: &Schema, operation_type: OperationType) -> Option<Name> {
    schema.root_operation(operation_type).cloned()
}

/// The schema definition of `field_name` on `type_name`.
pub(crate) fn field_definition<'s>(
    schema: &'s Schema,
    type_name: &str,
    field_name: &str,
) -> Option<&'s FieldDefinition> {
    let fields = match schema.types.get(type_name)? {
        ExtendedType::Object(object) => &object.fields,
        ExtendedType::Interface(interface) => &interface.fields,
        _ => return None,
    };
    fields.get(field_name).map(|component| &*component.node)
}

struct Resolver<'a> {
    schema: &'a Schema,
    offset: usize,
    context: CursorContext,
}

impl Resolver<'_> {
    fn touches(&self, span: Option<OffsetRange>) -> bool {
        span.is_some_and(|span| span.touches(self.offset))
    }

    fn selections(&mut self, selections: &[Selection], parent_type: Option<Name>) {
        self.context.parent_type.clone_from(&parent_type);

        for selection in selections {
            match selection {
                Selection::Field(field) if self.touches(node_span(field)) => {
                    self.field(field, parent_type.as_ref());
                    return;
                }
                Selection::InlineFragment(inline) if self.touches(node_span(inline)) => {
                    self.directives(&inline.directives.0);
                    let inline_type = inline.type_condition.clone().or_else(|| parent_type.clone());
                    self.selections(&inline.selection_set, inline_type);
                    return;
                }
                Selection::FragmentSpread(spread) if self.touches(node_span(spread)) => {
                    self.directives(&spread.directives.0);
                    return;
                }
                _ => {}
            }
        }
    }

    fn field(&mut self, field: &Node<Field>, parent_type: Option<&Name>) {
        let definition = parent_type
            .and_then(|parent| field_definition(self.schema, parent.as_str(), field.name.as_str()));
        let field_type = definition.map(|definition| definition.ty.inner_named_type().clone());

        self.context.path.push(field.name.clone());

        let on_name = self.touches(name_span(&field.name))
            || self.touches(field.alias.as_ref().and_then(name_span));
        if on_name {
            self.context.token = CursorToken::Field(field.name.clone());
            self.context.field = Some(field.clone());
            self.context.field_type = field_type;
            return;
        }

        if self.arguments(&field.arguments, |name| {
            definition
                .and_then(|definition| definition.arguments.iter().find(|arg| arg.name == *name))
                .map(|argument| (*argument.ty).clone())
        }) {
            return;
        }
        if self.directives(&field.directives.0) {
            return;
        }

        self.selections(&field.selection_set, field_type);
    }

    /// Resolve a variable inside one of `directives`' arguments.
    fn directives(&mut self, directives: &[Node<Directive>]) -> bool {
        let schema = self.schema;
        directives.iter().any(|directive| {
            self.touches(node_span(directive))
                && self.arguments(&directive.arguments, |name| {
                    schema
                        .directive_definitions
                        .get(&directive.name)
                        .and_then(|definition| {
                            definition.arguments.iter().find(|arg| arg.name == *name)
                        })
                        .map(|argument| (*argument.ty).clone())
                })
        })
    }

    /// Resolve a variable inside one of `arguments`. `argument_type` looks up
    /// the declared type of an argument by name.
    fn arguments(
        &mut self,
        arguments: &[Node<Argument>],
        argument_type: impl Fn(&Name) -> Option<Type>,
    ) -> bool {
        for argument in arguments {
            if !self.touches(node_span(argument)) {
                continue;
            }
            let declared = argument_type(&argument.name);
            if let Some((variable, expected)) = self.value(&argument.value, declared.as_ref()) {
                self.context.token = CursorToken::Variable(variable);
                self.context.input_type = expected.map(|ty| ty.to_string());
                self.context.argument_type = declared.map(|ty| ty.to_string());
                return true;
            }
        }
        false
    }

    /// Find the variable under the cursor in `value`, with the type expected
    /// at its position.
    fn value(&self, value: &Node<Value>, expected: Option<&Type>) -> Option<(Name, Option<Type>)> {
        if !self.touches(node_span(value)) {
            return None;
        }
        match &**value {
            Value::Variable(name) => Some((name.clone(), expected.cloned())),
            Value::List(items) => {
                let item_type = match expected {
                    Some(Type::List(inner) | Type::NonNullList(inner)) => Some(inner.as_ref()),
                    _ => None,
                };
                items.iter().find_map(|item| self.value(item, item_type))
            }
            Value::Object(fields) => {
                let named = expected.and_then(|ty| self.schema.types.get(ty.inner_named_type()));
                let input_object = match named {
                    Some(ExtendedType::InputObject(input_object)) => Some(input_object),
                    _ => None,
                };
                fields.iter().find_map(|(name, field_value)| {
                    let field_type = input_object
                        .and_then(|input_object| input_object.fields.get(name))
                        .map(|field| &*field.ty);
                    self.value(field_value, field_type)
                })
            }
            _ => None,
        }
    }
}
