//! Refactor code actions.
//!
//! Every action is computed against the GraphQL region under the start of
//! the selection. Actions that apply directly carry one edit replacing that
//! whole region with the rewritten document.

use apollo_compiler::ast::{Definition, Field, FragmentDefinition, OperationDefinition};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{name, Name, Node, Schema};
use relay_extract::{normalize_selection, select_operation_at, GraphQLSource, RegionLocator};
use relay_types::OffsetRange;

use crate::context::{field_definition, CursorContext, CursorToken};
use crate::extract_fragment::extract_fragment_action;
use crate::helpers::{node_span, parse_document, same_span};
use crate::mutators::{
    add_directive, build_argument_definition_variable, build_variable_definition,
    first_display_field, has_directive, has_directive_with, has_variable, make_boolean_argument,
    make_field, make_inline_fragment, make_string_argument, make_variable_argument,
    merge_arguments,
};
use crate::printer::replacement_edit;
use crate::rewrite::{rewrite_document, OnField, OnFragment, OnOperation, Rewriter};
use crate::{ActionRequest, CodeAction};

/// Refactor actions available at `request.selection`.
///
/// Without a schema, outside any GraphQL region or when the region does not
/// parse, nothing is offered.
#[must_use]
pub fn code_actions(request: &ActionRequest<'_>, schema: Option<&Schema>) -> Vec<CodeAction> {
    let Some(schema) = schema else {
        tracing::debug!("No schema loaded, skipping code actions");
        return Vec::new();
    };

    let selection = request.selection.ordered();
    let Some(source) = select_operation_at(request.language_id, request.text, selection.start)
    else {
        tracing::debug!(language_id = request.language_id, "No GraphQL region at the selection");
        return Vec::new();
    };
    let content = source.content();
    let Some(document) = parse_document(content) else {
        return Vec::new();
    };

    let (start, end) = normalize_selection(selection, &source);
    let Some(offset) = RegionLocator::new(content).offset(start) else {
        tracing::debug!(?start, "Selection start is outside the region");
        return Vec::new();
    };
    let context = CursorContext::resolve(&document, schema, offset);

    let engine = Engine {
        schema,
        module_name: request.module_name,
        source: &source,
        document: &document,
        context: &context,
    };

    let mut actions = Vec::new();
    actions.extend(engine.add_operation_variable());
    if !selection.is_empty() {
        actions.extend(extract_fragment_action(&document, schema, content, start, end));
    }
    actions.extend(engine.add_pagination());
    actions.extend(engine.mark_test_operation());
    actions.extend(engine.expand_union());
    actions.extend(engine.fragment_actions());

    tracing::debug!(count = actions.len(), "Computed code actions");
    actions
}

struct Engine<'a> {
    schema: &'a Schema,
    module_name: &'a str,
    source: &'a GraphQLSource,
    document: &'a apollo_compiler::ast::Document,
    context: &'a CursorContext,
}

impl Engine<'_> {
    fn enclosing_operation(&self) -> Option<&Node<OperationDefinition>> {
        match self.document.definitions.get(self.context.definition)? {
            Definition::OperationDefinition(operation) => Some(operation),
            _ => None,
        }
    }

    fn enclosing_fragment(&self) -> Option<&Node<FragmentDefinition>> {
        match self.document.definitions.get(self.context.definition)? {
            Definition::FragmentDefinition(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// The region's first definition, when it is a fragment.
    fn first_fragment(&self) -> Option<&Node<FragmentDefinition>> {
        match self.document.definitions.first()? {
            Definition::FragmentDefinition(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// The field under the cursor with its named type.
    fn cursor_field(&self) -> Option<(&Node<Field>, &ExtendedType)> {
        if !self.context.is_on_field() {
            return None;
        }
        let field = self.context.field.as_ref()?;
        let field_type = self.context.field_type.as_ref()?;
        Some((field, self.schema.types.get(field_type.as_str())?))
    }

    fn action(&self, title: String, rewriter: &mut impl Rewriter) -> Option<CodeAction> {
        let updated = rewrite_document(self.document, rewriter)?;
        Some(CodeAction::edit(title, replacement_edit(self.source, &updated)))
    }

    fn add_operation_variable(&self) -> Option<CodeAction> {
        let CursorToken::Variable(variable) = &self.context.token else {
            return None;
        };
        let operation = self.enclosing_operation()?;
        if has_variable(operation, variable.as_str()) {
            return None;
        }
        let input_type = self.context.input_type.as_deref()?;
        let definition = build_variable_definition(variable.as_str(), input_type)?;

        let mut rewriter = OnOperation {
            target: node_span(operation),
            edit: |operation: &Node<OperationDefinition>| {
                let mut updated = operation.clone();
                updated.make_mut().variables.push(definition.clone());
                updated
            },
        };
        self.action(
            format!("Add \"${variable}\" to operation variables"),
            &mut rewriter,
        )
    }

    fn add_pagination(&self) -> Option<CodeAction> {
        let (field, ExtendedType::Object(connection)) = self.cursor_field()? else {
            return None;
        };
        if !connection.name.as_str().ends_with("Connection") || has_directive(&**field, "connection")
        {
            return None;
        }

        let fragment = self.enclosing_fragment();
        let mut rewriter = Pagination {
            fragment: fragment.and_then(node_span),
            field: node_span(field),
            query_name: format!("{}PaginationQuery", self.module_name),
            key: self.connection_key(fragment),
            placeholder: self.connection_node_field(connection.name.as_str()),
        };
        self.action(
            format!("Set up pagination on \"{}\" for fragment", field.name),
            &mut rewriter,
        )
    }

    /// `<Fragment>_<field>_..._<field>` from the definition root down to the
    /// cursor. Operations contribute no name.
    fn connection_key(&self, fragment: Option<&Node<FragmentDefinition>>) -> String {
        fragment
            .map(|fragment| fragment.name.as_str())
            .into_iter()
            .chain(self.context.path.iter().map(Name::as_str))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// The display field of `<connection>.edges.node`, `id` when unknown.
    fn connection_node_field(&self, connection: &str) -> Name {
        field_definition(self.schema, connection, "edges")
            .and_then(|edges| {
                field_definition(self.schema, edges.ty.inner_named_type().as_str(), "node")
            })
            .and_then(|node| self.schema.types.get(node.ty.inner_named_type()))
            .and_then(first_display_field)
            .unwrap_or_else(|| name!("id"))
    }

    fn mark_test_operation(&self) -> Option<CodeAction> {
        let operation = self.enclosing_operation()?;
        if has_directive(&**operation, "relay_test_operation") {
            return None;
        }
        let mut rewriter = OnOperation {
            target: node_span(operation),
            edit: |operation: &Node<OperationDefinition>| {
                add_directive(operation, name!("relay_test_operation"), Vec::new())
            },
        };
        self.action(
            "Make operation @relay_test_operation".to_string(),
            &mut rewriter,
        )
    }

    fn expand_union(&self) -> Option<CodeAction> {
        let (field, ExtendedType::Union(union)) = self.cursor_field()? else {
            return None;
        };
        if !field.selection_set.is_empty() {
            return None;
        }

        let mut selections = vec![make_field(name!("__typename"), Vec::new())];
        for member in &union.members {
            let display = self
                .schema
                .types
                .get(member.name.as_str())
                .and_then(first_display_field)
                .unwrap_or_else(|| name!("id"));
            selections.push(make_inline_fragment(
                member.name.clone(),
                vec![make_field(display, Vec::new())],
            ));
        }

        let mut rewriter = OnField {
            target: node_span(field),
            edit: |field: &Node<Field>| {
                let mut updated = field.clone();
                updated.make_mut().selection_set.clone_from(&selections);
                updated
            },
        };
        self.action(format!("Expand union on \"{}\"", field.name), &mut rewriter)
    }

    /// Actions offered only when the region starts with a fragment. They
    /// edit that fragment wherever the cursor is.
    fn fragment_actions(&self) -> Vec<CodeAction> {
        let Some(fragment) = self.first_fragment() else {
            return Vec::new();
        };
        let mut actions = Vec::new();

        if let CursorToken::Variable(variable) = &self.context.token {
            let declared = has_directive_with(&**fragment, "argumentDefinitions", |arguments| {
                arguments.iter().any(|argument| argument.name == *variable)
            });
            let argument_type = self.context.argument_type.as_deref().filter(|_| !declared);
            if let Some(argument_type) = argument_type {
                actions.extend(self.edit_fragment(
                    format!("Add \"${variable}\" to @argumentDefinitions"),
                    fragment,
                    |fragment| {
                        add_directive(
                            fragment,
                            name!("argumentDefinitions"),
                            vec![build_argument_definition_variable(
                                variable.clone(),
                                argument_type,
                                None,
                            )],
                        )
                    },
                ));
            }
        }

        if !has_directive(&**fragment, "inline") {
            actions.extend(self.edit_fragment(
                "Make fragment @inline".to_string(),
                fragment,
                |fragment| add_directive(fragment, name!("inline"), Vec::new()),
            ));
        }

        if !has_directive(&**fragment, "refetchable") {
            let query_name = format!("{}RefetchQuery", self.module_name);
            actions.extend(self.edit_fragment(
                "Make fragment @refetchable".to_string(),
                fragment,
                |fragment| {
                    add_directive(
                        fragment,
                        name!("refetchable"),
                        vec![make_string_argument(name!("queryName"), &query_name)],
                    )
                },
            ));
        }

        let plural = has_directive_with(&**fragment, "relay", |arguments| {
            arguments.iter().any(|argument| argument.name.as_str() == "plural")
        });
        if !plural {
            actions.extend(self.edit_fragment(
                "Make fragment plural".to_string(),
                fragment,
                |fragment| {
                    add_directive(
                        fragment,
                        name!("relay"),
                        vec![make_boolean_argument(name!("plural"), true)],
                    )
                },
            ));
        }

        actions
    }

    fn edit_fragment(
        &self,
        title: String,
        fragment: &Node<FragmentDefinition>,
        edit: impl FnMut(&Node<FragmentDefinition>) -> Node<FragmentDefinition>,
    ) -> Option<CodeAction> {
        self.action(
            title,
            &mut OnFragment {
                target: node_span(fragment),
                edit,
            },
        )
    }
}

/// Turns a connection field into a paginated one. When the field sits in a
/// fragment, the fragment becomes refetchable with `first`/`after`
/// arguments.
struct Pagination {
    fragment: Option<OffsetRange>,
    field: Option<OffsetRange>,
    query_name: String,
    key: String,
    placeholder: Name,
}

impl Rewriter for Pagination {
    fn fragment(
        &mut self,
        span: Option<OffsetRange>,
        fragment: &Node<FragmentDefinition>,
    ) -> Option<Node<FragmentDefinition>> {
        if !same_span(span, self.fragment) {
            return None;
        }
        let refetchable = add_directive(
            fragment,
            name!("refetchable"),
            vec![make_string_argument(name!("queryName"), &self.query_name)],
        );
        Some(add_directive(
            &refetchable,
            name!("argumentDefinitions"),
            vec![
                build_argument_definition_variable(name!("first"), "Int", Some(5)),
                build_argument_definition_variable(name!("after"), "String", None),
            ],
        ))
    }

    fn field(&mut self, span: Option<OffsetRange>, field: &Node<Field>) -> Option<Node<Field>> {
        if !same_span(span, self.field) {
            return None;
        }
        let mut updated = add_directive(
            field,
            name!("connection"),
            vec![make_string_argument(name!("key"), &self.key)],
        );
        let node = updated.make_mut();
        node.arguments = merge_arguments(
            &node.arguments,
            &[
                make_variable_argument(name!("first")),
                make_variable_argument(name!("after")),
            ],
        );
        if node.selection_set.is_empty() {
            let display = make_field(self.placeholder.clone(), Vec::new());
            let edge_node = make_field(name!("node"), vec![display]);
            node.selection_set = vec![make_field(name!("edges"), vec![edge_node])];
        }
        Some(updated)
    }
}
