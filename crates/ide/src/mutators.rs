//! AST mutators.
//!
//! Every function here takes nodes by reference and returns new ones. Nodes
//! are reference counted: a mutator clones the handle and writes through
//! [`Node::make_mut`], so the input tree is never modified and untouched
//! children stay shared between the old and new trees.

use apollo_compiler::ast::{
    Argument, Definition, Directive, DirectiveList, Document, Field, FragmentDefinition,
    FragmentSpread, InlineFragment, OperationDefinition, Selection, Value, VariableDefinition,
};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{name, Name, Node};

/// AST nodes that carry a directive list.
pub trait HasDirectives: Clone {
    fn directives(&self) -> &DirectiveList;
    fn directives_mut(&mut self) -> &mut DirectiveList;
}

impl HasDirectives for OperationDefinition {
    fn directives(&self) -> &DirectiveList {
        &self.directives
    }
    fn directives_mut(&mut self) -> &mut DirectiveList {
        &mut self.directives
    }
}

impl HasDirectives for FragmentDefinition {
    fn directives(&self) -> &DirectiveList {
        &self.directives
    }
    fn directives_mut(&mut self) -> &mut DirectiveList {
        &mut self.directives
    }
}

impl HasDirectives for Field {
    fn directives(&self) -> &DirectiveList {
        &self.directives
    }
    fn directives_mut(&mut self) -> &mut DirectiveList {
        &mut self.directives
    }
}

impl HasDirectives for FragmentSpread {
    fn directives(&self) -> &DirectiveList {
        &self.directives
    }
    fn directives_mut(&mut self) -> &mut DirectiveList {
        &mut self.directives
    }
}

impl HasDirectives for InlineFragment {
    fn directives(&self) -> &DirectiveList {
        &self.directives
    }
    fn directives_mut(&mut self) -> &mut DirectiveList {
        &mut self.directives
    }
}

/// Whether `node` carries a directive named `name`.
pub fn has_directive<T: HasDirectives>(node: &T, name: &str) -> bool {
    has_directive_with(node, name, |_| true)
}

/// Whether `node` carries a directive named `name` whose arguments satisfy `predicate`.
pub fn has_directive_with<T, F>(node: &T, name: &str, predicate: F) -> bool
where
    T: HasDirectives,
    F: Fn(&[Node<Argument>]) -> bool,
{
    node.directives()
        .0
        .iter()
        .any(|directive| directive.name.as_str() == name && predicate(&directive.arguments))
}

/// Merge `new` into `existing` by argument name.
///
/// A same-named argument has its value replaced in place; other arguments
/// are appended in the order given.
#[must_use]
pub fn merge_arguments(existing: &[Node<Argument>], new: &[Node<Argument>]) -> Vec<Node<Argument>> {
    let mut merged = existing.to_vec();
    for argument in new {
        match merged
            .iter_mut()
            .find(|current| current.name.as_str() == argument.name.as_str())
        {
            Some(slot) => *slot = argument.clone(),
            None => merged.push(argument.clone()),
        }
    }
    merged
}

/// Add `@name(arguments)` to `node`.
///
/// If the directive is already present its arguments are merged with
/// [`merge_arguments`], and it moves to the end of the directive list.
#[must_use]
pub fn add_directive<T: HasDirectives>(
    node: &Node<T>,
    name: Name,
    arguments: Vec<Node<Argument>>,
) -> Node<T> {
    let mut updated = node.clone();
    let directives = &mut updated.make_mut().directives_mut().0;

    let directive = match directives.iter().position(|d| d.name == name) {
        Some(index) => {
            let mut existing = directives.remove(index);
            let merged = merge_arguments(&existing.arguments, &arguments);
            existing.make_mut().arguments = merged;
            existing
        }
        None => Node::new(Directive { name, arguments }),
    };
    directives.push(directive);

    updated
}

/// Whether `operation` declares the variable `$name`.
pub fn has_variable(operation: &OperationDefinition, name: &str) -> bool {
    operation
        .variables
        .iter()
        .any(|variable| variable.name.as_str() == name)
}

/// Build the variable definition `$name: type_string`.
///
/// The type is checked by parsing a throwaway operation, so anything that is
/// not a single valid type reference yields `None`, including a type followed
/// by a default value or directives.
#[must_use]
pub fn build_variable_definition(name: &str, type_string: &str) -> Option<Node<VariableDefinition>> {
    let template = format!("mutation(${name}: {type_string}) {{ id }}");
    let document = Document::parse(template, "variable.graphql").ok()?;

    let [Definition::OperationDefinition(operation)] = document.definitions.as_slice() else {
        return None;
    };
    let [variable] = operation.variables.as_slice() else {
        return None;
    };
    let bare = variable.name.as_str() == name
        && variable.default_value.is_none()
        && variable.directives.0.is_empty();
    bare.then(|| variable.clone())
}

/// Build an `@argumentDefinitions` entry: `name: {type: "<type>", defaultValue: <n>}`.
///
/// Defaults are always written as integer literals.
#[must_use]
pub fn build_argument_definition_variable(
    name: Name,
    type_name: &str,
    default_value: Option<i32>,
) -> Node<Argument> {
    let mut fields = vec![(name!("type"), Node::new(Value::String(type_name.to_string())))];
    if let Some(default_value) = default_value {
        fields.push((name!("defaultValue"), Node::new(Value::Int(default_value.into()))));
    }
    make_argument(name, Value::Object(fields))
}

/// The field to select when nothing else is known about a type: `id` if
/// present, otherwise the first declared field.
#[must_use]
pub fn first_display_field(ty: &ExtendedType) -> Option<Name> {
    let fields = match ty {
        ExtendedType::Object(object) => &object.fields,
        ExtendedType::Interface(interface) => &interface.fields,
        _ => return None,
    };
    if let Some((id, _)) = fields.get_key_value("id") {
        return Some(id.clone());
    }
    fields.keys().next().cloned()
}

#[must_use]
pub fn make_argument(name: Name, value: Value) -> Node<Argument> {
    Node::new(Argument {
        name,
        value: Node::new(value),
    })
}

/// `name: $name`
#[must_use]
pub fn make_variable_argument(name: Name) -> Node<Argument> {
    make_argument(name.clone(), Value::Variable(name))
}

#[must_use]
pub fn make_string_argument(name: Name, value: &str) -> Node<Argument> {
    make_argument(name, Value::String(value.to_string()))
}

#[must_use]
pub fn make_boolean_argument(name: Name, value: bool) -> Node<Argument> {
    make_argument(name, Value::Boolean(value))
}

/// A field selection. Without `selections` it prints as a leaf field.
#[must_use]
pub fn make_field(name: Name, selections: Vec<Selection>) -> Selection {
    Selection::Field(Node::new(Field {
        alias: None,
        name,
        arguments: Vec::new(),
        directives: DirectiveList(Vec::new()),
        selection_set: selections,
    }))
}

/// `... on <type_condition> { selections }`
#[must_use]
pub fn make_inline_fragment(type_condition: Name, selections: Vec<Selection>) -> Selection {
    Selection::InlineFragment(Node::new(InlineFragment {
        type_condition: Some(type_condition),
        directives: DirectiveList(Vec::new()),
        selection_set: selections,
    }))
}

/// `...<fragment_name>`
#[must_use]
pub fn make_fragment_spread(fragment_name: Name) -> Selection {
    Selection::FragmentSpread(Node::new(FragmentSpread {
        fragment_name,
        directives: DirectiveList(Vec::new()),
    }))
}
