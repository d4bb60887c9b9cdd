//! Scaffold new Relay modules into a Reason component.

use apollo_compiler::ast::OperationType;
use apollo_compiler::schema::{ExtendedType, FieldDefinition, ObjectType};
use apollo_compiler::{Node, Schema};

use crate::names::{capitalize, uncapitalize};

/// What to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Fragment,
    Query,
    Mutation,
    Subscription,
}

impl ComponentKind {
    const fn operation_type(self) -> Option<OperationType> {
        match self {
            Self::Fragment => None,
            Self::Query => Some(OperationType::Query),
            Self::Mutation => Some(OperationType::Mutation),
            Self::Subscription => Some(OperationType::Subscription),
        }
    }

    const fn extension(self) -> &'static str {
        match self {
            Self::Fragment => "relay.fragment",
            Self::Query => "relay.query",
            Self::Mutation => "relay.mutation",
            Self::Subscription => "relay.subscription",
        }
    }
}

/// Asks the user for the choices scaffolding needs.
pub trait Prompter {
    /// Pick one of `items`. `None` when dismissed.
    fn pick(&mut self, placeholder: &str, items: &[String]) -> Option<String>;

    /// Ask for a line of text, pre-filled with `value`. `None` when dismissed.
    fn input(&mut self, prompt: &str, value: &str) -> Option<String>;
}

/// Build the Reason module to insert into the component `module_name`.
///
/// `document_text` is the current component source, used to avoid module
/// name collisions. Returns `None` if the user dismisses a prompt or the
/// schema has nothing to offer.
pub fn scaffold(
    kind: ComponentKind,
    schema: &Schema,
    module_name: &str,
    document_text: &str,
    prompter: &mut impl Prompter,
) -> Option<String> {
    let Some(operation_type) = kind.operation_type() else {
        return scaffold_fragment(schema, module_name, document_text, prompter);
    };

    let candidates = root_field_candidates(schema, operation_type);
    if candidates.is_empty() {
        tracing::debug!(?kind, "Schema has no root fields for this operation type");
        return None;
    }
    let placeholder = match kind {
        ComponentKind::Query => "Select root field",
        ComponentKind::Mutation => "Select mutation",
        _ => "Select subscription",
    };
    let field_name = prompter.pick(placeholder, &candidates)?;
    let field = root_field(schema, operation_type, &field_name);

    let (default_module, operation) = match kind {
        ComponentKind::Mutation => {
            let capitalized = capitalize(&field_name);
            (
                format!("{capitalized}Mutation"),
                format!("mutation {module_name}_{capitalized}Mutation"),
            )
        }
        ComponentKind::Subscription => (
            "Subscription".to_string(),
            format!("subscription {module_name}Subscription"),
        ),
        _ => ("Query".to_string(), format!("query {module_name}Query")),
    };
    let module = unique_module_name(default_module, document_text, prompter)?;

    let (definition, mapper) = make_args(field, kind == ComponentKind::Query);
    tracing::info!(?kind, module = %module, field = %field_name, "Scaffolded operation module");

    Some(format!(
        "module {module} = [%{}\n  {{|\n  {operation}{definition} {{\n    {field_name}{mapper}\n  }}\n|}}\n];",
        kind.extension()
    ))
}

fn scaffold_fragment(
    schema: &Schema,
    module_name: &str,
    document_text: &str,
    prompter: &mut impl Prompter,
) -> Option<String> {
    let candidates = fragment_candidates(schema);
    let type_name = prompter.pick("Select type of the fragment", &candidates)?;
    let module = unique_module_name(format!("{type_name}Fragment"), document_text, prompter)?;
    let fragment_name = format!(
        "{module_name}_{}",
        uncapitalize(&module.replacen("Fragment", "", 1))
    );

    tracing::info!(module = %module, fragment = %fragment_name, "Scaffolded fragment module");

    Some(format!(
        "module {module} = [%{}\n  {{|\n  fragment {fragment_name} on {type_name} {{\n    id\n  }}\n|}}\n];",
        ComponentKind::Fragment.extension()
    ))
}

/// Object types a fragment can be made on, in schema order.
#[must_use]
pub fn fragment_candidates(schema: &Schema) -> Vec<String> {
    schema
        .types
        .iter()
        .filter(|(name, ty)| matches!(ty, ExtendedType::Object(_)) && !name.starts_with("__"))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Field names of the root type for `operation_type`.
#[must_use]
pub fn root_field_candidates(schema: &Schema, operation_type: OperationType) -> Vec<String> {
    root_object(schema, operation_type)
        .map(|object| object.fields.keys().map(ToString::to_string).collect())
        .unwrap_or_default()
}

fn root_object(schema: &Schema, operation_type: OperationType) -> Option<&Node<ObjectType>> {
    let root = schema.root_operation(operation_type)?;
    match schema.types.get(root)? {
        ExtendedType::Object(object) => Some(object),
        _ => None,
    }
}

fn root_field<'s>(
    schema: &'s Schema,
    operation_type: OperationType,
    field_name: &str,
) -> Option<&'s FieldDefinition> {
    root_object(schema, operation_type)?
        .fields
        .get(field_name)
        .map(|component| &*component.node)
}

/// Variable definitions and the matching argument list for `field`.
///
/// Returns `("($a: T, $b: U)", "(a: $a, b: $b)")`, or two empty strings when
/// no argument qualifies. With `only_required` nullable arguments are left
/// out.
#[must_use]
pub fn make_args(field: Option<&FieldDefinition>, only_required: bool) -> (String, String) {
    let Some(field) = field else {
        return (String::new(), String::new());
    };
    let arguments: Vec<_> = field
        .arguments
        .iter()
        .filter(|argument| !only_required || argument.ty.is_non_null())
        .collect();
    if arguments.is_empty() {
        return (String::new(), String::new());
    }

    let definition = arguments
        .iter()
        .map(|argument| format!("${}: {}", argument.name, argument.ty))
        .collect::<Vec<_>>()
        .join(", ");
    let mapper = arguments
        .iter()
        .map(|argument| format!("{0}: ${0}", argument.name))
        .collect::<Vec<_>>()
        .join(", ");
    (format!("({definition})"), format!("({mapper})"))
}

/// `name`, or a replacement from the user while a module called `name`
/// already exists in `document_text`.
fn unique_module_name(
    mut name: String,
    document_text: &str,
    prompter: &mut impl Prompter,
) -> Option<String> {
    while document_text.contains(&format!("module {name} =")) {
        tracing::debug!(module = %name, "Module name already taken");
        let prompt = format!("Enter module name ('{name}' already exists in document)");
        name = prompter.input(&prompt, &name)?;
    }
    Some(name)
}
