//! Extract selections into a new fragment component.
//!
//! Two phases. [`extract_fragment_action`] runs with the other code actions
//! and only records what would be extracted. Once the user has named the
//! component, [`extract_fragment`] builds the edit and the new file.

use std::path::Path;

use apollo_compiler::ast::{Definition, Document, Selection};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{Name, Schema};
use relay_extract::{select_operation_at, RegionLocator, RegionPosition};
use relay_types::{NewFile, OffsetRange};

use crate::context::field_definition;
use crate::helpers::{node_span, parse_document, same_span, selection_span, trim_span};
use crate::mutators::make_fragment_spread;
use crate::names::{capitalize, is_valid_component_name, uncapitalize};
use crate::printer::{print_document, replacement_edit};
use crate::rewrite::{rewrite_document, Rewriter};
use crate::{
    ActionPayload, ActionRequest, CodeAction, CodeActionKind, ExtractChoice,
    ExtractFragmentCommand, ExtractedComponent,
};

pub const EXTRACT_ACTION_TITLE: &str = "Extract selected fields to new fragment component";
pub const EXTRACT_COMMAND_TITLE: &str = "Add new fragment component";

/// Why the second phase of an extraction produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractFragmentError {
    #[error("Your component must have a name.")]
    MissingName,

    #[error("Please only use alphanumeric characters and underscores.")]
    InvalidName,

    #[error("`{0}` is not a valid GraphQL fragment name")]
    InvalidFragmentName(String),

    #[error("No GraphQL found at the selection")]
    NoRegion,

    #[error("The GraphQL at the selection does not parse")]
    Parse,

    #[error("The selection to extract is no longer in the document")]
    TargetNotFound,
}

pub type Result<T> = std::result::Result<T, ExtractFragmentError>;

/// A selection set in pre-order, with the type it selects on.
struct SelectionSetInfo {
    owner: OffsetRange,
    type_name: Option<Name>,
    selections: Vec<Selection>,
}

fn selection_sets(document: &Document, schema: Option<&Schema>) -> Vec<SelectionSetInfo> {
    let mut sets = Vec::new();
    for definition in &document.definitions {
        match definition {
            Definition::OperationDefinition(operation) => {
                let root = schema
                    .and_then(|schema| schema.root_operation(operation.operation_type))
                    .cloned();
                collect(&mut sets, schema, node_span(operation), root, &operation.selection_set);
            }
            Definition::FragmentDefinition(fragment) => {
                collect(
                    &mut sets,
                    schema,
                    node_span(fragment),
                    Some(fragment.type_condition.clone()),
                    &fragment.selection_set,
                );
            }
            _ => {}
        }
    }
    sets
}

fn collect(
    sets: &mut Vec<SelectionSetInfo>,
    schema: Option<&Schema>,
    owner: Option<OffsetRange>,
    type_name: Option<Name>,
    selections: &[Selection],
) {
    let Some(owner) = owner else {
        return;
    };
    sets.push(SelectionSetInfo {
        owner,
        type_name: type_name.clone(),
        selections: selections.to_vec(),
    });

    for selection in selections {
        match selection {
            Selection::Field(field) if !field.selection_set.is_empty() => {
                let field_type = schema
                    .zip(type_name.as_ref())
                    .and_then(|(schema, parent)| {
                        field_definition(schema, parent.as_str(), field.name.as_str())
                    })
                    .map(|definition| definition.ty.inner_named_type().clone());
                collect(sets, schema, node_span(field), field_type, &field.selection_set);
            }
            Selection::InlineFragment(inline) => {
                let inline_type = inline.type_condition.clone().or_else(|| type_name.clone());
                collect(sets, schema, node_span(inline), inline_type, &inline.selection_set);
            }
            _ => {}
        }
    }
}

/// First phase: offer to extract the selections covered by `start..end`.
///
/// Containment is decided by whole lines. The target is the last selection
/// set, in document order, whose owner spans all selected lines; the
/// extracted selections are the target's selections lying entirely on those
/// lines. The target must select on an object type.
pub(crate) fn extract_fragment_action(
    document: &Document,
    schema: &Schema,
    content: &str,
    start: RegionPosition,
    end: RegionPosition,
) -> Option<CodeAction> {
    let locator = RegionLocator::new(content);
    let lines = |span: OffsetRange| {
        let (first, last) = locator.span(trim_span(content, span));
        (first.line, last.line)
    };

    let sets = selection_sets(document, Some(schema));
    let target = sets.iter().rev().find(|set| {
        let (first, last) = lines(set.owner);
        first <= start.line && end.line <= last
    })?;

    let parent_type = target.type_name.as_ref()?;
    if !matches!(schema.types.get(parent_type.as_str()), Some(ExtendedType::Object(_))) {
        tracing::debug!(%parent_type, "Extraction target is not an object type");
        return None;
    }

    let selected: Vec<OffsetRange> = target
        .selections
        .iter()
        .filter_map(selection_span)
        .filter(|span| {
            let (first, last) = lines(*span);
            first >= start.line && last <= end.line
        })
        .collect();
    if selected.is_empty() {
        return None;
    }

    Some(CodeAction {
        title: EXTRACT_ACTION_TITLE.to_string(),
        kind: CodeActionKind::RefactorExtract,
        payload: ActionPayload::Command(ExtractFragmentCommand {
            title: EXTRACT_COMMAND_TITLE.to_string(),
            parent_type: parent_type.to_string(),
            target: target.owner,
            selected,
        }),
    })
}

/// Second phase: move the selections from `command` into a new fragment
/// component named by `choice`.
///
/// The fragment is named `<Component>_<parentType>`, a spread of it is
/// inserted at the front of the target selection set and, if requested, the
/// extracted selections are removed there. The new component file is
/// written next to `source_path`.
pub fn extract_fragment(
    request: &ActionRequest<'_>,
    command: &ExtractFragmentCommand,
    choice: &ExtractChoice,
    source_path: &Path,
) -> Result<ExtractedComponent> {
    let component = choice.component_name.as_str();
    if component.is_empty() {
        return Err(ExtractFragmentError::MissingName);
    }
    if !is_valid_component_name(component) {
        return Err(ExtractFragmentError::InvalidName);
    }

    let fragment_name = format!(
        "{}_{}",
        capitalize(component),
        uncapitalize(&command.parent_type)
    );
    let spread_name = Name::new(&fragment_name)
        .map_err(|_| ExtractFragmentError::InvalidFragmentName(fragment_name.clone()))?;

    let source = select_operation_at(
        request.language_id,
        request.text,
        request.selection.ordered().start,
    )
    .ok_or(ExtractFragmentError::NoRegion)?;
    let document = parse_document(source.content()).ok_or(ExtractFragmentError::Parse)?;

    let sets = selection_sets(&document, None);
    let target = sets
        .iter()
        .find(|set| set.owner == command.target)
        .ok_or(ExtractFragmentError::TargetNotFound)?;
    let extracted: Vec<Selection> = target
        .selections
        .iter()
        .filter(|selection| is_listed(selection, &command.selected))
        .cloned()
        .collect();
    if extracted.is_empty() {
        return Err(ExtractFragmentError::TargetNotFound);
    }

    let removed: &[OffsetRange] = if choice.remove_selection {
        &command.selected
    } else {
        &[]
    };
    let mut rewriter = InsertSpread {
        owner: Some(command.target),
        spread: make_fragment_spread(spread_name),
        removed,
    };
    let updated =
        rewrite_document(&document, &mut rewriter).ok_or(ExtractFragmentError::TargetNotFound)?;

    let fragment = fragment_text(&fragment_name, &command.parent_type, extracted)
        .ok_or_else(|| ExtractFragmentError::InvalidFragmentName(fragment_name.clone()))?;

    tracing::info!(
        component,
        fragment = %fragment_name,
        removed = choice.remove_selection,
        "Extracted selections into a new fragment component"
    );

    Ok(ExtractedComponent {
        edit: replacement_edit(&source, &updated),
        new_file: NewFile::new(
            source_path.with_file_name(format!("{component}.re")),
            component_source(&command.parent_type, &fragment),
        ),
        fragment_name,
    })
}

fn is_listed(selection: &Selection, spans: &[OffsetRange]) -> bool {
    selection_span(selection).is_some_and(|span| spans.contains(&span))
}

struct InsertSpread<'a> {
    owner: Option<OffsetRange>,
    spread: Selection,
    removed: &'a [OffsetRange],
}

impl Rewriter for InsertSpread<'_> {
    fn selection_set(
        &mut self,
        owner: Option<OffsetRange>,
        selections: &[Selection],
    ) -> Option<Vec<Selection>> {
        if !same_span(owner, self.owner) {
            return None;
        }
        let mut updated = vec![self.spread.clone()];
        updated.extend(
            selections
                .iter()
                .filter(|selection| !is_listed(selection, self.removed))
                .cloned(),
        );
        Some(updated)
    }
}

/// Print `fragment <name> on <parent_type> { <selections> }`.
fn fragment_text(name: &str, parent_type: &str, selections: Vec<Selection>) -> Option<String> {
    let template = format!("fragment {name} on {parent_type} {{ __typename }}");
    let mut document = Document::parse(template, "fragment.graphql").ok()?;
    let Some(Definition::FragmentDefinition(fragment)) = document.definitions.first_mut() else {
        return None;
    };
    fragment.make_mut().selection_set = selections;
    Some(print_document(&document))
}

fn component_source(parent_type: &str, fragment: &str) -> String {
    let module = format!("{parent_type}Fragment");
    let prop = uncapitalize(parent_type);
    let body = fragment
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "module {module} = [%relay.fragment\n  {{|\n{body}\n|}}\n];\n\n\
         [@react.component]\n\
         let make = (~{prop}) => {{\n  let {prop} = {module}.use({prop});\n\n  React.null;\n}};\n"
    )
}
