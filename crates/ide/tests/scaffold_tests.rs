//! Integration tests for component scaffolding.

use std::collections::VecDeque;

use relay_ide::{scaffold, ComponentKind, Prompter};
use relay_test_utils::test_schema;

/// Answers prompts from a script and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    picks: VecDeque<Option<String>>,
    inputs: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn picking(choice: &str) -> Self {
        Self {
            picks: VecDeque::from([Some(choice.to_string())]),
            ..Self::default()
        }
    }

    fn then_input(mut self, answer: Option<&str>) -> Self {
        self.inputs.push_back(answer.map(ToString::to_string));
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn pick(&mut self, placeholder: &str, items: &[String]) -> Option<String> {
        self.asked.push(placeholder.to_string());
        let choice = self.picks.pop_front().flatten()?;
        assert!(items.contains(&choice), "{choice} not offered in {items:?}");
        Some(choice)
    }

    fn input(&mut self, prompt: &str, value: &str) -> Option<String> {
        self.asked.push(format!("{prompt} [{value}]"));
        self.inputs.pop_front().flatten()
    }
}

fn run(kind: ComponentKind, document: &str, prompter: &mut ScriptedPrompter) -> Option<String> {
    scaffold(kind, &test_schema(), "Foo", document, prompter)
}

#[test]
fn test_scaffold_fragment() {
    let mut prompter = ScriptedPrompter::picking("User");
    let module = run(ComponentKind::Fragment, "", &mut prompter).unwrap();

    assert_eq!(
        module,
        "module UserFragment = [%relay.fragment\n  {|\n  fragment Foo_user on User {\n    id\n  }\n|}\n];"
    );
    assert_eq!(prompter.asked, ["Select type of the fragment"]);
}

#[test]
fn test_scaffold_query_uses_required_arguments() {
    let mut prompter = ScriptedPrompter::picking("user");
    let module = run(ComponentKind::Query, "", &mut prompter).unwrap();

    assert_eq!(
        module,
        "module Query = [%relay.query\n  {|\n  query FooQuery($id: ID!) {\n    user(id: $id)\n  }\n|}\n];"
    );
}

#[test]
fn test_scaffold_query_without_arguments() {
    let mut prompter = ScriptedPrompter::picking("viewer");
    let module = run(ComponentKind::Query, "", &mut prompter).unwrap();
    assert!(module.contains("  query FooQuery {\n    viewer\n  }\n"));
}

#[test]
fn test_scaffold_mutation_uses_all_arguments() {
    let mut prompter = ScriptedPrompter::picking("likeItem");
    let module = run(ComponentKind::Mutation, "", &mut prompter).unwrap();

    assert_eq!(
        module,
        "module LikeItemMutation = [%relay.mutation\n  {|\n  \
         mutation Foo_LikeItemMutation($itemId: ID!, $clientMutationId: String) {\n    \
         likeItem(itemId: $itemId, clientMutationId: $clientMutationId)\n  }\n|}\n];"
    );
}

#[test]
fn test_scaffold_subscription() {
    let mut prompter = ScriptedPrompter::picking("itemUpdated");
    let module = run(ComponentKind::Subscription, "", &mut prompter).unwrap();

    assert_eq!(
        module,
        "module Subscription = [%relay.subscription\n  {|\n  subscription FooSubscription($id: ID!) {\n    itemUpdated(id: $id)\n  }\n|}\n];"
    );
}

#[test]
fn test_collision_prompts_until_name_is_free() {
    let document = "module Query = [%relay.query {| query FooQuery { viewer } |}];\n\
                    module SecondQuery = [%relay.query {| query FooQuery { viewer } |}];\n";
    let mut prompter = ScriptedPrompter::picking("viewer")
        .then_input(Some("SecondQuery"))
        .then_input(Some("ThirdQuery"));

    let module = run(ComponentKind::Query, document, &mut prompter).unwrap();

    assert!(module.starts_with("module ThirdQuery = [%relay.query"));
    assert_eq!(
        prompter.asked,
        [
            "Select root field",
            "Enter module name ('Query' already exists in document) [Query]",
            "Enter module name ('SecondQuery' already exists in document) [SecondQuery]",
        ]
    );
}

#[test]
fn test_fragment_name_follows_renamed_module() {
    let document = "module UserFragment = [%relay.fragment {| fragment Foo_user on User { id } |}];\n";
    let mut prompter = ScriptedPrompter::picking("User").then_input(Some("FriendFragment"));

    let module = run(ComponentKind::Fragment, document, &mut prompter).unwrap();
    assert!(module.starts_with("module FriendFragment = [%relay.fragment"));
    assert!(module.contains("fragment Foo_friend on User {"));
}

#[test]
fn test_dismissed_prompts_abort() {
    let mut dismissed_pick = ScriptedPrompter::default();
    assert_eq!(run(ComponentKind::Query, "", &mut dismissed_pick), None);

    let document = "module Subscription = [%relay.subscription {| subscription S { itemUpdated(id: 1) { id } } |}];";
    let mut dismissed_input = ScriptedPrompter::picking("itemUpdated").then_input(None);
    assert_eq!(run(ComponentKind::Subscription, document, &mut dismissed_input), None);
}
