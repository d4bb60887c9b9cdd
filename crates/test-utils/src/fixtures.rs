//! The shared test schema.
//!
//! It covers what the refactor tests need: a connection type for pagination,
//! a union for expansion, input objects for variable inference and all three
//! root operation types for scaffolding. Tests where the schema shape is the
//! point of the test should define their own inline.

use std::path::PathBuf;

use apollo_compiler::Schema;

pub const TEST_SCHEMA: &str = r#"
schema {
  query: Query
  mutation: Mutation
  subscription: Subscription
}

interface Node {
  id: ID!
}

type Query {
  viewer: Viewer
  node(id: ID!): Node
  user(id: ID!, locale: String): User
  search(text: String!, first: Int): [SearchResult!]
}

type Viewer {
  user: User
  items(first: Int, after: String, orderBy: ItemOrder): ItemsConnection
}

type User implements Node {
  id: ID!
  name: String
  avatarUrl(size: Int): String
  status: Status
  friends(first: Int, after: String): UserConnection
}

type ItemsConnection {
  edges: [ItemEdge]
  pageInfo: PageInfo!
}

type ItemEdge {
  cursor: String!
  node: Item
}

type Item implements Node {
  title: String
  id: ID!
}

type UserConnection {
  edges: [UserEdge]
  pageInfo: PageInfo!
}

type UserEdge {
  cursor: String!
  node: User
}

type PageInfo {
  hasNextPage: Boolean!
  endCursor: String
}

union Status = Active | Done

type Active {
  since: String
  id: ID!
}

type Done {
  completedAt: String
}

union SearchResult = User | Item

input ItemOrder {
  field: String!
  direction: Direction
  tags: [String!]
}

enum Direction {
  ASC
  DESC
}

input UpdateUserInput {
  id: ID!
  name: String
}

type Mutation {
  updateUser(input: UpdateUserInput!): User
  likeItem(itemId: ID!, clientMutationId: String): Item
}

type Subscription {
  itemUpdated(id: ID!): Item
}
"#;

/// [`TEST_SCHEMA`] built with the Relay directives.
pub fn test_schema() -> Schema {
    schema_from(TEST_SCHEMA)
}

/// Build an inline schema the same way the workspace loader does.
pub fn schema_from(sdl: &str) -> Schema {
    relay_schema::build_schema(&[(PathBuf::from("schema.graphql"), sdl.to_string())])
}
