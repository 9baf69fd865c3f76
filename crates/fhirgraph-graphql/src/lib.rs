//! # fhirgraph-graphql
//!
//! GraphQL API layer for the fhirgraph FHIR server.
//!
//! The GraphQL schema is generated at runtime from the release model
//! (`fhirgraph-model`): for every resource kind it exposes query fields
//! (single read, list/search), mutation fields (create, update, delete)
//! and an object type whose reference fields resolve polymorphically.
//!
//! ## Polymorphic resolution
//!
//! FHIR reference fields are generic: `Account.subject` may point at a
//! Patient, a Device, an Organization and so on. Each such field is
//! declared with a fixed, ordered candidate set of kinds; at read time the
//! referenced resource's `resourceType` discriminant selects the concrete
//! GraphQL type. The whole mechanism lives in
//! [`schema::polymorphic::CandidateSet`] and is shared by every reference
//! field, `contained` list and instance lookup in the schema.
//!
//! ## Endpoints
//!
//! - `POST /$graphql` - system-level GraphQL endpoint
//! - `GET /$graphql` - system-level GraphQL (query via URL params)
//! - `POST /{type}/{id}/$graphql` - instance-level GraphQL endpoint
//!
//! ## Configuration
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod loaders;
pub mod resolvers;
pub mod schema;

pub use config::GraphQLConfig;
pub use context::{GraphQLContext, GraphQLContextBuilder};
pub use error::GraphQLError;
pub use handler::{GraphQLState, graphql_handler, graphql_handler_get, instance_graphql_handler};
pub use schema::{FhirSchemaBuilder, LazySchema, SchemaBuilderConfig};
pub use schema::polymorphic::{CandidateSet, Shape, TypeResolutionError};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
