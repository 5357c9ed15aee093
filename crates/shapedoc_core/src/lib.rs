//! OpenAPI document fragments: schemas, headers, responses and the
//! components section they are registered in.

pub mod response;
pub mod schema;

pub use response::{Example, Header, MediaType, Response, ResponseItem, Responses};
pub use schema::{Components, RefOr, Reference, Schema, SchemaRef, SchemaType};
