//! shapedoc - OpenAPI responses and headers from schema descriptors
//!
//! Descriptors and response definitions are converted into document
//! fragments. Anything that asks for a stable name is registered once as a
//! component and referenced with `$ref` everywhere it recurs; everything else
//! is emitted inline.
//!
//! ```
//! use shapedoc::{Descriptor, Generator, HeaderMeta, ResponseObject, ResponsesDef};
//!
//! let request_id = Descriptor::string().header(HeaderMeta::named("RequestId"));
//!
//! let mut responses = ResponsesDef::new();
//! responses.insert(
//!     "200".to_string(),
//!     ResponseObject::new("ok").response_header("X-Request-Id", request_id.clone()).into(),
//! );
//! responses.insert(
//!     "404".to_string(),
//!     ResponseObject::new("missing").response_header("X-Request-Id", request_id).into(),
//! );
//!
//! let mut generator = Generator::new();
//! let document = generator.responses(&responses)?;
//! let components = generator.finish()?;
//!
//! assert_eq!(document.len(), 2);
//! assert_eq!(components.headers.map(|h| h.len()), Some(1));
//! # Ok::<(), shapedoc::GenerateError>(())
//! ```

pub mod content;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod extension;
mod generator;
pub mod header;
pub mod options;
pub mod registry;
pub mod response;

pub use convert::{Direction, SchemaConverter, ShapeConverter};
pub use descriptor::{
    ComponentId, Descriptor, HeaderMeta, MediaTypeDef, ResponseDef, ResponseEntry, ResponseObject,
    ResponsesDef, Shape,
};
pub use error::{GenerateError, Result};
pub use generator::Generator;
pub use options::{DuplicateNamePolicy, Options};
pub use registry::{ComponentKind, ComponentRegistry, Registration};

// Re-export the document model so users don't need to depend on shapedoc_core directly
pub mod model {
    pub use shapedoc_core::*;
}
