//! Per-build generation context

use indexmap::IndexMap;
use shapedoc_core::{Components, Header, RefOr, Response, Responses};

use crate::convert::{SchemaConverter, ShapeConverter};
use crate::descriptor::{Descriptor, ResponseDef, ResponsesDef};
use crate::error::Result;
use crate::options::Options;
use crate::registry::ComponentRegistry;
use crate::{header, response};

/// Owns everything one document build shares: the component registry, the
/// schema converter and the options.
///
/// Create one per document; reusing a generator across documents would leak
/// registrations from one into the other.
pub struct Generator {
    pub(crate) registry: ComponentRegistry,
    pub(crate) converter: Box<dyn SchemaConverter>,
    pub(crate) options: Options,
}

impl Generator {
    /// Generator using [`ShapeConverter`] and default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_converter(ShapeConverter)
    }

    #[must_use]
    pub fn with_converter(converter: impl SchemaConverter + 'static) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            converter: Box::new(converter),
            options: Options::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Publish `descriptor` as header component `name` even if it never
    /// requests a name itself. The header is built on first use, or by
    /// [`Generator::finish`] if it is never used.
    pub fn reserve_header(
        &mut self,
        descriptor: &Descriptor,
        name: impl Into<String>,
    ) -> Result<()> {
        let policy = self.options.duplicate_names;
        self.registry
            .headers
            .reserve(descriptor.id(), descriptor.clone(), name.into(), policy)
    }

    /// Publish `def` as response component `name`; see [`Generator::reserve_header`]
    pub fn reserve_response(&mut self, def: &ResponseDef, name: impl Into<String>) -> Result<()> {
        let policy = self.options.duplicate_names;
        self.registry
            .responses
            .reserve(def.id(), def.clone(), name.into(), policy)
    }

    pub fn header(&mut self, descriptor: &Descriptor) -> Result<RefOr<Header>> {
        header::create_header_or_ref(descriptor, self)
    }

    pub fn headers(
        &mut self,
        literal: Option<&IndexMap<String, RefOr<Header>>>,
        descriptors: Option<&IndexMap<String, Descriptor>>,
    ) -> Result<Option<IndexMap<String, RefOr<Header>>>> {
        header::create_headers(literal, descriptors, self)
    }

    pub fn response(&mut self, def: &RefOr<ResponseDef>) -> Result<RefOr<Response>> {
        response::create_response(def, self)
    }

    pub fn responses(&mut self, defs: &ResponsesDef) -> Result<Responses> {
        response::create_responses(defs, self)
    }

    /// Build every reserved component that was never used and still owns its
    /// name, then export the registered headers and responses.
    pub fn finish(mut self) -> Result<Components> {
        for def in self.registry.responses.pending() {
            response::create_response(&RefOr::Inline(def), &mut self)?;
        }
        for descriptor in self.registry.headers.pending() {
            header::create_header_or_ref(&descriptor, &mut self)?;
        }

        let headers = self.registry.export_headers()?;
        let responses = self.registry.export_responses()?;
        tracing::debug!(
            headers = headers.len(),
            responses = responses.len(),
            "components exported"
        );
        Ok(Components {
            schemas: None,
            responses: (!responses.is_empty()).then_some(responses),
            headers: (!headers.is_empty()).then_some(headers),
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
