//! Header generation

use indexmap::IndexMap;
use shapedoc_core::{Header, RefOr, Reference, SchemaRef};

use crate::Generator;
use crate::descriptor::Descriptor;
use crate::error::{GenerateError, Result};
use crate::extension::specification_extensions;
use crate::registry::{ComponentKind, Registration};

/// Build the header for `descriptor`, or a `$ref` to its registered component.
///
/// The first call for a descriptor that has a name (its own `ref_name`, or a
/// reserved one) registers the header; every later call returns the same
/// reference without converting again.
pub fn create_header_or_ref(
    descriptor: &Descriptor,
    generator: &mut Generator,
) -> Result<RefOr<Header>> {
    let registration = generator.registry.headers.get(descriptor.id());
    if let Some(Registration::Complete { name, .. }) = registration {
        tracing::debug!(%name, "reusing header component");
        return Ok(RefOr::Ref(Reference::header(name)));
    }
    let reserved = registration.map(|r| r.name().to_string());

    let base = create_base_header(descriptor, generator)?;

    let name = descriptor
        .header_meta()
        .and_then(|meta| meta.ref_name.clone())
        .or(reserved);

    let Some(name) = name else {
        tracing::trace!(id = %descriptor.id(), "inline header");
        return Ok(RefOr::Inline(base));
    };

    let reference = Reference::header(&name);
    let policy = generator.options.duplicate_names;
    generator
        .registry
        .headers
        .complete(descriptor.id(), descriptor.clone(), base, name, policy)?;
    Ok(RefOr::Ref(reference))
}

/// Build the concrete header object for `descriptor`.
///
/// `required` is only emitted when the descriptor is not optional. Header
/// metadata other than `ref_name` is copied onto the object; of its extensions
/// only `x-` prefixed keys are kept.
pub fn create_base_header(descriptor: &Descriptor, generator: &Generator) -> Result<Header> {
    let schema = generator
        .converter
        .convert(descriptor, generator.options.header_direction);
    if let SchemaRef::Ref(reference) = &schema {
        tracing::error!(ref_path = %reference.ref_path, "header schema converted to a reference");
        return Err(GenerateError::UnexpectedReference {
            kind: ComponentKind::Header,
        });
    }

    let mut header = Header::default();
    if let Some(meta) = descriptor.header_meta() {
        header.description = meta.description.clone();
        header.deprecated = meta.deprecated;
        header.example = meta.example.clone();
        header.extensions = specification_extensions(&meta.extensions);
    }
    header.schema = Some(schema);
    header.required = (!descriptor.is_optional()).then_some(true);
    Ok(header)
}

/// Convert each named descriptor into a header, in declaration order
pub fn create_response_headers(
    response_headers: &IndexMap<String, Descriptor>,
    generator: &mut Generator,
) -> Result<IndexMap<String, RefOr<Header>>> {
    let mut out = IndexMap::with_capacity(response_headers.len());
    for (name, descriptor) in response_headers {
        out.insert(name.clone(), create_header_or_ref(descriptor, generator)?);
    }
    Ok(out)
}

/// Build the `headers` map of a response.
///
/// Returns `None` when neither literal headers nor header descriptors were
/// given. Otherwise generated headers come first and literal headers are laid
/// over them, replacing generated entries with the same name.
pub fn create_headers(
    headers: Option<&IndexMap<String, RefOr<Header>>>,
    response_headers: Option<&IndexMap<String, Descriptor>>,
    generator: &mut Generator,
) -> Result<Option<IndexMap<String, RefOr<Header>>>> {
    if headers.is_none() && response_headers.is_none() {
        return Ok(None);
    }

    let mut out = match response_headers {
        Some(response_headers) => create_response_headers(response_headers, generator)?,
        None => IndexMap::new(),
    };
    if let Some(headers) = headers {
        for (name, header) in headers {
            out.insert(name.clone(), header.clone());
        }
    }
    Ok(Some(out))
}
