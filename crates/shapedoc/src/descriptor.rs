//! Schema descriptors and response definitions
//!
//! Both are cheap `Arc` handles over immutable data. Each carries a
//! [`ComponentId`] allocated when it is constructed; clones of a handle share
//! that id, separately constructed values never do, even when their contents
//! are equal. The component registry deduplicates by this id only.

use indexmap::IndexMap;
use serde_json::Value;
use shapedoc_core::{Example, Header, RefOr, Reference};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a descriptor or response definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural shape of a described value
#[derive(Debug, Clone)]
pub enum Shape {
    String,
    Integer,
    Number,
    Boolean,
    Array(Descriptor),
    /// Named properties, in declaration order
    Object(IndexMap<String, Descriptor>),
    /// Marks the wrapped value as optional
    Optional(Descriptor),
}

/// Header-specific metadata attached to a descriptor.
///
/// `ref_name` requests registration under `#/components/headers/<ref_name>`;
/// every other field is copied onto the generated header object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMeta {
    pub ref_name: Option<String>,
    pub description: Option<String>,
    pub deprecated: Option<bool>,
    pub example: Option<Value>,
    /// Only `x-` prefixed keys reach the header object
    pub extensions: BTreeMap<String, Value>,
}

impl HeaderMeta {
    /// Metadata that only requests a stable component name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            ref_name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct DescriptorData {
    id: ComponentId,
    shape: Shape,
    description: Option<String>,
    example: Option<Value>,
    read_only: bool,
    write_only: bool,
    header: Option<HeaderMeta>,
}

/// Handle to an immutable value-shape definition.
///
/// Builder methods consume the handle and return a new descriptor with a new
/// identity, so configure a descriptor fully before sharing it.
#[derive(Debug, Clone)]
pub struct Descriptor(Arc<DescriptorData>);

impl Descriptor {
    /// Create a descriptor for the given shape
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self(Arc::new(DescriptorData {
            id: ComponentId::next(),
            shape,
            description: None,
            example: None,
            read_only: false,
            write_only: false,
            header: None,
        }))
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(Shape::String)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::new(Shape::Integer)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(Shape::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(Shape::Boolean)
    }

    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::new(Shape::Array(items))
    }

    /// Create an object descriptor from `(property, descriptor)` pairs
    #[must_use]
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::new(Shape::Object(
            properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Wrap this descriptor as optional
    #[must_use]
    pub fn optional(self) -> Self {
        Self::new(Shape::Optional(self))
    }

    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.rebuild(|data| data.description = Some(description.into()))
    }

    #[must_use]
    pub fn example(self, example: Value) -> Self {
        self.rebuild(|data| data.example = Some(example))
    }

    /// Mark as only present in responses
    #[must_use]
    pub fn read_only(self) -> Self {
        self.rebuild(|data| data.read_only = true)
    }

    /// Mark as only accepted in requests
    #[must_use]
    pub fn write_only(self) -> Self {
        self.rebuild(|data| data.write_only = true)
    }

    /// Attach header metadata
    #[must_use]
    pub fn header(self, meta: HeaderMeta) -> Self {
        self.rebuild(|data| data.header = Some(meta))
    }

    fn rebuild(self, apply: impl FnOnce(&mut DescriptorData)) -> Self {
        let mut data = Arc::unwrap_or_clone(self.0);
        data.id = ComponentId::next();
        apply(&mut data);
        Self(Arc::new(data))
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.0.id
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    #[must_use]
    pub fn get_description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    #[must_use]
    pub fn get_example(&self) -> Option<&Value> {
        self.0.example.as_ref()
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.0.read_only
    }

    #[must_use]
    pub fn is_write_only(&self) -> bool {
        self.0.write_only
    }

    #[must_use]
    pub fn header_meta(&self) -> Option<&HeaderMeta> {
        self.0.header.as_ref()
    }

    /// Whether the value may be absent
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self.0.shape, Shape::Optional(_))
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Descriptor {}

/// Media type entry of a response definition
#[derive(Debug, Clone, Default)]
pub struct MediaTypeDef {
    pub schema: Option<Descriptor>,
    pub example: Option<Value>,
    pub examples: Option<BTreeMap<String, Example>>,
}

impl MediaTypeDef {
    #[must_use]
    pub fn new(schema: Descriptor) -> Self {
        Self {
            schema: Some(schema),
            ..Self::default()
        }
    }
}

/// Plain data of a response definition.
///
/// `headers` holds ready-made header objects; `response_headers` holds
/// descriptors that are converted (and possibly registered) per header.
#[derive(Debug, Clone, Default)]
pub struct ResponseObject {
    pub description: String,
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    pub response_headers: Option<IndexMap<String, Descriptor>>,
    pub content: Option<IndexMap<String, MediaTypeDef>>,
    /// Requests registration under `#/components/responses/<ref_name>`
    pub ref_name: Option<String>,
    /// Only `x-` prefixed keys reach the response object
    pub extensions: BTreeMap<String, Value>,
}

impl ResponseObject {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn content(mut self, media_type: impl Into<String>, def: MediaTypeDef) -> Self {
        self.content
            .get_or_insert_with(IndexMap::new)
            .insert(media_type.into(), def);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, header: RefOr<Header>) -> Self {
        self.headers
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), header);
        self
    }

    #[must_use]
    pub fn response_header(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.response_headers
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), descriptor);
        self
    }

    #[must_use]
    pub fn ref_name(mut self, name: impl Into<String>) -> Self {
        self.ref_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

/// Handle to an immutable response definition
#[derive(Debug, Clone)]
pub struct ResponseDef {
    id: ComponentId,
    object: Arc<ResponseObject>,
}

impl ResponseDef {
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }
}

impl From<ResponseObject> for ResponseDef {
    fn from(object: ResponseObject) -> Self {
        Self {
            id: ComponentId::next(),
            object: Arc::new(object),
        }
    }
}

impl Deref for ResponseDef {
    type Target = ResponseObject;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl PartialEq for ResponseDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResponseDef {}

/// One value of an input response map
#[derive(Debug, Clone)]
pub enum ResponseEntry {
    /// A response definition or a bare reference to one
    Response(RefOr<ResponseDef>),
    /// A literal value, only valid under specification-extension keys
    Literal(Value),
}

impl From<ResponseDef> for ResponseEntry {
    fn from(def: ResponseDef) -> Self {
        Self::Response(RefOr::Inline(def))
    }
}

impl From<ResponseObject> for ResponseEntry {
    fn from(object: ResponseObject) -> Self {
        ResponseDef::from(object).into()
    }
}

impl From<Reference> for ResponseEntry {
    fn from(reference: Reference) -> Self {
        Self::Response(RefOr::Ref(reference))
    }
}

impl From<Value> for ResponseEntry {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

/// Input response map: status code, `default` or extension key to entry
pub type ResponsesDef = IndexMap<String, ResponseEntry>;
