//! Descriptor to schema conversion

use serde::{Deserialize, Serialize};
use shapedoc_core::{Schema, SchemaRef};
use std::collections::BTreeMap;

use crate::descriptor::{Descriptor, Shape};

/// Which side of an exchange a schema describes.
///
/// Request bodies and parameters are `Input`, response bodies `Output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Input,
    Output,
}

/// Turns a descriptor into a document schema.
///
/// Header generation requires the result to be an inline schema; returning a
/// [`SchemaRef::Ref`] there aborts the build.
pub trait SchemaConverter {
    fn convert(&self, descriptor: &Descriptor, direction: Direction) -> SchemaRef;
}

impl<F> SchemaConverter for F
where
    F: Fn(&Descriptor, Direction) -> SchemaRef,
{
    fn convert(&self, descriptor: &Descriptor, direction: Direction) -> SchemaRef {
        self(descriptor, direction)
    }
}

/// Converter for the built-in [`Shape`] model.
///
/// Optional wrappers are transparent: optionality only decides whether an
/// object property is listed in `required`. Read-only properties are left out
/// of `Input` schemas and write-only properties out of `Output` schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeConverter;

impl ShapeConverter {
    fn schema(&self, descriptor: &Descriptor, direction: Direction) -> Schema {
        let mut schema = match descriptor.shape() {
            Shape::String => Schema::string(),
            Shape::Integer => Schema::integer(),
            Shape::Number => Schema::number(),
            Shape::Boolean => Schema::boolean(),
            Shape::Array(items) => Schema::array(self.convert(items, direction)),
            Shape::Object(fields) => {
                let mut properties = BTreeMap::new();
                let mut required = Vec::new();
                for (name, field) in fields {
                    if !is_visible(field, direction) {
                        continue;
                    }
                    if !field.is_optional() {
                        required.push(name.clone());
                    }
                    properties.insert(name.clone(), self.convert(field, direction));
                }
                Schema {
                    properties: Some(properties),
                    required: (!required.is_empty()).then_some(required),
                    ..Schema::object()
                }
            }
            Shape::Optional(inner) => self.schema(inner, direction),
        };

        if let Some(description) = descriptor.get_description() {
            schema.description = Some(description.to_string());
        }
        if let Some(example) = descriptor.get_example() {
            schema.example = Some(example.clone());
        }
        if descriptor.is_read_only() {
            schema.read_only = Some(true);
        }
        if descriptor.is_write_only() {
            schema.write_only = Some(true);
        }
        schema
    }
}

impl SchemaConverter for ShapeConverter {
    fn convert(&self, descriptor: &Descriptor, direction: Direction) -> SchemaRef {
        self.schema(descriptor, direction).into()
    }
}

fn is_visible(field: &Descriptor, direction: Direction) -> bool {
    let (read_only, write_only) = match field.shape() {
        Shape::Optional(inner) => (
            field.is_read_only() || inner.is_read_only(),
            field.is_write_only() || inner.is_write_only(),
        ),
        _ => (field.is_read_only(), field.is_write_only()),
    };
    match direction {
        Direction::Input => !read_only,
        Direction::Output => !write_only,
    }
}
