//! Content (media type map) generation

use indexmap::IndexMap;
use shapedoc_core::MediaType;
use std::collections::BTreeMap;

use crate::Generator;
use crate::convert::Direction;
use crate::descriptor::MediaTypeDef;

/// Build the `content` map of a request or response body
pub fn create_content(
    content: &IndexMap<String, MediaTypeDef>,
    generator: &Generator,
    direction: Direction,
) -> BTreeMap<String, MediaType> {
    content
        .iter()
        .map(|(media_type, def)| {
            let media = MediaType {
                schema: def
                    .schema
                    .as_ref()
                    .map(|schema| generator.converter.convert(schema, direction)),
                example: def.example.clone(),
                examples: def.examples.clone(),
            };
            (media_type.clone(), media)
        })
        .collect()
}
