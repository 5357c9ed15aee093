//! Response generation

use shapedoc_core::{RefOr, Reference, Response, ResponseItem, Responses};

use crate::Generator;
use crate::content::create_content;
use crate::convert::Direction;
use crate::descriptor::{ResponseDef, ResponseEntry, ResponsesDef};
use crate::error::{GenerateError, Result};
use crate::extension::{is_specification_extension, specification_extensions};
use crate::header::create_headers;
use crate::registry::Registration;

/// Build one response, or a `$ref` to its registered component.
///
/// Bare references are returned as given. A definition with a name (its own
/// `ref_name`, or a reserved one) is registered on first use and referenced
/// from then on.
pub fn create_response(
    response: &RefOr<ResponseDef>,
    generator: &mut Generator,
) -> Result<RefOr<Response>> {
    let def = match response {
        RefOr::Ref(reference) => return Ok(RefOr::Ref(reference.clone())),
        RefOr::Inline(def) => def,
    };

    let registration = generator.registry.responses.get(def.id());
    if let Some(Registration::Complete { name, .. }) = registration {
        tracing::debug!(%name, "reusing response component");
        return Ok(RefOr::Ref(Reference::response(name)));
    }
    let reserved = registration.map(|r| r.name().to_string());

    let headers = create_headers(
        def.headers.as_ref(),
        def.response_headers.as_ref(),
        generator,
    )?;
    let content = def
        .content
        .as_ref()
        .map(|content| create_content(content, generator, Direction::Output));

    let fragment = Response {
        description: def.description.clone(),
        headers,
        content,
        extensions: specification_extensions(&def.extensions),
    };

    let Some(name) = def.ref_name.clone().or(reserved) else {
        tracing::trace!(id = %def.id(), "inline response");
        return Ok(RefOr::Inline(fragment));
    };

    let reference = Reference::response(&name);
    let policy = generator.options.duplicate_names;
    generator
        .registry
        .responses
        .complete(def.id(), def.clone(), fragment, name, policy)?;
    Ok(RefOr::Ref(reference))
}

/// Build a responses object.
///
/// Specification-extension keys are copied through untouched; every other
/// key is built with [`create_response`]. Keys and their order are kept.
pub fn create_responses(responses: &ResponsesDef, generator: &mut Generator) -> Result<Responses> {
    let mut out = Responses::with_capacity(responses.len());
    for (key, entry) in responses {
        let item = if is_specification_extension(key) {
            match entry {
                ResponseEntry::Literal(value) => ResponseItem::Extension(value.clone()),
                ResponseEntry::Response(RefOr::Ref(reference)) => {
                    ResponseItem::Extension(serde_json::to_value(reference)?)
                }
                ResponseEntry::Response(RefOr::Inline(_)) => {
                    return Err(GenerateError::ExtensionNotLiteral(key.clone()));
                }
            }
        } else {
            match entry {
                ResponseEntry::Response(response) => create_response(response, generator)?.into(),
                ResponseEntry::Literal(_) => {
                    return Err(GenerateError::UnexpectedLiteral(key.clone()));
                }
            }
        };
        out.insert(key.clone(), item);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Descriptor, HeaderMeta, MediaTypeDef, ResponseObject};
    use insta::assert_json_snapshot;
    use serde_json::json;

    fn entry(object: ResponseObject) -> RefOr<ResponseDef> {
        RefOr::Inline(object.into())
    }

    #[test]
    fn bare_reference_passes_through() {
        let mut generator = Generator::new();
        let reference = RefOr::Ref(Reference::response("Elsewhere"));
        let out = create_response(&reference, &mut generator).unwrap();
        assert_eq!(out, RefOr::Ref(Reference::response("Elsewhere")));
        assert!(generator.registry().responses.is_empty());
    }

    #[test]
    fn unnamed_response_is_inline() {
        let mut generator = Generator::new();
        let response = entry(
            ResponseObject::new("created")
                .content("application/json", MediaTypeDef::new(Descriptor::string()))
                .extension("x-owner", json!("billing")),
        );

        let out = create_response(&response, &mut generator).unwrap();
        assert_json_snapshot!(out, @r#"
        {
          "description": "created",
          "content": {
            "application/json": {
              "schema": {
                "type": "string"
              }
            }
          },
          "x-owner": "billing"
        }
        "#);
        assert!(generator.registry().responses.is_empty());
    }

    #[test]
    fn extras_cannot_override_description() {
        let mut generator = Generator::new();
        let response = entry(
            ResponseObject::new("ok")
                .extension("description", json!("overridden"))
                .extension("x-owner", json!("billing")),
        );

        let out = create_response(&response, &mut generator).unwrap();
        let text = serde_json::to_string(&out).unwrap();
        assert_eq!(text, r#"{"description":"ok","x-owner":"billing"}"#);
    }

    #[test]
    fn response_without_headers_has_no_headers_key() {
        let mut generator = Generator::new();
        let out = create_response(&entry(ResponseObject::new("ok")), &mut generator).unwrap();
        let value = serde_json::to_value(out).unwrap();
        assert_eq!(value, json!({ "description": "ok" }));
    }

    #[test]
    fn named_response_is_registered_once() {
        let mut generator = Generator::new();
        let response = entry(ResponseObject::new("missing").ref_name("NotFound"));

        let first = create_response(&response, &mut generator).unwrap();
        let second = create_response(&response, &mut generator).unwrap();

        let expected = RefOr::Ref(Reference::response("NotFound"));
        assert_eq!(first, expected);
        assert_eq!(second, expected);
        assert_eq!(generator.registry().responses.len(), 1);
    }

    #[test]
    fn reserved_response_name_is_used() {
        let mut generator = Generator::new();
        let def = ResponseDef::from(ResponseObject::new("gone"));
        generator.reserve_response(&def, "Gone").unwrap();

        let out = create_response(&RefOr::Inline(def), &mut generator).unwrap();
        assert_eq!(out, RefOr::Ref(Reference::response("Gone")));
    }

    #[test]
    fn response_content_uses_output_direction() {
        let mut generator = Generator::new();
        let body = Descriptor::object([
            ("id", Descriptor::integer().read_only()),
            ("password", Descriptor::string().write_only()),
        ]);
        let response = entry(
            ResponseObject::new("user").content("application/json", MediaTypeDef::new(body)),
        );

        let out = create_response(&response, &mut generator).unwrap();
        let value = serde_json::to_value(out).unwrap();
        let props = &value["content"]["application/json"]["schema"]["properties"];
        assert!(props.get("id").is_some());
        assert!(props.get("password").is_none());
    }

    #[test]
    fn registered_response_keeps_header_refs() {
        let mut generator = Generator::new();
        let shared = Descriptor::string().header(HeaderMeta::named("Shared"));
        let response = entry(
            ResponseObject::new("ok")
                .response_header("X-Shared", shared)
                .ref_name("Ok"),
        );
        create_response(&response, &mut generator).unwrap();

        let responses = generator.registry().export_responses().unwrap();
        assert_eq!(
            serde_json::to_value(&responses["Ok"]).unwrap(),
            json!({
                "description": "ok",
                "headers": { "X-Shared": { "$ref": "#/components/headers/Shared" } }
            })
        );
    }

    #[test]
    fn extension_keys_pass_through() {
        let mut generator = Generator::new();
        let mut responses = ResponsesDef::new();
        responses.insert("x-internal".to_string(), json!({ "team": "core" }).into());
        responses.insert("x-alias".to_string(), Reference::response("Ok").into());

        let out = create_responses(&responses, &mut generator).unwrap();
        assert_eq!(
            out["x-internal"],
            ResponseItem::Extension(json!({ "team": "core" }))
        );
        assert_eq!(
            out["x-alias"],
            ResponseItem::Extension(json!({ "$ref": "#/components/responses/Ok" }))
        );
        assert!(generator.registry().responses.is_empty());
        assert!(generator.registry().headers.is_empty());
    }

    #[test]
    fn extension_key_rejects_definitions() {
        let mut generator = Generator::new();
        let mut responses = ResponsesDef::new();
        responses.insert("x-weird".to_string(), ResponseObject::new("ok").into());

        let err = create_responses(&responses, &mut generator).unwrap_err();
        assert!(matches!(err, GenerateError::ExtensionNotLiteral(key) if key == "x-weird"));
    }

    #[test]
    fn status_key_rejects_literals() {
        let mut generator = Generator::new();
        let mut responses = ResponsesDef::new();
        responses.insert("200".to_string(), json!("ok").into());

        let err = create_responses(&responses, &mut generator).unwrap_err();
        assert!(matches!(err, GenerateError::UnexpectedLiteral(key) if key == "200"));
    }

    #[test]
    fn keys_and_order_are_kept() {
        let mut generator = Generator::new();
        let mut responses = ResponsesDef::new();
        responses.insert("404".to_string(), Reference::response("NotFound").into());
        responses.insert("x-meta".to_string(), json!(1).into());
        responses.insert("200".to_string(), ResponseObject::new("ok").into());
        responses.insert("default".to_string(), ResponseObject::new("error").into());

        let out = create_responses(&responses, &mut generator).unwrap();
        let keys: Vec<_> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["404", "x-meta", "200", "default"]);
    }
}
