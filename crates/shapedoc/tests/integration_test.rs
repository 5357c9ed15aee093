use serde_json::json;
use shapedoc::model::{Header, RefOr, Reference, ResponseItem};
use shapedoc::{
    Descriptor, Direction, Generator, HeaderMeta, MediaTypeDef, Registration, ResponseDef,
    ResponseObject, ResponsesDef, SchemaConverter, ShapeConverter,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn plain_response_map_is_inline() {
    init_tracing();
    let d1 = Descriptor::object([
        ("id", Descriptor::integer()),
        ("name", Descriptor::string().optional()),
    ]);
    let mut responses = ResponsesDef::new();
    responses.insert(
        "200".to_string(),
        ResponseObject::new("ok")
            .content("application/json", MediaTypeDef::new(d1.clone()))
            .into(),
    );
    responses.insert("x-foo".to_string(), json!(42).into());

    let mut generator = Generator::new();
    let out = generator.responses(&responses).unwrap();

    let converted = ShapeConverter.convert(&d1, Direction::Output);
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({
            "200": {
                "description": "ok",
                "content": { "application/json": { "schema": converted } }
            },
            "x-foo": 42
        })
    );
    assert!(generator.registry().responses.is_empty());

    let components = generator.finish().unwrap();
    assert_eq!(components.responses, None);
}

#[test]
fn shared_header_descriptor_is_registered_once() {
    init_tracing();
    let h = Descriptor::string().header(HeaderMeta::named("Shared"));
    let mut responses = ResponsesDef::new();
    responses.insert(
        "200".to_string(),
        ResponseObject::new("ok").response_header("X-Shared", h.clone()).into(),
    );
    responses.insert(
        "500".to_string(),
        ResponseObject::new("error").response_header("X-Shared", h.clone()).into(),
    );

    let mut generator = Generator::new();
    let out = generator.responses(&responses).unwrap();

    assert_eq!(generator.registry().headers.len(), 1);
    assert!(matches!(
        generator.registry().headers.get(h.id()),
        Some(Registration::Complete { name, .. }) if name == "Shared"
    ));
    let expected = RefOr::Ref(Reference::header("Shared"));
    for key in ["200", "500"] {
        let ResponseItem::Inline(response) = &out[key] else {
            panic!("{key} should be inline");
        };
        let headers = response.headers.as_ref().expect("headers");
        assert_eq!(headers["X-Shared"], expected);
    }

    let components = generator.finish().unwrap();
    let headers = components.headers.expect("header components");
    assert_eq!(
        serde_json::to_value(&headers["Shared"]).unwrap(),
        json!({ "required": true, "schema": { "type": "string" } })
    );
}

#[test]
fn structurally_equal_descriptors_are_not_merged() {
    let mut responses = ResponsesDef::new();
    responses.insert(
        "200".to_string(),
        ResponseObject::new("ok")
            .response_header("X-A", Descriptor::string())
            .response_header("X-B", Descriptor::string())
            .into(),
    );

    let mut generator = Generator::new();
    let out = generator.responses(&responses).unwrap();
    let ResponseItem::Inline(response) = &out["200"] else {
        panic!("inline response expected");
    };
    let headers = response.headers.as_ref().unwrap();
    assert!(headers.values().all(|h| h.as_inline().is_some()));
    assert!(generator.registry().headers.is_empty());
}

#[test]
fn shared_response_definition_is_referenced() {
    init_tracing();
    let not_found = ResponseDef::from(
        ResponseObject::new("not found")
            .content(
                "application/json",
                MediaTypeDef::new(Descriptor::object([("message", Descriptor::string())])),
            )
            .ref_name("NotFound"),
    );
    let mut first = ResponsesDef::new();
    first.insert("404".to_string(), not_found.clone().into());
    let mut second = ResponsesDef::new();
    second.insert("404".to_string(), not_found.clone().into());
    second.insert("410".to_string(), Reference::response("Gone").into());

    let mut generator = Generator::new();
    let a = generator.responses(&first).unwrap();
    let b = generator.responses(&second).unwrap();

    let reference = ResponseItem::Ref(Reference::response("NotFound"));
    assert_eq!(a["404"], reference);
    assert_eq!(b["404"], reference);
    assert_eq!(b["410"], ResponseItem::Ref(Reference::response("Gone")));
    assert_eq!(generator.registry().responses.len(), 1);

    let components = generator.finish().unwrap();
    let responses = components.responses.unwrap();
    assert_eq!(responses["NotFound"].description, "not found");
}

#[test]
fn required_only_on_inline_headers() {
    let optional_named = Descriptor::integer()
        .optional()
        .header(HeaderMeta::named("Limit"));
    let required_inline = Descriptor::integer();

    let mut generator = Generator::new();
    let named = generator.header(&optional_named).unwrap();
    let inline = generator.header(&required_inline).unwrap();

    let named_json = serde_json::to_value(&named).unwrap();
    assert_eq!(named_json, json!({ "$ref": "#/components/headers/Limit" }));
    assert_eq!(inline.as_inline().unwrap().required, Some(true));

    let components = generator.finish().unwrap();
    assert_eq!(components.headers.unwrap()["Limit"].required, None);
}

#[test]
fn literal_headers_win_over_generated() {
    let literal = Header {
        description: Some("set by the gateway".to_string()),
        ..Header::default()
    };
    let mut responses = ResponsesDef::new();
    responses.insert(
        "200".to_string(),
        ResponseObject::new("ok")
            .response_header("X-Trace", Descriptor::string())
            .header("X-Trace", RefOr::Inline(literal.clone()))
            .into(),
    );

    let mut generator = Generator::new();
    let out = generator.responses(&responses).unwrap();
    let ResponseItem::Inline(response) = &out["200"] else {
        panic!("inline response expected");
    };
    assert_eq!(
        response.headers.as_ref().unwrap()["X-Trace"],
        RefOr::Inline(literal)
    );
}

#[test]
fn separate_generators_do_not_share_registrations() {
    let h = Descriptor::string().header(HeaderMeta::named("Shared"));

    let mut first = Generator::new();
    first.header(&h).unwrap();
    let mut second = Generator::new();
    assert!(second.registry().headers.get(h.id()).is_none());
    second.header(&h).unwrap();

    assert_eq!(first.finish().unwrap(), second.finish().unwrap());
}
