use autoapi_core::error::ParseError;
use autoapi_core::parse;
use autoapi_core::parse::parameter::{ParameterLocation, ParameterOrRef};

const SUPPLIER: &str = include_str!("fixtures/supplier.json");
const EDGE_CASES: &str = include_str!("fixtures/edge-cases.json");

#[test]
fn parse_supplier_json() {
    let spec = parse::from_json(SUPPLIER).unwrap();
    assert_eq!(spec.swagger.as_deref(), Some("2.0"));
    assert_eq!(spec.info.title, "supplier");
    assert_eq!(spec.base_path(), "/api/v1/scm/");
    assert_eq!(spec.tags.len(), 3);
    assert_eq!(spec.tags[0].description.as_deref(), Some("Supply Item Controller"));

    let paths: Vec<_> = spec.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, ["/myItem/noSupply/{id}", "/myItem/sku"]);

    let definitions: Vec<_> = spec.definitions.keys().map(String::as_str).collect();
    assert_eq!(definitions, ["UpdateSupplyStatusRequest", "SupplyItemSkuRes"]);

    let sku = &spec.definitions["SupplyItemSkuRes"];
    let props: Vec<_> = sku.properties.keys().map(String::as_str).collect();
    assert_eq!(props, ["attribute", "auditAtStamp", "imageList", "pass"]);
}

#[test]
fn parse_parameters() {
    let spec = parse::from_json(SUPPLIER).unwrap();
    let post = spec.paths["/myItem/noSupply/{id}"].post.as_ref().unwrap();
    assert_eq!(post.operation_id.as_deref(), Some("updateSupplyStatusUsingPOST"));
    assert_eq!(post.parameters.len(), 2);

    match &post.parameters[0] {
        ParameterOrRef::Parameter(p) => {
            assert_eq!(p.location, ParameterLocation::Body);
            assert!(p.required);
            assert!(p.schema.is_some());
        }
        ParameterOrRef::Ref { .. } => panic!("expected inline parameter"),
    }
    assert!(post.responses.contains_key("200"));
    assert!(post.responses.contains_key("401"));
}

#[test]
fn parse_parameter_refs_and_path_parameters() {
    let spec = parse::from_json(EDGE_CASES).unwrap();
    let item = &spec.paths["/orders/{orderId}"];
    assert_eq!(item.parameters.len(), 1);
    assert!(item.get.is_some());
    assert!(item.delete.is_some());

    let post = spec.paths["/orders"].post.as_ref().unwrap();
    assert!(matches!(
        &post.parameters[2],
        ParameterOrRef::Ref { ref_path } if ref_path == "#/parameters/pageSize"
    ));
    assert_eq!(spec.parameters["pageSize"].location, ParameterLocation::Query);
}

#[test]
fn parse_yaml() {
    let yaml = r##"
swagger: "2.0"
info:
  title: petstore
basePath: /v1
paths:
  /pets:
    get:
      tags: [pets]
      responses:
        "200":
          description: OK
          schema:
            type: array
            items:
              $ref: "#/definitions/Pet"
definitions:
  Pet:
    type: object
    properties:
      name:
        type: string
"##;
    let spec = parse::from_yaml(yaml).unwrap();
    assert_eq!(spec.info.title, "petstore");
    assert!(spec.paths["/pets"].get.is_some());

    let auto = parse::from_text(yaml).unwrap();
    assert_eq!(auto, spec);
}

#[test]
fn from_text_detects_json() {
    let spec = parse::from_text(SUPPLIER).unwrap();
    assert_eq!(spec.info.title, "supplier");
}

#[test]
fn rejects_openapi_3() {
    let err = parse::from_json(r#"{"openapi": "3.0.1", "info": {"title": "x"}}"#).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(_)));
}

#[test]
fn rejects_swagger_1() {
    let err = parse::from_json(r#"{"swagger": "1.2", "info": {"title": "x"}}"#).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(_)));
}

#[test]
fn accepts_document_without_version() {
    let spec = parse::from_json(r#"{"info": {"title": "x"}, "basePath": "/x"}"#).unwrap();
    assert!(spec.paths.is_empty());
}

#[test]
fn reports_invalid_json() {
    let err = parse::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}
