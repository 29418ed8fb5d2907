use oir_core::error::TransformError;
use oir_core::ir::{
    Body, Constraint, EnumKind, Location, Method, Model, NamingContext, Node, Primitive, Root,
    Route,
};
use oir_core::parse;
use oir_core::transform::{self, Api};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const UNIONS: &str = include_str!("fixtures/unions.yaml");

fn api(yaml: &str) -> Api {
    transform::transform(&parse::from_yaml(yaml).unwrap()).unwrap()
}

fn named_model<'a>(api: &'a Api, name: &str) -> &'a Model {
    api.models
        .iter()
        .find(|m| m.context() == Some(&NamingContext::named(name)))
        .unwrap_or_else(|| panic!("no model named {name}"))
}

fn find_route<'a>(root: &'a Root, operation_id: &str) -> &'a Route {
    fn walk<'a>(routes: &'a [Route], nodes: &'a [Node], id: &str) -> Option<&'a Route> {
        routes
            .iter()
            .find(|r| r.operation_id == id)
            .or_else(|| nodes.iter().find_map(|n| walk(&n.routes, &n.nodes, id)))
    }
    walk(&root.routes, &root.nodes, operation_id)
        .unwrap_or_else(|| panic!("no route {operation_id}"))
}

#[test]
fn transformation_is_deterministic() {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    assert_eq!(transform::transform(&doc).unwrap(), transform::transform(&doc).unwrap());
}

#[test]
fn component_models_keep_declaration_order() {
    let api = api(PETSTORE);
    assert_eq!(api.title, "Petstore");
    assert_eq!(api.models.len(), 7);
    // Pet first, as declared.
    assert_eq!(
        api.models[0].context(),
        Some(&NamingContext::named("Pet"))
    );
}

#[test]
fn object_with_references_and_free_form_member() {
    let api = api(PETSTORE);
    let Model::Object {
        properties,
        inline,
        additional_properties,
        ..
    } = named_model(&api, "Pet")
    else {
        panic!("Pet should be an object");
    };

    assert_eq!(properties.len(), 5);
    assert!(!additional_properties);
    assert!(inline.is_empty(), "references are not inline models");

    let id = &properties[0];
    assert!(id.required);
    assert!(matches!(
        id.model,
        Model::Primitive { kind: Primitive::Int, .. }
    ));

    let tag = properties.iter().find(|p| p.name == "tag").unwrap();
    assert_eq!(
        tag.model.context(),
        Some(&NamingContext::named("Tag"))
    );

    // `type: object` + `additionalProperties: true` and no properties is
    // free-form JSON, not an object.
    let metadata = properties.iter().find(|p| p.name == "metadata").unwrap();
    assert_eq!(metadata.model, Model::FreeFormJson { description: None });
}

#[test]
fn closed_enum_with_default() {
    let api = api(PETSTORE);
    match named_model(&api, "PetStatus") {
        Model::Enum {
            base,
            values,
            kind,
            default,
            nullable,
            ..
        } => {
            assert_eq!(*base, Primitive::String);
            assert_eq!(values, &vec!["available", "pending", "sold"]);
            assert_eq!(*kind, EnumKind::Closed);
            assert_eq!(default.as_deref(), Some("available"));
            assert!(!nullable);
        }
        other => panic!("expected an enum, got {other:?}"),
    }
}

#[test]
fn unique_items_stays_a_list() {
    let api = api(PETSTORE);
    let list = api
        .models
        .iter()
        .find(|m| matches!(m, Model::List { .. }))
        .unwrap();
    let Model::List { items, constraint, .. } = list else {
        unreachable!();
    };
    assert_eq!(items.context(), Some(&NamingContext::named("Pet")));
    assert!(constraint.as_ref().unwrap().unique_items());
}

#[test]
fn schema_valued_additional_properties_becomes_a_map() {
    let api = api(PETSTORE);
    let map = api
        .models
        .iter()
        .find(|m| matches!(m, Model::Map { .. }))
        .unwrap();
    let Model::Map { values, .. } = map else {
        unreachable!();
    };
    assert_eq!(values.context(), Some(&NamingContext::named("Pet")));
}

#[test]
fn routes_group_by_static_path_segments() {
    let api = api(PETSTORE);
    assert!(api.root.routes.is_empty());

    let pets = api.root.nodes.iter().find(|n| n.name == "pets").unwrap();
    assert_eq!(pets.routes.len(), 3);

    let admin = api.root.nodes.iter().find(|n| n.name == "admin").unwrap();
    assert_eq!(admin.nodes.len(), 1);
    assert_eq!(admin.nodes[0].name, "projects");
    assert_eq!(admin.nodes[0].routes.len(), 1);
}

#[test]
fn query_parameter_with_bounds() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "listPets");

    assert_eq!(route.method, Method::Get);
    assert_eq!(route.inputs.len(), 1);
    let limit = &route.inputs[0];
    assert_eq!(limit.name, "limit");
    assert_eq!(limit.location, Location::Query);
    assert!(!limit.required);
    match &limit.model {
        Model::Primitive { kind, constraint, .. } => {
            assert_eq!(*kind, Primitive::Int);
            assert!(matches!(constraint, Some(Constraint::Number { .. })));
        }
        other => panic!("expected an integer, got {other:?}"),
    }
}

#[test]
fn path_item_parameters_apply_to_operations() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "getPet");

    assert_eq!(route.inputs.len(), 1);
    assert_eq!(route.inputs[0].name, "petId");
    assert_eq!(route.inputs[0].location, Location::Path);
    assert!(route.inputs[0].required);
}

#[test]
fn success_and_default_returns() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "listPets");

    assert_eq!(route.returns.success.as_deref(), Some("200"));
    let ok = route.returns.success_return().unwrap();
    assert!(matches!(
        ok.content.get("application/json").unwrap(),
        Model::List { .. }
    ));

    let fallback = route.returns.default.as_ref().unwrap();
    assert_eq!(
        fallback.content.get("application/json").unwrap().context(),
        Some(&NamingContext::named("Error"))
    );
}

#[test]
fn content_less_response_returns_unit() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "getPet");
    let not_found = route.returns.by_status.get("404").unwrap();
    assert!(matches!(
        not_found.primary(),
        Model::Primitive { kind: Primitive::Unit, .. }
    ));
}

#[test]
fn form_body_expands_referenced_object_fields() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "createPet");

    let bodies = route.bodies.as_ref().unwrap();
    assert!(bodies.required);

    match bodies.content.get("application/json").unwrap() {
        Body::Typed { model } => {
            assert_eq!(model.context(), Some(&NamingContext::named("Pet")));
        }
        other => panic!("expected a whole-body variant, got {other:?}"),
    }

    match bodies.content.get("multipart/form-data").unwrap() {
        Body::Form { fields } => {
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, "name");
            assert!(fields[0].required);
            assert!(matches!(fields[1].model, Model::OctetStream { .. }));
            assert!(!fields[1].required);
        }
        other => panic!("expected expanded form fields, got {other:?}"),
    }
}

#[test]
fn missing_operation_id_is_synthesized_from_path_and_method() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "idByPost");
    assert_eq!(route.path, "/admin/projects/{id}");
    assert_eq!(route.method, Method::Post);
}

#[test]
fn inline_response_object_lands_in_route_nested() {
    let api = api(PETSTORE);
    let route = find_route(&api.root, "idByPost");

    assert_eq!(route.nested.len(), 1);
    match &route.nested[0] {
        Model::Object { context, properties, .. } => {
            assert_eq!(
                context,
                &NamingContext::RouteBody {
                    name: "idByPost".to_string(),
                    postfix: "Response200".to_string(),
                }
            );
            assert_eq!(properties[0].name, "ok");
        }
        other => panic!("expected an inline object, got {other:?}"),
    }
}

#[test]
fn webhooks_become_pseudo_path_routes() {
    let api = api(PETSTORE);
    let hook = api.root.nodes.iter().find(|n| n.name == "petExpired").unwrap();
    assert_eq!(hook.routes.len(), 1);
    let route = &hook.routes[0];
    assert_eq!(route.operation_id, "post");
    assert_eq!(route.method, Method::Post);
    let body = route.bodies.as_ref().unwrap();
    assert!(matches!(
        body.content.get("application/json").unwrap(),
        Body::Typed { model } if model.context() == Some(&NamingContext::named("Pet"))
    ));
}

#[test]
fn single_branch_composition_flattens_to_the_inner_model() {
    let api = api(UNIONS);
    // Wrapped is anyOf with one $ref branch: exactly a reference, not a
    // 1-case union, with the outer description carried over.
    let wrapped = &api.models[8];
    match wrapped {
        Model::Reference { context, description, .. } => {
            assert_eq!(context, &NamingContext::named("User"));
            assert_eq!(description.as_deref(), Some("An aliased user."));
        }
        other => panic!("expected a reference, got {other:?}"),
    }
}

#[test]
fn string_enum_case_is_named_and_ordered_before_the_string_case() {
    let api = api(UNIONS);
    let Model::Union { cases, default, inline, .. } = named_model(&api, "Mode") else {
        panic!("Mode should be a union");
    };

    assert_eq!(cases.len(), 2);
    match &cases[0] {
        Model::Enum { context, values, .. } => {
            assert_eq!(context, &NamingContext::named("Mode").nest("AutoOrManual"));
            assert_eq!(values, &vec!["Auto", "Manual"]);
        }
        other => panic!("expected the enum case first, got {other:?}"),
    }
    assert!(cases[1].is_string_primitive());
    assert_eq!(default.as_deref(), Some("Auto"));
    assert_eq!(inline.len(), 1);
}

#[test]
fn string_enum_beside_plain_string_is_an_open_enum() {
    let api = api(UNIONS);
    match named_model(&api, "Role") {
        Model::Enum { values, kind, default, .. } => {
            assert_eq!(values, &vec!["admin", "user"]);
            assert_eq!(*kind, EnumKind::Open);
            assert_eq!(default.as_deref(), Some("admin"));
        }
        other => panic!("expected an open enum, got {other:?}"),
    }
}

#[test]
fn null_branch_unwraps_to_a_nullable_model() {
    let api = api(UNIONS);
    // MaybeName is anyOf [string, null].
    assert_eq!(
        api.models[2],
        Model::Primitive {
            kind: Primitive::String,
            description: None,
            default: None,
            nullable: true,
            constraint: None,
        }
    );
}

#[test]
fn discriminated_union_names_cases_by_tag_value() {
    let api = api(UNIONS);
    let Model::Union { cases, discriminator, .. } = named_model(&api, "Event") else {
        panic!("Event should be a union");
    };

    let d = discriminator.as_ref().unwrap();
    assert_eq!(d.property, "type");
    assert_eq!(
        d.mapping,
        vec![("created".to_string(), "CreatedEvent".to_string())]
    );

    // The inline object case sorts before the single-name reference case
    // and is named after its tag value.
    assert_eq!(
        cases[0].context(),
        Some(&NamingContext::named("Event").nest("Deleted"))
    );
    assert_eq!(
        cases[1].context(),
        Some(&NamingContext::named("CreatedEvent"))
    );
}

#[test]
fn all_of_merges_object_branches() {
    let api = api(UNIONS);
    let Model::Object { properties, .. } = named_model(&api, "User") else {
        panic!("User should be a merged object");
    };

    assert_eq!(properties.len(), 2);
    let id = properties.iter().find(|p| p.name == "id").unwrap();
    assert!(id.required);
    let username = properties.iter().find(|p| p.name == "username").unwrap();
    assert!(!username.required);
}

#[test]
fn all_of_merges_through_nested_all_of_branches() {
    let api = api(UNIONS);
    let Model::Object { properties, .. } = named_model(&api, "AuditedUser") else {
        panic!("AuditedUser should be a merged object");
    };

    // The first branch is itself an allOf; its nested properties must
    // survive the merge alongside the sibling branch's.
    assert_eq!(properties.len(), 2);
    let id = properties.iter().find(|p| p.name == "id").unwrap();
    assert!(id.required);
    assert!(properties.iter().any(|p| p.name == "note"));
}

#[test]
fn all_of_with_a_scalar_branch_falls_back_to_a_union() {
    let api = api(UNIONS);
    let Model::Union { cases, .. } = named_model(&api, "IdOrLabel") else {
        panic!("IdOrLabel should fall back to a union of its branches");
    };

    assert_eq!(cases.len(), 2);
    assert!(matches!(&cases[0], Model::Object { properties, .. }
        if properties.len() == 1 && properties[0].name == "id"));
    assert!(cases[1].is_string_primitive());
}

#[test]
fn circular_all_of_reference_is_a_fatal_error() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.1.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Loop:
      allOf:
        - $ref: '#/components/schemas/Loop'
    Choice:
      oneOf:
        - allOf:
            - $ref: '#/components/schemas/Loop'
        - type: string
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::UnsupportedSchema(_))
    ));
}

#[test]
fn shared_all_of_base_is_not_a_cycle() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.1.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Base:
      allOf:
        - type: object
          properties:
            id:
              type: integer
    Left:
      allOf:
        - $ref: '#/components/schemas/Base'
        - type: object
          properties:
            left:
              type: string
    Right:
      allOf:
        - $ref: '#/components/schemas/Base'
        - type: object
          properties:
            right:
              type: string
    Both:
      allOf:
        - $ref: '#/components/schemas/Left'
        - $ref: '#/components/schemas/Right'
"#,
    )
    .unwrap();
    let api = transform::transform(&doc).unwrap();
    let Model::Object { properties, .. } = named_model(&api, "Both") else {
        panic!("Both should merge through the shared base");
    };
    let names: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["id", "left", "right"]);
}

#[test]
fn recursive_anchor_resolves_to_a_named_reference() {
    let api = api(UNIONS);
    let Model::Object { properties, .. } = named_model(&api, "Filter") else {
        panic!("Filter should be an object");
    };

    let children = properties.iter().find(|p| p.name == "children").unwrap();
    let Model::List { items, .. } = &children.model else {
        panic!("children should be a list");
    };
    assert_eq!(
        **items,
        Model::Reference {
            context: NamingContext::named("Filter"),
            description: None,
            nullable: false,
        }
    );
}

#[test]
fn type_array_becomes_a_nullable_union() {
    let api = api(UNIONS);
    let Model::Union { cases, nullable, .. } = named_model(&api, "Value") else {
        panic!("Value should be a union");
    };

    assert!(nullable, "a null entry in the type array forces nullability");
    assert_eq!(cases.len(), 2);
    assert!(matches!(
        cases[0],
        Model::Primitive { kind: Primitive::Int, .. }
    ));
    assert!(cases[1].is_string_primitive(), "the string case sorts last");
}

#[test]
fn unknown_reference_is_a_fatal_lookup_error() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.0.0
info: {title: T, version: '1'}
paths:
  /a:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Missing'
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::Lookup(_))
    ));
}

#[test]
fn closed_object_without_properties_is_illegal() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.0.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Nothing:
      type: object
      additionalProperties: false
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::IllegalConstraint(_))
    ));
}

#[test]
fn array_without_items_is_missing_a_field() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.0.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Bare:
      type: array
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::MissingField("items"))
    ));
}

#[test]
fn mistyped_scalar_default_is_rejected() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.0.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Count:
      type: integer
      default: lots
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::InvalidDefault { expected: "integer", .. })
    ));
}

#[test]
fn recursive_ref_without_anchor_fails() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.1.0
info: {title: T, version: '1'}
paths: {}
components:
  schemas:
    Orphan:
      $recursiveRef: '#'
"#,
    )
    .unwrap();
    assert!(matches!(
        transform::transform(&doc),
        Err(TransformError::Lookup(_))
    ));
}

#[test]
fn media_type_without_schema_falls_back_to_free_form() {
    let doc = parse::from_yaml(
        r#"
openapi: 3.0.0
info: {title: T, version: '1'}
paths:
  /raw:
    get:
      operationId: raw
      responses:
        '200':
          description: anything
          content:
            application/json: {}
"#,
    )
    .unwrap();
    let api = transform::transform(&doc).unwrap();
    let route = find_route(&api.root, "raw");
    let ok = route.returns.by_status.get("200").unwrap();
    assert_eq!(
        ok.content.get("application/json").unwrap(),
        &Model::FreeFormJson { description: None }
    );
}
