use std::sync::Arc;

use graphql_text_transform::Configuration;
use graphql_text_transform::FieldError;
use graphql_text_transform::SchemaError;
use graphql_text_transform::rewrite_schema;
use graphql_text_transform::schema::ExecutableSchema;
use graphql_text_transform::schema::SchemaGraph;
use graphql_text_transform::schema::resolver_fn;
use pretty_assertions::assert_eq;
use serde_json_bytes::Value;
use serde_json_bytes::json;

const SDL: &str = r#"
    type Query {
        greeting(name: String): String!
        user: User
        users: [User!]!
        tags: [String]!
        matrix: [[String!]]
        count: Int
    }

    interface Named {
        name: String
    }

    type User implements Named {
        id: ID!
        name: String
        bio: String
        role: Role
        friends: [User]
    }

    enum Role {
        ADMIN
        MEMBER
    }
"#;

/// A graph with a sync-style and an async resolver, the other fields reading parent properties.
fn graph() -> SchemaGraph {
    let mut graph = SchemaGraph::parse(SDL).unwrap();
    let query = graph.get_object_mut("Query").unwrap();
    query.fields.get_mut("greeting").unwrap().resolver =
        Some(resolver_fn(|_, arguments| async move {
            let name = arguments
                .as_object()
                .and_then(|arguments| arguments.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("world")
                .to_string();
            Ok::<_, FieldError>(json!(format!("hello, {name}")))
        }));
    query.fields.get_mut("user").unwrap().resolver = Some(resolver_fn(|_, _| async {
        tokio::task::yield_now().await;
        Ok::<_, FieldError>(json!({"id": "1", "name": "ann lee", "bio": null, "role": "ADMIN"}))
    }));
    graph
}

fn rewritten() -> ExecutableSchema {
    let mut graph = graph();
    rewrite_schema(&mut graph, &Configuration::default()).unwrap();
    graph.finish().unwrap()
}

fn root() -> Value {
    json!({
        "tags": ["ann", null, "BOB"],
        "matrix": [["the fox"], null],
        "count": 3
    })
}

#[tokio::test]
async fn omitting_the_argument_preserves_results() {
    let original = graph().finish().unwrap();
    let rewritten = rewritten();
    let user = json!({"id": "1", "name": "ann lee"});

    for (type_name, field_name, parent, arguments) in [
        ("Query", "greeting", root(), json!({})),
        ("Query", "greeting", root(), json!({"name": "bob"})),
        ("Query", "tags", root(), json!({})),
        ("Query", "matrix", root(), json!({})),
        ("Query", "count", root(), json!({})),
        ("Query", "user", root(), json!({})),
        ("User", "name", user.clone(), json!({})),
        ("User", "bio", user.clone(), json!({"transform": null})),
    ] {
        assert_eq!(
            rewritten
                .resolve_field(type_name, field_name, &parent, &arguments)
                .await,
            original
                .resolve_field(type_name, field_name, &parent, &arguments)
                .await,
            "{type_name}.{field_name}"
        );
    }
}

#[tokio::test]
async fn modes_are_applied_to_resolved_values() {
    let schema = rewritten();
    let user = json!({"name": "ann lee"});

    let cases = [
        (
            "Query",
            "greeting",
            root(),
            json!({"transform": "UPPERCASE"}),
            json!("HELLO, WORLD"),
        ),
        (
            "Query",
            "greeting",
            root(),
            json!({"name": "BOB", "transform": "LOWERCASE"}),
            json!("hello, bob"),
        ),
        (
            "User",
            "name",
            user.clone(),
            json!({"transform": "TITLECASE"}),
            json!("Ann Lee"),
        ),
        (
            "User",
            "bio",
            user.clone(),
            json!({"transform": "TITLECASE"}),
            Value::Null,
        ),
        (
            "Query",
            "tags",
            root(),
            json!({"transform": "LOWERCASE"}),
            json!(["ann", null, "bob"]),
        ),
        (
            "Query",
            "matrix",
            root(),
            json!({"transform": "TITLECASE"}),
            json!([["The Fox"], null]),
        ),
    ];
    for (type_name, field_name, parent, arguments, expected) in cases {
        assert_eq!(
            schema
                .resolve_field(type_name, field_name, &parent, &arguments)
                .await,
            Ok(expected),
            "{type_name}.{field_name} with {arguments:?}"
        );
    }
}

#[tokio::test]
async fn concurrent_requests_keep_their_own_mode() {
    let schema = rewritten();
    let user = json!({"name": "ann lee"});
    let upper = json!({"transform": "UPPERCASE"});
    let title = json!({"transform": "TITLECASE"});
    let none = json!({});

    let (upper, title, none, list) = tokio::join!(
        schema.resolve_field("User", "name", &user, &upper),
        schema.resolve_field("User", "name", &user, &title),
        schema.resolve_field("User", "name", &user, &none),
        schema.resolve_field("Query", "user", &Value::Null, &none),
    );
    assert_eq!(upper, Ok(json!("ANN LEE")));
    assert_eq!(title, Ok(json!("Ann Lee")));
    assert_eq!(none, Ok(json!("ann lee")));
    assert!(list.is_ok());

    let tasks: Vec<_> = ["UPPERCASE", "LOWERCASE", "TITLECASE"]
        .into_iter()
        .map(|mode| {
            let schema = schema.clone();
            tokio::spawn(async move {
                let arguments = json!({ "transform": mode });
                schema
                    .resolve_field("Query", "greeting", &Value::Null, &arguments)
                    .await
            })
        })
        .collect();
    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap().unwrap());
    }
    assert_eq!(
        results,
        [json!("HELLO, WORLD"), json!("hello, world"), json!("Hello, World")]
    );
}

#[tokio::test]
async fn invalid_mode_fails_the_field_only() {
    let schema = rewritten();
    let error = schema
        .resolve_field("Query", "greeting", &root(), &json!({"transform": "SHOUT"}))
        .await
        .unwrap_err();
    assert_eq!(error.extension_code(), "INVALID_ARGUMENT");
    insta::assert_snapshot!(error, @r#"invalid value for argument 'transform': "SHOUT""#);

    assert_eq!(
        schema
            .resolve_field("Query", "greeting", &root(), &json!({"transform": "UPPERCASE"}))
            .await,
        Ok(json!("HELLO, WORLD"))
    );
}

#[tokio::test]
async fn non_text_runtime_values_pass_through() {
    let schema = rewritten();
    let parent = json!({"tags": "not a list", "matrix": [[1, true]]});
    assert_eq!(
        schema
            .resolve_field("Query", "tags", &parent, &json!({"transform": "UPPERCASE"}))
            .await,
        Ok(json!("not a list"))
    );
    assert_eq!(
        schema
            .resolve_field("Query", "matrix", &parent, &json!({"transform": "UPPERCASE"}))
            .await,
        Ok(json!([[1, true]]))
    );
}

#[test]
fn non_text_fields_are_untouched() {
    let before = graph();
    let mut after = graph();
    rewrite_schema(&mut after, &Configuration::default()).unwrap();

    for (type_name, field_name) in [
        ("Query", "user"),
        ("Query", "users"),
        ("Query", "count"),
        ("User", "id"),
        ("User", "role"),
        ("User", "friends"),
    ] {
        let before = &before.get_object(type_name).unwrap().fields[field_name];
        let after = &after.get_object(type_name).unwrap().fields[field_name];
        assert_eq!(
            before.arguments.keys().collect::<Vec<_>>(),
            after.arguments.keys().collect::<Vec<_>>(),
            "{type_name}.{field_name}"
        );
        match (&before.resolver, &after.resolver) {
            (Some(before), Some(after)) => assert!(Arc::ptr_eq(before, after)),
            (None, None) => {}
            _ => panic!("resolver of {type_name}.{field_name} was replaced"),
        }
    }
}

#[test]
fn only_object_fields_are_augmented() {
    let mut graph = graph();
    let report = rewrite_schema(&mut graph, &Configuration::default()).unwrap();
    let augmented: Vec<_> = report
        .augmented
        .iter()
        .map(|(type_name, field_name)| format!("{type_name}.{field_name}"))
        .collect();
    assert_eq!(
        augmented,
        ["Query.greeting", "Query.tags", "Query.matrix", "User.name", "User.bio"]
    );
    assert_eq!(report.skipped, 6);

    let schema = graph.finish().unwrap();
    let compiled = schema.schema();
    let greeting = compiled.type_field("Query", "greeting").unwrap();
    assert!(greeting.argument_by_name("name").is_some());
    let transform = greeting.argument_by_name("transform").unwrap();
    assert_eq!(transform.ty.to_string(), "TextTransform");
    assert!(
        compiled
            .type_field("Named", "name")
            .unwrap()
            .argument_by_name("transform")
            .is_none()
    );
}

#[test]
fn exported_sdl_declares_the_enum() {
    let schema = rewritten();
    let sdl = schema.sdl();
    assert!(sdl.contains("enum TextTransform"));
    for value in ["UPPERCASE", "LOWERCASE", "TITLECASE"] {
        assert!(sdl.contains(value), "{value} missing from {sdl}");
    }
}

#[test]
fn rewriting_twice_is_rejected() {
    let mut graph = graph();
    rewrite_schema(&mut graph, &Configuration::default()).unwrap();
    assert!(matches!(
        rewrite_schema(&mut graph, &Configuration::default()),
        Err(SchemaError::DuplicateType(_))
    ));

    let name = &graph.get_object("User").unwrap().fields["name"];
    assert_eq!(name.arguments.len(), 1);
}

#[test]
fn directives_survive_the_rewrite() {
    let mut graph = SchemaGraph::parse(
        r#"
        directive @tag(name: String!) on FIELD_DEFINITION
        type Query {
            old: String @deprecated(reason: "use new")
            new: String @tag(name: "fresh")
            count: Int @deprecated
        }
        "#,
    )
    .unwrap();
    rewrite_schema(&mut graph, &Configuration::default()).unwrap();
    let schema = graph.finish().unwrap();

    let sdl = schema.sdl();
    assert!(sdl.contains(r#"@deprecated(reason: "use new")"#), "{sdl}");
    assert!(sdl.contains("directive @tag"), "{sdl}");

    let compiled = schema.schema();
    let old = compiled.type_field("Query", "old").unwrap();
    assert!(old.directives.get("deprecated").is_some());
    assert!(old.argument_by_name("transform").is_some());
    let new = compiled.type_field("Query", "new").unwrap();
    assert!(new.directives.get("tag").is_some());
    let count = compiled.type_field("Query", "count").unwrap();
    assert!(count.directives.get("deprecated").is_some());
    assert!(count.arguments.is_empty());
}

#[tokio::test]
async fn custom_root_operation_types_are_kept() {
    let mut graph = SchemaGraph::parse(
        r#"
        schema { query: Root }
        type Root { motto: String }
        "#,
    )
    .unwrap();
    let report = rewrite_schema(&mut graph, &Configuration::default()).unwrap();
    assert_eq!(report.augmented.len(), 1);

    let schema = graph.finish().unwrap();
    assert!(schema.sdl().contains("query: Root"));
    let root = json!({"motto": "carpe diem"});
    assert_eq!(
        schema
            .resolve_field("Root", "motto", &root, &json!({"transform": "TITLECASE"}))
            .await,
        Ok(json!("Carpe Diem"))
    );
}
