use pretty_assertions::assert_eq;

use dbsketch::describe::*;
use dbsketch::{Format, render};

fn user_and_address() -> Description {
    Description {
        objects: vec![
            DescribedObject {
                name: "User".into(),
                cols: vec![
                    DescribedColumn {
                        type_label: "INTEGER".into(),
                        name: "id".into(),
                        role: Some(Role::Pk),
                    },
                    DescribedColumn {
                        type_label: "VARCHAR(50)".into(),
                        name: "name".into(),
                        role: None,
                    },
                ],
                props: vec!["address".into()],
                methods: vec!["login".into()],
                indexes: vec![DescribedIndex {
                    name: "ix_user_name".into(),
                    cols: vec!["name".into()],
                }],
            },
            DescribedObject {
                name: "Address".into(),
                cols: vec![
                    DescribedColumn {
                        type_label: "INTEGER".into(),
                        name: "id".into(),
                        role: Some(Role::Pk),
                    },
                    DescribedColumn {
                        type_label: "INTEGER".into(),
                        name: "user_id".into(),
                        role: Some(Role::Fk),
                    },
                ],
                props: vec![],
                methods: vec![],
                indexes: vec![],
            },
        ],
        relations: vec![Relation {
            from: "Address".into(),
            by: "user_id".into(),
            to: "User".into(),
        }],
        inherits: vec![],
    }
}

#[test]
fn plantuml_snapshot() {
    let output = render(&user_and_address(), Format::PlantUml);
    let expected = format!(
        "@startuml

skinparam defaultFontName Courier

Class User {{
    INTEGER     ■ id
    VARCHAR[50]   name
    +           address
    login()
    INDEX[name] » ix_user_name
}}

Class Address {{
    INTEGER ■ id
    INTEGER □ user_id
}}

Address <--o User: user_id

right footer generated by dbsketch v{}

@enduml",
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(output, expected);
}

#[test]
fn plantuml_empty_class_body() {
    let description = Description {
        objects: vec![DescribedObject {
            name: "Ghost".into(),
            cols: vec![],
            props: vec![],
            methods: vec![],
            indexes: vec![],
        }],
        relations: vec![],
        inherits: vec![],
    };
    let output = render(&description, Format::PlantUml);
    assert!(output.contains("Class Ghost {\n\n}"));
}

#[test]
fn plantuml_inheritance_block() {
    let description = Description {
        objects: vec![],
        relations: vec![],
        inherits: vec![InheritanceEdge {
            child: "Admin".into(),
            parent: "User".into(),
        }],
    };
    let output = render(&description, Format::PlantUml);
    assert!(output.contains("\n\nUser <|-- Admin\n\n"));
}

#[test]
fn dot_output_contains_nodes_and_edges() {
    let output = render(&user_and_address(), Format::Dot);
    assert!(output.starts_with("digraph schema {"));
    assert!(output.contains(r#""User" [label=<"#));
    assert!(output.contains(r#""Address" [label=<"#));
    assert!(output.contains(r#""Address" -> "User" [label = "user_id", arrowhead = "odot"];"#));
    assert!(output.contains("generated by dbsketch v"));
}

#[test]
fn dot_escapes_type_labels() {
    let description = Description {
        objects: vec![DescribedObject {
            name: "Event".into(),
            cols: vec![DescribedColumn {
                type_label: "INTERVAL<DAY>".into(),
                name: "span".into(),
                role: None,
            }],
            props: vec![],
            methods: vec![],
            indexes: vec![],
        }],
        relations: vec![],
        inherits: vec![],
    };
    let output = render(&description, Format::Dot);
    assert!(output.contains("INTERVAL&lt;DAY&gt;"));
    assert!(!output.contains("INTERVAL<DAY>"));
}
