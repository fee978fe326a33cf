use crate::describe::*;

const PK_GLYPH: char = '■';
const FK_GLYPH: char = '□';
const PROPERTY_GLYPH: char = '⚪';
const INDEX_GLYPH: char = '»';

/// Template set for the DOT renderer. Callers may substitute their own
/// strings; placeholders are spelled `{name}` and replaced verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DotTemplates {
    /// Outer document; placeholders `{label}`, `{content}`.
    pub graph: String,
    /// Node definition; placeholders `{name}`, `{rows}`.
    pub node: String,
    /// Title row of a node's label table; placeholder `{name}`.
    pub header_row: String,
    /// Member row; placeholders `{left}`, `{right}`.
    pub member_row: String,
    /// Placeholders `{child}`, `{parent}`.
    pub inherit_edge: String,
    /// Placeholders `{from}`, `{to}`, `{by}`.
    pub relation_edge: String,
}

impl Default for DotTemplates {
    fn default() -> Self {
        Self {
            graph: r#"digraph schema {
    label = "{label}";
    fontname = "Courier";
    node [fontname = "Courier", shape = "plaintext"];
    edge [fontname = "Courier"];

{content}
}"#
            .to_string(),
            node: r#"    "{name}" [label=<
        <table border="0" cellborder="1" cellspacing="0">
{rows}
        </table>
    >];"#
            .to_string(),
            header_row: r#"            <tr><td colspan="2" bgcolor="lightgrey">{name}</td></tr>"#
                .to_string(),
            member_row:
                r#"            <tr><td align="left">{left}</td><td align="left">{right}</td></tr>"#
                    .to_string(),
            inherit_edge: r#"    "{child}" -> "{parent}" [arrowhead = "empty"];"#.to_string(),
            relation_edge: r#"    "{from}" -> "{to}" [label = "{by}", arrowhead = "odot"];"#
                .to_string(),
        }
    }
}

/// Render a description as a Graphviz DOT document.
pub fn render(description: &Description) -> String {
    render_with_templates(description, &DotTemplates::default())
}

pub fn render_with_templates(description: &Description, templates: &DotTemplates) -> String {
    let mut content = Vec::new();

    for object in &description.objects {
        let mut rows = vec![templates.header_row.replace("{name}", &escape(&object.name))];
        for col in &object.cols {
            rows.push(member_row(
                templates,
                &col.type_label,
                &format!("{} {}", role_glyph(col.role), col.name),
            ));
        }
        for prop in &object.props {
            rows.push(member_row(
                templates,
                "PROPERTY",
                &format!("{PROPERTY_GLYPH} {prop}"),
            ));
        }
        for method in &object.methods {
            rows.push(member_row(templates, "METHOD", method));
        }
        for index in &object.indexes {
            rows.push(member_row(
                templates,
                &index_signature(&index.cols),
                &format!("{INDEX_GLYPH} {}", index.name),
            ));
        }
        content.push(
            templates
                .node
                .replace("{name}", &object.name)
                .replace("{rows}", &rows.join("\n")),
        );
    }

    let mut edges = Vec::new();
    for edge in &description.inherits {
        edges.push(
            templates
                .inherit_edge
                .replace("{child}", &edge.child)
                .replace("{parent}", &edge.parent),
        );
    }
    for rel in &description.relations {
        edges.push(
            templates
                .relation_edge
                .replace("{from}", &rel.from)
                .replace("{to}", &rel.to)
                .replace("{by}", &rel.by),
        );
    }
    content.push(edges.join("\n"));

    templates
        .graph
        .replace(
            "{label}",
            &format!("generated by dbsketch v{}", env!("CARGO_PKG_VERSION")),
        )
        .replace("{content}", &content.join("\n"))
}

fn member_row(templates: &DotTemplates, left: &str, right: &str) -> String {
    templates
        .member_row
        .replace("{left}", &escape(left))
        .replace("{right}", &escape(right))
}

fn role_glyph(role: Option<Role>) -> char {
    match role {
        Some(Role::Pk) => PK_GLYPH,
        Some(Role::Fk) => FK_GLYPH,
        None => ' ',
    }
}

fn index_signature(cols: &[String]) -> String {
    if cols.is_empty() {
        "INDEX".to_string()
    } else {
        format!("INDEX({})", cols.join(","))
    }
}

/// The label table is HTML-like markup, so member text must be escaped.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn single_object() -> Description {
        Description {
            objects: vec![DescribedObject {
                name: "User".into(),
                cols: vec![DescribedColumn {
                    type_label: "INTEGER".into(),
                    name: "id".into(),
                    role: Some(Role::Pk),
                }],
                props: vec!["address".into()],
                methods: vec!["login".into()],
                indexes: vec![DescribedIndex {
                    name: "ix_user_name".into(),
                    cols: vec!["name".into()],
                }],
            }],
            relations: vec![],
            inherits: vec![],
        }
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn node_contains_all_member_categories() {
        let output = render(&single_object());
        assert!(output.contains(r#""User" [label=<"#));
        assert!(output.contains("■ id"));
        assert!(output.contains("⚪ address"));
        assert!(output.contains("METHOD"));
        assert!(output.contains("INDEX(name)"));
        assert!(output.contains("» ix_user_name"));
    }

    #[test]
    fn edges_render_inheritance_and_relations() {
        let description = Description {
            objects: vec![],
            relations: vec![Relation {
                from: "Address".into(),
                by: "user_id".into(),
                to: "User".into(),
            }],
            inherits: vec![InheritanceEdge {
                child: "Admin".into(),
                parent: "User".into(),
            }],
        };
        let output = render(&description);
        assert!(output.contains(r#""Admin" -> "User" [arrowhead = "empty"];"#));
        assert!(output.contains(r#""Address" -> "User" [label = "user_id", arrowhead = "odot"];"#));
    }

    #[test]
    fn custom_templates_are_honored() {
        let templates = DotTemplates {
            graph: "G[{label}]\n{content}".into(),
            node: "N:{name}\n{rows}".into(),
            header_row: "H:{name}".into(),
            member_row: "{left}|{right}".into(),
            inherit_edge: "I:{child}<{parent}".into(),
            relation_edge: "R:{from}>{to}:{by}".into(),
        };
        let output = render_with_templates(&single_object(), &templates);
        assert!(output.starts_with("G[generated by dbsketch v"));
        assert!(output.contains("N:User"));
        assert!(output.contains("H:User"));
        assert!(output.contains("INTEGER|■ id"));
    }

    #[test]
    fn document_wraps_in_digraph() {
        let output = render(&Description::default());
        assert!(output.starts_with("digraph schema {"));
        assert!(output.ends_with("}"));
    }
}
