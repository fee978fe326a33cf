use unicode_width::UnicodeWidthStr;

use crate::describe::*;

const PK_GLYPH: char = '■';
const FK_GLYPH: char = '□';
const INDEX_GLYPH: char = '»';
const INDENT: &str = "    ";

/// Render a description as a PlantUML class diagram.
pub fn render(description: &Description) -> String {
    let mut blocks = vec![
        "@startuml".to_string(),
        "skinparam defaultFontName Courier".to_string(),
    ];

    for object in &description.objects {
        blocks.push(format!(
            "Class {} {{\n{}\n}}",
            object.name,
            tabular(&member_rows(object))
        ));
    }

    for edge in &description.inherits {
        blocks.push(format!("{} <|-- {}", edge.parent, edge.child));
    }

    for rel in &description.relations {
        blocks.push(format!("{} <--o {}: {}", rel.from, rel.to, rel.by));
    }

    blocks.push(format!(
        "right footer generated by dbsketch v{}",
        env!("CARGO_PKG_VERSION")
    ));
    blocks.push("@enduml".to_string());

    blocks.join("\n\n")
}

fn member_rows(object: &DescribedObject) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for col in &object.cols {
        rows.push((
            clean(&col.type_label),
            format!("{} {}", role_glyph(col.role), col.name),
        ));
    }
    for prop in &object.props {
        rows.push(("+".to_string(), prop.clone()));
    }
    for method in &object.methods {
        rows.push((format!("{method}()"), String::new()));
    }
    for index in &object.indexes {
        rows.push((
            clean(&index_signature(&index.cols)),
            format!("{INDEX_GLYPH} {}", index.name),
        ));
    }
    rows
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

/// Parentheses clash with PlantUML member syntax.
fn clean(text: &str) -> String {
    text.replace('(', "[").replace(')', "]")
}

/// Align rows into two columns padded to the widest cell of each column.
fn tabular(rows: &[(String, String)]) -> String {
    let left_width = rows.iter().map(|(left, _)| left.width()).max().unwrap_or(0);
    rows.iter()
        .map(|(left, right)| {
            format!("{INDENT}{} {}", pad(left, left_width), right)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}
