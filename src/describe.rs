use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pk,
    Fk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedColumn {
    pub type_label: String,
    pub name: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedIndex {
    pub name: String,
    pub cols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedObject {
    pub name: String,
    pub cols: Vec<DescribedColumn>,
    pub props: Vec<String>,
    pub methods: Vec<String>,
    pub indexes: Vec<DescribedIndex>,
}

/// A directed association inferred from a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub by: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceEdge {
    pub child: String,
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Description {
    pub objects: Vec<DescribedObject>,
    pub relations: Vec<Relation>,
    pub inherits: Vec<InheritanceEdge>,
}

/// Collation used for the composite column sort key.
///
/// `Ordinal` compares codepoints. `CaseInsensitive` folds case first and
/// breaks ties on the ordinal comparison so the order stays total; it stands
/// in for the locale-sensitive alphabetical ordering some installations
/// expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    #[default]
    Ordinal,
    CaseInsensitive,
}

impl Collation {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Ordinal => a.cmp(b),
            Collation::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeOptions {
    pub methods: bool,
    pub properties: bool,
    pub indexes: bool,
    /// Report indexes that cover a single column.
    pub simple_indexes: bool,
    /// Report the member columns of each index.
    pub index_columns: bool,
    pub collation: Collation,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            methods: true,
            properties: true,
            indexes: true,
            simple_indexes: true,
            index_columns: true,
            collation: Collation::Ordinal,
        }
    }
}

/// Member names the mapping framework injects into every mapped class.
const FRAMEWORK_MEMBERS: &[&str] = &["metadata", "registry", "query"];

/// Adaptor over the two kinds of input the extractor accepts.
enum EntitySource<'a> {
    Mapped(&'a MappedClass),
    Bare(&'a Table),
}

impl<'a> EntitySource<'a> {
    fn name(&self) -> &'a str {
        match *self {
            EntitySource::Mapped(class) => &class.name,
            EntitySource::Bare(table) => &table.name,
        }
    }

    fn table(&self) -> &'a Table {
        match *self {
            EntitySource::Mapped(class) => &class.table,
            EntitySource::Bare(table) => table,
        }
    }

    fn table_ident(&self) -> String {
        self.table().qualified_name()
    }

    fn mapped(&self) -> Option<&'a MappedClass> {
        match *self {
            EntitySource::Mapped(class) => Some(class),
            EntitySource::Bare(_) => None,
        }
    }

    fn in_inheritance(&self) -> bool {
        matches!(self, EntitySource::Mapped(class) if class.parent.is_some())
    }
}

/// A mapped class and its own backing table are the same entity; two sources
/// that take part in inheritance compare by class name because the physical
/// table may be shared with the parent.
fn same_entity(a: &EntitySource, b: &EntitySource) -> bool {
    if a.in_inheritance() || b.in_inheritance() {
        a.name() == b.name()
    } else {
        a.table_ident() == b.table_ident()
    }
}

/// Extract objects, relations and inheritance edges with default options.
pub fn describe(items: &[ModelItem]) -> Description {
    describe_with_options(items, &DescribeOptions::default())
}

pub fn describe_with_options(items: &[ModelItem], options: &DescribeOptions) -> Description {
    let mut entries: Vec<EntitySource> = Vec::new();
    for item in items {
        let entity = match item {
            ModelItem::Class(class) => EntitySource::Mapped(class),
            ModelItem::Table(table) => EntitySource::Bare(table),
            ModelItem::Opaque(_) => continue,
        };
        // first occurrence wins
        if !entries.iter().any(|prior| same_entity(prior, &entity)) {
            entries.push(entity);
        }
    }

    let mut objects = Vec::new();
    let mut relations = Vec::new();
    let mut inherits = Vec::new();

    for entry in &entries {
        let mut cols: Vec<DescribedColumn> = entry
            .table()
            .columns
            .iter()
            .map(|col| DescribedColumn {
                type_label: col.type_label.clone(),
                name: col.name.clone(),
                role: column_role(col),
            })
            .collect();
        cols.sort_by(|a, b| column_order(a, b, options.collation));

        let mut methods = Vec::new();
        if options.methods {
            if let Some(class) = entry.mapped() {
                methods = own_methods(class);
                methods.sort();
            }
        }

        let mut indexes = Vec::new();
        if options.indexes {
            indexes = collect_indexes(entry.table(), options);
            indexes.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let mut props = Vec::new();
        if options.properties {
            if let Some(class) = entry.mapped() {
                for prop in &class.properties {
                    if prop.kind != PropertyKind::Column {
                        props.push(prop.name.clone());
                    }
                }
                // expression-backed columns show up as properties, not cols
                for computed in &class.computed {
                    props.push(computed.name.clone());
                }
            }
            props.sort();
        }

        objects.push(DescribedObject {
            name: entry.name().to_string(),
            cols,
            props,
            methods,
            indexes,
        });

        for col in &entry.table().columns {
            for fk in &col.foreign_keys {
                for other in &entries {
                    if fk.table == other.table_ident() {
                        relations.push(Relation {
                            from: entry.name().to_string(),
                            by: col.name.clone(),
                            to: other.name().to_string(),
                        });
                    }
                }
            }
        }

        if let Some(class) = entry.mapped() {
            if let Some(parent) = &class.parent {
                let edge = InheritanceEdge {
                    child: class.name.clone(),
                    parent: parent.name.clone(),
                };
                // the foreign key implementing the inheritance join must not
                // double as an association
                relations.retain(|rel| !(rel.from == edge.child && rel.to == edge.parent));
                inherits.push(edge);
            }
        }
    }

    Description {
        objects,
        relations,
        inherits,
    }
}

fn column_role(col: &Column) -> Option<Role> {
    if col.primary_key {
        Some(Role::Pk)
    } else if !col.foreign_keys.is_empty() {
        Some(Role::Fk)
    } else {
        None
    }
}

fn sort_key(col: &DescribedColumn) -> String {
    let prefix = match col.role {
        Some(Role::Pk) => '0',
        Some(Role::Fk) => '1',
        None => '2',
    };
    format!("{prefix}{}", col.name)
}

fn column_order(a: &DescribedColumn, b: &DescribedColumn, collation: Collation) -> Ordering {
    collation.compare(&sort_key(a), &sort_key(b))
}

/// Methods declared on the class itself, with base and framework members
/// filtered out. When the class has an inheritance parent the parent's
/// declared members form the base set; otherwise the caller-supplied base
/// member names plus the framework denylist do.
fn own_methods(class: &MappedClass) -> Vec<String> {
    let base: Vec<&str> = match &class.parent {
        Some(parent) => parent.members.iter().map(|m| m.name.as_str()).collect(),
        None => class
            .base_members
            .iter()
            .map(|name| name.as_str())
            .chain(FRAMEWORK_MEMBERS.iter().copied())
            .collect(),
    };

    class
        .members
        .iter()
        .filter(|m| m.kind == MemberKind::Method)
        .filter(|m| !m.name.starts_with('_'))
        .filter(|m| !base.contains(&m.name.as_str()))
        .map(|m| m.name.clone())
        .collect()
}

fn collect_indexes(table: &Table, options: &DescribeOptions) -> Vec<DescribedIndex> {
    let mut indexes = Vec::new();
    for index in &table.indexes {
        if index.implicit {
            continue;
        }
        if !options.simple_indexes && index.columns.len() <= 1 {
            continue;
        }
        let cols = if options.index_columns {
            index
                .columns
                .iter()
                .filter_map(|col| match col {
                    IndexColumn::Column(name) => Some(name.clone()),
                    IndexColumn::Expression(_) => None,
                })
                .collect()
        } else {
            Vec::new()
        };
        indexes.push(DescribedIndex {
            name: index.name.clone(),
            cols,
        });
    }
    indexes
}
