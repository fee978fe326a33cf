use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A physical relational table, possibly schema-qualified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Table {
    /// Identifier used for foreign key matching and deduplication.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub type_label: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Qualified name of the referenced table.
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<IndexColumn>,
    /// Index-like artifacts generated by the framework rather than declared
    /// by the application are never reported.
    #[serde(default)]
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexColumn {
    Column(String),
    Expression(String),
}

/// A column-like attribute backed by a SQL expression instead of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedColumn {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Attribute,
}

/// A member declared directly on a mapped class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Column,
    Relationship,
    Composite,
}

/// A mapper-level attribute; only non-column kinds show up as properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperProperty {
    pub name: String,
    pub kind: PropertyKind,
}

/// An object-model class bound to a backing table by the mapping framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedClass {
    pub name: String,
    pub table: Arc<Table>,
    #[serde(default)]
    pub computed: Vec<ComputedColumn>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub properties: Vec<MapperProperty>,
    #[serde(default)]
    pub parent: Option<Arc<MappedClass>>,
    /// Member names contributed by non-mapped base classes and mixins.
    #[serde(default)]
    pub base_members: Vec<String>,
}

/// One item of the heterogeneous input list handed to `describe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelItem {
    Class(Arc<MappedClass>),
    Table(Arc<Table>),
    /// Anything else in the caller's namespace; skipped silently.
    Opaque(String),
}
