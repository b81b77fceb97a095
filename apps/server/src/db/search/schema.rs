//! Searchable entity schemas.
//!
//! Every searchable entity is described by a static [`EntitySchema`]: an explicit
//! allowlist mapping API field names to table columns and a typed comparison
//! kind. Builders only ever address fields through these definitions, so an
//! unknown field name is a client error rather than a SQL fragment.

/// How a field is compared and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, compared case-insensitively.
    Text,
    /// Opaque string identifier, exact match.
    Id,
    /// Enumerated code, exact match.
    Code,
    Bool,
    Integer,
    Timestamp,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Id => "id",
            FieldKind::Code => "code",
            FieldKind::Bool => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

/// A scalar attribute of an entity.
#[derive(Debug)]
pub struct FieldDef {
    /// Name used by callers and as the JSON key of returned records.
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }
}

#[derive(Debug)]
pub enum RelationKind {
    /// Many-to-many membership keyed by a string (tags, catalog ids, role ids).
    ValueSet { value_column: &'static str },
    /// Owned child rows with their own schema.
    Rows { schema: &'static EntitySchema },
}

/// A to-many relationship from a parent entity to a child table.
#[derive(Debug)]
pub struct Relation {
    /// JSON key of the child collection in a full object graph.
    pub name: &'static str,
    pub table: &'static str,
    /// Column on the parent the child table refers to.
    pub parent_key: &'static str,
    /// Column on the child table holding the parent key.
    pub foreign_key: &'static str,
    pub kind: RelationKind,
}

impl Relation {
    pub fn value_column(&self) -> Option<&'static str> {
        match self.kind {
            RelationKind::ValueSet { value_column } => Some(value_column),
            RelationKind::Rows { .. } => None,
        }
    }

    pub fn child_schema(&self) -> Option<&'static EntitySchema> {
        match self.kind {
            RelationKind::Rows { schema } => Some(schema),
            RelationKind::ValueSet { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    pub name: &'static str,
    pub table: &'static str,
    /// Field unique per record (unique within the parent for child rows).
    pub id: &'static FieldDef,
    pub fields: &'static [&'static FieldDef],
    pub relations: &'static [&'static Relation],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().copied().find(|f| f.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&'static Relation> {
        self.relations.iter().copied().find(|r| r.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}
