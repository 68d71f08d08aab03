use std::borrow::Cow;

use heck::ToSnakeCase;

/// Values a template can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateContext {
    /// Module the generated code is written for.
    pub package: String,
    /// The stored type as the generated code must spell it: `User` in the
    /// source's own module, `user::User` elsewhere.
    pub qualified_type: String,
    /// Bare struct name.
    pub name: String,
    /// Primary-key field name.
    pub primary_key: String,
    /// Module to import for `qualified_type`, empty when none is needed.
    pub type_import: String,
    /// Table the store keeps its values in: the type's full module path,
    /// e.g. `crate::models::user::User`.
    pub table: String,
}

impl TemplateContext {
    pub fn snake_name(&self) -> String {
        self.name.to_snake_case()
    }

    pub fn value(&self, variable: Variable) -> Cow<'_, str> {
        match variable {
            Variable::Package => Cow::Borrowed(&self.package),
            Variable::Type => Cow::Borrowed(&self.qualified_type),
            Variable::Name => Cow::Borrowed(&self.name),
            Variable::PrimaryKey => Cow::Borrowed(&self.primary_key),
            Variable::TypeImport => Cow::Borrowed(&self.type_import),
            Variable::Table => Cow::Borrowed(&self.table),
            Variable::SnakeName => Cow::Owned(self.snake_name()),
        }
    }
}

/// A variable name accepted in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Package,
    Type,
    Name,
    PrimaryKey,
    TypeImport,
    Table,
    SnakeName,
}

impl Variable {
    pub const ALL: [Variable; 7] = [
        Variable::Package,
        Variable::Type,
        Variable::Name,
        Variable::PrimaryKey,
        Variable::TypeImport,
        Variable::Table,
        Variable::SnakeName,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::Package => "package",
            Variable::Type => "type",
            Variable::Name => "name",
            Variable::PrimaryKey => "primary_key",
            Variable::TypeImport => "type_import",
            Variable::Table => "table",
            Variable::SnakeName => "snake_name",
        }
    }
}
