//! Type annotations and their compatibility rules.
//!
//! Types are plain values compared structurally. A name the language does
//! not know is kept as `Named` and treated like `any`.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Float,
    Bool,
    Char,
    String,
    Any,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Type {
            kind,
            nullable: false,
        }
    }

    pub fn int() -> Self {
        Type::new(TypeKind::Int)
    }

    pub fn float() -> Self {
        Type::new(TypeKind::Float)
    }

    pub fn bool() -> Self {
        Type::new(TypeKind::Bool)
    }

    pub fn char() -> Self {
        Type::new(TypeKind::Char)
    }

    pub fn string() -> Self {
        Type::new(TypeKind::String)
    }

    pub fn any() -> Self {
        Type::new(TypeKind::Any)
    }

    /// Resolves a type name as written in a declaration.
    pub fn from_name(name: &str) -> Self {
        let kind = match name {
            "int" => TypeKind::Int,
            "float" => TypeKind::Float,
            "bool" => TypeKind::Bool,
            "char" => TypeKind::Char,
            "string" => TypeKind::String,
            "any" => TypeKind::Any,
            other => TypeKind::Named(other.to_string()),
        };

        Type::new(kind)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_any(&self) -> bool {
        matches!(self.kind, TypeKind::Any | TypeKind::Named(_))
    }

    /// Whether a value of type `self` may be stored where `target` is
    /// declared.
    ///
    /// `any` matches everything in both directions, `int` widens to `float`
    /// and `char` widens to `string`. Nullability is not considered.
    pub fn is_compatible_with(&self, target: &Type) -> bool {
        if self.is_any() || target.is_any() {
            return true;
        }

        match (&self.kind, &target.kind) {
            (TypeKind::Int, TypeKind::Float) => true,
            (TypeKind::Char, TypeKind::String) => true,
            (received, expected) => received == expected,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Int => write!(f, "int")?,
            TypeKind::Float => write!(f, "float")?,
            TypeKind::Bool => write!(f, "bool")?,
            TypeKind::Char => write!(f, "char")?,
            TypeKind::String => write!(f, "string")?,
            TypeKind::Any => write!(f, "any")?,
            TypeKind::Named(name) => write!(f, "{}", name)?,
        }

        if self.nullable {
            write!(f, "?")?;
        }

        Ok(())
    }
}
