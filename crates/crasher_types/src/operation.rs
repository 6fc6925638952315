use crate::types::{ClassName, JavaType};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Access level of a type member, ordered from least to most visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    /// Package-private and protected members.
    Package,
    /// Public members.
    #[serde(alias = "public")]
    Global,
}

impl Visibility {
    /// Whether a member declared with `self` may be used by code that is
    /// granted `level` access.
    pub fn admits(self, level: Visibility) -> bool {
        match level {
            Visibility::Global => self == Visibility::Global,
            Visibility::Package => self != Visibility::Private,
            Visibility::Private => true,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Package => "package",
            Visibility::Global => "global",
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Global
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Constructor,
    Method,
}

/// A constructor or method as reported by a type introspector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    pub declaring_type: ClassName,
    pub name: String,
    pub kind: OperationKind,
    pub parameters: Vec<JavaType>,
    pub return_type: JavaType,
    pub is_static: bool,
    pub is_abstract: bool,
    pub visibility: Visibility,
    /// Failure types listed in the operation's `throws` clause.
    pub declared_failures: Vec<ClassName>,
}

impl Operation {
    pub fn constructor(declaring_type: ClassName, parameters: Vec<JavaType>) -> Self {
        Self {
            return_type: JavaType::Class(declaring_type.clone()),
            declaring_type,
            name: CONSTRUCTOR_NAME.to_string(),
            kind: OperationKind::Constructor,
            parameters,
            is_static: false,
            is_abstract: false,
            visibility: Visibility::Global,
            declared_failures: Vec::new(),
        }
    }

    pub fn method(
        declaring_type: ClassName,
        name: impl Into<String>,
        parameters: Vec<JavaType>,
        return_type: JavaType,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            kind: OperationKind::Method,
            parameters,
            return_type,
            is_static: false,
            is_abstract: false,
            visibility: Visibility::Global,
            declared_failures: Vec::new(),
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_declared_failures(mut self, failures: Vec<ClassName>) -> Self {
        self.declared_failures = failures;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == OperationKind::Constructor
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Type of the value the operation yields; a constructor yields its
    /// declaring type.
    pub fn result_type(&self) -> &JavaType {
        &self.return_type
    }

    /// `pkg.Outer$Inner.name`, matching the frames of a runtime stack trace.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type.binary_name(), self.name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(JavaType::to_string).collect();
        write!(f, "{}({})", self.qualified_name(), params.join(", "))
    }
}
