use crate::error::TypeNameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// A class or interface name: package plus the chain of simple names from the
/// outermost declaring type down to the type itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    names: Vec<String>,
}

impl ClassName {
    /// Top-level type `simple_name` in `package` (empty for the default package).
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![simple_name.into()],
        }
    }

    /// Member type `simple_name` declared inside `self`.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            names,
        }
    }

    /// Parse a binary name such as `java.util.Map$Entry`.
    pub fn parse(binary_name: &str) -> Result<Self, TypeNameError> {
        let trimmed = binary_name.trim();
        if trimmed.is_empty() {
            return Err(TypeNameError::new(binary_name, "empty type name"));
        }

        let (package, local) = match trimmed.rfind('.') {
            Some(split) => (&trimmed[..split], &trimmed[split + 1..]),
            None => ("", trimmed),
        };

        if !package.is_empty() && !package.split('.').all(is_identifier) {
            return Err(TypeNameError::new(binary_name, "malformed package"));
        }

        let names: Vec<String> = local.split('$').map(str::to_string).collect();
        if !names.iter().all(|name| is_identifier(name)) {
            return Err(TypeNameError::new(binary_name, "malformed simple name"));
        }

        Ok(Self {
            package: package.to_string(),
            names,
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn is_default_package(&self) -> bool {
        self.package.is_empty()
    }

    /// Innermost simple name, e.g. `Entry` for `java.util.Map$Entry`.
    pub fn simple_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Outermost simple name, e.g. `Map` for `java.util.Map$Entry`.
    pub fn top_level_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_nested(&self) -> bool {
        self.names.len() > 1
    }

    /// The directly enclosing type of a member type.
    pub fn enclosing(&self) -> Option<ClassName> {
        if !self.is_nested() {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            names: self.names[..self.names.len() - 1].to_vec(),
        })
    }

    /// `pkg.Outer$Inner`, the form runtime stack frames use.
    pub fn binary_name(&self) -> String {
        self.join_with('$')
    }

    /// `pkg.Outer.Inner`, the canonical source form.
    pub fn qualified_name(&self) -> String {
        self.join_with('.')
    }

    /// Source form as written inside `context`: short when the type is visible
    /// there without qualification.
    pub fn source_name(&self, context: &NameContext) -> String {
        if context.sees_unqualified(self) {
            self.names.join(".")
        } else {
            self.qualified_name()
        }
    }

    fn join_with(&self, separator: char) -> String {
        let local = self.names.join(&separator.to_string());
        if self.package.is_empty() {
            local
        } else {
            format!("{}.{}", self.package, local)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

const IMPLICIT_PACKAGE: &str = "java.lang";

/// Decides whether a type name is written short or fully qualified.
///
/// A type declared in the context package hides the `java.lang` type of the
/// same simple name, which then has to be written qualified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameContext {
    package: Option<String>,
    shadowing: BTreeSet<String>,
}

impl NameContext {
    /// Everything outside the default package is written fully qualified.
    pub fn qualified() -> Self {
        Self::default()
    }

    /// Names as seen from source code declared next to `class`: types of the
    /// same package and of `java.lang` are written short.
    pub fn for_class(class: &ClassName) -> Self {
        Self {
            package: Some(class.package().to_string()),
            shadowing: BTreeSet::new(),
        }
    }

    /// Record the top-level types declared in the context package.
    pub fn with_package_types<'n>(
        mut self,
        types: impl IntoIterator<Item = &'n ClassName>,
    ) -> Self {
        if let Some(package) = &self.package {
            self.shadowing.extend(
                types
                    .into_iter()
                    .filter(|ty| ty.package() == package && !ty.is_nested())
                    .map(|ty| ty.simple_name().to_string()),
            );
        }
        self
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn sees_unqualified(&self, class: &ClassName) -> bool {
        if class.is_default_package() {
            return true;
        }
        match &self.package {
            Some(package) if package == class.package() => true,
            Some(_) if class.package() == IMPLICIT_PACKAGE => {
                !self.shadowing.contains(class.top_level_name())
            }
            Some(_) => false,
            None => false,
        }
    }
}

/// Java type as seen by the planner.
///
/// Arrays are kept normalized: `element` is never itself an array and
/// `dimensions >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
    Void,
    Primitive(PrimitiveKind),
    Class(ClassName),
    Array {
        element: Box<JavaType>,
        dimensions: usize,
    },
}

impl JavaType {
    pub fn int() -> Self {
        JavaType::Primitive(PrimitiveKind::Int)
    }

    pub fn boolean() -> Self {
        JavaType::Primitive(PrimitiveKind::Boolean)
    }

    pub fn string() -> Self {
        JavaType::Class(ClassName::new(IMPLICIT_PACKAGE, "String"))
    }

    pub fn object() -> Self {
        JavaType::Class(ClassName::new(IMPLICIT_PACKAGE, "Object"))
    }

    pub fn class(name: ClassName) -> Self {
        JavaType::Class(name)
    }

    /// Array whose components are `component`.
    pub fn array_of(component: JavaType) -> Self {
        match component {
            JavaType::Array {
                element,
                dimensions,
            } => JavaType::Array {
                element,
                dimensions: dimensions + 1,
            },
            leaf => JavaType::Array {
                element: Box::new(leaf),
                dimensions: 1,
            },
        }
    }

    /// `leaf` with `dimensions` array dimensions; `dimensions == 0` yields `leaf`.
    pub fn array_with_dimensions(leaf: JavaType, dimensions: usize) -> Self {
        (0..dimensions).fold(leaf, |ty, _| JavaType::array_of(ty))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JavaType::Array { .. })
    }

    /// Types whose variables may hold `null`.
    pub fn is_reference(&self) -> bool {
        matches!(self, JavaType::Class(_) | JavaType::Array { .. })
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JavaType::Class(name) if *name == ClassName::new(IMPLICIT_PACKAGE, "String"))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JavaType::Class(name) if *name == ClassName::new(IMPLICIT_PACKAGE, "Object"))
    }

    /// Assignability that holds whatever the class hierarchy: identity and
    /// widening of any reference, arrays included, to `java.lang.Object`.
    pub fn widens_to(&self, to: &JavaType) -> bool {
        self == to || (self.is_reference() && to.is_object())
    }

    /// Whether a value of `self` may be assigned to `to` when class
    /// subtyping is unknown: class to class is assumed to hold, array
    /// components follow the same rule one dimension down.
    pub fn may_assign_to(&self, to: &JavaType) -> bool {
        if self.widens_to(to) {
            return true;
        }
        match (self, to) {
            (JavaType::Class(_), JavaType::Class(_)) => true,
            (JavaType::Array { .. }, JavaType::Array { .. }) => {
                match (self.component_type(), to.component_type()) {
                    (Some(from), Some(to)) if from.is_primitive() || to.is_primitive() => from == to,
                    (Some(from), Some(to)) => from.may_assign_to(&to),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    pub fn as_class(&self) -> Option<&ClassName> {
        match self {
            JavaType::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Strip one array dimension.
    pub fn component_type(&self) -> Option<JavaType> {
        match self {
            JavaType::Array {
                element,
                dimensions,
            } if *dimensions > 1 => Some(JavaType::Array {
                element: element.clone(),
                dimensions: dimensions - 1,
            }),
            JavaType::Array { element, .. } => Some((**element).clone()),
            _ => None,
        }
    }

    /// Split into `(leaf type, dimensionality)` by stripping one dimension at a
    /// time. Non-array types yield a dimensionality of zero.
    pub fn decompose(&self) -> (JavaType, usize) {
        let mut current = self.clone();
        let mut dimensionality = 0;
        while let Some(component) = current.component_type() {
            current = component;
            dimensionality += 1;
        }
        (current, dimensionality)
    }

    /// Type name as written in source inside `context`.
    pub fn source_name(&self, context: &NameContext) -> String {
        match self {
            JavaType::Void => "void".to_string(),
            JavaType::Primitive(kind) => kind.keyword().to_string(),
            JavaType::Class(name) => name.source_name(context),
            JavaType::Array {
                element,
                dimensions,
            } => format!("{}{}", element.source_name(context), "[]".repeat(*dimensions)),
        }
    }

    /// Binary form used in catalogues, e.g. `java.util.Map$Entry[][]`.
    pub fn type_name(&self) -> String {
        match self {
            JavaType::Class(name) => name.binary_name(),
            JavaType::Array {
                element,
                dimensions,
            } => format!("{}{}", element.type_name(), "[]".repeat(*dimensions)),
            other => other.source_name(&NameContext::qualified()),
        }
    }

    /// Parse the binary form produced by [`JavaType::type_name`].
    pub fn parse(text: &str) -> Result<Self, TypeNameError> {
        let mut base = text.trim();
        let mut dimensions = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dimensions += 1;
        }

        let leaf = if base == "void" {
            if dimensions > 0 {
                return Err(TypeNameError::new(text, "array of void"));
            }
            JavaType::Void
        } else if let Some(kind) = PrimitiveKind::from_keyword(base) {
            JavaType::Primitive(kind)
        } else {
            JavaType::Class(ClassName::parse(base)?)
        };

        Ok(JavaType::array_with_dimensions(leaf, dimensions))
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_name(&NameContext::qualified()))
    }
}

impl TryFrom<String> for JavaType {
    type Error = TypeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        JavaType::parse(&value)
    }
}

impl From<JavaType> for String {
    fn from(value: JavaType) -> Self {
        value.type_name()
    }
}
