use crate::error::CatalogError;
use crate::introspect::TypeIntrospector;
use crate::operation::{Operation, OperationKind, Visibility};
use crate::types::{ClassName, JavaType};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Abstract,
    Interface,
}

/// Everything the catalogue knows about one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    pub name: ClassName,
    pub kind: TypeKind,
    /// Member type that needs an enclosing instance.
    pub inner: bool,
    pub supertypes: Vec<ClassName>,
    pub operations: Vec<Operation>,
}

impl TypeEntry {
    pub fn new(name: ClassName) -> Self {
        Self {
            name,
            kind: TypeKind::Class,
            inner: false,
            supertypes: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_inner(mut self, inner: bool) -> Self {
        self.inner = inner;
        self
    }

    pub fn with_supertype(mut self, supertype: ClassName) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.kind != TypeKind::Class
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.is_constructor())
    }

    pub fn methods(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| !op.is_constructor())
    }
}

/// Declarative, in-memory type introspector.
///
/// Types keep the order in which they were added, so producer lists (and the
/// plan spaces built from them) are stable across runs.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<ClassName, TypeEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|error| CatalogError::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let catalog = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), types = catalog.len(), "loaded type catalogue");
        Ok(catalog)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(contents).map_err(|error| CatalogError::Parse {
            message: error.to_string(),
        })?;

        let mut catalog = Self::new();
        for raw_type in raw.types {
            catalog.add_type(raw_type.into_entry()?)?;
        }
        Ok(catalog)
    }

    pub fn add_type(&mut self, entry: TypeEntry) -> Result<(), CatalogError> {
        if entry.inner && !entry.name.is_nested() {
            return Err(CatalogError::InvalidEntry {
                type_name: entry.name.binary_name(),
                message: "only member types can be inner types".to_string(),
            });
        }
        if let Some(op) = entry.operations.iter().find(|op| op.declaring_type != entry.name) {
            return Err(CatalogError::InvalidEntry {
                type_name: entry.name.binary_name(),
                message: format!("operation {op} is declared by another type"),
            });
        }
        self.types.insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn lookup(&self, name: &ClassName) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    pub fn require(&self, name: &ClassName) -> Result<&TypeEntry, CatalogError> {
        self.lookup(name).ok_or_else(|| CatalogError::UnknownType {
            type_name: name.binary_name(),
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `sub` is `sup` or (transitively) declares it as a supertype.
    pub fn is_subtype(&self, sub: &ClassName, sup: &ClassName) -> bool {
        let mut seen = IndexSet::new();
        let mut pending = vec![sub.clone()];
        while let Some(current) = pending.pop() {
            if current == *sup {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(entry) = self.types.get(&current) {
                pending.extend(entry.supertypes.iter().cloned());
            }
        }
        false
    }

    /// Assignment compatibility without conversions: [`JavaType::widens_to`]
    /// plus catalogued class subtyping.
    pub fn is_assignable(&self, from: &JavaType, to: &JavaType) -> bool {
        if from.widens_to(to) {
            return true;
        }
        match (from, to) {
            (JavaType::Class(sub), JavaType::Class(sup)) => self.is_subtype(sub, sup),
            _ => false,
        }
    }
}

impl TypeIntrospector for TypeCatalog {
    fn available_operations(&self, ty: &ClassName, visibility: Visibility) -> Vec<Operation> {
        self.types
            .get(ty)
            .map(|entry| {
                entry
                    .operations
                    .iter()
                    .filter(|op| op.visibility.admits(visibility))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn producers(&self, ty: &JavaType, visibility: Visibility) -> Vec<Operation> {
        let mut producers = Vec::new();
        for entry in self.types.values() {
            for op in &entry.operations {
                if !op.visibility.admits(visibility) || op.is_abstract {
                    continue;
                }
                let usable = match op.kind {
                    OperationKind::Constructor => !entry.is_abstract(),
                    OperationKind::Method => !op.return_type.is_void(),
                };
                if usable && self.is_assignable(&op.return_type, ty) {
                    producers.push(op.clone());
                }
            }
        }
        producers
    }

    fn is_nested_non_static_type(&self, ty: &ClassName) -> bool {
        self.types.get(ty).is_some_and(|entry| entry.inner)
    }

    fn is_abstract_type(&self, ty: &ClassName) -> bool {
        self.types.get(ty).is_some_and(TypeEntry::is_abstract)
    }

    fn package_types(&self, package: &str) -> Vec<ClassName> {
        self.types
            .keys()
            .filter(|name| name.package() == package)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    name: String,
    #[serde(default)]
    kind: TypeKind,
    #[serde(default)]
    inner: bool,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    constructors: Vec<RawConstructor>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Debug, Deserialize)]
struct RawConstructor {
    #[serde(default)]
    params: Vec<JavaType>,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    throws: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default)]
    params: Vec<JavaType>,
    #[serde(default = "void_type")]
    returns: JavaType,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    throws: Vec<String>,
}

fn void_type() -> JavaType {
    JavaType::Void
}

fn parse_names(names: &[String]) -> Result<Vec<ClassName>, CatalogError> {
    names
        .iter()
        .map(|name| ClassName::parse(name).map_err(CatalogError::from))
        .collect()
}

impl RawType {
    fn into_entry(self) -> Result<TypeEntry, CatalogError> {
        let name = ClassName::parse(&self.name)?;
        let mut entry = TypeEntry::new(name.clone())
            .with_kind(self.kind)
            .with_inner(self.inner);
        entry.supertypes = parse_names(&self.supertypes)?;

        for constructor in self.constructors {
            entry.operations.push(
                Operation::constructor(name.clone(), constructor.params)
                    .with_visibility(constructor.visibility)
                    .with_declared_failures(parse_names(&constructor.throws)?),
            );
        }

        for method in self.methods {
            if method.params.iter().any(JavaType::is_void) {
                return Err(CatalogError::InvalidEntry {
                    type_name: self.name.clone(),
                    message: format!("method {} has a void parameter", method.name),
                });
            }
            entry.operations.push(
                Operation::method(name.clone(), method.name, method.params, method.returns)
                    .with_static(method.is_static)
                    .with_abstract(method.is_abstract)
                    .with_visibility(method.visibility)
                    .with_declared_failures(parse_names(&method.throws)?),
            );
        }

        Ok(entry)
    }
}
