// crasher_types - Java type model and type introspection for the crasher test generator
mod catalog;
mod error;
mod introspect;
mod operation;
mod types;
mod value;

pub use catalog::{TypeCatalog, TypeEntry, TypeKind};
pub use error::{CatalogError, TypeNameError};
pub use introspect::TypeIntrospector;
pub use operation::{CONSTRUCTOR_NAME, Operation, OperationKind, Visibility};
pub use types::{ClassName, JavaType, NameContext, PrimitiveKind};
pub use value::Value;
