use crate::operation::{Operation, Visibility};
use crate::types::{ClassName, JavaType};

/// Source of type and signature facts for the planner.
///
/// Implementations report operations in a stable order; every enumeration
/// built on top of them inherits that order.
pub trait TypeIntrospector {
    /// Constructors and methods declared by `ty` that are admitted at
    /// `visibility`.
    fn available_operations(&self, ty: &ClassName, visibility: Visibility) -> Vec<Operation>;

    /// Operations admitted at `visibility` whose result is assignable to `ty`.
    fn producers(&self, ty: &JavaType, visibility: Visibility) -> Vec<Operation>;

    /// Member type that needs an enclosing instance to be constructed.
    fn is_nested_non_static_type(&self, ty: &ClassName) -> bool;

    /// Abstract classes and interfaces cannot be constructed directly.
    fn is_abstract_type(&self, ty: &ClassName) -> bool;

    /// Types declared in `package`, used to detect names that hide
    /// `java.lang` types.
    fn package_types(&self, package: &str) -> Vec<ClassName>;

    /// Leaf type and number of dimensions; `(ty, 0)` for non-array types.
    fn decompose_array_type(&self, ty: &JavaType) -> (JavaType, usize) {
        ty.decompose()
    }

    /// Type of the components of array type `ty`.
    fn array_component_type(&self, ty: &JavaType) -> Option<JavaType> {
        match self.decompose_array_type(ty) {
            (_, 0) => None,
            (leaf, dimensions) => Some(JavaType::array_with_dimensions(leaf, dimensions - 1)),
        }
    }
}
