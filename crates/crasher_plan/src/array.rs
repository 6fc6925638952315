use crate::error::{EvalError, PlanError};
use crate::expr::{EvalContext, Expression};
use crasher_types::{JavaType, NameContext, Value};

/// Array creation with an explicit initializer, e.g. `new int[][]{a, b}`.
///
/// Components of a `d`-dimensional array are `d - 1`-dimensional expressions
/// (usually nested array creations or `null`); the components of a
/// one-dimensional array are plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayCreateAndInit {
    array_type: JavaType,
    leaf_type: JavaType,
    dimensionality: usize,
    components: Vec<Expression>,
}

impl ArrayCreateAndInit {
    /// Empty array of `array_type`; the leaf type and dimensionality are
    /// discovered from the type.
    pub fn new(array_type: JavaType) -> Result<Self, PlanError> {
        let (leaf_type, dimensionality) = array_type.decompose();
        Self::from_leaf(leaf_type, dimensionality)
    }

    /// Empty `dimensionality`-dimensional array of `leaf_type`.
    pub fn from_leaf(leaf_type: JavaType, dimensionality: usize) -> Result<Self, PlanError> {
        if dimensionality == 0 {
            return Err(PlanError::invalid(format!(
                "array of {leaf_type} needs at least one dimension"
            )));
        }
        if leaf_type.is_void() || leaf_type.is_array() {
            return Err(PlanError::invalid(format!(
                "{leaf_type} cannot be the leaf type of an array"
            )));
        }
        Ok(Self {
            array_type: JavaType::array_with_dimensions(leaf_type.clone(), dimensionality),
            leaf_type,
            dimensionality,
            components: Vec::new(),
        })
    }

    /// Array of `array_type` initialized with `components`, in order.
    pub fn with_components(
        array_type: JavaType,
        components: Vec<Expression>,
    ) -> Result<Self, PlanError> {
        let mut array = Self::new(array_type)?;
        array.set_component_plans(components)?;
        Ok(array)
    }

    pub fn set_component_plans(&mut self, components: Vec<Expression>) -> Result<(), PlanError> {
        let component_type = self.component_type();
        for (index, component) in components.iter().enumerate() {
            let found = component.return_type();
            if !found.may_assign_to(&component_type) {
                return Err(PlanError::invalid(format!(
                    "component {index} of {} has type {found}, expected {component_type}",
                    self.array_type
                )));
            }
        }
        self.components = components;
        Ok(())
    }

    pub fn leaf_type(&self) -> &JavaType {
        &self.leaf_type
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    pub fn return_type(&self) -> &JavaType {
        &self.array_type
    }

    pub fn component_type(&self) -> JavaType {
        JavaType::array_with_dimensions(self.leaf_type.clone(), self.dimensionality - 1)
    }

    pub fn components(&self) -> &[Expression] {
        &self.components
    }

    /// `new <leaf>[]..[]{c0, c1, ..}` with `dimensionality` bracket pairs.
    pub fn text(&self, context: &NameContext) -> String {
        let components: Vec<String> = self
            .components
            .iter()
            .map(|component| component.text(context))
            .collect();
        format!(
            "new {}{}[]{{{}}}",
            self.leaf_type.source_name(context),
            "[]".repeat(self.dimensionality - 1),
            components.join(", ")
        )
    }

    pub fn evaluate(&self, context: &EvalContext<'_>) -> Result<Value, EvalError> {
        let elements = self
            .components
            .iter()
            .map(|component| component.evaluate(context))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array {
            component: self.component_type(),
            elements,
        })
    }
}
