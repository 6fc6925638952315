use super::node::{FunctionNode, PlanFilter, PlanSpace, Producer, TypeNode, ValueNode};
use crate::array::ArrayCreateAndInit;
use crate::error::PlanError;
use crate::expr::ImplicitArgument;
use crate::literal::preset_values;
use crasher_types::{JavaType, Operation, TypeIntrospector, Visibility};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{trace, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SpaceKey {
    ty: JavaType,
    filter: PlanFilter,
    budget: usize,
}

/// Builds depth-bounded plan spaces from the facts of a type introspector.
///
/// Type subspaces are memoized per `(type, filter, budget)`, so every subspace
/// is explored once and shared by all nodes that need it.
pub struct PlanSpaceBuilder<'a> {
    introspector: &'a dyn TypeIntrospector,
    visibility: Visibility,
    memo: HashMap<SpaceKey, Arc<PlanSpace>>,
}

impl<'a> PlanSpaceBuilder<'a> {
    /// `visibility` bounds the operations used to produce parameter values.
    pub fn new(introspector: &'a dyn TypeIntrospector, visibility: Visibility) -> Self {
        Self {
            introspector,
            visibility,
            memo: HashMap::new(),
        }
    }

    /// Number of distinct type subspaces built so far.
    pub fn cached_spaces(&self) -> usize {
        self.memo.len()
    }

    /// Plans for a value of `ty` whose operation calls nest at most `budget`
    /// deep. Types without any producible value yield an empty subspace.
    pub fn type_space(&mut self, ty: &JavaType, filter: PlanFilter, budget: usize) -> Arc<PlanSpace> {
        let key = SpaceKey {
            ty: ty.clone(),
            filter,
            budget,
        };
        if let Some(space) = self.memo.get(&key) {
            trace!(ty = %ty, budget, "reusing memoized plan space");
            return Arc::clone(space);
        }

        let mut children = Vec::new();

        let values = preset_values(ty, filter);
        if !values.is_empty() {
            children.push(Arc::new(PlanSpace::Values(ValueNode::new(ty.clone(), values))));
        }

        if let Some(component) = self.introspector.array_component_type(ty) {
            let (leaf, dimensionality) = self.introspector.decompose_array_type(ty);
            match ArrayCreateAndInit::from_leaf(leaf, dimensionality) {
                Ok(empty) => {
                    let element = self.type_space(&component, PlanFilter::All, budget);
                    let node = FunctionNode::new(Producer::Array(empty), vec![element]);
                    if node.size() > 0 {
                        children.push(Arc::new(PlanSpace::Combination(node)));
                    }
                }
                Err(error) => trace!(ty = %ty, %error, "skipping array producer"),
            }
        }

        if budget > 0 {
            for operation in self.introspector.producers(ty, self.visibility) {
                let node = self.function_space(&operation, budget);
                match node {
                    Ok(node) if node.size() > 0 => {
                        children.push(Arc::new(PlanSpace::Combination(node)));
                    }
                    Ok(_) => trace!(operation = %operation, budget, "producer has no plans"),
                    Err(error) => trace!(operation = %operation, %error, "skipping producer"),
                }
            }
        }

        let node = TypeNode::new(ty.clone(), budget, children);
        if node.ranges().is_saturated() {
            warn!(ty = %ty, budget, "plan space size clamped to u64::MAX");
        }
        if node.size() == 0 {
            trace!(ty = %ty, budget, "no producible value");
        }

        let space = Arc::new(PlanSpace::Alternatives(node));
        self.memo.insert(key, Arc::clone(&space));
        space
    }

    /// All argument combinations for invoking `operation`, with each slot
    /// built one level below `budget`.
    pub fn function_space(
        &mut self,
        operation: &Operation,
        budget: usize,
    ) -> Result<FunctionNode, PlanError> {
        if budget == 0 {
            return Err(PlanError::invalid(format!(
                "no recursion budget left to invoke {operation}"
            )));
        }

        let implicit = ImplicitArgument::for_operation(operation, self.introspector);
        let mut slots = Vec::with_capacity(operation.arity() + 1);
        if let Some(implicit) = &implicit {
            slots.push(self.type_space(&implicit.java_type(), PlanFilter::NonNull, budget - 1));
        }
        for parameter in &operation.parameters {
            slots.push(self.type_space(parameter, PlanFilter::All, budget - 1));
        }

        let node = FunctionNode::new(
            Producer::Operation {
                operation: operation.clone(),
                implicit,
            },
            slots,
        );
        if node.size() == u64::MAX {
            warn!(operation = %operation, budget, "plan space size clamped to u64::MAX");
        }
        Ok(node)
    }
}
