use super::range::{RangeTable, mixed_radix, saturating_product};
use crate::array::ArrayCreateAndInit;
use crate::error::PlanError;
use crate::expr::{Expression, ImplicitArgument, OperationCall};
use crasher_types::{JavaType, Operation};
use std::sync::Arc;

/// Which plans a type subspace may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlanFilter {
    #[default]
    All,
    /// No `null` literal; used for receivers and enclosing instances.
    NonNull,
}

impl PlanFilter {
    pub fn admits_null(self) -> bool {
        self == PlanFilter::All
    }
}

/// A node of the plan-space tree. Sizes are fixed when a node is built and
/// nodes are immutable afterwards, so a finished tree can be shared between
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSpace {
    /// Leaf of representative literal values.
    Values(ValueNode),
    /// Alternative ways to produce one type; size is the sum of the children.
    Alternatives(TypeNode),
    /// Independent slots combined by one producer; size is the product of
    /// the slots.
    Combination(FunctionNode),
}

impl PlanSpace {
    pub fn size(&self) -> u64 {
        match self {
            PlanSpace::Values(node) => node.size(),
            PlanSpace::Alternatives(node) => node.size(),
            PlanSpace::Combination(node) => node.size(),
        }
    }

    pub fn plan_at(&self, index: u64) -> Result<Expression, PlanError> {
        match self {
            PlanSpace::Values(node) => node.plan_at(index),
            PlanSpace::Alternatives(node) => node.plan_at(index),
            PlanSpace::Combination(node) => node.plan_at(index),
        }
    }

    pub fn return_type(&self) -> &JavaType {
        match self {
            PlanSpace::Values(node) => node.return_type(),
            PlanSpace::Alternatives(node) => node.return_type(),
            PlanSpace::Combination(node) => node.return_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    ty: JavaType,
    values: Vec<Expression>,
}

impl ValueNode {
    pub fn new(ty: JavaType, values: Vec<Expression>) -> Self {
        Self { ty, values }
    }

    pub fn size(&self) -> u64 {
        self.values.len() as u64
    }

    pub fn values(&self) -> &[Expression] {
        &self.values
    }

    pub fn return_type(&self) -> &JavaType {
        &self.ty
    }

    pub fn plan_at(&self, index: u64) -> Result<Expression, PlanError> {
        PlanError::check_index(index, self.size())?;
        Ok(self.values[index as usize].clone())
    }
}

/// All plans for one needed type, up to a recursion budget.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    ty: JavaType,
    budget: usize,
    children: Vec<Arc<PlanSpace>>,
    ranges: RangeTable,
}

impl TypeNode {
    pub fn new(ty: JavaType, budget: usize, children: Vec<Arc<PlanSpace>>) -> Self {
        let ranges = RangeTable::new(children.iter().map(|child| child.size()).collect());
        Self {
            ty,
            budget,
            children,
            ranges,
        }
    }

    pub fn size(&self) -> u64 {
        self.ranges.size()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn return_type(&self) -> &JavaType {
        &self.ty
    }

    pub fn children(&self) -> &[Arc<PlanSpace>] {
        &self.children
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    pub fn plan_at(&self, index: u64) -> Result<Expression, PlanError> {
        let (child, local) = self.ranges.locate(index)?;
        self.children[child].plan_at(local)
    }
}

/// What a function node builds from one plan per slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Producer {
    /// Invoke an operation; with an implicit argument, slot 0 holds it.
    Operation {
        operation: Operation,
        implicit: Option<ImplicitArgument>,
    },
    /// Fill a copy of the empty array with one component per slot.
    Array(ArrayCreateAndInit),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    producer: Producer,
    slots: Vec<Arc<PlanSpace>>,
    slot_sizes: Vec<u64>,
    size: u64,
}

impl FunctionNode {
    pub fn new(producer: Producer, slots: Vec<Arc<PlanSpace>>) -> Self {
        let slot_sizes: Vec<u64> = slots.iter().map(|slot| slot.size()).collect();
        let size = saturating_product(&slot_sizes);
        Self {
            producer,
            slots,
            slot_sizes,
            size,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn operation(&self) -> Option<&Operation> {
        match &self.producer {
            Producer::Operation { operation, .. } => Some(operation),
            Producer::Array(_) => None,
        }
    }

    pub fn implicit(&self) -> Option<&ImplicitArgument> {
        match &self.producer {
            Producer::Operation { implicit, .. } => implicit.as_ref(),
            Producer::Array(_) => None,
        }
    }

    pub fn slots(&self) -> &[Arc<PlanSpace>] {
        &self.slots
    }

    pub fn slot_sizes(&self) -> &[u64] {
        &self.slot_sizes
    }

    pub fn return_type(&self) -> &JavaType {
        match &self.producer {
            Producer::Operation { operation, .. } => operation.result_type(),
            Producer::Array(empty) => empty.return_type(),
        }
    }

    /// One plan per slot for combination `index`.
    pub fn slot_plans(&self, index: u64) -> Result<Vec<Expression>, PlanError> {
        PlanError::check_index(index, self.size)?;
        mixed_radix(index, &self.slot_sizes)
            .into_iter()
            .zip(&self.slots)
            .map(|(local, slot)| slot.plan_at(local))
            .collect()
    }

    pub fn plan_at(&self, index: u64) -> Result<Expression, PlanError> {
        let mut plans = self.slot_plans(index)?;
        match &self.producer {
            Producer::Operation {
                operation,
                implicit,
            } => {
                let implicit_plan = if implicit.is_some() && !plans.is_empty() {
                    Some(plans.remove(0))
                } else {
                    None
                };
                let call = OperationCall::new(operation.clone(), implicit_plan, plans)?;
                Ok(Expression::Call(call))
            }
            Producer::Array(empty) => {
                let mut array = empty.clone();
                array.set_component_plans(plans)?;
                Ok(Expression::Array(array))
            }
        }
    }
}
