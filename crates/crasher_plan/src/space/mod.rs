//! Index-addressable plan spaces.
//!
//! A plan space is a tree whose leaves hold literal values. Inner nodes
//! either offer alternatives for one type (their size is the sum of their
//! children) or combine independent slots (their size is the product of the
//! slots). `plan_at(i)` maps every `i` in `[0, size)` to exactly one plan
//! without materializing the space.

mod builder;
mod node;
mod range;

pub use builder::PlanSpaceBuilder;
pub use node::{FunctionNode, PlanFilter, PlanSpace, Producer, TypeNode, ValueNode};
pub use range::{RangeTable, mixed_radix, saturating_product};
