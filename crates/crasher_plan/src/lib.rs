// crasher_plan - Enumerates call plans for classes under test and turns them into blocks
mod array;
mod block;
mod classify;
mod error;
mod expr;
mod literal;
mod select;
pub mod space;

pub use array::ArrayCreateAndInit;
pub use block::{Block, NameAllocator, Statement, build_block};
pub use class_under_test::ClassUnderTest;
pub use classify::{Verdict, classify};
pub use error::{EvalError, Failure, PlanError};
pub use expr::{EvalContext, Expression, ImplicitArgument, Invoker, OperationCall, Variable};
pub use literal::{Literal, LiteralValue, escape_string, preset_values};
pub use select::{MAX_SELECTED_PLANS, select_indices, selected_count};
pub use space::{PlanFilter, PlanSpace, PlanSpaceBuilder};

#[cfg(test)]
mod tests;
