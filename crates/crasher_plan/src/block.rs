use crate::error::{EvalError, PlanError};
use crate::expr::{EvalContext, Expression, ImplicitArgument, Invoker, OperationCall, Variable};
use crasher_types::{CONSTRUCTOR_NAME, JavaType, NameContext, Operation, TypeIntrospector, Value};
use std::collections::HashMap;

/// One statement of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `T name = value;`
    LocalVariable { variable: Variable, value: Expression },
    /// `value;`
    Expression(Expression),
}

impl Statement {
    pub fn text(&self, context: &NameContext) -> String {
        match self {
            Statement::LocalVariable { variable, value } => format!(
                "{} {} = {};",
                variable.return_type().source_name(context),
                variable.name(),
                value.text(context)
            ),
            Statement::Expression(value) => format!("{};", value.text(context)),
        }
    }

    fn execute(&self, context: &mut EvalContext<'_>) -> Result<Value, EvalError> {
        match self {
            Statement::LocalVariable { variable, value } => {
                let result = value.evaluate(context)?;
                context.bind(variable.name(), result.clone());
                Ok(result)
            }
            Statement::Expression(value) => value.evaluate(context),
        }
    }
}

/// Hands out local names unique within one block: the first letter of the
/// type's simple name or keyword, followed by a counter shared by all
/// prefixes (`i1`, `s2`, `l3`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameAllocator {
    issued: HashMap<String, usize>,
    counter: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, ty: &JavaType) -> String {
        let prefix = name_prefix(ty);
        self.counter += 1;
        *self.issued.entry(prefix.clone()).or_default() += 1;
        format!("{prefix}{}", self.counter)
    }

    /// Number of names issued with `prefix`.
    pub fn issued(&self, prefix: &str) -> usize {
        self.issued.get(prefix).copied().unwrap_or(0)
    }
}

fn name_prefix(ty: &JavaType) -> String {
    let (leaf, _) = ty.decompose();
    let base = match &leaf {
        JavaType::Class(class) => class.simple_name().to_string(),
        other => other.type_name(),
    };
    match base.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => first.to_ascii_lowercase().to_string(),
        _ => "v".to_string(),
    }
}

/// An ordered list of statements that exercises one operation: one local per
/// argument, then the invocation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    operation: Operation,
    statements: Vec<Statement>,
    names: NameAllocator,
}

impl Block {
    pub fn empty(operation: Operation) -> Self {
        Self {
            operation,
            statements: Vec::new(),
            names: NameAllocator::new(),
        }
    }

    /// Block that binds `plans` to fresh locals and invokes `operation` on
    /// them. With an `implicit` argument its plan comes first in `plans`.
    pub fn build(
        operation: Operation,
        implicit: Option<&ImplicitArgument>,
        plans: Vec<Expression>,
    ) -> Result<Self, PlanError> {
        let offset = usize::from(implicit.is_some());
        if plans.len() != operation.arity() + offset {
            return Err(PlanError::invalid(format!(
                "{operation} needs {} plans, got {}",
                operation.arity() + offset,
                plans.len()
            )));
        }

        let mut block = Block::empty(operation.clone());
        let mut plans = plans.into_iter();

        let mut implicit_local = None;
        if let Some(implicit) = implicit {
            if let Some(plan) = plans.next() {
                implicit_local = Some(block.bind(&implicit.java_type(), plan));
            }
        }
        let mut arguments = Vec::with_capacity(operation.arity());
        for (parameter, plan) in operation.parameters.iter().zip(plans) {
            arguments.push(block.bind(parameter, plan));
        }

        let call = OperationCall::new(operation.clone(), implicit_local, arguments)?;
        if operation.is_constructor() {
            let result = block.next_variable(operation.result_type());
            block.push(Statement::LocalVariable {
                variable: result,
                value: Expression::Call(call),
            });
        } else {
            block.push(Statement::Expression(Expression::Call(call)));
        }
        Ok(block)
    }

    fn bind(&mut self, ty: &JavaType, plan: Expression) -> Expression {
        let variable = self.next_variable(ty);
        self.push(Statement::LocalVariable {
            variable: variable.clone(),
            value: plan,
        });
        Expression::Variable(variable)
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Declare a fresh local of type `ty`.
    pub fn next_variable(&mut self, ty: &JavaType) -> Variable {
        Variable::new(self.names.fresh(ty), ty.clone())
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Method name of the tested operation, `<init>` for constructors.
    pub fn tested_name(&self) -> &str {
        if self.operation.is_constructor() {
            CONSTRUCTOR_NAME
        } else {
            &self.operation.name
        }
    }

    pub fn statement_texts(&self, context: &NameContext) -> Vec<String> {
        self.statements
            .iter()
            .map(|statement| statement.text(context))
            .collect()
    }

    /// Run the statements in order and return the value of the last one.
    pub fn execute(&self, invoker: &dyn Invoker) -> Result<Value, EvalError> {
        let mut context = EvalContext::new(invoker);
        let mut last = Value::Void;
        for statement in &self.statements {
            last = statement.execute(&mut context)?;
        }
        Ok(last)
    }
}

/// Convenience over [`Block::build`] that asks `introspector` whether the
/// operation takes an implicit leading argument.
pub fn build_block(
    introspector: &dyn TypeIntrospector,
    operation: Operation,
    plans: Vec<Expression>,
) -> Result<Block, PlanError> {
    let implicit = ImplicitArgument::for_operation(&operation, introspector);
    Block::build(operation, implicit.as_ref(), plans)
}
