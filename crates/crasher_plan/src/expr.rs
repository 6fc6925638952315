use crate::array::ArrayCreateAndInit;
use crate::error::{EvalError, PlanError};
use crate::literal::Literal;
use crasher_types::{ClassName, JavaType, NameContext, Operation, TypeIntrospector, Value};
use std::collections::HashMap;
use std::fmt;

/// Executes operations on behalf of plan evaluation.
pub trait Invoker {
    /// Invoke `operation`. `implicit` is the receiver of an instance method or
    /// the enclosing instance of an inner-type constructor.
    fn invoke(
        &self,
        operation: &Operation,
        implicit: Option<Value>,
        arguments: Vec<Value>,
    ) -> Result<Value, EvalError>;
}

/// Invoker plus the values of the locals bound so far.
pub struct EvalContext<'a> {
    invoker: &'a dyn Invoker,
    locals: HashMap<String, Value>,
}

impl<'a> EvalContext<'a> {
    pub fn new(invoker: &'a dyn Invoker) -> Self {
        Self {
            invoker,
            locals: HashMap::new(),
        }
    }

    pub fn bind(&mut self, name: &str, value: Value) {
        self.locals.insert(name.to_string(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }
}

/// The implicit leading argument some operations need besides their
/// declared parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImplicitArgument {
    /// Instance the method is invoked on.
    Receiver(ClassName),
    /// Outer instance an inner type is constructed in.
    EnclosingInstance(ClassName),
}

impl ImplicitArgument {
    pub fn for_operation(
        operation: &Operation,
        introspector: &dyn TypeIntrospector,
    ) -> Option<ImplicitArgument> {
        if operation.is_constructor() {
            if introspector.is_nested_non_static_type(&operation.declaring_type) {
                return operation
                    .declaring_type
                    .enclosing()
                    .map(ImplicitArgument::EnclosingInstance);
            }
            None
        } else if operation.is_static {
            None
        } else {
            Some(ImplicitArgument::Receiver(operation.declaring_type.clone()))
        }
    }

    pub fn class(&self) -> &ClassName {
        match self {
            ImplicitArgument::Receiver(class) | ImplicitArgument::EnclosingInstance(class) => class,
        }
    }

    pub fn java_type(&self) -> JavaType {
        JavaType::Class(self.class().clone())
    }
}

/// A local variable introduced by a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    ty: JavaType,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &JavaType {
        &self.ty
    }
}

/// Invocation of a constructor or method.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationCall {
    operation: Operation,
    implicit: Option<Box<Expression>>,
    arguments: Vec<Expression>,
}

impl OperationCall {
    /// `implicit` carries the receiver of an instance method, or the enclosing
    /// instance when constructing an inner type; it is never part of
    /// `arguments`.
    pub fn new(
        operation: Operation,
        implicit: Option<Expression>,
        arguments: Vec<Expression>,
    ) -> Result<Self, PlanError> {
        if arguments.len() != operation.arity() {
            return Err(PlanError::invalid(format!(
                "{operation} takes {} arguments, got {}",
                operation.arity(),
                arguments.len()
            )));
        }
        if !operation.is_constructor() && implicit.is_some() == operation.is_static {
            let message = if operation.is_static {
                format!("static method {operation} takes no receiver")
            } else {
                format!("instance method {operation} needs a receiver")
            };
            return Err(PlanError::invalid(message));
        }
        if let Some(receiver) = &implicit {
            if !receiver.return_type().is_reference() {
                return Err(PlanError::invalid(format!(
                    "receiver of {operation} has non-reference type {}",
                    receiver.return_type()
                )));
            }
        }
        for (index, (argument, parameter)) in arguments.iter().zip(&operation.parameters).enumerate() {
            let found = argument.return_type();
            if !found.may_assign_to(parameter) {
                return Err(PlanError::invalid(format!(
                    "argument {index} of {operation} has type {found}, expected {parameter}"
                )));
            }
        }

        Ok(Self {
            operation,
            implicit: implicit.map(Box::new),
            arguments,
        })
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn implicit(&self) -> Option<&Expression> {
        self.implicit.as_deref()
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn return_type(&self) -> &JavaType {
        self.operation.result_type()
    }

    pub fn text(&self, context: &NameContext) -> String {
        let arguments: Vec<String> = self
            .arguments
            .iter()
            .map(|argument| argument.text(context))
            .collect();
        let arguments = arguments.join(", ");
        let declaring = &self.operation.declaring_type;

        match (self.operation.is_constructor(), self.implicit()) {
            (true, None) => format!("new {}({arguments})", declaring.source_name(context)),
            (true, Some(outer)) => format!(
                "{}.new {}({arguments})",
                outer.receiver_text(context),
                declaring.simple_name()
            ),
            (false, None) => format!(
                "{}.{}({arguments})",
                declaring.source_name(context),
                self.operation.name
            ),
            (false, Some(receiver)) => format!(
                "{}.{}({arguments})",
                receiver.receiver_text(context),
                self.operation.name
            ),
        }
    }

    pub fn evaluate(&self, context: &EvalContext<'_>) -> Result<Value, EvalError> {
        let implicit = match self.implicit() {
            Some(expression) => Some(expression.evaluate(context)?),
            None => None,
        };
        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.evaluate(context))
            .collect::<Result<Vec<_>, _>>()?;
        context.invoker.invoke(&self.operation, implicit, arguments)
    }
}

/// A node of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Variable(Variable),
    Call(OperationCall),
    Array(ArrayCreateAndInit),
}

impl Expression {
    /// Declared type of the value this expression produces.
    pub fn return_type(&self) -> &JavaType {
        match self {
            Expression::Literal(literal) => literal.return_type(),
            Expression::Variable(variable) => variable.return_type(),
            Expression::Call(call) => call.return_type(),
            Expression::Array(array) => array.return_type(),
        }
    }

    /// Source text of this expression as written inside `context`.
    pub fn text(&self, context: &NameContext) -> String {
        match self {
            Expression::Literal(literal) => literal.text(context),
            Expression::Variable(variable) => variable.name().to_string(),
            Expression::Call(call) => call.text(context),
            Expression::Array(array) => array.text(context),
        }
    }

    fn receiver_text(&self, context: &NameContext) -> String {
        match self {
            Expression::Literal(literal) if literal.needs_cast() => {
                format!("({})", literal.text(context))
            }
            other => other.text(context),
        }
    }

    pub fn evaluate(&self, context: &EvalContext<'_>) -> Result<Value, EvalError> {
        match self {
            Expression::Literal(literal) => Ok(literal.evaluate()),
            Expression::Variable(variable) => {
                context
                    .lookup(variable.name())
                    .cloned()
                    .ok_or_else(|| EvalError::UnboundVariable {
                        name: variable.name().to_string(),
                    })
            }
            Expression::Call(call) => call.evaluate(context),
            Expression::Array(array) => array.evaluate(context),
        }
    }

    /// Deepest nesting of operation calls, counting the implicit argument.
    pub fn call_depth(&self) -> usize {
        match self {
            Expression::Literal(_) | Expression::Variable(_) => 0,
            Expression::Call(call) => {
                1 + call
                    .implicit()
                    .into_iter()
                    .chain(call.arguments())
                    .map(Expression::call_depth)
                    .max()
                    .unwrap_or(0)
            }
            Expression::Array(array) => array
                .components()
                .iter()
                .map(Expression::call_depth)
                .max()
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(&NameContext::qualified()))
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Literal(value)
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Expression::Variable(value)
    }
}

impl From<OperationCall> for Expression {
    fn from(value: OperationCall) -> Self {
        Expression::Call(value)
    }
}

impl From<ArrayCreateAndInit> for Expression {
    fn from(value: ArrayCreateAndInit) -> Self {
        Expression::Array(value)
    }
}
