use std::{
    cell::RefCell,
    io::{self, Write},
    mem,
    rc::Rc,
};

use crate::{
    ast::{Expr, LogicalOperator, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{environment::Environment, function::natives},
        value::{
            core::Value,
            function::{Callable, LoxFunction},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure. Runtime errors are one channel;
/// `return` unwinding travels on [`Flow`] and never appears here.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result of executing a statement, separating control flow from errors.
///
/// Blocks and loops propagate `Return` upward untouched; function invocation
/// is the sole catcher and turns it into the call's result value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution ran to completion. Expression statements carry their value
    /// (the source of the REPL echo); everything else carries `None`.
    Normal(Option<Value>),
    /// A `return` is unwinding toward the nearest enclosing function call.
    Return(Value),
}

/// Stores the runtime evaluation state.
///
/// Holds the current environment frame (initially the global frame, where the
/// native functions live) and the output sink that `print` writes to. One
/// interpreter is created per session and reused across REPL lines, so
/// definitions persist.
pub struct Interpreter {
    environment: Rc<RefCell<Environment>>,
    output:      Box<dyn Write>,
}

impl Interpreter {
    /// Creates an interpreter printing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates an interpreter printing to the given sink.
    ///
    /// Tests pass a shared buffer here to observe program output.
    #[must_use]
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let mut globals = Environment::new();
        for native in natives() {
            globals.define(native.name, Value::Callable(Callable::Native(native)));
        }

        Self { environment: Rc::new(RefCell::new(globals)),
               output }
    }

    /// Executes a sequence of top-level statements.
    ///
    /// Statements run in source order. The value of the last executed
    /// statement is returned: `Some` for a trailing expression statement,
    /// `None` otherwise. A top-level `return` ends the sequence early with
    /// its value. The first runtime error aborts the sequence.
    ///
    /// # Parameters
    /// - `statements`: The parsed program.
    ///
    /// # Returns
    /// The final value, if the last statement produced one.
    ///
    /// # Errors
    /// The first [`RuntimeError`] raised by any statement.
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<Option<Value>> {
        let mut last = None;

        for statement in statements {
            match self.exec_statement(statement)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => return Ok(Some(value)),
            }
        }

        Ok(last)
    }

    /// Executes a single statement under the current environment.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating contained expressions.
    pub fn exec_statement(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Expression { expr, .. } => Ok(Flow::Normal(Some(self.eval(expr)?))),
            Stmt::Print { expr, .. } => {
                let value = self.eval(expr)?;
                let _ = writeln!(self.output, "{value}");
                let _ = self.output.flush();
                Ok(Flow::Normal(None))
            },
            Stmt::VarDecl { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(Flow::Normal(None))
            },
            Stmt::Block { statements, .. } => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.exec_block(statements, Rc::new(RefCell::new(environment)))
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                let flow = if self.eval(condition)?.is_truthy() {
                    self.exec_statement(then_branch)?
                } else if let Some(else_branch) = else_branch {
                    self.exec_statement(else_branch)?
                } else {
                    Flow::Normal(None)
                };

                match flow {
                    Flow::Return(value) => Ok(Flow::Return(value)),
                    Flow::Normal(_) => Ok(Flow::Normal(None)),
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.eval(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal(None))
            },
            Stmt::Function(declaration) => {
                let function = LoxFunction { declaration: Rc::clone(declaration),
                                             closure:     Rc::clone(&self.environment), };
                self.environment
                    .borrow_mut()
                    .define(&declaration.name, Value::Callable(Callable::Function(function)));
                Ok(Flow::Normal(None))
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
        }
    }

    /// Executes statements inside the given environment, restoring the
    /// previous one afterwards.
    ///
    /// The previous environment is restored on every exit path: normal
    /// completion, `Return` unwinding and runtime errors alike. A `Return`
    /// from any nested statement stops the block and propagates.
    pub(crate) fn exec_block(&mut self,
                             statements: &[Stmt],
                             environment: Rc<RefCell<Environment>>)
                             -> EvalResult<Flow> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = self.exec_statements(statements);
        self.environment = previous;
        result
    }

    fn exec_statements(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal(None))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    ///
    /// # Errors
    /// Any runtime error raised by the expression or its operands.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { expr, .. } => self.eval(expr),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Assign { name, value, line } => self.eval_assign(name, value, *line),
            Expr::Unary { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::Binary { left, op, right, line } => self.eval_binary_op(left, *op, right, *line),
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Call { callee, arguments, line } => self.eval_call(callee, arguments, *line),
        }
    }

    /// Looks a variable up in the environment chain.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.environment
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Evaluates the value, then updates the first frame defining the name.
    ///
    /// Assignment is an expression; the assigned value is its result. An
    /// undefined name is an error and leaves every frame untouched.
    fn eval_assign(&mut self, name: &str, value: &Expr, line: usize) -> EvalResult<Value> {
        let value = self.eval(value)?;

        if self.environment.borrow_mut().assign(name, value.clone()) {
            Ok(value)
        } else {
            Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                  line })
        }
    }

    /// Evaluates a short-circuiting logical operator.
    ///
    /// The left operand always evaluates; when it decides the outcome (`or`
    /// with a truthy left, `and` with a falsy left) it is returned as-is and
    /// the right operand never evaluates. Otherwise the right operand's value
    /// is returned. The result is whichever operand decided, not a boolean.
    fn eval_logical(&mut self,
                    left: &Expr,
                    op: LogicalOperator,
                    right: &Expr)
                    -> EvalResult<Value> {
        let left = self.eval(left)?;

        match op {
            LogicalOperator::Or if left.is_truthy() => Ok(left),
            LogicalOperator::And if !left.is_truthy() => Ok(left),
            _ => self.eval(right),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
