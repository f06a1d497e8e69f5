use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operator applied to two expressions.
    ///
    /// Both operands evaluate first, left before right, regardless of the
    /// operator. Equality works on any pair of values and is never a type
    /// error; the ordering and arithmetic operators require numbers, except
    /// `+` which also concatenates two strings. Division by zero follows IEEE
    /// arithmetic and produces an infinity or `NaN` rather than an error.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `line`: Line number of the operator, for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// - [`RuntimeError::OperandsMustBeNumbers`] for ordering or arithmetic on
    ///   non-numbers.
    /// - [`RuntimeError::OperandsMustBeNumbersOrStrings`] for a mixed `+`.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize)
                                 -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        match op {
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
            BinaryOperator::Add => eval_add(&left, &right, line),
            BinaryOperator::Sub => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Number(l - r))
            },
            BinaryOperator::Mul => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Number(l * r))
            },
            BinaryOperator::Div => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Number(l / r))
            },
            BinaryOperator::Less => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Bool(l < r))
            },
            BinaryOperator::LessEqual => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Bool(l <= r))
            },
            BinaryOperator::Greater => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Bool(l > r))
            },
            BinaryOperator::GreaterEqual => {
                let (l, r) = numeric_operands(&left, &right, line)?;
                Ok(Value::Bool(l >= r))
            },
        }
    }
}

/// Evaluates `+`, which is overloaded for numbers and strings.
fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Text(l), Value::Text(r)) => Ok(Value::Text(Rc::from(format!("{l}{r}")))),
        _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line }),
    }
}

/// Extracts two numeric operands or fails.
fn numeric_operands(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok((*l, *r)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { line }),
    }
}
