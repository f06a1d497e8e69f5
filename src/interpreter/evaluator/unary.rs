use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operator applied to a subexpression.
    ///
    /// `!` negates the operand's truthiness and works on any value; `-`
    /// requires a number.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `expr`: Operand expression.
    /// - `line`: Line number of the operator, for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// [`RuntimeError::OperandMustBeNumber`] when negating a non-number.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval(expr)?;

        match op {
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { line }),
            },
        }
    }
}
