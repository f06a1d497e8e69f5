use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::NativeFunction},
    },
};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The callee evaluates first, then every argument strictly left to
    /// right. Only then is the callee required to be a callable of matching
    /// arity, so argument side effects happen even when the call itself
    /// fails.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the value being called.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line of the closing parenthesis, for error reporting.
    ///
    /// # Returns
    /// The call's result value.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] when the callee is not a function.
    /// - [`RuntimeError::ArityMismatch`] on a wrong argument count.
    /// - Anything raised while evaluating operands or running the body.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { line });
        };

        if values.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found: values.len(),
                                                     line });
        }

        callable.invoke(self, &values)
    }
}

/// The built-in functions installed into the global environment.
pub fn natives() -> Vec<NativeFunction> {
    vec![NativeFunction { name:     "clock",
                          arity:    0,
                          function: clock, }]
}

/// Returns the wall-clock time as seconds since the Unix epoch.
///
/// The division into seconds happens in floating point, so fractional seconds
/// survive. Monotonicity is not guaranteed.
fn clock(_interpreter: &mut Interpreter, _arguments: &[Value]) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .unwrap_or_default();
    Ok(Value::Number(elapsed.as_secs_f64()))
}
