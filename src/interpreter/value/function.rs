use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::FunctionDecl,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            environment::Environment,
        },
        value::core::Value,
    },
};

/// Signature of a built-in function.
///
/// Natives receive the interpreter (none of the current built-ins use it, but
/// the invocation contract passes it) and the evaluated arguments.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult<Value>;

/// A built-in function installed into the global environment.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    /// Name under which the function is defined, e.g. `clock`.
    pub name:     &'static str,
    /// The exact number of arguments the function takes.
    pub arity:    usize,
    /// The host implementation.
    pub function: NativeFn,
}

/// A user-defined function value.
///
/// Holds the shared declaration and the environment that was current when the
/// declaration executed. Invocation chains a fresh frame onto that captured
/// environment, which is what makes closures work: the frame outlives the
/// block that created it for as long as this value is reachable.
#[derive(Debug, Clone)]
pub struct LoxFunction {
    /// The parsed declaration: name, parameters and body.
    pub declaration: Rc<FunctionDecl>,
    /// The environment captured at declaration time.
    pub closure:     Rc<RefCell<Environment>>,
}

impl LoxFunction {
    /// Calls the function with already-evaluated arguments.
    ///
    /// A fresh environment enclosing the captured closure is created, the
    /// parameters are bound in it, and the body runs there. A `Return`
    /// unwinding out of the body is caught here and becomes the call's
    /// result; a body that completes normally yields `nil`.
    ///
    /// The caller has already checked arity, so parameters and arguments zip
    /// exactly.
    fn invoke(&self, interpreter: &mut Interpreter, arguments: &[Value]) -> EvalResult<Value> {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param, argument.clone());
        }

        match interpreter.exec_block(&self.declaration.body, Rc::new(RefCell::new(environment)))? {
            Flow::Return(value) => Ok(value),
            Flow::Normal(_) => Ok(Value::Nil),
        }
    }
}

/// A callable runtime value.
#[derive(Debug, Clone)]
pub enum Callable {
    /// A built-in function.
    Native(NativeFunction),
    /// A user-defined function closing over its declaration environment.
    Function(LoxFunction),
}

impl Callable {
    /// The number of arguments the callable requires.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.arity,
            Self::Function(function) => function.declaration.params.len(),
        }
    }

    /// The name the callable displays as.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Native(native) => native.name,
            Self::Function(function) => &function.declaration.name,
        }
    }

    /// Invokes the callable with already-evaluated arguments.
    ///
    /// # Errors
    /// Propagates any runtime error raised while executing the body.
    pub fn invoke(&self, interpreter: &mut Interpreter, arguments: &[Value]) -> EvalResult<Value> {
        match self {
            Self::Native(native) => (native.function)(interpreter, arguments),
            Self::Function(function) => function.invoke(interpreter, arguments),
        }
    }
}

impl PartialEq for Callable {
    /// Callables compare by identity: the same function value equals itself,
    /// two separately created values are unequal even when textually
    /// identical. Natives are singletons per name.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => a.name == b.name,
            (Self::Function(a), Self::Function(b)) => {
                Rc::ptr_eq(&a.declaration, &b.declaration) && Rc::ptr_eq(&a.closure, &b.closure)
            },
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "<native fn {}>", native.name),
            Self::Function(function) => write!(f, "<fn {}>", function.declaration.name),
        }
    }
}
