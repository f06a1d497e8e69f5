use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A frame of name bindings chained to an enclosing frame.
///
/// Lookup and assignment walk the chain outward toward the global frame;
/// definition only ever touches the current frame. Frames are shared through
/// `Rc<RefCell<_>>` because closures keep their declaration frame alive after
/// the block that created it has exited. Children point at parents only, so
/// the chain can never form a cycle and reference counting reclaims it.
#[derive(Debug, Default)]
pub struct Environment {
    bindings:  HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a frame with no enclosing scope (the global frame).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame enclosed by an existing one.
    ///
    /// Used on block entry and function invocation.
    #[must_use]
    pub fn with_enclosing(enclosing: Rc<RefCell<Self>>) -> Self {
        Self { bindings:  HashMap::new(),
               enclosing: Some(enclosing), }
    }

    /// Binds a name in this frame, silently overwriting any existing binding.
    ///
    /// ## Example
    /// ```
    /// use loxide::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Number(1.0));
    /// env.define("x", Value::Number(2.0));
    ///
    /// assert_eq!(env.get("x"), Some(Value::Number(2.0)));
    /// ```
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Looks a name up, searching this frame and then the enclosing chain.
    ///
    /// # Returns
    /// The bound value, or `None` when no frame in the chain defines the
    /// name.
    ///
    /// ## Example
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use loxide::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut outer = Environment::new();
    /// outer.define("a", Value::Number(1.0));
    ///
    /// let inner = Environment::with_enclosing(Rc::new(RefCell::new(outer)));
    /// assert_eq!(inner.get("a"), Some(Value::Number(1.0)));
    /// assert_eq!(inner.get("b"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.enclosing
            .as_ref()
            .and_then(|enclosing| enclosing.borrow().get(name))
    }

    /// Updates the first frame in the chain that defines `name`.
    ///
    /// A failed assignment changes nothing: no frame gains a binding.
    ///
    /// # Returns
    /// `true` when a frame was updated, `false` when the name is undefined in
    /// the entire chain.
    ///
    /// ## Example
    /// ```
    /// use loxide::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Number(1.0));
    ///
    /// assert!(env.assign("x", Value::Number(5.0)));
    /// assert!(!env.assign("y", Value::Number(5.0)));
    /// assert_eq!(env.get("y"), None);
    /// ```
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return true;
        }
        self.enclosing
            .as_ref()
            .is_some_and(|enclosing| enclosing.borrow_mut().assign(name, value))
    }
}
