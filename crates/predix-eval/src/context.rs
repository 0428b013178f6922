//! Host bindings available to evaluation: registered functions and statics

use crate::EvalError;
use predix_expr::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A host function callable from an expression tree
///
/// Methods receive their receiver as the first argument.
pub type HostFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Registry of host functions and static member values
///
/// Cloning is cheap; functions are shared through `Arc`.
#[derive(Clone, Default)]
pub struct EvalContext {
    functions: HashMap<String, HostFn>,
    statics: HashMap<(String, String), Value>,
}

impl EvalContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Builder-style [`EvalContext::register`]
    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    /// Set the value of the static member `owner::name`
    pub fn set_static(&mut self, owner: impl Into<String>, name: impl Into<String>, value: Value) {
        self.statics.insert((owner.into(), name.into()), value);
    }

    /// Builder-style [`EvalContext::set_static`]
    pub fn with_static(
        mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.set_static(owner, name, value);
        self
    }

    /// Look up a registered function
    pub fn function(&self, name: &str) -> Option<&HostFn> {
        self.functions.get(name)
    }

    /// Look up a static member value
    pub fn static_value(&self, owner: &str, name: &str) -> Option<&Value> {
        self.statics.get(&(owner.to_string(), name.to_string()))
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("EvalContext")
            .field("functions", &functions)
            .field("statics", &self.statics)
            .finish()
    }
}
