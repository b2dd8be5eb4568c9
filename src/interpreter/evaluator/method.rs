use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Resolves argument expressions left to right.
    ///
    /// Arguments are resolved at call time, so a call inside a loop sees the
    /// current value of every variable it mentions.
    pub fn eval_arguments(&self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Calls a returning method from inside an expression.
    ///
    /// # Errors
    /// - `VoidMethodInExpression` if `name` is a void method.
    /// - `UnknownMethod` if `name` is bound in neither table.
    /// - Whatever the method itself reports.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    ///
    /// use autoscript::interpreter::{
    ///     evaluator::core::Environment, storage::methods::Registry, value::core::Value,
    /// };
    ///
    /// let mut registry = Registry::new();
    /// registry.register_returning("heading", |_, _| Ok(Value::Real(90.5))).unwrap();
    /// registry.register_void("shoot", |_, _| Ok(())).unwrap();
    ///
    /// let env = Environment::new(Arc::new(registry));
    /// assert_eq!(env.eval_method_call("heading", &[], 1).unwrap(), Value::Real(90.5));
    /// assert!(env.eval_method_call("shoot", &[], 1).is_err());
    /// assert!(env.eval_method_call("intake", &[], 1).is_err());
    /// ```
    pub fn eval_method_call(&self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let Some(method) = self.registry.returning_method(name) else {
            if self.registry.void_method(name).is_some() {
                return Err(RuntimeError::VoidMethodInExpression { name: name.to_string(),
                                                                  line });
            }
            return Err(RuntimeError::UnknownMethod { name: name.to_string(),
                                                     line });
        };

        let args = self.eval_arguments(arguments)?;
        method(&args, line)
    }

    /// Calls a method as a statement.
    ///
    /// Void methods are looked up first. A returning method may also be
    /// called as a statement, in which case its result is discarded.
    ///
    /// # Errors
    /// `UnknownMethod` if `name` is bound in neither table, otherwise any
    /// error raised while resolving arguments or by the method itself.
    pub fn call_statement_method(&self,
                                 name: &str,
                                 arguments: &[Expr],
                                 line: usize)
                                 -> EvalResult<()> {
        if let Some(method) = self.registry.void_method(name) {
            let args = self.eval_arguments(arguments)?;
            debug!(method = name, arguments = args.len(), line, "call");
            return method(&args, line);
        }

        if let Some(method) = self.registry.returning_method(name) {
            let args = self.eval_arguments(arguments)?;
            let discarded = method(&args, line)?;
            debug!(method = name, arguments = args.len(), line, result = %discarded, "call, result discarded");
            return Ok(());
        }

        Err(RuntimeError::UnknownMethod { name: name.to_string(),
                                          line })
    }
}
