use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    ast::{Expr, Instruction},
    error::RuntimeError,
    interpreter::{
        runner::StatementFailure,
        storage::{methods::Registry, variables::Variables},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime state of script execution.
///
/// An environment owns the variable table and shares a read-only method
/// registry. Nested blocks execute in the same environment, so everything
/// they declare is visible to the rest of the run.
///
/// ## Usage
///
/// Create one environment per thread that runs scripts. Every call to
/// [`Environment::run`] is an independent top-level run and starts from an
/// empty variable table.
pub struct Environment {
    /// The variable table, shared by a run and all of its nested blocks.
    pub(crate) variables:     Variables,
    /// The method tables.
    pub(crate) registry:      Arc<Registry>,
    /// Failures recorded during the current run.
    pub(crate) failures:      Vec<StatementFailure>,
    /// Position in `failures` of each failed statement, keyed by the
    /// statement's offset.
    pub(crate) failure_slots: HashMap<usize, usize>,
    /// Block nesting depth of the statement currently executing.
    pub(crate) depth:         usize,
}

impl Environment {
    /// Creates an environment with an empty variable table.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { variables: Variables::new(),
               registry,
               failures: Vec::new(),
               failure_slots: HashMap::new(),
               depth: 0 }
    }

    /// The variable table as left by the last run.
    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The method registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves an expression to a value.
    ///
    /// Literals resolve to themselves, variables are looked up in the flat
    /// table, calls go to the returning-method table, and operators are
    /// applied to their resolved operands.
    ///
    /// # Example
    /// ```
    /// use std::{collections::HashMap, sync::Arc};
    ///
    /// use autoscript::{
    ///     ast::{BinaryOperator, Expr, LiteralValue},
    ///     interpreter::{
    ///         evaluator::core::Environment, storage::methods::Registry, value::core::Value,
    ///     },
    /// };
    ///
    /// let env = Environment::new(Arc::new(Registry::new()));
    /// let literal = |n| Box::new(Expr::Literal { value: LiteralValue::Integer(n),
    ///                                             line:  1, });
    /// let expr = Expr::BinaryOp { left:  literal(7),
    ///                             op:    BinaryOperator::Div,
    ///                             right: literal(2),
    ///                             line:  1, };
    ///
    /// assert_eq!(env.eval(&expr).unwrap(), Value::Real(3.5));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::UnaryOp { op, expr, line } => {
                let operand = self.eval(expr)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                self.eval_binary_op(left, *op, right, *line)
            },
            Expr::MethodCall { name,
                               arguments,
                               line, } => self.eval_method_call(name, arguments, *line),
        }
    }

    /// Looks up a declared variable.
    ///
    /// # Errors
    /// `RuntimeError::UnknownVariable` if the name was never declared in
    /// this run.
    pub fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Executes a single instruction.
    ///
    /// Declarations resolve their right side once and overwrite the
    /// binding. Method calls resolve their arguments now and invoke the
    /// bound method. Blocks delegate to the flow-control evaluator.
    pub fn execute(&mut self, instruction: &Instruction) -> EvalResult<()> {
        match instruction {
            Instruction::Declaration { name, value, line } => {
                let value = self.eval(value)?;
                debug!(name = %name, value = %value, line, "declare");
                self.variables.put(name, value);
                Ok(())
            },
            Instruction::MethodCall { name,
                                      arguments,
                                      line, } => self.call_statement_method(name, arguments, *line),
            Instruction::FlowBlock(block) => {
                let outcome = self.eval_flow_block(block)?;
                debug!(kind = %block.kind, line = block.line, outcome = ?outcome, "block finished");
                Ok(())
            },
        }
    }
}
