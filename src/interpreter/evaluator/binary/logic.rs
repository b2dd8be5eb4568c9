use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// Both operands must be booleans; the right operand is only resolved
    /// when the left one does not decide the result.
    ///
    /// # Parameters
    /// - `op`: `And` or `Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    pub fn eval_logic(&self,
                      op: BinaryOperator,
                      left: &Expr,
                      right: &Expr,
                      line: usize)
                      -> EvalResult<Value> {
        let left = self.eval(left)?.as_bool(line)?;
        let decided = match op {
            BinaryOperator::And => !left,
            BinaryOperator::Or => left,
            _ => unreachable!("eval_logic used with non logical operator"),
        };
        if decided {
            trace!(line, operator = %op, "short-circuit");
            return Ok(Value::Bool(left));
        }

        Ok(Value::Bool(self.eval(right)?.as_bool(line)?))
    }
}
