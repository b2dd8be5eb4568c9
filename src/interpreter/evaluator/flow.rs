use tracing::trace;

use crate::{
    ast::{FlowBlock, FlowKind},
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        script::Script,
    },
    util::num::count_to_iterations,
};

/// What a flow-control block did when it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// An `if` whose condition held; the body ran once.
    Ran,
    /// An `if` whose condition did not hold.
    Skipped,
    /// A loop that finished after running its body this many times.
    Completed {
        /// Number of times the body ran.
        iterations: u64,
    },
}

impl Environment {
    /// Runs an `if`, `while` or `for` block.
    ///
    /// - `if (cond)` runs the body once when `cond` is `true`.
    /// - `while (cond)` re-resolves `cond` before every iteration, so a
    ///   returning method or a variable assigned in the body can end the loop.
    ///   There is no iteration limit.
    /// - `for (n)` resolves `n` once and runs the body `n` times; zero or a
    ///   negative count runs it zero times.
    ///
    /// Body statements run in this environment with the failure isolation
    /// of a top-level script: a failing body statement is recorded and the
    /// rest of the body still runs.
    ///
    /// # Errors
    /// - `ExpectedBoolean` if an `if`/`while` condition is not a boolean.
    /// - `ExpectedNumber` / `RealIsFractional` if a `for` count is not an
    ///   integer.
    /// - Any error raised while resolving the header.
    pub fn eval_flow_block(&mut self, block: &FlowBlock) -> EvalResult<BlockOutcome> {
        let line = block.line;

        match block.kind {
            FlowKind::If => {
                if !self.eval(&block.header)?.as_bool(line)? {
                    return Ok(BlockOutcome::Skipped);
                }
                self.execute_body(&block.body);
                Ok(BlockOutcome::Ran)
            },
            FlowKind::While => {
                let mut iterations: u64 = 0;
                while self.eval(&block.header)?.as_bool(line)? {
                    iterations = iterations.saturating_add(1);
                    trace!(line, iteration = iterations, "while");
                    self.execute_body(&block.body);
                }
                Ok(BlockOutcome::Completed { iterations })
            },
            FlowKind::For => {
                let count = self.eval(&block.header)?.as_count(line)?;
                let iterations = count_to_iterations(count);
                for iteration in 1..=iterations {
                    trace!(line, iteration, of = iterations, "for");
                    self.execute_body(&block.body);
                }
                Ok(BlockOutcome::Completed { iterations })
            },
        }
    }

    /// Runs a block body one level deeper, without clearing variables.
    fn execute_body(&mut self, body: &Script) {
        self.depth += 1;
        self.execute_script(body);
        self.depth -= 1;
    }
}
