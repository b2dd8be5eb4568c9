use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    error::{ErrorKind, ScriptError},
    interpreter::{
        evaluator::core::Environment,
        script::{Script, Statement},
        storage::{methods::Registry, variables::Variables},
    },
};

/// A statement that failed, with enough context to locate it.
///
/// A statement that fails more than once in a run, such as one inside a
/// loop body, is recorded once: `error` is the first error it produced
/// and `occurrences` counts every failure.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementFailure {
    /// Position of the statement within its own script or block body.
    pub index:       usize,
    /// Line the statement starts on.
    pub line:        usize,
    /// Block nesting depth; `0` for top-level statements.
    pub depth:       usize,
    /// The statement's source text.
    pub statement:   String,
    /// What went wrong the first time.
    pub error:       ScriptError,
    /// How many times the statement failed during the run.
    pub occurrences: u64,
}

impl StatementFailure {
    /// The failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl std::fmt::Display for StatementFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (statement {}: `{}`)", self.error, self.index, self.statement)?;
        if self.occurrences > 1 {
            write!(f, " x{}", self.occurrences)?;
        }
        Ok(())
    }
}

/// The outcome of one top-level run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    /// Number of top-level statements in the script.
    pub statements: usize,
    /// One entry per failing statement, in the order each first failed.
    pub failures:   Vec<StatementFailure>,
}

impl RunReport {
    /// Returns `true` if no statement failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Environment {
    /// Runs a script as an independent top-level run.
    ///
    /// The variable table is cleared first, so nothing declared by an
    /// earlier run is visible. Every statement is attempted in order; a
    /// failing statement is logged, recorded in the report, and skipped.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    ///
    /// use autoscript::interpreter::{
    ///     evaluator::core::Environment, script::Script, storage::methods::Registry,
    ///     value::core::Value,
    /// };
    ///
    /// let mut env = Environment::new(Arc::new(Registry::new()));
    /// let report = env.run(&Script::parse("x = 1; missing(); y = x + 1"));
    ///
    /// assert_eq!(report.statements, 3);
    /// assert_eq!(report.failures.len(), 1);
    /// assert_eq!(report.failures[0].statement, "missing()");
    /// assert_eq!(env.variables().get("y"), Some(&Value::Integer(2)));
    /// ```
    pub fn run(&mut self, script: &Script) -> RunReport {
        self.variables.clear();
        self.failures.clear();
        self.failure_slots.clear();
        self.depth = 0;

        info!(statements = script.len(), "run started");
        self.execute_script(script);

        let failures = std::mem::take(&mut self.failures);
        info!(statements = script.len(), failures = failures.len(), "run finished");

        RunReport { statements: script.len(),
                    failures }
    }

    /// Runs every statement of `script` in this environment without
    /// clearing anything. Used for block bodies.
    pub fn execute_script(&mut self, script: &Script) {
        for statement in script.statements() {
            if let Err(error) = self.execute_statement(statement) {
                self.record_failure(statement, error);
            }
        }
    }

    /// Executes a single classified statement.
    fn execute_statement(&mut self, statement: &Statement) -> Result<(), ScriptError> {
        let instruction = statement.instruction.as_ref().map_err(Clone::clone)?;
        debug!(index = statement.index,
               line = statement.line,
               depth = self.depth,
               statement = %statement.text,
               "execute");
        self.execute(instruction)?;
        Ok(())
    }

    /// Logs a failed statement and adds it to the current report.
    ///
    /// Every failure is logged; a statement that already failed in this run
    /// only has its occurrence count raised, so the report stays bounded by
    /// the size of the script.
    fn record_failure(&mut self, statement: &Statement, error: ScriptError) {
        warn!(index = statement.index,
              line = statement.line,
              depth = self.depth,
              statement = %statement.text,
              kind = %error.kind(),
              error = %error,
              "statement failed");

        if let Some(failure) = self.failure_slots
                                   .get(&statement.offset)
                                   .and_then(|&slot| self.failures.get_mut(slot))
        {
            failure.occurrences += 1;
            return;
        }

        self.failure_slots.insert(statement.offset, self.failures.len());
        self.failures.push(StatementFailure { index: statement.index,
                                              line: statement.line,
                                              depth: self.depth,
                                              statement: statement.text.clone(),
                                              error,
                                              occurrences: 1 });
    }
}

/// A method registry paired with the environment that runs scripts
/// against it.
///
/// # Example
/// ```
/// use autoscript::interpreter::{
///     runner::Interpreter, storage::methods::Registry, value::core::Value,
/// };
///
/// let mut interpreter = Interpreter::new(Registry::with_builtins().unwrap());
///
/// let report = interpreter.run("x = 0; for (3) { x = x + 1 };");
/// assert!(report.is_clean());
/// assert_eq!(interpreter.variables().get("x"), Some(&Value::Integer(3)));
///
/// // Every run starts from an empty variable table.
/// let report = interpreter.run("y = x");
/// assert_eq!(report.failures.len(), 1);
/// ```
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    /// Creates an interpreter over a fully populated registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    /// Creates an interpreter over a registry shared with other
    /// interpreters.
    #[must_use]
    pub fn with_shared_registry(registry: Arc<Registry>) -> Self {
        Self { environment: Environment::new(registry) }
    }

    /// Parses and runs `source` as an independent top-level run.
    pub fn run(&mut self, source: &str) -> RunReport {
        let script = Script::parse(source);
        self.environment.run(&script)
    }

    /// Runs an already parsed script as an independent top-level run.
    pub fn run_script(&mut self, script: &Script) -> RunReport {
        self.environment.run(script)
    }

    /// The variable table as left by the last run.
    #[must_use]
    pub const fn variables(&self) -> &Variables {
        self.environment.variables()
    }

    /// The method registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.environment.registry()
    }
}
