use std::{
    fs,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use autoscript::{
    error::{ErrorKind, ParseError, RegistrationError, RuntimeError, ScriptError},
    interpreter::{
        runner::{Interpreter, RunReport},
        storage::{
            builtin::BUILTIN_METHODS,
            methods::{Method, MethodKind, Registry},
        },
        value::core::Value,
    },
    run_source,
    sim::Drivetrain,
};
use walkdir::WalkDir;

#[test]
fn sample_scripts_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "auto"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut registry = Registry::with_builtins().unwrap();
        Drivetrain::new().register(&mut registry).unwrap();
        let report = Interpreter::new(registry).run(&source);

        count += 1;
        assert!(report.is_clean(),
                "Sample script {path:?} had failures:\n{}",
                describe_failures(&report));
    }

    assert!(count > 0, "No sample scripts found in scripts/");
}

fn describe_failures(report: &RunReport) -> String {
    report.failures
          .iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}

fn assert_success(src: &str) {
    let report = run_source(src).unwrap();
    if !report.is_clean() {
        panic!("Script failed:\n{}", describe_failures(&report));
    }
}

fn assert_failure(src: &str) {
    let report = run_source(src).unwrap();
    if report.is_clean() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Runs `src` with built-ins only and returns the interpreter for
/// inspection.
fn run(src: &str) -> (Interpreter, RunReport) {
    let mut interpreter = Interpreter::new(Registry::with_builtins().unwrap());
    let report = interpreter.run(src);
    (interpreter, report)
}

fn var(interpreter: &Interpreter, name: &str) -> Value {
    interpreter.variables()
               .get(name)
               .cloned()
               .unwrap_or_else(|| panic!("variable '{name}' is not declared"))
}

#[test]
fn whole_doubles_become_integers() {
    let (interpreter, report) = run("a = 3.0; b = 3.5; c = 6 / 3; d = 1.5 * 2; e = 7 / 2");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "a"), Value::Integer(3));
    assert_eq!(var(&interpreter, "b"), Value::Real(3.5));
    assert_eq!(var(&interpreter, "c"), Value::Integer(2));
    assert_eq!(var(&interpreter, "d"), Value::Integer(3));
    assert_eq!(var(&interpreter, "e"), Value::Real(3.5));
}

#[test]
fn operator_precedence_and_associativity() {
    let (interpreter, report) =
        run("a = 10-2+3; b = 2+3*4; c = (2+3)*4; d = 8/4/2; e = 10 - -2; f = -2*3");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "a"), Value::Integer(11));
    assert_eq!(var(&interpreter, "b"), Value::Integer(14));
    assert_eq!(var(&interpreter, "c"), Value::Integer(20));
    assert_eq!(var(&interpreter, "d"), Value::Integer(1));
    assert_eq!(var(&interpreter, "e"), Value::Integer(12));
    assert_eq!(var(&interpreter, "f"), Value::Integer(-6));
}

#[test]
fn string_concatenation() {
    let (interpreter, report) = run("a = \"a\"+\"b\"; b = \"a\"+1; c = 1+2; d = 1.5 + \"x\"");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "a"), Value::from("ab"));
    assert_eq!(var(&interpreter, "b"), Value::from("a1"));
    assert_eq!(var(&interpreter, "c"), Value::Integer(3));
    assert_eq!(var(&interpreter, "d"), Value::from("1.5x"));

    assert_failure("x = \"a\" - 1");
}

#[test]
fn comparisons_and_logic() {
    assert_success("assert(2 < 3); assert(3 > 2); assert(2 <= 2); assert(3 >= 3)");
    assert_success("assert(2 != 3); assert(2 == 2.0); assert(\"a\" == \"a\")");
    assert_success("assert(\"1\" != 1)");
    assert_success("assert(TRUE && !False); assert(false || true)");
    assert_success("assert(1 + 1 == 2 && 2 * 2 == 4)");
    assert_failure("x = \"a\" < 1");
    assert_failure("x = 1 && true");
}

#[test]
fn logic_short_circuits() {
    assert_success("x = false && missing(); assert(!x)");
    assert_success("x = true || missing(); assert(x)");
    assert_failure("x = true && missing()");
}

#[test]
fn for_loop_counts() {
    let (interpreter, report) = run("x=0; for(3){ x=x+1; };");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "x"), Value::Integer(3));

    let (interpreter, report) = run("x=0; for(0){ x=x+1 }; for(-4){ x=x+1 }");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "x"), Value::Integer(0));
}

#[test]
fn for_count_is_resolved_once() {
    let (interpreter, report) = run("n = 3; x = 0; for(n){ n = n + 1; x = x + 1 }");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "x"), Value::Integer(3));
    assert_eq!(var(&interpreter, "n"), Value::Integer(6));
}

#[test]
fn for_count_must_be_an_integer() {
    let (_, report) = run("for(2.5){ x = 1 }");
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error,
                     ScriptError::Runtime(RuntimeError::RealIsFractional { .. })));

    assert_failure("for(\"3\"){ x = 1 }");
}

#[test]
fn while_loop_rechecks_condition() {
    let (interpreter, report) = run("i = 0\nwhile (i < 5) {\n  i = i + 1\n}\n");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "i"), Value::Integer(5));
}

#[test]
fn if_runs_body_only_when_true() {
    let (interpreter, report) = run("a = 0; b = 0; if (1 < 2) { a = 1 }; if (false) { b = 1 }");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "a"), Value::Integer(1));
    assert_eq!(var(&interpreter, "b"), Value::Integer(0));
}

#[test]
fn conditions_must_be_boolean() {
    let (_, report) = run("if (1) { x = 1 }");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind(), ErrorKind::Evaluation);

    assert_failure("while (\"yes\") { x = 1 }");
}

#[test]
fn nested_blocks() {
    let src = "count = 0\n\
               for (3) {\n\
                   for (2) {\n\
                       if (count < 4) { count = count + 1 }\n\
                   }\n\
               }\n";
    let (interpreter, report) = run(src);
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "count"), Value::Integer(4));
}

#[test]
fn failing_statement_is_isolated() {
    let marks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&marks);

    let mut registry = Registry::new();
    registry.register_void("mark", move |args, _| {
                sink.lock().unwrap().push(args[0].clone());
                Ok(())
            })
            .unwrap();

    let report = Interpreter::new(registry).run("mark(1); missing(); mark(3)");

    assert_eq!(*marks.lock().unwrap(), vec![Value::Integer(1), Value::Integer(3)]);
    assert_eq!(report.statements, 3);
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!(failure.index, 1);
    assert_eq!(failure.statement, "missing()");
    assert_eq!(failure.depth, 0);
    assert_eq!(failure.kind(), ErrorKind::Lookup);
}

#[test]
fn failures_inside_loops_are_isolated_per_iteration() {
    let (interpreter, report) = run("n = 0; for (3) { missing(); n = n + 1 }");
    assert_eq!(var(&interpreter, "n"), Value::Integer(3));
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!((failure.depth, failure.occurrences), (1, 3));
    assert_eq!(failure.statement, "missing()");
    assert!(failure.to_string().ends_with("x3"));
}

#[test]
fn repeated_failures_are_counted_not_stored() {
    let (interpreter, report) =
        run("n = 0; while (n < 100000) { n = n + 1; y = n / 0; z = q }; after = 1");
    assert_eq!(var(&interpreter, "after"), Value::Integer(1));
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.occurrences == 100_000));
    assert!(matches!(report.failures[0].error,
                     ScriptError::Runtime(RuntimeError::DivisionByZero { .. })));
    assert_eq!(report.failures[1].kind(), ErrorKind::Lookup);
}

#[test]
fn identical_statements_are_reported_separately() {
    let (_, report) = run("for (2) { missing() }; for (2) { missing() }");
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].index, 0);
    assert_eq!(report.failures[1].index, 0);
    assert!(report.failures.iter().all(|f| f.occurrences == 2));

    // Counts start over with every run.
    let mut interpreter = Interpreter::new(Registry::with_builtins().unwrap());
    for _ in 0..2 {
        let report = interpreter.run("for (4) { missing() }");
        assert_eq!(report.failures[0].occurrences, 4);
    }
}

#[test]
fn deep_nesting_fails_one_statement() {
    let src = format!("x = {}1{}; y = 2", "(".repeat(10_000), ")".repeat(10_000));
    let (interpreter, report) = run(&src);
    assert_eq!(report.statements, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind(), ErrorKind::Classification);
    assert!(matches!(report.failures[0].error,
                     ScriptError::Parse(ParseError::NestingTooDeep { line: 1 })));
    assert_eq!(var(&interpreter, "y"), Value::Integer(2));

    let src = format!("x = {}1; y = 2", "-".repeat(10_000));
    let (interpreter, report) = run(&src);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(var(&interpreter, "y"), Value::Integer(2));

    let src = format!("x = 1{}; y = 2", " + 1".repeat(10_000));
    let (interpreter, report) = run(&src);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(var(&interpreter, "y"), Value::Integer(2));

    let src = format!("{}x = 1{}; y = 2", "if(true){".repeat(10_000), "}".repeat(10_000));
    let (interpreter, report) = run(&src);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind(), ErrorKind::Classification);
    assert_eq!(var(&interpreter, "y"), Value::Integer(2));
}

#[test]
fn failures_report_their_line() {
    let (_, report) = run("x = 1\n\ny = 1 / 0\nz = 2");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line, 3);
    assert!(matches!(report.failures[0].error,
                     ScriptError::Runtime(RuntimeError::DivisionByZero { line: 3 })));
}

#[test]
fn variables_are_cleared_between_runs() {
    let mut interpreter = Interpreter::new(Registry::with_builtins().unwrap());

    assert!(interpreter.run("x = 5;").is_clean());
    assert_eq!(var(&interpreter, "x"), Value::Integer(5));
    assert_eq!(interpreter.variables().len(), 1);

    let report = interpreter.run("y = x;");
    assert!(interpreter.variables().is_empty());
    assert!(!interpreter.variables().contains("x"));
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error,
                     ScriptError::Runtime(RuntimeError::UnknownVariable { .. })));
    assert_eq!(report.failures[0].kind(), ErrorKind::Lookup);
}

#[test]
fn variables_persist_across_nested_blocks() {
    let src = "x = 5; n = 0\n\
               while (n < 3) { n = n + 1; total = x * n }\n\
               for (2) { x = x + 1; last = total }";
    let (interpreter, report) = run(src);
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "x"), Value::Integer(7));
    assert_eq!(var(&interpreter, "total"), Value::Integer(15));
    assert_eq!(var(&interpreter, "last"), Value::Integer(15));

    let mut names: Vec<&str> = interpreter.variables().iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    assert_eq!(names, ["last", "n", "total", "x"]);
}

#[test]
fn redeclaration_overwrites() {
    let (interpreter, report) = run("x = 1; x = \"one\"; x = x + \"!\"");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "x"), Value::from("one!"));
}

#[test]
fn classification_failures() {
    for src in ["x = ", "5 + 5", "x = y = 3", "shoot() extra", "if (true) { x = 1 } y", "x = 1 @ 2"] {
        let (_, report) = run(src);
        assert_eq!(report.failures.len(), 1, "expected one failure for {src:?}");
        assert_eq!(report.failures[0].kind(), ErrorKind::Classification, "{src:?}");
    }
}

#[test]
fn unbalanced_braces_fail_one_statement() {
    let (interpreter, report) = run("x = 1; }; y = 2");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(var(&interpreter, "y"), Value::Integer(2));

    let (interpreter, report) = run("x = 1; while (true) { x = 2;");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(var(&interpreter, "x"), Value::Integer(1));
}

#[test]
fn comments_and_separators() {
    let src = "# autonomous routine\r\nx = 1 # set x\r\ny = \"a;b\"; z = x + 1\n";
    let (interpreter, report) = run(src);
    assert!(report.is_clean());
    assert_eq!(report.statements, 3);
    assert_eq!(var(&interpreter, "y"), Value::from("a;b"));
    assert_eq!(var(&interpreter, "z"), Value::Integer(2));
}

#[test]
fn comments_end_at_the_next_semicolon() {
    let (interpreter, report) = run("# drive first; x = 1\ny = 2 # then; z = x + y");
    assert!(report.is_clean());
    assert_eq!(report.statements, 3);
    assert_eq!(var(&interpreter, "x"), Value::Integer(1));
    assert_eq!(var(&interpreter, "z"), Value::Integer(3));
}

#[test]
fn void_methods_have_no_value() {
    let (_, report) = run("x = print(1)");
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error,
                     ScriptError::Runtime(RuntimeError::VoidMethodInExpression { .. })));

    // A returning method may be called for its effect alone.
    assert_success("abs(-1)");
}

#[test]
fn arguments_are_resolved_at_call_time() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut registry = Registry::new();
    registry.register_void("record", move |args, _| {
                sink.lock().unwrap().extend_from_slice(args);
                Ok(())
            })
            .unwrap();

    let report = Interpreter::new(registry).run("i = 0; for (3) { i = i + 1; record(i * 10) }");
    assert!(report.is_clean());
    assert_eq!(*seen.lock().unwrap(),
               vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)]);
}

#[test]
fn builtin_methods() {
    assert_success("assert(abs(-5) == 5); assert(abs(-2.5) == 2.5)");
    assert_success("assert(min(2, 3) == 2); assert(max(2, 3.5) == 3.5)");
    assert_success("assert(clamp(5, 0, 1) == 1); assert(clamp(-5, 0, 1) == 0)");
    assert_success("assert(round(3.7) == 4); assert(sqrt(9) == 3)");
    assert_success("assert(str(3) == \"3\"); assert(num(\"2.5\") == 2.5)");
    assert_success("print(\"speed\", 0.5, true); wait(0)");
    assert_failure("assert(1 > 2)");
    assert_failure("wait(-1)");
    assert_failure("abs(1, 2)");
    assert_failure("sqrt(-1)");
    assert_failure("x = num(\"fast\")");
}

#[test]
fn arithmetic_errors() {
    assert_failure("x = 1 / 0");
    assert_failure("x = 1.5 / 0");
    assert_failure("x = 9223372036854775807 + 1");
    assert_failure("x = -true");
}

#[test]
fn loop_stops_through_returning_method() {
    let running = Arc::new(AtomicBool::new(true));
    let polls = Arc::new(AtomicUsize::new(0));

    let mut registry = Registry::with_builtins().unwrap();
    let (flag, counter) = (Arc::clone(&running), Arc::clone(&polls));
    registry.register_returning("running", move |_, _| {
                if counter.fetch_add(1, Ordering::SeqCst) >= 4 {
                    flag.store(false, Ordering::SeqCst);
                }
                Ok(Value::Bool(flag.load(Ordering::SeqCst)))
            })
            .unwrap();

    let mut interpreter = Interpreter::new(registry);
    let report = interpreter.run("n = 0; while (running()) { n = n + 1 }");
    assert!(report.is_clean());
    assert_eq!(var(&interpreter, "n"), Value::Integer(4));
    assert!(!running.load(Ordering::SeqCst));
}

#[test]
fn infinite_loop_runs_until_stopped_externally() {
    let handle = thread::spawn(|| run_source("while(true){ wait(0.001) }"));

    thread::sleep(Duration::from_millis(200));
    assert!(!handle.is_finished(), "while(true) returned on its own");
    // The thread is left running; the test harness ends it on exit.
}

#[test]
fn registration_errors() {
    let mut registry = Registry::with_builtins().unwrap();
    for name in BUILTIN_METHODS {
        assert!(registry.methods().contains(name) || registry.returning_methods().contains(name),
                "built-in '{name}' is not registered");
    }
    assert_eq!(registry.methods().names(), ["assert", "print", "wait"]);
    assert_eq!(registry.methods().len() + registry.returning_methods().len(),
               BUILTIN_METHODS.len());
    assert!(Registry::new().methods().is_empty());
    registry.register_void("arcade", |_, _| Ok(())).unwrap();

    assert_eq!(registry.register_void("arcade", |_, _| Ok(())),
               Err(RegistrationError::AlreadyRegistered { name: "arcade".into() }));
    assert_eq!(registry.register_returning("print", |_, _| Ok(Value::Integer(0))),
               Err(RegistrationError::NameConflict { name:     "print".into(),
                                                     existing: MethodKind::Void, }));
    assert_eq!(registry.register_void("for", |_, _| Ok(())),
               Err(RegistrationError::InvalidName { name: "for".into() }));
    assert_eq!(registry.add_to(MethodKind::Returning, "gyro", Method::void(|_, _| Ok(()))),
               Err(RegistrationError::WrongTableKind { name:     "gyro".into(),
                                                       expected: MethodKind::Returning,
                                                       found:    MethodKind::Void, }));

    assert!(registry.methods().contains("arcade"));
    assert!(!registry.returning_methods().contains("gyro"));
}

#[test]
fn simulated_drivetrain() {
    let drivetrain = Drivetrain::new();
    let mut registry = Registry::with_builtins().unwrap();
    drivetrain.register(&mut registry).unwrap();
    let mut interpreter = Interpreter::new(registry);

    let report = interpreter.run("arcade(0.5, 0.25); shoot(); d = distance(); h = heading()");
    assert!(report.is_clean(), "{}", describe_failures(&report));
    assert_eq!(drivetrain.outputs(), (0.75, 0.25));
    assert_eq!(drivetrain.shots(), 1);

    let report = interpreter.run("tank(2, 0); stop(); t = elapsed()");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].statement, "tank(2, 0)");
    assert_eq!(drivetrain.outputs(), (0.0, 0.0));
}
