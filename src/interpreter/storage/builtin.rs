use crate::{
    error::{RegistrationError, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        storage::methods::{Method, Registry},
        value::core::Value,
    },
};

/// Conversions between strings and numbers.
pub mod convert;
/// Numeric helpers: `abs`, `min`, `max`, `clamp`, `round`, `sqrt`.
pub mod math;
/// `print` and `assert`.
pub mod print;
/// `wait`, the only blocking built-in.
pub mod wait;

/// Signature of a built-in void method.
type VoidBuiltin = fn(&[Value], usize) -> EvalResult<()>;
/// Signature of a built-in returning method.
type ReturningBuiltin = fn(&[Value], usize) -> EvalResult<Value>;

/// A built-in implementation of either kind.
#[derive(Clone, Copy)]
enum BuiltinFn {
    Void(VoidBuiltin),
    Returning(ReturningBuiltin),
}

/// Specifies the allowed number of arguments for a method.
///
/// - `Exact(n)` means the method must receive exactly `n` arguments.
/// - `AtLeast(n)` means any count of `n` or more is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// Checks an argument count for the method `name`.
    ///
    /// # Errors
    /// `RuntimeError::ArgumentCountMismatch` when the count is not accepted.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::storage::builtin::Arity;
    ///
    /// assert!(Arity::Exact(2).check("arcade", 2, 1).is_ok());
    /// assert!(Arity::Exact(2).check("arcade", 1, 1).is_err());
    /// assert!(Arity::AtLeast(0).check("print", 5, 1).is_ok());
    /// ```
    pub fn check(self, name: &str, found: usize, line: usize) -> EvalResult<()> {
        let accepted = match self {
            Self::Exact(n) => found == n,
            Self::AtLeast(n) => found >= n,
        };
        if accepted {
            return Ok(());
        }

        let expected = match self {
            Self::Exact(n) => n.to_string(),
            Self::AtLeast(n) => format!("at least {n}"),
        };
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  expected,
                                                  found,
                                                  line })
    }
}

/// Borrows exactly `N` arguments of the method `name` as an array.
///
/// # Errors
/// `RuntimeError::ArgumentCountMismatch` when `args` holds any other number
/// of values.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::exact_args, value::core::Value};
///
/// let args = [Value::Integer(1), Value::Integer(2)];
/// let [a, b] = exact_args("min", &args, 1).unwrap();
/// assert_eq!((a, b), (&Value::Integer(1), &Value::Integer(2)));
/// assert!(exact_args::<3>("clamp", &args, 1).is_err());
/// ```
pub fn exact_args<'a, const N: usize>(name: &str,
                                      args: &'a [Value],
                                      line: usize)
                                      -> EvalResult<&'a [Value; N]> {
    args.try_into()
        .map_err(|_| RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                           expected: N.to_string(),
                                                           found: args.len(),
                                                           line })
}

/// Defines built-in methods by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a `BuiltinFn` implementing the method.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used by [`install`]),
/// - `BUILTIN_METHODS` (public list of built-in names).
macro_rules! builtin_methods {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_METHODS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_methods! {
    "print"  => { arity: Arity::AtLeast(0), func: BuiltinFn::Void(print::print) },
    "wait"   => { arity: Arity::Exact(1),   func: BuiltinFn::Void(wait::wait) },
    "assert" => { arity: Arity::Exact(1),   func: BuiltinFn::Void(print::assert_fn) },
    "abs"    => { arity: Arity::Exact(1),   func: BuiltinFn::Returning(math::abs) },
    "min"    => { arity: Arity::Exact(2),   func: BuiltinFn::Returning(|args, line| math::min_max("min", args, line)) },
    "max"    => { arity: Arity::Exact(2),   func: BuiltinFn::Returning(|args, line| math::min_max("max", args, line)) },
    "clamp"  => { arity: Arity::Exact(3),   func: BuiltinFn::Returning(math::clamp) },
    "round"  => { arity: Arity::Exact(1),   func: BuiltinFn::Returning(math::round) },
    "sqrt"   => { arity: Arity::Exact(1),   func: BuiltinFn::Returning(math::sqrt) },
    "str"    => { arity: Arity::Exact(1),   func: BuiltinFn::Returning(convert::to_str) },
    "num"    => { arity: Arity::Exact(1),   func: BuiltinFn::Returning(convert::to_num) },
}

/// Registers every built-in method, wrapped with its arity check.
///
/// # Errors
/// Propagates registration errors, e.g. when a built-in name is already
/// bound in `registry`.
pub fn install(registry: &mut Registry) -> Result<(), RegistrationError> {
    for def in BUILTIN_TABLE {
        let (name, arity) = (def.name, def.arity);
        let method = match def.func {
            BuiltinFn::Void(func) => Method::void(move |args: &[Value], line| {
                                         arity.check(name, args.len(), line)?;
                                         func(args, line)
                                     }),
            BuiltinFn::Returning(func) => Method::returning(move |args: &[Value], line| {
                                              arity.check(name, args.len(), line)?;
                                              func(args, line)
                                          }),
        };
        registry.register(name, method)?;
    }
    Ok(())
}
