//! Runtime values for the Rill evaluator.
//!
//! Scalars are stored inline. Strings, arrays and functions live behind
//! [`Heap`], whose constructor is private to this module, so every composite
//! is built through a factory method:
//!
//! ```text
//! let s = Value::string("hello");          // OK
//! let a = Value::array(vec![Value::Int(1)]); // OK
//! let s = Value::Str(Heap::new(...));       // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Copy on bind
//!
//! Cloning a `Value` is the language-level copy. Composite clones share their
//! payload until one side is written through [`Value::array_mut`], at which
//! point the written side gets its own copy.
//!
//! # Deep nesting
//!
//! A program can nest arrays far deeper than the native stack allows
//! (`x = [x]` in a loop). Dropping such a value takes the nesting apart on a
//! worklist, and `Display` and `==` grow the stack as they descend.

mod function;
mod heap;

use std::fmt;

use rill_stack::ensure_sufficient_stack;

pub use function::{FunctionValue, ANONYMOUS};
pub use heap::Heap;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(Heap<String>),
    /// Ordered sequence of values.
    Array(Heap<Vec<Value>>),
    /// User-defined function.
    Function(Heap<FunctionValue>),
    /// Result of an `if` with no matching branch and no `else`.
    Void,
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Create a function value.
    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(Heap::new(func))
    }

    /// Truth value as a number: `1` for true, `0` for false.
    ///
    /// The language has no boolean type; comparisons and logical operators
    /// produce these.
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        Value::Int(i64::from(b))
    }

    /// Truthiness used by `if`, `while` and the logical operators.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Function(_) => true,
            Value::Void => false,
        }
    }

    /// Numeric payload widened to `f64`, or `None` for non-numbers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int-to-float promotion is the language's numeric rule"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow the elements of an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Mutable access to the elements of an array value.
    ///
    /// Copies the elements first if any other binding shares them.
    pub fn array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.make_mut()),
            _ => None,
        }
    }

    /// Elements of an array value that no other value shares.
    fn unique_array_items(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => items.get_mut(),
            _ => None,
        }
    }

    /// Borrow the function payload.
    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(&**f),
            _ => None,
        }
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Void => "void",
        }
    }
}

/// Structural equality, used by tests and hosts.
///
/// `Int(1)` and `Float(1.0)` are different values here. The language-level
/// `==` operator promotes before comparing.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Array(items) => ensure_sufficient_stack(|| {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }),
            Value::Function(func) => write!(f, "<function {}>", func.display_name()),
            Value::Void => write!(f, "void"),
        }
    }
}

/// Arrays are released iteratively.
///
/// Elements of a uniquely owned array move onto a worklist before the array
/// itself is freed, so the drop depth stays constant however deep the value
/// nests. Shared arrays only lose a reference.
impl Drop for Value {
    fn drop(&mut self) {
        let Some(items) = self.unique_array_items() else {
            return;
        };
        let mut pending = std::mem::take(items);
        while let Some(mut value) = pending.pop() {
            if let Some(nested) = value.unique_array_items() {
                pending.append(nested);
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
