//! User-defined function values.

use rill_ir::{Name, SharedExpr};

/// Display name used for functions defined without a name.
pub const ANONYMOUS: &str = "<anonymous>";

/// A function produced by evaluating a `FuncDef` node.
///
/// The body is shared with the tree it came from. Functions do not capture
/// their defining context: a call sees its parameters and nothing else.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: SharedExpr,
}

impl FunctionValue {
    pub fn new(name: Option<Name>, params: Vec<Name>, body: SharedExpr) -> Self {
        FunctionValue { name, params, body }
    }

    /// Name shown in tracebacks and `Display` output.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Two function values are equal when they come from the same definition.
impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        SharedExpr::ptr_eq(&self.body, &other.body)
            && self.name == other.name
            && self.params == other.params
    }
}
