//! Embedded expression language for synthgen field rules.
//!
//! Expressions are compiled once ([`compile`]: tokenize, then parse into an
//! [`Expr`] tree with every function name and arity resolved) and evaluated
//! any number of times against an [`EvalContext`] holding the record index
//! and the request's random stream.
//!
//! ```text
//! "\"user-\" + record_index"
//!        │ tokenize
//!        ▼
//!   [Str, Plus, Ident]
//!        │ parse
//!        ▼
//!   Binary(Add, Literal("user-"), RecordIndex)
//!        │ evaluate(record_index = 3)
//!        ▼
//!   Value::String("user-3")
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use synth_core::Value;
//! use synth_expr::{compile, EvalContext};
//!
//! let expr = compile("record_index % 2 == 0 ? 'even' : random.choice(['odd', 'ODD'])").unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let value = expr.evaluate(&mut EvalContext::new(4, &mut rng)).unwrap();
//! assert_eq!(value, Value::from("even"));
//! ```
//!
//! Compiled expressions are immutable and `Send + Sync`; they can be cached
//! and shared across threads. Evaluation is deterministic for a fixed rng
//! state and record index.

pub mod ast;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use error::{ExpressionError, ExpressionErrorKind, Position};
pub use eval::EvalContext;
pub use functions::{FunctionSpec, FUNCTION_LIBRARY_VERSION};
pub use parser::MAX_NESTING_DEPTH;

use std::collections::BTreeSet;
use synth_core::Value;

/// Longest accepted expression source, in bytes.
pub const MAX_EXPRESSION_LEN: usize = 4096;

/// A parsed, validated expression.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    root: Expr,
}

impl CompiledExpression {
    /// Source text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the expression tree.
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Names read through `row.<field>`, sorted and deduplicated.
    pub fn field_references(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        self.root.walk(&mut |node| {
            if let Expr::Field(name) = node {
                names.insert(name.as_str());
            }
        });
        names.into_iter().collect()
    }

    /// Evaluate against `ctx`.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> Result<Value, ExpressionError> {
        eval::evaluate(&self.root, ctx)
    }
}

/// Compile `source` into an expression.
///
/// Fails with a positioned [`ExpressionError`] on syntax errors, unknown
/// identifiers or functions, and wrong function arities.
pub fn compile(source: &str) -> Result<CompiledExpression, ExpressionError> {
    if source.len() > MAX_EXPRESSION_LEN {
        return Err(ExpressionError::TooLong {
            length: source.len(),
            limit: MAX_EXPRESSION_LEN,
        });
    }
    let tokens = lexer::tokenize(source)?;
    let root = parser::parse(&tokens)?;
    Ok(CompiledExpression {
        source: source.to_string(),
        root,
    })
}

/// Compile and evaluate in one step.
pub fn evaluate(source: &str, ctx: &mut EvalContext<'_>) -> Result<Value, ExpressionError> {
    compile(source)?.evaluate(ctx)
}
