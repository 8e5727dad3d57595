//! Tree-walking evaluator.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ExpressionError;
use rand::RngCore;
use std::cmp::Ordering;
use synth_core::{GeneratedRecord, Value};

/// Per-evaluation context: the record being built and the request's rng.
///
/// The rng is borrowed from the caller so that every expression of a
/// generation run consumes one shared stream in a fixed order.
pub struct EvalContext<'a> {
    /// 0-based index of the record being generated
    pub record_index: u64,
    /// Random stream for library functions
    pub rng: &'a mut dyn RngCore,
    /// Fields already generated for this record
    pub row: Option<&'a GeneratedRecord>,
}

impl<'a> EvalContext<'a> {
    /// Context without record fields (self-tests, standalone evaluation).
    pub fn new(record_index: u64, rng: &'a mut dyn RngCore) -> Self {
        Self {
            record_index,
            rng,
            row: None,
        }
    }

    /// Expose the fields generated so far for `row.<field>` reads.
    pub fn with_row(mut self, row: &'a GeneratedRecord) -> Self {
        self.row = Some(row);
        self
    }
}

/// Evaluate `expr` against `ctx`.
pub fn evaluate(expr: &Expr, ctx: &mut EvalContext<'_>) -> Result<Value, ExpressionError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::RecordIndex => i64::try_from(ctx.record_index)
            .map(Value::Integer)
            .map_err(|_| ExpressionError::Overflow {
                operator: "record_index".to_string(),
            }),
        Expr::Field(name) => ctx
            .row
            .and_then(|row| row.get(name))
            .cloned()
            .ok_or_else(|| ExpressionError::FieldUnavailable {
                field: name.clone(),
            }),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, ctx)?;
            unary(*op, value)
        }
        Expr::Binary { op, left, right } => binary(*op, left, right, ctx),
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            if truth(evaluate(condition, ctx)?, "?:")? {
                evaluate(then_branch, ctx)
            } else {
                evaluate(else_branch, ctx)
            }
        }
        Expr::Call { function, args } => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            (function.call)(&mut *ctx.rng, &values).map_err(|message| ExpressionError::Function {
                function: function.name.to_string(),
                message,
            })
        }
    }
}

fn truth(value: Value, operator: &str) -> Result<bool, ExpressionError> {
    value.as_bool().ok_or_else(|| {
        ExpressionError::type_error(
            operator,
            format!("expected a boolean, got {}", value.type_name()),
        )
    })
}

fn unary(op: UnaryOp, value: Value) -> Result<Value, ExpressionError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Integer(i)) => i.checked_neg().map(Value::Integer).ok_or_else(|| {
            ExpressionError::Overflow {
                operator: "-".to_string(),
            }
        }),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, other) => Err(ExpressionError::type_error(
            op.symbol(),
            format!("unsupported operand type {}", other.type_name()),
        )),
    }
}

fn binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ctx: &mut EvalContext<'_>,
) -> Result<Value, ExpressionError> {
    // && and || only evaluate the right side when needed.
    match op {
        BinaryOp::And => {
            if !truth(evaluate(left, ctx)?, op.symbol())? {
                return Ok(Value::Bool(false));
            }
            return truth(evaluate(right, ctx)?, op.symbol()).map(Value::Bool);
        }
        BinaryOp::Or => {
            if truth(evaluate(left, ctx)?, op.symbol())? {
                return Ok(Value::Bool(true));
            }
            return truth(evaluate(right, ctx)?, op.symbol()).map(Value::Bool);
        }
        _ => {}
    }

    let lhs = evaluate(left, ctx)?;
    let rhs = evaluate(right, ctx)?;
    match op {
        BinaryOp::Add if lhs.as_str().is_some() || rhs.as_str().is_some() => {
            Ok(Value::String(format!("{lhs}{rhs}")))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            arithmetic(op, lhs, rhs)
        }
        BinaryOp::Eq => Ok(Value::Bool(values_equal(&lhs, &rhs))),
        BinaryOp::Ne => Ok(Value::Bool(!values_equal(&lhs, &rhs))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(op, &lhs, &rhs)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators handled above"),
    }
}

fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ExpressionError> {
    let symbol = op.symbol();
    let overflow = || ExpressionError::Overflow {
        operator: symbol.to_string(),
    };
    let division_by_zero = || ExpressionError::DivisionByZero {
        operator: symbol.to_string(),
    };

    if let (Value::Integer(a), Value::Integer(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        return match op {
            BinaryOp::Add => a.checked_add(b).map(Value::Integer).ok_or_else(overflow),
            BinaryOp::Sub => a.checked_sub(b).map(Value::Integer).ok_or_else(overflow),
            BinaryOp::Mul => a.checked_mul(b).map(Value::Integer).ok_or_else(overflow),
            BinaryOp::Div if b == 0 => Err(division_by_zero()),
            // Exact integer division stays integral; otherwise the result is a float.
            BinaryOp::Div => match a.checked_rem(b) {
                Some(0) => a.checked_div(b).map(Value::Integer).ok_or_else(overflow),
                Some(_) => Ok(Value::Float(a as f64 / b as f64)),
                None => Err(overflow()),
            },
            BinaryOp::Rem if b == 0 => Err(division_by_zero()),
            BinaryOp::Rem => a.checked_rem(b).map(Value::Integer).ok_or_else(overflow),
            _ => unreachable!("arithmetic called with non-arithmetic operator"),
        };
    }

    let (Some(a), Some(b)) = (numeric(&lhs), numeric(&rhs)) else {
        return Err(ExpressionError::type_error(
            symbol,
            format!(
                "unsupported operand types {} and {}",
                lhs.type_name(),
                rhs.type_name()
            ),
        ));
    };
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::Rem if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        _ => unreachable!("arithmetic called with non-arithmetic operator"),
    };
    if result.is_finite() {
        Ok(Value::Float(result))
    } else {
        Err(overflow())
    }
}

fn numeric(value: &Value) -> Option<f64> {
    value.is_number().then(|| value.as_f64()).flatten()
}

/// Equality with integer/float widening; other kinds compare structurally.
fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
            *a as f64 == *b
        }
        _ => lhs == rhs,
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Ordering, ExpressionError> {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => {
            let ordering = match (numeric(lhs), numeric(rhs)) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            };
            ordering.ok_or_else(|| {
                ExpressionError::type_error(
                    op.symbol(),
                    format!(
                        "cannot compare {} with {}",
                        lhs.type_name(),
                        rhs.type_name()
                    ),
                )
            })
        }
    }
}
