//! Resource limits: call depth, step budget, interruption, deep nesting.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use rill_eval::{Context, EvalErrorKind, EvalMode, InterruptHandle, Interpreter, Value};
use rill_ir::{BinaryOp, Expr, ExprKind};

/// `(fun loop(self) -> self(self))(loop)`: unbounded recursion.
///
/// The callee is evaluated first, so `loop` is bound by the time the
/// argument is read.
fn runaway_recursion() -> Expr {
    let def = Expr::func_def(
        Some("loop"),
        &["self"],
        Expr::call(Expr::var("self"), vec![Expr::var("self")]),
    );
    Expr::call(def, vec![Expr::var("loop")])
}

fn infinite_while() -> Expr {
    Expr::while_loop(Expr::int(1), Expr::int(0))
}

#[test]
fn default_depth_limit_stops_runaway_recursion() {
    rill_eval::init_tracing();
    let mut ctx = Context::default();
    let err = Interpreter::new()
        .evaluate(&runaway_recursion(), &mut ctx)
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 1000 });
    assert!(err.message.starts_with("maximum recursion depth exceeded"));
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(1001));
}

#[test]
fn bounded_depth_limit() {
    let interpreter = Interpreter::builder()
        .mode(EvalMode::Bounded {
            max_depth: 5,
            budget: 1_000,
        })
        .build();
    let mut ctx = Context::default();
    let err = interpreter
        .evaluate(&runaway_recursion(), &mut ctx)
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 5 });
}

#[test]
fn budget_stops_infinite_loop() {
    let interpreter = Interpreter::builder()
        .mode(EvalMode::Bounded {
            max_depth: 100,
            budget: 50,
        })
        .build();
    let mut ctx = Context::default();
    let err = interpreter.evaluate(&infinite_while(), &mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::BudgetExceeded { budget: 50 });
    assert_eq!(err.message, "evaluation budget of 50 steps exceeded");
    assert!(err.is_resource_limit());
}

#[test]
fn budget_stops_zero_step_for_loop() {
    let interpreter = Interpreter::builder()
        .mode(EvalMode::Bounded {
            max_depth: 100,
            budget: 10,
        })
        .build();
    let mut ctx = Context::default();
    let program = Expr::for_loop(
        "i",
        Expr::int(0),
        Expr::int(1),
        Some(Expr::int(0)),
        Expr::var("i"),
    );
    let err = interpreter.evaluate(&program, &mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::BudgetExceeded { budget: 10 });
}

#[test]
fn budget_is_not_hit_by_small_programs() {
    let interpreter = Interpreter::builder()
        .mode(EvalMode::Bounded {
            max_depth: 10,
            budget: 5,
        })
        .build();
    let mut ctx = Context::default();
    let program = Expr::for_loop("i", Expr::int(0), Expr::int(5), None, Expr::var("i"));
    assert!(interpreter.evaluate(&program, &mut ctx).is_ok());
}

#[test]
fn interrupt_raised_before_evaluation() {
    let handle = InterruptHandle::new();
    let interpreter = Interpreter::builder().interrupt(handle.clone()).build();
    handle.interrupt();
    let mut ctx = Context::default();
    let err = interpreter.evaluate(&infinite_while(), &mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Interrupted);
    assert_eq!(err.message, "evaluation interrupted");
}

#[test]
fn interrupt_from_another_thread_stops_infinite_loop() {
    let handle = InterruptHandle::new();
    let interpreter = Interpreter::builder().interrupt(handle.clone()).build();
    let remote = handle.clone();
    let waker = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        remote.interrupt();
    });
    let mut ctx = Context::default();
    let err = interpreter.evaluate(&infinite_while(), &mut ctx).unwrap_err();
    waker.join().unwrap();
    assert_eq!(err.kind, EvalErrorKind::Interrupted);
}

#[test]
fn interrupt_does_not_affect_straight_line_code() {
    let handle = InterruptHandle::new();
    handle.interrupt();
    let interpreter = Interpreter::builder().interrupt(handle).build();
    let mut ctx = Context::default();
    let program = Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2));
    assert_eq!(interpreter.evaluate(&program, &mut ctx).unwrap(), Value::Int(3));
}

#[test]
fn deeply_nested_expression_does_not_overflow_the_stack() {
    let mut program = Expr::int(0);
    for _ in 0..50_000 {
        program = Expr::binary(BinaryOp::Add, program, Expr::int(1));
    }
    let mut ctx = Context::default();
    assert_eq!(
        Interpreter::new().evaluate(&program, &mut ctx).unwrap(),
        Value::Int(50_000)
    );
    // Boxed children drop recursively; take the tree apart iteratively.
    let mut pending = vec![program];
    while let Some(mut expr) = pending.pop() {
        let kind = std::mem::replace(&mut expr.kind, ExprKind::Array(Vec::new()));
        if let ExprKind::Binary { left, right, .. } = kind {
            pending.push(*left);
            pending.push(*right);
        }
    }
}

#[test]
fn budget_restarts_for_each_evaluation_on_a_shared_context() {
    let interpreter = Interpreter::builder()
        .mode(EvalMode::Bounded {
            max_depth: 10,
            budget: 5,
        })
        .build();
    let mut ctx = Context::default();
    let program = Expr::for_loop("i", Expr::int(0), Expr::int(3), None, Expr::var("i"));
    let expected = Value::array(vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
    for _ in 0..4 {
        assert_eq!(interpreter.evaluate(&program, &mut ctx).unwrap(), expected);
    }
    assert_eq!(ctx.steps(), 3);
}

/// `x = []` followed by `for i = 0 to depth then x = [x]`.
fn nest_arrays(depth: i64, ctx: &mut Context<'_>) {
    let program = Expr::array(vec![
        Expr::assign("x", Expr::array(vec![])),
        Expr::for_loop(
            "i",
            Expr::int(0),
            Expr::int(depth),
            None,
            Expr::assign("x", Expr::array(vec![Expr::var("x")])),
        ),
    ]);
    Interpreter::new().evaluate(&program, ctx).unwrap();
}

#[test]
fn deeply_nested_array_value_drops_without_overflow() {
    let mut ctx = Context::default();
    nest_arrays(200_000, &mut ctx);
    let mut depth = 0;
    let mut current = ctx.get("x").unwrap();
    while let Some([inner]) = current.as_array() {
        depth += 1;
        current = inner;
    }
    assert_eq!(depth, 200_000);
    drop(ctx);
}

#[test]
fn deeply_nested_array_values_compare_and_display() {
    let mut left = Context::default();
    let mut right = Context::default();
    nest_arrays(50_000, &mut left);
    nest_arrays(50_000, &mut right);
    let (x, y) = (left.get("x").unwrap(), right.get("x").unwrap());
    assert!(x == y);
    let text = x.to_string();
    assert_eq!(text.len(), 100_002);
    assert!(text.starts_with("[[[") && text.ends_with("]]]"));
}
