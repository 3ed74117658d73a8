//! Arithmetic between whole workspace values.

use tabview_model::{ArithOp, Value, Workspace};
use tracing::debug;

/// Combines two values with `op`, or `None` when their kinds do not mix.
///
/// Series, tables and cubes combine through their own alignment rules; a
/// series against a table is broadcast over the table's columns. Collections
/// combine name by name.
pub fn combine(lhs: &Value, rhs: &Value, op: ArithOp) -> Option<Value> {
    let value = match (lhs, rhs) {
        (Value::Series(left), Value::Series(right)) => Value::from(left.combine(right, op)),
        (Value::Table(left), Value::Table(right)) => Value::Table(left.combine(right, op)),
        (Value::Table(left), Value::Series(right)) => Value::Table(left.combine_series(right, op)),
        (Value::Series(left), Value::Table(right)) => {
            Value::Table(right.rcombine_series(left, op))
        }
        (Value::Cube(left), Value::Cube(right)) => Value::Cube(left.combine(right, op)),
        (Value::Collection(left), Value::Collection(right)) => {
            Value::Collection(combine_workspaces(left, right, op))
        }
        _ => return None,
    };
    Some(value)
}

/// Combines the entries of `lhs` with the same-named entries of `rhs`.
///
/// Names missing on the right, or whose values cannot be combined, are left
/// out of the result.
pub fn combine_workspaces(lhs: &Workspace, rhs: &Workspace, op: ArithOp) -> Workspace {
    let mut out = Workspace::new();
    for (name, left) in lhs.iter() {
        let Some(right) = rhs.entry(name) else {
            debug!(entry = name, %op, "no right-hand operand, skipping");
            continue;
        };
        match combine(left, right, op) {
            Some(value) => out.put(name, value),
            None => debug!(
                entry = name,
                %op,
                left = %left.kind(),
                right = %right.kind(),
                "incompatible operands, skipping"
            ),
        }
    }
    out
}

pub fn plus(lhs: &Workspace, rhs: &Workspace) -> Workspace {
    combine_workspaces(lhs, rhs, ArithOp::Add)
}

pub fn minus(lhs: &Workspace, rhs: &Workspace) -> Workspace {
    combine_workspaces(lhs, rhs, ArithOp::Subtract)
}

#[cfg(test)]
mod tests {
    use tabview_model::{Entry, Key, Series, Table};

    use super::*;

    fn series(pairs: &[(i64, f64)]) -> Value {
        Value::from(Series::from_pairs(pairs.iter().copied()).unwrap())
    }

    fn table(value: f64) -> Value {
        Value::Table(
            Table::new(
                vec![Key::Int(1), Key::Int(2)],
                vec![("a".to_string(), vec![Some(value), Some(value)])],
            )
            .unwrap(),
        )
    }

    fn lookup(ws: &Workspace, path: &[&str]) -> Option<f64> {
        match ws.get(path).ok()? {
            Entry::Series(series) => series.get(&Key::Int(1)),
            _ => None,
        }
    }

    #[test]
    fn series_combine_on_shared_keys() {
        let lhs = series(&[(1, 5.0), (2, 1.0)]);
        let rhs = series(&[(1, 2.0), (3, 1.0)]);
        let Some(Value::Series(out)) = combine(&lhs, &rhs, ArithOp::Subtract) else {
            panic!("expected a series");
        };
        assert_eq!(out.get(&Key::Int(1)), Some(3.0));
        assert_eq!(out.get(&Key::Int(2)), None);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn series_broadcasts_over_table() {
        let Some(Value::Table(out)) = combine(&series(&[(1, 1.0)]), &table(4.0), ArithOp::Subtract)
        else {
            panic!("expected a table");
        };
        assert_eq!(out.value(0, 0), Some(-3.0));
        assert_eq!(out.value(1, 0), None);
    }

    #[test]
    fn workspaces_combine_by_name() {
        let mut lhs = Workspace::new();
        lhs.put("t", table(3.0));
        lhs.put("only_left", table(1.0));
        lhs.put("mixed", series(&[(1, 1.0)]));
        let mut inner = Workspace::new();
        inner.put("s", series(&[(1, 10.0)]));
        lhs.put("nested", Value::Collection(inner.clone()));

        let mut rhs = Workspace::new();
        rhs.put("t", table(1.0));
        rhs.put("mixed", Value::Collection(Workspace::new()));
        rhs.put("nested", Value::Collection(inner));

        let sum = plus(&lhs, &rhs);
        assert_eq!(sum.names().collect::<Vec<_>>(), vec!["nested", "t"]);
        assert_eq!(lookup(&sum, &["t", "a"]), Some(4.0));
        assert_eq!(lookup(&sum, &["nested", "s"]), Some(20.0));

        let diff = minus(&lhs, &rhs);
        assert_eq!(lookup(&diff, &["t", "a"]), Some(2.0));
    }
}
