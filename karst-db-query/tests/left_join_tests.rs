//! Left-join evaluator behavior over full pipelines: fallback semantics,
//! condition-failure policy, close cascades, and tolerance of delegates
//! closed out from under a pull.

use karst_db_core::Term;
use karst_db_iteration::{Iteration, IteratorIteration, NextError};
use karst_db_query::{
    BindingIteration, BindingSet, LeftJoinIteration, QueryError, Result,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn row(pairs: &[(&str, &str)]) -> BindingSet {
    pairs.iter().fold(BindingSet::new(), |b, (name, value)| {
        b.with(*name, Term::literal(*value))
    })
}

fn solutions(rows: Vec<BindingSet>) -> BindingIteration {
    Box::new(IteratorIteration::new(rows.into_iter()))
}

fn names(set: &[&str]) -> HashSet<Arc<str>> {
    set.iter().map(|n| Arc::from(*n)).collect()
}

fn drain(join: &mut LeftJoinIteration) -> Vec<BindingSet> {
    let mut out = Vec::new();
    while let Some(b) = join.pull().unwrap() {
        out.push(b);
    }
    out
}

/// Right-step producing a fixed result list per left "s" value.
fn step_by_subject(
    table: Vec<(&'static str, Vec<BindingSet>)>,
) -> Box<dyn karst_db_query::EvaluationStep> {
    Box::new(move |bindings: &BindingSet| -> Result<BindingIteration> {
        let key = match bindings.get("s") {
            Some(Term::Literal { lexical, .. }) => lexical.clone(),
            _ => return Ok(solutions(vec![])),
        };
        let rows = table
            .iter()
            .find(|(s, _)| *s == key.as_ref())
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default();
        Ok(solutions(rows))
    })
}

#[test]
fn emits_fallback_then_matches_in_order() {
    // l1 has no right rows, l2 has two: expect [l1, r1, r2].
    let left = solutions(vec![row(&[("s", "l1")]), row(&[("s", "l2")])]);
    let step = step_by_subject(vec![
        ("l1", vec![]),
        (
            "l2",
            vec![
                row(&[("s", "l2"), ("o", "r1")]),
                row(&[("s", "l2"), ("o", "r2")]),
            ],
        ),
    ]);
    let mut join = LeftJoinIteration::new(left, step, None, names(&["s", "o"]));
    assert_eq!(
        drain(&mut join),
        vec![
            row(&[("s", "l1")]),
            row(&[("s", "l2"), ("o", "r1")]),
            row(&[("s", "l2"), ("o", "r2")]),
        ]
    );
}

#[test]
fn condition_failure_counts_as_no_match() {
    // The condition fails to evaluate for every right candidate: both left
    // rows surface through the fallback path, and no error escapes.
    let left = solutions(vec![row(&[("s", "l1")]), row(&[("s", "l2")])]);
    let step = step_by_subject(vec![
        ("l1", vec![]),
        ("l2", vec![row(&[("s", "l2"), ("o", "r1")])]),
    ]);
    let condition = Box::new(|_: &BindingSet| -> Result<bool> {
        Err(QueryError::condition("unbound variable in comparison"))
    });
    let mut join = LeftJoinIteration::new(left, step, Some(condition), names(&["s", "o"]));
    assert_eq!(
        drain(&mut join),
        vec![row(&[("s", "l1")]), row(&[("s", "l2")])]
    );
}

#[test]
fn condition_filters_right_rows() {
    let left = solutions(vec![row(&[("s", "l1")])]);
    let step = step_by_subject(vec![(
        "l1",
        vec![
            row(&[("s", "l1"), ("o", "keep")]),
            row(&[("s", "l1"), ("o", "drop")]),
            row(&[("s", "l1"), ("o", "keep")]),
        ],
    )]);
    let condition = Box::new(|scoped: &BindingSet| -> Result<bool> {
        Ok(matches!(
            scoped.get("o"),
            Some(Term::Literal { lexical, .. }) if lexical.as_ref() == "keep"
        ))
    });
    let mut join = LeftJoinIteration::new(left, step, Some(condition), names(&["s", "o"]));
    assert_eq!(
        drain(&mut join),
        vec![
            row(&[("s", "l1"), ("o", "keep")]),
            row(&[("s", "l1"), ("o", "keep")]),
        ]
    );
}

#[test]
fn non_condition_errors_abort_the_join() {
    let left = solutions(vec![row(&[("s", "l1")])]);
    let step = step_by_subject(vec![("l1", vec![row(&[("s", "l1"), ("o", "r1")])])]);
    let condition = Box::new(|_: &BindingSet| -> Result<bool> {
        Err(QueryError::evaluation("datatype table corrupted"))
    });
    let mut join = LeftJoinIteration::new(left, step, Some(condition), names(&["s", "o"]));
    let err = join.pull().unwrap_err();
    assert!(matches!(err, QueryError::Evaluation(_)));
}

/// A solution source that records close calls and can fail them.
struct TrackedSolutions {
    rows: Vec<BindingSet>,
    log: Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
    fail_on_close: bool,
    closed: bool,
}

impl TrackedSolutions {
    fn boxed(
        name: &'static str,
        rows: Vec<BindingSet>,
        log: &Arc<Mutex<Vec<&'static str>>>,
        fail_on_close: bool,
    ) -> BindingIteration {
        Box::new(Self {
            rows,
            log: log.clone(),
            name,
            fail_on_close,
            closed: false,
        })
    }
}

impl Iteration for TrackedSolutions {
    type Item = BindingSet;
    type Error = QueryError;

    fn has_next(&mut self) -> Result<bool> {
        Ok(!self.closed && !self.rows.is_empty())
    }

    fn next(&mut self) -> std::result::Result<BindingSet, NextError<QueryError>> {
        if self.closed || self.rows.is_empty() {
            return Err(NextError::NoMoreElements);
        }
        Ok(self.rows.remove(0))
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.log.lock().unwrap().push(self.name);
        if self.fail_on_close {
            Err(QueryError::internal(format!("{}: close failed", self.name)))
        } else {
            Ok(())
        }
    }
}

#[test]
fn close_reaches_active_right_even_when_left_close_fails() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let left = TrackedSolutions::boxed(
        "left",
        vec![row(&[("s", "l1")]), row(&[("s", "l2")])],
        &log,
        true,
    );
    let right_log = log.clone();
    let step = Box::new(move |_: &BindingSet| -> Result<BindingIteration> {
        Ok(TrackedSolutions::boxed(
            "right",
            vec![row(&[("o", "r1")]), row(&[("o", "r2")])],
            &right_log,
            false,
        ))
    });
    let mut join = LeftJoinIteration::new(left, step, None, names(&["s", "o"]));
    // Pull one row so a right iteration is active.
    assert!(join.pull().unwrap().is_some());

    let err = join.close().unwrap_err();
    assert!(matches!(err, QueryError::Internal(_)));
    assert_eq!(*log.lock().unwrap(), vec!["left", "right"]);

    // Close is idempotent; nothing runs twice.
    join.close().unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["left", "right"]);
}

#[test]
fn drained_join_closes_delegates_itself() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let left = TrackedSolutions::boxed("left", vec![row(&[("s", "l1")])], &log, false);
    let right_log = log.clone();
    let step = Box::new(move |_: &BindingSet| -> Result<BindingIteration> {
        Ok(TrackedSolutions::boxed(
            "right",
            vec![row(&[("o", "r1")])],
            &right_log,
            false,
        ))
    });
    let mut join = LeftJoinIteration::new(left, step, None, names(&["s", "o"]));
    assert_eq!(drain(&mut join).len(), 1);
    // Right was closed on exhaustion, left when the join auto-closed.
    assert_eq!(*log.lock().unwrap(), vec!["right", "left"]);
}

/// A source closed out from under the join: claims an element is available,
/// then reports no-more-elements on the pull itself.
struct VanishingSolutions;

impl Iteration for VanishingSolutions {
    type Item = BindingSet;
    type Error = QueryError;

    fn has_next(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn next(&mut self) -> std::result::Result<BindingSet, NextError<QueryError>> {
        Err(NextError::NoMoreElements)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn delegate_vanishing_mid_pull_reads_as_end_of_sequence() {
    let left = solutions(vec![row(&[("s", "l1")])]);
    let step = Box::new(|_: &BindingSet| -> Result<BindingIteration> {
        Ok(Box::new(VanishingSolutions))
    });
    let mut join = LeftJoinIteration::new(left, step, None, names(&["s"]));
    // No error and no spurious rows: the join just ends.
    assert_eq!(join.pull().unwrap(), None);
    assert!(!join.has_next().unwrap());
}
