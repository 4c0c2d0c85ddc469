// Forward-substitution constraint engine for box layout: named variables
// related by equality and inequality constraints, resolved in registration
// order. Deliberately not a general solver: one unknown per constraint,
// producers registered before consumers, inequalities only clamp values
// that are already known.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::LayoutError;

/// One additive term of a constraint's left-hand side.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Num(f64),
    /// Bare variable, implicit coefficient 1.
    Var(String),
    /// `coefficient * variable`.
    Scaled(f64, String),
}

impl Term {
    pub fn num(value: f64) -> Self {
        Term::Num(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn scaled(coefficient: f64, name: impl Into<String>) -> Self {
        Term::Scaled(coefficient, name.into())
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Num(value)
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::Var(name.to_string())
    }
}

impl From<String> for Term {
    fn from(name: String) -> Self {
        Term::Var(name)
    }
}

impl From<(f64, &str)> for Term {
    fn from((coefficient, name): (f64, &str)) -> Self {
        Term::Scaled(coefficient, name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Le,
    Ge,
}

#[derive(Debug, Clone)]
enum Rule {
    /// Direct assignment from `set`/`update`.
    Seed(String, f64),
    Relate {
        lhs: Vec<Term>,
        op: Op,
        rhs: Term,
    },
}

/// Named-variable store with ordered derivation rules.
///
/// `set` calls and constraints form a single rule list in registration
/// order. Every read replays that list top-to-bottom against a fresh
/// variable map, so a clamped or re-seeded variable is always seen by the
/// rules registered after it, and never retroactively by the ones before.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSolver {
    rules: Vec<Rule>,
    referenced: BTreeSet<String>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a literal value, overriding any earlier derivation.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        self.referenced.insert(name.clone());
        self.rules.push(Rule::Seed(name, value));
    }

    /// Bulk `set`; used to reseed inputs between independent layout passes.
    pub fn update<I, S>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (name, value) in variables {
            self.set(name, value);
        }
    }

    /// Register a constraint. An equality assigns its single unresolved
    /// left-hand variable; with zero unknowns it is silently accepted with
    /// no consistency validation. An inequality clamps the left-hand
    /// variable to the boundary when violated, and requires the left-hand
    /// side to already be fully resolvable. Constraints with more than one
    /// unknown, or circular sets, are unsupported and yield unspecified
    /// results; register producers before consumers.
    pub fn add_constraint(&mut self, lhs: Vec<Term>, op: Op, rhs: impl Into<Term>) {
        let rhs = rhs.into();
        for term in &lhs {
            if let Term::Var(name) | Term::Scaled(_, name) = term {
                self.referenced.insert(name.clone());
            }
        }
        if let Term::Var(name) | Term::Scaled(_, name) = &rhs {
            self.referenced.insert(name.clone());
        }
        self.rules.push(Rule::Relate { lhs, op, rhs });
    }

    /// Resolved value of a variable, derived from the current rule list.
    pub fn get(&self, name: &str) -> Result<f64, LayoutError> {
        self.evaluate()
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::UndefinedVariable(name.to_string()))
    }

    /// Snapshot of every variable referenced so far.
    pub fn collect(&self) -> Result<BTreeMap<String, f64>, LayoutError> {
        let values = self.evaluate();
        let mut out = BTreeMap::new();
        for name in &self.referenced {
            let value = values
                .get(name)
                .copied()
                .ok_or_else(|| LayoutError::UndefinedVariable(name.clone()))?;
            out.insert(name.clone(), value);
        }
        Ok(out)
    }

    fn evaluate(&self) -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        for rule in &self.rules {
            match rule {
                Rule::Seed(name, value) => {
                    values.insert(name.clone(), *value);
                }
                Rule::Relate { lhs, op, rhs } => apply_relation(&mut values, lhs, *op, rhs),
            }
        }
        values
    }
}

fn term_value(values: &BTreeMap<String, f64>, term: &Term) -> Option<f64> {
    match term {
        Term::Num(value) => Some(*value),
        Term::Var(name) => values.get(name).copied(),
        Term::Scaled(coefficient, name) => values.get(name).map(|value| coefficient * value),
    }
}

fn apply_relation(values: &mut BTreeMap<String, f64>, lhs: &[Term], op: Op, rhs: &Term) {
    // A constraint whose right-hand side is not yet resolvable cannot fire.
    let Some(bound) = term_value(values, rhs) else {
        return;
    };

    let mut known = 0.0;
    let mut unknown: Option<(&str, f64)> = None;
    for term in lhs {
        match term {
            Term::Num(value) => known += value,
            Term::Var(name) => match values.get(name) {
                Some(value) => known += value,
                None if unknown.is_none() => unknown = Some((name, 1.0)),
                None => {}
            },
            Term::Scaled(coefficient, name) => match values.get(name) {
                Some(value) => known += coefficient * value,
                None if unknown.is_none() => unknown = Some((name, *coefficient)),
                None => {}
            },
        }
    }

    match op {
        Op::Eq => {
            if let Some((name, coefficient)) = unknown
                && coefficient != 0.0
            {
                values.insert(name.to_string(), (bound - known) / coefficient);
            }
            // Zero unknowns: accepted as-is, mismatches are not validated.
        }
        Op::Le | Op::Ge => {
            if unknown.is_some() {
                return;
            }
            let violated = match op {
                Op::Le => known > bound,
                Op::Ge => known < bound,
                Op::Eq => unreachable!(),
            };
            if !violated {
                return;
            }
            // Clamp the constraint's variable so the sum lands exactly on
            // the boundary.
            let clamp_target = lhs.iter().find_map(|term| match term {
                Term::Var(name) => Some((name.as_str(), 1.0)),
                Term::Scaled(coefficient, name) => Some((name.as_str(), *coefficient)),
                Term::Num(_) => None,
            });
            if let Some((name, coefficient)) = clamp_target
                && coefficient != 0.0
            {
                let current = values.get(name).copied().unwrap_or(0.0);
                let others = known - coefficient * current;
                values.insert(name.to_string(), (bound - others) / coefficient);
            }
        }
    }
}
