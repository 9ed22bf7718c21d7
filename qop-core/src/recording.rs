//! Explicit recording of emitted operators
//!
//! Decompositions never push into hidden global state. Callers pass a
//! [`Recorder`] (usually a [`Tape`]) to
//! [`Operator::decompose_into`](crate::Operator::decompose_into) and own the
//! resulting sequence.

use crate::{Op, OperatorError, Result};
use tracing::trace;

/// Append-only sink for operators
pub trait Recorder {
    /// Append an operator
    fn record(&mut self, op: Op);
}

impl Recorder for Vec<Op> {
    fn record(&mut self, op: Op) {
        self.push(op);
    }
}

/// Ordered list of recorded operators
///
/// # Example
/// ```ignore
/// let mut tape = Tape::new();
/// tape.record(op);
/// let flat = tape.expand(1)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Tape {
    operations: Vec<Op>,
}

impl Tape {
    /// Create an empty tape
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operators in order
    pub fn operations(&self) -> &[Op] {
        &self.operations
    }

    /// Consume into the recorded operators
    pub fn into_operations(self) -> Vec<Op> {
        self.operations
    }

    /// Number of recorded operators
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Decompose every operator up to `depth` levels
    ///
    /// Operators without a decomposition are kept as they are.
    pub fn expand(&self, depth: usize) -> Result<Tape> {
        let mut expanded = Tape::new();
        for op in &self.operations {
            expand_into(op, depth, &mut expanded)?;
        }
        Ok(expanded)
    }
}

fn expand_into(op: &Op, depth: usize, sink: &mut Tape) -> Result<()> {
    if depth == 0 {
        sink.record(op.clone());
        return Ok(());
    }
    match op.decomposition() {
        Ok(children) => {
            trace!(operator = op.name(), children = children.len(), "expanding");
            for child in &children {
                expand_into(child, depth - 1, sink)?;
            }
            Ok(())
        },
        Err(OperatorError::DecompositionUndefined(_)) => {
            sink.record(op.clone());
            Ok(())
        },
        Err(err) => Err(err),
    }
}

impl Recorder for Tape {
    fn record(&mut self, op: Op) {
        self.operations.push(op);
    }
}

impl FromIterator<Op> for Tape {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntoOp, Operator, WireMap, Wires};
    use std::sync::Arc;

    /// Leaf when `depth == 0`, otherwise two children one level shallower
    #[derive(Clone, Debug)]
    struct Tree {
        wires: Wires,
        depth: usize,
    }

    impl Operator for Tree {
        fn name(&self) -> &str {
            if self.depth == 0 {
                "Leaf"
            } else {
                "Tree"
            }
        }

        fn wires(&self) -> &Wires {
            &self.wires
        }

        fn decomposition(&self) -> Result<Vec<Op>> {
            if self.depth == 0 {
                return Err(OperatorError::DecompositionUndefined("Leaf".into()));
            }
            let child = Tree {
                wires: self.wires.clone(),
                depth: self.depth - 1,
            };
            Ok(vec![child.clone().into_op(), child.into_op()])
        }

        fn map_wires(&self, map: &WireMap) -> Result<Op> {
            Ok(Arc::new(Tree {
                wires: self.wires.map(map)?,
                depth: self.depth,
            }))
        }

        fn to_op(&self) -> Op {
            Arc::new(self.clone())
        }
    }

    fn tree(depth: usize) -> Op {
        Tree {
            wires: Wires::indices([0]).unwrap(),
            depth,
        }
        .into_op()
    }

    #[test]
    fn test_decompose_into_records_in_order() {
        let mut tape = Tape::new();
        tree(1).decompose_into(&mut tape).unwrap();
        assert_eq!(tape.len(), 2);
        assert!(tape.operations().iter().all(|op| op.name() == "Leaf"));
    }

    #[test]
    fn test_expand_depth() {
        let tape: Tape = std::iter::once(tree(3)).collect();
        assert_eq!(tape.expand(0).unwrap().len(), 1);
        assert_eq!(tape.expand(2).unwrap().len(), 4);
        // leaves stay when depth exceeds the tree
        let full = tape.expand(10).unwrap();
        assert_eq!(full.len(), 8);
        assert!(full.into_operations().iter().all(|op| op.name() == "Leaf"));
    }

    #[test]
    fn test_vec_is_a_recorder() {
        let mut ops: Vec<Op> = Vec::new();
        tree(2).decompose_into(&mut ops).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].name(), "Tree");
    }
}
