use serde::{Deserialize, Serialize};

/// Per-owner undo/redo stacks of reversible operation records.
///
/// Both [`Branch`](crate::Branch) and [`Repository`](crate::Repository) keep
/// one of these, parameterised over their own closed operation enum. The log
/// itself only moves records between the two stacks; interpreting a record is
/// the owner's job.
///
/// Recording a fresh operation does not clear the redo stack, so an undone
/// operation stays redoable even after newer mutations. Callers relying on
/// linear history semantics must drain the redo stack themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpLog<T> {
    undo: Vec<T>,
    redo: Vec<T>,
}

impl<T> OpLog<T> {
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Records a freshly applied operation on the undo stack.
    pub fn record(&mut self, op: T) {
        self.undo.push(op);
    }

    pub fn pop_undo(&mut self) -> Option<T> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<T> {
        self.redo.pop()
    }

    pub fn push_undo(&mut self, op: T) {
        self.undo.push(op);
    }

    pub fn push_redo(&mut self, op: T) {
        self.redo.push(op);
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

impl<T> Default for OpLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_pop_are_lifo() {
        let mut log = OpLog::new();
        log.record(1);
        log.record(2);
        log.record(3);

        assert_eq!(log.pop_undo(), Some(3));
        assert_eq!(log.pop_undo(), Some(2));
        assert_eq!(log.undo_len(), 1);
    }

    #[test]
    fn test_empty_stacks_pop_none() {
        let mut log: OpLog<u32> = OpLog::new();

        assert_eq!(log.pop_undo(), None);
        assert_eq!(log.pop_redo(), None);
    }

    #[test]
    fn test_record_does_not_clear_redo() {
        let mut log = OpLog::new();
        log.push_redo(1);
        log.record(2);

        assert_eq!(log.redo_len(), 1);
        assert_eq!(log.pop_redo(), Some(1));
    }
}
