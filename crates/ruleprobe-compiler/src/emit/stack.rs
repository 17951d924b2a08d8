//! Operand-stack height accounting.

/// Snapshot of the stack height at some point during emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackMark {
    pub(crate) height: i32,
}

impl StackMark {
    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Running height plus its high-water mark.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StackTracker {
    height: i32,
    max: i32,
}

impl StackTracker {
    pub(crate) fn adjust(&mut self, delta: i32) {
        self.height += delta;
        self.max = self.max.max(self.height);
    }

    pub(crate) fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn max(&self) -> i32 {
        self.max
    }
}
