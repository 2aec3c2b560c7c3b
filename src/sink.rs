use crate::Finding;
use std::sync::Mutex;

/// Destination for findings produced by concurrent scan tasks.
///
/// Implementations must make each `emit` call atomic: one finding never
/// interleaves with another.
pub trait FindingSink: Send + Sync {
    fn emit(&self, finding: Finding);
}

/// Buffers findings in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Mutex<Vec<Finding>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FindingSink for CollectingSink {
    fn emit(&self, finding: Finding) {
        let mut findings = self
            .findings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        findings.push(finding);
    }
}
