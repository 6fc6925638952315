use crate::error::EvalError;
use crasher_types::{ClassName, Operation};

/// Outcome of classifying a failure raised while running a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Part of the operation's contract or caused by the test harness.
    Expected,
    /// Likely a defect in the tested operation.
    Unexpected,
}

const PRECONDITION_FAILURES: &[(&str, &str)] = &[
    ("java.lang", "IllegalArgumentException"),
    ("java.lang", "IllegalStateException"),
];

const HARNESS_PACKAGES: &[&str] = &["junit.", "edu.gatech.cc.junit."];

/// Decide whether `error`, raised while running a block that tests
/// `operation`, points at a defect.
pub fn classify(error: &EvalError, operation: &Operation) -> Verdict {
    match error {
        EvalError::Access { .. } | EvalError::Instantiation { .. } => Verdict::Expected,
        EvalError::UnboundVariable { .. } => Verdict::Unexpected,
        EvalError::Invocation { failure, .. } => {
            if operation.declared_failures.contains(&failure.exception) {
                return Verdict::Expected;
            }
            let raised_in = failure.raised_in.as_deref();
            if raised_in.is_some_and(|frame| HARNESS_PACKAGES.iter().any(|p| frame.starts_with(*p))) {
                return Verdict::Expected;
            }
            let own_frame = raised_in == Some(operation.qualified_name().as_str());
            if own_frame && is_precondition_failure(&failure.exception) {
                Verdict::Expected
            } else {
                Verdict::Unexpected
            }
        }
    }
}

fn is_precondition_failure(exception: &ClassName) -> bool {
    PRECONDITION_FAILURES
        .iter()
        .any(|(package, name)| exception.package() == *package && exception.simple_name() == *name)
}
