use tracing::warn;

/// A cancelable resource registered for end-of-session cleanup. The label is
/// for diagnostics only; entries are deliberately unkeyed and append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedResource<R> {
    pub label: &'static str,
    pub resource: R,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub disposed: usize,
    pub failed: usize,
}

/// Session-lifetime arena of disposable resources. Every timer, tween, and
/// subscription created while a session runs is tracked here; `teardown_with`
/// drains the arena exactly once, invoking the caller's cancel routine per
/// entry and tolerating individual failures so one broken disposer cannot
/// block the rest. A drained scope tears down to an empty report.
#[derive(Debug)]
pub struct SessionScope<R> {
    entries: Vec<TrackedResource<R>>,
}

impl<R> Default for SessionScope<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R> SessionScope<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, label: &'static str, resource: R) {
        self.entries.push(TrackedResource { label, resource });
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn teardown_with<F>(&mut self, mut cancel: F) -> TeardownReport
    where
        F: FnMut(&'static str, &R) -> Result<(), String>,
    {
        let mut report = TeardownReport::default();
        for entry in self.entries.drain(..) {
            match cancel(entry.label, &entry.resource) {
                Ok(()) => report.disposed += 1,
                Err(reason) => {
                    warn!(label = entry.label, reason = %reason, "dispose_failed");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_disposes_every_entry_once() {
        let mut scope = SessionScope::new();
        scope.track("a", 1u32);
        scope.track("b", 2u32);
        scope.track("c", 3u32);

        let mut seen = Vec::new();
        let report = scope.teardown_with(|label, resource| {
            seen.push((label, *resource));
            Ok(())
        });

        assert_eq!(seen, vec![("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(
            report,
            TeardownReport {
                disposed: 3,
                failed: 0
            }
        );
        assert_eq!(scope.active_count(), 0);
    }

    #[test]
    fn one_failing_disposer_does_not_block_the_rest() {
        let mut scope = SessionScope::new();
        scope.track("first", 1u32);
        scope.track("broken", 2u32);
        scope.track("last", 3u32);

        let mut disposed = Vec::new();
        let report = scope.teardown_with(|label, resource| {
            if label == "broken" {
                return Err("already gone".to_string());
            }
            disposed.push(*resource);
            Ok(())
        });

        assert_eq!(disposed, vec![1, 3]);
        assert_eq!(
            report,
            TeardownReport {
                disposed: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn second_teardown_is_an_empty_no_op() {
        let mut scope = SessionScope::new();
        scope.track("only", 7u32);

        let first = scope.teardown_with(|_, _| Ok(()));
        assert_eq!(first.disposed, 1);

        let second = scope.teardown_with(|_, _| {
            panic!("nothing should remain to dispose");
        });
        assert_eq!(second, TeardownReport::default());
        assert_eq!(scope.active_count(), 0);
    }

    #[test]
    fn tracking_after_teardown_starts_a_fresh_session() {
        let mut scope = SessionScope::new();
        scope.track("stale", 1u32);
        scope.teardown_with(|_, _| Ok(()));

        scope.track("fresh", 2u32);
        assert_eq!(scope.active_count(), 1);
        let report = scope.teardown_with(|label, _| {
            assert_eq!(label, "fresh");
            Ok(())
        });
        assert_eq!(report.disposed, 1);
    }
}
