//! Execution engine - converges resources strictly in declaration order

use crate::context::ProgressCallback;
use crate::resource::Resource;
use crate::types::{ExecuteMode, ExecuteOptions, ExecuteSummary, Outcome, ResourceReport};

/// Converge a list of resources
///
/// For each resource, in order:
/// 1. Expand it into states. An expansion error fails the resource before
///    anything is tested.
/// 2. Test each state in order. A passing state is left alone.
/// 3. Apply a failing state (or, in test mode, stop and report it as
///    unsatisfied).
/// 4. An apply error fails the resource. Its remaining states are skipped,
///    earlier states are not rolled back, and the run continues with the
///    next resource.
///
/// The run never aborts on a single resource's failure.
pub fn execute<P: ProgressCallback>(
    resources: &[Box<dyn Resource>],
    opts: &ExecuteOptions,
    progress: &mut P,
) -> ExecuteSummary {
    let mut summary = ExecuteSummary::default();

    for resource in resources {
        let id = resource.id();
        let description = resource.description();
        progress.on_resource_start(&id, &description);

        let outcome = converge_resource(resource.as_ref(), opts.mode, progress);
        progress.on_resource_complete(&id, &description, &outcome);

        summary.add_report(ResourceReport {
            id,
            description,
            outcome,
        });
    }

    summary
}

/// Converge a single resource
fn converge_resource<P: ProgressCallback>(
    resource: &dyn Resource,
    mode: ExecuteMode,
    progress: &mut P,
) -> Outcome {
    let states = match resource.states() {
        Ok(states) => states,
        Err(e) => {
            log::debug!("failed to expand {}: {:#}", resource.id(), e);
            return Outcome::Failed {
                error: format!("{e:#}"),
            };
        }
    };

    let mut applied = 0;
    for state in &states {
        let name = state.description();

        log::debug!("testing state: {}", name);
        let tested = state.test();
        progress.on_state_tested(&name, tested.as_ref().err());
        let test_error = match tested {
            Ok(()) => continue,
            Err(e) => e,
        };
        log::debug!("test failed for {}: {:#}", name, test_error);

        if mode == ExecuteMode::Test {
            return Outcome::Unsatisfied {
                reason: format!("{name}: {test_error:#}"),
            };
        }

        log::debug!("applying state: {}", name);
        let result = state.apply();
        progress.on_state_applied(&name, result.as_ref().err());
        if let Err(e) = result {
            log::debug!("failed to apply {}: {:#}", name, e);
            return Outcome::Failed {
                error: format!("{name}: {e:#}"),
            };
        }
        applied += 1;
    }

    if applied == 0 {
        Outcome::Satisfied
    } else {
        Outcome::Applied { states: applied }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoProgress;
    use crate::state::{BoxedState, State};
    use anyhow::{Result, bail};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// A state backed by a shared flag: test passes once the flag is set
    #[derive(Debug)]
    struct FlagState {
        flag: Arc<AtomicBool>,
        applies: Arc<AtomicUsize>,
        fail_apply: bool,
    }

    impl FlagState {
        fn new(satisfied: bool) -> Self {
            Self {
                flag: Arc::new(AtomicBool::new(satisfied)),
                applies: Arc::new(AtomicUsize::new(0)),
                fail_apply: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_apply: true,
                ..Self::new(false)
            }
        }
    }

    impl State for FlagState {
        fn description(&self) -> String {
            "flag".to_string()
        }

        fn test(&self) -> Result<()> {
            if self.flag.load(Ordering::SeqCst) {
                Ok(())
            } else {
                bail!("flag is not set")
            }
        }

        fn apply(&self) -> Result<()> {
            self.applies.fetch_add(1, Ordering::SeqCst);
            if self.fail_apply {
                bail!("cannot set flag");
            }
            self.flag.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct TestResource {
        id: String,
        states: Vec<(Arc<AtomicBool>, Arc<AtomicUsize>, bool)>,
        broken: bool,
    }

    impl TestResource {
        fn with(id: &str, states: Vec<&FlagState>) -> Self {
            Self {
                id: id.to_string(),
                states: states
                    .into_iter()
                    .map(|s| (Arc::clone(&s.flag), Arc::clone(&s.applies), s.fail_apply))
                    .collect(),
                broken: false,
            }
        }
    }

    impl Resource for TestResource {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn description(&self) -> String {
            format!("Test resource {}", self.id)
        }

        fn resource_type(&self) -> &'static str {
            "test"
        }

        fn states(&self) -> Result<Vec<BoxedState>> {
            if self.broken {
                bail!("path: not specified");
            }
            Ok(self
                .states
                .iter()
                .map(|(flag, applies, fail_apply)| {
                    Box::new(FlagState {
                        flag: Arc::clone(flag),
                        applies: Arc::clone(applies),
                        fail_apply: *fail_apply,
                    }) as BoxedState
                })
                .collect())
        }
    }

    #[test]
    fn test_execute_empty() {
        let summary = execute(&[], &ExecuteOptions::default(), &mut NoProgress);
        assert_eq!(summary.total(), 0);
        assert!(summary.is_success());
    }

    #[test]
    fn test_satisfied_state_is_never_applied() {
        let state = FlagState::new(true);
        let resources: Vec<Box<dyn Resource>> =
            vec![Box::new(TestResource::with("a", vec![&state]))];

        let summary = execute(&resources, &ExecuteOptions::default(), &mut NoProgress);

        assert_eq!(summary.satisfied, 1);
        assert_eq!(state.applies.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsatisfied_state_is_applied() {
        let state = FlagState::new(false);
        let resources: Vec<Box<dyn Resource>> =
            vec![Box::new(TestResource::with("a", vec![&state]))];

        let summary = execute(&resources, &ExecuteOptions::default(), &mut NoProgress);

        assert_eq!(summary.applied, 1);
        assert_eq!(summary.reports[0].outcome, Outcome::Applied { states: 1 });
        assert!(state.flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_failed_apply_skips_remaining_states_and_continues() {
        let first = FlagState::failing();
        let second = FlagState::new(false);
        let other = FlagState::new(false);
        let resources: Vec<Box<dyn Resource>> = vec![
            Box::new(TestResource::with("a", vec![&first, &second])),
            Box::new(TestResource::with("b", vec![&other])),
        ];

        let summary = execute(&resources, &ExecuteOptions::default(), &mut NoProgress);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.applied, 1);
        assert_eq!(second.applies.load(Ordering::SeqCst), 0);
        assert_eq!(other.applies.load(Ordering::SeqCst), 1);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_expansion_error_fails_resource() {
        let mut broken = TestResource::with("broken", vec![]);
        broken.broken = true;
        let resources: Vec<Box<dyn Resource>> = vec![Box::new(broken)];

        let summary = execute(&resources, &ExecuteOptions::default(), &mut NoProgress);

        match &summary.reports[0].outcome {
            Outcome::Failed { error } => assert!(error.contains("not specified")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_test_mode_never_applies() {
        let state = FlagState::new(false);
        let resources: Vec<Box<dyn Resource>> =
            vec![Box::new(TestResource::with("a", vec![&state]))];

        let summary = execute(&resources, &ExecuteOptions::test_only(), &mut NoProgress);

        assert_eq!(summary.unsatisfied, 1);
        assert_eq!(state.applies.load(Ordering::SeqCst), 0);
        assert!(!summary.is_success());
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_resource_start(&mut self, id: &str, _description: &str) {
            self.events.push(format!("start {id}"));
        }

        fn on_state_tested(&mut self, _state: &str, error: Option<&anyhow::Error>) {
            self.events.push(format!("tested ok={}", error.is_none()));
        }

        fn on_state_applied(&mut self, _state: &str, error: Option<&anyhow::Error>) {
            self.events.push(format!("applied ok={}", error.is_none()));
        }

        fn on_resource_complete(&mut self, id: &str, _description: &str, outcome: &Outcome) {
            self.events.push(format!("{} {id}", outcome.tag()));
        }
    }

    #[test]
    fn test_progress_sees_declaration_order() {
        let a = FlagState::new(true);
        let b = FlagState::new(false);
        let resources: Vec<Box<dyn Resource>> = vec![
            Box::new(TestResource::with("a", vec![&a])),
            Box::new(TestResource::with("b", vec![&b])),
        ];
        let mut recorder = Recorder::default();

        execute(&resources, &ExecuteOptions::default(), &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "start a",
                "tested ok=true",
                " OK  a",
                "start b",
                "tested ok=false",
                "applied ok=true",
                "DONE b",
            ]
        );
    }
}
