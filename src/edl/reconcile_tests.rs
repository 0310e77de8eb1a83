//! Tests for the reconciler.

use super::*;
use crate::edl::test_fixtures::{
    created, fetch, previous, retrieved_at, unannotated, zone,
};
use crate::edl::{AddressRecord, RenderOptions};
use crate::state::read_previous;

mod iteration {
    use super::*;

    #[test]
    fn first_run_writes_iteration_one() {
        let result = reconcile(&PersistedState::zero(), fetch(vec![]));
        assert_eq!(result.state.iteration, 1);
        assert_eq!(result.document.iteration, 1);
    }

    #[test]
    fn increments_previous_iteration() {
        let result = reconcile(&previous(41, &[]), fetch(vec![]));
        assert_eq!(result.state.iteration, 42);
    }

    #[test]
    fn largest_iteration_does_not_wrap() {
        let text = "# prisma-edl\n# Iteration 18446744073709551615\n1.2.3.4\n";
        let prev = read_previous(text).into_state();
        assert_eq!(prev.iteration, u64::MAX);

        let result = reconcile(&prev, fetch(vec![]));

        assert_eq!(result.state.iteration, u64::MAX);
        assert_eq!(result.document.iteration, u64::MAX);
    }
}

mod last_change {
    use super::*;

    #[test]
    fn example_scenario_uses_creation_timestamp() {
        let prev = previous(3, &["1.2.3.4"]);
        let current = fetch(vec![zone("z1", vec![created("1.2.3.4", 1_700_000_000)])]);

        let result = reconcile(&prev, current);

        assert_eq!(result.state.iteration, 4);
        assert_eq!(
            result.document.last_change,
            LastChange::CreationTimestamp {
                at: DateTime::from_timestamp(1_700_000_000, 0).unwrap()
            }
        );
        assert_eq!(
            result.state.last_changed_at.as_deref(),
            Some("Last change detected via creation_timestamp at: 2023-11-14 22:13:20.000000")
        );
    }

    #[test]
    fn unchanged_set_uses_newest_creation_time() {
        let prev = previous(1, &["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        let current = fetch(vec![
            zone("a", vec![created("10.0.0.1", 100), created("10.0.0.2", 300)]),
            zone("b", vec![unannotated("10.0.0.3")]),
        ]);

        let result = reconcile(&prev, current);

        assert_eq!(result.document.last_change.at().timestamp(), 300);
    }

    #[test]
    fn unchanged_set_without_creation_times_uses_retrieval_time() {
        let prev = previous(1, &["10.0.0.1"]);
        let current = fetch(vec![zone("a", vec![AddressRecord::bare("10.0.0.1")])]);

        let result = reconcile(&prev, current);

        assert_eq!(
            result.document.last_change,
            LastChange::Noticed { at: retrieved_at() }
        );
    }

    #[test]
    fn changed_set_ignores_creation_times() {
        let prev = previous(1, &["10.0.0.1"]);
        let current = fetch(vec![zone(
            "a",
            vec![created("10.0.0.1", 100), created("10.0.0.2", 200)],
        )]);

        let result = reconcile(&prev, current);

        assert_eq!(
            result.document.last_change,
            LastChange::Noticed { at: retrieved_at() }
        );
    }

    #[test]
    fn set_comparison_ignores_order_and_zones() {
        let prev = previous(1, &["10.0.0.2", "10.0.0.1"]);
        let current = fetch(vec![
            zone("b", vec![created("10.0.0.1", 100)]),
            zone("a", vec![created("10.0.0.2", 50)]),
        ]);

        let result = reconcile(&prev, current);

        assert!(matches!(
            result.document.last_change,
            LastChange::CreationTimestamp { .. }
        ));
    }

    #[test]
    fn noticed_summary_mentions_retrieval_time() {
        let change = LastChange::Noticed { at: retrieved_at() };
        assert_eq!(
            change.to_string(),
            "Last change detected was between previous iteration and 2024-03-09 16:00:00.000000"
        );
    }
}

mod alerts {
    use super::*;

    #[test]
    fn emptied_list_raises_both_alerts() {
        let result = reconcile(&previous(5, &["10.0.0.1"]), fetch(vec![zone("a", vec![])]));

        assert_eq!(result.alerts, vec![ListAlert::Emptied, ListAlert::Empty]);
        assert!(ListAlert::Emptied.is_critical());
        assert!(!ListAlert::Empty.is_critical());
    }

    #[test]
    fn empty_first_run_raises_warning_only() {
        let result = reconcile(&PersistedState::zero(), fetch(vec![]));
        assert_eq!(result.alerts, vec![ListAlert::Empty]);
    }

    #[test]
    fn non_empty_list_raises_nothing() {
        let result = reconcile(
            &PersistedState::zero(),
            fetch(vec![zone("a", vec![unannotated("10.0.0.1")])]),
        );
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn alerts_do_not_stop_state_update() {
        let result = reconcile(&previous(5, &["10.0.0.1"]), fetch(vec![]));
        assert_eq!(result.state.iteration, 6);
        assert!(result.state.addresses.is_empty());
    }
}

mod idempotence {
    use super::*;

    /// Runs the pipeline once and reads the written file back.
    fn run_once(prev: &PersistedState, current: FetchResult) -> (Reconciliation, PersistedState) {
        let result = reconcile(prev, current);
        let text = result.document.to_file_contents(RenderOptions::default());
        let reread = read_previous(&text).into_state();
        (result, reread)
    }

    #[test]
    fn second_run_only_bumps_iteration_without_creation_times() {
        let current = fetch(vec![zone("a", vec![unannotated("10.0.0.1")])]);

        let (first, state1) = run_once(&PersistedState::zero(), current.clone());
        let (second, state2) = run_once(&state1, current);

        assert_eq!(state2.iteration, state1.iteration + 1);
        assert_eq!(state1.addresses, state2.addresses);
        assert_eq!(first.state.last_changed_at, second.state.last_changed_at);
        assert_eq!(state1.last_changed_at, state2.last_changed_at);
    }

    #[test]
    fn second_run_reports_creation_time_when_available() {
        let current = fetch(vec![zone(
            "a",
            vec![created("10.0.0.1", 1_600_000_000), created("10.0.0.2", 1_650_000_000)],
        )]);

        let (first, state1) = run_once(&PersistedState::zero(), current.clone());
        let (second, _) = run_once(&state1, current);

        assert!(matches!(first.document.last_change, LastChange::Noticed { .. }));
        assert_eq!(
            second.document.last_change,
            LastChange::CreationTimestamp {
                at: DateTime::from_timestamp(1_650_000_000, 0).unwrap()
            }
        );
        assert_eq!(second.state.addresses, first.state.addresses);
    }
}
