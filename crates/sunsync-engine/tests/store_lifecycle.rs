//! End-to-end store lifecycle scenarios: hydration ordering, reset edges,
//! save de-dup and rollback, driven purely through the sans-IO surface.

use std::time::{Duration, Instant};

use sunsync_engine::{EngineError, SectionSpec, SectionStore, Selection, WriteMode};
use sunsync_model::{
    EntityType, FieldValue, Instance, Payload, ProjectId, RecordId, RemoteRecord,
};

const MAKE: &str = "sys1_micro_inverter_make";
const MODEL: &str = "sys1_micro_inverter_model";
const QTY: &str = "sys1_micro_inverter_qty";

#[derive(Debug, Clone, Default)]
struct InverterState {
    is_new: bool,
    make: Option<String>,
    model: Option<String>,
    qty: Option<f64>,
    clear_model: bool,
}

struct InverterSpec;

impl SectionSpec for InverterSpec {
    type State = InverterState;

    fn entity(&self) -> EntityType {
        EntityType::MicroInverter
    }

    async fn fetch_remote(
        &self,
        _project: &ProjectId,
        _instance: Instance,
    ) -> Result<Option<RemoteRecord>, EngineError> {
        Ok(None)
    }

    fn map_remote(&self, record: Option<&RemoteRecord>) -> InverterState {
        let Some(record) = record else {
            return InverterState::default();
        };
        let text = |key: &str| match record.fields.get(key) {
            Some(FieldValue::Text(s)) => Some(s.clone()),
            _ => None,
        };
        let num = |key: &str| match record.fields.get(key) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        };
        InverterState {
            is_new: matches!(record.fields.get("sys1_micro_inverter_new"), Some(FieldValue::Bool(true))),
            make: text(MAKE),
            model: text(MODEL),
            qty: num(QTY),
            clear_model: false,
        }
    }

    fn build_payload(&self, id: Option<&RecordId>, state: &InverterState) -> Payload {
        let mut payload = Payload::new();
        if let Some(id) = id {
            payload.set("id", id.as_str());
        }
        if let Some(make) = &state.make {
            payload.set(MAKE, make.as_str());
        }
        if state.clear_model {
            payload.set(MODEL, FieldValue::Null);
        } else if let Some(model) = &state.model {
            payload.set(MODEL, model.as_str());
        }
        if let Some(qty) = state.qty {
            payload.set(QTY, qty);
        }
        payload
    }

    fn selection(&self, state: &InverterState) -> Selection {
        Selection {
            is_new: state.is_new,
            make: state.make.clone(),
            model: state.model.clone(),
        }
    }
}

fn project(name: &str) -> ProjectId {
    ProjectId::new(name).expect("valid project id")
}

fn later() -> Instant {
    // Comfortably past any debounce window armed around "now".
    Instant::now() + Duration::from_secs(5)
}

fn store() -> SectionStore<InverterSpec> {
    let mut store = SectionStore::new(InverterSpec, Instance::Sys1);
    store.set_project(Some(project("proj-1")));
    store
}

fn hydrated_empty() -> SectionStore<InverterSpec> {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    assert!(store.complete_hydration(&ticket, None));
    store
}

fn record(make: &str, qty: f64) -> RemoteRecord {
    RemoteRecord::new(
        Some(RecordId::new("rec-1").expect("valid record id")),
        Payload::new().with(MAKE, make).with(QTY, qty),
    )
}

#[test]
fn no_write_until_hydration_completes() {
    let mut store = store();
    store.update_state(|s| s.make = Some("Enphase".into()));

    // Hydration armed but not yet taken.
    assert!(store.is_loading());
    assert!(store.save_due(later()).is_none());

    // Fetch in flight.
    let ticket = store.take_hydration().expect("hydration armed");
    store.update_state(|s| s.qty = Some(4.0));
    assert!(store.save_due(later()).is_none());

    // Fetch resolved: the next edit is allowed through.
    assert!(store.complete_hydration(&ticket, None));
    store.update_state(|s| s.model = Some("IQ8+".into()));
    let request = store.save_due(later()).expect("save after hydration");
    assert_eq!(request.mode, WriteMode::Sparse);
    assert_eq!(request.payload.get(MAKE), Some(&FieldValue::Text("Enphase".into())));
    assert_eq!(request.payload.get(QTY), Some(&FieldValue::Number(4.0)));
}

#[test]
fn debounce_window_holds_the_save_back() {
    let mut store = hydrated_empty();
    store.update_state(|s| s.make = Some("Enphase".into()));

    assert!(store.save_due(Instant::now()).is_none());
    assert!(store.save_due(later()).is_some());
}

#[test]
fn hydrated_snapshot_suppresses_echo_saves() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    assert!(store.complete_hydration(&ticket, Some(record("Enphase", 4.0))));
    assert_eq!(store.state().make.as_deref(), Some("Enphase"));

    // A state touch that reproduces the fetched payload is not an edit.
    store.update_state(|_| {});
    assert!(store.save_due(later()).is_none());

    // A real change goes through and echoes the record id.
    store.update_state(|s| s.qty = Some(6.0));
    let request = store.save_due(later()).expect("real edit saves");
    assert_eq!(request.payload.get("id"), Some(&FieldValue::Text("rec-1".into())));
    assert_eq!(request.payload.get(QTY), Some(&FieldValue::Number(6.0)));
}

#[test]
fn identical_payload_saves_once() {
    let mut store = hydrated_empty();

    store.update_state(|s| s.make = Some("Enphase".into()));
    assert!(store.save_due(later()).is_some());
    store.save_succeeded();

    store.update_state(|s| s.qty = Some(4.0));
    assert!(store.save_due(later()).is_some());
    store.save_succeeded();

    // Same value re-entered: payload identical to the last attempt.
    store.update_state(|s| s.qty = Some(4.0));
    assert!(store.save_due(later()).is_none());
}

#[test]
fn failed_save_clears_dedup_so_retry_goes_through() {
    let mut store = hydrated_empty();
    store.update_state(|s| s.make = Some("Enphase".into()));

    let first = store.save_due(later()).expect("first attempt");
    store.save_failed();

    store.update_state(|_| {});
    let retry = store.save_due(later()).expect("retry after failure");
    assert_eq!(first.payload, retry.payload);
}

#[test]
fn explicit_null_selects_the_exact_write_path() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    let remote = RemoteRecord::new(
        Some(RecordId::new("rec-1").expect("valid record id")),
        Payload::new().with(MAKE, "Enphase").with(MODEL, "IQ8+"),
    );
    assert!(store.complete_hydration(&ticket, Some(remote)));

    store.update_state(|s| {
        s.model = None;
        s.clear_model = true;
    });
    let request = store.save_due(later()).expect("clear saves");
    assert_eq!(request.mode, WriteMode::ExplicitNull);
    assert_eq!(request.payload.get(MODEL), Some(&FieldValue::Null));
}

#[test]
fn empty_payload_never_writes() {
    let mut store = hydrated_empty();
    store.update_state(|_| {});
    assert!(store.save_due(later()).is_none());
}

#[test]
fn instance_switch_keeps_old_state_until_new_fetch_resolves() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    assert!(store.complete_hydration(&ticket, Some(record("Enphase", 4.0))));

    store.set_instance(Instance::Sys2);
    // No transient blank form: the old instance's values are still there.
    assert_eq!(store.state().make.as_deref(), Some("Enphase"));
    assert!(store.is_loading());

    let ticket = store.take_hydration().expect("re-hydration armed");
    assert_eq!(ticket.instance, Instance::Sys2);
    assert!(store.complete_hydration(&ticket, Some(record("Tesla", 2.0))));
    assert_eq!(store.state().make.as_deref(), Some("Tesla"));
}

#[test]
fn instance_switch_abandons_the_in_flight_fetch() {
    let mut store = store();
    let stale = store.take_hydration().expect("hydration armed");

    store.set_instance(Instance::Sys3);
    assert!(!store.complete_hydration(&stale, Some(record("Enphase", 4.0))));
    assert!(store.state().make.is_none());

    let fresh = store.take_hydration().expect("new hydration armed");
    assert!(store.complete_hydration(&fresh, Some(record("Tesla", 2.0))));
    assert_eq!(store.state().make.as_deref(), Some("Tesla"));
}

#[test]
fn disable_resets_and_blocks_saves() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    assert!(store.complete_hydration(&ticket, Some(record("Enphase", 4.0))));
    store.update_state(|s| s.qty = Some(6.0));

    store.set_enabled(false);
    assert!(store.state().make.is_none());
    assert!(store.record_id().is_none());
    assert!(store.save_due(later()).is_none());
}

#[test]
fn reenable_rehydrates_without_another_reset() {
    let mut store = store();
    store.set_enabled(false);
    store.set_enabled(true);

    assert!(store.is_loading());
    let ticket = store.take_hydration().expect("hydration armed on re-enable");
    assert!(store.complete_hydration(&ticket, Some(record("Enphase", 4.0))));
    assert_eq!(store.state().make.as_deref(), Some("Enphase"));
}

#[test]
fn project_change_resets_everything() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    assert!(store.complete_hydration(&ticket, Some(record("Enphase", 4.0))));

    store.set_project(Some(project("proj-2")));
    assert!(store.state().make.is_none());
    assert!(store.record_id().is_none());
    assert!(!store.has_hydrated_once());
    assert!(store.is_loading());

    // The old project's fetch result must not land on the new project.
    assert!(!store.complete_hydration(&ticket, Some(record("Tesla", 2.0))));
}

#[test]
fn failed_hydration_stays_loading_until_retried() {
    let mut store = store();
    let ticket = store.take_hydration().expect("hydration armed");
    store.fail_hydration(&ticket);

    assert!(store.is_loading());
    store.update_state(|s| s.make = Some("Enphase".into()));
    assert!(store.save_due(later()).is_none());

    store.retry_hydration();
    let ticket = store.take_hydration().expect("retry armed");
    assert!(store.complete_hydration(&ticket, None));
}

#[test]
fn flush_emits_the_pending_save_immediately() {
    let mut store = hydrated_empty();
    store.update_state(|s| s.make = Some("Enphase".into()));

    // Window has not elapsed, but teardown must not drop the edit.
    let request = store.flush().expect("pending edit flushed");
    assert_eq!(request.payload.get(MAKE), Some(&FieldValue::Text("Enphase".into())));
    assert!(store.flush().is_none());
}
