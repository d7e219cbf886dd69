//! List screen controller.
//!
//! One [`ScreenController`] backs one doctor or patient list screen. It fetches once on mount,
//! falls back to the injected dataset on any fetch failure, owns the screen's
//! [`EntityListStore`], search term and sort config, and runs the delete confirmation gate.
//!
//! ## Delete modes
//!
//! - [`DeleteMode::LocalOnly`]: confirming a delete only removes the entity from the local
//!   list. No request is made.
//! - [`DeleteMode::RemoteConfirmed`]: the local removal is applied first, then the remote API
//!   is asked to delete the record. If that fails the local removal stands and the screen is
//!   flagged with [`ScreenController::needs_resync`]. A screen fetches only once, so acting on
//!   the flag means building a fresh screen, whose fetch picks up the server's view.

use crate::client::{AdminApi, ApiFuture};
use crate::config::DeleteMode;
use crate::fallback::FallbackDataProvider;
use crate::models::{Doctor, Entity, EntityId, Patient};
use crate::query::{derive_view, SearchTerm, SortConfig};
use crate::screen::{FetchFailure, Lifecycle, Phase, Slot};
use crate::store::EntityListStore;
use std::sync::Arc;

/// An entity kind with its own list endpoint, remote delete and fallback dataset.
pub trait ListResource: Entity {
    /// Plural noun used in logs and banners, e.g. `"doctors"`.
    const LABEL: &'static str;

    fn fetch_all(api: &dyn AdminApi) -> ApiFuture<'_, Vec<Self>>;

    fn delete_remote<'a>(api: &'a dyn AdminApi, id: &'a EntityId) -> ApiFuture<'a, ()>;

    fn fallback(provider: &dyn FallbackDataProvider) -> Vec<Self>;
}

impl ListResource for Doctor {
    const LABEL: &'static str = "doctors";

    fn fetch_all(api: &dyn AdminApi) -> ApiFuture<'_, Vec<Self>> {
        api.fetch_doctors()
    }

    fn delete_remote<'a>(api: &'a dyn AdminApi, id: &'a EntityId) -> ApiFuture<'a, ()> {
        api.delete_doctor(id)
    }

    fn fallback(provider: &dyn FallbackDataProvider) -> Vec<Self> {
        provider.doctors()
    }
}

impl ListResource for Patient {
    const LABEL: &'static str = "patients";

    fn fetch_all(api: &dyn AdminApi) -> ApiFuture<'_, Vec<Self>> {
        api.fetch_patients()
    }

    fn delete_remote<'a>(api: &'a dyn AdminApi, id: &'a EntityId) -> ApiFuture<'a, ()> {
        api.delete_patient(id)
    }

    fn fallback(provider: &dyn FallbackDataProvider) -> Vec<Self> {
        provider.patients()
    }
}

/// What happened to the remote side of a confirmed delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteDelete {
    /// No request was made (local-only mode, or nothing was removed).
    Skipped,
    Confirmed,
    /// The request failed; the local removal was kept and a re-sync is pending.
    Failed(FetchFailure),
}

/// Result of [`ScreenController::confirm_delete`].
#[derive(Clone, Debug)]
pub struct DeleteOutcome<E> {
    pub removed: Option<E>,
    pub remote: RemoteDelete,
}

struct ListState<E: Entity> {
    store: EntityListStore<E>,
    search: SearchTerm,
    sort: Option<SortConfig<E::SortKey>>,
    pending_delete: Option<E>,
    needs_resync: bool,
}

pub type DoctorScreen = ScreenController<Doctor>;
pub type PatientScreen = ScreenController<Patient>;

pub struct ScreenController<E: ListResource> {
    api: Arc<dyn AdminApi>,
    fallback: Arc<dyn FallbackDataProvider>,
    delete_mode: DeleteMode,
    lifecycle: Lifecycle<ListState<E>>,
}

impl<E: ListResource> ScreenController<E> {
    pub fn new(
        api: Arc<dyn AdminApi>,
        fallback: Arc<dyn FallbackDataProvider>,
        delete_mode: DeleteMode,
    ) -> Self {
        Self {
            api,
            fallback,
            delete_mode,
            lifecycle: Lifecycle::new(ListState {
                store: EntityListStore::new(),
                search: SearchTerm::default(),
                sort: E::default_sort(),
                pending_delete: None,
                needs_resync: false,
            }),
        }
    }

    /// Start the screen's one fetch.
    ///
    /// Returns `false` if the screen was already mounted (or torn down). Must be called from
    /// within a Tokio runtime.
    pub fn mount(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let fallback = Arc::clone(&self.fallback);

        self.lifecycle.start(
            E::LABEL,
            async move { E::fetch_all(api.as_ref()).await },
            move |slot: &mut Slot<ListState<E>>, result| match result {
                Ok(items) => {
                    tracing::info!("loaded {} {}", items.len(), E::LABEL);
                    slot.state.store.replace_all(items);
                    slot.phase = Phase::Loaded;
                }
                Err(err) => {
                    tracing::error!("Error fetching {}: {}", E::LABEL, err);
                    slot.state.store.replace_all(E::fallback(fallback.as_ref()));
                    slot.phase = Phase::Failed(FetchFailure::from_error(&err));
                    slot.banner = Some(format!(
                        "Failed to load {}. Please try again later.",
                        E::LABEL
                    ));
                }
            },
        )
    }

    /// Wait until the mount fetch has been applied.
    pub async fn settled(&mut self) {
        self.lifecycle.settled().await;
    }

    /// Tear the screen down. A fetch still in flight is aborted and its result discarded.
    pub fn unmount(&mut self) {
        self.lifecycle.teardown();
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_live() && self.phase() != Phase::Idle
    }

    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    // ------------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.lifecycle.with(|slot| slot.phase.clone())
    }

    pub fn banner(&self) -> Option<String> {
        self.lifecycle.with(|slot| slot.banner.clone())
    }

    pub fn dismiss_banner(&self) {
        self.lifecycle.with(|slot| slot.banner = None);
    }

    /// Snapshot of the store, in store order.
    pub fn items(&self) -> Vec<E> {
        self.lifecycle.with(|slot| slot.state.store.all().to_vec())
    }

    pub fn len(&self) -> usize {
        self.lifecycle.with(|slot| slot.state.store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sorted, filtered sequence to render, derived fresh from the current store.
    pub fn view(&self) -> Vec<E> {
        self.lifecycle.with(|slot| {
            let state = &slot.state;
            derive_view(state.store.all(), &state.search, state.sort)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn search_term(&self) -> String {
        self.lifecycle
            .with(|slot| slot.state.search.as_str().to_string())
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = SearchTerm::new(term);
        self.lifecycle.with(|slot| slot.state.search = term);
    }

    pub fn sort_config(&self) -> Option<SortConfig<E::SortKey>> {
        self.lifecycle.with(|slot| slot.state.sort)
    }

    /// Apply a click on the `key` column header and return the new sort config.
    pub fn sort_by(&self, key: E::SortKey) -> SortConfig<E::SortKey> {
        self.lifecycle.with(|slot| {
            let next = SortConfig::clicked(slot.state.sort, key);
            slot.state.sort = Some(next);
            next
        })
    }

    /// Whether a remote delete failed on this screen.
    ///
    /// The flag never clears; the caller re-syncs by replacing the screen with a new one.
    pub fn needs_resync(&self) -> bool {
        self.lifecycle.with(|slot| slot.state.needs_resync)
    }

    // ------------------------------------------------------------------------
    // Delete confirmation gate
    // ------------------------------------------------------------------------

    /// Open the confirmation gate for the entity with `id`.
    ///
    /// Returns `false` (and leaves the gate as it was) if no such entity is loaded.
    pub fn request_delete(&self, id: &EntityId) -> bool {
        self.lifecycle.with(|slot| match slot.state.store.get(id).cloned() {
            Some(target) => {
                slot.state.pending_delete = Some(target);
                true
            }
            None => false,
        })
    }

    /// The entity the confirmation gate is currently holding.
    pub fn pending_delete(&self) -> Option<E> {
        self.lifecycle.with(|slot| slot.state.pending_delete.clone())
    }

    /// Close the gate without removing anything.
    pub fn cancel_delete(&self) {
        self.lifecycle.with(|slot| slot.state.pending_delete = None);
    }

    /// Remove the gated entity and close the gate.
    ///
    /// The local removal always happens first and cannot fail. In remote-confirmed mode the
    /// remote delete follows; its outcome is reported but never undoes the local removal.
    pub async fn confirm_delete(&self) -> DeleteOutcome<E> {
        let removed = self.lifecycle.with(|slot| {
            let target = slot.state.pending_delete.take()?;
            slot.state.store.remove_by_id(target.id())
        });

        let Some(entity) = removed else {
            return DeleteOutcome {
                removed: None,
                remote: RemoteDelete::Skipped,
            };
        };
        tracing::info!("removed {} from local {} list", entity.id(), E::LABEL);

        let remote = match self.delete_mode {
            DeleteMode::LocalOnly => RemoteDelete::Skipped,
            DeleteMode::RemoteConfirmed => {
                match E::delete_remote(self.api.as_ref(), entity.id()).await {
                    Ok(()) => RemoteDelete::Confirmed,
                    Err(err) => {
                        tracing::warn!(
                            "remote delete of {} failed; local removal kept until next fetch: {}",
                            entity.id(),
                            err
                        );
                        self.lifecycle.with(|slot| slot.state.needs_resync = true);
                        RemoteDelete::Failed(FetchFailure::from_error(&err))
                    }
                }
            }
        };

        DeleteOutcome {
            removed: Some(entity),
            remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::StaticFallback;
    use crate::models::{DoctorStatus, PatientSortKey};
    use crate::query::SortDirection;
    use crate::testing::{FakeAdminApi, FakeResponse};
    use crate::FetchErrorKind;
    use std::time::Duration;

    fn doctor_screen(api: FakeAdminApi, mode: DeleteMode) -> DoctorScreen {
        ScreenController::new(Arc::new(api), Arc::new(StaticFallback), mode)
    }

    fn patient_screen(api: FakeAdminApi) -> PatientScreen {
        ScreenController::new(Arc::new(api), Arc::new(StaticFallback), DeleteMode::LocalOnly)
    }

    fn names<E: Entity>(items: &[E]) -> Vec<String> {
        items.iter().map(|e| e.display_name().to_string()).collect()
    }

    #[tokio::test]
    async fn network_failure_falls_back_to_four_doctors() {
        let api = FakeAdminApi::default().with_doctors(FakeResponse::Fail(FetchErrorKind::NetworkUnavailable));
        let mut screen = doctor_screen(api, DeleteMode::LocalOnly);

        assert_eq!(screen.phase(), Phase::Idle);
        assert!(screen.mount());
        screen.settled().await;

        let doctors = screen.items();
        assert_eq!(doctors.len(), 4);
        assert_eq!(doctors[0].name, "Dr. Sarah Johnson");
        assert_eq!(doctors[3].name, "Dr. James Wilson");
        assert_eq!(doctors[3].status, Some(DoctorStatus::Inactive));

        match screen.phase() {
            Phase::Failed(failure) => assert_eq!(failure.kind, FetchErrorKind::NetworkUnavailable),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(
            screen.banner().as_deref(),
            Some("Failed to load doctors. Please try again later.")
        );
        screen.dismiss_banner();
        assert_eq!(screen.banner(), None);
    }

    #[tokio::test]
    async fn every_failure_kind_uses_the_fallback() {
        for kind in [
            FetchErrorKind::NetworkUnavailable,
            FetchErrorKind::NonSuccessStatus,
            FetchErrorKind::MalformedResponseBody,
        ] {
            let mut screen = patient_screen(FakeAdminApi::default().with_patients(FakeResponse::Fail(kind)));
            screen.mount();
            screen.settled().await;

            assert_eq!(screen.len(), 4, "{kind} should fall back");
            assert!(matches!(screen.phase(), Phase::Failed(ref f) if f.kind == kind));
        }
    }

    #[tokio::test]
    async fn successful_fetch_replaces_store_verbatim() {
        let live = vec![StaticFallback.doctors().remove(2)];
        let api = FakeAdminApi::default().with_doctors(FakeResponse::Ok(live.clone()));
        let mut screen = doctor_screen(api, DeleteMode::LocalOnly);

        screen.mount();
        screen.settled().await;

        assert_eq!(screen.phase(), Phase::Loaded);
        assert_eq!(screen.items(), live);
        assert_eq!(screen.banner(), None);
    }

    #[tokio::test]
    async fn mounting_twice_fetches_once() {
        let api = Arc::new(FakeAdminApi::default());
        let mut screen: DoctorScreen =
            ScreenController::new(api.clone(), Arc::new(StaticFallback), DeleteMode::LocalOnly);

        assert!(screen.mount());
        assert!(!screen.mount());
        screen.settled().await;
        assert!(!screen.mount());

        assert_eq!(api.doctor_fetches(), 1);
    }

    #[tokio::test]
    async fn response_after_unmount_is_discarded() {
        let api = FakeAdminApi::default()
            .with_doctors(FakeResponse::Ok(StaticFallback.doctors()))
            .with_delay(Duration::from_millis(200));
        let mut screen = doctor_screen(api, DeleteMode::LocalOnly);

        screen.mount();
        assert_eq!(screen.phase(), Phase::Loading);
        screen.unmount();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(screen.phase(), Phase::Loading);
        assert!(screen.is_empty());
        assert!(!screen.mount());
    }

    #[tokio::test]
    async fn patient_screen_starts_sorted_by_name() {
        let mut screen = patient_screen(FakeAdminApi::default());
        screen.mount();
        screen.settled().await;

        assert_eq!(
            screen.sort_config(),
            Some(SortConfig::ascending(PatientSortKey::Name))
        );
        assert_eq!(
            names(&screen.view()),
            ["Jane Smith", "John Doe", "Samuel Johnson", "Sara Lee"]
        );
    }

    #[tokio::test]
    async fn sort_clicks_toggle_and_reset() {
        let mut screen = patient_screen(FakeAdminApi::default());
        screen.mount();
        screen.settled().await;

        let config = screen.sort_by(PatientSortKey::Name);
        assert_eq!(config.direction, SortDirection::Descending);
        assert_eq!(
            names(&screen.view()),
            ["Sara Lee", "Samuel Johnson", "John Doe", "Jane Smith"]
        );

        let config = screen.sort_by(PatientSortKey::DateOfBirth);
        assert_eq!(config, SortConfig::ascending(PatientSortKey::DateOfBirth));
        assert_eq!(
            names(&screen.view()),
            ["Samuel Johnson", "John Doe", "Jane Smith", "Sara Lee"]
        );
    }

    #[tokio::test]
    async fn search_recomputes_on_every_read() {
        let mut screen = patient_screen(FakeAdminApi::default());
        screen.mount();
        screen.settled().await;

        screen.set_search_term("jane");
        assert_eq!(names(&screen.view()), ["Jane Smith"]);
        assert_eq!(screen.search_term(), "jane");

        screen.set_search_term("");
        assert_eq!(screen.view().len(), 4);
        // The store itself is never filtered.
        assert_eq!(screen.len(), 4);
    }

    #[tokio::test]
    async fn delete_gate_confirm_and_cancel() {
        let mut screen = doctor_screen(FakeAdminApi::default(), DeleteMode::LocalOnly);
        screen.mount();
        screen.settled().await;

        assert!(!screen.request_delete(&EntityId::from(99)));
        assert!(screen.pending_delete().is_none());

        assert!(screen.request_delete(&EntityId::from(2)));
        assert_eq!(
            screen.pending_delete().map(|d| d.name),
            Some("Dr. Michael Chen".to_string())
        );
        screen.cancel_delete();
        assert!(screen.pending_delete().is_none());
        assert_eq!(screen.len(), 4);

        screen.request_delete(&EntityId::from(2));
        let outcome = screen.confirm_delete().await;
        assert_eq!(outcome.removed.map(|d| d.id), Some(EntityId::from(2)));
        assert_eq!(outcome.remote, RemoteDelete::Skipped);
        assert!(screen.pending_delete().is_none());
        assert_eq!(
            names(&screen.items()),
            ["Dr. Sarah Johnson", "Dr. Emily Rodriguez", "Dr. James Wilson"]
        );

        // Nothing gated: confirming again is a no-op.
        let outcome = screen.confirm_delete().await;
        assert!(outcome.removed.is_none());
        assert_eq!(screen.len(), 3);
    }

    #[tokio::test]
    async fn local_only_mode_never_calls_the_api() {
        let api = Arc::new(FakeAdminApi::default());
        let mut screen: DoctorScreen =
            ScreenController::new(api.clone(), Arc::new(StaticFallback), DeleteMode::LocalOnly);
        screen.mount();
        screen.settled().await;

        screen.request_delete(&EntityId::from(1));
        screen.confirm_delete().await;
        assert!(api.deleted().is_empty());
    }

    #[tokio::test]
    async fn remote_confirmed_mode_calls_the_api() {
        let api = Arc::new(FakeAdminApi::default());
        let mut screen: DoctorScreen = ScreenController::new(
            api.clone(),
            Arc::new(StaticFallback),
            DeleteMode::RemoteConfirmed,
        );
        screen.mount();
        screen.settled().await;

        screen.request_delete(&EntityId::from(1));
        let outcome = screen.confirm_delete().await;

        assert_eq!(outcome.remote, RemoteDelete::Confirmed);
        assert_eq!(api.deleted(), [EntityId::from(1)]);
        assert!(!screen.needs_resync());
    }

    #[tokio::test]
    async fn failed_remote_delete_keeps_local_removal_and_flags_resync() {
        let api = FakeAdminApi::default().with_failing_deletes(FetchErrorKind::NonSuccessStatus);
        let mut screen = doctor_screen(api, DeleteMode::RemoteConfirmed);
        screen.mount();
        screen.settled().await;

        screen.request_delete(&EntityId::from(4));
        let outcome = screen.confirm_delete().await;

        assert!(matches!(
            outcome.remote,
            RemoteDelete::Failed(ref f) if f.kind == FetchErrorKind::NonSuccessStatus
        ));
        assert_eq!(screen.len(), 3);
        assert!(screen.needs_resync());
    }

    #[tokio::test]
    async fn resync_means_a_fresh_screen() {
        let api = Arc::new(
            FakeAdminApi::default().with_failing_deletes(FetchErrorKind::NetworkUnavailable),
        );
        let mut screen: DoctorScreen = ScreenController::new(
            api.clone(),
            Arc::new(StaticFallback),
            DeleteMode::RemoteConfirmed,
        );
        screen.mount();
        screen.settled().await;
        screen.request_delete(&EntityId::from(1));
        screen.confirm_delete().await;

        // The flagged screen will not fetch again and keeps the flag.
        assert!(!screen.mount());
        assert!(screen.needs_resync());
        assert_eq!(screen.len(), 3);

        let mut fresh: DoctorScreen = ScreenController::new(
            api.clone(),
            Arc::new(StaticFallback),
            DeleteMode::RemoteConfirmed,
        );
        fresh.mount();
        fresh.settled().await;
        assert!(!fresh.needs_resync());
        assert_eq!(fresh.len(), 4);
        assert_eq!(api.doctor_fetches(), 2);
    }
}
