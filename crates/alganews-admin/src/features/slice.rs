//! Generic list and detail slices shared by the entity features.

use std::collections::BTreeSet;

use alganews_core::sdk::cash_flow::{CategoryQuery, EntryQuery, EntryQueryPatch};
use alganews_core::sdk::payment::{PaymentQuery, PaymentQueryPatch};
use alganews_core::sdk::post::PostQuery;
use alganews_core::sdk::{ApiError, ApiResult, Id, Sort};
use tracing::warn;

use crate::common::{TaskId, TaskSeq, TaskState};

/// A query owned by a slice, updated by shallow-merging a patch.
pub trait SliceQuery: Clone {
    type Patch;

    fn apply(&mut self, patch: Self::Patch);
}

impl SliceQuery for () {
    type Patch = ();

    fn apply(&mut self, (): ()) {}
}

impl SliceQuery for PaymentQuery {
    type Patch = PaymentQueryPatch;

    fn apply(&mut self, patch: PaymentQueryPatch) {
        self.merge(patch);
    }
}

impl SliceQuery for EntryQuery {
    type Patch = EntryQueryPatch;

    fn apply(&mut self, patch: EntryQueryPatch) {
        self.merge(patch);
    }
}

impl SliceQuery for CategoryQuery {
    type Patch = Sort;

    fn apply(&mut self, sort: Sort) {
        self.sort = sort;
    }
}

impl SliceQuery for PostQuery {
    type Patch = ();

    fn apply(&mut self, (): ()) {}
}

/// How a completed fetch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Rejected,
    /// A newer fetch was issued after this one; the result was dropped.
    Stale,
}

/// List state of one entity kind.
#[derive(Debug, Clone)]
pub struct ListSlice<T, Q> {
    pub list: Vec<T>,
    pub query: Q,
    pub fetching: bool,
    pub selected: BTreeSet<Id>,
    /// Rejection of the last applied fetch, kept for inline forbidden/empty views.
    pub error: Option<ApiError>,
    fetch: TaskState,
    mutations_in_flight: u32,
}

impl<T, Q: SliceQuery> ListSlice<T, Q> {
    pub fn new(query: Q) -> Self {
        Self {
            list: Vec::new(),
            query,
            fetching: false,
            selected: BTreeSet::new(),
            error: None,
            fetch: TaskState::default(),
            mutations_in_flight: 0,
        }
    }

    /// Starts a fetch with the current query, superseding any fetch in flight.
    pub fn begin_fetch(&mut self, seq: &mut TaskSeq) -> (TaskId, Q) {
        let task = self.fetch.begin(seq);
        self.fetching = true;
        (task, self.query.clone())
    }

    /// Applies a fetch result if `task` is still the latest issued fetch.
    pub fn finish_fetch(&mut self, task: TaskId, result: ApiResult<Vec<T>>) -> FetchOutcome {
        if !self.fetch.finish_if_active(task) {
            warn!(task = task.0, "discarding stale list response");
            return FetchOutcome::Stale;
        }
        self.refresh_fetching();

        match result {
            Ok(list) => {
                self.list = list;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.error = Some(err);
                FetchOutcome::Rejected
            }
        }
    }

    pub fn set_query(&mut self, patch: Q::Patch) {
        self.query.apply(patch);
    }

    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn begin_mutation(&mut self) {
        self.mutations_in_flight += 1;
        self.fetching = true;
    }

    pub fn finish_mutation(&mut self) {
        self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
        self.refresh_fetching();
    }

    fn refresh_fetching(&mut self) {
        self.fetching = self.fetch.is_running() || self.mutations_in_flight > 0;
    }
}

impl<T, Q: SliceQuery + Default> Default for ListSlice<T, Q> {
    fn default() -> Self {
        Self::new(Q::default())
    }
}

/// Detail view state of a single record.
#[derive(Debug, Clone)]
pub struct DetailState<T> {
    pub value: Option<T>,
    pub fetching: bool,
    pub not_found: bool,
    pub error: Option<ApiError>,
    task: TaskState,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetching: false,
            not_found: false,
            error: None,
            task: TaskState::default(),
        }
    }
}

impl<T> DetailState<T> {
    pub fn begin(&mut self, seq: &mut TaskSeq) -> TaskId {
        self.fetching = true;
        self.task.begin(seq)
    }

    pub fn finish(&mut self, task: TaskId, result: ApiResult<T>) -> FetchOutcome {
        if !self.task.finish_if_active(task) {
            warn!(task = task.0, "discarding stale detail response");
            return FetchOutcome::Stale;
        }
        self.fetching = false;

        match result {
            Ok(value) => {
                self.value = Some(value);
                self.not_found = false;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.value = None;
                self.not_found = err.is_not_found();
                self.error = Some(err);
                FetchOutcome::Rejected
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use alganews_core::sdk::cash_flow::EntryType;

    use super::*;

    #[test]
    fn test_finish_fetch_replaces_list_in_order() {
        let mut seq = TaskSeq::default();
        let mut slice: ListSlice<u32, ()> = ListSlice::new(());
        slice.list = vec![9, 9];

        let (task, ()) = slice.begin_fetch(&mut seq);
        assert!(slice.fetching);

        let outcome = slice.finish_fetch(task, Ok(vec![3, 1, 2]));

        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!slice.fetching);
        assert_eq!(slice.list, vec![3, 1, 2]);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut seq = TaskSeq::default();
        let mut slice: ListSlice<u32, ()> = ListSlice::new(());

        let (older, ()) = slice.begin_fetch(&mut seq);
        let (newer, ()) = slice.begin_fetch(&mut seq);

        assert_eq!(slice.finish_fetch(newer, Ok(vec![2])), FetchOutcome::Applied);
        assert_eq!(slice.finish_fetch(older, Ok(vec![1])), FetchOutcome::Stale);
        assert_eq!(slice.list, vec![2]);
        assert!(!slice.fetching);
    }

    #[test]
    fn test_rejected_fetch_clears_fetching_and_keeps_list() {
        let mut seq = TaskSeq::default();
        let mut slice: ListSlice<u32, ()> = ListSlice::new(());
        slice.list = vec![1];

        let (task, ()) = slice.begin_fetch(&mut seq);
        let outcome = slice.finish_fetch(task, Err(ApiError::network("offline")));

        assert_eq!(outcome, FetchOutcome::Rejected);
        assert!(!slice.fetching);
        assert_eq!(slice.list, vec![1]);
        assert!(slice.error.is_some());
    }

    #[test]
    fn test_set_query_merges_patch() {
        let mut slice: ListSlice<u32, EntryQuery> =
            ListSlice::new(EntryQuery::new(EntryType::Expense, "2024-01"));
        slice.query.sort = Sort::asc("amount");

        slice.set_query(EntryQueryPatch {
            year_month: Some("2024-03".to_string()),
            sort: None,
        });

        assert_eq!(slice.query.year_month, "2024-03");
        assert_eq!(slice.query.sort, Sort::asc("amount"));
    }

    #[test]
    fn test_mutation_keeps_fetching_until_done() {
        let mut slice: ListSlice<u32, ()> = ListSlice::new(());
        slice.begin_mutation();
        assert!(slice.fetching);
        slice.finish_mutation();
        assert!(!slice.fetching);
    }

    #[test]
    fn test_detail_not_found_flag() {
        let mut seq = TaskSeq::default();
        let mut detail: DetailState<u32> = DetailState::default();

        let task = detail.begin(&mut seq);
        detail.finish(task, Err(ApiError::from_response(404, "")));

        assert!(detail.not_found);
        assert!(detail.value.is_none());
        assert!(!detail.fetching);
    }
}
