// ── Mutation reconciler ──
//
// Applies single-item server mutations to the local collection without a
// re-fetch. Each id may have one mutation in flight; the busy flag is
// cleared when the call finishes, whatever the outcome.

use tracing::debug;

use super::ListView;
use crate::error::CoreError;
use crate::model::{CollectionItem, HasStatus, ItemId};

impl<T: CollectionItem> ListView<T> {
    /// Mark `id` busy. Refused when a mutation for it is already in flight.
    pub fn begin_mutation(&mut self, id: &ItemId) -> Result<(), CoreError> {
        if self.busy.insert(id.clone()) {
            Ok(())
        } else {
            Err(CoreError::Busy { id: id.clone() })
        }
    }

    /// Whether the controls for `id` should be disabled.
    pub fn is_busy(&self, id: &ItemId) -> bool {
        self.busy.contains(id)
    }

    /// Finish a delete. On success the item leaves the collection (and the
    /// detail view, if open); on failure nothing changes and the error is
    /// handed back for the caller to surface.
    pub fn finish_delete(
        &mut self,
        id: &ItemId,
        result: Result<(), CoreError>,
    ) -> Result<(), CoreError> {
        self.busy.remove(id);
        result?;

        if self.items.remove(id).is_some() {
            debug!(collection = T::COLLECTION, %id, "item removed");
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.image_failed.remove(id);
        let len = self.filtered().len();
        self.pager.clamp(len);
        Ok(())
    }
}

impl<T: HasStatus> ListView<T> {
    /// Finish a status change with the value the server settled on. The
    /// detail view reads through the collection, so it sees the update too.
    pub fn finish_status(
        &mut self,
        id: &ItemId,
        result: Result<T::Status, CoreError>,
    ) -> Result<T::Status, CoreError> {
        self.busy.remove(id);
        let status = result?;

        let applied = self.items.update(id, |item| item.set_status(status.clone()));
        if applied {
            debug!(collection = T::COLLECTION, %id, %status, "status reconciled");
            let len = self.filtered().len();
            self.pager.clamp(len);
        } else {
            debug!(collection = T::COLLECTION, %id, "status update for unknown item");
        }
        Ok(status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::CoreError;
    use crate::model::{ApplicationStatus, ContactMessage, JobApplication, ReadStatus};
    use crate::paginate::PageState;
    use crate::test_support::{application, contact, post};
    use crate::view::ListView;

    fn loaded<T: crate::model::CollectionItem>(items: Vec<T>) -> ListView<T> {
        let mut view = ListView::new(PageState::fixed(10));
        let ticket = view.restart_fetch();
        view.finish_fetch(ticket, Ok(items));
        view
    }

    fn server_error() -> CoreError {
        CoreError::Rejected {
            status: 500,
            message: "boom".into(),
        }
    }

    #[test]
    fn delete_success_removes_exactly_one_and_keeps_order() {
        let mut view = loaded(vec![post("a", "x"), post("b", "x"), post("c", "x")]);
        let id = "b".into();
        view.begin_mutation(&id).unwrap();
        assert!(view.is_busy(&id));
        view.finish_delete(&id, Ok(())).unwrap();

        let ids: Vec<&str> = view.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!view.is_busy(&id));
    }

    #[test]
    fn delete_failure_leaves_collection_untouched() {
        let mut view = loaded(vec![post("a", "x"), post("b", "x")]);
        let before = view.version();
        let id = "a".into();
        view.begin_mutation(&id).unwrap();
        let err = view.finish_delete(&id, Err(server_error())).unwrap_err();

        assert_eq!(err.user_message(), "boom");
        assert_eq!(view.len(), 2);
        assert_eq!(view.version(), before);
        assert!(!view.is_busy(&id));
    }

    #[test]
    fn deleting_the_open_item_closes_the_detail_view() {
        let mut view = loaded(vec![post("a", "x"), post("b", "x")]);
        let id = "a".into();
        view.select(&id);
        view.finish_delete(&id, Ok(())).unwrap();
        assert!(view.selected().is_none());

        view.select(&"b".into());
        view.finish_delete(&"zzz".into(), Ok(())).unwrap();
        assert_eq!(view.selected().unwrap().id.as_str(), "b");
    }

    #[test]
    fn second_mutation_on_same_id_is_refused() {
        let mut view = loaded(vec![post("a", "x")]);
        let id = "a".into();
        view.begin_mutation(&id).unwrap();
        assert!(matches!(view.begin_mutation(&id), Err(CoreError::Busy { .. })));
        view.begin_mutation(&"other".into()).unwrap();
    }

    #[test]
    fn status_uses_server_value_and_updates_open_copy() {
        let mut view = loaded(vec![
            application("x1", ApplicationStatus::Pending),
            application("x2", ApplicationStatus::Pending),
        ]);
        let id = "x1".into();
        view.select(&id);
        view.begin_mutation(&id).unwrap();
        let applied = view
            .finish_status(&id, Ok(ApplicationStatus::Reviewed))
            .unwrap();

        assert_eq!(applied, ApplicationStatus::Reviewed);
        assert_eq!(view.selected().unwrap().status, ApplicationStatus::Reviewed);
        let other: &JobApplication = view.get(&"x2".into()).unwrap();
        assert_eq!(other.status, ApplicationStatus::Pending);
    }

    #[test]
    fn status_failure_leaves_state_untouched() {
        let mut view = loaded(vec![contact("m1", ReadStatus::Unread)]);
        let id = "m1".into();
        view.begin_mutation(&id).unwrap();
        assert!(view.finish_status(&id, Err(server_error())).is_err());
        let message: &ContactMessage = view.get(&id).unwrap();
        assert_eq!(message.status, ReadStatus::Unread);
        assert!(!view.is_busy(&id));
    }

    #[test]
    fn status_change_moves_item_between_filters() {
        let mut view = loaded(vec![
            contact("m1", ReadStatus::Unread),
            contact("m2", ReadStatus::Unread),
        ]);
        view.select_label("unread");
        assert_eq!(view.visible().len(), 2);
        view.finish_status(&"m1".into(), Ok(ReadStatus::Read)).unwrap();
        assert_eq!(view.visible().len(), 1);
    }
}
