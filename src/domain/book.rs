use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::contact::{Contact, Draft};
use crate::errors::AppError;
use crate::store::ContactStore;
use crate::validation::{ErrorSet, Field, Validator};

/// The contact record lifecycle manager. Owns the canonical in-memory list
/// (insertion order, stable across edits), the current draft, the current
/// error set, and the search term. Every mutation is validated before it
/// lands, and every successful mutation is pushed to the storage adapter.
pub struct ContactBook {
    contacts: Vec<Contact>,
    draft: Draft,
    errors: ErrorSet,
    search_term: String,
    validator: Validator,
    storage: Box<dyn ContactStore>,
}

impl ContactBook {
    /// Loads the saved collection once. A missing, empty, or unreadable
    /// storage slot degrades to an empty book; it is never fatal.
    pub fn new(storage: Box<dyn ContactStore>) -> Result<Self, AppError> {
        let contacts = match storage.load() {
            Ok(contacts) => {
                debug!(count = contacts.len(), "loaded contacts from storage");
                contacts
            }
            Err(err) => {
                warn!(error = %err, "could not load saved contacts, starting empty");
                Vec::new()
            }
        };

        Ok(Self {
            contacts,
            draft: Draft::default(),
            errors: ErrorSet::new(),
            search_term: String::new(),
            validator: Validator::new()?,
            storage,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Filtered view using the stored search term.
    pub fn filtered(&self) -> Vec<&Contact> {
        self.search(&self.search_term)
    }

    // Draft setters clear the pending error for the edited field, so a
    // stale inline message disappears as soon as the user types.

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.clear_field(Field::Name);
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
        self.errors.clear_field(Field::Phone);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
        self.errors.clear_field(Field::Email);
    }

    /// Pure validation of an arbitrary draft. State is untouched.
    pub fn validate(&self, draft: &Draft) -> ErrorSet {
        self.validator.validate(draft)
    }

    /// Validates the current draft and, on success, commits it: appends a
    /// fresh contact when no edit target is set, otherwise overwrites the
    /// target's fields in place (id and position preserved). The draft and
    /// errors are cleared and a save is triggered. On failure the error set
    /// is stored and returned, and the collection and draft stay unchanged.
    pub fn submit(&mut self) -> Result<Contact, ErrorSet> {
        let errors = self.validator.validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        let name = self.draft.name.trim().to_string();
        let phone = self.draft.phone.trim().to_string();
        let email = self.draft.email.trim().to_string();

        let target = self
            .draft
            .editing
            .and_then(|id| self.contacts.iter().position(|c| c.id == id));

        let contact = match target {
            Some(index) => {
                let existing = &mut self.contacts[index];
                existing.name = name;
                existing.phone = phone;
                existing.email = email;
                existing.clone()
            }
            None => {
                let contact = Contact::new(name, phone, email);
                self.contacts.push(contact.clone());
                contact
            }
        };

        self.draft.clear();
        self.errors.clear();
        self.persist();

        Ok(contact)
    }

    /// Copies the target contact's fields into the draft and marks it as
    /// the edit target. Silently does nothing for an unknown id: row ids
    /// come from rendered state, but a stale one must not corrupt the book.
    pub fn begin_edit(&mut self, id: Uuid) {
        let contact = match self.get(id) {
            Some(contact) => contact,
            None => return,
        };

        self.draft = Draft {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            editing: Some(id),
        };
        self.errors.clear();
    }

    pub fn cancel_edit(&mut self) {
        self.draft.clear();
        self.errors.clear();
    }

    /// Removes the contact with this id if present, otherwise a no-op.
    /// Deleting the contact currently being edited cancels that edit, so
    /// the draft never points at a record that no longer exists.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);

        if self.contacts.len() == before {
            return;
        }

        if self.draft.editing == Some(id) {
            self.cancel_edit();
        }
        self.persist();
    }

    /// Pure filter over the collection: every contact whose name, phone, or
    /// email contains `term` as a substring, in original order. An empty
    /// term returns the whole collection.
    pub fn search(&self, term: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.matches(term)).collect()
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.contacts) {
            // In-memory state stays authoritative for the session.
            warn!(error = %err, "failed to save contacts");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;
    use crate::validation::FieldError;

    fn empty_book() -> ContactBook {
        ContactBook::new(Box::new(MemStore::new())).unwrap()
    }

    fn submit_contact(book: &mut ContactBook, name: &str, phone: &str, email: &str) -> Contact {
        book.set_name(name);
        book.set_phone(phone);
        book.set_email(email);
        book.submit().unwrap()
    }

    #[test]
    fn submit_appends_and_clears_draft() {
        let mut book = empty_book();

        let contact = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        assert_eq!(book.contacts().len(), 1);
        assert_eq!(book.contacts()[0], contact);
        assert_eq!(book.draft(), &Draft::default());
        assert!(book.errors().is_empty());
    }

    #[test]
    fn invalid_submit_leaves_collection_and_draft_untouched() {
        let mut book = empty_book();
        submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        book.set_name("");
        book.set_phone("1");
        book.set_email("bad");
        let errors = book.submit().unwrap_err();

        assert_eq!(errors.get(Field::Name), Some(FieldError::MissingField));
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidFormat));
        assert_eq!(errors.get(Field::Phone), None);
        assert_eq!(book.contacts().len(), 1);
        assert_eq!(book.draft().phone, "1");
        assert_eq!(book.errors(), &errors);
    }

    #[test]
    fn editing_a_field_clears_its_error_only() {
        let mut book = empty_book();

        book.set_phone("555-1234");
        let errors = book.submit().unwrap_err();
        assert_eq!(errors.len(), 2); // name and email missing

        book.set_name("Ann");

        assert_eq!(book.errors().get(Field::Name), None);
        assert_eq!(
            book.errors().get(Field::Email),
            Some(FieldError::MissingField)
        );
    }

    #[test]
    fn update_preserves_identity_and_position() {
        let mut book = empty_book();
        let a = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        let b = submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");
        let c = submit_contact(&mut book, "Cara", "555-7777", "cara@x.com");

        book.begin_edit(b.id);
        assert_eq!(book.draft().name, "Bob");
        assert_eq!(book.draft().editing, Some(b.id));

        book.set_name("Robert");
        book.set_phone("555-0000");
        book.set_email("robert@x.com");
        let updated = book.submit().unwrap();

        assert_eq!(updated.id, b.id);
        assert_eq!(book.contacts().len(), 3);
        assert_eq!(book.contacts()[0], a);
        assert_eq!(book.contacts()[1].id, b.id);
        assert_eq!(book.contacts()[1].name, "Robert");
        assert_eq!(book.contacts()[2], c);
        assert!(!book.draft().is_editing());
    }

    #[test]
    fn begin_edit_with_unknown_id_is_a_no_op() {
        let mut book = empty_book();
        submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        book.begin_edit(Uuid::new_v4());

        assert_eq!(book.draft(), &Draft::default());
    }

    #[test]
    fn cancel_edit_clears_draft_and_errors() {
        let mut book = empty_book();
        let ann = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        book.begin_edit(ann.id);
        book.set_email("broken");
        let _ = book.submit().unwrap_err();

        book.cancel_edit();

        assert_eq!(book.draft(), &Draft::default());
        assert!(book.errors().is_empty());
        assert_eq!(book.contacts()[0], ann);
    }

    #[test]
    fn delete_removes_in_place_without_reordering() {
        let mut book = empty_book();
        let a = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        let b = submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");
        let c = submit_contact(&mut book, "Cara", "555-7777", "cara@x.com");

        book.delete(b.id);

        assert_eq!(book.contacts(), &[a, c]);
    }

    #[test]
    fn delete_of_nonexistent_id_is_a_no_op() {
        let mut book = empty_book();
        submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        book.delete(Uuid::new_v4());

        assert_eq!(book.contacts().len(), 1);
    }

    #[test]
    fn deleting_the_edit_target_cancels_the_edit() {
        let mut book = empty_book();
        let ann = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        book.begin_edit(ann.id);
        book.delete(ann.id);

        assert!(book.contacts().is_empty());
        assert_eq!(book.draft(), &Draft::default());
    }

    #[test]
    fn deleting_another_contact_keeps_the_edit() {
        let mut book = empty_book();
        let ann = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        let bob = submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");

        book.begin_edit(ann.id);
        book.delete(bob.id);

        assert_eq!(book.draft().editing, Some(ann.id));
        assert_eq!(book.draft().name, "Ann");
    }

    #[test]
    fn search_filters_across_fields() {
        let mut book = empty_book();
        submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");

        let by_phone = book.search("555-1");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Ann");

        let by_domain = book.search("x.com");
        assert_eq!(by_domain.len(), 2);

        let by_name = book.search("BOB");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Bob");
    }

    #[test]
    fn empty_search_returns_full_collection_in_order() {
        let mut book = empty_book();
        let a = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        let b = submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");

        let all = book.search("");
        assert_eq!(all, vec![&a, &b]);
    }

    #[test]
    fn filtered_uses_the_stored_term() {
        let mut book = empty_book();
        submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");

        book.set_search_term("ann");

        assert_eq!(book.filtered().len(), 1);
        assert_eq!(book.search_term(), "ann");
        // The term only computes a view, the collection is untouched.
        assert_eq!(book.contacts().len(), 2);
    }

    #[test]
    fn submit_trims_surrounding_whitespace() {
        let mut book = empty_book();

        let contact = submit_contact(&mut book, "  Ann ", " 555-1234 ", " ann@x.com ");

        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.phone, "555-1234");
        assert_eq!(contact.email, "ann@x.com");
    }

    #[test]
    fn save_failure_keeps_in_memory_state() {
        struct FailingStore;

        impl ContactStore for FailingStore {
            fn load(&self) -> Result<Vec<Contact>, AppError> {
                Ok(Vec::new())
            }

            fn save(&self, _contacts: &[Contact]) -> Result<(), AppError> {
                Err(AppError::Io(std::io::Error::other("disk full")))
            }
        }

        let mut book = ContactBook::new(Box::new(FailingStore)).unwrap();
        let contact = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");

        assert_eq!(book.contacts(), &[contact]);
    }

    #[test]
    fn load_failure_starts_empty() {
        struct BrokenLoad;

        impl ContactStore for BrokenLoad {
            fn load(&self) -> Result<Vec<Contact>, AppError> {
                Err(AppError::Io(std::io::Error::other("corrupt")))
            }

            fn save(&self, _contacts: &[Contact]) -> Result<(), AppError> {
                Ok(())
            }
        }

        let book = ContactBook::new(Box::new(BrokenLoad)).unwrap();

        assert!(book.contacts().is_empty());
    }

    #[test]
    fn saves_are_issued_after_each_mutation() {
        let store = MemStore::new();
        let mut book = ContactBook::new(Box::new(store.clone())).unwrap();

        let ann = submit_contact(&mut book, "Ann", "555-1234", "ann@x.com");
        assert_eq!(store.snapshot().unwrap(), vec![ann.clone()]);

        let bob = submit_contact(&mut book, "Bob", "555-9999", "bob@x.com");
        assert_eq!(store.snapshot().unwrap(), vec![ann.clone(), bob.clone()]);

        book.delete(ann.id);
        assert_eq!(store.snapshot().unwrap(), vec![bob]);
    }
}
