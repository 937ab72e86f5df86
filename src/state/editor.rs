use crate::models::{JournalEntry, Media, NEW_JOURNAL_TITLE};

/// The entry open in the editor plus the copy taken at its last load/save.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct EditorState {
    pub current: JournalEntry,
    pub original: Option<JournalEntry>,
}

impl EditorState {
    /// Make `entry` current and snapshot it.
    pub fn load(&mut self, entry: JournalEntry) {
        self.original = Some(entry.clone());
        self.current = entry;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        let Some(original) = &self.original else {
            return false;
        };
        self.current.title != original.title
            || self.current.content != original.content
            || self.current.media_list != original.media_list
    }

    pub fn is_empty(&self) -> bool {
        self.current.title.trim().is_empty()
            && self.current.content.trim().is_empty()
            && self.current.media_list.is_empty()
    }

    /// Back to the snapshot, or to a fresh unsaved entry when there is none.
    pub fn reset(&mut self) {
        match &self.original {
            Some(original) => self.current = original.clone(),
            None => self.load(JournalEntry::with_title(NEW_JOURNAL_TITLE)),
        }
    }

    /// Append uploaded media and re-snapshot the entry as it now stands,
    /// pending text edits included.
    pub fn attach_media(&mut self, media: Media) {
        self.current.media_list.push(media);
        self.original = Some(self.current.clone());
    }

    pub fn current_id(&self) -> Option<i64> {
        self.current.id
    }
}

/// Swap the list element with the same id for `entry`; no-op if absent.
pub(crate) fn replace_in_list(journals: &mut [JournalEntry], entry: &JournalEntry) {
    if entry.id.is_none() {
        return;
    }
    if let Some(slot) = journals.iter_mut().find(|j| j.id == entry.id) {
        *slot = entry.clone();
    }
}

pub(crate) fn remove_from_list(journals: &mut Vec<JournalEntry>, ids: &[i64]) {
    journals.retain(|j| !j.id.is_some_and(|id| ids.contains(&id)));
}
