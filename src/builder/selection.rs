use indexmap::IndexSet;

/// Active selection: one focused field and an independent multi-select set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    single: Option<String>,
    multi: IndexSet<String>,
}

impl Selection {
    pub fn single(&self) -> Option<&str> {
        self.single.as_deref()
    }

    pub fn multi(&self) -> &IndexSet<String> {
        &self.multi
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.single.as_deref() == Some(id) || self.multi.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.multi.is_empty()
    }

    /// Select one field (or none), clearing the multi-select set.
    pub fn select(&mut self, id: Option<String>) {
        self.single = id;
        self.multi.clear();
    }

    /// Toggle membership in the multi-select set. Exactly one member is
    /// promoted to the single selection; any other count clears it.
    pub fn toggle(&mut self, id: &str) {
        if !self.multi.shift_remove(id) {
            self.multi.insert(id.to_string());
        }
        self.single = if self.multi.len() == 1 {
            self.multi.first().cloned()
        } else {
            None
        };
    }

    pub fn select_many(&mut self, ids: impl IntoIterator<Item = String>) {
        self.multi = ids.into_iter().collect();
        self.single = None;
    }

    pub fn clear(&mut self) {
        self.single = None;
        self.multi.clear();
    }

    /// Drop a removed field from both parts of the selection.
    pub fn forget(&mut self, id: &str) {
        if self.single.as_deref() == Some(id) {
            self.single = None;
        }
        self.multi.shift_remove(id);
    }
}
