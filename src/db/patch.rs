//! Partial update payload for a stored person.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    /// `None` => do not change; `Some(v)` => update
    pub name: Option<String>,
    /// `None` => do not change; `Some(None)` => set NULL; `Some(Some(v))` => update
    pub age: Option<Option<i64>>,
    /// `None` => do not change; `Some(None)` => set NULL; `Some(Some(v))` => update
    pub address: Option<Option<String>>,
    /// `None` => do not change; `Some(None)` => set NULL; `Some(Some(v))` => update
    pub work: Option<Option<String>>,
}

impl PersonPatch {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none() && self.work.is_none()
    }
}
