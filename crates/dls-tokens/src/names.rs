//! Fixed name migrations between variable naming schemes.

/// A fixed `old name → new name` table.
#[derive(Debug, Clone, Copy)]
pub struct NameMap<'a> {
    entries: &'a [(&'a str, &'a str)],
}

impl<'a> NameMap<'a> {
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, old: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(from, _)| *from == old)
            .map(|(_, to)| *to)
    }

    pub fn contains(&self, old: &str) -> bool {
        self.get(old).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Obsolete semantic names and their canonical replacement. Entries found in the
/// semantic collection are deleted during sync.
pub const DEPRECATED_NAMES: NameMap<'static> = NameMap::new(&[
    ("bg/white", "surface/base"),
    ("bg/light", "surface/subtle"),
    ("bg/pale", "surface/muted"),
    ("text/dark", "text/primary"),
    ("text/muted", "text/secondary"),
    ("border/light", "border/subtle"),
    ("border/default", "border/base"),
]);

/// Legacy variable names bound in component files, and the 4-layer variable each
/// binding moves to.
pub const LEGACY_BINDINGS: NameMap<'static> = NameMap::new(&[
    // Border
    ("border/normal", "border/default"),
    ("border/base", "border/default"),
    ("border/default", "border/default"),
    ("border/light", "border/subtle"),
    ("border/dark", "border/strong"),
    // Surface
    ("bg/white", "surface/base"),
    ("bg/light", "surface/subtle"),
    ("bg/medium", "surface/muted"),
    ("bg/heavy", "surface/strong"),
    ("bg/dark", "surface/inverse"),
    // Text
    ("fg/primary", "text/primary"),
    ("fg/secondary", "text/secondary"),
    ("fg/white", "text/inverse"),
    // Intents
    ("primary/default", "intent/primary/bg-base"),
    ("primary/light", "intent/primary/bg-subtle"),
    ("primary/dark", "intent/primary/bg-strong"),
    ("primary/border", "intent/primary/border"),
    ("intent/primary/base", "intent/primary/bg-base"),
    ("intent/primary/subtle", "intent/primary/bg-subtle"),
    ("intent/primary/strong", "intent/primary/bg-strong"),
    ("success/default", "intent/success/bg-base"),
    ("success/light", "intent/success/bg-subtle"),
    ("success/dark", "intent/success/bg-strong"),
    ("success/border", "intent/success/border"),
    ("intent/success/base", "intent/success/bg-base"),
    ("intent/success/subtle", "intent/success/bg-subtle"),
    ("intent/success/strong", "intent/success/bg-strong"),
    ("warning/default", "intent/warning/bg-base"),
    ("warning/light", "intent/warning/bg-subtle"),
    ("warning/dark", "intent/warning/bg-strong"),
    ("warning/border", "intent/warning/border"),
    ("intent/warning/base", "intent/warning/bg-base"),
    ("intent/warning/subtle", "intent/warning/bg-subtle"),
    ("intent/warning/strong", "intent/warning/bg-strong"),
    ("danger/default", "intent/danger/bg-base"),
    ("danger/light", "intent/danger/bg-subtle"),
    ("danger/dark", "intent/danger/bg-strong"),
    ("danger/border", "intent/danger/border"),
    ("intent/danger/base", "intent/danger/bg-base"),
    ("intent/danger/subtle", "intent/danger/bg-subtle"),
    ("intent/danger/strong", "intent/danger/bg-strong"),
    ("info/default", "intent/info/bg-base"),
    ("info/light", "intent/info/bg-subtle"),
    ("info/dark", "intent/info/bg-strong"),
    ("info/border", "intent/info/border"),
    ("intent/info/base", "intent/info/bg-base"),
    ("intent/info/subtle", "intent/info/bg-subtle"),
    ("intent/info/strong", "intent/info/bg-strong"),
    ("intent/neutral/base", "intent/neutral/bg-base"),
    ("intent/neutral/subtle", "intent/neutral/bg-subtle"),
    ("intent/neutral/strong", "intent/neutral/bg-strong"),
]);
