use crate::store::{KeyValueStore, TOKEN_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Owner,
    Repo,
    Branch,
    Token,
}

impl FieldName {
    pub const ALL: &[FieldName] = &[
        FieldName::Owner,
        FieldName::Repo,
        FieldName::Branch,
        FieldName::Token,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Owner => "Owner",
            FieldName::Repo => "Repository Name",
            FieldName::Branch => "Branch Name",
            FieldName::Token => "Api Token",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FieldName::Owner => 0,
            FieldName::Repo => 1,
            FieldName::Branch => 2,
            FieldName::Token => 3,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => FieldName::Owner,
            1 => FieldName::Repo,
            2 => FieldName::Branch,
            _ => FieldName::Token,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldTuple {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: String,
}

impl std::fmt::Debug for FieldTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldTuple")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl FieldTuple {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Owner => &self.owner,
            FieldName::Repo => &self.repo,
            FieldName::Branch => &self.branch,
            FieldName::Token => &self.token,
        }
    }

    fn slot_mut(&mut self, name: FieldName) -> &mut String {
        match name {
            FieldName::Owner => &mut self.owner,
            FieldName::Repo => &mut self.repo,
            FieldName::Branch => &mut self.branch,
            FieldName::Token => &mut self.token,
        }
    }

    pub fn is_complete(&self) -> bool {
        FieldName::ALL.iter().all(|name| !self.get(*name).is_empty())
    }

    pub fn repo_path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Drafts shown in the inputs plus the committed tuple the lookup reads.
pub struct InputForm {
    drafts: [String; 4],
    committed: FieldTuple,
    pub focused: FieldName,
    store: Box<dyn KeyValueStore>,
}

impl InputForm {
    /// Reads the persisted token once; `fallback_token` is used when the slot is empty.
    pub fn new(store: Box<dyn KeyValueStore>, fallback_token: Option<&str>) -> Self {
        let token = store
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .or_else(|| fallback_token.filter(|t| !t.is_empty()).map(String::from))
            .unwrap_or_default();

        let mut drafts: [String; 4] = Default::default();
        drafts[FieldName::Token.index()] = token.clone();

        Self {
            drafts,
            committed: FieldTuple {
                token,
                ..FieldTuple::default()
            },
            focused: FieldName::Owner,
            store,
        }
    }

    pub fn tuple(&self) -> &FieldTuple {
        &self.committed
    }

    pub fn draft(&self, name: FieldName) -> &str {
        &self.drafts[name.index()]
    }

    /// Pre-fills a field as if the user typed it and committed.
    pub fn prefill(&mut self, name: FieldName, value: &str) {
        self.drafts[name.index()] = value.to_string();
        self.commit_field(name, value);
    }

    pub fn commit_field(&mut self, name: FieldName, value: &str) {
        *self.committed.slot_mut(name) = value.to_string();

        if name == FieldName::Token && !value.is_empty() {
            if let Err(e) = self.store.set(TOKEN_KEY, value) {
                tracing::warn!(error = %e, "Failed to persist token");
            }
        }
    }

    pub fn commit_focused(&mut self) {
        let name = self.focused;
        let value = self.drafts[name.index()].clone();
        self.commit_field(name, &value);
    }

    /// Moving focus blurs the current field, which commits it.
    pub fn focus(&mut self, name: FieldName) {
        if name == self.focused {
            return;
        }
        self.commit_focused();
        self.focused = name;
    }

    pub fn push_char(&mut self, c: char) {
        self.drafts[self.focused.index()].push(c);
    }

    pub fn backspace(&mut self) {
        self.drafts[self.focused.index()].pop();
    }

    pub fn clear_draft(&mut self) {
        self.drafts[self.focused.index()].clear();
    }
}
