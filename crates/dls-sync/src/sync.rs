//! Brings a host's semantic variable collection in line with the canonical
//! token definitions.
//!
//! A run has four ordered phases: load both collections, delete deprecated
//! names, reconcile the primitive-aliasing entries, then reconcile the raw
//! (literal) entries. Everything after the load is best effort: a failure on
//! one variable is recorded in the report and the run moves on.

use std::collections::HashMap;

use dls_tokens::{NameMap, SemanticToken, Source, Theme, DEPRECATED_NAMES};
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::report::{IssueReason, Outcome, SyncIssue, SyncReport};
use crate::store::{Operation, VariableStore};
use crate::variable::{
    CollectionId, ModeId, Variable, VariableCollection, VariableType, VariableValue,
};

pub const DEFAULT_SEMANTIC_COLLECTION: &str = "color-semantic";
pub const DEFAULT_PRIMITIVE_COLLECTION: &str = "color-primitives";

/// Remote state gathered by the load phase.
struct Loaded {
    collection: CollectionId,
    /// Theme per mode, in collection order.
    modes: Vec<(Theme, ModeId)>,
    semantic: HashMap<String, Variable>,
    primitives: HashMap<String, Variable>,
}

/// Expected per-mode values for one definition.
type Expected = Vec<(ModeId, VariableValue)>;

pub struct Synchronizer<'a, S> {
    store: &'a S,
    semantic_collection: String,
    primitive_collection: String,
    definitions: Vec<&'static SemanticToken>,
    deprecated: NameMap<'static>,
    dry_run: bool,
}

impl<'a, S: VariableStore> Synchronizer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            semantic_collection: DEFAULT_SEMANTIC_COLLECTION.to_string(),
            primitive_collection: DEFAULT_PRIMITIVE_COLLECTION.to_string(),
            definitions: dls_tokens::canonical_variables(),
            deprecated: DEPRECATED_NAMES,
            dry_run: false,
        }
    }

    pub fn collections(mut self, semantic: impl Into<String>, primitives: impl Into<String>) -> Self {
        self.semantic_collection = semantic.into();
        self.primitive_collection = primitives.into();
        self
    }

    pub fn definitions(mut self, definitions: Vec<&'static SemanticToken>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn deprecated(mut self, deprecated: NameMap<'static>) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Compute the full plan and report without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::new(self.dry_run);
        info!(
            semantic = %self.semantic_collection,
            primitives = %self.primitive_collection,
            dry_run = self.dry_run,
            "Starting variable sync"
        );

        let loaded = self.load(&mut report.issues).await?;

        self.remove_deprecated(&loaded, &mut report).await;

        for token in self.definitions.iter().filter(|t| !t.is_raw()) {
            let outcome = self.reconcile(token, &loaded, &mut report.issues).await;
            report.mode_writes += report.canonical.record(outcome);
        }

        for token in self.definitions.iter().filter(|t| t.is_raw()) {
            let outcome = self.reconcile(token, &loaded, &mut report.issues).await;
            report.mode_writes += report.raw.record(outcome);
        }

        report.finish();
        info!(
            removed = report.removed,
            created = report.created(),
            updated = report.updated(),
            mode_writes = report.mode_writes,
            issues = report.issues.len(),
            dry_run = self.dry_run,
            "Variable sync finished"
        );
        Ok(report)
    }

    // ── Load ───────────────────────────────────────────────────────

    async fn load(&self, issues: &mut Vec<SyncIssue>) -> Result<Loaded, SyncError> {
        let collections = self
            .store
            .list_collections()
            .await
            .map_err(|e| SyncError::Store(e.to_string()))?;

        let find = |name: &str| {
            collections
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| SyncError::MissingCollection(name.to_string()))
        };
        let semantic = find(&self.semantic_collection)?;
        let primitives = find(&self.primitive_collection)?;

        let default_mode = semantic
            .default_mode()
            .ok_or_else(|| SyncError::MissingMode(semantic.name.clone()))?;
        let mut modes = vec![(Theme::Default, default_mode.clone())];
        match semantic.dark_mode() {
            Some(dark) => modes.push((Theme::Dark, dark.clone())),
            None => warn!(
                collection = %semantic.name,
                "Collection has a single mode, dark values will not be written"
            ),
        }

        let semantic_index = self.index(semantic, issues).await;
        let primitive_index = self.index(primitives, issues).await;
        debug!(
            semantic = semantic_index.len(),
            primitives = primitive_index.len(),
            modes = modes.len(),
            "Loaded collections"
        );

        Ok(Loaded {
            collection: semantic.id.clone(),
            modes,
            semantic: semantic_index,
            primitives: primitive_index,
        })
    }

    async fn index(
        &self,
        collection: &VariableCollection,
        issues: &mut Vec<SyncIssue>,
    ) -> HashMap<String, Variable> {
        let mut by_name = HashMap::with_capacity(collection.variable_ids.len());
        for id in &collection.variable_ids {
            match self.store.get_variable(id).await {
                Ok(Some(variable)) => {
                    by_name.insert(variable.name.clone(), variable);
                }
                Ok(None) => debug!(%id, "Listed variable no longer exists"),
                Err(e) => {
                    warn!(%id, error = %e, "Failed to fetch variable");
                    issues.push(SyncIssue::host(id.to_string(), Operation::GetVariable, e));
                }
            }
        }
        by_name
    }

    // ── Deprecated names ───────────────────────────────────────────

    async fn remove_deprecated(&self, loaded: &Loaded, report: &mut SyncReport) {
        for (old, replacement) in self.deprecated.iter() {
            let Some(variable) = loaded.semantic.get(old) else {
                continue;
            };

            if self.dry_run {
                info!(name = old, replacement, "Would remove deprecated variable");
                report.removed += 1;
                continue;
            }

            match self.store.delete_variable(&variable.id).await {
                Ok(()) => {
                    info!(name = old, replacement, "Removed deprecated variable");
                    report.removed += 1;
                }
                Err(e) => {
                    warn!(name = old, error = %e, "Failed to remove deprecated variable");
                    report
                        .issues
                        .push(SyncIssue::host(old, Operation::DeleteVariable, e));
                }
            }
        }
    }

    // ── Canonical and raw entries ──────────────────────────────────

    async fn reconcile(
        &self,
        token: &SemanticToken,
        loaded: &Loaded,
        issues: &mut Vec<SyncIssue>,
    ) -> Outcome {
        let expected = match expected_values(token, loaded) {
            Ok(values) => values,
            Err(primitives) => {
                warn!(name = token.name, missing = ?primitives, "Skipping variable with missing primitives");
                issues.push(SyncIssue {
                    name: token.name.to_string(),
                    reason: IssueReason::MissingPrimitive { primitives },
                });
                return Outcome::Skipped;
            }
        };

        match loaded.semantic.get(token.name) {
            Some(existing) => self.update(token, existing, &expected, issues).await,
            None => self.create(token, &loaded.collection, &expected, issues).await,
        }
    }

    async fn create(
        &self,
        token: &SemanticToken,
        collection: &CollectionId,
        expected: &Expected,
        issues: &mut Vec<SyncIssue>,
    ) -> Outcome {
        if self.dry_run {
            info!(name = token.name, modes = expected.len(), "Would create variable");
            return Outcome::Created {
                writes: expected.len(),
            };
        }

        let variable = match self
            .store
            .create_variable(token.name, collection, VariableType::Color)
            .await
        {
            Ok(variable) => variable,
            Err(e) => {
                warn!(name = token.name, error = %e, "Failed to create variable");
                issues.push(SyncIssue::host(token.name, Operation::CreateVariable, e));
                return Outcome::Failed;
            }
        };

        if !token.description.is_empty() {
            if let Err(e) = self
                .store
                .set_description(&variable.id, token.description)
                .await
            {
                warn!(name = token.name, error = %e, "Failed to set description");
                issues.push(SyncIssue::host(token.name, Operation::SetDescription, e));
            }
        }

        let mut writes = 0;
        for (mode, value) in expected {
            if let Err(e) = self
                .store
                .set_value_for_mode(&variable.id, mode, value.clone())
                .await
            {
                warn!(name = token.name, %mode, error = %e, "Failed to write value, entry left partial");
                issues.push(SyncIssue::host(token.name, Operation::SetValue, e));
                break;
            }
            writes += 1;
        }

        info!(name = token.name, id = %variable.id, writes, "Created variable");
        Outcome::Created { writes }
    }

    async fn update(
        &self,
        token: &SemanticToken,
        existing: &Variable,
        expected: &Expected,
        issues: &mut Vec<SyncIssue>,
    ) -> Outcome {
        let mut writes = 0;
        let mut failures = 0;

        for (mode, value) in expected {
            if existing
                .value_for_mode(mode)
                .is_some_and(|current| current.matches(value))
            {
                continue;
            }

            if !self.dry_run {
                if let Err(e) = self
                    .store
                    .set_value_for_mode(&existing.id, mode, value.clone())
                    .await
                {
                    warn!(name = token.name, %mode, error = %e, "Failed to update value");
                    issues.push(SyncIssue::host(token.name, Operation::SetValue, e));
                    failures += 1;
                    continue;
                }
            }
            debug!(name = token.name, %mode, value = %value, "Mode value written");
            writes += 1;
        }

        match (writes, failures) {
            (0, 0) => {
                debug!(name = token.name, "Variable up to date");
                Outcome::Unchanged
            }
            (0, _) => Outcome::Failed,
            (writes, _) => {
                info!(name = token.name, writes, dry_run = self.dry_run, "Updated variable");
                Outcome::Updated { writes }
            }
        }
    }
}

/// Values `token` should hold in each loaded mode, or the names of every
/// primitive it aliases that the primitive collection lacks.
fn expected_values(token: &SemanticToken, loaded: &Loaded) -> Result<Expected, Vec<String>> {
    let mut values = Vec::with_capacity(loaded.modes.len());
    let mut missing = Vec::new();

    for (theme, mode) in &loaded.modes {
        match token.source(*theme) {
            Source::Alias(primitive) => {
                let name = primitive.name();
                match loaded.primitives.get(&name) {
                    Some(target) => values.push((mode.clone(), VariableValue::alias_to(target))),
                    None if !missing.contains(&name) => missing.push(name),
                    None => {}
                }
            }
            Source::Literal(color) => values.push((mode.clone(), color.into())),
        }
    }

    if missing.is_empty() {
        Ok(values)
    } else {
        Err(missing)
    }
}
