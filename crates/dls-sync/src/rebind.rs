//! Moves paint and effect bindings from legacy variables onto their 4-layer
//! replacements.

use std::collections::HashMap;

use dls_tokens::{NameMap, LEGACY_BINDINGS};
use tracing::{debug, info, warn};

use crate::document::{ColorBinding, Document, Node, PaintKind};
use crate::error::SyncError;
use crate::report::{BindingKind, RebindReport, TouchedNode};
use crate::store::VariableStore;
use crate::sync::DEFAULT_SEMANTIC_COLLECTION;
use crate::variable::VariableId;

/// Which part of the document to walk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RebindScope {
    #[default]
    AllPages,
    Page(String),
}

/// Name and id lookups for the rebinding targets.
struct Targets<'m> {
    map: NameMap<'m>,
    name_of: HashMap<VariableId, String>,
    id_of: HashMap<String, VariableId>,
}

impl Targets<'_> {
    /// The variable a binding to `current` should move to, if any.
    fn replacement(&self, current: &VariableId) -> Option<&VariableId> {
        let name = self.name_of.get(current)?;
        let target_name = self.map.get(name)?;
        let target = self.id_of.get(target_name)?;
        (target != current).then_some(target)
    }

    fn rebind_all<'b, B: ColorBinding + 'b>(
        &self,
        bindings: impl Iterator<Item = &'b mut B>,
    ) -> usize {
        let mut changed = 0;
        for binding in bindings {
            let Some(current) = binding.bound_color() else {
                continue;
            };
            if let Some(target) = self.replacement(current) {
                let target = target.clone();
                binding.bind_color(target);
                changed += 1;
            }
        }
        changed
    }
}

pub struct Rebinder<'a, S> {
    store: &'a S,
    collection: String,
    map: NameMap<'static>,
    scope: RebindScope,
}

impl<'a, S: VariableStore> Rebinder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            collection: DEFAULT_SEMANTIC_COLLECTION.to_string(),
            map: LEGACY_BINDINGS,
            scope: RebindScope::AllPages,
        }
    }

    /// Collection searched for both the currently bound and the target
    /// variables.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    pub fn map(mut self, map: NameMap<'static>) -> Self {
        self.map = map;
        self
    }

    pub fn scope(mut self, scope: RebindScope) -> Self {
        self.scope = scope;
        self
    }

    pub async fn run(&self, document: &mut Document) -> Result<RebindReport, SyncError> {
        let targets = self.load().await?;
        let mut report = RebindReport::default();

        match &self.scope {
            RebindScope::AllPages => {
                for page in &mut document.pages {
                    rebind_page(page, &targets, &mut report);
                }
            }
            RebindScope::Page(id) => match document.page_mut(id) {
                Some(page) => rebind_page(page, &targets, &mut report),
                None => warn!(page = %id, "Page not found, nothing rebound"),
            },
        }

        info!(
            fills = report.fills,
            strokes = report.strokes,
            effects = report.effects,
            nodes = report.touched.len(),
            "Rebind finished"
        );
        Ok(report)
    }

    async fn load(&self) -> Result<Targets<'static>, SyncError> {
        let collections = self
            .store
            .list_collections()
            .await
            .map_err(|e| SyncError::Store(e.to_string()))?;
        let collection = collections
            .iter()
            .find(|c| c.name == self.collection)
            .ok_or_else(|| SyncError::MissingCollection(self.collection.clone()))?;

        let mut name_of = HashMap::new();
        let mut id_of = HashMap::new();
        for id in &collection.variable_ids {
            match self.store.get_variable(id).await {
                Ok(Some(variable)) => {
                    id_of.insert(variable.name.clone(), variable.id.clone());
                    name_of.insert(variable.id, variable.name);
                }
                Ok(None) => {}
                Err(e) => warn!(%id, error = %e, "Failed to fetch variable"),
            }
        }
        debug!(variables = id_of.len(), "Loaded rebind targets");

        Ok(Targets {
            map: self.map,
            name_of,
            id_of,
        })
    }
}

fn rebind_page(page: &mut Node, targets: &Targets<'_>, report: &mut RebindReport) {
    debug!(page = %page.name, "Rebinding page");
    page.walk_mut(&mut |node| rebind_node(node, targets, report));
}

fn rebind_node(node: &mut Node, targets: &Targets<'_>, report: &mut RebindReport) {
    if let Some(fills) = node.fills.as_mut() {
        let n = targets.rebind_all(fills.iter_mut().filter(|p| p.kind == PaintKind::Solid));
        report.fills += n;
        touch(report, node, BindingKind::Fills, n);
    }
    if let Some(strokes) = node.strokes.as_mut() {
        let n = targets.rebind_all(strokes.iter_mut().filter(|p| p.kind == PaintKind::Solid));
        report.strokes += n;
        touch(report, node, BindingKind::Strokes, n);
    }
    let n = targets.rebind_all(node.effects.iter_mut().filter(|e| e.kind.is_shadow()));
    report.effects += n;
    touch(report, node, BindingKind::Effects, n);
}

fn touch(report: &mut RebindReport, node: &Node, binding: BindingKind, changed: usize) {
    if changed > 0 {
        debug!(node = %node.id, ?binding, changed, "Rebound");
        report.touched.push(TouchedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            binding,
        });
    }
}
