use std::path::Path;

use clap::ValueEnum;
use dls_sync::{
    FigmaClient, MemoryStore, RebindReport, RebindScope, Rebinder, Snapshot, SyncReport,
    Synchronizer, VariableStore,
};
use dls_tokens::Theme;
use serde_json::Value;
use tracing::info;

use crate::config::DlsConfig;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layer {
    All,
    Semantic,
    Component,
}

/// The token export, narrowed to one layer and/or theme.
pub fn tokens_json(theme: Option<Theme>, layer: Layer) -> Result<Value, CliError> {
    let tokens = dls_tokens::tokens();
    let value = match (layer, theme) {
        (Layer::Semantic, Some(t)) => serde_json::to_value(dls_tokens::semantic(t))?,
        (Layer::Semantic, None) => serde_json::to_value(&tokens.semantic)?,
        (Layer::Component, Some(t)) => serde_json::to_value(dls_tokens::component(t))?,
        (Layer::Component, None) => serde_json::to_value(&tokens.component)?,
        (Layer::All, None) => serde_json::to_value(tokens)?,
        (Layer::All, Some(t)) => {
            let mut value = serde_json::to_value(tokens)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("semantic".into(), serde_json::to_value(dls_tokens::semantic(t))?);
                obj.insert("component".into(), serde_json::to_value(dls_tokens::component(t))?);
            }
            value
        }
    };
    Ok(value)
}

async fn run_sync<S: VariableStore>(
    store: &S,
    config: &DlsConfig,
    dry_run: bool,
) -> Result<SyncReport, CliError> {
    let report = Synchronizer::new(store)
        .collections(&config.collections.semantic, &config.collections.primitives)
        .dry_run(dry_run)
        .run()
        .await?;
    Ok(report)
}

/// Sync a snapshot file, writing the result back unless `dry_run`.
pub async fn sync_snapshot(
    config: &DlsConfig,
    path: &Path,
    dry_run: bool,
) -> Result<SyncReport, CliError> {
    let mut snapshot = Snapshot::load(path)?;
    let store = MemoryStore::from_snapshot(&snapshot);
    let report = run_sync(&store, config, dry_run).await?;
    if !dry_run {
        store.update(&mut snapshot);
        snapshot.save(path)?;
        info!(path = %path.display(), "Snapshot updated");
    }
    Ok(report)
}

pub async fn sync_remote(
    config: &DlsConfig,
    file_key: &str,
    dry_run: bool,
) -> Result<SyncReport, CliError> {
    let token = std::env::var(&config.figma.token_env)
        .map_err(|_| CliError::MissingToken(config.figma.token_env.clone()))?;
    let client = FigmaClient::with_base_url(&config.figma.api_base, file_key, token)?;
    run_sync(&client, config, dry_run).await
}

/// Rebind the snapshot's document, writing it back unless `dry_run`.
pub async fn rebind_snapshot(
    config: &DlsConfig,
    path: &Path,
    page: Option<String>,
    dry_run: bool,
) -> Result<RebindReport, CliError> {
    let mut snapshot = Snapshot::load(path)?;
    let store = MemoryStore::from_snapshot(&snapshot);
    let scope = page.map_or(RebindScope::AllPages, RebindScope::Page);

    let report = Rebinder::new(&store)
        .collection(&config.collections.semantic)
        .scope(scope)
        .run(&mut snapshot.document)
        .await?;

    if !dry_run && report.total() > 0 {
        snapshot.save(path)?;
        info!(path = %path.display(), "Snapshot updated");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dls_sync::variable::{VariableType, VariableValue};
    use dls_sync::{Document, DEFAULT_PRIMITIVE_COLLECTION, DEFAULT_SEMANTIC_COLLECTION};

    fn config() -> DlsConfig {
        DlsConfig::from_user_toml("").unwrap()
    }

    /// Snapshot with every primitive and an empty semantic collection.
    async fn write_snapshot(path: &Path, document: Document) {
        let store = MemoryStore::default();
        let prims = store.add_collection(DEFAULT_PRIMITIVE_COLLECTION, &["Value"]);
        store.add_collection(DEFAULT_SEMANTIC_COLLECTION, &["Default", "Dark"]);
        for primitive in dls_tokens::primitives() {
            let var = store
                .create_variable(&primitive.name(), &prims, VariableType::Color)
                .await
                .unwrap();
            store
                .set_value_for_mode(&var.id, &"1:0".into(), primitive.value.into())
                .await
                .unwrap();
        }
        store.snapshot(document).save(path).unwrap();
    }

    #[test]
    fn test_tokens_layers() {
        let all = tokens_json(None, Layer::All).unwrap();
        assert!(all["semantic"]["dark"].is_object());

        let dark = tokens_json(Some(Theme::Dark), Layer::All).unwrap();
        assert_eq!(dark["semantic"]["surface"]["base"], "#0A0D12");
        assert!(dark["color"].is_object());

        let component = tokens_json(Some(Theme::Default), Layer::Component).unwrap();
        assert!(component["accordion"].is_object());
        assert!(component.get("semantic").is_none());
    }

    #[tokio::test]
    async fn test_sync_snapshot_writes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_snapshot(&path, Document::default()).await;

        let dry = sync_snapshot(&config(), &path, true).await.unwrap();
        assert_eq!(dry.created(), 58);
        let untouched = Snapshot::load(&path).unwrap();
        assert_eq!(untouched.variables.len(), dls_tokens::primitives().count());

        let report = sync_snapshot(&config(), &path, false).await.unwrap();
        assert!(report.issues.is_empty());
        let synced = Snapshot::load(&path).unwrap();
        assert_eq!(
            synced.variables.len(),
            dls_tokens::primitives().count() + 58
        );

        let again = sync_snapshot(&config(), &path, false).await.unwrap();
        assert!(again.is_noop());
    }

    #[tokio::test]
    async fn test_rebind_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_snapshot(&path, Document::default()).await;
        sync_snapshot(&config(), &path, false).await.unwrap();

        let mut snapshot = Snapshot::load(&path).unwrap();
        let semantic = snapshot
            .collections
            .iter()
            .find(|c| c.name == DEFAULT_SEMANTIC_COLLECTION)
            .unwrap()
            .id
            .clone();
        let store = MemoryStore::from_snapshot(&snapshot);
        let legacy = store
            .create_variable("bg/white", &semantic, VariableType::Color)
            .await
            .unwrap();
        let target = store.find(&semantic, "surface/base").unwrap();
        snapshot = store.snapshot(
            serde_json::from_value(serde_json::json!({"pages": [{
                "id": "0:1", "type": "PAGE",
                "children": [{"id": "1:1", "opacity": 0.5, "fills": [{
                    "type": "SOLID",
                    "visible": true,
                    "boundVariables": {"color": VariableValue::alias_to(&legacy)}
                }]}]
            }]}))
            .unwrap(),
        );
        snapshot.save(&path).unwrap();

        let report = rebind_snapshot(&config(), &path, None, false).await.unwrap();
        assert_eq!(report.fills, 1);

        let saved = Snapshot::load(&path).unwrap();
        let fill = &saved.document.pages[0].children[0].fills.as_ref().unwrap()[0];
        let bound = fill.bound_variables.as_ref().unwrap().color.as_ref().unwrap();
        assert_eq!(bound.id, target.id);
        assert_eq!(fill.extra["visible"], true);
        assert_eq!(saved.document.pages[0].children[0].extra["opacity"], 0.5);
    }

    #[tokio::test]
    async fn test_remote_sync_needs_token() {
        let mut config = config();
        config.figma.token_env = "DLS_TEST_TOKEN_THAT_IS_NEVER_SET".into();
        let result = sync_remote(&config, "key", true).await;
        assert!(matches!(result, Err(CliError::MissingToken(_))));
    }
}
