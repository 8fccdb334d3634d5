use std::collections::HashMap;

use reqwest::Client;
use tokio::sync::RwLock;
use url::Url;

use super::error::FigmaError;
use super::types::{
    LocalVariablesResponse, PostVariablesResponse, VariableChange, VariableModeValue,
    VariablesRequest,
};
use crate::store::VariableStore;
use crate::variable::{
    CollectionId, ModeId, Variable, VariableCollection, VariableId, VariableType, VariableValue,
};

const BASE_URL: &str = "https://api.figma.com";

/// Temporary id used when creating a variable; the response maps it to the
/// real one.
const TEMP_ID: &str = "dls_new_variable";

/// Local variables as of the last fetch, kept current with our own writes.
#[derive(Debug, Default)]
struct LocalState {
    collections: Vec<VariableCollection>,
    variables: HashMap<VariableId, Variable>,
}

/// Figma REST variables API client for one file.
pub struct FigmaClient {
    base: Url,
    file_key: String,
    token: String,
    http: Client,
    state: RwLock<Option<LocalState>>,
}

impl FigmaClient {
    pub fn new(file_key: impl Into<String>, token: impl Into<String>) -> Result<Self, FigmaError> {
        Self::with_base_url(BASE_URL, file_key, token)
    }

    pub fn with_base_url(
        base: &str,
        file_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, FigmaError> {
        Ok(Self {
            base: Url::parse(base)?,
            file_key: file_key.into(),
            token: token.into(),
            http: Client::new(),
            state: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FigmaError> {
        Ok(self
            .base
            .join(&format!("v1/files/{}/{path}", self.file_key))?)
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FigmaError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Figma API error");
            Err(FigmaError::Api {
                status,
                message: body,
            })
        }
    }

    /// Fetch every local (non-library) collection and variable.
    pub async fn refresh(&self) -> Result<(), FigmaError> {
        let resp = self
            .http
            .get(self.endpoint("variables/local")?)
            .header("X-Figma-Token", &self.token)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: LocalVariablesResponse = resp
            .json()
            .await
            .map_err(|e| FigmaError::Parse(e.to_string()))?;

        let mut collections: Vec<VariableCollection> = body
            .meta
            .variable_collections
            .into_values()
            .filter(|c| !c.remote)
            .map(|c| c.into_collection())
            .collect();
        collections.sort_by(|a, b| a.name.cmp(&b.name));

        let variables: HashMap<_, _> = body
            .meta
            .variables
            .into_values()
            .filter(|v| !v.remote)
            .map(|v| (v.variable.id.clone(), v.variable))
            .collect();

        tracing::debug!(
            collections = collections.len(),
            variables = variables.len(),
            "Fetched local variables"
        );
        *self.state.write().await = Some(LocalState {
            collections,
            variables,
        });
        Ok(())
    }

    async fn post(&self, body: &VariablesRequest) -> Result<PostVariablesResponse, FigmaError> {
        let resp = self
            .http
            .post(self.endpoint("variables")?)
            .header("X-Figma-Token", &self.token)
            .json(body)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| FigmaError::Parse(e.to_string()))
    }

    /// Apply `f` to the cached copy of `id`, if both the cache and the
    /// variable exist.
    async fn update_cached(&self, id: &VariableId, f: impl FnOnce(&mut Variable)) {
        if let Some(state) = self.state.write().await.as_mut() {
            if let Some(variable) = state.variables.get_mut(id) {
                f(variable);
            }
        }
    }
}

impl VariableStore for FigmaClient {
    type Error = FigmaError;

    async fn list_collections(&self) -> Result<Vec<VariableCollection>, FigmaError> {
        self.refresh().await?;
        Ok(self
            .state
            .read()
            .await
            .as_ref()
            .map(|s| s.collections.clone())
            .unwrap_or_default())
    }

    async fn get_variable(&self, id: &VariableId) -> Result<Option<Variable>, FigmaError> {
        if self.state.read().await.is_none() {
            self.refresh().await?;
        }
        Ok(self
            .state
            .read()
            .await
            .as_ref()
            .and_then(|s| s.variables.get(id).cloned()))
    }

    async fn create_variable(
        &self,
        name: &str,
        collection: &CollectionId,
        resolved_type: VariableType,
    ) -> Result<Variable, FigmaError> {
        let body = VariablesRequest::change(VariableChange::create(
            TEMP_ID,
            name,
            collection,
            resolved_type,
        ));
        let resp = self.post(&body).await?;
        let id = resp
            .meta
            .temp_id_to_real_id
            .get(TEMP_ID)
            .cloned()
            .ok_or_else(|| FigmaError::Parse(format!("no id returned for created {name}")))?;

        let variable = Variable {
            id: VariableId(id),
            name: name.to_string(),
            variable_collection_id: collection.clone(),
            resolved_type,
            description: String::new(),
            values_by_mode: Default::default(),
            extra: Default::default(),
        };
        if let Some(state) = self.state.write().await.as_mut() {
            if let Some(c) = state.collections.iter_mut().find(|c| &c.id == collection) {
                c.variable_ids.push(variable.id.clone());
            }
            state
                .variables
                .insert(variable.id.clone(), variable.clone());
        }
        Ok(variable)
    }

    async fn set_value_for_mode(
        &self,
        id: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> Result<(), FigmaError> {
        let body = VariablesRequest::mode_value(VariableModeValue {
            variable_id: id.clone(),
            mode_id: mode.clone(),
            value: value.clone(),
        });
        self.post(&body).await?;
        self.update_cached(id, |v| {
            v.values_by_mode.insert(mode.clone(), value);
        })
        .await;
        Ok(())
    }

    async fn set_description(&self, id: &VariableId, description: &str) -> Result<(), FigmaError> {
        self.post(&VariablesRequest::change(VariableChange::describe(
            id,
            description,
        )))
        .await?;
        self.update_cached(id, |v| v.description = description.to_string())
            .await;
        Ok(())
    }

    async fn delete_variable(&self, id: &VariableId) -> Result<(), FigmaError> {
        self.post(&VariablesRequest::change(VariableChange::delete(id)))
            .await?;
        if let Some(state) = self.state.write().await.as_mut() {
            state.variables.remove(id);
            for c in &mut state.collections {
                c.variable_ids.retain(|v| v != id);
            }
        }
        Ok(())
    }
}
