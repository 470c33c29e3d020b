//! HTTP client for the JSON route store.

use async_trait::async_trait;
use routepad_core::{LineString, PersistedRoute, RouteDraft, RouteId, RouteSummary, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::repository::{RouteRepository, UserRoutes, validate_draft};
use crate::{BackendError, ClientConfig, ClientError};

/// [`RouteRepository`] backed by the route store's HTTP API.
pub struct HttpRouteRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserBody,
}

/// `routeIds` and `routeNames` are parallel, index-aligned arrays.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserBody {
    username: String,
    #[serde(default)]
    route_ids: Vec<RouteId>,
    #[serde(default)]
    route_names: Vec<String>,
}

#[derive(Deserialize)]
struct RouteEnvelope {
    route: PersistedRoute,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    user_id: &'a UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_id: Option<&'a RouteId>,
    route: RouteBody<'a>,
}

#[derive(Serialize)]
struct RouteBody<'a> {
    name: &'a str,
    path: &'a LineString,
}

impl UserBody {
    fn into_user_routes(self) -> Result<UserRoutes, ClientError> {
        if self.route_ids.len() != self.route_names.len() {
            return Err(ClientError::Parse(format!(
                "user has {} route ids but {} route names",
                self.route_ids.len(),
                self.route_names.len()
            )));
        }
        let routes = self
            .route_ids
            .into_iter()
            .zip(self.route_names)
            .map(|(id, name)| RouteSummary { id, name })
            .collect();
        Ok(UserRoutes {
            username: self.username,
            routes,
        })
    }
}

impl HttpRouteRepository {
    /// Create a client for the given route store base URL.
    ///
    /// `base_url` should be like `http://localhost:5000` (a trailing slash is dropped).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }
}

/// Read the body as text and map non-2xx statuses.
async fn read_body(resp: reqwest::Response) -> Result<String, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(BackendError::from_status(status.as_u16(), body).into());
    }
    Ok(body)
}

/// Read the body, then decode JSON.
///
/// Decoding happens after the body is fully read so a malformed payload is
/// a `Parse` error rather than a transport error.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = read_body(resp).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Find the id the store assigned to a newly created route.
///
/// Deployments disagree on where it goes: top-level `routeId`, or an echoed
/// `route` carrying `id` or `_id`, as a string or a number.
fn created_route_id(body: &str) -> Result<RouteId, ClientError> {
    let value: Value = serde_json::from_str(body)?;
    [
        value.get("routeId"),
        value.pointer("/route/id"),
        value.pointer("/route/_id"),
    ]
    .into_iter()
    .flatten()
    .find_map(route_id_from)
    .ok_or_else(|| ClientError::Parse("create response carried no route id".into()))
}

fn route_id_from(value: &Value) -> Option<RouteId> {
    match value {
        Value::String(id) if !id.is_empty() => Some(RouteId(id.clone())),
        Value::Number(id) => Some(RouteId(id.to_string())),
        _ => None,
    }
}

#[async_trait]
impl RouteRepository for HttpRouteRepository {
    async fn list_for_user(&self, user: &UserId) -> Result<UserRoutes, ClientError> {
        let url = format!("{}/user", self.base_url);

        info!(url = %url, user = %user, "listing routes");
        let resp = self
            .client
            .get(&url)
            .query(&[("userId", user.0.as_str())])
            .send()
            .await?;
        let envelope: UserEnvelope = read_json(resp).await?;
        let routes = envelope.user.into_user_routes()?;
        info!(count = routes.routes.len(), "listed routes");
        Ok(routes)
    }

    async fn get(&self, route: &RouteId) -> Result<PersistedRoute, ClientError> {
        let url = format!("{}/routes/getRoute", self.base_url);

        info!(url = %url, route = %route, "fetching route");
        let resp = self
            .client
            .get(&url)
            .query(&[("routeId", route.0.as_str())])
            .send()
            .await?;
        let envelope: RouteEnvelope = read_json(resp).await?;
        debug!(points = envelope.route.path.coordinates.len(), "fetched route");
        Ok(envelope.route)
    }

    async fn upsert(&self, user: &UserId, draft: &RouteDraft) -> Result<RouteId, ClientError> {
        let (name, path) = validate_draft(draft)?;
        let endpoint = match draft.id {
            None => "addRoute",
            Some(_) => "saveRoute",
        };
        let url = format!("{}/routes/{}", self.base_url, endpoint);
        let request = SaveRequest {
            user_id: user,
            route_id: draft.id.as_ref(),
            route: RouteBody {
                name: &name,
                path: &path,
            },
        };

        info!(url = %url, user = %user, points = path.coordinates.len(), "saving route");
        let resp = self.client.post(&url).json(&request).send().await?;
        let body = read_body(resp).await?;

        // An update's response body carries nothing we rely on.
        let id = match &draft.id {
            Some(id) => id.clone(),
            None => created_route_id(&body)?,
        };
        info!(route = %id, "route saved");
        Ok(id)
    }
}
