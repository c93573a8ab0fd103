//! Per-entity REST services.
//!
//! | Method   | Path                   | Returns |
//! |----------|------------------------|---------|
//! | `GET`    | `/api/{resource}`      | page of records, `link` + `X-Total-Count` headers |
//! | `POST`   | `/api/{resource}`      | `201` + persisted record |
//! | `GET`    | `/api/{resource}/{id}` | record |
//! | `PUT`    | `/api/{resource}/{id}` | updated record |
//! | `PATCH`  | `/api/{resource}/{id}` | updated record (merge patch) |
//! | `DELETE` | `/api/{resource}/{id}` | `204`, empty body |

use std::marker::PhantomData;

use practice_core::{
  Entity,
  page::{Links, Page, PageRequest},
};
use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use tracing::info;

use crate::{
  client::ApiClient,
  error::{ClientError, Result},
};

const MERGE_PATCH: &str = "application/merge-patch+json";
const TOTAL_COUNT: &str = "x-total-count";

/// A response status together with its decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
  pub status: StatusCode,
  pub body:   T,
}

/// Anything that can delete a record by id. Implemented by
/// [`EntityService`]; the delete dialog only needs this much.
pub trait DeleteService<Id> {
  async fn delete(&self, id: &Id) -> Result<ApiResponse<()>>;
}

impl<S, Id> DeleteService<Id> for &S
where
  S: DeleteService<Id>,
{
  async fn delete(&self, id: &Id) -> Result<ApiResponse<()>> {
    (**self).delete(id).await
  }
}

/// REST operations for records of type `E`.
#[derive(Debug, Clone)]
pub struct EntityService<E> {
  client:  ApiClient,
  _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityService<E> {
  pub fn new(client: ApiClient) -> Self {
    Self { client, _entity: PhantomData }
  }

  fn collection_path() -> String { format!("/{}", E::RESOURCE) }

  fn record_request(&self, method: Method, id: &E::Id) -> Result<RequestBuilder> {
    let url = self.client.record_url(E::RESOURCE, &id.to_string())?;
    Ok(self.client.request_url(method, url))
  }

  fn require_id(record: &E) -> Result<&E::Id> {
    record.id().ok_or(ClientError::MissingId(E::NAME))
  }

  async fn decode(resp: Response) -> Result<ApiResponse<E>> {
    let status = resp.status();
    let body = resp.json().await.map_err(ClientError::Decode)?;
    Ok(ApiResponse { status, body })
  }

  /// `POST /api/{resource}`. The server assigns the identifier.
  pub async fn create(&self, record: &E) -> Result<ApiResponse<E>> {
    if E::SERVER_ASSIGNS_ID && !record.is_new() {
      return Err(ClientError::AlreadyPersisted(E::NAME));
    }
    let req = self
      .client
      .request(Method::POST, &Self::collection_path())
      .json(record);
    let resp = Self::decode(self.client.send(Method::POST, req).await?).await?;
    info!(entity = E::NAME, id = ?resp.body.id(), "created");
    Ok(resp)
  }

  /// `PUT /api/{resource}/{id}`; the identifier is preserved.
  pub async fn update(&self, record: &E) -> Result<ApiResponse<E>> {
    self.write(Method::PUT, record, "application/json").await
  }

  /// `PATCH /api/{resource}/{id}` as a JSON merge patch.
  pub async fn partial_update(&self, record: &E) -> Result<ApiResponse<E>> {
    self.write(Method::PATCH, record, MERGE_PATCH).await
  }

  async fn write(&self, method: Method, record: &E, content_type: &str) -> Result<ApiResponse<E>> {
    if !E::UPDATABLE {
      return Err(ClientError::NotUpdatable(E::NAME));
    }
    let id = Self::require_id(record)?;
    let body = serde_json::to_vec(record).map_err(practice_core::Error::from)?;
    let req = self
      .record_request(method.clone(), id)?
      .header(header::CONTENT_TYPE, content_type)
      .body(body);
    let resp = Self::decode(self.client.send(method, req).await?).await?;
    info!(entity = E::NAME, %id, "updated");
    Ok(resp)
  }

  /// `GET /api/{resource}/{id}`
  pub async fn find(&self, id: &E::Id) -> Result<ApiResponse<E>> {
    let req = self.record_request(Method::GET, id)?;
    Self::decode(self.client.send(Method::GET, req).await?).await
  }

  /// `GET /api/{resource}?page=&size=&sort=`
  pub async fn query(&self, page: &PageRequest) -> Result<ApiResponse<Page<E>>> {
    let req = self
      .client
      .request(Method::GET, &Self::collection_path())
      .query(&page.to_query());
    let resp = self.client.send(Method::GET, req).await?;
    let status = resp.status();

    let links = match resp.headers().get(header::LINK) {
      Some(value) => Links::parse(value.to_str().unwrap_or_default())?,
      None => Links::default(),
    };
    let total_count = resp
      .headers()
      .get(TOTAL_COUNT)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.parse().ok());
    let items: Vec<E> = resp.json().await.map_err(ClientError::Decode)?;

    Ok(ApiResponse {
      status,
      body: Page { items, links, total_count },
    })
  }
}

impl<E: Entity> DeleteService<E::Id> for EntityService<E> {
  /// `DELETE /api/{resource}/{id}`
  async fn delete(&self, id: &E::Id) -> Result<ApiResponse<()>> {
    let req = self.record_request(Method::DELETE, id)?;
    let resp = self.client.send(Method::DELETE, req).await?;
    info!(entity = E::NAME, %id, "deleted");
    Ok(ApiResponse { status: resp.status(), body: () })
  }
}
