use crate::{App, errors::Error};
use axum::{
    Extension, Json, Router,
    body::Body,
    response::{self, IntoResponse, Response},
    routing::get,
};
use http::{Request, StatusCode, header::HeaderName};
use serde::{Serialize, de::DeserializeOwned};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;

mod vm;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Decode a JSON request body regardless of the declared content type.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        vm::handler::list,
        vm::handler::get,
        vm::handler::create,
        vm::handler::update,
        vm::handler::delete,
    ),
    components(
        schemas(
            crate::model::vms::VirtualMachine,
            crate::model::vms::NewVirtualMachine,
        )
    ),
    tags(
        (name = "vms", description = "Virtual machine record management endpoints")
    ),
    info(
        title = "fakecloud API",
        version = "0.1.0",
        description = "REST API for managing virtual machine records"
    )
)]
pub struct ApiDoc;

pub fn app(env: App) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");
    Router::new()
        .merge(vms())
        .route("/api-docs/openapi.json", get(openapi))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .extensions()
                                .get::<RequestId>()
                                .map(|value| value.header_value().to_str().unwrap_or_default())
                                .unwrap_or_default();

                            tracing::info_span!(
                                "HTTP",
                                http.method = %request.method(),
                                http.url = %request.uri(),
                                request_id = %request_id,
                            )
                        })
                        .on_request(|request: &Request<Body>, _span: &Span| {
                            tracing::info!(
                                headers = ?request.headers(),
                                "Received {} request for {}",
                                request.method(),
                                request.uri().path(),
                            );
                        }),
                ),
        )
        .layer(Extension(env))
}

fn vms() -> Router {
    Router::new()
        .route("/vms", get(vm::handler::list).post(vm::handler::create))
        .route(
            "/vms/{vm_id}",
            get(vm::handler::get)
                .put(vm::handler::update)
                .delete(vm::handler::delete),
        )
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub struct ApiResponse<T> {
    data: T,
    code: StatusCode,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Send + Sync + Serialize,
{
    fn into_response(self) -> Response {
        let mut response = response::Json(self.data).into_response();

        *response.status_mut() = self.code;
        response
    }
}

// Errors go out as plain text carrying the underlying message
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("API error: {:?}", self);
        (self.status_code(), self.to_string()).into_response()
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        use Error::*;

        match self {
            Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MalformedBody(_) | InvalidEntity(_) => StatusCode::BAD_REQUEST,
            NotFound => StatusCode::NOT_FOUND,
        }
    }
}
