use axum::{Extension, body::Bytes, extract::Path};
use http::StatusCode;
use tracing::{instrument, warn};
use validator::Validate;

use crate::{
    App,
    model::vms::{self, NewVirtualMachine, VirtualMachine},
};

use crate::handlers::{ApiResponse, Result, decode_body};

#[utoipa::path(
    get,
    path = "/vms",
    responses(
        (status = 200, description = "List all VMs", body = Vec<VirtualMachine>),
        (status = 500, description = "Internal server error")
    ),
    tag = "vms"
)]
#[instrument(skip(env))]
pub async fn list(Extension(env): Extension<App>) -> Result<ApiResponse<Vec<VirtualMachine>>> {
    let vms = vms::list(env.pool()).await?;
    Ok(ApiResponse {
        data: vms,
        code: StatusCode::OK,
    })
}

#[utoipa::path(
    get,
    path = "/vms/{vm_id}",
    params(
        ("vm_id" = i64, Path, description = "VM identifier")
    ),
    responses(
        (status = 200, description = "VM details", body = VirtualMachine),
        (status = 404, description = "VM not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "vms"
)]
#[instrument(skip(env))]
pub async fn get(
    Extension(env): Extension<App>,
    Path(vm_id): Path<i64>,
) -> Result<ApiResponse<VirtualMachine>> {
    let vm = vms::get(env.pool(), vm_id).await?;
    Ok(ApiResponse {
        data: vm,
        code: StatusCode::OK,
    })
}

#[utoipa::path(
    post,
    path = "/vms",
    request_body = NewVirtualMachine,
    responses(
        (status = 201, description = "VM created successfully", body = VirtualMachine),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "vms"
)]
#[instrument(skip(env, body))]
pub async fn create(
    Extension(env): Extension<App>,
    body: Bytes,
) -> Result<ApiResponse<VirtualMachine>> {
    let vm: NewVirtualMachine = decode_body(&body)?;
    vm.validate()?;

    let vm = vms::create(env.pool(), &vm).await?;
    Ok(ApiResponse {
        data: vm,
        code: StatusCode::CREATED,
    })
}

/// Overwrites the record at `vm_id` and echoes the request under that id.
///
/// The echoed `id` is always the path id; an `id` in the body is ignored.
/// Updating an id that has no row still answers 200: nothing is written and
/// the response describes a record that does not exist.
#[utoipa::path(
    put,
    path = "/vms/{vm_id}",
    params(
        ("vm_id" = i64, Path, description = "VM identifier")
    ),
    request_body = NewVirtualMachine,
    responses(
        (status = 200, description = "VM updated", body = VirtualMachine),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "vms"
)]
#[instrument(skip(env, body))]
pub async fn update(
    Extension(env): Extension<App>,
    Path(vm_id): Path<i64>,
    body: Bytes,
) -> Result<ApiResponse<VirtualMachine>> {
    let vm: NewVirtualMachine = decode_body(&body)?;
    vm.validate()?;

    let affected = vms::update(env.pool(), vm_id, &vm).await?;
    if affected == 0 {
        warn!(vm_id, "Update matched no rows");
    }

    Ok(ApiResponse {
        data: VirtualMachine {
            id: vm_id,
            name: vm.name,
            instance_type: vm.instance_type,
        },
        code: StatusCode::OK,
    })
}

#[utoipa::path(
    delete,
    path = "/vms/{vm_id}",
    params(
        ("vm_id" = i64, Path, description = "VM identifier")
    ),
    responses(
        (status = 200, description = "VM deleted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "vms"
)]
#[instrument(skip(env))]
pub async fn delete(
    Extension(env): Extension<App>,
    Path(vm_id): Path<i64>,
) -> Result<StatusCode> {
    vms::delete(env.pool(), vm_id).await?;
    Ok(StatusCode::OK)
}
