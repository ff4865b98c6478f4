//! Group handlers. Groups are read-only over HTTP.
//!
//! ```text
//! GET /api/v1/groups/
//! GET /api/v1/groups/{id}/
//! ```

use actix_web::{HttpRequest, HttpResponse, get, http::Method, route, web};

use crate::domain::policy::{Operation, Target, enforce};
use crate::domain::{Error, ResourceKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::dto::GroupBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::group_id;

/// List every group.
#[utoipa::path(
    get,
    path = "/api/v1/groups/",
    responses(
        (status = 200, description = "Groups", body = [GroupBody]),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "listGroups"
)]
#[get("/groups/")]
pub async fn list_groups(
    state: web::Data<HttpState>,
    caller: CallerContext,
) -> ApiResult<web::Json<Vec<GroupBody>>> {
    let groups = state.groups.list(caller.caller()).await?;
    Ok(web::Json(groups.into_iter().map(GroupBody::from).collect()))
}

/// Fetch one group.
#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}/",
    params(("id" = i64, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group", body = GroupBody),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "No such group", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "getGroup"
)]
#[get("/groups/{id}/")]
pub async fn get_group(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupBody>> {
    let id = group_id(&path)?;
    let group = state.groups.retrieve(caller.caller(), id).await?;
    Ok(web::Json(GroupBody::from(group)))
}

fn write_operation(method: &Method) -> Operation {
    match *method {
        Method::POST => Operation::Create,
        Method::DELETE => Operation::Delete,
        _ => Operation::Update,
    }
}

fn reject_write(req: &HttpRequest, caller: &CallerContext, target: Target) -> ApiResult<HttpResponse> {
    enforce(caller.caller(), write_operation(req.method()), &target)?;
    // Unreachable while the policy refuses group writes.
    Err(Error::internal("group write unexpectedly allowed"))
}

/// Group collection writes always fail with 405.
#[utoipa::path(
    post,
    path = "/api/v1/groups/",
    responses((status = 405, description = "Groups are read-only", body = ErrorSchema)),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[route("/groups/", method = "POST", method = "PUT", method = "PATCH", method = "DELETE")]
pub async fn write_groups(req: HttpRequest, caller: CallerContext) -> ApiResult<HttpResponse> {
    reject_write(&req, &caller, Target::collection(ResourceKind::Group))
}

/// Group instance writes always fail with 405.
#[utoipa::path(
    put,
    path = "/api/v1/groups/{id}/",
    params(("id" = String, Path, description = "Group identifier")),
    responses((status = 405, description = "Groups are read-only", body = ErrorSchema)),
    tags = ["groups"],
    operation_id = "updateGroup"
)]
#[route(
    "/groups/{id}/",
    method = "POST",
    method = "PUT",
    method = "PATCH",
    method = "DELETE"
)]
pub async fn write_group(req: HttpRequest, caller: CallerContext) -> ApiResult<HttpResponse> {
    reject_write(&req, &caller, Target::instance(ResourceKind::Group))
}
