//! HTTP handlers exposing a [`Resource`] as a JSON CSUGR endpoint.
//!
//! | Method   | Path    | Operation |
//! |----------|---------|-----------|
//! | `POST`   | `/`     | create    |
//! | `GET`    | `/`     | search    |
//! | `PATCH`  | `/{id}` | update    |
//! | `GET`    | `/{id}` | get       |
//! | `DELETE` | `/{id}` | remove    |

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Scope, delete, get, patch, post, web};
use log::error;
use serde_json::Value;

use crate::resource::request::ResourceRequest;
use crate::resource::response::{ResourceResponse, Status};
use crate::resource::{Operation, Resource};
use crate::services::ServiceResult;

pub mod search;

/// Mount `resource` under `path`.
pub fn resource_scope(path: &str, resource: Resource) -> Scope {
    web::scope(path)
        .app_data(web::Data::new(resource))
        .service(create_document)
        .service(search_documents)
        .service(update_document)
        .service(get_document)
        .service(remove_document)
}

/// Framework independent copy of the request. Bodies that are not valid JSON
/// become `null`.
pub fn to_resource_request(req: &HttpRequest, body: &[u8]) -> ResourceRequest {
    let mut resource_req = ResourceRequest::new().query_string(req.query_string());

    for (name, value) in req.match_info().iter() {
        resource_req = resource_req.param(name, value);
    }

    if !body.is_empty() {
        resource_req = resource_req.body(serde_json::from_slice(body).unwrap_or(Value::Null));
    }

    resource_req
}

fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::Created => StatusCode::CREATED,
        Status::NoContent => StatusCode::NO_CONTENT,
        Status::BadRequest => StatusCode::BAD_REQUEST,
        Status::NotFound => StatusCode::NOT_FOUND,
        Status::Conflict => StatusCode::CONFLICT,
    }
}

fn respond(op: Operation, result: ServiceResult<ResourceResponse>) -> HttpResponse {
    match result {
        Ok(res) => {
            let mut builder = HttpResponse::build(status_code(res.status));
            match res.body {
                Some(body) => builder.json(body),
                None => builder.finish(),
            }
        }
        Err(e) => {
            error!("Failed to {op} document: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("")]
pub async fn create_document(
    req: HttpRequest,
    body: web::Bytes,
    resource: web::Data<Resource>,
) -> impl Responder {
    let result = resource.create(to_resource_request(&req, &body)).await;
    respond(Operation::Create, result)
}

#[get("")]
pub async fn search_documents(req: HttpRequest, resource: web::Data<Resource>) -> impl Responder {
    let result = resource.search(to_resource_request(&req, &[])).await;
    respond(Operation::Search, result)
}

#[patch("/{id}")]
pub async fn update_document(
    req: HttpRequest,
    body: web::Bytes,
    resource: web::Data<Resource>,
) -> impl Responder {
    let result = resource.update(to_resource_request(&req, &body)).await;
    respond(Operation::Update, result)
}

#[get("/{id}")]
pub async fn get_document(req: HttpRequest, resource: web::Data<Resource>) -> impl Responder {
    let result = resource.get(to_resource_request(&req, &[])).await;
    respond(Operation::Get, result)
}

#[delete("/{id}")]
pub async fn remove_document(req: HttpRequest, resource: web::Data<Resource>) -> impl Responder {
    let result = resource.remove(to_resource_request(&req, &[])).await;
    respond(Operation::Remove, result)
}
