use actix_web::{get, web, HttpResponse};
use charybdis::types::Uuid;

use crate::api::data::RequestData;
use crate::api::types::Response;
use crate::models::user::Member;

#[get("")]
pub async fn get_members(data: RequestData) -> Response {
    let members = Member::all_except(data.store(), &data.current_user).await?;

    Ok(HttpResponse::Ok().json(members))
}

#[get("/{id}")]
pub async fn get_member(data: RequestData, id: web::Path<Uuid>) -> Response {
    let member = Member::fetch(data.store(), id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(member))
}
