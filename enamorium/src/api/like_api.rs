use actix_web::{get, post, web, HttpResponse};
use charybdis::types::Uuid;
use serde::Deserialize;

use crate::api::data::RequestData;
use crate::api::types::Response;
use crate::models::like::Like;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeParams {
    pub target_user_id: Uuid,
    pub is_liked: bool,
}

#[post("/toggle")]
pub async fn toggle_like(data: RequestData, params: web::Json<ToggleLikeParams>) -> Response {
    let state = Like::toggle(data.store(), &data.current_user, params.target_user_id, params.is_liked).await?;

    Ok(HttpResponse::Ok().json(state))
}

#[get("/ids")]
pub async fn liked_ids(data: RequestData) -> Response {
    let ids = Like::liked_ids(data.store(), &data.current_user).await?;

    Ok(HttpResponse::Ok().json(ids))
}
