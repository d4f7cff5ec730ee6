use actix_session::Session;
use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::api::current_user::{refresh_current_user, remove_current_user, set_current_user};
use crate::api::types::Response;
use crate::app::App;
use crate::models::user::{CurrentUser, LoginForm, RegisterForm, User};

#[post("")]
pub async fn create_user(app: web::Data<App>, client_session: Session, form: web::Json<RegisterForm>) -> Response {
    let user = User::register(app.store.as_ref(), form.into_inner()).await?;

    let current_user = CurrentUser::from_user(&user);

    client_session.renew();
    set_current_user(&client_session, &current_user)?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User created", "user": current_user })))
}

#[post("/session/login")]
pub async fn login(app: web::Data<App>, client_session: Session, form: web::Json<LoginForm>) -> Response {
    let user = User::authenticate(app.store.as_ref(), form.into_inner()).await?;

    let current_user = CurrentUser::from_user(&user);

    client_session.renew();
    set_current_user(&client_session, &current_user)?;

    Ok(HttpResponse::Ok().json(current_user))
}

#[get("/session/sync")]
pub async fn sync(app: web::Data<App>, client_session: Session, current_user: CurrentUser) -> Response {
    let user = refresh_current_user(&client_session, app.store.as_ref(), &current_user).await?;

    Ok(HttpResponse::Ok().json(CurrentUser::from_user(&user)))
}

#[delete("/session/logout")]
pub async fn logout(client_session: Session) -> Response {
    remove_current_user(&client_session);
    client_session.purge();

    Ok(HttpResponse::Ok().finish())
}
