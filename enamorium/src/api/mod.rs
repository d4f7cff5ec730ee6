mod like_api;
mod member_api;
mod request;
mod types;
mod user_api;

pub use request::{current_user, data};

use actix_web::web;
use like_api::*;
use member_api::*;
use user_api::*;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(create_user)
            .service(login)
            .service(sync)
            .service(logout),
    )
    .service(web::scope("/members").service(get_members).service(get_member))
    .service(web::scope("/likes").service(toggle_like).service(liked_ids));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, Config};
    use crate::store::MemoryStore;
    use actix_http::Request;
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test, App as ActixWebApp, Error};
    use charybdis::types::Uuid;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn test_service(
        store: Arc<MemoryStore>,
    ) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
        let app = web::Data::new(App::with_store(Config::test(), store).unwrap());

        test::init_service(
            ActixWebApp::new()
                .wrap(app.session_middleware())
                .app_data(app.clone())
                .configure(configure),
        )
        .await
    }

    fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
        resp.response()
            .cookies()
            .find(|c| c.name() == "id")
            .expect("session cookie")
            .into_owned()
    }

    /// Registers a user and returns its id with the session cookie.
    async fn register(
        service: &impl Service<Request, Response = ServiceResponse, Error = Error>,
        name: &str,
    ) -> (Uuid, Cookie<'static>) {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "password": "secret1",
            }))
            .to_request();

        let resp = test::call_service(service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = session_cookie(&resp);
        let body: Value = test::read_body_json(resp).await;
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();

        (id, cookie)
    }

    async fn toggle(
        service: &impl Service<Request, Response = ServiceResponse, Error = Error>,
        cookie: &Cookie<'static>,
        target: Uuid,
        is_liked: bool,
    ) -> ServiceResponse {
        let req = test::TestRequest::post()
            .uri("/likes/toggle")
            .cookie(cookie.clone())
            .set_json(json!({ "targetUserId": target, "isLiked": is_liked }))
            .to_request();

        test::call_service(service, req).await
    }

    async fn liked_ids(
        service: &impl Service<Request, Response = ServiceResponse, Error = Error>,
        cookie: &Cookie<'static>,
    ) -> HashSet<Uuid> {
        let req = test::TestRequest::get()
            .uri("/likes/ids")
            .cookie(cookie.clone())
            .to_request();

        test::call_and_read_body_json(service, req).await
    }

    #[actix_web::test]
    async fn toggle_without_session_is_rejected_before_the_store() {
        let store = Arc::new(MemoryStore::default());
        let service = test_service(store.clone()).await;

        let req = test::TestRequest::post()
            .uri("/likes/toggle")
            .set_json(json!({ "targetUserId": Uuid::new_v4(), "isLiked": false }))
            .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.like_count(), 0);

        let req = test::TestRequest::get().uri("/likes/ids").to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn like_flow() {
        let store = Arc::new(MemoryStore::default());
        let service = test_service(store.clone()).await;

        let (_, alice) = register(&service, "Alice").await;
        let (bob_id, _) = register(&service, "Bob").await;
        let (carol_id, _) = register(&service, "Carol").await;

        assert!(liked_ids(&service, &alice).await.is_empty());

        let resp = toggle(&service, &alice, bob_id, false).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "targetUserId": bob_id, "liked": true }));

        let resp = toggle(&service, &alice, carol_id, false).await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert_eq!(liked_ids(&service, &alice).await, HashSet::from([bob_id, carol_id]));

        // stale client state
        let resp = toggle(&service, &alice, bob_id, false).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = toggle(&service, &alice, bob_id, true).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = toggle(&service, &alice, bob_id, true).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        assert_eq!(liked_ids(&service, &alice).await, HashSet::from([carol_id]));
        assert_eq!(store.like_count(), 1);
    }

    #[actix_web::test]
    async fn members_exclude_current_user() {
        let store = Arc::new(MemoryStore::default());
        let service = test_service(store).await;

        let (alice_id, alice) = register(&service, "Alice").await;
        let (bob_id, _) = register(&service, "Bob").await;

        let req = test::TestRequest::get().uri("/members").cookie(alice.clone()).to_request();
        let members: Vec<Value> = test::call_and_read_body_json(&service, req).await;
        let ids: Vec<&str> = members.iter().filter_map(|m| m["id"].as_str()).collect();

        assert_eq!(ids, vec![bob_id.to_string().as_str()]);

        let req = test::TestRequest::get()
            .uri(&format!("/members/{}", alice_id))
            .cookie(alice.clone())
            .to_request();
        let member: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(member["name"], "Alice");

        let req = test::TestRequest::get()
            .uri(&format!("/members/{}", Uuid::new_v4()))
            .cookie(alice)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn register_validates_and_rejects_taken_email() {
        let service = test_service(Arc::new(MemoryStore::default())).await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": "Al", "email": "al@example.com", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]["name"].is_string());

        register(&service, "Alice").await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": "Alice", "email": "ALICE@example.com", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn register_replaces_an_existing_session() {
        let service = test_service(Arc::new(MemoryStore::default())).await;
        let (_, alice) = register(&service, "Alice").await;

        let req = test::TestRequest::post()
            .uri("/users")
            .cookie(alice)
            .set_json(json!({ "name": "Bob", "email": "bob@example.com", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = session_cookie(&resp);
        let body: Value = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri("/users/session/sync")
            .cookie(cookie)
            .to_request();
        let current_user: Value = test::call_and_read_body_json(&service, req).await;

        assert_eq!(current_user["id"], body["user"]["id"]);
        assert_eq!(current_user["email"], "bob@example.com");
    }

    #[actix_web::test]
    async fn sync_logs_out_a_user_missing_from_the_store() {
        let service = test_service(Arc::new(MemoryStore::default())).await;
        let (_, alice) = register(&service, "Alice").await;

        // same secret key, empty store
        let other = test_service(Arc::new(MemoryStore::default())).await;

        let req = test::TestRequest::get()
            .uri("/users/session/sync")
            .cookie(alice)
            .to_request();
        let resp = test::call_service(&other, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_sync_and_logout() {
        let service = test_service(Arc::new(MemoryStore::default())).await;
        let (alice_id, _) = register(&service, "Alice").await;

        let req = test::TestRequest::post()
            .uri("/users/session/login")
            .set_json(json!({ "email": "alice@example.com", "password": "wrong-password" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/users/session/login")
            .set_json(json!({ "email": "alice@example.com", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp);

        let req = test::TestRequest::get()
            .uri("/users/session/sync")
            .cookie(cookie.clone())
            .to_request();
        let current_user: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(current_user["id"], alice_id.to_string());
        assert_eq!(current_user["email"], "alice@example.com");

        let req = test::TestRequest::delete()
            .uri("/users/session/logout")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let removal = session_cookie(&resp);
        let req = test::TestRequest::get()
            .uri("/users/session/sync")
            .cookie(removal)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
