use crate::auth::middleware::{require_refresh, require_user};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod auth;
pub mod email;
pub mod password;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = HttpAuthentication::bearer(require_user);
    let refresh_auth = HttpAuthentication::bearer(require_refresh);

    cfg.service(
        web::scope("/auth")
            .service(web::scope("/register").service(auth::register::register))
            .service(web::scope("/login").service(auth::login::login))
            .service(
                web::scope("/logout")
                    .service(auth::logout::logout)
                    .wrap(user_auth.clone()),
            )
            .service(
                web::scope("/refresh")
                    .service(auth::refresh::refresh)
                    .wrap(refresh_auth),
            )
            .service(
                web::scope("/me")
                    .service(auth::me::me)
                    .wrap(user_auth.clone()),
            )
            .service(
                web::scope("/email/validate")
                    .service(email::request::request_code)
                    .service(email::confirm::confirm)
                    .wrap(user_auth.clone()),
            )
            .service(
                web::scope("/password")
                    .service(web::scope("/forgot").service(password::forgot::forgot))
                    .service(web::scope("/reset").service(password::reset::reset)),
            ),
    );
}
