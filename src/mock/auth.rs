//! Login and the user directory.

use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::{fixtures, MockRequest, MockResult, FETCHED};
use crate::model::{LoginResult, User};
use crate::routing::RouteEntry;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "123456";
pub const ADMIN_TOKEN: &str = "mock-token-123456";

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::post("/auth/login", login),
        RouteEntry::get("/users", |_req: &MockRequest| {
            Ok(Envelope::ok_json(FETCHED, &fixtures::users())?)
        }),
        RouteEntry::get("/users/:id", user_by_id),
    ]
}

fn login(req: &MockRequest) -> MockResult<Envelope> {
    let field = |name: &str| {
        req.body
            .as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
    };

    match (field("email"), field("password")) {
        (Some(ADMIN_EMAIL), Some(ADMIN_PASSWORD)) => {
            tracing::debug!(email = ADMIN_EMAIL, "Synthetic login accepted");
            let result = LoginResult {
                id: 1,
                name: "Administrator".into(),
                email: ADMIN_EMAIL.into(),
                role: "admin".into(),
                token: ADMIN_TOKEN.into(),
            };
            Ok(Envelope::ok_json("login successful", &result)?)
        }
        (email, _) => {
            tracing::debug!(email = ?email, "Synthetic login rejected");
            Ok(Envelope::unauthorized("wrong email or password"))
        }
    }
}

/// Echoes the requested id with a directory profile.
fn user_by_id(req: &MockRequest) -> MockResult<Envelope> {
    let Ok(id) = req.id()?.parse::<u64>() else {
        return Ok(Envelope::not_found("user not found"));
    };
    let user = User {
        id,
        name: "Zhang San".into(),
        email: "zhangsan@example.com".into(),
        role: "user".into(),
    };
    Ok(Envelope::ok_json(FETCHED, &user)?)
}
