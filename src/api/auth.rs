//! `/signup` and `/signin` against the user pool.

use serde_json::{Map, Value, json};
use tracing::{error, info};

use super::fields::non_empty_str;
use super::helpers::{cors_err_response, cors_response};
use crate::clients::IdentityProvider;

fn credentials(body: &Map<String, Value>) -> Option<(&str, &str)> {
    Some((non_empty_str(body, "email")?, non_empty_str(body, "password")?))
}

pub async fn signup(identity: &dyn IdentityProvider, body: &Map<String, Value>) -> Value {
    let Some((email, password)) = credentials(body) else {
        error!("Signup failed. Missing email or password.");
        return cors_err_response(400, "Missing email or password in signup.");
    };
    info!(email = %email, "Attempting sign-up");

    if let Err(e) = identity.sign_up(email, password).await {
        error!("Sign up error for email '{}': {}", email, e);
        return cors_err_response(400, &format!("Cannot create user {email}. Error: {e}"));
    }

    info!("User {} was created and confirmed successfully.", email);
    cors_response(200, &json!({ "message": format!("User {email} was created.") }))
}

pub async fn signin(identity: &dyn IdentityProvider, body: &Map<String, Value>) -> Value {
    let Some((email, password)) = credentials(body) else {
        error!("Signin failed. Missing email or password.");
        return cors_err_response(400, "Missing email or password in signin.");
    };
    info!(email = %email, "Attempting sign-in");

    match identity.sign_in(email, password).await {
        Ok(Some(id_token)) => {
            info!("Signin success for user: {}", email);
            cors_response(200, &json!({ "accessToken": id_token }))
        }
        Ok(None) => {
            error!("Signin failed. AuthenticationResult missing or invalid.");
            cors_err_response(400, "Unable to authenticate user.")
        }
        Err(e) => {
            error!("Sign in error for email '{}': {}", email, e);
            cors_err_response(400, "Invalid login.")
        }
    }
}
