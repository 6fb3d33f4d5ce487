use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType};
use tracing::info;

use super::IdentityProvider;
use crate::core::config::BookingConfig;
use crate::errors::TaskError;

/// Cognito user pool access using the admin (server-side) auth flow.
#[derive(Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
    user_pool_id: String,
    client_id: String,
}

impl CognitoIdentityProvider {
    pub fn new(client: Client, user_pool_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
        }
    }

    #[must_use]
    pub fn from_conf(sdk: &SdkConfig, config: &BookingConfig) -> Self {
        Self::new(Client::new(sdk), &config.user_pool_id, &config.client_id)
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), TaskError> {
        let email_attribute = AttributeType::builder().name("email").value(email).build()?;

        self.client
            .sign_up()
            .client_id(&self.client_id)
            .username(email)
            .password(password)
            .user_attributes(email_attribute)
            .send()
            .await?;
        info!("SignUp succeeded, confirming user");

        self.client
            .admin_confirm_sign_up()
            .user_pool_id(&self.user_pool_id)
            .username(email)
            .send()
            .await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<String>, TaskError> {
        let output = self
            .client
            .admin_initiate_auth()
            .user_pool_id(&self.user_pool_id)
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::AdminUserPasswordAuth)
            .auth_parameters("USERNAME", email)
            .auth_parameters("PASSWORD", password)
            .send()
            .await?;

        Ok(output
            .authentication_result()
            .and_then(|result| result.id_token())
            .map(ToString::to_string))
    }
}
