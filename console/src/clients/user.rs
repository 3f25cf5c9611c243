//! User accounts plus the signed-in user's profile and identity.

use tracing::debug;

use super::{decode, resource_client};
use crate::domain::{
    Endpoint, Error, ProfileUpdateInput, User, UserCreateInput, UserInfo, UserPatch,
};

resource_client! {
    /// Client for user accounts and the signed-in user's profile.
    pub struct UserClient for UserResource {
        endpoint: Endpoint::Users,
        record: User,
        create: UserCreateInput,
        patch: UserPatch,
    }
}

impl UserClient {
    /// Update the signed-in user's profile (`PATCH profile`).
    pub async fn update_profile(&self, input: &ProfileUpdateInput) -> Result<(), Error> {
        let payload = decode::body(Endpoint::Profile, input)?;
        debug!("updating profile");
        self.crud
            .transport()
            .patch(Endpoint::Profile.path(), &payload)
            .await?;
        Ok(())
    }

    /// Read the signed-in user's identity (`GET me`, `{"data": {...}}`).
    pub async fn me(&self) -> Result<UserInfo, Error> {
        debug!("reading signed-in user");
        let body = self.crud.transport().get(Endpoint::Me.path(), &[]).await?;
        decode::required_record(Endpoint::Me, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockHttpTransport;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[rstest]
    #[tokio::test]
    async fn me_unwraps_the_data_envelope() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .withf(|path, _| path == "me")
            .returning(|_, _| {
                Ok(json!({"data": {"id": 5, "username": "ada", "email": "ada@example.com"}}))
            });

        let me = UserClient::new(Arc::new(transport))
            .me()
            .await
            .expect("me decodes");
        assert_eq!(me.username(), "ada");
        assert_eq!(me.role(), crate::domain::DEFAULT_ROLE);
    }

    #[rstest]
    #[tokio::test]
    async fn me_without_a_payload_is_a_shape_error() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .returning(|_, _| Ok(json!({"data": null})));

        let err = UserClient::new(Arc::new(transport))
            .me()
            .await
            .expect_err("identity required");
        assert_eq!(err.code(), ErrorCode::UnexpectedShape);
    }

    #[rstest]
    #[tokio::test]
    async fn update_profile_patches_the_profile_endpoint() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_patch()
            .withf(|path, body| {
                path == "profile" && *body == json!({"username": "ada", "email": "a@b.c"})
            })
            .times(1)
            .returning(|_, _| Ok(Value::Null));

        UserClient::new(Arc::new(transport))
            .update_profile(&ProfileUpdateInput {
                username: "ada".to_owned(),
                email: "a@b.c".to_owned(),
            })
            .await
            .expect("profile update succeeds");
    }
}
