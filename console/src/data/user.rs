//! User reads and writes, including the signed-in user's profile.

use std::sync::Arc;

use futures_util::FutureExt;

use super::DataContext;
use crate::domain::{
    Endpoint, ProfileUpdateInput, QueryOptions, RecordId, RecordPatch, User, UserCreateInput,
    UserPatch,
};
use crate::query::{DetailQuery, ListQuery, Mutation, MutationAction, PagedQuery, SuccessHook};

impl DataContext {
    /// User list read.
    pub fn users_query(&self, options: QueryOptions) -> ListQuery<User> {
        self.list_query(self.users.crud(), options)
    }

    /// Paginated user read.
    pub fn users_page_query(&self, options: QueryOptions) -> PagedQuery<User> {
        self.page_query(self.users.crud(), options)
    }

    /// Single user read.
    pub fn user_query(&self, id: impl Into<RecordId>) -> DetailQuery<User> {
        self.detail_query(self.users.crud(), id.into())
    }

    /// Create a user account.
    pub fn create_user_mutation(&self) -> Mutation<UserCreateInput, User> {
        self.create_mutation(self.users.crud())
    }

    /// Update a user account.
    pub fn update_user_mutation(&self) -> Mutation<RecordPatch<UserPatch>, User> {
        self.update_mutation(self.users.crud())
    }

    /// Delete a user account.
    pub fn delete_user_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.users.crud())
    }

    /// Update the signed-in user's profile.
    ///
    /// Once the server confirms, `me` is re-read and merged into the
    /// session before the `profile` and `me` entries are invalidated.
    pub fn update_profile_mutation(&self) -> Mutation<ProfileUpdateInput, ()> {
        let client = self.users.clone();
        let session = self.session.clone();
        let refresh: SuccessHook = Arc::new(move || {
            let session = session.clone();
            async move { session.refresh_user().await.map(|_| ()) }.boxed()
        });
        Mutation::new(
            self.effects.clone(),
            Endpoint::Profile,
            MutationAction::Update,
            Arc::new(move |input: ProfileUpdateInput| {
                let client = client.clone();
                async move { client.update_profile(&input).await }.boxed()
            }),
        )
        .also_invalidates(Endpoint::Me)
        .after_success(refresh)
    }
}
