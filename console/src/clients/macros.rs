//! Macro generating a resource descriptor and its explicit client surface.

/// Declare a [`Resource`](crate::clients::Resource) descriptor plus a client
/// exposing `all`, `get`, `create`, `patch`, `delete`, and `paginated`.
///
/// Resources with extra endpoints add them in a separate `impl` block on the
/// generated client.
macro_rules! resource_client {
    (
        $(#[$meta:meta])*
        pub struct $client:ident for $resource:ident {
            endpoint: $endpoint:expr,
            record: $record:ty,
            create: $create:ty,
            patch: $patch:ty $(,)?
        }
    ) => {
        #[doc = concat!("Resource descriptor used by [`", stringify!($client), "`].")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $resource;

        impl $crate::clients::Resource for $resource {
            const ENDPOINT: $crate::domain::Endpoint = $endpoint;
            type Record = $record;
            type CreateInput = $create;
            type Patch = $patch;
        }

        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $client {
            crud: $crate::clients::Crud<$resource>,
        }

        impl $client {
            /// Bind the client to a transport.
            pub fn new(
                transport: ::std::sync::Arc<dyn $crate::domain::ports::HttpTransport>,
            ) -> Self {
                Self {
                    crud: $crate::clients::Crud::new(transport),
                }
            }

            /// Endpoint the resource lives under.
            pub fn endpoint(&self) -> $crate::domain::Endpoint {
                self.crud.endpoint()
            }

            /// Generic CRUD operations backing this client.
            pub fn crud(&self) -> &$crate::clients::Crud<$resource> {
                &self.crud
            }

            /// List records matching `options`.
            pub async fn all(
                &self,
                options: &$crate::domain::QueryOptions,
            ) -> Result<Vec<$record>, $crate::domain::Error> {
                self.crud.all(options).await
            }

            /// Read one record; `None` when the server answers with an empty envelope.
            pub async fn get(
                &self,
                id: &$crate::domain::RecordId,
            ) -> Result<Option<$record>, $crate::domain::Error> {
                self.crud.get(id).await
            }

            /// Create a record.
            pub async fn create(&self, input: &$create) -> Result<$record, $crate::domain::Error> {
                self.crud.create(input).await
            }

            /// Apply a partial update.
            pub async fn patch(
                &self,
                patch: &$crate::domain::RecordPatch<$patch>,
            ) -> Result<$record, $crate::domain::Error> {
                self.crud.patch(patch).await
            }

            /// Delete a record.
            pub async fn delete(
                &self,
                id: &$crate::domain::RecordId,
            ) -> Result<(), $crate::domain::Error> {
                self.crud.delete(id).await
            }

            /// Read one page of records.
            pub async fn paginated(
                &self,
                options: &$crate::domain::QueryOptions,
            ) -> Result<::pagination::Paginator<$record>, $crate::domain::Error> {
                self.crud.paginated(options).await
            }
        }
    };
}

pub(crate) use resource_client;
