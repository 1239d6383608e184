/// Typed CRUD wrappers over a [`ResourceClient`](crate::actor_framework::ResourceClient).
///
/// `impl_basic_client!(BrandClient, Brand, create_brand, get_brand, list_brands, update_brand, delete_brand)`
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $create:ident, $get:ident, $list:ident, $update:ident, $delete:ident) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }

            #[tracing::instrument(skip(self))]
            pub async fn $create(
                &self,
                payload: <$entity as $crate::catalog::Entity>::CreatePayload,
            ) -> Result<$entity, $crate::catalog::CatalogError> {
                tracing::debug!("Sending request");
                self.inner.create(payload).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn $get(&self, id: u64) -> Result<Option<$entity>, $crate::catalog::CatalogError> {
                tracing::debug!("Sending request");
                self.inner.get(id).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn $list(&self) -> Result<Vec<$entity>, $crate::catalog::CatalogError> {
                tracing::debug!("Sending request");
                self.inner.list().await
            }

            #[tracing::instrument(skip(self))]
            pub async fn $update(
                &self,
                id: u64,
                patch: <$entity as $crate::catalog::Entity>::Patch,
            ) -> Result<$entity, $crate::catalog::CatalogError> {
                tracing::debug!("Sending request");
                self.inner.update(id, patch).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn $delete(&self, id: u64) -> Result<$entity, $crate::catalog::CatalogError> {
                tracing::debug!("Sending request");
                self.inner.delete(id).await
            }
        }
    };
}

/// One request/response round trip through the admin mailbox.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }.into()).await.map_err(|_| <$error_type>::ActorCommunication("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}
