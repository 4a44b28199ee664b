//! Collection requests: lookup, create, update, list.

use folio_core::{EntityKind, RemoteEntity, RemoteId};

use crate::RemoteClient;
use crate::error::RemoteError;
use crate::http::{check_response, read_json};
use crate::wire::{ListResponse, Page, SingleResponse, WriteEnvelope};

impl RemoteClient {
    /// `{collection}?filters[slug][$eq]={key}`
    pub(crate) fn lookup_url(&self, kind: EntityKind, key: &str) -> String {
        format!(
            "{}?filters[slug][$eq]={}",
            self.collection_url(kind),
            urlencoding::encode(key)
        )
    }

    pub(crate) async fn fetch_by_key(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<RemoteEntity>, RemoteError> {
        let url = &self.lookup_url(kind, key);
        let list: ListResponse = self
            .retry
            .run("lookup", move || async move {
                let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
                read_json(check_response(resp).await?, "lookup response").await
            })
            .await?;

        let found = list.data.into_iter().next();
        tracing::debug!(%kind, key, found = found.is_some(), "looked up by slug");
        Ok(found)
    }

    pub(crate) async fn post_entity(
        &self,
        kind: EntityKind,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError> {
        let url = &self.collection_url(kind);
        let body = &WriteEnvelope { data: fields };
        let created: SingleResponse = self
            .retry
            .run_with("create", RemoteError::is_resendable, move || async move {
                let resp = self
                    .http
                    .post(url)
                    .bearer_auth(&self.token)
                    .json(body)
                    .send()
                    .await?;
                read_json(check_response(resp).await?, "create response").await
            })
            .await
            .map_err(|e| e.into_write(kind))?;

        tracing::debug!(%kind, id = %created.data.id, "created record");
        Ok(created.data)
    }

    pub(crate) async fn put_entity(
        &self,
        kind: EntityKind,
        id: &RemoteId,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError> {
        let url = &format!("{}/{id}", self.collection_url(kind));
        let body = &WriteEnvelope { data: fields };
        let updated: SingleResponse = self
            .retry
            .run("update", move || async move {
                let resp = self
                    .http
                    .put(url)
                    .bearer_auth(&self.token)
                    .json(body)
                    .send()
                    .await?;
                read_json(check_response(resp).await?, "update response").await
            })
            .await
            .map_err(|e| e.into_write(kind))?;

        tracing::debug!(%kind, %id, "updated record");
        Ok(updated.data)
    }

    pub(crate) async fn fetch_page(
        &self,
        kind: EntityKind,
        limit: u32,
    ) -> Result<Page, RemoteError> {
        let url = &format!("{}?pagination[limit]={limit}", self.collection_url(kind));
        let list: ListResponse = self
            .retry
            .run("list", move || async move {
                let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
                read_json(check_response(resp).await?, "list response").await
            })
            .await?;
        Ok(list.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientOptions, RemoteClient};
    use folio_core::EntityKind;

    #[test]
    fn lookup_url_encodes_key() {
        let client =
            RemoteClient::new(ClientOptions::new("http://localhost:1337", "t")).unwrap();
        assert_eq!(
            client.lookup_url(EntityKind::Tag, "ui"),
            "http://localhost:1337/api/tags?filters[slug][$eq]=ui"
        );
        assert_eq!(
            client.lookup_url(EntityKind::Tag, "c#&more"),
            "http://localhost:1337/api/tags?filters[slug][$eq]=c%23%26more"
        );
    }
}
