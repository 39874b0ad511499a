use std::collections::HashMap;

use async_trait::async_trait;
use google_firestore1::api::{Document, Value};
use google_firestore1::Firestore;

use crate::config::FirestoreConfig;

use super::store::{DocumentFields, DocumentStore, FieldValue, MirrorError};

/// Thin wrapper around the generated google-firestore1 client pushing mirror
/// writes into the `(default)` database of one project.
pub struct FirestoreMirror<C>
where
    C: google_firestore1::common::Connector + Send + Sync + 'static,
{
    hub: Firestore<C>,
    project_id: String,
}

impl<C> FirestoreMirror<C>
where
    C: google_firestore1::common::Connector + Send + Sync + 'static,
{
    pub fn new(hub: Firestore<C>, config: &FirestoreConfig) -> Self {
        Self {
            hub,
            project_id: config.project_id.clone(),
        }
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.project_id, collection, id
        )
    }

    fn encode(fields: DocumentFields) -> HashMap<String, Value> {
        fields
            .into_iter()
            .map(|(key, value)| {
                let encoded = match value {
                    FieldValue::Text(text) => Value {
                        string_value: Some(text),
                        ..Value::default()
                    },
                    FieldValue::Integer(number) => Value {
                        integer_value: Some(number),
                        ..Value::default()
                    },
                    FieldValue::Decimal(number) => Value {
                        double_value: Some(number),
                        ..Value::default()
                    },
                    FieldValue::Boolean(flag) => Value {
                        boolean_value: Some(flag),
                        ..Value::default()
                    },
                    FieldValue::Timestamp(at) => Value {
                        timestamp_value: Some(at),
                        ..Value::default()
                    },
                };
                (key, encoded)
            })
            .collect()
    }

    fn map_error<E: std::fmt::Display>(err: E) -> MirrorError {
        MirrorError::Backend(err.to_string())
    }
}

impl<C> std::fmt::Debug for FirestoreMirror<C>
where
    C: google_firestore1::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreMirror")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> DocumentStore for FirestoreMirror<C>
where
    C: google_firestore1::common::Connector + Send + Sync + 'static,
{
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), MirrorError> {
        let document = Document {
            fields: Some(Self::encode(fields)),
            ..Document::default()
        };

        self.hub
            .projects()
            .databases_documents_patch(document, &self.document_name(collection, id))
            .doit()
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), MirrorError> {
        let field_paths: Vec<String> = fields.keys().cloned().collect();
        let document = Document {
            fields: Some(Self::encode(fields)),
            ..Document::default()
        };

        let mut call = self
            .hub
            .projects()
            .databases_documents_patch(document, &self.document_name(collection, id));
        for path in &field_paths {
            call = call.add_update_mask_field_paths(path);
        }

        call.doit().await.map(|_| ()).map_err(Self::map_error)
    }
}
