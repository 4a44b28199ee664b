//! Request bodies for taxonomy records and project upserts.
//!
//! Built immediately before the write that sends them and dropped right after.

use chrono::{SecondsFormat, Utc};
use folio_core::seo::seo_description;
use folio_core::{RemoteId, SourceProject, Year};
use serde::Serialize;

/// Current time as the backend expects `publishedAt`: RFC 3339, UTC,
/// millisecond precision.
#[must_use]
pub fn publish_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fields of a newly created category or tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyPayload {
    pub name: String,
    pub slug: String,
    pub published_at: String,
}

impl TaxonomyPayload {
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            published_at: publish_timestamp(),
        }
    }
}

/// Full field set of a project create or update.
///
/// Absent source fields, an unresolved hero and an empty gallery are omitted
/// from the body rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub categories: Vec<RemoteId>,
    pub tags: Vec<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<RemoteId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<RemoteId>,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    pub seo_description: String,
}

impl ProjectPayload {
    /// Assemble the payload for `project` from its resolved dependencies.
    #[must_use]
    pub fn build(
        project: &SourceProject,
        categories: Vec<RemoteId>,
        tags: Vec<RemoteId>,
        hero_image: Option<RemoteId>,
        gallery: Vec<RemoteId>,
    ) -> Self {
        Self {
            title: project.title.clone(),
            slug: project.id.clone(),
            year: project.year.clone(),
            client: project.client.clone(),
            role: project.role.clone(),
            body: project.body.clone(),
            categories,
            tags,
            hero_image,
            gallery,
            published_at: publish_timestamp(),
            seo_title: project.title.clone(),
            seo_description: seo_description(project.body.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn project() -> SourceProject {
        SourceProject {
            id: "p1".into(),
            title: Some("Alpha".into()),
            year: Some(Year::Number(2021)),
            ..SourceProject::default()
        }
    }

    #[test]
    fn omits_media_fields_when_unresolved() {
        let payload = ProjectPayload::build(&project(), vec![1.into()], vec![], None, vec![]);
        let mut value = serde_json::to_value(&payload).unwrap();
        let published = value["publishedAt"].take();

        assert!(published.is_string());
        assert_eq!(
            value,
            json!({
                "title": "Alpha",
                "slug": "p1",
                "year": 2021,
                "categories": [1],
                "tags": [],
                "publishedAt": null,
                "seoTitle": "Alpha",
                "seoDescription": ""
            })
        );
    }

    #[test]
    fn includes_media_ids_in_order() {
        let payload = ProjectPayload::build(
            &project(),
            vec![],
            vec![4.into(), 4.into()],
            Some(9.into()),
            vec![11.into(), 10.into()],
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["heroImage"], json!(9));
        assert_eq!(value["gallery"], json!([11, 10]));
        assert_eq!(value["tags"], json!([4, 4]));
    }

    #[test]
    fn seo_description_follows_body() {
        let body = "x".repeat(500);
        let source = SourceProject {
            body: Some(body),
            ..project()
        };
        let payload = ProjectPayload::build(&source, vec![], vec![], None, vec![]);
        assert_eq!(payload.seo_description.chars().count(), 160);
    }

    #[test]
    fn timestamp_is_rfc3339_millis_utc() {
        let stamp = publish_timestamp();
        assert!(stamp.ends_with('Z'), "{stamp}");
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        assert_eq!(stamp.split('.').nth(1).map(str::len), Some(4));
    }
}
