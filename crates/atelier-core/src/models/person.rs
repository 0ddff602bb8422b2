//! Person profiles
//!
//! One struct covers both the list and the detail shape. Detail-only fields
//! (statement, education, reverse-referenced work) stay empty when the list
//! projection is used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::artwork::Artwork;
use super::common::{DocumentMeta, FileAsset, Image, Slug, SocialMedia};
use super::exhibition::Exhibition;
use super::portable_text::{self, PortableText};
use super::project::Project;
use super::taxonomy::Role;
use super::{null_default, resolved, year_or_date};

/// An artist or collaborator profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    /// Honorific, e.g. "Dr."
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub last_name: String,
    pub slug: Option<Slug>,
    /// Expanded role references
    #[serde(default, deserialize_with = "resolved")]
    pub roles: Vec<Role>,
    /// Profile image; legacy profiles stored this as `image`
    pub profile_image: Option<Image>,
    pub is_core_artist: Option<bool>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "null_default")]
    pub biography: PortableText,
    /// Legacy profiles supply this from `birthDate`
    #[serde(default, deserialize_with = "year_or_date")]
    pub birth_year: Option<i32>,
    /// Legacy profiles supply this from `nationality`
    pub birth_place: Option<String>,
    pub current_location: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub social_media: Option<SocialMedia>,

    // Detail view
    #[serde(default, deserialize_with = "null_default")]
    pub statement: PortableText,
    #[serde(default, deserialize_with = "null_default")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "resolved")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "resolved")]
    pub personal_projects: Vec<PersonalProject>,
    pub cv_file: Option<FileAsset>,
    pub phone: Option<String>,
    /// Legacy artist field, read into `birth_year` when that is absent
    pub birth_date: Option<NaiveDate>,
    /// Legacy artist field, read into `birth_place` when that is absent
    pub nationality: Option<String>,
    /// Artworks referencing this person, newest first
    #[serde(default, deserialize_with = "resolved")]
    pub artworks: Vec<Artwork>,
    /// Projects referencing this person, newest first
    #[serde(default, deserialize_with = "resolved")]
    pub projects: Vec<Project>,
    /// Exhibitions referencing this person, newest first
    #[serde(default, deserialize_with = "resolved")]
    pub exhibition_docs: Vec<Exhibition>,
}

impl Person {
    /// Honorific and name parts joined by spaces, absent parts skipped
    pub fn display_name(&self) -> String {
        display_name(
            self.title.as_deref(),
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
        )
    }

    /// Plain-text biography excerpt
    pub fn bio_summary(&self, max_chars: usize) -> String {
        portable_text::summary(&self.biography, max_chars)
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "null_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_default")]
    pub institution: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalProject {
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub url: Option<String>,
}

/// A person expanded inside another document (artists, curators, recipients)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub last_name: String,
    pub slug: Option<Slug>,
    /// Role titles, followed through the role references
    #[serde(default, deserialize_with = "resolved")]
    pub roles: Vec<String>,
}

impl PersonRef {
    pub fn display_name(&self) -> String {
        display_name(
            self.title.as_deref(),
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
        )
    }
}

fn display_name(title: Option<&str>, first: &str, middle: Option<&str>, last: &str) -> String {
    [title, Some(first), middle, Some(last)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocType;
    use serde_json::json;

    #[test]
    fn test_display_name_skips_absent_parts() {
        assert_eq!(display_name(Some("Dr."), "Ada", None, "Schork"), "Dr. Ada Schork");
        assert_eq!(display_name(None, "Ada", Some("M."), "Schork"), "Ada M. Schork");
        assert_eq!(display_name(None, "", None, "Schork"), "Schork");
        assert_eq!(display_name(Some(" "), "", None, ""), "");
    }

    #[test]
    fn test_list_shape_decodes_with_nulls() {
        let person: Person = serde_json::from_value(json!({
            "_id": "person-ada",
            "_type": "person",
            "firstName": "Ada",
            "middleName": null,
            "lastName": "Schork",
            "slug": {"_type": "slug", "current": "ada-schork"},
            "roles": [{"_id": "role-painter", "title": "Painter"}, null],
            "profileImage": null,
            "biography": null,
            "website": null,
            "email": "ada@example.com",
            "socialMedia": {"instagram": "@ada"}
        }))
        .unwrap();

        assert_eq!(person.meta.doc_type, Some(DocType::Person));
        assert_eq!(person.slug(), Some("ada-schork"));
        assert_eq!(person.roles.len(), 1);
        assert_eq!(person.roles[0].title, "Painter");
        assert!(person.biography.is_empty());
        assert!(person.artworks.is_empty());
        assert_eq!(person.display_name(), "Ada Schork");
    }

    #[test]
    fn test_legacy_fields_are_carried() {
        let person: Person = serde_json::from_value(json!({
            "_id": "artist-old",
            "_type": "artist",
            "firstName": "Max",
            "lastName": "Ernst",
            "birthDate": "1891-04-02",
            "nationality": "German"
        }))
        .unwrap();

        assert_eq!(person.meta.doc_type, Some(DocType::Artist));
        assert_eq!(
            person.birth_date,
            NaiveDate::from_ymd_opt(1891, 4, 2)
        );
        assert_eq!(person.nationality.as_deref(), Some("German"));
    }

    #[test]
    fn test_person_ref_role_titles() {
        let stub: PersonRef = serde_json::from_value(json!({
            "_id": "person-ada",
            "firstName": "Ada",
            "lastName": "Schork",
            "roles": ["Painter", null, "Curator"]
        }))
        .unwrap();
        assert_eq!(stub.roles, vec!["Painter", "Curator"]);
        assert_eq!(stub.meta.doc_type, None);
    }
}
