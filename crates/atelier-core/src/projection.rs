//! Canonical projections per document type
//!
//! Every query returning a given type uses the projection defined here, so a
//! type has one wire shape no matter which query produced it. Detail
//! projections are built by extending the list projection of the same type,
//! which keeps the list field set a subset of the detail field set.
//!
//! Sorting is declared per query; the default orders live in [`order`].

use crate::compat::{self, PROFILE_TYPES};
use crate::groq::{Filter, Projection, Selection};
use crate::models::DocType;
use crate::resolver::{self, Backlink};

const META: [&str; 4] = ["_id", "_type", "_createdAt", "_updatedAt"];

/// Default sort keys
pub mod order {
    use crate::groq::Order;

    /// Surname, then given name; `_id` keeps ties stable across stores
    pub fn people() -> Vec<Order> {
        vec![Order::asc("lastName"), Order::asc("firstName"), Order::asc("_id")]
    }

    pub fn artworks() -> Vec<Order> {
        vec![Order::desc("year"), Order::asc("orderRank")]
    }

    /// Works inside one project follow the project's manual order
    pub fn artworks_in_project() -> Vec<Order> {
        vec![Order::asc("orderRank"), Order::desc("year")]
    }

    pub fn projects() -> Vec<Order> {
        vec![Order::desc("startDate")]
    }

    pub fn exhibitions() -> Vec<Order> {
        vec![Order::desc("startDate")]
    }

    pub fn upcoming_exhibitions() -> Vec<Order> {
        vec![Order::asc("startDate")]
    }

    pub fn featured() -> Vec<Order> {
        vec![Order::asc("orderRank")]
    }

    pub fn taxonomy() -> Vec<Order> {
        vec![Order::asc("orderRank"), Order::asc("title")]
    }

    /// Tags and categories
    pub fn by_title() -> Vec<Order> {
        vec![Order::asc("title")]
    }

    pub fn locations() -> Vec<Order> {
        vec![Order::asc("name")]
    }

    pub fn awards() -> Vec<Order> {
        vec![Order::desc("year")]
    }
}

fn meta() -> Projection {
    Projection::new().fields(&META)
}

fn role_stub() -> Projection {
    Projection::new().fields(&["_id", "title", "description"])
}

/// Vocabulary entry (role, medium, technique, tag, ...)
pub fn taxonomy_term() -> Projection {
    meta().fields(&["title", "description", "slug", "orderRank"])
}

pub fn person_ref() -> Projection {
    Projection::new()
        .fields(&["_id", "_type", "title", "firstName", "middleName", "lastName", "slug"])
        .select(resolver::follow_many("roles", "title"))
}

pub fn artwork_ref() -> Projection {
    Projection::new().fields(&["_id", "_type", "title", "slug", "media"])
}

pub fn project_ref() -> Projection {
    Projection::new().fields(&["_id", "_type", "title", "slug", "coverImage"])
}

pub fn location_ref() -> Projection {
    Projection::new().fields(&["_id", "name", "slug", "address", "city", "country", "coordinates"])
}

pub fn category_ref() -> Projection {
    Projection::new().fields(&["_id", "title", "slug"])
}

pub fn person_list() -> Projection {
    meta()
        .fields(&["title", "firstName", "middleName", "lastName", "slug"])
        .select(resolver::expand_many("roles", role_stub()))
        .select(compat::renamed(DocType::Person, "profileImage", Projection::new()))
        .fields(&["isCoreArtist", "isActive", "biography"])
        .select(compat::renamed(DocType::Person, "birthYear", Projection::new()))
        .select(compat::renamed(DocType::Person, "birthPlace", Projection::new()))
        .fields(&["currentLocation", "website", "email", "socialMedia"])
}

/// Full profile with reverse-referenced artworks, projects and exhibitions
pub fn person_detail() -> Projection {
    person_list()
        .fields(&[
            "statement",
            "interests",
            "education",
            "personalProjects",
            "cvFile",
            "phone",
            "birthDate",
            "nationality",
        ])
        .select(Selection::named(
            "artworks",
            resolver::reverse(DocType::Artwork, Backlink::Any, order::artworks(), artwork()),
        ))
        .select(Selection::named(
            "projects",
            resolver::reverse(DocType::Project, Backlink::Any, order::projects(), project_list()),
        ))
        .select(Selection::named(
            "exhibitionDocs",
            resolver::reverse(
                DocType::Exhibition,
                Backlink::Any,
                order::exhibitions(),
                exhibition(),
            ),
        ))
}

pub fn artwork() -> Projection {
    meta()
        .fields(&["title", "slug"])
        .select(resolver::expand_many("artists", person_ref()))
        .fields(&["year", "creationDate"])
        .select(compat::renamed(DocType::Artwork, "mediaTypes", role_stub()))
        .select(resolver::expand_many("techniques", role_stub()))
        .select(resolver::expand_many("tags", Projection::new().fields(&["_id", "title", "slug"])))
        .fields(&[
            "description",
            "dimensions",
            "media",
            "isPrimaryArtwork",
            "isFeatured",
            "credits",
        ])
        .select(resolver::expand_one("project", project_ref()))
        .select(resolver::expand_many("relatedArtworks", artwork_ref()))
        .fields(&["price", "availability", "location", "orderRank"])
}

pub fn project_list() -> Projection {
    meta()
        .fields(&["title", "slug", "status", "description"])
        .select(resolver::expand_many("creators", person_ref()))
        .select(resolver::expand_many("collaborators", person_ref()))
        .fields(&["coverImage", "startDate", "endDate", "website", "media"])
        .select(resolver::expand_many("tags", Projection::new().fields(&["_id", "title", "slug"])))
        .fields(&["isFeatured", "orderRank"])
        .select(Selection::named(
            "artworkCount",
            resolver::count(DocType::Artwork, Backlink::Field("project")),
        ))
}

/// Project with every artwork pointing at it
pub fn project_detail() -> Projection {
    project_list().select(Selection::named(
        "artworks",
        resolver::reverse(
            DocType::Artwork,
            Backlink::Field("project"),
            order::artworks_in_project(),
            artwork(),
        ),
    ))
}

pub fn exhibition_summary() -> Projection {
    meta().fields(&["title", "slug", "startDate", "endDate", "status"])
}

pub fn exhibition() -> Projection {
    exhibition_summary()
        .fields(&["type", "mainImage", "description"])
        .select(resolver::expand_many("curators", person_ref()))
        .select(resolver::expand_one("location", location_ref()))
        .fields(&["venue", "city", "country"])
        .select(resolver::expand_many("artworks", artwork_ref()))
        .select(resolver::expand_many("featuredProjects", project_ref()))
        .fields(&["press", "gallery", "isFeatured"])
}

/// Award row shown on a profile page
pub fn award_summary() -> Projection {
    meta().fields(&["title", "slug", "organization", "year", "description", "isMajorAward"])
}

pub fn award() -> Projection {
    award_summary()
        .select(resolver::expand_many("recipients", person_ref()))
        .select(resolver::expand_one("artwork", artwork_ref()))
}

pub fn location_list() -> Projection {
    meta()
        .fields(&["name", "slug"])
        .select(resolver::expand_one("locationType", Projection::new().fields(&["_id", "title"])))
        .fields(&[
            "address",
            "city",
            "country",
            "coordinates",
            "website",
            "openingHours",
        ])
}

pub fn location_detail() -> Projection {
    location_list().select(Selection::named(
        "exhibitions",
        resolver::reverse(
            DocType::Exhibition,
            Backlink::Field("location"),
            order::exhibitions(),
            exhibition_summary(),
        ),
    ))
}

pub fn category_with_parent() -> Projection {
    meta()
        .fields(&["title", "slug", "description"])
        .select(resolver::expand_one("parent", category_ref()))
}

pub fn category_with_children() -> Projection {
    meta()
        .fields(&["title", "slug", "description"])
        .select(Selection::named(
            "children",
            resolver::reverse(
                DocType::Category,
                Backlink::Field("parent"),
                order::by_title(),
                category_ref(),
            ),
        ))
}

pub fn site_settings() -> Projection {
    meta().fields(&["title", "description", "contactEmail", "socialMedia", "footerText"])
}

/// Detail shape of whatever type the document turns out to be
pub fn document() -> Projection {
    let taxonomies: Vec<DocType> = DocType::ALL
        .into_iter()
        .filter(|t| t.is_taxonomy())
        .collect();
    let category = category_with_parent().select(Selection::named(
        "children",
        resolver::reverse(
            DocType::Category,
            Backlink::Field("parent"),
            order::by_title(),
            category_ref(),
        ),
    ));

    Projection::new()
        .select(Selection::When(Filter::doc_types(&PROFILE_TYPES), person_detail()))
        .select(Selection::When(Filter::doc_type(DocType::Artwork), artwork()))
        .select(Selection::When(Filter::doc_type(DocType::Project), project_detail()))
        .select(Selection::When(Filter::doc_type(DocType::Exhibition), exhibition()))
        .select(Selection::When(Filter::doc_type(DocType::Award), award()))
        .select(Selection::When(Filter::doc_type(DocType::Location), location_detail()))
        .select(Selection::When(Filter::doc_type(DocType::Category), category))
        .select(Selection::When(Filter::doc_types(&taxonomies), taxonomy_term()))
        .select(Selection::When(Filter::doc_type(DocType::SiteSettings), site_settings()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_projections_are_subsets_of_detail() {
        let pairs = [
            ("person", person_list(), person_detail()),
            ("project", project_list(), project_detail()),
            ("location", location_list(), location_detail()),
            ("exhibition", exhibition_summary(), exhibition()),
            ("award", award_summary(), award()),
        ];
        for (name, list, detail) in pairs {
            assert!(list.is_subset_of(&detail), "{} list is not a subset", name);
            assert!(
                !detail.is_subset_of(&list),
                "{} detail adds nothing over its list shape",
                name
            );
        }
    }

    #[test]
    fn test_person_detail_adds_reverse_collections() {
        let extra: Vec<_> = person_detail()
            .field_names()
            .difference(&person_list().field_names())
            .copied()
            .collect();
        for name in ["artworks", "projects", "exhibitionDocs", "statement", "birthDate"] {
            assert!(extra.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_person_list_rendering() {
        let rendered = person_list().to_string();
        assert!(rendered.starts_with("{_id, _type, _createdAt, _updatedAt, title, firstName"));
        assert!(rendered.contains(r#""roles": roles[]->{_id, title, description}"#));
        assert!(rendered.contains(r#""profileImage": coalesce(profileImage, image)"#));
    }

    #[test]
    fn test_project_list_counts_artworks() {
        assert!(project_list()
            .to_string()
            .contains(r#""artworkCount": count(*[_type == "artwork" && project._ref == ^._id])"#));
        assert!(project_detail().to_string().contains(
            r#""artworks": *[_type == "artwork" && project._ref == ^._id] | order(orderRank asc, year desc)"#
        ));
    }

    #[test]
    fn test_artwork_expansions() {
        let rendered = artwork().to_string();
        assert!(rendered.contains(r#""artists": artists[]->{_id, _type, title, firstName, middleName, lastName, slug, "roles": roles[]->title}"#));
        assert!(rendered.contains(r#""project": project->{_id, _type, title, slug, coverImage}"#));
        assert!(rendered.contains(r#""mediaTypes": select(count(mediaTypes[]->"#));
    }

    #[test]
    fn test_document_projection_branches() {
        let rendered = document().to_string();
        assert!(rendered.starts_with(r#"{_type in ["person", "artist"] => {"#));
        assert!(rendered.contains(
            r#"_type in ["role", "medium", "mediaType", "technique", "tag", "locationType"] => {"#
        ));
        assert!(document().field_names().contains("artworkCount"));
    }
}
