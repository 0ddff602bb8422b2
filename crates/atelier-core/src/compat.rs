//! Compatibility with the retired "artist" schema generation
//!
//! Profiles used to be `artist` documents with `image`, `birthDate` and
//! `nationality` fields; they are now `person` documents with `profileImage`,
//! `birthYear` and `birthPlace`. Artworks moved from a single `medium`
//! reference to a `mediaTypes` array. Old names stay readable:
//!
//! - document types: queries for profiles match both generations and decode
//!   into [`Person`]; a retired profile whose slug a `person` has taken over
//!   is hidden from listings, lookups and search
//! - fields: each rename is listed once in [`FIELD_RENAMES`] and projected as
//!   `coalesce(current, retired)`, so results always carry the current name;
//!   a reference array counts as absent once its dangling entries are dropped
//! - entry points: the deprecated methods below forward to their current
//!   counterparts and share their query, sort and result type
//!
//! A deprecated name is never revived; the only step left for it is removal.

use crate::client::ContentClient;
use crate::error::Result;
use crate::groq::{Expr, Filter, Operand, Path, Projection, Selection};
use crate::models::{Artwork, DocType, Document, Person};
use crate::store::Backend;

/// Retired profile type
#[deprecated(note = "use `Person`")]
pub type Artist = Person;

/// Lifecycle state of a type or field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStatus {
    Current,
    Deprecated { replacement: &'static str },
}

impl NameStatus {
    pub fn is_deprecated(self) -> bool {
        matches!(self, NameStatus::Deprecated { .. })
    }
}

/// How a field's stored value is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Plain value, copied as-is
    Value,
    /// Single reference, expanded
    One,
    /// Array of references, each expanded; dangling entries are dropped
    Many,
}

/// A field renamed between schema generations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRename {
    pub doc_type: DocType,
    pub current: &'static str,
    pub current_shape: FieldShape,
    pub retired: &'static str,
    pub retired_shape: FieldShape,
}

pub const FIELD_RENAMES: &[FieldRename] = &[
    FieldRename {
        doc_type: DocType::Artwork,
        current: "mediaTypes",
        current_shape: FieldShape::Many,
        retired: "medium",
        retired_shape: FieldShape::One,
    },
    FieldRename {
        doc_type: DocType::Person,
        current: "profileImage",
        current_shape: FieldShape::Value,
        retired: "image",
        retired_shape: FieldShape::Value,
    },
    // A full date; the model keeps its year
    FieldRename {
        doc_type: DocType::Person,
        current: "birthYear",
        current_shape: FieldShape::Value,
        retired: "birthDate",
        retired_shape: FieldShape::Value,
    },
    FieldRename {
        doc_type: DocType::Person,
        current: "birthPlace",
        current_shape: FieldShape::Value,
        retired: "nationality",
        retired_shape: FieldShape::Value,
    },
];

/// Document types holding profiles, current generation first
pub const PROFILE_TYPES: [DocType; 2] = [DocType::Person, DocType::Artist];

pub fn type_status(doc_type: DocType) -> NameStatus {
    match doc_type {
        DocType::Artist => NameStatus::Deprecated {
            replacement: DocType::Person.as_str(),
        },
        _ => NameStatus::Current,
    }
}

/// The type whose shape results are reported in
pub fn current_type(doc_type: DocType) -> DocType {
    match doc_type {
        DocType::Artist => DocType::Person,
        other => other,
    }
}

pub fn field_status(doc_type: DocType, field: &str) -> NameStatus {
    let doc_type = current_type(doc_type);
    FIELD_RENAMES
        .iter()
        .find(|rename| rename.doc_type == doc_type && rename.retired == field)
        .map(|rename| NameStatus::Deprecated {
            replacement: rename.current,
        })
        .unwrap_or(NameStatus::Current)
}

/// Matches profile documents of either generation, shadowed ones included
///
/// Use this to find everything attached to a profile, since older documents
/// may still reference the retired `artist`.
pub fn any_profile_filter() -> Filter {
    Filter::doc_types(&PROFILE_TYPES)
}

/// An `artist` whose slug is also held by a `person`
fn shadowed_artist() -> Filter {
    let slug = || Path::field("slug").dot("current");
    Filter::doc_type(DocType::Artist).and(Filter::In(
        Operand::Path(slug()),
        Operand::values_of(Filter::doc_type(DocType::Person), slug()),
    ))
}

/// Matches one profile per slug, preferring the `person` over a retired
/// `artist` of the same slug
pub fn profile_filter() -> Filter {
    any_profile_filter().and(!shadowed_artist())
}

fn read(field: &'static str, shape: FieldShape, projection: &Projection) -> Expr {
    match shape {
        FieldShape::Value => Expr::Path(Path::field(field)),
        FieldShape::One => Expr::Expand(Path::field(field).deref(), projection.clone()),
        FieldShape::Many => Expr::Resolved(Path::field(field).each().deref(), projection.clone()),
    }
}

/// Projects `field` under its current name, falling back to the retired field
///
/// `projection` shapes expanded references and is ignored for plain values.
pub fn renamed(doc_type: DocType, field: &'static str, projection: Projection) -> Selection {
    match FIELD_RENAMES
        .iter()
        .find(|rename| rename.doc_type == doc_type && rename.current == field)
    {
        Some(rename) => {
            let current = read(rename.current, rename.current_shape, &projection);
            let retired = read(rename.retired, rename.retired_shape, &projection);
            let expr = match rename.current_shape {
                FieldShape::Many => Expr::NonEmptyOr(Box::new(current), Box::new(retired)),
                _ => Expr::Coalesce(vec![current, retired]),
            };
            Selection::named(field, expr)
        }
        None => Selection::Field(field),
    }
}

impl Document {
    #[deprecated(note = "use `Document::is_person`")]
    pub fn is_artist(&self) -> bool {
        self.is_person()
    }
}

impl<B: Backend> ContentClient<B> {
    #[deprecated(note = "use `get_all_people`")]
    pub async fn get_all_artists(&self) -> Result<Vec<Person>> {
        self.get_all_people().await
    }

    #[deprecated(note = "use `get_person_by_slug`")]
    pub async fn get_artist_by_slug(&self, slug: &str) -> Result<Option<Person>> {
        self.get_person_by_slug(slug).await
    }

    #[deprecated(note = "use `get_artworks_by_person`")]
    pub async fn get_artworks_by_artist(&self, slug: &str) -> Result<Vec<Artwork>> {
        self.get_artworks_by_person(slug).await
    }
}
