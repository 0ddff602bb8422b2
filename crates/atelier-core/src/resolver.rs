//! Reference expansion directives
//!
//! References are joined at query time. Forward expansions replace an id-only
//! reference with a projected sub-object; reverse joins and counts scan the
//! corpus for documents pointing back at the one being projected. Nothing is
//! stored, so a reference to a missing document simply comes back `null`.

use crate::groq::{Expr, Filter, Order, Path, Projection, Query, RefTarget, Selection};
use crate::models::DocType;

/// How a reverse join recognises documents pointing at the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backlink {
    /// Any reference anywhere in the document, `references(^._id)`
    Any,
    /// One specific single-reference field, `field._ref == ^._id`
    Field(&'static str),
}

impl Backlink {
    fn filter(self) -> Filter {
        match self {
            Backlink::Any => Filter::references(RefTarget::Parent),
            Backlink::Field(field) => Filter::eq(Path::field(field).dot("_ref"), Path::parent("_id")),
        }
    }
}

/// `"field": field->{...}`
pub fn expand_one(field: &'static str, projection: Projection) -> Selection {
    Selection::named(field, Expr::Expand(Path::field(field).deref(), projection))
}

/// `"field": field[]->{...}`
pub fn expand_many(field: &'static str, projection: Projection) -> Selection {
    Selection::named(
        field,
        Expr::Expand(Path::field(field).each().deref(), projection),
    )
}

/// `"field": field[]->target`, a scalar read through each reference
pub fn follow_many(field: &'static str, target: &'static str) -> Selection {
    Selection::named(field, Expr::Path(Path::field(field).each().deref().dot(target)))
}

fn backlink_filter(doc_type: DocType, backlink: Backlink) -> Filter {
    Filter::doc_type(doc_type).and(backlink.filter())
}

/// Documents of `doc_type` that point at the current document
pub fn reverse(
    doc_type: DocType,
    backlink: Backlink,
    order: Vec<Order>,
    projection: Projection,
) -> Expr {
    Expr::Subquery(Box::new(
        Query::new(backlink_filter(doc_type, backlink))
            .order_by(order)
            .project(projection),
    ))
}

/// Number of `doc_type` documents pointing at the current document
pub fn count(doc_type: DocType, backlink: Backlink) -> Expr {
    Expr::Count(Box::new(backlink_filter(doc_type, backlink)))
}

/// Filter matching documents that reference any document selected by `target`
pub fn references_any(target: Filter) -> Filter {
    Filter::references(RefTarget::IdsOf(Box::new(target)))
}
