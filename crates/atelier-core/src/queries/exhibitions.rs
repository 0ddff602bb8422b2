//! Exhibitions, split by their editorial status

use crate::client::{ContentClient, Prepared};
use crate::error::Result;
use crate::groq::{Bound, Filter, Literal, Operand, Order, Query};
use crate::models::{DocType, Exhibition, ExhibitionStatus};
use crate::params::Params;
use crate::projection::{self, order};
use crate::store::Backend;

pub const PAST_LIMIT: usize = 20;

fn exhibitions() -> Filter {
    Filter::doc_type(DocType::Exhibition)
}

fn with_status(status: ExhibitionStatus) -> Filter {
    exhibitions().and(Filter::eq(
        Operand::field("status"),
        Operand::Literal(Literal::Str(status.as_str())),
    ))
}

fn listing(filter: Filter, order: Vec<Order>, context: &str) -> Prepared {
    Prepared::new(
        Query::new(filter)
            .order_by(order)
            .project(projection::exhibition()),
        context,
    )
}

pub fn all() -> Prepared {
    listing(exhibitions(), order::exhibitions(), "all exhibitions")
}

/// Soonest first
pub fn upcoming() -> Prepared {
    listing(
        with_status(ExhibitionStatus::Upcoming),
        order::upcoming_exhibitions(),
        "upcoming exhibitions",
    )
}

pub fn current() -> Prepared {
    listing(
        with_status(ExhibitionStatus::Current),
        order::exhibitions(),
        "current exhibitions",
    )
}

pub fn past(limit: usize) -> Prepared {
    Prepared::new(
        Query::new(with_status(ExhibitionStatus::Past))
            .order_by(order::exhibitions())
            .range(Bound::At(0), Bound::Param("limit"))
            .project(projection::exhibition()),
        "past exhibitions",
    )
    .with_params(Params::new().bind("limit", limit))
}

pub fn by_slug(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(exhibitions().and(Filter::slug_is("slug")))
            .first()
            .project(projection::exhibition()),
        format!("exhibition: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_exhibitions(&self) -> Result<Vec<Exhibition>> {
        self.run(all()).await
    }

    pub async fn get_upcoming_exhibitions(&self) -> Result<Vec<Exhibition>> {
        self.run(upcoming()).await
    }

    pub async fn get_current_exhibitions(&self) -> Result<Vec<Exhibition>> {
        self.run(current()).await
    }

    pub async fn get_past_exhibitions(&self, limit: usize) -> Result<Vec<Exhibition>> {
        self.run(past(limit)).await
    }

    pub async fn get_exhibition_by_slug(&self, slug: &str) -> Result<Option<Exhibition>> {
        self.run(by_slug(slug)).await
    }
}
