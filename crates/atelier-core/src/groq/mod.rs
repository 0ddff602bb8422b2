//! Typed GROQ expressions
//!
//! Queries are built from these types and rendered to GROQ text only at the
//! execution boundary. Identifiers (field, parameter and alias names) are
//! `&'static str`, so caller input can only ever reach a query as a bound
//! parameter.
//!
//! ```text
//! Query::new(Filter::doc_type(DocType::Person))
//!     .order(Order::asc("lastName"))
//!     .project(Projection::new().fields(&["_id", "firstName", "lastName"]))
//!
//! *[_type == "person"] | order(lastName asc) {_id, firstName, lastName}
//! ```

mod render;

use std::collections::BTreeSet;

use crate::models::DocType;

/// One step of a path
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// `.name`
    Field(&'static str),
    /// `->`, follow a reference to its target document
    Deref,
    /// `[]`, apply the rest of the path to every array element
    Each,
}

/// Where a path starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The document being filtered or projected (`@`)
    This,
    /// The enclosing document of a subquery (`^`)
    Parent,
}

/// An attribute path such as `techniques[]->slug.current`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub scope: Scope,
    pub segments: Vec<Segment>,
}

impl Path {
    /// A field of the current document
    pub fn field(name: &'static str) -> Self {
        Self {
            scope: Scope::This,
            segments: vec![Segment::Field(name)],
        }
    }

    /// A field of the enclosing document
    pub fn parent(name: &'static str) -> Self {
        Self {
            scope: Scope::Parent,
            segments: vec![Segment::Field(name)],
        }
    }

    pub fn dot(mut self, name: &'static str) -> Self {
        self.segments.push(Segment::Field(name));
        self
    }

    pub fn deref(mut self) -> Self {
        self.segments.push(Segment::Deref);
        self
    }

    pub fn each(mut self) -> Self {
        self.segments.push(Segment::Each);
        self
    }
}

/// A constant inside query text
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

/// Value side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Path(Path),
    /// `$name`, resolved from the bound parameters
    Param(&'static str),
    Literal(Literal),
    /// `pt::text(path)`, the plain text of a rich-text field
    PlainText(Path),
    /// `*[filter].path`, the path read from every matching document
    ValuesOf(Box<Filter>, Path),
}

impl Operand {
    pub fn field(name: &'static str) -> Self {
        Operand::Path(Path::field(name))
    }

    pub fn values_of(filter: Filter, path: Path) -> Self {
        Operand::ValuesOf(Box::new(filter), path)
    }
}

impl From<Path> for Operand {
    fn from(path: Path) -> Self {
        Operand::Path(path)
    }
}

/// What a `references(...)` test points at
#[derive(Debug, Clone, PartialEq)]
pub enum RefTarget {
    /// `^._id`, the enclosing document
    Parent,
    /// `*[filter]._id`, every document matching the filter
    IdsOf(Box<Filter>),
}

/// Boolean constraint inside `*[...]`
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Type(DocType),
    /// `_type in [...]`
    AnyType(Vec<DocType>),
    Eq(Operand, Operand),
    /// `left in right`, where right evaluates to an array
    In(Operand, Operand),
    /// Case-insensitive word/wildcard match
    Match(Operand, Operand),
    Defined(Path),
    References(RefTarget),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn doc_type(doc_type: DocType) -> Self {
        Filter::Type(doc_type)
    }

    /// Matches any of the given types; a single type collapses to `_type == ...`
    pub fn doc_types(types: &[DocType]) -> Self {
        match types {
            [single] => Filter::Type(*single),
            _ => Filter::AnyType(types.to_vec()),
        }
    }

    pub fn eq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Filter::Eq(left.into(), right.into())
    }

    /// `path == $param`
    pub fn param_eq(path: Path, param: &'static str) -> Self {
        Filter::Eq(Operand::Path(path), Operand::Param(param))
    }

    /// `slug.current == $param`
    pub fn slug_is(param: &'static str) -> Self {
        Filter::param_eq(Path::field("slug").dot("current"), param)
    }

    /// `field == true`
    pub fn is_true(field: &'static str) -> Self {
        Filter::Eq(Operand::field(field), Operand::Literal(Literal::Bool(true)))
    }

    pub fn defined(path: Path) -> Self {
        Filter::Defined(path)
    }

    pub fn references(target: RefTarget) -> Self {
        Filter::References(target)
    }

    /// Conjunction, flattening nested `And`s
    pub fn and(self, other: Filter) -> Self {
        let mut terms = match self {
            Filter::And(terms) => terms,
            single => vec![single],
        };
        match other {
            Filter::And(more) => terms.extend(more),
            single => terms.push(single),
        }
        Filter::And(terms)
    }

    pub fn any(terms: Vec<Filter>) -> Self {
        Filter::Or(terms)
    }

    pub fn negate(self) -> Self {
        Filter::Not(Box::new(self))
    }
}

impl std::ops::Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        self.negate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One sort key of an `order(...)` pipe
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub path: Path,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: &'static str) -> Self {
        Self {
            path: Path::field(field),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            path: Path::field(field),
            direction: Direction::Desc,
        }
    }
}

/// A slice bound, either fixed or taken from a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    At(usize),
    Param(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    /// `[0]`, a single document or `null`
    First,
    /// `[start...end]`, end exclusive
    Range(Bound, Bound),
}

/// Right-hand side of a named projection entry
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(Path),
    /// A path ending at a document (or documents), then projected
    Expand(Path, Projection),
    /// A nested query evaluated once per projected document
    Subquery(Box<Query>),
    /// `count(*[filter])`
    Count(Box<Filter>),
    /// First non-null alternative
    Coalesce(Vec<Expr>),
    /// An expanded array with `[defined(_id)]` applied, so dangling
    /// references leave no `null` behind
    Resolved(Path, Projection),
    /// `select(count(first) > 0 => first, fallback)`
    NonEmptyOr(Box<Expr>, Box<Expr>),
}

/// One entry of a projection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Copy a field under its own name
    Field(&'static str),
    /// `"name": expr`
    Named(&'static str, Expr),
    /// `filter => {...}`, merged in only when the document matches
    When(Filter, Projection),
}

impl Selection {
    pub fn named(name: &'static str, expr: Expr) -> Self {
        Selection::Named(name, expr)
    }
}

/// A `{...}` field selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub selections: Vec<Selection>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str) -> Self {
        self.selections.push(Selection::Field(name));
        self
    }

    pub fn fields(mut self, names: &[&'static str]) -> Self {
        self.selections
            .extend(names.iter().copied().map(Selection::Field));
        self
    }

    pub fn select(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    /// Append every selection of `other`
    pub fn extend(mut self, other: Projection) -> Self {
        self.selections.extend(other.selections);
        self
    }

    /// Output field names this projection can produce
    pub fn field_names(&self) -> BTreeSet<&'static str> {
        let mut names = BTreeSet::new();
        for selection in &self.selections {
            match selection {
                Selection::Field(name) | Selection::Named(name, _) => {
                    names.insert(*name);
                }
                Selection::When(_, branch) => names.extend(branch.field_names()),
            }
        }
        names
    }

    pub fn is_subset_of(&self, other: &Projection) -> bool {
        self.field_names().is_subset(&other.field_names())
    }
}

/// `*[filter] | order(...) [slice] {projection}`
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub order: Vec<Order>,
    pub slice: Option<Slice>,
    pub projection: Option<Projection>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            order: Vec::new(),
            slice: None,
            projection: None,
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn order_by(mut self, orders: Vec<Order>) -> Self {
        self.order.extend(orders);
        self
    }

    /// Return the first match only
    pub fn first(mut self) -> Self {
        self.slice = Some(Slice::First);
        self
    }

    pub fn range(mut self, start: Bound, end: Bound) -> Self {
        self.slice = Some(Slice::Range(start, end));
        self
    }

    /// `[0...limit]`
    pub fn limit(self, limit: usize) -> Self {
        self.range(Bound::At(0), Bound::At(limit))
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// True when the query yields one document (or `null`) rather than an array
    pub fn is_single(&self) -> bool {
        matches!(self.slice, Some(Slice::First))
    }
}
