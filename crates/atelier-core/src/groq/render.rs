//! GROQ text rendering

use std::fmt::{self, Display, Formatter, Write as _};

use serde_json::Value;

use super::{
    Bound, Direction, Expr, Filter, Literal, Operand, Order, Path, Projection, Query, RefTarget,
    Scope, Segment, Selection, Slice,
};

fn join<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut needs_dot = match self.scope {
            Scope::This => {
                if self.segments.is_empty() {
                    return f.write_char('@');
                }
                false
            }
            Scope::Parent => {
                f.write_char('^')?;
                true
            }
        };

        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    if needs_dot {
                        f.write_char('.')?;
                    }
                    f.write_str(name)?;
                    needs_dot = true;
                }
                Segment::Deref => {
                    f.write_str("->")?;
                    needs_dot = false;
                }
                Segment::Each => {
                    f.write_str("[]")?;
                    needs_dot = true;
                }
            }
        }
        Ok(())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Str(s) => write!(f, "{}", Value::String((*s).to_string())),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Path(path) => write!(f, "{}", path),
            Operand::Param(name) => write!(f, "${}", name),
            Operand::Literal(literal) => write!(f, "{}", literal),
            Operand::PlainText(path) => write!(f, "pt::text({})", path),
            Operand::ValuesOf(filter, path) => write!(f, "*[{}].{}", filter, path),
        }
    }
}

impl Display for RefTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Parent => f.write_str("^._id"),
            RefTarget::IdsOf(filter) => write!(f, "*[{}]._id", filter),
        }
    }
}

/// Writes a filter as an operand of `&&`/`||`/`!`, parenthesising compound terms
fn grouped(f: &mut Formatter<'_>, filter: &Filter) -> fmt::Result {
    match filter {
        Filter::And(_) | Filter::Or(_) => write!(f, "({})", filter),
        _ => write!(f, "{}", filter),
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Type(doc_type) => write!(f, "_type == \"{}\"", doc_type),
            Filter::AnyType(types) => {
                f.write_str("_type in [")?;
                for (i, doc_type) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{}\"", doc_type)?;
                }
                f.write_char(']')
            }
            Filter::Eq(left, right) => write!(f, "{} == {}", left, right),
            Filter::In(left, right) => write!(f, "{} in {}", left, right),
            Filter::Match(left, right) => write!(f, "{} match {}", left, right),
            Filter::Defined(path) => write!(f, "defined({})", path),
            Filter::References(target) => write!(f, "references({})", target),
            Filter::And(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" && ")?;
                    }
                    grouped(f, term)?;
                }
                Ok(())
            }
            Filter::Or(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" || ")?;
                    }
                    grouped(f, term)?;
                }
                Ok(())
            }
            Filter::Not(inner) => match inner.as_ref() {
                Filter::Defined(_) | Filter::References(_) => write!(f, "!{}", inner),
                _ => write!(f, "!({})", inner),
            },
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{} {}", self.path, direction)
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Bound::At(n) => write!(f, "{}", n),
            Bound::Param(name) => write!(f, "${}", name),
        }
    }
}

impl Display for Slice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Slice::First => f.write_str("[0]"),
            Slice::Range(start, end) => write!(f, "[{}...{}]", start, end),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Path(path) => write!(f, "{}", path),
            Expr::Expand(path, projection) => write!(f, "{}{}", path, projection),
            Expr::Subquery(query) => write!(f, "{}", query),
            Expr::Count(filter) => write!(f, "count(*[{}])", filter),
            Expr::Coalesce(alternatives) => {
                f.write_str("coalesce(")?;
                join(f, alternatives, ", ")?;
                f.write_char(')')
            }
            Expr::Resolved(path, projection) => {
                write!(f, "{}{}[defined(_id)]", path, projection)
            }
            Expr::NonEmptyOr(first, fallback) => {
                write!(f, "select(count({0}) > 0 => {0}, {1})", first, fallback)
            }
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Field(name) => f.write_str(name),
            Selection::Named(name, expr) => write!(f, "\"{}\": {}", name, expr),
            Selection::When(filter, projection) => write!(f, "{} => {}", filter, projection),
        }
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        join(f, &self.selections, ", ")?;
        f.write_char('}')
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "*[{}]", self.filter)?;
        if !self.order.is_empty() {
            f.write_str(" | order(")?;
            join(f, &self.order, ", ")?;
            f.write_char(')')?;
        }
        if let Some(slice) = &self.slice {
            if !self.order.is_empty() {
                f.write_char(' ')?;
            }
            write!(f, "{}", slice)?;
        }
        if let Some(projection) = &self.projection {
            write!(f, " {}", projection)?;
        }
        Ok(())
    }
}
