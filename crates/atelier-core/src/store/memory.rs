//! In-memory query evaluation
//!
//! Holds published documents in insertion order with an id → position index,
//! and evaluates the typed query AST directly against them. References are
//! joined on every evaluation; nothing is materialised between queries.
//!
//! Semantics follow the hosted store where the query layer depends on them:
//!
//! - a reference to a missing document dereferences to `null`
//! - `drafts.` documents are never loaded
//! - `match` compares lowercase alphanumeric words; `*` in a pattern word is a
//!   wildcard and every pattern word must match some word of the text
//! - `order` is stable and puts `null` keys after every value in either direction

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use serde_json::{Map, Value};

use super::Backend;
use crate::error::BackendError;
use crate::groq::{
    Bound, Direction, Expr, Filter, Literal, Operand, Order, Path, Projection, Query, RefTarget,
    Scope, Segment, Selection, Slice,
};
use crate::models::portable_text::plain_text_value;
use crate::params::Params;

const DRAFT_PREFIX: &str = "drafts.";

/// A dataset held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Vec<Value>,
    index: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from documents; drafts are skipped
    pub fn from_documents(docs: impl IntoIterator<Item = Value>) -> Result<Self, BackendError> {
        let mut store = Self::new();
        for doc in docs {
            store.insert(doc)?;
        }
        Ok(store)
    }

    /// Load a dataset export: one JSON document per line
    pub fn from_ndjson(reader: impl BufRead) -> Result<Self, BackendError> {
        let mut store = Self::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                BackendError::MalformedResponse(format!("line {}: {}", number + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(&line)?;
            store.insert(doc).map_err(|e| {
                BackendError::MalformedResponse(format!("line {}: {}", number + 1, e))
            })?;
        }
        tracing::debug!(documents = store.len(), "Loaded dataset export");
        Ok(store)
    }

    /// Add or replace a document by `_id`
    pub fn insert(&mut self, doc: Value) -> Result<(), BackendError> {
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::MalformedResponse("document has no _id".into()))?
            .to_string();

        if id.starts_with(DRAFT_PREFIX) {
            tracing::trace!(%id, "Skipping draft document");
            return Ok(());
        }

        match self.index.get(&id) {
            Some(&position) => self.docs[position] = doc,
            None => {
                self.index.insert(id, self.docs.len());
                self.docs.push(doc);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.index.get(id).map(|&position| &self.docs[position])
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Evaluate a query synchronously
    pub fn evaluate(&self, query: &Query, params: &Params) -> Result<Value, BackendError> {
        Evaluator {
            store: self,
            params,
        }
        .query(query, None)
    }
}

impl Backend for MemoryStore {
    async fn execute(&self, query: &Query, params: &Params) -> Result<Value, BackendError> {
        self.evaluate(query, params)
    }
}

#[derive(Clone, Copy)]
struct Frame<'v> {
    this: &'v Value,
    parent: Option<&'v Value>,
}

struct Evaluator<'a> {
    store: &'a MemoryStore,
    params: &'a Params,
}

impl Evaluator<'_> {
    fn query(&self, query: &Query, parent: Option<&Value>) -> Result<Value, BackendError> {
        let mut matched = Vec::new();
        for doc in &self.store.docs {
            if self.filter(&query.filter, Frame { this: doc, parent })? {
                matched.push(doc);
            }
        }

        if !query.order.is_empty() {
            self.sort(&mut matched, &query.order, parent);
        }

        let selected: Vec<&Value> = match &query.slice {
            None => matched,
            Some(Slice::First) => matched.into_iter().take(1).collect(),
            Some(Slice::Range(start, end)) => {
                let start = self.bound(start)?.min(matched.len());
                let end = self.bound(end)?.clamp(start, matched.len());
                matched[start..end].to_vec()
            }
        };

        let mut results = Vec::with_capacity(selected.len());
        for doc in selected {
            results.push(match &query.projection {
                Some(projection) => self.project(projection, Frame { this: doc, parent })?,
                None => doc.clone(),
            });
        }

        if query.is_single() {
            Ok(results.into_iter().next().unwrap_or(Value::Null))
        } else {
            Ok(Value::Array(results))
        }
    }

    fn bound(&self, bound: &Bound) -> Result<usize, BackendError> {
        match bound {
            Bound::At(n) => Ok(*n),
            Bound::Param(name) => {
                let value = self.param(name)?;
                value
                    .as_i64()
                    .map(|n| usize::try_from(n).unwrap_or(0))
                    .ok_or_else(|| {
                        BackendError::Evaluation(format!(
                            "slice bound ${} must be an integer, got {}",
                            name, value
                        ))
                    })
            }
        }
    }

    fn param(&self, name: &str) -> Result<Value, BackendError> {
        self.params
            .get(name)
            .map(|value| value.to_json())
            .ok_or_else(|| BackendError::Evaluation(format!("parameter ${} is not bound", name)))
    }

    fn sort(&self, docs: &mut Vec<&Value>, order: &[Order], parent: Option<&Value>) {
        let mut keyed: Vec<(Vec<Value>, &Value)> = docs
            .iter()
            .map(|&doc| {
                let keys = order
                    .iter()
                    .map(|o| self.path(&o.path, Frame { this: doc, parent }))
                    .collect();
                (keys, doc)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            for ((left, right), key) in a.iter().zip(b).zip(order) {
                let ordering = compare_keys(left, right, key.direction);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        *docs = keyed.into_iter().map(|(_, doc)| doc).collect();
    }

    fn path(&self, path: &Path, frame: Frame<'_>) -> Value {
        let start = match path.scope {
            Scope::This => frame.this,
            Scope::Parent => match frame.parent {
                Some(parent) => parent,
                None => return Value::Null,
            },
        };

        let mut current = start.clone();
        let mut fanned = false;
        for segment in &path.segments {
            current = match (segment, fanned) {
                (Segment::Each, false) => {
                    fanned = true;
                    match current {
                        Value::Array(_) => current,
                        _ => return Value::Null,
                    }
                }
                (Segment::Each, true) => match current {
                    Value::Array(items) => Value::Array(
                        items
                            .into_iter()
                            .filter_map(|item| match item {
                                Value::Array(inner) => Some(inner),
                                _ => None,
                            })
                            .flatten()
                            .collect(),
                    ),
                    other => other,
                },
                (step, true) => match current {
                    Value::Array(items) => Value::Array(
                        items.into_iter().map(|item| self.step(step, item)).collect(),
                    ),
                    other => other,
                },
                (step, false) => self.step(step, current),
            };
        }
        current
    }

    fn step(&self, segment: &Segment, value: Value) -> Value {
        match segment {
            Segment::Field(name) => match value {
                Value::Object(mut map) => map.remove(*name).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            Segment::Deref => value
                .get("_ref")
                .and_then(Value::as_str)
                .and_then(|id| self.store.get(id))
                .cloned()
                .unwrap_or(Value::Null),
            Segment::Each => value,
        }
    }

    fn operand(&self, operand: &Operand, frame: Frame<'_>) -> Result<Value, BackendError> {
        Ok(match operand {
            Operand::Path(path) => self.path(path, frame),
            Operand::Param(name) => self.param(name)?,
            Operand::Literal(literal) => literal_value(literal),
            Operand::PlainText(path) => match self.path(path, frame) {
                blocks @ Value::Array(_) => Value::String(plain_text_value(&blocks)),
                _ => Value::Null,
            },
            Operand::ValuesOf(filter, path) => {
                let mut values = Vec::new();
                for doc in &self.store.docs {
                    let inner = Frame {
                        this: doc,
                        parent: Some(frame.this),
                    };
                    if self.filter(filter, inner)? {
                        values.push(self.path(path, inner));
                    }
                }
                Value::Array(values)
            }
        })
    }

    fn filter(&self, filter: &Filter, frame: Frame<'_>) -> Result<bool, BackendError> {
        Ok(match filter {
            Filter::Type(doc_type) => type_of(frame.this) == Some(doc_type.as_str()),
            Filter::AnyType(types) => {
                let actual = type_of(frame.this);
                types.iter().any(|t| actual == Some(t.as_str()))
            }
            Filter::Eq(left, right) => {
                values_equal(&self.operand(left, frame)?, &self.operand(right, frame)?)
            }
            Filter::In(needle, haystack) => {
                let needle = self.operand(needle, frame)?;
                match self.operand(haystack, frame)? {
                    Value::Array(items) => items.iter().any(|item| values_equal(&needle, item)),
                    _ => false,
                }
            }
            Filter::Match(text, pattern) => {
                text_matches(&self.operand(text, frame)?, &self.operand(pattern, frame)?)
            }
            Filter::Defined(path) => !self.path(path, frame).is_null(),
            Filter::References(target) => {
                let ids = self.reference_targets(target, frame)?;
                !ids.is_empty() && references_any(frame.this, &ids)
            }
            Filter::And(terms) => {
                for term in terms {
                    if !self.filter(term, frame)? {
                        return Ok(false);
                    }
                }
                true
            }
            Filter::Or(terms) => {
                for term in terms {
                    if self.filter(term, frame)? {
                        return Ok(true);
                    }
                }
                false
            }
            Filter::Not(inner) => !self.filter(inner, frame)?,
        })
    }

    fn reference_targets(
        &self,
        target: &RefTarget,
        frame: Frame<'_>,
    ) -> Result<HashSet<String>, BackendError> {
        let mut ids = HashSet::new();
        match target {
            RefTarget::Parent => {
                if let Some(id) = frame.parent.and_then(|p| p.get("_id")).and_then(Value::as_str) {
                    ids.insert(id.to_string());
                }
            }
            RefTarget::IdsOf(filter) => {
                for doc in &self.store.docs {
                    if self.filter(filter, Frame { this: doc, parent: Some(frame.this) })? {
                        if let Some(id) = doc.get("_id").and_then(Value::as_str) {
                            ids.insert(id.to_string());
                        }
                    }
                }
            }
        }
        Ok(ids)
    }

    fn project(&self, projection: &Projection, frame: Frame<'_>) -> Result<Value, BackendError> {
        let Value::Object(source) = frame.this else {
            return Ok(Value::Null);
        };

        let mut out = Map::new();
        self.project_into(projection, source, frame, &mut out)?;
        Ok(Value::Object(out))
    }

    fn project_into(
        &self,
        projection: &Projection,
        source: &Map<String, Value>,
        frame: Frame<'_>,
        out: &mut Map<String, Value>,
    ) -> Result<(), BackendError> {
        for selection in &projection.selections {
            match selection {
                Selection::Field(name) => {
                    let value = source.get(*name).cloned().unwrap_or(Value::Null);
                    out.insert((*name).to_string(), value);
                }
                Selection::Named(name, expr) => {
                    let value = self.expr(expr, frame)?;
                    out.insert((*name).to_string(), value);
                }
                Selection::When(condition, branch) => {
                    if self.filter(condition, frame)? {
                        self.project_into(branch, source, frame, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn expand(
        &self,
        path: &Path,
        projection: &Projection,
        frame: Frame<'_>,
    ) -> Result<Value, BackendError> {
        let project_one = |value: &Value| -> Result<Value, BackendError> {
            self.project(
                projection,
                Frame {
                    this: value,
                    parent: Some(frame.this),
                },
            )
        };
        match self.path(path, frame) {
            Value::Array(items) => Ok(Value::Array(
                items.iter().map(project_one).collect::<Result<_, _>>()?,
            )),
            value @ Value::Object(_) => project_one(&value),
            _ => Ok(Value::Null),
        }
    }

    fn expr(&self, expr: &Expr, frame: Frame<'_>) -> Result<Value, BackendError> {
        match expr {
            Expr::Path(path) => Ok(self.path(path, frame)),
            Expr::Expand(path, projection) => self.expand(path, projection, frame),
            Expr::Resolved(path, projection) => match self.expand(path, projection, frame)? {
                Value::Array(items) => Ok(Value::Array(
                    items
                        .into_iter()
                        .filter(|item| item.get("_id").is_some_and(|id| !id.is_null()))
                        .collect(),
                )),
                _ => Ok(Value::Null),
            },
            Expr::NonEmptyOr(first, fallback) => match self.expr(first, frame)? {
                Value::Array(items) if !items.is_empty() => Ok(Value::Array(items)),
                _ => self.expr(fallback, frame),
            },
            Expr::Subquery(query) => self.query(query, Some(frame.this)),
            Expr::Count(filter) => {
                let mut count = 0u64;
                for doc in &self.store.docs {
                    if self.filter(filter, Frame { this: doc, parent: Some(frame.this) })? {
                        count += 1;
                    }
                }
                Ok(Value::from(count))
            }
            Expr::Coalesce(alternatives) => {
                for alternative in alternatives {
                    let value = self.expr(alternative, frame)?;
                    if !value.is_null() {
                        return Ok(value);
                    }
                }
                Ok(Value::Null)
            }
        }
    }
}

fn type_of(doc: &Value) -> Option<&str> {
    doc.get("_type").and_then(Value::as_str)
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(n) => Value::from(*n),
        Literal::Str(s) => Value::String((*s).to_string()),
    }
}

/// Equality as the store compares: numbers by value, `null` equal to nothing
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

fn compare_keys(left: &Value, right: &Value, direction: Direction) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    };

    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// True if any `_ref` inside `value` names one of `ids`
fn references_any(value: &Value, ids: &HashSet<String>) -> bool {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(id)) = map.get("_ref") {
                if ids.contains(id) {
                    return true;
                }
            }
            map.values().any(|v| references_any(v, ids))
        }
        Value::Array(items) => items.iter().any(|v| references_any(v, ids)),
        _ => false,
    }
}

fn words(text: &str, keep_wildcards: bool) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || (keep_wildcards && c == '*')))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn strings(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// `text match pattern`
fn text_matches(text: &Value, pattern: &Value) -> bool {
    let text_words: Vec<String> = strings(text).into_iter().flat_map(|s| words(s, false)).collect();
    let pattern_words: Vec<String> = strings(pattern)
        .into_iter()
        .flat_map(|s| words(s, true))
        .filter(|w| w.chars().any(|c| c != '*'))
        .collect();

    if text_words.is_empty() || pattern_words.is_empty() {
        return false;
    }

    pattern_words
        .iter()
        .all(|p| text_words.iter().any(|w| glob(p, w)))
}

/// Wildcard match where `*` stands for any run of characters
fn glob(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
