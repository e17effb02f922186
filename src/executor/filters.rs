//! Attribute filters for close approaches
//!
//! Each filter reads one attribute of an approach (or of its linked NEO)
//! and compares it to a reference value. No type coercion: a value of the
//! wrong kind, an unknown diameter, or a missing NEO never matches.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use super::predicate::{FilterSet, Predicate};
use super::record::ApproachRecord;

/// Filterable attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Calendar date of closest approach
    Date,
    /// Nominal approach distance (au)
    Distance,
    /// Relative approach velocity (km/s)
    Velocity,
    /// NEO diameter (km)
    Diameter,
    /// NEO potentially-hazardous flag
    Hazardous,
}

impl Attribute {
    /// Reads the attribute from a record
    pub fn get(&self, record: &ApproachRecord<'_>) -> Option<AttributeValue> {
        match self {
            Attribute::Date => Some(AttributeValue::Date(record.time.date())),
            Attribute::Distance => Some(AttributeValue::Float(record.distance)),
            Attribute::Velocity => Some(AttributeValue::Float(record.velocity)),
            Attribute::Diameter => record
                .neo()
                .and_then(|neo| neo.diameter)
                .map(AttributeValue::Float),
            Attribute::Hazardous => record.neo().map(|neo| AttributeValue::Bool(neo.hazardous)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Date => "date",
            Attribute::Distance => "distance",
            Attribute::Velocity => "velocity",
            Attribute::Diameter => "diameter",
            Attribute::Hazardous => "hazardous",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// attribute == value
    Eq,
    /// attribute >= value
    Ge,
    /// attribute <= value
    Le,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Ge => ordering != Ordering::Less,
            Comparison::Le => ordering != Ordering::Greater,
        }
    }
}

/// Values an attribute can take
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    Date(NaiveDate),
    Float(f64),
    Bool(bool),
}

impl AttributeValue {
    /// Orders two values of the same kind; `None` across kinds or for NaN
    fn compare(&self, other: &AttributeValue) -> Option<Ordering> {
        match (self, other) {
            (AttributeValue::Date(a), AttributeValue::Date(b)) => Some(a.cmp(b)),
            (AttributeValue::Float(a), AttributeValue::Float(b)) => a.partial_cmp(b),
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Date(d) => write!(f, "{}", d),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// `attribute <comparison> value`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeFilter {
    pub attribute: Attribute,
    pub comparison: Comparison,
    pub value: AttributeValue,
}

impl AttributeFilter {
    pub fn new(attribute: Attribute, comparison: Comparison, value: AttributeValue) -> Self {
        Self {
            attribute,
            comparison,
            value,
        }
    }

    pub fn date(comparison: Comparison, date: NaiveDate) -> Self {
        Self::new(Attribute::Date, comparison, AttributeValue::Date(date))
    }

    pub fn distance(comparison: Comparison, au: f64) -> Self {
        Self::new(Attribute::Distance, comparison, AttributeValue::Float(au))
    }

    pub fn velocity(comparison: Comparison, km_s: f64) -> Self {
        Self::new(Attribute::Velocity, comparison, AttributeValue::Float(km_s))
    }

    pub fn diameter(comparison: Comparison, km: f64) -> Self {
        Self::new(Attribute::Diameter, comparison, AttributeValue::Float(km))
    }

    pub fn hazardous(hazardous: bool) -> Self {
        Self::new(
            Attribute::Hazardous,
            Comparison::Eq,
            AttributeValue::Bool(hazardous),
        )
    }
}

impl Predicate for AttributeFilter {
    fn test(&self, record: &ApproachRecord<'_>) -> bool {
        self.attribute
            .get(record)
            .and_then(|actual| actual.compare(&self.value))
            .map_or(false, |ordering| self.comparison.accepts(ordering))
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.attribute.as_str(),
            self.comparison.as_str(),
            self.value
        )
    }
}

/// User-supplied query criteria; every field is optional
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterCriteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

/// Builds one attribute filter per supplied criterion.
pub fn create_filters(criteria: &FilterCriteria) -> FilterSet {
    let mut filters: Vec<AttributeFilter> = Vec::new();

    if let Some(date) = criteria.date {
        filters.push(AttributeFilter::date(Comparison::Eq, date));
    }
    if let Some(date) = criteria.start_date {
        filters.push(AttributeFilter::date(Comparison::Ge, date));
    }
    if let Some(date) = criteria.end_date {
        filters.push(AttributeFilter::date(Comparison::Le, date));
    }
    if let Some(au) = criteria.distance_min {
        filters.push(AttributeFilter::distance(Comparison::Ge, au));
    }
    if let Some(au) = criteria.distance_max {
        filters.push(AttributeFilter::distance(Comparison::Le, au));
    }
    if let Some(km_s) = criteria.velocity_min {
        filters.push(AttributeFilter::velocity(Comparison::Ge, km_s));
    }
    if let Some(km_s) = criteria.velocity_max {
        filters.push(AttributeFilter::velocity(Comparison::Le, km_s));
    }
    if let Some(km) = criteria.diameter_min {
        filters.push(AttributeFilter::diameter(Comparison::Ge, km));
    }
    if let Some(km) = criteria.diameter_max {
        filters.push(AttributeFilter::diameter(Comparison::Le, km));
    }
    if let Some(hazardous) = criteria.hazardous {
        filters.push(AttributeFilter::hazardous(hazardous));
    }

    filters
        .into_iter()
        .map(|f| Box::new(f) as Box<dyn Predicate>)
        .collect()
}
