use std::cmp::Reverse;
use std::str::FromStr;

use serde::Deserialize;

use super::domain::{check_marks, Student};
use crate::errors::ServiceError;

/// Raw listing parameters as they arrive on the query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub class: Option<String>,
    pub min_marks: Option<i64>,
    pub max_marks: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Marks,
    Class,
}

impl FromStr for SortField {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "marks" => Ok(Self::Marks),
            "class" | "student_class" => Ok(Self::Class),
            _ => Err(ServiceError::invalid_argument("Invalid sort_by field")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only an exact, lowercase `desc` reverses; anything else sorts ascending.
    pub fn parse_lenient(s: Option<&str>) -> Self {
        match s {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Validated listing parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub class: Option<String>,
    pub min_marks: Option<u8>,
    pub max_marks: Option<u8>,
    pub sort: Option<(SortField, SortOrder)>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Number(u8),
}

impl SortField {
    fn key(self, s: &Student) -> SortKey {
        match self {
            Self::Name => SortKey::Text(s.name.to_lowercase()),
            Self::Class => SortKey::Text(s.class.to_lowercase()),
            Self::Marks => SortKey::Number(s.marks),
        }
    }
}

impl TryFrom<ListQuery> for ListFilter {
    type Error = ServiceError;

    fn try_from(q: ListQuery) -> Result<Self, Self::Error> {
        let min_marks = q.min_marks.map(|v| check_marks("min_marks", v)).transpose()?;
        let max_marks = q.max_marks.map(|v| check_marks("max_marks", v)).transpose()?;
        let sort: Option<(SortField, SortOrder)> = match q.sort_by.as_deref() {
            Some(field) => Some((field.parse()?, SortOrder::parse_lenient(q.order.as_deref()))),
            None => None,
        };
        Ok(Self { class: q.class, min_marks, max_marks, sort })
    }
}

impl ListFilter {
    /// Class filter is an exact, case-sensitive match even though sorting and
    /// the duplicate check ignore case.
    pub fn matches(&self, s: &Student) -> bool {
        if let Some(class) = &self.class {
            if &s.class != class {
                return false;
            }
        }
        if let Some(min) = self.min_marks {
            if s.marks < min {
                return false;
            }
        }
        if let Some(max) = self.max_marks {
            if s.marks > max {
                return false;
            }
        }
        true
    }

    /// Filter then sort. Sorting is stable in both directions, so ties keep
    /// the incoming order.
    pub fn apply<I>(&self, records: I) -> Vec<Student>
    where
        I: IntoIterator<Item = Student>,
    {
        let mut out: Vec<Student> = records.into_iter().filter(|s| self.matches(s)).collect();
        if let Some((field, order)) = self.sort {
            match order {
                SortOrder::Asc => out.sort_by_cached_key(|s| field.key(s)),
                SortOrder::Desc => out.sort_by_cached_key(|s| Reverse(field.key(s))),
            }
        }
        out
    }
}
