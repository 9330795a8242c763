use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AdvisorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// A validated member, ready for evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diabetic: bool,
    pub screening_history: Option<String>,
}

impl Member {
    pub fn new(name: &str, age: u32, gender: Gender, diabetic: bool) -> Self {
        Self {
            name: name.to_string(),
            age,
            gender,
            diabetic,
            screening_history: None,
        }
    }

    pub fn with_history(mut self, history: &str) -> Self {
        self.screening_history = Some(history.to_string());
        self
    }
}

/// Loosely typed cell as it arrives from tabular input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Arrays, tables and datetimes; never valid for a member cell
    Nested(toml::Value),
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Float(x) => write!(f, "{:?}", x),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Nested(v) => write!(f, "{}", v),
        }
    }
}

/// One member row before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberRecord {
    pub name: Option<RawValue>,
    pub age: Option<RawValue>,
    pub gender: Option<RawValue>,
    pub diabetic: Option<RawValue>,
    pub screening_history: Option<RawValue>,
}

impl MemberRecord {
    /// Name used in error messages, even when the record has none
    pub fn display_name(&self) -> String {
        let name = self.name.as_ref().map(|n| n.to_string()).unwrap_or_default();
        match name.trim() {
            "" => "<unnamed>".to_string(),
            trimmed => trimmed.to_string(),
        }
    }

    /// The name cell, when it holds text
    pub fn name_text(&self) -> Option<&str> {
        match &self.name {
            Some(RawValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

fn text_cell<'a>(member: &str, field: &str, raw: &'a RawValue) -> Result<&'a str> {
    match raw {
        RawValue::Text(s) => Ok(s.as_str()),
        other => Err(AdvisorError::input(
            member,
            format!("{} '{}' is not text", field, other),
        )),
    }
}

fn parse_age(member: &str, raw: &RawValue) -> Result<u32> {
    let years = match raw {
        RawValue::Integer(i) => *i,
        RawValue::Float(x) if x.fract() == 0.0 && *x >= 0.0 && *x <= u32::MAX as f64 => *x as i64,
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AdvisorError::input(member, format!("age '{}' is not a whole number", s)))?,
        other => {
            return Err(AdvisorError::input(
                member,
                format!("age '{}' is not a whole number", other),
            ))
        }
    };

    u32::try_from(years)
        .map_err(|_| AdvisorError::input(member, format!("age {} is out of range", years)))
}

fn parse_flag(member: &str, raw: &RawValue) -> Result<bool> {
    match raw {
        RawValue::Bool(b) => Ok(*b),
        RawValue::Integer(0) => Ok(false),
        RawValue::Integer(1) => Ok(true),
        RawValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Ok(true),
            "no" | "n" | "false" | "0" => Ok(false),
            _ => Err(AdvisorError::input(
                member,
                format!("diabetic flag '{}' is not yes/no", s),
            )),
        },
        other => Err(AdvisorError::input(
            member,
            format!("diabetic flag '{}' is not yes/no", other),
        )),
    }
}

impl TryFrom<MemberRecord> for Member {
    type Error = AdvisorError;

    fn try_from(record: MemberRecord) -> Result<Self> {
        let member = record.display_name();

        let name = record
            .name
            .as_ref()
            .ok_or_else(|| AdvisorError::input(&member, "missing name"))
            .and_then(|raw| text_cell(&member, "name", raw))?
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(AdvisorError::input(&member, "missing name"));
        }

        let age = record
            .age
            .as_ref()
            .ok_or_else(|| AdvisorError::input(&member, "missing age"))
            .and_then(|raw| parse_age(&member, raw))?;

        let gender = record
            .gender
            .as_ref()
            .ok_or_else(|| AdvisorError::input(&member, "missing gender"))
            .and_then(|raw| text_cell(&member, "gender", raw))?
            .parse::<Gender>()
            .map_err(|e| AdvisorError::input(&member, e))?;

        let diabetic = record
            .diabetic
            .as_ref()
            .ok_or_else(|| AdvisorError::input(&member, "missing diabetic flag"))
            .and_then(|raw| parse_flag(&member, raw))?;

        let screening_history = record
            .screening_history
            .as_ref()
            .map(|raw| text_cell(&member, "screening history", raw).map(str::to_string))
            .transpose()?;

        Ok(Member {
            name,
            age,
            gender,
            diabetic,
            screening_history,
        })
    }
}
