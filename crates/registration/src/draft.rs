//! Registration data model

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Names of the form controls, also used as `ErrorMap` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Mobile,
    Designation,
    Gender,
    Course,
    Image,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Mobile,
        Field::Designation,
        Field::Gender,
        Field::Course,
        Field::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Mobile => "mobile",
            Field::Designation => "designation",
            Field::Gender => "gender",
            Field::Course => "course",
            Field::Image => "image",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Designation {
    HR,
    Manager,
    Sales,
}

impl Designation {
    pub const ALL: [Designation; 3] = [Designation::HR, Designation::Manager, Designation::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::HR => "HR",
            Designation::Manager => "Manager",
            Designation::Sales => "Sales",
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Designation {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Designation::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| FormError::UnknownOption {
                field: Field::Designation,
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| FormError::UnknownOption {
                field: Field::Gender,
                value: s.to_string(),
            })
    }
}

/// Course options. Declaration order is the canonical listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Course {
    MCA,
    BCA,
    BSC,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::MCA, Course::BCA, Course::BSC];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::MCA => "MCA",
            Course::BCA => "BCA",
            Course::BSC => "BSC",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FormError::UnknownOption {
                field: Field::Course,
                value: s.to_string(),
            })
    }
}

/// Reference to a picked image file. Only the name takes part in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

impl ImageRef {
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size_bytes: 0,
        }
    }

    /// Text after the last `.` in the file name, if there is a `.` at all
    pub fn extension(&self) -> Option<&str> {
        self.file_name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// In-progress, unsubmitted form record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: Option<Designation>,
    pub gender: Option<Gender>,
    pub course: BTreeSet<Course>,
    pub image: Option<ImageRef>,
}

/// A draft that passed validation, with every selection resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: Designation,
    pub gender: Gender,
    pub course: Vec<Course>,
    pub image: ImageRef,
}
