use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::StepRecord;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(StepId);
id_newtype!(RowKey);

/// One entry of the edited sequence.
///
/// Two steps with the same name and value are still distinct; compare by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    pub value: f32,
}

impl Step {
    pub fn new(id: StepId, name: impl Into<String>, value: f32) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }

    pub fn to_record(&self) -> StepRecord {
        StepRecord {
            name: self.name.clone(),
            value: self.value,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepField {
    Name,
    Value,
}

impl StepField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Value => "value",
        }
    }
}
