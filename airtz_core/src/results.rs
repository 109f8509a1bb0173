//! SPARQL 1.1 Query Results JSON Format
//!
//! Only what a SELECT response carries is modelled: the projected variable
//! names and one binding map per row. Variables left unbound by an
//! `OPTIONAL` block are simply missing from the row's map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An RDF term bound to a variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Term {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
    /// Pre-1.1 spelling of a literal with a datatype, still emitted by some
    /// endpoints.
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl Term {
    pub fn value(&self) -> &str {
        match self {
            Term::Uri { value }
            | Term::Literal { value, .. }
            | Term::TypedLiteral { value, .. }
            | Term::Bnode { value } => value,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Term::Uri { value }
            | Term::Literal { value, .. }
            | Term::TypedLiteral { value, .. }
            | Term::Bnode { value } => value,
        }
    }
}

pub type Binding = HashMap<String, Term>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub bindings: Vec<Binding>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlResults {
    pub head: Head,
    pub results: Bindings,
}

impl SparqlResults {
    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// Variables in `expected` the response header does not project.
    pub fn missing_vars<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .filter(|var| !self.head.vars.iter().any(|v| v == *var))
            .copied()
            .collect()
    }

    /// Flattens every row into a JSON object of `variable -> lexical value`,
    /// ready to be deserialized into a typed record.
    pub fn into_rows(self) -> Vec<Value> {
        self.results
            .bindings
            .into_iter()
            .map(binding_to_value)
            .collect()
    }
}

pub fn binding_to_value(binding: Binding) -> Value {
    let object: Map<String, Value> = binding
        .into_iter()
        .map(|(var, term)| (var, Value::String(term.into_value())))
        .collect();
    Value::Object(object)
}
