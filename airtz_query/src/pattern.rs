//! Graph patterns of a WHERE clause
//!
//! Patterns render to the indented, one-statement-per-line layout the
//! Wikidata query service examples use.

use std::fmt::{self, Display, Formatter};

use airtz_core::{Item, Property};

const INDENT: &str = "  ";

/// A query variable, written without its leading `?`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Var(pub String);

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// Subject or object position of a triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Var(Var),
    Item(Item),
}

impl Node {
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Node::Var(var) => Some(var),
            Node::Item(_) => None,
        }
    }
}

impl From<Item> for Node {
    fn from(item: Item) -> Self {
        Node::Item(item)
    }
}

impl From<&str> for Node {
    fn from(var: &str) -> Self {
        Node::Var(Var::new(var))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Var(var) => write!(f, "{}", var),
            Node::Item(item) => write!(f, "{}", item),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triple {
    pub subject: Node,
    pub predicate: Property,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: impl Into<Node>, predicate: Property, object: impl Into<Node>) -> Self {
        Triple {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    pub fn vars(&self) -> impl Iterator<Item = &Var> {
        self.subject.as_var().into_iter().chain(self.object.as_var())
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}.", self.subject, self.predicate, self.object)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphPattern {
    Triple(Triple),
    /// `{ a } UNION { b } ...`, one alternative per line
    Union(Vec<Vec<Triple>>),
    /// `OPTIONAL { ... }`; every triple must match for any of its variables
    /// to be bound
    Optional(Vec<Triple>),
    /// Empty line separating groups of patterns
    Break,
}

impl GraphPattern {
    pub fn triples(&self) -> Vec<&Triple> {
        match self {
            GraphPattern::Triple(triple) => vec![triple],
            GraphPattern::Union(branches) => branches.iter().flatten().collect(),
            GraphPattern::Optional(triples) => triples.iter().collect(),
            GraphPattern::Break => vec![],
        }
    }
}

impl Display for GraphPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GraphPattern::Triple(triple) => write!(f, "{}{}", INDENT, triple),
            GraphPattern::Union(branches) => {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(|branch| {
                        let inner: Vec<String> = branch.iter().map(|t| t.to_string()).collect();
                        format!("{}{{ {} }}", INDENT, inner.join(" "))
                    })
                    .collect();
                f.write_str(&rendered.join(&format!("\n{}UNION\n", INDENT)))
            }
            GraphPattern::Optional(triples) => {
                writeln!(f, "{}OPTIONAL {{", INDENT)?;
                for triple in triples {
                    writeln!(f, "{}{}{}", INDENT, INDENT, triple)?;
                }
                write!(f, "{}}}", INDENT)
            }
            GraphPattern::Break => Ok(()),
        }
    }
}
