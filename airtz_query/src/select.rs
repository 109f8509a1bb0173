//! SELECT statements
//!
//! A [`SelectStatement`] is assembled once, validated by [`SelectStatement::build`]
//! and rendered to the exact text sent to the endpoint.

use std::collections::HashSet;

use anyhow::{bail, Result};
use tracing::instrument;

use crate::pattern::{GraphPattern, Triple, Var};

/// Suffix the Wikibase label service appends to a variable name to bind its
/// label.
pub const LABEL_SUFFIX: &str = "Label";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectStatement {
    pub(crate) vars: Vec<Var>,
    pub(crate) patterns: Vec<GraphPattern>,
    pub(crate) label_language: Option<String>,
    pub(crate) limit: Option<usize>,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the given variables, in order
    #[instrument(skip(self))]
    pub fn vars(mut self, vars: &[&str]) -> Self {
        self.vars.extend(vars.iter().map(|v| Var::new(*v)));
        self
    }

    pub fn triple(mut self, triple: Triple) -> Self {
        self.patterns.push(GraphPattern::Triple(triple));
        self
    }

    pub fn union(mut self, branches: Vec<Vec<Triple>>) -> Self {
        self.patterns.push(GraphPattern::Union(branches));
        self
    }

    pub fn optional(mut self, triples: Vec<Triple>) -> Self {
        self.patterns.push(GraphPattern::Optional(triples));
        self
    }

    pub fn blank_line(mut self) -> Self {
        self.patterns.push(GraphPattern::Break);
        self
    }

    /// Resolve `?xLabel` for every bound `?x` through the Wikibase label
    /// service.
    pub fn label_service(mut self, language: &str) -> Self {
        self.label_language = Some(language.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn projected(&self) -> Vec<&str> {
        self.vars.iter().map(|v| v.name()).collect()
    }

    fn bound_vars(&self) -> HashSet<&str> {
        self.patterns
            .iter()
            .flat_map(|p| p.triples())
            .flat_map(|t| t.vars())
            .map(|v| v.name())
            .collect()
    }

    /// Validates the statement and renders it.
    pub fn build(&self) -> Result<String> {
        if self.vars.is_empty() {
            bail!("SELECT needs at least one projected variable");
        }
        if self.patterns.iter().all(|p| p.triples().is_empty()) {
            bail!("WHERE clause has no triple patterns");
        }
        if self.limit == Some(0) {
            bail!("LIMIT must be greater than zero");
        }

        let bound = self.bound_vars();
        for var in &self.vars {
            if bound.contains(var.name()) {
                continue;
            }
            let labelled = var
                .name()
                .strip_suffix(LABEL_SUFFIX)
                .is_some_and(|base| bound.contains(base));
            if !(labelled && self.label_language.is_some()) {
                bail!("projected variable {} is never bound", var);
            }
        }

        let vars: Vec<String> = self.vars.iter().map(|v| v.to_string()).collect();
        let mut query = format!("SELECT {}\nWHERE\n{{\n", vars.join(" "));
        for pattern in &self.patterns {
            query.push_str(&pattern.to_string());
            query.push('\n');
        }
        if let Some(language) = &self.label_language {
            query.push_str(&format!(
                "  SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{}\". }}\n",
                language
            ));
        }
        query.push('}');
        if let Some(limit) = self.limit {
            query.push_str(&format!("\nLIMIT {}", limit));
        }
        Ok(query)
    }
}
