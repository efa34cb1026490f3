use crate::core::GraphQLInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied inclusion toggles.
///
/// GraphQL operations only need their toggle. REST operations additionally
/// need a JSON body on at least one side of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    #[serde(default = "default_true")]
    pub include_graphql: bool,
    #[serde(default = "default_true")]
    pub include_rest: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            include_graphql: true,
            include_rest: true,
        }
    }
}

impl FilterPolicy {
    pub fn new(include_graphql: bool, include_rest: bool) -> Self {
        Self {
            include_graphql,
            include_rest,
        }
    }

    pub fn admits(
        &self,
        graphql: Option<&GraphQLInfo>,
        request_body: Option<&Value>,
        response_body: Option<&Value>,
    ) -> bool {
        match graphql {
            Some(_) => self.include_graphql,
            None => self.include_rest && (request_body.is_some() || response_body.is_some()),
        }
    }
}
