use serde::{Deserialize, Serialize};

/// Body of `POST /medverify/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub input: String,
}

impl VerificationRequest {
    /// Returns `None` when the query is empty after trimming.
    ///
    /// The accepted query is sent as typed; trimming only decides validity.
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        Some(Self {
            input: query.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_queries() {
        assert!(VerificationRequest::new("").is_none());
        assert!(VerificationRequest::new("  \n\t ").is_none());
    }

    #[test]
    fn test_serializes_as_input_object() {
        let req = VerificationRequest::new("The MMR vaccine causes autism.").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "input": "The MMR vaccine causes autism." })
        );
    }
}
