use serde::{Deserialize, Serialize};

/// Judgment value the service emits when its own AI call failed.
pub const SERVICE_FAILURE_JUDGMENT: &str = "ERROR";

/// Verdict payload returned by the verification service.
///
/// Unknown fields (`claims_processed`, `debug_message`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub credibility_score: u8,
    pub llm_judgment: String,
    pub reasoning: String,
    pub extracted_terms: Vec<String>,
    pub source_origin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_reference: Option<String>,
}

impl VerificationResult {
    pub fn is_service_failure(&self) -> bool {
        self.llm_judgment == SERVICE_FAILURE_JUDGMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_full_service_payload() {
        let body = serde_json::json!({
            "credibility_score": 12,
            "llm_judgment": "Contradicted",
            "trusted_reference": "WHO",
            "reasoning": "No link found.",
            "source_origin": "User-submitted Text (Linguistically Assessed)",
            "claims_processed": 1,
            "extracted_terms": ["MMR vaccine", "autism"],
            "debug_message": "Full 5-Stage pipeline executed with stability fallback."
        });
        let result: VerificationResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.credibility_score, 12);
        assert_eq!(result.trusted_reference.as_deref(), Some("WHO"));
        assert_eq!(result.extracted_terms, vec!["MMR vaccine", "autism"]);
        assert!(!result.is_service_failure());
    }

    #[test]
    fn test_trusted_reference_is_optional() {
        let body = serde_json::json!({
            "credibility_score": 80,
            "llm_judgment": "Supported",
            "reasoning": "",
            "source_origin": "x",
            "extracted_terms": []
        });
        let result: VerificationResult = serde_json::from_value(body).unwrap();
        assert!(result.trusted_reference.is_none());
    }

    #[test]
    fn test_missing_terms_is_a_decode_error() {
        let body = serde_json::json!({
            "credibility_score": 80,
            "llm_judgment": "Supported",
            "reasoning": "",
            "source_origin": "x"
        });
        assert!(serde_json::from_value::<VerificationResult>(body).is_err());
    }

    #[test]
    fn test_score_above_u8_range_is_rejected() {
        let body = serde_json::json!({
            "credibility_score": 300,
            "llm_judgment": "Supported",
            "reasoning": "",
            "source_origin": "x",
            "extracted_terms": []
        });
        assert!(serde_json::from_value::<VerificationResult>(body).is_err());
    }
}
