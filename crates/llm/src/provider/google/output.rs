use serde::Deserialize;

/// Response from Google Gemini GenerateContent API.
#[derive(Debug, Deserialize)]
pub(super) struct GoogleGenerateResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidate {
    content: Option<GoogleCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidateContent {
    #[serde(default)]
    parts: Vec<GoogleCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidatePart {
    text: Option<String>,
}

impl GoogleGenerateResponse {
    /// The text at `candidates[0].content.parts[0].text`.
    pub(super) fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        candidate.content?.parts.into_iter().next()?.text
    }
}
