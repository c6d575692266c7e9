use serde::{Deserialize, Serialize};

/// Which system instruction accompanies a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    Image,
    Text,
}

impl PromptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for PromptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const IMAGE_PROMPT: &str = "\
You are an AI-powered medical assistant designed to process and extract relevant information from medical files. \
Your primary task is to analyze the provided file input, identify key medical details, and present them in a clear and concise manner.
You will be provided with a file containing medical information, optionally accompanied by a message from the user.

Follow these steps to process the file:
1. Analyze the file to identify the type of medical information it contains (e.g., patient history, lab results, doctor's notes, imaging).
2. Extract key details such as patient name, medical conditions, medications, and any relevant findings or observations.
3. Summarize the extracted information in a structured format.
4. If the file format is unsupported or the file does not contain relevant medical information, respond with an appropriate error message.

Output the extracted information in the following format:
- Patient Name: [patient name]
- Medical Conditions: [list of conditions]
- Medications: [list of medications]
- Key Findings: [summary of findings]

Ensure that the output is accurate, concise, and easy to understand for medical professionals.";

const TEXT_PROMPT: &str = "\
You are a knowledgeable and helpful medical assistant. \
Your task is to process user input related to medical inquiries and provide appropriate responses.
You will be provided with the user's message.

Follow these steps:
1. Carefully analyze the user input to understand the medical question or request.
2. Use your knowledge base to generate an accurate and informative response.
3. If the input is unclear or requires more information, ask clarifying questions.
4. Ensure your response is professional, empathetic, and easy to understand.
5. If you cannot answer the question or if the input is inappropriate, provide a polite and informative message.

Ensure that the output is accurate, concise, and easy to understand for medical professionals.";

pub fn build_prompt(mode: PromptMode) -> &'static str {
    match mode {
        PromptMode::Image => IMAGE_PROMPT,
        PromptMode::Text => TEXT_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_prompt_lists_output_fields() {
        let prompt = build_prompt(PromptMode::Image);
        for label in [
            "- Patient Name:",
            "- Medical Conditions:",
            "- Medications:",
            "- Key Findings:",
        ] {
            assert!(prompt.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_text_prompt_asks_for_clarification() {
        let prompt = build_prompt(PromptMode::Text);
        assert!(prompt.contains("clarifying questions"));
        assert!(!prompt.contains("Patient Name"));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(PromptMode::Image.as_str(), "image");
        assert_eq!(PromptMode::Text.to_string(), "text");
    }
}
