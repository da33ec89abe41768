//! Prompt composition for generated submission feedback.
//!
//! The instruction template is fixed: a lecturer persona in the system role,
//! and a user message carrying the assignment title, the submission content
//! and a four-part structure request. Composition is pure so it can be
//! asserted on without touching the network.

/// System-role instruction establishing the lecturer persona.
pub const SYSTEM_PROMPT: &str = "You are an experienced university lecturer providing \
constructive feedback on student submissions. Analyze the content thoroughly and provide \
balanced feedback that highlights strengths and areas for improvement.";

/// Title used when the caller did not supply one.
pub const DEFAULT_ASSIGNMENT_TITLE: &str = "Academic Submission";

/// Builds the user-role message for a feedback request.
pub fn build_user_prompt(assignment_title: Option<&str>, submission_content: &str) -> String {
    format!(
        "Assignment: {}\n\n\
         Student Submission:\n{}\n\n\
         Please provide detailed feedback covering:\n\
         1. Strengths of the submission\n\
         2. Areas that need improvement\n\
         3. Specific suggestions for enhancement\n\
         4. Overall assessment\n\n\
         Keep the feedback professional, constructive, and encouraging.",
        assignment_title.unwrap_or(DEFAULT_ASSIGNMENT_TITLE),
        submission_content
    )
}
