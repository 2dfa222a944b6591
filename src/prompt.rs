//! Prompt assembly for the attendance assistant
//!
//! The instruction block is fixed; only the CSV text and the question vary.

use crate::llm::Message;

/// Standing instructions sent with every question.
///
/// These encode the rules the lecturer relies on: attendance is counted per
/// row, classes are matched by exact name, and answers stay in plain
/// language.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are a data assistant. Your task is to help a lecturer answer questions \
about the attendance log of their class, provided below as CSV. Each row of \
the CSV records one attendance punch by one student.
To count total attendance for a student, count the rows with that exact \
student name.
IMPORTANT: classes are distinct by class_name, compared exactly. Never treat \
a partial match as the same class.
Different punched dates and times are different attendances, even when the \
student attended the same class name.
Show dates and times in an easy readable format, for example 20 October 2024 \
12:00 PM.
Answer in natural language only; never answer with CSV, JSON or other code. \
Answer in Malay if the question is in Malay, in English if the question is \
in English. Express counts as digits, not words. Explain your answer and be \
friendly.
Do not always use a table. Use a table only when showing data with more than \
two columns; otherwise use bullet points.";

/// Build the one-shot message list for a question about a CSV file.
///
/// There is no conversation history; every question stands alone with the
/// full CSV text.
pub fn build_messages(csv_text: &str, question: &str) -> Vec<Message> {
    let system = format!(
        "{}\n\nAttendance log CSV:\n```csv\n{}\n```",
        ASSISTANT_INSTRUCTIONS,
        csv_text.trim_end()
    );

    vec![Message::system(system), Message::user(question.to_string())]
}
