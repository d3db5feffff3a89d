use crate::models::Report;

/// Render the console output: summary, keywords, then quiz.
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("\n=== SUMMARY ===\n\n");
    out.push_str(&format!("{}\n", report.summary));

    out.push_str("\n=== KEYWORDS ===\n\n");
    for (i, keyword) in report.keywords.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, keyword));
    }

    out.push_str("\n=== QUIZ ===\n\n");
    for (i, item) in report.quiz.iter().enumerate() {
        out.push_str(&format!("Q{}. {}\n", i + 1, item.question));
        for (j, option) in item.options.iter().enumerate() {
            out.push_str(&format!("   {}) {}\n", j + 1, option));
        }
        out.push_str(&format!("   [Correct: option {}]\n\n", item.answer_index + 1));
    }

    out
}
