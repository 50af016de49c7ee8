use crate::model::ClassifiedRecord;

/// Markdown body: one bullet per newly free game, then an optional "Coming soon" section.
pub fn build_message(new_games: &[ClassifiedRecord], upcoming: &[ClassifiedRecord]) -> String {
    let mut lines: Vec<String> = new_games
        .iter()
        .map(|g| format!("- **{}** [link]({}) free until {}", g.title, g.url, g.date))
        .collect();

    if !upcoming.is_empty() {
        lines.push(String::new());
        lines.push("### Coming soon".to_string());
        lines.extend(
            upcoming
                .iter()
                .map(|g| format!("- **{}** free from {}", g.title, g.date)),
        );
    }

    lines.join("\n")
}
