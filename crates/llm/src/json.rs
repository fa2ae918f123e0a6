/// Pull the JSON object out of a model response, tolerating markdown fences
/// and leading chatter.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // ```json ... ``` or bare ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after_tick = &trimmed[start + 3..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
