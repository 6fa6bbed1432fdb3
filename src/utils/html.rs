use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Question prompts, explanations and option bodies are authored as rich text
/// and echoed back to browser clients, so everything stored goes through a
/// whitelist-based sanitizer first: safe tags (like <b>, <p>) survive,
/// dangerous tags (like <script>, <iframe>) and attributes (like onclick)
/// are stripped.
///
/// Note: the <script> tag is removed together with its entire content.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
