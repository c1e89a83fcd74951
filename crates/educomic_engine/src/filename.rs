use sha2::{Digest, Sha256};

const MAX_THEME_LEN: usize = 80;

/// Windows-safe, deterministic export name:
/// `educomic-{sanitized_theme}--{short_hash(payload)}.{ext}`
pub fn export_filename(theme: Option<&str>, payload: &[u8], content_type: &str) -> String {
    let sanitized = sanitize_theme(theme.unwrap_or("untitled"));
    let hash = short_hash(payload);
    let ext = extension_for(content_type);
    format!("educomic-{sanitized}--{hash}.{ext}")
}

fn sanitize_theme(input: &str) -> String {
    // Map forbidden characters to underscores, collapsing runs of them.
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let mapped = if is_forbidden(c) { '_' } else { c };
        if mapped == '_' {
            if !prev_underscore {
                cleaned.push('_');
            }
            prev_underscore = true;
        } else {
            cleaned.push(mapped);
            prev_underscore = false;
        }
    }
    let mut name = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if name.is_empty() {
        name = "untitled".to_string();
    }
    if name.len() > MAX_THEME_LEN {
        let mut cut = MAX_THEME_LEN;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        // The collaborator answers PNG unless told otherwise.
        _ => "png",
    }
}
