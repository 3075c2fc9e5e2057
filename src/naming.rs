use chrono::{DateTime, Utc};

/// Artifact path for a variant derived from `original`.
///
/// The original extension is dropped, the suffix (if any) is appended with
/// a dash, and the directory prefix is preserved: `news/a.jpg` becomes
/// `news/a.webp`, and its medium variant `news/a-medium.webp`. Same input,
/// same output; re-uploads with an identical base name overwrite.
pub fn artifact_path(original: &str, suffix: &str) -> String {
    let (dir, file) = match original.rfind('/') {
        Some(i) => (&original[..=i], &original[i + 1..]),
        None => ("", original),
    };
    let base = match file.rfind('.') {
        // Dotfiles and extensionless names keep everything.
        Some(0) | None => file,
        Some(i) => &file[..i],
    };
    if suffix.is_empty() {
        format!("{dir}{base}.webp")
    } else {
        format!("{dir}{base}-{suffix}.webp")
    }
}

/// Dated path for a freshly staged upload: `{prefix}/YYYY/MM/DD/{filename}`.
pub fn upload_path(prefix: &str, filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}/{}/{}",
        prefix.trim_end_matches('/'),
        at.format("%Y/%m/%d"),
        filename
    )
}
