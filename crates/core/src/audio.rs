//! Candidate source paths for a recorded clip.
//!
//! Clips are shipped under either `/assets/audio/` or `/audio/`; players try
//! each candidate in order until one loads.

/// Expand a clip path into the ordered list of sources a player should try.
#[must_use]
pub fn candidate_sources(src: &str) -> Vec<String> {
    let src = src.trim();
    if src.is_empty() {
        return Vec::new();
    }

    let swapped_root = match src.strip_prefix("/assets/") {
        Some(rest) => format!("/{rest}"),
        None => format!("/assets{src}"),
    };
    let swapped_audio_dir = if let Some(rest) = src.strip_prefix("/audio/") {
        format!("/assets/audio/{rest}")
    } else if let Some(rest) = src.strip_prefix("/assets/audio/") {
        format!("/audio/{rest}")
    } else {
        src.to_string()
    };

    let mut out = Vec::with_capacity(3);
    for candidate in [src.to_string(), swapped_root, swapped_audio_dir] {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_path_gets_both_fallbacks() {
        assert_eq!(
            candidate_sources("/assets/audio/1-ASD.mp3"),
            vec!["/assets/audio/1-ASD.mp3", "/audio/1-ASD.mp3"]
        );
    }

    #[test]
    fn bare_audio_path_gets_assets_prefix() {
        assert_eq!(
            candidate_sources("/audio/9-VSD.mp3"),
            vec!["/audio/9-VSD.mp3", "/assets/audio/9-VSD.mp3"]
        );
    }

    #[test]
    fn unrelated_path_gets_assets_prefix_only() {
        assert_eq!(
            candidate_sources("/clips/x.mp3"),
            vec!["/clips/x.mp3", "/assets/clips/x.mp3"]
        );
    }

    #[test]
    fn blank_source_has_no_candidates() {
        assert!(candidate_sources("  ").is_empty());
    }
}
