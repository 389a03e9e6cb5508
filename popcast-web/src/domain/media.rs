pub(crate) const YOUTUBE_ID_LEN: usize = 11;

/// Broad media family of an upload, judged by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    fn prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Audio => "audio/",
            MediaKind::Video => "video/",
        }
    }

    pub(crate) fn accepts(self, content_type: &str) -> bool {
        content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(self.prefix())
    }
}

/// Extracts the 11-character video id from the usual YouTube link shapes:
/// `youtu.be/ID`, `/v/ID`, `/u/x/ID`, `/embed/ID` and `watch?v=ID`.
///
/// The last marker in the link wins, and the id runs until `#`, `&` or `?`.
pub(crate) fn youtube_video_id(link: &str) -> Option<String> {
    let chars: Vec<char> = link.trim().chars().collect();

    let (start, marker_len) = (0..chars.len())
        .rev()
        .find_map(|start| marker_at(&chars[start..]).map(|len| (start, len)))?;

    let mut rest = &chars[start + marker_len..];
    for optional in ['?', 'v', '='] {
        if rest.first() == Some(&optional) {
            rest = &rest[1..];
        }
    }

    let id: String = rest
        .iter()
        .take_while(|ch| !matches!(ch, '#' | '&' | '?'))
        .collect();

    (id.chars().count() == YOUTUBE_ID_LEN).then_some(id)
}

/// Length of the link marker starting at `s[0]`, if any.
fn marker_at(s: &[char]) -> Option<usize> {
    let starts_with = |literal: &str| {
        let literal: Vec<char> = literal.chars().collect();
        s.len() >= literal.len() && s[..literal.len()] == literal[..]
    };

    // `youtu?be/` where `?` is any character.
    if s.len() >= 9 && starts_with("youtu") && s[6..9] == ['b', 'e', '/'] {
        return Some(9);
    }
    if starts_with("v/") {
        return Some(2);
    }
    if s.len() >= 5
        && starts_with("/u/")
        && (s[3].is_alphanumeric() || s[3] == '_')
        && s[4] == '/'
    {
        return Some(5);
    }
    if starts_with("embed/") {
        return Some(6);
    }
    if starts_with("watch?") {
        return Some(6);
    }
    None
}
