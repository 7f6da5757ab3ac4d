use std::ops::Range;

use concord_protocol::WindowShape;

use crate::error::AnnotateError;

/// Window sizing around a matched token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Tokens taken on a side where the marker was seen.
    pub half_width: usize,
    /// Tokens taken on a side without the marker.
    pub narrow_radius: usize,
    /// Literal, case-sensitive token that widens the window.
    pub marker: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            half_width: 10,
            narrow_radius: 3,
            marker: "ad".to_string(),
        }
    }
}

/// Slice of the document's tokens emitted for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window<'a, S> {
    tokens: &'a [S],
    range: Range<usize>,
    shape: WindowShape,
}

impl<'a, S: AsRef<str>> Window<'a, S> {
    pub fn tokens(&self) -> &'a [S] {
        self.tokens
    }

    /// Position of the window in the document's token sequence.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn shape(&self) -> WindowShape {
        self.shape
    }

    pub fn has_marker(&self) -> bool {
        self.shape.has_marker()
    }

    pub fn joined(&self) -> String {
        join_tokens(self.tokens)
    }
}

pub(crate) fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

/// Cuts the token window for the match at `index`.
///
/// The look-back slice is `[index - half_width, index)` and the look-ahead
/// slice is `[index, index + half_width)`, both clipped to the document.
/// Each side is taken `half_width` wide if the marker occurs in its slice,
/// `narrow_radius` wide otherwise.
pub fn extract_window<'a, S: AsRef<str>>(
    tokens: &'a [S],
    index: usize,
    config: &WindowConfig,
) -> Result<Window<'a, S>, AnnotateError> {
    let len = tokens.len();
    if index >= len {
        return Err(AnnotateError::IndexOutOfRange { index, len });
    }

    let wide_start = index.saturating_sub(config.half_width);
    let wide_end = index.saturating_add(config.half_width).min(len);
    let narrow_start = index.saturating_sub(config.narrow_radius);
    let narrow_end = index.saturating_add(config.narrow_radius).min(len);

    let has = |slice: &[S]| slice.iter().any(|t| t.as_ref() == config.marker);
    let back = has(&tokens[wide_start..index]);
    let ahead = has(&tokens[index..wide_end]);

    let shape = WindowShape::from_sides(back, ahead);
    let range = match shape {
        WindowShape::Wide => wide_start..wide_end,
        WindowShape::WideBack => wide_start..narrow_end,
        WindowShape::WideAhead => narrow_start..wide_end,
        WindowShape::Narrow => narrow_start..narrow_end,
    };

    Ok(Window {
        tokens: &tokens[range.clone()],
        range,
        shape,
    })
}
