use std::fmt;
use std::path::Path;

use anyhow::Result;

use super::document::Document;

/// Rendered output for a watched file.
///
/// Opaque to the gate; for the gnuplot renderer it is the path of the
/// produced image. An empty preview means "no usable output".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Preview(String);

impl Preview {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self(artifact.into())
    }

    pub const fn empty() -> Self {
        Self(String::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns buffer content into a preview.
///
/// Returning an empty [`Preview`] is not an error: it means the build
/// produced nothing usable. `Err` is reserved for the renderer itself failing.
pub trait Renderer: Send {
    fn render(&self, doc: &dyn Document) -> Result<Preview>;
}

/// Presentation surface for previews.
pub trait Viewer: Send {
    fn update(&self, preview: &Preview);
}
