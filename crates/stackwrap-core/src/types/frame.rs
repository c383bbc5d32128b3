//! Stack frame type.

use std::fmt;

/// One position in a call stack.
///
/// Frames are immutable once built. They come from two places: symbolicating a
/// captured instruction pointer, or a `func(...)` / `\tfile:line` pair in a panic
/// dump. A frame is only built when all four fields are known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame
{
    file: String,
    line_number: u32,
    package: String,
    name: String,
}

impl Frame
{
    /// Construct a frame from its parts.
    pub fn new(file: impl Into<String>, line_number: u32, package: impl Into<String>, name: impl Into<String>) -> Self
    {
        Self {
            file: file.into(),
            line_number,
            package: package.into(),
            name: name.into(),
        }
    }

    /// Source file path.
    pub fn file(&self) -> &str
    {
        &self.file
    }

    /// 1-based line number within [`Frame::file`].
    pub fn line_number(&self) -> u32
    {
        self.line_number
    }

    /// Declaring module or package path, possibly empty.
    pub fn package(&self) -> &str
    {
        &self.package
    }

    /// Bare function or method name.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// `package.name`, or just `name` when there is no package.
    pub fn qualified_name(&self) -> String
    {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// Renders as `package.name\n\tfile:line\n`.
impl fmt::Display for Frame
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}\n\t{}:{}\n", self.qualified_name(), self.file, self.line_number)
    }
}

/// Concatenate the rendering of every frame.
pub fn render(frames: &[Frame]) -> String
{
    frames.iter().map(ToString::to_string).collect()
}
