use std::io::{self, Write};

use crate::core::FileEntry;

pub const OPEN_DELIMITER: char = '【';
pub const CLOSE_DELIMITER: char = '】';

/// Streams entries into the flat report format:
///
/// ```text
/// <relative/path>:
/// 【<content>】
///
/// ```
///
/// Delimiters inside the content are written as-is.
pub struct ReportWriter<W: Write> {
    inner: W,
    entries: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Self {
        ReportWriter { inner, entries: 0 }
    }

    pub fn write_entry(&mut self, entry: &FileEntry) -> io::Result<()> {
        write!(
            self.inner,
            "{}:\n{OPEN_DELIMITER}{}{CLOSE_DELIMITER}\n\n",
            entry.path, entry.content
        )?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RelativePath;

    fn entry(path: &str, content: &str) -> FileEntry {
        FileEntry {
            path: RelativePath::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_entry_format() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_entry(&entry("Models/User.cs", "class User {}")).unwrap();
        writer.write_entry(&entry("Program.cs", "line one\nline two\n")).unwrap();
        assert_eq!(writer.entries(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "Models/User.cs:\n【class User {}】\n\nProgram.cs:\n【line one\nline two\n】\n\n"
        );
    }

    #[test]
    fn test_delimiters_in_content_are_not_escaped() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_entry(&entry("a.cs", "// 【x】")).unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output, "a.cs:\n【// 【x】】\n\n");
    }
}
