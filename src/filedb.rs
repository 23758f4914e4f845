use codespan_reporting::files::{self, line_starts, Files};
use std::fs::read_to_string;
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct File {
    pub name: String,
    /// The source code of the file.
    pub source: String,
    /// The starting byte indices in the source code.
    pub line_starts: Vec<usize>,
}

/// 1-indexed line and display column of a byte in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl File {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = line_starts(&source).collect();
        return File {
            name: name.into(),
            source,
            line_starts,
        };
    }

    fn line_index(&self, byte_index: usize) -> usize {
        match self.line_starts.binary_search(&byte_index) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        }
    }

    fn line_start(&self, line_index: usize) -> Result<usize, files::Error> {
        use std::cmp::Ordering;

        match line_index.cmp(&self.line_starts.len()) {
            Ordering::Less => Ok(self.line_starts[line_index]),
            Ordering::Equal => Ok(self.source.len()),
            Ordering::Greater => Err(files::Error::LineTooLarge {
                given: line_index,
                max: self.line_starts.len() - 1,
            }),
        }
    }

    fn line_range(&self, line_index: usize) -> Result<core::ops::Range<usize>, files::Error> {
        let line_start = self.line_start(line_index)?;
        let next_line_start = self.line_start(line_index + 1)?;

        Ok(line_start..next_line_start)
    }
}

#[derive(Debug, Default)]
pub struct FileDb {
    pub files: Vec<File>,
}

impl FileDb {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file to the database, returning the handle that can be used to
    /// refer to it again.
    pub fn add(&mut self, name: &str, source: &str) -> u32 {
        let file_id = self.files.len() as u32;
        self.files.push(File::new(name, source));
        return file_id;
    }

    pub fn add_from_fs(&mut self, path: impl AsRef<Path>) -> io::Result<u32> {
        let path = path.as_ref();
        let source = read_to_string(path)?;
        return Ok(self.add(&path.to_string_lossy(), &source));
    }

    pub fn get(&self, file_id: u32) -> Option<&File> {
        self.files.get(file_id as usize)
    }

    pub fn location(&self, file_id: u32, byte_index: usize) -> Option<Location> {
        let file = self.get(file_id)?;
        if byte_index > file.source.len() {
            return None;
        }

        let line = file.line_index(byte_index);
        let line_start = file.line_starts[line];
        let prefix = file.source.get(line_start..byte_index)?;

        return Some(Location {
            line: line + 1,
            column: prefix.width() + 1,
        });
    }
}

impl<'a> Files<'a> for FileDb {
    type FileId = u32;
    type Name = &'a str;
    type Source = &'a str;

    fn name(&'a self, file_id: u32) -> Result<&'a str, files::Error> {
        let file = self.get(file_id).ok_or(files::Error::FileMissing)?;
        return Ok(&file.name);
    }

    fn source(&'a self, file_id: u32) -> Result<&'a str, files::Error> {
        let file = self.get(file_id).ok_or(files::Error::FileMissing)?;
        return Ok(&file.source);
    }

    fn line_index(&'a self, file_id: u32, byte_index: usize) -> Result<usize, files::Error> {
        let file = self.get(file_id).ok_or(files::Error::FileMissing)?;
        return Ok(file.line_index(byte_index));
    }

    fn line_range(
        &'a self,
        file_id: u32,
        line_index: usize,
    ) -> Result<core::ops::Range<usize>, files::Error> {
        let file = self.get(file_id).ok_or(files::Error::FileMissing)?;
        return file.line_range(line_index);
    }
}
