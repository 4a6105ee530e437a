//! Raw line input across files and standard input.

use bytes::Bytes;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("Read error: {0}")]
    Read(#[from] io::Error),
}

/// Iterator over raw lines from the configured sources, in argument order.
///
/// `-` or an empty source list reads standard input. Sources are opened
/// lazily when reached, so a missing second file fails only after the first
/// has been fully emitted. Lines lose their trailing `\n` and nothing else;
/// a final line without a newline is still yielded.
pub struct LineReader {
    sources: std::vec::IntoIter<String>,
    current: Option<BufReader<Box<dyn Read>>>,
}

impl LineReader {
    pub fn new(files: Vec<String>) -> Self {
        let sources = if files.is_empty() {
            vec!["-".to_string()]
        } else {
            files
        };
        Self {
            sources: sources.into_iter(),
            current: None,
        }
    }

    fn open(name: &str) -> Result<BufReader<Box<dyn Read>>, InputError> {
        let source: Box<dyn Read> = if name == "-" {
            Box::new(io::stdin())
        } else {
            Box::new(File::open(name).map_err(|source| InputError::Open {
                path: name.to_string(),
                source,
            })?)
        };
        Ok(BufReader::new(source))
    }
}

impl Iterator for LineReader {
    type Item = Result<Bytes, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(reader) = self.current.as_mut() else {
                let name = self.sources.next()?;
                match Self::open(&name) {
                    Ok(reader) => self.current = Some(reader),
                    Err(err) => return Some(Err(err)),
                }
                continue;
            };

            let mut line = Vec::new();
            match reader.read_until(b'\n', &mut line) {
                // Source exhausted; move on to the next one.
                Ok(0) => self.current = None,
                Ok(_) => {
                    if line.last() == Some(&b'\n') {
                        line.pop();
                    }
                    return Some(Ok(Bytes::from(line)));
                }
                Err(err) => {
                    self.current = None;
                    return Some(Err(InputError::Read(err)));
                }
            }
        }
    }
}
