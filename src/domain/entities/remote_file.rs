//! RemoteFile entity - one file on the target host
//!
//! Each operation issues exactly the remote commands it needs; nothing is
//! cached locally between calls.

use regex::Regex;
use tracing::debug;

use crate::domain::ports::RemoteHost;
use crate::domain::value_objects::RemotePath;
use crate::error::{DeployerError, DeployerResult};

/// A file at `directory/name` on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    directory: RemotePath,
    name: String,
    path: RemotePath,
}

impl RemoteFile {
    pub fn new(directory: RemotePath, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = directory.join(&name);
        Self {
            directory,
            name,
            path,
        }
    }

    pub fn directory(&self) -> &RemotePath {
        &self.directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    /// Create the file if absent; leave it untouched if present
    pub fn touch<H: RemoteHost>(&self, host: &H) -> DeployerResult<()> {
        host.run(&format!("touch {}", self.path.quoted()))?;
        Ok(())
    }

    /// Append `text` followed by a newline
    ///
    /// Not idempotent: calling it twice with the same text leaves two copies
    /// in the file.
    pub fn append<H: RemoteHost>(&self, host: &H, text: &str) -> DeployerResult<()> {
        let mut input = String::with_capacity(text.len() + 1);
        input.push_str(text);
        input.push('\n');
        host.run_with_input(&format!("cat >> {}", self.path.quoted()), &input)?;
        Ok(())
    }

    /// Read the whole file
    ///
    /// Content that is not valid UTF-8 is an error; decoding it lossily and
    /// writing it back would corrupt the file.
    pub fn read<H: RemoteHost>(&self, host: &H) -> DeployerResult<String> {
        let output = host.run(&format!("cat {}", self.path.quoted()))?;
        if !output.is_utf8() {
            return Err(DeployerError::NotUtf8 {
                path: self.path.to_string(),
            });
        }
        Ok(output.stdout)
    }

    /// Replace the file content
    ///
    /// The content lands in `<path>.tmp` first and is renamed over the file
    /// only once fully written, so a dropped connection leaves the old file.
    pub fn write<H: RemoteHost>(&self, host: &H, content: &str) -> DeployerResult<()> {
        let staging = RemotePath::new(format!("{}.tmp", self.path)).quoted();
        host.run_with_input(
            &format!(
                "cat > {staging} && mv {staging} {}",
                self.path.quoted()
            ),
            content,
        )?;
        Ok(())
    }

    /// Regex find/replace across the file, line by line
    ///
    /// `replacement` may refer to capture groups as `$1` / `${name}`.
    pub fn substitute<H: RemoteHost>(
        &self,
        host: &H,
        pattern: &str,
        replacement: &str,
    ) -> DeployerResult<()> {
        let regex = Regex::new(pattern).map_err(|source| DeployerError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let content = self.read(host)?;
        let updated = substitute_lines(&content, &regex, replacement);
        if updated == content {
            debug!(path = %self.path, pattern, "substitution matched nothing");
            return Ok(());
        }
        self.write(host, &updated)
    }
}

/// Apply `regex` to every line of `content`, replacing all matches
///
/// Line endings are preserved, and `$` in the pattern anchors at the end of
/// each line because the regex only ever sees one line.
pub fn substitute_lines(content: &str, regex: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (body, ending) = match line.strip_suffix('\n') {
            Some(body) => match body.strip_suffix('\r') {
                Some(body) => (body, "\r\n"),
                None => (body, "\n"),
            },
            None => (line, ""),
        };
        out.push_str(&regex.replace_all(body, replacement));
        out.push_str(ending);
    }
    out
}
